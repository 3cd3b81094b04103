//! HTML bodies for the two emails sent per submission.
//!
//! Rendering is pure: the same kind and data always produce the same
//! subject and body. User-provided values are HTML escaped by askama.

use askama::Template;

use crate::dto::{SubmissionData, SubmissionKind};

/// Longest message excerpt quoted back to the submitter, in characters.
pub const SUMMARY_LIMIT: usize = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplate {
    pub subject: String,
    pub html: String,
}

#[derive(Template)]
#[template(path = "emails/operator_contact.html")]
struct OperatorContactHtml<'a> {
    site_name: &'a str,
    name: Option<&'a str>,
    email: Option<&'a str>,
    phone: Option<&'a str>,
    subject: Option<&'a str>,
    message: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "emails/operator_chat.html")]
struct OperatorChatHtml<'a> {
    site_name: &'a str,
    chat_id: Option<&'a str>,
    name: Option<&'a str>,
    email: Option<&'a str>,
    message: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "emails/confirmation.html")]
struct ConfirmationHtml<'a> {
    site_name: &'a str,
    name: Option<&'a str>,
    kind_label: &'a str,
    summary: Option<String>,
}

/// Shortens `message` to [`SUMMARY_LIMIT`] characters, appending `...` when cut.
pub fn summarize(message: &str) -> String {
    if message.chars().count() > SUMMARY_LIMIT {
        let head: String = message.chars().take(SUMMARY_LIMIT).collect();
        format!("{head}...")
    } else {
        message.to_string()
    }
}

/// Email sent to the site operator for every submission.
pub fn render_operator_notification(
    kind: SubmissionKind,
    data: &SubmissionData,
    site_name: &str,
) -> askama::Result<EmailTemplate> {
    match kind {
        SubmissionKind::Contact => {
            let subject = data.subject.as_deref().map_or_else(
                || {
                    format!(
                        "New contact form submission from {}",
                        data.name.as_deref().unwrap_or("Anonymous")
                    )
                },
                |s| format!("New contact form submission: {s}"),
            );
            let html = OperatorContactHtml {
                site_name,
                name: data.name.as_deref(),
                email: data.email.as_deref(),
                phone: data.phone.as_deref(),
                subject: data.subject.as_deref(),
                message: data.message.as_deref(),
            }
            .render()?;
            Ok(EmailTemplate { subject, html })
        }
        SubmissionKind::Chat => {
            let from = data
                .name
                .as_deref()
                .or(data.email.as_deref())
                .unwrap_or("a visitor");
            let html = OperatorChatHtml {
                site_name,
                chat_id: data.chat_id.as_deref(),
                name: data.name.as_deref(),
                email: data.email.as_deref(),
                message: data.message.as_deref(),
            }
            .render()?;
            Ok(EmailTemplate {
                subject: format!("New chat message from {from}"),
                html,
            })
        }
    }
}

/// Acknowledgement sent back to the submitter.
pub fn render_confirmation(
    kind: SubmissionKind,
    data: &SubmissionData,
    site_name: &str,
) -> askama::Result<EmailTemplate> {
    let kind_label = match kind {
        SubmissionKind::Contact => "message",
        SubmissionKind::Chat => "chat message",
    };
    let html = ConfirmationHtml {
        site_name,
        name: data.name.as_deref(),
        kind_label,
        summary: data.message.as_deref().map(summarize),
    }
    .render()?;

    Ok(EmailTemplate {
        subject: format!("Thanks for reaching out to {site_name}"),
        html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> SubmissionData {
        SubmissionData {
            name: Some("Ada Lovelace".into()),
            email: Some("ada@example.com".into()),
            subject: Some("Project inquiry".into()),
            message: Some("I would like to talk about a website.".into()),
            phone: None,
            chat_id: None,
        }
    }

    #[test]
    fn summary_keeps_short_messages() {
        let msg = "a".repeat(SUMMARY_LIMIT);
        assert_eq!(summarize(&msg), msg);
    }

    #[test]
    fn summary_truncates_long_messages() {
        let msg = "b".repeat(SUMMARY_LIMIT + 1);
        let summary = summarize(&msg);
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), SUMMARY_LIMIT + 3);
    }

    #[test]
    fn summary_counts_characters_not_bytes() {
        let msg = "é".repeat(SUMMARY_LIMIT);
        assert_eq!(summarize(&msg), msg);
    }

    #[test]
    fn contact_notification_lists_present_fields() {
        let t = render_operator_notification(SubmissionKind::Contact, &contact(), "Ada's Site")
            .unwrap();
        assert_eq!(t.subject, "New contact form submission: Project inquiry");
        assert!(t.html.contains("Ada Lovelace"));
        assert!(t.html.contains("ada@example.com"));
        assert!(t.html.contains("I would like to talk about a website."));
        assert!(!t.html.contains("Phone:"));
    }

    #[test]
    fn contact_subject_falls_back_to_name() {
        let data = SubmissionData {
            subject: None,
            ..contact()
        };
        let t = render_operator_notification(SubmissionKind::Contact, &data, "Site").unwrap();
        assert_eq!(t.subject, "New contact form submission from Ada Lovelace");
    }

    #[test]
    fn chat_notification_includes_chat_id() {
        let data = SubmissionData {
            chat_id: Some("chat-7".into()),
            message: Some("hello?".into()),
            ..Default::default()
        };
        let t = render_operator_notification(SubmissionKind::Chat, &data, "Site").unwrap();
        assert_eq!(t.subject, "New chat message from a visitor");
        assert!(t.html.contains("chat-7"));
        assert!(!t.html.contains("Email:"));
    }

    #[test]
    fn confirmation_quotes_truncated_message() {
        let long = format!("{}TAIL", "x".repeat(SUMMARY_LIMIT));
        let data = SubmissionData {
            message: Some(long),
            ..contact()
        };
        let t = render_confirmation(SubmissionKind::Contact, &data, "Site").unwrap();
        assert!(t.html.contains(&format!("{}...", "x".repeat(SUMMARY_LIMIT))));
        assert!(!t.html.contains("TAIL"));
        assert!(t.html.contains("Hi Ada Lovelace"));
    }

    #[test]
    fn confirmation_without_message_omits_quote() {
        let data = SubmissionData {
            message: None,
            ..contact()
        };
        let t = render_confirmation(SubmissionKind::Contact, &data, "Site").unwrap();
        assert!(t.html.contains("Hi Ada Lovelace"));
        assert!(!t.html.contains("Your message:"));
        assert!(!t.html.contains("<blockquote"));
    }

    #[test]
    fn contact_notification_without_message_omits_section() {
        let data = SubmissionData {
            message: None,
            ..contact()
        };
        let t = render_operator_notification(SubmissionKind::Contact, &data, "Site").unwrap();
        assert!(t.html.contains("ada@example.com"));
        assert!(!t.html.contains("<h3>Message</h3>"));
    }

    #[test]
    fn user_values_are_escaped() {
        let data = SubmissionData {
            name: Some("<script>alert(1)</script>".into()),
            ..contact()
        };
        let t = render_operator_notification(SubmissionKind::Contact, &data, "Site").unwrap();
        assert!(!t.html.contains("<script>"));
        assert!(t.html.contains("&#60;script&#62;"));
    }
}
