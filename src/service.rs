use std::sync::Arc;

use crate::{
    config::Config,
    dto::{SendEmailRequest, SendEmailResponse, SubmissionData, SubmissionKind},
    mailer::{MailError, Mailer, OutgoingEmail},
    templates,
};

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("{0}")]
    Validation(String),

    #[error("Failed to render email template: {0}")]
    Render(#[from] askama::Error),

    #[error(transparent)]
    Mail(#[from] MailError),
}

pub struct SubmissionService {
    mailer: Arc<dyn Mailer>,
    operator_address: String,
    site_name: String,
}

/// Checks the request shape and returns the submission ready for rendering.
pub fn validate(
    request: SendEmailRequest,
) -> Result<(SubmissionKind, SubmissionData), RelayError> {
    let (Some(kind), Some(data)) = (request.kind, request.data) else {
        return Err(RelayError::Validation(
            "Missing required fields: type and data".to_string(),
        ));
    };

    let data = data.normalized();
    if data.email.is_none() && data.message.is_none() {
        return Err(RelayError::Validation(
            "Missing required fields: email or message".to_string(),
        ));
    }

    Ok((kind, data))
}

impl SubmissionService {
    pub fn new(mailer: Arc<dyn Mailer>, config: &Config) -> Self {
        Self {
            mailer,
            operator_address: config.operator_address.clone(),
            site_name: config.site_name.clone(),
        }
    }

    /// Notifies the operator, then confirms to the submitter when an address was given.
    /// Sends run one after the other; the first failure aborts the request.
    pub async fn relay(&self, request: SendEmailRequest) -> Result<SendEmailResponse, RelayError> {
        let (kind, data) = validate(request)?;

        let notification = templates::render_operator_notification(kind, &data, &self.site_name)?;
        let confirmation = templates::render_confirmation(kind, &data, &self.site_name)?;

        tracing::info!("Relaying {:?} submission", kind);

        self.mailer
            .send(OutgoingEmail {
                to: self.operator_address.clone(),
                reply_to: data.email.clone(),
                subject: notification.subject,
                html: notification.html,
            })
            .await?;

        if let Some(email) = data.email {
            self.mailer
                .send(OutgoingEmail {
                    to: email,
                    reply_to: None,
                    subject: confirmation.subject,
                    html: confirmation.html,
                })
                .await?;
        }

        Ok(SendEmailResponse {
            success: true,
            message: "Emails sent successfully".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(kind: Option<SubmissionKind>, data: Option<SubmissionData>) -> SendEmailRequest {
        SendEmailRequest { kind, data }
    }

    #[test]
    fn missing_type_is_rejected() {
        let res = validate(request(
            None,
            Some(SubmissionData {
                message: Some("hi".into()),
                ..Default::default()
            }),
        ));
        assert!(matches!(res, Err(RelayError::Validation(_))));
    }

    #[test]
    fn missing_data_is_rejected() {
        let res = validate(request(Some(SubmissionKind::Contact), None));
        assert!(matches!(res, Err(RelayError::Validation(_))));
    }

    #[test]
    fn blank_email_and_message_are_rejected() {
        let res = validate(request(
            Some(SubmissionKind::Chat),
            Some(SubmissionData {
                email: Some(" ".into()),
                message: Some("\n".into()),
                name: Some("Ada".into()),
                ..Default::default()
            }),
        ));
        assert!(matches!(res, Err(RelayError::Validation(_))));
    }

    #[test]
    fn email_alone_is_enough() {
        let (kind, data) = validate(request(
            Some(SubmissionKind::Contact),
            Some(SubmissionData {
                email: Some("ada@example.com".into()),
                ..Default::default()
            }),
        ))
        .unwrap();
        assert_eq!(kind, SubmissionKind::Contact);
        assert_eq!(data.email.as_deref(), Some("ada@example.com"));
    }
}
