use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    Contact,
    Chat,
}

/// Body of `POST /api/send-email`. Both fields are optional here so that a
/// missing one is reported as a validation error rather than a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendEmailRequest {
    #[serde(rename = "type")]
    pub kind: Option<SubmissionKind>,
    pub data: Option<SubmissionData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub phone: Option<String>,
    pub chat_id: Option<String>,
}

impl SubmissionData {
    /// Trims every field and drops the ones left empty.
    #[must_use]
    pub fn normalized(self) -> Self {
        fn clean(field: Option<String>) -> Option<String> {
            field
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            name: clean(self.name),
            email: clean(self.email),
            subject: clean(self.subject),
            message: clean(self.message),
            phone: clean(self.phone),
            chat_id: clean(self.chat_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
