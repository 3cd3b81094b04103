use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid email address format: {0}")]
    AddressFormat(#[from] lettre::address::AddressError),

    #[error("Failed to build email message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    SmtpTransport(#[from] lettre::transport::smtp::Error),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

/// SMTP transport built once at startup and shared by every request.
pub struct SmtpMailer {
    sender: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &Config) -> Result<Self, MailError> {
        let sender = config.sender.parse()?;
        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_relay)?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        tracing::info!(
            "SMTP transport configured for {}:{}",
            config.smtp_relay,
            config.smtp_port
        );

        Ok(Self { sender, transport })
    }

    fn build_message(&self, email: OutgoingEmail) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(self.sender.clone())
            .to(email.to.parse()?)
            .subject(email.subject)
            .header(ContentType::TEXT_HTML);

        // An unparsable Reply-To is dropped so the operator copy still goes out.
        if let Some(reply_to) = email.reply_to {
            match reply_to.parse::<Mailbox>() {
                Ok(mailbox) => builder = builder.reply_to(mailbox),
                Err(e) => tracing::warn!("Dropping invalid Reply-To '{}': {}", reply_to, e),
            }
        }

        Ok(builder.body(email.html)?)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let to = email.to.clone();
        let subject = email.subject.clone();
        let message = self.build_message(email)?;

        tracing::info!("Sending email to '{}' with subject '{}'", to, subject);

        self.transport.send(message).await?;

        tracing::info!("Message to {} sent successfully", to);
        Ok(())
    }
}
