//! SMTP delivery of application notifications via `lettre`.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::ApplicationStatus;
use crate::domain::ports::{Notification, Notifier, NotifierError};
use crate::settings::SmtpSettings;

/// The relay or sender address could not be configured.
#[derive(Debug, thiserror::Error)]
pub enum MailConfigError {
    #[error("invalid sender address `{address}`: {message}")]
    Sender { address: String, message: String },
    #[error("invalid SMTP relay `{host}`: {message}")]
    Relay { host: String, message: String },
}

/// [`Notifier`] sending plain-text and HTML mail through a STARTTLS relay.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Build a notifier for `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`MailConfigError`] when the sender address does not parse or
    /// the relay cannot be configured.
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailConfigError> {
        let from: Mailbox = settings
            .from
            .parse()
            .map_err(|err: lettre::address::AddressError| MailConfigError::Sender {
                address: settings.from.clone(),
                message: err.to_string(),
            })?;
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|err| MailConfigError::Relay {
                host: settings.host.clone(),
                message: err.to_string(),
            })?
            .port(settings.port);
        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }
        tracing::info!(host = %settings.host, port = settings.port, "SMTP notifier configured");
        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotifierError> {
        let message = compose(&self.from, &notification)?;
        self.transport
            .send(message)
            .await
            .map_err(|err| NotifierError::delivery(err.to_string()))?;
        tracing::debug!(kind = notification.kind(), "notification sent");
        Ok(())
    }
}

struct Rendered {
    subject: String,
    text: String,
    html: String,
}

fn render(notification: &Notification) -> Rendered {
    match notification {
        Notification::ApplicationReceived {
            job_title,
            company_name,
            applicant_name,
            ..
        } => Rendered {
            subject: format!("New application for {job_title}"),
            text: format!(
                "{applicant_name} has applied for {job_title} at {company_name}. \
                 Review the application from your recruiter dashboard."
            ),
            html: format!(
                "<p><strong>{applicant_name}</strong> has applied for \
                 <strong>{job_title}</strong> at {company_name}.</p>\
                 <p>Review the application from your recruiter dashboard.</p>"
            ),
        },
        Notification::ApplicationDecided {
            seeker_name,
            job_title,
            company_name,
            status,
            ..
        } => {
            let outcome = match status {
                ApplicationStatus::Accepted => "has been accepted",
                ApplicationStatus::Rejected => "was not successful this time",
                ApplicationStatus::Pending => "is still under review",
            };
            Rendered {
                subject: format!("Update on your application for {job_title}"),
                text: format!(
                    "Hi {seeker_name}, your application for {job_title} at {company_name} {outcome}."
                ),
                html: format!(
                    "<p>Hi {seeker_name},</p><p>Your application for \
                     <strong>{job_title}</strong> at {company_name} {outcome}.</p>"
                ),
            }
        }
    }
}

fn compose(from: &Mailbox, notification: &Notification) -> Result<Message, NotifierError> {
    let to: Mailbox = notification
        .recipient()
        .as_ref()
        .parse()
        .map_err(|err: lettre::address::AddressError| NotifierError::delivery(err.to_string()))?;
    let Rendered { subject, text, html } = render(notification);
    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(subject)
        .multipart(MultiPart::alternative_plain_html(text, html))
        .map_err(|err| NotifierError::delivery(err.to_string()))
}

#[cfg(test)]
mod tests {
    //! Message rendering; delivery needs a relay.
    use super::*;
    use crate::domain::EmailAddress;
    use rstest::rstest;

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::new(raw).expect("valid email")
    }

    fn decided(status: ApplicationStatus) -> Notification {
        Notification::ApplicationDecided {
            seeker_email: email("sam@example.com"),
            seeker_name: "Sam".to_owned(),
            job_title: "Backend Engineer".to_owned(),
            company_name: "Acme".to_owned(),
            status,
        }
    }

    #[rstest]
    fn received_mail_names_the_applicant() {
        let rendered = render(&Notification::ApplicationReceived {
            recruiter_email: email("rita@acme.io"),
            job_title: "Backend Engineer".to_owned(),
            company_name: "Acme".to_owned(),
            applicant_name: "Sam".to_owned(),
        });
        assert_eq!(rendered.subject, "New application for Backend Engineer");
        assert!(rendered.text.starts_with("Sam has applied"));
    }

    #[rstest]
    #[case(ApplicationStatus::Accepted, "has been accepted")]
    #[case(ApplicationStatus::Rejected, "was not successful")]
    fn decision_mail_reports_the_outcome(#[case] status: ApplicationStatus, #[case] phrase: &str) {
        let rendered = render(&decided(status));
        assert!(rendered.text.contains(phrase));
        assert!(rendered.html.contains("<strong>Backend Engineer</strong>"));
    }

    #[rstest]
    fn composed_messages_are_addressed_to_the_recipient() {
        let from: Mailbox = "TrustyHire <noreply@trustyhire.com>".parse().expect("mailbox");
        let message = compose(&from, &decided(ApplicationStatus::Accepted)).expect("builds");
        let raw = String::from_utf8(message.formatted()).expect("utf8");
        assert!(raw.contains("To: sam@example.com"));
        assert!(raw.contains("Subject: Update on your application for Backend Engineer"));
    }

    #[rstest]
    fn bad_sender_addresses_fail_configuration() {
        let settings = SmtpSettings {
            host: "smtp.example.com".to_owned(),
            port: 587,
            username: None,
            password: None,
            from: "not an address".to_owned(),
        };
        assert!(matches!(
            SmtpNotifier::new(&settings),
            Err(MailConfigError::Sender { .. })
        ));
    }
}
