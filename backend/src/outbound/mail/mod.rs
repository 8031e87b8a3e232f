//! Outbound mail adapters.

mod smtp;

pub use smtp::{MailConfigError, SmtpNotifier};
