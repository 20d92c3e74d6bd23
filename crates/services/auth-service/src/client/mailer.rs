//! Outgoing verification and reset codes.
//!
//! No SMTP transport is wired in; [`LoggingMailer`] writes the message to the
//! log so codes can be picked up during development.

use async_trait::async_trait;

use common::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Why a code is being sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodePurpose {
    Verification,
    PasswordReset,
}

impl CodePurpose {
    pub fn subject(&self) -> &'static str {
        match self {
            CodePurpose::Verification => "Confirm your email",
            CodePurpose::PasswordReset => "Reset your password",
        }
    }
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_code(
        &self,
        recipient: &str,
        name: &str,
        code: &str,
        purpose: CodePurpose,
    ) -> AppResult<()>;
}

/// Mailer that logs instead of sending.
#[derive(Debug, Clone)]
pub struct LoggingMailer {
    from: String,
}

impl LoggingMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

impl Default for LoggingMailer {
    fn default() -> Self {
        Self::new("noreply@example.com")
    }
}

#[async_trait]
impl Mailer for LoggingMailer {
    async fn send_code(
        &self,
        recipient: &str,
        name: &str,
        code: &str,
        purpose: CodePurpose,
    ) -> AppResult<()> {
        tracing::warn!("No mail transport configured - logging email instead of sending");
        tracing::info!(
            "=== EMAIL (not sent) ===\n\
             From: {}\n\
             To: {}\n\
             Subject: {}\n\
             Body:\nHello {}, your code is {}\n\
             ========================",
            self.from,
            recipient,
            purpose.subject(),
            name,
            code
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_logging_mailer_always_succeeds() {
        let mailer = LoggingMailer::default();
        assert_ok!(
            mailer
                .send_code("ana@example.com", "Ana", "123456", CodePurpose::Verification)
                .await
        );
    }
}
