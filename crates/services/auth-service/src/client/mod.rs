//! Ports to the account collections and the outgoing mail channel.

mod directory;
mod mailer;

pub use directory::PrincipalDirectory;
pub use mailer::{CodePurpose, LoggingMailer, Mailer};

#[cfg(any(test, feature = "test-utils"))]
pub use directory::MockPrincipalDirectory;
#[cfg(any(test, feature = "test-utils"))]
pub use mailer::MockMailer;
