pub mod mock_email_client;
pub mod smtp_email_client;

pub use mock_email_client::{MockEmailClient, SentEmail};
pub use smtp_email_client::{SmtpEmailClient, SmtpEmailClientError};
