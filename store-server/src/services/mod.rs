//! External collaborator services
//!
//! Payment gateway and outbound mail, both behind traits so handlers and
//! the checkout orchestrator stay testable.

pub mod mail;
pub mod payment;

pub use mail::{LogMailer, MailError, Mailer};
pub use payment::{PaymentError, PaymentGateway, PaymentIntent, PaymentMetadata, StripeGateway};
