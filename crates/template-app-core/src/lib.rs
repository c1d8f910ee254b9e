//! # Template App Core
//!
//! Foundational types shared by every crate in the workspace:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`response`]: Response wrappers that check their payload before it leaves the handler
//!
//! # Example
//!
//! ```ignore
//! use template_app_core::{AppError, ValidatedJson};
//!
//! async fn handler() -> Result<ValidatedJson<Message>, AppError> {
//!     Ok(ValidatedJson(Message::new("Hello World")))
//! }
//! ```

pub mod errors;
pub mod response;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use response::{ResponseValidationError, ValidatedJson};
