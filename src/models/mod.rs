pub mod dto;
pub mod error;
pub mod user;
pub use error::Error;
pub use error::FieldErrors;
pub use user::User;
