pub mod message;
pub mod user;
pub use message::Message;
pub use user::*;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(components(schemas(UserResponse, NewUser, UserUpdate, Message)))]
/// Captures OpenAPI schemas and canned responses defined in the DTO module
pub struct OpenApiSchemas;
