use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use utoipa::OpenApi;

use crate::{
    models::{
        dto::{NewUser, UserResponse, UserUpdate},
        Error,
    },
    AppState,
};

/// Defines the OpenAPI spec for employee record endpoints
#[derive(OpenApi)]
#[openapi(paths(
    list_users_handler,
    create_user_handler,
    retrieve_user_handler,
    replace_user_handler,
    update_user_handler,
    delete_user_handler
))]
pub struct UsersApi;

/// Used to group employee record endpoints together in the OpenAPI documentation
pub const USER_API_GROUP: &str = "USERS";

/// Builds a router for all the employee record routes. The canonical URL
/// space uses trailing slashes; axum treats `/x` and `/x/` as distinct, so
/// every path is registered both ways.
pub fn user_routes() -> Router<Arc<AppState>> {
    let collection = get(list_users_handler).post(create_user_handler);
    let item = get(retrieve_user_handler)
        .put(replace_user_handler)
        .patch(update_user_handler)
        .delete(delete_user_handler);
    Router::new()
        .route("/api/users", collection.clone())
        .route("/api/users/", collection)
        .route("/api/users/:id", item.clone())
        .route("/api/users/:id/", item)
}

/// List records handler function
#[utoipa::path(
    get,
    path = "/api/users/",
    tag = USER_API_GROUP,
    responses(
        (status = 200, description = "All records, newest first", body = [UserResponse]),
    )
)]
pub async fn list_users_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, Error> {
    let users = state.db.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create record handler function
#[utoipa::path(
    post,
    path = "/api/users/",
    tag = USER_API_GROUP,
    request_body = NewUser,
    responses(
        (status = 201, description = "Record successfully created", body = UserResponse),
        (status = 400, description = "Validation failure, field messages in the body"),
    )
)]
pub async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<UserResponse>), Error> {
    let new_user = NewUser::from_value(&body).map_err(Error::validation)?;
    let user = state.db.create_user(&new_user).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Retrieve record handler function
#[utoipa::path(
    get,
    path = "/api/users/{id}/",
    tag = USER_API_GROUP,
    params(
        ("id" = i64, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Record found", body = UserResponse),
        (status = 404, description = "Record not found"),
    )
)]
pub async fn retrieve_user_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, Error> {
    let user = state
        .db
        .get_user_by_id(id)
        .await?
        .ok_or_else(Error::not_found)?;
    Ok(Json(UserResponse::from(user)))
}

/// Full update handler function: every writable field is required
#[utoipa::path(
    put,
    path = "/api/users/{id}/",
    tag = USER_API_GROUP,
    request_body = NewUser,
    params(
        ("id" = i64, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Record successfully replaced", body = UserResponse),
        (status = 400, description = "Validation failure, field messages in the body"),
        (status = 404, description = "Record not found"),
    )
)]
pub async fn replace_user_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<UserResponse>, Error> {
    let mut user = state
        .db
        .get_user_by_id(id)
        .await?
        .ok_or_else(Error::not_found)?;
    let replacement = NewUser::from_value(&body).map_err(Error::validation)?;

    user.name = replacement.name;
    user.age = replacement.age;
    user.phone_number = replacement.phone_number;
    user.home_address = replacement.home_address;

    let user = state.db.update_user(&user).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Partial update handler function: any subset of the writable fields
#[utoipa::path(
    patch,
    path = "/api/users/{id}/",
    tag = USER_API_GROUP,
    request_body = UserUpdate,
    params(
        ("id" = i64, Path, description = "Record ID")
    ),
    responses(
        (status = 200, description = "Record successfully updated", body = UserResponse),
        (status = 400, description = "Validation failure, field messages in the body"),
        (status = 404, description = "Record not found"),
    )
)]
pub async fn update_user_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<UserResponse>, Error> {
    let mut user = state
        .db
        .get_user_by_id(id)
        .await?
        .ok_or_else(Error::not_found)?;
    let update = UserUpdate::from_value(&body).map_err(Error::validation)?;

    update.apply(&mut user);

    let user = state.db.update_user(&user).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete record handler function
#[utoipa::path(
    delete,
    path = "/api/users/{id}/",
    tag = USER_API_GROUP,
    params(
        ("id" = i64, Path, description = "Record ID")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "Record not found"),
    )
)]
pub async fn delete_user_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Error> {
    if state.db.delete_user(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::not_found())
    }
}
