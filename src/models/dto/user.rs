use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::models::{FieldErrors, User};

const REQUIRED: &str = "This field is required.";
const NOT_NULLABLE: &str = "This field may not be null.";
const NOT_A_STRING: &str = "Not a valid string.";
const NOT_AN_INTEGER: &str = "A valid integer is required.";

/// Wire representation of a stored record. Timestamps go out as ISO-8601
/// strings.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub phone_number: String,
    pub home_address: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
            phone_number: user.phone_number,
            home_address: user.home_address,
            created_at: user.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            updated_at: user.updated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

/// The client-writable subset of a record. `id`, `created_at` and
/// `updated_at` keys in the inbound payload are read-only and ignored.
#[derive(Debug, ToSchema)]
pub struct NewUser {
    pub name: String,
    pub age: i64,
    pub phone_number: String,
    pub home_address: String,
}

impl NewUser {
    /// Builds the writable subset from a raw JSON body, requiring every
    /// field. Problems are collected per field so the response can name all
    /// of them at once.
    pub fn from_value(body: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let Some(object) = require_object(body, &mut errors) else {
            return Err(errors);
        };

        let name = string_field(object, "name", Some(100), true, &mut errors);
        let age = integer_field(object, "age", true, &mut errors);
        let phone_number = string_field(object, "phone_number", Some(20), true, &mut errors);
        let home_address = string_field(object, "home_address", None, true, &mut errors);

        if let (Some(name), Some(age), Some(phone_number), Some(home_address)) =
            (name, age, phone_number, home_address)
        {
            Ok(NewUser {
                name,
                age,
                phone_number,
                home_address,
            })
        } else {
            Err(errors)
        }
    }
}

/// Partial update: any subset of the writable fields, including none.
#[derive(Debug, Default, ToSchema)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub phone_number: Option<String>,
    pub home_address: Option<String>,
}

impl UserUpdate {
    pub fn from_value(body: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let Some(object) = require_object(body, &mut errors) else {
            return Err(errors);
        };

        let update = UserUpdate {
            name: string_field(object, "name", Some(100), false, &mut errors),
            age: integer_field(object, "age", false, &mut errors),
            phone_number: string_field(object, "phone_number", Some(20), false, &mut errors),
            home_address: string_field(object, "home_address", None, false, &mut errors),
        };

        if errors.is_empty() {
            Ok(update)
        } else {
            Err(errors)
        }
    }

    /// Overwrites only the fields the payload provided.
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(age) = self.age {
            user.age = age;
        }
        if let Some(phone_number) = self.phone_number {
            user.phone_number = phone_number;
        }
        if let Some(home_address) = self.home_address {
            user.home_address = home_address;
        }
    }
}

fn push_error(errors: &mut FieldErrors, field: &str, message: String) {
    errors.entry(field.to_string()).or_default().push(message);
}

fn require_object<'a>(
    body: &'a Value,
    errors: &mut FieldErrors,
) -> Option<&'a Map<String, Value>> {
    match body.as_object() {
        Some(object) => Some(object),
        None => {
            push_error(
                errors,
                "non_field_errors",
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_type_name(body)
                ),
            );
            None
        }
    }
}

fn string_field(
    object: &Map<String, Value>,
    field: &str,
    max_len: Option<usize>,
    required: bool,
    errors: &mut FieldErrors,
) -> Option<String> {
    match object.get(field) {
        None => {
            if required {
                push_error(errors, field, REQUIRED.to_string());
            }
            None
        }
        Some(Value::Null) => {
            push_error(errors, field, NOT_NULLABLE.to_string());
            None
        }
        Some(Value::String(value)) => {
            if let Some(max) = max_len {
                if value.chars().count() > max {
                    push_error(
                        errors,
                        field,
                        format!("Ensure this field has no more than {max} characters."),
                    );
                    return None;
                }
            }
            Some(value.clone())
        }
        Some(_) => {
            push_error(errors, field, NOT_A_STRING.to_string());
            None
        }
    }
}

fn integer_field(
    object: &Map<String, Value>,
    field: &str,
    required: bool,
    errors: &mut FieldErrors,
) -> Option<i64> {
    let invalid = |errors: &mut FieldErrors| {
        push_error(errors, field, NOT_AN_INTEGER.to_string());
        None
    };
    match object.get(field) {
        None => {
            if required {
                push_error(errors, field, REQUIRED.to_string());
            }
            None
        }
        Some(Value::Null) => {
            push_error(errors, field, NOT_NULLABLE.to_string());
            None
        }
        Some(Value::Number(number)) => match number.as_i64() {
            Some(value) => Some(value),
            None => invalid(errors),
        },
        Some(Value::String(value)) => match value.trim().parse::<i64>() {
            Ok(value) => Some(value),
            Err(_) => invalid(errors),
        },
        Some(_) => invalid(errors),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "name": "Alice Carter",
            "age": 34,
            "phone_number": "5551234567",
            "home_address": "12 Elm Street"
        })
    }

    #[test]
    fn accepts_a_complete_payload() {
        let new_user = NewUser::from_value(&valid_body()).unwrap();
        assert_eq!(new_user.name, "Alice Carter");
        assert_eq!(new_user.age, 34);
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let errors = NewUser::from_value(&json!({ "phone_number": "555" })).unwrap_err();
        assert_eq!(errors["name"], vec![REQUIRED]);
        assert_eq!(errors["age"], vec![REQUIRED]);
        assert_eq!(errors["home_address"], vec![REQUIRED]);
        assert!(!errors.contains_key("phone_number"));
    }

    #[test]
    fn age_accepts_a_numeric_string() {
        let mut body = valid_body();
        body["age"] = json!("42");
        assert_eq!(NewUser::from_value(&body).unwrap().age, 42);
    }

    #[test]
    fn age_rejects_a_non_numeric_string() {
        let mut body = valid_body();
        body["age"] = json!("forty");
        let errors = NewUser::from_value(&body).unwrap_err();
        assert_eq!(errors["age"], vec![NOT_AN_INTEGER]);
    }

    #[test]
    fn age_rejects_a_fractional_number() {
        let mut body = valid_body();
        body["age"] = json!(34.5);
        let errors = NewUser::from_value(&body).unwrap_err();
        assert_eq!(errors["age"], vec![NOT_AN_INTEGER]);
    }

    #[test]
    fn read_only_keys_are_ignored() {
        let mut body = valid_body();
        body["id"] = json!(999);
        body["created_at"] = json!("2001-01-01T00:00:00Z");
        assert!(NewUser::from_value(&body).is_ok());
    }

    #[test]
    fn name_length_is_capped() {
        let mut body = valid_body();
        body["name"] = json!("x".repeat(101));
        let errors = NewUser::from_value(&body).unwrap_err();
        assert_eq!(
            errors["name"],
            vec!["Ensure this field has no more than 100 characters."]
        );
    }

    #[test]
    fn non_object_body_is_rejected() {
        let errors = NewUser::from_value(&json!(["nope"])).unwrap_err();
        assert_eq!(
            errors["non_field_errors"],
            vec!["Invalid data. Expected a dictionary, but got list."]
        );
    }

    #[test]
    fn partial_update_accepts_any_subset() {
        let update = UserUpdate::from_value(&json!({ "age": "28" })).unwrap();
        assert_eq!(update.age, Some(28));
        assert!(update.name.is_none());

        let empty = UserUpdate::from_value(&json!({})).unwrap();
        assert!(empty.age.is_none());
    }

    #[test]
    fn partial_update_still_validates_provided_fields() {
        let errors = UserUpdate::from_value(&json!({ "age": true })).unwrap_err();
        assert_eq!(errors["age"], vec![NOT_AN_INTEGER]);
    }

    #[test]
    fn apply_overwrites_only_provided_fields() {
        let mut user = User {
            id: 1,
            name: "Old Name".to_string(),
            age: 50,
            phone_number: "111".to_string(),
            home_address: "Old Address".to_string(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        UserUpdate {
            age: Some(51),
            ..Default::default()
        }
        .apply(&mut user);
        assert_eq!(user.age, 51);
        assert_eq!(user.name, "Old Name");
    }
}
