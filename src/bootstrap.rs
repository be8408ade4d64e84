use anyhow::{Context, Result};

use crate::database::Database;
use crate::models::dto::NewUser;

/// The two records a fresh database starts out with.
const DEFAULT_USERS: [(&str, i64, &str, &str); 2] = [
    ("John Doe", 30, "1234567890", "123 Main St"),
    ("Jane Smith", 25, "9876543210", "456 Oak Ave"),
];

/// Seeds the store with the default employee records when it is empty.
///
/// Returns `true` when the records were inserted and `false` when the store
/// already had data. Callers treat errors as non-fatal: startup logs them
/// and carries on.
pub async fn seed_default_users(db: &Database) -> Result<bool> {
    let existing = db
        .count_users()
        .await
        .context("counting employee records")?;
    if existing > 0 {
        return Ok(false);
    }

    for (name, age, phone_number, home_address) in DEFAULT_USERS {
        let record = NewUser {
            name: name.to_string(),
            age,
            phone_number: phone_number.to_string(),
            home_address: home_address.to_string(),
        };
        db.create_user(&record)
            .await
            .with_context(|| format!("inserting default record for {name}"))?;
    }
    Ok(true)
}
