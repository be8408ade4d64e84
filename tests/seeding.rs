//! Integration tests for best-effort startup seeding.

mod common;

use common::test_state;
use employee_records_backend::bootstrap::seed_default_users;
use employee_records_backend::models::dto::NewUser;

#[tokio::test]
async fn seeds_an_empty_store_with_the_two_default_records() {
    let state = test_state().await;

    let seeded = seed_default_users(&state.db).await.unwrap();
    assert!(seeded);

    let users = state.db.list_users().await.unwrap();
    assert_eq!(users.len(), 2);

    let names: Vec<&str> = users.iter().map(|user| user.name.as_str()).collect();
    assert!(names.contains(&"John Doe"));
    assert!(names.contains(&"Jane Smith"));
}

#[tokio::test]
async fn a_second_run_inserts_nothing() {
    let state = test_state().await;

    assert!(seed_default_users(&state.db).await.unwrap());
    assert!(!seed_default_users(&state.db).await.unwrap());

    assert_eq!(state.db.count_users().await.unwrap(), 2);
}

#[tokio::test]
async fn a_non_empty_store_is_left_alone() {
    let state = test_state().await;
    state
        .db
        .create_user(&NewUser {
            name: "Existing Person".to_string(),
            age: 52,
            phone_number: "5559999999".to_string(),
            home_address: "1 Somewhere".to_string(),
        })
        .await
        .unwrap();

    assert!(!seed_default_users(&state.db).await.unwrap());

    let users = state.db.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Existing Person");
}
