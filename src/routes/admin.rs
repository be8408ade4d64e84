use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use chrono::NaiveDate;
use serde::Deserialize;

use super::pages::escape_html;
use crate::database::AdminFilter;
use crate::models::{Error, User};
use crate::AppState;

/// Builds a router for the management console. Not a stable programmatic
/// contract, everything here is a human surface.
pub fn admin_routes() -> Router<Arc<AppState>> {
    let console = get(admin_users_handler);
    Router::new()
        .route("/admin/users", console.clone())
        .route("/admin/users/", console)
}

/// Raw query-string form of the filter form. Every input arrives as text so
/// an empty form submission does not reject.
#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    pub age: Option<String>,
    pub created: Option<String>,
    pub q: Option<String>,
}

impl AdminQuery {
    /// Unparseable filter values are dropped rather than rejected.
    fn to_filter(&self) -> AdminFilter {
        AdminFilter {
            age: non_empty(&self.age).and_then(|age| age.parse().ok()),
            created: non_empty(&self.created)
                .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()),
            q: non_empty(&self.q).map(str::to_string),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Admin console handler function: filterable, searchable record table
pub async fn admin_users_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AdminQuery>,
) -> Result<Html<String>, Error> {
    let users = state.db.search_users(&query.to_filter()).await?;
    Ok(Html(render_admin(&users, &query)))
}

fn render_admin(users: &[User], query: &AdminQuery) -> String {
    let mut rows = String::new();
    for user in users {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            user.id,
            escape_html(&user.name),
            user.age,
            escape_html(&user.phone_number),
            escape_html(&user.home_address),
            user.created_at.format("%Y-%m-%d %H:%M:%S"),
            user.updated_at.format("%Y-%m-%d %H:%M:%S"),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>Employee Admin</title>
<style>
body {{ font-family: sans-serif; margin: 2em; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid #ccc; padding: 0.4em 0.8em; text-align: left; }}
th {{ background: #f0f0f0; }}
form {{ margin-bottom: 1.5em; }}
label {{ margin-right: 1em; }}
</style>
</head>
<body>
<h1>Employee Admin</h1>
<form method="get" action="/admin/users/">
<label>Age <input type="text" name="age" value="{age}"></label>
<label>Created (YYYY-MM-DD) <input type="text" name="created" value="{created}"></label>
<label>Search <input type="text" name="q" value="{q}"></label>
<button type="submit">Filter</button>
</form>
<p>{count} record(s)</p>
<table>
<tr><th>ID</th><th>Name</th><th>Age</th><th>Phone</th><th>Address</th><th>Created</th><th>Updated</th></tr>
{rows}</table>
</body>
</html>
"#,
        age = escape_html(query.age.as_deref().unwrap_or("")),
        created = escape_html(query.created.as_deref().unwrap_or("")),
        q = escape_html(query.q.as_deref().unwrap_or("")),
        count = users.len(),
    )
}
