use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::response::Html;
use chrono::Utc;

use crate::models::{Error, User};
use crate::AppState;

const UNKNOWN: &str = "Unknown";

/// Diagnostics about the request currently being served, shown on the
/// dashboard next to the record list.
struct RequestInfo {
    source_ip: String,
    response_time: String,
    timestamp: String,
    user_agent: String,
}

/// Index page handler function
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Dashboard page handler function. Response time covers handler entry up
/// to data-fetch completion, like the diagnostics panel advertises.
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Result<Html<String>, Error> {
    let started = Instant::now();

    let remote_addr = connect_info.map(|ConnectInfo(addr)| addr.ip());
    let source_ip = resolve_client_ip(&headers, remote_addr);

    let users = state.db.list_users().await?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    let request_info = RequestInfo {
        source_ip,
        response_time: format!("{elapsed_ms:.2}"),
        timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        user_agent: header_value(&headers, "user-agent").unwrap_or_else(|| UNKNOWN.to_string()),
    };

    Ok(Html(render_dashboard(&users, &request_info)))
}

/// Resolves the address the request came from. Forwarding headers win over
/// the raw connection address; a loopback connection address triggers a
/// lookup of the machine's own network-visible address.
pub fn resolve_client_ip(headers: &HeaderMap, remote_addr: Option<IpAddr>) -> String {
    if let Some(forwarded_for) = header_value(headers, "x-forwarded-for") {
        if let Some(first) = forwarded_for
            .split(',')
            .next()
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
        {
            return first.to_string();
        }
    }
    if let Some(real_ip) = header_value(headers, "x-real-ip") {
        return real_ip;
    }
    if let Some(client_ip) = header_value(headers, "client-ip") {
        return client_ip;
    }

    match remote_addr {
        Some(addr) if addr.is_loopback() => {
            local_network_addr().unwrap_or_else(|| addr.to_string())
        }
        Some(addr) => addr.to_string(),
        None => UNKNOWN.to_string(),
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Resolves the machine's own hostname to a non-loopback address, if it has
/// one.
pub fn local_network_addr() -> Option<String> {
    let host = hostname::get().ok()?.into_string().ok()?;
    (host.as_str(), 0u16)
        .to_socket_addrs()
        .ok()?
        .find(|addr| !addr.ip().is_loopback())
        .map(|addr| addr.ip().to_string())
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn render_dashboard(users: &[User], info: &RequestInfo) -> String {
    let mut rows = String::new();
    for user in users {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            user.id,
            escape_html(&user.name),
            user.age,
            escape_html(&user.phone_number),
            escape_html(&user.home_address),
            user.created_at.format("%Y-%m-%d %H:%M:%S"),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>Employee Dashboard</title>
<style>
body {{ font-family: sans-serif; margin: 2em; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid #ccc; padding: 0.4em 0.8em; text-align: left; }}
th {{ background: #f0f0f0; }}
.request-info {{ background: #f8f8f8; border: 1px solid #ddd; padding: 1em; margin-bottom: 1.5em; }}
</style>
</head>
<body>
<h1>Employee Dashboard</h1>
<div class="request-info">
<h2>Request Information</h2>
<p>Source IP: {source_ip}</p>
<p>Response time: {response_time} ms</p>
<p>Timestamp: {timestamp}</p>
<p>User agent: {user_agent}</p>
</div>
<h2>Employees</h2>
<table>
<tr><th>ID</th><th>Name</th><th>Age</th><th>Phone</th><th>Address</th><th>Created</th></tr>
{rows}</table>
</body>
</html>
"#,
        source_ip = escape_html(&info.source_ip),
        response_time = info.response_time,
        timestamp = info.timestamp,
        user_agent = escape_html(&info.user_agent),
    )
}

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>Employee Records</title>
<style>
body { font-family: sans-serif; margin: 2em; }
li { margin: 0.3em 0; }
</style>
</head>
<body>
<h1>Employee Records</h1>
<ul>
<li><a href="/dashboard/">Dashboard</a></li>
<li><a href="/admin/users/">Admin console</a></li>
<li><a href="/api/users/">API: user collection</a></li>
<li><a href="/swagger-ui">API documentation</a></li>
</ul>
</body>
</html>
"#;
