#![allow(dead_code)] // each test binary uses a different subset of helpers

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde::Serialize;
use std::collections::BTreeMap;
use taskboard_server::auth::AuthState;
use taskboard_server::web::{AppState, create_app};
use testcontainers_modules::postgres;
use testcontainers_modules::testcontainers::{self, runners::AsyncRunner};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_secret";

/// Opens a private in-memory SQLite database with all migrations applied.
pub async fn setup_db() -> anyhow::Result<DatabaseConnection> {
    // Every pooled connection would get its own empty in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn setup_container() -> anyhow::Result<testcontainers::ContainerAsync<postgres::Postgres>>
{
    let container = postgres::Postgres::default().start().await?;
    Ok(container)
}

/// Connects to a Postgres container and applies all migrations.
pub async fn setup_postgres_db(
    container: &testcontainers::ContainerAsync<postgres::Postgres>,
) -> anyhow::Result<DatabaseConnection> {
    let host = container.get_host().await?;
    let port = container.get_host_port_ipv4(5432).await?;
    let db_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);
    let db = Database::connect(&db_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn setup() -> anyhow::Result<TestClient> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let db = setup_db().await?;
    let state = AppState::new(db, AuthState::new(TEST_SECRET));
    Ok(TestClient::new(state))
}

/// Drives the application router like a browser would, remembering cookies
/// between requests.
pub struct TestClient {
    pub state: AppState,
    app: Router,
    cookies: BTreeMap<String, String>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get("location")
            .and_then(|value| value.to_str().ok())
    }

    /// Text of the flash banner on a rendered page.
    pub fn flash(&self) -> Option<String> {
        let start = self.body.find("id=\"flash-message\"")?;
        let rest = &self.body[start..];
        let open = rest.find('>')? + 1;
        let close = rest.find("</div>")?;
        Some(rest[open..close].to_string())
    }
}

impl TestClient {
    pub fn new(state: AppState) -> Self {
        Self {
            app: create_app(state.clone()),
            state,
            cookies: BTreeMap::new(),
        }
    }

    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    pub fn clear_cookies(&mut self) {
        self.cookies.clear();
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = Request::builder().method("GET").uri(uri);
        self.send(request, Body::empty()).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded");
        self.send(request, Body::from(form.to_string())).await
    }

    /// Follows a redirect response with a GET, as a browser would after a form post.
    pub async fn follow(&mut self, response: &TestResponse) -> TestResponse {
        let location = response
            .location()
            .expect("response should be a redirect")
            .to_string();
        self.get(&location).await
    }

    pub async fn register(&mut self, username: &str, password: &str) -> TestResponse {
        let form = format!(
            "username={username}&name=Test+User&department=Engineering&password={password}"
        );
        self.post_form("/register", &form).await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> TestResponse {
        let form = format!("username={username}&password={password}");
        self.post_form("/login", &form).await
    }

    async fn send(&mut self, mut request: axum::http::request::Builder, body: Body) -> TestResponse {
        if !self.cookies.is_empty() {
            let cookie_header = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            request = request.header("cookie", cookie_header);
        }

        let response = self
            .app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        for set_cookie in response.headers().get_all("set-cookie") {
            let set_cookie = set_cookie.to_str().unwrap();
            let pair = set_cookie.split(';').next().unwrap_or_default();
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let expired = set_cookie.contains("Max-Age=0");
            if value.is_empty() || expired {
                self.cookies.remove(name.trim());
            } else {
                self.cookies
                    .insert(name.trim().to_string(), value.trim().to_string());
            }
        }

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(body.to_vec()).unwrap(),
        }
    }
}

/// HTTP response snapshot for testing endpoints.
#[derive(Debug, Serialize)]
pub struct HttpResponseSnapshot {
    test_context: String,
    status: u16,
    headers: BTreeMap<String, String>,
    html_body: Vec<String>,
}

impl HttpResponseSnapshot {
    pub fn new(response: &TestResponse, test_context: &str) -> Self {
        Self {
            test_context: test_context.to_string(),
            status: response.status.as_u16(),
            headers: filter_variable_headers(&response.headers),
            html_body: response.body.lines().map(|line| line.to_string()).collect(),
        }
    }
}

/// Filter out variable headers from response headers for snapshot testing.
fn filter_variable_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let variable_headers = [
        "date",
        "expires",
        "last-modified",
        "etag",
        "server",
        "x-request-id",
        "x-trace-id",
        "set-cookie",
        "content-length",
    ];

    headers
        .iter()
        .filter_map(|(name, value)| {
            let name_str = name.as_str().to_lowercase();
            if variable_headers.contains(&name_str.as_str()) {
                None
            } else {
                value.to_str().ok().map(|v| (name_str, v.to_string()))
            }
        })
        .collect()
}
