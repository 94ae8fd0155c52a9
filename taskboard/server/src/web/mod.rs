use askama::Template;
use axum::Router;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::response::{Html, IntoResponse, Redirect};
use axum_extra::extract::CookieJar;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::sensitive_headers::{
    SetSensitiveRequestHeadersLayer, SetSensitiveResponseHeadersLayer,
};
use tower_http::trace::TraceLayer;

use crate::auth::{
    AuthState, CurrentUser, FilteredMakeSpan, auth_user_middleware, login_redirect_middleware,
};
use crate::category::{CategoryServiceError, create_category_router};
use crate::config::Config;
use crate::task::{TaskServiceError, create_task_router};
use crate::user::{UserServiceError, create_user_router};
use crate::{auth, flash};

pub mod api;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub auth: Arc<AuthState>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, auth: AuthState) -> Self {
        Self {
            db: Arc::new(db),
            auth: Arc::new(auth),
        }
    }
}

/// Values every page template needs for the layout: who is logged in and
/// the pending flash message.
#[derive(Debug, Default)]
pub struct PageContext {
    pub username: Option<String>,
    pub flash: Option<String>,
}

impl PageContext {
    /// Consumes the pending flash message from the jar.
    pub fn take(
        jar: CookieJar,
        auth: &AuthState,
        current_user: Option<&CurrentUser>,
    ) -> (CookieJar, Self) {
        let (jar, flash) = flash::take(jar, auth);
        let username = current_user.map(|user| user.username.clone());
        (jar, Self { username, flash })
    }
}

/// Redirects to `to` after storing `message` for the next page.
pub fn redirect_with_flash(
    jar: CookieJar,
    auth: &AuthState,
    message: impl Into<String>,
    to: &str,
) -> Result<(CookieJar, Redirect), WebError> {
    let jar = flash::push(jar, auth, message)?;
    Ok((jar, Redirect::to(to)))
}

/// Custom error type for web handler operations.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Represents an error during template rendering.
    /// The specific `askama::Error` is captured as the source of this error.
    #[error("Template rendering failed")]
    Template(#[from] askama::Error),
    /// Signing or reading a session or flash token failed.
    #[error("Session token operation failed")]
    Session(#[from] jsonwebtoken::errors::Error),
    #[error("User service error: {0}")]
    User(#[from] UserServiceError),
    #[error("Task service error: {0}")]
    Task(#[from] TaskServiceError),
    #[error("Category service error: {0}")]
    Category(#[from] CategoryServiceError),
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            WebError::User(UserServiceError::UserNotFound(_))
            | WebError::Task(TaskServiceError::TaskNotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        let user_facing_error_message = if status_code == StatusCode::NOT_FOUND {
            "The record you were looking for does not exist."
        } else {
            tracing::error!("Request failed: {}", self);
            "An unexpected error occurred while processing your request. Please try again later."
        };

        let error_template = ErrorTemplate {
            page: PageContext::default(),
            status: status_code.as_u16(),
            message: user_facing_error_message,
        };
        let Ok(rendered) = error_template.render() else {
            return status_code.into_response();
        };

        (status_code, Html(rendered)).into_response()
    }
}

/// Builds the full application router around an already migrated database.
pub fn create_app(state: AppState) -> Router {
    let auth_layer = from_fn_with_state(state.auth.clone(), auth_user_middleware);

    let protected_routes = Router::new()
        .merge(create_task_router(state.clone()))
        .merge(create_category_router(state.clone()))
        .route_layer(
            ServiceBuilder::new()
                .layer(auth_layer.clone())
                .layer(from_fn(login_redirect_middleware)),
        );

    let public_routes = Router::new()
        .route("/health", axum::routing::get(health_check_handler))
        .route("/faq", axum::routing::get(faq_handler))
        .with_state(state.clone())
        .merge(crate::task::create_task_list_router(state.clone()))
        .merge(crate::category::create_category_list_router(state.clone()))
        .merge(auth::web::create_auth_router(state.clone()))
        .merge(create_user_router(state.clone()))
        .route_layer(auth_layer);

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .merge(api::create_api_router(state))
        .layer(
            ServiceBuilder::new()
                .layer(SetSensitiveRequestHeadersLayer::new([COOKIE]))
                .layer(TraceLayer::new_for_http().make_span_with(FilteredMakeSpan))
                .layer(SetSensitiveResponseHeadersLayer::new([SET_COOKIE])),
        )
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let db = Database::connect(config.database_url()).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    let state = AppState::new(db, AuthState::from_config(&config));
    let app = create_app(state);

    let server_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

#[tracing::instrument(skip(state, jar))]
pub async fn faq_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    current_user: Option<Extension<CurrentUser>>,
) -> Result<(CookieJar, Html<String>), WebError> {
    let (jar, page) = PageContext::take(jar, &state.auth, current_user.as_deref());
    let html = FaqTemplate { page }.render()?;
    Ok((jar, Html(html)))
}

#[derive(Template)]
#[template(path = "faq.html")]
struct FaqTemplate {
    page: PageContext,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    page: PageContext,
    status: u16,
    message: &'a str,
}
