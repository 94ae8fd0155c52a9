use askama::Template;
use axum::extract::{Extension, Form, State};
use axum::response::{Html, Redirect};
use axum::{Router, routing::get};
use axum_extra::extract::CookieJar;

use crate::auth::{CurrentUser, end_session, start_session};
use crate::user::{NewUser, UserService, UserServiceError};
use crate::web::{AppState, PageContext, WebError, redirect_with_flash};

/// Shown for both an unknown username and a wrong password.
pub const LOGIN_FAILED_MESSAGE: &str = "Incorrect Username and/or Password";

/// Represents the registration form payload.
#[derive(serde::Deserialize, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub name: String,
    pub department: String,
    pub password: String,
}

impl RegisterRequest {
    fn validate(self) -> Result<NewUser, &'static str> {
        let username = self.username.trim();
        if username.is_empty() || username.contains(char::is_whitespace) {
            return Err("Please choose a username without spaces");
        }
        if self.password.is_empty() {
            return Err("Please choose a password");
        }
        Ok(NewUser {
            username: username.to_string(),
            name: self.name.trim().to_string(),
            department: self.department.trim().to_string(),
            password: self.password,
        })
    }
}

/// Represents the login request payload.
#[derive(serde::Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub page: PageContext,
}

/// Creates the router for registration, login and logout.
pub fn create_auth_router(state: AppState) -> Router {
    Router::new()
        .route("/register", get(register_page_handler).post(register_handler))
        .route("/login", get(login_page_handler).post(login_handler))
        .route("/logout", get(logout_handler))
        .with_state(state)
}

/// Handles GET requests to display the registration page.
#[tracing::instrument(skip(state, jar))]
pub async fn register_page_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    current_user: Option<Extension<CurrentUser>>,
) -> Result<(CookieJar, Html<String>), WebError> {
    let (jar, page) = PageContext::take(jar, &state.auth, current_user.as_deref());
    let html = RegisterTemplate { page }.render()?;
    Ok((jar, Html(html)))
}

/// Handles the registration form. A taken username sends the visitor back to
/// the form; otherwise the new user is logged in straight away.
#[tracing::instrument(skip(state, jar, payload), fields(username = %payload.username))]
pub async fn register_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<RegisterRequest>,
) -> Result<(CookieJar, Redirect), WebError> {
    let new_user = match payload.validate() {
        Ok(new_user) => new_user,
        Err(message) => return redirect_with_flash(jar, &state.auth, message, "/register"),
    };

    match UserService::new(&state.db).create_user(new_user).await {
        Ok(user) => {
            tracing::info!("Registered user {}", user.username());
            let jar = start_session(jar, &state.auth, user.username())?;
            redirect_with_flash(jar, &state.auth, "Registration Successful", "/get_tasks")
        }
        Err(UserServiceError::DuplicateUsername(_)) => {
            redirect_with_flash(jar, &state.auth, "Username already exists", "/register")
        }
        Err(err) => Err(err.into()),
    }
}

/// Handles GET requests to display the login page.
#[tracing::instrument(skip(state, jar))]
pub async fn login_page_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    current_user: Option<Extension<CurrentUser>>,
) -> Result<(CookieJar, Html<String>), WebError> {
    let (jar, page) = PageContext::take(jar, &state.auth, current_user.as_deref());
    let html = LoginTemplate { page }.render()?;
    Ok((jar, Html(html)))
}

/// Handles the login request.
/// Checks the submitted username and password against the stored hash.
#[tracing::instrument(skip(state, jar, payload), fields(username = %payload.username))]
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<LoginRequest>,
) -> Result<(CookieJar, Redirect), WebError> {
    let user = UserService::new(&state.db)
        .authenticate(&payload.username, &payload.password)
        .await?;

    let Some(user) = user else {
        tracing::info!("Rejected login attempt");
        return redirect_with_flash(jar, &state.auth, LOGIN_FAILED_MESSAGE, "/login");
    };

    let jar = start_session(jar, &state.auth, user.username())?;
    redirect_with_flash(
        jar,
        &state.auth,
        format!("Welcome Back, {}", payload.username),
        "/get_tasks",
    )
}

/// Ends the session. Visiting without a session is harmless.
#[tracing::instrument(skip(state, jar))]
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    current_user: Option<Extension<CurrentUser>>,
) -> Result<(CookieJar, Redirect), WebError> {
    if let Some(Extension(user)) = current_user {
        tracing::info!("Logging out {}", user.username);
    }
    let jar = end_session(jar);
    redirect_with_flash(jar, &state.auth, "You have been logged out", "/login")
}
