use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use std::sync::Arc;
use tower_http::trace::MakeSpan;
use tracing::Span;

use crate::config::Config;

pub mod password;
pub mod web;

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "session";

/// How long a session token stays valid.
const SESSION_HOURS: i64 = 24;

/// Represents the currently authenticated user.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: String,
}

impl CurrentUser {
    /// Creates a new CurrentUser instance.
    pub fn new(username: String) -> Self {
        Self { username }
    }
}

/// Signing secret shared by the session and flash cookies.
#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
}

impl AuthState {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
        }
    }

    /// Creates a new AuthState from the application config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.secret_key.clone())
    }
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState").finish_non_exhaustive()
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct Claims {
    pub exp: usize,       // Expiry time of the token
    pub iat: usize,       // Issued at time of the token
    pub username: String, // Username of the authenticated user
}

pub fn encode_jwt(username: String, jwt_secret: &str) -> jsonwebtoken::errors::Result<String> {
    let now = chrono::Utc::now();
    let expire = chrono::Duration::hours(SESSION_HOURS);
    let exp = (now + expire).timestamp() as usize;
    let iat = now.timestamp() as usize;
    let claims = Claims { exp, iat, username };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
}

pub fn decode_jwt(token: &str, jwt_secret: &str) -> jsonwebtoken::errors::Result<Claims> {
    let token_data = jsonwebtoken::decode(
        token,
        &jsonwebtoken::DecodingKey::from_secret(jwt_secret.as_bytes()),
        &jsonwebtoken::Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Adds a fresh session cookie for `username` to the jar.
pub fn start_session(
    jar: CookieJar,
    auth: &AuthState,
    username: &str,
) -> jsonwebtoken::errors::Result<CookieJar> {
    let token = encode_jwt(username.to_string(), &auth.jwt_secret)?;
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(false) // Set to true in production with HTTPS
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(SESSION_HOURS))
        .path("/")
        .build();
    Ok(jar.add(cookie))
}

/// Removes the session cookie. A jar without one is returned unchanged.
pub fn end_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Authentication middleware that checks for a valid session token and sets the CurrentUser extension.
/// This middleware only populates the CurrentUser extension and does not perform redirects.
pub async fn auth_user_middleware(
    State(state): State<Arc<AuthState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token_cookie) = jar.get(SESSION_COOKIE) {
        match decode_jwt(token_cookie.value(), &state.jwt_secret) {
            Ok(claims) => {
                request
                    .extensions_mut()
                    .insert(CurrentUser::new(claims.username));
            }
            Err(err) => tracing::debug!("Ignoring invalid session token: {}", err),
        }
    }

    next.run(request).await
}

/// Login redirect middleware that redirects unauthenticated users to the login page.
/// This middleware should be applied after auth_user_middleware to check for CurrentUser extension.
pub async fn login_redirect_middleware(request: Request, next: Next) -> Response {
    if request.extensions().get::<CurrentUser>().is_none() {
        return Redirect::to("/login").into_response();
    }

    next.run(request).await
}

/// Custom span maker that filters sensitive data from credential-carrying requests.
#[derive(Clone, Debug)]
pub struct FilteredMakeSpan;

impl<B> MakeSpan<B> for FilteredMakeSpan {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let uri = request.uri();
        let method = request.method();
        let matched_path = request
            .extensions()
            .get::<MatchedPath>()
            .map(MatchedPath::as_str);

        if matches!(uri.path(), "/login" | "/register") {
            tracing::info_span!(
                "request",
                method = %method,
                path = %uri.path(),
                matched_path,
                sensitive_route = true,
            )
        } else {
            tracing::info_span!(
                "request",
                method = %method,
                uri = %uri,
                matched_path,
            )
        }
    }
}
