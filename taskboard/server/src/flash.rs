//! One-shot messages carried across a redirect in a signed cookie.

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};

use crate::auth::AuthState;

pub const FLASH_COOKIE: &str = "flash";

/// Flash messages only need to survive a single redirect.
const FLASH_MINUTES: i64 = 5;

#[derive(Serialize, Deserialize, Debug)]
struct FlashClaims {
    exp: usize,
    message: String,
}

/// Stores `message` for the next rendered page.
pub fn push(
    jar: CookieJar,
    auth: &AuthState,
    message: impl Into<String>,
) -> jsonwebtoken::errors::Result<CookieJar> {
    let exp = (chrono::Utc::now() + chrono::Duration::minutes(FLASH_MINUTES)).timestamp() as usize;
    let claims = FlashClaims {
        exp,
        message: message.into(),
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
    )?;
    let cookie = Cookie::build((FLASH_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    Ok(jar.add(cookie))
}

/// Reads and clears the pending message, if any.
pub fn take(jar: CookieJar, auth: &AuthState) -> (CookieJar, Option<String>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let message = jsonwebtoken::decode::<FlashClaims>(
        cookie.value(),
        &jsonwebtoken::DecodingKey::from_secret(auth.jwt_secret.as_bytes()),
        &jsonwebtoken::Validation::default(),
    )
    .map(|data| data.claims.message)
    .map_err(|err| tracing::debug!("Dropping unreadable flash cookie: {}", err))
    .ok();

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), message)
}
