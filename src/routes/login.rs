use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use serde::Deserialize;

use crate::auth::authenticate;
use crate::constants::{DEFAULT_ROUTE, SESSION_COOKIE, SESSION_TTL_DAYS};
use crate::error::{AppError, Result};
use crate::AppState;

/// Missing fields deserialize as blank and are rejected like bad credentials
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Build the session cookie carrying a signed value
pub fn session_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::days(SESSION_TTL_DAYS))
        .build()
}

/// `GET /` always sends visitors to the login page
pub async fn index() -> Redirect {
    Redirect::to("/login")
}

/// Render the login form, or skip it when the session is still valid
pub async fn login_form(State(state): State<AppState>, jar: CookieJar) -> Result<Response> {
    let signed_in = jar
        .get(SESSION_COOKIE)
        .and_then(|c| state.sessions.verify(c.value(), Utc::now()))
        .is_some();

    if signed_in {
        return Ok(Redirect::to(DEFAULT_ROUTE).into_response());
    }

    Ok(Html(state.templates.login()?).into_response())
}

/// Check credentials and start a session
///
/// Any failure yields the same `401 Invalid credentials` body and no cookie,
/// whether the email is unknown or the password is wrong.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect)> {
    let principal = authenticate(state.users.as_ref(), &form.email, &form.password)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let value = state.sessions.issue(&principal.email, Utc::now());
    let cookie = session_cookie(value, state.config.secure_cookies());

    Ok((jar.add(cookie), Redirect::to(DEFAULT_ROUTE)))
}

/// End the session
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/login"))
}
