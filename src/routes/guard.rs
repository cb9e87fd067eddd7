use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use crate::constants::SESSION_COOKIE;
use crate::routes::login::session_cookie;
use crate::AppState;

/// Reject requests without a valid session and renew the ones that have one
///
/// The verified `Principal` is inserted into the request extensions. Every
/// successful pass re-issues the cookie, so the lifetime slides with
/// activity.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let now = Utc::now();
    let principal = jar
        .get(SESSION_COOKIE)
        .and_then(|c| state.sessions.verify(c.value(), now));

    let Some(principal) = principal else {
        tracing::debug!("No valid session for {}", request.uri().path());
        return Redirect::to("/login").into_response();
    };

    let renewed = session_cookie(
        state.sessions.issue(&principal.email, now),
        state.config.secure_cookies(),
    );

    request.extensions_mut().insert(principal);
    let response = next.run(request).await;

    (jar.add(renewed), response).into_response()
}
