pub mod dashboard;
pub mod guard;
pub mod health;
pub mod login;

use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::constants::MSG_PAGE_NOT_FOUND;
use crate::AppState;

pub use dashboard::{show_page, show_root};
pub use guard::require_session;
pub use health::health_check;
pub use login::{index, login, login_form, logout};

/// Build the application router
pub fn router(state: AppState) -> Router {
    let dashboard = Router::new()
        .route("/main", get(show_root))
        .route("/main/", get(show_root))
        .route("/main/*page", get(show_page))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/", get(index))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .route("/health", get(health_check))
        .merge(dashboard)
        .fallback(|| async { (StatusCode::NOT_FOUND, MSG_PAGE_NOT_FOUND) })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
