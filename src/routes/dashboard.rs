use axum::{
    extract::{Path, State},
    response::Html,
    Extension,
};
use chrono::Local;

use crate::error::Result;
use crate::pages::{assemble_page, PageKind};
use crate::session::Principal;
use crate::AppState;

/// `GET /main/*page`
pub async fn show_page(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(page): Path<String>,
) -> Result<Html<String>> {
    render(&state, &principal, PageKind::parse(&page)).await
}

/// `GET /main`, which has no content of its own
pub async fn show_root(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Html<String>> {
    render(&state, &principal, PageKind::NotFound).await
}

async fn render(state: &AppState, principal: &Principal, kind: PageKind) -> Result<Html<String>> {
    let sources = state.sources.clone();
    let policy = state.config.malformed_date_policy;
    let today = Local::now().date_naive();

    // CSV loading is blocking file I/O
    let content =
        tokio::task::spawn_blocking(move || assemble_page(kind, &sources, today, policy)).await?;

    Ok(Html(state.templates.page(principal, &content)?))
}
