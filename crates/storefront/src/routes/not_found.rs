//! 404 page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::filters;
use crate::state::AppState;
use crate::views::SiteView;

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub site: SiteView,
}

/// Render the 404 page with a `404 Not Found` status.
pub fn not_found_page(state: &AppState) -> Response {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            site: SiteView::new(state),
        },
    )
        .into_response()
}

/// Router fallback for paths no route matches.
pub async fn fallback(State(state): State<AppState>) -> Response {
    not_found_page(&state)
}
