use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use std::sync::Arc;

use crate::package::VersionSource;
use crate::runtime::Runtime;
use crate::signature::SIGNATURE_HEADER;

use super::{Outcome, ReleaseHandler};

pub const UPDATE_PATH: &str = "/update";
pub const UPDATED_MESSAGE: &str = "Altstore repo has been updated!";
pub const IGNORED_MESSAGE: &str = "Event ignored";

/// Shared state behind the HTTP routes.
pub struct AppState<V: VersionSource, R: Runtime> {
    pub handler: ReleaseHandler<V, R>,
    pub redirect_url: String,
}

/// `GET /update` redirects to the public source page, `POST /update`
/// receives release webhooks.
pub fn router<V, R>(state: Arc<AppState<V, R>>) -> Router
where
    V: VersionSource + 'static,
    R: Runtime + 'static,
{
    Router::new()
        .route(
            UPDATE_PATH,
            get(redirect::<V, R>).post(receive_webhook::<V, R>),
        )
        .with_state(state)
}

async fn redirect<V, R>(State(state): State<Arc<AppState<V, R>>>) -> Redirect
where
    V: VersionSource + 'static,
    R: Runtime + 'static,
{
    Redirect::permanent(&state.redirect_url)
}

async fn receive_webhook<V, R>(
    State(state): State<Arc<AppState<V, R>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    V: VersionSource + 'static,
    R: Runtime + 'static,
{
    // A header that is not visible ASCII cannot be parsed and counts as absent.
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    match state.handler.handle_logged(signature, &body).await {
        Ok(Outcome::Updated { .. }) => (StatusCode::OK, UPDATED_MESSAGE).into_response(),
        Ok(Outcome::Ignored { .. }) => (StatusCode::OK, IGNORED_MESSAGE).into_response(),
        Err(e) => e.status().into_response(),
    }
}
