//! GitHub release webhook payloads.

mod types;

use log::warn;

pub use types::{PUBLISHED_ACTION, Release, ReleaseAsset, ReleaseEvent};

/// Decodes a webhook body into a [`ReleaseEvent`].
///
/// Missing fields fall back to their defaults. A body that is not valid JSON
/// decodes to [`ReleaseEvent::default`], whose empty action makes the event
/// uninteresting to callers.
#[tracing::instrument(skip(body), fields(len = body.len()))]
pub fn parse_event(body: &[u8]) -> ReleaseEvent {
    match serde_json::from_slice(body) {
        Ok(event) => event,
        Err(e) => {
            warn!("Failed to decode webhook payload ({}), using defaults", e);
            ReleaseEvent::default()
        }
    }
}
