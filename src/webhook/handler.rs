use axum::http::StatusCode;
use log::{error, info};

use crate::asset::{AssetNotFound, find_asset};
use crate::catalog::{CatalogError, CatalogStore, VersionDate, build_entry};
use crate::config::AppProfile;
use crate::github::parse_event;
use crate::package::{InspectError, VersionSource};
use crate::runtime::Runtime;
use crate::signature::{self, SignatureError};

/// Result of a webhook delivery that did not fail.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// The event was authentic but not a publish; nothing was done.
    Ignored { action: String },
    /// The catalog gained entries for the release.
    Updated { version: String },
}

/// Failures of the release pipeline.
#[derive(Debug)]
pub enum WebhookError {
    Signature(SignatureError),
    Asset(AssetNotFound),
    /// The release timestamp has no `YYYY-MM-DD` prefix.
    InvalidTimestamp(String),
    Inspect(InspectError),
    Catalog(CatalogError),
}

impl WebhookError {
    /// HTTP status reported to the webhook sender.
    pub fn status(&self) -> StatusCode {
        match self {
            WebhookError::Signature(SignatureError::Missing) => StatusCode::BAD_REQUEST,
            WebhookError::Signature(SignatureError::Mismatch) => StatusCode::UNAUTHORIZED,
            WebhookError::Signature(SignatureError::InvalidKey)
            | WebhookError::Asset(_)
            | WebhookError::InvalidTimestamp(_)
            | WebhookError::Inspect(_)
            | WebhookError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for WebhookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookError::Signature(e) => write!(f, "{}", e),
            WebhookError::Asset(e) => write!(f, "{}", e),
            WebhookError::InvalidTimestamp(ts) => {
                write!(f, "Release timestamp {:?} has no date prefix", ts)
            }
            WebhookError::Inspect(e) => write!(f, "Couldn't get package version: {}", e),
            WebhookError::Catalog(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for WebhookError {}

/// Turns a release notification into catalog entries.
pub struct ReleaseHandler<V: VersionSource, R: Runtime> {
    secret: String,
    app: AppProfile,
    versions: V,
    catalog: CatalogStore<R>,
}

impl<V: VersionSource, R: Runtime> ReleaseHandler<V, R> {
    pub fn new(secret: String, app: AppProfile, versions: V, catalog: CatalogStore<R>) -> Self {
        Self {
            secret,
            app,
            versions,
            catalog,
        }
    }

    /// Runs the pipeline for one delivery.
    ///
    /// `signature` is the raw signature header value, `body` the unparsed
    /// request body it was computed over. Nothing is fetched or written unless
    /// the signature matches and the event is a publish.
    #[tracing::instrument(skip(self, signature, body), fields(len = body.len()))]
    pub async fn handle(
        &self,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<Outcome, WebhookError> {
        signature::verify(body, self.secret.as_bytes(), signature)
            .map_err(WebhookError::Signature)?;

        let event = parse_event(body);
        if !event.is_published() {
            info!("Ignoring release event with action {:?}", event.action);
            return Ok(Outcome::Ignored {
                action: event.action,
            });
        }

        let release = &event.release;
        let stable =
            find_asset(&release.assets, &self.app.stable_asset).map_err(WebhookError::Asset)?;
        let dev = find_asset(&release.assets, &self.app.dev_asset).map_err(WebhookError::Asset)?;

        let date = VersionDate::from_timestamp(&release.created_at)
            .ok_or_else(|| WebhookError::InvalidTimestamp(release.created_at.clone()))?;

        let version = self
            .versions
            .extract_version(&stable.browser_download_url)
            .await
            .map_err(WebhookError::Inspect)?;

        let entries = [
            build_entry(&self.app, stable, release, &date, &version),
            build_entry(&self.app, dev, release, &date, &version),
        ];

        self.catalog
            .prepend(&entries)
            .await
            .map_err(WebhookError::Catalog)?;

        info!("Catalog updated to version {}", version);
        Ok(Outcome::Updated { version })
    }

    /// Like [`handle`](Self::handle), logging any failure before returning it.
    pub async fn handle_logged(
        &self,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<Outcome, WebhookError> {
        let result = self.handle(signature, body).await;
        if let Err(e) = &result {
            error!("Webhook rejected ({}): {}", e.status(), e);
        }
        result
    }
}
