use anyhow::{Result, bail};
use log::debug;
use reqwest::Client;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8081";
pub const DEFAULT_REDIRECT_URL: &str = "https://altstore.enmity.app";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_BUNDLE_NAME: &str = "Discord";

/// Runtime configuration, built once at startup and handed to the server.
#[derive(Debug, Clone)]
pub struct Config {
    pub secret: String,
    pub catalog_path: PathBuf,
    pub listen_addr: SocketAddr,
    pub redirect_url: String,
    pub fetch_timeout: Duration,
    pub app: AppProfile,
}

impl Config {
    pub fn new(
        secret: String,
        catalog_path: PathBuf,
        listen_addr: SocketAddr,
        redirect_url: String,
        fetch_timeout: Duration,
        app: AppProfile,
    ) -> Result<Self> {
        if secret.is_empty() {
            bail!("Webhook secret must not be empty");
        }
        if fetch_timeout.is_zero() {
            bail!("Fetch timeout must be greater than zero");
        }

        debug!(
            "Using catalog {:?}, bundle {:?}, fetch timeout {:?}",
            catalog_path, app.bundle_name, fetch_timeout
        );

        Ok(Self {
            secret,
            catalog_path,
            listen_addr,
            redirect_url,
            fetch_timeout,
            app,
        })
    }

    /// Builds the outbound client used to fetch release packages.
    pub fn http_client(&self) -> Result<Client> {
        let client = Client::builder()
            .user_agent(concat!("altstore-hook/", env!("ALTSTORE_HOOK_VERSION")))
            .connect_timeout(self.fetch_timeout)
            .timeout(self.fetch_timeout)
            .build()?;
        Ok(client)
    }
}

/// Deployment constants describing the application published to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct AppProfile {
    pub name: String,
    pub bundle_identifier: String,
    pub developer_name: String,
    pub subtitle: String,
    pub localized_description: String,
    pub icon_url: String,
    pub tint_color: String,
    /// Release attachment carrying the stable build.
    pub stable_asset: String,
    /// Release attachment carrying the development build.
    pub dev_asset: String,
    /// Directory name of the `.app` bundle inside the package payload.
    pub bundle_name: String,
}

impl AppProfile {
    pub fn enmity(bundle_name: impl Into<String>) -> Self {
        Self {
            name: "Enmity".to_string(),
            bundle_identifier: "com.hammerandchisel.discord".to_string(),
            developer_name: "Enmity Team".to_string(),
            subtitle: "The power of addons, all in your hand.".to_string(),
            localized_description: "Add plugins and themes to Discord!".to_string(),
            icon_url: "https://files.enmity.app/icon-altstore.png".to_string(),
            tint_color: "6D00FF".to_string(),
            stable_asset: "enmity.ipa".to_string(),
            dev_asset: "enmity.dev.ipa".to_string(),
            bundle_name: bundle_name.into(),
        }
    }

    /// Path of the bundle's Info.plist inside the package archive.
    pub fn info_plist_path(&self) -> String {
        format!("Payload/{}.app/Info.plist", self.bundle_name)
    }
}

impl Default for AppProfile {
    fn default() -> Self {
        Self::enmity(DEFAULT_BUNDLE_NAME)
    }
}
