use altstore_hook::config::{
    AppProfile, Config, DEFAULT_BUNDLE_NAME, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_LISTEN_ADDR,
    DEFAULT_REDIRECT_URL,
};
use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// altstore-hook - AltStore source updater
///
/// Receives GitHub release webhooks, reads the version from the published
/// .ipa package, and prepends the release to an AltStore source file.
///
/// Every option can also be given through the environment variable shown.
#[derive(Parser, Debug)]
#[command(author, version = env!("ALTSTORE_HOOK_VERSION"), about)]
struct Cli {
    /// Shared secret configured on the GitHub webhook
    #[arg(long, env = "WEBHOOK_SECRET", hide_env_values = true)]
    secret: String,

    /// Path of the AltStore source JSON file to update
    #[arg(long = "catalog", env = "ALTSTORE_FILE", value_name = "PATH")]
    catalog_path: PathBuf,

    /// Address to listen on
    #[arg(long = "listen", env = "LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    listen_addr: SocketAddr,

    /// Where `GET /update` redirects to
    #[arg(long, env = "REDIRECT_URL", default_value = DEFAULT_REDIRECT_URL)]
    redirect_url: String,

    /// Timeout in seconds for each package download request
    #[arg(long, env = "FETCH_TIMEOUT", value_name = "SECONDS", default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    fetch_timeout: u64,

    /// Name of the .app bundle inside the package (Payload/<NAME>.app/Info.plist)
    #[arg(long, env = "APP_BUNDLE_NAME", value_name = "NAME", default_value = DEFAULT_BUNDLE_NAME)]
    bundle_name: String,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        Config::new(
            self.secret,
            self.catalog_path,
            self.listen_addr,
            self.redirect_url,
            Duration::from_secs(self.fetch_timeout),
            AppProfile::enmity(self.bundle_name),
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Cli::parse().into_config()?;
    altstore_hook::webhook::serve(config).await
}
