//! Connection settings.
//!
//! Values come from the command line, falling back to `CAMPUS_*` environment
//! variables. A `.env` file in the working directory is loaded first so it
//! can provide those variables.

use std::path::PathBuf;
use std::time::Duration;

use campus_lib::CampusClient;
use campus_lib::auth::StaticTokenProvider;
use campus_lib::error::ApiError;

use crate::cli::Cli;

/// Loads `.env`, returning its path if one was found.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Resolved connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub token: String,
    pub timeout: Option<Duration>,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            base_url: cli.url.clone(),
            token: cli.token.clone(),
            timeout: (cli.timeout > 0).then(|| Duration::from_secs(cli.timeout)),
        }
    }

    /// Builds the API client.
    pub fn client(&self) -> Result<CampusClient, ApiError> {
        let builder = CampusClient::builder()
            .url(&self.base_url)
            .token_provider(StaticTokenProvider::new(&self.token));
        match self.timeout {
            Some(timeout) => builder.timeout(timeout).connect_timeout(timeout).build(),
            None => builder.build(),
        }
    }
}
