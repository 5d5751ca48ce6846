//! Data provider
//!
//! A single provider yields the snapshot served by the HTTP endpoint. Which
//! backing store it reads from is a configuration choice, not a second route.

pub mod error;
pub mod external;
pub mod mock;
pub mod static_file;

pub use error::ProviderError;

use crate::consts::cli_consts::provider::{DEFAULT_DATA_FILE, EXTERNAL_TIMEOUT_SECS};
use crate::snapshot::SentimentSnapshot;
use external::ExternalProcessProvider;
use mock::MockProvider;
use serde::{Deserialize, Serialize};
use static_file::StaticFileProvider;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

fn default_external_timeout() -> u64 {
    EXTERNAL_TIMEOUT_SECS
}

/// Serializable provider selection, as stored in the config file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderConfig {
    StaticFile {
        path: PathBuf,
    },
    Mock,
    ExternalProcess {
        program: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default = "default_external_timeout")]
        timeout_secs: u64,
    },
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::StaticFile {
            path: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

/// The active provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataProvider {
    StaticFile(StaticFileProvider),
    Mock(MockProvider),
    ExternalProcess(ExternalProcessProvider),
}

impl DataProvider {
    /// Yield the current snapshot.
    pub async fn snapshot(&self) -> Result<SentimentSnapshot, ProviderError> {
        match self {
            DataProvider::StaticFile(provider) => provider.snapshot().await,
            DataProvider::Mock(provider) => Ok(provider.snapshot()),
            DataProvider::ExternalProcess(provider) => provider.snapshot().await,
        }
    }
}

impl From<ProviderConfig> for DataProvider {
    fn from(config: ProviderConfig) -> Self {
        match config {
            ProviderConfig::StaticFile { path } => {
                DataProvider::StaticFile(StaticFileProvider::new(path))
            }
            ProviderConfig::Mock => DataProvider::Mock(MockProvider::new()),
            ProviderConfig::ExternalProcess {
                program,
                args,
                timeout_secs,
            } => DataProvider::ExternalProcess(ExternalProcessProvider::new(
                program,
                args,
                Duration::from_secs(timeout_secs),
            )),
        }
    }
}

impl Display for DataProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DataProvider::StaticFile(p) => write!(f, "static file {}", p.path().display()),
            DataProvider::Mock(_) => write!(f, "mock"),
            DataProvider::ExternalProcess(p) => write!(f, "external process `{}`", p.program()),
        }
    }
}
