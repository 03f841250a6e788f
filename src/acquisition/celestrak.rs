//! CelesTrak GP data retrieval.
//!
//! The retrieval collaborator is a trait seam so the pipeline can run
//! against the live CelesTrak endpoint, a local file, or canned test blobs
//! without touching the processing path. Sources return raw text; all
//! format knowledge lives in the parser.

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Per-request timeout for GP queries (seconds).
const FETCH_TIMEOUT_SECS: u64 = 15;

/// CelesTrak GP endpoint.
const CELESTRAK_GP_URL: &str = "https://celestrak.org/NORAD/elements/gp.php";

/// Default ordered group list: active satellites, space stations, then
/// recently catalogued objects (often includes fresh debris).
pub const DEFAULT_GROUPS: [&str; 3] = ["active", "stations", "last-30-days"];

/// Retrieval errors.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("group {group} returned status {status}")]
    Status {
        group: String,
        status: reqwest::StatusCode,
    },

    #[error("group {group} returned an empty body")]
    EmptyBody { group: String },

    #[error("all sources failed")]
    AllSourcesFailed,
}

/// Source-selection policy across the ordered group list.
///
/// First-success is the product default; it conflates availability with
/// completeness, so the alternatives are kept behind the same seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStrategy {
    /// Stop at the first non-empty successful response; later groups are
    /// never queried.
    #[default]
    FirstSuccess,
    /// Query every group and concatenate all successful blobs in order.
    MergeAll,
    /// Query every group, keep only the highest-priority success.
    PriorityOrder,
}

/// Trait abstracting where raw TLE text comes from.
#[async_trait]
pub trait TleSource: Send + Sync {
    /// Fetch raw TLE text blobs, in source order.
    ///
    /// Returns [`FetchError::AllSourcesFailed`] when no source yields a
    /// non-empty body — the orchestrator turns that into an empty catalog,
    /// not a crash.
    async fn fetch(&self) -> Result<Vec<String>, FetchError>;

    /// Human-readable name for logging.
    fn source_name(&self) -> &str;
}

// ============================================================================
// CelesTrak HTTP Source
// ============================================================================

/// HTTP client for the CelesTrak GP endpoint.
pub struct CelestrakClient {
    http: reqwest::Client,
    base_url: String,
    groups: Vec<String>,
    strategy: FetchStrategy,
}

impl CelestrakClient {
    /// Create a client with the default group list and strategy.
    pub fn new() -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: CELESTRAK_GP_URL.to_string(),
            groups: DEFAULT_GROUPS.iter().map(|g| g.to_string()).collect(),
            strategy: FetchStrategy::default(),
        })
    }

    /// Override the ordered group list.
    pub fn with_groups(mut self, groups: Vec<String>) -> Self {
        self.groups = groups;
        self
    }

    /// Override the source-selection strategy.
    pub fn with_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Point at a mirror instead of celestrak.org.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_group(&self, group: &str) -> Result<String, FetchError> {
        let url = format!("{}?GROUP={}&FORMAT=tle", self.base_url, group);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                group: group.to_string(),
                status,
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody {
                group: group.to_string(),
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl TleSource for CelestrakClient {
    async fn fetch(&self) -> Result<Vec<String>, FetchError> {
        let mut blobs = Vec::new();

        for group in &self.groups {
            match self.fetch_group(group).await {
                Ok(body) => {
                    tracing::info!(
                        group = %group,
                        lines = body.lines().count(),
                        "Fetched TLE group"
                    );
                    blobs.push(body);
                    if self.strategy == FetchStrategy::FirstSuccess {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(group = %group, error = %e, "TLE group fetch failed");
                }
            }
        }

        if self.strategy == FetchStrategy::PriorityOrder {
            blobs.truncate(1);
        }

        if blobs.is_empty() {
            Err(FetchError::AllSourcesFailed)
        } else {
            Ok(blobs)
        }
    }

    fn source_name(&self) -> &str {
        "CelesTrak"
    }
}

// ============================================================================
// Static Source (tests / offline file replay)
// ============================================================================

/// Serves pre-loaded text blobs. Used by tests and for offline runs against
/// a saved TLE file.
pub struct StaticSource {
    blobs: Vec<String>,
    name: String,
}

impl StaticSource {
    pub fn new(blobs: Vec<String>) -> Self {
        Self {
            blobs,
            name: "static".to_string(),
        }
    }

    /// Load a single blob from a file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let blob = std::fs::read_to_string(path)?;
        Ok(Self {
            blobs: vec![blob],
            name: path.display().to_string(),
        })
    }
}

#[async_trait]
impl TleSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<String>, FetchError> {
        let blobs: Vec<String> = self
            .blobs
            .iter()
            .filter(|b| !b.trim().is_empty())
            .cloned()
            .collect();
        if blobs.is_empty() {
            Err(FetchError::AllSourcesFailed)
        } else {
            Ok(blobs)
        }
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source_yields_non_empty_blobs() {
        let source = StaticSource::new(vec!["DATA".to_string(), "  ".to_string()]);
        let blobs = source.fetch().await.unwrap();
        assert_eq!(blobs, vec!["DATA".to_string()]);
    }

    #[tokio::test]
    async fn test_static_source_all_empty_is_failure() {
        let source = StaticSource::new(vec![String::new()]);
        assert!(matches!(
            source.fetch().await,
            Err(FetchError::AllSourcesFailed)
        ));

        let source = StaticSource::new(Vec::new());
        assert!(matches!(
            source.fetch().await,
            Err(FetchError::AllSourcesFailed)
        ));
    }

    #[test]
    fn test_default_strategy_is_first_success() {
        assert_eq!(FetchStrategy::default(), FetchStrategy::FirstSuccess);
    }
}
