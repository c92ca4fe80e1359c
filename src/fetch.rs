//! Artifact retrieval over HTTP(S).
//!
//! Provides a trait-based abstraction over the single unauthenticated GET
//! the installer performs, so the provisioning pipeline can be tested
//! without network access.

use std::io::Write as _;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// Network timeout for artifact downloads.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for fetching the artifact body from a registry URL.
#[cfg_attr(test, mockall::automock)]
pub trait ArtefactFetcher {
    /// Download `url` and write the full response body to `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or a failed
    /// write of the body.
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchFailure>;
}

/// A single failed fetch attempt.
///
/// One failure is not fatal by itself; the pipeline tries sources in
/// priority order and only the last failure aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum FetchFailure {
    /// HTTP request failed (transport error or non-2xx status).
    #[error("request failed for {url}: {reason}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The registry answered 404 for the artifact.
    #[error("artifact not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// I/O error writing the downloaded body.
    #[error("I/O error writing download: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP-based fetcher using `ureq`.
#[derive(Debug, Default)]
pub struct HttpFetcher;

impl ArtefactFetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), FetchFailure> {
        log::debug!("fetching {url}");
        let response = http_agent()
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, &e))?;
        let mut file = std::fs::File::create(dest)?;
        std::io::copy(&mut response.into_body().as_reader(), &mut file)
            .map_err(FetchFailure::Io)?;
        file.flush()?;
        Ok(())
    }
}

/// Shared `ureq` agent with request timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(DOWNLOAD_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`FetchFailure`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> FetchFailure {
    match err {
        ureq::Error::StatusCode(404) => FetchFailure::NotFound {
            url: url.to_owned(),
        },
        other => FetchFailure::Http {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
