//! Peak list retrieval

use std::io::Read;
use tracing::{
    debug,
    instrument,
};

use crate::errors::FetchError;
use crate::models::{
    DetectionMode,
    PeakPoint,
    parse_peak_list,
};

/// Anything that can produce the peak list of a sample.
pub trait PeakSource {
    fn fetch_peaks(
        &self,
        sample_id: &str,
        mode: DetectionMode,
    ) -> Result<Vec<PeakPoint>, FetchError>;
}

/// Blocking client for the food repository peak list API.
///
/// Issues `GET {base_url}/{sample_id}/{mode}` once per call, with no retry and
/// the transport's default timeouts.
#[derive(Clone)]
pub struct HttpPeakClient {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpPeakClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://metabolites.in/foods/api/peaklist";

    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, sample_id: &str, mode: DetectionMode) -> String {
        format!("{}/{}/{}", self.base_url, sample_id, mode)
    }
}

impl std::fmt::Debug for HttpPeakClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPeakClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Default for HttpPeakClient {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

impl PeakSource for HttpPeakClient {
    #[instrument(skip(self))]
    fn fetch_peaks(
        &self,
        sample_id: &str,
        mode: DetectionMode,
    ) -> Result<Vec<PeakPoint>, FetchError> {
        let url = self.endpoint(sample_id, mode);
        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status_code, _)) => {
                return Err(FetchError::RemoteFetchFailed { status_code });
            }
            Err(ureq::Error::Transport(t)) => return Err(FetchError::Transport(t.to_string())),
        };

        let status_code = response.status();
        if !(200..300).contains(&status_code) {
            return Err(FetchError::RemoteFetchFailed { status_code });
        }

        // into_string() caps bodies at 10 MB, peak lists can be larger.
        let mut body = String::new();
        response
            .into_reader()
            .read_to_string(&mut body)
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let peaks = parse_peak_list(&body)?;
        debug!("Fetched {} peaks from {}", peaks.len(), url);
        Ok(peaks)
    }
}
