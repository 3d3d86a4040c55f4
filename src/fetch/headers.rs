//! Request header rotation
//!
//! Every request attempt asks a [`HeaderSource`] for a fresh header set, so a
//! retried request goes out looking different from the one that failed.

use crate::config::HeaderConfig;
use crate::GleanError;
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Supplies the headers for a single request attempt
///
/// Implementations are shared by every worker and must be safe to call
/// concurrently.
pub trait HeaderSource: Send + Sync {
    /// Returns the header set for the next request
    fn next_header_set(&self) -> HeaderMap;
}

/// Picks a user agent and accept-language at random on every call
#[derive(Debug, Clone)]
pub struct RandomHeaders {
    user_agents: Vec<HeaderValue>,
    accept_languages: Vec<HeaderValue>,
}

impl RandomHeaders {
    /// Builds the rotator from configured value lists
    ///
    /// # Returns
    ///
    /// * `Ok(RandomHeaders)` - All values are valid header values
    /// * `Err(GleanError::InvalidHeader)` - A list is empty or holds an invalid value
    pub fn from_config(config: &HeaderConfig) -> Result<Self, GleanError> {
        Ok(Self {
            user_agents: to_header_values("user agent", &config.user_agents)?,
            accept_languages: to_header_values("accept language", &config.accept_languages)?,
        })
    }
}

impl HeaderSource for RandomHeaders {
    fn next_header_set(&self) -> HeaderMap {
        let mut rng = rand::thread_rng();
        let mut headers = HeaderMap::new();

        if let Some(user_agent) = self.user_agents.choose(&mut rng) {
            headers.insert(USER_AGENT, user_agent.clone());
        }
        if let Some(language) = self.accept_languages.choose(&mut rng) {
            headers.insert(ACCEPT_LANGUAGE, language.clone());
        }
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

        headers
    }
}

fn to_header_values(kind: &str, values: &[String]) -> Result<Vec<HeaderValue>, GleanError> {
    if values.is_empty() {
        return Err(GleanError::InvalidHeader(format!("no {} values configured", kind)));
    }

    values
        .iter()
        .map(|value| {
            HeaderValue::from_str(value)
                .map_err(|_| GleanError::InvalidHeader(format!("{} '{}'", kind, value)))
        })
        .collect()
}
