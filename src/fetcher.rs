use std::time::Duration;

use chrono::{Datelike, Months, NaiveDate};
use tracing::{error, info_span, warn};

use crate::error::FetchError;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Retrieves a page body. Substitutable so tests never touch the network.
pub trait HttpFetch: Send + Sync {
    fn get(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;
}

/// Blocking HTTP transport backed by a shared ureq agent.
#[derive(Debug, Clone)]
pub struct UreqFetch {
    agent: ureq::Agent,
}

impl Default for UreqFetch {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqFetch {
    pub fn new() -> Self {
        Self { agent: ureq::Agent::new_with_defaults() }
    }
}

impl HttpFetch for UreqFetch {
    fn get(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let response = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .config()
            .timeout_global(Some(timeout))
            .build()
            .call();
        match response {
            Ok(resp) => {
                let code = resp.status().as_u16();
                if !(200..300).contains(&code) {
                    return Err(FetchError::Status(code));
                }
                let mut body_reader = resp.into_body();
                body_reader.read_to_string().map_err(|e| FetchError::Body(e.to_string()))
            }
            Err(ureq::Error::StatusCode(code)) => Err(FetchError::Status(code)),
            Err(e) => Err(FetchError::Transport(e.to_string())),
        }
    }
}

/// Fixture-page client for one source site.
pub struct FixtureFetcher<'a> {
    http: &'a dyn HttpFetch,
    base_url: &'a str,
    timeout: Duration,
}

impl<'a> FixtureFetcher<'a> {
    pub fn new(http: &'a dyn HttpFetch, base_url: &'a str, timeout: Duration) -> Self {
        Self { http, base_url, timeout }
    }

    pub fn page_url(&self, slug: &str, anchor: Option<NaiveDate>) -> String {
        let base = self.base_url.trim_end_matches('/');
        match anchor {
            Some(date) => format!("{}/{}-scores-fixtures/{}", base, slug, date.format("%Y-%m-%d")),
            None => format!("{}/{}-scores-fixtures", base, slug),
        }
    }

    /// Fetch one month of fixtures. Failures are logged here and returned for the caller to count.
    pub fn fetch(&self, slug: &str, anchor: Option<NaiveDate>) -> Result<String, FetchError> {
        let url = self.page_url(slug, anchor);
        let result = {
            let _span = info_span!("fixture_fetch", url = %url).entered();
            self.http.get(&url, self.timeout)
        };
        match &result {
            Err(FetchError::Status(code)) => warn!(slug, status = code, url = %url, "Fixture page returned non-success status"),
            Err(e) => error!(slug, error = %e, url = %url, "Fixture page request failed"),
            Ok(_) => {}
        }
        result
    }
}

/// First day of the month after `today`; December rolls into January of the next year.
pub fn next_month_anchor(today: NaiveDate) -> Option<NaiveDate> {
    today.with_day(1)?.checked_add_months(Months::new(1))
}
