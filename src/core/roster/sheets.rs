//! Spreadsheet roster source backed by CSV exports

use super::error::RosterError;
use super::parser::parse_roster_csv;
use super::{Roster, RosterSource};
use crate::config::RosterConfig;
use crate::utils::error::{CertforgeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Roster source reading Google Sheets (or any CSV URL) over HTTP
#[derive(Debug, Clone)]
pub struct SheetsRosterSource {
    client: Client,
    config: RosterConfig,
}

impl SheetsRosterSource {
    /// Create a new roster source
    pub fn new(config: RosterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                CertforgeError::Config(format!("Failed to create roster HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl RosterSource for SheetsRosterSource {
    async fn fetch_roster(&self, reference: &str) -> std::result::Result<Roster, RosterError> {
        let url = resolve_export_url(reference, &self.config.export_base_url)?;
        debug!("Fetching roster from {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| RosterError::UnreachableSource(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RosterError::UnreachableSource(format!(
                "{} returned HTTP {}",
                url, status
            )));
        }

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/html"));
        if is_html {
            return Err(RosterError::MalformedRoster(
                "received an HTML page instead of a sheet export (is the sheet shared?)"
                    .to_string(),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RosterError::UnreachableSource(format!("{}: {}", url, e)))?;

        let roster = Roster::from_names(parse_roster_csv(&body, self.config.has_header)?);
        if roster.is_empty() {
            info!("Roster at {} is empty", url);
        } else {
            info!("Fetched {} roster entries from {}", roster.len(), url);
        }
        Ok(roster)
    }
}

/// Turn a sheet URL, a bare sheet id, or a direct CSV URL into a fetchable URL
pub fn resolve_export_url(
    reference: &str,
    export_base_url: &str,
) -> std::result::Result<Url, RosterError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(RosterError::UnreachableSource(
            "empty roster reference".to_string(),
        ));
    }

    match Url::parse(reference) {
        Ok(url) => {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(RosterError::UnreachableSource(format!(
                    "unsupported scheme '{}'",
                    url.scheme()
                )));
            }
            if url.host_str() == Some("docs.google.com") {
                let sheet_id = sheet_id_from_path(url.path()).ok_or_else(|| {
                    RosterError::UnreachableSource(format!("no sheet id in {}", reference))
                })?;
                return export_url(export_base_url, sheet_id, gid_from_url(&url).as_deref());
            }
            Ok(url)
        }
        Err(_) if is_sheet_id(reference) => export_url(export_base_url, reference, None),
        Err(e) => Err(RosterError::UnreachableSource(format!(
            "cannot resolve roster reference '{}': {}",
            reference, e
        ))),
    }
}

fn export_url(
    base: &str,
    sheet_id: &str,
    gid: Option<&str>,
) -> std::result::Result<Url, RosterError> {
    let mut raw = format!(
        "{}/spreadsheets/d/{}/export?format=csv",
        base.trim_end_matches('/'),
        sheet_id
    );
    if let Some(gid) = gid {
        raw.push_str("&gid=");
        raw.push_str(gid);
    }
    Url::parse(&raw).map_err(|e| RosterError::UnreachableSource(format!("{}: {}", raw, e)))
}

fn sheet_id_from_path(path: &str) -> Option<&str> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    while let Some(segment) = segments.next() {
        if segment == "d" {
            return segments.next().filter(|id| is_sheet_id(id));
        }
    }
    None
}

fn gid_from_url(url: &Url) -> Option<String> {
    if let Some((_, gid)) = url.query_pairs().find(|(k, _)| k == "gid") {
        return Some(gid.into_owned());
    }
    url.fragment()
        .and_then(|f| f.strip_prefix("gid="))
        .map(str::to_string)
}

fn is_sheet_id(candidate: &str) -> bool {
    candidate.len() >= 20
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
