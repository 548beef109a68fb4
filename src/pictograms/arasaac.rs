//! HTTP client for the ARASAAC pictogram search API.
//!
//! Search endpoint: `{base}/pictograms/{locale}/search/{term}`; a match's
//! image lives at `{base}/pictograms/{id}`. The API answers 404 for a term
//! with no pictograms, which is a miss rather than a failure.

use super::{LookupService, PictogramMatch};
use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.arasaac.org/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Deserialize)]
struct ArasaacPictogram {
    #[serde(rename = "_id")]
    id: u64,
    #[serde(default)]
    keywords: Vec<ArasaacKeyword>,
}

#[derive(Debug, Clone, Deserialize)]
struct ArasaacKeyword {
    #[serde(default)]
    keyword: String,
}

pub struct ArasaacClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ArasaacClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("Building ARASAAC HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Image endpoint for a pictogram id.
    pub fn pictogram_url(&self, id: &str) -> String {
        format!("{}/pictograms/{}", self.base_url, id)
    }

    fn search_url(&self, term: &str, locale: &str) -> String {
        format!(
            "{}/pictograms/{}/search/{}",
            self.base_url,
            locale,
            urlencoding::encode(term)
        )
    }
}

impl LookupService for ArasaacClient {
    fn search(&self, term: &str, locale: &str) -> Result<Vec<PictogramMatch>> {
        let url = self.search_url(term, locale);
        debug!(%url, "Searching pictograms");
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Requesting pictogram search for {term:?}"))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(term, "ARASAAC has no pictogram for term");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            bail!("ARASAAC search returned {status} for term {term:?}");
        }

        let body = response.text().context("Reading pictogram search body")?;
        parse_matches(&self.base_url, term, &body)
    }
}

fn parse_matches(base_url: &str, term: &str, body: &str) -> Result<Vec<PictogramMatch>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let pictograms: Vec<ArasaacPictogram> =
        serde_json::from_str(body).context("Parsing pictogram search response")?;

    Ok(pictograms
        .into_iter()
        .map(|picto| {
            let id = picto.id.to_string();
            let label = picto
                .keywords
                .iter()
                .map(|k| k.keyword.trim())
                .find(|k| !k.is_empty())
                .unwrap_or(term)
                .to_string();
            PictogramMatch {
                word: term.to_lowercase(),
                external_id: id.clone(),
                image_url: format!("{base_url}/pictograms/{id}"),
                label,
            }
        })
        .collect())
}
