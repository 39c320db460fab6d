// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use drilldown_app::{Chain, Row, SelectHost, SelectIds, Selection};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use time::OffsetDateTime;
use url::Url;

pub const DEFAULT_BOOTSTRAP_PATH: &str = "/api/diagram/bootstrap";

/// Failure of the one-time bootstrap fetch. There are no retries; the
/// caller decides what a failed startup means.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("bootstrap failed: {status}")]
    Status { status: u16 },
    #[error("bootstrap request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("bootstrap payload is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BootstrapError {
    /// The HTTP status for `Status` failures, None otherwise.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Initial selection seed as the server sends it. Field names follow the
/// wire (`divs` is the division filter); missing or null fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Seed {
    #[serde(deserialize_with = "null_as_empty")]
    pub dept: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub sect: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub divs: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub plant: String,
}

impl Seed {
    /// Replace individual fields with explicitly configured overrides.
    pub fn merged(mut self, overrides: &SeedOverride) -> Self {
        if let Some(dept) = &overrides.dept {
            self.dept = dept.clone();
        }
        if let Some(sect) = &overrides.sect {
            self.sect = sect.clone();
        }
        if let Some(divs) = &overrides.divs {
            self.divs = divs.clone();
        }
        if let Some(plant) = &overrides.plant {
            self.plant = plant.clone();
        }
        self
    }

    /// The chain selection this seed asks for; `divs` maps to the division
    /// level.
    pub fn selection(&self) -> Selection {
        Selection {
            dept: Some(self.dept.clone()),
            sect: Some(self.sect.clone()),
            div: Some(self.divs.clone()),
            plant: Some(self.plant.clone()),
        }
    }
}

/// Partial seed from configuration, merged over the payload-provided one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedOverride {
    pub dept: Option<String>,
    pub sect: Option<String>,
    pub divs: Option<String>,
    pub plant: Option<String>,
}

/// The normalized bootstrap result: the immutable row list, the resolved
/// initial selection, and when the fetch happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub rows: Vec<Row>,
    pub initial: Seed,
    pub fetched_at: OffsetDateTime,
}

// The server answers with either a bare row array or an envelope carrying
// rows plus an initial selection. Both shapes collapse to (rows, seed).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Rows(Vec<Row>),
    Envelope {
        #[serde(default, rename = "allData")]
        all_data: Vec<Row>,
        #[serde(default)]
        initial: Seed,
    },
}

impl Payload {
    fn normalize(self) -> (Vec<Row>, Seed) {
        match self {
            Self::Rows(rows) => (rows, Seed::default()),
            Self::Envelope { all_data, initial } => (all_data, initial),
        }
    }
}

/// Resolve the bootstrap endpoint: an explicit full url wins, otherwise
/// the base url (trailing slashes stripped) is joined with the bootstrap
/// path (default [`DEFAULT_BOOTSTRAP_PATH`]).
pub fn resolve_endpoint(
    url: Option<&str>,
    base_url: Option<&str>,
    path: Option<&str>,
) -> Result<Url> {
    let raw = match url {
        Some(full) if !full.is_empty() => full.to_owned(),
        _ => {
            let base = base_url.unwrap_or_default().trim_end_matches('/');
            if base.is_empty() {
                bail!("bootstrap endpoint missing; set api.url or api.base_url");
            }
            let path = match path {
                Some(path) if !path.is_empty() => path,
                _ => DEFAULT_BOOTSTRAP_PATH,
            };
            format!("{base}{path}")
        }
    };
    Url::parse(&raw).with_context(|| format!("invalid bootstrap url {raw:?}"))
}

#[derive(Debug, Clone)]
pub struct Client {
    url: Url,
    http: HttpClient,
}

impl Client {
    /// Build the HTTP client for the one-shot fetch. Headers are forwarded
    /// verbatim as default headers; `with_credentials` enables the cookie
    /// store (the include/same-origin credentials toggle).
    pub fn new(
        url: Url,
        headers: &BTreeMap<String, String>,
        with_credentials: bool,
        timeout: Duration,
    ) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .with_context(|| format!("invalid header name {name:?}"))?;
            let header_value = HeaderValue::from_str(value)
                .with_context(|| format!("invalid value for header {name:?}"))?;
            default_headers.insert(header_name, header_value);
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .cookie_store(with_credentials)
            .build()
            .context("build HTTP client")?;

        Ok(Self { url, http })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Perform the single GET and normalize the payload. A non-success
    /// status is the only failure the chain startup promises to surface
    /// with a status code; malformed payload *fields* never fail, they
    /// default to empty.
    pub fn fetch(&self) -> Result<Snapshot, BootstrapError> {
        let response = self.http.get(self.url.clone()).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(BootstrapError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        let payload: Payload = serde_json::from_str(&body)?;
        let (rows, initial) = payload.normalize();
        Ok(Snapshot {
            rows,
            initial,
            fetched_at: OffsetDateTime::now_utc(),
        })
    }
}

/// The full startup sequence: one fetch, override merge, chain
/// construction, and the first `reload` from the resolved seed. Nothing
/// touches the host unless the fetch succeeds. Returns the chain plus the
/// snapshot so the caller keeps both the rows and the resolved seed.
pub fn init<H: SelectHost>(
    client: &Client,
    host: &mut H,
    ids: SelectIds,
    overrides: &SeedOverride,
) -> Result<(Chain, Snapshot), BootstrapError> {
    let mut snapshot = client.fetch()?;
    snapshot.initial = std::mem::take(&mut snapshot.initial).merged(overrides);

    let chain = Chain::new(snapshot.rows.clone(), ids);
    chain.reload(host, &snapshot.initial.selection());
    Ok((chain, snapshot))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
