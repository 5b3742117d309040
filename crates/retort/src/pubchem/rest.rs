//! PubChem PUG REST client.
//!
//! Uses the property endpoints:
//! `/compound/{namespace}/property/InChIKey,CanonicalSMILES/JSON` with
//! the identifier passed as a query parameter, which sidesteps path-escaping
//! problems for SMILES strings containing `/` or `#`.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{Result, RetortError};

use super::provider::{CompoundMatch, CompoundProvider, LookupError, LookupResult, Namespace};

/// PUG REST base URL.
const API_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug";

/// Properties requested for every lookup.
const PROPERTIES: &str = "InChIKey,CanonicalSMILES";

/// Request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking PubChem client.
pub struct PubChemClient {
    client: Client,
    base_url: String,
}

impl PubChemClient {
    /// Create a client against the public PubChem endpoint.
    pub fn new() -> Result<Self> {
        Self::with_base_url(API_URL)
    }

    /// Create a client against a custom base URL (test servers, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| RetortError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn get_properties(
        &self,
        path: &str,
        query: Option<(&str, &str)>,
    ) -> LookupResult<Vec<CompoundMatch>> {
        let url = format!("{}/{}", self.base_url, path);

        let mut request = self.client.get(&url);
        if let Some((key, value)) = query {
            request = request.query(&[(key, value)]);
        }

        let response = request
            .send()
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        match status {
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            StatusCode::BAD_REQUEST => {
                let body = response.text().unwrap_or_default();
                Err(LookupError::BadInput(truncate(&body)))
            }
            s if !s.is_success() => {
                let body = response.text().unwrap_or_default();
                Err(LookupError::Service {
                    status: s.as_u16(),
                    message: truncate(&body),
                })
            }
            _ => {
                let body = response
                    .text()
                    .map_err(|e| LookupError::Transport(e.to_string()))?;
                parse_properties(&body)
            }
        }
    }
}

impl CompoundProvider for PubChemClient {
    fn lookup(&self, identifier: &str, namespace: Namespace) -> LookupResult<Vec<CompoundMatch>> {
        let ns = namespace.label();
        let path = format!("compound/{ns}/property/{PROPERTIES}/JSON");
        self.get_properties(&path, Some((ns, identifier)))
    }

    fn smiles_for_cid(&self, cid: u64) -> LookupResult<Option<String>> {
        let path = format!("compound/cid/{cid}/property/CanonicalSMILES/JSON");
        let matches = self.get_properties(&path, None)?;
        Ok(matches.into_iter().find_map(|m| m.canonical_smiles))
    }

    fn name(&self) -> &str {
        "pubchem"
    }
}

/// Parse a PUG REST property table body.
fn parse_properties(body: &str) -> LookupResult<Vec<CompoundMatch>> {
    let parsed: PropertyResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::Transport(format!("unexpected response body: {e}")))?;

    Ok(parsed
        .property_table
        .properties
        .into_iter()
        .map(|p| CompoundMatch {
            cid: p.cid,
            inchikey: p.inchikey.filter(|s| !s.is_empty()),
            canonical_smiles: p.canonical_smiles.filter(|s| !s.is_empty()),
        })
        .collect())
}

fn truncate(body: &str) -> String {
    const MAX: usize = 300;
    let trimmed = body.trim();
    if trimmed.len() <= MAX {
        trimmed.to_string()
    } else {
        let cut = trimmed
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &trimmed[..cut])
    }
}

#[derive(Debug, Deserialize)]
struct PropertyResponse {
    #[serde(rename = "PropertyTable")]
    property_table: PropertyTable,
}

#[derive(Debug, Deserialize)]
struct PropertyTable {
    #[serde(rename = "Properties")]
    properties: Vec<PropertyEntry>,
}

#[derive(Debug, Deserialize)]
struct PropertyEntry {
    #[serde(rename = "CID")]
    cid: u64,
    #[serde(rename = "InChIKey", default)]
    inchikey: Option<String>,
    // Newer PUG REST revisions report the property as "SMILES".
    #[serde(rename = "CanonicalSMILES", alias = "SMILES", default)]
    canonical_smiles: Option<String>,
}
