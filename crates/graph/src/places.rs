use anyhow::{Context, Result};
use ingest::lenient::value_to_string;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

/// Place name to external gazetteer id (Pleiades).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceMapping {
    entries: BTreeMap<String, String>,
}

impl PlaceMapping {
    /// Load a `{ "place": id }` JSON object. A missing file is an empty
    /// mapping; ids may be numbers or strings.
    pub async fn load(path: &Path) -> Result<Self> {
        if !fs::try_exists(path).await.unwrap_or(false) {
            tracing::warn!(path = %path.display(), "Place mapping not found, skipping");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .await
            .context(format!("Failed to read place mapping: {:?}", path))?;
        let object: Map<String, Value> = serde_json::from_str(&content)
            .context(format!("Failed to parse place mapping: {:?}", path))?;

        let mapping: Self = object
            .into_iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k, value_to_string(&v)))
            .collect();

        tracing::info!(entries = mapping.len(), "Place mapping loaded");
        Ok(mapping)
    }

    pub fn get(&self, place: &str) -> Option<&str> {
        self.entries.get(place).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for PlaceMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
