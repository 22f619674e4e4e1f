use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub batch: BatchSettings,
    pub graph: GraphSettings,
    pub log_json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Used when `extract` is run without `--input`.
    pub input: Option<PathBuf>,
    pub checkpoint_interval: usize,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSettings {
    pub format: String,
    pub place_mapping: Option<PathBuf>,
    pub permissive: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                base_url: "http://localhost:11434".to_string(),
                model: "llama3".to_string(),
            },
            batch: BatchSettings {
                input: None,
                checkpoint_interval: batch::DEFAULT_CHECKPOINT_INTERVAL,
                limit: None,
            },
            graph: GraphSettings {
                format: "turtle".to_string(),
                place_mapping: None,
                permissive: false,
            },
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `EPIGRAPH_*` variables (a `.env` file is read
    /// first when present).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("EPIGRAPH_LLM_BASE_URL") {
            config.llm.base_url = url;
        }
        if let Some(model) = lookup("EPIGRAPH_LLM_MODEL") {
            config.llm.model = model;
        }
        if let Some(input) = lookup("EPIGRAPH_INPUT") {
            config.batch.input = Some(PathBuf::from(input));
        }
        if let Some(interval) = lookup("EPIGRAPH_CHECKPOINT_INTERVAL") {
            config.batch.checkpoint_interval = interval
                .parse()
                .context("EPIGRAPH_CHECKPOINT_INTERVAL must be a positive number")?;
        }
        if let Some(limit) = lookup("EPIGRAPH_LIMIT") {
            config.batch.limit = Some(
                limit
                    .parse()
                    .context("EPIGRAPH_LIMIT must be a number")?,
            );
        }
        if let Some(format) = lookup("EPIGRAPH_RDF_FORMAT") {
            config.graph.format = format;
        }
        if let Some(path) = lookup("EPIGRAPH_PLACE_MAPPING") {
            config.graph.place_mapping = Some(PathBuf::from(path));
        }
        if let Some(flag) = lookup("EPIGRAPH_PERMISSIVE") {
            config.graph.permissive = parse_flag(&flag);
        }
        if let Some(flag) = lookup("EPIGRAPH_LOG_JSON") {
            config.log_json = parse_flag(&flag);
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
