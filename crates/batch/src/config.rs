use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CHECKPOINT_INTERVAL: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Accepted results, overwritten at each checkpoint.
    pub output_path: PathBuf,
    pub error_log_path: PathBuf,
    /// Shown in the error log header.
    pub input_label: String,
    pub model_label: String,
    pub checkpoint_interval: usize,
    /// Truncates the input before already-processed ids are filtered out.
    pub limit: Option<usize>,
}

impl BatchConfig {
    pub fn new(input: &Path, output_path: PathBuf, model_label: &str) -> Self {
        Self {
            error_log_path: error_log_path(&output_path),
            output_path,
            input_label: input.display().to_string(),
            model_label: model_label.to_string(),
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_checkpoint_interval(mut self, interval: usize) -> Self {
        self.checkpoint_interval = interval.max(1);
        self
    }
}

/// `filtered_data/<place>/x_filtered.json` -> `career_graphs/<model>/<place>/x_career.json`
pub fn default_output_path(input: &Path, model: &str) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = ["_filtered.json", "_errors.json", ".json"]
        .iter()
        .find_map(|suffix| file_name.strip_suffix(suffix))
        .unwrap_or(&file_name);

    let mut out = PathBuf::from("career_graphs").join(model);
    if let Some(place) = place_folder(input) {
        out.push(place);
    }
    out.push(format!("{}_career.json", stem));
    out
}

/// The directory directly below `filtered_data`, if the input sits in one.
fn place_folder(input: &Path) -> Option<String> {
    let parent = input.parent()?;
    let mut components = parent.components().map(|c| c.as_os_str());
    components.find(|c| *c == "filtered_data")?;
    components.next().map(|c| c.to_string_lossy().into_owned())
}

/// The output path with its `.json` suffix replaced by `_errors.log`.
pub fn error_log_path(output: &Path) -> PathBuf {
    let raw = output.to_string_lossy();
    match raw.strip_suffix(".json") {
        Some(stem) => PathBuf::from(format!("{}_errors.log", stem)),
        None => PathBuf::from(format!("{}_errors.log", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_strips_known_suffixes() {
        assert_eq!(
            default_output_path(Path::new("filtered_data/carthago_filtered.json"), "llama3"),
            PathBuf::from("career_graphs/llama3/carthago_career.json")
        );
        assert_eq!(
            default_output_path(Path::new("retry_errors.json"), "llama3"),
            PathBuf::from("career_graphs/llama3/retry_career.json")
        );
        assert_eq!(
            default_output_path(Path::new("plain.json"), "m"),
            PathBuf::from("career_graphs/m/plain_career.json")
        );
    }

    #[test]
    fn output_path_keeps_place_folder() {
        assert_eq!(
            default_output_path(
                Path::new("filtered_data/Carthago/2025-12-16_filtered.json"),
                "llama3"
            ),
            PathBuf::from("career_graphs/llama3/Carthago/2025-12-16_career.json")
        );
    }

    #[test]
    fn error_log_sits_next_to_output() {
        assert_eq!(
            error_log_path(Path::new("career_graphs/m/x_career.json")),
            PathBuf::from("career_graphs/m/x_career_errors.log")
        );
    }

    #[test]
    fn interval_is_never_zero() {
        let config = BatchConfig::new(Path::new("in.json"), PathBuf::from("out.json"), "m")
            .with_checkpoint_interval(0);
        assert_eq!(config.checkpoint_interval, 1);
        assert_eq!(config.error_log_path, PathBuf::from("out_errors.log"));
    }
}
