use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";
const SNIPPET_CHARS: usize = 200;

const ERROR_ID_PATTERN: &str = r"(?m)^EDCS-ID: (.+?)\s*$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ParseError,
    ProviderError,
    Exception,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::ParseError => "ParseError",
            ErrorKind::ProviderError => "ProviderError",
            ErrorKind::Exception => "Exception",
        })
    }
}

impl From<&extract::ExtractError> for ErrorKind {
    fn from(err: &extract::ExtractError) -> Self {
        match err {
            extract::ExtractError::Parse { .. } => ErrorKind::ParseError,
            extract::ExtractError::Provider(_) => ErrorKind::ProviderError,
            extract::ExtractError::Schema(_) => ErrorKind::Exception,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorEntry {
    pub edcs_id: String,
    pub kind: ErrorKind,
    pub message: String,
    pub text_snippet: String,
    pub at: DateTime<Local>,
}

impl ErrorEntry {
    pub fn new(edcs_id: &str, kind: ErrorKind, message: impl Into<String>, text: &str) -> Self {
        Self {
            edcs_id: edcs_id.to_string(),
            kind,
            message: message.into(),
            text_snippet: snippet(text),
            at: Local::now(),
        }
    }

    fn render(&self) -> String {
        format!(
            "[{}]\nEDCS-ID: {}\nError type: {}\nError message: {}\nInscription text: {}\n{}\n\n",
            self.at.format(TIMESTAMP),
            self.edcs_id,
            self.kind,
            self.message,
            self.text_snippet,
            "-".repeat(80),
        )
    }
}

/// The text itself up to 200 chars, else its first 197 chars and `...`.
pub fn snippet(text: &str) -> String {
    if text.chars().count() <= SNIPPET_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(SNIPPET_CHARS - 3).collect();
        format!("{}...", head)
    }
}

/// Append-only, human-readable record of failed items.
#[derive(Debug)]
pub struct ErrorLog {
    path: PathBuf,
    model_label: String,
    input_label: String,
    header_written: bool,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>, model_label: &str, input_label: &str) -> Self {
        Self {
            path: path.into(),
            model_label: model_label.to_string(),
            input_label: input_label.to_string(),
            header_written: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ids mentioned by earlier runs. Reported only; they are retried.
    pub async fn historical_ids(&self) -> Result<BTreeSet<String>> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(BTreeSet::new());
        }
        let content = fs::read_to_string(&self.path)
            .await
            .context(format!("Failed to read error log: {:?}", self.path))?;
        scan_ids(&content)
    }

    /// Append entries, preceded by this run's header on the first call.
    pub async fn append(&mut self, entries: &[ErrorEntry]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut text = String::new();
        if !self.header_written {
            text.push_str(&self.header(Local::now()));
        }
        for entry in entries {
            text.push_str(&entry.render());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create directory: {:?}", parent))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .context(format!("Failed to open error log: {:?}", self.path))?;
        file.write_all(text.as_bytes())
            .await
            .context(format!("Failed to append error log: {:?}", self.path))?;
        file.flush().await?;

        self.header_written = true;
        tracing::debug!(
            path = %self.path.display(),
            entries = entries.len(),
            "Error log flushed"
        );
        Ok(())
    }

    fn header(&self, started: DateTime<Local>) -> String {
        let rule = "=".repeat(80);
        format!(
            "{rule}\nError log - {} model\nRun started: {}\nInput file: {}\n{rule}\n\n",
            self.model_label.to_uppercase(),
            started.format(TIMESTAMP),
            self.input_label,
        )
    }
}

pub fn scan_ids(content: &str) -> Result<BTreeSet<String>> {
    let pattern = Regex::new(ERROR_ID_PATTERN)?;
    Ok(pattern
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn snippet_truncates_long_text() {
        assert_eq!(snippet("short"), "short");
        let exact = "x".repeat(200);
        assert_eq!(snippet(&exact), exact);

        let long = "ä".repeat(250);
        let cut = snippet(&long);
        assert_eq!(cut.chars().count(), 200);
        assert!(cut.ends_with("..."));
    }

    #[tokio::test]
    async fn one_header_per_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out_errors.log");

        let mut log = ErrorLog::new(&path, "llama3", "in.json");
        log.append(&[ErrorEntry::new("EDCS-1", ErrorKind::ParseError, "bad json", "D M")])
            .await
            .unwrap();
        log.append(&[ErrorEntry::new("EDCS-2", ErrorKind::Exception, "boom", "D M")])
            .await
            .unwrap();

        let mut next_run = ErrorLog::new(&path, "llama3", "in.json");
        next_run
            .append(&[ErrorEntry::new("EDCS-3", ErrorKind::ProviderError, "503", "")])
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("Error log - LLAMA3 model").count(), 2);
        assert!(content.contains("Error type: ParseError\nError message: bad json\n"));
        assert!(content.contains("Input file: in.json\n"));

        let ids: Vec<_> = next_run.historical_ids().await.unwrap().into_iter().collect();
        assert_eq!(ids, ["EDCS-1", "EDCS-2", "EDCS-3"]);
    }

    #[tokio::test]
    async fn empty_append_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("none.log");
        let mut log = ErrorLog::new(&path, "m", "i");
        log.append(&[]).await.unwrap();
        assert!(!path.exists());
        assert!(log.historical_ids().await.unwrap().is_empty());
    }
}
