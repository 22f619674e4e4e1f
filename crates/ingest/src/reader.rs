use anyhow::{Context, Result};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Malformed tabular input. Always fatal for the run.
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("input has no header row")]
    Empty,

    #[error("bad header: {0}")]
    Header(String),

    #[error("line {line}: expected at most {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },
}

/// Header plus raw rows, one `Vec` of cells per line.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub struct TsvReader;

impl TsvReader {
    /// Parse tab-separated text. Short rows are padded with empty cells.
    pub fn parse(content: &str) -> Result<Table, FormatError> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header_text) = lines.next().ok_or(FormatError::Empty)?;
        let header: Vec<String> = split_line(header_text, header_line)?
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();

        for (idx, name) in header.iter().enumerate() {
            if name.is_empty() {
                return Err(FormatError::Header(format!("column {} has no name", idx + 1)));
            }
            if header[..idx].contains(name) {
                return Err(FormatError::Header(format!("duplicate column `{}`", name)));
            }
        }

        let mut rows = Vec::new();
        for (line_no, line) in lines {
            let mut cells = split_line(line, line_no)?;
            if cells.len() > header.len() {
                return Err(FormatError::FieldCount {
                    line: line_no,
                    expected: header.len(),
                    found: cells.len(),
                });
            }
            cells.resize(header.len(), String::new());
            rows.push(cells);
        }

        Ok(Table { header, rows })
    }
}

/// Split one line on tabs. A cell whose first non-blank character is `"` is
/// quoted: it runs to the closing quote, may contain tabs, and `""` stands
/// for a literal quote.
fn split_line(line: &str, line_no: usize) -> Result<Vec<String>, FormatError> {
    let mut cells = Vec::new();
    let mut rest = line;
    loop {
        let body = rest.trim_start_matches(|c: char| c.is_whitespace() && c != '\t');
        let (cell, next) = match body.strip_prefix('"') {
            Some(quoted) => {
                read_quoted(quoted).ok_or(FormatError::UnterminatedQuote { line: line_no })?
            }
            None => match rest.find('\t') {
                Some(tab) => (rest[..tab].to_string(), Some(&rest[tab + 1..])),
                None => (rest.to_string(), None),
            },
        };
        cells.push(cell);
        match next {
            Some(tail) => rest = tail,
            None => return Ok(cells),
        }
    }
}

/// The unescaped content of a quoted cell, and the text after its tab.
fn read_quoted(body: &str) -> Option<(String, Option<&str>)> {
    let mut cell = String::new();
    let mut chars = body.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if c != '"' {
            cell.push(c);
            continue;
        }
        if let Some((_, '"')) = chars.peek() {
            chars.next();
            cell.push('"');
            continue;
        }
        let after = &body[idx + 1..];
        return Some(match after.find('\t') {
            Some(tab) => {
                cell.push_str(after[..tab].trim_end());
                (cell, Some(&after[tab + 1..]))
            }
            None => {
                cell.push_str(after.trim_end());
                (cell, None)
            }
        });
    }
    None
}

pub struct FileReader;

impl FileReader {
    pub async fn read_table(path: &Path) -> Result<Table> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match extension {
            "tsv" | "txt" => {
                let content = fs::read_to_string(path)
                    .await
                    .context(format!("Failed to read file: {:?}", path))?;
                let table = TsvReader::parse(&content)
                    .context(format!("Malformed tabular input: {:?}", path))?;
                Ok(table)
            }
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        }
    }
}
