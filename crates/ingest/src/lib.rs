pub mod lenient;
pub mod normalize;
pub mod reader;
pub mod record;

pub use normalize::{normalize, split_status};
pub use reader::{FileReader, FormatError, Table, TsvReader};
pub use record::InscriptionRecord;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// `data/foo.tsv` -> `filtered_data/foo.json`
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in input.components() {
        if component.as_os_str() == "data" {
            out.push("filtered_data");
        } else {
            out.push(component);
        }
    }
    out.set_extension("json");
    out
}

/// Main normalization pipeline: TSV file in, JSON array of records out.
pub async fn normalize_file(
    input: &Path,
    output: Option<&Path>,
) -> Result<(Vec<InscriptionRecord>, PathBuf)> {
    tracing::info!(path = %input.display(), "Reading tabular input");
    let table = FileReader::read_table(input).await?;
    tracing::info!(rows = table.rows.len(), "Read complete");

    let records = normalize(&table);

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));
    write_records(&output, &records).await?;

    tracing::info!(
        records = records.len(),
        path = %output.display(),
        "Normalized inscriptions written"
    );
    Ok((records, output))
}

pub async fn write_records(path: &Path, records: &[InscriptionRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .context(format!("Failed to create directory: {:?}", parent))?;
    }
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)
        .await
        .context(format!("Failed to write records: {:?}", path))?;
    Ok(())
}

/// Load a normalized JSON array back into records.
pub async fn load_records(path: &Path) -> Result<Vec<InscriptionRecord>> {
    let content = fs::read_to_string(path)
        .await
        .context(format!("Failed to read records: {:?}", path))?;
    let records = serde_json::from_str(&content)
        .context(format!("Failed to parse records: {:?}", path))?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_moves_into_filtered_data() {
        assert_eq!(
            default_output_path(Path::new("data/leptis.tsv")),
            PathBuf::from("filtered_data/leptis.json")
        );
        assert_eq!(
            default_output_path(Path::new("leptis.tsv")),
            PathBuf::from("leptis.json")
        );
    }

    #[tokio::test]
    async fn normalize_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.tsv");
        std::fs::write(
            &input,
            "EDCS-ID\tplace\tstatus\tinscription\nEDCS-1\tLepcis Magna\tepitaphs; tituli sepulcrales\tD M\n",
        )
        .unwrap();
        let output = dir.path().join("out/records.json");

        let (records, written) = normalize_file(&input, Some(&output)).await.unwrap();
        assert_eq!(written, output);
        assert_eq!(records[0].status, vec!["epitaphs", "tituli sepulcrales"]);

        let loaded = load_records(&output).await.unwrap();
        assert_eq!(loaded, records);
    }
}
