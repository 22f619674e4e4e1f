pub mod compiler;
pub mod namespace;
pub mod places;
pub mod resolve;
pub mod serialize;
pub mod term;

pub use compiler::{Compilation, Diagnostic, DiagnosticKind, GraphCompiler, VocabularyMode};
pub use places::PlaceMapping;
pub use resolve::ResolvedPersons;
pub use serialize::{RdfFormat, SerializeError, UnknownFormat, serialize};
pub use term::{Graph, GraphStats, Object, Statement};

use anyhow::{Context, Result};
use extract::ExtractionResult;
use std::path::{Path, PathBuf};
use tokio::fs;

/// `career_graphs/<model>/<place>/x_career.json` -> `rdf_graphs/<model>/<place>/x.<ext>`
pub fn default_output_path(input: &Path, format: RdfFormat) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name
        .strip_suffix("_career.json")
        .or_else(|| file_name.strip_suffix(".json"))
        .unwrap_or(&file_name);

    let mut out = PathBuf::from("rdf_graphs");
    if let Some(parent) = input.parent() {
        let mut components = parent.components().map(|c| c.as_os_str());
        if components.any(|c| c == "career_graphs") {
            out.extend(components);
        }
    }
    out.push(format!("{}.{}", stem, format.extension()));
    out
}

pub async fn load_results(path: &Path) -> Result<Vec<ExtractionResult>> {
    let content = fs::read_to_string(path)
        .await
        .context(format!("Failed to read extraction results: {:?}", path))?;
    let results = serde_json::from_str(&content)
        .context(format!("Failed to parse extraction results: {:?}", path))?;
    Ok(results)
}

/// Compile an extraction-results file and write the serialized graph.
pub async fn compile_file(
    input: &Path,
    output: &Path,
    format: RdfFormat,
    compiler: &GraphCompiler,
) -> Result<(GraphStats, Vec<Diagnostic>)> {
    tracing::info!(path = %input.display(), "Loading extraction results");
    let results = load_results(input).await?;

    let Compilation { graph, diagnostics } = compiler.compile(&results);
    let text = serialize(&graph, format)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .context(format!("Failed to create directory: {:?}", parent))?;
    }
    fs::write(output, text)
        .await
        .context(format!("Failed to write graph: {:?}", output))?;

    let stats = graph.stats();
    tracing::info!(
        triples = stats.triples,
        persons = stats.persons,
        communities = stats.communities,
        inscriptions = stats.inscriptions,
        career_positions = stats.career_positions,
        benefactions = stats.benefactions,
        relationships = stats.relationships,
        format = ?format,
        path = %output.display(),
        "Graph written"
    );
    Ok((stats, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract::EmperorTable;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn output_path_mirrors_career_graph_layout() {
        assert_eq!(
            default_output_path(
                Path::new("career_graphs/llama3/Carthago/x_career.json"),
                RdfFormat::Turtle
            ),
            PathBuf::from("rdf_graphs/llama3/Carthago/x.ttl")
        );
        assert_eq!(
            default_output_path(Path::new("out/x.json"), RdfFormat::JsonLd),
            PathBuf::from("rdf_graphs/x.jsonld")
        );
        assert_eq!(
            default_output_path(Path::new("x_career.json"), RdfFormat::RdfXml),
            PathBuf::from("rdf_graphs/x.rdf")
        );
        assert_eq!(
            default_output_path(Path::new("x_career.json"), RdfFormat::N3),
            PathBuf::from("rdf_graphs/x.n3")
        );
    }

    #[tokio::test]
    async fn compiles_a_results_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("x_career.json");
        std::fs::write(
            &input,
            r#"[{"edcs_id": "EDCS-5", "persons": [{"person_id": 0, "person_name": "Felix"}]},
                {"edcs_id": "EDCS-6", "person_name": "Parse Error"}]"#,
        )
        .unwrap();
        let output = dir.path().join("rdf").join("x.nt");

        let compiler = GraphCompiler::new(Arc::new(EmperorTable::builtin()));
        let (stats, diagnostics) = compile_file(&input, &output, RdfFormat::NTriples, &compiler)
            .await
            .unwrap();

        assert_eq!(stats.inscriptions, 2);
        assert_eq!(stats.persons, 1);
        assert!(diagnostics.is_empty());
        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), stats.triples);
    }
}
