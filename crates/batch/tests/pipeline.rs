use async_trait::async_trait;
use batch::{BatchConfig, BatchDriver};
use extract::{EmperorTable, ExtractionResult, Extractor, LlmProvider, ProviderError};
use std::sync::Arc;
use tempfile::tempdir;

struct Echo;

#[async_trait]
impl LlmProvider for Echo {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        Ok(r#"```json
{"persons": [{"person_id": 0, "person_name": "C(aius) Iulius Felix"}],
 "communities": [{"community_id": 0, "community_name": "decuriones"}],
 "person_relationships": [{"source_person_id": 0, "target_community_id": 0,
                           "type": "affiliation", "property": "member"}]}
```"#
            .to_string())
    }

    fn name(&self) -> &str {
        "echo"
    }
}

#[tokio::test]
async fn tsv_to_checkpoint() {
    let dir = tempdir().unwrap();
    let tsv = dir.path().join("carthago.tsv");
    std::fs::write(
        &tsv,
        "EDCS-ID\tprovince\tplace\tdating_from\tdating_to\tstatus\tinscription\n\
         EDCS-1\tAfrica proconsularis\tCarthago\t101\t200\tinscriptiones sacrae; tituli operum\tC(aius) Iulius Felix\n\
         EDCS-2\tAfrica proconsularis\tCarthago\t\t\t\t?\n",
    )
    .unwrap();

    let json = dir.path().join("carthago.json");
    ingest::normalize_file(&tsv, Some(&json)).await.unwrap();
    let records = ingest::load_records(&json).await.unwrap();
    assert_eq!(records[0].status.len(), 2);

    let output = dir.path().join("carthago_career.json");
    let driver = BatchDriver::new(
        Extractor::new(Echo, Arc::new(EmperorTable::builtin())),
        BatchConfig::new(&json, output.clone(), "echo"),
    );
    let summary = driver.run(&records).await.unwrap();
    assert_eq!(summary.total_accepted, 2);
    assert_eq!(summary.errors, 0);

    let saved: Vec<ExtractionResult> =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(saved[0].edcs_id, "EDCS-1");
    assert_eq!(saved[0].person_name.as_deref(), Some("C(aius) Iulius Felix"));
    assert_eq!(saved[0].original_data.as_ref().unwrap().place, "Carthago");
    assert_eq!(saved[1].person_name.as_deref(), Some("No Text"));
}
