pub mod emperors;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod response;
pub mod schema;
pub mod vocab;

pub use emperors::EmperorTable;
pub use error::{ExtractError, ProviderError};
pub use llm::{LlmProvider, OllamaClient};
pub use schema::{
    AgeAtDeath, Benefaction, CareerStep, Community, ExtractionResult, LegacyPerson, Person,
    Relationship, RelationshipTarget,
};

use std::sync::Arc;

/// What the extractor needs to know about one inscription.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRequest<'a> {
    pub edcs_id: &'a str,
    pub text: &'a str,
    pub dating: Option<(i64, i64)>,
}

impl<'a> ExtractionRequest<'a> {
    pub fn from_record(record: &'a ingest::InscriptionRecord) -> Self {
        Self {
            edcs_id: &record.id,
            text: &record.inscription,
            dating: record.dating(),
        }
    }
}

pub struct Extractor<P> {
    provider: P,
    emperors: Arc<EmperorTable>,
}

impl<P: LlmProvider> Extractor<P> {
    pub fn new(provider: P, emperors: Arc<EmperorTable>) -> Self {
        Self { provider, emperors }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Extract persons, communities and relationships from one inscription.
    pub async fn extract(
        &self,
        request: &ExtractionRequest<'_>,
    ) -> Result<ExtractionResult, ExtractError> {
        let prompt = prompt::build_extraction_prompt(request.text, request.dating, &self.emperors);

        let raw = self.provider.generate(&prompt).await?;

        let mut result = response::parse_response(&raw).inspect_err(|e| {
            tracing::debug!(
                edcs_id = request.edcs_id,
                error = %e,
                response = %truncate(&raw, 500),
                "Unparseable extraction response"
            );
        })?;

        result.edcs_id = request.edcs_id.to_string();
        result.mirror_first_person();

        tracing::debug!(
            edcs_id = request.edcs_id,
            persons = result.persons.len(),
            communities = result.communities.len(),
            relationships = result.relationship_list().len(),
            "Extraction parsed"
        );

        Ok(result)
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Canned(&'static str);

    #[async_trait]
    impl LlmProvider for Canned {
        async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    struct Down;

    #[async_trait]
    impl LlmProvider for Down {
        async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
            Err(ProviderError::Other("connection refused".to_string()))
        }

        fn name(&self) -> &str {
            "down"
        }
    }

    fn request() -> ExtractionRequest<'static> {
        ExtractionRequest {
            edcs_id: "EDCS-1",
            text: "Imp(eratori) Caes(ari) Tito",
            dating: Some((79, 81)),
        }
    }

    #[tokio::test]
    async fn stamps_id_and_mirrors_first_person() {
        let extractor = Extractor::new(
            Canned(
                r#"Sure! {"persons": [{"person_id": 0, "person_name": "Titus",
                   "person_name_normalized": "Titus", "person_name_link": "Q1421",
                   "social_status": "emperor"}], "communities": [], "person_relationships": []}"#,
            ),
            Arc::new(EmperorTable::builtin()),
        );

        let result = extractor.extract(&request()).await.unwrap();
        assert_eq!(result.edcs_id, "EDCS-1");
        assert_eq!(result.person_name.as_deref(), Some("Titus"));
        assert_eq!(result.person_name_link.as_deref(), Some("Q1421"));
        assert_eq!(result.social_status.as_deref(), Some("emperor"));
    }

    #[tokio::test]
    async fn provider_failure_is_reported() {
        let extractor = Extractor::new(Down, Arc::new(EmperorTable::builtin()));
        let err = extractor.extract(&request()).await.unwrap_err();
        assert!(matches!(err, ExtractError::Provider(_)));
    }

    #[tokio::test]
    async fn prose_only_is_a_parse_error() {
        let extractor = Extractor::new(Canned("no idea"), Arc::new(EmperorTable::builtin()));
        let err = extractor.extract(&request()).await.unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("αβγδ", 2), "αβ");
        assert_eq!(truncate("ab", 5), "ab");
    }
}
