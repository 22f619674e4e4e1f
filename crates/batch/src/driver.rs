use anyhow::Result;
use extract::{ExtractionRequest, ExtractionResult, Extractor, LlmProvider};
use futures::FutureExt;
use ingest::InscriptionRecord;
use std::any::Any;
use std::collections::{BTreeSet, HashSet};
use std::panic::AssertUnwindSafe;

use crate::checkpoint::CheckpointStore;
use crate::config::BatchConfig;
use crate::error_log::{ErrorEntry, ErrorKind, ErrorLog};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub total_accepted: usize,
    pub newly_accepted: usize,
    pub with_career: usize,
    pub errors: usize,
    pub historical_error_ids: BTreeSet<String>,
    /// Size of the accepted set at every checkpoint written, in order.
    pub checkpoints: Vec<usize>,
}

pub struct BatchDriver<P> {
    extractor: Extractor<P>,
    config: BatchConfig,
}

impl<P: LlmProvider> BatchDriver<P> {
    pub fn new(extractor: Extractor<P>, config: BatchConfig) -> Self {
        Self { extractor, config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Extract every record not yet in the output file, one at a time.
    pub async fn run(&self, records: &[InscriptionRecord]) -> Result<RunSummary> {
        let store = CheckpointStore::new(&self.config.output_path);
        let mut error_log = ErrorLog::new(
            &self.config.error_log_path,
            &self.config.model_label,
            &self.config.input_label,
        );

        let mut accepted = store.load().await?;
        let mut seen: HashSet<String> = accepted.iter().map(|r| r.edcs_id.clone()).collect();
        let already_done = seen.len();

        let historical_error_ids = match error_log.historical_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(error = %e, "Could not scan previous error log");
                BTreeSet::new()
            }
        };
        if !historical_error_ids.is_empty() {
            tracing::info!(
                count = historical_error_ids.len(),
                "Previous runs logged errors; those inscriptions will be retried"
            );
        }

        let selected = match self.config.limit {
            Some(limit) => &records[..limit.min(records.len())],
            None => records,
        };
        let pending: Vec<&InscriptionRecord> = selected
            .iter()
            .filter(|r| seen.insert(r.id.clone()))
            .collect();

        tracing::info!(
            input = selected.len(),
            already_done,
            pending = pending.len(),
            "Work selected"
        );

        let mut summary = RunSummary {
            historical_error_ids,
            ..Default::default()
        };

        if pending.is_empty() {
            tracing::info!("All inscriptions already processed");
            summary.total_accepted = accepted.len();
            summary.with_career = count_with_career(&accepted);
            return Ok(summary);
        }

        let interval = self.config.checkpoint_interval.max(1);
        let mut dirty = false;
        let mut buffered: Vec<ErrorEntry> = Vec::new();

        for (i, record) in pending.iter().enumerate() {
            let is_last = i + 1 == pending.len();
            tracing::info!(
                edcs_id = %record.id,
                position = already_done + i + 1,
                total = already_done + pending.len(),
                "Processing inscription"
            );

            match self.process(record).await {
                Ok(result) => {
                    tracing::debug!(
                        edcs_id = %record.id,
                        persons = result.persons.len(),
                        has_career = result.has_any_career(),
                        "Accepted"
                    );
                    accepted.push(result);
                    summary.newly_accepted += 1;
                    dirty = true;
                }
                Err(entry) => {
                    tracing::warn!(
                        edcs_id = %entry.edcs_id,
                        kind = %entry.kind,
                        error = %entry.message,
                        "Extraction failed, excluded from output"
                    );
                    buffered.push(entry);
                    summary.errors += 1;
                }
            }

            if dirty && (accepted.len() % interval == 0 || is_last) {
                store.save(&accepted).await?;
                summary.checkpoints.push(accepted.len());
                dirty = false;
            }

            if buffered.len() >= interval || (is_last && !buffered.is_empty()) {
                error_log.append(&buffered).await?;
                buffered.clear();
            }
        }

        if dirty {
            store.save(&accepted).await?;
            summary.checkpoints.push(accepted.len());
        }
        error_log.append(&buffered).await?;

        summary.total_accepted = accepted.len();
        summary.with_career = count_with_career(&accepted);

        tracing::info!(
            total = summary.total_accepted,
            new = summary.newly_accepted,
            with_career = summary.with_career,
            without_career = summary.total_accepted - summary.with_career,
            errors = summary.errors,
            output = %self.config.output_path.display(),
            "Batch complete"
        );
        if summary.errors > 0 {
            tracing::info!(path = %error_log.path().display(), "Errors written to log");
        }

        Ok(summary)
    }

    /// One item. Failures and panics come back as error-log entries.
    async fn process(&self, record: &InscriptionRecord) -> Result<ExtractionResult, ErrorEntry> {
        if record.has_no_text() {
            tracing::warn!(edcs_id = %record.id, "Inscription text is empty or unknown");
            return Ok(ExtractionResult::no_text(record));
        }

        let request = ExtractionRequest::from_record(record);
        let outcome = AssertUnwindSafe(self.extractor.extract(&request))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(mut result)) => {
                result.original_data = Some(record.clone());
                Ok(result)
            }
            Ok(Err(e)) => Err(ErrorEntry::new(
                &record.id,
                ErrorKind::from(&e),
                e.to_string(),
                &record.inscription,
            )),
            Err(payload) => Err(ErrorEntry::new(
                &record.id,
                ErrorKind::Exception,
                panic_message(payload.as_ref()),
                &record.inscription,
            )),
        }
    }
}

fn count_with_career(results: &[ExtractionResult]) -> usize {
    results.iter().filter(|r| r.has_any_career()).count()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "extraction panicked".to_string()
    }
}
