use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::placeholder::{PlaceholderToken, SubstitutionMap};
use crate::domain::entities::record::EmployeeRecord;
use crate::usecase::error::FillError;
use crate::usecase::ports::presentation_store::{PresentationStore, ReplaceAllText};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulateReport {
    /// Occurrences seen in the document before the update.
    pub found: BTreeMap<PlaceholderToken, usize>,
    /// Occurrences the store reports as replaced.
    pub changed: BTreeMap<PlaceholderToken, u32>,
}

impl PopulateReport {
    pub fn total_changed(&self) -> u64 {
        self.changed.values().map(|count| u64::from(*count)).sum()
    }

    pub fn missing(&self) -> Vec<PlaceholderToken> {
        PlaceholderToken::ALL
            .iter()
            .copied()
            .filter(|token| self.found.get(token).copied().unwrap_or(0) == 0)
            .collect()
    }
}

pub fn replace_requests(map: &SubstitutionMap) -> Vec<ReplaceAllText> {
    map.iter()
        .map(|(token, value)| ReplaceAllText {
            find: token.as_str().to_string(),
            replace: value.to_string(),
            match_case: true,
        })
        .collect()
}

pub struct TemplatePopulator {
    store: Arc<dyn PresentationStore>,
}

impl TemplatePopulator {
    pub fn new(store: Arc<dyn PresentationStore>) -> Self {
        Self { store }
    }

    pub fn populate(
        &self,
        presentation_id: &str,
        record: &EmployeeRecord,
    ) -> Result<PopulateReport, FillError> {
        let presentation = self.store.get(presentation_id)?;
        let found: BTreeMap<PlaceholderToken, usize> = PlaceholderToken::ALL
            .iter()
            .map(|token| (*token, presentation.count_occurrences(token.as_str())))
            .collect();
        for (token, count) in &found {
            if *count == 0 {
                warn!(%token, presentation_id, "placeholder not present in presentation");
            }
        }

        let map = SubstitutionMap::from_record(record);
        let requests = replace_requests(&map);
        let tokens: Vec<PlaceholderToken> = map.iter().map(|(token, _)| token).collect();
        debug!(presentation_id, requests = requests.len(), "sending batch update");

        let reply = self.store.batch_replace(presentation_id, &requests)?;
        if reply.occurrences_changed.len() != requests.len() {
            return Err(FillError::PartialUpdate {
                applied: reply.occurrences_changed.len(),
                requested: requests.len(),
            });
        }

        let changed: BTreeMap<PlaceholderToken, u32> = tokens
            .into_iter()
            .zip(reply.occurrences_changed)
            .collect();
        for token in PlaceholderToken::ALL {
            let expected = found.get(&token).copied().unwrap_or(0);
            let actual = changed.get(&token).copied().unwrap_or(0) as usize;
            if expected != actual {
                warn!(%token, expected, actual, "replacement count differs from scan");
            }
        }

        let report = PopulateReport { found, changed };
        info!(
            presentation_id,
            changed = report.total_changed(),
            "presentation updated"
        );
        Ok(report)
    }
}
