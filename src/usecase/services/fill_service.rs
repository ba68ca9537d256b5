use tracing::info;

use crate::domain::entities::record::EmployeeRecord;
use crate::usecase::error::FillError;
use crate::usecase::services::locate_service::RecordLocator;
use crate::usecase::services::populate_service::{PopulateReport, TemplatePopulator};
use crate::usecase::services::reveal_service::{PresentationViewer, Reveal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillOutcome {
    pub record: EmployeeRecord,
    pub report: PopulateReport,
    pub reveal: Reveal,
}

impl FillOutcome {
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Filled presentation for {} ({}): {} replacement(s)",
            self.record.name,
            self.record.id,
            self.report.total_changed()
        );
        let missing = self.report.missing();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|token| token.as_str()).collect();
            text.push_str(&format!("; not in template: {}", names.join(", ")));
        }
        match &self.reveal {
            Reveal::Opened(url) => text.push_str(&format!("; opened {url}")),
            Reveal::Failed { url, reason } => {
                text.push_str(&format!("; could not open viewer ({reason}), visit {url}"))
            }
        }
        text
    }
}

/// Locate, populate and reveal as one cycle. Both front-ends go through here.
pub struct FillService {
    locator: RecordLocator,
    populator: TemplatePopulator,
    viewer: PresentationViewer,
    presentation_id: String,
}

impl FillService {
    pub fn new(
        locator: RecordLocator,
        populator: TemplatePopulator,
        viewer: PresentationViewer,
        presentation_id: impl Into<String>,
    ) -> Self {
        Self {
            locator,
            populator,
            viewer,
            presentation_id: presentation_id.into(),
        }
    }

    pub fn presentation_id(&self) -> &str {
        &self.presentation_id
    }

    pub fn header_rows(&self) -> usize {
        self.locator.header_rows()
    }

    pub fn table(&self) -> Result<Vec<Vec<String>>, FillError> {
        self.locator.table()
    }

    pub fn fill(&self, name: &str) -> Result<FillOutcome, FillError> {
        let record = self.locator.locate(name)?;
        let report = self.populator.populate(&self.presentation_id, &record)?;
        let reveal = self.viewer.reveal(&self.presentation_id);
        info!(name = %record.name, "fill cycle finished");
        Ok(FillOutcome {
            record,
            report,
            reveal,
        })
    }
}
