use std::sync::Arc;

use tracing::info;

use crate::config::{AppConfig, SourceConfig};
use crate::infra::browser::SystemBrowser;
use crate::infra::file::csv::CsvSource;
use crate::infra::file::xlsx::XlsxSource;
use crate::infra::google::auth::ServiceAccountAuth;
use crate::infra::google::sheets::GoogleSheetsSource;
use crate::infra::google::slides::GoogleSlidesStore;
use crate::usecase::error::FillError;
use crate::usecase::ports::credentials::TokenProvider;
use crate::usecase::ports::source::TabularSource;
use crate::usecase::services::fill_service::FillService;
use crate::usecase::services::locate_service::RecordLocator;
use crate::usecase::services::populate_service::TemplatePopulator;
use crate::usecase::services::reveal_service::PresentationViewer;

/// Loads the service account and proves it can mint a token before anything
/// else is built, so a bad key fails at startup.
pub fn authorize(config: &AppConfig) -> Result<Arc<ServiceAccountAuth>, FillError> {
    let auth = ServiceAccountAuth::from_file(&config.credentials_path())?;
    auth.access_token()?;
    info!(account = %auth.account(), "service account authorized");
    Ok(Arc::new(auth))
}

pub fn build_source(
    config: &AppConfig,
    auth: Arc<dyn TokenProvider>,
) -> Result<Arc<dyn TabularSource>, FillError> {
    let source: Arc<dyn TabularSource> = match &config.source {
        SourceConfig::GoogleSheets {
            spreadsheet_id,
            worksheet,
        } => Arc::new(GoogleSheetsSource::new(
            auth,
            spreadsheet_id.clone(),
            worksheet.clone(),
        )?),
        SourceConfig::Csv { path } => Arc::new(CsvSource::new(path.clone())),
        SourceConfig::Xlsx { path, worksheet } => {
            Arc::new(XlsxSource::new(path.clone(), worksheet.clone()))
        }
    };
    info!(source = %source.describe(), "data source ready");
    Ok(source)
}

pub fn build_fill_service(config: &AppConfig) -> Result<FillService, FillError> {
    let auth: Arc<dyn TokenProvider> = authorize(config)?;
    let source = build_source(config, auth.clone())?;
    let store = GoogleSlidesStore::new(auth)?;

    Ok(FillService::new(
        RecordLocator::new(source, config.columns, config.header_rows),
        TemplatePopulator::new(Arc::new(store)),
        PresentationViewer::new(Arc::new(SystemBrowser), config.viewer_host.clone()),
        config.presentation_id.clone(),
    ))
}
