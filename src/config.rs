use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::entities::record::ColumnMap;
use crate::usecase::services::reveal_service::DEFAULT_VIEWER_HOST;

pub const CONFIG_FILE_NAME: &str = "rosterdeck.toml";
pub const CREDENTIALS_ENV: &str = "ROSTERDECK_CREDENTIALS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SourceConfig {
    GoogleSheets {
        spreadsheet_id: String,
        #[serde(default = "default_worksheet")]
        worksheet: String,
    },
    Csv {
        path: PathBuf,
    },
    Xlsx {
        path: PathBuf,
        #[serde(default = "default_worksheet")]
        worksheet: String,
    },
}

fn default_worksheet() -> String {
    "Sheet1".to_string()
}

fn default_credentials() -> PathBuf {
    PathBuf::from("credentials.json")
}

fn default_viewer_host() -> String {
    DEFAULT_VIEWER_HOST.to_string()
}

fn default_header_rows() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_credentials")]
    pub credentials: PathBuf,
    pub presentation_id: String,
    #[serde(default = "default_viewer_host")]
    pub viewer_host: String,
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
    pub source: SourceConfig,
    #[serde(default)]
    pub columns: ColumnMap,
}

impl AppConfig {
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).context("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.presentation_id.trim().is_empty() {
            bail!("presentation_id must not be empty");
        }
        match &self.source {
            SourceConfig::GoogleSheets {
                spreadsheet_id,
                worksheet,
            } => {
                if spreadsheet_id.trim().is_empty() {
                    bail!("source.spreadsheet_id must not be empty");
                }
                if worksheet.trim().is_empty() {
                    bail!("source.worksheet must not be empty");
                }
            }
            SourceConfig::Xlsx { worksheet, .. } if worksheet.trim().is_empty() => {
                bail!("source.worksheet must not be empty");
            }
            SourceConfig::Csv { .. } | SourceConfig::Xlsx { .. } => {}
        }
        if self.columns.has_duplicates() {
            bail!("columns must map each field to a different index");
        }
        Ok(())
    }

    /// Explicit path, then `./rosterdeck.toml`, then the user config dir.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()));
        }

        let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dirs) = ProjectDirs::from("com", "hellhbbd", "rosterdeck") {
            candidates.push(dirs.config_dir().join(CONFIG_FILE_NAME));
        }
        for candidate in &candidates {
            if !candidate.exists() {
                continue;
            }
            match Self::load_from_file(candidate) {
                Ok(config) => return Ok(config),
                Err(err) => warn!("failed to load config from {}: {err:#}", candidate.display()),
            }
        }

        Err(anyhow!(
            "no usable config found (looked in {})",
            candidates
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let mut config = Self::from_toml(&raw)?;
        if let Some(base) = path.parent() {
            config.resolve_relative_paths(base);
        }
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    fn resolve_relative_paths(&mut self, base: &Path) {
        if self.credentials.is_relative() {
            self.credentials = base.join(&self.credentials);
        }
        match &mut self.source {
            SourceConfig::Csv { path } | SourceConfig::Xlsx { path, .. } if path.is_relative() => {
                *path = base.join(&*path);
            }
            _ => {}
        }
    }

    /// `ROSTERDECK_CREDENTIALS` wins over the config file.
    pub fn credentials_path(&self) -> PathBuf {
        std::env::var_os(CREDENTIALS_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.credentials.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOGLE: &str = r#"
        presentation_id = "deck-1"

        [source]
        kind = "google-sheets"
        spreadsheet_id = "sheet-1"
    "#;

    #[test]
    fn google_source_uses_defaults() {
        let config = AppConfig::from_toml(GOOGLE).expect("config should parse");

        assert_eq!(config.credentials, PathBuf::from("credentials.json"));
        assert_eq!(config.viewer_host, DEFAULT_VIEWER_HOST);
        assert_eq!(config.header_rows, 1);
        assert_eq!(config.columns, ColumnMap::default());
        assert_eq!(
            config.source,
            SourceConfig::GoogleSheets {
                spreadsheet_id: "sheet-1".to_string(),
                worksheet: "Sheet1".to_string(),
            }
        );
    }

    #[test]
    fn csv_source_with_custom_columns() {
        let config = AppConfig::from_toml(
            r#"
            presentation_id = "deck-1"
            header_rows = 0

            [source]
            kind = "csv"
            path = "employees.csv"

            [columns]
            id = 4
            name = 0
            occupation = 1
            country = 2
            age = 3
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.header_rows, 0);
        assert_eq!(config.columns.id, 4);
        assert_eq!(config.columns.name, 0);
    }

    #[test]
    fn example_config_is_valid() {
        let config = AppConfig::from_toml(include_str!("../rosterdeck.example.toml"))
            .expect("example config should parse");

        assert_eq!(config.columns, ColumnMap::default());
    }

    #[test]
    fn empty_presentation_id_is_rejected() {
        let result = AppConfig::from_toml(&GOOGLE.replace("deck-1", " "));

        assert!(result.is_err());
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let raw = format!("{GOOGLE}\n[columns]\nid = 1\n");

        assert!(AppConfig::from_toml(&raw).is_err());
    }

    #[test]
    fn unknown_source_kind_is_rejected() {
        let result = AppConfig::from_toml(&GOOGLE.replace("google-sheets", "postgres"));

        assert!(result.is_err());
    }

    #[test]
    fn relative_paths_follow_config_location() {
        let mut config = AppConfig::from_toml(
            r#"
            presentation_id = "deck-1"
            [source]
            kind = "xlsx"
            path = "data/employees.xlsx"
            "#,
        )
        .expect("config should parse");

        config.resolve_relative_paths(Path::new("/etc/rosterdeck"));

        assert_eq!(
            config.credentials,
            PathBuf::from("/etc/rosterdeck/credentials.json")
        );
        assert_eq!(
            config.source,
            SourceConfig::Xlsx {
                path: PathBuf::from("/etc/rosterdeck/data/employees.xlsx"),
                worksheet: "Sheet1".to_string(),
            }
        );
    }
}
