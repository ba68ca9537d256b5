use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use rfd::{MessageButtons, MessageDialog, MessageLevel};
use tracing::{error, info};

use rosterdeck::app::App;
use rosterdeck::bootstrap::build_fill_service;
use rosterdeck::cli::Cli;
use rosterdeck::config::AppConfig;
use rosterdeck::prompt;

const EXIT_FILL_FAILED: u8 = 1;
const EXIT_STARTUP_FAILED: u8 = 2;

fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "hellhbbd", "rosterdeck")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}

fn report_startup_failure(headless: bool, message: &str) -> ExitCode {
    error!("{message}");
    if headless {
        eprintln!("{message}");
    } else {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title("rosterdeck")
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
    ExitCode::from(EXIT_STARTUP_FAILED)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let headless = cli.is_headless();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return report_startup_failure(headless, &format!("{err:#}")),
    };
    let service = match build_fill_service(&config) {
        Ok(service) => service,
        Err(err) => return report_startup_failure(headless, &format!("startup failed: {err}")),
    };

    if headless {
        let stdin = std::io::stdin();
        return match prompt::run(&service, cli.name, stdin.lock(), std::io::stdout()) {
            Ok(_) => ExitCode::SUCCESS,
            Err(_) => ExitCode::from(EXIT_FILL_FAILED),
        };
    }

    let webview_data_dir = match default_webview_data_dir() {
        Ok(dir) => dir,
        Err(err) => return report_startup_failure(headless, &format!("{err:#}")),
    };
    info!(presentation_id = %service.presentation_id(), "opening window");
    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("rosterdeck"))
                .with_data_directory(webview_data_dir),
        )
        .with_context(Arc::new(service))
        .launch(App);
    ExitCode::SUCCESS
}
