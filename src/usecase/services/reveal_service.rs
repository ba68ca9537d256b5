use std::sync::Arc;

use tracing::{info, warn};

use crate::usecase::ports::viewer::Viewer;

pub const DEFAULT_VIEWER_HOST: &str = "docs.google.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reveal {
    Opened(String),
    Failed { url: String, reason: String },
}

pub fn view_url(host: &str, presentation_id: &str) -> String {
    let host = host.trim_end_matches('/');
    let host = host
        .strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host);
    format!("https://{host}/presentation/d/{presentation_id}/edit")
}

pub struct PresentationViewer {
    viewer: Arc<dyn Viewer>,
    host: String,
}

impl PresentationViewer {
    pub fn new(viewer: Arc<dyn Viewer>, host: impl Into<String>) -> Self {
        Self {
            viewer,
            host: host.into(),
        }
    }

    /// Opening the viewer is best effort; the caller only reports a failure.
    pub fn reveal(&self, presentation_id: &str) -> Reveal {
        let url = view_url(&self.host, presentation_id);
        match self.viewer.open(&url) {
            Ok(()) => {
                info!(%url, "opened presentation");
                Reveal::Opened(url)
            }
            Err(err) => {
                warn!(%url, error = %err, "failed to open presentation viewer");
                Reveal::Failed {
                    url,
                    reason: err.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_url_uses_edit_path() {
        assert_eq!(
            view_url(DEFAULT_VIEWER_HOST, "abc123"),
            "https://docs.google.com/presentation/d/abc123/edit"
        );
    }

    #[test]
    fn view_url_tolerates_scheme_and_trailing_slash() {
        assert_eq!(
            view_url("https://slides.example.com/", "abc"),
            "https://slides.example.com/presentation/d/abc/edit"
        );
    }
}
