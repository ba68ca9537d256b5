use crate::usecase::ports::viewer::Viewer;

/// The desktop's default web browser.
pub struct SystemBrowser;

impl Viewer for SystemBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        webbrowser::open(url)
    }
}
