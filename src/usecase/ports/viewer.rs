pub trait Viewer: Send + Sync {
    fn open(&self, url: &str) -> std::io::Result<()>;
}
