use anyhow::{anyhow, Context, Result};
use futures::channel::oneshot;

/// Runs `f` on its own OS thread and awaits the result, keeping blocking
/// network calls off the UI executor.
pub async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    std::thread::Builder::new()
        .name("rosterdeck-worker".to_string())
        .spawn(move || {
            let _ = tx.send(f());
        })
        .context("failed to spawn worker thread")?;
    rx.await
        .map_err(|_| anyhow!("worker thread stopped before returning a result"))
}
