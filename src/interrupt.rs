//! Ctrl-C handling for the interactive flow.

use std::io;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::ui::{print_cancelled, restore_cursor};

/// Run `on_interrupt` the first time Ctrl-C arrives.
///
/// The OS handler is registered before this returns, so an interrupt during
/// the first prompt no longer terminates the process. Registration outlives
/// the returned task: once it is aborted, further interrupts are ignored.
#[cfg(unix)]
pub fn spawn_interrupt_handler<F>(on_interrupt: F) -> io::Result<JoinHandle<()>>
where
    F: FnOnce() + Send + 'static,
{
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupts = signal(SignalKind::interrupt())?;
    Ok(tokio::spawn(async move {
        if interrupts.recv().await.is_some() {
            debug!("Received Ctrl-C");
            on_interrupt();
        }
    }))
}

#[cfg(not(unix))]
pub fn spawn_interrupt_handler<F>(on_interrupt: F) -> io::Result<JoinHandle<()>>
where
    F: FnOnce() + Send + 'static,
{
    Ok(tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Received Ctrl-C");
            on_interrupt();
        }
    }))
}

/// Restore the cursor, print the cancellation outro and exit 0.
pub fn cancel_and_exit() -> ! {
    restore_cursor();
    print_cancelled();
    std::process::exit(0)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_sigint_runs_handler_instead_of_terminating() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let handle = spawn_interrupt_handler(move || {
            let _ = tx.send(());
        })
        .unwrap();

        let status = std::process::Command::new("kill")
            .args(["-INT", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        tokio::time::timeout(Duration::from_secs(5), rx)
            .await
            .expect("handler did not run")
            .unwrap();
        handle.await.unwrap();
    }
}
