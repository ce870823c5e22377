//! Async runtime helpers for blocking callers.
//!
//! Invocations are synchronous from the caller's point of view while the HTTP
//! client is async. This module bridges the two, reusing the current Tokio
//! runtime when one is available.

use std::future::Future;
use std::io;
use std::thread;

use tokio::runtime::{Builder, Handle, RuntimeFlavor};
use tokio::task;

/// Execute an async future from synchronous code.
///
/// # Arguments
/// - `future`: The future to run to completion.
///
/// # Returns
/// Returns the future's output or an error if a Tokio runtime cannot be created.
///
/// # Notes
/// - Reuses the current runtime when it is the multi-thread flavor.
/// - Inside a current-thread runtime, where `block_in_place` is unavailable,
///   the future runs on a fresh runtime in a dedicated thread.
/// - Falls back to a single-threaded runtime for call sites outside Tokio.
pub fn block_on_future<F>(future: F) -> io::Result<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            Ok(task::block_in_place(|| handle.block_on(future)))
        }
        Ok(_) => thread::spawn(move || run_on_fresh_runtime(future))
            .join()
            .map_err(|_| io::Error::other("async bridge thread panicked"))?,
        Err(_) => run_on_fresh_runtime(future),
    }
}

fn run_on_fresh_runtime<F: Future>(future: F) -> io::Result<F::Output> {
    let runtime = Builder::new_current_thread().enable_all().build()?;
    Ok(runtime.block_on(future))
}
