// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Background worker that releases staged uploads after their response.

use super::staging;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Sending half of the cleanup work queue.
#[derive(Debug, Clone)]
pub struct CleanupQueue {
    tx: mpsc::UnboundedSender<PathBuf>,
}

impl CleanupQueue {
    /// Spawn the cleanup worker on the current runtime.
    pub fn spawn() -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(rx));
        (Self { tx }, worker)
    }

    /// Queue release of the staging directory holding `path`.
    ///
    /// Never blocks. Falls back to an inline release if the worker is gone.
    pub fn schedule(&self, path: PathBuf) {
        if let Err(mpsc::error::SendError(path)) = self.tx.send(path) {
            tracing::warn!(path = %path.display(), "Cleanup worker stopped, releasing inline");
            staging::release_blocking(&path);
        }
    }
}

async fn run_worker(mut rx: mpsc::UnboundedReceiver<PathBuf>) {
    while let Some(path) = rx.recv().await {
        staging::release(&path).await;
    }
    tracing::debug!("Cleanup worker stopped");
}
