//! Async verse stream backed by a blocking scan task.

use std::path::PathBuf;

use futures::stream::{self, Stream};
use tokio::sync::mpsc;
use tracing::debug;

use super::cancel::CancelToken;
use super::extract::extract_verses;
use super::range::VerseRange;
use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use crate::types::Verse;

/// Stream the verses [`extract_verses`] would yield.
///
/// The scan runs on a tokio blocking task and hands verses over a bounded
/// channel, so it only runs ahead of the consumer by a few verses. It stops
/// when the stream is dropped or `cancel` fires; verses still buffered
/// after cancellation are not yielded.
///
/// Must be called from within a tokio runtime.
pub fn verse_stream(
    path: impl Into<PathBuf>,
    target: impl Into<String>,
    range: VerseRange,
    cancel: CancelToken,
) -> impl Stream<Item = Verse> {
    let path = path.into();
    let target = target.into();
    let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
    let worker_cancel = cancel.clone();

    tokio::task::spawn_blocking(move || {
        for verse in extract_verses(&path, &target, range, worker_cancel) {
            if tx.blocking_send(verse).is_err() {
                debug!(path = %path.display(), "Verse stream dropped, stopping scan");
                break;
            }
        }
    });

    stream::unfold((rx, cancel), |(mut rx, cancel)| async move {
        if cancel.is_cancelled() {
            return None;
        }
        let verse = rx.recv().await?;
        if cancel.is_cancelled() {
            return None;
        }
        Some((verse, (rx, cancel)))
    })
}
