//! The periodic progress sampler.
//!
//! A `ProgressTimer` owns one worker thread that samples a session's position
//! and posts the elapsed ratio to the UI thread over a channel. It never
//! touches UI state itself.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::trace;

use super::types::{PlaybackSession, ProgressEvent};

/// Elapsed fraction of a track, clamped to `0.0..=1.0`.
///
/// Returns `None` while the length is unknown or zero.
pub fn progress_ratio(position: Duration, duration: Option<Duration>) -> Option<f64> {
    let total = duration?.as_secs_f64();
    if total <= 0.0 {
        return None;
    }
    Some((position.as_secs_f64() / total).clamp(0.0, 1.0))
}

fn sample<S: PlaybackSession + ?Sized>(session: &S) -> Option<f64> {
    if session.finished() {
        return Some(1.0);
    }
    progress_ratio(session.position(), session.duration())
}

pub struct ProgressTimer {
    running: Arc<AtomicBool>,
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressTimer {
    /// Start sampling `session` every `period`, the first sample right away.
    ///
    /// The thread stops itself after posting a sample with ratio 1.0.
    pub fn start<S>(
        session: Arc<S>,
        period: Duration,
        generation: u64,
        events: Sender<ProgressEvent>,
    ) -> Self
    where
        S: PlaybackSession + ?Sized + 'static,
    {
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let running = Arc::new(AtomicBool::new(true));
        let running_for_thread = running.clone();

        let handle = thread::spawn(move || {
            loop {
                if let Some(ratio) = sample(session.as_ref()) {
                    let finished = ratio >= 1.0;
                    if finished {
                        running_for_thread.store(false, Ordering::SeqCst);
                    }
                    let event = ProgressEvent {
                        generation,
                        ratio,
                        finished,
                    };
                    if events.send(event).is_err() || finished {
                        break;
                    }
                } else {
                    trace!(generation, "track length unknown, skipping progress tick");
                }

                match cancel_rx.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            running_for_thread.store(false, Ordering::SeqCst);
        });

        Self {
            running,
            cancel: Some(cancel_tx),
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the worker and wait for it to exit. No sample is posted after
    /// this returns. Calling it on a timer that already stopped is fine.
    pub fn cancel(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

impl Drop for ProgressTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
