//! Polling driver for chat sessions.
//!
//! Owns the per-session cadence: one interval timer per mounted session,
//! cancelled through a watch channel. Poll failures are logged and the
//! loop keeps going; teardown always clears the session's typing state.

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::interval;
use tracing::{error, warn};

use super::session::ChatSession;

/// Drive a session's polling until the shutdown channel fires.
///
/// The first tick completes immediately, so the session refreshes as soon
/// as the loop starts. The loop also stops if the shutdown sender is
/// dropped.
pub async fn run(session: &mut ChatSession, mut shutdown: watch::Receiver<bool>) {
    let mut timer = interval(session.settings().poll_interval);

    loop {
        tokio::select! {
            _ = timer.tick() => {
                if let Err(e) = session.poll(Utc::now()) {
                    error!("chat poll failed for room {}: {e}", session.room_id());
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    if let Err(e) = session.shutdown() {
        warn!("failed to clear typing state on teardown: {e}");
    }
}
