//! Test fixtures and common test helpers.
//!
//! - `ScriptedWorld` - worlds whose every column looks the same
//! - `RecordingMessenger` - captures messages and sounds per player
//! - `Harness` - a fully wired orchestrator over in-memory adapters

pub mod harness;
pub mod messenger;
pub mod worlds;

pub use harness::{Harness, HarnessOptions};
pub use messenger::RecordingMessenger;
pub use worlds::ScriptedWorld;

use std::time::Duration;

/// Polls `condition` until it holds, letting blocking-pool work make progress.
///
/// # Panics
///
/// Panics if the condition is still false after about two seconds.
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    for _ in 0..2000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
        std::thread::sleep(Duration::from_millis(1));
    }
    panic!("condition not reached");
}
