// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

use tokio::time::Instant;

use crate::types::document::RemoteDocument;

/// The quiet period after the last mutation before a write goes out.
pub const QUIET_PERIOD: Duration = Duration::from_millis(1500);

/// Single-slot write coalescer.
///
/// Scheduling a snapshot replaces any pending one and re-arms the deadline,
/// so only the most recent snapshot is ever written; intermediate states
/// are never persisted. The sync loop sleeps until `deadline` and then
/// takes the due snapshot. This is rate limiting for an actively editing
/// admin, not a debounce of raw input.
pub struct DebouncedWriter {
    delay: Duration,
    pending: Option<RemoteDocument>,
    deadline: Option<Instant>,
}

impl DebouncedWriter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            deadline: None,
        }
    }

    /// Record `doc` as the pending snapshot and restart the quiet-period
    /// timer.
    pub fn schedule(&mut self, doc: RemoteDocument) {
        self.pending = Some(doc);
        self.deadline = Some(Instant::now() + self.delay);
    }

    /// Drop any pending snapshot without writing it.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Take the snapshot whose deadline has elapsed, disarming the timer.
    pub fn take_due(&mut self) -> Option<RemoteDocument> {
        self.deadline = None;
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_newer_snapshot_supersedes_pending() {
        let mut writer = DebouncedWriter::new(QUIET_PERIOD);
        let mut doc = RemoteDocument::seed();
        writer.schedule(doc.clone());
        let first_deadline = writer.deadline().unwrap();

        tokio::time::advance(Duration::from_millis(1000)).await;
        doc.line_official_id = "@salon".to_string();
        writer.schedule(doc.clone());

        // The timer restarted and the older snapshot is gone.
        assert!(writer.deadline().unwrap() > first_deadline);
        let due = writer.take_due().unwrap();
        assert_eq!(due.line_official_id, "@salon");
        assert!(!writer.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending() {
        let mut writer = DebouncedWriter::new(QUIET_PERIOD);
        writer.schedule(RemoteDocument::seed());
        writer.cancel();
        assert!(!writer.is_armed());
        assert!(writer.take_due().is_none());
    }
}
