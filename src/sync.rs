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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::time::Instant;
use tokio::time::sleep_until;

use crate::error::Fallible;
use crate::roster::Roster;
use crate::session::SessionGate;
use crate::store::RemoteEvent;
use crate::store::RemoteStore;
use crate::types::designer::Designer;
use crate::types::document::RemoteDocument;
use crate::writer::DebouncedWriter;
use crate::writer::QUIET_PERIOD;

/// Who is authoritative right now.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Remote-authoritative: inbound snapshots replace local state.
    Viewing,
    /// Local-authoritative: inbound snapshots are received but not applied,
    /// so a single editor's in-progress changes are never clobbered by a
    /// concurrent snapshot or by the echo of their own last write.
    Editing,
}

/// What the UI renders: the current roster, mode, and store health.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EngineView {
    pub designers: Vec<Designer>,
    pub active_id: String,
    pub mode: Mode,
    pub store_available: bool,
    pub line_official_id: String,
}

struct EngineState {
    roster: Roster,
    session: SessionGate,
    mode: Mode,
    store_available: bool,
    bootstrapped: bool,
    shutdown: bool,
    writer: DebouncedWriter,
}

/// The sync controller: arbitrates whether the local model or the remote
/// document is authoritative, bootstraps an absent document exactly once,
/// and coalesces local edits into debounced writes.
///
/// Also the engine's public handle: cheap to clone, safe to share with the
/// UI layer while a spawned `run` drives the subscription and the debounce
/// timer. State is locked briefly and never across an await.
#[derive(Clone)]
pub struct SyncController<S: RemoteStore> {
    store: S,
    state: Arc<Mutex<EngineState>>,
    wake: Arc<Notify>,
    notices: UnboundedSender<String>,
}

impl<S: RemoteStore> SyncController<S> {
    /// A controller with the default quiet period. Returns the handle and
    /// the notice (toast) receiver for the UI.
    pub fn new(store: S) -> (Self, UnboundedReceiver<String>) {
        Self::with_quiet_period(store, QUIET_PERIOD)
    }

    pub fn with_quiet_period(store: S, quiet_period: Duration) -> (Self, UnboundedReceiver<String>) {
        let (notices, notice_rx) = unbounded_channel();
        let controller = Self {
            store,
            state: Arc::new(Mutex::new(EngineState {
                roster: Roster::seed(),
                session: SessionGate::new(),
                mode: Mode::Viewing,
                store_available: true,
                bootstrapped: false,
                shutdown: false,
                writer: DebouncedWriter::new(quiet_period),
            })),
            wake: Arc::new(Notify::new()),
            notices,
        };
        (controller, notice_rx)
    }

    // ------------------------------------------------------------------
    // UI surface
    // ------------------------------------------------------------------

    pub fn view(&self) -> EngineView {
        let st = self.acquire();
        EngineView {
            designers: st.roster.designers().to_vec(),
            active_id: st.roster.active_id().to_string(),
            mode: st.mode,
            store_available: st.store_available,
            line_official_id: st.session.line_official_id().to_string(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.acquire().mode
    }

    // ------------------------------------------------------------------
    // Session gate
    // ------------------------------------------------------------------

    /// Admin login. On success the controller flips to `Editing` and stops
    /// applying remote snapshots.
    pub fn authenticate(&self, candidate: &str) -> Fallible<()> {
        let mut st = self.acquire();
        st.session.authenticate(candidate)?;
        st.mode = Mode::Editing;
        log::debug!("Entering edit mode.");
        Ok(())
    }

    /// Recovery-code password reset. Available outside edit mode; the
    /// reset value is persisted on the next write.
    pub fn reset_password(&self, security_code: &str) -> Fallible<()> {
        self.acquire().session.reset_password(security_code)?;
        self.notice("Password reset to: admin");
        Ok(())
    }

    pub fn change_password(&self, new_password: &str) -> Fallible<()> {
        let mut st = self.acquire();
        st.session.change_password(new_password)?;
        self.schedule_write(&mut st);
        drop(st);
        self.notice("Password changed. Use the new password next time.");
        Ok(())
    }

    pub fn set_line_official_id(&self, id: &str) {
        let mut st = self.acquire();
        st.session.set_line_official_id(id);
        self.schedule_write(&mut st);
    }

    // ------------------------------------------------------------------
    // Roster operations
    // ------------------------------------------------------------------

    /// Select the active designer. Selection is local state and never
    /// persisted.
    pub fn select_designer(&self, id: &str) {
        let mut st = self.acquire();
        st.roster = st.roster.select(id);
    }

    pub fn add_designer(&self) {
        let mut st = self.acquire();
        st.roster = st.roster.add_designer();
        self.schedule_write(&mut st);
    }

    pub fn remove_designer(&self, id: &str) -> Fallible<()> {
        let mut st = self.acquire();
        match st.roster.remove_designer(id) {
            Ok(roster) => {
                st.roster = roster;
                self.schedule_write(&mut st);
                drop(st);
                self.notice("Designer removed.");
                Ok(())
            }
            Err(e) => {
                drop(st);
                self.notice("At least one designer must remain!");
                Err(e)
            }
        }
    }

    pub fn set_designer_name(&self, id: &str, name: &str) {
        let mut st = self.acquire();
        st.roster = st.roster.set_designer_name(id, name);
        self.schedule_write(&mut st);
    }

    pub fn set_designer_location(&self, id: &str, location: &str) {
        let mut st = self.acquire();
        st.roster = st.roster.set_designer_location(id, location);
        self.schedule_write(&mut st);
    }

    pub fn add_schedule(&self, designer_id: &str) {
        let mut st = self.acquire();
        st.roster = st.roster.add_schedule(designer_id);
        self.schedule_write(&mut st);
    }

    pub fn remove_schedule(&self, designer_id: &str, schedule_id: u32) {
        let mut st = self.acquire();
        st.roster = st.roster.remove_schedule(designer_id, schedule_id);
        self.schedule_write(&mut st);
    }

    pub fn set_schedule_date(&self, designer_id: &str, schedule_id: u32, iso: &str) {
        let mut st = self.acquire();
        st.roster = st.roster.set_schedule_date(designer_id, schedule_id, iso);
        self.schedule_write(&mut st);
    }

    pub fn add_time_slot(&self, designer_id: &str, schedule_id: u32, val: &str) {
        let mut st = self.acquire();
        st.roster = st.roster.add_time_slot(designer_id, schedule_id, val);
        self.schedule_write(&mut st);
    }

    pub fn remove_time_slot(&self, designer_id: &str, schedule_id: u32, val: &str) {
        let mut st = self.acquire();
        st.roster = st.roster.remove_time_slot(designer_id, schedule_id, val);
        self.schedule_write(&mut st);
    }

    pub fn toggle_time_slot_full(&self, designer_id: &str, schedule_id: u32, val: &str) {
        let mut st = self.acquire();
        st.roster = st.roster.toggle_time_slot_full(designer_id, schedule_id, val);
        self.schedule_write(&mut st);
    }

    // ------------------------------------------------------------------
    // Mode transitions
    // ------------------------------------------------------------------

    /// Explicit save: bypasses the debounce, writes the current snapshot
    /// immediately, and exits edit mode, re-enabling remote-driven
    /// updates.
    pub fn save(&self) -> Fallible<()> {
        let (doc, available) = {
            let mut st = self.acquire();
            st.writer.cancel();
            st.mode = Mode::Viewing;
            (snapshot(&st), st.store_available)
        };
        log::debug!("Exiting edit mode with an explicit save.");
        if !available {
            self.notice("Remote store unreachable; changes were kept locally.");
            return Ok(());
        }
        match self.store.write(&doc) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!("Explicit save failed: {e}");
                self.acquire().store_available = false;
                self.notice("Saving to the remote store failed.");
                Err(e)
            }
        }
    }

    /// Exit edit mode without saving. Local edits are kept only until the
    /// next remote event replaces them in full.
    pub fn discard(&self) {
        let mut st = self.acquire();
        st.writer.cancel();
        st.mode = Mode::Viewing;
        log::debug!("Exiting edit mode, discarding unsaved edits.");
    }

    /// Stop the sync loop. Cancels the subscription and any pending
    /// debounce without flushing a final write: an admin who closes
    /// without an explicit save loses unsaved edits by design.
    pub fn shutdown(&self) {
        let mut st = self.acquire();
        st.shutdown = true;
        st.writer.cancel();
        self.wake.notify_one();
    }

    // ------------------------------------------------------------------
    // Sync loop
    // ------------------------------------------------------------------

    /// Drive the subscription and the debounce timer. All engine logic
    /// runs on this one task; public operations only mutate state and
    /// wake it.
    pub async fn run(self) {
        let mut events = self.store.subscribe();
        log::debug!("Sync loop started.");
        loop {
            if self.acquire().shutdown {
                break;
            }
            let deadline = self.acquire().writer.deadline();
            tokio::select! {
                event = events.recv() => {
                    match event {
                        None => break,
                        Some(event) => {
                            if self.handle_remote_event(event) {
                                break;
                            }
                        }
                    }
                }
                _ = self.wake.notified() => {}
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.flush_due();
                }
            }
        }
        log::debug!("Sync loop stopped.");
    }

    /// Apply one inbound event. Returns true when the event is terminal.
    fn handle_remote_event(&self, event: RemoteEvent) -> bool {
        match event {
            RemoteEvent::Snapshot(doc) => {
                let mut st = self.acquire();
                match st.mode {
                    Mode::Viewing => {
                        log::debug!("Applying remote snapshot.");
                        st.session.apply_remote(&doc);
                        st.roster = Roster::from_designers(doc.designers);
                    }
                    Mode::Editing => {
                        log::debug!("Ignoring remote snapshot while editing.");
                    }
                }
                false
            }
            RemoteEvent::NotFound => {
                let bootstrap = {
                    let mut st = self.acquire();
                    if st.mode == Mode::Viewing && !st.bootstrapped {
                        st.bootstrapped = true;
                        true
                    } else {
                        false
                    }
                };
                if bootstrap {
                    log::debug!("Remote document absent; writing seed defaults.");
                    if let Err(e) = self.store.write(&RemoteDocument::seed()) {
                        log::error!("Bootstrap write failed: {e}");
                        self.acquire().store_available = false;
                        self.notice("Remote store unreachable; running in local-only mode.");
                    }
                }
                false
            }
            RemoteEvent::ConnectionLost(reason) => {
                log::error!("Connection to the remote store lost: {reason}");
                self.acquire().store_available = false;
                self.notice("Remote store unreachable; running in local-only mode.");
                true
            }
        }
    }

    /// Write the snapshot whose quiet period has elapsed.
    fn flush_due(&self) {
        let due = self.acquire().writer.take_due();
        if let Some(doc) = due {
            log::debug!("Quiet period elapsed; writing coalesced snapshot.");
            if let Err(e) = self.store.write(&doc) {
                log::error!("Debounced write failed: {e}");
                self.acquire().store_available = false;
                self.notice("Saving to the remote store failed.");
            }
        }
    }

    /// Route the current snapshot to the debounced writer. Suppressed
    /// entirely outside edit mode and while the store is unavailable.
    fn schedule_write(&self, st: &mut EngineState) {
        if st.mode == Mode::Editing && st.store_available {
            let doc = snapshot(st);
            st.writer.schedule(doc);
            self.wake.notify_one();
        }
    }

    fn acquire(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap()
    }

    fn notice(&self, message: &str) {
        let _ = self.notices.send(message.to_string());
    }
}

fn snapshot(st: &EngineState) -> RemoteDocument {
    RemoteDocument {
        designers: st.roster.designers().to_vec(),
        admin_password: st.session.admin_password().to_string(),
        line_official_id: st.session.line_official_id().to_string(),
    }
}
