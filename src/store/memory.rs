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

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

use crate::error::EngineError;
use crate::error::Fallible;
use crate::store::RemoteEvent;
use crate::store::RemoteStore;
use crate::types::document::RemoteDocument;

/// In-process store: one document, fanned out to every subscriber. Each
/// write is echoed to all subscribers, including the writer's own engine.
///
/// Used as the standalone-mode store and as the test double for the
/// production document store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    doc: Option<RemoteDocument>,
    subscribers: Vec<UnboundedSender<RemoteEvent>>,
    writes: u64,
    fail_writes: bool,
}

impl MemoryStore {
    /// A store with no document yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A store already holding `doc`, as if another client had written it.
    pub fn with_document(doc: RemoteDocument) -> Self {
        let store = Self::default();
        store.acquire().doc = Some(doc);
        store
    }

    pub fn current(&self) -> Option<RemoteDocument> {
        self.acquire().doc.clone()
    }

    /// Number of confirmed writes so far.
    pub fn write_count(&self) -> u64 {
        self.acquire().writes
    }

    /// Make every subsequent write fail with a connection error.
    pub fn fail_writes(&self, fail: bool) {
        self.acquire().fail_writes = fail;
    }

    /// Sever the transport: every subscriber receives a terminal
    /// `ConnectionLost` and is dropped.
    pub fn disconnect(&self, reason: &str) {
        let mut inner = self.acquire();
        for subscriber in inner.subscribers.drain(..) {
            let _ = subscriber.send(RemoteEvent::ConnectionLost(reason.to_string()));
        }
    }

    fn acquire(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }
}

impl RemoteStore for MemoryStore {
    fn subscribe(&self) -> UnboundedReceiver<RemoteEvent> {
        let (tx, rx) = unbounded_channel();
        let mut inner = self.acquire();
        let initial = match &inner.doc {
            Some(doc) => RemoteEvent::Snapshot(doc.clone()),
            None => RemoteEvent::NotFound,
        };
        let _ = tx.send(initial);
        inner.subscribers.push(tx);
        rx
    }

    fn write(&self, doc: &RemoteDocument) -> Fallible<()> {
        let mut inner = self.acquire();
        if inner.fail_writes {
            return Err(EngineError::connection("write refused"));
        }
        inner.doc = Some(doc.clone());
        inner.writes += 1;
        let event = RemoteEvent::Snapshot(doc.clone());
        inner
            .subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
        Ok(())
    }
}
