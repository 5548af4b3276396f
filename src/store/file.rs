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

use std::fs::create_dir_all;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

use crate::error::Fallible;
use crate::store::RemoteEvent;
use crate::store::RemoteStore;
use crate::store::document_path;
use crate::types::document::RemoteDocument;

/// One pretty-printed JSON document on disk, for standalone deployments
/// and CLI maintenance.
///
/// Subscriptions deliver the initial snapshot and local-origin echoes
/// only; there is no cross-process watching.
#[derive(Clone)]
pub struct FileStore {
    path: PathBuf,
    subscribers: Arc<Mutex<Vec<UnboundedSender<RemoteEvent>>>>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The store for a deployment id rooted at `dir`, mirroring the
    /// production document path.
    pub fn in_dir(dir: impl AsRef<Path>, app_id: &str) -> Self {
        let relative = format!("{}.json", document_path(app_id));
        Self::new(dir.as_ref().join(relative))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the document, or None if it does not exist yet.
    pub fn read(&self) -> Fallible<Option<RemoteDocument>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = read_to_string(&self.path)?;
        let doc: RemoteDocument = serde_json::from_str(&content)?;
        Ok(Some(doc))
    }
}

impl RemoteStore for FileStore {
    fn subscribe(&self) -> UnboundedReceiver<RemoteEvent> {
        let (tx, rx) = unbounded_channel();
        let initial = match self.read() {
            Ok(Some(doc)) => RemoteEvent::Snapshot(doc),
            Ok(None) => RemoteEvent::NotFound,
            Err(e) => RemoteEvent::ConnectionLost(e.to_string()),
        };
        let _ = tx.send(initial);
        self.subscribers.lock().unwrap().push(tx);
        rx
    }

    fn write(&self, doc: &RemoteDocument) -> Fallible<()> {
        if let Some(parent) = self.path.parent() {
            create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(doc)?;
        std::fs::write(&self.path, content)?;
        log::debug!("Wrote document to {}.", self.path.display());
        let event = RemoteEvent::Snapshot(doc.clone());
        self.subscribers
            .lock()
            .unwrap()
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
        Ok(())
    }
}
