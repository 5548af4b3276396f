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

pub mod file;
pub mod memory;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::error::Fallible;
use crate::types::document::RemoteDocument;

/// One event on the subscription stream.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RemoteEvent {
    /// The document's current content: delivered once on subscription and
    /// once per confirmed change.
    Snapshot(RemoteDocument),
    /// The document does not exist yet.
    NotFound,
    /// Terminal transport failure. The stream does not resubscribe; that
    /// policy belongs to the caller.
    ConnectionLost(String),
}

/// A document-oriented remote store holding the single shared document.
/// No business logic, no local caching.
pub trait RemoteStore: Clone + Send + Sync + 'static {
    /// Subscribe to the document. The receiver yields one event
    /// immediately with the current state, then one per confirmed change.
    fn subscribe(&self) -> UnboundedReceiver<RemoteEvent>;

    /// Replace the document. The engine does not retry on failure.
    fn write(&self, doc: &RemoteDocument) -> Fallible<()>;
}

/// The fixed document path for a deployment id, mirroring the production
/// store layout.
pub fn document_path(app_id: &str) -> String {
    format!("artifacts/{app_id}/public/data/store_data/main_config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_path() {
        assert_eq!(
            document_path("default-app-id"),
            "artifacts/default-app-id/public/data/store_data/main_config"
        );
    }
}
