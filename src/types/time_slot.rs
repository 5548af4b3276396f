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

use serde::Deserialize;
use serde::Serialize;

/// One bookable time-of-day entry.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Zero-padded 24h time, e.g. "09:00". Lexical order is chronological
    /// order.
    pub val: String,
    /// Whether the slot is fully booked.
    pub is_full: bool,
}

impl TimeSlot {
    pub fn new(val: impl Into<String>) -> Self {
        Self {
            val: val.into(),
            is_full: false,
        }
    }

    pub fn full(val: impl Into<String>) -> Self {
        Self {
            val: val.into(),
            is_full: true,
        }
    }

    pub fn toggle(&mut self) {
        self.is_full = !self.is_full;
    }
}
