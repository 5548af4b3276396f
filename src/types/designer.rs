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

use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::types::schedule::Schedule;

/// Placeholder name for a freshly added designer.
pub const PLACEHOLDER_NAME: &str = "新設計師";
/// Placeholder location for a freshly added designer.
pub const PLACEHOLDER_LOCATION: &str = "請輸入地點";

/// A bookable staff profile. Identity is the opaque `id`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Designer {
    pub id: String,
    pub name: String,
    pub location: String,
    pub schedules: Vec<Schedule>,
}

impl Designer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: PLACEHOLDER_NAME.to_string(),
            location: PLACEHOLDER_LOCATION.to_string(),
            schedules: Vec::new(),
        }
    }

    /// Time-derived fresh id ("d" plus milliseconds since the epoch),
    /// bumped until it collides with none of `existing`.
    pub fn fresh_id(existing: &[Designer]) -> String {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let candidate = format!("d{millis}");
            if !existing.iter().any(|d| d.id == candidate) {
                return candidate;
            }
            millis += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_id_is_unique() {
        let a = Designer::new(Designer::fresh_id(&[]));
        let b = Designer::new(Designer::fresh_id(std::slice::from_ref(&a)));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_new_designer_has_placeholders() {
        let designer = Designer::new("d1");
        assert_eq!(designer.name, PLACEHOLDER_NAME);
        assert_eq!(designer.location, PLACEHOLDER_LOCATION);
        assert!(designer.schedules.is_empty());
    }
}
