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

use crate::types::designer::Designer;
use crate::types::schedule::Schedule;
use crate::types::time_slot::TimeSlot;

/// The admin password a fresh deployment starts with, and the value the
/// recovery code resets to.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// The single shared persisted snapshot. Exactly one exists per deployment,
/// at a fixed path; it is created lazily on first read if absent.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDocument {
    pub designers: Vec<Designer>,
    pub admin_password: String,
    pub line_official_id: String,
}

impl RemoteDocument {
    /// The bootstrap content written exactly when no document exists yet:
    /// one built-in designer with three seeded schedules.
    pub fn seed() -> Self {
        Self {
            designers: seed_designers(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            line_official_id: String::new(),
        }
    }
}

pub fn seed_designers() -> Vec<Designer> {
    let mut first = Schedule::new(1);
    first.set_date("2026-03-12");
    first.times = vec![
        TimeSlot::new("11:00"),
        TimeSlot::full("13:00"),
        TimeSlot::new("15:00"),
        TimeSlot::new("17:00"),
    ];

    let mut second = Schedule::new(2);
    second.set_date("2026-03-13");
    second.times = vec![
        TimeSlot::new("13:00"),
        TimeSlot::full("15:00"),
        TimeSlot::new("19:00"),
    ];

    let mut third = Schedule::new(3);
    third.set_date("2026-03-14");
    third.times = vec![
        TimeSlot::new("11:00"),
        TimeSlot::new("15:00"),
        TimeSlot::new("17:00"),
        TimeSlot::new("19:00"),
    ];

    vec![Designer {
        id: "d1".to_string(),
        name: "魚魚".to_string(),
        location: "北車店 15樓".to_string(),
        schedules: vec![first, second, third],
    }]
}
