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

use chrono::Datelike;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::types::time_slot::TimeSlot;

/// Weekday labels indexed by days-from-Sunday.
const WEEKDAY_LABELS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

/// One calendar date's set of bookable time slots for a designer.
///
/// `date` and `day` are display labels derived from `full_date` and cached
/// in the wire shape. They are empty iff `full_date` is empty.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Unique within the owning designer, never reused in a session.
    pub id: u32,
    /// ISO date ("2026-03-12") or empty.
    pub full_date: String,
    /// Short display label ("3/12"), no zero padding.
    pub date: String,
    /// Weekday label ("四").
    pub day: String,
    pub times: Vec<TimeSlot>,
}

impl Schedule {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            full_date: String::new(),
            date: String::new(),
            day: String::new(),
            times: Vec::new(),
        }
    }

    /// Fresh id for a schedule appended to `existing`: one plus the maximum
    /// existing id, or 1 if there are none.
    pub fn fresh_id(existing: &[Schedule]) -> u32 {
        existing.iter().map(|s| s.id).max().map_or(1, |max| max + 1)
    }

    /// Set the date and recompute the derived labels. An empty or
    /// unparseable string clears all three fields.
    pub fn set_date(&mut self, iso: &str) {
        match date_labels(iso) {
            Some((date, day)) => {
                self.full_date = iso.to_string();
                self.date = date;
                self.day = day;
            }
            None => {
                self.full_date = String::new();
                self.date = String::new();
                self.day = String::new();
            }
        }
    }

    /// Insert a slot, keeping `times` sorted ascending by `val`. Inserting
    /// a value already present is a no-op.
    pub fn add_time(&mut self, val: &str) {
        if self.times.iter().any(|t| t.val == val) {
            return;
        }
        self.times.push(TimeSlot::new(val));
        self.times.sort_by(|a, b| a.val.cmp(&b.val));
    }

    pub fn remove_time(&mut self, val: &str) {
        self.times.retain(|t| t.val != val);
    }

    pub fn toggle_time(&mut self, val: &str) {
        for slot in &mut self.times {
            if slot.val == val {
                slot.toggle();
            }
        }
    }
}

/// Derive the display labels from an ISO date: "2026-03-12" becomes
/// ("3/12", "四"). Returns None for empty or unparseable input.
fn date_labels(iso: &str) -> Option<(String, String)> {
    let date = NaiveDate::parse_from_str(iso, "%Y-%m-%d").ok()?;
    let label = format!("{}/{}", date.month(), date.day());
    let day = WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize];
    Some((label, day.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_labels() {
        assert_eq!(
            date_labels("2026-03-12"),
            Some(("3/12".to_string(), "四".to_string()))
        );
        assert_eq!(
            date_labels("2026-03-14"),
            Some(("3/14".to_string(), "六".to_string()))
        );
        assert_eq!(date_labels(""), None);
        assert_eq!(date_labels("not-a-date"), None);
    }

    #[test]
    fn test_set_date_derives_labels() {
        let mut schedule = Schedule::new(1);
        schedule.set_date("2026-03-13");
        assert_eq!(schedule.full_date, "2026-03-13");
        assert_eq!(schedule.date, "3/13");
        assert_eq!(schedule.day, "五");
    }

    #[test]
    fn test_clearing_date_clears_labels() {
        let mut schedule = Schedule::new(1);
        schedule.set_date("2026-03-13");
        schedule.set_date("");
        assert!(schedule.full_date.is_empty());
        assert!(schedule.date.is_empty());
        assert!(schedule.day.is_empty());
    }

    #[test]
    fn test_unparseable_date_treated_as_empty() {
        let mut schedule = Schedule::new(1);
        schedule.set_date("2026-03-13");
        schedule.set_date("13/03/2026");
        assert!(schedule.full_date.is_empty());
        assert!(schedule.date.is_empty());
        assert!(schedule.day.is_empty());
    }

    #[test]
    fn test_add_time_keeps_ascending_order() {
        let mut schedule = Schedule::new(1);
        schedule.add_time("15:00");
        schedule.add_time("09:00");
        schedule.add_time("11:00");
        let vals: Vec<&str> = schedule.times.iter().map(|t| t.val.as_str()).collect();
        assert_eq!(vals, vec!["09:00", "11:00", "15:00"]);
    }

    #[test]
    fn test_duplicate_time_is_a_no_op() {
        let mut schedule = Schedule::new(1);
        schedule.add_time("09:00");
        schedule.add_time("09:00");
        assert_eq!(schedule.times.len(), 1);
    }

    #[test]
    fn test_fresh_id() {
        assert_eq!(Schedule::fresh_id(&[]), 1);
        let existing = vec![Schedule::new(1), Schedule::new(7), Schedule::new(3)];
        assert_eq!(Schedule::fresh_id(&existing), 8);
    }

    #[test]
    fn test_remove_and_toggle_time() {
        let mut schedule = Schedule::new(1);
        schedule.add_time("09:00");
        schedule.add_time("11:00");
        schedule.toggle_time("11:00");
        assert!(schedule.times[1].is_full);
        schedule.remove_time("09:00");
        assert_eq!(schedule.times.len(), 1);
        assert_eq!(schedule.times[0].val, "11:00");
    }
}
