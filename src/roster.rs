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

use crate::error::EngineError;
use crate::error::Fallible;
use crate::types::designer::Designer;
use crate::types::document::seed_designers;
use crate::types::schedule::Schedule;

/// The in-memory designers → schedules → time slots model, plus the active
/// designer selection.
///
/// Every operation returns a new roster value; the caller is responsible
/// for routing the resulting snapshot to the debounced writer while in
/// edit mode. Operations on unknown ids are no-ops. The roster never holds
/// fewer than one designer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Roster {
    designers: Vec<Designer>,
    active_id: String,
}

impl Roster {
    /// A roster holding the built-in seed designer.
    pub fn seed() -> Self {
        Self::from_designers(seed_designers())
    }

    /// Build a roster from a remote snapshot. An empty designer list falls
    /// back to the seed designer so the minimum-one invariant holds even
    /// against a hand-edited document.
    pub fn from_designers(designers: Vec<Designer>) -> Self {
        let designers = if designers.is_empty() {
            seed_designers()
        } else {
            designers
        };
        let active_id = designers[0].id.clone();
        Self {
            designers,
            active_id,
        }
    }

    pub fn designers(&self) -> &[Designer] {
        &self.designers
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    /// The active designer, falling back to the first one if the selection
    /// is stale.
    pub fn active(&self) -> &Designer {
        self.designers
            .iter()
            .find(|d| d.id == self.active_id)
            .unwrap_or(&self.designers[0])
    }

    /// Select a designer. Unknown ids leave the selection unchanged.
    pub fn select(&self, id: &str) -> Roster {
        let mut next = self.clone();
        if next.designers.iter().any(|d| d.id == id) {
            next.active_id = id.to_string();
        }
        next
    }

    /// Append a designer with a fresh id and placeholder fields and make it
    /// the active one.
    pub fn add_designer(&self) -> Roster {
        let mut next = self.clone();
        let designer = Designer::new(Designer::fresh_id(&next.designers));
        next.active_id = designer.id.clone();
        next.designers.push(designer);
        next
    }

    /// Remove a designer. Rejected when only one remains. If the removed
    /// designer was active, the first remaining one becomes active.
    pub fn remove_designer(&self, id: &str) -> Fallible<Roster> {
        if self.designers.len() <= 1 {
            return Err(EngineError::MinimumDesigner);
        }
        let mut next = self.clone();
        next.designers.retain(|d| d.id != id);
        if next.active_id == id {
            next.active_id = next.designers[0].id.clone();
        }
        Ok(next)
    }

    pub fn set_designer_name(&self, id: &str, name: &str) -> Roster {
        self.map_designer(id, |d| d.name = name.to_string())
    }

    pub fn set_designer_location(&self, id: &str, location: &str) -> Roster {
        self.map_designer(id, |d| d.location = location.to_string())
    }

    /// Append a schedule with a fresh id and empty fields.
    pub fn add_schedule(&self, designer_id: &str) -> Roster {
        self.map_designer(designer_id, |d| {
            let id = Schedule::fresh_id(&d.schedules);
            d.schedules.push(Schedule::new(id));
        })
    }

    pub fn remove_schedule(&self, designer_id: &str, schedule_id: u32) -> Roster {
        self.map_designer(designer_id, |d| {
            d.schedules.retain(|s| s.id != schedule_id);
        })
    }

    /// Set a schedule's date, recomputing the derived labels. An empty
    /// date clears them.
    pub fn set_schedule_date(&self, designer_id: &str, schedule_id: u32, iso: &str) -> Roster {
        self.map_schedule(designer_id, schedule_id, |s| s.set_date(iso))
    }

    /// Insert a time slot, keeping the slots sorted. Duplicates are no-ops.
    pub fn add_time_slot(&self, designer_id: &str, schedule_id: u32, val: &str) -> Roster {
        self.map_schedule(designer_id, schedule_id, |s| s.add_time(val))
    }

    pub fn remove_time_slot(&self, designer_id: &str, schedule_id: u32, val: &str) -> Roster {
        self.map_schedule(designer_id, schedule_id, |s| s.remove_time(val))
    }

    pub fn toggle_time_slot_full(&self, designer_id: &str, schedule_id: u32, val: &str) -> Roster {
        self.map_schedule(designer_id, schedule_id, |s| s.toggle_time(val))
    }

    fn map_designer(&self, id: &str, f: impl FnOnce(&mut Designer)) -> Roster {
        let mut next = self.clone();
        if let Some(designer) = next.designers.iter_mut().find(|d| d.id == id) {
            f(designer);
        }
        next
    }

    fn map_schedule(
        &self,
        designer_id: &str,
        schedule_id: u32,
        f: impl FnOnce(&mut Schedule),
    ) -> Roster {
        self.map_designer(designer_id, |d| {
            if let Some(schedule) = d.schedules.iter_mut().find(|s| s.id == schedule_id) {
                f(schedule);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_roster() {
        let roster = Roster::seed();
        assert_eq!(roster.designers().len(), 1);
        assert_eq!(roster.active().name, "魚魚");
    }

    #[test]
    fn test_empty_snapshot_falls_back_to_seed() {
        let roster = Roster::from_designers(Vec::new());
        assert_eq!(roster.designers().len(), 1);
        assert_eq!(roster.active_id(), "d1");
    }

    #[test]
    fn test_add_designer_becomes_active() {
        let roster = Roster::seed().add_designer();
        assert_eq!(roster.designers().len(), 2);
        assert_eq!(roster.active_id(), roster.designers()[1].id);
        assert_eq!(roster.active().name, "新設計師");
    }

    #[test]
    fn test_remove_last_designer_is_rejected() {
        let roster = Roster::seed();
        let result = roster.remove_designer("d1");
        assert_eq!(result, Err(EngineError::MinimumDesigner));
    }

    #[test]
    fn test_remove_active_designer_falls_back_to_first() {
        let roster = Roster::seed().add_designer();
        let removed = roster.active_id().to_string();
        let roster = roster.remove_designer(&removed).unwrap();
        assert_eq!(roster.designers().len(), 1);
        assert_eq!(roster.active_id(), "d1");
    }

    #[test]
    fn test_remove_inactive_designer_keeps_selection() {
        let roster = Roster::seed().add_designer();
        let added = roster.active_id().to_string();
        let roster = roster.remove_designer("d1").unwrap();
        assert_eq!(roster.active_id(), added);
    }

    #[test]
    fn test_schedule_id_monotonicity() {
        let roster = Roster::seed();
        // Seed schedules have ids 1..=3.
        let roster = roster.add_schedule("d1");
        assert_eq!(roster.designers()[0].schedules[3].id, 4);
        // Removing an older schedule does not free its id.
        let roster = roster.remove_schedule("d1", 4);
        let roster = roster.remove_schedule("d1", 2);
        let roster = roster.add_schedule("d1");
        assert_eq!(roster.designers()[0].schedules.last().unwrap().id, 4);
    }

    #[test]
    fn test_first_schedule_id_is_one() {
        let roster = Roster::seed().add_designer();
        let id = roster.active_id().to_string();
        let roster = roster.add_schedule(&id);
        assert_eq!(roster.active().schedules[0].id, 1);
    }

    #[test]
    fn test_duplicate_time_slot_is_idempotent() {
        let roster = Roster::seed();
        let before: Vec<String> = roster.designers()[0].schedules[0]
            .times
            .iter()
            .map(|t| t.val.clone())
            .collect();
        let roster = roster.add_time_slot("d1", 1, "11:00");
        let after: Vec<String> = roster.designers()[0].schedules[0]
            .times
            .iter()
            .map(|t| t.val.clone())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_time_slots_stay_sorted() {
        let roster = Roster::seed()
            .add_time_slot("d1", 1, "09:00")
            .add_time_slot("d1", 1, "23:00")
            .add_time_slot("d1", 1, "12:00");
        let vals: Vec<&str> = roster.designers()[0].schedules[0]
            .times
            .iter()
            .map(|t| t.val.as_str())
            .collect();
        assert_eq!(vals, vec!["09:00", "11:00", "12:00", "13:00", "15:00", "17:00", "23:00"]);
    }

    #[test]
    fn test_operations_on_unknown_ids_are_no_ops() {
        let roster = Roster::seed();
        assert_eq!(roster.add_schedule("nope"), roster);
        assert_eq!(roster.set_schedule_date("d1", 99, "2026-03-12"), roster);
        assert_eq!(roster.toggle_time_slot_full("d1", 1, "03:33"), roster);
        assert_eq!(roster.select("nope").active_id(), "d1");
    }

    #[test]
    fn test_set_designer_fields() {
        let roster = Roster::seed()
            .set_designer_name("d1", "阿土")
            .set_designer_location("d1", "東區店 2樓");
        assert_eq!(roster.active().name, "阿土");
        assert_eq!(roster.active().location, "東區店 2樓");
    }

    #[test]
    fn test_operations_do_not_alias() {
        let roster = Roster::seed();
        let _ = roster.add_time_slot("d1", 1, "09:00");
        assert_eq!(roster, Roster::seed());
    }
}
