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

use tokio::spawn;
use tokio::time::sleep;

use salonsync::line::booking_url;
use salonsync::store::memory::MemoryStore;
use salonsync::sync::Mode;
use salonsync::sync::SyncController;

/// Full scenario: a fresh deployment is bootstrapped, an admin edits the
/// roster while a customer-facing client watches, the admin saves, and the
/// watcher converges on the saved state.
#[tokio::test(start_paused = true)]
async fn test_walkthrough() {
    let store = MemoryStore::empty();

    // The first client to come up bootstraps the document with the seed
    // defaults.
    let (admin, _admin_notices) = SyncController::new(store.clone());
    spawn(admin.clone().run());
    sleep(Duration::from_millis(10)).await;
    assert_eq!(store.write_count(), 1);
    assert_eq!(store.current().unwrap().designers[0].name, "魚魚");

    // A customer-facing client reads the seeded roster.
    let (viewer, _viewer_notices) = SyncController::new(store.clone());
    spawn(viewer.clone().run());
    sleep(Duration::from_millis(10)).await;
    assert_eq!(viewer.view().designers[0].name, "魚魚");
    assert_eq!(viewer.view().mode, Mode::Viewing);

    // The admin logs in and edits: a new schedule with two slots, plus the
    // LINE official id. Duplicate slot insertion stays idempotent.
    admin.authenticate("admin").unwrap();
    admin.add_schedule("d1");
    admin.set_schedule_date("d1", 4, "2026-03-16");
    admin.add_time_slot("d1", 4, "09:00");
    admin.add_time_slot("d1", 4, "09:00");
    admin.add_time_slot("d1", 4, "14:00");
    admin.set_line_official_id("salon");

    // The viewer sees nothing until the quiet period elapses, then the
    // coalesced write lands and is applied remotely.
    assert_eq!(viewer.view().designers[0].schedules.len(), 3);
    sleep(Duration::from_secs(2)).await;
    assert_eq!(store.write_count(), 2);
    let seen = viewer.view();
    let schedule = &seen.designers[0].schedules[3];
    assert_eq!(schedule.id, 4);
    assert_eq!(schedule.date, "3/16");
    assert_eq!(schedule.day, "一");
    let vals: Vec<&str> = schedule.times.iter().map(|t| t.val.as_str()).collect();
    assert_eq!(vals, vec!["09:00", "14:00"]);

    // The viewer can compose a booking link from the synced LINE id.
    let url = booking_url(&seen.line_official_id, "3/16 (一) 09:00").unwrap();
    assert!(url.starts_with("https://line.me/R/oaMessage/@salon/?"));

    // The admin changes the password and saves explicitly: one immediate
    // write, edit mode off.
    admin.change_password("abcd").unwrap();
    admin.save().unwrap();
    assert_eq!(admin.view().mode, Mode::Viewing);
    assert_eq!(store.write_count(), 3);

    // The viewer picked up the new password with the snapshot.
    sleep(Duration::from_millis(10)).await;
    assert!(viewer.authenticate("admin").is_err());
    viewer.authenticate("abcd").unwrap();
    viewer.discard();

    admin.shutdown();
    viewer.shutdown();
}
