#![allow(dead_code)]

extern crate std;

use std::vec::Vec as StdVec;

use soroban_sdk::Address;

use crate::types::{AgentInfo, Task};

/// INV-1: Task ids equal their position and run 0..N-1 with no gaps.
pub fn assert_sequential_ids(tasks: &[Task]) {
    for (i, task) in tasks.iter().enumerate() {
        assert_eq!(
            task.id, i as u64,
            "INV-1 violated: expected id {}, got {}",
            i, task.id
        );
    }
}

/// INV-2: The counter matches the number of stored tasks.
pub fn assert_count_matches(info: &AgentInfo, tasks: &[Task]) {
    assert_eq!(
        info.task_count,
        tasks.len() as u64,
        "INV-2 violated: task_count {} but {} tasks stored",
        info.task_count,
        tasks.len()
    );
}

/// INV-3: The counter never decreases and grows by at most one per call.
pub fn assert_count_step(before: u64, after: u64) {
    assert!(
        after == before || after == before + 1,
        "INV-3 violated: task_count moved from {} to {}",
        before,
        after
    );
}

/// INV-4: Fields whose update flag was off are untouched.
pub fn assert_unflagged_fields_kept(
    before: &Task,
    after: &Task,
    status_flag: bool,
    details_flag: bool,
    creator_flag: bool,
) {
    assert_eq!(before.id, after.id, "INV-4 violated: task id changed");
    if !status_flag {
        assert_eq!(before.status, after.status, "INV-4 violated: status changed");
    }
    if !details_flag {
        assert_eq!(
            before.details, after.details,
            "INV-4 violated: details changed"
        );
    }
    if !creator_flag {
        assert_eq!(
            before.creator, after.creator,
            "INV-4 violated: creator changed"
        );
    }
}

/// INV-5: Metadata written at initialisation never changes.
pub fn assert_metadata_immutable(original: &AgentInfo, current: &AgentInfo) {
    assert_eq!(original.name, current.name, "INV-5 violated: name changed");
    assert_eq!(
        original.details, current.details,
        "INV-5 violated: details changed"
    );
    assert_eq!(
        original.fixed_pricing, current.fixed_pricing,
        "INV-5 violated: pricing changed"
    );
    assert_eq!(
        original.created_at, current.created_at,
        "INV-5 violated: created_at changed"
    );
    assert_eq!(
        original.token, current.token,
        "INV-5 violated: token changed"
    );
}

/// INV-6: Every task's creator is one of the accounts that paid.
pub fn assert_creators_paid(tasks: &[Task], payers: &StdVec<Address>) {
    for task in tasks {
        assert!(
            payers.contains(&task.creator),
            "INV-6 violated: task {} creator never paid",
            task.id
        );
    }
}

/// Run all stateless invariants over a full snapshot.
pub fn assert_all_invariants(info: &AgentInfo, tasks: &[Task]) {
    assert_sequential_ids(tasks);
    assert_count_matches(info, tasks);
}
