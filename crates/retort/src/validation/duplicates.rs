//! Whole-dataset duplicate classification.
//!
//! Runs once, after every row has a settled record. The exact pass goes
//! first and removes its casualties from the stereo pool; this ordering is a
//! fixed contract. Rejected rows are never revisited.

use indexmap::IndexMap;
use log::info;

use super::record::{RejectionReason, Status, ValidationRecord};

/// Group counts produced by the duplicate passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DuplicateCounts {
    pub exact_groups: u32,
    pub stereo_groups: u32,
}

/// Classify exact and stereoisomer duplicates across all records.
///
/// Records must be in ascending row-number order; "first occurrence" within
/// a group is the member with the lowest row number.
pub fn classify(records: &mut [ValidationRecord]) -> DuplicateCounts {
    let counts = DuplicateCounts {
        exact_groups: mark_exact(records),
        stereo_groups: mark_stereo(records),
    };
    info!(
        "Duplicate groups: {} exact, {} stereo",
        counts.exact_groups, counts.stereo_groups
    );
    counts
}

/// Group validated records by full InChIKey.
///
/// The first member of each group of two or more stays validated; the rest
/// are rejected as exact duplicates. The group id goes on every member for
/// traceability.
fn mark_exact(records: &mut [ValidationRecord]) -> u32 {
    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (idx, record) in records.iter().enumerate() {
        if record.status != Status::Validated {
            continue;
        }
        if let Some(ref key) = record.validated_inchikey {
            groups.entry(key.clone()).or_default().push(idx);
        }
    }

    let mut group_id = 0;
    for members in groups.values() {
        if members.len() < 2 {
            continue;
        }
        group_id += 1;
        for (position, &idx) in members.iter().enumerate() {
            let record = &mut records[idx];
            record.exact_duplicate_group = Some(group_id);
            if position > 0 {
                record.reject(RejectionReason::ExactDuplicate);
            }
        }
    }
    group_id
}

/// Group surviving records by the 14-character connectivity prefix.
///
/// All but the first member of each group become stereo duplicates; every
/// member carries the group id. Exact-pass rejects are excluded, so full
/// InChIKeys within a group are guaranteed distinct.
fn mark_stereo(records: &mut [ValidationRecord]) -> u32 {
    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (idx, record) in records.iter().enumerate() {
        if record.status == Status::Rejected {
            continue;
        }
        if let Some(ref prefix) = record.validated_inchikey14 {
            groups.entry(prefix.clone()).or_default().push(idx);
        }
    }

    let mut group_id = 0;
    for members in groups.values() {
        if members.len() < 2 {
            continue;
        }
        group_id += 1;
        for (position, &idx) in members.iter().enumerate() {
            let record = &mut records[idx];
            record.stereo_duplicate_group = Some(group_id);
            if position > 0 {
                record.status = Status::StereoDuplicate;
            }
        }
    }
    group_id
}
