//! Sample boot records.
//!
//! Records are deterministic in their index so tests can predict ids,
//! dates and links without storing JSON fixtures on disk.

use bootboard_types::{Metadata, Record, Timestamp};

/// `created_on` of record 0 (2017-03-22T16:50:38Z). Later indices are one
/// minute older each.
pub const BASE_MILLIS: i64 = 1_490_201_438_000;

const JOBS: [&str; 3] = ["mainline", "next", "stable"];
const BOARDS: [&str; 4] = ["sun7i-a20-cubieboard2", "panda", "beaglebone-black", "qemu"];
const ARCHES: [&str; 3] = ["arm", "arm64", "x86"];
const LABS: [&str; 2] = ["lab-01", "lab-baylibre"];
const STATUSES: [&str; 4] = ["PASS", "FAIL", "OFFLINE", "UNTRIED"];

/// Record id of the `index`-th sample record.
pub fn boot_id(index: usize) -> String {
    format!("58d2ab5e{:016x}", index)
}

/// Fully populated boot record.
pub fn boot_record(index: usize) -> Record {
    let job = JOBS[index % JOBS.len()];
    let mut record = Record::new(boot_id(index));
    record.job = Some(job.to_string());
    record.kernel = Some(format!("v4.{}-{}", 9 + index % 3, index));
    record.board = Some(BOARDS[index % BOARDS.len()].to_string());
    record.defconfig = Some("multi_v7_defconfig".to_string());
    record.defconfig_full = Some("multi_v7_defconfig".to_string());
    record.arch = Some(ARCHES[index % ARCHES.len()].to_string());
    record.lab_name = Some(LABS[index % LABS.len()].to_string());
    record.status = Some(STATUSES[index % STATUSES.len()].to_string());
    record.created_on = Some(Timestamp::from_millis(BASE_MILLIS - index as i64 * 60_000));
    record.metadata = Some(Metadata {
        git_branch: Some("master".to_string()),
    });
    record
}

/// `count` sample records, newest first.
pub fn boot_records(count: usize) -> Vec<Record> {
    (0..count).map(boot_record).collect()
}

/// The failed sun7i boot used by the row rendering scenarios.
pub fn failed_sun7i_boot() -> Record {
    let mut record = Record::new("58d2ab5e59b5146d3b4e0b52");
    record.status = Some("FAIL".to_string());
    record.board = Some("sun7i".to_string());
    record.job = Some("mainline".to_string());
    record.kernel = Some("v4.9".to_string());
    record.defconfig_full = Some("defconfig+CONFIG_X".to_string());
    record.lab_name = Some("lab-01".to_string());
    record.created_on = Some(Timestamp::from_millis(BASE_MILLIS));
    record
}

/// Records whose status is `FAIL`, as the failed-results panels request.
pub fn failed_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let mut record = boot_record(i);
            record.status = Some("FAIL".to_string());
            record
        })
        .collect()
}
