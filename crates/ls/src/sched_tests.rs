use super::*;

use std::fs::{create_dir, write};
use std::os::unix::fs::symlink;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::classify::StorageState;

struct CountingOracle {
    calls: AtomicUsize,
    code: i32,
}

impl CountingOracle {
    fn new(code: i32) -> Self {
        CountingOracle {
            calls: AtomicUsize::new(0),
            code,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Oracle for CountingOracle {
    fn check_attr(&self, _path: &Path) -> i32 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.code
    }
}

#[test]
fn worker_count_follows_the_batch_formula() {
    let cases: &[(usize, usize, bool, usize)] = &[
        (3, 4, false, 2),   // 3/2 + 1
        (10, 4, false, 4),  // ceiling wins
        (1, 4, true, 4),    // always-max ignores the batch size
        (4, 4, false, 4),   // batch == ceiling is not "small"
        (1, 4, false, 1),   // 1/2 + 1
        (0, 4, false, 1),
        (7, 16, false, 4),  // 7/2 + 1
    ];
    for (batch, max, always, expected) in cases {
        assert_eq!(
            worker_count(*batch, *max, *always),
            *expected,
            "batch {batch}, max {max}, always {always}"
        );
    }
}

#[test]
fn stat_batch_classifies_eligible_plain_files_exactly_once() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    write(root.join("a"), b"a").expect("write a");
    write(root.join("b"), b"bb").expect("write b");
    write(root.join("c"), b"ccc").expect("write c");
    create_dir(root.join("sub")).expect("create sub");

    let oracle = CountingOracle::new(0);
    let paths = vec![
        root.join("a"),
        root.join("b"),
        root.join("c"),
        root.join("sub"),
    ];

    let records = stat_batch(paths, true, &oracle).expect("stat_batch");
    assert_eq!(records.len(), 4);
    // One oracle call per plain file; the directory is never consulted.
    assert_eq!(oracle.calls(), 3);

    for rec in &records {
        if rec.is_dir {
            assert_eq!(rec.state, StorageState::Unknown, "{}", rec.name);
        } else {
            assert_eq!(rec.state, StorageState::Resident, "{}", rec.name);
        }
    }
}

#[test]
fn stat_batch_never_classifies_when_ineligible() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    write(root.join("a"), b"a").expect("write a");
    write(root.join("b"), b"b").expect("write b");

    let oracle = CountingOracle::new(2);
    let records =
        stat_batch(vec![root.join("a"), root.join("b")], false, &oracle).expect("stat_batch");

    assert_eq!(records.len(), 2);
    assert_eq!(oracle.calls(), 0);
    for rec in &records {
        assert_eq!(rec.state, StorageState::Unknown, "{}", rec.name);
    }
}

#[test]
fn stat_batch_leaves_symlinks_unknown_even_when_eligible() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    write(root.join("target"), b"x").expect("write target");
    symlink(root.join("target"), root.join("link")).expect("create symlink");

    let oracle = CountingOracle::new(0);
    let records = stat_batch(vec![root.join("link")], true, &oracle).expect("stat_batch");

    assert_eq!(records.len(), 1);
    assert!(records[0].is_symlink);
    assert_eq!(records[0].state, StorageState::Unknown);
    assert_eq!(oracle.calls(), 0);
}

#[test]
fn stat_batch_tolerates_an_out_of_contract_oracle() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    write(root.join("weird"), b"x").expect("write file");

    let oracle = CountingOracle::new(9000);
    let records = stat_batch(vec![root.join("weird")], true, &oracle).expect("stat_batch");
    assert_eq!(records[0].state, StorageState::Unknown);
}

#[test]
fn stat_batch_aborts_the_whole_batch_on_a_stat_failure() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    write(root.join("good"), b"x").expect("write file");

    let oracle = CountingOracle::new(0);
    let paths = vec![root.join("good"), root.join("vanished")];
    let err = stat_batch(paths, true, &oracle).unwrap_err();
    assert!(matches!(err, ListError::Stat { .. }), "got {err:?}");
}

#[test]
fn stat_batch_with_no_paths_is_empty() {
    let oracle = CountingOracle::new(0);
    let records = stat_batch(Vec::new(), true, &oracle).expect("stat_batch");
    assert!(records.is_empty());
    assert_eq!(oracle.calls(), 0);
}

#[test]
fn stat_batch_handles_batches_larger_than_the_pool() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();
    let mut paths = Vec::new();
    for i in 0..50 {
        let p = root.join(format!("f{i:02}"));
        write(&p, b"x").expect("write file");
        paths.push(p);
    }

    let oracle = CountingOracle::new(1);
    let records = stat_batch(paths, true, &oracle).expect("stat_batch");
    assert_eq!(records.len(), 50);
    assert_eq!(oracle.calls(), 50);
    for rec in &records {
        assert_eq!(rec.state, StorageState::Premigrated, "{}", rec.name);
    }
}
