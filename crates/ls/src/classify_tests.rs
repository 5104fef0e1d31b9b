use super::*;

struct FixedOracle(i32);

impl Oracle for FixedOracle {
    fn check_attr(&self, _path: &Path) -> i32 {
        self.0
    }
}

#[test]
fn from_code_maps_the_three_known_codes() {
    let cases = [
        (0, StorageState::Resident),
        (1, StorageState::Premigrated),
        (2, StorageState::Migrated),
    ];
    for (code, expected) in cases {
        assert_eq!(StorageState::from_code(code), expected, "code {code}");
    }
}

#[test]
fn from_code_treats_anything_else_as_unknown() {
    for code in [-1, 3, 42, i32::MAX, i32::MIN] {
        assert_eq!(StorageState::from_code(code), StorageState::Unknown, "code {code}");
    }
}

#[test]
fn default_state_is_unknown() {
    assert_eq!(StorageState::default(), StorageState::Unknown);
}

#[test]
fn labels_follow_the_configured_strings() {
    assert_eq!(StorageState::Resident.label(), Some("Resident"));
    assert_eq!(StorageState::Premigrated.label(), Some("Premigrated"));
    assert_eq!(StorageState::Migrated.label(), Some("Migrated"));
    assert_eq!(StorageState::Unknown.label(), None);
}

#[test]
fn colors_follow_the_state() {
    assert_eq!(StorageState::Resident.color(), Color::Green);
    assert_eq!(StorageState::Premigrated.color(), Color::Yellow);
    assert_eq!(StorageState::Migrated.color(), Color::Red);
    assert_eq!(StorageState::Unknown.color(), Color::None);
}

#[test]
fn classify_folds_the_oracle_answer() {
    let path = Path::new("/gpfs/themis/data.bin");
    assert_eq!(classify(&FixedOracle(0), path), StorageState::Resident);
    assert_eq!(classify(&FixedOracle(2), path), StorageState::Migrated);
    // An out-of-contract oracle degrades to Unknown, never a crash.
    assert_eq!(classify(&FixedOracle(77), path), StorageState::Unknown);
}

#[test]
fn command_oracle_spawn_failure_degrades_to_unknown() {
    let oracle = CommandOracle {
        program: PathBuf::from("/nonexistent/attr_check-test-binary"),
    };
    let code = oracle.check_attr(Path::new("/tmp/whatever"));
    assert_eq!(StorageState::from_code(code), StorageState::Unknown);
}
