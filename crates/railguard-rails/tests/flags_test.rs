//! Feature flag store tests: rollout stability, the kill switch, and the
//! write-through/TTL reload behavior.

use railguard_rails::flags::{FeatureFlag, FeatureFlagStore};
use tempfile::TempDir;

fn store(dir: &TempDir, ttl_secs: u64) -> FeatureFlagStore {
    FeatureFlagStore::open(&dir.path().join("feature_flags.json"), ttl_secs).unwrap()
}

fn enabled_flag(rollout: u8) -> FeatureFlag {
    FeatureFlag {
        enabled: true,
        rollout_percentage: rollout,
        ..Default::default()
    }
}

#[test]
fn unknown_flags_are_off() {
    let dir = TempDir::new().unwrap();
    let mut flags = store(&dir, 60);
    assert!(!flags.is_enabled("never_defined", Some("u1")));
}

#[test]
fn full_rollout_is_on_for_everyone() {
    let dir = TempDir::new().unwrap();
    let mut flags = store(&dir, 60);
    flags.define("citations", enabled_flag(100)).unwrap();
    assert!(flags.is_enabled("citations", Some("u1")));
    assert!(flags.is_enabled("citations", None));
}

#[test]
fn zero_rollout_is_off_for_everyone() {
    let dir = TempDir::new().unwrap();
    let mut flags = store(&dir, 60);
    flags.define("citations", enabled_flag(0)).unwrap();
    assert!(!flags.is_enabled("citations", Some("u1")));
    assert!(!flags.is_enabled("citations", None));
}

#[test]
fn rollout_decision_is_stable_per_user() {
    let dir = TempDir::new().unwrap();
    let mut flags = store(&dir, 60);
    flags.define("citations", enabled_flag(50)).unwrap();
    for user in ["alice", "bob", "carol", "dave"] {
        let first = flags.is_enabled("citations", Some(user));
        for _ in 0..10 {
            assert_eq!(flags.is_enabled("citations", Some(user)), first);
        }
    }
}

#[test]
fn partial_rollout_hits_roughly_its_percentage() {
    let dir = TempDir::new().unwrap();
    let mut flags = store(&dir, 60);
    flags.define("citations", enabled_flag(50)).unwrap();
    let hits = (0..1000)
        .filter(|i| flags.is_enabled("citations", Some(&format!("user-{i}"))))
        .count();
    assert!((350..=650).contains(&hits), "hits = {hits}");
}

#[test]
fn kill_switch_overrides_everything() {
    let dir = TempDir::new().unwrap();
    let mut flags = store(&dir, 60);
    flags.define("citations", enabled_flag(100)).unwrap();
    assert!(flags.is_enabled("citations", Some("u1")));

    flags.emergency_kill_switch("citations").unwrap();
    assert!(!flags.is_enabled("citations", Some("u1")));
    assert_eq!(flags.all_flags()["citations"].status, "killed");
}

#[test]
fn disable_and_reenable_persist() {
    let dir = TempDir::new().unwrap();
    let mut flags = store(&dir, 60);
    flags.define("citations", enabled_flag(100)).unwrap();

    flags.disable("citations").unwrap();
    assert!(!flags.is_enabled("citations", Some("u1")));
    flags.enable("citations").unwrap();
    assert!(flags.is_enabled("citations", Some("u1")));
}

#[test]
fn mutating_an_unknown_flag_fails() {
    let dir = TempDir::new().unwrap();
    let mut flags = store(&dir, 60);
    assert!(flags.enable("never_defined").is_err());
}

#[test]
fn writes_are_visible_to_a_second_store() {
    let dir = TempDir::new().unwrap();
    let mut writer = store(&dir, 60);
    writer.define("citations", enabled_flag(100)).unwrap();

    let mut reader = store(&dir, 60);
    assert!(reader.is_enabled("citations", Some("u1")));
}

#[test]
fn ttl_expiry_picks_up_external_edits() {
    let dir = TempDir::new().unwrap();
    let mut writer = store(&dir, 60);
    writer.define("citations", enabled_flag(100)).unwrap();

    // Zero TTL forces a reload on every evaluation.
    let mut reader = store(&dir, 0);
    assert!(reader.is_enabled("citations", Some("u1")));

    writer.disable("citations").unwrap();
    assert!(!reader.is_enabled("citations", Some("u1")));
}

#[test]
fn rollout_percentage_is_clamped() {
    let dir = TempDir::new().unwrap();
    let mut flags = store(&dir, 60);
    flags.define("citations", enabled_flag(100)).unwrap();
    flags.set_rollout_percentage("citations", 250).unwrap();
    assert_eq!(flags.all_flags()["citations"].rollout_percentage, 100);
}
