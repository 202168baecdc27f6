//! Backup/rollback tests: byte-for-byte restore, the mandatory
//! pre-rollback backup, retention pruning, and the empty emergency path.

use std::fs;
use std::path::Path;

use railguard_core::config::BackupConfig;
use railguard_rails::RollbackSystem;
use tempfile::TempDir;

fn config() -> BackupConfig {
    BackupConfig {
        tracked_directories: vec!["src".to_string()],
        tracked_files: vec!["settings.toml".to_string()],
        datastore_glob: Some("*.db".to_string()),
        ..Default::default()
    }
}

fn seed_project(root: &Path) {
    fs::create_dir_all(root.join("src/nested")).unwrap();
    fs::write(root.join("src/main.txt"), "original main").unwrap();
    fs::write(root.join("src/nested/deep.txt"), "original deep").unwrap();
    fs::write(root.join("settings.toml"), "level = 1").unwrap();
    fs::write(root.join("state.db"), "db-bytes").unwrap();
}

#[test]
fn backup_captures_tracked_content() {
    let dir = TempDir::new().unwrap();
    seed_project(dir.path());
    let system = RollbackSystem::new(dir.path(), config());

    let backup = system.create_backup(Some("snap-1")).unwrap();
    assert_eq!(
        fs::read_to_string(backup.join("src/nested/deep.txt")).unwrap(),
        "original deep"
    );
    assert_eq!(
        fs::read_to_string(backup.join("settings.toml")).unwrap(),
        "level = 1"
    );
    // Datastore glob picked up the sqlite-style file.
    assert_eq!(fs::read_to_string(backup.join("state.db")).unwrap(), "db-bytes");
    assert!(backup.join("manifest.json").exists());
}

#[test]
fn duplicate_backup_names_are_rejected() {
    let dir = TempDir::new().unwrap();
    seed_project(dir.path());
    let system = RollbackSystem::new(dir.path(), config());
    system.create_backup(Some("snap-1")).unwrap();
    assert!(system.create_backup(Some("snap-1")).is_err());
}

#[test]
fn rollback_restores_bytes_and_takes_a_pre_rollback_backup() {
    let dir = TempDir::new().unwrap();
    seed_project(dir.path());
    let system = RollbackSystem::new(dir.path(), config());
    system.create_backup(Some("snap-1")).unwrap();

    fs::write(dir.path().join("src/main.txt"), "mutated").unwrap();
    fs::write(dir.path().join("settings.toml"), "level = 9").unwrap();
    fs::remove_file(dir.path().join("src/nested/deep.txt")).unwrap();

    assert!(system.rollback_to("snap-1").unwrap());

    assert_eq!(
        fs::read_to_string(dir.path().join("src/main.txt")).unwrap(),
        "original main"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("src/nested/deep.txt")).unwrap(),
        "original deep"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("settings.toml")).unwrap(),
        "level = 1"
    );

    // The restore itself produced a safety backup: net two backups now.
    let backups = system.list_backups().unwrap();
    assert_eq!(backups.len(), 2);
    assert!(backups.iter().any(|b| b.starts_with("pre-rollback-")));
}

#[test]
fn rollback_to_missing_backup_fails() {
    let dir = TempDir::new().unwrap();
    seed_project(dir.path());
    let system = RollbackSystem::new(dir.path(), config());
    assert!(system.rollback_to("no-such-backup").is_err());
}

#[test]
fn emergency_rollback_without_backups_returns_false() {
    let dir = TempDir::new().unwrap();
    seed_project(dir.path());
    let system = RollbackSystem::new(dir.path(), config());
    assert!(!system.emergency_rollback().unwrap());
}

#[test]
fn emergency_rollback_uses_the_newest_backup() {
    let dir = TempDir::new().unwrap();
    seed_project(dir.path());
    let system = RollbackSystem::new(dir.path(), config());

    system.create_backup(Some("older")).unwrap();
    fs::write(dir.path().join("src/main.txt"), "newer content").unwrap();
    std::thread::sleep(std::time::Duration::from_millis(1100));
    system.create_backup(Some("newer")).unwrap();

    fs::write(dir.path().join("src/main.txt"), "broken").unwrap();
    assert!(system.emergency_rollback().unwrap());
    assert_eq!(
        fs::read_to_string(dir.path().join("src/main.txt")).unwrap(),
        "newer content"
    );
}

#[test]
fn retention_prunes_oldest_backups() {
    let dir = TempDir::new().unwrap();
    seed_project(dir.path());
    let cfg = BackupConfig {
        max_backups: Some(2),
        ..config()
    };
    let system = RollbackSystem::new(dir.path(), cfg);

    // Distinct manifest timestamps keep the ordering unambiguous.
    for name in ["first", "second", "third"] {
        system.create_backup(Some(name)).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1100));
    }

    let backups = system.list_backups().unwrap();
    assert_eq!(backups, vec!["third".to_string(), "second".to_string()]);
}

#[test]
fn rollback_at_retention_cap_keeps_its_restore_source() {
    let dir = TempDir::new().unwrap();
    seed_project(dir.path());
    let cfg = BackupConfig {
        max_backups: Some(1),
        ..config()
    };
    let system = RollbackSystem::new(dir.path(), cfg);

    system.create_backup(Some("snap")).unwrap();
    fs::write(dir.path().join("src/main.txt"), "mutated").unwrap();

    // The pre-rollback backup is newer than "snap", so retention would
    // otherwise pick "snap" (the restore source) for deletion.
    std::thread::sleep(std::time::Duration::from_millis(1100));
    assert!(system.rollback_to("snap").unwrap());

    assert_eq!(
        fs::read_to_string(dir.path().join("src/main.txt")).unwrap(),
        "original main"
    );
    let backups = system.list_backups().unwrap();
    assert!(backups.iter().any(|b| b == "snap"));
}

#[test]
fn list_backups_is_newest_first() {
    let dir = TempDir::new().unwrap();
    seed_project(dir.path());
    let system = RollbackSystem::new(dir.path(), config());

    system.create_backup(Some("a")).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(1100));
    system.create_backup(Some("b")).unwrap();

    let backups = system.list_backups().unwrap();
    assert_eq!(backups, vec!["b".to_string(), "a".to_string()]);
}
