//! Best-effort background maintenance: daily metrics rollup and nightly
//! backup on a sleep-loop thread. Fire-and-forget; not synchronized with
//! foreground operations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use railguard_core::config::{BackupConfig, MonitoringConfig};
use railguard_core::epoch_secs;
use railguard_storage::DatabaseManager;

use crate::monitor::MonitoringHooks;
use crate::rollback::RollbackSystem;

/// Handle to the running maintenance thread.
pub struct MaintenanceHandle {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl MaintenanceHandle {
    /// Signal the loop to stop and wait for it to exit.
    pub fn shutdown(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MaintenanceHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Spawn the maintenance loop.
///
/// `tick` is the sleep interval between passes (a day in production,
/// milliseconds in tests). Each pass rolls up today's metrics and creates
/// a backup; failures are logged and the loop continues.
pub fn spawn(
    root: std::path::PathBuf,
    db_path: std::path::PathBuf,
    monitoring: MonitoringConfig,
    backup: BackupConfig,
    tick: Duration,
) -> MaintenanceHandle {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = stop.clone();

    let handle = std::thread::spawn(move || {
        // The loop owns its connections; foreground handles are untouched.
        let db = match DatabaseManager::open(&db_path) {
            Ok(db) => db,
            Err(e) => {
                tracing::error!(error = %e, "maintenance thread could not open database");
                return;
            }
        };
        let rollback = RollbackSystem::new(&root, backup);

        while !stop_flag.load(Ordering::Relaxed) {
            let monitor = MonitoringHooks::new(&db, monitoring.clone());
            if let Err(e) = monitor.rollup_day(epoch_secs()) {
                tracing::warn!(error = %e, "daily rollup failed");
            }
            if let Err(e) = rollback.create_backup(None) {
                tracing::warn!(error = %e, "scheduled backup failed");
            }

            // Sleep in short slices so shutdown is responsive.
            let mut remaining = tick;
            let slice = Duration::from_millis(50);
            while remaining > Duration::ZERO && !stop_flag.load(Ordering::Relaxed) {
                let nap = remaining.min(slice);
                std::thread::sleep(nap);
                remaining = remaining.saturating_sub(nap);
            }
        }
    });

    MaintenanceHandle {
        stop,
        handle: Some(handle),
    }
}
