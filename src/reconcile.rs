// reconcile.rs
use crate::autostart::AutostartStore;
use crate::error::Error;
use crate::settings::Settings;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub removed: Vec<String>,
    pub written: Vec<String>,
    pub failures: Vec<Error>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Rewrites every prefixed auto-start entry so the store mirrors `apps`:
/// exactly one `prefix+i` per index, nothing left over from earlier saves.
///
/// Clearing is best effort. A failed write is recorded and the next index is
/// still attempted.
pub fn reconcile(
    store: &dyn AutostartStore,
    settings: &Settings,
    apps: &[PathBuf],
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    match store.list_entries(&settings.prefix) {
        Ok(entries) => {
            for (name, _) in entries {
                match store.delete(&name) {
                    Ok(()) => report.removed.push(name),
                    Err(e) => {
                        log::warn!("Could not remove stale entry: {}", e);
                        report.failures.push(e);
                    }
                }
            }
        }
        Err(e) => {
            log::warn!("Could not enumerate auto-start entries: {}", e);
            report.failures.push(e);
        }
    }

    for (index, app) in apps.iter().enumerate() {
        let name = settings.entry_name(index);
        let command = settings.autorun_command(index);
        match store.set(&name, &command) {
            Ok(()) => {
                log::info!("Registered {} for {}", name, app.display());
                report.written.push(name);
            }
            Err(e) => {
                log::error!("{}", e);
                report.failures.push(e);
            }
        }
    }

    report
}
