// autorun.rs
use crate::config_store::ConfigStore;
use crate::launcher::{LaunchReport, Launcher, Spawner};
use crate::settings::Settings;
use crate::tray::{TrayTask, TRAY_TOOLTIP};

/// Login-time entry point. Never opens a window or dialog.
///
/// `slot` is the index baked into the auto-start entry that started us;
/// `None` launches the whole list.
pub fn run(settings: &Settings, slot: Option<usize>) {
    let store = ConfigStore::new(&settings.config_path);
    let report = launch_configured(&store, &Launcher::new(), slot);
    log::info!(
        "Autorun finished launching: {} started, {} failed",
        report.launched.len(),
        report.failures.len()
    );

    if !shows_tray(slot) {
        return;
    }

    // Launches are already done; a tray failure only costs the indicator.
    match TrayTask::start(TRAY_TOOLTIP) {
        Ok(task) => {
            task.wait_for_exit();
            if let Err(e) = task.shutdown() {
                log::error!("{}", e);
            }
            log::info!("Autorun exiting");
        }
        Err(e) => log::error!("{}", e),
    }
}

/// Loads the list and starts either every entry or just `slot`. A corrupt
/// config launches nothing.
pub fn launch_configured<S: Spawner>(
    store: &ConfigStore,
    launcher: &Launcher<S>,
    slot: Option<usize>,
) -> LaunchReport {
    let apps = match store.load() {
        Ok(apps) => apps,
        Err(e) => {
            log::error!("Autorun skipped: {}", e);
            return LaunchReport::default();
        }
    };

    match slot {
        Some(index) => launcher.launch_one(&apps, index),
        None => launcher.launch_all(&apps),
    }
}

/// One indicator per login: the first slot (or a slot-less run) owns it.
pub fn shows_tray(slot: Option<usize>) -> bool {
    matches!(slot, None | Some(0))
}
