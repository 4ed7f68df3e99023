// session.rs
use crate::autostart::AutostartStore;
use crate::config_store::{AppList, ConfigStore};
use crate::error::{Error, Result};
use crate::launcher::{LaunchReport, Launcher, Spawner};
use crate::reconcile::{reconcile, ReconcileReport};
use crate::settings::Settings;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Editing,
    Saving,
}

/// Editor state behind the window: the in-memory list and its selection.
pub struct Session {
    apps: AppList,
    selected: Option<usize>,
    state: SessionState,
    load_warning: Option<String>,
}

pub struct SaveOutcome {
    pub registry: ReconcileReport,
    pub launch: LaunchReport,
}

impl SaveOutcome {
    pub fn is_clean(&self) -> bool {
        self.registry.is_clean() && self.launch.failures.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut message = format!(
            "Apps saved and launched!\n\nRegistered: {} (replaced {})\nLaunched: {} of {}",
            self.registry.written.len(),
            self.registry.removed.len(),
            self.launch.launched.len(),
            self.launch.attempted()
        );

        let failures = self.registry.failures.iter().chain(&self.launch.failures);
        for failure in failures {
            message.push_str(&format!("\n❌ {}", failure));
        }
        message
    }
}

impl Session {
    pub fn new(apps: AppList) -> Self {
        Self {
            apps,
            selected: None,
            state: SessionState::Idle,
            load_warning: None,
        }
    }

    /// Loads the stored list. An unreadable file leaves the editor empty with
    /// a warning instead of pretending nothing was configured.
    pub fn open(store: &ConfigStore) -> Self {
        match store.load() {
            Ok(apps) => Self::new(apps),
            Err(e) => {
                log::error!("{}", e);
                let mut session = Self::new(Vec::new());
                session.load_warning = Some(match e {
                    Error::ConfigCorrupt { .. } => format!(
                        "{}\n\nSaving will replace the unreadable file.",
                        e
                    ),
                    other => other.to_string(),
                });
                session
            }
        }
    }

    pub fn apps(&self) -> &[PathBuf] {
        &self.apps
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    pub fn select(&mut self, index: usize) {
        if index < self.apps.len() {
            self.selected = Some(index);
        }
    }

    /// Appends `path` unless it is empty or already listed; returns whether
    /// the list changed. Cancelled picks and duplicates are not errors.
    pub fn add(&mut self, path: PathBuf) -> bool {
        if path.as_os_str().is_empty() || self.apps.contains(&path) {
            return false;
        }
        self.apps.push(path);
        self.state = SessionState::Editing;
        true
    }

    pub fn remove_selected(&mut self) -> Option<PathBuf> {
        let index = self.selected.take()?;
        if index >= self.apps.len() {
            return None;
        }
        self.state = SessionState::Editing;
        Some(self.apps.remove(index))
    }

    /// Config write, then registry reconcile, then launch. Only the config
    /// write can fail the save; that leaves the edits in place.
    pub fn save<S: Spawner>(
        &mut self,
        store: &ConfigStore,
        autostart: &dyn AutostartStore,
        settings: &Settings,
        launcher: &Launcher<S>,
    ) -> Result<SaveOutcome> {
        self.state = SessionState::Saving;

        if let Err(e) = store.save(&self.apps) {
            log::error!("{}", e);
            self.state = SessionState::Editing;
            return Err(e);
        }
        self.load_warning = None;

        let registry = reconcile(autostart, settings, &self.apps);
        let launch = launcher.launch_all(&self.apps);

        self.state = SessionState::Idle;
        Ok(SaveOutcome { registry, launch })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autostart::MemoryStore;
    use std::collections::BTreeMap;
    use std::io;
    use std::path::Path;
    use tempfile::TempDir;

    struct NoopSpawner;

    impl Spawner for NoopSpawner {
        fn spawn(&self, _program: &Path) -> io::Result<u32> {
            Ok(1)
        }
    }

    fn settings(dir: &Path) -> Settings {
        Settings {
            config_path: dir.join("startup_apps.json"),
            log_path: dir.join("startup-launcher.log"),
            run_key: crate::settings::RUN_KEY_PATH.to_string(),
            prefix: crate::settings::ENTRY_PREFIX.to_string(),
            exe_path: PathBuf::from(r"C:\Tools\launcher.exe"),
        }
    }

    #[test]
    fn add_ignores_duplicates_until_removed() {
        let mut session = Session::new(Vec::new());
        assert!(session.add(PathBuf::from(r"C:\A.exe")));
        assert!(!session.add(PathBuf::from(r"C:\A.exe")));
        assert_eq!(session.apps().len(), 1);

        session.select(0);
        session.remove_selected();
        assert!(session.add(PathBuf::from(r"C:\A.exe")));
        assert_eq!(session.apps().len(), 1);
    }

    #[test]
    fn add_ignores_empty_pick() {
        let mut session = Session::new(Vec::new());
        assert!(!session.add(PathBuf::new()));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn remove_without_selection_is_noop() {
        let mut session = Session::new(vec![PathBuf::from("/a")]);
        assert_eq!(session.remove_selected(), None);
        assert_eq!(session.apps().len(), 1);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn edits_move_to_editing_and_save_returns_to_idle() {
        let dir = TempDir::new().unwrap();
        let s = settings(dir.path());
        let store = ConfigStore::new(&s.config_path);
        let registry = MemoryStore::default();
        let launcher = Launcher::with_spawner(NoopSpawner);

        let mut session = Session::new(Vec::new());
        session.add(PathBuf::from("/opt/a"));
        assert_eq!(session.state(), SessionState::Editing);

        let outcome = session.save(&store, &registry, &s, &launcher).unwrap();
        assert!(outcome.is_clean());
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(store.load().unwrap(), vec![PathBuf::from("/opt/a")]);
    }

    #[test]
    fn removal_shifts_registry_slots() {
        let dir = TempDir::new().unwrap();
        let s = settings(dir.path());
        let store = ConfigStore::new(&s.config_path);
        let registry = MemoryStore::default();
        let launcher = Launcher::with_spawner(NoopSpawner);

        let mut session = Session::new(Vec::new());
        session.add(PathBuf::from(r"C:\A.exe"));
        session.add(PathBuf::from(r"C:\B.exe"));
        session.save(&store, &registry, &s, &launcher).unwrap();

        let expected: BTreeMap<String, String> = [
            ("MyStartupApp_0".to_string(), s.autorun_command(0)),
            ("MyStartupApp_1".to_string(), s.autorun_command(1)),
        ]
        .into_iter()
        .collect();
        assert_eq!(registry.snapshot(), expected);

        session.select(0);
        session.remove_selected();
        session.save(&store, &registry, &s, &launcher).unwrap();

        let expected: BTreeMap<String, String> =
            [("MyStartupApp_0".to_string(), s.autorun_command(0))]
                .into_iter()
                .collect();
        assert_eq!(registry.snapshot(), expected);
        // Slot 0 now resolves to B at the next login.
        assert_eq!(store.load().unwrap(), vec![PathBuf::from(r"C:\B.exe")]);
    }

    #[test]
    fn corrupt_config_opens_empty_with_warning() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("startup_apps.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let session = Session::open(&ConfigStore::new(&path));

        assert!(session.apps().is_empty());
        assert!(session.load_warning().is_some());
    }

    #[test]
    fn failed_config_write_keeps_edits_and_skips_registry() {
        let dir = TempDir::new().unwrap();
        let s = settings(dir.path());
        // A directory where the file should be makes the rename fail.
        let blocked = dir.path().join("blocked");
        std::fs::create_dir(&blocked).unwrap();
        std::fs::write(blocked.join("keep"), "x").unwrap();
        let store = ConfigStore::new(&blocked);
        let registry = MemoryStore::default();
        let launcher = Launcher::with_spawner(NoopSpawner);

        let mut session = Session::new(Vec::new());
        session.add(PathBuf::from("/opt/a"));

        assert!(session.save(&store, &registry, &s, &launcher).is_err());
        assert_eq!(session.state(), SessionState::Editing);
        assert_eq!(session.apps().len(), 1);
        assert!(registry.snapshot().is_empty());
    }
}
