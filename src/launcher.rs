// launcher.rs
use crate::error::Error;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Starts one program without waiting for it; returns its pid.
pub trait Spawner {
    fn spawn(&self, program: &Path) -> io::Result<u32>;
}

/// Real processes, detached from our stdio and run from their own directory.
pub struct ProcessSpawner;

impl Spawner for ProcessSpawner {
    fn spawn(&self, program: &Path) -> io::Result<u32> {
        let mut command = Command::new(program);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        if let Some(dir) = program.parent().filter(|d| d.is_dir()) {
            command.current_dir(dir);
        }

        // The child handle is dropped on purpose: no wait, no supervision.
        let child = command.spawn()?;
        Ok(child.id())
    }
}

#[derive(Debug, Default)]
pub struct LaunchReport {
    pub launched: Vec<(PathBuf, u32)>,
    pub failures: Vec<Error>,
}

impl LaunchReport {
    pub fn attempted(&self) -> usize {
        self.launched.len() + self.failures.len()
    }
}

pub struct Launcher<S: Spawner = ProcessSpawner> {
    spawner: S,
}

impl Launcher {
    pub fn new() -> Self {
        Self::with_spawner(ProcessSpawner)
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Spawner> Launcher<S> {
    pub fn with_spawner(spawner: S) -> Self {
        Self { spawner }
    }

    /// Tries every entry in list order; one failure never skips the rest.
    pub fn launch_all(&self, apps: &[PathBuf]) -> LaunchReport {
        let mut report = LaunchReport::default();
        for app in apps {
            self.launch_into(app, &mut report);
        }
        report
    }

    /// Launches only `apps[index]`. Out-of-range slots launch nothing.
    pub fn launch_one(&self, apps: &[PathBuf], index: usize) -> LaunchReport {
        let mut report = LaunchReport::default();
        match apps.get(index) {
            Some(app) => self.launch_into(app, &mut report),
            None => log::warn!(
                "Autorun slot {} is out of range ({} app(s) configured)",
                index,
                apps.len()
            ),
        }
        report
    }

    fn launch_into(&self, app: &Path, report: &mut LaunchReport) {
        match self.spawner.spawn(app) {
            Ok(pid) => {
                log::info!("Launched {} (pid {})", app.display(), pid);
                report.launched.push((app.to_path_buf(), pid));
            }
            Err(source) => {
                let err = Error::Launch {
                    path: app.to_path_buf(),
                    source,
                };
                log::error!("{}", err);
                report.failures.push(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every attempt; paths containing "missing" fail.
    #[derive(Default)]
    struct FakeSpawner {
        attempts: RefCell<Vec<PathBuf>>,
    }

    impl Spawner for FakeSpawner {
        fn spawn(&self, program: &Path) -> io::Result<u32> {
            self.attempts.borrow_mut().push(program.to_path_buf());
            if program.to_string_lossy().contains("missing") {
                Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
            } else {
                Ok(1000 + self.attempts.borrow().len() as u32)
            }
        }
    }

    #[test]
    fn one_bad_path_does_not_stop_the_others() {
        let launcher = Launcher::with_spawner(FakeSpawner::default());
        let apps = vec![
            PathBuf::from(r"C:\missing.exe"),
            PathBuf::from(r"C:\A.exe"),
            PathBuf::from(r"C:\B.exe"),
        ];

        let report = launcher.launch_all(&apps);

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.launched.len(), 2);
        assert_eq!(*launcher.spawner.attempts.borrow(), apps);
    }

    #[test]
    fn launch_one_picks_the_slot() {
        let launcher = Launcher::with_spawner(FakeSpawner::default());
        let apps = vec![PathBuf::from("/opt/a"), PathBuf::from("/opt/b")];

        let report = launcher.launch_one(&apps, 1);

        assert_eq!(report.attempted(), 1);
        assert_eq!(report.launched[0].0, PathBuf::from("/opt/b"));
    }

    #[test]
    fn launch_one_out_of_range_attempts_nothing() {
        let launcher = Launcher::with_spawner(FakeSpawner::default());
        let report = launcher.launch_one(&[PathBuf::from("/opt/a")], 4);

        assert_eq!(report.attempted(), 0);
        assert!(launcher.spawner.attempts.borrow().is_empty());
    }

    #[test]
    fn real_spawner_reports_nonexistent_program() {
        let dir = tempfile::TempDir::new().unwrap();
        let launcher = Launcher::new();

        let report = launcher.launch_all(&[dir.path().join("does-not-exist.exe")]);

        assert!(matches!(report.failures.as_slice(), [Error::Launch { .. }]));
    }
}
