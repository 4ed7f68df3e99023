// settings.rs
use std::io;
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "startup-launcher";
pub const CONFIG_FILE_NAME: &str = "startup_apps.json";
pub const LOG_FILE_NAME: &str = "startup-launcher.log";
pub const CONFIG_ENV_VAR: &str = "STARTUP_LAUNCHER_CONFIG";

pub const RUN_KEY_PATH: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";
pub const ENTRY_PREFIX: &str = "MyStartupApp_";

/// Locations and names shared by the stores, passed in at construction.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: PathBuf,
    pub log_path: PathBuf,
    pub run_key: String,
    pub prefix: String,
    /// Executable the auto-start entries point back to.
    pub exe_path: PathBuf,
}

impl Settings {
    pub fn from_env() -> io::Result<Self> {
        let app_dir = Self::default_app_dir();
        let config_path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| app_dir.join(CONFIG_FILE_NAME));

        Ok(Self {
            config_path,
            log_path: app_dir.join(LOG_FILE_NAME),
            run_key: RUN_KEY_PATH.to_string(),
            prefix: ENTRY_PREFIX.to_string(),
            exe_path: std::env::current_exe()?,
        })
    }

    fn default_app_dir() -> PathBuf {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    }

    pub fn entry_name(&self, index: usize) -> String {
        format!("{}{}", self.prefix, index)
    }

    /// Command line registered for slot `index`; it re-enters this program in
    /// autorun mode rather than starting the target directly.
    pub fn autorun_command(&self, index: usize) -> String {
        autorun_command(&self.exe_path, index)
    }
}

pub fn autorun_command(exe: &Path, index: usize) -> String {
    format!("\"{}\" --autorun {}", exe.display(), index)
}
