// autostart.rs
use crate::error::Result;
use crate::settings::Settings;

/// Per-user auto-start store: named command lines run at login.
///
/// No operation spans more than one entry, so callers decide the ordering.
pub trait AutostartStore {
    /// All `(name, command)` pairs whose name starts with `prefix`.
    fn list_entries(&self, prefix: &str) -> Result<Vec<(String, String)>>;

    /// Removes `name`; absent entries are not an error.
    fn delete(&self, name: &str) -> Result<()>;

    /// Creates or overwrites `name`.
    fn set(&self, name: &str, command: &str) -> Result<()>;
}

/// The store for the current platform.
#[cfg(target_os = "windows")]
pub fn platform_store(settings: &Settings) -> Box<dyn AutostartStore> {
    Box::new(RunKeyStore::new(&settings.run_key))
}

#[cfg(not(target_os = "windows"))]
pub fn platform_store(settings: &Settings) -> Box<dyn AutostartStore> {
    log::warn!(
        "No auto-start backend for {} on this platform; registrations will fail",
        settings.run_key
    );
    Box::new(UnsupportedStore)
}

#[cfg(target_os = "windows")]
pub use run_key::RunKeyStore;

#[cfg(target_os = "windows")]
mod run_key {
    use super::AutostartStore;
    use crate::error::{Error, Result};
    use std::io;
    use winreg::enums::*;
    use winreg::types::FromRegValue;
    use winreg::RegKey;

    /// `HKEY_CURRENT_USER\<path>`, usually the `Run` key.
    pub struct RunKeyStore {
        path: String,
    }

    impl RunKeyStore {
        pub fn new(path: &str) -> Self {
            Self {
                path: path.to_string(),
            }
        }

        fn open(&self, op: &'static str, name: &str) -> Result<RegKey> {
            let hkcu = RegKey::predef(HKEY_CURRENT_USER);
            let (key, _) = hkcu
                .create_subkey(&self.path)
                .map_err(|e| Error::registry(op, name, e))?;
            Ok(key)
        }
    }

    impl AutostartStore for RunKeyStore {
        fn list_entries(&self, prefix: &str) -> Result<Vec<(String, String)>> {
            let key = self.open("enumerate", prefix)?;
            let mut entries = Vec::new();

            // Collected up front so later deletes cannot shift enumeration.
            for value in key.enum_values() {
                let (name, value) = value.map_err(|e| Error::registry("enumerate", prefix, e))?;
                if name.starts_with(prefix) {
                    let command = String::from_reg_value(&value).unwrap_or_default();
                    entries.push((name, command));
                }
            }

            Ok(entries)
        }

        fn delete(&self, name: &str) -> Result<()> {
            let key = self.open("delete", name)?;
            match key.delete_value(name) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(Error::registry("delete", name, e)),
            }
        }

        fn set(&self, name: &str, command: &str) -> Result<()> {
            let key = self.open("set", name)?;
            key.set_value(name, &command)
                .map_err(|e| Error::registry("set", name, e))
        }
    }
}

/// Stand-in for platforms without a Run key; every operation fails.
#[cfg(not(target_os = "windows"))]
pub struct UnsupportedStore;

#[cfg(not(target_os = "windows"))]
impl UnsupportedStore {
    fn unsupported(op: &'static str, name: &str) -> crate::error::Error {
        crate::error::Error::registry(
            op,
            name,
            std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "auto-start registration is only available on Windows",
            ),
        )
    }
}

#[cfg(not(target_os = "windows"))]
impl AutostartStore for UnsupportedStore {
    fn list_entries(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        Err(Self::unsupported("enumerate", prefix))
    }

    fn delete(&self, name: &str) -> Result<()> {
        Err(Self::unsupported("delete", name))
    }

    fn set(&self, name: &str, _command: &str) -> Result<()> {
        Err(Self::unsupported("set", name))
    }
}

#[cfg(test)]
pub use memory::MemoryStore;
