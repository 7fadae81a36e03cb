//! Session storage slots
//!
//! A slot holds exactly one string value under a fixed name. The session store
//! receives its slot at construction, so nothing here is an ambient global.
//!
//! # Backends
//!
//! - [`MemoryStorage`] keeps the value in memory. Clones share the same slot,
//!   which lets tests inspect or corrupt what the session wrote.
//! - [`FileStorage`] keeps the value in a JSON file, by default under the user's
//!   data directory (e.g. `~/.local/share/xfboard/<key>.json`).
//! - `WebStorage` (feature `web`) keeps the value in the browser tab's
//!   `sessionStorage`, the tab-scoped slot the session is designed around.

use crate::core::error::CoreResult;
use directories::ProjectDirs;
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

/// A single-value, last-writer-wins storage slot
pub trait SessionStorage {
    /// Read the slot. `Ok(None)` means the slot is absent.
    fn load(&self) -> CoreResult<Option<String>>;

    /// Overwrite the slot
    fn save(&mut self, contents: &str) -> CoreResult<()>;

    /// Delete the slot. Deleting an absent slot is not an error.
    fn clear(&mut self) -> CoreResult<()>;
}

/// In-memory slot with shared ownership
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    /// Slot pre-filled with `contents`
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(contents.into()))),
        }
    }

    /// Current value, bypassing the trait
    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Overwrite the value directly (simulates a foreign writer)
    pub fn set_contents(&self, contents: Option<String>) {
        *self.slot.borrow_mut() = contents;
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> CoreResult<Option<String>> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&mut self, contents: &str) -> CoreResult<()> {
        *self.slot.borrow_mut() = Some(contents.to_string());
        Ok(())
    }

    fn clear(&mut self) -> CoreResult<()> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}

/// File-backed slot
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Slot named `key` in the user's data directory
    ///
    /// Falls back to `./<key>.json` if the system data dir cannot be found.
    pub fn for_key(key: &str) -> Self {
        let filename = format!("{key}.json");
        let path = match ProjectDirs::from("com", "trilltino", "xfboard") {
            Some(dirs) => dirs.data_dir().join(filename),
            None => PathBuf::from(filename),
        };
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> CoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, contents: &str) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, contents)?;
        debug!("[STORAGE] Wrote {} bytes to {:?}", contents.len(), self.path);
        Ok(())
    }

    fn clear(&mut self) -> CoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("[STORAGE] Removed {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(feature = "web")]
pub use web::WebStorage;

#[cfg(feature = "web")]
mod web {
    use super::SessionStorage;
    use crate::core::error::{CoreError, CoreResult};

    /// `window.sessionStorage` slot, scoped to the browser tab
    #[derive(Debug, Clone)]
    pub struct WebStorage {
        key: String,
    }

    impl WebStorage {
        pub fn session(key: impl Into<String>) -> Self {
            Self { key: key.into() }
        }

        fn storage() -> CoreResult<web_sys::Storage> {
            let window = web_sys::window().ok_or_else(|| CoreError::StorageUnavailable {
                message: "no global window".to_string(),
            })?;
            window
                .session_storage()
                .map_err(|e| CoreError::StorageUnavailable {
                    message: format!("{e:?}"),
                })?
                .ok_or_else(|| CoreError::StorageUnavailable {
                    message: "sessionStorage disabled".to_string(),
                })
        }
    }

    impl SessionStorage for WebStorage {
        fn load(&self) -> CoreResult<Option<String>> {
            Self::storage()?
                .get_item(&self.key)
                .map_err(|e| CoreError::StorageUnavailable {
                    message: format!("{e:?}"),
                })
        }

        fn save(&mut self, contents: &str) -> CoreResult<()> {
            Self::storage()?
                .set_item(&self.key, contents)
                .map_err(|e| CoreError::StorageUnavailable {
                    message: format!("{e:?}"),
                })
        }

        fn clear(&mut self) -> CoreResult<()> {
            Self::storage()?
                .remove_item(&self.key)
                .map_err(|e| CoreError::StorageUnavailable {
                    message: format!("{e:?}"),
                })
        }
    }
}
