//! Virtual shell over the archive's path table.

use log::{debug, info};

use crate::archive::ArchiveStore;
use crate::config::ShellConfig;
use crate::error::{ShellError, ShellResult};
use crate::fs::{dir_form, parent, resolve, PathEntry, PathTable};

/// Result text of `ls` when a directory has no children.
pub const EMPTY_DIRECTORY: &str = "Directory is empty.";

/// Result text of `exit`.
pub const EXIT_MESSAGE: &str = "All changes saved to the archive.";

/// Answers for `uname`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub kernel_name: String,
    pub host_name: String,
    pub kernel_version: String,
}

/// Shell state: the loaded table, its backing store and the current directory.
pub struct VirtualShell {
    user: String,
    system: SystemInfo,
    store: ArchiveStore,
    table: PathTable,
    /// Normalized, without trailing separator; root is `""`.
    cwd: String,
}

impl VirtualShell {
    /// Load the configured archive and start at root.
    pub fn open(config: &ShellConfig) -> ShellResult<Self> {
        let store = ArchiveStore::new(&config.archive);
        let table = store.load()?;
        let system = SystemInfo {
            kernel_name: config.kernel_name.clone(),
            host_name: config.host.clone(),
            kernel_version: config.kernel_version.clone(),
        };
        Ok(Self::new(config.user.clone(), system, store, table))
    }

    /// Assemble a shell from an already loaded table.
    pub fn new(user: String, system: SystemInfo, store: ArchiveStore, table: PathTable) -> Self {
        Self {
            user,
            system,
            store,
            table,
            cwd: String::new(),
        }
    }

    /// Current directory as displayed: `/` for root, otherwise `dir/`.
    pub fn current_directory(&self) -> String {
        if self.cwd.is_empty() {
            "/".to_string()
        } else {
            dir_form(&self.cwd)
        }
    }

    /// Prompt prefix, `user@host:dir$ `.
    pub fn prompt(&self) -> String {
        format!(
            "{}@{}:{}$ ",
            self.user,
            self.system.host_name,
            self.current_directory()
        )
    }

    pub fn table(&self) -> &PathTable {
        &self.table
    }

    pub fn store(&self) -> &ArchiveStore {
        &self.store
    }

    /// Immediate children of `directory` (or of the current directory).
    ///
    /// An unknown directory is just empty.
    pub fn list(&self, directory: Option<&str>) -> String {
        let target = match directory {
            Some(dir) => resolve(&self.cwd, dir),
            None => self.cwd.clone(),
        };
        let children = self.table.children_of(&target);
        if children.is_empty() {
            EMPTY_DIRECTORY.to_string()
        } else {
            children.join("\n")
        }
    }

    /// Move to `path`; `..` climbs one level and is a no-op at root.
    pub fn change_directory(&mut self, path: &str) -> ShellResult<String> {
        if path == ".." {
            self.cwd = parent(&self.cwd).to_string();
            return Ok(String::new());
        }

        let target = resolve(&self.cwd, path);
        if !target.is_empty() && !self.table.has_prefix(&dir_form(&target)) {
            return Err(ShellError::PathNotFound);
        }
        debug!("cd '{}' -> '{}'", self.cwd, target);
        self.cwd = target;
        Ok(String::new())
    }

    /// Remove the empty directory `path` from the table and the archive.
    pub fn remove_directory(&mut self, path: Option<&str>) -> ShellResult<String> {
        let path = path.ok_or(ShellError::MissingArgument("rmdir"))?;
        let target = dir_form(&resolve(&self.cwd, path));

        if self.table.has_descendants(&target) {
            return Err(ShellError::DirectoryNotEmpty(path.to_string()));
        }
        if target.is_empty() || !self.table.contains(&target) {
            return Err(ShellError::PathNotFound);
        }

        self.store.remove(&mut self.table, &target)?;
        info!("removed directory '{}'", target);
        Ok(format!("Directory '{}' has been removed.", path))
    }

    /// `uname`: no flag or `-s` gives the kernel name, `-n` the host name,
    /// `-v` the version.
    pub fn identify_system(&self, flag: Option<&str>) -> ShellResult<String> {
        match flag {
            None | Some("-s") => Ok(self.system.kernel_name.clone()),
            Some("-n") => Ok(self.system.host_name.clone()),
            Some("-v") => Ok(self.system.kernel_version.clone()),
            Some(other) => Err(ShellError::UnknownOption(other.to_string())),
        }
    }

    /// Content of the file `path`, read from the table.
    pub fn read_file(&self, path: &str) -> ShellResult<String> {
        let target = resolve(&self.cwd, path);
        match self.table.get(&target) {
            Some(PathEntry::File(data)) => Ok(String::from_utf8_lossy(data).into_owned()),
            Some(PathEntry::Directory) => Err(ShellError::IsADirectory(path.to_string())),
            None if target.is_empty() || self.table.has_prefix(&dir_form(&target)) => {
                Err(ShellError::IsADirectory(path.to_string()))
            }
            None => Err(ShellError::FileNotFound(path.to_string())),
        }
    }

    pub fn echo(&self, words: &[String]) -> String {
        words.join(" ")
    }

    /// Every mutation is already persisted, so leaving needs no extra I/O.
    pub fn exit(&self) -> String {
        info!("session closed in '{}'", self.current_directory());
        EXIT_MESSAGE.to_string()
    }
}
