//! Backing ZIP archive: loading into a `PathTable` and rewriting on removal.
//!
//! ZIP containers cannot drop members in place, so a removal builds a new
//! archive next to the original and replaces it only once fully written.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use tempfile::NamedTempFile;
use zip::{ZipArchive, ZipWriter};

use crate::error::{ShellError, ShellResult};
use crate::fs::{normalize_member, PathEntry, PathTable};

/// Exclusive owner of the archive file on disk.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    path: PathBuf,
}

impl ArchiveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing archive.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every member of the archive into a fresh table.
    ///
    /// Fails with `NotAnArchive` when the file exists but is not a ZIP
    /// container.
    pub fn load(&self) -> ShellResult<PathTable> {
        let mut archive = self.open()?;
        let mut table = PathTable::new();

        for i in 0..archive.len() {
            let mut member = archive.by_index(i)?;
            let name = normalize_member(member.name());
            if name.is_empty() {
                continue;
            }

            if member.is_dir() {
                table.insert(&name, PathEntry::Directory);
            } else {
                let mut content = Vec::new();
                member.read_to_end(&mut content)?;
                table.insert(&name, PathEntry::File(content));
            }
        }

        info!(
            "loaded {} entries from {}",
            table.len(),
            self.path.display()
        );
        Ok(table)
    }

    /// Remove every entry under `prefix` from both `table` and the archive.
    ///
    /// The archive is rewritten first; the table is only touched once the
    /// new archive has replaced the old one, so a failed rewrite leaves
    /// both views as they were. Returns the number of table entries removed.
    pub fn remove(&self, table: &mut PathTable, prefix: &str) -> ShellResult<usize> {
        let dropped = self.rewrite_without(prefix).map_err(|e| {
            error!(
                "rewrite of {} without '{}' failed: {}",
                self.path.display(),
                prefix,
                e
            );
            ShellError::ArchiveRewrite(e.to_string())
        })?;
        debug!("dropped {} archive members under '{}'", dropped, prefix);

        Ok(table.remove_prefix(prefix))
    }

    fn open(&self) -> ShellResult<ZipArchive<BufReader<File>>> {
        let file = File::open(&self.path)?;
        ZipArchive::new(BufReader::new(file))
            .map_err(|_| ShellError::NotAnArchive(self.path.clone()))
    }

    /// Copy every member not under `prefix` into a staged archive, then
    /// move it over the original. Returns how many members were dropped.
    fn rewrite_without(&self, prefix: &str) -> ShellResult<usize> {
        let mut source = self.open()?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        // Removed automatically if anything below fails.
        let mut staged = NamedTempFile::new_in(&dir)?;
        let mut dropped = 0;
        {
            let mut writer = ZipWriter::new(staged.as_file_mut());
            for i in 0..source.len() {
                let member = source.by_index_raw(i)?;
                if normalize_member(member.name()).starts_with(prefix) {
                    dropped += 1;
                    continue;
                }
                writer.raw_copy_file(member)?;
            }
            writer.finish()?;
        }
        // The staging file starts out private; the replacement keeps the original's mode.
        let permissions = std::fs::metadata(&self.path)?.permissions();
        staged.as_file().set_permissions(permissions)?;
        staged.as_file().sync_all()?;

        staged
            .persist(&self.path)
            .map_err(|e| ShellError::Io(e.error))?;
        info!("rewrote {}", self.path.display());
        Ok(dropped)
    }
}
