//! Archive-backed virtual filesystem shell
//!
//! This crate provides the core of a small shell emulator whose filesystem
//! lives inside a ZIP archive:
//! - `ArchiveStore`: loads the archive and rewrites it on removal
//! - `PathTable`: the archive's members held in memory
//! - `VirtualShell`: current directory and the command set
//! - `CommandDispatcher`: parses lines, runs them and keeps the command log
//!
//! # Architecture
//!
//! Directories are inferred from member paths: any prefix under which a
//! member lives is a directory. Only `rmdir` mutates state on disk, and it
//! persists immediately, so there is nothing to flush on exit.
//!
//! Front-ends implement `ShellConsole` and drive `run_session`; they never
//! touch the table or the archive directly.

pub mod archive;
pub mod command;
pub mod config;
pub mod console;
pub mod dispatcher;
pub mod error;
pub mod fs;
pub mod shell;

pub use archive::ArchiveStore;
pub use command::Command;
pub use config::ShellConfig;
pub use console::{run_session, HeadlessConsole, ShellConsole};
pub use dispatcher::{CommandDispatcher, CommandLog, Dispatch};
pub use error::{ShellError, ShellResult};
pub use fs::{dir_form, normalize_member, parent, resolve, PathEntry, PathTable};
pub use shell::{SystemInfo, VirtualShell, EMPTY_DIRECTORY, EXIT_MESSAGE};
