//! Routes command lines to the shell and records them in the command log.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::command::Command;
use crate::error::ShellResult;
use crate::shell::VirtualShell;

/// Append-only log of prompts, commands and their results.
pub struct CommandLog<W: Write> {
    sink: W,
}

impl CommandLog<File> {
    /// Open (or create) a log file for appending.
    pub fn open(path: &Path) -> ShellResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> CommandLog<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Write the prompt line and, if non-empty, the result.
    pub fn append(&mut self, prompt: &str, command: &str, output: &str) -> ShellResult<()> {
        writeln!(self.sink, "{}{}", prompt, command)?;
        if !output.is_empty() {
            writeln!(self.sink, "{}", output)?;
        }
        self.sink.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Result of dispatching one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Text to show the user; may be empty.
    pub output: String,
    /// The session should end after this line.
    pub exit: bool,
}

/// Parses lines, runs them against the shell and logs every one.
pub struct CommandDispatcher<W: Write> {
    shell: VirtualShell,
    log: CommandLog<W>,
}

impl<W: Write> CommandDispatcher<W> {
    pub fn new(shell: VirtualShell, log: CommandLog<W>) -> Self {
        Self { shell, log }
    }

    /// Prompt for the next line, reflecting the current directory.
    pub fn prompt(&self) -> String {
        self.shell.prompt()
    }

    pub fn shell(&self) -> &VirtualShell {
        &self.shell
    }

    pub fn log(&self) -> &CommandLog<W> {
        &self.log
    }

    pub fn into_parts(self) -> (VirtualShell, CommandLog<W>) {
        (self.shell, self.log)
    }

    /// Run one line.
    ///
    /// Command failures come back as ordinary output text; only a failure
    /// to write the command log is returned as an error.
    pub fn dispatch(&mut self, line: &str) -> ShellResult<Dispatch> {
        let prompt = self.shell.prompt();
        let command = line.trim_end_matches(['\r', '\n']);

        let (output, exit) = match Command::parse(command) {
            Ok(parsed) => {
                debug!(
                    "dispatch {:?}{}",
                    parsed,
                    if parsed.is_destructive() { " (may rewrite archive)" } else { "" }
                );
                let exit = parsed == Command::Exit;
                (self.execute(parsed), exit)
            }
            Err(e) => (e.to_string(), false),
        };

        self.log.append(&prompt, command, &output)?;
        Ok(Dispatch { output, exit })
    }

    fn execute(&mut self, command: Command) -> String {
        let result = match command {
            Command::List { path } => Ok(self.shell.list(path.as_deref())),
            Command::ChangeDirectory { path } => self.shell.change_directory(&path),
            Command::RemoveDirectory { path } => self.shell.remove_directory(path.as_deref()),
            Command::Uname { flag } => self.shell.identify_system(flag.as_deref()),
            Command::Cat { path } => self.shell.read_file(&path),
            Command::Echo { words } => Ok(self.shell.echo(&words)),
            Command::Exit => Ok(self.shell.exit()),
        };
        result.unwrap_or_else(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveStore;
    use crate::fs::PathTable;
    use crate::shell::SystemInfo;

    fn dispatcher() -> CommandDispatcher<Vec<u8>> {
        let mut table = PathTable::new();
        table.add_file("docs/a.txt", b"alpha".to_vec());
        table.add_file("bin/tool", b"tool".to_vec());
        let system = SystemInfo {
            kernel_name: "Linux".into(),
            host_name: "box".into(),
            kernel_version: "1.0.0-custom".into(),
        };
        // Read-only commands never touch the store.
        let shell = VirtualShell::new(
            "alice".into(),
            system,
            ArchiveStore::new("unused.zip"),
            table,
        );
        CommandDispatcher::new(shell, CommandLog::new(Vec::new()))
    }

    fn log_text(d: &CommandDispatcher<Vec<u8>>) -> String {
        String::from_utf8(d.log().get_ref().clone()).unwrap()
    }

    #[test]
    fn test_log_records_prompt_before_mutation() {
        let mut d = dispatcher();
        d.dispatch("cd docs").unwrap();
        d.dispatch("ls").unwrap();
        assert_eq!(
            log_text(&d),
            "alice@box:/$ cd docs\nalice@box:docs/$ ls\na.txt\n"
        );
        assert_eq!(d.prompt(), "alice@box:docs/$ ");
    }

    #[test]
    fn test_errors_become_output() {
        let mut d = dispatcher();
        let out = d.dispatch("frobnicate now").unwrap();
        assert_eq!(out.output, "Unknown command.");
        assert!(!out.exit);

        let out = d.dispatch("cd nowhere").unwrap();
        assert_eq!(out.output, "Error: directory not found.");

        let out = d.dispatch("uname -z").unwrap();
        assert_eq!(out.output, "Unknown option");

        assert_eq!(
            log_text(&d),
            "alice@box:/$ frobnicate now\nUnknown command.\n\
             alice@box:/$ cd nowhere\nError: directory not found.\n\
             alice@box:/$ uname -z\nUnknown option\n"
        );
    }

    #[test]
    fn test_blank_line_is_unknown_and_logged() {
        let mut d = dispatcher();
        let out = d.dispatch("").unwrap();
        assert_eq!(out.output, "Unknown command.");
        assert!(!out.exit);
        d.dispatch("  \t").unwrap();
        assert_eq!(
            log_text(&d),
            "alice@box:/$ \nUnknown command.\nalice@box:/$   \t\nUnknown command.\n"
        );
    }

    #[test]
    fn test_exit_ends_session_and_is_logged() {
        let mut d = dispatcher();
        let out = d.dispatch("exit").unwrap();
        assert!(out.exit);
        assert_eq!(out.output, "All changes saved to the archive.");
        assert!(log_text(&d).starts_with("alice@box:/$ exit\n"));
    }

    #[test]
    fn test_cat_and_echo() {
        let mut d = dispatcher();
        assert_eq!(d.dispatch("cat docs/a.txt").unwrap().output, "alpha");
        assert_eq!(d.dispatch("echo hi there").unwrap().output, "hi there");
        assert_eq!(
            d.dispatch("cat").unwrap().output,
            "Error: cat command requires an argument."
        );
    }

    #[test]
    fn test_uname_host() {
        let mut d = dispatcher();
        assert_eq!(d.dispatch("uname").unwrap().output, "Linux");
        assert_eq!(d.dispatch("uname -n").unwrap().output, "box");
    }
}
