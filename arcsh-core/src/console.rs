//! Console abstraction for the shell session.
//!
//! The `ShellConsole` trait is the only surface a front-end needs: it hands
//! lines to the dispatcher and shows the plain-text results. `HeadlessConsole`
//! drives sessions from queued input in tests.

use std::collections::VecDeque;
use std::io::Write;

use log::debug;

use crate::dispatcher::CommandDispatcher;
use crate::error::ShellResult;

/// Line-oriented console interface.
pub trait ShellConsole {
    /// Show `prompt` and read one line. Returns None at end of input.
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    /// Show the result of a command.
    fn write_output(&mut self, text: &str);
}

/// Headless console for testing - queued input, captured transcript.
#[derive(Default)]
pub struct HeadlessConsole {
    input: VecDeque<String>,
    transcript: String,
}

impl HeadlessConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-queued input lines.
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            transcript: String::new(),
        }
    }

    /// Queue one more input line.
    pub fn queue_line(&mut self, line: &str) {
        self.input.push_back(line.to_string());
    }

    /// Everything the session showed: prompts, echoed input and results.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Number of queued lines not yet consumed.
    pub fn pending(&self) -> usize {
        self.input.len()
    }
}

impl ShellConsole for HeadlessConsole {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        let line = self.input.pop_front()?;
        self.transcript.push_str(prompt);
        self.transcript.push_str(&line);
        self.transcript.push('\n');
        Some(line)
    }

    fn write_output(&mut self, text: &str) {
        self.transcript.push_str(text);
        self.transcript.push('\n');
    }
}

/// Read, dispatch and print lines until `exit` or end of input.
pub fn run_session<C, W>(dispatcher: &mut CommandDispatcher<W>, console: &mut C) -> ShellResult<()>
where
    C: ShellConsole + ?Sized,
    W: Write,
{
    while let Some(line) = console.read_line(&dispatcher.prompt()) {
        let result = dispatcher.dispatch(&line)?;
        if !result.output.is_empty() {
            console.write_output(&result.output);
        }
        if result.exit {
            debug!("session ended by exit");
            return Ok(());
        }
    }
    debug!("session ended at end of input");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_console_input() {
        let mut console = HeadlessConsole::with_lines(["ls", "exit"]);
        assert_eq!(console.pending(), 2);
        assert_eq!(console.read_line("$ "), Some("ls".to_string()));
        console.write_output("bin");
        assert_eq!(console.read_line("$ "), Some("exit".to_string()));
        assert_eq!(console.read_line("$ "), None);
        assert_eq!(console.transcript(), "$ ls\nbin\n$ exit\n");
    }

    #[test]
    fn test_run_session_dispatches_blank_lines() {
        use crate::archive::ArchiveStore;
        use crate::dispatcher::CommandLog;
        use crate::fs::PathTable;
        use crate::shell::{SystemInfo, VirtualShell};

        let system = SystemInfo {
            kernel_name: "Linux".into(),
            host_name: "box".into(),
            kernel_version: "1.0.0-custom".into(),
        };
        let shell = VirtualShell::new(
            "alice".into(),
            system,
            ArchiveStore::new("unused.zip"),
            PathTable::new(),
        );
        let mut d = CommandDispatcher::new(shell, CommandLog::new(Vec::new()));
        let mut console = HeadlessConsole::with_lines(["", "exit"]);

        run_session(&mut d, &mut console).unwrap();
        assert_eq!(
            console.transcript(),
            "alice@box:/$ \nUnknown command.\nalice@box:/$ exit\nAll changes saved to the archive.\n"
        );
        let log = String::from_utf8(d.log().get_ref().clone()).unwrap();
        assert!(log.starts_with("alice@box:/$ \nUnknown command.\n"));
    }

    #[test]
    fn test_queue_line() {
        let mut console = HeadlessConsole::new();
        console.queue_line("uname");
        assert_eq!(console.read_line("> "), Some("uname".to_string()));
    }
}
