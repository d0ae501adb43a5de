//! arcsh - browse a ZIP archive as a tiny Linux-like shell.
//!
//! Usage:
//!   arcsh [archive.zip] [options] [-- command args]
//!
//! Examples:
//!   arcsh virtual_fs.zip                  # Interactive session
//!   arcsh fs.zip --host devbox            # Custom host name in the prompt
//!   arcsh --config shell.json             # Settings from a JSON file
//!   arcsh fs.zip -- ls docs               # Run one command and exit

use std::path::PathBuf;

use clap::Parser;
use crossterm::style::Stylize;
use log::{error, info, warn};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use arcsh_core::{
    run_session, CommandDispatcher, CommandLog, ShellConfig, ShellConsole, VirtualShell,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Archive shell CLI
#[derive(Parser, Debug)]
#[command(name = "arcsh")]
#[command(about = "Browse and prune a ZIP archive from a virtual shell")]
struct Args {
    /// Backing ZIP archive (overrides the config file)
    archive: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// User name shown in the prompt
    #[arg(short, long)]
    user: Option<String>,

    /// Host name shown in the prompt and reported by `uname -n`
    #[arg(long)]
    host: Option<String>,

    /// Command log file
    #[arg(short, long)]
    log: Option<PathBuf>,

    /// Enable debug diagnostics on stderr
    #[arg(short, long)]
    trace: bool,

    /// Command and arguments to run (instead of an interactive session)
    #[arg(last = true)]
    command: Vec<String>,
}

impl Args {
    /// Defaults, then the config file, then command-line values.
    fn resolve_config(&self) -> Result<ShellConfig, BoxError> {
        let mut config = match &self.config {
            Some(path) => ShellConfig::from_path(path)?,
            None => ShellConfig::default(),
        };
        if let Some(archive) = &self.archive {
            config.archive = archive.clone();
        }
        if let Some(user) = &self.user {
            config.user = user.clone();
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(log) = &self.log {
            config.log = log.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Terminal console backed by a line editor with history.
struct TerminalConsole {
    editor: DefaultEditor,
}

impl TerminalConsole {
    fn new() -> Result<Self, ReadlineError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl ShellConsole for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        warn!("failed to record history entry: {}", e);
                    }
                }
                Some(line)
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(e) => {
                error!("failed to read input: {}", e);
                None
            }
        }
    }

    fn write_output(&mut self, text: &str) {
        print_output(text);
    }
}

/// Print a result, highlighting failures.
fn print_output(text: &str) {
    if text.starts_with("Error") || text.starts_with("Unknown") {
        println!("{}", text.red());
    } else {
        println!("{}", text);
    }
}

fn init_logging(trace: bool) {
    let default_level = if trace { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let args = Args::parse();
    init_logging(args.trace);

    let config = args.resolve_config()?;
    let shell = match VirtualShell::open(&config) {
        Ok(shell) => shell,
        Err(e) => {
            // Fatal before the session starts; report once and leave.
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let log = CommandLog::open(&config.log)?;
    let mut dispatcher = CommandDispatcher::new(shell, log);
    info!(
        "archive {} mounted, logging to {}",
        config.archive.display(),
        config.log.display()
    );

    // One-shot mode: run the trailing command and leave.
    if !args.command.is_empty() {
        let line = args.command.join(" ");
        let result = dispatcher.dispatch(&line)?;
        if !result.output.is_empty() {
            print_output(&result.output);
        }
        return Ok(());
    }

    // The session blocks on terminal input, so it runs off the async workers.
    let session = tokio::task::spawn_blocking(move || -> Result<(), BoxError> {
        let mut console = TerminalConsole::new()?;
        run_session(&mut dispatcher, &mut console)?;
        Ok(())
    });

    tokio::select! {
        result = session => result??,
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted, leaving session");
            // The blocking reader cannot be cancelled; end the process here.
            std::process::exit(130);
        }
    }

    Ok(())
}
