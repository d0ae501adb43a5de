//! Command-line parsing into a closed set of verbs.

use crate::error::{ShellError, ShellResult};

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `ls [dir]`
    List { path: Option<String> },
    /// `cd <dir>`
    ChangeDirectory { path: String },
    /// `rmdir [dir]`; the missing-argument error is reported by the shell.
    RemoveDirectory { path: Option<String> },
    /// `uname [flag]`
    Uname { flag: Option<String> },
    /// `cat <file>`
    Cat { path: String },
    /// `echo [words...]`
    Echo { words: Vec<String> },
    /// `exit`
    Exit,
}

impl Command {
    /// Split `line` on whitespace and decode the verb and its arguments.
    ///
    /// A blank line has no verb and is an unknown command like any other.
    pub fn parse(line: &str) -> ShellResult<Command> {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Err(ShellError::UnknownCommand(String::new()));
        };
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let command = match verb {
            "ls" => Command::List {
                path: at_most_one("ls", args)?,
            },
            "cd" => Command::ChangeDirectory {
                path: at_most_one("cd", args)?.ok_or(ShellError::MissingArgument("cd"))?,
            },
            "rmdir" => Command::RemoveDirectory {
                path: at_most_one("rmdir", args)?,
            },
            "uname" => Command::Uname {
                flag: at_most_one("uname", args)?,
            },
            "cat" => Command::Cat {
                path: at_most_one("cat", args)?.ok_or(ShellError::MissingArgument("cat"))?,
            },
            "echo" => Command::Echo { words: args },
            "exit" => {
                if !args.is_empty() {
                    return Err(ShellError::TooManyArguments("exit"));
                }
                Command::Exit
            }
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }

    /// Whether running this command can change the archive.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Command::RemoveDirectory { .. })
    }
}

fn at_most_one(verb: &'static str, args: Vec<String>) -> ShellResult<Option<String>> {
    if args.len() > 1 {
        return Err(ShellError::TooManyArguments(verb));
    }
    Ok(args.into_iter().next())
}
