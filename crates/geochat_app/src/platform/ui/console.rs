use std::io::{self, Write};

use chrono::Local;
use geochat_core::Role;

use super::constants::{ASSISTANT_TAG, USER_TAG};
use super::render::ConsoleCommand;

/// Append-only transcript view over any writer.
pub struct Console<W: Write> {
    out: W,
    timestamps: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            timestamps: true,
        }
    }

    /// Deterministic output for tests.
    #[cfg(test)]
    pub fn without_timestamps(out: W) -> Self {
        Self {
            out,
            timestamps: false,
        }
    }

    pub fn execute(&mut self, commands: Vec<ConsoleCommand>) -> io::Result<()> {
        for command in commands {
            match command {
                ConsoleCommand::AppendMessage { role, text } => {
                    let tag = match role {
                        Role::User => USER_TAG,
                        Role::Assistant => ASSISTANT_TAG,
                    };
                    if self.timestamps {
                        let stamp = Local::now().format("%H:%M:%S");
                        writeln!(self.out, "[{stamp}] {tag}: {text}")?;
                    } else {
                        writeln!(self.out, "{tag}: {text}")?;
                    }
                }
                ConsoleCommand::SetStatus(text) => writeln!(self.out, "  -- {text}")?,
            }
        }
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
