use geochat_core::AppViewModel;

use super::constants::{COMMAND_CLOSE, COMMAND_MARKER, COMMAND_QUIT};
use super::render::{status_text, ConsoleCommand};

/// Banner shown once the map surface is constructed.
pub fn initial_commands(view: &AppViewModel) -> Vec<ConsoleCommand> {
    vec![
        ConsoleCommand::SetStatus(
            "Type a message mentioning places; they are marked on the map.".to_string(),
        ),
        ConsoleCommand::SetStatus(format!(
            "{COMMAND_MARKER} <n> shows marker n, {COMMAND_CLOSE} hides it, {COMMAND_QUIT} exits."
        )),
        ConsoleCommand::SetStatus(status_text(view)),
    ]
}
