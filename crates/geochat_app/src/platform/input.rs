use super::ui::constants::{COMMAND_CLOSE, COMMAND_MARKER, COMMAND_QUIT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Submit the line through the chat form.
    Submit(String),
    /// Click the n-th marker (1-based, as listed in the status line).
    ClickMarker(usize),
    CloseInfo,
    Quit,
}

/// Interprets one terminal line. Anything that is not a well-formed command is chat text.
pub fn parse_line(line: &str) -> InputAction {
    let trimmed = line.trim();
    if trimmed == COMMAND_QUIT {
        return InputAction::Quit;
    }
    if trimmed == COMMAND_CLOSE {
        return InputAction::CloseInfo;
    }
    if let Some(rest) = trimmed.strip_prefix(COMMAND_MARKER) {
        if let Ok(index) = rest.trim().parse::<usize>() {
            if index > 0 && rest.starts_with(char::is_whitespace) {
                return InputAction::ClickMarker(index);
            }
        }
    }
    InputAction::Submit(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::{parse_line, InputAction};

    #[test]
    fn commands_are_recognized() {
        assert_eq!(parse_line("/quit"), InputAction::Quit);
        assert_eq!(parse_line("  /close "), InputAction::CloseInfo);
        assert_eq!(parse_line("/marker 2"), InputAction::ClickMarker(2));
    }

    #[test]
    fn malformed_commands_are_chat_text() {
        for line in ["/marker", "/marker 0", "/marker two", "/marker2", "去北京"] {
            assert_eq!(parse_line(line), InputAction::Submit(line.to_string()));
        }
    }
}
