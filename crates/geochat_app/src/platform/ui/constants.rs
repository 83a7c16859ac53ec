pub const USER_TAG: &str = "you";
pub const ASSISTANT_TAG: &str = "map";

pub const COMMAND_MARKER: &str = "/marker";
pub const COMMAND_CLOSE: &str = "/close";
pub const COMMAND_QUIT: &str = "/quit";
