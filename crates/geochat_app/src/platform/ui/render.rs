use geochat_core::{AppViewModel, Role, Viewport};

use crate::platform::map::format_lng_lat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    AppendMessage { role: Role, text: String },
    SetStatus(String),
}

/// Commands that bring the console from `previous` to `next`.
///
/// The console only appends: removed placeholders are simply not printed again.
pub fn render(previous: &AppViewModel, next: &AppViewModel) -> Vec<ConsoleCommand> {
    let last_shown = previous
        .messages
        .iter()
        .map(|message| message.id)
        .max()
        .unwrap_or(0);

    let mut cmds: Vec<ConsoleCommand> = next
        .messages
        .iter()
        .filter(|message| message.id > last_shown)
        .map(|message| ConsoleCommand::AppendMessage {
            role: message.role,
            text: message.text.clone(),
        })
        .collect();

    let map_changed = previous.markers != next.markers || previous.viewport != next.viewport;
    if map_changed || previous.in_flight != next.in_flight {
        cmds.push(ConsoleCommand::SetStatus(status_text(next)));
    }

    cmds
}

pub fn status_text(view: &AppViewModel) -> String {
    let markers = if view.markers.is_empty() {
        "none".to_string()
    } else {
        view.markers
            .iter()
            .enumerate()
            .map(|(index, marker)| format!("{}:{}", index + 1, marker.title))
            .collect::<Vec<_>>()
            .join(" ")
    };
    format!(
        "pending {} | markers {} | view {}",
        view.in_flight,
        markers,
        viewport_label(&view.viewport)
    )
}

fn viewport_label(viewport: &Viewport) -> String {
    match viewport {
        Viewport::Initial { center, zoom } => {
            format!("centered {} zoom {}", format_lng_lat(*center), zoom)
        }
        Viewport::Fitted(bounds) => format!(
            "fitted {} .. {}",
            format_lng_lat(bounds.south_west),
            format_lng_lat(bounds.north_east)
        ),
    }
}
