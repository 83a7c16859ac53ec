use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use geochat_client::ClientHandle;
use geochat_core::{update, AppState, AppViewModel, Msg};
use geochat_logging::{geochat_debug, geochat_info, geochat_warn};

use super::config::AppConfig;
use super::effects::{EffectRunner, HostEventSink};
use super::input::{parse_line, InputAction};
use super::logging;
use super::map::{MapSurface, MarkerManager, TerminalMap};
use super::ui::console::Console;
use super::ui::layout;
use super::ui::render::{render, ConsoleCommand};

/// Everything the host loop reacts to, in arrival order.
pub enum HostEvent {
    Core(Msg),
    Input(InputAction),
    /// Stdin reached end of file.
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    logging::initialize(config.log_destination);
    geochat_info!("geochat starting with {:?}", config);

    let settings = config.chat_settings();
    let (event_tx, event_rx) = mpsc::channel::<HostEvent>();
    let client = ClientHandle::new(
        config.client_settings(),
        Arc::new(HostEventSink::new(event_tx.clone())),
    )?;
    let map = MarkerManager::new(TerminalMap::new(io::stdout()), &settings.map);

    let mut host = Host::new(
        AppState::with_settings(settings),
        EffectRunner::new(client, map),
        Console::new(io::stdout()),
    );
    host.show_banner()?;

    spawn_input_reader(event_tx);
    host.run(event_rx)?;
    geochat_info!("geochat exiting");
    Ok(())
}

fn spawn_input_reader(tx: mpsc::Sender<HostEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        forward_lines(stdin.lock(), &tx);
    });
}

/// Forwards each line as an input action, then `InputClosed` once the reader
/// is exhausted. Bytes that are not UTF-8 are replaced, never fatal.
fn forward_lines(mut reader: impl BufRead, tx: &mpsc::Sender<HostEvent>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                geochat_warn!("stdin read failed: {}", err);
                break;
            }
        }

        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            geochat_warn!("input line is not valid UTF-8; invalid bytes replaced");
        }
        let line = line.trim_end_matches(['\n', '\r']);
        if tx.send(HostEvent::Input(parse_line(line))).is_err() {
            return;
        }
    }
    let _ = tx.send(HostEvent::InputClosed);
}

/// Single owner of the state machine; runs on the thread that drains events.
pub(crate) struct Host<S: MapSurface, W: Write> {
    state: AppState,
    last_view: AppViewModel,
    runner: EffectRunner<S>,
    console: Console<W>,
    input_closed: bool,
}

impl<S: MapSurface, W: Write> Host<S, W> {
    pub(crate) fn new(state: AppState, runner: EffectRunner<S>, console: Console<W>) -> Self {
        let last_view = state.view();
        Self {
            state,
            last_view,
            runner,
            console,
            input_closed: false,
        }
    }

    pub(crate) fn show_banner(&mut self) -> io::Result<()> {
        self.console.execute(layout::initial_commands(&self.last_view))
    }

    /// Drains events until the user quits, or until stdin is closed and
    /// every in-flight request has settled.
    pub(crate) fn run(&mut self, events: mpsc::Receiver<HostEvent>) -> io::Result<()> {
        while let Ok(event) = events.recv() {
            match event {
                HostEvent::Core(msg) => self.dispatch(msg)?,
                HostEvent::Input(InputAction::Quit) => break,
                HostEvent::Input(action) => self.handle_input(action)?,
                HostEvent::InputClosed => {
                    geochat_debug!(
                        "input closed with {} request(s) in flight",
                        self.state.in_flight()
                    );
                    self.input_closed = true;
                }
            }
            if self.input_closed && self.state.in_flight() == 0 {
                break;
            }
        }
        Ok(())
    }

    fn handle_input(&mut self, action: InputAction) -> io::Result<()> {
        match action {
            InputAction::Submit(line) => {
                self.dispatch(Msg::InputChanged(line))?;
                self.dispatch(Msg::Submitted)
            }
            InputAction::ClickMarker(index) => {
                let marker_id = self
                    .state
                    .markers()
                    .as_slice()
                    .get(index.saturating_sub(1))
                    .filter(|_| index > 0)
                    .map(|marker| marker.id);
                match marker_id {
                    Some(marker_id) => self.dispatch(Msg::MarkerClicked(marker_id)),
                    None => self
                        .console
                        .execute(vec![ConsoleCommand::SetStatus(format!("no marker {index}"))]),
                }
            }
            InputAction::CloseInfo => self.dispatch(Msg::InfoWindowClosed),
            InputAction::Quit => Ok(()),
        }
    }

    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);

        let was_dirty = state.consume_dirty();
        self.state = state;
        if was_dirty {
            let view = self.state.view();
            self.console.execute(render(&self.last_view, &view))?;
            self.last_view = view;
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn runner(&self) -> &EffectRunner<S> {
        &self.runner
    }
}
