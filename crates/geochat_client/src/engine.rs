use std::sync::{mpsc, Arc};
use std::thread;

use geochat_logging::{geochat_debug, geochat_error, geochat_info};

use crate::request::{ClientSettings, LocationSource, ReqwestLocationSource};
use crate::{ClientEvent, FailureKind, RequestError, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to start request runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Http(#[from] RequestError),
}

/// Receives completion events from the client's runtime threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

enum ClientCommand {
    Submit {
        request_id: RequestId,
        user_input: String,
    },
}

/// Runs requests on a background tokio runtime.
///
/// Every submission becomes its own task, so completions reach the sink in
/// arrival order, not submission order. There is no retry and no cancel.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, ClientError> {
        geochat_info!(
            "request client targeting {}{}",
            settings.base_url,
            settings.endpoint_path
        );
        let source = ReqwestLocationSource::new(settings)?;
        Self::with_source(Arc::new(source), sink)
    }

    pub fn with_source(
        source: Arc<dyn LocationSource>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, ClientError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let source = source.clone();
                let sink = sink.clone();
                runtime.spawn(handle_command(source, command, sink));
            }
            geochat_debug!("request client command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, request_id: RequestId, user_input: impl Into<String>) {
        let _ = self.cmd_tx.send(ClientCommand::Submit {
            request_id,
            user_input: user_input.into(),
        });
    }
}

async fn handle_command(
    source: Arc<dyn LocationSource>,
    command: ClientCommand,
    sink: Arc<dyn EventSink>,
) {
    match command {
        ClientCommand::Submit {
            request_id,
            user_input,
        } => {
            // A panicking source must still settle its request.
            let task =
                tokio::spawn(async move { source.locate(request_id, &user_input).await });
            let result = match task.await {
                Ok(result) => result,
                Err(err) => {
                    geochat_error!("request {} task failed: {}", request_id, err);
                    Err(RequestError::new(
                        FailureKind::Network,
                        format!("request task failed: {err}"),
                    ))
                }
            };
            sink.emit(ClientEvent::RequestCompleted { request_id, result });
        }
    }
}
