use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use catalog_core::{QuerySnapshot, RequestId};
use engine_logging::{engine_debug, engine_warn};
use tokio_util::sync::CancellationToken;

use crate::pipeline::{PageRequest, ResultPipeline};
use crate::{EngineEvent, ResolveError};

enum EngineCommand {
    Resolve {
        request_id: RequestId,
        snapshot: QuerySnapshot,
        request: PageRequest,
    },
    Cancel {
        request_id: RequestId,
    },
    LoadCategories,
}

/// Runs resolutions on a background tokio runtime.
///
/// Starting a resolution cancels the token of the previous one. Completions
/// are reported in the order they finish, tagged with their request id; the
/// receiver decides which one is still current.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(pipeline: ResultPipeline) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let pipeline = Arc::new(pipeline);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut current: Option<(RequestId, CancellationToken)> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Resolve {
                        request_id,
                        snapshot,
                        request,
                    } => {
                        if let Some((previous, token)) = current.take() {
                            engine_debug!("request {} superseded by {}", previous, request_id);
                            token.cancel();
                        }
                        let token = CancellationToken::new();
                        current = Some((request_id, token.clone()));
                        let pipeline = pipeline.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = pipeline.resolve(&snapshot, request, &token).await;
                            match &result {
                                Err(ResolveError::Cancelled) => {
                                    engine_debug!("request {} cancelled", request_id)
                                }
                                Err(err) => engine_warn!("request {} failed: {}", request_id, err),
                                Ok(page) => engine_debug!(
                                    "request {} resolved {} items",
                                    request_id,
                                    page.items.len()
                                ),
                            }
                            let _ = event_tx.send(EngineEvent::Resolved { request_id, result });
                        });
                    }
                    EngineCommand::Cancel { request_id } => {
                        if let Some((active, token)) = &current {
                            if *active == request_id {
                                token.cancel();
                                current = None;
                            }
                        }
                    }
                    EngineCommand::LoadCategories => {
                        let source = pipeline.source().clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = source.fetch_categories().await;
                            let _ = event_tx.send(EngineEvent::Categories(result));
                        });
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn resolve(&self, request_id: RequestId, snapshot: QuerySnapshot, request: PageRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Resolve {
            request_id,
            snapshot,
            request,
        });
    }

    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }

    pub fn load_categories(&self) {
        let _ = self.cmd_tx.send(EngineCommand::LoadCategories);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }
}
