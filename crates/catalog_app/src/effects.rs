use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use catalog_core::{update, Effect, ListState, ListViewModel, Msg};
use catalog_engine::{
    Category, EngineEvent, EngineHandle, FailureKind, FetchError, PageRequest, ResolveError,
};
use engine_logging::{engine_debug, engine_warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const ENGINE_STOPPED: &str = "engine stopped";

/// Owns the list state and feeds its effects to the engine.
pub struct Session {
    state: ListState,
    engine: EngineHandle,
    categories: Option<Result<Vec<Category>, FetchError>>,
}

impl Session {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            state: ListState::new(),
            engine,
            categories: None,
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.run_effects(effects);
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Resolve {
                    request_id,
                    snapshot,
                    page,
                    append,
                } => {
                    engine_debug!(
                        "Resolve request_id={} page={} append={}",
                        request_id,
                        page,
                        append
                    );
                    self.engine
                        .resolve(request_id, snapshot, PageRequest { page, append });
                }
                Effect::Cancel { request_id } => {
                    engine_debug!("Cancel request_id={}", request_id);
                    self.engine.cancel(request_id);
                }
            }
        }
    }

    /// Pump engine events until no resolution is pending.
    pub fn run_until_idle(&mut self) {
        while self.state.is_loading() {
            match self.engine.recv_timeout(POLL_INTERVAL) {
                Ok(event) => self.handle_event(event),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    self.fail_active(ENGINE_STOPPED);
                    return;
                }
            }
        }
    }

    pub fn load_categories(&mut self) -> Result<Vec<Category>, FetchError> {
        self.engine.load_categories();
        loop {
            if let Some(result) = self.categories.take() {
                return result;
            }
            match self.engine.recv_timeout(POLL_INTERVAL) {
                Ok(event) => self.handle_event(event),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(FetchError::new(FailureKind::Network, ENGINE_STOPPED));
                }
            }
        }
    }

    fn fail_active(&mut self, message: &str) {
        if let Some(request_id) = self.state.active_request() {
            self.dispatch(Msg::ResolveFailed {
                request_id,
                message: message.to_string(),
            });
        }
    }

    fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Resolved { request_id, result } => {
                let msg = match result {
                    Ok(page) => Msg::PageResolved { request_id, page },
                    Err(ResolveError::Cancelled) => Msg::ResolveCancelled { request_id },
                    Err(ResolveError::Remote(err)) => {
                        engine_warn!("Request {} failed: {}", request_id, err);
                        Msg::ResolveFailed {
                            request_id,
                            message: err.to_string(),
                        }
                    }
                };
                self.dispatch(msg);
            }
            EngineEvent::Categories(result) => self.categories = Some(result),
        }
    }

    pub fn view(&self) -> ListViewModel {
        self.state.view()
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }
}
