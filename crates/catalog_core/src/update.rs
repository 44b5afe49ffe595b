use crate::{Effect, ListState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ListState, msg: Msg) -> (ListState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryChanged(snapshot) => {
            let page = snapshot.page();
            state.set_snapshot(snapshot);
            start_resolution(&mut state, page, false)
        }
        Msg::LoadMoreClicked => {
            if state.is_loading() || !state.has_more() {
                return (state, Vec::new());
            }
            let page = state.current_page() + 1;
            start_resolution(&mut state, page, true)
        }
        Msg::RetryClicked => {
            let page = state.current_page();
            start_resolution(&mut state, page, false)
        }
        Msg::PageResolved { request_id, page } => {
            state.apply_page(request_id, page);
            Vec::new()
        }
        Msg::ResolveFailed {
            request_id,
            message,
        } => {
            state.apply_failure(request_id, message);
            Vec::new()
        }
        Msg::ResolveCancelled { request_id } => {
            // Cancellation is never shown to the user.
            state.apply_cancelled(request_id);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn start_resolution(state: &mut ListState, page: u32, append: bool) -> Vec<Effect> {
    let (request_id, superseded) = state.begin(page, append);
    let mut effects = Vec::with_capacity(2);
    if let Some(previous) = superseded {
        effects.push(Effect::Cancel {
            request_id: previous,
        });
    }
    effects.push(Effect::Resolve {
        request_id,
        snapshot: state.snapshot().clone(),
        page,
        append,
    });
    effects
}
