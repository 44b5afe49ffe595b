#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The external query state (URL parameters) changed.
    QueryChanged(crate::QuerySnapshot),
    /// User asked for the next page.
    LoadMoreClicked,
    /// User asked to retry after an error.
    RetryClicked,
    /// Engine produced a page for a resolution.
    PageResolved {
        request_id: crate::RequestId,
        page: crate::ResultPage,
    },
    /// Engine failed a resolution with a remote error.
    ResolveFailed {
        request_id: crate::RequestId,
        message: String,
    },
    /// Engine observed cancellation of a resolution.
    ResolveCancelled { request_id: crate::RequestId },
    /// Fallback for placeholder wiring.
    NoOp,
}
