use crate::{QuerySnapshot, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Resolve `snapshot` at `page`; `append` selects load-more semantics.
    Resolve {
        request_id: RequestId,
        snapshot: QuerySnapshot,
        page: u32,
        append: bool,
    },
    /// Abandon an in-flight resolution. Its results will be ignored either way.
    Cancel { request_id: RequestId },
}
