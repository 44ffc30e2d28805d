//! # Table Messages
//!
//! Requests sent from a `TableClient` to its `TableActor`.

use crate::error::StoreError;
use crate::query::Select;
use crate::record::Record;
use tokio::sync::oneshot;

/// One-shot response channel used by tables.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// The operations a table understands: one read of many rows, one read by key, and
/// the three writes. Every variant carries the channel its answer goes back on.
#[derive(Debug)]
pub enum TableRequest<T: Record> {
    Select {
        query: Select<T>,
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Insert {
        draft: T::Draft,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}
