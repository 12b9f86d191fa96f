//! Background worker thread for filesystem requests.
//!
//! Listings, file reads and recursive searches run on a Zellij worker so the
//! plugin never blocks on I/O. Requests and responses cross the thread
//! boundary as JSON and carry trace context.
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Request handling over a [`FileSource`](crate::source::FileSource)

pub mod handler;
pub mod messages;

pub use handler::ExplorerWorker;
pub use messages::{RequestKind, TraceContext, WorkerMessage, WorkerResponse};
