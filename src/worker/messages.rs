//! Worker thread message types for cross-thread communication.
//!
//! Requests carry the id and generation of the window that issued them; the
//! worker echoes both back so the plugin can discard responses for windows
//! that were closed or re-targeted in the meantime. Requests also carry the
//! issuing span's trace context.

use crate::domain::Entry;
use crate::source::SearchMatch;
use crate::windows::WindowId;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span ids of the current span.
    ///
    /// Returns `None` when the current span has no valid OpenTelemetry context,
    /// e.g. when tracing is not initialised.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        span_context.is_valid().then(|| Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace
/// context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    list_directory(ListDirectory { window: WindowId, generation: u64, path: String }),
    fetch_file(FetchFile { window: WindowId, generation: u64, path: String, max_bytes: u64 }),
    search(Search { window: WindowId, generation: u64, base: String, query: String, limit: usize }),
}

/// Which kind of request a failure answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    Listing,
    File,
    Search,
}

/// Requests sent from the plugin to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// List the children of a directory.
    ListDirectory {
        window: WindowId,
        generation: u64,
        path: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Read a file, up to `max_bytes`.
    FetchFile {
        window: WindowId,
        generation: u64,
        path: String,
        max_bytes: u64,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Recursively search below `base` for names containing `query`.
    Search {
        window: WindowId,
        generation: u64,
        base: String,
        query: String,
        limit: usize,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        match self {
            Self::ListDirectory { .. } => RequestKind::Listing,
            Self::FetchFile { .. } => RequestKind::File,
            Self::Search { .. } => RequestKind::Search,
        }
    }

    /// The issuing window and its generation at the time of the request.
    #[must_use]
    pub const fn target(&self) -> (WindowId, u64) {
        match self {
            Self::ListDirectory { window, generation, .. }
            | Self::FetchFile { window, generation, .. }
            | Self::Search { window, generation, .. } => (*window, *generation),
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::ListDirectory { trace_context, .. }
            | Self::FetchFile { trace_context, .. }
            | Self::Search { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A directory was listed. Entries are unsorted.
    Listing {
        window: WindowId,
        generation: u64,
        path: String,
        entries: Vec<Entry>,
    },

    /// A file was read.
    File {
        window: WindowId,
        generation: u64,
        path: String,
        content_type: String,
        bytes: Vec<u8>,
        total_size: u64,
    },

    /// A recursive search finished.
    SearchResults {
        window: WindowId,
        generation: u64,
        query: String,
        matches: Vec<SearchMatch>,
    },

    /// A request failed.
    Failed {
        window: WindowId,
        generation: u64,
        request: RequestKind,
        message: String,
    },
}

impl WorkerResponse {
    /// The window and generation this response answers.
    #[must_use]
    pub const fn target(&self) -> (WindowId, u64) {
        match self {
            Self::Listing { window, generation, .. }
            | Self::File { window, generation, .. }
            | Self::SearchResults { window, generation, .. }
            | Self::Failed { window, generation, .. } => (*window, *generation),
        }
    }
}
