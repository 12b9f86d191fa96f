//! Request handling on the background worker thread.
//!
//! [`ExplorerWorker`] owns a [`FileSource`] and turns each [`WorkerMessage`]
//! into exactly one [`WorkerResponse`]. Failures never escape: they are
//! reported to the plugin as [`WorkerResponse::Failed`].

use crate::domain::error::{ExplorerError, Result};
use crate::source::{FileSource, LocalFileSource};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Worker-side state: the file source requests are served from.
pub struct ExplorerWorker {
    source: Box<dyn FileSource>,
}

impl Default for ExplorerWorker {
    fn default() -> Self {
        Self::new(Box::new(LocalFileSource::new()))
    }
}

impl std::fmt::Debug for ExplorerWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerWorker").finish_non_exhaustive()
    }
}

impl ExplorerWorker {
    #[must_use]
    pub fn new(source: Box<dyn FileSource>) -> Self {
        Self { source }
    }

    /// Converts a source result into a response, logging failures.
    fn respond<T, F>(message: &WorkerMessage, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        let (window, generation) = message.target();
        match result {
            Ok(value) => on_success(value),
            Err(e) => {
                tracing::debug!(window, generation, error = %e, "request failed");
                WorkerResponse::Failed {
                    window,
                    generation,
                    request: message.kind(),
                    message: e.to_string(),
                }
            }
        }
    }

    /// Attaches the issuing span's context so worker spans join its trace.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Serves one request.
    pub fn handle_message(&mut self, message: &WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(message);
        let _span = tracing::debug_span!("worker_handle_message", kind = ?message.kind()).entered();

        match message {
            WorkerMessage::ListDirectory { window, generation, path, .. } => Self::respond(
                message,
                self.source.list(path),
                |entries| WorkerResponse::Listing {
                    window: *window,
                    generation: *generation,
                    path: path.clone(),
                    entries,
                },
            ),
            WorkerMessage::FetchFile { window, generation, path, max_bytes, .. } => Self::respond(
                message,
                self.source.fetch(path, *max_bytes),
                |file| WorkerResponse::File {
                    window: *window,
                    generation: *generation,
                    path: path.clone(),
                    content_type: file.content_type,
                    bytes: file.bytes,
                    total_size: file.total_size,
                },
            ),
            WorkerMessage::Search { window, generation, base, query, limit, .. } => Self::respond(
                message,
                self.source.search(base, query, *limit),
                |matches| WorkerResponse::SearchResults {
                    window: *window,
                    generation: *generation,
                    query: query.clone(),
                    matches,
                },
            ),
        }
    }

    /// Decodes a JSON request, serves it and encodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Worker`] if the payload is not a valid request
    /// or the response cannot be serialized.
    pub fn on_payload(&mut self, payload: &str) -> Result<String> {
        let message: WorkerMessage = serde_json::from_str(payload)
            .map_err(|e| ExplorerError::Worker(format!("invalid request: {e}")))?;
        let response = self.handle_message(&message);
        serde_json::to_string(&response)
            .map_err(|e| ExplorerError::Worker(format!("cannot encode response: {e}")))
    }
}
