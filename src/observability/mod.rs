//! Tracing with file-based OTLP export.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → TracerProvider → OtlpFileExporter
//!                                                            → /data/zexplorer-otlp.json
//! ```
//!
//! - `init`: Subscriber and filter setup from [`Config`](crate::Config)
//! - `export`: Span exporter and tracer provider
//! - `otlp`: OTLP/JSON encoding of span batches
//! - `rotation`: Size-limited trace file with numbered backups

mod export;
mod init;
mod otlp;
mod rotation;

pub use init::{init_tracing, TRACE_FILE};
