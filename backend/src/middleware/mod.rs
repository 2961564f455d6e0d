//! Request middleware for lifecycle concerns such as tracing.

pub mod trace;

pub use trace::{Trace, TraceId, TRACE_ID_HEADER};
