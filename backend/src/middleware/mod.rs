//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by the checkout backend and the
//! fulfilment mock, currently request tracing.

pub mod trace;

pub use trace::Trace;
