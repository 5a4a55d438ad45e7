//! Tooling primitives for behavior-tree runtimes.
//!
//! Runtimes emit small [`TraceEvent`]s into a [`TraceSink`]; tools and tests
//! collect them with [`VecTraceSink`] or [`SharedTraceLog`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{NullTraceSink, SharedTraceLog, TraceEvent, TraceLog, TraceSink, VecTraceSink};
