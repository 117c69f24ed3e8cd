//! Fluent assertions for Rust tests.
//!
//! An [`Assert`] is bound to a [`Sink`] that decides what a failure does:
//! record it and keep going, or stop the test. Contexts are configured by
//! deriving new ones:
//!
//! ```
//! use fluent_assert::{Assert, Recorder};
//!
//! let sink = Recorder::new();
//! let assert = Assert::new(&sink);
//!
//! assert.zero(&Vec::<String>::new());
//! assert.with_field("users").nil(&Vec::<String>::new());
//!
//! assert_eq!(sink.messages(), vec!["users: want <nil>, got []"]);
//! ```
//!
//! Nil, zero and length are decided by [`classify`] from the [`Shape`] a
//! value reports through [`Inspect`]. Equality is decided by
//! [`comparison::diff`]: values of different types are never equal.

pub mod classify;
pub mod comparison;
pub mod context;
pub mod errors;
pub mod shape;
pub mod sink;
pub mod template;
pub mod tracing_config;

use std::fmt::Debug;

pub use context::{Assert, Verb};
pub use errors::TemplateError;
pub use shape::{Inspect, Nil, Shape, ZeroCheck};
pub use sink::{Aborted, Mode, Recorder, Report, Sink, TestSink};
pub use template::{Fields, Formatter, Template};
pub use tracing_config::{init_test_tracing, init_test_tracing_with_filter};

// One-off checks through a fresh default context.

#[track_caller]
pub fn equal<W, G>(sink: &dyn Sink, want: &W, got: &G) -> bool
where
    W: ?Sized + PartialEq<G> + Debug,
    G: ?Sized + Debug,
{
    Assert::new(sink).equal(want, got)
}

#[track_caller]
pub fn not_equal<W, G>(sink: &dyn Sink, want: &W, got: &G) -> bool
where
    W: ?Sized + PartialEq<G> + Debug,
    G: ?Sized + Debug,
{
    Assert::new(sink).not_equal(want, got)
}

#[track_caller]
pub fn nil<T: Inspect>(sink: &dyn Sink, got: &T) -> bool {
    Assert::new(sink).nil(got)
}

#[track_caller]
pub fn not_nil<T: Inspect>(sink: &dyn Sink, got: &T) -> bool {
    Assert::new(sink).not_nil(got)
}

#[track_caller]
pub fn zero<T: Inspect>(sink: &dyn Sink, got: &T) -> bool {
    Assert::new(sink).zero(got)
}

#[track_caller]
pub fn not_zero<T: Inspect>(sink: &dyn Sink, got: &T) -> bool {
    Assert::new(sink).not_zero(got)
}

#[track_caller]
pub fn len<T: Inspect>(sink: &dyn Sink, got: &T, n: usize) -> bool {
    Assert::new(sink).len(got, n)
}
