#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Wall-clock time tracking utilities that report each action's share of
//! total elapsed time.
//!
//! This package accumulates how much wall time a program spends in named
//! actions (code regions) and, on demand, produces a report ranking the
//! actions by their share of total elapsed session time. It answers the
//! question "where does the time go" during a run of a larger program.
//!
//! The core functionality includes:
//! - [`Session`] - owns all timer and aggregate state for one profiling run
//! - [`ActionSpan`] - scoped measurement that stops its action when dropped
//! - [`Report`] - point-in-time snapshot with the ranked, formatted summary
//! - [`Error`] - start/stop bookkeeping errors
//!
//! This package is not meant for use in production, serving only as a
//! development tool.
//!
//! # Simple usage
//!
//! ```
//! use time_share::Session;
//!
//! # fn main() -> Result<(), time_share::Error> {
//! let session = Session::new();
//!
//! // Explicit start/stop pairs...
//! session.start("load")?;
//! // ... the work being measured ...
//! let elapsed = session.stop("load")?;
//! println!("load took {elapsed:?}");
//!
//! // ...or a scoped span that stops the action when dropped, on every exit
//! // path including panics.
//! {
//!     let _span = session.measure("transform")?;
//!     // ... the work being measured ...
//! }
//!
//! // One formatted report ranking actions by share of elapsed time.
//! println!("{}", session.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Timing a callable
//!
//! Instrumenting an existing function amounts to wrapping its invocation:
//!
//! ```
//! use time_share::Session;
//!
//! fn expensive_computation() -> u64 {
//!     (0..10_000_u64).sum()
//! }
//!
//! # fn main() -> Result<(), time_share::Error> {
//! let session = Session::new();
//!
//! let total = session.measure_call("expensive_computation", expensive_computation)?;
//! assert_eq!(total, 49_995_000);
//! # Ok(())
//! # }
//! ```
//!
//! # Threading
//!
//! A session is intended for single-threaded use: the measurements answer
//! "where did this run spend its wall time", and interleaved timing from
//! multiple threads produces well-defined but rarely meaningful numbers.
//! Session state nevertheless lives behind a single lock, so sharing a
//! session across threads corrupts nothing; [`Session`] and [`Report`] are
//! `Send` and `Sync`.
//!
//! # Session management
//!
//! Multiple [`Session`] instances can be used concurrently as they track
//! their actions independently. Each session maintains its own totals and
//! its own start time; there is no process-wide state.

mod action_metrics;
mod constants;
mod error;
mod pal;
mod report;
mod session;
mod span;

pub(crate) use constants::ERR_POISONED_LOCK;
pub use error::*;
pub use report::{Report, ReportAction};
pub use session::Session;
pub use span::ActionSpan;
