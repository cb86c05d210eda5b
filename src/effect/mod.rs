//! Deferred asynchronous effects.
//!
//! # Task
//!
//! A [`Task<A>`] describes an asynchronous computation producing an `A`.
//! Nothing runs when a task is built; every call to [`Task::run`] (or every
//! `.await` on a clone) starts the whole computation again, effects included.
//!
//! ```rust
//! use optask::effect::Task;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! # futures::executor::block_on(async {
//! let counter = Arc::new(AtomicUsize::new(0));
//! let tick = {
//!     let counter = Arc::clone(&counter);
//!     Task::from_io(move || counter.fetch_add(1, Ordering::SeqCst) + 1)
//! };
//!
//! // Not executed yet
//! assert_eq!(counter.load(Ordering::SeqCst), 0);
//!
//! assert_eq!(tick.run().await, 1);
//! assert_eq!(tick.run().await, 2);
//! # });
//! ```
//!
//! # `TaskOption`
//!
//! A [`TaskOption<A>`] is a task resolving to an `Option<A>`. Absence is an
//! ordinary outcome: combinators short-circuit on it and failures caught by
//! [`TaskOption::try_catch`] become `None`.
//!
//! # Sequencing
//!
//! [`TaskOption::sequence`] turns an ordered collection of `TaskOption<A>`
//! into one `TaskOption<Vec<A>>` under a [`SequencePolicy`]:
//!
//! - `Parallel`: every element starts, in index order, without waiting on the
//!   others. All of them run to completion; any `None` makes the result `None`.
//! - `Sequential`: element `i + 1` starts only after element `i` produced a
//!   value. The first `None` stops the walk; later elements never start.

mod task;
mod task_option;

pub use task::Task;
pub use task_option::{ParsePolicyError, SequencePolicy, TaskOption};
