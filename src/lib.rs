//! # optask
//!
//! Deferred asynchronous computations over optional values.
//!
//! ## Overview
//!
//! - **Type Classes**: `Functor`, `Applicative`, `Monad`, `Alternative` for `Option`
//! - **Option helpers**: a total `fold` destructor and a lazy `get_or_else`
//! - **Task**: a re-invokable, deferred asynchronous computation
//! - **`TaskOption`**: a `Task` that resolves to an `Option`
//! - **Sequencing**: aggregating many `TaskOption`s into one, either
//!   concurrently or strictly in order with short-circuiting
//!
//! ## Feature Flags
//!
//! - `typeclass`: Type class traits (Functor, Monad, etc.)
//! - `control`: Option helpers
//! - `effect`: `Task`, `TaskOption` and the sequencing engine
//! - `serde`: Serialization of `SequencePolicy`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use optask::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let lookups = vec![TaskOption::some(1), TaskOption::some(2), TaskOption::some(3)];
//! let all = TaskOption::sequence(lookups, SequencePolicy::Sequential);
//! assert_eq!(all.run().await, Some(vec![1, 2, 3]));
//! # });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use optask::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "effect")]
    pub use crate::effect::*;
}

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "effect")]
pub mod effect;
