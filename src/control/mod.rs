//! Control structures for optional values.
//!
//! The optional-value container of this library is the standard
//! [`Option`]. This module adds the pieces the standard library lacks:
//!
//! - [`some`] / [`none`]: constructors usable as plain functions
//! - [`OptionExt::fold`]: the total destructor
//! - [`OptionExt::get_or_else`]: extraction with a lazily computed default
//!
//! Mapping and chaining come from the [`Functor`](crate::typeclass::Functor)
//! and [`Monad`](crate::typeclass::Monad) type classes.
//!
//! # Examples
//!
//! ```rust
//! use optask::control::{OptionExt, none, some};
//! use optask::typeclass::{Functor, Monad};
//!
//! let present = some(20).fmap(|n| n + 1).flat_map(|n| some(n * 2));
//! assert_eq!(present.fold(|| "absent".to_string(), |n| n.to_string()), "42");
//!
//! let absent = none::<i32>();
//! assert_eq!(absent.get_or_else(|| 0), 0);
//! ```

mod option;

pub use option::{OptionExt, none, some};
