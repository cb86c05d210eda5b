//! Type class traits for functional programming abstractions.
//!
//! Each capability is its own trait, and a type opts into exactly the
//! capabilities it supports:
//!
//! - [`Functor`]: Mapping over container values
//! - [`Applicative`]: Lifting values and combining independent computations
//! - [`Monad`]: Sequencing computations with dependency
//! - [`Alternative`]: Choosing between computations, with an empty element
//!
//! ## Higher-Kinded Types Emulation
//!
//! Rust does not have native support for higher-kinded types (HKT).
//! This library uses Generic Associated Types (GAT) to emulate HKT
//! behavior through [`TypeConstructor`].
//!
//! # Examples
//!
//! ```rust
//! use optask::typeclass::{Alternative, Applicative, Functor, Monad};
//!
//! let x: Option<i32> = <Option<()>>::pure(20);
//! let y = x.fmap(|n| n + 1).flat_map(|n| if n > 0 { Some(n * 2) } else { None });
//! assert_eq!(y, Some(42));
//!
//! let fallback: Option<i32> = None;
//! assert_eq!(fallback.alt(Some(7)), Some(7));
//! ```

mod alternative;
mod applicative;
mod functor;
mod higher;
mod monad;

pub use alternative::Alternative;
pub use applicative::Applicative;
pub use functor::Functor;
pub use higher::TypeConstructor;
pub use monad::Monad;
