//! Alternative type class - choice between computations.
//!
//! # Laws
//!
//! ```text
//! empty.alt(x) == x            // left identity
//! x.alt(empty) == x            // right identity
//! (x.alt(y)).alt(z) == x.alt(y.alt(z))  // associativity
//! ```
//!
//! # Examples
//!
//! ```rust
//! use optask::typeclass::{Alternative, Functor};
//!
//! let first: Option<i32> = None;
//! assert_eq!(first.alt(Some(42)), Some(42));
//!
//! fn filter_positive(n: i32) -> Option<i32> {
//!     <Option<()>>::guard(n > 0).fmap(move |_| n)
//! }
//! assert_eq!(filter_positive(5), Some(5));
//! assert_eq!(filter_positive(-3), None);
//! ```

use super::applicative::Applicative;

/// A type class for applicative functors with a failure value and a choice
/// operation.
pub trait Alternative: Applicative {
    /// Returns the identity element for `alt`.
    fn empty<A>() -> Self::WithType<A>;

    /// Returns `self` when it holds a value, otherwise `alternative`.
    fn alt(self, alternative: Self) -> Self;

    /// Returns `pure(())` when `condition` holds, otherwise `empty`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::typeclass::Alternative;
    ///
    /// assert_eq!(<Option<()>>::guard(true), Some(()));
    /// assert_eq!(<Option<()>>::guard(false), None);
    /// ```
    #[inline]
    fn guard(condition: bool) -> Self::WithType<()> {
        if condition {
            Self::pure(())
        } else {
            Self::empty()
        }
    }

    /// Returns the first alternative holding a value.
    fn choice<I>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = Self>;
}

impl<A> Alternative for Option<A> {
    #[inline]
    fn empty<B>() -> Option<B> {
        None
    }

    #[inline]
    fn alt(self, alternative: Self) -> Self {
        self.or(alternative)
    }

    #[inline]
    fn choice<I>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        alternatives.into_iter().find(Self::is_some).flatten()
    }
}
