//! Constructors and destructors for [`Option`].

/// Wraps a value as a present `Option`.
///
/// # Examples
///
/// ```rust
/// use optask::control::some;
///
/// assert_eq!(some(1), Some(1));
/// ```
#[inline]
pub const fn some<A>(value: A) -> Option<A> {
    Some(value)
}

/// Returns the absent `Option`.
///
/// # Examples
///
/// ```rust
/// use optask::control::none;
///
/// assert_eq!(none::<i32>(), None);
/// ```
#[inline]
pub const fn none<A>() -> Option<A> {
    None
}

/// Destructors for [`Option`].
///
/// `fold` is the only place where the two variants are told apart; every
/// other operation here is derived from it.
pub trait OptionExt<A>: Sized {
    /// Eliminates the `Option` by applying one of two functions.
    ///
    /// `on_none` runs for an absent value, `on_some` for a present one.
    /// Exactly one of them is called.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::control::OptionExt;
    ///
    /// assert_eq!(Some(2).fold(|| 0, |n| n * 10), 20);
    /// assert_eq!(None::<i32>.fold(|| 0, |n| n * 10), 0);
    /// ```
    fn fold<B, N, S>(self, on_none: N, on_some: S) -> B
    where
        N: FnOnce() -> B,
        S: FnOnce(A) -> B;

    /// Returns the contained value, or the result of `default` when absent.
    ///
    /// `default` is only evaluated for an absent value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::control::OptionExt;
    ///
    /// assert_eq!(Some(1).get_or_else(|| 2), 1);
    /// assert_eq!(None.get_or_else(|| 2), 2);
    /// ```
    #[inline]
    fn get_or_else<F>(self, default: F) -> A
    where
        F: FnOnce() -> A,
    {
        self.fold(default, |value| value)
    }
}

impl<A> OptionExt<A> for Option<A> {
    #[inline]
    fn fold<B, N, S>(self, on_none: N, on_some: S) -> B
    where
        N: FnOnce() -> B,
        S: FnOnce(A) -> B,
    {
        match self {
            Some(value) => on_some(value),
            None => on_none(),
        }
    }
}
