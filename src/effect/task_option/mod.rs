//! `TaskOption` - a deferred asynchronous computation resolving to an `Option`.
//!
//! Absence is a value here, not a failure: `flat_map` stops at the first
//! `None`, `alt` recovers from it, and [`TaskOption::try_catch`] turns an
//! `Err` from the wrapped future into `None`.
//!
//! # Examples
//!
//! ```rust
//! use optask::effect::{Task, TaskOption};
//!
//! # futures::executor::block_on(async {
//! let lookup = |id: u32| -> TaskOption<&'static str> {
//!     if id == 1 { TaskOption::some("alice") } else { TaskOption::none() }
//! };
//!
//! let greeting = lookup(1)
//!     .fmap(|name| format!("hello, {name}"))
//!     .get_or_else(|| Task::pure("nobody".to_string()));
//! assert_eq!(greeting.run().await, "hello, alice");
//!
//! let fallback = lookup(2).alt(move || lookup(1));
//! assert_eq!(fallback.run().await, Some("alice"));
//! # });
//! ```

mod sequence;

pub use sequence::{ParsePolicyError, SequencePolicy};

use std::fmt;
use std::future::{Future, IntoFuture};
use std::sync::Arc;

use futures::future::{self, BoxFuture};

use super::Task;
use crate::control::OptionExt;
use crate::typeclass::{Alternative, Applicative, Functor, Monad, TypeConstructor};

/// A [`Task`] whose result is an `Option<A>`.
///
/// Values built through the constructors of this type always resolve to a
/// definite `Option`; a failing wrapped future is reported as `None`.
pub struct TaskOption<A> {
    task: Task<Option<A>>,
}

static_assertions::assert_impl_all!(TaskOption<i32>: Send, Sync, Clone);

impl<A> Clone for TaskOption<A> {
    fn clone(&self) -> Self {
        Self {
            task: self.task.clone(),
        }
    }
}

impl<A> fmt::Debug for TaskOption<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("TaskOption").finish_non_exhaustive()
    }
}

impl<A> fmt::Display for TaskOption<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<TaskOption>")
    }
}

impl<A> From<Task<Option<A>>> for TaskOption<A> {
    fn from(task: Task<Option<A>>) -> Self {
        Self { task }
    }
}

impl<A> From<TaskOption<A>> for Task<Option<A>> {
    fn from(task_option: TaskOption<A>) -> Self {
        task_option.task
    }
}

// =============================================================================
// Construction and Invocation
// =============================================================================

impl<A: 'static> TaskOption<A> {
    /// Creates a `TaskOption` from a factory of futures resolving to `Option<A>`.
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<A>> + Send + 'static,
    {
        Self {
            task: Task::new(action),
        }
    }

    /// Invokes the computation, returning a fresh future of its outcome.
    pub fn run(&self) -> BoxFuture<'static, Option<A>> {
        self.task.run()
    }

    /// Returns the underlying `Task<Option<A>>`.
    pub fn into_task(self) -> Task<Option<A>> {
        self.task
    }
}

impl<A: Send + 'static> TaskOption<A> {
    /// A computation that resolves to `None`.
    pub fn none() -> Self {
        Self::new(|| future::ready(<Option<()>>::empty()))
    }

    /// Wraps a synchronous effect; its result becomes `Some`.
    ///
    /// `effect` runs when the computation is invoked.
    pub fn from_io<F>(effect: F) -> Self
    where
        F: Fn() -> A + Send + Sync + 'static,
    {
        Self::new(move || future::ready(Some(effect())))
    }

    /// Lifts a task; its result becomes `Some`.
    pub fn from_task(task: Task<A>) -> Self {
        Self {
            task: task.fmap(Some),
        }
    }

    /// Runs a fallible future, keeping a success as `Some` and turning an
    /// error into `None`.
    ///
    /// The error value is not part of the outcome. It is reported as a
    /// `debug`-level `tracing` event before being dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::effect::TaskOption;
    ///
    /// # futures::executor::block_on(async {
    /// let ok = TaskOption::try_catch(|| async { Ok::<_, String>(1) });
    /// assert_eq!(ok.run().await, Some(1));
    ///
    /// let failed = TaskOption::try_catch(|| async { Err::<i32, _>("boom") });
    /// assert_eq!(failed.run().await, None);
    /// # });
    /// ```
    pub fn try_catch<F, Fut, E>(action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<A, E>> + Send + 'static,
        E: fmt::Debug + 'static,
    {
        Self::new(move || {
            let attempt = action();
            async move { absorb_rejection(attempt.await) }
        })
    }

    /// Lifts a fallible async function into a function returning `TaskOption`.
    ///
    /// See [`TaskOption::try_catch`].
    pub fn try_catch_k<B, F, Fut, E>(function: F) -> impl Fn(B) -> Self + Send + Sync + 'static
    where
        B: Clone + Send + Sync + 'static,
        F: Fn(B) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<A, E>> + Send + 'static,
        E: fmt::Debug + 'static,
    {
        let function = Arc::new(function);
        move |input: B| {
            let function = Arc::clone(&function);
            Self::try_catch(move || function(input.clone()))
        }
    }
}

impl<A: Clone + Send + Sync + 'static> TaskOption<A> {
    /// A computation that resolves to `Some(value)`.
    pub fn some(value: A) -> Self {
        Self::from_option(Some(value))
    }

    /// A computation that resolves to `value`.
    pub fn from_option(value: Option<A>) -> Self {
        Self {
            task: Task::pure(value),
        }
    }

    /// Lifts an `Option`-returning function into a `TaskOption`-returning one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::effect::TaskOption;
    ///
    /// # futures::executor::block_on(async {
    /// let positive = TaskOption::from_option_k(|n: i32| (n > 0).then_some(n));
    /// assert_eq!(positive(1).run().await, Some(1));
    /// assert_eq!(positive(-1).run().await, None);
    /// # });
    /// ```
    pub fn from_option_k<B, F>(function: F) -> impl Fn(B) -> Self + Send + Sync + 'static
    where
        F: Fn(B) -> Option<A> + Send + Sync + 'static,
    {
        move |input| Self::from_option(function(input))
    }

    /// Builds a function that keeps its input when `predicate` holds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::effect::TaskOption;
    ///
    /// # futures::executor::block_on(async {
    /// let above_two = TaskOption::from_predicate(|n: &i32| *n > 2);
    /// assert_eq!(above_two(1).run().await, None);
    /// assert_eq!(above_two(3).run().await, Some(3));
    /// # });
    /// ```
    pub fn from_predicate<P>(predicate: P) -> impl Fn(A) -> Self + Send + Sync + 'static
    where
        P: Fn(&A) -> bool + Send + Sync + 'static,
    {
        move |value| Self::from_option(<Option<()>>::guard(predicate(&value)).fmap(|()| value))
    }
}

// =============================================================================
// Functor / Monad / Alternative Operations
// =============================================================================

impl<A: Send + 'static> TaskOption<A> {
    /// Transforms a present result.
    pub fn fmap<B, F>(self, function: F) -> TaskOption<B>
    where
        F: Fn(A) -> B + Send + Sync + 'static,
        B: Send + 'static,
    {
        TaskOption {
            task: self.task.fmap(move |option| option.fmap(&function)),
        }
    }

    /// Chains a dependent computation.
    ///
    /// When this computation resolves to `None`, `function` is never called
    /// and the result is `None`.
    pub fn flat_map<B, F>(self, function: F) -> TaskOption<B>
    where
        F: Fn(A) -> TaskOption<B> + Send + Sync + 'static,
        B: Send + 'static,
    {
        let function = Arc::new(function);
        TaskOption::new(move || {
            let upstream = self.run();
            let function = Arc::clone(&function);
            async move {
                match upstream.await.fmap(|value| function(value)) {
                    Some(next) => next.run().await,
                    None => None,
                }
            }
        })
    }

    /// Alias for `flat_map`.
    pub fn and_then<B, F>(self, function: F) -> TaskOption<B>
    where
        F: Fn(A) -> TaskOption<B> + Send + Sync + 'static,
        B: Send + 'static,
    {
        self.flat_map(function)
    }

    /// Chains an `Option`-returning function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::effect::TaskOption;
    ///
    /// # futures::executor::block_on(async {
    /// let positive = |n: i32| (n > 0).then_some(n);
    /// assert_eq!(TaskOption::some(1).chain_option_k(positive).run().await, Some(1));
    /// assert_eq!(TaskOption::some(-1).chain_option_k(positive).run().await, None);
    /// # });
    /// ```
    pub fn chain_option_k<B, F>(self, function: F) -> TaskOption<B>
    where
        F: Fn(A) -> Option<B> + Send + Sync + 'static,
        B: Send + 'static,
    {
        TaskOption {
            task: self.task.fmap(move |option| option.flat_map(&function)),
        }
    }

    /// Keeps a present result only when `predicate` holds.
    #[must_use]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&A) -> bool + Send + Sync + 'static,
    {
        Self {
            task: self.task.fmap(move |option| option.filter(&predicate)),
        }
    }

    /// Falls back to `alternative()` when this computation resolves to `None`.
    ///
    /// On `Some`, `alternative` is never called.
    #[must_use]
    pub fn alt<F>(self, alternative: F) -> Self
    where
        F: Fn() -> Self + Send + Sync + 'static,
    {
        let alternative = Arc::new(alternative);
        Self::new(move || {
            let first = self.run();
            let alternative = Arc::clone(&alternative);
            async move {
                match first.await {
                    Some(value) => Some(value),
                    None => alternative().run().await,
                }
            }
        })
    }

    /// Applies a wrapped function to this value, running both concurrently.
    ///
    /// The function computation is started first. The result is `None` if
    /// either side is absent; both sides always run.
    pub fn apply<B, F>(self, function: TaskOption<F>) -> TaskOption<B>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        TaskOption::new(move || {
            let joined = future::join(function.run(), self.run());
            async move {
                let (function, value) = joined.await;
                function.apply(value)
            }
        })
    }

    /// Applies a wrapped function to this value, one after the other.
    ///
    /// The function computation runs first; if it is absent, this value is
    /// never invoked.
    pub fn apply_seq<B, F>(self, function: TaskOption<F>) -> TaskOption<B>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        TaskOption::new(move || {
            let first = function.run();
            let value = self.clone();
            async move {
                match first.await {
                    Some(function) => value.run().await.fmap(function),
                    None => None,
                }
            }
        })
    }
}

// =============================================================================
// Destructors
// =============================================================================

impl<A: Send + 'static> TaskOption<A> {
    /// Reduces the outcome to a plain task.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::effect::{Task, TaskOption};
    ///
    /// # futures::executor::block_on(async {
    /// let render = |task: TaskOption<i32>| {
    ///     task.fold(|| Task::pure("none".to_string()), |n| Task::pure(format!("some({n})")))
    /// };
    /// assert_eq!(render(TaskOption::some(1)).run().await, "some(1)");
    /// assert_eq!(render(TaskOption::none()).run().await, "none");
    /// # });
    /// ```
    pub fn fold<B, N, S>(self, on_none: N, on_some: S) -> Task<B>
    where
        N: Fn() -> Task<B> + Send + Sync + 'static,
        S: Fn(A) -> Task<B> + Send + Sync + 'static,
        B: Send + 'static,
    {
        self.task.flat_map(move |option| option.fold(&on_none, &on_some))
    }

    /// Returns the present value, or the result of `on_none()` otherwise.
    ///
    /// `on_none` is only called for an absent outcome.
    pub fn get_or_else<F>(self, on_none: F) -> Task<A>
    where
        F: Fn() -> Task<A> + Send + Sync + 'static,
    {
        let on_none = Arc::new(on_none);
        Task::new(move || {
            let outcome = self.run();
            let on_none = Arc::clone(&on_none);
            async move {
                match outcome.await {
                    Some(value) => value,
                    None => on_none().run().await,
                }
            }
        })
    }
}

fn absorb_rejection<A, E: fmt::Debug>(result: Result<A, E>) -> Option<A> {
    result
        .map_err(|reason| {
            tracing::debug!(?reason, "rejected future converted to none");
        })
        .ok()
}

impl<A: 'static> IntoFuture for TaskOption<A> {
    type Output = Option<A>;
    type IntoFuture = BoxFuture<'static, Option<A>>;

    fn into_future(self) -> Self::IntoFuture {
        self.run()
    }
}

impl<A> TypeConstructor for TaskOption<A> {
    type Inner = A;
    type WithType<B> = TaskOption<B>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_display_task_option() {
        assert_eq!(format!("{}", TaskOption::some(1)), "<TaskOption>");
    }

    #[rstest]
    #[case(Ok(5), Some(5))]
    #[case(Err("reason"), None)]
    fn absorb_rejection_discards_reason(
        #[case] result: Result<i32, &'static str>,
        #[case] expected: Option<i32>,
    ) {
        assert_eq!(absorb_rejection(result), expected);
    }

    #[tokio::test]
    async fn test_round_trip_through_task() {
        let task: Task<Option<i32>> = TaskOption::some(3).into();
        let back = TaskOption::from(task);
        assert_eq!(back.await, Some(3));
    }

    #[tokio::test]
    async fn test_from_task_wraps_in_some() {
        assert_eq!(TaskOption::from_task(Task::pure(7)).run().await, Some(7));
    }
}
