//! `Task` - a re-invokable deferred asynchronous computation.
//!
//! # Evaluation Semantics
//!
//! A `Task<A>` holds a shared thunk that builds a fresh future each time the
//! task is invoked. Invocation is [`Task::run`]; awaiting a task directly
//! (through [`IntoFuture`]) invokes it once.
//!
//! | Constructor | When the effect runs |
//! |-------------|----------------------|
//! | `Task::pure(value)` | never, the value is cloned out |
//! | `Task::from_io(f)` | `f` runs when the task is invoked |
//! | `Task::new(\|\| async { ... })` | the async block runs when the future is polled |
//!
//! Composed tasks invoke their upstream once per invocation. Nothing is
//! cached between invocations.
//!
//! # Examples
//!
//! ```rust
//! use optask::effect::Task;
//!
//! # futures::executor::block_on(async {
//! let task = Task::pure(10)
//!     .fmap(|x| x * 2)
//!     .flat_map(|x| Task::pure(x + 1));
//! assert_eq!(task.run().await, 21);
//! assert_eq!(task.await, 21);
//! # });
//! ```

use std::fmt;
use std::future::{Future, IntoFuture};
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};

use crate::typeclass::TypeConstructor;

type Thunk<A> = dyn Fn() -> BoxFuture<'static, A> + Send + Sync;

/// A deferred, re-invokable asynchronous computation producing an `A`.
///
/// Cloning a `Task` is cheap and shares the underlying thunk.
///
/// # Monad Laws
///
/// 1. **Left Identity**: `Task::pure(a).flat_map(f) == f(a)`
/// 2. **Right Identity**: `m.flat_map(Task::pure) == m`
/// 3. **Associativity**: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
pub struct Task<A> {
    thunk: Arc<Thunk<A>>,
}

static_assertions::assert_impl_all!(Task<i32>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Task<String>: Send, Sync, Clone);

impl<A> Clone for Task<A> {
    fn clone(&self) -> Self {
        Self {
            thunk: Arc::clone(&self.thunk),
        }
    }
}

impl<A> fmt::Debug for Task<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Task").finish_non_exhaustive()
    }
}

impl<A> fmt::Display for Task<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<Task>")
    }
}

// =============================================================================
// Construction and Invocation
// =============================================================================

impl<A: 'static> Task<A> {
    /// Creates a task from a future factory.
    ///
    /// `action` is called once per invocation; the future it returns is not
    /// polled until the caller polls the invocation's future.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::effect::Task;
    ///
    /// # futures::executor::block_on(async {
    /// let task = Task::new(|| async { 10 + 20 });
    /// assert_eq!(task.run().await, 30);
    /// # });
    /// ```
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = A> + Send + 'static,
    {
        Self {
            thunk: Arc::new(move || action().boxed()),
        }
    }

    /// Invokes the task, returning a fresh future of its result.
    ///
    /// Every call re-executes the captured effects.
    pub fn run(&self) -> BoxFuture<'static, A> {
        (self.thunk)()
    }
}

impl<A: Send + 'static> Task<A> {
    /// Wraps a synchronous, possibly side-effecting function as a task.
    ///
    /// `effect` runs when the task is invoked, never at construction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::effect::Task;
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicBool, Ordering};
    ///
    /// # futures::executor::block_on(async {
    /// let executed = Arc::new(AtomicBool::new(false));
    /// let flag = Arc::clone(&executed);
    /// let task = Task::from_io(move || flag.store(true, Ordering::SeqCst));
    /// assert!(!executed.load(Ordering::SeqCst));
    ///
    /// task.run().await;
    /// assert!(executed.load(Ordering::SeqCst));
    /// # });
    /// ```
    pub fn from_io<F>(effect: F) -> Self
    where
        F: Fn() -> A + Send + Sync + 'static,
    {
        Self::new(move || future::ready(effect()))
    }
}

impl<A: Clone + Send + Sync + 'static> Task<A> {
    /// Creates a task that resolves immediately to `value`.
    ///
    /// Each invocation yields a clone of `value`.
    pub fn pure(value: A) -> Self {
        Self::new(move || future::ready(value.clone()))
    }
}

// =============================================================================
// Functor / Monad Operations
// =============================================================================

impl<A: Send + 'static> Task<A> {
    /// Transforms the result of the task.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::effect::Task;
    ///
    /// # futures::executor::block_on(async {
    /// assert_eq!(Task::pure(21).fmap(|x| x * 2).run().await, 42);
    /// # });
    /// ```
    pub fn fmap<B, F>(self, function: F) -> Task<B>
    where
        F: Fn(A) -> B + Send + Sync + 'static,
        B: Send + 'static,
    {
        let function = Arc::new(function);
        Task::new(move || {
            let upstream = self.run();
            let function = Arc::clone(&function);
            async move { function(upstream.await) }
        })
    }

    /// Resolves this task, feeds its result to `function` and resolves the
    /// task it returns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::effect::Task;
    ///
    /// # futures::executor::block_on(async {
    /// let task = Task::pure(10).flat_map(|x| Task::pure(x * 2));
    /// assert_eq!(task.run().await, 20);
    /// # });
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> Task<B>
    where
        F: Fn(A) -> Task<B> + Send + Sync + 'static,
        B: Send + 'static,
    {
        let function = Arc::new(function);
        Task::new(move || {
            let upstream = self.run();
            let function = Arc::clone(&function);
            async move { function(upstream.await).run().await }
        })
    }

    /// Alias for `flat_map`.
    pub fn and_then<B, F>(self, function: F) -> Task<B>
    where
        F: Fn(A) -> Task<B> + Send + Sync + 'static,
        B: Send + 'static,
    {
        self.flat_map(function)
    }

    /// Runs this task for its effects, then `next`.
    #[must_use]
    pub fn then<B>(self, next: Task<B>) -> Task<B>
    where
        B: Send + 'static,
    {
        self.flat_map(move |_| next.clone())
    }
}

// =============================================================================
// Applicative Operations
// =============================================================================

impl<A: Send + 'static> Task<A> {
    /// Combines two tasks with a function, running them one after the other.
    ///
    /// `other` is invoked only after this task resolved.
    pub fn map2<B, C, F>(self, other: Task<B>, function: F) -> Task<C>
    where
        F: Fn(A, B) -> C + Send + Sync + 'static,
        B: Send + 'static,
        C: Send + 'static,
    {
        let function = Arc::new(function);
        Task::new(move || {
            let first = self.run();
            let second = other.clone();
            let function = Arc::clone(&function);
            async move {
                let value_a = first.await;
                let value_b = second.run().await;
                function(value_a, value_b)
            }
        })
    }

    /// Combines two tasks into a tuple, running them one after the other.
    #[must_use]
    pub fn product<B>(self, other: Task<B>) -> Task<(A, B)>
    where
        B: Send + 'static,
    {
        self.map2(other, |a, b| (a, b))
    }

    /// Runs two tasks concurrently and returns both results.
    ///
    /// Both are invoked together; `self` is started first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::effect::Task;
    ///
    /// # futures::executor::block_on(async {
    /// let (x, y) = Task::pure(1).par(Task::pure("two")).run().await;
    /// assert_eq!((x, y), (1, "two"));
    /// # });
    /// ```
    #[must_use]
    pub fn par<B>(self, other: Task<B>) -> Task<(A, B)>
    where
        B: Send + 'static,
    {
        Task::new(move || future::join(self.run(), other.run()))
    }
}

// =============================================================================
// Batch Execution
// =============================================================================

impl<A: Send + 'static> Task<A> {
    /// Aggregates tasks concurrently.
    ///
    /// On invocation every task is invoked in index order; the results keep
    /// the input order regardless of completion order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::effect::Task;
    ///
    /// # futures::executor::block_on(async {
    /// let all = Task::sequence_array((0..4).map(Task::pure));
    /// assert_eq!(all.run().await, vec![0, 1, 2, 3]);
    /// # });
    /// ```
    pub fn sequence_array<I>(tasks: I) -> Task<Vec<A>>
    where
        I: IntoIterator<Item = Self>,
    {
        let tasks: Arc<[Self]> = tasks.into_iter().collect();
        Task::new(move || future::join_all(tasks.iter().map(Self::run)))
    }

    /// Aggregates tasks strictly in order.
    ///
    /// Task `i + 1` is invoked only after task `i` resolved.
    pub fn sequence_seq_array<I>(tasks: I) -> Task<Vec<A>>
    where
        I: IntoIterator<Item = Self>,
    {
        let tasks: Arc<[Self]> = tasks.into_iter().collect();
        Task::new(move || {
            let tasks = Arc::clone(&tasks);
            async move {
                let mut values = Vec::with_capacity(tasks.len());
                for task in tasks.iter() {
                    values.push(task.run().await);
                }
                values
            }
        })
    }
}

impl<A: 'static> IntoFuture for Task<A> {
    type Output = A;
    type IntoFuture = BoxFuture<'static, A>;

    fn into_future(self) -> Self::IntoFuture {
        self.run()
    }
}

impl<A> TypeConstructor for Task<A> {
    type Inner = A;
    type WithType<B> = Task<B>;
}
