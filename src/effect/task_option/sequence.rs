//! Aggregation of many `TaskOption`s into one.
//!
//! Two policies are available:
//!
//! - [`SequencePolicy::Parallel`]: on the aggregate's first poll every element
//!   is invoked in index order. All elements run to completion; the aggregate
//!   resolves once every one of them has resolved, to `Some` of the values in
//!   index order, or to `None` if any element was absent.
//! - [`SequencePolicy::Sequential`]: elements are invoked one at a time in
//!   index order. Element `i + 1` is never invoked before element `i` produced
//!   a value, and the first `None` ends the walk.
//!
//! Both policies resolve an empty collection to `Some(vec![])` without
//! invoking anything. Nothing is ever cancelled.
//!
//! The sequential walk is the state machine
//!
//! ```text
//! Start -> Awaiting { index: 0, accumulated: [] }
//! Awaiting { i, acc } --Some(v)--> Awaiting { i + 1, acc + [v] }   (i + 1 < n)
//! Awaiting { i, acc } --Some(v)--> Finished, Some(acc + [v])        (i + 1 == n)
//! Awaiting { i, acc } --None-----> Finished, None
//! ```

use std::fmt;
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;
use std::task::{Context, Poll, ready};

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use pin_project_lite::pin_project;

use super::TaskOption;

// =============================================================================
// Policy
// =============================================================================

/// How [`TaskOption::sequence`] schedules the elements it aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SequencePolicy {
    /// Start every element without waiting on the others.
    #[default]
    Parallel,
    /// Start each element only after the previous one produced a value.
    Sequential,
}

impl SequencePolicy {
    /// Returns the canonical lowercase name of the policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parallel => "parallel",
            Self::Sequential => "sequential",
        }
    }
}

impl fmt::Display for SequencePolicy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SequencePolicy {
    type Err = ParsePolicyError;

    /// Accepts `parallel`, `par`, `sequential` and `seq`, ignoring ASCII case
    /// and surrounding whitespace.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim();
        if normalized.eq_ignore_ascii_case("parallel") || normalized.eq_ignore_ascii_case("par") {
            Ok(Self::Parallel)
        } else if normalized.eq_ignore_ascii_case("sequential")
            || normalized.eq_ignore_ascii_case("seq")
        {
            Ok(Self::Sequential)
        } else {
            Err(ParsePolicyError {
                input: input.to_owned(),
            })
        }
    }
}

/// Error returned when a string names no [`SequencePolicy`].
///
/// # Examples
///
/// ```rust
/// use optask::effect::SequencePolicy;
///
/// let error = "eventually".parse::<SequencePolicy>().unwrap_err();
/// assert_eq!(
///     error.to_string(),
///     "unknown sequence policy `eventually`: expected `parallel` or `sequential`"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePolicyError {
    input: String,
}

impl ParsePolicyError {
    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParsePolicyError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unknown sequence policy `{}`: expected `parallel` or `sequential`",
            self.input
        )
    }
}

impl std::error::Error for ParsePolicyError {}

// =============================================================================
// Entry Points
// =============================================================================

impl<A: Send + 'static> TaskOption<A> {
    /// Aggregates `items` under the given policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use optask::effect::{SequencePolicy, TaskOption};
    ///
    /// # futures::executor::block_on(async {
    /// let items = vec![TaskOption::some(1), TaskOption::some(2)];
    /// let all = TaskOption::sequence(items.clone(), SequencePolicy::Parallel);
    /// assert_eq!(all.run().await, Some(vec![1, 2]));
    ///
    /// let with_gap = vec![TaskOption::some(1), TaskOption::none(), TaskOption::some(3)];
    /// let all = TaskOption::sequence(with_gap, SequencePolicy::Sequential);
    /// assert_eq!(all.run().await, None);
    /// # });
    /// ```
    pub fn sequence<I>(items: I, policy: SequencePolicy) -> TaskOption<Vec<A>>
    where
        I: IntoIterator<Item = Self>,
    {
        match policy {
            SequencePolicy::Parallel => Self::sequence_array(items),
            SequencePolicy::Sequential => Self::sequence_seq_array(items),
        }
    }

    /// Aggregates `items` under the parallel policy.
    pub fn sequence_array<I>(items: I) -> TaskOption<Vec<A>>
    where
        I: IntoIterator<Item = Self>,
    {
        let elements: Arc<[Self]> = items.into_iter().collect();
        TaskOption::new(move || SequencePar::new(Arc::clone(&elements)))
    }

    /// Aggregates `items` under the sequential policy.
    pub fn sequence_seq_array<I>(items: I) -> TaskOption<Vec<A>>
    where
        I: IntoIterator<Item = Self>,
    {
        let elements: Arc<[Self]> = items.into_iter().collect();
        TaskOption::new(move || SequenceSeq::new(Arc::clone(&elements)))
    }

    /// Maps every input to a `TaskOption` and aggregates them in parallel.
    ///
    /// `function` is applied when the aggregate is built; the computations it
    /// returns run when the aggregate is invoked.
    pub fn traverse_array<B, I, F>(inputs: I, function: F) -> TaskOption<Vec<A>>
    where
        I: IntoIterator<Item = B>,
        F: FnMut(B) -> Self,
    {
        Self::sequence_array(inputs.into_iter().map(function))
    }

    /// Like [`TaskOption::traverse_array`], also passing each input's index.
    pub fn traverse_array_with_index<B, I, F>(inputs: I, mut function: F) -> TaskOption<Vec<A>>
    where
        I: IntoIterator<Item = B>,
        F: FnMut(usize, B) -> Self,
    {
        Self::sequence_array(
            inputs
                .into_iter()
                .enumerate()
                .map(|(index, input)| function(index, input)),
        )
    }

    /// Maps every input to a `TaskOption` and aggregates them sequentially.
    pub fn traverse_seq_array<B, I, F>(inputs: I, function: F) -> TaskOption<Vec<A>>
    where
        I: IntoIterator<Item = B>,
        F: FnMut(B) -> Self,
    {
        Self::sequence_seq_array(inputs.into_iter().map(function))
    }

    /// Like [`TaskOption::traverse_seq_array`], also passing each input's index.
    pub fn traverse_seq_array_with_index<B, I, F>(inputs: I, mut function: F) -> TaskOption<Vec<A>>
    where
        I: IntoIterator<Item = B>,
        F: FnMut(usize, B) -> Self,
    {
        Self::sequence_seq_array(
            inputs
                .into_iter()
                .enumerate()
                .map(|(index, input)| function(index, input)),
        )
    }
}

// =============================================================================
// Parallel Policy
// =============================================================================

pin_project! {
    /// Future of one invocation of a parallel aggregate.
    #[must_use = "futures do nothing unless polled"]
    pub(crate) struct SequencePar<A> {
        #[pin]
        state: ParState<A>,
    }
}

pin_project! {
    #[project = ParStateProj]
    enum ParState<A> {
        // Elements not yet invoked.
        Start {
            elements: Arc<[TaskOption<A>]>,
        },
        // `outcomes[i]` is filled once element `i` resolved; `pending` holds
        // the elements still running.
        Running {
            outcomes: Vec<Option<Option<A>>>,
            pending: FuturesUnordered<Indexed<A>>,
        },
        Finished,
    }
}

/// An element's future tagged with its position in the aggregate.
struct Indexed<A> {
    index: usize,
    future: BoxFuture<'static, Option<A>>,
}

impl<A> Future for Indexed<A> {
    type Output = (usize, Option<A>);

    fn poll(mut self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let index = self.index;
        self.future
            .as_mut()
            .poll(context)
            .map(|outcome| (index, outcome))
    }
}

impl<A> SequencePar<A> {
    fn new(elements: Arc<[TaskOption<A>]>) -> Self {
        Self {
            state: ParState::Start { elements },
        }
    }
}

impl<A: 'static> Future for SequencePar<A> {
    type Output = Option<Vec<A>>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            match this.state.as_mut().project() {
                ParStateProj::Start { elements } => {
                    // Invoke and poll once in index order; after that only
                    // woken elements are polled again.
                    let mut outcomes = Vec::with_capacity(elements.len());
                    let pending = FuturesUnordered::new();
                    for (index, element) in elements.iter().enumerate() {
                        let mut future = element.run();
                        match future.as_mut().poll(context) {
                            Poll::Ready(outcome) => outcomes.push(Some(outcome)),
                            Poll::Pending => {
                                outcomes.push(None);
                                pending.push(Indexed { index, future });
                            }
                        }
                    }
                    this.state.set(ParState::Running { outcomes, pending });
                }
                ParStateProj::Running { outcomes, pending } => {
                    while let Some((index, outcome)) = ready!(pending.poll_next_unpin(context)) {
                        outcomes[index] = Some(outcome);
                    }

                    let outcomes: Vec<Option<A>> = mem::take(outcomes)
                        .into_iter()
                        .map(|slot| slot.expect("every element resolved once `pending` drained"))
                        .collect();
                    this.state.set(ParState::Finished);
                    return Poll::Ready(collect_outcomes(outcomes));
                }
                ParStateProj::Finished => {
                    panic!("SequencePar polled after completion");
                }
            }
        }
    }
}

fn collect_outcomes<A>(outcomes: Vec<Option<A>>) -> Option<Vec<A>> {
    let absent = outcomes.iter().filter(|outcome| outcome.is_none()).count();
    if absent > 0 {
        tracing::trace!(absent, total = outcomes.len(), "parallel sequence collapsed to none");
        return None;
    }
    outcomes.into_iter().collect()
}

// =============================================================================
// Sequential Policy
// =============================================================================

pin_project! {
    /// Future of one invocation of a sequential aggregate.
    #[must_use = "futures do nothing unless polled"]
    pub(crate) struct SequenceSeq<A> {
        elements: Arc<[TaskOption<A>]>,
        #[pin]
        state: SeqState<A>,
    }
}

pin_project! {
    #[project = SeqStateProj]
    enum SeqState<A> {
        Start,
        // Element `index` is running; `accumulated` holds the values of 0..index.
        Awaiting {
            index: usize,
            accumulated: Vec<A>,
            #[pin]
            current: BoxFuture<'static, Option<A>>,
        },
        Finished,
    }
}

impl<A> SequenceSeq<A> {
    fn new(elements: Arc<[TaskOption<A>]>) -> Self {
        Self {
            elements,
            state: SeqState::Start,
        }
    }
}

impl<A: 'static> Future for SequenceSeq<A> {
    type Output = Option<Vec<A>>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        loop {
            match this.state.as_mut().project() {
                SeqStateProj::Start => {
                    let Some(first) = this.elements.first() else {
                        this.state.set(SeqState::Finished);
                        return Poll::Ready(Some(Vec::new()));
                    };
                    let current = first.run();
                    this.state.set(SeqState::Awaiting {
                        index: 0,
                        accumulated: Vec::with_capacity(this.elements.len()),
                        current,
                    });
                }
                SeqStateProj::Awaiting {
                    index,
                    accumulated,
                    current,
                } => {
                    let Some(value) = ready!(current.poll(context)) else {
                        tracing::trace!(
                            index = *index,
                            total = this.elements.len(),
                            "sequential sequence halted on absent element"
                        );
                        this.state.set(SeqState::Finished);
                        return Poll::Ready(None);
                    };
                    accumulated.push(value);
                    let next = *index + 1;
                    let accumulated = mem::take(accumulated);

                    match this.elements.get(next) {
                        Some(element) => {
                            let current = element.run();
                            this.state.set(SeqState::Awaiting {
                                index: next,
                                accumulated,
                                current,
                            });
                        }
                        None => {
                            this.state.set(SeqState::Finished);
                            return Poll::Ready(Some(accumulated));
                        }
                    }
                }
                SeqStateProj::Finished => {
                    panic!("SequenceSeq polled after completion");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("parallel", SequencePolicy::Parallel)]
    #[case("PAR", SequencePolicy::Parallel)]
    #[case(" sequential ", SequencePolicy::Sequential)]
    #[case("Seq", SequencePolicy::Sequential)]
    fn policy_parses_known_names(#[case] input: &str, #[case] expected: SequencePolicy) {
        assert_eq!(input.parse::<SequencePolicy>(), Ok(expected));
    }

    #[test]
    fn policy_rejects_unknown_name() {
        let error = "sometimes".parse::<SequencePolicy>().unwrap_err();
        assert_eq!(error.input(), "sometimes");
    }

    #[rstest]
    #[case(SequencePolicy::Parallel, "parallel")]
    #[case(SequencePolicy::Sequential, "sequential")]
    fn policy_display_round_trips(#[case] policy: SequencePolicy, #[case] rendered: &str) {
        assert_eq!(policy.to_string(), rendered);
        assert_eq!(rendered.parse::<SequencePolicy>(), Ok(policy));
    }

    #[test]
    fn policy_defaults_to_parallel() {
        assert_eq!(SequencePolicy::default(), SequencePolicy::Parallel);
    }

    #[rstest]
    #[case(vec![Some(1), Some(2)], Some(vec![1, 2]))]
    #[case(vec![Some(1), None], None)]
    #[case(vec![], Some(vec![]))]
    fn collect_outcomes_requires_every_value(
        #[case] outcomes: Vec<Option<i32>>,
        #[case] expected: Option<Vec<i32>>,
    ) {
        assert_eq!(collect_outcomes(outcomes), expected);
    }

    #[tokio::test]
    async fn sequential_future_resolves_empty_input() {
        let elements: Arc<[TaskOption<i32>]> = Arc::from(Vec::new());
        assert_eq!(SequenceSeq::new(elements).await, Some(vec![]));
    }

    #[tokio::test]
    async fn parallel_future_resolves_empty_input() {
        let elements: Arc<[TaskOption<i32>]> = Arc::from(Vec::new());
        assert_eq!(SequencePar::new(elements).await, Some(vec![]));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::SequencePolicy;

    #[test]
    fn policy_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SequencePolicy::Sequential).unwrap(),
            "\"sequential\""
        );
    }

    #[test]
    fn policy_deserializes_lowercase() {
        let policy: SequencePolicy = serde_json::from_str("\"parallel\"").unwrap();
        assert_eq!(policy, SequencePolicy::Parallel);
    }
}
