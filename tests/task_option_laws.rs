#![cfg(feature = "effect")]
//! Property-based tests for `TaskOption` laws.
//!
//! This module verifies that `TaskOption` satisfies:
//! - Functor laws (identity, composition)
//! - Monad laws (left identity, right identity, associativity)
//! - Alternative laws (left and right identity of `none`)
//! - Agreement of the parallel and sequential aggregates on their outcome

use optask::effect::{SequencePolicy, TaskOption};
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

fn lift(value: Option<i32>) -> TaskOption<i32> {
    TaskOption::from_option(value)
}

fn half_if_even(n: i32) -> TaskOption<i32> {
    TaskOption::from_option((n % 2 == 0).then_some(n / 2))
}

fn decrement_if_positive(n: i32) -> TaskOption<i32> {
    TaskOption::from_option((n > 0).then_some(n - 1))
}

// =============================================================================
// Functor Laws
// =============================================================================

proptest! {
    /// Identity Law: fmap(id) == id
    #[test]
    fn prop_task_option_functor_identity(value in proptest::option::of(any::<i32>())) {
        let runtime = runtime();

        let left = runtime.block_on(lift(value).fmap(|x| x).run());

        prop_assert_eq!(left, value);
    }

    /// Composition Law: fmap(f).fmap(g) == fmap(|x| g(f(x)))
    #[test]
    fn prop_task_option_functor_composition(value in proptest::option::of(any::<i32>())) {
        let function1 = |n: i32| n.wrapping_add(1);
        let function2 = |n: i32| n.wrapping_mul(2);
        let runtime = runtime();

        let left = runtime.block_on(lift(value).fmap(function1).fmap(function2).run());
        let right = runtime.block_on(lift(value).fmap(move |n| function2(function1(n))).run());

        prop_assert_eq!(left, right);
    }
}

// =============================================================================
// Monad Laws
// =============================================================================

proptest! {
    /// Left Identity Law: some(a).flat_map(f) == f(a)
    #[test]
    fn prop_task_option_monad_left_identity(value: i32) {
        let runtime = runtime();

        let left = runtime.block_on(TaskOption::some(value).flat_map(half_if_even).run());
        let right = runtime.block_on(half_if_even(value).run());

        prop_assert_eq!(left, right);
    }

    /// Right Identity Law: m.flat_map(some) == m
    #[test]
    fn prop_task_option_monad_right_identity(value in proptest::option::of(any::<i32>())) {
        let runtime = runtime();

        let left = runtime.block_on(lift(value).flat_map(TaskOption::some).run());

        prop_assert_eq!(left, value);
    }

    /// Associativity Law: m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))
    #[test]
    fn prop_task_option_monad_associativity(value in proptest::option::of(any::<i32>())) {
        let runtime = runtime();

        let left = runtime.block_on(
            lift(value)
                .flat_map(half_if_even)
                .flat_map(decrement_if_positive)
                .run(),
        );
        let right = runtime.block_on(
            lift(value)
                .flat_map(|n| half_if_even(n).flat_map(decrement_if_positive))
                .run(),
        );

        prop_assert_eq!(left, right);
    }
}

// =============================================================================
// Alternative Laws
// =============================================================================

proptest! {
    /// none().alt(|| m) == m
    #[test]
    fn prop_task_option_alt_left_identity(value in proptest::option::of(any::<i32>())) {
        let runtime = runtime();

        let left = runtime.block_on(TaskOption::none().alt(move || lift(value)).run());

        prop_assert_eq!(left, value);
    }

    /// m.alt(|| none()) == m
    #[test]
    fn prop_task_option_alt_right_identity(value in proptest::option::of(any::<i32>())) {
        let runtime = runtime();

        let left = runtime.block_on(lift(value).alt(TaskOption::none).run());

        prop_assert_eq!(left, value);
    }
}

// =============================================================================
// Aggregation
// =============================================================================

proptest! {
    /// Both policies resolve to the same outcome, which is `Some` exactly when
    /// every element is present.
    #[test]
    fn prop_sequence_policies_agree(values in proptest::collection::vec(proptest::option::of(any::<i32>()), 0..32)) {
        let runtime = runtime();
        let items: Vec<TaskOption<i32>> = values.iter().copied().map(lift).collect();

        let parallel = runtime.block_on(
            TaskOption::sequence(items.clone(), SequencePolicy::Parallel).run(),
        );
        let sequential = runtime.block_on(
            TaskOption::sequence(items, SequencePolicy::Sequential).run(),
        );
        let expected: Option<Vec<i32>> = values.into_iter().collect();

        prop_assert_eq!(&parallel, &expected);
        prop_assert_eq!(sequential, expected);
    }

    /// Traversal equals mapping followed by aggregation.
    #[test]
    fn prop_traverse_is_map_then_sequence(values in proptest::collection::vec(any::<i32>(), 0..32)) {
        let runtime = runtime();

        let traversed = runtime.block_on(
            TaskOption::traverse_array(values.clone(), half_if_even).run(),
        );
        let sequenced = runtime.block_on(
            TaskOption::sequence_array(values.into_iter().map(half_if_even)).run(),
        );

        prop_assert_eq!(traversed, sequenced);
    }
}
