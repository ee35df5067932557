//! Pushing a collection of answers through a `MultiUnifier` is a
//! `flat_map`: each answer yields one renamed answer per consistent
//! alternative.  The multi-unifier is computed once per pair of
//! patterns, and moved into the operator; it is immutable and cheap
//! to clone, so the operator never needs coordination.
use crate::ground::Answer;
use crate::unification::MultiUnifier;
use crate::variable::Var;
use differential_dataflow::difference::Semigroup;
use differential_dataflow::Collection;
use timely::dataflow::Scope;
use tracing::debug;

/// An `AnswerCollection` is a `Collection` of `ground::Answer`s.
pub type AnswerCollection<G, R = isize> = Collection<G, Answer, R>;

/// Renames every answer in `answers` with each alternative of
/// `unifier`.  Answers that no alternative renames consistently are
/// dropped, so a non-existent multi-unifier yields an empty
/// collection, and the trivial one copies `answers` as is.
pub fn unify_answers<G: Scope, R: Semigroup>(
    answers: &AnswerCollection<G, R>,
    unifier: &MultiUnifier,
) -> AnswerCollection<G, R> {
    debug!(alternatives = unifier.size(), "unify_answers");

    let unifier = unifier.clone();
    answers.flat_map(move |answer| unifier.apply(&answer))
}

/// Same as `unify_answers`, but only keeps the bindings for `vars`,
/// e.g., the variables a query atom actually selects.
pub fn unify_and_project<G: Scope, R: Semigroup>(
    answers: &AnswerCollection<G, R>,
    unifier: &MultiUnifier,
    vars: &[Var],
) -> AnswerCollection<G, R> {
    let vars: Vec<Var> = vars.into();

    unify_answers(answers, unifier).map(move |answer| answer.project(&vars))
}

#[cfg(test)]
fn answer(pairs: &[(&str, u32)]) -> Answer {
    use crate::ground::Concept;

    pairs
        .iter()
        .map(|(name, id)| (Var::new(name), Concept::new(*id)))
        .collect()
}

#[cfg(test)]
fn unifier(pairs: &[(&str, &str)]) -> crate::unification::Unifier {
    pairs
        .iter()
        .map(|(s, t)| (Var::new(s), Var::new(t)))
        .collect()
}

#[test]
fn test_unify_happy_path() {
    use super::AnswerSink;
    use differential_dataflow::input::InputSession;
    use std::collections::HashSet;

    // The rule head `($a, $b)` unifies with the query atom `($x, $y)`
    // in both directions.
    let multi = MultiUnifier::new(vec![
        unifier(&[("a", "x"), ("b", "y")]),
        unifier(&[("a", "y"), ("b", "x")]),
    ]);

    let sink = AnswerSink::new();
    let writer = sink.writer();

    timely::execute::example(move |scope| {
        let mut rule_answers = InputSession::new();

        let unified = unify_answers(&rule_answers.to_collection(scope), &multi);
        writer.attach(&unified);

        rule_answers.advance_to(0);
        rule_answers.insert(answer(&[("a", 1), ("b", 2)]));
        rule_answers.flush();
        rule_answers.advance_to(1);
    });

    assert_eq!(
        sink.values::<HashSet<_>>(),
        [answer(&[("x", 1), ("y", 2)]), answer(&[("x", 2), ("y", 1)])]
            .iter()
            .cloned()
            .collect()
    );
}

#[test]
fn test_unify_drops_inconsistent() {
    use super::AnswerSink;
    use differential_dataflow::input::InputSession;
    use std::collections::HashSet;

    // `($x, $x)` only accepts rule answers where both roles agree.
    let multi = MultiUnifier::single(unifier(&[("a", "x"), ("b", "x")]));

    let sink = AnswerSink::new();
    let writer = sink.writer();

    timely::execute::example(move |scope| {
        let mut rule_answers = InputSession::new();

        let unified = unify_answers(&rule_answers.to_collection(scope), &multi);
        writer.attach(&unified);

        rule_answers.advance_to(0);
        for i in 1..5 {
            let b = if i % 2 == 0 { i } else { i + 1 };
            rule_answers.insert(answer(&[("a", i), ("b", b)]));
        }
        rule_answers.flush();
        rule_answers.advance_to(1);
    });

    assert_eq!(
        sink.values::<HashSet<_>>(),
        [answer(&[("x", 2)]), answer(&[("x", 4)])]
            .iter()
            .cloned()
            .collect()
    );
}

#[test]
fn test_unify_non_existent_and_trivial() {
    use super::AnswerSink;
    use differential_dataflow::input::InputSession;
    use std::collections::HashSet;

    let empty_sink = AnswerSink::new();
    let empty_writer = empty_sink.writer();
    let trivial_sink = AnswerSink::new();
    let trivial_writer = trivial_sink.writer();

    timely::execute::example(move |scope| {
        let mut rule_answers = InputSession::new();
        let answers = rule_answers.to_collection(scope);

        empty_writer.attach(&unify_answers(&answers, &MultiUnifier::non_existent()));
        trivial_writer.attach(&unify_answers(&answers, &MultiUnifier::trivial()));

        rule_answers.advance_to(0);
        rule_answers.insert(answer(&[("a", 1)]));
        rule_answers.insert(answer(&[("a", 2)]));
        rule_answers.flush();
        rule_answers.advance_to(1);
    });

    assert!(empty_sink.values::<HashSet<_>>().is_empty());
    assert_eq!(
        trivial_sink.values::<HashSet<_>>(),
        [answer(&[("a", 1)]), answer(&[("a", 2)])]
            .iter()
            .cloned()
            .collect()
    );
}

#[test]
fn test_unify_and_project() {
    use super::AnswerSink;
    use differential_dataflow::input::InputSession;

    let multi = MultiUnifier::single(unifier(&[("a", "x"), ("b", "y")]));

    let sink = AnswerSink::new();
    let writer = sink.writer();

    timely::execute::example(move |scope| {
        let mut rule_answers = InputSession::new();

        let unified =
            unify_and_project(&rule_answers.to_collection(scope), &multi, &[Var::new("x")]);
        writer.attach(&unified);

        rule_answers.advance_to(0);
        rule_answers.insert(answer(&[("a", 1), ("b", 2)]));
        rule_answers.insert(answer(&[("a", 1), ("b", 3)]));
        rule_answers.flush();
        rule_answers.advance_to(1);
    });

    // Both rule answers collapse onto the same projected answer.
    assert_eq!(
        sink.with_snapshot(|map| map.clone()),
        [(answer(&[("x", 1)]), 2)].iter().cloned().collect()
    );
}
