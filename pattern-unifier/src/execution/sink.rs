//! Differential Dataflow collections are closer to pipes that
//! describe a computation's dataflow than to concrete collections.
//! In order to get answers out of a DD computation, we must listen to
//! a collection's change stream, and reify the result into the
//! collection we want.
//!
//! The write end is decoupled from the read (snapshot) end because we
//! write from a worker thread, and so must pass ownership of the write
//! end to a closure.
use super::AnswerCollection;
use crate::ground::Answer;
use differential_dataflow::difference::Semigroup;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use timely::dataflow::Scope;

/// An `AnswerSink` exposes a running multiplicity snapshot for all the
/// answers it has received (so far) from differential dataflow
/// collections.
///
/// In order to hook up a collection to a sink, one must first gain
/// ownership of an `AnswerWriter`, by calling `AnswerSink::writer()`.
#[derive(Clone, Debug)]
pub struct AnswerSink<R: Semigroup = isize> {
    inner: Arc<Mutex<HashMap<Answer, R>>>,
}

impl<R: Semigroup> AnswerSink<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns a fresh writer for the sink.
    #[must_use]
    pub fn writer(&self) -> AnswerWriter<R> {
        AnswerWriter {
            inner: self.inner.clone(),
        }
    }

    /// Collects all the answers with non-zero multiplicities.
    pub fn values<Ret: std::iter::FromIterator<Answer>>(&self) -> Ret {
        self.with_snapshot(|map| map.keys().cloned().collect())
    }

    /// Calls `handler` with a snapshot of the answers in the sink.  The
    /// key in the map is the answer, and the value its multiplicity.
    /// There is never a zero-valued entry.
    pub fn with_snapshot<F, Ret>(&self, handler: F) -> Ret
    where
        F: FnOnce(&HashMap<Answer, R>) -> Ret,
    {
        let counts = self.inner.lock().expect("sink lock poisoned");
        handler(&counts)
    }
}

impl<R: Semigroup> Default for AnswerSink<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct AnswerWriter<R: Semigroup = isize> {
    inner: Arc<Mutex<HashMap<Answer, R>>>,
}

impl<R: Semigroup> AnswerWriter<R> {
    /// Attaches an `inspect`or closure to `collection`; the sink's state
    /// will be updated to reflect the multiplicity of the answers in
    /// that collection.
    ///
    /// Attaching the same sink to multiple collections is equivalent
    /// to attaching it to the concatenation of these collections.
    pub fn attach<G: Scope>(&self, collection: &AnswerCollection<G, R>) {
        let inner = self.inner.clone();

        collection.inspect(move |(answer, _time, diff)| {
            let mut counts = inner.lock().expect("sink lock poisoned");
            if counts
                .entry(answer.clone())
                .and_modify(|acc| *acc += diff)
                .or_insert_with(|| diff.clone())
                .is_zero()
            {
                counts.remove(answer);
            }
        });
    }
}

#[test]
fn test_multi_counts() {
    use crate::ground::Concept;
    use crate::variable::Var;
    use differential_dataflow::input::InputSession;

    let x = Var::new("x");
    let answer = move |i: u32| -> Answer { std::iter::once((x.clone(), Concept::new(i))).collect() };
    let expected = vec![(answer(1), 2), (answer(2), 1), (answer(4), -1)];

    let sink = AnswerSink::new();
    let writer = sink.writer();

    timely::execute::example(move |scope| {
        let mut foo = InputSession::new();

        writer.attach(&foo.to_collection(scope));

        foo.advance_to(0);
        foo.insert(answer(1));
        foo.insert(answer(2));
        foo.insert(answer(3));
        foo.flush();
        foo.advance_to(1);
        foo.insert(answer(1));
        foo.remove(answer(3));
        foo.remove(answer(4));
        foo.flush();
        foo.advance_to(2);
    });

    assert_eq!(
        sink.with_snapshot(|map| map.clone()),
        expected.into_iter().collect()
    );
}
