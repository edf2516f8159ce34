//! Operators over [`Stream`]s of [`Result`]s.

use std::{
    mem,
    pin::Pin,
    task::{Context, Poll},
};

use futures::{
    ready,
    stream::{FusedStream, LocalBoxStream},
    Stream,
};

/// Boxed observable: [`Stream`] of values which terminates either on its end
/// or right after its first `Err` item.
pub type Observable<T, E> = LocalBoxStream<'static, Result<T, E>>;

/// Extension of [`Stream`]s of [`Result`]s with observable operators.
pub trait ObservableExt<T, E>: Stream<Item = Result<T, E>> + Sized {
    /// Forwards all values of this [`Stream`] and, once it's completed
    /// normally, continues with the [`Stream`] built by the `factory` from the
    /// last forwarded value (`None` if there was none).
    ///
    /// An error of this [`Stream`] is forwarded immediately and terminates
    /// the result, so the `factory` is never called in this case. An `Err`
    /// returned by the `factory` itself is emitted as the terminal error.
    fn chain_with<F, D>(self, factory: F) -> ChainWith<Self, F, D, T>
    where
        T: Clone,
        F: FnOnce(Option<T>) -> Result<D, E>,
        D: Stream<Item = Result<T, E>>,
    {
        ChainWith::new(self, factory)
    }

    /// Skips values equal to the previously emitted one.
    ///
    /// An error is never skipped and terminates the result.
    fn distinct_until_changed(self) -> DistinctUntilChanged<Self, T>
    where
        T: Clone + PartialEq,
    {
        DistinctUntilChanged {
            stream: self,
            last: None,
            done: false,
        }
    }
}

impl<S, T, E> ObservableExt<T, E> for S where S: Stream<Item = Result<T, E>> {}

/// Stage of a [`ChainWith`] stream.
enum Stage<S, F, D, T> {
    /// Source stream is being forwarded.
    Source {
        /// Source stream.
        source: S,

        /// Factory of the dependent stream.
        factory: F,

        /// Last value emitted by the source stream.
        last: Option<T>,
    },

    /// Source stream has completed and dependent stream is being forwarded.
    Dependent(D),

    /// Either completed or errored.
    Done,
}

/// [`Stream`] for the [`ObservableExt::chain_with`] operator.
pub struct ChainWith<S, F, D, T> {
    stage: Stage<S, F, D, T>,
}

impl<S, F, D, T> ChainWith<S, F, D, T> {
    fn new(source: S, factory: F) -> Self {
        Self {
            stage: Stage::Source {
                source,
                factory,
                last: None,
            },
        }
    }
}

// Only `S` and `D` are ever polled, and both are required to be `Unpin` for
// polling, so `factory` and `last` are never pinned.
impl<S: Unpin, F, D: Unpin, T> Unpin for ChainWith<S, F, D, T> {}

impl<S, F, D, T, E> Stream for ChainWith<S, F, D, T>
where
    S: Stream<Item = Result<T, E>> + Unpin,
    F: FnOnce(Option<T>) -> Result<D, E>,
    D: Stream<Item = Result<T, E>> + Unpin,
    T: Clone,
{
    type Item = Result<T, E>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match &mut this.stage {
                Stage::Source { source, last, .. } => {
                    match ready!(Pin::new(source).poll_next(cx)) {
                        Some(Ok(val)) => {
                            *last = Some(val.clone());
                            return Poll::Ready(Some(Ok(val)));
                        }
                        Some(Err(e)) => {
                            this.stage = Stage::Done;
                            return Poll::Ready(Some(Err(e)));
                        }
                        None => {
                            let stage =
                                mem::replace(&mut this.stage, Stage::Done);
                            if let Stage::Source { factory, last, .. } = stage
                            {
                                match factory(last) {
                                    Ok(dependent) => {
                                        this.stage =
                                            Stage::Dependent(dependent);
                                    }
                                    Err(e) => return Poll::Ready(Some(Err(e))),
                                }
                            }
                        }
                    }
                }
                Stage::Dependent(dependent) => {
                    return match ready!(Pin::new(dependent).poll_next(cx)) {
                        Some(Ok(val)) => Poll::Ready(Some(Ok(val))),
                        Some(Err(e)) => {
                            this.stage = Stage::Done;
                            Poll::Ready(Some(Err(e)))
                        }
                        None => {
                            this.stage = Stage::Done;
                            Poll::Ready(None)
                        }
                    };
                }
                Stage::Done => return Poll::Ready(None),
            }
        }
    }
}

impl<S, F, D, T, E> FusedStream for ChainWith<S, F, D, T>
where
    S: Stream<Item = Result<T, E>> + Unpin,
    F: FnOnce(Option<T>) -> Result<D, E>,
    D: Stream<Item = Result<T, E>> + Unpin,
    T: Clone,
{
    fn is_terminated(&self) -> bool {
        matches!(self.stage, Stage::Done)
    }
}

/// [`Stream`] for the [`ObservableExt::distinct_until_changed`] operator.
pub struct DistinctUntilChanged<S, T> {
    stream: S,
    last: Option<T>,
    done: bool,
}

impl<S: Unpin, T> Unpin for DistinctUntilChanged<S, T> {}

impl<S, T, E> Stream for DistinctUntilChanged<S, T>
where
    S: Stream<Item = Result<T, E>> + Unpin,
    T: Clone + PartialEq,
{
    type Item = Result<T, E>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }
        loop {
            match ready!(Pin::new(&mut this.stream).poll_next(cx)) {
                Some(Ok(val)) => {
                    if this.last.as_ref() == Some(&val) {
                        continue;
                    }
                    this.last = Some(val.clone());
                    return Poll::Ready(Some(Ok(val)));
                }
                Some(Err(e)) => {
                    this.done = true;
                    return Poll::Ready(Some(Err(e)));
                }
                None => {
                    this.done = true;
                    return Poll::Ready(None);
                }
            }
        }
    }
}

impl<S, T, E> FusedStream for DistinctUntilChanged<S, T>
where
    S: Stream<Item = Result<T, E>> + Unpin,
    T: Clone + PartialEq,
{
    fn is_terminated(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod chain_with_spec {
    use std::{cell::Cell, rc::Rc};

    use futures::{channel::mpsc, stream, StreamExt as _};

    use super::ObservableExt as _;

    #[tokio::test]
    async fn emits_source_then_dependent_values() {
        let chained = stream::iter(vec![Ok::<_, &str>(1), Ok(2), Ok(3)])
            .chain_with(|last| {
                assert_eq!(last, Some(3));
                Ok(stream::iter(vec![Ok(30), Ok(300)]))
            });

        let all: Vec<_> = chained.collect().await;
        assert_eq!(all, vec![Ok(1), Ok(2), Ok(3), Ok(30), Ok(300)]);
    }

    #[tokio::test]
    async fn passes_none_when_source_is_empty() {
        let chained = stream::iter(Vec::<Result<i32, ()>>::new())
            .chain_with(|last| {
                assert_eq!(last, None);
                Ok(stream::iter(vec![Ok(7)]))
            });

        let all: Vec<_> = chained.collect().await;
        assert_eq!(all, vec![Ok(7)]);
    }

    #[tokio::test]
    async fn source_error_terminates_without_factory_call() {
        let called = Rc::new(Cell::new(false));
        let chained = stream::iter(vec![Ok(1), Err("boom"), Ok(2)])
            .chain_with({
                let called = Rc::clone(&called);
                move |_| {
                    called.set(true);
                    Ok(stream::iter(vec![Ok(10)]))
                }
            });

        let all: Vec<_> = chained.collect().await;
        assert_eq!(all, vec![Ok(1), Err("boom")]);
        assert!(!called.get());
    }

    #[tokio::test]
    async fn factory_error_is_emitted_as_stream_error() {
        let chained = stream::iter(vec![Ok(1)]).chain_with(|_| {
            Err::<stream::Iter<std::vec::IntoIter<Result<i32, &str>>>, _>(
                "factory failed",
            )
        });

        let all: Vec<_> = chained.collect().await;
        assert_eq!(all, vec![Ok(1), Err("factory failed")]);
    }

    #[tokio::test]
    async fn dependent_error_terminates() {
        let chained = stream::iter(vec![Ok(1)]).chain_with(|_| {
            Ok(stream::iter(vec![Ok(2), Err("dependent"), Ok(3)]))
        });

        let all: Vec<_> = chained.collect().await;
        assert_eq!(all, vec![Ok(1), Ok(2), Err("dependent")]);
    }

    #[tokio::test]
    async fn dependent_starts_only_after_source_completes() {
        let (tx, rx) = mpsc::unbounded::<Result<i32, ()>>();
        let called = Rc::new(Cell::new(false));
        let mut chained = rx.chain_with({
            let called = Rc::clone(&called);
            move |last| {
                called.set(true);
                Ok(stream::iter(vec![Ok(last.unwrap_or_default() + 1)]))
            }
        });

        tx.unbounded_send(Ok(5)).unwrap();
        assert_eq!(chained.next().await, Some(Ok(5)));
        assert!(!called.get());

        drop(tx);
        assert_eq!(chained.next().await, Some(Ok(6)));
        assert!(called.get());
        assert_eq!(chained.next().await, None);
    }

    #[tokio::test]
    async fn drop_before_completion_never_calls_factory() {
        let (tx, rx) = mpsc::unbounded::<Result<i32, ()>>();
        let called = Rc::new(Cell::new(false));
        let mut chained = rx.chain_with({
            let called = Rc::clone(&called);
            move |_| {
                called.set(true);
                Ok(stream::iter(Vec::new()))
            }
        });

        tx.unbounded_send(Ok(1)).unwrap();
        assert_eq!(chained.next().await, Some(Ok(1)));
        drop(chained);

        assert!(tx.is_closed());
        assert!(!called.get());
    }

    #[tokio::test]
    async fn drop_releases_dependent_stream() {
        let (dep_tx, dep_rx) = mpsc::unbounded::<Result<i32, ()>>();
        let mut chained =
            stream::iter(vec![Ok(1)]).chain_with(move |_| Ok(dep_rx));

        assert_eq!(chained.next().await, Some(Ok(1)));
        dep_tx.unbounded_send(Ok(2)).unwrap();
        assert_eq!(chained.next().await, Some(Ok(2)));
        assert!(!dep_tx.is_closed());

        drop(chained);
        assert!(dep_tx.is_closed());
        assert!(dep_tx.unbounded_send(Ok(3)).is_err());
    }
}
