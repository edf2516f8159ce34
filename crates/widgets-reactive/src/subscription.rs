//! Push-based consumption of observables.

use futures::{
    channel::mpsc,
    future::{self, AbortHandle, LocalBoxFuture},
    FutureExt as _, Stream, StreamExt as _,
};

/// Receiver of the values, the terminal error and the completion of an
/// observable.
pub trait Observer<T, E> {
    /// Called on every value.
    fn next(&mut self, value: T);

    /// Called once on the terminal error. Neither [`Observer::next`] nor
    /// [`Observer::complete`] are called afterwards.
    fn error(&mut self, err: E);

    /// Called once on normal completion.
    fn complete(&mut self);
}

/// Single message delivered to an [`Observer`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notification<T, E> {
    /// [`Observer::next`].
    Next(T),

    /// [`Observer::error`].
    Error(E),

    /// [`Observer::complete`].
    Complete,
}

impl<T, E> Observer<T, E> for mpsc::UnboundedSender<Notification<T, E>> {
    fn next(&mut self, value: T) {
        let _ = self.unbounded_send(Notification::Next(value));
    }

    fn error(&mut self, err: E) {
        let _ = self.unbounded_send(Notification::Error(err));
        self.close_channel();
    }

    fn complete(&mut self) {
        let _ = self.unbounded_send(Notification::Complete);
        self.close_channel();
    }
}

/// Handle to an active [`subscribe`]ption.
///
/// Unsubscribes on [`Drop`].
#[derive(Debug)]
pub struct Subscription(AbortHandle);

impl Subscription {
    /// Stops delivering notifications and drops the observed stream together
    /// with whatever it's currently subscribed to.
    ///
    /// Calling it more than once, or before the delivering future was ever
    /// polled, is a no-op.
    #[inline]
    pub fn unsubscribe(&self) {
        self.0.abort();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Subscribes the provided [`Observer`] to the provided observable.
///
/// Returns the [`Subscription`] and the [`Future`] delivering notifications,
/// which should be spawned (or awaited) by the caller. The [`Future`]
/// resolves once the observable terminates or the [`Subscription`] is
/// cancelled.
///
/// [`Future`]: std::future::Future
pub fn subscribe<S, O, T, E>(
    stream: S,
    mut observer: O,
) -> (Subscription, LocalBoxFuture<'static, ()>)
where
    S: Stream<Item = Result<T, E>> + 'static,
    O: Observer<T, E> + 'static,
{
    let deliver = async move {
        let mut stream = Box::pin(stream);
        while let Some(item) = stream.next().await {
            match item {
                Ok(value) => observer.next(value),
                Err(err) => {
                    observer.error(err);
                    return;
                }
            }
        }
        observer.complete();
    };
    let (deliver, abort) = future::abortable(deliver);

    (Subscription(abort), deliver.map(|_| ()).boxed_local())
}
