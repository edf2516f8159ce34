//! Container emitting its value modifications to subscribers.

use std::{
    cell::RefCell,
    fmt,
    ops::{Deref, DerefMut},
};

use futures::{
    channel::mpsc,
    future,
    stream::{self, LocalBoxStream},
    StreamExt as _,
};

/// Container holding some data, which modifications can be subscribed to with
/// [`ObservableCell::subscribe`].
///
/// Subscription [`Stream`]s end once this [`ObservableCell`] is dropped.
///
/// [`Stream`]: futures::Stream
pub struct ObservableCell<D> {
    /// Data stored by this [`ObservableCell`].
    data: D,

    /// Subscribers on this [`ObservableCell`]'s data modifications.
    subs: RefCell<Vec<mpsc::UnboundedSender<D>>>,
}

impl<D: fmt::Debug> fmt::Debug for ObservableCell<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObservableCell {{ data: {:?} }}", self.data)
    }
}

impl<D> ObservableCell<D> {
    /// Creates new [`ObservableCell`] holding the provided `data`.
    pub fn new(data: D) -> Self {
        Self {
            data,
            subs: RefCell::new(Vec::new()),
        }
    }

    /// Returns number of alive subscriptions.
    pub fn subscribers_count(&self) -> usize {
        self.subs.borrow().iter().filter(|s| !s.is_closed()).count()
    }
}

impl<D> ObservableCell<D>
where
    D: Clone + 'static,
{
    /// Returns [`LocalBoxStream`] yielding the current data right away and
    /// then every real modification of it.
    pub fn subscribe(&self) -> LocalBoxStream<'static, D> {
        let (tx, rx) = mpsc::unbounded();
        self.subs.borrow_mut().push(tx);

        stream::once(future::ready(self.data.clone()))
            .chain(rx)
            .boxed_local()
    }
}

impl<D> ObservableCell<D>
where
    D: Clone + PartialEq,
{
    /// Returns [`MutObservableCellGuard`] which can be mutably dereferenced
    /// to the underlying data.
    ///
    /// Subscribers are notified once the guard is dropped, and only if the
    /// data __really__ changed (checked with [`PartialEq`]). Intermediate
    /// changes made through the same guard are never observed.
    pub fn borrow_mut(&mut self) -> MutObservableCellGuard<'_, D> {
        MutObservableCellGuard {
            value_before_mutation: self.data.clone(),
            data: &mut self.data,
            subs: &self.subs,
        }
    }
}

impl<D> Deref for ObservableCell<D> {
    type Target = D;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

/// Mutable [`ObservableCell`] reference returned by
/// [`ObservableCell::borrow_mut`].
pub struct MutObservableCellGuard<'a, D>
where
    D: Clone + PartialEq,
{
    data: &'a mut D,
    subs: &'a RefCell<Vec<mpsc::UnboundedSender<D>>>,
    value_before_mutation: D,
}

impl<'a, D> Deref for MutObservableCellGuard<'a, D>
where
    D: Clone + PartialEq,
{
    type Target = D;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<'a, D> DerefMut for MutObservableCellGuard<'a, D>
where
    D: Clone + PartialEq,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.data
    }
}

impl<'a, D> Drop for MutObservableCellGuard<'a, D>
where
    D: Clone + PartialEq,
{
    fn drop(&mut self) {
        if *self.data != self.value_before_mutation {
            let data = &*self.data;
            self.subs
                .borrow_mut()
                .retain(|sub| sub.unbounded_send(data.clone()).is_ok());
        }
    }
}
