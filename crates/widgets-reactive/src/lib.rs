//! Reactive primitives used by Medea widgets.
//!
//! Everything here models an "observable" as a [`Stream`] of [`Result`]s:
//! an `Ok` item is a value, an `Err` item is a terminal error and the end of
//! the [`Stream`] is a normal completion.
//!
//!
//!
//!
//! # Chaining a dependent stream
//!
//! ```
//! use futures::{executor, stream, StreamExt as _};
//! use medea_widgets_reactive::ObservableExt as _;
//!
//! # executor::block_on(async {
//! let source = stream::iter(vec![Ok::<_, ()>(1), Ok(2)]);
//! let chained = source.chain_with(|last: Option<i32>| {
//!     let last = last.unwrap_or_default();
//!     Ok(stream::iter(vec![Ok(last * 10), Ok(last * 100)]))
//! });
//!
//! let all: Vec<_> = chained.collect().await;
//! assert_eq!(all, vec![Ok(1), Ok(2), Ok(20), Ok(200)]);
//! # });
//! ```
//!
//!
//!
//!
//! # Skipping repeated values
//!
//! ```
//! use futures::{executor, stream, StreamExt as _};
//! use medea_widgets_reactive::ObservableExt as _;
//!
//! # executor::block_on(async {
//! let values = stream::iter(vec![Ok::<_, ()>(1), Ok(1), Ok(2), Ok(1)]);
//!
//! let distinct: Vec<_> = values.distinct_until_changed().collect().await;
//! assert_eq!(distinct, vec![Ok(1), Ok(2), Ok(1)]);
//! # });
//! ```
//!
//!
//!
//!
//! # Observing a mutable value
//!
//! ```
//! use futures::{executor, StreamExt as _};
//! use medea_widgets_reactive::ObservableCell;
//!
//! # executor::block_on(async {
//! let mut muted = ObservableCell::new(false);
//! let mut changes = muted.subscribe();
//!
//! // Current value is emitted first:
//! assert_eq!(changes.next().await.unwrap(), false);
//!
//! *muted.borrow_mut() = true;
//! assert_eq!(changes.next().await.unwrap(), true);
//! # });
//! ```
//!
//! [`Stream`]: futures::Stream

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![warn(missing_docs, unused_import_braces, unused_qualifications)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

mod cell;
mod merge;
mod observable;
mod subscription;

#[doc(inline)]
pub use self::{
    cell::{MutObservableCellGuard, ObservableCell},
    merge::{deep_merge, MergeError},
    observable::{ChainWith, DistinctUntilChanged, Observable, ObservableExt},
    subscription::{subscribe, Notification, Observer, Subscription},
};
