//! Adapters translating a backend's meetings and rooms into streams consumed
//! by widgets.

pub mod json;
mod meetings;
mod rooms;

use std::error::Error;

use derive_more::Display;
use futures::stream::LocalBoxStream;
use medea_widgets_reactive::MergeError;
use tracerr::Traced;

#[doc(inline)]
pub use self::{
    meetings::{LocalMedia, MediaKind, Meeting, MeetingState, MeetingsAdapter},
    rooms::{Activity, Room, RoomKind, RoomsAdapter},
};

#[cfg(any(test, feature = "mockable"))]
#[doc(inline)]
pub use self::{meetings::MockMeetingsAdapter, rooms::MockRoomsAdapter};

/// Observable produced by adapters: a [`LocalBoxStream`] of values which
/// terminates right after its first error.
pub type AdapterStream<T> =
    LocalBoxStream<'static, Result<T, Traced<AdapterError>>>;

/// Errors that may occur in adapters.
#[derive(Clone, Debug, Display, PartialEq)]
pub enum AdapterError {
    /// Meeting with the provided ID doesn't exist.
    #[display(fmt = "Meeting `{}` not found", _0)]
    MeetingNotFound(String),

    /// Room with the provided ID doesn't exist.
    #[display(fmt = "Room `{}` not found", _0)]
    RoomNotFound(String),

    /// Meeting data can't be read as a [`Meeting`].
    #[display(fmt = "Meeting `{}` is malformed: {}", _0, _1)]
    MalformedMeeting(String, String),

    /// Room data can't be read as a [`Room`] with its [`Activity`]s.
    #[display(fmt = "Room `{}` is malformed: {}", _0, _1)]
    MalformedRoom(String, String),

    /// There is no local media of the provided kind to unmute.
    #[display(fmt = "No local {} to unmute in meeting `{}`", _1, _0)]
    MediaUnavailable(String, MediaKind),

    /// Update can't be merged into the stored data.
    #[display(fmt = "Failed to update data: {}", _0)]
    Merge(MergeError),
}

impl Error for AdapterError {}

impl From<MergeError> for AdapterError {
    #[inline]
    fn from(err: MergeError) -> Self {
        Self::Merge(err)
    }
}
