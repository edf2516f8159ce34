//! Meetings backend boundary.

use async_trait::async_trait;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use super::{AdapterError, AdapterStream};

/// Snapshot of a meeting state.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    /// ID of this [`Meeting`].
    #[serde(rename = "ID")]
    pub id: String,

    /// Human-readable title of this [`Meeting`].
    #[serde(default)]
    pub title: String,

    /// Local microphone.
    #[serde(default)]
    pub local_audio: LocalMedia,

    /// Local camera.
    #[serde(default)]
    pub local_video: LocalMedia,

    /// Participation state of the local user.
    #[serde(default)]
    pub state: MeetingState,
}

impl Meeting {
    /// Returns [`LocalMedia`] of the provided [`MediaKind`].
    #[inline]
    pub fn local_media(&self, kind: MediaKind) -> &LocalMedia {
        match kind {
            MediaKind::Audio => &self.local_audio,
            MediaKind::Video => &self.local_video,
        }
    }
}

/// Local media published to a [`Meeting`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct LocalMedia {
    /// Handle of the local media stream. `None` while muted.
    #[serde(default)]
    pub stream: Option<String>,
}

impl LocalMedia {
    /// Indicates whether the media is being sent.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.stream.is_some()
    }
}

/// Kind of [`LocalMedia`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum MediaKind {
    /// Microphone.
    #[display(fmt = "audio")]
    Audio,

    /// Camera.
    #[display(fmt = "video")]
    Video,
}

impl MediaKind {
    /// Returns key of the [`Meeting`] field holding [`LocalMedia`] of this
    /// [`MediaKind`] in its JSON representation.
    #[inline]
    pub fn json_key(self) -> &'static str {
        match self {
            Self::Audio => "localAudio",
            Self::Video => "localVideo",
        }
    }
}

/// Participation state of the local user in a [`Meeting`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingState {
    /// Meeting is not joined yet.
    NotJoined,

    /// Meeting is joined.
    Joined,

    /// Meeting was left.
    Left,
}

impl Default for MeetingState {
    #[inline]
    fn default() -> Self {
        Self::NotJoined
    }
}

/// Backend of meetings consumed by meeting controls.
#[cfg_attr(any(test, feature = "mockable"), mockall::automock)]
#[async_trait(?Send)]
pub trait MeetingsAdapter {
    /// Returns [`AdapterStream`] emitting the current [`Meeting`] snapshot and
    /// then every its update.
    fn get_meeting(&self, meeting_id: &str) -> AdapterStream<Meeting>;

    /// Toggles muting of the local microphone in the provided [`Meeting`].
    async fn toggle_mute_audio(
        &self,
        meeting_id: &str,
    ) -> Result<(), Traced<AdapterError>>;

    /// Toggles muting of the local camera in the provided [`Meeting`].
    async fn toggle_mute_video(
        &self,
        meeting_id: &str,
    ) -> Result<(), Traced<AdapterError>>;

    /// Leaves the provided [`Meeting`].
    async fn leave_meeting(
        &self,
        meeting_id: &str,
    ) -> Result<(), Traced<AdapterError>>;
}
