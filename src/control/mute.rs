//! Controls muting local media in a meeting.

use std::rc::Rc;

use async_trait::async_trait;
use futures::{StreamExt as _, TryStreamExt as _};
use medea_widgets_reactive::ObservableExt as _;
use tracerr::Traced;

use crate::{
    adapter::{AdapterStream, MediaKind, MeetingsAdapter},
    conf,
};

use super::{
    ControlDisplay, ControlError, ControlState, Label, MeetingControl,
};

/// Button toggling muting of the local microphone or camera.
///
/// Displayed [`ControlState::Inactive`] while the media is live (pressing it
/// mutes), and [`ControlState::Active`] while it's muted.
pub struct MuteControl {
    kind: MediaKind,
    adapter: Rc<dyn MeetingsAdapter>,
    conf: conf::controls::Mute,
}

impl MuteControl {
    /// ID of [`MuteControl`] of the local microphone.
    pub const AUDIO_ID: &'static str = "mute-audio";

    /// ID of [`MuteControl`] of the local camera.
    pub const VIDEO_ID: &'static str = "mute-video";

    /// Creates new [`MuteControl`] of the local microphone.
    #[inline]
    pub fn audio(
        adapter: Rc<dyn MeetingsAdapter>,
        conf: conf::controls::MuteAudio,
    ) -> Self {
        Self {
            kind: MediaKind::Audio,
            adapter,
            conf: conf.into(),
        }
    }

    /// Creates new [`MuteControl`] of the local camera.
    #[inline]
    pub fn video(
        adapter: Rc<dyn MeetingsAdapter>,
        conf: conf::controls::MuteVideo,
    ) -> Self {
        Self {
            kind: MediaKind::Video,
            adapter,
            conf: conf.into(),
        }
    }

    /// Returns [`MediaKind`] muted by this [`MuteControl`].
    #[inline]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }
}

#[async_trait(?Send)]
impl MeetingControl for MuteControl {
    fn id(&self) -> &str {
        match self.kind {
            MediaKind::Audio => Self::AUDIO_ID,
            MediaKind::Video => Self::VIDEO_ID,
        }
    }

    async fn action(
        &self,
        meeting_id: &str,
    ) -> Result<(), Traced<ControlError>> {
        let toggled = match self.kind {
            MediaKind::Audio => self.adapter.toggle_mute_audio(meeting_id),
            MediaKind::Video => self.adapter.toggle_mute_video(meeting_id),
        };
        toggled.await.map_err(tracerr::map_from_and_wrap!())
    }

    fn display(&self, meeting_id: &str) -> AdapterStream<ControlDisplay> {
        let kind = self.kind;
        let id = self.id().to_owned();
        let conf = self.conf.clone();

        self.adapter
            .get_meeting(meeting_id)
            .map_ok(move |meeting| meeting.local_media(kind).is_live())
            .distinct_until_changed()
            .map_ok(move |live| {
                let (tooltip, state) = if live {
                    (&conf.mute_tooltip, ControlState::Inactive)
                } else {
                    (&conf.unmute_tooltip, ControlState::Active)
                };
                ControlDisplay {
                    id: id.clone(),
                    label: Label::Icon(conf.icon.clone()),
                    tooltip: tooltip.clone(),
                    state,
                }
            })
            .boxed_local()
    }
}
