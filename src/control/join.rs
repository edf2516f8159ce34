//! Control joining a meeting.

use async_trait::async_trait;
use futures::{future, stream, StreamExt as _};

use crate::{adapter::AdapterStream, conf};

use super::{ControlDisplay, ControlState, Label, MeetingControl};

/// Join button which is always displayed disabled and has no action.
#[derive(Clone, Debug)]
pub struct DisabledJoinControl {
    conf: conf::controls::Join,
}

impl DisabledJoinControl {
    /// ID of [`DisabledJoinControl`].
    pub const ID: &'static str = "join-meeting";

    /// Creates new [`DisabledJoinControl`] displayed as configured.
    #[inline]
    pub fn new(conf: conf::controls::Join) -> Self {
        Self { conf }
    }
}

impl Default for DisabledJoinControl {
    #[inline]
    fn default() -> Self {
        Self::new(conf::controls::Join::default())
    }
}

#[async_trait(?Send)]
impl MeetingControl for DisabledJoinControl {
    #[inline]
    fn id(&self) -> &str {
        Self::ID
    }

    fn display(&self, _: &str) -> AdapterStream<ControlDisplay> {
        stream::once(future::ok(ControlDisplay {
            id: Self::ID.into(),
            label: Label::Text(self.conf.text.clone()),
            tooltip: self.conf.tooltip.clone(),
            state: ControlState::Disabled,
        }))
        .boxed_local()
    }
}
