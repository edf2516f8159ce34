//! Control leaving a meeting.

use std::rc::Rc;

use async_trait::async_trait;
use futures::{future, stream, StreamExt as _};
use tracerr::Traced;

use crate::{
    adapter::{AdapterStream, MeetingsAdapter},
    conf,
};

use super::{
    ControlDisplay, ControlError, ControlState, Label, MeetingControl,
};

/// Hang up button leaving a meeting.
pub struct LeaveControl {
    adapter: Rc<dyn MeetingsAdapter>,
    conf: conf::controls::Leave,
}

impl LeaveControl {
    /// ID of [`LeaveControl`].
    pub const ID: &'static str = "leave-meeting";

    /// Creates new [`LeaveControl`] acting on the provided
    /// [`MeetingsAdapter`].
    #[inline]
    pub fn new(
        adapter: Rc<dyn MeetingsAdapter>,
        conf: conf::controls::Leave,
    ) -> Self {
        Self { adapter, conf }
    }
}

#[async_trait(?Send)]
impl MeetingControl for LeaveControl {
    #[inline]
    fn id(&self) -> &str {
        Self::ID
    }

    async fn action(
        &self,
        meeting_id: &str,
    ) -> Result<(), Traced<ControlError>> {
        self.adapter
            .leave_meeting(meeting_id)
            .await
            .map_err(tracerr::map_from_and_wrap!())
    }

    fn display(&self, _: &str) -> AdapterStream<ControlDisplay> {
        stream::once(future::ok(ControlDisplay {
            id: Self::ID.into(),
            label: Label::Icon(self.conf.icon.clone()),
            tooltip: self.conf.tooltip.clone(),
            state: ControlState::Active,
        }))
        .boxed_local()
    }
}
