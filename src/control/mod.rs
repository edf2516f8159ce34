//! Meeting controls: buttons of a meeting widget and the way they are
//! displayed and acted on.

mod join;
mod leave;
mod mute;
mod registry;

use std::error::Error;

use async_trait::async_trait;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracerr::Traced;

use crate::adapter::{AdapterError, AdapterStream};

#[doc(inline)]
pub use self::{
    join::DisabledJoinControl, leave::LeaveControl, mute::MuteControl,
    registry::ControlRegistry,
};

/// State of a control as displayed to the user.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlState {
    /// Control is enabled and its function is on.
    Active,

    /// Control is enabled and its function is off.
    Inactive,

    /// Control can't be acted on.
    Disabled,
}

/// Label of a control.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Text label.
    Text(String),

    /// Name of an icon.
    Icon(String),
}

/// Display record of a control, emitted on every change of how the control
/// should look.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ControlDisplay {
    /// ID of the displayed control.
    #[serde(rename = "ID")]
    pub id: String,

    /// Label of the control.
    #[serde(flatten)]
    pub label: Label,

    /// Tooltip of the control.
    pub tooltip: String,

    /// State of the control.
    pub state: ControlState,
}

/// Control of a meeting, acting on a [`MeetingsAdapter`] and deriving its
/// look from the meeting state.
///
/// [`MeetingsAdapter`]: crate::adapter::MeetingsAdapter
#[async_trait(?Send)]
pub trait MeetingControl {
    /// Returns ID of this [`MeetingControl`].
    fn id(&self) -> &str;

    /// Performs the action of this [`MeetingControl`] in the provided meeting.
    ///
    /// # Errors
    ///
    /// With [`ControlError::NoAction`] if this [`MeetingControl`] has no
    /// action.
    ///
    /// With [`ControlError::Adapter`] if the underlying adapter fails.
    async fn action(
        &self,
        meeting_id: &str,
    ) -> Result<(), Traced<ControlError>> {
        let _ = meeting_id;
        Err(tracerr::new!(ControlError::NoAction(self.id().into())))
    }

    /// Returns [`AdapterStream`] of [`ControlDisplay`]s of this
    /// [`MeetingControl`] in the provided meeting.
    fn display(&self, meeting_id: &str) -> AdapterStream<ControlDisplay>;
}

/// Errors that may occur when using meeting controls.
#[derive(Clone, Debug, Display, PartialEq)]
pub enum ControlError {
    /// Control with the provided ID is not registered.
    #[display(fmt = "Control `{}` is not supported", _0)]
    UnknownControl(String),

    /// Control with the provided ID has no action.
    #[display(fmt = "Control `{}` has no action", _0)]
    NoAction(String),

    /// Adapter failed to perform the action.
    #[display(fmt = "{}", _0)]
    Adapter(AdapterError),
}

impl Error for ControlError {}

impl From<AdapterError> for ControlError {
    #[inline]
    fn from(err: AdapterError) -> Self {
        Self::Adapter(err)
    }
}
