//! Display settings of meeting controls.

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Display settings of all the default meeting controls.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Controls {
    /// Settings of the `join-meeting` control.
    pub join: Join,

    /// Settings of the `mute-audio` control.
    pub mute_audio: MuteAudio,

    /// Settings of the `mute-video` control.
    pub mute_video: MuteVideo,

    /// Settings of the `leave-meeting` control.
    pub leave: Leave,
}

/// Display settings of the `join-meeting` control.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, SmartDefault)]
#[serde(default)]
pub struct Join {
    /// Text of the control. Defaults to `Join meeting`.
    #[default = "Join meeting"]
    pub text: String,

    /// Tooltip of the control. Defaults to `Join meeting`.
    #[default = "Join meeting"]
    pub tooltip: String,
}

/// Display settings of a control toggling local media muting.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mute {
    /// Icon of the control.
    pub icon: String,

    /// Tooltip shown while the local media is live.
    pub mute_tooltip: String,

    /// Tooltip shown while the local media is muted.
    pub unmute_tooltip: String,
}

/// Display settings of the `mute-audio` control.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, SmartDefault)]
#[serde(default)]
pub struct MuteAudio {
    /// Icon of the control. Defaults to `microphone-muted_28`.
    #[default = "microphone-muted_28"]
    pub icon: String,

    /// Tooltip shown while the microphone is live. Defaults to `Mute`.
    #[default = "Mute"]
    pub mute_tooltip: String,

    /// Tooltip shown while the microphone is muted. Defaults to `Unmute`.
    #[default = "Unmute"]
    pub unmute_tooltip: String,
}

impl From<MuteAudio> for Mute {
    fn from(conf: MuteAudio) -> Self {
        Self {
            icon: conf.icon,
            mute_tooltip: conf.mute_tooltip,
            unmute_tooltip: conf.unmute_tooltip,
        }
    }
}

/// Display settings of the `mute-video` control.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, SmartDefault)]
#[serde(default)]
pub struct MuteVideo {
    /// Icon of the control. Defaults to `camera-muted_28`.
    #[default = "camera-muted_28"]
    pub icon: String,

    /// Tooltip shown while the camera is live. Defaults to `Stop video`.
    #[default = "Stop video"]
    pub mute_tooltip: String,

    /// Tooltip shown while the camera is muted. Defaults to `Start video`.
    #[default = "Start video"]
    pub unmute_tooltip: String,
}

impl From<MuteVideo> for Mute {
    fn from(conf: MuteVideo) -> Self {
        Self {
            icon: conf.icon,
            mute_tooltip: conf.mute_tooltip,
            unmute_tooltip: conf.unmute_tooltip,
        }
    }
}

/// Display settings of the `leave-meeting` control.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, SmartDefault)]
#[serde(default)]
pub struct Leave {
    /// Icon of the control. Defaults to `cancel_28`.
    #[default = "cancel_28"]
    pub icon: String,

    /// Tooltip of the control. Defaults to `Leave`.
    #[default = "Leave"]
    pub tooltip: String,
}
