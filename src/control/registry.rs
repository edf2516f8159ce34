//! Set of meeting controls addressed by their IDs.

use std::rc::Rc;

use tracerr::Traced;

use crate::{
    adapter::{AdapterStream, MeetingsAdapter},
    conf,
    log::prelude::*,
};

use super::{
    ControlDisplay, ControlError, DisabledJoinControl, LeaveControl,
    MeetingControl, MuteControl,
};

/// Registered [`MeetingControl`]s in the order of their registration.
#[derive(Default)]
pub struct ControlRegistry {
    controls: Vec<Rc<dyn MeetingControl>>,
}

impl ControlRegistry {
    /// Creates new empty [`ControlRegistry`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates new [`ControlRegistry`] with the [`DisabledJoinControl`],
    /// audio and video [`MuteControl`]s and the [`LeaveControl`] displayed as
    /// configured.
    pub fn with_default_controls(
        adapter: Rc<dyn MeetingsAdapter>,
        conf: &conf::Controls,
    ) -> Self {
        let mut registry = Self::new();
        registry
            .register(Rc::new(DisabledJoinControl::new(conf.join.clone())));
        registry.register(Rc::new(MuteControl::audio(
            Rc::clone(&adapter),
            conf.mute_audio.clone(),
        )));
        registry.register(Rc::new(MuteControl::video(
            Rc::clone(&adapter),
            conf.mute_video.clone(),
        )));
        registry.register(Rc::new(LeaveControl::new(
            adapter,
            conf.leave.clone(),
        )));
        registry
    }

    /// Registers the provided [`MeetingControl`], replacing the already
    /// registered one with the same ID in place.
    pub fn register(&mut self, control: Rc<dyn MeetingControl>) {
        if let Some(existing) =
            self.controls.iter_mut().find(|c| c.id() == control.id())
        {
            debug!("Replacing control {}", control.id());
            *existing = control;
        } else {
            self.controls.push(control);
        }
    }

    /// Indicates whether a [`MeetingControl`] with the provided ID is
    /// registered.
    #[inline]
    pub fn supports_control(&self, control_id: &str) -> bool {
        self.get(control_id).is_some()
    }

    /// Returns the registered [`MeetingControl`] with the provided ID.
    pub fn get(&self, control_id: &str) -> Option<Rc<dyn MeetingControl>> {
        self.controls
            .iter()
            .find(|c| c.id() == control_id)
            .map(Rc::clone)
    }

    /// Returns IDs of the registered [`MeetingControl`]s in the order of
    /// their registration.
    pub fn ids(&self) -> Vec<&str> {
        self.controls.iter().map(|c| c.id()).collect()
    }

    /// Performs the action of the [`MeetingControl`] with the provided ID in
    /// the provided meeting.
    ///
    /// # Errors
    ///
    /// With [`ControlError::UnknownControl`] if there is no such
    /// [`MeetingControl`].
    ///
    /// Errors of [`MeetingControl::action`] otherwise.
    pub async fn action(
        &self,
        control_id: &str,
        meeting_id: &str,
    ) -> Result<(), Traced<ControlError>> {
        let control = self.get(control_id).ok_or_else(|| {
            tracerr::new!(ControlError::UnknownControl(control_id.into()))
        })?;
        debug!("Action of control {} in meeting {}", control_id, meeting_id);
        control.action(meeting_id).await.map_err(tracerr::wrap!())
    }

    /// Returns [`AdapterStream`] of [`ControlDisplay`]s of the
    /// [`MeetingControl`] with the provided ID in the provided meeting.
    ///
    /// # Errors
    ///
    /// With [`ControlError::UnknownControl`] if there is no such
    /// [`MeetingControl`].
    pub fn display(
        &self,
        control_id: &str,
        meeting_id: &str,
    ) -> Result<AdapterStream<ControlDisplay>, Traced<ControlError>> {
        self.get(control_id)
            .map(|c| c.display(meeting_id))
            .ok_or_else(|| {
                tracerr::new!(ControlError::UnknownControl(control_id.into()))
            })
    }
}

#[cfg(test)]
mod spec {
    use std::rc::Rc;

    use async_trait::async_trait;
    use futures::{future, stream, StreamExt as _};

    use crate::{
        adapter::{AdapterStream, MockMeetingsAdapter},
        conf,
        control::{
            ControlDisplay, ControlError, ControlState, Label,
            MeetingControl,
        },
    };

    use super::ControlRegistry;

    struct StaticControl(&'static str, &'static str);

    #[async_trait(?Send)]
    impl MeetingControl for StaticControl {
        fn id(&self) -> &str {
            self.0
        }

        fn display(&self, _: &str) -> AdapterStream<ControlDisplay> {
            stream::once(future::ok(ControlDisplay {
                id: self.0.into(),
                label: Label::Text(self.1.into()),
                tooltip: String::new(),
                state: ControlState::Active,
            }))
            .boxed_local()
        }
    }

    fn default_registry() -> ControlRegistry {
        ControlRegistry::with_default_controls(
            Rc::new(MockMeetingsAdapter::new()),
            &conf::Controls::default(),
        )
    }

    #[test]
    fn registers_default_controls_in_order() {
        let registry = default_registry();

        assert_eq!(
            registry.ids(),
            vec!["join-meeting", "mute-audio", "mute-video", "leave-meeting"],
        );
        assert!(registry.supports_control("mute-video"));
        assert!(!registry.supports_control("share-screen"));
    }

    #[tokio::test]
    async fn replaces_control_with_same_id() {
        let mut registry = ControlRegistry::new();
        registry.register(Rc::new(StaticControl("a", "first")));
        registry.register(Rc::new(StaticControl("b", "second")));
        registry.register(Rc::new(StaticControl("a", "third")));

        assert_eq!(registry.ids(), vec!["a", "b"]);
        let display = registry
            .display("a", "m1")
            .unwrap()
            .next()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(display.label, Label::Text("third".into()));
    }

    #[tokio::test]
    async fn fails_on_unknown_control() {
        let registry = default_registry();

        let err = registry.action("share-screen", "m1").await.unwrap_err();
        assert_eq!(
            err.as_ref(),
            &ControlError::UnknownControl("share-screen".into()),
        );
        assert!(registry.display("share-screen", "m1").is_err());
    }

    #[tokio::test]
    async fn forwards_no_action_error() {
        let registry = default_registry();

        let err = registry.action("join-meeting", "m1").await.unwrap_err();
        assert_eq!(
            err.as_ref(),
            &ControlError::NoAction("join-meeting".into()),
        );
    }
}
