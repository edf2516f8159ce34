//! [`MeetingsAdapter`] over in-memory JSON data.

use std::{cell::RefCell, collections::HashMap};

use async_trait::async_trait;
use futures::{future, stream, StreamExt as _};
use medea_widgets_reactive::{deep_merge, ObservableCell};
use serde_json::{json, Map, Value};
use tracerr::Traced;

use crate::{
    adapter::{
        AdapterError, AdapterStream, MediaKind, Meeting, MeetingsAdapter,
    },
    log::prelude::*,
};

/// [`MeetingsAdapter`] keeping meetings as JSON objects in memory.
///
/// Every meeting is held in an [`ObservableCell`], so its subscribers are
/// notified on every real change made with
/// [`MeetingsJsonAdapter::update_meeting`] or the [`MeetingsAdapter`]
/// actions.
#[derive(Debug, Default)]
pub struct MeetingsJsonAdapter {
    /// Meetings data by meeting ID.
    meetings: RefCell<HashMap<String, ObservableCell<Value>>>,

    /// Local media stream handles taken out of meetings by muting, to be put
    /// back by unmuting.
    muted: RefCell<HashMap<(String, MediaKind), Value>>,
}

impl MeetingsJsonAdapter {
    /// Creates new [`MeetingsJsonAdapter`] serving the provided meetings data
    /// by meeting ID.
    pub fn new(datasource: Map<String, Value>) -> Self {
        let meetings = datasource
            .into_iter()
            .map(|(id, meeting)| (id, ObservableCell::new(meeting)))
            .collect();
        Self {
            meetings: RefCell::new(meetings),
            muted: RefCell::default(),
        }
    }

    /// Returns IDs of all the served meetings, sorted.
    pub fn meeting_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.meetings.borrow().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Deeply merges the provided `patch` into the data of the meeting with
    /// the provided ID.
    ///
    /// # Errors
    ///
    /// With [`AdapterError::MeetingNotFound`] if there is no such meeting.
    ///
    /// With [`AdapterError::MalformedMeeting`] if the meeting data is not a
    /// JSON object.
    ///
    /// With [`AdapterError::Merge`] if the `patch` doesn't fit the meeting
    /// data shape. Keys merged before the mismatch stay merged.
    pub fn update_meeting(
        &self,
        meeting_id: &str,
        patch: Map<String, Value>,
    ) -> Result<(), Traced<AdapterError>> {
        let mut meetings = self.meetings.borrow_mut();
        let meeting = meetings.get_mut(meeting_id).ok_or_else(|| {
            tracerr::new!(AdapterError::MeetingNotFound(meeting_id.into()))
        })?;

        let mut data = meeting.borrow_mut();
        match &mut *data {
            Value::Object(data) => deep_merge(data, patch)
                .map_err(|e| tracerr::new!(AdapterError::from(e))),
            _ => Err(tracerr::new!(AdapterError::MalformedMeeting(
                meeting_id.into(),
                "not a JSON object".into(),
            ))),
        }
    }

    /// Returns the current JSON value under the provided `pointer` in the
    /// meeting with the provided ID.
    fn value_at(
        &self,
        meeting_id: &str,
        pointer: &str,
    ) -> Result<Option<Value>, Traced<AdapterError>> {
        let meetings = self.meetings.borrow();
        let meeting = meetings.get(meeting_id).ok_or_else(|| {
            tracerr::new!(AdapterError::MeetingNotFound(meeting_id.into()))
        })?;
        Ok(meeting.pointer(pointer).cloned())
    }

    /// Mutes the [`MediaKind`] local media if it's live, or unmutes it
    /// otherwise.
    fn toggle_mute(
        &self,
        meeting_id: &str,
        kind: MediaKind,
    ) -> Result<(), Traced<AdapterError>> {
        let key = kind.json_key();
        let current = self
            .value_at(meeting_id, &format!("/{}/stream", key))?
            .filter(|stream| !stream.is_null());
        let stash_key = (meeting_id.to_owned(), kind);

        if let Some(stream) = current {
            self.update_meeting(
                meeting_id,
                patch(json!({ key: {"stream": null} })),
            )
            .map_err(tracerr::wrap!())?;
            drop(self.muted.borrow_mut().insert(stash_key, stream));
            debug!("Muted local {} in meeting {}", kind, meeting_id);
        } else {
            let stream =
                self.muted.borrow_mut().remove(&stash_key).ok_or_else(|| {
                    tracerr::new!(AdapterError::MediaUnavailable(
                        meeting_id.into(),
                        kind,
                    ))
                })?;
            if let Err(e) = self.update_meeting(
                meeting_id,
                patch(json!({ key: {"stream": stream.clone()} })),
            ) {
                drop(self.muted.borrow_mut().insert(stash_key, stream));
                return Err(tracerr::new!(e));
            }
            debug!("Unmuted local {} in meeting {}", kind, meeting_id);
        }
        Ok(())
    }
}

/// Unwraps the JSON object built with the [`json!`] macro.
fn patch(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[async_trait(?Send)]
impl MeetingsAdapter for MeetingsJsonAdapter {
    fn get_meeting(&self, meeting_id: &str) -> AdapterStream<Meeting> {
        let meetings = self.meetings.borrow();
        let meeting = if let Some(meeting) = meetings.get(meeting_id) {
            meeting
        } else {
            return stream::once(future::err(tracerr::new!(
                AdapterError::MeetingNotFound(meeting_id.into())
            )))
            .boxed_local();
        };

        let id = meeting_id.to_owned();
        meeting
            .subscribe()
            .map(move |data| {
                serde_json::from_value(data).map_err(|e| {
                    tracerr::new!(AdapterError::MalformedMeeting(
                        id.clone(),
                        e.to_string(),
                    ))
                })
            })
            .scan(false, |errored, meeting| {
                if *errored {
                    return future::ready(None);
                }
                *errored = meeting.is_err();
                future::ready(Some(meeting))
            })
            .boxed_local()
    }

    async fn toggle_mute_audio(
        &self,
        meeting_id: &str,
    ) -> Result<(), Traced<AdapterError>> {
        self.toggle_mute(meeting_id, MediaKind::Audio)
    }

    async fn toggle_mute_video(
        &self,
        meeting_id: &str,
    ) -> Result<(), Traced<AdapterError>> {
        self.toggle_mute(meeting_id, MediaKind::Video)
    }

    async fn leave_meeting(
        &self,
        meeting_id: &str,
    ) -> Result<(), Traced<AdapterError>> {
        self.update_meeting(meeting_id, patch(json!({"state": "LEFT"})))?;
        info!("Left meeting {}", meeting_id);
        Ok(())
    }
}
