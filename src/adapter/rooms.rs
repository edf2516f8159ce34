//! Rooms backend boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AdapterStream;

/// Room which activities are displayed by an activity stream.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Room {
    /// ID of this [`Room`].
    #[serde(rename = "ID")]
    pub id: String,

    /// Title of this [`Room`]. For direct rooms it's the name of the other
    /// person.
    #[serde(default)]
    pub title: String,

    /// Kind of this [`Room`].
    #[serde(rename = "type")]
    pub kind: RoomKind,
}

/// Kind of a [`Room`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    /// One-to-one conversation.
    Direct,

    /// Conversation of many people.
    Group,
}

/// Single activity (message) posted to a [`Room`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Activity {
    /// ID of this [`Activity`].
    #[serde(rename = "ID")]
    pub id: String,

    /// ID of the person who posted this [`Activity`].
    #[serde(rename = "personID", default)]
    pub person_id: String,

    /// Text of this [`Activity`].
    #[serde(default)]
    pub text: String,

    /// Time this [`Activity`] was posted at.
    pub published: DateTime<Utc>,
}

/// Backend of rooms consumed by activity streams.
#[cfg_attr(any(test, feature = "mockable"), mockall::automock)]
pub trait RoomsAdapter {
    /// Returns [`AdapterStream`] emitting the [`Room`] and then every its
    /// update.
    fn get_room(&self, room_id: &str) -> AdapterStream<Room>;

    /// Returns finite [`AdapterStream`] of the [`Activity`]s already posted to
    /// the [`Room`], oldest first.
    fn get_past_activities(&self, room_id: &str) -> AdapterStream<Activity>;

    /// Returns [`AdapterStream`] of the [`Activity`]s posted to the [`Room`]
    /// after the one with the provided ID (or all of them if `None`),
    /// continuing with every newly posted one.
    fn get_live_activities(
        &self,
        room_id: &str,
        after: Option<String>,
    ) -> AdapterStream<Activity>;
}
