//! [`RoomsAdapter`] over in-memory JSON data.

use std::{cell::RefCell, collections::HashMap};

use futures::{channel::mpsc, future, stream, StreamExt as _};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracerr::Traced;

use crate::{
    adapter::{Activity, AdapterError, AdapterStream, Room, RoomsAdapter},
    log::prelude::*,
};

/// JSON representation of a room together with its activities.
#[derive(Deserialize)]
struct RoomData {
    #[serde(flatten)]
    room: Room,

    #[serde(default)]
    activities: Vec<Activity>,
}

/// Stored state of a single room.
#[derive(Debug)]
struct Entry {
    /// The room itself.
    room: Room,

    /// Activities posted to the room, oldest first.
    activities: Vec<Activity>,

    /// Subscribers on newly posted activities.
    live_subs: Vec<mpsc::UnboundedSender<Activity>>,
}

/// [`RoomsAdapter`] keeping rooms and their activities in memory.
#[derive(Debug, Default)]
pub struct RoomsJsonAdapter {
    rooms: RefCell<HashMap<String, Entry>>,
}

impl RoomsJsonAdapter {
    /// Creates new [`RoomsJsonAdapter`] serving the provided rooms data by
    /// room ID.
    ///
    /// # Errors
    ///
    /// With [`AdapterError::MalformedRoom`] if some room can't be read.
    pub fn new(
        datasource: Map<String, Value>,
    ) -> Result<Self, Traced<AdapterError>> {
        let rooms = datasource
            .into_iter()
            .map(|(id, data)| {
                let data: RoomData =
                    serde_json::from_value(data).map_err(|e| {
                        tracerr::new!(AdapterError::MalformedRoom(
                            id.clone(),
                            e.to_string(),
                        ))
                    })?;
                let mut activities = data.activities;
                activities.sort_by(|a, b| a.published.cmp(&b.published));
                Ok((
                    id,
                    Entry {
                        room: data.room,
                        activities,
                        live_subs: Vec::new(),
                    },
                ))
            })
            .collect::<Result<_, Traced<AdapterError>>>()?;
        Ok(Self {
            rooms: RefCell::new(rooms),
        })
    }

    /// Returns IDs of all the served rooms, sorted.
    pub fn room_ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.rooms.borrow().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Posts the provided [`Activity`] to the room with the provided ID,
    /// notifying its live subscribers.
    ///
    /// # Errors
    ///
    /// With [`AdapterError::RoomNotFound`] if there is no such room.
    pub fn post_activity(
        &self,
        room_id: &str,
        activity: Activity,
    ) -> Result<(), Traced<AdapterError>> {
        let mut rooms = self.rooms.borrow_mut();
        let entry = rooms.get_mut(room_id).ok_or_else(|| {
            tracerr::new!(AdapterError::RoomNotFound(room_id.into()))
        })?;

        entry
            .live_subs
            .retain(|sub| sub.unbounded_send(activity.clone()).is_ok());
        debug!("Posted activity {} to room {}", activity.id, room_id);
        entry.activities.push(activity);
        Ok(())
    }
}

/// Returns [`AdapterStream`] failing with [`AdapterError::RoomNotFound`].
fn room_not_found<T: 'static>(room_id: &str) -> AdapterStream<T> {
    stream::once(future::err(tracerr::new!(AdapterError::RoomNotFound(
        room_id.into()
    ))))
    .boxed_local()
}

impl RoomsAdapter for RoomsJsonAdapter {
    fn get_room(&self, room_id: &str) -> AdapterStream<Room> {
        match self.rooms.borrow().get(room_id) {
            Some(entry) => {
                stream::once(future::ok(entry.room.clone())).boxed_local()
            }
            None => room_not_found(room_id),
        }
    }

    fn get_past_activities(&self, room_id: &str) -> AdapterStream<Activity> {
        match self.rooms.borrow().get(room_id) {
            Some(entry) => stream::iter(entry.activities.clone())
                .map(Ok)
                .boxed_local(),
            None => room_not_found(room_id),
        }
    }

    fn get_live_activities(
        &self,
        room_id: &str,
        after: Option<String>,
    ) -> AdapterStream<Activity> {
        let mut rooms = self.rooms.borrow_mut();
        let entry = if let Some(entry) = rooms.get_mut(room_id) {
            entry
        } else {
            return room_not_found(room_id);
        };

        let backlog: Vec<_> = match after {
            Some(after) => entry
                .activities
                .iter()
                .skip_while(|a| a.id != after)
                .skip(1)
                .cloned()
                .collect(),
            None => entry.activities.clone(),
        };
        let (tx, rx) = mpsc::unbounded();
        entry.live_subs.push(tx);

        stream::iter(backlog).chain(rx).map(Ok).boxed_local()
    }
}
