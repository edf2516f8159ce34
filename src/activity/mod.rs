//! Activity stream of a room: its activities in real time and the way they
//! are laid out.

use std::{collections::HashSet, rc::Rc};

use chrono::NaiveDate;
use futures::StreamExt as _;
use medea_widgets_reactive::ObservableExt as _;
use serde::Serialize;

use crate::adapter::{Activity, AdapterStream, Room, RoomKind, RoomsAdapter};

/// Returns [`AdapterStream`] of all the [`Activity`]s of the [`Room`] with the
/// provided ID: the already posted ones first, then every newly posted one.
///
/// Live [`Activity`]s are requested right after the last past one, so none
/// of them is missed or repeated between the two.
pub fn activities_in_real_time(
    adapter: Rc<dyn RoomsAdapter>,
    room_id: &str,
) -> AdapterStream<Activity> {
    let room_id = room_id.to_owned();
    let past = adapter.get_past_activities(&room_id);
    past.chain_with(move |last: Option<Activity>| {
        Ok(adapter.get_live_activities(&room_id, last.map(|a| a.id)))
    })
    .boxed_local()
}

/// Single item of a laid out [`ActivityStream`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActivityItem {
    /// Separator preceding the first [`Activity`] of a day.
    TimeRuler {
        /// Day of the following [`Activity`]s, in UTC.
        date: NaiveDate,
    },

    /// [`Activity`] itself.
    Activity(Activity),
}

/// What an [`ActivityStream`] of a [`Room`] displays.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum ActivityStreamView {
    /// Greeting shown while the [`Room`] has no [`Activity`]s.
    Greeting {
        /// Name of the other person of a direct [`Room`], empty for group
        /// ones.
        #[serde(rename = "personName")]
        person_name: String,
    },

    /// Laid out [`Activity`]s.
    Activities {
        /// [`ActivityItem`]s, oldest first.
        items: Vec<ActivityItem>,
    },
}

/// [`Activity`]s of a [`Room`] ordered from the oldest to the newest.
#[derive(Clone, Debug, Default)]
pub struct ActivityStream {
    activities: Vec<Activity>,
    ids: HashSet<String>,
}

impl ActivityStream {
    /// Creates new empty [`ActivityStream`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns count of the [`Activity`]s in this [`ActivityStream`].
    #[inline]
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// Indicates whether this [`ActivityStream`] has no [`Activity`]s.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Returns the newest [`Activity`].
    #[inline]
    pub fn last(&self) -> Option<&Activity> {
        self.activities.last()
    }

    /// Puts the provided page of older [`Activity`]s (oldest first) before
    /// the existing ones.
    ///
    /// Already present [`Activity`]s are skipped.
    pub fn prepend<I>(&mut self, older: I)
    where
        I: IntoIterator<Item = Activity>,
    {
        let ids = &mut self.ids;
        let older: Vec<_> = older
            .into_iter()
            .filter(|a| ids.insert(a.id.clone()))
            .collect();
        drop(self.activities.splice(0..0, older));
    }

    /// Appends the provided new [`Activity`].
    ///
    /// Returns `false` and does nothing if it's already present.
    pub fn push(&mut self, activity: Activity) -> bool {
        if !self.ids.insert(activity.id.clone()) {
            return false;
        }
        self.activities.push(activity);
        true
    }

    /// Lays out [`Activity`]s of this [`ActivityStream`], putting an
    /// [`ActivityItem::TimeRuler`] before the first [`Activity`] of every day.
    pub fn items(&self) -> Vec<ActivityItem> {
        let mut items = Vec::with_capacity(self.activities.len());
        let mut day = None;
        for activity in &self.activities {
            let date = activity.published.naive_utc().date();
            if day != Some(date) {
                day = Some(date);
                items.push(ActivityItem::TimeRuler { date });
            }
            items.push(ActivityItem::Activity(activity.clone()));
        }
        items
    }

    /// Returns [`ActivityStreamView`] of this [`ActivityStream`] in the
    /// provided [`Room`].
    pub fn view(&self, room: &Room) -> ActivityStreamView {
        if self.is_empty() {
            let person_name = match room.kind {
                RoomKind::Direct => room.title.clone(),
                RoomKind::Group => String::new(),
            };
            ActivityStreamView::Greeting { person_name }
        } else {
            ActivityStreamView::Activities {
                items: self.items(),
            }
        }
    }
}

impl Extend<Activity> for ActivityStream {
    fn extend<I: IntoIterator<Item = Activity>>(&mut self, iter: I) {
        for activity in iter {
            let _ = self.push(activity);
        }
    }
}

#[cfg(test)]
mod spec {
    use std::rc::Rc;

    use futures::{stream, StreamExt as _};
    use serde_json::json;

    use crate::adapter::{
        Activity, AdapterError, MockRoomsAdapter, Room, RoomKind,
    };

    use super::{
        activities_in_real_time, ActivityItem, ActivityStream,
        ActivityStreamView,
    };

    fn activity(id: &str, published: &str) -> Activity {
        Activity {
            id: id.into(),
            person_id: "p1".into(),
            text: id.into(),
            published: published.parse().unwrap(),
        }
    }

    fn room(kind: RoomKind) -> Room {
        Room {
            id: "r1".into(),
            title: "Alice".into(),
            kind,
        }
    }

    #[test]
    fn greets_other_person_of_empty_direct_room() {
        let stream = ActivityStream::new();

        assert_eq!(
            stream.view(&room(RoomKind::Direct)),
            ActivityStreamView::Greeting {
                person_name: "Alice".into()
            },
        );
        assert_eq!(
            stream.view(&room(RoomKind::Group)),
            ActivityStreamView::Greeting {
                person_name: String::new()
            },
        );
    }

    #[test]
    fn puts_time_ruler_before_each_day() {
        let mut stream = ActivityStream::new();
        stream.extend(vec![
            activity("a2", "2021-05-04T10:00:00Z"),
            activity("a3", "2021-05-04T23:59:59Z"),
            activity("a4", "2021-05-05T00:00:00Z"),
        ]);
        stream.prepend(vec![activity("a1", "2021-05-03T08:00:00Z")]);

        let layout: Vec<_> = stream
            .items()
            .into_iter()
            .map(|item| match item {
                ActivityItem::TimeRuler { date } => date.to_string(),
                ActivityItem::Activity(a) => a.id,
            })
            .collect();
        assert_eq!(
            layout,
            vec![
                "2021-05-03",
                "a1",
                "2021-05-04",
                "a2",
                "a3",
                "2021-05-05",
                "a4",
            ],
        );
    }

    #[test]
    fn ignores_duplicates() {
        let mut stream = ActivityStream::new();

        assert!(stream.push(activity("a1", "2021-05-04T10:00:00Z")));
        assert!(!stream.push(activity("a1", "2021-05-04T10:00:00Z")));
        stream.prepend(vec![
            activity("a0", "2021-05-04T09:00:00Z"),
            activity("a1", "2021-05-04T10:00:00Z"),
        ]);

        assert_eq!(stream.len(), 2);
        assert_eq!(stream.last().unwrap().id, "a1");
    }

    #[test]
    fn serializes_view() {
        let mut stream = ActivityStream::new();
        let _ = stream.push(activity("a1", "2021-05-04T10:00:00Z"));

        assert_eq!(
            serde_json::to_value(stream.view(&room(RoomKind::Group)))
                .unwrap(),
            json!({
                "view": "activities",
                "items": [
                    {"type": "timeRuler", "date": "2021-05-04"},
                    {
                        "type": "activity",
                        "ID": "a1",
                        "personID": "p1",
                        "text": "a1",
                        "published": "2021-05-04T10:00:00Z",
                    },
                ],
            }),
        );
    }

    #[tokio::test]
    async fn continues_past_activities_with_live_ones_after_last() {
        let mut adapter = MockRoomsAdapter::new();
        adapter.expect_get_past_activities().returning(|_| {
            stream::iter(vec![
                Ok(activity("a1", "2021-05-04T10:00:00Z")),
                Ok(activity("a2", "2021-05-04T11:00:00Z")),
            ])
            .boxed_local()
        });
        adapter
            .expect_get_live_activities()
            .withf(|room_id, after| {
                room_id == "r1" && after.as_deref() == Some("a2")
            })
            .times(1)
            .returning(|_, _| {
                stream::iter(vec![Ok(activity("a3", "2021-05-04T12:00:00Z"))])
                    .boxed_local()
            });

        let ids: Vec<_> = activities_in_real_time(Rc::new(adapter), "r1")
            .map(|a| a.unwrap().id)
            .collect()
            .await;
        assert_eq!(ids, vec!["a1", "a2", "a3"]);
    }

    #[tokio::test]
    async fn does_not_go_live_after_past_error() {
        let mut adapter = MockRoomsAdapter::new();
        adapter.expect_get_past_activities().returning(|id| {
            stream::iter(vec![Err(tracerr::new!(AdapterError::RoomNotFound(
                id.into()
            )))])
            .boxed_local()
        });
        adapter.expect_get_live_activities().times(0);

        let all: Vec<_> =
            activities_in_real_time(Rc::new(adapter), "r1").collect().await;
        assert_eq!(all.len(), 1);
        assert!(all[0].is_err());
    }
}
