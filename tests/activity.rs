use std::rc::Rc;

use futures::{StreamExt as _, TryStreamExt as _};
use medea_widgets::{
    activity::{activities_in_real_time, ActivityStream, ActivityStreamView},
    adapter::{json::RoomsJsonAdapter, Activity, RoomsAdapter},
};
use serde_json::json;

fn adapter() -> Rc<RoomsJsonAdapter> {
    let rooms = json!({
        "direct": {"ID": "direct", "title": "Bob", "type": "direct"},
        "team": {
            "ID": "team",
            "title": "Team",
            "type": "group",
            "activities": [
                {
                    "ID": "a1",
                    "personID": "bob",
                    "text": "Hi",
                    "published": "2021-05-03T09:00:00Z",
                },
                {
                    "ID": "a2",
                    "personID": "alice",
                    "text": "Hello",
                    "published": "2021-05-04T09:00:00Z",
                },
            ],
        },
    });
    Rc::new(
        RoomsJsonAdapter::new(rooms.as_object().cloned().unwrap()).unwrap(),
    )
}

fn activity(id: &str) -> Activity {
    Activity {
        id: id.into(),
        person_id: "alice".into(),
        text: "New".into(),
        published: "2021-05-04T10:00:00Z".parse().unwrap(),
    }
}

#[tokio::test]
async fn streams_past_then_live_activities_without_gaps() {
    let rooms = adapter();
    let adapter: Rc<dyn RoomsAdapter> = rooms.clone();
    let mut all = activities_in_real_time(adapter, "team");

    assert_eq!(all.next().await.unwrap().unwrap().id, "a1");
    assert_eq!(all.next().await.unwrap().unwrap().id, "a2");

    rooms.post_activity("team", activity("a3")).unwrap();
    assert_eq!(all.next().await.unwrap().unwrap().id, "a3");
}

#[tokio::test]
async fn greets_in_empty_direct_room() {
    let rooms = adapter();
    let room = rooms.get_room("direct").try_next().await.unwrap().unwrap();

    let mut stream = ActivityStream::new();
    stream.extend(
        rooms
            .get_past_activities("direct")
            .try_collect::<Vec<_>>()
            .await
            .unwrap(),
    );

    assert_eq!(
        stream.view(&room),
        ActivityStreamView::Greeting {
            person_name: "Bob".into(),
        },
    );
}

#[tokio::test]
async fn lays_out_activities_by_day() {
    let rooms = adapter();
    let room = rooms.get_room("team").try_next().await.unwrap().unwrap();

    let mut stream = ActivityStream::new();
    stream.extend(
        rooms
            .get_past_activities("team")
            .try_collect::<Vec<_>>()
            .await
            .unwrap(),
    );

    assert_eq!(
        serde_json::to_value(stream.view(&room)).unwrap()["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["type"].as_str().unwrap())
            .collect::<Vec<_>>(),
        vec!["timeRuler", "activity", "timeRuler", "activity"],
    );
}
