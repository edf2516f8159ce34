//! Adapters serving meetings and rooms from JSON data kept in memory.

mod meetings;
mod rooms;

use std::io;

use serde::Deserialize;
use serde_json::{Map, Value};

#[doc(inline)]
pub use self::{meetings::MeetingsJsonAdapter, rooms::RoomsJsonAdapter};

/// JSON document feeding [`MeetingsJsonAdapter`] and [`RoomsJsonAdapter`].
///
/// ```json
/// {
///   "meetings": {"<meeting ID>": {"ID": "<meeting ID>", ...}},
///   "rooms": {"<room ID>": {"ID": "<room ID>", "activities": [...]}}
/// }
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Datasource {
    /// Meetings data by meeting ID.
    pub meetings: Map<String, Value>,

    /// Rooms data by room ID.
    pub rooms: Map<String, Value>,
}

impl Datasource {
    /// Reads [`Datasource`] from the provided JSON reader.
    ///
    /// # Errors
    ///
    /// If the reader fails or doesn't provide a JSON object of the expected
    /// shape.
    pub fn from_reader<R: io::Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }
}

#[cfg(test)]
mod spec {
    use super::Datasource;

    #[test]
    fn missing_sections_are_empty() {
        let ds = Datasource::from_reader(&br#"{"meetings": {"m1": {}}}"#[..])
            .unwrap();

        assert!(ds.meetings.contains_key("m1"));
        assert!(ds.rooms.is_empty());
    }

    #[test]
    fn rejects_non_object_sections() {
        assert!(Datasource::from_reader(&br#"{"rooms": []}"#[..]).is_err());
    }
}
