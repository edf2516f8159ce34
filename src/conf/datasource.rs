//! JSON datasource settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings of the JSON file which meetings and rooms are loaded from.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Datasource {
    /// Path to the JSON file of the following shape:
    /// `{"meetings": {<ID>: <meeting>}, "rooms": {<ID>: <room>}}`.
    ///
    /// Not set by default.
    pub path: Option<PathBuf>,
}
