//! The three sub-records of an emulated user post.

use emulation_types::{forward::row_to_json, Row, SerializeError};
use std::fmt;

/// One named part of an [`EmulationRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Pin,
    Geo,
    User,
}

impl Part {
    /// Fetch, print and publish order.
    pub const ALL: [Part; 3] = [Part::Pin, Part::Geo, Part::User];

    /// Sub-key used in payloads and as the topic suffix.
    pub fn name(self) -> &'static str {
        match self {
            Part::Pin => "pin",
            Part::Geo => "geo",
            Part::User => "user",
        }
    }

    /// Table the part is sampled from.
    pub fn table(self) -> &'static str {
        match self {
            Part::Pin => "pinterest_data",
            Part::Geo => "geolocation_data",
            Part::User => "user_data",
        }
    }

    /// Heading used by the console emitter.
    pub fn heading(self) -> &'static str {
        match self {
            Part::Pin => "Pin data",
            Part::Geo => "Geolocation data",
            Part::User => "User data",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rows fetched from the three tables with the same offset.
///
/// The tables share no join key; the parts describe the same post only if
/// the tables are stored in matching order.
#[derive(Debug, Clone, PartialEq)]
pub struct EmulationRecord {
    pub pin: Row,
    pub geo: Row,
    pub user: Row,
}

impl EmulationRecord {
    pub fn part(&self, part: Part) -> &Row {
        match part {
            Part::Pin => &self.pin,
            Part::Geo => &self.geo,
            Part::User => &self.user,
        }
    }

    /// Parts in [`Part::ALL`] order.
    pub fn parts(&self) -> impl Iterator<Item = (Part, &Row)> {
        Part::ALL.into_iter().map(move |p| (p, self.part(p)))
    }

    /// `{"pin": {...}, "geo": {...}, "user": {...}}`
    pub fn to_json(&self) -> Result<serde_json::Value, SerializeError> {
        let mut map = serde_json::Map::new();
        for (part, row) in self.parts() {
            map.insert(part.name().to_string(), row_to_json(row)?);
        }
        Ok(serde_json::Value::Object(map))
    }
}
