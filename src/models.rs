use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A single scheduled delivery of a course at a venue.
///
/// Fields the service does not interpret are kept in `extra` and written back
/// out unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Course {
    #[schema(example = "Mon 1st January 2024")]
    pub formatted_start_date: String,
    #[schema(example = "Fri 5th January 2024")]
    pub formatted_end_date: String,
    pub venue: Venue,
    pub days: Vec<SessionDay>,
    pub available_spaces: i64,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Venue {
    pub name: String,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct SessionDay {
    #[schema(example = "2024-01-01T09:00:00Z")]
    pub start_date: String,
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Map<String, Value>,
}

impl Course {
    /// Key under which duplicate offerings are merged.
    pub fn aggregation_key(&self) -> String {
        format!(
            "{}{}{}",
            self.venue.name, self.formatted_start_date, self.formatted_end_date
        )
    }

    /// Key under which near-duplicate offerings are grouped.
    pub fn similarity_key(&self) -> String {
        format!(
            "{}{}{}",
            self.formatted_start_date, self.formatted_end_date, self.venue.name
        )
    }
}
