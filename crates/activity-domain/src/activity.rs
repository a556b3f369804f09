use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type ActivityId = String;

/// The three fixed board columns. Serialized with the backend's localized
/// values, which are the literal enum values on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActivityStatus {
    #[default]
    #[serde(rename = "pendente")]
    Pending,
    #[serde(rename = "em andamento")]
    InProgress,
    #[serde(rename = "concluído")]
    Done,
}

impl ActivityStatus {
    /// Column order on the board.
    pub const ALL: [ActivityStatus; 3] = [
        ActivityStatus::Pending,
        ActivityStatus::InProgress,
        ActivityStatus::Done,
    ];

    pub fn as_wire(self) -> &'static str {
        match self {
            ActivityStatus::Pending => "pendente",
            ActivityStatus::InProgress => "em andamento",
            ActivityStatus::Done => "concluído",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_wire() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityStatus::Pending => "Pendente",
            ActivityStatus::InProgress => "Em Andamento",
            ActivityStatus::Done => "Concluído",
        }
    }

    pub fn column_index(self) -> usize {
        match self {
            ActivityStatus::Pending => 0,
            ActivityStatus::InProgress => 1,
            ActivityStatus::Done => 2,
        }
    }

    pub fn from_column_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Next status in dropdown order, wrapping around.
    pub fn cycle(self) -> Self {
        Self::ALL[(self.column_index() + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for ActivityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(status) = Self::from_wire(s) {
            return Ok(status);
        }
        match s.to_lowercase().as_str() {
            "pending" | "todo" => Ok(ActivityStatus::Pending),
            "in_progress" | "in-progress" | "inprogress" => Ok(ActivityStatus::InProgress),
            "done" | "concluido" => Ok(ActivityStatus::Done),
            _ => Err(format!(
                "Invalid status: {}. Use: pendente, em andamento, concluído",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: ActivityStatus,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Activity {
    /// Builds a record locally. Real records come from the backend, which
    /// assigns ids and timestamps; this is for fixtures and previews.
    pub fn new(
        id: impl Into<ActivityId>,
        title: impl Into<String>,
        description: impl Into<String>,
        status: ActivityStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            status,
            image_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_image(&self) -> bool {
        self.image_path.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// The backend emits ISO 8601 timestamps without an offset; those are read as
/// UTC. RFC 3339 input is accepted as well.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&ActivityStatus::InProgress).unwrap(),
            "\"em andamento\""
        );
        let done: ActivityStatus = serde_json::from_str("\"concluído\"").unwrap();
        assert_eq!(done, ActivityStatus::Done);
        assert!(serde_json::from_str::<ActivityStatus>("\"blocked\"").is_err());
    }

    #[test]
    fn test_status_from_str_aliases() {
        assert_eq!("pendente".parse::<ActivityStatus>(), Ok(ActivityStatus::Pending));
        assert_eq!("in_progress".parse::<ActivityStatus>(), Ok(ActivityStatus::InProgress));
        assert_eq!("DONE".parse::<ActivityStatus>(), Ok(ActivityStatus::Done));
        assert!("archived".parse::<ActivityStatus>().is_err());
    }

    #[test]
    fn test_status_cycle_wraps() {
        assert_eq!(ActivityStatus::Pending.cycle(), ActivityStatus::InProgress);
        assert_eq!(ActivityStatus::InProgress.cycle(), ActivityStatus::Done);
        assert_eq!(ActivityStatus::Done.cycle(), ActivityStatus::Pending);
    }

    #[test]
    fn test_deserialize_backend_record() {
        let json = r#"{
            "id": "abc123",
            "title": "Implementar testes unitários",
            "description": "Criar testes para todos os componentes principais",
            "status": "em andamento",
            "image_path": "/uploads/abc123.jpg",
            "created_at": "2026-01-23T12:00:00",
            "updated_at": "2026-01-23T13:00:00.123456"
        }"#;

        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.id, "abc123");
        assert_eq!(activity.status, ActivityStatus::InProgress);
        assert!(activity.has_image());
        assert_eq!(activity.created_at.year(), 2026);
        assert_eq!(activity.updated_at.hour(), 13);
    }

    #[test]
    fn test_deserialize_rfc3339_and_null_image() {
        let json = r#"{
            "id": "x",
            "title": "t",
            "description": "d",
            "status": "pendente",
            "image_path": null,
            "created_at": "2026-01-23T12:00:00+02:00",
            "updated_at": "2026-01-23T12:00:00Z"
        }"#;

        let activity: Activity = serde_json::from_str(json).unwrap();
        assert!(!activity.has_image());
        assert_eq!(activity.created_at.hour(), 10);
    }
}
