//! Per-user reading data: shelf status, favorites and reviews

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest accepted review rating
pub const MIN_RATING: u8 = 1;
/// Highest accepted review rating
pub const MAX_RATING: u8 = 5;

/// Where a book sits on a reader's shelf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingStatus {
    #[serde(rename = "WTR")]
    WantToRead,

    #[serde(rename = "RDG")]
    Reading,

    #[serde(rename = "RD")]
    Read,
}

impl ReadingStatus {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ReadingStatus::WantToRead => "Want to Read",
            ReadingStatus::Reading => "Reading",
            ReadingStatus::Read => "Read",
        }
    }
}

/// A reader's relation to one book. Unique per (user, book).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: String,
    pub book_id: Uuid,
    pub status: Option<ReadingStatus>,
    pub is_favorite: bool,
}

/// Partial update of an interaction; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InteractionPatch {
    #[serde(default, with = "double_option")]
    pub status: Option<Option<ReadingStatus>>,
    pub is_favorite: Option<bool>,
}

impl Interaction {
    /// Apply a partial update in place
    pub fn apply(&mut self, patch: InteractionPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(is_favorite) = patch.is_favorite {
            self.is_favorite = is_favorite;
        }
    }
}

/// A review of one book. Unique per (user, book).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: String,

    /// 1 to 5
    pub rating: u8,

    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial update of a review
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReviewPatch {
    /// Unchecked; out-of-range values are rejected when applied
    pub rating: Option<i64>,

    #[serde(default, with = "double_option")]
    pub comment: Option<Option<String>>,
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_codes() {
        assert_eq!(
            serde_json::to_string(&ReadingStatus::WantToRead).unwrap(),
            "\"WTR\""
        );
        let status: ReadingStatus = serde_json::from_str("\"RDG\"").unwrap();
        assert_eq!(status, ReadingStatus::Reading);
        assert_eq!(ReadingStatus::Read.label(), "Read");
    }

    #[test]
    fn test_patch_absent_vs_null() {
        let absent: InteractionPatch = serde_json::from_str(r#"{"is_favorite": true}"#).unwrap();
        assert_eq!(absent.status, None);

        let cleared: InteractionPatch = serde_json::from_str(r#"{"status": null}"#).unwrap();
        assert_eq!(cleared.status, Some(None));

        let mut interaction = Interaction {
            user_id: "alice".to_string(),
            book_id: Uuid::nil(),
            status: Some(ReadingStatus::Reading),
            is_favorite: false,
        };
        interaction.apply(absent);
        assert!(interaction.is_favorite);
        assert_eq!(interaction.status, Some(ReadingStatus::Reading));

        interaction.apply(cleared);
        assert_eq!(interaction.status, None);
    }
}
