use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Dated;
use crate::types::{flexible_id, timestamp};

// ---------------------------------------------------------------------------
// Classroom
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Classroom {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default, deserialize_with = "flexible_id::option::deserialize")]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub student_count: Option<u32>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Classroom {
    /// "Grade 5 - B", or just the name when there is no section.
    pub fn display_name(&self) -> String {
        match self.section.as_deref().map(str::trim) {
            Some(section) if !section.is_empty() => format!("{} - {}", self.name, section),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ClassroomInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Attachments (multipart uploads)
// ---------------------------------------------------------------------------

/// A file picked on the device and sent as one multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            bytes,
        }
    }

    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Diary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiaryEntry {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: String,
    #[serde(default, deserialize_with = "flexible_id::option::deserialize")]
    pub classroom_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "description")]
    pub content: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, alias = "file_url")]
    pub attachment_url: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Dated for DiaryEntry {
    fn sort_key(&self) -> Option<DateTime<Utc>> {
        self.created_at
            .or_else(|| self.date.and_then(|d| d.and_hms_opt(0, 0, 0)).map(|n| n.and_utc()))
    }
}

/// Multipart body for a new diary entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DiaryEntryInput {
    pub classroom_id: String,
    pub title: String,
    pub content: String,
    pub subject: Option<String>,
    pub date: NaiveDate,
    pub attachment: Option<Attachment>,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "message")]
    pub body: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "flexible_id::option::deserialize")]
    pub recipient_id: Option<String>,
    #[serde(default, alias = "is_read")]
    pub read: bool,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Dated for Notification {
    fn sort_key(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "event_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Dated for Event {
    fn sort_key(&self) -> Option<DateTime<Utc>> {
        self.date
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|n| n.and_utc())
            .or(self.created_at)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EventInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryItem {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(alias = "url")]
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default, deserialize_with = "flexible_id::option::deserialize")]
    pub classroom_id: Option<String>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}
