use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Student;
use crate::types::{flexible_id, timestamp};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Leave,
    #[serde(other)]
    Unknown,
}

/// One student's mark on one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceRecord {
    #[serde(default, deserialize_with = "flexible_id::option::deserialize")]
    pub id: Option<String>,
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub student_id: String,
    #[serde(default)]
    pub student_name: Option<String>,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "flexible_id::option::deserialize")]
    pub session_id: Option<String>,
}

/// A roll call taken for a classroom on a given day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttendanceSession {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: String,
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub classroom_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub records: Vec<AttendanceRecord>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One line of an attendance submission.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttendanceMark {
    pub student_id: String,
    pub status: AttendanceStatus,
    pub student_name: String,
}

/// Body of `POST /attendance/sessions`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttendanceSubmission {
    pub classroom_id: String,
    pub date: NaiveDate,
    pub records: Vec<AttendanceMark>,
}

impl AttendanceSubmission {
    /// Build a submission from the roll as shown on screen. The order of
    /// `marks` is kept as-is in `records`.
    pub fn from_marks<'a, I>(classroom_id: impl Into<String>, date: NaiveDate, marks: I) -> Self
    where
        I: IntoIterator<Item = (&'a Student, AttendanceStatus)>,
    {
        let records = marks
            .into_iter()
            .map(|(student, status)| AttendanceMark {
                student_id: student.id.clone(),
                status,
                student_name: student.name.clone(),
            })
            .collect();

        Self {
            classroom_id: classroom_id.into(),
            date,
            records,
        }
    }
}

/// Counts shown above the attendance calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AttendanceSummary {
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub leave: u32,
}

impl AttendanceSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a AttendanceRecord>,
    {
        records
            .into_iter()
            .fold(Self::default(), |mut acc, record| {
                match record.status {
                    AttendanceStatus::Present => acc.present += 1,
                    AttendanceStatus::Absent => acc.absent += 1,
                    AttendanceStatus::Late => acc.late += 1,
                    AttendanceStatus::Leave => acc.leave += 1,
                    AttendanceStatus::Unknown => {}
                }
                acc
            })
    }

    pub fn total(&self) -> u32 {
        self.present + self.absent + self.late + self.leave
    }

    /// Share of days attended (present or late), in percent. `None` when
    /// there are no records yet.
    pub fn percentage(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some(f64::from(self.present + self.late) * 100.0 / f64::from(total))
    }
}
