use campus_shared::models::{AttendanceRecord, AttendanceSession, AttendanceSubmission};
use campus_shared::types::Page;
use chrono::NaiveDate;
use reqwest::Method;
use tracing::info;

use crate::client::{ApiClient, Expect};
use crate::error::ApiResult;

impl ApiClient {
    /// `GET /attendance/sessions?classroom_id=..[&date=YYYY-MM-DD]`
    pub async fn list_attendance_sessions(
        &self,
        token: Option<&str>,
        classroom_id: &str,
        date: Option<NaiveDate>,
    ) -> ApiResult<Page<AttendanceSession>> {
        let mut query = vec![("classroom_id", classroom_id.to_string())];
        if let Some(date) = date {
            query.push(("date", date.format("%Y-%m-%d").to_string()));
        }

        let request = self
            .authed(Method::GET, &["attendance", "sessions"], token)?
            .query(&query);
        self.execute("list_attendance_sessions", request, Expect::Success)
            .await
    }

    /// `POST /attendance/sessions`. The `records` array is sent in the
    /// order the submission holds it.
    pub async fn submit_attendance(
        &self,
        token: Option<&str>,
        submission: &AttendanceSubmission,
    ) -> ApiResult<AttendanceSession> {
        let request = self
            .authed(Method::POST, &["attendance", "sessions"], token)?
            .json(submission);
        let session: AttendanceSession = self
            .execute("submit_attendance", request, Expect::Success)
            .await?;

        info!(
            classroom_id = %submission.classroom_id,
            date = %submission.date,
            records = submission.records.len(),
            "attendance submitted"
        );
        Ok(session)
    }

    /// `GET /attendance/records?student_id=..[&month=YYYY-MM]`. Only the
    /// year and month of `month` are used.
    pub async fn list_attendance_records(
        &self,
        token: Option<&str>,
        student_id: &str,
        month: Option<NaiveDate>,
    ) -> ApiResult<Page<AttendanceRecord>> {
        let mut query = vec![("student_id", student_id.to_string())];
        if let Some(month) = month {
            query.push(("month", month.format("%Y-%m").to_string()));
        }

        let request = self
            .authed(Method::GET, &["attendance", "records"], token)?
            .query(&query);
        self.execute("list_attendance_records", request, Expect::Success)
            .await
    }
}
