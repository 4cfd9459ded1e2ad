use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{Attachment, Dated};
use crate::types::{flexible_id, timestamp};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FeeStatus {
    #[default]
    Pending,
    Paid,
    Partial,
    Overdue,
    #[serde(other)]
    Unknown,
}

/// A fee demand published for a class or a single student.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeePost {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "amount")]
    pub amount: f64,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "flexible_id::option::deserialize")]
    pub classroom_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id::option::deserialize")]
    pub student_id: Option<String>,
    #[serde(default)]
    pub status: FeeStatus,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl FeePost {
    /// Unpaid and past its due date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.status {
            FeeStatus::Paid => false,
            FeeStatus::Overdue => true,
            _ => self.due_date.is_some_and(|due| due < today),
        }
    }
}

/// Partial update of a fee post; only `Some` fields are sent.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FeePostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FeeStatus>,
}

/// Proof of a payment made against a fee post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeReceipt {
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub id: String,
    #[serde(deserialize_with = "flexible_id::deserialize")]
    pub student_id: String,
    #[serde(default, deserialize_with = "flexible_id::option::deserialize")]
    pub fee_post_id: Option<String>,
    #[serde(deserialize_with = "amount")]
    pub amount: f64,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default, alias = "file_url")]
    pub document_url: Option<String>,
    #[serde(default, with = "timestamp")]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Dated for FeeReceipt {
    fn sort_key(&self) -> Option<DateTime<Utc>> {
        self.paid_at.or(self.created_at)
    }
}

/// Multipart body for recording a payment.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeReceiptInput {
    pub student_id: String,
    pub fee_post_id: Option<String>,
    pub amount: f64,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub document: Option<Attachment>,
}

// Amounts come back as numbers or as decimal strings ("1500.00").
fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {s}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(json: &str) -> FeePost {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn amount_accepts_decimal_strings() {
        let p = post(r#"{"id":1,"title":"Term 1","amount":"1500.50"}"#);
        assert_eq!(p.amount, 1500.5);
        assert!(serde_json::from_str::<FeePost>(r#"{"id":1,"title":"x","amount":"lots"}"#).is_err());
    }

    #[test]
    fn overdue_depends_on_status_and_due_date() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let late = post(r#"{"id":1,"title":"t","amount":10,"due_date":"2024-06-01"}"#);
        assert!(late.is_overdue(today));

        let paid = post(r#"{"id":1,"title":"t","amount":10,"due_date":"2024-06-01","status":"paid"}"#);
        assert!(!paid.is_overdue(today));

        let undated = post(r#"{"id":1,"title":"t","amount":10}"#);
        assert!(!undated.is_overdue(today));
    }

    #[test]
    fn update_serializes_only_changed_fields() {
        let body = serde_json::to_value(FeePostUpdate {
            status: Some(FeeStatus::Paid),
            ..FeePostUpdate::default()
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"status": "paid"}));
    }
}
