use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Review status of a return request. Any value may transition to any
/// other; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "return_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReturnStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for ReturnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReturnStatus::Pending => "pending",
            ReturnStatus::Approved => "approved",
            ReturnStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

impl FromStr for ReturnStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReturnStatus::Pending),
            "approved" => Ok(ReturnStatus::Approved),
            "rejected" => Ok(ReturnStatus::Rejected),
            other => Err(format!(
                "invalid status '{}', expected one of: pending, approved, rejected",
                other
            )),
        }
    }
}

/// A customer's request to return purchased products from an order.
/// Everything except `status` is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReturnRequest {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub order_id: String,
    pub name: String,
    pub products: String,
    pub purchase_date: NaiveDate,
    pub store_name: String,
    pub email: String,
    pub phone: String,
    pub status: ReturnStatus,
    pub created_at: DateTime<Utc>,
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Raw submission form fields. `customer_id` never appears here; it is
/// taken from the authenticated identity.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitReturn {
    #[validate(length(min = 1, message = "order_id must not be empty"))]
    pub order_id: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "products must not be empty"))]
    pub products: String,
    /// ISO date string, validated separately in `parse_purchase_date`.
    pub purchase_date: String,
    #[validate(length(min = 1, message = "store_name must not be empty"))]
    pub store_name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone must not be empty"))]
    pub phone: String,
}

impl SubmitReturn {
    /// Trims surrounding whitespace from every field. Client `required`
    /// attributes are not a boundary, so emptiness is decided on the
    /// trimmed values.
    pub fn normalized(&self) -> Self {
        Self {
            order_id: self.order_id.trim().to_string(),
            name: self.name.trim().to_string(),
            products: self.products.trim().to_string(),
            purchase_date: self.purchase_date.trim().to_string(),
            store_name: self.store_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }

    pub fn parse_purchase_date(&self) -> Result<NaiveDate, String> {
        NaiveDate::parse_from_str(&self.purchase_date, "%Y-%m-%d")
            .map_err(|_| "purchase_date must be a valid date (YYYY-MM-DD)".to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateReturnStatus {
    /// Accepted as a raw string so out-of-enum values are rejected with
    /// a validation error instead of a deserialization failure.
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> SubmitReturn {
        SubmitReturn {
            order_id: "ORD-1".to_string(),
            name: "Jane".to_string(),
            products: "Shirt".to_string(),
            purchase_date: "2024-05-01".to_string(),
            store_name: "Main St".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-1111".to_string(),
        }
    }

    // ── Status parsing ────────────────────────────────────────────────────────

    #[test]
    fn status_parses_all_three_values() {
        assert_eq!("pending".parse::<ReturnStatus>(), Ok(ReturnStatus::Pending));
        assert_eq!("approved".parse::<ReturnStatus>(), Ok(ReturnStatus::Approved));
        assert_eq!("rejected".parse::<ReturnStatus>(), Ok(ReturnStatus::Rejected));
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!("shipped".parse::<ReturnStatus>().is_err());
        assert!("".parse::<ReturnStatus>().is_err());
        // The API only ever emits lowercase; case variants are invalid.
        assert!("Pending".parse::<ReturnStatus>().is_err());
        assert!("APPROVED".parse::<ReturnStatus>().is_err());
    }

    #[test]
    fn status_display_round_trips() {
        for s in [
            ReturnStatus::Pending,
            ReturnStatus::Approved,
            ReturnStatus::Rejected,
        ] {
            assert_eq!(s.to_string().parse::<ReturnStatus>(), Ok(s));
        }
    }

    #[test]
    fn status_serde_uses_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReturnStatus::Approved).unwrap(),
            "\"approved\""
        );
        let s: ReturnStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(s, ReturnStatus::Rejected);
    }

    // ── Submission validation ─────────────────────────────────────────────────

    #[test]
    fn valid_payload_passes() {
        let p = payload().normalized();
        assert!(p.validate().is_ok());
        assert!(p.parse_purchase_date().is_ok());
    }

    #[test]
    fn whitespace_only_field_fails_after_normalization() {
        let mut p = payload();
        p.order_id = "   ".to_string();
        let p = p.normalized();
        let errs = p.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("order_id"));
    }

    #[test]
    fn malformed_email_fails() {
        let mut p = payload();
        p.email = "not-an-email".to_string();
        let errs = p.normalized().validate().unwrap_err();
        assert!(errs.field_errors().contains_key("email"));
    }

    #[test]
    fn unparseable_date_fails() {
        let mut p = payload();
        p.purchase_date = "05/01/2024".to_string();
        assert!(p.normalized().parse_purchase_date().is_err());
    }

    #[test]
    fn impossible_calendar_date_fails() {
        let mut p = payload();
        p.purchase_date = "2024-02-30".to_string();
        assert!(p.normalized().parse_purchase_date().is_err());
    }

    #[test]
    fn normalization_trims_every_field() {
        let p = SubmitReturn {
            order_id: "  ORD-1 ".to_string(),
            name: " Jane\t".to_string(),
            products: " Shirt ".to_string(),
            purchase_date: " 2024-05-01 ".to_string(),
            store_name: " Main St ".to_string(),
            email: " jane@example.com ".to_string(),
            phone: " 555-1111 ".to_string(),
        }
        .normalized();
        assert_eq!(p.order_id, "ORD-1");
        assert_eq!(p.name, "Jane");
        assert_eq!(p.email, "jane@example.com");
        assert!(p.validate().is_ok());
        assert!(p.parse_purchase_date().is_ok());
    }

    #[test]
    fn multiple_missing_fields_all_reported() {
        let mut p = payload();
        p.name = "".to_string();
        p.phone = "".to_string();
        let errs = p.normalized().validate().unwrap_err();
        let fields = errs.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("phone"));
    }
}
