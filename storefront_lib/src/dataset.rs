//! Static demo dataset backing the payments table demo.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Settlement state of a demo payment.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Failed,
    Refunded,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                PaymentStatus::Paid => "paid",
                PaymentStatus::Failed => "failed",
                PaymentStatus::Refunded => "refunded",
            }
        )
    }
}

/// One row of the demo payments table.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaymentRecord {
    pub id: String,
    /// ISO-8601 local timestamp, kept as received.
    pub date: String,
    pub status: PaymentStatus,
    pub email: String,
    pub amount: i64,
}

impl PaymentRecord {
    /// Parses the row's timestamp. `None` when the date is malformed.
    pub fn parsed_date(&self) -> Option<chrono::NaiveDateTime> {
        chrono::NaiveDateTime::parse_from_str(&self.date, "%Y-%m-%dT%H:%M:%S").ok()
    }
}

/// The bundled demo payment rows.
pub fn sample_payments() -> Vec<PaymentRecord> {
    fn row(id: &str, date: &str, status: PaymentStatus, email: &str, amount: i64) -> PaymentRecord {
        PaymentRecord {
            id: id.to_string(),
            date: date.to_string(),
            status,
            email: email.to_string(),
            amount,
        }
    }
    vec![
        row("4600", "2024-03-11T15:30:00", PaymentStatus::Paid, "james.anderson@example.com", 594),
        row("4599", "2024-03-11T10:10:00", PaymentStatus::Failed, "mia.white@example.com", 276),
        row("4598", "2024-03-11T08:50:00", PaymentStatus::Refunded, "william.brown@example.com", 315),
        row("4597", "2024-03-10T19:45:00", PaymentStatus::Paid, "emma.davis@example.com", 529),
        row("4596", "2024-03-10T15:55:00", PaymentStatus::Paid, "ethan.harris@example.com", 639),
        row("4595", "2024-03-10T15:55:00", PaymentStatus::Paid, "ethan.harris@example.com", 639),
        row("4594", "2024-03-10T15:55:00", PaymentStatus::Paid, "ethan.harris@example.com", 639),
    ]
}
