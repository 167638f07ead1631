use std::{fmt, str::FromStr};

use crate::common::money::Money;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub id: String,
    pub account_id: i64,
    pub amount: Money,
    pub category: String,
    pub status: PaymentStatus,
}

/// Payment lifecycle: `InProgress` on creation, `Fail` after a reject.
/// `Ok` is terminal and kept for dump compatibility; no operation produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Ok,
    Fail,
    InProgress,
}

impl PaymentStatus {
    /// Token used in dump files.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Ok => "OK",
            PaymentStatus::Fail => "FAIL",
            PaymentStatus::InProgress => "INPROGRESS",
        }
    }

    /// Whether the amount still counts against the account balance.
    pub fn is_debited(&self) -> bool {
        *self != PaymentStatus::Fail
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "OK" => Ok(PaymentStatus::Ok),
            "FAIL" => Ok(PaymentStatus::Fail),
            "INPROGRESS" | "IN_PROGRESS" => Ok(PaymentStatus::InProgress),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

impl Payment {
    pub fn new(
        id: impl Into<String>,
        account_id: i64,
        amount: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            account_id,
            amount,
            category: category.into(),
            status: PaymentStatus::InProgress,
        }
    }

    pub fn set_status(&mut self, status: PaymentStatus) {
        self.status = status;
    }
}
