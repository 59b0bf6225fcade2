use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use time::{Date, macros::date};

use crate::query::{Action, FieldValue, Outcome, Record, sum_where};

pub type LoanId = u32;

/// The share of the original amount settled by one recorded payment.
const INSTALMENT_FRACTION: f64 = 0.1;

/// The percentage points one recorded payment adds to the repayment progress.
const PROGRESS_STEP: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Completed,
    Overdue,
}

impl LoanStatus {
    pub const ALL: [&'static str; 3] = ["active", "completed", "overdue"];

    pub fn as_str(self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Completed => "completed",
            LoanStatus::Overdue => "overdue",
        }
    }
}

/// A loan issued to a member.
///
/// `progress` is the repayment progress in percent. It moves with `balance`
/// when a payment is recorded but the two are not kept consistent otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    pub id: LoanId,
    pub borrower: String,
    pub amount: f64,
    pub issued: Date,
    pub due: Date,
    pub balance: f64,
    pub progress: u8,
    pub status: LoanStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanField {
    Borrower,
    Amount,
    Issued,
    Due,
    Balance,
    Progress,
    Status,
}

impl Record for Loan {
    type Id = LoanId;
    type Field = LoanField;

    fn id(&self) -> &LoanId {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.borrower.as_str()]
    }

    fn field(&self, field: LoanField) -> FieldValue<'_> {
        match field {
            LoanField::Borrower => FieldValue::text(&self.borrower),
            LoanField::Amount => FieldValue::Number(self.amount),
            LoanField::Issued => FieldValue::Text(Cow::Owned(self.issued.to_string())),
            LoanField::Due => FieldValue::Text(Cow::Owned(self.due.to_string())),
            LoanField::Balance => FieldValue::Number(self.balance),
            LoanField::Progress => FieldValue::Number(f64::from(self.progress)),
            LoanField::Status => FieldValue::text(self.status.as_str()),
        }
    }
}

/// Record one instalment of a tenth of the original amount.
///
/// The balance never drops below zero and the progress never exceeds 100. The
/// loan is completed once the balance is paid off, otherwise the status is
/// left alone, so an overdue loan stays overdue.
#[derive(Debug, Clone, Copy)]
pub struct RecordPayment;

impl Action<Loan> for RecordPayment {
    fn apply(&self, loan: &Loan) -> Outcome<Loan> {
        let instalment = (loan.amount * INSTALMENT_FRACTION).round();
        let remaining = loan.balance - instalment;

        Outcome::Replace(Loan {
            balance: remaining.max(0.0),
            progress: loan.progress.saturating_add(PROGRESS_STEP).min(100),
            status: if remaining <= 0.0 {
                LoanStatus::Completed
            } else {
                loan.status
            },
            ..loan.clone()
        })
    }
}

/// The summary cards above the loans table.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanTotals {
    pub total_issued: f64,
    /// The outstanding balance of active loans.
    pub active_outstanding: f64,
    /// The original amount of completed loans.
    pub repaid: f64,
    /// The outstanding balance of overdue loans.
    pub overdue: f64,
}

impl LoanTotals {
    pub fn new(loans: &[Loan]) -> Self {
        Self {
            total_issued: sum_where(loans, |_| true, |loan| loan.amount),
            active_outstanding: sum_where(
                loans,
                |loan| loan.status == LoanStatus::Active,
                |loan| loan.balance,
            ),
            repaid: sum_where(
                loans,
                |loan| loan.status == LoanStatus::Completed,
                |loan| loan.amount,
            ),
            overdue: sum_where(
                loans,
                |loan| loan.status == LoanStatus::Overdue,
                |loan| loan.balance,
            ),
        }
    }
}

pub fn sample_loans() -> Vec<Loan> {
    vec![
        Loan {
            id: 1,
            borrower: "John Kamau".to_owned(),
            amount: 50000.0,
            issued: date!(2025 - 06 - 01),
            due: date!(2026 - 06 - 01),
            balance: 20000.0,
            progress: 60,
            status: LoanStatus::Active,
        },
        Loan {
            id: 2,
            borrower: "Mary Wanjiku".to_owned(),
            amount: 30000.0,
            issued: date!(2025 - 01 - 15),
            due: date!(2025 - 12 - 15),
            balance: 0.0,
            progress: 100,
            status: LoanStatus::Completed,
        },
        Loan {
            id: 3,
            borrower: "Peter Omondi".to_owned(),
            amount: 20000.0,
            issued: date!(2025 - 08 - 01),
            due: date!(2025 - 11 - 15),
            balance: 15000.0,
            progress: 25,
            status: LoanStatus::Overdue,
        },
        Loan {
            id: 4,
            borrower: "Grace Achieng".to_owned(),
            amount: 40000.0,
            issued: date!(2025 - 09 - 01),
            due: date!(2026 - 03 - 01),
            balance: 32000.0,
            progress: 20,
            status: LoanStatus::Active,
        },
    ]
}
