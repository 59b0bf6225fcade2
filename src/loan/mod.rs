//! Loans issued to members, their repayment and the loan detail page.

mod actions;
mod core;
mod loan_page;
mod loans_page;

pub use actions::{record_loan_payment_endpoint, remind_loan_endpoint};
pub use core::{Loan, LoanField, LoanId, LoanStatus, LoanTotals, RecordPayment, sample_loans};
pub use loan_page::get_loan_page;
pub use loans_page::{LoanQuery, LoanState, get_loans_page};
