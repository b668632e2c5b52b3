pub mod account;
pub mod beneficiary;
pub mod card;
pub mod customer;
pub mod loan;
pub mod money;
pub mod org;
pub mod penalty;
pub mod statement;
pub mod transaction;

pub use account::{Account, AccountStatus};
pub use beneficiary::{Beneficiary, BeneficiaryType};
pub use card::{Card, CardStatus, CardType};
pub use customer::Customer;
pub use loan::{Loan, LoanStatus};
pub use org::{Bank, Branch, Employee};
pub use penalty::PenaltyRate;
pub use statement::{CardStatement, CardStatementStatus, LoanStatement, LoanStatementStatus};
pub use transaction::{CardTxStatus, Channel, Transaction, TransactionType};
