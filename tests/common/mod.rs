#![allow(dead_code)]

use bank_ledger::dataset::Dataset;
use bank_ledger::domain::*;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(12, 0, 0).unwrap()
}

pub fn customer(id: u32) -> Customer {
    Customer {
        customer_id: id,
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        dob: date(1990, 6, 1),
        email: format!("customer{id}@example.com"),
        phone: "555-0100".into(),
        address: "1 Main St".into(),
        status: "ACTIVE".into(),
        created_at: noon(2024, 1, 1),
        updated_at: noon(2024, 1, 1),
    }
}

pub fn account(id: u32, balance: i64) -> Account {
    Account {
        account_id: id,
        branch_id: 1,
        customer_id: 1,
        account_number: format!("ACCT{id}"),
        account_type: "SAVINGS".into(),
        balance: Decimal::from(balance),
        opened_date: date(2024, 1, 1),
        status: AccountStatus::Open,
        created_at: noon(2024, 1, 1),
        updated_at: noon(2024, 1, 1),
    }
}

pub fn card(id: u32, card_type: CardType, balance: i64, credit_limit: i64) -> Card {
    Card {
        card_id: id,
        customer_id: 1,
        card_type,
        card_number: format!("CARD{id}"),
        expiry_date: date(2027, 1, 31),
        issued_date: date(2024, 1, 10),
        status: CardStatus::Active,
        balance: Decimal::from(balance),
        credit_limit: Decimal::from(credit_limit),
        created_at: noon(2024, 1, 10),
        updated_at: noon(2024, 1, 10),
    }
}

pub fn loan(id: u32, principal: i64, annual_rate: i64, tenure: u32, start: NaiveDate) -> Loan {
    Loan {
        loan_id: id,
        customer_id: 1,
        branch_id: 1,
        loan_account_number: format!("LOAN{id}"),
        loan_type: "PERSONAL".into(),
        principal_amount: Decimal::from(principal),
        interest_rate: Decimal::from(annual_rate),
        tenure,
        start_date: start,
        end_date: None,
        status: LoanStatus::Active,
        created_at: noon(2024, 1, 1),
    }
}

pub fn beneficiary(id: u32, beneficiary_type: BeneficiaryType, account_number: &str) -> Beneficiary {
    Beneficiary {
        beneficiary_id: id,
        customer_id: 1,
        name: "Payee".into(),
        swift_code: matches!(beneficiary_type, BeneficiaryType::BankAccount)
            .then(|| "DEUTDEFF".to_owned()),
        beneficiary_type,
        account_number: account_number.to_owned(),
        added_at: noon(2024, 1, 2),
    }
}

pub fn penalty_rate(id: u32, from: i64, to: Option<i64>, rate: i64) -> PenaltyRate {
    PenaltyRate {
        penalty_rate_id: id,
        product_type: "LOAN".into(),
        product_subtype: "PERSONAL".into(),
        days_overdue_from: from,
        days_overdue_to: to,
        rate: Decimal::from(rate),
    }
}

pub fn branch(id: u32) -> Branch {
    Branch {
        branch_id: id,
        bank_id: 1,
        name: format!("Branch {id}"),
        address: None,
        swift_code: None,
        contact_number: None,
    }
}

/// One customer, one branch, one account with the given balance.
pub fn base_dataset(balance: i64) -> Dataset {
    let mut data = Dataset::default();
    data.customers.insert(1, customer(1));
    data.branches.insert(1, branch(1));
    data.accounts.insert(1, account(1, balance));
    data
}
