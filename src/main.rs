use bank_ledger::amortization;
use bank_ledger::billing::StatementGenerator;
use bank_ledger::dataset::Dataset;
use bank_ledger::error::{LedgerError, Result as LedgerResult};
use bank_ledger::io::{load_dataset, save_dataset};
use bank_ledger::ledger::{AccountPatch, CardPatch, LedgerEngine};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

/// Back-office ledger over a JSON dataset: loads the dataset, runs one
/// operation, prints the result as JSON, and writes the dataset back.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON dataset file
    #[arg(long)]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Credit an account
    Deposit {
        account_id: u32,
        amount: i64,
        channel: String,
    },
    /// Debit an account
    Withdraw {
        account_id: u32,
        amount: i64,
        channel: String,
    },
    /// Transfer to an external bank-account beneficiary
    Transfer {
        from_account_id: u32,
        beneficiary_id: u32,
        amount: i64,
    },
    /// Pay a loan or card through a saved beneficiary
    Pay {
        account_id: u32,
        beneficiary_id: u32,
        /// LOAN or CARD
        product_type: String,
        amount: i64,
        channel: String,
    },
    /// Record a card purchase
    Purchase {
        card_id: u32,
        amount: i64,
        merchant: String,
        #[arg(default_value = "POS")]
        channel: String,
    },
    CreateCustomer {
        first_name: String,
        last_name: String,
        /// Date of birth, YYYY-MM-DD
        dob: String,
        email: String,
        phone: String,
        address: String,
    },
    CreateAccount {
        branch_id: u32,
        customer_id: u32,
        account_type: String,
        initial_deposit: i64,
    },
    IssueCard {
        customer_id: u32,
        /// DEBIT, CREDIT, or PREPAID
        card_type: String,
        credit_limit: i64,
        /// YYYY-MM-DD
        expiry_date: String,
    },
    CreateLoan {
        customer_id: u32,
        branch_id: u32,
        loan_type: String,
        principal_amount: i64,
        interest_rate: i64,
        tenure_months: u32,
        /// YYYY-MM-DD
        start_date: String,
    },
    AddBeneficiary {
        customer_id: u32,
        name: String,
        /// BANK_ACCOUNT, LOAN_ACCOUNT, or CARD
        beneficiary_type: String,
        account_number: String,
        #[arg(long)]
        swift_code: Option<String>,
    },
    /// Partially update an account; only supplied flags are applied
    UpdateAccount {
        account_id: u32,
        #[arg(long)]
        branch_id: Option<u32>,
        #[arg(long)]
        customer_id: Option<u32>,
        #[arg(long)]
        account_type: Option<String>,
        #[arg(long)]
        balance: Option<i64>,
        #[arg(long)]
        opened_date: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Partially update a card; only supplied flags are applied
    UpdateCard {
        card_id: u32,
        #[arg(long)]
        credit_limit: Option<i64>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        expiry_date: Option<String>,
    },
    UpdateLoanStatus {
        loan_id: u32,
        /// ACTIVE, CLOSED, or DEFAULTED
        status: String,
    },
    /// Generate the next card statement
    CardStatement { card_id: u32 },
    /// Generate the next loan statement
    LoanStatement { loan_id: u32 },
    /// Compute a loan's amortization schedule (read-only)
    Amortization { loan_id: u32 },
}

fn parse_date(raw: &str) -> LedgerResult<NaiveDate> {
    raw.parse()
        .map_err(|_| LedgerError::InvalidDate(format!("'{raw}' is not a YYYY-MM-DD date")))
}

fn parse_date_opt(raw: Option<String>) -> LedgerResult<Option<NaiveDate>> {
    raw.as_deref().map(parse_date).transpose()
}

fn run(command: Command, data: &mut Dataset) -> LedgerResult<serde_json::Value> {
    let engine = LedgerEngine::new();
    let generator = StatementGenerator::new();

    let value = match command {
        Command::Deposit {
            account_id,
            amount,
            channel,
        } => serde_json::to_value(engine.deposit(data, account_id, amount, &channel)?)?,
        Command::Withdraw {
            account_id,
            amount,
            channel,
        } => serde_json::to_value(engine.withdraw(data, account_id, amount, &channel)?)?,
        Command::Transfer {
            from_account_id,
            beneficiary_id,
            amount,
        } => serde_json::to_value(engine.transfer_to_other_bank_account(
            data,
            from_account_id,
            beneficiary_id,
            amount,
        )?)?,
        Command::Pay {
            account_id,
            beneficiary_id,
            product_type,
            amount,
            channel,
        } => serde_json::to_value(engine.make_payment(
            data,
            account_id,
            beneficiary_id,
            product_type.parse()?,
            amount,
            &channel,
        )?)?,
        Command::Purchase {
            card_id,
            amount,
            merchant,
            channel,
        } => serde_json::to_value(engine.make_card_purchase(
            data,
            card_id,
            amount,
            &merchant,
            channel.parse()?,
        )?)?,
        Command::CreateCustomer {
            first_name,
            last_name,
            dob,
            email,
            phone,
            address,
        } => serde_json::to_value(engine.create_customer(
            data,
            &first_name,
            &last_name,
            parse_date(&dob)?,
            &email,
            &phone,
            &address,
        )?)?,
        Command::CreateAccount {
            branch_id,
            customer_id,
            account_type,
            initial_deposit,
        } => serde_json::to_value(engine.create_account(
            data,
            branch_id,
            customer_id,
            &account_type,
            initial_deposit,
        )?)?,
        Command::IssueCard {
            customer_id,
            card_type,
            credit_limit,
            expiry_date,
        } => serde_json::to_value(engine.issue_card(
            data,
            customer_id,
            card_type.parse()?,
            credit_limit,
            parse_date(&expiry_date)?,
        )?)?,
        Command::CreateLoan {
            customer_id,
            branch_id,
            loan_type,
            principal_amount,
            interest_rate,
            tenure_months,
            start_date,
        } => serde_json::to_value(engine.create_loan(
            data,
            customer_id,
            branch_id,
            &loan_type,
            principal_amount,
            interest_rate,
            tenure_months,
            parse_date(&start_date)?,
        )?)?,
        Command::AddBeneficiary {
            customer_id,
            name,
            beneficiary_type,
            account_number,
            swift_code,
        } => serde_json::to_value(engine.add_beneficiary(
            data,
            customer_id,
            &name,
            beneficiary_type.parse()?,
            &account_number,
            swift_code.as_deref(),
        )?)?,
        Command::UpdateAccount {
            account_id,
            branch_id,
            customer_id,
            account_type,
            balance,
            opened_date,
            status,
        } => {
            let patch = AccountPatch {
                branch_id,
                customer_id,
                account_type,
                balance,
                opened_date: parse_date_opt(opened_date)?,
                status: status
                    .as_deref()
                    .map(|s| s.parse::<bank_ledger::domain::AccountStatus>())
                    .transpose()?,
            };
            serde_json::to_value(engine.update_account(data, account_id, patch)?)?
        }
        Command::UpdateCard {
            card_id,
            credit_limit,
            status,
            expiry_date,
        } => {
            let patch = CardPatch {
                credit_limit,
                status: status
                    .as_deref()
                    .map(|s| s.parse::<bank_ledger::domain::CardStatus>())
                    .transpose()?,
                expiry_date: parse_date_opt(expiry_date)?,
            };
            serde_json::to_value(engine.update_card(data, card_id, patch)?)?
        }
        Command::UpdateLoanStatus { loan_id, status } => {
            serde_json::to_value(engine.update_loan_status(data, loan_id, status.parse()?)?)?
        }
        Command::CardStatement { card_id } => {
            serde_json::to_value(generator.generate_card_statement(data, card_id)?)?
        }
        Command::LoanStatement { loan_id } => {
            serde_json::to_value(generator.generate_loan_statement(data, loan_id)?)?
        }
        Command::Amortization { loan_id } => {
            serde_json::to_value(amortization::amortization_schedule(data, loan_id)?)?
        }
    };
    Ok(value)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut data = load_dataset(&cli.data).into_diagnostic()?;
    let result = run(cli.command, &mut data).into_diagnostic()?;

    println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
    save_dataset(&cli.data, &data).into_diagnostic()?;

    Ok(())
}
