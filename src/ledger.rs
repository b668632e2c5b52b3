use crate::clock::{Clock, SystemClock};
use crate::dataset::{Dataset, Table};
use crate::domain::money::positive_amount;
use crate::domain::{
    Account, AccountStatus, Beneficiary, BeneficiaryType, Card, CardStatus, CardTxStatus, CardType,
    Channel, Customer, Loan, LoanStatus, Transaction, TransactionType,
};
use crate::error::{LedgerError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Which product a payment is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKind {
    Loan,
    Card,
}

impl FromStr for ProductKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "LOAN" => Ok(Self::Loan),
            "CARD" => Ok(Self::Card),
            other => Err(LedgerError::invalid_argument(format!(
                "'product_type' must be 'LOAN' or 'CARD' (got '{other}')"
            ))),
        }
    }
}

/// Partial update for an account; only set fields are applied.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub branch_id: Option<u32>,
    pub customer_id: Option<u32>,
    pub account_type: Option<String>,
    pub balance: Option<i64>,
    pub opened_date: Option<NaiveDate>,
    pub status: Option<AccountStatus>,
}

/// Partial update for a card; only set fields are applied.
#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub credit_limit: Option<i64>,
    pub status: Option<CardStatus>,
    pub expiry_date: Option<NaiveDate>,
}

struct TxDraft {
    tx_type: TransactionType,
    channel: String,
    amount: Decimal,
    account_id: Option<u32>,
    beneficiary_id: Option<u32>,
    card_id: Option<u32>,
    loan_id: Option<u32>,
    merchant: Option<String>,
    card_tx_status: Option<CardTxStatus>,
}

impl TxDraft {
    fn new(tx_type: TransactionType, amount: Decimal, channel: impl Into<String>) -> Self {
        Self {
            tx_type,
            channel: channel.into(),
            amount,
            account_id: None,
            beneficiary_id: None,
            card_id: None,
            loan_id: None,
            merchant: None,
            card_tx_status: None,
        }
    }

    fn append(self, transactions: &mut Table<Transaction>, now: NaiveDateTime) -> Transaction {
        let id = transactions.next_id();
        let tx = Transaction {
            transaction_id: id,
            account_id: self.account_id,
            tx_type: self.tx_type,
            channel: self.channel,
            amount: self.amount,
            occurred_at: now,
            beneficiary_id: self.beneficiary_id,
            card_id: self.card_id,
            loan_id: self.loan_id,
            merchant: self.merchant,
            card_tx_status: self.card_tx_status,
            created_at: now,
        };
        transactions.insert(id, tx.clone());
        tx
    }
}

/// The balance-mutating operation catalog.
///
/// Every operation validates its input fully before touching the dataset,
/// so a returned error implies no partial mutation. Successful financial
/// movements return the appended [`Transaction`]; creates and updates
/// return the affected record.
pub struct LedgerEngine<C: Clock = SystemClock> {
    clock: C,
}

impl LedgerEngine {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl Default for LedgerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> LedgerEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Credits an account. Zero and negative amounts are accepted: deposits
    /// carry no positivity check, unlike withdrawals.
    pub fn deposit(
        &self,
        data: &mut Dataset,
        account_id: u32,
        amount: i64,
        channel: &str,
    ) -> Result<Transaction> {
        let now = self.clock.now();
        let account = data
            .accounts
            .get_mut(account_id)
            .ok_or_else(|| LedgerError::not_found("Account", account_id))?;

        account.balance += Decimal::from(amount);
        account.updated_at = now;

        let mut draft = TxDraft::new(TransactionType::Deposit, Decimal::from(amount), channel);
        draft.account_id = Some(account_id);
        Ok(draft.append(&mut data.transactions, now))
    }

    /// Debits an account, rejecting anything beyond the current balance.
    pub fn withdraw(
        &self,
        data: &mut Dataset,
        account_id: u32,
        amount: i64,
        channel: &str,
    ) -> Result<Transaction> {
        let amount = positive_amount(amount)?;
        let now = self.clock.now();
        let account = data
            .accounts
            .get_mut(account_id)
            .ok_or_else(|| LedgerError::not_found("Account", account_id))?;

        if amount > account.balance {
            return Err(LedgerError::InsufficientFunds);
        }
        account.balance -= amount;
        account.updated_at = now;

        let mut draft = TxDraft::new(TransactionType::Withdrawal, amount, channel);
        draft.account_id = Some(account_id);
        Ok(draft.append(&mut data.transactions, now))
    }

    /// Sends funds to an external bank-account beneficiary. The channel is
    /// fixed to ONLINE.
    pub fn transfer_to_other_bank_account(
        &self,
        data: &mut Dataset,
        from_account_id: u32,
        beneficiary_id: u32,
        amount: i64,
    ) -> Result<Transaction> {
        if !data.accounts.contains(from_account_id) {
            return Err(LedgerError::not_found("Account", from_account_id));
        }
        let beneficiary = data
            .beneficiaries
            .get(beneficiary_id)
            .ok_or_else(|| LedgerError::not_found("Beneficiary", beneficiary_id))?;
        if beneficiary.beneficiary_type != BeneficiaryType::BankAccount {
            return Err(LedgerError::InvalidReferenceType(
                "beneficiary is not a bank account".into(),
            ));
        }
        let amount = positive_amount(amount)?;

        let now = self.clock.now();
        let account = data
            .accounts
            .get_mut(from_account_id)
            .ok_or_else(|| LedgerError::not_found("Account", from_account_id))?;
        if amount > account.balance {
            return Err(LedgerError::InsufficientFunds);
        }
        account.balance -= amount;
        account.updated_at = now;

        let mut draft = TxDraft::new(TransactionType::Transfer, amount, "ONLINE");
        draft.account_id = Some(from_account_id);
        draft.beneficiary_id = Some(beneficiary_id);
        Ok(draft.append(&mut data.transactions, now))
    }

    /// Pays a loan or a card through a saved beneficiary. The beneficiary's
    /// account number must resolve to a real product of the requested kind.
    pub fn make_payment(
        &self,
        data: &mut Dataset,
        account_id: u32,
        beneficiary_id: u32,
        product: ProductKind,
        amount: i64,
        channel: &str,
    ) -> Result<Transaction> {
        if !data.accounts.contains(account_id) {
            return Err(LedgerError::not_found("Account", account_id));
        }
        let beneficiary = data
            .beneficiaries
            .get(beneficiary_id)
            .ok_or_else(|| LedgerError::not_found("Beneficiary", beneficiary_id))?;

        let (loan_id, card_id) = match product {
            ProductKind::Loan => {
                if beneficiary.beneficiary_type != BeneficiaryType::LoanAccount {
                    return Err(LedgerError::InvalidReferenceType(
                        "beneficiary is not a loan account".into(),
                    ));
                }
                let loan = data
                    .loans
                    .values()
                    .find(|loan| loan.loan_account_number == beneficiary.account_number)
                    .ok_or_else(|| {
                        LedgerError::InvalidReferenceType(format!(
                            "no loan found for beneficiary account '{}'",
                            beneficiary.account_number
                        ))
                    })?;
                (Some(loan.loan_id), None)
            }
            ProductKind::Card => {
                if beneficiary.beneficiary_type != BeneficiaryType::Card {
                    return Err(LedgerError::InvalidReferenceType(
                        "beneficiary is not a card".into(),
                    ));
                }
                let card = data
                    .cards
                    .values()
                    .find(|card| card.card_number == beneficiary.account_number)
                    .ok_or_else(|| {
                        LedgerError::InvalidReferenceType(format!(
                            "no card found for beneficiary account '{}'",
                            beneficiary.account_number
                        ))
                    })?;
                (None, Some(card.card_id))
            }
        };

        let amount = positive_amount(amount)?;
        let now = self.clock.now();
        let account = data
            .accounts
            .get_mut(account_id)
            .ok_or_else(|| LedgerError::not_found("Account", account_id))?;
        if amount > account.balance {
            return Err(LedgerError::InsufficientFunds);
        }
        account.balance -= amount;
        account.updated_at = now;

        let mut draft = TxDraft::new(TransactionType::Payment, amount, channel);
        draft.account_id = Some(account_id);
        draft.beneficiary_id = Some(beneficiary_id);
        draft.card_id = card_id;
        draft.loan_id = loan_id;
        Ok(draft.append(&mut data.transactions, now))
    }

    /// Records a purchase on a card. CREDIT and PREPAID cards enforce the
    /// credit limit and accrue the outstanding balance; DEBIT purchases are
    /// recorded without a balance check.
    pub fn make_card_purchase(
        &self,
        data: &mut Dataset,
        card_id: u32,
        amount: i64,
        merchant: &str,
        channel: Channel,
    ) -> Result<Transaction> {
        if !data.cards.contains(card_id) {
            return Err(LedgerError::not_found("Card", card_id));
        }
        let amount = positive_amount(amount)?;
        if merchant.is_empty() {
            return Err(LedgerError::invalid_argument(
                "'merchant' must be a non-empty string",
            ));
        }

        let now = self.clock.now();
        let card = data
            .cards
            .get_mut(card_id)
            .ok_or_else(|| LedgerError::not_found("Card", card_id))?;
        if card.card_type.enforces_limit() {
            if card.balance + amount > card.credit_limit {
                return Err(LedgerError::CreditLimitExceeded);
            }
            card.balance += amount;
            card.updated_at = now;
        }

        let mut draft = TxDraft::new(TransactionType::CardPurchase, amount, channel.to_string());
        draft.card_id = Some(card_id);
        draft.merchant = Some(merchant.to_owned());
        draft.card_tx_status = Some(CardTxStatus::Unbilled);
        Ok(draft.append(&mut data.transactions, now))
    }

    pub fn create_customer(
        &self,
        data: &mut Dataset,
        first_name: &str,
        last_name: &str,
        dob: NaiveDate,
        email: &str,
        phone: &str,
        address: &str,
    ) -> Result<Customer> {
        let now = self.clock.now();
        let id = data.customers.next_id();
        let customer = Customer {
            customer_id: id,
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            dob,
            email: email.to_owned(),
            phone: phone.to_owned(),
            address: address.to_owned(),
            status: "ACTIVE".into(),
            created_at: now,
            updated_at: now,
        };
        data.customers.insert(id, customer.clone());
        Ok(customer)
    }

    pub fn create_account(
        &self,
        data: &mut Dataset,
        branch_id: u32,
        customer_id: u32,
        account_type: &str,
        initial_deposit: i64,
    ) -> Result<Account> {
        let now = self.clock.now();
        let id = data.accounts.next_id();
        let account = Account {
            account_id: id,
            branch_id,
            customer_id,
            account_number: format!("ACCT{id}"),
            account_type: account_type.to_owned(),
            balance: Decimal::from(initial_deposit),
            opened_date: now.date(),
            status: AccountStatus::Open,
            created_at: now,
            updated_at: now,
        };
        data.accounts.insert(id, account.clone());
        Ok(account)
    }

    pub fn issue_card(
        &self,
        data: &mut Dataset,
        customer_id: u32,
        card_type: CardType,
        credit_limit: i64,
        expiry_date: NaiveDate,
    ) -> Result<Card> {
        if !data.customers.contains(customer_id) {
            return Err(LedgerError::not_found("Customer", customer_id));
        }
        if credit_limit < 0 {
            return Err(LedgerError::invalid_argument(
                "'credit_limit' must be a non-negative integer",
            ));
        }

        let now = self.clock.now();
        let id = data.cards.next_id();
        let card = Card {
            card_id: id,
            customer_id,
            card_type,
            card_number: format!("CARD{id}"),
            expiry_date,
            issued_date: now.date(),
            status: CardStatus::Active,
            balance: Decimal::ZERO,
            credit_limit: Decimal::from(credit_limit),
            created_at: now,
            updated_at: now,
        };
        data.cards.insert(id, card.clone());
        Ok(card)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_loan(
        &self,
        data: &mut Dataset,
        customer_id: u32,
        branch_id: u32,
        loan_type: &str,
        principal_amount: i64,
        interest_rate: i64,
        tenure_months: u32,
        start_date: NaiveDate,
    ) -> Result<Loan> {
        if !data.customers.contains(customer_id) {
            return Err(LedgerError::not_found("Customer", customer_id));
        }
        if !data.branches.contains(branch_id) {
            return Err(LedgerError::not_found("Branch", branch_id));
        }
        if principal_amount <= 0 {
            return Err(LedgerError::invalid_argument(
                "'principal_amount' must be a positive integer",
            ));
        }
        if interest_rate < 0 {
            return Err(LedgerError::invalid_argument(
                "'interest_rate' must be a non-negative integer",
            ));
        }
        if tenure_months == 0 {
            return Err(LedgerError::invalid_argument(
                "'tenure_months' must be a positive integer",
            ));
        }

        let now = self.clock.now();
        let id = data.loans.next_id();
        let loan = Loan {
            loan_id: id,
            customer_id,
            branch_id,
            loan_account_number: format!("LOAN{id}"),
            loan_type: loan_type.to_owned(),
            principal_amount: Decimal::from(principal_amount),
            interest_rate: Decimal::from(interest_rate),
            tenure: tenure_months,
            start_date,
            end_date: None,
            status: LoanStatus::Active,
            created_at: now,
        };
        data.loans.insert(id, loan.clone());
        Ok(loan)
    }

    /// Saves a payee. A SWIFT code is required exactly when the payee is an
    /// external bank account.
    pub fn add_beneficiary(
        &self,
        data: &mut Dataset,
        customer_id: u32,
        name: &str,
        beneficiary_type: BeneficiaryType,
        account_number: &str,
        swift_code: Option<&str>,
    ) -> Result<Beneficiary> {
        if !data.customers.contains(customer_id) {
            return Err(LedgerError::not_found("Customer", customer_id));
        }
        if name.is_empty() {
            return Err(LedgerError::invalid_argument(
                "'name' must be a non-empty string",
            ));
        }
        if beneficiary_type == BeneficiaryType::BankAccount
            && swift_code.is_none_or(|code| code.trim().is_empty())
        {
            return Err(LedgerError::invalid_argument(
                "'swift_code' is required when beneficiary_type is 'BANK_ACCOUNT'",
            ));
        }
        if account_number.is_empty() {
            return Err(LedgerError::invalid_argument(
                "'account_number' must be a non-empty string",
            ));
        }

        let now = self.clock.now();
        let id = data.beneficiaries.next_id();
        let beneficiary = Beneficiary {
            beneficiary_id: id,
            customer_id,
            name: name.to_owned(),
            swift_code: swift_code.map(str::to_owned),
            beneficiary_type,
            account_number: account_number.to_owned(),
            added_at: now,
        };
        data.beneficiaries.insert(id, beneficiary.clone());
        Ok(beneficiary)
    }

    /// Applies a partial update; untouched fields keep their values.
    /// `updated_at` refreshes on every successful update.
    pub fn update_account(
        &self,
        data: &mut Dataset,
        account_id: u32,
        patch: AccountPatch,
    ) -> Result<Account> {
        let now = self.clock.now();
        let account = data
            .accounts
            .get_mut(account_id)
            .ok_or_else(|| LedgerError::not_found("Account", account_id))?;

        if let Some(branch_id) = patch.branch_id {
            account.branch_id = branch_id;
        }
        if let Some(customer_id) = patch.customer_id {
            account.customer_id = customer_id;
        }
        if let Some(account_type) = patch.account_type {
            account.account_type = account_type;
        }
        if let Some(balance) = patch.balance {
            account.balance = Decimal::from(balance);
        }
        if let Some(opened_date) = patch.opened_date {
            account.opened_date = opened_date;
        }
        if let Some(status) = patch.status {
            account.status = status;
        }
        account.updated_at = now;
        Ok(account.clone())
    }

    pub fn update_card(&self, data: &mut Dataset, card_id: u32, patch: CardPatch) -> Result<Card> {
        if let Some(limit) = patch.credit_limit
            && limit < 0
        {
            return Err(LedgerError::invalid_argument(
                "'credit_limit' must be a non-negative integer",
            ));
        }

        let now = self.clock.now();
        let card = data
            .cards
            .get_mut(card_id)
            .ok_or_else(|| LedgerError::not_found("Card", card_id))?;

        if let Some(limit) = patch.credit_limit {
            card.credit_limit = Decimal::from(limit);
        }
        if let Some(status) = patch.status {
            card.status = status;
        }
        if let Some(expiry_date) = patch.expiry_date {
            card.expiry_date = expiry_date;
        }
        card.updated_at = now;
        Ok(card.clone())
    }

    /// Sets the loan status; closing a loan stamps its `end_date`.
    pub fn update_loan_status(
        &self,
        data: &mut Dataset,
        loan_id: u32,
        status: LoanStatus,
    ) -> Result<Loan> {
        let today = self.clock.today();
        let loan = data
            .loans
            .get_mut(loan_id)
            .ok_or_else(|| LedgerError::not_found("Loan", loan_id))?;

        loan.status = status;
        if status == LoanStatus::Closed {
            loan.end_date = Some(today);
        }
        Ok(loan.clone())
    }
}
