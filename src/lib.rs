pub mod amortization;
pub mod billing;
pub mod clock;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod io;
pub mod ledger;
