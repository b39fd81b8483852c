//! Contract input data and CSV loading

mod data;
pub mod loader;

pub use data::{ContractInput, FundingType, PaymentOption};
pub use loader::{load_contracts, load_contracts_from_reader};
