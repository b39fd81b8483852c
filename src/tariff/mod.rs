//! Tuition tariff: credit hour prices by funding type and fixed fees

pub mod loader;

use crate::contract::FundingType;
use crate::error::Result;
use std::collections::HashMap;
use std::path::Path;

/// University fixed fee added to every contract (JOD)
pub const UNIVERSITY_FIXED_FEE: f64 = 60.0;

/// Gas fee covered by the university, shown for information only (JOD)
pub const GAS_FEE: f64 = 13.5;

/// Price applied when a funding type has no entry in the table (Regular)
pub const DEFAULT_CREDIT_HOUR_PRICE: f64 = 50.0;

/// Price table and fixed fees used to compute a fee summary
#[derive(Debug, Clone)]
pub struct Tariff {
    /// Price per credit hour by funding type (JOD)
    prices: HashMap<FundingType, f64>,

    /// Price for funding types missing from the table
    pub default_price: f64,

    /// Fixed university fee
    pub fixed_fee: f64,

    /// Informational gas fee, never charged to the student
    pub gas_fee: f64,
}

impl Tariff {
    /// Standard price table
    pub fn standard() -> Self {
        let prices = FundingType::ALL
            .iter()
            .map(|&funding| (funding, standard_price(funding)))
            .collect();

        Self {
            prices,
            default_price: DEFAULT_CREDIT_HOUR_PRICE,
            fixed_fee: UNIVERSITY_FIXED_FEE,
            gas_fee: GAS_FEE,
        }
    }

    /// Standard table with prices overridden from a CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let overrides = loader::load_credit_hour_prices(path)?;
        Ok(Self::standard().with_prices(overrides))
    }

    /// Replace the prices of the given funding types
    pub fn with_prices(mut self, overrides: HashMap<FundingType, f64>) -> Self {
        for (funding, price) in overrides {
            log::debug!("Tariff override: {} = {:.2}", funding, price);
            self.prices.insert(funding, price);
        }
        self
    }

    /// Price per credit hour for a funding type
    pub fn price_for(&self, funding: FundingType) -> f64 {
        self.prices.get(&funding).copied().unwrap_or(self.default_price)
    }

    /// Price per credit hour for a free-form funding label; unknown labels
    /// get the default price
    pub fn price_for_label(&self, label: &str) -> f64 {
        match label.parse::<FundingType>() {
            Ok(funding) => self.price_for(funding),
            Err(_) => self.default_price,
        }
    }
}

impl Default for Tariff {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_price(funding: FundingType) -> f64 {
    match funding {
        FundingType::RoyalGrant => 45.0,
        FundingType::TeachersGrant => 40.0,
        FundingType::StaffGrant => 35.0,
        FundingType::LoansAndGrants => 0.0,
        FundingType::Regular => 50.0,
        FundingType::Parallel => 60.0,
    }
}
