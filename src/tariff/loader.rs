//! CSV-based tariff loader
//!
//! Reads credit hour price overrides from a `FundingType,CreditHourPrice` file

use crate::contract::FundingType;
use crate::error::{PlannerError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Load credit hour prices from a CSV file
pub fn load_credit_hour_prices(path: &Path) -> Result<HashMap<FundingType, f64>> {
    let file = File::open(path)?;
    load_credit_hour_prices_from_reader(file)
}

/// Load credit hour prices from any reader
/// Returns HashMap<funding type, price>
pub fn load_credit_hour_prices_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<HashMap<FundingType, f64>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut prices = HashMap::new();

    for result in reader.records() {
        let record = result?;
        if record.len() < 2 {
            return Err(PlannerError::InvalidTariffRow(format!("{:?}", record)));
        }

        let funding: FundingType = record[0].parse()?;
        let price: f64 = record[1]
            .trim()
            .parse()
            .map_err(|_| PlannerError::InvalidTariffRow(format!("bad price {:?}", &record[1])))?;

        if !price.is_finite() || price < 0.0 {
            return Err(PlannerError::InvalidTariffRow(format!(
                "price for {} must be non-negative, got {}",
                funding, price
            )));
        }

        prices.insert(funding, price);
    }

    Ok(prices)
}
