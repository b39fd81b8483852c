//! Load student contracts from a CSV file

use super::{ContractInput, FundingType, PaymentOption};
use crate::error::{Result, ValidationPolicy};
use csv::Reader;
use std::path::Path;

/// Default contracts file for the batch planner
pub const DEFAULT_CONTRACTS_PATH: &str = "contracts.csv";

/// Raw CSV row matching the contracts file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "StudentName", default)]
    student_name: Option<String>,
    #[serde(rename = "CreditHours")]
    credit_hours: u32,
    #[serde(rename = "FundingType")]
    funding_type: String,
    #[serde(rename = "PaymentOption")]
    payment_option: String,
    #[serde(rename = "AmountPaid", default)]
    amount_paid: Option<f64>,
}

impl CsvRow {
    fn into_contract(self, policy: ValidationPolicy) -> Result<ContractInput> {
        let funding_type = if policy.is_strict() {
            self.funding_type.parse::<FundingType>()?
        } else {
            FundingType::parse_or_default(&self.funding_type)
        };
        let payment_option: PaymentOption = self.payment_option.parse()?;

        Ok(ContractInput {
            student_name: self.student_name.filter(|name| !name.trim().is_empty()),
            credit_hours: self.credit_hours,
            funding_type,
            payment_option,
            amount_paid_now: self.amount_paid.unwrap_or(0.0),
        })
    }
}

/// Load all contracts from a CSV file
pub fn load_contracts<P: AsRef<Path>>(path: P, policy: ValidationPolicy) -> Result<Vec<ContractInput>> {
    let reader = Reader::from_path(path)?;
    read_contracts(reader, policy)
}

/// Load contracts from any reader (e.g., string buffer, stdin)
pub fn load_contracts_from_reader<R: std::io::Read>(
    reader: R,
    policy: ValidationPolicy,
) -> Result<Vec<ContractInput>> {
    read_contracts(Reader::from_reader(reader), policy)
}

fn read_contracts<R: std::io::Read>(
    mut reader: Reader<R>,
    policy: ValidationPolicy,
) -> Result<Vec<ContractInput>> {
    let mut contracts = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        contracts.push(row.into_contract(policy)?);
    }

    log::debug!("Loaded {} contracts", contracts.len());
    Ok(contracts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;

    const CONTRACTS: &str = "\
StudentName,CreditHours,FundingType,PaymentOption,AmountPaid
Lina,15,Teachers Grant,Partial,400
Omar,6,Loans & Grants,Full,
,12,Scholarship,full,0
";

    #[test]
    fn test_load_contracts() {
        let contracts =
            load_contracts_from_reader(CONTRACTS.as_bytes(), ValidationPolicy::Lenient).unwrap();
        assert_eq!(contracts.len(), 3);

        let lina = &contracts[0];
        assert_eq!(lina.student_name.as_deref(), Some("Lina"));
        assert_eq!(lina.credit_hours, 15);
        assert_eq!(lina.funding_type, FundingType::TeachersGrant);
        assert_eq!(lina.payment_option, PaymentOption::Partial);
        assert_eq!(lina.amount_paid_now, 400.0);

        let omar = &contracts[1];
        assert_eq!(omar.funding_type, FundingType::LoansAndGrants);
        assert_eq!(omar.amount_paid_now, 0.0);

        // Unknown funding falls back to Regular, blank name is dropped
        assert_eq!(contracts[2].funding_type, FundingType::Regular);
        assert_eq!(contracts[2].student_name, None);
    }

    #[test]
    fn test_strict_rejects_unknown_funding() {
        let err = load_contracts_from_reader(CONTRACTS.as_bytes(), ValidationPolicy::Strict)
            .unwrap_err();
        assert!(matches!(err, PlannerError::UnknownFundingType(_)));
    }

    #[test]
    fn test_bad_payment_option() {
        let data = "CreditHours,FundingType,PaymentOption\n9,Regular,Later\n";
        let err = load_contracts_from_reader(data.as_bytes(), ValidationPolicy::Lenient)
            .unwrap_err();
        assert!(matches!(err, PlannerError::UnknownPaymentOption(_)));
    }
}
