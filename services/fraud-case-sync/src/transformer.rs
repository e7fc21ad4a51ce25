// Source fraud case -> destination record mapping

use crate::models::{DestinationRecord, FraudCase};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Drop records with no resolvable country code instead of sending them
    /// with an empty one. Off by default.
    pub skip_missing_country_code: bool,
}

/// Bank account country wins; business partner country is the fallback.
pub fn resolve_country_code(case: &FraudCase) -> &str {
    let bank = case.bank_account.bank_country_code.as_str();
    if bank.is_empty() {
        &case.business_partner_country_code
    } else {
        bank
    }
}

/// Map a page of fraud cases, preserving order
pub fn transform(cases: &[FraudCase], options: &TransformOptions) -> Vec<DestinationRecord> {
    let mut records = Vec::with_capacity(cases.len());

    for case in cases {
        let country_code = resolve_country_code(case);
        if country_code.is_empty() && options.skip_missing_country_code {
            warn!(
                "Skipping fraud case with id {} due to missing country code",
                case.cdl_id
            );
            continue;
        }

        records.push(DestinationRecord {
            cdl_id: case.cdl_id.clone(),
            date_of_attack: case.date_of_attack,
            case_type: case.case_type.clone(),
            country_code: country_code.to_string(),
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BankAccount;

    fn case(id: &str, bank: &str, partner: &str) -> FraudCase {
        FraudCase {
            cdl_id: id.to_string(),
            date_of_attack: 1_700_000_000,
            case_type: "PHISHING".to_string(),
            business_partner_country_code: partner.to_string(),
            bank_account: BankAccount {
                bank_country_code: bank.to_string(),
            },
        }
    }

    #[test]
    fn test_bank_country_wins() {
        assert_eq!(resolve_country_code(&case("a", "AT", "DE")), "AT");
    }

    #[test]
    fn test_partner_country_fallback() {
        assert_eq!(resolve_country_code(&case("a", "", "DE")), "DE");
    }

    #[test]
    fn test_both_empty_resolves_empty() {
        assert_eq!(resolve_country_code(&case("a", "", "")), "");
    }

    #[test]
    fn test_transform_keeps_order_and_empty_codes() {
        let cases = vec![case("1", "AT", "DE"), case("2", "", ""), case("3", "", "FR")];

        let records = transform(&cases, &TransformOptions::default());

        let ids: Vec<_> = records.iter().map(|r| r.cdl_id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        let codes: Vec<_> = records.iter().map(|r| r.country_code.as_str()).collect();
        assert_eq!(codes, ["AT", "", "FR"]);
        assert_eq!(records[0].date_of_attack, 1_700_000_000);
        assert_eq!(records[0].case_type, "PHISHING");
    }

    #[test]
    fn test_skip_toggle_drops_unresolvable() {
        let cases = vec![case("1", "", ""), case("2", "", "FR")];
        let options = TransformOptions {
            skip_missing_country_code: true,
        };

        let records = transform(&cases, &options);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cdl_id, "2");
    }

    #[test]
    fn test_empty_page() {
        assert!(transform(&[], &TransformOptions::default()).is_empty());
    }
}
