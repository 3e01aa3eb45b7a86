//! Public cloud resources.

mod credential;
mod instance;
mod load_balancer;
mod target_group;

pub use credential::CredentialResource;
pub use instance::InstanceResource;
pub use load_balancer::LoadBalancerResource;
pub use target_group::TargetGroupResource;

use serde_json::Value;

use crate::domain::{BillingFrequency, ContractTerm, ContractType, DomainError};
use crate::models::ContractModel;
use crate::schema::{Attribute, Block, Diagnostic, NestedBlock, Validator};

/// The `contract` block shared by instances and load balancers.
pub(crate) fn contract_block() -> NestedBlock {
    NestedBlock::required(
        Block::new()
            .with_attribute(
                "billing_frequency",
                Attribute::required_int64()
                    .with_description(format!(
                        "The billing frequency (in months). Valid options are {}",
                        markdown_list(BillingFrequency::values())
                    ))
                    .with_validator(Validator::Int64OneOf(BillingFrequency::values().to_vec())),
            )
            .with_attribute(
                "term",
                Attribute::required_int64()
                    .with_description(format!(
                        "Contract term (in months). Used only when type is *MONTHLY*. Valid options are {}",
                        markdown_list(ContractTerm::values())
                    ))
                    .with_validator(Validator::Int64OneOf(ContractTerm::values().to_vec())),
            )
            .with_attribute(
                "type",
                Attribute::required_string()
                    .with_description(
                        "Select *HOURLY* for billing based on hourly usage, else *MONTHLY* for billing per month usage",
                    )
                    .with_validator(Validator::one_of(ContractType::values())),
            )
            .with_attribute("ends_at", Attribute::computed_string())
            .with_attribute("state", Attribute::computed_string()),
    )
}

/// Term and contract type have to agree.
pub(crate) fn validate_contract(config: &Value) -> Vec<Diagnostic> {
    let Some(contract) = config.get("contract") else {
        return Vec::new();
    };
    let contract_type = contract.get("type").and_then(Value::as_str);
    let term = contract.get("term").and_then(Value::as_i64);

    let detail = match (contract_type, term) {
        (Some("HOURLY"), Some(term)) if term != 0 => format!(
            "Attribute contract.term must be 0 when contract.type is \"HOURLY\", got: {}",
            term
        ),
        (Some("MONTHLY"), Some(0)) => {
            "Attribute contract.term cannot be 0 when contract.type is \"MONTHLY\", got: 0"
                .to_string()
        },
        _ => return Vec::new(),
    };

    vec![Diagnostic::error("Invalid Contract Term")
        .with_detail(detail)
        .with_attribute("contract.term")]
}

/// Parse the configured contract values.
pub(crate) fn contract_values(
    contract: &ContractModel,
) -> Result<(ContractType, ContractTerm, BillingFrequency), DomainError> {
    Ok((
        contract.contract_type.parse()?,
        ContractTerm::try_from(contract.term)?,
        BillingFrequency::try_from(contract.billing_frequency)?,
    ))
}

pub(crate) fn markdown_list<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| format!("`{}`", v))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::Schema;
    use crate::validation::validate;

    fn contract_config(contract_type: &str, term: i64) -> Value {
        json!({
            "contract": {"billing_frequency": 1, "term": term, "type": contract_type}
        })
    }

    #[test]
    fn test_hourly_contract_with_term() {
        let diagnostics = validate_contract(&contract_config("HOURLY", 3));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("contract.term"));
        assert_eq!(
            diagnostics[0].detail.as_deref(),
            Some("Attribute contract.term must be 0 when contract.type is \"HOURLY\", got: 3")
        );
    }

    #[test]
    fn test_monthly_contract_without_term() {
        let diagnostics = validate_contract(&contract_config("MONTHLY", 0));
        assert_eq!(
            diagnostics[0].detail.as_deref(),
            Some("Attribute contract.term cannot be 0 when contract.type is \"MONTHLY\", got: 0")
        );
    }

    #[test]
    fn test_valid_contracts() {
        assert!(validate_contract(&contract_config("HOURLY", 0)).is_empty());
        assert!(validate_contract(&contract_config("MONTHLY", 12)).is_empty());
        assert!(validate_contract(&json!({"contract": null})).is_empty());
    }

    #[test]
    fn test_contract_block_validators() {
        let schema = Schema::v0().with_block("contract", contract_block());

        let diagnostics = validate(
            &schema,
            &json!({"contract": {"billing_frequency": 2, "term": 0, "type": "HOURLY"}}),
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].detail.as_deref(),
            Some("Attribute contract.billing_frequency value must be one of: [0 1 3 6 12], got: 2")
        );
    }

    #[test]
    fn test_contract_values() {
        let model = ContractModel {
            billing_frequency: 3,
            term: 6,
            contract_type: "MONTHLY".to_string(),
            ..Default::default()
        };
        assert_eq!(
            contract_values(&model).unwrap(),
            (ContractType::Monthly, ContractTerm::Six, BillingFrequency::Three)
        );

        let model = ContractModel {
            contract_type: "YEARLY".to_string(),
            ..Default::default()
        };
        assert!(contract_values(&model).is_err());
    }

    #[test]
    fn test_markdown_list() {
        assert_eq!(markdown_list(&["a", "b"]), "`a`, `b`");
    }
}
