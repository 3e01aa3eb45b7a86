mod instances;
mod load_balancers;

pub use instances::InstancesDataSource;
pub use load_balancers::LoadBalancersDataSource;

use crate::schema::{Attribute, Block, NestedBlock};

/// Contract summary shared by the listing data sources.
fn contract_block() -> NestedBlock {
    NestedBlock::single(
        Block::new()
            .with_attribute(
                "billing_frequency",
                Attribute::computed_int64().with_description("The billing frequency (in months)"),
            )
            .with_attribute(
                "term",
                Attribute::computed_int64().with_description("Contract term (in months)"),
            )
            .with_attribute("type", Attribute::computed_string())
            .with_attribute("ends_at", Attribute::computed_string())
            .with_attribute("state", Attribute::computed_string()),
    )
    .computed()
}
