use chrono::{DateTime, Utc};

use super::{AutoScalingGroupReference, AutoScalingGroupState, AutoScalingGroupType, LoadBalancer, Uuid};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AutoScalingGroup {
    pub id: Uuid,
    pub group_type: AutoScalingGroupType,
    pub state: AutoScalingGroupState,
    pub region: String,
    pub reference: AutoScalingGroupReference,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub desired_amount: Option<i64>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub minimum_amount: Option<i64>,
    pub maximum_amount: Option<i64>,
    pub cpu_threshold: Option<i64>,
    pub warmup_time: Option<i64>,
    pub cooldown_time: Option<i64>,
    pub load_balancer: Option<LoadBalancer>,
}

#[derive(Debug, Clone, Default)]
pub struct OptionalAutoScalingGroupValues {
    pub desired_amount: Option<i64>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub minimum_amount: Option<i64>,
    pub maximum_amount: Option<i64>,
    pub cpu_threshold: Option<i64>,
    pub warmup_time: Option<i64>,
    pub cooldown_time: Option<i64>,
    pub load_balancer: Option<LoadBalancer>,
}

impl AutoScalingGroup {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        group_type: AutoScalingGroupType,
        state: AutoScalingGroupState,
        region: impl Into<String>,
        reference: AutoScalingGroupReference,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
        optional: OptionalAutoScalingGroupValues,
    ) -> Self {
        Self {
            id,
            group_type,
            state,
            region: region.into(),
            reference,
            created_at,
            updated_at,
            desired_amount: optional.desired_amount,
            starts_at: optional.starts_at,
            ends_at: optional.ends_at,
            minimum_amount: optional.minimum_amount,
            maximum_amount: optional.maximum_amount,
            cpu_threshold: optional.cpu_threshold,
            warmup_time: optional.warmup_time,
            cooldown_time: optional.cooldown_time,
            load_balancer: optional.load_balancer,
        }
    }
}
