use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// Identifier of an instance, load balancer or auto scaling group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Uuid(uuid::Uuid);

impl Uuid {
    pub fn new(value: &str) -> Result<Self, DomainError> {
        value.parse()
    }
}

impl FromStr for Uuid {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| DomainError::InvalidUuid(value.to_string()))
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

/// Root disk size in GB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RootDiskSize(i64);

impl RootDiskSize {
    pub const MIN: i64 = 5;
    pub const MAX: i64 = 1000;

    pub fn new(value: i64) -> Result<Self, DomainError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::RootDiskSizeOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Free-form reference of an auto scaling group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AutoScalingGroupReference(String);

impl AutoScalingGroupReference {
    pub const MAX_LENGTH: usize = 255;

    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let length = value.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(DomainError::ReferenceTooLong {
                length,
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AutoScalingGroupReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
