use super::{NotificationFrequency, NotificationUnit};

/// A username/password pair stored on an instance or a dedicated server.
///
/// `T` is the credential type enum of the owning product.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credential<T> {
    pub credential_type: T,
    pub username: String,
    pub password: String,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Credential<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("credential_type", &self.credential_type)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BandwidthNotificationSetting {
    pub id: String,
    pub frequency: NotificationFrequency,
    /// Decimal number as sent by the API, e.g. `"1.5"`.
    pub threshold: String,
    pub unit: NotificationUnit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CredentialType;

    #[test]
    fn test_debug_redacts_password() {
        let credential = Credential {
            credential_type: CredentialType::OperatingSystem,
            username: "root".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", credential);
        assert!(debug.contains("root"));
        assert!(!debug.contains("hunter2"));
    }
}
