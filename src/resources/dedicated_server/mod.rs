//! Dedicated server resources.
//!
//! These talk to the repository directly; there is nothing to orchestrate.

mod credential;
mod notification_setting_bandwidth;

pub use credential::CredentialResource;
pub use notification_setting_bandwidth::NotificationSettingBandwidthResource;
