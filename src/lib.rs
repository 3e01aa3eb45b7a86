//! Terraform provider for Leaseweb.
//!
//! Manages Leaseweb public cloud instances, load balancers, target groups and
//! credentials, plus dedicated server credentials and bandwidth notification
//! settings. Two data sources list public cloud instances and load balancers.
//!
//! # Layout
//!
//! - [`server`] speaks the plugin protocol over gRPC and prints the
//!   handshake line Terraform waits for.
//! - [`provider`] dispatches protocol calls to [`resources`] and
//!   [`data_sources`] by type name.
//! - Resources work on [`models`], call [`services`] or repositories through
//!   the [`ports`] traits, and the [`repositories`] map domain entities onto
//!   the [`sdk`] REST client.
//!
//! # Handshake
//!
//! ```text
//! 1|6|tcp|127.0.0.1:50051|grpc
//! ```
//!
//! Format: `<core protocol>|<app protocol>|tcp|<address>|grpc`

#![warn(clippy::all)]

pub mod config;
pub mod data_sources;
pub mod domain;
pub mod error;
pub mod logging;
pub mod models;
pub mod plan;
pub mod ports;
pub mod provider;
pub mod repositories;
pub mod resources;
pub mod schema;
pub mod sdk;
pub mod server;
pub mod services;
pub mod testing;
pub mod types;
pub mod validation;

#[allow(clippy::all)]
pub mod generated;

pub use config::ProviderConfig;
pub use error::ProviderError;
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use provider::LeasewebProvider;
pub use schema::ProviderSchema;
pub use server::{
    serve, serve_on, serve_on_listener, serve_on_with_options, serve_with_options,
    ProviderService, ServeOptions,
};
pub use types::{
    handshake_line, AttributeChange, ImportedResource, PlanResult, ProviderMetadata,
    ServerCapabilities, APP_PROTOCOL_VERSION, CORE_PROTOCOL_VERSION, MAGIC_COOKIE_KEY,
    MAGIC_COOKIE_VALUE,
};
pub use validation::{is_valid, validate, validate_result};
