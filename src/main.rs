use std::process::ExitCode;

use terraform_provider_leaseweb::{
    init_logging, serve, LeasewebProvider, MAGIC_COOKIE_KEY, MAGIC_COOKIE_VALUE,
};

#[tokio::main]
async fn main() -> ExitCode {
    if std::env::var(MAGIC_COOKIE_KEY).ok().as_deref() != Some(MAGIC_COOKIE_VALUE) {
        eprintln!(
            "This binary is a plugin. These are not meant to be executed directly.\n\
             Please execute the program that consumes these plugins, which will\n\
             load any plugins automatically"
        );
        return ExitCode::FAILURE;
    }

    init_logging();

    let provider = LeasewebProvider::new(env!("CARGO_PKG_VERSION"));
    match serve(provider).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Provider server failed");
            ExitCode::FAILURE
        },
    }
}
