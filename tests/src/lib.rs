//! Smoke tests for the workspace programs.
//!
//! Tests marked `#[ignore]` talk to a local validator and expect `ANCHOR_WALLET`
//! to point at a funded keypair; `anchor test` provides both and runs them with
//! `--include-ignored`.

#[cfg(test)]
mod test_hello_world;
#[cfg(test)]
mod test_multicontract_fib;

#[cfg(test)]
mod common {
    use std::path::Path;

    use tracing_subscriber::EnvFilter;
    use workspace_client::{Provider, Workspace};

    pub fn init_logs() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("workspace_client=debug")),
            )
            .with_test_writer()
            .try_init();
    }

    pub fn workspace() -> Workspace {
        Workspace::discover(Path::new(env!("CARGO_MANIFEST_DIR")), "localnet").unwrap()
    }

    /// Configure the client to use the local cluster.
    pub async fn localnet_provider() -> Provider {
        init_logs();
        let provider = Provider::env().expect("ANCHOR_WALLET should point at the payer keypair");
        provider.airdrop_up_to(2).await.unwrap();
        provider
    }
}
