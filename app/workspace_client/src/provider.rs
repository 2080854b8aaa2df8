use std::{path::PathBuf, sync::Arc};

use anchor_client::{Client, Cluster, Program};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
    signer::Signer,
};
use tracing::{debug, instrument};

use crate::{Error, Result};

pub const PROVIDER_URL_VAR: &str = "ANCHOR_PROVIDER_URL";
pub const WALLET_VAR: &str = "ANCHOR_WALLET";
pub const COMMITMENT_VAR: &str = "ANCHOR_COMMITMENT";
pub const DEFAULT_PROVIDER_URL: &str = "http://127.0.0.1:8899";

/// Where to send transactions and who pays for them.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub url: String,
    pub wallet: PathBuf,
    pub commitment: CommitmentConfig,
}

impl ProviderConfig {
    /// Reads `ANCHOR_PROVIDER_URL`, `ANCHOR_WALLET` and `ANCHOR_COMMITMENT`,
    /// the same variables `anchor test` exports for its test scripts.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup(PROVIDER_URL_VAR).unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string());
        let wallet = lookup(WALLET_VAR)
            .map(PathBuf::from)
            .ok_or(Error::MissingEnv(WALLET_VAR))?;
        let commitment = match lookup(COMMITMENT_VAR) {
            Some(level) => parse_commitment(&level)?,
            None => CommitmentConfig::confirmed(),
        };

        Ok(Self {
            url,
            wallet,
            commitment,
        })
    }

    pub fn cluster(&self) -> Result<Cluster> {
        self.url
            .parse::<Cluster>()
            .map_err(|err| Error::InvalidCluster {
                url: self.url.clone(),
                message: err.to_string(),
            })
    }
}

fn parse_commitment(level: &str) -> Result<CommitmentConfig> {
    match level.trim().to_ascii_lowercase().as_str() {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        _ => Err(Error::InvalidCommitment(level.to_string())),
    }
}

/// A connected client plus the payer keypair it signs with.
pub struct Provider {
    client: Client<Arc<Keypair>>,
    rpc: RpcClient,
    payer: Arc<Keypair>,
    config: ProviderConfig,
}

impl Provider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let payer = read_keypair_file(&config.wallet).map_err(|err| Error::Keypair {
            path: config.wallet.clone(),
            message: err.to_string(),
        })?;
        let payer = Arc::new(payer);

        let cluster = config.cluster()?;
        let rpc = RpcClient::new_with_commitment(cluster.url().to_string(), config.commitment);
        let client = Client::new_with_options(cluster, payer.clone(), config.commitment);
        debug!(url = %config.url, payer = %payer.pubkey(), "configured provider");

        Ok(Self {
            client,
            rpc,
            payer,
            config,
        })
    }

    /// [`ProviderConfig::from_env`] followed by [`Self::new`].
    pub fn env() -> Result<Self> {
        Self::new(ProviderConfig::from_env()?)
    }

    pub fn program(&self, program_id: Pubkey) -> Result<Program<Arc<Keypair>>> {
        Ok(self.client.program(program_id)?)
    }

    pub fn payer(&self) -> Pubkey {
        self.payer.pubkey()
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// On success, returns the payer balance in lamports after a possible airdrop.
    /// Only meaningful on clusters with a faucet (localnet, devnet).
    #[instrument(skip(self), fields(payer = %self.payer.pubkey()))]
    pub async fn airdrop_up_to(&self, amount_sol: u32) -> Result<u64> {
        let amount_lamports = u64::from(amount_sol) * LAMPORTS_PER_SOL;
        let balance = self.rpc.get_balance(&self.payer.pubkey()).await?;
        if balance >= amount_lamports {
            debug!(%balance, "balance already above threshold");
            return Ok(balance);
        }

        let sig = self
            .rpc
            .request_airdrop(&self.payer.pubkey(), amount_lamports - balance)
            .await?;
        self.rpc
            .confirm_transaction_with_spinner(
                &sig,
                &self.rpc.get_latest_blockhash().await?,
                self.config.commitment,
            )
            .await?;
        debug!(%sig, "airdropped sol to payer");

        Ok(self.rpc.get_balance(&self.payer.pubkey()).await?)
    }
}
