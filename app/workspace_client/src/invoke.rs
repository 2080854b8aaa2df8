use std::ops::Deref;

use anchor_client::{
    solana_sdk::{
        instruction::{AccountMeta, Instruction},
        signature::Signature,
        signer::Signer,
    },
    Program,
};
use anchor_lang::solana_program::hash::hash;
use tracing::{debug, info};

use crate::Result;

/// Anchor's instruction selector: the first 8 bytes of `sha256("global:<method>")`.
pub fn instruction_discriminator(method: &str) -> [u8; 8] {
    let digest = hash(format!("global:{method}").as_bytes()).to_bytes();
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&digest[..8]);
    discriminator
}

/// Sends a single instruction that carries no arguments, only the method selector.
pub async fn call_no_args<C: Deref<Target = impl Signer> + Clone>(
    program: &Program<C>,
    method: &str,
    accounts: Vec<AccountMeta>,
) -> Result<Signature> {
    let ix = Instruction {
        program_id: program.id(),
        accounts,
        data: instruction_discriminator(method).to_vec(),
    };
    debug!(program = %program.id(), %method, "sending instruction");

    let sig = program.request().instruction(ix).send().await?;
    info!(program = %program.id(), %method, %sig, "Your transaction signature");
    Ok(sig)
}

/// `program.methods.initialize().rpc()` for programs whose `initialize` takes no accounts.
pub async fn initialize<C: Deref<Target = impl Signer> + Clone>(
    program: &Program<C>,
) -> Result<Signature> {
    call_no_args(program, "initialize", Vec::new()).await
}
