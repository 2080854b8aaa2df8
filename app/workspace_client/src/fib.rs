//! Typed calls into `multicontract_fib`.

use std::ops::Deref;

use anchor_client::{
    solana_sdk::{pubkey::Pubkey, signature::Signature, signer::Signer},
    Program,
};
use anchor_lang::system_program;
use multicontract_fib::{
    accounts::{Calculate as CalculateAccounts, Initialize as InitializeAccounts},
    instruction::{CalculateFibonacci as CalculateFibonacciIx, Initialize as InitializeIx},
    left_address, right_address, FibonacciLeft, FibonacciRight, Half, HalfState,
};
use tracing::{info, instrument};

use crate::Result;

pub fn initialize_accounts(payer: Pubkey) -> InitializeAccounts {
    InitializeAccounts {
        left: left_address(),
        right: right_address(),
        payer,
        system_program: system_program::ID,
    }
}

pub fn calculate_accounts() -> CalculateAccounts {
    CalculateAccounts {
        left: left_address(),
        right: right_address(),
    }
}

/// Creates both halves. Fails if they already exist.
#[instrument(skip(program), fields(program = %program.id()))]
pub async fn initialize<C: Deref<Target = impl Signer> + Clone>(
    program: &Program<C>,
    payer: Pubkey,
) -> Result<Signature> {
    let sig = program
        .request()
        .accounts(initialize_accounts(payer))
        .args(InitializeIx {})
        .send()
        .await?;
    info!(%sig, "initialized both halves");
    Ok(sig)
}

/// [`initialize`], skipped when the left half is already on chain.
pub async fn ensure_initialized<C: Deref<Target = impl Signer> + Clone>(
    program: &Program<C>,
    payer: Pubkey,
) -> Result<Option<Signature>> {
    if program.account::<FibonacciLeft>(left_address()).await.is_ok() {
        return Ok(None);
    }
    Ok(Some(initialize(program, payer).await?))
}

#[instrument(skip(program), fields(program = %program.id()))]
pub async fn calculate<C: Deref<Target = impl Signer> + Clone>(
    program: &Program<C>,
    n: u64,
    entry: Half,
) -> Result<Signature> {
    let sig = program
        .request()
        .accounts(calculate_accounts())
        .args(CalculateFibonacciIx { n, entry })
        .send()
        .await?;
    info!(%sig, "calculation sent");
    Ok(sig)
}

/// Current bookkeeping of both halves, left first.
pub async fn halves<C: Deref<Target = impl Signer> + Clone>(
    program: &Program<C>,
) -> Result<(HalfState, HalfState)> {
    let left: FibonacciLeft = program.account(left_address()).await?;
    let right: FibonacciRight = program.account(right_address()).await?;
    Ok((left.half, right.half))
}
