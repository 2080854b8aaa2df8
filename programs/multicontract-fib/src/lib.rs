#![expect(deprecated)] // #[program] attribute reports deprecated stuff

use anchor_lang::prelude::*;

pub mod fib;
pub mod state;

pub use state::*;

declare_id!("7PfPmPrui2UqZBQa421xgN85MdUnq5D8Kt43qdDXE8zz");

#[program]
pub mod multicontract_fib {
    use super::*;

    /// Creates both halves of the calculator with zeroed bookkeeping.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        let accounts = ctx.accounts;
        accounts.left.bump = ctx.bumps.left;
        accounts.right.bump = ctx.bumps.right;

        emit!(FibonacciInitialized {
            left: accounts.left.key(),
            right: accounts.right.key(),
        });
        msg!("Greetings from: {:?}", ctx.program_id);
        Ok(())
    }

    /// Computes F(n) starting from the `entry` half and returns it.
    ///
    /// For `n >= 2` the entry half relies on its peer for F(n - 1) and F(n - 2),
    /// which is recorded as a delegation on the peer.
    pub fn calculate_fibonacci(ctx: Context<Calculate>, n: u64, entry: Half) -> Result<u64> {
        calculate_impl(ctx, n, entry)
    }
}

fn calculate_impl(ctx: Context<Calculate>, n: u64, entry: Half) -> Result<u64> {
    let evaluation = fib::evaluate(n).ok_or(error!(FibError::Overflow))?;

    let accounts = ctx.accounts;
    let (entry_half, peer_half) = match entry {
        Half::Left => (&mut accounts.left.half, &mut accounts.right.half),
        Half::Right => (&mut accounts.right.half, &mut accounts.left.half),
    };

    entry_half.record_calculation(n, evaluation.value)?;
    if evaluation.delegated {
        peer_half.record_delegation()?;
    }

    emit!(FibonacciCalculated {
        entry,
        n,
        value: evaluation.value,
    });
    msg!("F({}) = {} via {:?}", n, evaluation.value, entry);

    Ok(evaluation.value)
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Half {
    Left,
    Right,
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = payer,
        space = 8 + FibonacciLeft::INIT_SPACE,
        seeds = [LEFT_SEED],
        bump
    )]
    pub left: Account<'info, FibonacciLeft>,
    #[account(
        init,
        payer = payer,
        space = 8 + FibonacciRight::INIT_SPACE,
        seeds = [RIGHT_SEED],
        bump
    )]
    pub right: Account<'info, FibonacciRight>,
    #[account(mut)]
    pub payer: Signer<'info>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Calculate<'info> {
    #[account(mut, seeds = [LEFT_SEED], bump = left.bump)]
    pub left: Account<'info, FibonacciLeft>,
    #[account(mut, seeds = [RIGHT_SEED], bump = right.bump)]
    pub right: Account<'info, FibonacciRight>,
}

#[event]
pub struct FibonacciInitialized {
    pub left: Pubkey,
    pub right: Pubkey,
}

#[event]
pub struct FibonacciCalculated {
    pub entry: Half,
    pub n: u64,
    pub value: u64,
}

#[error_code]
pub enum FibError {
    #[msg("Fibonacci number does not fit in u64")]
    Overflow,
    #[msg("Half bookkeeping counter overflowed")]
    CounterOverflow,
}
