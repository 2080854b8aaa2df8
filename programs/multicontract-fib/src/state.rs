use anchor_lang::prelude::*;

use crate::{FibError, ID};

pub const LEFT_SEED: &[u8] = b"fib_left";
pub const RIGHT_SEED: &[u8] = b"fib_right";

/// Bookkeeping kept by each half of the calculator.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HalfState {
    pub last_input: u64,
    pub last_output: u64,
    /// Calculations this half served as the entry point for.
    pub calculations: u64,
    /// Sub-results this half computed on behalf of its peer.
    pub delegations: u64,
}

impl HalfState {
    pub fn record_calculation(&mut self, n: u64, value: u64) -> Result<()> {
        self.calculations = self
            .calculations
            .checked_add(1)
            .ok_or(error!(FibError::CounterOverflow))?;
        self.last_input = n;
        self.last_output = value;
        Ok(())
    }

    pub fn record_delegation(&mut self) -> Result<()> {
        self.delegations = self
            .delegations
            .checked_add(1)
            .ok_or(error!(FibError::CounterOverflow))?;
        Ok(())
    }
}

#[account]
#[derive(InitSpace)]
pub struct FibonacciLeft {
    pub half: HalfState,
    pub bump: u8,
}

#[account]
#[derive(InitSpace)]
pub struct FibonacciRight {
    pub half: HalfState,
    pub bump: u8,
}

pub fn left_address() -> Pubkey {
    Pubkey::find_program_address(&[LEFT_SEED], &ID).0
}

pub fn right_address() -> Pubkey {
    Pubkey::find_program_address(&[RIGHT_SEED], &ID).0
}
