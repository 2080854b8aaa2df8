#![expect(deprecated)] // #[program] attribute reports deprecated stuff

use anchor_lang::prelude::*;

declare_id!("FnTmCmzADAeEcc1gy9RtfTqw8HcP1hbpyGY5E6PZiiKW");

#[program]
pub mod hello_world {
    use super::*;

    /// Takes no accounts and no arguments; succeeds as long as the program is deployed.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        let slot = Clock::get()?.slot;
        msg!("Greetings from: {:?}", ctx.program_id);

        emit!(Greeted {
            program: *ctx.program_id,
            slot,
        });
        Ok(())
    }
}

#[derive(Accounts)]
pub struct Initialize {}

#[event]
pub struct Greeted {
    pub program: Pubkey,
    pub slot: u64,
}
