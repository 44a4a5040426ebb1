use anchor_lang::prelude::*;

use crate::{
    constants::{LOTTERY_SEED, MAX_COMMISSION_LAMPORTS},
    error::LotteryError,
    state::Lottery,
};

/// Event emitted when a lottery is created
#[event]
pub struct LotteryInitialized {
    /// The pubkey of the lottery account
    pub lottery: Pubkey,
    /// The operator allowed to draw and withdraw commission
    pub operator: Pubkey,
    /// Commission kept from every entry, in lamports
    pub commission_lamports: u64,
}

/// Instruction to create a lottery owned by the signing operator
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `commission_lamports` - Fixed commission taken from every entry
///
/// # Security Considerations
/// 1. The lottery is a PDA with seeds ["lottery", operator], so each operator runs at most one
/// 2. The operator recorded here can never be changed
/// 3. Commission must not exceed 100 SOL
///
/// # Implementation Notes
/// - The account starts sized for zero entrants and grows on `enter`
/// - All balances and counters start at zero
pub fn initialize_lottery(ctx: Context<InitializeLottery>, commission_lamports: u64) -> Result<()> {
    require!(
        commission_lamports <= MAX_COMMISSION_LAMPORTS,
        LotteryError::CommissionTooHigh
    );

    let operator = ctx.accounts.operator.key();
    ctx.accounts
        .lottery
        .set_inner(Lottery::new(operator, commission_lamports, ctx.bumps.lottery));

    msg!(
        "Lottery opened by {} with commission {} lamports",
        operator,
        commission_lamports
    );

    emit!(LotteryInitialized {
        lottery: ctx.accounts.lottery.key(),
        operator,
        commission_lamports,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeLottery<'info> {
    #[account(
        init,
        payer = operator,
        space = Lottery::space(0),
        seeds = [LOTTERY_SEED, operator.key().as_ref()],
        bump
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(mut)]
    pub operator: Signer<'info>,

    pub system_program: Program<'info, System>,
}
