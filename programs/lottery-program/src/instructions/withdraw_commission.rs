use anchor_lang::prelude::*;

use crate::{constants::LOTTERY_SEED, escrow, state::Lottery};

/// Event emitted when accrued commission is withdrawn
#[event]
pub struct CommissionWithdrawn {
    /// The pubkey of the lottery
    pub lottery: Pubkey,
    /// Where the commission was sent
    pub destination: Pubkey,
    /// Amount withdrawn in lamports
    pub amount: u64,
}

/// Instruction to withdraw the whole commission balance to any account
///
/// # Security Considerations
/// 1. Only the lottery operator may withdraw
/// 2. Only the tracked commission leaves the account; prize pool and rent stay
/// 3. The lottery itself is refused as destination
///
/// # Implementation Notes
/// - Withdrawing a zero balance succeeds and moves nothing
/// - Returns the amount withdrawn
pub fn withdraw_commission(ctx: Context<WithdrawCommission>) -> Result<u64> {
    let lottery = &mut ctx.accounts.lottery;
    lottery.ensure_operator(&ctx.accounts.operator.key())?;

    let amount = lottery.drain_commission()?;

    // Transfer lamports by directly deducting from the lottery and adding to the destination.
    // This only works because the lottery is a PDA owned by our program.
    let lottery_info = lottery.to_account_info();
    let destination = ctx.accounts.destination.to_account_info();
    escrow::pay_out(&lottery_info, &destination, amount)?;
    escrow::ensure_rent_backed(&lottery_info, &Rent::get()?, lottery.escrowed()?)?;

    msg!("Withdrew {} lamports of commission to {}", amount, destination.key);

    emit!(CommissionWithdrawn {
        lottery: lottery.key(),
        destination: destination.key(),
        amount,
    });

    Ok(amount)
}

#[derive(Accounts)]
pub struct WithdrawCommission<'info> {
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.operator.as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,

    pub operator: Signer<'info>,

    /// CHECK: Any writable account other than the lottery may receive the commission.
    #[account(mut)]
    pub destination: UncheckedAccount<'info>,
}
