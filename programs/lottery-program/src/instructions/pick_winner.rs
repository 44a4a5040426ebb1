use anchor_lang::prelude::*;

use crate::{
    constants::LOTTERY_SEED,
    entropy::SlotHashEntropy,
    escrow,
    state::Lottery,
};

/// Event emitted when a round is drawn and paid out
#[event]
pub struct WinnerPicked {
    /// The pubkey of the lottery
    pub lottery: Pubkey,
    /// The winner's address
    pub winner: Pubkey,
    /// Lamports paid to the winner
    pub prize: u64,
    /// Entrant slots in the round that was drawn
    pub entrant_count: u64,
    /// Completed draws including this one
    pub round: u64,
}

/// Draws a winner, pays out the whole prize pool and opens the next round.
///
/// Execution requirements:
/// 1. The signer must be the lottery operator
/// 2. The lottery must have at least one entrant
/// 3. The winner's wallet must be among the remaining accounts, writable
///
/// Every entrant slot has the same chance. Entropy comes from the newest
/// SlotHashes entry mixed with the clock and the round number, so the client
/// cannot know the winner in advance and passes every distinct entrant wallet.
///
/// After execution:
/// - The winner holds the prize pool
/// - Entrants are cleared and the prize pool is zero
/// - The commission balance is unchanged
///
/// # Errors
/// - `Unauthorized` if the signer is not the operator
/// - `NoEntrants` if nobody has entered
/// - `InvalidSlotHashesAccount` if the provided SlotHashes account is invalid
/// - `WinnerAccountMissing` if the winner's wallet was not passed writable
/// - `TransferFailed` if the payout could not be moved
pub fn pick_winner<'info>(ctx: Context<'_, '_, 'info, 'info, PickWinner<'info>>) -> Result<Pubkey> {
    let lottery = &mut ctx.accounts.lottery;
    lottery.ensure_operator(&ctx.accounts.operator.key())?;

    let clock = Clock::get()?;
    let mut entropy = SlotHashEntropy::from_sysvar(
        &ctx.accounts.recent_slothashes,
        clock.unix_timestamp,
        lottery.round,
    )?;
    let winner = lottery.draw_winner(&mut entropy)?;

    let winner_info = escrow::winner_account(ctx.remaining_accounts, &winner)?;

    let outcome = lottery.close_round(winner)?;

    let lottery_info = lottery.to_account_info();
    escrow::pay_out(&lottery_info, winner_info, outcome.prize)?;
    escrow::ensure_rent_backed(&lottery_info, &Rent::get()?, lottery.escrowed()?)?;

    msg!(
        "Round {} drawn: {} wins {} lamports from {} entries",
        lottery.round,
        winner,
        outcome.prize,
        outcome.entrant_count
    );

    emit!(WinnerPicked {
        lottery: lottery.key(),
        winner,
        prize: outcome.prize,
        entrant_count: outcome.entrant_count,
        round: lottery.round,
    });

    Ok(winner)
}

/// Accounts required for the pick_winner instruction.
/// Remaining accounts: the distinct entrant wallets, writable.
#[derive(Accounts)]
pub struct PickWinner<'info> {
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.operator.as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,

    pub operator: Signer<'info>,

    /// CHECK: Validated against the SlotHashes sysvar address when building the entropy source.
    /// Anchor's Sysvar<SlotHashes> cannot deserialize this account.
    pub recent_slothashes: UncheckedAccount<'info>,
}
