use anchor_lang::prelude::*;

use crate::{constants::LOTTERY_SEED, error::LotteryError, escrow, state::Lottery};

/// Event emitted when an entry is accepted
#[event]
pub struct EntryAccepted {
    /// The pubkey of the lottery
    pub lottery: Pubkey,
    /// The entrant's address
    pub entrant: Pubkey,
    /// Total lamports deposited with this entry
    pub deposit: u64,
    /// Lamports added to the prize pool
    pub prize_share: u64,
    /// Lamports added to the commission balance
    pub commission: u64,
    /// Extra rent paid to grow the lottery account, zero when capacity was free
    pub rent_top_up: u64,
    /// Number of entrant slots after this entry
    pub entrant_count: u64,
}

/// Instruction to join the current round of a lottery
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `deposit` - Lamports paid into the lottery, must exceed the commission
///
/// # Security Considerations
/// 1. Deposit must be strictly greater than the lottery's commission
/// 2. Fee split uses checked arithmetic and is computed before anything is written
/// 3. The lottery account balance is verified after the transfer
/// 4. The lottery must end up holding rent for its size plus the prize pool and commission
///
/// # Implementation Notes
/// - The account is grown by one entrant slot when full. The entrant pays the extra
///   rent together with the deposit, so escrowed lamports never fund growth
/// - A failed entry rolls back the deposit with the rest of the transaction
/// - Returns the new entrant count
pub fn enter(ctx: Context<Enter>, deposit: u64) -> Result<u64> {
    let entrant = ctx.accounts.entrant.key();
    let commission = ctx.accounts.lottery.commission_lamports;
    let rent = Rent::get()?;

    let lottery_info = ctx.accounts.lottery.to_account_info();
    let current_len = lottery_info.data_len();
    let new_len = Lottery::space(ctx.accounts.lottery.entrants.len() + 1).max(current_len);
    let rent_top_up = escrow::rent_top_up(
        &rent,
        lottery_info.lamports(),
        new_len,
        ctx.accounts.lottery.escrowed()?,
    )?;

    let entrant_count = ctx.accounts.lottery.record_entry(entrant, deposit)?;

    let payment = deposit
        .checked_add(rent_top_up)
        .ok_or(LotteryError::Overflow)?;
    let pre_transfer_balance = lottery_info.lamports();

    anchor_lang::solana_program::program::invoke(
        &anchor_lang::solana_program::system_instruction::transfer(
            &entrant,
            lottery_info.key,
            payment,
        ),
        &[
            ctx.accounts.entrant.to_account_info(),
            lottery_info.clone(),
            ctx.accounts.system_program.to_account_info(),
        ],
    )?;

    let post_transfer_balance = lottery_info.lamports();
    require!(
        post_transfer_balance
            == pre_transfer_balance
                .checked_add(payment)
                .ok_or(LotteryError::Overflow)?,
        LotteryError::TransferFailed
    );

    if new_len > current_len {
        lottery_info.realloc(new_len, false)?;
    }
    escrow::ensure_rent_backed(&lottery_info, &rent, ctx.accounts.lottery.escrowed()?)?;

    msg!(
        "Entry {} accepted from {} ({} lamports, {} rent)",
        entrant_count,
        entrant,
        deposit,
        rent_top_up
    );

    emit!(EntryAccepted {
        lottery: ctx.accounts.lottery.key(),
        entrant,
        deposit,
        prize_share: deposit - commission,
        commission,
        rent_top_up,
        entrant_count,
    });

    Ok(entrant_count)
}

/// Accounts required for the enter instruction
#[derive(Accounts)]
pub struct Enter<'info> {
    /// The lottery being entered. Grows to fit one more entrant when its capacity is used up
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.operator.as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,

    /// The account entering and paying the deposit
    #[account(mut)]
    pub entrant: Signer<'info>,

    /// Required for the deposit transfer and account growth
    pub system_program: Program<'info, System>,
}
