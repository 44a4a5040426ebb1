use anchor_lang::prelude::*;

use crate::error::LotteryError;

/// Lamports the entrant must add, on top of the deposit, so that the lottery stays
/// rent exempt at `new_len` bytes while still holding `escrowed` for the books.
pub fn rent_top_up(rent: &Rent, lamports: u64, new_len: usize, escrowed: u64) -> Result<u64> {
    let required = rent
        .minimum_balance(new_len)
        .checked_add(escrowed)
        .ok_or(LotteryError::Overflow)?;
    Ok(required.saturating_sub(lamports))
}

/// Fails unless the lottery holds rent for its current size plus everything it owes.
pub fn ensure_rent_backed(lottery: &AccountInfo, rent: &Rent, escrowed: u64) -> Result<()> {
    let required = rent
        .minimum_balance(lottery.data_len())
        .checked_add(escrowed)
        .ok_or(LotteryError::Overflow)?;
    require!(lottery.lamports() >= required, LotteryError::TransferFailed);
    Ok(())
}

/// Finds the drawn winner's wallet among the accounts passed with the draw.
pub fn winner_account<'a, 'info>(
    accounts: &'a [AccountInfo<'info>],
    winner: &Pubkey,
) -> Result<&'a AccountInfo<'info>> {
    let info = accounts
        .iter()
        .find(|info| info.key == winner)
        .ok_or(LotteryError::WinnerAccountMissing)?;
    require!(info.is_writable, LotteryError::WinnerAccountMissing);
    Ok(info)
}

/// Moves `amount` out of the program-owned lottery into `to` without a CPI.
pub fn pay_out<'info>(from: &AccountInfo<'info>, to: &AccountInfo<'info>, amount: u64) -> Result<()> {
    require_keys_neq!(*from.key, *to.key, LotteryError::TransferFailed);
    require!(to.is_writable, LotteryError::TransferFailed);

    let expected = to
        .lamports()
        .checked_add(amount)
        .ok_or(LotteryError::Overflow)?;

    from.sub_lamports(amount)
        .map_err(|_| LotteryError::TransferFailed)?;
    to.add_lamports(amount)
        .map_err(|_| LotteryError::TransferFailed)?;

    require!(to.lamports() == expected, LotteryError::TransferFailed);
    Ok(())
}
