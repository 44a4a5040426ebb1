use anchor_lang::prelude::*;

use crate::{constants::LOTTERY_SEED, state::Lottery};

// Read-only views returned through return data, which the runtime caps at 1024 bytes.

pub fn get_entrants(ctx: Context<ReadLottery>, offset: u32, limit: u16) -> Result<Vec<Pubkey>> {
    Ok(ctx.accounts.lottery.entrants_page(offset, limit))
}

pub fn get_prize_pool(ctx: Context<ReadLottery>) -> Result<u64> {
    Ok(ctx.accounts.lottery.prize_pool)
}

pub fn get_commission_balance(ctx: Context<ReadLottery>) -> Result<u64> {
    Ok(ctx.accounts.lottery.commission_balance)
}

pub fn get_operator(ctx: Context<ReadLottery>) -> Result<Pubkey> {
    Ok(ctx.accounts.lottery.operator)
}

#[derive(Accounts)]
pub struct ReadLottery<'info> {
    #[account(
        seeds = [LOTTERY_SEED, lottery.operator.as_ref()],
        bump = lottery.bump,
    )]
    pub lottery: Account<'info, Lottery>,
}
