use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod entropy;
pub mod error;
pub mod escrow;
pub mod instructions;
pub mod state;

declare_id!("5SxBR9vYzJr9eXM4m4yAuFPRDr7Nmv6AqQmiiayJPU4T");

#[program]
pub mod lottery_program {
    use super::*;

    pub fn initialize_lottery(
        ctx: Context<InitializeLottery>,
        commission_lamports: u64,
    ) -> Result<()> {
        instructions::initialize_lottery::initialize_lottery(ctx, commission_lamports)
    }

    pub fn enter(ctx: Context<Enter>, deposit: u64) -> Result<u64> {
        instructions::enter::enter(ctx, deposit)
    }

    pub fn pick_winner<'info>(ctx: Context<'_, '_, 'info, 'info, PickWinner<'info>>) -> Result<Pubkey> {
        instructions::pick_winner::pick_winner(ctx)
    }

    pub fn withdraw_commission(ctx: Context<WithdrawCommission>) -> Result<u64> {
        instructions::withdraw_commission::withdraw_commission(ctx)
    }

    /// Returns entrants in slot order, one page at a time: at most
    /// `MAX_ENTRANTS_PER_PAGE` (30) keys starting at `offset`, so the result always fits
    /// the 1024-byte return data limit. An offset past the end returns an empty list.
    pub fn get_entrants(ctx: Context<ReadLottery>, offset: u32, limit: u16) -> Result<Vec<Pubkey>> {
        instructions::read_state::get_entrants(ctx, offset, limit)
    }

    pub fn get_prize_pool(ctx: Context<ReadLottery>) -> Result<u64> {
        instructions::read_state::get_prize_pool(ctx)
    }

    pub fn get_commission_balance(ctx: Context<ReadLottery>) -> Result<u64> {
        instructions::read_state::get_commission_balance(ctx)
    }

    pub fn get_operator(ctx: Context<ReadLottery>) -> Result<Pubkey> {
        instructions::read_state::get_operator(ctx)
    }
}
