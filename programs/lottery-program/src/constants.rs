use anchor_lang::prelude::*;

#[constant]
pub const LOTTERY_SEED: &[u8] = b"lottery";

/// 0.01 SOL, the commission clients use when they have no reason to pick another.
#[constant]
pub const DEFAULT_COMMISSION_LAMPORTS: u64 = 10_000_000;

pub const MAX_COMMISSION_LAMPORTS: u64 = 100_000_000_000; // 100 SOL

// Fresh entropy words drawn before falling back to a plain modulo.
pub const MAX_DRAW_ATTEMPTS: u8 = 3;

// 4-byte length prefix + 30 * 32-byte keys fits the 1024-byte return data limit.
#[constant]
pub const MAX_ENTRANTS_PER_PAGE: u16 = 30;
