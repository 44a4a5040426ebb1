use anchor_lang::{prelude::*, solana_program::sysvar::slot_hashes};
use arrayref::array_ref;

use crate::{constants::MAX_DRAW_ATTEMPTS, error::LotteryError};

// SlotHashes layout: u64 entry count, then (u64 slot, [u8; 32] hash) newest first.
const NEWEST_HASH_OFFSET: usize = 16;

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// A stream of random 64-bit words used to pick winners.
pub trait EntropySource {
    fn next_u64(&mut self) -> Result<u64>;

    /// Maps the stream onto `0..range` without modulo bias.
    ///
    /// Power-of-two ranges are masked. Other ranges reject words from the
    /// biased tail and draw again, up to `MAX_DRAW_ATTEMPTS` times.
    fn draw_index(&mut self, range: u64) -> Result<u64> {
        require!(range > 0, LotteryError::NoEntrants);

        if range.is_power_of_two() {
            return Ok(self.next_u64()? & (range - 1));
        }

        let threshold = u64::MAX - (u64::MAX % range);
        for _ in 0..MAX_DRAW_ATTEMPTS {
            let value = self.next_u64()?;
            if value < threshold {
                return Ok(value % range);
            }
        }

        // The tail is at most range/2^64 of the space, so landing here is vanishingly rare.
        Ok(self.next_u64()? % range)
    }
}

/// On-chain entropy seeded from the newest SlotHashes entry, the clock and a caller salt.
pub struct SlotHashEntropy {
    state: u64,
}

impl SlotHashEntropy {
    pub fn from_sysvar(sysvar: &AccountInfo, unix_timestamp: i64, salt: u64) -> Result<Self> {
        // Anchor rejects Sysvar<SlotHashes> because of its size, so the account is checked by hand.
        require_keys_eq!(
            *sysvar.key,
            slot_hashes::ID,
            LotteryError::InvalidSlotHashesAccount
        );

        let data = sysvar.try_borrow_data()?;
        require!(
            data.len() >= NEWEST_HASH_OFFSET + 32,
            LotteryError::InvalidSlotHashesAccount
        );

        let hash_low = u64::from_le_bytes(*array_ref![data, NEWEST_HASH_OFFSET, 8]);
        let hash_high = u64::from_le_bytes(*array_ref![data, NEWEST_HASH_OFFSET + 8, 8]);

        let mut state = mix(hash_low, unix_timestamp as u64);
        state = mix(state, hash_high);
        state = mix(state, salt);

        Ok(Self { state })
    }
}

impl EntropySource for SlotHashEntropy {
    fn next_u64(&mut self) -> Result<u64> {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        Ok(mix(self.state, 0))
    }
}

/// splitmix64 finalizer over `a + b`.
pub fn mix(a: u64, b: u64) -> u64 {
    let mut z = a.wrapping_add(b);

    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}
