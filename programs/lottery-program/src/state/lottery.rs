use anchor_lang::prelude::*;

use crate::{constants::MAX_ENTRANTS_PER_PAGE, entropy::EntropySource, error::LotteryError};

// Space calculation:
// 8 (discriminator) +
// 32 (operator) +
// 8 (commission_lamports) +
// 8 (prize_pool) +
// 8 (commission_balance) +
// 8 (total_deposited) +
// 8 (total_paid_out) +
// 8 (round) +
// 33 (last_winner: Option<Pubkey>) +
// 1 (bump) +
// 4 (length of entrants) =
// 126 bytes, plus 32 per entrant slot
pub const LOTTERY_BASE_ACCOUNT_SIZE: usize = 8 + 32 + 8 + 8 + 8 + 8 + 8 + 8 + 33 + 1 + 4;

/// Per-lottery escrow state. The account itself holds the escrowed lamports, so its
/// balance is always at least rent + `prize_pool` + `commission_balance`.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Lottery {
    pub operator: Pubkey,
    /// Fixed per-entry commission, set at creation.
    pub commission_lamports: u64,
    pub prize_pool: u64,
    pub commission_balance: u64,
    pub total_deposited: u64,
    pub total_paid_out: u64,
    /// Completed draws.
    pub round: u64,
    pub last_winner: Option<Pubkey>,
    pub bump: u8,
    pub entrants: Vec<Pubkey>,
}

/// Outcome of a completed draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOutcome {
    pub winner: Pubkey,
    pub prize: u64,
    pub entrant_count: u64,
}

impl Lottery {
    pub fn new(operator: Pubkey, commission_lamports: u64, bump: u8) -> Self {
        Self {
            operator,
            commission_lamports,
            prize_pool: 0,
            commission_balance: 0,
            total_deposited: 0,
            total_paid_out: 0,
            round: 0,
            last_winner: None,
            bump,
            entrants: Vec::new(),
        }
    }

    /// Account size needed to hold `entrant_capacity` entrant slots.
    pub fn space(entrant_capacity: usize) -> usize {
        LOTTERY_BASE_ACCOUNT_SIZE + entrant_capacity * 32
    }

    pub fn ensure_operator(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.operator, LotteryError::Unauthorized);
        Ok(())
    }

    /// Splits `deposit` into commission and prize and appends `entrant`.
    /// Returns the new entrant count. Nothing is written unless every check passes.
    pub fn record_entry(&mut self, entrant: Pubkey, deposit: u64) -> Result<u64> {
        require!(
            deposit > self.commission_lamports,
            LotteryError::InsufficientDeposit
        );

        let prize_share = deposit - self.commission_lamports;
        let prize_pool = self
            .prize_pool
            .checked_add(prize_share)
            .ok_or(LotteryError::Overflow)?;
        let commission_balance = self
            .commission_balance
            .checked_add(self.commission_lamports)
            .ok_or(LotteryError::Overflow)?;
        let total_deposited = self
            .total_deposited
            .checked_add(deposit)
            .ok_or(LotteryError::Overflow)?;

        self.prize_pool = prize_pool;
        self.commission_balance = commission_balance;
        self.total_deposited = total_deposited;
        self.entrants.push(entrant);

        Ok(self.entrants.len() as u64)
    }

    /// Picks one entrant slot uniformly at random. Does not modify the lottery.
    pub fn draw_winner<E: EntropySource>(&self, entropy: &mut E) -> Result<Pubkey> {
        require!(!self.entrants.is_empty(), LotteryError::NoEntrants);

        let index = entropy.draw_index(self.entrants.len() as u64)?;
        let winner = self
            .entrants
            .get(index as usize)
            .copied()
            .ok_or(LotteryError::NoEntrants)?;

        Ok(winner)
    }

    /// Pays the whole prize pool to `winner` on the books and opens the next round.
    /// The caller moves the lamports.
    pub fn close_round(&mut self, winner: Pubkey) -> Result<DrawOutcome> {
        require!(!self.entrants.is_empty(), LotteryError::NoEntrants);

        let prize = self.prize_pool;
        let total_paid_out = self
            .total_paid_out
            .checked_add(prize)
            .ok_or(LotteryError::Overflow)?;
        let round = self.round.checked_add(1).ok_or(LotteryError::Overflow)?;
        let entrant_count = self.entrants.len() as u64;

        self.total_paid_out = total_paid_out;
        self.round = round;
        self.prize_pool = 0;
        self.last_winner = Some(winner);
        self.entrants.clear();

        Ok(DrawOutcome {
            winner,
            prize,
            entrant_count,
        })
    }

    /// Zeroes the commission balance and returns the amount that must leave the account.
    pub fn drain_commission(&mut self) -> Result<u64> {
        let amount = self.commission_balance;
        self.total_paid_out = self
            .total_paid_out
            .checked_add(amount)
            .ok_or(LotteryError::Overflow)?;
        self.commission_balance = 0;

        Ok(amount)
    }

    /// Up to `limit` entrants starting at slot `offset`, capped at `MAX_ENTRANTS_PER_PAGE`.
    /// An offset past the end yields an empty page.
    pub fn entrants_page(&self, offset: u32, limit: u16) -> Vec<Pubkey> {
        self.entrants
            .iter()
            .skip(offset as usize)
            .take(limit.min(MAX_ENTRANTS_PER_PAGE) as usize)
            .copied()
            .collect()
    }

    /// Lamports owed to entrants and the operator.
    pub fn escrowed(&self) -> Result<u64> {
        let held = self
            .prize_pool
            .checked_add(self.commission_balance)
            .ok_or(LotteryError::Overflow)?;
        Ok(held)
    }

    /// `prize_pool + commission_balance == total_deposited - total_paid_out`
    pub fn is_balanced(&self) -> bool {
        match (
            self.escrowed(),
            self.total_deposited.checked_sub(self.total_paid_out),
        ) {
            (Ok(held), Some(net)) => held == net,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use crate::constants::DEFAULT_COMMISSION_LAMPORTS as COMMISSION;

    struct FixedEntropy(VecDeque<u64>);

    impl FixedEntropy {
        fn new(words: &[u64]) -> Self {
            Self(words.iter().copied().collect())
        }
    }

    impl EntropySource for FixedEntropy {
        fn next_u64(&mut self) -> Result<u64> {
            Ok(self.0.pop_front().unwrap_or(0))
        }
    }

    fn lottery() -> (Lottery, Pubkey) {
        let operator = Pubkey::new_unique();
        (Lottery::new(operator, COMMISSION, 254), operator)
    }

    fn assert_error(result: Result<impl std::fmt::Debug>, expected: LotteryError) {
        let expected: anchor_lang::error::Error = expected.into();
        assert_eq!(result.unwrap_err(), expected);
    }

    #[test]
    fn account_size_matches_serialized_layout() {
        let (mut lottery, operator) = lottery();
        lottery.last_winner = Some(operator);
        lottery.entrants = vec![Pubkey::new_unique(); 3];

        let mut data = Vec::new();
        lottery.try_serialize(&mut data).unwrap();

        assert_eq!(data.len(), Lottery::space(3));
        assert_eq!(Lottery::space(0), LOTTERY_BASE_ACCOUNT_SIZE);
    }

    #[test]
    fn entry_splits_deposit_between_prize_and_commission() {
        let (mut lottery, _) = lottery();
        let alice = Pubkey::new_unique();

        let count = lottery.record_entry(alice, 30_000_000).unwrap();

        assert_eq!(count, 1);
        assert_eq!(lottery.prize_pool, 20_000_000);
        assert_eq!(lottery.commission_balance, 10_000_000);
        assert_eq!(lottery.entrants, vec![alice]);
        assert!(lottery.is_balanced());
    }

    #[test]
    fn entrants_keep_insertion_order() {
        let (mut lottery, _) = lottery();
        let (a, b, c) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());

        lottery.record_entry(a, 30_000_000).unwrap();
        lottery.record_entry(b, 40_000_000).unwrap();
        let count = lottery.record_entry(c, 50_000_000).unwrap();

        assert_eq!(count, 3);
        assert_eq!(lottery.entrants, vec![a, b, c]);
        assert_eq!(lottery.prize_pool, 90_000_000);
        assert_eq!(lottery.commission_balance, 30_000_000);
    }

    #[test]
    fn entrants_are_read_in_bounded_pages() {
        let (mut lottery, _) = lottery();
        let entrants: Vec<Pubkey> = (0..45).map(|_| Pubkey::new_unique()).collect();
        for entrant in &entrants {
            lottery.record_entry(*entrant, 20_000_000).unwrap();
        }

        let first = lottery.entrants_page(0, u16::MAX);
        assert_eq!(first.len(), MAX_ENTRANTS_PER_PAGE as usize);
        assert_eq!(first[..], entrants[..30]);

        // Borsh-encoded page must fit the runtime's return data.
        let mut encoded = Vec::<u8>::new();
        first.serialize(&mut encoded).unwrap();
        assert!(encoded.len() <= 1024);

        assert_eq!(lottery.entrants_page(30, 30), entrants[30..].to_vec());
        assert_eq!(lottery.entrants_page(40, 2), entrants[40..42].to_vec());
        assert!(lottery.entrants_page(45, 10).is_empty());
        assert!(lottery.entrants_page(u32::MAX, 10).is_empty());
    }

    #[test]
    fn same_entrant_may_hold_several_slots() {
        let (mut lottery, _) = lottery();
        let alice = Pubkey::new_unique();

        lottery.record_entry(alice, 30_000_000).unwrap();
        lottery.record_entry(alice, 30_000_000).unwrap();

        assert_eq!(lottery.entrants, vec![alice, alice]);
    }

    #[test]
    fn deposit_at_or_below_commission_is_rejected() {
        let (mut lottery, _) = lottery();
        lottery.record_entry(Pubkey::new_unique(), 30_000_000).unwrap();
        let before = lottery.clone();

        assert_error(
            lottery.record_entry(Pubkey::new_unique(), COMMISSION),
            LotteryError::InsufficientDeposit,
        );
        assert_error(
            lottery.record_entry(Pubkey::new_unique(), 1),
            LotteryError::InsufficientDeposit,
        );
        assert_eq!(lottery, before);
    }

    #[test]
    fn zero_commission_accepts_any_positive_deposit() {
        let mut lottery = Lottery::new(Pubkey::new_unique(), 0, 255);

        assert_error(
            lottery.record_entry(Pubkey::new_unique(), 0),
            LotteryError::InsufficientDeposit,
        );
        lottery.record_entry(Pubkey::new_unique(), 1).unwrap();

        assert_eq!(lottery.prize_pool, 1);
        assert_eq!(lottery.commission_balance, 0);
    }

    #[test]
    fn overflowing_entry_leaves_state_untouched() {
        let (mut lottery, _) = lottery();
        lottery.record_entry(Pubkey::new_unique(), u64::MAX).unwrap();
        let before = lottery.clone();

        assert_error(
            lottery.record_entry(Pubkey::new_unique(), 30_000_000),
            LotteryError::Overflow,
        );
        assert_eq!(lottery, before);
    }

    #[test]
    fn single_entrant_wins_whole_pool_and_round_resets() {
        let (mut lottery, _) = lottery();
        let alice = Pubkey::new_unique();
        lottery.record_entry(alice, 30_000_000).unwrap();

        let winner = lottery
            .draw_winner(&mut FixedEntropy::new(&[0xdead_beef]))
            .unwrap();
        let outcome = lottery.close_round(winner).unwrap();

        assert_eq!(
            outcome,
            DrawOutcome {
                winner: alice,
                prize: 20_000_000,
                entrant_count: 1,
            }
        );
        assert!(lottery.entrants.is_empty());
        assert_eq!(lottery.prize_pool, 0);
        assert_eq!(lottery.commission_balance, 10_000_000);
        assert_eq!(lottery.round, 1);
        assert_eq!(lottery.last_winner, Some(alice));
        assert!(lottery.is_balanced());
    }

    #[test]
    fn draw_selects_slot_from_entropy() {
        let (mut lottery, _) = lottery();
        let entrants: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
        for entrant in &entrants {
            lottery.record_entry(*entrant, 20_000_000).unwrap();
        }

        // Four slots is a power of two, so the index is the low two bits.
        let winner = lottery.draw_winner(&mut FixedEntropy::new(&[6])).unwrap();
        assert_eq!(winner, entrants[2]);

        let outcome = lottery.close_round(winner).unwrap();
        assert_eq!(outcome.prize, 40_000_000);
        assert_eq!(outcome.entrant_count, 4);
        assert!(lottery.entrants.is_empty());
    }

    #[test]
    fn draw_without_entrants_fails() {
        let (mut lottery, _) = lottery();
        let before = lottery.clone();

        assert_error(
            lottery.draw_winner(&mut FixedEntropy::new(&[1])),
            LotteryError::NoEntrants,
        );
        assert_error(
            lottery.close_round(Pubkey::new_unique()),
            LotteryError::NoEntrants,
        );
        assert_eq!(lottery, before);
    }

    #[test]
    fn commission_drains_once() {
        let (mut lottery, _) = lottery();
        lottery.record_entry(Pubkey::new_unique(), 30_000_000).unwrap();

        assert_eq!(lottery.drain_commission().unwrap(), 10_000_000);
        assert_eq!(lottery.commission_balance, 0);
        assert_eq!(lottery.prize_pool, 20_000_000);

        assert_eq!(lottery.drain_commission().unwrap(), 0);
        assert_eq!(lottery.commission_balance, 0);
        assert!(lottery.is_balanced());
    }

    #[test]
    fn only_operator_passes_access_check() {
        let (mut lottery, operator) = lottery();
        lottery.record_entry(Pubkey::new_unique(), 30_000_000).unwrap();
        let before = lottery.clone();

        lottery.ensure_operator(&operator).unwrap();
        assert_error(
            lottery.ensure_operator(&Pubkey::new_unique()),
            LotteryError::Unauthorized,
        );
        assert_eq!(lottery, before);
    }

    #[test]
    fn books_stay_balanced_across_rounds() {
        let (mut lottery, _) = lottery();
        let mut entropy = FixedEntropy::new(&[3, 9, 27, 81, 243]);

        for round in 0..3u64 {
            for i in 0..=round {
                lottery
                    .record_entry(Pubkey::new_unique(), 15_000_000 + i * 1_000)
                    .unwrap();
                assert!(lottery.is_balanced());
            }
            let winner = lottery.draw_winner(&mut entropy).unwrap();
            lottery.close_round(winner).unwrap();
            assert!(lottery.is_balanced());
            if round == 1 {
                lottery.drain_commission().unwrap();
                assert!(lottery.is_balanced());
            }
        }

        assert_eq!(lottery.round, 3);
        assert_eq!(
            lottery.total_deposited - lottery.total_paid_out,
            lottery.commission_balance
        );
    }
}
