use anchor_lang::error_code;

#[error_code]
pub enum LotteryError {
    Overflow,
    #[msg("Deposit must be greater than the entry commission")]
    InsufficientDeposit,
    #[msg("Only the lottery operator may perform this action")]
    Unauthorized,
    #[msg("The lottery has no entrants to draw from")]
    NoEntrants,
    #[msg("Lamport transfer failed")]
    TransferFailed,
    #[msg("Commission exceeds maximum allowed")]
    CommissionTooHigh,
    #[msg("The drawn winner's wallet was not passed as a writable account")]
    WinnerAccountMissing,
    #[msg("Invalid SlotHashes account provided")]
    InvalidSlotHashesAccount,
}
