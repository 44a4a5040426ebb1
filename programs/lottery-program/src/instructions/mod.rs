pub mod enter;
pub mod initialize_lottery;
pub mod pick_winner;
pub mod read_state;
pub mod withdraw_commission;

pub use enter::*;
pub use initialize_lottery::*;
pub use pick_winner::*;
pub use read_state::*;
pub use withdraw_commission::*;
