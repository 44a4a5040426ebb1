pub use lottery::*;

pub mod lottery;
