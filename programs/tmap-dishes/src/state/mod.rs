pub mod config;
pub mod dish;
pub mod holding;
pub mod referral;

pub use config::*;
pub use dish::*;
pub use holding::*;
pub use referral::*;
