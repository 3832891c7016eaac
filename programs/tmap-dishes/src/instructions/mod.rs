pub mod initialize;
pub mod set_fee_recipient;
pub mod register_referrer;
pub mod create_dish;
pub mod mint_dish;
pub mod sell_dish;
pub mod transfer_dish;
pub mod claim_rewards;
pub mod claim_all_rewards;
pub mod claim_referral;
pub mod quote;

pub use initialize::*;
pub use set_fee_recipient::*;
pub use register_referrer::*;
pub use create_dish::*;
pub use mint_dish::*;
pub use sell_dish::*;
pub use transfer_dish::*;
pub use claim_rewards::*;
pub use claim_all_rewards::*;
pub use claim_referral::*;
pub use quote::*;
