use anchor_lang::prelude::*;

#[error_code]
pub enum DishError {
    #[msg("Dish already exists")]
    DishAlreadyExists,

    #[msg("Dish does not exist")]
    DishDoesNotExist,

    #[msg("Amount resolves to zero tokens")]
    ZeroAmount,

    #[msg("Lifetime spend on this dish would exceed $10.00")]
    ExceedsMaxSpend,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("USDC transfer failed")]
    TransferFailed,

    #[msg("Signer is not the market owner")]
    Unauthorized,

    // ========== Supporting Errors ==========

    #[msg("Dish metadata exceeds 200 bytes")]
    MetadataTooLong,

    #[msg("Referral account does not belong to the named referrer")]
    InvalidReferrer,

    #[msg("Sender and recipient are the same account")]
    SelfTransfer,

    #[msg("Holding account does not belong to this dish or owner")]
    HoldingMismatch,

    #[msg("Mint is not a 6-decimal USDC mint")]
    InvalidMint,

    #[msg("Arithmetic overflow in calculation")]
    CalculationOverflow,
}
