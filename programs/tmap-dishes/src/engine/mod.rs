//! Pure market engine
//!
//! Everything here operates on account structs passed in explicitly and
//! never touches the runtime (no Clock, no CPI, no logging), so the whole
//! ledger can be exercised off-chain against in-memory accounts. Instruction
//! handlers bind the accounts, move USDC, and commit the engine's plans.

pub mod curve;
pub mod ledger;
pub mod market;
pub mod referral;
pub mod rewards;
pub mod spend_cap;

#[cfg(test)]
pub(crate) mod testing {
    use anchor_lang::error::Error;

    /// Name of the error code behind an anchor error
    pub fn error_name(err: &Error) -> String {
        match err {
            Error::AnchorError(e) => e.error_name.clone(),
            Error::ProgramError(e) => format!("{:?}", e.program_error),
        }
    }
}
