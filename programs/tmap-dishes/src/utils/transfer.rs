use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, TransferChecked};
use crate::constants::VAULT_AUTH;
use crate::errors::DishError;

/// Pull USDC from a signer's token account into the vault.
/// Any token-program failure surfaces as TransferFailed.
pub fn pull_usdc<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    amount: u64,
    decimals: u8,
) -> Result<()> {
    let accounts = TransferChecked {
        from,
        to: vault,
        mint,
        authority,
    };
    transfer_checked(CpiContext::new(token_program, accounts), amount, decimals)
        .map_err(|_| error!(DishError::TransferFailed))
}

/// Push USDC out of the vault, signed by the vault authority PDA.
/// A zero amount is skipped without a CPI.
pub fn pay_from_vault<'info>(
    token_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    to: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    vault_authority: AccountInfo<'info>,
    vault_authority_bump: u8,
    amount: u64,
    decimals: u8,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let signer_seeds: &[&[&[u8]]] = &[&[VAULT_AUTH, &[vault_authority_bump]]];
    let accounts = TransferChecked {
        from: vault,
        to,
        mint,
        authority: vault_authority,
    };
    let cpi_ctx = CpiContext::new_with_signer(token_program, accounts, signer_seeds);
    transfer_checked(cpi_ctx, amount, decimals).map_err(|_| error!(DishError::TransferFailed))
}
