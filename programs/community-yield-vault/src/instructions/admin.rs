use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::{DonationPercentUpdated, DonationRecipientUpdated, OwnershipTransferred},
    state::*,
};

/// Owner-only configuration changes
///
/// The signer is compared against `vault_state.owner` inside each handler,
/// so a non-owner signer fails with `Unauthorized` rather than a constraint error.
#[derive(Accounts)]
pub struct Admin<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Account<'info, VaultState>,
}

pub fn set_donation_percent(ctx: Context<Admin>, new_percent_bps: u16) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let vault_state = &mut ctx.accounts.vault_state;

    let old_percent_bps = vault_state.set_donation_percent(&caller, new_percent_bps)?;

    emit!(DonationPercentUpdated {
        vault: vault_state.key(),
        old_percent_bps,
        new_percent_bps,
    });
    msg!("Donation percent: {} -> {} bps", old_percent_bps, new_percent_bps);

    Ok(())
}

pub fn set_donation_recipient(ctx: Context<Admin>, new_recipient: Pubkey) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let vault_state = &mut ctx.accounts.vault_state;

    let old_recipient = vault_state.set_donation_recipient(&caller, new_recipient)?;

    emit!(DonationRecipientUpdated {
        vault: vault_state.key(),
        old_recipient,
        new_recipient,
    });
    msg!("Donation recipient: {} -> {}", old_recipient, new_recipient);

    Ok(())
}

pub fn transfer_ownership(ctx: Context<Admin>, new_owner: Pubkey) -> Result<()> {
    let caller = ctx.accounts.owner.key();
    let vault_state = &mut ctx.accounts.vault_state;

    let previous_owner = vault_state.transfer_ownership(&caller, new_owner)?;

    emit!(OwnershipTransferred {
        vault: vault_state.key(),
        previous_owner,
        new_owner,
    });

    Ok(())
}
