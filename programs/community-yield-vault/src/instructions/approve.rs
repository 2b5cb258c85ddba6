use anchor_lang::prelude::*;

use crate::{constants::*, events::Approval, state::*};

/// Let `delegate` withdraw or redeem up to `shares` of the holder's balance.
/// Approving the null key revokes the current delegate.
#[derive(Accounts)]
pub struct Approve<'info> {
    pub holder: Signer<'info>,

    #[account(
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Account<'info, VaultState>,

    #[account(
        mut,
        seeds = [SHARE_BALANCE_SEED, vault_state.key().as_ref(), holder.key().as_ref()],
        bump = holder_balance.bump,
    )]
    pub holder_balance: Account<'info, ShareBalance>,
}

pub fn handler(ctx: Context<Approve>, delegate: Pubkey, shares: u64) -> Result<()> {
    let holder_balance = &mut ctx.accounts.holder_balance;
    holder_balance.approve(delegate, shares);

    emit!(Approval {
        vault: ctx.accounts.vault_state.key(),
        holder: holder_balance.holder,
        delegate,
        shares: holder_balance.delegated_shares,
    });

    Ok(())
}
