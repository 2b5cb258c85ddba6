use anchor_lang::prelude::*;
use anchor_lang::solana_program::program::set_return_data;

use crate::{
    engine::max_withdraw as max_withdraw_assets,
    ledger::{preview_deposit as shares_for_deposit, preview_withdraw as assets_for_shares, shares_for_withdraw},
    state::*,
};

// View functions read the cached total from the last harvest; they never
// query the yield position.

#[derive(Accounts)]
pub struct VaultView<'info> {
    pub vault_state: Account<'info, VaultState>,
}

#[derive(Accounts)]
pub struct HolderView<'info> {
    pub vault_state: Account<'info, VaultState>,

    #[account(constraint = holder_balance.vault == vault_state.key())]
    pub holder_balance: Account<'info, ShareBalance>,
}

pub fn total_assets(ctx: Context<VaultView>) -> Result<()> {
    set_return_data(&ctx.accounts.vault_state.last_total_assets.to_le_bytes());
    Ok(())
}

pub fn donation_percent(ctx: Context<VaultView>) -> Result<()> {
    set_return_data(&(ctx.accounts.vault_state.donation_percent_bps as u64).to_le_bytes());
    Ok(())
}

pub fn donation_recipient(ctx: Context<VaultView>) -> Result<()> {
    set_return_data(ctx.accounts.vault_state.donation_recipient.as_ref());
    Ok(())
}

pub fn total_donated(ctx: Context<VaultView>) -> Result<()> {
    set_return_data(&ctx.accounts.vault_state.total_donated.to_le_bytes());
    Ok(())
}

/// Shares minted for `assets` (floor rounding)
pub fn preview_deposit(ctx: Context<VaultView>, assets: u64) -> Result<()> {
    let vault = &ctx.accounts.vault_state;
    let shares = shares_for_deposit(assets, vault.last_total_assets, vault.total_shares)?;
    set_return_data(&shares.to_le_bytes());
    Ok(())
}

/// Shares burned to withdraw exact `assets` (ceiling rounding)
pub fn preview_withdraw(ctx: Context<VaultView>, assets: u64) -> Result<()> {
    let vault = &ctx.accounts.vault_state;
    let shares = shares_for_withdraw(assets, vault.last_total_assets, vault.total_shares)?;
    set_return_data(&shares.to_le_bytes());
    Ok(())
}

/// Assets paid for redeeming `shares` (floor rounding)
pub fn preview_redeem(ctx: Context<VaultView>, shares: u64) -> Result<()> {
    let vault = &ctx.accounts.vault_state;
    let assets = assets_for_shares(shares, vault.last_total_assets, vault.total_shares)?;
    set_return_data(&assets.to_le_bytes());
    Ok(())
}

pub fn balance_of(ctx: Context<HolderView>) -> Result<()> {
    set_return_data(&ctx.accounts.holder_balance.shares.to_le_bytes());
    Ok(())
}

pub fn max_withdraw(ctx: Context<HolderView>) -> Result<()> {
    let max = max_withdraw_assets(&ctx.accounts.vault_state, &ctx.accounts.holder_balance)?;
    set_return_data(&max.to_le_bytes());
    Ok(())
}
