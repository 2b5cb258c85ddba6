// Community Yield Vault - tokenized vault that donates a share of its yield
// Architecture: share ledger + yield accountant driven by a vault engine over an
// injected yield source (SPL token position account on-chain)

use anchor_lang::prelude::*;

pub mod accountant;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod math;
pub mod state;
pub mod yield_source;

use instructions::*;

declare_id!("Fx3TeFTxx4JtLbEayAjge8C2ppFBwuzUxW2aRMK9oAMR");

#[program]
pub mod community_yield_vault {
    use super::*;

    /// Initialize a new vault for a given asset token
    ///
    /// Security considerations:
    /// - Signer becomes the vault owner
    /// - Rejects donation percent above 10_000 bps and a null recipient
    /// - Creates idle and position token accounts owned by the vault authority PDA
    pub fn initialize(
        ctx: Context<Initialize>,
        donation_recipient: Pubkey,
        donation_percent_bps: u16,
    ) -> Result<()> {
        instructions::initialize::handler(ctx, donation_recipient, donation_percent_bps)
    }

    /// Deposit assets and mint shares to `receiver`
    ///
    /// Harvests first, then prices shares against the post-harvest total
    /// (floor rounding - favors existing holders)
    pub fn deposit(ctx: Context<Deposit>, assets: u64, receiver: Pubkey) -> Result<()> {
        instructions::deposit::handler(ctx, assets, receiver)
    }

    /// Withdraw exact assets from `owner`'s position
    /// Burns shares (ceiling rounding - favors vault)
    pub fn withdraw(ctx: Context<Withdraw>, assets: u64, owner: Pubkey) -> Result<()> {
        instructions::withdraw::withdraw(ctx, assets, owner)
    }

    /// Redeem exact shares from `owner`'s position
    /// Receives assets (floor rounding - favors vault)
    pub fn redeem(ctx: Context<Withdraw>, shares: u64, owner: Pubkey) -> Result<()> {
        instructions::withdraw::redeem(ctx, shares, owner)
    }

    /// Reconcile with the yield position and donate the configured share of new yield
    pub fn harvest(ctx: Context<Harvest>) -> Result<()> {
        instructions::harvest::handler(ctx)
    }

    /// Approve a delegate to withdraw or redeem on the holder's behalf
    pub fn approve(ctx: Context<Approve>, delegate: Pubkey, shares: u64) -> Result<()> {
        instructions::approve::handler(ctx, delegate, shares)
    }

    // ============ Owner-only configuration ============

    pub fn set_donation_percent(ctx: Context<Admin>, new_percent_bps: u16) -> Result<()> {
        instructions::admin::set_donation_percent(ctx, new_percent_bps)
    }

    pub fn set_donation_recipient(ctx: Context<Admin>, new_recipient: Pubkey) -> Result<()> {
        instructions::admin::set_donation_recipient(ctx, new_recipient)
    }

    pub fn transfer_ownership(ctx: Context<Admin>, new_owner: Pubkey) -> Result<()> {
        instructions::admin::transfer_ownership(ctx, new_owner)
    }

    // ============ View Functions (CPI composable) ============

    /// Cached total assets as of the last harvest
    pub fn total_assets(ctx: Context<VaultView>) -> Result<()> {
        instructions::view::total_assets(ctx)
    }

    pub fn donation_percent(ctx: Context<VaultView>) -> Result<()> {
        instructions::view::donation_percent(ctx)
    }

    pub fn donation_recipient(ctx: Context<VaultView>) -> Result<()> {
        instructions::view::donation_recipient(ctx)
    }

    pub fn total_donated(ctx: Context<VaultView>) -> Result<()> {
        instructions::view::total_donated(ctx)
    }

    pub fn preview_deposit(ctx: Context<VaultView>, assets: u64) -> Result<()> {
        instructions::view::preview_deposit(ctx, assets)
    }

    pub fn preview_withdraw(ctx: Context<VaultView>, assets: u64) -> Result<()> {
        instructions::view::preview_withdraw(ctx, assets)
    }

    pub fn preview_redeem(ctx: Context<VaultView>, shares: u64) -> Result<()> {
        instructions::view::preview_redeem(ctx, shares)
    }

    /// Shares held by the holder of the given balance account
    pub fn balance_of(ctx: Context<HolderView>) -> Result<()> {
        instructions::view::balance_of(ctx)
    }

    pub fn max_withdraw(ctx: Context<HolderView>) -> Result<()> {
        instructions::view::max_withdraw(ctx)
    }
}
