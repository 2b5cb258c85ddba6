use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{config::validate_donation_config, constants::*, events::VaultInitialized, state::*};

/// Initialize a new vault for a given asset token
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Vault owner - can change donation settings
    /// Security: Must be signer, stored in state
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Vault state PDA
    /// Security: Initialized with proper space and padding for upgrades
    #[account(
        init,
        payer = owner,
        space = VAULT_STATE_SIZE,
        seeds = [VAULT_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Asset token mint (the underlying token users deposit)
    pub asset_mint: Account<'info, Mint>,

    /// Vault authority PDA - owns the idle and position token accounts
    /// CHECK: PDA used as token authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Idle token account staging deposits before they are supplied
    #[account(
        init,
        payer = owner,
        associated_token::mint = asset_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// Yield position token account credited by the external lending program
    #[account(
        init,
        payer = owner,
        seeds = [POSITION_SEED, asset_mint.key().as_ref()],
        bump,
        token::mint = asset_mint,
        token::authority = vault_authority,
    )]
    pub yield_position: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Initialize>,
    donation_recipient: Pubkey,
    donation_percent_bps: u16,
) -> Result<()> {
    // CHECKS: Validate donation configuration
    validate_donation_config(&donation_recipient, donation_percent_bps)?;

    let vault_state = &mut ctx.accounts.vault_state;

    // EFFECTS: Initialize vault state
    vault_state.owner = ctx.accounts.owner.key();
    vault_state.asset_mint = ctx.accounts.asset_mint.key();
    vault_state.vault_token_account = ctx.accounts.vault_token_account.key();
    vault_state.yield_position = ctx.accounts.yield_position.key();
    vault_state.donation_recipient = donation_recipient;
    vault_state.donation_percent_bps = donation_percent_bps;
    vault_state.total_shares = 0;
    vault_state.last_total_assets = 0;
    vault_state.total_donated = 0;
    vault_state.last_harvest_ts = 0;
    vault_state.bump = ctx.bumps.vault_state;
    vault_state.authority_bump = ctx.bumps.vault_authority;
    vault_state.position_bump = ctx.bumps.yield_position;
    vault_state._reserved = [0; 128];

    emit!(VaultInitialized {
        vault: vault_state.key(),
        owner: vault_state.owner,
        asset_mint: vault_state.asset_mint,
        yield_position: vault_state.yield_position,
        donation_recipient,
        donation_percent_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!(
        "Vault initialized for asset {} donating {} bps to {}",
        vault_state.asset_mint,
        donation_percent_bps,
        donation_recipient
    );

    Ok(())
}
