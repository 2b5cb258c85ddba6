use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    engine::VaultEngine,
    errors::*,
    events::Deposit as DepositEvent,
    instructions::harvest::{emit_harvest, emit_share_transfer},
    state::*,
    yield_source::TokenPositionSource,
};

/// Deposit assets into the vault and mint shares to `receiver`
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: User must be signer
/// ✅ 2. ACCOUNT OWNERSHIP: Vault state, position and share balance validated with seeds
/// ✅ 6. MATH SAFETY: Checked operations, u128 intermediates
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Validates mint and owner
/// ✅ 8. BUSINESS LOGIC: Harvest runs before shares are priced
/// ✅ 10. EVENTS: Emits Deposit, SharesTransferred and harvest events
#[derive(Accounts)]
#[instruction(assets: u64, receiver: Pubkey)]
pub struct Deposit<'info> {
    /// User depositing assets
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// User's asset token account (source)
    #[account(
        mut,
        constraint = user_asset_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = user_asset_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_asset_account: Account<'info, TokenAccount>,

    /// Idle staging account owned by the vault authority
    #[account(
        mut,
        address = vault_state.vault_token_account,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        address = vault_state.yield_position,
    )]
    pub yield_position: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = donation_recipient_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = donation_recipient_account.owner == vault_state.donation_recipient @ VaultError::InvalidOwner,
    )]
    pub donation_recipient_account: Account<'info, TokenAccount>,

    /// Receiver's share balance, created on first deposit
    #[account(
        init_if_needed,
        payer = user,
        space = SHARE_BALANCE_SIZE,
        seeds = [SHARE_BALANCE_SEED, vault_state.key().as_ref(), receiver.as_ref()],
        bump
    )]
    pub receiver_balance: Account<'info, ShareBalance>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Deposit>, assets: u64, receiver: Pubkey) -> Result<()> {
    require!(receiver != Pubkey::default(), VaultError::InvalidOwner);

    let now = Clock::get()?.unix_timestamp;
    let balance_bump = ctx.bumps.receiver_balance;
    let accounts = &mut *ctx.accounts;
    let vault_key = accounts.vault_state.key();

    let balance = &mut accounts.receiver_balance;
    if balance.holder == Pubkey::default() {
        balance.vault = vault_key;
        balance.holder = receiver;
        balance.shares = 0;
        balance.delegate = Pubkey::default();
        balance.delegated_shares = 0;
        balance.bump = balance_bump;
    }

    let asset_mint_key = accounts.vault_state.asset_mint;
    let authority_bump = [accounts.vault_state.authority_bump];
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        asset_mint_key.as_ref(),
        &authority_bump,
    ];
    let signer_seeds = &[authority_seeds];

    let mut source = TokenPositionSource::new(
        accounts.token_program.to_account_info(),
        accounts.vault_authority.to_account_info(),
        signer_seeds,
        &mut accounts.yield_position,
    )
    .with_intake(
        &accounts.user,
        &accounts.user_asset_account,
        &accounts.vault_token_account,
    )
    .with_payee(&accounts.donation_recipient_account);

    let caller = accounts.user.key();
    let outcome = VaultEngine::new(&mut accounts.vault_state, &mut source).deposit(
        &caller,
        &mut accounts.receiver_balance,
        assets,
        now,
    )?;

    emit_harvest(vault_key, accounts.vault_state.donation_recipient, outcome.harvest);
    emit_share_transfer(vault_key, outcome.transfer);
    emit!(DepositEvent {
        vault: vault_key,
        caller,
        receiver,
        assets: outcome.assets,
        shares: outcome.shares,
    });

    Ok(())
}
