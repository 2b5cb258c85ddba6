use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    engine::{VaultEngine, WithdrawOutcome},
    errors::*,
    events::Withdraw as WithdrawEvent,
    instructions::harvest::{emit_harvest, emit_share_transfer},
    state::*,
    yield_source::TokenPositionSource,
};

/// Withdraw or redeem assets from the vault on behalf of `owner`
///
/// Security checklist:
/// ✅ 1. SIGNER VALIDATION: Caller must be signer
/// ✅ 2. ACCOUNT OWNERSHIP: Share balance PDA derived from vault and owner
/// ✅ 3. AUTHORIZATION: Caller must be owner or approved delegate (checked by engine)
/// ✅ 6. MATH SAFETY: Ceiling rounding on burned shares, floor on paid assets
/// ✅ 7. TOKEN ACCOUNT VALIDATION: Receiver and donation accounts hold the vault asset
/// ✅ 10. EVENTS: Emits Withdraw, SharesTransferred and harvest events
#[derive(Accounts)]
#[instruction(amount: u64, owner: Pubkey)]
pub struct Withdraw<'info> {
    pub caller: Signer<'info>,

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

    /// Owner's share balance
    #[account(
        mut,
        seeds = [SHARE_BALANCE_SEED, vault_state.key().as_ref(), owner.as_ref()],
        bump = owner_balance.bump,
    )]
    pub owner_balance: Account<'info, ShareBalance>,

    /// Token account receiving the assets; its owner is the receiver
    #[account(
        mut,
        constraint = receiver_asset_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
    )]
    pub receiver_asset_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

enum Exit {
    Assets(u64),
    Shares(u64),
}

/// Withdraw exact assets, burning shares (ceiling rounding)
pub fn withdraw(ctx: Context<Withdraw>, assets: u64, _owner: Pubkey) -> Result<()> {
    process(ctx, Exit::Assets(assets))
}

/// Redeem exact shares for assets (floor rounding)
pub fn redeem(ctx: Context<Withdraw>, shares: u64, _owner: Pubkey) -> Result<()> {
    process(ctx, Exit::Shares(shares))
}

fn process(ctx: Context<Withdraw>, exit: Exit) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    let vault_key = accounts.vault_state.key();
    let caller = accounts.caller.key();
    let receiver = accounts.receiver_asset_account.owner;

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
    .with_payee(&accounts.receiver_asset_account)
    .with_payee(&accounts.donation_recipient_account);

    let mut engine = VaultEngine::new(&mut accounts.vault_state, &mut source);
    let outcome: WithdrawOutcome = match exit {
        Exit::Assets(assets) => {
            engine.withdraw(&caller, &mut accounts.owner_balance, &receiver, assets, now)?
        }
        Exit::Shares(shares) => {
            engine.redeem(&caller, &mut accounts.owner_balance, &receiver, shares, now)?
        }
    };

    emit_harvest(vault_key, accounts.vault_state.donation_recipient, outcome.harvest);
    emit_share_transfer(vault_key, outcome.transfer);
    emit!(WithdrawEvent {
        vault: vault_key,
        caller,
        receiver,
        owner: outcome.owner,
        assets: outcome.assets,
        shares: outcome.shares,
    });

    Ok(())
}
