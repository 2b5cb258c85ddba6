use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    accountant::HarvestRecord,
    constants::*,
    engine::VaultEngine,
    errors::VaultError,
    events::{Harvested, SharesTransferred, YieldDonated},
    ledger::ShareTransfer,
    state::*,
    yield_source::TokenPositionSource,
};

/// Reconcile the vault with its yield position and donate the configured share
/// of new yield. Callable by anyone.
#[derive(Accounts)]
pub struct Harvest<'info> {
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

    /// Donation recipient's token account
    /// Security: Must hold the vault asset and belong to the configured recipient
    #[account(
        mut,
        constraint = donation_recipient_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = donation_recipient_account.owner == vault_state.donation_recipient @ VaultError::InvalidOwner,
    )]
    pub donation_recipient_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Harvest>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    let vault_key = accounts.vault_state.key();

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
    .with_payee(&accounts.donation_recipient_account);

    let record = VaultEngine::new(&mut accounts.vault_state, &mut source).harvest(now)?;

    emit_harvest(vault_key, accounts.vault_state.donation_recipient, record);

    Ok(())
}

pub(crate) fn emit_harvest(vault: Pubkey, recipient: Pubkey, record: Option<HarvestRecord>) {
    let Some(record) = record else {
        return;
    };

    emit!(Harvested {
        vault,
        timestamp: record.timestamp,
        gross_yield: record.gross_yield,
        donated_amount: record.donated_amount,
        net_yield_retained: record.net_yield_retained,
        loss: record.loss,
        total_assets: record.new_baseline,
    });

    if record.donated_amount > 0 {
        emit!(YieldDonated {
            vault,
            amount: record.donated_amount,
            recipient,
        });
    }
}

pub(crate) fn emit_share_transfer(vault: Pubkey, transfer: ShareTransfer) {
    emit!(SharesTransferred {
        vault,
        from: transfer.from.unwrap_or_default(),
        to: transfer.to.unwrap_or_default(),
        shares: transfer.shares,
    });
}
