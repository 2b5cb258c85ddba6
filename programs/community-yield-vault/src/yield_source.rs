use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount, Transfer};

use crate::errors::VaultError;

/// Narrow contract the vault relies on from the external yield position.
///
/// Every call is fallible; the engine never assumes success.
pub trait YieldSource {
    /// Deploy `amount` of staged assets into the position.
    fn supply(&mut self, amount: u64) -> Result<()>;

    /// Pay `amount` out of the position to `recipient`, returning what actually left.
    fn withdraw(&mut self, amount: u64, recipient: &Pubkey) -> Result<u64>;

    /// Current value of the vault's position.
    fn balance_of(&mut self) -> Result<u64>;
}

/// Pulls base asset from the caller into the vault's staging account.
pub trait AssetIntake {
    fn pull(&mut self, from: &Pubkey, amount: u64) -> Result<()>;
}

struct Depositor<'info> {
    wallet: Pubkey,
    signer: AccountInfo<'info>,
    source: AccountInfo<'info>,
}

/// Yield source backed by a rebasing position token account.
///
/// The position is a PDA token account of the vault asset owned by the vault
/// authority. The external lending program credits yield into it (and debits
/// it on loss), so its token amount is the live position value. All movements
/// are SPL token CPIs signed by the vault authority PDA.
pub struct TokenPositionSource<'a, 'info> {
    token_program: AccountInfo<'info>,
    vault_authority: AccountInfo<'info>,
    signer_seeds: &'a [&'a [&'a [u8]]],
    position: &'a mut Account<'info, TokenAccount>,
    idle: Option<AccountInfo<'info>>,
    depositor: Option<Depositor<'info>>,
    payees: Vec<(Pubkey, AccountInfo<'info>)>,
}

impl<'a, 'info> TokenPositionSource<'a, 'info> {
    pub fn new(
        token_program: AccountInfo<'info>,
        vault_authority: AccountInfo<'info>,
        signer_seeds: &'a [&'a [&'a [u8]]],
        position: &'a mut Account<'info, TokenAccount>,
    ) -> Self {
        Self {
            token_program,
            vault_authority,
            signer_seeds,
            position,
            idle: None,
            depositor: None,
            payees: Vec::new(),
        }
    }

    /// Enable `pull`/`supply` through the vault's idle staging account.
    pub fn with_intake(
        mut self,
        depositor: &Signer<'info>,
        depositor_account: &Account<'info, TokenAccount>,
        idle: &Account<'info, TokenAccount>,
    ) -> Self {
        self.depositor = Some(Depositor {
            wallet: depositor.key(),
            signer: depositor.to_account_info(),
            source: depositor_account.to_account_info(),
        });
        self.idle = Some(idle.to_account_info());
        self
    }

    /// Register a token account that `withdraw` may pay to, keyed by its owner.
    pub fn with_payee(mut self, account: &Account<'info, TokenAccount>) -> Self {
        self.payees.push((account.owner, account.to_account_info()));
        self
    }

    fn payee(&self, recipient: &Pubkey) -> Result<AccountInfo<'info>> {
        resolve_payee(&self.payees, recipient)
            .cloned()
            .ok_or_else(|| error!(VaultError::InvalidOwner))
    }
}

/// First registered account owned by `recipient`.
///
/// Handlers register the withdraw receiver before the donation recipient, so
/// when both belong to the same wallet every payout lands in the receiver's
/// account.
pub(crate) fn resolve_payee<'p, T>(payees: &'p [(Pubkey, T)], recipient: &Pubkey) -> Option<&'p T> {
    payees
        .iter()
        .find(|(owner, _)| owner == recipient)
        .map(|(_, account)| account)
}

/// Amount that left the position between two balance reads.
pub(crate) fn paid_out(before: u64, after: u64) -> u64 {
    before.saturating_sub(after)
}

impl<'a, 'info> YieldSource for TokenPositionSource<'a, 'info> {
    fn supply(&mut self, amount: u64) -> Result<()> {
        let idle = self
            .idle
            .clone()
            .ok_or(VaultError::YieldSourceUnavailable)?;

        let transfer_ctx = CpiContext::new_with_signer(
            self.token_program.clone(),
            Transfer {
                from: idle,
                to: self.position.to_account_info(),
                authority: self.vault_authority.clone(),
            },
            self.signer_seeds,
        );
        token::transfer(transfer_ctx, amount)
            .map_err(|_| error!(VaultError::YieldSourceUnavailable))
    }

    fn withdraw(&mut self, amount: u64, recipient: &Pubkey) -> Result<u64> {
        let before = self.balance_of()?;
        require!(before >= amount, VaultError::YieldSourceUnavailable);

        let payee = self.payee(recipient)?;
        let transfer_ctx = CpiContext::new_with_signer(
            self.token_program.clone(),
            Transfer {
                from: self.position.to_account_info(),
                to: payee,
                authority: self.vault_authority.clone(),
            },
            self.signer_seeds,
        );
        token::transfer(transfer_ctx, amount)
            .map_err(|_| error!(VaultError::YieldSourceUnavailable))?;

        let after = self.balance_of()?;
        Ok(paid_out(before, after))
    }

    fn balance_of(&mut self) -> Result<u64> {
        self.position
            .reload()
            .map_err(|_| error!(VaultError::YieldSourceUnavailable))?;
        Ok(self.position.amount)
    }
}

impl<'a, 'info> AssetIntake for TokenPositionSource<'a, 'info> {
    fn pull(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        let depositor = self
            .depositor
            .as_ref()
            .ok_or(VaultError::YieldSourceUnavailable)?;
        require_keys_eq!(depositor.wallet, *from, VaultError::InvalidOwner);
        let idle = self
            .idle
            .clone()
            .ok_or(VaultError::YieldSourceUnavailable)?;

        let transfer_ctx = CpiContext::new(
            self.token_program.clone(),
            Transfer {
                from: depositor.source.clone(),
                to: idle,
                authority: depositor.signer.clone(),
            },
        );
        token::transfer(transfer_ctx, amount)
    }
}
