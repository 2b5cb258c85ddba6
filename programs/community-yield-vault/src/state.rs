use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// Global vault state: configuration, share supply and the position baseline
///
/// Security considerations:
/// - Owner stored in state (not instruction args) and checked explicitly by admin ops
/// - `last_total_assets` is only moved by harvest, deposit and withdraw
/// - Bumps stored for efficient PDA signing
/// - 128 bytes padding for future upgrades
#[account]
pub struct VaultState {
    /// Owner allowed to change donation settings and transfer ownership
    pub owner: Pubkey,              // 32 bytes

    /// Mint of the underlying asset token
    pub asset_mint: Pubkey,         // 32 bytes

    /// Idle token account that stages deposits before they are supplied
    pub vault_token_account: Pubkey, // 32 bytes

    /// Token account holding the deployed, yield-bearing position
    pub yield_position: Pubkey,     // 32 bytes

    /// Wallet receiving the donated share of yield
    pub donation_recipient: Pubkey, // 32 bytes

    /// Share of each harvest's gross yield that is donated, in basis points
    pub donation_percent_bps: u16,  // 2 bytes

    /// Total shares issued to depositors
    pub total_shares: u64,          // 8 bytes

    /// Position value recorded at the last harvest, adjusted by deposits and withdrawals
    pub last_total_assets: u64,     // 8 bytes

    /// Running total of all donated yield
    pub total_donated: u64,         // 8 bytes

    /// Unix timestamp of the last harvest that moved the baseline
    pub last_harvest_ts: i64,       // 8 bytes

    /// Bump seed for vault state PDA
    pub bump: u8,                   // 1 byte

    /// Bump seed for vault authority PDA
    pub authority_bump: u8,         // 1 byte

    /// Bump seed for the position token account PDA
    pub position_bump: u8,          // 1 byte

    // Padding for future upgrades
    pub _reserved: [u8; 128],       // 128 bytes
}

/// Per-holder share balance
///
/// One PDA per (vault, holder). A holder may approve a single delegate that
/// can withdraw or redeem up to `delegated_shares` on their behalf.
#[account]
pub struct ShareBalance {
    /// Vault this balance belongs to
    pub vault: Pubkey,              // 32 bytes

    /// Wallet owning the shares
    pub holder: Pubkey,             // 32 bytes

    /// Shares held
    pub shares: u64,                // 8 bytes

    /// Approved delegate (null key when none)
    pub delegate: Pubkey,           // 32 bytes

    /// Shares the delegate may still burn
    pub delegated_shares: u64,      // 8 bytes

    /// Bump seed for PDA
    pub bump: u8,                   // 1 byte

    pub _reserved: [u8; 32],        // 32 bytes
}

impl ShareBalance {
    /// Check that `caller` may burn `shares` from this balance.
    ///
    /// The holder is always allowed; a delegate needs enough allowance.
    pub fn check_spender(&self, caller: &Pubkey, shares: u64) -> Result<()> {
        if *caller == self.holder {
            return Ok(());
        }
        require!(
            self.delegate != Pubkey::default()
                && *caller == self.delegate
                && self.delegated_shares >= shares,
            VaultError::Unauthorized
        );
        Ok(())
    }

    /// Consume allowance after a delegated burn. No-op for the holder.
    pub fn spend_allowance(&mut self, caller: &Pubkey, shares: u64) -> Result<()> {
        if *caller == self.holder {
            return Ok(());
        }
        self.check_spender(caller, shares)?;
        self.delegated_shares = self
            .delegated_shares
            .checked_sub(shares)
            .ok_or(VaultError::Unauthorized)?;
        Ok(())
    }

    pub fn approve(&mut self, delegate: Pubkey, shares: u64) {
        self.delegate = delegate;
        self.delegated_shares = if delegate == Pubkey::default() { 0 } else { shares };
    }
}
