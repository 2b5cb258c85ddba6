use anchor_lang::prelude::*;

use crate::{
    errors::VaultError,
    math::{mul_div, Rounding},
    state::ShareBalance,
};

/// Calculate shares to mint for a given asset amount
///
/// - If first deposit: shares = assets
/// - Otherwise: shares = assets * totalShares / totalAssets (floor)
///
/// Floor rounding keeps rounding dust with the existing holders.
pub fn preview_deposit(assets: u64, total_assets: u64, total_shares: u64) -> Result<u64> {
    if total_shares == 0 {
        return Ok(assets);
    }
    mul_div(assets, total_shares, total_assets, Rounding::Floor)
}

/// Calculate asset value of shares: shares * totalAssets / totalShares (floor)
pub fn preview_withdraw(shares: u64, total_assets: u64, total_shares: u64) -> Result<u64> {
    if total_shares == 0 {
        return Ok(0);
    }
    mul_div(shares, total_assets, total_shares, Rounding::Floor)
}

/// Shares to burn for an exact asset withdrawal (ceiling)
///
/// Never burns fewer shares than the assets paid out are worth.
pub fn shares_for_withdraw(assets: u64, total_assets: u64, total_shares: u64) -> Result<u64> {
    require!(total_shares > 0, VaultError::InsufficientBalance);
    mul_div(assets, total_shares, total_assets, Rounding::Ceiling)
}

/// A share movement; `None` stands for the null address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShareTransfer {
    pub from: Option<Pubkey>,
    pub to: Option<Pubkey>,
    pub shares: u64,
}

/// Share bookkeeping over the vault's total supply.
///
/// Holder balances are passed in per call; the ledger never makes external calls.
pub struct ShareLedger<'a> {
    total_shares: &'a mut u64,
}

impl<'a> ShareLedger<'a> {
    pub fn new(total_shares: &'a mut u64) -> Self {
        Self { total_shares }
    }

    pub fn total_shares(&self) -> u64 {
        *self.total_shares
    }

    pub fn mint(&mut self, holder: &mut ShareBalance, shares: u64) -> Result<ShareTransfer> {
        require!(shares > 0, VaultError::InvalidAmount);

        let total = self
            .total_shares
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;
        let balance = holder
            .shares
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;

        *self.total_shares = total;
        holder.shares = balance;

        Ok(ShareTransfer {
            from: None,
            to: Some(holder.holder),
            shares,
        })
    }

    pub fn burn(&mut self, holder: &mut ShareBalance, shares: u64) -> Result<ShareTransfer> {
        require!(holder.shares >= shares, VaultError::InsufficientShares);

        let total = self
            .total_shares
            .checked_sub(shares)
            .ok_or(VaultError::MathOverflow)?;

        *self.total_shares = total;
        holder.shares -= shares;

        Ok(ShareTransfer {
            from: Some(holder.holder),
            to: None,
            shares,
        })
    }
}
