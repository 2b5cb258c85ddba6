#![allow(dead_code)]

use std::collections::HashMap;

use anchor_lang::prelude::*;
use community_yield_vault::{
    accountant::HarvestRecord,
    engine::{DepositOutcome, VaultEngine, WithdrawOutcome},
    errors::VaultError,
    state::{ShareBalance, VaultState},
    yield_source::{AssetIntake, YieldSource},
};

/// One whole token of a 9-decimal asset
pub const UNIT: u64 = 1_000_000_000;

/// In-memory yield source: a position value plus wallet balances.
#[derive(Default)]
pub struct MockYieldSource {
    pub position: u64,
    pub idle: u64,
    pub wallets: HashMap<Pubkey, u64>,
    /// Every call fails while set
    pub unavailable: bool,
    /// Withdrawals pay this much less than requested
    pub shortfall: u64,
}

impl MockYieldSource {
    pub fn accrue(&mut self, amount: u64) {
        self.position += amount;
    }

    pub fn lose(&mut self, amount: u64) {
        self.position -= amount;
    }

    pub fn wallet(&self, who: &Pubkey) -> u64 {
        self.wallets.get(who).copied().unwrap_or(0)
    }
}

impl YieldSource for MockYieldSource {
    fn supply(&mut self, amount: u64) -> Result<()> {
        require!(!self.unavailable, VaultError::YieldSourceUnavailable);
        require!(self.idle >= amount, VaultError::YieldSourceUnavailable);
        self.idle -= amount;
        self.position += amount;
        Ok(())
    }

    fn withdraw(&mut self, amount: u64, recipient: &Pubkey) -> Result<u64> {
        require!(!self.unavailable, VaultError::YieldSourceUnavailable);
        require!(self.position >= amount, VaultError::YieldSourceUnavailable);
        let paid = amount - self.shortfall.min(amount);
        self.position -= paid;
        *self.wallets.entry(*recipient).or_default() += paid;
        Ok(paid)
    }

    fn balance_of(&mut self) -> Result<u64> {
        require!(!self.unavailable, VaultError::YieldSourceUnavailable);
        Ok(self.position)
    }
}

impl AssetIntake for MockYieldSource {
    fn pull(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        let balance = self.wallets.entry(*from).or_default();
        require!(*balance >= amount, VaultError::InsufficientBalance);
        *balance -= amount;
        self.idle += amount;
        Ok(())
    }
}

pub fn new_vault(owner: Pubkey, donation_recipient: Pubkey, donation_percent_bps: u16) -> VaultState {
    VaultState {
        owner,
        asset_mint: Pubkey::new_unique(),
        vault_token_account: Pubkey::new_unique(),
        yield_position: Pubkey::new_unique(),
        donation_recipient,
        donation_percent_bps,
        total_shares: 0,
        last_total_assets: 0,
        total_donated: 0,
        last_harvest_ts: 0,
        bump: 0,
        authority_bump: 0,
        position_bump: 0,
        _reserved: [0; 128],
    }
}

pub fn new_balance(holder: Pubkey) -> ShareBalance {
    ShareBalance {
        vault: Pubkey::default(),
        holder,
        shares: 0,
        delegate: Pubkey::default(),
        delegated_shares: 0,
        bump: 0,
        _reserved: [0; 32],
    }
}

/// Vault, yield source and share balances wired together the way the
/// instruction handlers wire the on-chain accounts.
pub struct Harness {
    pub owner: Pubkey,
    pub recipient: Pubkey,
    pub vault: VaultState,
    pub source: MockYieldSource,
    pub balances: HashMap<Pubkey, ShareBalance>,
    pub now: i64,
}

impl Harness {
    pub fn new(donation_percent_bps: u16) -> Self {
        let owner = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();
        Self {
            owner,
            recipient,
            vault: new_vault(owner, recipient, donation_percent_bps),
            source: MockYieldSource::default(),
            balances: HashMap::new(),
            now: 1_700_000_000,
        }
    }

    /// A fresh wallet holding `amount` of the asset
    pub fn funded_user(&mut self, amount: u64) -> Pubkey {
        let user = Pubkey::new_unique();
        self.source.wallets.insert(user, amount);
        user
    }

    pub fn tick(&mut self) {
        self.now += 60;
    }

    pub fn deposit(&mut self, user: Pubkey, assets: u64) -> Result<DepositOutcome> {
        self.deposit_for(user, user, assets)
    }

    pub fn deposit_for(&mut self, caller: Pubkey, receiver: Pubkey, assets: u64) -> Result<DepositOutcome> {
        let balance = self
            .balances
            .entry(receiver)
            .or_insert_with(|| new_balance(receiver));
        VaultEngine::new(&mut self.vault, &mut self.source).deposit(&caller, balance, assets, self.now)
    }

    pub fn withdraw(
        &mut self,
        caller: Pubkey,
        owner: Pubkey,
        receiver: Pubkey,
        assets: u64,
    ) -> Result<WithdrawOutcome> {
        let balance = self
            .balances
            .entry(owner)
            .or_insert_with(|| new_balance(owner));
        VaultEngine::new(&mut self.vault, &mut self.source)
            .withdraw(&caller, balance, &receiver, assets, self.now)
    }

    pub fn redeem(
        &mut self,
        caller: Pubkey,
        owner: Pubkey,
        receiver: Pubkey,
        shares: u64,
    ) -> Result<WithdrawOutcome> {
        let balance = self
            .balances
            .entry(owner)
            .or_insert_with(|| new_balance(owner));
        VaultEngine::new(&mut self.vault, &mut self.source)
            .redeem(&caller, balance, &receiver, shares, self.now)
    }

    pub fn harvest(&mut self) -> Result<Option<HarvestRecord>> {
        VaultEngine::new(&mut self.vault, &mut self.source).harvest(self.now)
    }

    pub fn shares_of(&self, holder: &Pubkey) -> u64 {
        self.balances.get(holder).map(|b| b.shares).unwrap_or(0)
    }

    pub fn wallet(&self, who: &Pubkey) -> u64 {
        self.source.wallet(who)
    }

    pub fn donated(&self) -> u64 {
        self.wallet(&self.recipient)
    }

    pub fn sum_of_shares(&self) -> u64 {
        self.balances.values().map(|b| b.shares).sum()
    }

    /// Accounting fields that must not move when a call fails
    pub fn snapshot(&self) -> (u64, u64, u64, u16, i64) {
        (
            self.vault.total_shares,
            self.vault.last_total_assets,
            self.vault.total_donated,
            self.vault.donation_percent_bps,
            self.vault.last_harvest_ts,
        )
    }
}

pub fn assert_vault_error<T: std::fmt::Debug>(result: Result<T>, expected: VaultError) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(err)) => {
            assert_eq!(
                err.error_code_number,
                u32::from(expected),
                "expected {:?}, got {}",
                expected,
                err.error_name
            );
        }
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}
