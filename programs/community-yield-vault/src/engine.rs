use anchor_lang::prelude::*;

use crate::{
    accountant::{reconcile, HarvestRecord, Reconciliation},
    errors::VaultError,
    ledger::{preview_deposit, preview_withdraw, shares_for_withdraw, ShareLedger, ShareTransfer},
    state::{ShareBalance, VaultState},
    yield_source::{AssetIntake, YieldSource},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositOutcome {
    pub harvest: Option<HarvestRecord>,
    pub assets: u64,
    pub shares: u64,
    pub transfer: ShareTransfer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawOutcome {
    pub harvest: Option<HarvestRecord>,
    pub owner: Pubkey,
    pub assets: u64,
    pub shares: u64,
    pub transfer: ShareTransfer,
}

/// Orchestrates deposits, withdrawals and harvests over one vault.
///
/// Each public operation harvests first and prices shares against the
/// post-harvest total. All checks run before the first effect, and engine
/// state is written only after every yield source call has succeeded, so a
/// failing call leaves `VaultState` and the share balances untouched.
pub struct VaultEngine<'a, S> {
    state: &'a mut VaultState,
    source: &'a mut S,
}

impl<'a, S: YieldSource> VaultEngine<'a, S> {
    pub fn new(state: &'a mut VaultState, source: &'a mut S) -> Self {
        Self { state, source }
    }

    /// Cached total as of the last harvest, deposit or withdrawal.
    pub fn total_assets(&self) -> u64 {
        self.state.last_total_assets
    }

    /// Reconcile the baseline with the position and pay out the donation.
    pub fn harvest(&mut self, now: i64) -> Result<Option<HarvestRecord>> {
        let reconciliation = self.measure()?;
        self.pay_donation(&reconciliation)?;
        self.commit_harvest(&reconciliation, now)
    }

    /// Burn the shares worth exactly `assets` (rounded up) and pay `assets` to `receiver`.
    pub fn withdraw(
        &mut self,
        caller: &Pubkey,
        owner: &mut ShareBalance,
        receiver: &Pubkey,
        assets: u64,
        now: i64,
    ) -> Result<WithdrawOutcome> {
        require!(assets > 0, VaultError::InvalidAmount);

        let reconciliation = self.measure()?;
        let total_assets = reconciliation.new_baseline;
        let total_shares = self.state.total_shares;
        require!(
            total_shares > 0 && assets <= total_assets,
            VaultError::InsufficientBalance
        );

        let shares = shares_for_withdraw(assets, total_assets, total_shares)?;
        owner.check_spender(caller, shares)?;
        require!(owner.shares >= shares, VaultError::InsufficientBalance);

        self.settle_withdrawal(caller, owner, receiver, reconciliation, assets, shares, now)
    }

    /// Burn exactly `shares` and pay their floor-rounded asset value to `receiver`.
    pub fn redeem(
        &mut self,
        caller: &Pubkey,
        owner: &mut ShareBalance,
        receiver: &Pubkey,
        shares: u64,
        now: i64,
    ) -> Result<WithdrawOutcome> {
        require!(shares > 0, VaultError::InvalidAmount);

        let reconciliation = self.measure()?;
        owner.check_spender(caller, shares)?;
        require!(owner.shares >= shares, VaultError::InsufficientBalance);

        let assets = preview_withdraw(shares, reconciliation.new_baseline, self.state.total_shares)?;
        require!(assets > 0, VaultError::ZeroAssets);

        self.settle_withdrawal(caller, owner, receiver, reconciliation, assets, shares, now)
    }

    fn measure(&mut self) -> Result<Reconciliation> {
        let position_value = self.source.balance_of()?;
        reconcile(
            position_value,
            self.state.last_total_assets,
            self.state.donation_percent_bps,
        )
    }

    /// Pays the donation straight from the position to the recipient.
    fn pay_donation(&mut self, reconciliation: &Reconciliation) -> Result<()> {
        if reconciliation.donation == 0 {
            return Ok(());
        }
        let recipient = self.state.donation_recipient;
        let paid = self.source.withdraw(reconciliation.donation, &recipient)?;
        require!(
            paid == reconciliation.donation,
            VaultError::YieldSourceUnavailable
        );
        Ok(())
    }

    fn commit_harvest(
        &mut self,
        reconciliation: &Reconciliation,
        now: i64,
    ) -> Result<Option<HarvestRecord>> {
        if reconciliation.is_noop() {
            return Ok(None);
        }

        let total_donated = self
            .state
            .total_donated
            .checked_add(reconciliation.donation)
            .ok_or(VaultError::MathOverflow)?;

        self.state.last_total_assets = reconciliation.new_baseline;
        self.state.total_donated = total_donated;
        self.state.last_harvest_ts = now;

        msg!(
            "Harvest: gross yield {}, donated {}, loss {}, total assets {}",
            reconciliation.gross_yield,
            reconciliation.donation,
            reconciliation.loss,
            reconciliation.new_baseline
        );

        Ok(Some(HarvestRecord::new(reconciliation, now)))
    }

    #[allow(clippy::too_many_arguments)]
    fn settle_withdrawal(
        &mut self,
        caller: &Pubkey,
        owner: &mut ShareBalance,
        receiver: &Pubkey,
        reconciliation: Reconciliation,
        assets: u64,
        shares: u64,
        now: i64,
    ) -> Result<WithdrawOutcome> {
        let remaining = reconciliation
            .new_baseline
            .checked_sub(assets)
            .ok_or(VaultError::InsufficientBalance)?;

        // INTERACTIONS: all yield source calls before any state write
        self.pay_donation(&reconciliation)?;
        let paid = self.source.withdraw(assets, receiver)?;
        require!(paid == assets, VaultError::YieldSourceUnavailable);

        // EFFECTS
        let harvest = self.commit_harvest(&reconciliation, now)?;
        let transfer = ShareLedger::new(&mut self.state.total_shares).burn(owner, shares)?;
        owner.spend_allowance(caller, shares)?;
        self.state.last_total_assets = remaining;

        Ok(WithdrawOutcome {
            harvest,
            owner: owner.holder,
            assets,
            shares,
            transfer,
        })
    }
}

impl<'a, S: YieldSource + AssetIntake> VaultEngine<'a, S> {
    /// Pull `assets` from `caller`, deploy them and mint shares to `receiver`.
    pub fn deposit(
        &mut self,
        caller: &Pubkey,
        receiver: &mut ShareBalance,
        assets: u64,
        now: i64,
    ) -> Result<DepositOutcome> {
        require!(assets > 0, VaultError::InvalidAmount);
        require!(
            receiver.holder != Pubkey::default(),
            VaultError::InvalidOwner
        );

        let reconciliation = self.measure()?;
        // A wiped-out position cannot price new shares
        require!(
            self.state.total_shares == 0 || reconciliation.new_baseline > 0,
            VaultError::VaultInsolvent
        );
        let shares = preview_deposit(
            assets,
            reconciliation.new_baseline,
            self.state.total_shares,
        )?;
        require!(shares > 0, VaultError::ZeroShares);

        let new_total = reconciliation
            .new_baseline
            .checked_add(assets)
            .ok_or(VaultError::MathOverflow)?;
        self.state
            .total_shares
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;
        receiver
            .shares
            .checked_add(shares)
            .ok_or(VaultError::MathOverflow)?;

        // INTERACTIONS
        self.pay_donation(&reconciliation)?;
        self.source.pull(caller, assets)?;
        self.source.supply(assets)?;

        // EFFECTS
        let harvest = self.commit_harvest(&reconciliation, now)?;
        let transfer = ShareLedger::new(&mut self.state.total_shares).mint(receiver, shares)?;
        self.state.last_total_assets = new_total;

        Ok(DepositOutcome {
            harvest,
            assets,
            shares,
            transfer,
        })
    }
}

/// Assets `holder` could withdraw at the cached total.
pub fn max_withdraw(state: &VaultState, holder: &ShareBalance) -> Result<u64> {
    preview_withdraw(holder.shares, state.last_total_assets, state.total_shares)
}
