use anchor_lang::prelude::*;

use crate::{constants::MAX_DONATION_BPS, errors::VaultError, state::VaultState};

/// Validate a donation configuration (percent in range, recipient not null).
pub fn validate_donation_config(recipient: &Pubkey, donation_percent_bps: u16) -> Result<()> {
    require!(
        donation_percent_bps <= MAX_DONATION_BPS,
        VaultError::InvalidConfiguration
    );
    require!(
        *recipient != Pubkey::default(),
        VaultError::InvalidConfiguration
    );
    Ok(())
}

/// Owner-gated configuration. Each operation checks the caller against the
/// stored owner before touching any field, and returns the previous value.
impl VaultState {
    pub fn ensure_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.owner, VaultError::Unauthorized);
        Ok(())
    }

    pub fn set_donation_percent(&mut self, caller: &Pubkey, new_percent_bps: u16) -> Result<u16> {
        self.ensure_owner(caller)?;
        require!(
            new_percent_bps <= MAX_DONATION_BPS,
            VaultError::InvalidConfiguration
        );

        let old = self.donation_percent_bps;
        self.donation_percent_bps = new_percent_bps;
        Ok(old)
    }

    pub fn set_donation_recipient(&mut self, caller: &Pubkey, new_recipient: Pubkey) -> Result<Pubkey> {
        self.ensure_owner(caller)?;
        require!(
            new_recipient != Pubkey::default(),
            VaultError::InvalidConfiguration
        );

        Ok(std::mem::replace(&mut self.donation_recipient, new_recipient))
    }

    pub fn transfer_ownership(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<Pubkey> {
        self.ensure_owner(caller)?;
        require!(
            new_owner != Pubkey::default(),
            VaultError::InvalidConfiguration
        );

        Ok(std::mem::replace(&mut self.owner, new_owner))
    }
}
