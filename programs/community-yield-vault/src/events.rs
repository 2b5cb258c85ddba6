use anchor_lang::prelude::*;

/// Event emitted when a new vault is initialized
#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub asset_mint: Pubkey,
    pub yield_position: Pubkey,
    pub donation_recipient: Pubkey,
    pub donation_percent_bps: u16,
    pub timestamp: i64,
}

/// Event emitted when assets are deposited
#[event]
pub struct Deposit {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub receiver: Pubkey,
    pub assets: u64,
    pub shares: u64,
}

/// Event emitted when assets leave the vault through withdraw or redeem
#[event]
pub struct Withdraw {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub receiver: Pubkey,
    pub owner: Pubkey,
    pub assets: u64,
    pub shares: u64,
}

/// One reconciliation of the recorded baseline against the yield position
#[event]
pub struct Harvested {
    pub vault: Pubkey,
    pub timestamp: i64,
    pub gross_yield: u64,
    pub donated_amount: u64,
    pub net_yield_retained: u64,
    pub loss: u64,
    pub total_assets: u64,
}

#[event]
pub struct YieldDonated {
    pub vault: Pubkey,
    pub amount: u64,
    pub recipient: Pubkey,
}

#[event]
pub struct DonationPercentUpdated {
    pub vault: Pubkey,
    pub old_percent_bps: u16,
    pub new_percent_bps: u16,
}

#[event]
pub struct DonationRecipientUpdated {
    pub vault: Pubkey,
    pub old_recipient: Pubkey,
    pub new_recipient: Pubkey,
}

#[event]
pub struct OwnershipTransferred {
    pub vault: Pubkey,
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

/// Share movement; `from` is the null key on mint, `to` is the null key on burn
#[event]
pub struct SharesTransferred {
    pub vault: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    pub shares: u64,
}

#[event]
pub struct Approval {
    pub vault: Pubkey,
    pub holder: Pubkey,
    pub delegate: Pubkey,
    pub shares: u64,
}
