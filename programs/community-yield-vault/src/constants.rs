// Constants for the Community Yield Vault program

/// Seed for vault state PDA
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for the vault authority PDA (owns the idle and position token accounts)
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

/// Seed for the yield position token account PDA
pub const POSITION_SEED: &[u8] = b"position";

/// Seed for per-holder share balance PDAs
pub const SHARE_BALANCE_SEED: &[u8] = b"share_balance";

/// Basis point denominator (10_000 bps = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Upper bound for the donation percentage
pub const MAX_DONATION_BPS: u16 = 10_000;

/// Space for VaultState account (8 discriminator + 32 owner + 32 asset_mint +
/// 32 vault_token_account + 32 yield_position + 32 donation_recipient +
/// 2 donation_percent_bps + 8 total_shares + 8 last_total_assets +
/// 8 total_donated + 8 last_harvest_ts + 1 bump + 1 authority_bump +
/// 1 position_bump + 128 padding)
pub const VAULT_STATE_SIZE: usize =
    8 + 32 + 32 + 32 + 32 + 32 + 2 + 8 + 8 + 8 + 8 + 1 + 1 + 1 + 128;

/// Space for ShareBalance account (8 discriminator + 32 vault + 32 holder +
/// 8 shares + 32 delegate + 8 delegated_shares + 1 bump + 32 padding)
pub const SHARE_BALANCE_SIZE: usize = 8 + 32 + 32 + 8 + 32 + 8 + 1 + 32;
