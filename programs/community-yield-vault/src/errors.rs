use anchor_lang::prelude::*;

/// Custom error codes for the Community Yield Vault program
#[error_code]
pub enum VaultError {
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Deposit too small to mint any shares at the current share price")]
    ZeroShares,

    #[msg("Redeemed shares are worth zero assets at the current share price")]
    ZeroAssets,

    #[msg("Owner does not hold enough shares for this withdrawal")]
    InsufficientBalance,

    #[msg("Insufficient shares balance to burn")]
    InsufficientShares,

    #[msg("Yield source failed or returned less than requested")]
    YieldSourceUnavailable,

    #[msg("Unauthorized - caller is not the vault owner or an approved delegate")]
    Unauthorized,

    #[msg("Invalid configuration - donation percent above 100% or null address")]
    InvalidConfiguration,

    #[msg("Math overflow occurred during calculation")]
    MathOverflow,

    #[msg("Cannot divide by zero - vault holds no assets")]
    DivisionByZero,

    #[msg("Invalid token mint - does not match vault asset")]
    InvalidMint,

    #[msg("Invalid token account owner")]
    InvalidOwner,

    #[msg("Vault position is empty while shares are outstanding - deposits are closed")]
    VaultInsolvent,
}
