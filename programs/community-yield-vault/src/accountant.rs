use anchor_lang::prelude::*;

use crate::{
    constants::{BPS_DENOMINATOR, MAX_DONATION_BPS},
    errors::VaultError,
    math::{mul_div, Rounding},
};

/// Result of comparing the live position value with the recorded baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub position_value: u64,
    pub gross_yield: u64,
    pub donation: u64,
    /// Amount by which the position fell below the baseline
    pub loss: u64,
    pub new_baseline: u64,
}

impl Reconciliation {
    pub fn net_yield_retained(&self) -> u64 {
        self.gross_yield - self.donation
    }

    /// True when applying this reconciliation leaves the baseline unchanged.
    pub fn is_noop(&self) -> bool {
        self.gross_yield == 0 && self.loss == 0
    }
}

/// Immutable record of one harvest that moved the baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HarvestRecord {
    pub timestamp: i64,
    pub gross_yield: u64,
    pub donated_amount: u64,
    pub net_yield_retained: u64,
    pub loss: u64,
    pub new_baseline: u64,
}

impl HarvestRecord {
    pub fn new(reconciliation: &Reconciliation, timestamp: i64) -> Self {
        Self {
            timestamp,
            gross_yield: reconciliation.gross_yield,
            donated_amount: reconciliation.donation,
            net_yield_retained: reconciliation.net_yield_retained(),
            loss: reconciliation.loss,
            new_baseline: reconciliation.new_baseline,
        }
    }
}

/// Donation owed on `gross_yield`: floor(gross_yield * bps / 10_000)
pub fn donation_for(gross_yield: u64, donation_percent_bps: u16) -> Result<u64> {
    require!(
        donation_percent_bps <= MAX_DONATION_BPS,
        VaultError::InvalidConfiguration
    );
    mul_div(
        gross_yield,
        donation_percent_bps as u64,
        BPS_DENOMINATOR,
        Rounding::Floor,
    )
}

/// Split the change in position value since the last harvest.
///
/// Gains are split into a donation and retained yield, and the new baseline is
/// what stays in the position after the donation leaves. Losses are never
/// donated against; the baseline drops to the live position value.
pub fn reconcile(
    current_position_value: u64,
    last_total_assets: u64,
    donation_percent_bps: u16,
) -> Result<Reconciliation> {
    if current_position_value < last_total_assets {
        return Ok(Reconciliation {
            position_value: current_position_value,
            gross_yield: 0,
            donation: 0,
            loss: last_total_assets - current_position_value,
            new_baseline: current_position_value,
        });
    }

    let gross_yield = current_position_value - last_total_assets;
    let donation = donation_for(gross_yield, donation_percent_bps)?;

    Ok(Reconciliation {
        position_value: current_position_value,
        gross_yield,
        donation,
        loss: 0,
        new_baseline: current_position_value - donation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: u64 = 1_000_000_000;

    #[test]
    fn test_gain_is_split() {
        // 10.1 in the position against a 10.0 baseline at 10%
        let r = reconcile(10 * UNIT + UNIT / 10, 10 * UNIT, 1_000).unwrap();
        assert_eq!(r.gross_yield, UNIT / 10);
        assert_eq!(r.donation, UNIT / 100);
        assert_eq!(r.new_baseline, 10 * UNIT + 9 * UNIT / 100);
        assert_eq!(r.net_yield_retained(), 9 * UNIT / 100);
        assert_eq!(r.loss, 0);
    }

    #[test]
    fn test_flat_position_donates_nothing() {
        let r = reconcile(5_000, 5_000, 1_000).unwrap();
        assert_eq!(r.donation, 0);
        assert_eq!(r.new_baseline, 5_000);
        assert!(r.is_noop());
    }

    #[test]
    fn test_loss_is_absorbed() {
        let r = reconcile(9_000, 10_000, 1_000).unwrap();
        assert_eq!(r.donation, 0);
        assert_eq!(r.gross_yield, 0);
        assert_eq!(r.loss, 1_000);
        assert_eq!(r.new_baseline, 9_000);
        assert!(!r.is_noop());
    }

    #[test]
    fn test_zero_percent_donates_nothing() {
        let r = reconcile(20_000, 10_000, 0).unwrap();
        assert_eq!(r.donation, 0);
        assert_eq!(r.new_baseline, 20_000);
    }

    #[test]
    fn test_full_percent_donates_all_yield() {
        let r = reconcile(20_000, 10_000, 10_000).unwrap();
        assert_eq!(r.donation, 10_000);
        assert_eq!(r.new_baseline, 10_000);
    }

    #[test]
    fn test_donation_rounds_down() {
        // 9 * 1000 / 10000 = 0.9
        assert_eq!(donation_for(9, 1_000).unwrap(), 0);
        // 19 * 1000 / 10000 = 1.9
        assert_eq!(donation_for(19, 1_000).unwrap(), 1);
    }

    #[test]
    fn test_donation_bounded_by_gross_yield() {
        for bps in [0u16, 1, 999, 5_000, 9_999, 10_000] {
            for gross in [0u64, 1, 7, 10_001, u64::MAX] {
                let donation = donation_for(gross, bps).unwrap();
                assert!(donation <= gross);
                let expected = (gross as u128 * bps as u128 / 10_000) as u64;
                assert_eq!(donation, expected);
            }
        }
    }

    #[test]
    fn test_out_of_range_percent_rejected() {
        assert!(reconcile(2, 1, 10_001).is_err());
    }

    #[test]
    fn test_harvest_record_from_reconciliation() {
        let r = reconcile(1_100, 1_000, 2_500).unwrap();
        let record = HarvestRecord::new(&r, 42);
        assert_eq!(record.timestamp, 42);
        assert_eq!(record.donated_amount, 25);
        assert_eq!(record.net_yield_retained, 75);
        assert_eq!(record.new_baseline, 1_075);
    }
}
