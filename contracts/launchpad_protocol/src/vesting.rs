//! # Vesting
//!
//! Fixed-point arithmetic for the sale and the per-period release schedule.
//!
//! For a committed position `p` and presale price `price`:
//!
//! ```text
//! T         = p * price / MANTISSA
//! period 1  = T * first_distribute_proportion / PROPORTION_SCALE
//! period k  = T * rest_distribute_proportion  / PROPORTION_SCALE   (k = 2..=total_period)
//! ```
//!
//! Every division truncates. Recomputing replaces the whole per-period map,
//! so it is idempotent for a given `p`.

use soroban_sdk::{Address, Env, Map};

use crate::storage;
use crate::types::{Entitlement, InvestorKey, VestingSchedule, MANTISSA, PROPORTION_SCALE};
use crate::Error;

/// `issue_amount * MANTISSA / price`.
pub fn target_raised(issue_amount: i128, price: i128) -> Result<i128, Error> {
    if price == 0 {
        return Err(Error::ZeroPrice);
    }
    issue_amount
        .checked_mul(MANTISSA)
        .ok_or(Error::Overflow)?
        .checked_div(price)
        .ok_or(Error::Overflow)
}

/// Project tokens bought by `amount` of the accepted asset.
pub fn token_value(amount: i128, price: i128) -> Result<i128, Error> {
    amount
        .checked_mul(price)
        .ok_or(Error::Overflow)?
        .checked_div(MANTISSA)
        .ok_or(Error::Overflow)
}

/// `floor(amount * proportion / PROPORTION_SCALE)`.
pub fn apply_proportion(amount: i128, proportion: u32) -> Result<i128, Error> {
    amount
        .checked_mul(i128::from(proportion))
        .ok_or(Error::Overflow)?
        .checked_div(i128::from(PROPORTION_SCALE))
        .ok_or(Error::Overflow)
}

/// `first + (total_period - 1) * rest <= PROPORTION_SCALE`.
pub fn distribution_fits(total_period: u32, first: u32, rest: u32) -> bool {
    if total_period == 0 {
        return false;
    }
    let spread = u64::from(total_period - 1) * u64::from(rest);
    u64::from(first) + spread <= u64::from(PROPORTION_SCALE)
}

/// Earliest timestamp at which period `latest_period + 1` may be released.
pub fn next_release_at(token_release_time: u64, schedule: &VestingSchedule) -> Result<u64, Error> {
    schedule
        .period_duration
        .checked_mul(u64::from(schedule.latest_period))
        .and_then(|offset| token_release_time.checked_add(offset))
        .ok_or(Error::Overflow)
}

/// Per-period amounts owed for a total entitlement of `total`.
pub fn period_amounts(
    env: &Env,
    total: i128,
    schedule: &VestingSchedule,
) -> Result<Map<u32, i128>, Error> {
    let mut amounts = Map::new(env);
    if schedule.total_period == 0 {
        return Ok(amounts);
    }
    amounts.set(1, apply_proportion(total, schedule.first_distribute_proportion)?);
    let rest = apply_proportion(total, schedule.rest_distribute_proportion)?;
    for period in 2..=schedule.total_period {
        amounts.set(period, rest);
    }
    Ok(amounts)
}

/// Rebuild and persist the entitlement of `key` for a position of `position`.
///
/// The claim cursor survives; only the owed amounts are replaced.
pub fn update_entitlement(
    env: &Env,
    key: &InvestorKey,
    token: &Address,
    position: i128,
    price: i128,
    schedule: &VestingSchedule,
) -> Result<Entitlement, Error> {
    let total = token_value(position, price)?;
    let amounts = period_amounts(env, total, schedule)?;
    let last_claimed = storage::get_entitlement(env, key)
        .map(|e| e.last_claimed)
        .unwrap_or(0);
    let entitlement = Entitlement {
        token: token.clone(),
        total,
        amounts,
        last_claimed,
    };
    storage::save_entitlement(env, key, &entitlement);
    Ok(entitlement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_LIQUIDATED_DAMAGE_PROPORTION;

    fn schedule(total_period: u32, first: u32, rest: u32) -> VestingSchedule {
        VestingSchedule {
            total_period,
            period_duration: 60,
            first_distribute_proportion: first,
            rest_distribute_proportion: rest,
            latest_period: 0,
            withdrawn: false,
        }
    }

    #[test]
    fn target_raised_truncates() {
        assert_eq!(target_raised(1_000_000_000, 50_000_000), Ok(2_000_000_000));
        assert_eq!(target_raised(10, 30_000_000), Ok(33));
    }

    #[test]
    fn target_raised_rejects_zero_price() {
        assert_eq!(target_raised(1_000, 0), Err(Error::ZeroPrice));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(target_raised(i128::MAX, 1), Err(Error::Overflow));
        assert_eq!(token_value(i128::MAX, 2), Err(Error::Overflow));
    }

    #[test]
    fn default_penalty_is_ten_percent() {
        assert_eq!(apply_proportion(100, DEFAULT_LIQUIDATED_DAMAGE_PROPORTION), Ok(10));
        assert_eq!(apply_proportion(9, DEFAULT_LIQUIDATED_DAMAGE_PROPORTION), Ok(0));
    }

    #[test]
    fn distribution_bounds() {
        assert!(distribution_fits(1, PROPORTION_SCALE, 0));
        assert!(distribution_fits(2, 60_000_000, 40_000_000));
        assert!(!distribution_fits(3, 60_000_000, 40_000_000));
        assert!(!distribution_fits(0, 0, 0));
        assert!(distribution_fits(20, 5_000_000, 5_000_000));
    }

    #[test]
    fn release_time_advances_by_period_duration() {
        let mut s = schedule(3, 40_000_000, 30_000_000);
        assert_eq!(next_release_at(1_000, &s), Ok(1_000));
        s.latest_period = 2;
        assert_eq!(next_release_at(1_000, &s), Ok(1_120));
    }

    #[test]
    fn two_period_split_sums_to_total() {
        let env = Env::default();
        let amounts = period_amounts(&env, 1_000, &schedule(2, 60_000_000, 40_000_000)).unwrap();
        assert_eq!(amounts.len(), 2);
        assert_eq!(amounts.get(1), Some(600));
        assert_eq!(amounts.get(2), Some(400));
    }

    #[test]
    fn rest_periods_share_one_amount() {
        let env = Env::default();
        let amounts = period_amounts(&env, 999, &schedule(4, 25_000_000, 25_000_000)).unwrap();
        for period in 1..=4u32 {
            assert_eq!(amounts.get(period), Some(249));
        }
    }
}
