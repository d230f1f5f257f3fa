#![allow(dead_code)]

extern crate std;

use soroban_sdk::Address;

use crate::types::{Entitlement, Project, VestingSchedule, MANTISSA, PROPORTION_SCALE};
use crate::LaunchpadProtocolClient;

/// INV-1: the raised amount equals the sum of all live positions.
pub fn assert_raised_matches_positions(
    client: &LaunchpadProtocolClient,
    project: &Project,
    investors: &[Address],
) {
    let mut sum = 0i128;
    for investor in investors {
        if let Some(position) = client.get_position(&project.id, investor) {
            assert!(position.amount >= 0, "INV-1 violated: negative position");
            if position.exited {
                assert_eq!(position.amount, 0, "INV-1 violated: exited position holds funds");
            }
            sum += position.amount;
        }
    }
    assert_eq!(
        sum, project.current_raised,
        "INV-1 violated: positions sum to {} but current_raised is {}",
        sum, project.current_raised
    );
}

/// INV-2: a project never raises past its target.
pub fn assert_within_target(project: &Project) {
    assert!(
        project.current_raised >= 0 && project.current_raised <= project.target_raised,
        "INV-2 violated: current_raised {} outside [0, {}]",
        project.current_raised,
        project.target_raised
    );
}

/// INV-3: the target is the truncated `issue * MANTISSA / price`.
pub fn assert_target_derivation(project: &Project) {
    assert_eq!(
        project.target_raised,
        project.issue_amount * MANTISSA / project.presale_price,
        "INV-3 violated: target_raised mismatch"
    );
}

/// INV-4: `0 <= latest_period <= total_period`.
pub fn assert_schedule_bounds(schedule: &VestingSchedule) {
    assert!(
        schedule.latest_period <= schedule.total_period,
        "INV-4 violated: latest_period {} > total_period {}",
        schedule.latest_period,
        schedule.total_period
    );
}

/// INV-5: the entitlement matches the position it was computed from.
pub fn assert_entitlement_matches(
    entitlement: &Entitlement,
    position: i128,
    price: i128,
    schedule: &VestingSchedule,
) {
    let total = position * price / MANTISSA;
    assert_eq!(entitlement.total, total, "INV-5 violated: total mismatch");
    assert_eq!(entitlement.amounts.len(), schedule.total_period);

    let scale = i128::from(PROPORTION_SCALE);
    let first = total * i128::from(schedule.first_distribute_proportion) / scale;
    let rest = total * i128::from(schedule.rest_distribute_proportion) / scale;
    let mut sum = 0i128;
    for period in 1..=schedule.total_period {
        let owed = entitlement.amounts.get(period).unwrap_or(-1);
        let expected = if period == 1 { first } else { rest };
        assert_eq!(owed, expected, "INV-5 violated: period {} owes {}", period, owed);
        sum += owed;
    }
    assert!(sum <= total, "INV-5 violated: periods owe {} of {}", sum, total);
}

/// INV-6: the claim cursor never runs ahead of the schedule.
pub fn assert_claim_cursor(entitlement: &Entitlement, schedule: &VestingSchedule) {
    assert!(
        entitlement.last_claimed <= schedule.latest_period,
        "INV-6 violated: last_claimed {} > latest_period {}",
        entitlement.last_claimed,
        schedule.latest_period
    );
}

/// INV-7: registration fields never change afterwards.
pub fn assert_project_immutable_fields(original: &Project, current: &Project) {
    assert_eq!(original.id, current.id, "INV-7 violated: id changed");
    assert_eq!(original.creator, current.creator, "INV-7 violated: creator changed");
    assert_eq!(original.escrow, current.escrow, "INV-7 violated: escrow changed");
    assert_eq!(original.issue_amount, current.issue_amount);
    assert_eq!(original.presale_price, current.presale_price);
    assert_eq!(original.target_raised, current.target_raised);
    assert_eq!(original.start_time, current.start_time);
    assert_eq!(original.end_time, current.end_time);
    assert_eq!(original.token_release_time, current.token_release_time);
}

/// Run all stateless project invariants.
pub fn assert_all_project_invariants(project: &Project) {
    assert_within_target(project);
    assert_target_derivation(project);
}
