use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, IntoVal, Symbol, TryIntoVal, Val, Vec,
};

use crate::events::{
    Claimed, Disinvested, Invested, LiquidatedDamageRecorded, PeriodAdvanced, ProjectCancelled,
    Withdrawn,
};
use crate::test::Harness;
use crate::Project;

/// Topics and data of the most recent launchpad event named `name`.
fn last_event(h: &Harness, name: Symbol) -> (Vec<Val>, Val) {
    let mut found = None;
    for (contract, topics, data) in h.env.events().all().iter() {
        if contract != h.client.address {
            continue;
        }
        let Some(first) = topics.get(0) else {
            continue;
        };
        let topic: Symbol = first.try_into_val(&h.env).unwrap();
        if topic == name {
            found = Some((topics, data));
        }
    }
    found.expect("event not emitted")
}

#[test]
fn test_register_event() {
    let h = Harness::new();
    let project = h.register(&h.params());

    let (topics, data) = last_event(&h, symbol_short!("register"));
    let expected_topics = vec![
        &h.env,
        symbol_short!("register").into_val(&h.env),
        project.id.into_val(&h.env),
    ];
    assert_eq!(topics, expected_topics);

    let event_data: Project = data.try_into_val(&h.env).unwrap();
    assert_eq!(event_data, project);
}

#[test]
fn test_invest_event() {
    let h = Harness::new();
    let project = h.register(&h.params());
    let investor = h.investor(10_000);
    h.open_sale(&project);
    h.client.invest(&investor, &project.id, &h.accepted.address, &400);
    h.client.invest(&investor, &project.id, &h.accepted.address, &600);

    let (topics, data) = last_event(&h, symbol_short!("invest"));
    assert_eq!(
        topics,
        vec![
            &h.env,
            symbol_short!("invest").into_val(&h.env),
            project.id.into_val(&h.env),
        ]
    );
    let event_data: Invested = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        event_data,
        Invested {
            project_id: project.id,
            investor,
            token: h.accepted.address.clone(),
            amount: 600,
            total_amount: 1_000,
            project_token: h.project_token.address.clone(),
            to_claim_amount: 500,
        }
    );
}

#[test]
fn test_disinvest_events() {
    let h = Harness::new();
    let project = h.register(&h.params());
    let investor = h.investor(1_000);
    h.open_sale(&project);
    h.client.invest(&investor, &project.id, &h.accepted.address, &100);
    h.client.disinvest(&investor, &project.id);

    let (_, data) = last_event(&h, symbol_short!("disinvest"));
    let event_data: Disinvested = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        event_data,
        Disinvested {
            project_id: project.id.clone(),
            investor: investor.clone(),
            token: h.accepted.address.clone(),
            total_amount: 100,
            returned_amount: 90,
        }
    );

    let (_, data) = last_event(&h, symbol_short!("ld_rec"));
    let event_data: LiquidatedDamageRecorded = data.try_into_val(&h.env).unwrap();
    assert_eq!(event_data.investor, investor);
    assert_eq!(event_data.amount, 10);
}

#[test]
fn test_period_and_claimed_events() {
    let h = Harness::new();
    let project = h.register(&h.params());
    let investor = h.investor(10_000);
    h.open_sale(&project);
    h.client.invest(&investor, &project.id, &h.accepted.address, &1_000);

    h.warp(project.token_release_time);
    h.client.next_period(&h.admin, &project.id);

    let (topics, data) = last_event(&h, symbol_short!("period"));
    assert_eq!(
        topics,
        vec![
            &h.env,
            symbol_short!("period").into_val(&h.env),
            project.id.into_val(&h.env),
        ]
    );
    let event_data: PeriodAdvanced = data.try_into_val(&h.env).unwrap();
    assert_eq!(event_data.new_period, 1);

    h.client.claim(&project.id, &investor);
    let (_, data) = last_event(&h, symbol_short!("claimed"));
    let event_data: Claimed = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        event_data,
        Claimed {
            project_id: project.id,
            investor,
            period: 1,
            latest_period: 1,
            token: h.project_token.address.clone(),
            amount: 300,
        }
    );
}

#[test]
fn test_withdraw_event() {
    let h = Harness::new();
    let project = h.register(&h.params());
    let investor = h.investor(10_000);
    h.open_sale(&project);
    h.client.invest(&investor, &project.id, &h.accepted.address, &1_000);
    h.warp(project.token_release_time);
    h.client.withdraw(&h.admin, &project.id);

    let (_, data) = last_event(&h, symbol_short!("withdraw"));
    let event_data: Withdrawn = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        event_data,
        Withdrawn {
            project_id: project.id,
            accepted_token: h.accepted.address.clone(),
            withdraw_amount: 1_000,
            liquidated_damage_amount: 0,
            project_token: h.project_token.address.clone(),
            burn_rest_token: false,
            rest_amount: crate::test::ISSUE - 500,
        }
    );
}

#[test]
fn test_cancel_event() {
    let h = Harness::new();
    let project = h.register(&h.params());
    h.client.cancel(&h.creator, &project.id);

    let (_, data) = last_event(&h, symbol_short!("cancel"));
    let event_data: ProjectCancelled = data.try_into_val(&h.env).unwrap();
    assert_eq!(
        event_data,
        ProjectCancelled {
            project_id: project.id,
            settled_amount: crate::test::ISSUE,
            burned: false,
        }
    );
}

#[test]
fn test_role_events_come_from_launchpad() {
    let h = Harness::new();
    let operator = Address::generate(&h.env);
    h.client.grant_role(&h.admin, &operator, &crate::Role::Admin);
    let (topics, _) = last_event(&h, symbol_short!("role_set"));
    let target: Address = topics.get(1).unwrap().try_into_val(&h.env).unwrap();
    assert_eq!(target, operator);
}
