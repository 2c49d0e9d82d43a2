extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, Symbol, TryIntoVal, Val, Vec,
};

use crate::test::{create_project, funded_contributor, pass_deadline, setup, GOAL, UNIT};
use crate::{ContributionMade, FundsClaimed, GoalReached, ProjectCreated, RefundIssued};

/// Events published by `contract`, oldest first.
fn contract_events(env: &Env, contract: &Address) -> std::vec::Vec<(Vec<Val>, Val)> {
    env.events()
        .all()
        .iter()
        .filter(|(source, _, _)| source == contract)
        .map(|(_, topics, data)| (topics, data))
        .collect()
}

fn topics(env: &Env, name: Symbol, project_id: u64) -> Vec<Val> {
    vec![env, name.into_val(env), project_id.into_val(env)]
}

#[test]
fn test_project_created_event() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let events = contract_events(&t.env, &t.client.address);
    let (last_topics, last_data) = events.last().cloned().expect("No events found");
    let project = t.client.get_project(&id);

    assert_eq!(last_topics, topics(&t.env, symbol_short!("created"), id));
    let event_data: ProjectCreated = last_data.try_into_val(&t.env).unwrap();
    assert_eq!(
        event_data,
        ProjectCreated {
            project_id: id,
            creator: t.creator.clone(),
            funding_goal: GOAL,
            deadline: project.deadline,
            reward_ledger: project.reward_ledger,
        }
    );
}

#[test]
fn test_contribution_event() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = funded_contributor(&t, UNIT);
    t.client.contribute(&id, &contributor, &UNIT);

    let events = contract_events(&t.env, &t.client.address);
    let (last_topics, last_data) = events.last().cloned().expect("No events found");

    assert_eq!(last_topics, topics(&t.env, symbol_short!("contrib"), id));
    let event_data: ContributionMade = last_data.try_into_val(&t.env).unwrap();
    assert_eq!(
        event_data,
        ContributionMade {
            project_id: id,
            contributor: contributor.clone(),
            amount: UNIT,
            credits: 1_000,
            total_funds: UNIT,
        }
    );
}

#[test]
fn test_goal_reached_event_follows_crossing_contribution() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = funded_contributor(&t, 2 * GOAL);
    t.client.contribute(&id, &contributor, &GOAL);

    let events = contract_events(&t.env, &t.client.address);
    let n = events.len();
    assert!(n >= 2);
    assert_eq!(events[n - 2].0, topics(&t.env, symbol_short!("contrib"), id));
    assert_eq!(events[n - 1].0, topics(&t.env, symbol_short!("funded"), id));
    let event_data: GoalReached = events[n - 1].1.try_into_val(&t.env).unwrap();
    assert_eq!(
        event_data,
        GoalReached {
            project_id: id,
            total_funds: GOAL,
        }
    );

    // Further contributions do not announce the goal again.
    t.client.contribute(&id, &contributor, &UNIT);
    let events = contract_events(&t.env, &t.client.address);
    let funded = topics(&t.env, symbol_short!("funded"), id);
    assert!(events.iter().all(|(topics, _)| *topics != funded));
    let (last_topics, _) = events.last().cloned().expect("No events found");
    assert_eq!(last_topics, topics(&t.env, symbol_short!("contrib"), id));
}

#[test]
fn test_zero_contribution_emits_nothing() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = Address::generate(&t.env);

    t.client.contribute(&id, &contributor, &0);

    assert!(contract_events(&t.env, &t.client.address).is_empty());
}

#[test]
fn test_funds_claimed_event() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = funded_contributor(&t, GOAL);
    t.client.contribute(&id, &contributor, &GOAL);
    pass_deadline(&t.env);
    t.client.claim_funds(&id, &t.creator);

    let events = contract_events(&t.env, &t.client.address);
    let (last_topics, last_data) = events.last().cloned().expect("No events found");

    assert_eq!(last_topics, topics(&t.env, symbol_short!("claimed"), id));
    let event_data: FundsClaimed = last_data.try_into_val(&t.env).unwrap();
    assert_eq!(
        event_data,
        FundsClaimed {
            project_id: id,
            creator: t.creator.clone(),
            amount: GOAL,
        }
    );
}

#[test]
fn test_refund_issued_event() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = funded_contributor(&t, UNIT);
    t.client.contribute(&id, &contributor, &UNIT);
    pass_deadline(&t.env);
    t.client.claim_refund(&id, &contributor);

    let events = contract_events(&t.env, &t.client.address);
    let (last_topics, last_data) = events.last().cloned().expect("No events found");

    assert_eq!(last_topics, topics(&t.env, symbol_short!("refunded"), id));
    let event_data: RefundIssued = last_data.try_into_val(&t.env).unwrap();
    assert_eq!(
        event_data,
        RefundIssued {
            project_id: id,
            contributor: contributor.clone(),
            amount: UNIT,
        }
    );
}
