extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address,
};

use crate::invariants;
use crate::test::{
    create_project, funded_contributor, pass_deadline, setup, DAY, DURATION_DAYS, GOAL, UNIT,
};
use crate::{Error, ProjectStatus};

// ─────────────────────────────────────────────────────────
// Creator claims
// ─────────────────────────────────────────────────────────

#[test]
fn test_creator_claims_funds_after_deadline() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = funded_contributor(&t, GOAL);
    t.client.contribute(&id, &contributor, &GOAL);
    assert!(t.client.get_project(&id).funded);

    pass_deadline(&t.env);
    let before = t.token.balance(&t.creator);
    let paid = t.client.claim_funds(&id, &t.creator);

    assert_eq!(paid, GOAL);
    assert_eq!(t.token.balance(&t.creator) - before, GOAL);
    assert_eq!(t.token.balance(&t.client.address), 0);

    let project = t.client.get_project(&id);
    assert!(project.claimed);
    assert_eq!(project.status, ProjectStatus::Settled);
    invariants::assert_all_project_invariants(&project);
}

#[test]
fn test_second_claim_fails_already_claimed() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = funded_contributor(&t, GOAL);
    t.client.contribute(&id, &contributor, &GOAL);
    pass_deadline(&t.env);

    t.client.claim_funds(&id, &t.creator);
    assert_eq!(
        t.client.try_claim_funds(&id, &t.creator),
        Err(Ok(Error::AlreadyClaimed))
    );
    assert_eq!(t.token.balance(&t.creator), GOAL);
}

#[test]
fn test_claim_pays_full_overshoot() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let a = funded_contributor(&t, GOAL);
    let b = funded_contributor(&t, GOAL);
    t.client.contribute(&id, &a, &GOAL);
    t.client.contribute(&id, &b, &(3 * UNIT));
    pass_deadline(&t.env);

    assert_eq!(t.client.claim_funds(&id, &t.creator), GOAL + 3 * UNIT);
}

#[test]
fn test_non_creator_cannot_claim() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = funded_contributor(&t, GOAL);
    t.client.contribute(&id, &contributor, &GOAL);
    pass_deadline(&t.env);

    assert_eq!(
        t.client.try_claim_funds(&id, &contributor),
        Err(Ok(Error::Unauthorized))
    );
    assert!(!t.client.get_project(&id).claimed);
}

#[test]
fn test_claim_before_deadline_is_too_early() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = funded_contributor(&t, GOAL);
    t.client.contribute(&id, &contributor, &GOAL);

    let deadline = t.client.get_project(&id).deadline;
    t.env.ledger().set_timestamp(deadline - 1);
    assert_eq!(
        t.client.try_claim_funds(&id, &t.creator),
        Err(Ok(Error::TooEarly))
    );

    // The deadline itself is the first settleable instant.
    t.env.ledger().set_timestamp(deadline);
    assert_eq!(t.client.claim_funds(&id, &t.creator), GOAL);
}

#[test]
fn test_unfunded_project_cannot_be_claimed() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = funded_contributor(&t, UNIT);
    t.client.contribute(&id, &contributor, &UNIT);
    pass_deadline(&t.env);

    assert_eq!(
        t.client.try_claim_funds(&id, &t.creator),
        Err(Ok(Error::NotFunded))
    );
}

#[test]
fn test_claim_unknown_project_is_not_found() {
    let t = setup();
    assert_eq!(
        t.client.try_claim_funds(&3, &t.creator),
        Err(Ok(Error::NotFound))
    );
}

// ─────────────────────────────────────────────────────────
// Contributor refunds
// ─────────────────────────────────────────────────────────

#[test]
fn test_refund_when_goal_not_met() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = funded_contributor(&t, UNIT);
    t.client.contribute(&id, &contributor, &UNIT);
    assert_eq!(t.token.balance(&contributor), 0);

    pass_deadline(&t.env);
    assert_eq!(t.client.get_project(&id).status, ProjectStatus::Expired);

    let paid = t.client.claim_refund(&id, &contributor);
    assert_eq!(paid, UNIT);
    assert_eq!(t.token.balance(&contributor), UNIT);
    assert_eq!(t.client.get_contribution(&id, &contributor), 0);

    let project = t.client.get_project(&id);
    assert_eq!(project.total_funds, 0);
    assert_eq!(project.total_refunded, UNIT);
    assert_eq!(project.status, ProjectStatus::Settled);
    invariants::assert_all_project_invariants(&project);
}

#[test]
fn test_second_refund_fails_nothing_to_refund() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = funded_contributor(&t, UNIT);
    t.client.contribute(&id, &contributor, &UNIT);
    pass_deadline(&t.env);

    t.client.claim_refund(&id, &contributor);
    assert_eq!(
        t.client.try_claim_refund(&id, &contributor),
        Err(Ok(Error::NothingToRefund))
    );
    assert_eq!(t.token.balance(&contributor), UNIT);
}

#[test]
fn test_refund_only_touches_the_callers_record() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let a = funded_contributor(&t, 5 * UNIT);
    let b = funded_contributor(&t, 5 * UNIT);
    t.client.contribute(&id, &a, &(2 * UNIT));
    t.client.contribute(&id, &b, &(3 * UNIT));
    t.client.contribute(&id, &a, &UNIT);
    pass_deadline(&t.env);

    assert_eq!(t.client.claim_refund(&id, &a), 3 * UNIT);

    let project = t.client.get_project(&id);
    assert_eq!(t.client.get_contribution(&id, &a), 0);
    assert_eq!(t.client.get_contribution(&id, &b), 3 * UNIT);
    assert_eq!(project.total_funds, 3 * UNIT);
    assert_eq!(project.total_refunded, 3 * UNIT);
    assert_eq!(project.status, ProjectStatus::Expired);
    assert_eq!(t.token.balance(&t.client.address), 3 * UNIT);
    invariants::assert_total_matches_records(&project, &[0, 3 * UNIT]);

    assert_eq!(t.client.claim_refund(&id, &b), 3 * UNIT);
    assert_eq!(t.token.balance(&t.client.address), 0);
    let project = t.client.get_project(&id);
    assert_eq!(project.status, ProjectStatus::Settled);
    // Everything ever accepted is accounted for as live or refunded.
    assert_eq!(project.total_funds, 0);
    assert_eq!(project.total_funds + project.total_refunded, 6 * UNIT);
}

#[test]
fn test_refund_does_not_burn_reward_credits() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = funded_contributor(&t, UNIT);
    t.client.contribute(&id, &contributor, &UNIT);
    pass_deadline(&t.env);

    t.client.claim_refund(&id, &contributor);
    assert_eq!(t.client.balance_of(&id, &contributor), 1_000);
}

#[test]
fn test_refund_before_deadline_is_too_early() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = funded_contributor(&t, UNIT);
    t.client.contribute(&id, &contributor, &UNIT);

    t.env
        .ledger()
        .set_timestamp(DURATION_DAYS * DAY - 1);
    assert_eq!(
        t.client.try_claim_refund(&id, &contributor),
        Err(Ok(Error::TooEarly))
    );
}

#[test]
fn test_funded_project_rejects_refunds() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = funded_contributor(&t, GOAL);
    t.client.contribute(&id, &contributor, &GOAL);
    pass_deadline(&t.env);

    assert_eq!(
        t.client.try_claim_refund(&id, &contributor),
        Err(Ok(Error::Funded))
    );

    // Still rejected after the creator has settled.
    t.client.claim_funds(&id, &t.creator);
    assert_eq!(
        t.client.try_claim_refund(&id, &contributor),
        Err(Ok(Error::Funded))
    );
}

#[test]
fn test_non_contributor_has_nothing_to_refund() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let contributor = funded_contributor(&t, UNIT);
    t.client.contribute(&id, &contributor, &UNIT);
    pass_deadline(&t.env);

    let stranger = Address::generate(&t.env);
    assert_eq!(
        t.client.try_claim_refund(&id, &stranger),
        Err(Ok(Error::NothingToRefund))
    );
}

#[test]
fn test_refund_unknown_project_is_not_found() {
    let t = setup();
    let someone = Address::generate(&t.env);
    assert_eq!(
        t.client.try_claim_refund(&9, &someone),
        Err(Ok(Error::NotFound))
    );
}

// ─────────────────────────────────────────────────────────
// Settlement exclusivity
// ─────────────────────────────────────────────────────────

#[test]
fn test_expired_project_stays_unfunded_after_refunds() {
    let t = setup();
    let id = create_project(&t, GOAL);
    let a = funded_contributor(&t, GOAL);
    t.client.contribute(&id, &a, &UNIT);
    pass_deadline(&t.env);
    t.client.claim_refund(&id, &a);

    // Late money cannot flip the project to funded and unlock a claim.
    assert_eq!(
        t.client.try_contribute(&id, &a, &GOAL),
        Err(Ok(Error::DeadlinePassed))
    );
    assert_eq!(
        t.client.try_claim_funds(&id, &t.creator),
        Err(Ok(Error::NotFunded))
    );
    invariants::assert_all_project_invariants(&t.client.get_project(&id));
}

#[test]
fn test_settling_one_project_leaves_others_escrowed() {
    let t = setup();
    let funded = create_project(&t, GOAL);
    let failed = create_project(&t, GOAL);
    let a = funded_contributor(&t, GOAL);
    let b = funded_contributor(&t, UNIT);
    t.client.contribute(&funded, &a, &GOAL);
    t.client.contribute(&failed, &b, &UNIT);
    pass_deadline(&t.env);

    t.client.claim_funds(&funded, &t.creator);
    assert_eq!(t.token.balance(&t.client.address), UNIT);

    t.client.claim_refund(&failed, &b);
    assert_eq!(t.token.balance(&t.client.address), 0);
    assert_eq!(t.token.balance(&t.creator), GOAL);
    assert_eq!(t.token.balance(&b), UNIT);
}
