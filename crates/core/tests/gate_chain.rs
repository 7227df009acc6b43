//! Protected route entry through the route and subscription gates.

mod support;

use std::sync::Arc;
use std::time::Duration;

use support::{
    path, RecordingNavigator, ScriptedAuth, ScriptedProfileChecker, ScriptedSubscription,
};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use waypoint_common::testing::timeout_ok;
use waypoint_core::{GateChain, GateOutcome, RouteGate, SubscriptionGate};
use waypoint_domain::{AuthSnapshot, DecisionId, Identity, RedirectOptions, RenderDecision};

const GATE_DEADLINE: Duration = Duration::from_millis(4000);

struct Harness {
    auth: Arc<ScriptedAuth>,
    subscription: Arc<ScriptedSubscription>,
    navigator: Arc<RecordingNavigator>,
    chain: GateChain,
}

fn harness(
    auth: Arc<ScriptedAuth>,
    profiles: Arc<ScriptedProfileChecker>,
    subscription: Arc<ScriptedSubscription>,
) -> Harness {
    let navigator = Arc::new(RecordingNavigator::default());
    let route_gate =
        RouteGate::new(auth.clone(), profiles).with_hard_deadline(GATE_DEADLINE);
    let subscription_gate =
        SubscriptionGate::new(auth.clone(), subscription.clone()).with_deadline(GATE_DEADLINE);
    let chain = GateChain::new(navigator.clone())
        .with_gate(Arc::new(route_gate))
        .with_gate(Arc::new(subscription_gate));

    Harness { auth, subscription, navigator, chain }
}

#[tokio::test(start_paused = true)]
async fn absent_identity_redirects_to_login() {
    let h = harness(
        ScriptedAuth::signed_out(),
        ScriptedProfileChecker::complete(),
        ScriptedSubscription::expired_unpaid(),
    );

    let outcome = h.chain.enter(path("/app/home")).await;

    assert_eq!(outcome.decision, RenderDecision::Redirect(path("/login")));
    assert_eq!(outcome.deciding_gate, Some("route"));
    assert_eq!(h.navigator.calls(), vec![(path("/login"), RedirectOptions::replace())]);
    assert_eq!(h.subscription.start_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn incomplete_profile_is_steered_to_setup() {
    let h = harness(
        ScriptedAuth::signed_in("u-1"),
        ScriptedProfileChecker::incomplete(),
        ScriptedSubscription::within_trial(),
    );

    let outcome = h.chain.enter(path("/app/settings")).await;

    assert_eq!(outcome.decision, RenderDecision::Redirect(path("/setup-profile")));
    assert_eq!(h.navigator.paths(), vec!["/setup-profile"]);
}

#[tokio::test(start_paused = true)]
async fn incomplete_profile_may_stay_on_setup() {
    let h = harness(
        ScriptedAuth::signed_in("u-1"),
        ScriptedProfileChecker::incomplete(),
        ScriptedSubscription::expired_unpaid(),
    );

    let outcome = h.chain.enter(path("/setup-profile")).await;

    assert_eq!(outcome.decision, RenderDecision::ShowContent);
    assert_eq!(h.navigator.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn complete_profile_leaves_setup_for_home() {
    let h = harness(
        ScriptedAuth::signed_in("u-1"),
        ScriptedProfileChecker::complete(),
        ScriptedSubscription::within_trial(),
    );

    let outcome = h.chain.enter(path("/setup-profile")).await;

    assert_eq!(outcome.decision, RenderDecision::Redirect(path("/app/home")));
    assert_eq!(h.navigator.paths(), vec!["/app/home"]);
}

#[tokio::test(start_paused = true)]
async fn failed_profile_check_matches_complete_profile() {
    let mut outcomes: Vec<GateOutcome> = Vec::new();
    let mut navigations = Vec::new();

    for profiles in [ScriptedProfileChecker::complete(), ScriptedProfileChecker::failing()] {
        for entry in ["/app/home", "/setup-profile"] {
            let h = harness(
                ScriptedAuth::signed_in("u-1"),
                profiles.clone(),
                ScriptedSubscription::within_trial(),
            );
            outcomes.push(h.chain.enter(path(entry)).await);
            navigations.push(h.navigator.paths());
        }
    }

    let decisions: Vec<_> = outcomes.iter().map(|outcome| outcome.decision.clone()).collect();
    assert_eq!(decisions[..2], decisions[2..]);
    assert_eq!(navigations[..2], navigations[2..]);
}

#[tokio::test(start_paused = true)]
async fn stalled_auth_forces_login_at_gate_deadline() {
    let h = harness(
        ScriptedAuth::loading(),
        ScriptedProfileChecker::complete(),
        ScriptedSubscription::within_trial(),
    );

    let started = tokio::time::Instant::now();
    let outcome = h.chain.enter(path("/app/home")).await;

    let waited = started.elapsed();
    assert!(waited >= GATE_DEADLINE && waited < GATE_DEADLINE + Duration::from_millis(5));
    assert_eq!(outcome.decision, RenderDecision::Redirect(path("/login")));
    assert_eq!(h.navigator.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn stalled_profile_check_renders_content_optimistically() {
    let h = harness(
        ScriptedAuth::signed_in("u-1"),
        ScriptedProfileChecker::stalled(),
        ScriptedSubscription::within_trial(),
    );

    let gate = RouteGate::new(h.auth.clone(), ScriptedProfileChecker::stalled())
        .with_hard_deadline(GATE_DEADLINE);
    assert_eq!(
        gate.check(DecisionId::new()).await,
        waypoint_core::GateState::Forced { identity_known: true }
    );

    let outcome = h.chain.enter(path("/app/home")).await;

    assert_eq!(outcome.decision, RenderDecision::ShowContent);
    assert_eq!(h.navigator.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn stalled_refresh_with_known_identity_renders_content() {
    let h = harness(
        ScriptedAuth::refreshing("u-1"),
        ScriptedProfileChecker::complete(),
        ScriptedSubscription::within_trial(),
    );

    let started = tokio::time::Instant::now();
    let entry = h.chain.enter(path("/app/home"));
    let outcome = timeout_ok(GATE_DEADLINE + Duration::from_millis(5), entry)
        .await
        .expect("gate chain decides by its deadline");

    assert!(started.elapsed() >= GATE_DEADLINE);
    assert_eq!(outcome.decision, RenderDecision::ShowContent);
    assert_eq!(outcome.deciding_gate, None);
    assert_eq!(h.navigator.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn public_entry_does_not_start_the_trial() {
    let h = harness(
        ScriptedAuth::signed_in("u-1"),
        ScriptedProfileChecker::complete(),
        ScriptedSubscription::expired_unpaid(),
    );

    let outcome = timeout_ok(Duration::from_millis(5), h.chain.enter(path("/pricing")))
        .await
        .expect("public entry is decided without waiting");

    assert_eq!(outcome.decision, RenderDecision::ShowContent);
    assert_eq!(h.subscription.start_calls(), 0);
    assert!(h.subscription.started_users().is_empty());
    assert_eq!(h.navigator.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn expired_unpaid_user_is_sent_to_paywall() {
    let h = harness(
        ScriptedAuth::signed_in("u-1"),
        ScriptedProfileChecker::complete(),
        ScriptedSubscription::expired_unpaid(),
    );

    let outcome = h.chain.enter(path("/app/home")).await;

    assert_eq!(outcome.decision, RenderDecision::Redirect(path("/app/subscribe")));
    assert_eq!(outcome.deciding_gate, Some("subscription"));
    assert!(!outcome.suppressed_loop);
}

#[tokio::test(start_paused = true)]
async fn paywall_entry_is_not_redirected_to_itself() {
    let h = harness(
        ScriptedAuth::signed_in("u-1"),
        ScriptedProfileChecker::complete(),
        ScriptedSubscription::expired_unpaid(),
    );

    let outcome = h.chain.enter(path("/app/subscribe")).await;

    assert_eq!(outcome.decision, RenderDecision::ShowContent);
    assert!(outcome.suppressed_loop);
    assert_eq!(outcome.deciding_gate, Some("subscription"));
    assert_eq!(h.navigator.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn paid_or_unavailable_subscription_lets_user_through() {
    let paid = harness(
        ScriptedAuth::signed_in("u-1"),
        ScriptedProfileChecker::complete(),
        ScriptedSubscription::expired_paid(),
    );
    assert_eq!(paid.chain.enter(path("/app/home")).await.decision, RenderDecision::ShowContent);

    let offline = harness(
        ScriptedAuth::signed_in("u-1"),
        ScriptedProfileChecker::complete(),
        ScriptedSubscription::expired_unpaid(),
    );
    offline.subscription.set_unavailable(true);
    let outcome = offline.chain.enter(path("/app/home")).await;
    assert_eq!(outcome.decision, RenderDecision::ShowContent);
    assert_eq!(offline.navigator.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn every_entry_starts_the_trial_once_per_user() {
    let h = harness(
        ScriptedAuth::signed_in("u-1"),
        ScriptedProfileChecker::complete(),
        ScriptedSubscription::within_trial(),
    );

    h.chain.enter(path("/app/home")).await;
    h.chain.enter(path("/app/settings")).await;

    assert_eq!(h.subscription.start_calls(), 2);
    assert_eq!(h.subscription.started_users(), vec!["u-1".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn subscription_gate_alone_suppresses_paywall_loop() {
    let auth = ScriptedAuth::signed_in("u-1");
    let navigator = Arc::new(RecordingNavigator::default());
    let gate = SubscriptionGate::new(auth, ScriptedSubscription::expired_unpaid());
    let chain = GateChain::single(Arc::new(gate), navigator.clone());

    assert_eq!(chain.gate_names(), vec!["subscription"]);
    let outcome = chain.enter(path("/app/subscribe")).await;

    assert_eq!(outcome.decision, RenderDecision::ShowContent);
    assert_eq!(navigator.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn unmount_before_commit_issues_no_navigation() {
    let h = harness(
        ScriptedAuth::loading(),
        ScriptedProfileChecker::complete(),
        ScriptedSubscription::within_trial(),
    );

    let token = CancellationToken::new();
    let unmount = token.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(250)).await;
        unmount.cancel();
    });

    assert!(h.chain.enter_until(path("/app/home"), &token).await.is_none());

    h.auth.set(AuthSnapshot::signed_in(Identity::new("u-1")));
    sleep(Duration::from_secs(10)).await;
    assert_eq!(h.navigator.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn each_entry_is_its_own_decision_point() {
    let h = harness(
        ScriptedAuth::signed_out(),
        ScriptedProfileChecker::complete(),
        ScriptedSubscription::within_trial(),
    );

    let first = h.chain.enter(path("/app/home")).await;
    let second = h.chain.enter(path("/app/settings")).await;

    assert_ne!(first.decision_id, second.decision_id);
    assert_eq!(h.navigator.paths(), vec!["/login", "/login"]);
}
