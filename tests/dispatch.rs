//! Dispatch semantics: first-match-wins ordering, optional groups,
//! no-match silence, failure recovery.

mod common;

use common::{failing_action, recording_action};
use repobot::routing::{DispatchOutcome, IncomingMessage, RegistryError, Router, RuleRegistry};

#[tokio::test]
async fn repeated_dispatch_selects_the_same_rule() {
    let (a, _) = recording_action("a");
    let (b, _) = recording_action("b");
    let router = Router::builder()
        .rule(r"deploy (?<app>\S+)", "deploy_specific", "", a)
        .unwrap()
        .rule(r"deploy .+", "deploy_broad", "", b)
        .unwrap()
        .build();

    for _ in 0..10 {
        let outcome = router
            .dispatch(&IncomingMessage::new("deploy api", "tester"))
            .await;
        let DispatchOutcome::Handled { rule, .. } = outcome else {
            panic!("expected a match");
        };
        assert_eq!(rule, "deploy_specific");
    }
}

#[tokio::test]
async fn earlier_registration_wins_for_ambiguous_input() {
    let (first, first_state) = recording_action("first");
    let (second, second_state) = recording_action("second");
    let router = Router::builder()
        .rule(r"restart (?<service>.+)", "r1", "", first)
        .unwrap()
        .rule(r"restart web", "r2", "", second)
        .unwrap()
        .build();

    let outcome = router
        .dispatch(&IncomingMessage::new("restart web", "tester"))
        .await;
    assert!(matches!(
        outcome,
        DispatchOutcome::Handled { ref rule, .. } if rule == "r1"
    ));
    assert_eq!(first_state.hit_count(), 1);
    assert_eq!(second_state.hit_count(), 0);
}

#[tokio::test]
async fn omitted_optional_group_is_absent_not_empty() {
    let (action, state) = recording_action("ok");
    let router = Router::builder()
        .rule(
            r#"create issue "(?<title>.+)" on (?<repo>.+)(?:\n(?<description>.+))?"#,
            "create_issue",
            "",
            action,
        )
        .unwrap()
        .build();

    let outcome = router
        .dispatch(&IncomingMessage::new(
            "create issue \"Bug\" on org/repo\nSteps to reproduce...",
            "tester",
        ))
        .await;
    assert!(matches!(outcome, DispatchOutcome::Handled { .. }));
    let call = state.last_call().unwrap();
    assert_eq!(call.get("title").map(String::as_str), Some("Bug"));
    assert_eq!(call.get("repo").map(String::as_str), Some("org/repo"));
    assert_eq!(
        call.get("description").map(String::as_str),
        Some("Steps to reproduce...")
    );

    let outcome = router
        .dispatch(&IncomingMessage::new(
            "create issue \"Bug\" on org/repo",
            "tester",
        ))
        .await;
    assert!(matches!(outcome, DispatchOutcome::Handled { .. }));
    let call = state.last_call().unwrap();
    assert_eq!(call.get("title").map(String::as_str), Some("Bug"));
    assert_eq!(call.get("repo").map(String::as_str), Some("org/repo"));
    assert!(!call.contains_key("description"));
}

#[tokio::test]
async fn unmatched_message_is_silent_and_invokes_nothing() {
    let (a, a_state) = recording_action("a");
    let (b, b_state) = recording_action("b");
    let router = Router::builder()
        .rule(r"ping\z", "ping", "", a)
        .unwrap()
        .rule(r"pong\z", "pong", "", b)
        .unwrap()
        .build();

    let outcome = router
        .dispatch(&IncomingMessage::new("entirely unrelated chatter", "tester"))
        .await;
    assert!(matches!(outcome, DispatchOutcome::NoMatch));
    assert_eq!(a_state.hit_count(), 0);
    assert_eq!(b_state.hit_count(), 0);
}

#[test]
fn duplicate_names_are_rejected_without_mutation() {
    let mut registry = RuleRegistry::new();
    registry.register(r"close #(?<number>\d+)", "close_issue", "").unwrap();

    let err = registry
        .register(r"shut #(?<number>\d+)", "close_issue", "")
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateName { .. }));
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn close_goes_to_close_and_never_to_merge() {
    let (close, close_state) = recording_action("closed");
    let (merge, merge_state) = recording_action("merged");
    let router = Router::builder()
        .rule(r"close #(?<number>\d+)", "close_issue", "", close)
        .unwrap()
        .rule(r"merge #(?<number>\d+)", "merge_pull_request", "", merge)
        .unwrap()
        .build();

    let outcome = router
        .dispatch(&IncomingMessage::new("close #42", "tester"))
        .await;
    let DispatchOutcome::Handled { rule, reply } = outcome else {
        panic!("expected handled");
    };
    assert_eq!(rule, "close_issue");
    assert_eq!(reply.as_deref(), Some("closed"));

    assert_eq!(close_state.hit_count(), 1);
    assert_eq!(merge_state.hit_count(), 0);
    let call = close_state.last_call().unwrap();
    assert_eq!(call.get("number").map(String::as_str), Some("42"));
}

#[tokio::test]
async fn action_failure_is_surfaced_and_serving_continues() {
    let (ok, ok_state) = recording_action("fine");
    let router = Router::builder()
        .rule(r"report\z", "report", "", failing_action("tracker unreachable"))
        .unwrap()
        .rule(r"status\z", "status", "", ok)
        .unwrap()
        .build();

    let outcome = router
        .dispatch(&IncomingMessage::new("report", "tester"))
        .await;
    let DispatchOutcome::Failed { rule, error } = outcome else {
        panic!("expected failure");
    };
    assert_eq!(rule, "report");
    assert_eq!(error.to_string(), "tracker unreachable");

    let outcome = router
        .dispatch(&IncomingMessage::new("status", "tester"))
        .await;
    assert!(matches!(outcome, DispatchOutcome::Handled { .. }));
    assert_eq!(ok_state.hit_count(), 1);
}
