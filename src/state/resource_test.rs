use super::*;

// =============================================================
// Envelope transitions
// =============================================================

#[test]
fn new_envelope_holds_initial_without_error_or_loading() {
    let state = ResourceState::new(Vec::<String>::new());
    assert!(state.resource.is_empty());
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn started_sets_loading_and_clears_error_but_keeps_value() {
    let mut state = ResourceState::new(vec!["kept".to_owned()]);
    state.apply_failure(ApiError::Network("x".to_owned()));
    state.apply_started();
    assert!(state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.resource, vec!["kept".to_owned()]);
}

#[test]
fn success_replaces_value_and_ends_loading() {
    let mut state = ResourceState::new(0_i32);
    state.apply_started();
    state.apply_success(7);
    assert_eq!(state.resource, 7);
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn failure_preserves_last_successful_value() {
    let mut state = ResourceState::new(0_i32);
    state.apply_success(7);
    state.apply_started();
    state.apply_failure(ApiError::Network("down".to_owned()));
    assert_eq!(state.resource, 7);
    assert!(!state.loading);
    assert_eq!(state.error, Some(ApiError::Network("down".to_owned())));
}

#[test]
fn error_and_loading_are_mutually_exclusive() {
    let mut state = ResourceState::new(());
    state.apply_started();
    state.apply_failure(ApiError::AuthenticationRequired);
    assert!(!state.loading);
    state.apply_started();
    assert!(state.error.is_none());
}

// =============================================================
// Commit policy
// =============================================================

#[test]
fn commit_success_updates_envelope() {
    let mut state = ResourceState::new(0_i32);
    let outcome = commit_result(&mut state, Ok(3));
    assert_eq!(outcome, CommitOutcome::Committed);
    assert_eq!(state.resource, 3);
}

#[test]
fn commit_unauthorized_demands_sign_out_and_surfaces_nothing() {
    let mut state = ResourceState::new(5_i32);
    state.apply_started();
    let outcome = commit_result(&mut state, Err(ApiError::Unauthorized));
    assert_eq!(outcome, CommitOutcome::SignedOut);
    // The envelope is left alone; the sign-out cascade handles the rest.
    assert_eq!(state.resource, 5);
    assert!(state.error.is_none());
}

#[test]
fn commit_aborted_changes_nothing() {
    let mut state = ResourceState::new(5_i32);
    state.apply_started();
    let outcome = commit_result(&mut state, Err(ApiError::Aborted));
    assert_eq!(outcome, CommitOutcome::Ignored);
    assert_eq!(state.resource, 5);
    assert!(state.error.is_none());
    assert!(state.loading);
}

#[test]
fn commit_other_failures_surface_with_value_preserved() {
    let mut state = ResourceState::new(5_i32);
    state.apply_started();
    let outcome = commit_result(&mut state, Err(ApiError::from_status(500, "boom".to_owned())));
    assert_eq!(outcome, CommitOutcome::Committed);
    assert_eq!(state.resource, 5);
    assert!(state.error.is_some());
}

// =============================================================
// Generations: only the latest attempt may commit
// =============================================================

#[test]
fn superseded_generation_is_no_longer_current() {
    let tracker = FetchGeneration::default();
    let first = tracker.next();
    assert!(tracker.is_current(first));
    let second = tracker.next();
    assert!(!tracker.is_current(first));
    assert!(tracker.is_current(second));
}

#[test]
fn out_of_order_resolution_commits_only_the_latest() {
    // Two attempts race; the older one resolves last and must be dropped.
    let tracker = FetchGeneration::default();
    let mut state = ResourceState::new(0_i32);

    let older = tracker.next();
    let newer = tracker.next();

    if tracker.is_current(newer) {
        let _ = commit_result(&mut state, Ok(2));
    }
    if tracker.is_current(older) {
        let _ = commit_result(&mut state, Ok(1));
    }
    assert_eq!(state.resource, 2);
}

#[test]
fn invalidate_supersedes_without_new_generation() {
    let tracker = FetchGeneration::default();
    let r#gen = tracker.next();
    tracker.invalidate();
    assert!(!tracker.is_current(r#gen));
}

// =============================================================
// Reload semantics (no flicker to initial)
// =============================================================

#[test]
fn reload_keeps_last_value_while_loading() {
    let mut state = ResourceState::new(Vec::<i32>::new());
    state.apply_success(vec![1, 2, 3]);
    // reload re-runs the fetch; the visible value must not reset.
    state.apply_started();
    assert!(state.loading);
    assert_eq!(state.resource, vec![1, 2, 3]);
    state.apply_success(vec![4]);
    assert_eq!(state.resource, vec![4]);
}

// =============================================================
// Optimistic updates
// =============================================================

#[test]
fn set_resource_behaves_as_a_success_commit() {
    // `ResourceBinding::set_resource` feeds a mutation response straight
    // into the envelope; it must look exactly like a fetch success.
    let mut state = ResourceState::new(0_i32);
    state.apply_failure(ApiError::Network("old".to_owned()));
    state.apply_success(42);
    assert_eq!(state.resource, 42);
    assert!(!state.loading);
    assert!(state.error.is_none());
}
