use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};

use outcome_rail::{tagged_error, AsyncResult, Cause, UnmatchedFailure};

tagged_error! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum ApiError {
        NotFound { id: u64 },
        Unauthorized,
        RateLimited(u32),
    }
}

type ApiResult = AsyncResult<String, ApiError>;

#[test]
fn on_success_receives_value_and_result() {
    let result = ApiResult::success("ada".into());

    let output = result
        .builder()
        .on_success(|name, whole| format!("{} ({})", name, whole.is_success()))
        .or_else(String::new);

    assert_eq!(output, "ada (true)");
}

#[test]
fn first_matching_clause_wins() {
    let result = ApiResult::fail(ApiError::Unauthorized);
    let later_called = Cell::new(false);

    let output = result
        .builder()
        .on_success(|_, _| "success")
        .on_error(|_, _| "first")
        .on_error_tag("Unauthorized", |_, _| {
            later_called.set(true);
            "second"
        })
        .on_failure(|_, _| "third")
        .or_else(|| "fallback");

    assert_eq!(output, "first");
    assert!(!later_called.get());
}

#[test]
fn repeated_on_error_runs_only_the_first_handler() {
    let result = ApiResult::fail(ApiError::NotFound { id: 3 });
    let first_called = Cell::new(false);
    let second_called = Cell::new(false);
    let fallback_called = Cell::new(false);

    let output = result
        .builder()
        .on_error(|_, _| {
            first_called.set(true);
            "first"
        })
        .on_error(|_, _| {
            second_called.set(true);
            "second"
        })
        .or_else(|| {
            fallback_called.set(true);
            "fallback"
        });

    assert_eq!(output, "first");
    assert!(first_called.get());
    assert!(!second_called.get());
    assert!(!fallback_called.get());
}

#[test]
fn matched_tag_runs_only_its_own_handler() {
    let result = ApiResult::fail(ApiError::NotFound { id: 3 });
    let not_found_called = Cell::new(false);
    let unauthorized_called = Cell::new(false);
    let fallback_called = Cell::new(false);

    let output = result
        .builder()
        .on_error_tag("NotFound", |_, _| {
            not_found_called.set(true);
            404
        })
        .on_error_tag("Unauthorized", |_, _| {
            unauthorized_called.set(true);
            401
        })
        .or_else(|| {
            fallback_called.set(true);
            500
        });

    assert_eq!(output, 404);
    assert!(not_found_called.get());
    assert!(!unauthorized_called.get());
    assert!(!fallback_called.get());
}

#[test]
fn non_matching_clauses_are_skipped() {
    let result = ApiResult::fail(ApiError::RateLimited(30));

    let output = result
        .builder()
        .on_success(|_, _| 0)
        .on_error_tag("NotFound", |_, _| 1)
        .on_error_if(|e| matches!(e, ApiError::RateLimited(s) if *s > 60), |_, _| 2)
        .on_error_if(|e| matches!(e, ApiError::RateLimited(_)), |_, _| 3)
        .or_else(|| 4);

    assert_eq!(output, 3);
}

#[test]
fn or_else_fallback_is_lazy() {
    let result = ApiResult::success("x".into());
    let fallback_called = Cell::new(false);

    let output = result
        .builder()
        .on_success(|v, _| v.len())
        .or_else(|| {
            fallback_called.set(true);
            0
        });

    assert_eq!(output, 1);
    assert!(!fallback_called.get());
}

#[test]
fn or_none_reports_unmatched() {
    let result = ApiResult::fail(ApiError::NotFound { id: 1 });

    assert_eq!(result.builder::<u8>().on_success(|_, _| 1).or_none(), None);
    assert_eq!(result.builder().on_error(|_, _| 2).or_none(), Some(2));
}

#[test]
fn on_error_tag_passes_the_error() {
    let result = ApiResult::fail(ApiError::NotFound { id: 42 });

    let id = result
        .builder()
        .on_error_tag("NotFound", |e, _| match e {
            ApiError::NotFound { id } => *id,
            _ => 0,
        })
        .or_else(|| 0);

    assert_eq!(id, 42);
}

#[test]
fn on_error_tags_matches_any_listed_tag() {
    let result = ApiResult::fail(ApiError::RateLimited(5));

    let retry = result
        .builder()
        .on_error_tags(&["RateLimited", "Unauthorized"], |_, _| true)
        .or_else(|| false);

    assert!(retry);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "`Unauthorised` is not a tag of")]
fn misspelled_tag_in_a_tag_list_is_caught() {
    let result = ApiResult::fail(ApiError::RateLimited(5));

    let _ = result
        .builder()
        .on_error_tags(&["RateLimited", "Unauthorised"], |_, _| true)
        .or_else(|| false);
}

#[test]
fn on_error_some_hands_over_refined_value() {
    let result = ApiResult::fail(ApiError::RateLimited(30));

    let wait = result
        .builder()
        .on_error_some(
            |e| match e {
                ApiError::RateLimited(seconds) => Some(*seconds),
                _ => None,
            },
            |seconds, _| seconds * 1_000,
        )
        .or_else(|| 0);

    assert_eq!(wait, 30_000);
}

#[test]
fn on_error_skips_interrupts_and_defects() {
    let interrupted = ApiResult::interrupt();
    let died = ApiResult::die("null");

    assert_eq!(interrupted.builder().on_error(|_, _| "error").or_none(), None);
    assert_eq!(died.builder().on_error(|_, _| "error").or_none(), None);
}

#[test]
fn on_interrupt_fires_for_pure_interruption_only() {
    let interrupted = ApiResult::interrupt();
    let mixed = ApiResult::failure(Cause::interrupt().then(Cause::fail(ApiError::Unauthorized)));

    assert_eq!(interrupted.builder().on_interrupt(|_| "cancelled").or_none(), Some("cancelled"));
    assert_eq!(mixed.builder().on_interrupt(|_| "cancelled").or_none(), None);
}

#[test]
fn on_defect_receives_the_defect() {
    let died = ApiResult::die("pool exhausted");

    let message = died
        .builder()
        .on_error(|_, _| String::from("typed"))
        .on_defect(|d, _| d.message().to_string())
        .or_else(String::new);

    assert_eq!(message, "pool exhausted");
}

#[test]
fn clause_order_decides_mixed_causes() {
    let mixed = ApiResult::failure(Cause::fail(ApiError::Unauthorized).both(Cause::die("boom")));

    assert_eq!(
        mixed.builder().on_defect(|_, _| "defect").on_error(|_, _| "error").or_none(),
        Some("defect")
    );
    assert_eq!(
        mixed.builder().on_error(|_, _| "error").on_defect(|_, _| "defect").or_none(),
        Some("error")
    );
}

#[test]
fn on_failure_sees_full_cause() {
    let result = ApiResult::failure(Cause::fail(ApiError::Unauthorized).then(Cause::interrupt()));

    let leaves = result.builder().on_failure(|cause, _| cause.leaves().count()).or_else(|| 0);

    assert_eq!(leaves, 2);
}

#[test]
fn builder_does_not_consume_the_result() {
    let result = ApiResult::success("kept".into());

    let first = result.builder().on_success(|v, _| v.clone()).or_none();
    let second = result.builder().on_success(|v, _| v.len()).or_none();

    assert_eq!(first.as_deref(), Some("kept"));
    assert_eq!(second, Some(4));
    assert_eq!(result.value().map(String::as_str), Some("kept"));
}

#[test]
fn is_matched_tracks_output_slot() {
    let result = ApiResult::success("x".into());

    let chain = result.builder::<()>();
    assert!(!chain.is_matched());
    let chain = chain.on_success(|_, _| ());
    assert!(chain.is_matched());
    assert!(chain.result().is_success());
}

#[test]
fn coverage_lists_unhandled_tags() {
    let result = ApiResult::fail(ApiError::Unauthorized);

    let chain = result
        .builder::<&str>()
        .on_error_tag("NotFound", |_, _| "missing")
        .on_error_tag("Unauthorized", |_, _| "login");

    assert_eq!(chain.remaining_tags().as_slice(), &["RateLimited"]);
    assert!(!chain.is_exhaustive());

    let chain = chain.on_error_tag("RateLimited", |_, _| "slow down");
    assert!(chain.is_exhaustive());
    assert_eq!(chain.or_none(), Some("login"));
}

#[test]
fn coverage_does_not_depend_on_the_result() {
    let result = ApiResult::success("ok".into());

    let chain = result
        .builder::<()>()
        .on_error_tags(&["NotFound", "Unauthorized", "RateLimited"], |_, _| ());

    assert!(chain.is_exhaustive());
}

#[test]
fn catch_all_clauses_cover_everything() {
    let result = ApiResult::fail(ApiError::Unauthorized);

    assert!(result.builder::<()>().on_error(|_, _| ()).is_exhaustive());
    assert!(result.builder::<()>().on_failure(|_, _| ()).is_exhaustive());
    assert!(!result.builder::<()>().on_error_if(|_| true, |_, _| ()).is_exhaustive());
}

#[test]
fn render_returns_matched_output() {
    let result = ApiResult::fail(ApiError::NotFound { id: 3 });

    assert_eq!(result.builder().on_error_tag("NotFound", |_, _| 404).render(), Some(404));
}

#[test]
fn render_of_unmatched_success_is_none() {
    let result = ApiResult::success("x".into());

    assert_eq!(result.builder::<i32>().on_error(|_, _| 1).render(), None);
}

#[test]
fn render_panics_with_unmatched_cause() {
    let result = ApiResult::fail(ApiError::RateLimited(1));

    let payload = catch_unwind(AssertUnwindSafe(|| {
        result.builder::<i32>().on_error_tag("NotFound", |_, _| 404).render()
    }))
    .unwrap_err();

    let unmatched = payload.downcast_ref::<UnmatchedFailure<ApiError>>().unwrap();
    assert_eq!(unmatched.cause(), &Cause::fail(ApiError::RateLimited(1)));
}

#[test]
fn try_render_returns_unmatched_as_error() {
    let result = ApiResult::interrupt();

    let unmatched = result.builder::<()>().on_success(|_, _| ()).try_render().unwrap_err();

    assert!(unmatched.cause().is_interrupted_only());
    assert_eq!(unmatched.into_cause(), Cause::interrupt());
}
