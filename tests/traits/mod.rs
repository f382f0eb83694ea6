use std::num::ParseIntError;

use outcome_rail::traits::ResultExt;
use outcome_rail::AsyncResult;

#[test]
fn into_async_result_keeps_typed_error() {
    let parsed: AsyncResult<i32, ParseIntError> = "12".parse::<i32>().into_async_result();
    let failed: AsyncResult<i32, ParseIntError> = "x".parse::<i32>().into_async_result();

    assert_eq!(parsed.value(), Some(&12));
    assert!(failed.error().is_some());
    assert!(failed.defect().is_none());
}

#[test]
fn or_die_moves_error_out_of_typed_channel() {
    let failed: AsyncResult<i32, &str> = "x".parse::<i32>().or_die();

    assert!(failed.error().is_none());
    assert_eq!(
        failed.defect().map(|d| d.message().to_string()),
        Some("invalid digit found in string".to_string())
    );
}

#[test]
fn or_die_leaves_success_alone() {
    let parsed: AsyncResult<i32, ()> = "7".parse::<i32>().or_die();

    assert_eq!(parsed.into_value(), Some(7));
}
