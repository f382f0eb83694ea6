use std::collections::BTreeMap;

use outcome_rail::{all, all_keyed, AsyncResult, Cause, Field};

#[test]
fn all_collects_results_and_plain_values_in_order() {
    let combined: AsyncResult<Vec<i32>, &str> = all([
        Field::from(AsyncResult::success(1)),
        Field::plain(2),
        AsyncResult::success(3).into(),
    ]);

    assert_eq!(combined.into_value(), Some(vec![1, 2, 3]));
}

#[test]
fn all_of_nothing_is_empty_success() {
    let combined: AsyncResult<Vec<i32>, &str> = all(Vec::<Field<i32, &str>>::new());

    assert_eq!(combined.value(), Some(&Vec::new()));
}

#[test]
fn all_returns_first_failure_verbatim() {
    let first = Cause::fail("first").both(Cause::die("boom"));
    let combined: AsyncResult<Vec<i32>, &str> = all([
        AsyncResult::success(1),
        AsyncResult::failure(first.clone()),
        AsyncResult::fail("second"),
    ]);

    assert_eq!(combined.cause(), Some(&first));
}

#[test]
fn all_stops_inspecting_after_failure() {
    let mut inspected = 0;
    let entries = (0..5).map(|i| {
        inspected += 1;
        if i == 1 {
            AsyncResult::<i32, &str>::interrupt()
        } else {
            AsyncResult::success(i)
        }
    });

    let combined: AsyncResult<Vec<i32>, &str> = all(entries);

    assert!(combined.is_interrupted());
    assert_eq!(inspected, 2);
}

#[test]
fn all_keyed_builds_a_map() {
    let mut entries = BTreeMap::new();
    entries.insert("name", Field::from(AsyncResult::<&str, ()>::success("ada")));
    entries.insert("role", Field::plain("admin"));

    let combined: AsyncResult<BTreeMap<&str, &str>, ()> = all_keyed(entries);
    let map = combined.into_value().unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map["name"], "ada");
    assert_eq!(map["role"], "admin");
}

#[test]
fn all_keyed_short_circuits_in_iteration_order() {
    let entries = vec![
        ("b", AsyncResult::<i32, &str>::fail("b failed")),
        ("a", AsyncResult::fail("a failed")),
    ];

    let combined: AsyncResult<BTreeMap<&str, i32>, &str> = all_keyed(entries);

    assert_eq!(combined.error(), Some(&"b failed"));
}

#[test]
fn collect_stops_at_first_failure() {
    let results = vec![AsyncResult::success(1), AsyncResult::fail("x"), AsyncResult::fail("y")];
    let collected: AsyncResult<Vec<i32>, &str> = results.into_iter().collect();

    assert_eq!(collected.error(), Some(&"x"));

    let collected: AsyncResult<Vec<i32>, &str> =
        (1..=3).map(AsyncResult::success).collect();
    assert_eq!(collected.into_value(), Some(vec![1, 2, 3]));
}

#[test]
fn results_iterate_as_zero_or_one_values() {
    let ok = AsyncResult::<i32, &str>::success(5);
    let err = AsyncResult::<i32, &str>::fail("x");

    assert_eq!((&ok).into_iter().count(), 1);
    assert_eq!(err.into_iter().next(), None);

    let total: i32 =
        [AsyncResult::<i32, &str>::success(2), AsyncResult::fail("x"), AsyncResult::success(3)]
            .into_iter()
            .flatten()
            .sum();
    assert_eq!(total, 5);
}
