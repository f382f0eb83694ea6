use std::error::Error;
use std::fmt;
use std::panic::catch_unwind;

use outcome_rail::Defect;

#[derive(Debug)]
struct Outer(Inner);

#[derive(Debug)]
struct Inner;

impl fmt::Display for Outer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("request failed")
    }
}

impl fmt::Display for Inner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("connection reset")
    }
}

impl Error for Outer {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl Error for Inner {}

#[test]
fn from_panic_keeps_string_payloads() {
    let payload = catch_unwind(|| panic!("static message")).unwrap_err();
    assert_eq!(Defect::from_panic(&*payload).message(), "static message");

    let payload = catch_unwind(|| panic!("formatted {}", 42)).unwrap_err();
    assert_eq!(Defect::from_panic(&*payload).message(), "formatted 42");
}

#[test]
fn from_panic_with_opaque_payload() {
    let payload = catch_unwind(|| std::panic::panic_any(7_u32)).unwrap_err();

    assert_eq!(Defect::from_panic(&*payload).message(), "panic with a non-string payload");
}

#[test]
fn from_error_joins_source_chain() {
    let defect = Defect::from_error(&Outer(Inner));

    assert_eq!(defect.message(), "request failed: connection reset");
    assert_eq!(defect.to_string(), "request failed: connection reset");
}

#[test]
fn conversions_from_text() {
    assert_eq!(Defect::from("a"), Defect::new("a"));
    assert_eq!(Defect::from(String::from("b")).message(), "b");
}
