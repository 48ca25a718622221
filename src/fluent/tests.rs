//! Tests for the fluent assertion API.

use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::entries;
use crate::representation::Representation;
use crate::soft::SoftAssertions;

#[test]
fn test_equality() {
    assert_that(&4).is_equal_to(&4);
    assert_that(&4).is_not_equal_to(&5);
    assert_that("abc").is_equal_to("abc");
}

#[test]
#[should_panic(expected = "expected 4 to equal 5")]
fn test_equality_fails() {
    assert_that(&4).is_equal_to(&5);
}

#[test]
#[should_panic(expected = "expected 4 to differ from 4")]
fn test_inequality_fails() {
    assert_that(&4).is_not_equal_to(&4);
}

#[test]
fn test_ordering() {
    assert_that(&4)
        .is_less_than(&5)
        .is_at_most(&4)
        .is_greater_than(&3)
        .is_at_least(&4)
        .is_between(&1, &10);
}

#[test]
#[should_panic(expected = "expected 4 to be less than 3")]
fn test_ordering_fails() {
    assert_that(&4).is_less_than(&3);
}

#[test]
#[should_panic(expected = "expected 11 to be between 1 and 10")]
fn test_between_fails() {
    assert_that(&11).is_between(&1, &10);
}

#[test]
fn test_satisfies() {
    assert_that(&10).satisfies("an even number", |n| *n % 2 == 0);
}

#[test]
#[should_panic(expected = "expected 7 to satisfy: an even number")]
fn test_satisfies_fails() {
    assert_that(&7).satisfies("an even number", |n| *n % 2 == 0);
}

#[test]
fn test_string_predicates() {
    assert_that("hello world")
        .is_not_empty()
        .has_length(11)
        .starts_with("hello")
        .ends_with("world")
        .contains("lo wo")
        .does_not_contain("xyz");
}

#[test]
#[should_panic(expected = "expected \"abc\" to start with \"x\"")]
fn test_starts_with_fails() {
    assert_that("abc").starts_with("x");
}

#[test]
#[should_panic(expected = "expected \"abc\" to have length 5, got 3")]
fn test_has_length_fails() {
    assert_that("abc").has_length(5);
}

#[cfg(feature = "regex")]
#[test]
fn test_regex_matching() {
    assert_that("v1.42").matches(r"^v\d+\.\d+$");
    assert_that("all good").does_not_match(r"error|fail");
}

#[cfg(feature = "regex")]
#[test]
#[should_panic(expected = "invalid pattern")]
fn test_invalid_regex_is_a_contract_violation() {
    assert_that("abc").matches("(unclosed");
}

#[test]
fn test_glob_matching() {
    assert_that("notes.txt").matches_glob("*.txt");
    assert_that("src/config.json").matches_value("**/config.json");
}

#[test]
fn test_string_navigation() {
    assert_that("hello").length().is_equal_to(5_usize).is_less_than(10_usize);
    assert_that("  padded  ").trimmed().is_equal_to("padded");
}

#[test]
fn test_string_bridge() {
    let owned = "hello".to_string();
    assert_that(&owned).as_str().starts_with("he");
}

#[test]
fn test_slice_predicates() {
    let values = vec![1, 2, 3];
    assert_that(values.as_slice())
        .is_not_empty()
        .has_size(3)
        .contains(&2)
        .does_not_contain(&9)
        .contains_exactly(&[1, 2, 3]);
}

#[test]
#[should_panic(expected = "expected [1, 2] to have size 3, got 2")]
fn test_slice_size_fails() {
    assert_that(&[1, 2][..]).has_size(3);
}

#[test]
fn test_slice_navigation() {
    let values = vec![10, 20, 30];
    assert_that(values.as_slice())
        .element(1)
        .is_equal_to(&20);
    assert_that(values.as_slice()).size().is_equal_to(3_usize);
    assert_that(&values).as_slice().contains(&10);
}

#[test]
#[should_panic(expected = "element index 5 is out of bounds for length 3")]
fn test_element_out_of_bounds_is_a_contract_violation() {
    let values = vec![10, 20, 30];
    assert_that(values.as_slice()).element(5);
}

#[test]
fn test_map_predicates() {
    let map = entries! {
        "host" => "localhost",
        "port" => "5432",
    };
    assert_that(&map)
        .has_size(2)
        .contains_key(&"host")
        .does_not_contain_key(&"user")
        .contains_entry(&"port", &"5432");
}

#[test]
fn test_map_navigation() {
    let map = entries! {
        "host" => "localhost",
    };
    assert_that(&map).value_for(&"host").is_equal_to(&"localhost");
}

#[test]
#[should_panic(expected = "cannot navigate into \"user\": no value is present")]
fn test_missing_key_is_a_contract_violation() {
    let map = entries! {
        "host" => "localhost",
    };
    assert_that(&map).value_for(&"user");
}

#[test]
fn test_option_predicates() {
    let present = Some(7);
    let absent: Option<i32> = None;
    assert_that(&present).is_some().some_value().is_equal_to(&7);
    assert_that(&absent).is_none();
}

#[test]
#[should_panic(expected = "no value is present")]
fn test_navigating_into_none_is_a_contract_violation() {
    let absent: Option<i32> = None;
    assert_that(&absent).some_value();
}

#[test]
#[should_panic(expected = "[retry count] expected 2 to equal 3")]
fn test_description_prefixes_failure() {
    assert_that(&2).described_as("retry count").is_equal_to(&3);
}

#[test]
fn test_lazy_description_not_rendered_on_success() {
    let rendered = Rc::new(Cell::new(false));
    let flag = Rc::clone(&rendered);
    assert_that(&2)
        .described_as_with(move || {
            flag.set(true);
            "expensive".to_string()
        })
        .is_equal_to(&2);
    assert!(!rendered.get());
}

#[test]
fn test_lazy_description_rendered_on_failure() {
    let rendered = Rc::new(Cell::new(false));
    let flag = Rc::clone(&rendered);
    let soft = SoftAssertions::new();
    soft.assert_that(&2)
        .described_as_with(move || {
            flag.set(true);
            "expensive".to_string()
        })
        .is_equal_to(&3);
    assert!(rendered.get());
    assert!(soft.failure_messages()[0].starts_with("[expensive]"));
}

#[test]
#[should_panic(expected = "counts were off")]
fn test_fail_message_override() {
    assert_that(&2).with_fail_message("counts were off").is_equal_to(&3);
}

#[test]
fn test_fail_message_applies_to_next_predicate_only() {
    let soft = SoftAssertions::new();
    soft.assert_that(&2)
        .with_fail_message("counts were off")
        .is_equal_to(&2) // passes, consumes the override
        .is_equal_to(&3); // fails with the default message
    let messages = soft.failure_messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0], "expected 2 to equal 3");
}

#[test]
fn test_description_carries_into_navigation() {
    let soft = SoftAssertions::new();
    soft.assert_that("hello")
        .described_as("greeting")
        .length()
        .is_equal_to(99_usize);
    assert!(soft.failure_messages()[0].starts_with("[greeting]"));
}

#[test]
fn test_custom_representation() {
    struct Redacting;

    impl Representation for Redacting {
        fn render(&self, _value: &dyn std::fmt::Debug) -> String {
            "<redacted>".to_string()
        }
    }

    let soft = SoftAssertions::new();
    soft.assert_that("secret")
        .with_representation(Rc::new(Redacting))
        .starts_with("x");
    assert_eq!(
        soft.failure_messages()[0],
        "expected <redacted> to start with <redacted>"
    );
}

#[test]
fn test_custom_predicate_through_verify() {
    // Extension methods route through the same interception point.
    let soft = SoftAssertions::new();
    let assertion = soft.assert_that(&6);
    assertion.verify(Some("synthetic failure".to_string()));
    assert_eq!(soft.failure_messages(), vec!["synthetic failure"]);
}
