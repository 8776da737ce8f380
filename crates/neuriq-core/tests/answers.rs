use neuriq_core::answer::{AnswerStore, AnswerValue, OptionValue};

#[test]
fn store_preserves_insertion_order() {
    let mut store = AnswerStore::new();
    store.set("frequency", AnswerValue::Number(3.0));
    store.set("character", AnswerValue::Text("跳痛".to_string()));
    store.set("onset", AnswerValue::Number(1.0));

    let ids: Vec<&str> = store.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, ["frequency", "character", "onset"]);
}

#[test]
fn overwrite_keeps_original_position() {
    let mut store = AnswerStore::new();
    store.set("frequency", AnswerValue::Number(3.0));
    store.set("character", AnswerValue::Text("跳痛".to_string()));
    store.set("frequency", AnswerValue::Number(5.0));

    let ids: Vec<&str> = store.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, ["frequency", "character"]);
    assert_eq!(store.get("frequency"), Some(&AnswerValue::Number(5.0)));
    assert_eq!(store.len(), 2);
}

#[test]
fn remove_returns_the_answer() {
    let mut store = AnswerStore::new();
    store.set("note", AnswerValue::Text("无".to_string()));

    assert_eq!(
        store.remove("note"),
        Some(AnswerValue::Text("无".to_string()))
    );
    assert!(store.get("note").is_none());
    assert!(store.is_empty());
    assert_eq!(store.remove("note"), None);
}

#[test]
fn scalar_matching_respects_kind() {
    assert!(AnswerValue::Number(5.0).matches_option(&OptionValue::Number(5.0)));
    assert!(!AnswerValue::Number(5.0).matches_option(&OptionValue::Number(4.0)));
    assert!(AnswerValue::Text("有".to_string()).matches_option(&OptionValue::Text("有".to_string())));
    assert!(!AnswerValue::Text("5".to_string()).matches_option(&OptionValue::Number(5.0)));

    // A multiselect answer never matches as a scalar.
    let selected = AnswerValue::Selected(vec![OptionValue::Number(5.0)]);
    assert!(!selected.matches_option(&OptionValue::Number(5.0)));
    assert!(selected.contains_option(&OptionValue::Number(5.0)));
}

#[test]
fn containment_only_applies_to_selections() {
    let selected = AnswerValue::Selected(vec![OptionValue::Number(2.0), OptionValue::Number(3.0)]);
    assert!(selected.contains_option(&OptionValue::Number(3.0)));
    assert!(!selected.contains_option(&OptionValue::Number(4.0)));
    assert!(!AnswerValue::Number(3.0).contains_option(&OptionValue::Number(3.0)));
}

#[test]
fn only_numeric_options_carry_score() {
    assert_eq!(OptionValue::Number(13.0).score(), 13.0);
    assert_eq!(OptionValue::Text("无".to_string()).score(), 0.0);
}

#[test]
fn as_number_ignores_other_kinds() {
    assert_eq!(AnswerValue::Number(2300.0).as_number(), Some(2300.0));
    assert_eq!(AnswerValue::Text("2300".to_string()).as_number(), None);
    assert_eq!(
        AnswerValue::Date(jiff::civil::date(2024, 3, 1)).as_number(),
        None
    );
}
