use neuriq_core::answer::{AnswerStore, AnswerValue, OptionValue};
use neuriq_core::disease::Disease;
use neuriq_scales::engine::{evaluate, toggle_selection};
use neuriq_scales::{all_scales, get_scale, scale_for};

#[test]
fn builtins_pass_structural_validation() {
    let scales = all_scales();
    assert_eq!(scales.len(), 3);
    for definition in scales {
        definition
            .validate()
            .unwrap_or_else(|e| panic!("{} failed validation: {e}", definition.id));
    }
}

#[test]
fn registry_lookup_by_id() {
    assert!(get_scale("headache_hit6").is_some());
    assert!(get_scale("epilepsy_intake").is_some());
    assert!(get_scale("cognitive_ad8").is_some());
    assert!(get_scale("unknown_scale").is_none());
}

#[test]
fn pathway_scale_mapping() {
    assert_eq!(scale_for(Disease::Migraine).map(|d| d.id.as_str()), Some("headache_hit6"));
    assert_eq!(
        scale_for(Disease::Epilepsy).map(|d| d.id.as_str()),
        Some("epilepsy_intake")
    );
    assert_eq!(
        scale_for(Disease::Cognitive).map(|d| d.id.as_str()),
        Some("cognitive_ad8")
    );
    assert!(scale_for(Disease::General).is_none());
}

#[test]
fn hit6_scores_span_the_published_range() {
    let definition = get_scale("headache_hit6").expect("hit6");
    let item_ids: Vec<String> = definition.fields().map(|f| f.id.clone()).collect();
    assert_eq!(item_ids.len(), 6);

    let mut answers = AnswerStore::new();
    for id in &item_ids {
        answers.set(id.clone(), AnswerValue::Number(6.0));
    }
    let floor = evaluate(definition, &answers);
    assert!(floor.is_valid());
    assert_eq!(floor.total_score, 36.0);

    for id in &item_ids {
        answers.set(id.clone(), AnswerValue::Number(13.0));
    }
    assert_eq!(evaluate(definition, &answers).total_score, 78.0);
}

#[test]
fn hit6_requires_every_item() {
    let definition = get_scale("headache_hit6").expect("hit6");
    let mut answers = AnswerStore::new();
    answers.set("hit6_pain_severe", AnswerValue::Number(10.0));

    let evaluation = evaluate(definition, &answers);
    assert_eq!(evaluation.failures.len(), 5);
}

#[test]
fn epilepsy_birth_weight_gate_is_strictly_below_2500() {
    let definition = get_scale("epilepsy_intake").expect("epilepsy");
    let mut answers = AnswerStore::new();

    // Unanswered weight keeps the low-weight group hidden.
    let evaluation = evaluate(definition, &answers);
    assert!(!evaluation.is_visible("low_weight_detail"));
    assert!(!evaluation.is_visible("nicu_stay"));

    answers.set("birth_weight", AnswerValue::Number(2500.0));
    let evaluation = evaluate(definition, &answers);
    assert!(!evaluation.is_visible("nicu_stay"), "2500 is not low weight");

    answers.set("birth_weight", AnswerValue::Number(2499.0));
    let evaluation = evaluate(definition, &answers);
    assert!(evaluation.is_visible("low_weight_detail"));
    assert!(evaluation.is_visible("nicu_stay"));
    assert!(evaluation.is_visible("low_weight_note"));
}

#[test]
fn epilepsy_aura_detail_follows_the_gate() {
    let definition = get_scale("epilepsy_intake").expect("epilepsy");
    let mut answers = AnswerStore::new();

    answers.set("has_aura", AnswerValue::Number(2.0));
    assert!(evaluate(definition, &answers).is_visible("aura_detail"));

    answers.set("has_aura", AnswerValue::Number(0.0));
    assert!(!evaluate(definition, &answers).is_visible("aura_detail"));
}

#[test]
fn epilepsy_trigger_none_is_exclusive() {
    let definition = get_scale("epilepsy_intake").expect("epilepsy");
    let field = definition.field("trigger_factors").expect("triggers");
    let mut answers = AnswerStore::new();

    toggle_selection(field, &mut answers, &OptionValue::Number(2.0)).expect("熬夜");
    toggle_selection(field, &mut answers, &OptionValue::Number(3.0)).expect("漏服药物");
    toggle_selection(field, &mut answers, &OptionValue::Number(0.0)).expect("无");

    assert_eq!(
        answers.get("trigger_factors"),
        Some(&AnswerValue::Selected(vec![OptionValue::Number(0.0)]))
    );
}

#[test]
fn epilepsy_out_of_range_weight_is_flagged() {
    let definition = get_scale("epilepsy_intake").expect("epilepsy");
    let mut answers = AnswerStore::new();
    answers.set("birth_weight", AnswerValue::Number(120.0));

    let evaluation = evaluate(definition, &answers);
    assert!(
        evaluation
            .failures
            .iter()
            .any(|f| f.field_id == "birth_weight")
    );
}

#[test]
fn ad8_counts_changed_items() {
    let definition = get_scale("cognitive_ad8").expect("ad8");
    let item_ids: Vec<String> = definition.fields().map(|f| f.id.clone()).collect();
    assert_eq!(item_ids.len(), 8);

    let mut answers = AnswerStore::new();
    for id in &item_ids {
        answers.set(id.clone(), AnswerValue::Number(0.0));
    }
    answers.set("ad8_judgment", AnswerValue::Number(1.0));
    answers.set("ad8_repeat", AnswerValue::Number(1.0));
    answers.set("ad8_memory", AnswerValue::Number(1.0));

    assert_eq!(evaluate(definition, &answers).total_score, 3.0);
}
