use neuriq_core::answer::AnswerValue;
use neuriq_core::disease::Disease;
use neuriq_dialogue::error::SessionStateError;
use neuriq_dialogue::pathway::pathway_for;
use neuriq_dialogue::reply::TerminalAction;
use neuriq_dialogue::session::{DialogueSession, DialogueState};

fn drive(session: &mut DialogueSession, inputs: &[&str]) {
    for input in inputs {
        session.advance(input).expect("turn should be accepted");
    }
}

#[test]
fn opening_turn_asks_the_routing_question() {
    let mut session = DialogueSession::new(None);
    let reply = session.advance("你好").expect("opening turn");

    assert_eq!(session.state, DialogueState::Routing);
    assert_eq!(session.step, 1);
    assert_eq!(reply.options.len(), 4);
    assert!(reply.text.contains("请问您这次主要想咨询"));
    assert!(!reply.text.contains("<options>"));
    assert!(reply.action.is_none());
}

#[test]
fn complaint_routes_once_and_stays_routed() {
    let mut session = DialogueSession::new(None);
    drive(&mut session, &["你好"]);
    session.advance("反复肢体抽搐/意识丧失").expect("routing turn");

    assert_eq!(session.disease, Disease::Epilepsy);
    assert_eq!(session.state, DialogueState::Collecting);

    // A later answer mentioning headaches must not re-route.
    session.advance("发作前经常头痛").expect("collecting turn");
    assert_eq!(session.disease, Disease::Epilepsy);
}

#[test]
fn scripted_run_accumulates_option_weights() {
    let mut session = DialogueSession::new(None);
    drive(&mut session, &["你好", "头痛"]);
    assert_eq!(session.disease, Disease::Migraine);

    drive(
        &mut session,
        &["几乎每天", "单侧搏动性跳痛", "经常伴有"],
    );
    assert_eq!(session.risk_score, 50.0);
    assert_eq!(session.state, DialogueState::Collecting);

    let closing = session.advance("没有，都是逐渐加重").expect("final answer");
    assert_eq!(session.state, DialogueState::Terminal);
    assert_eq!(session.risk_score, 55.0);
    assert!(!session.critical);
    assert_eq!(closing.action, Some(TerminalAction::Analyze));
    assert!(closing.options.is_empty());
}

#[test]
fn stored_values_not_labels_land_in_answers() {
    let mut session = DialogueSession::new(None);
    drive(&mut session, &["你好", "头痛", "几乎每天"]);

    assert_eq!(
        session.answers.get("headache_frequency"),
        Some(&AnswerValue::Text("daily".to_string()))
    );
}

#[test]
fn critical_option_short_circuits_collection() {
    let mut session = DialogueSession::new(None);
    drive(
        &mut session,
        &["你好", "抽搐", "仅发作过一次", "意识一直清醒"],
    );
    assert_eq!(session.state, DialogueState::Collecting);

    let closing = session.advance("超过5分钟仍未缓解").expect("critical answer");
    assert_eq!(session.state, DialogueState::Terminal);
    assert!(session.critical);
    assert_eq!(session.risk_score, 8.0 + 5.0 + 30.0);
    assert_eq!(closing.action, Some(TerminalAction::Analyze));

    // The fourth scripted question was never asked.
    let asked = pathway_for(Disease::Epilepsy).len() as u32 + 1;
    assert!(session.step < asked);
}

#[test]
fn free_text_answers_carry_no_weight() {
    let mut session = DialogueSession::new(None);
    drive(&mut session, &["你好", "头痛"]);

    session.advance("大概两三天一次吧").expect("free text");
    assert_eq!(session.risk_score, 0.0);
    assert_eq!(session.step, 3);
    assert_eq!(
        session.answers.get("headache_frequency"),
        Some(&AnswerValue::Text("大概两三天一次吧".to_string()))
    );
}

#[test]
fn step_counter_clamps_at_script_length() {
    let mut session = DialogueSession::new(None);
    drive(
        &mut session,
        &["你好", "其他不适", "睡眠问题", "一周以内", "否，比较平稳"],
    );

    assert_eq!(session.state, DialogueState::Terminal);
    let clamp = pathway_for(Disease::General).len() as u32 + 1;
    assert_eq!(session.step, clamp);
}

#[test]
fn terminal_rejects_new_input_but_replays_the_last() {
    let mut session = DialogueSession::new(None);
    drive(
        &mut session,
        &["你好", "其他不适", "睡眠问题", "一周以内"],
    );
    let closing = session.advance("否，比较平稳").expect("final answer");
    assert!(session.is_terminal());

    let history_len = session.history.len();
    let score = session.risk_score;

    // Byte-identical resend: same reply, nothing mutated.
    let replayed = session.advance("否，比较平稳").expect("replay");
    assert_eq!(replayed, closing);
    assert_eq!(session.history.len(), history_len);
    assert_eq!(session.risk_score, score);

    // Anything else is rejected.
    assert_eq!(
        session.advance("再问一个问题"),
        Err(SessionStateError::Terminal)
    );
}

#[test]
fn hint_replaces_the_general_fallback_only() {
    let mut hinted = DialogueSession::new(Some(Disease::Migraine));
    drive(&mut hinted, &["你好"]);
    hinted.advance("说不上来哪里不舒服").expect("vague complaint");
    assert_eq!(hinted.disease, Disease::Migraine);

    let mut overridden = DialogueSession::new(Some(Disease::Migraine));
    drive(&mut overridden, &["你好"]);
    overridden.advance("肢体抽搐").expect("specific complaint");
    assert_eq!(overridden.disease, Disease::Epilepsy);
}

#[test]
fn turns_are_recorded_for_both_sides() {
    let mut session = DialogueSession::new(None);
    drive(&mut session, &["你好", "头痛"]);

    let turns = session.history.turns();
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[0].text, "你好");
    assert!(turns[1].options.as_ref().is_some_and(|o| o.len() == 4));
    assert_eq!(turns[2].text, "头痛");
    assert!(turns[3].options.as_ref().is_some_and(|o| !o.is_empty()));
}

#[test]
fn risk_score_never_decreases() {
    let mut session = DialogueSession::new(None);
    let mut last = session.risk_score;
    for input in ["你好", "抽搐", "每周甚至更频繁", "是，完全没有记忆", "一分钟以内", "没有"] {
        session.advance(input).expect("turn");
        assert!(session.risk_score >= last);
        last = session.risk_score;
    }
    assert_eq!(session.state, DialogueState::Terminal);
}
