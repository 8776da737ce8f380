use neuriq_core::turn::{DEFAULT_TURN_CAP, Turn, TurnLog, TurnRole};

#[test]
fn log_evicts_oldest_beyond_the_window() {
    let mut log = TurnLog::new(3);
    for i in 0..5 {
        log.push(Turn::user(format!("回合{i}")));
    }

    assert_eq!(log.len(), 3);
    let texts: Vec<&str> = log.turns().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, ["回合2", "回合3", "回合4"]);
}

#[test]
fn log_under_the_window_keeps_everything() {
    let mut log = TurnLog::new(10);
    log.push(Turn::user("第一条"));
    log.push(Turn::model("请选择", None));

    assert_eq!(log.len(), 2);
    assert_eq!(log.turns()[0].role, TurnRole::User);
    assert_eq!(log.last().map(|t| t.role), Some(TurnRole::Model));
}

#[test]
fn default_window_is_forty_turns() {
    assert_eq!(TurnLog::default().cap(), DEFAULT_TURN_CAP);
    assert_eq!(DEFAULT_TURN_CAP, 40);
}

#[test]
fn model_turns_keep_their_quick_replies() {
    let turn = Turn::model("您多久头痛一次？", Some(vec!["每天".to_string(), "每周".to_string()]));

    assert_eq!(turn.role, TurnRole::Model);
    assert_eq!(
        turn.options.as_deref(),
        Some(&["每天".to_string(), "每周".to_string()][..])
    );
    assert!(Turn::user("每天").options.is_none());
}
