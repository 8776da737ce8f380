//! Integration test for the Bedrock-backed analyzer.
//!
//! This test calls real AWS APIs and requires valid credentials in the
//! environment (e.g. `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`).
//!
//! Run with: `cargo test -p neuriq-bedrock --test live_analysis -- --ignored`

use neuriq_bedrock::analyzer::{AnalysisConfig, BedrockAnalyzer};
use neuriq_core::analyzer::Analyzer;
use neuriq_core::disease::Disease;
use neuriq_core::turn::Turn;

async fn build_config() -> aws_config::SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new("us-east-1"))
        .load()
        .await
}

fn sample_history() -> Vec<Turn> {
    vec![
        Turn::user("最近头痛得厉害"),
        Turn::model(
            "您的头痛多久发作一次？",
            Some(vec!["每月少于一次".to_string(), "几乎每天".to_string()]),
        ),
        Turn::user("几乎每天"),
        Turn::model("头痛时是否伴有恶心、呕吐或者怕光怕声？", None),
        Turn::user("经常伴有，光一照就更疼"),
    ]
}

/// A real migraine history must come back as a parseable summary with a
/// score on the 0..=100 scale.
#[tokio::test]
#[ignore]
async fn analyze_returns_a_bounded_summary() {
    let config = build_config().await;
    let analyzer = BedrockAnalyzer::new(&config, AnalysisConfig::default());

    let turns = sample_history();
    let summary = analyzer
        .analyze(&turns, Disease::Migraine)
        .await
        .expect("analysis should succeed");

    println!("risk_score: {}", summary.risk_score);
    println!("summary: {}", summary.summary);
    if let Some(profile) = &summary.profile {
        println!("profile: {:?}", profile.entries);
    }

    assert!((0.0..=100.0).contains(&summary.risk_score));
    assert_eq!(summary.disease, Disease::Migraine);
    assert!(!summary.summary.is_empty());
    assert!(summary.referral.is_none(), "the analyzer never sets a referral");
}

/// The parser must hold up against whatever formatting the live model
/// chooses for the contract.
#[tokio::test]
#[ignore]
async fn analyze_tolerates_model_formatting() {
    let config = build_config().await;
    let analyzer = BedrockAnalyzer::new(&config, AnalysisConfig::default());

    let turns = vec![
        Turn::user("偶尔有点头晕"),
        Turn::model("这种情况持续多久了？", None),
        Turn::user("一周以内"),
    ];
    let summary = analyzer
        .analyze(&turns, Disease::General)
        .await
        .expect("analysis should succeed");

    assert!((0.0..=100.0).contains(&summary.risk_score));
    assert!(!summary.critical, "the analyzer never raises the critical flag");
}
