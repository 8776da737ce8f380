//! Analysis prompt assembly.
//!
//! The system prompt pins the JSON contract; the history block renders the
//! collected conversation so the model grounds its summary on what was
//! actually said.

use neuriq_core::disease::Disease;
use neuriq_core::turn::{Turn, TurnRole};

const SUMMARY_CONTRACT: &str = "你是一名神经内科预检助手。根据与患者的问诊对话，输出结构化的初步评估。\
只返回一个JSON对象，不要输出任何其他文字。字段如下：\
{\"risk_score\": 0到100的数字, \"disease\": \"migraine|epilepsy|cognitive|general\", \
\"summary\": \"面向患者的中文小结\", \"profile\": {\"键\": \"值\"}}。\
risk_score依据症状严重程度与危险信号评估；profile提取对话中明确出现的病史要点，没有则返回空对象。";

/// System prompt for a pathway's analysis call.
pub fn system_prompt(disease: Disease) -> String {
    format!("{SUMMARY_CONTRACT}\n当前预检通路：{}。", disease.display_name())
}

/// Render the turn history as a delimited block for the user message.
pub fn history_block(turns: &[Turn]) -> String {
    let mut block = String::from("<triage_history>\n");
    for turn in turns {
        let speaker = match turn.role {
            TurnRole::User => "患者",
            TurnRole::Model => "助手",
        };
        block.push_str(speaker);
        block.push('：');
        block.push_str(&turn.text);
        block.push('\n');
    }
    block.push_str("</triage_history>");
    block
}

/// The complete user message for one analysis call.
pub fn analysis_request(turns: &[Turn]) -> String {
    format!("{}\n\n请根据以上问诊对话输出JSON评估。", history_block(turns))
}
