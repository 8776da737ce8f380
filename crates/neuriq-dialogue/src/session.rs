//! The triage dialogue state machine.
//!
//! One session walks a fixed script: opening question, routing, a short
//! collecting sequence for the routed pathway, then a terminal handoff to
//! analysis. Every user turn moves the machine at most one step forward;
//! the step counter never runs past the script.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use neuriq_core::answer::{AnswerStore, AnswerValue};
use neuriq_core::disease::Disease;
use neuriq_core::risk::RiskLevel;
use neuriq_core::turn::{Turn, TurnLog};

use crate::error::SessionStateError;
use crate::pathway::{self, Pathway, TriageStep};
use crate::reply::{self, ParsedReply, TerminalAction};
use crate::router;

/// Resting states of a dialogue.
///
/// The assessment offer rides on the collecting-to-terminal edge: the
/// closing reply carries the analyze action, and `Terminal` is the state
/// observed after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    Init,
    Routing,
    Collecting,
    Terminal,
}

/// A triage dialogue session.
///
/// `disease` is fixed once the machine leaves `Routing`; later free text
/// never re-routes. The risk score only ever grows while collecting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueSession {
    pub id: Uuid,
    pub state: DialogueState,
    pub disease: Disease,
    /// Questions asked so far, routing included. Clamped at the pathway
    /// length plus the routing step.
    pub step: u32,
    pub risk_score: f64,
    /// Set when a red-flag option was selected; never cleared.
    pub critical: bool,
    pub history: TurnLog,
    /// Structured answers captured per collecting step, keyed by step id.
    pub answers: AnswerStore,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    hint: Option<Disease>,
    last_input: Option<String>,
    last_reply: Option<ParsedReply>,
}

impl DialogueSession {
    /// Start a session. The hint, when present, replaces the general
    /// fallback at the routing step; it never preempts an actual match.
    pub fn new(hint: Option<Disease>) -> Self {
        let now = Timestamp::now();
        DialogueSession {
            id: Uuid::new_v4(),
            state: DialogueState::Init,
            disease: Disease::General,
            step: 0,
            risk_score: 0.0,
            critical: false,
            history: TurnLog::default(),
            answers: AnswerStore::new(),
            created_at: now,
            updated_at: now,
            hint,
            last_input: None,
            last_reply: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state == DialogueState::Terminal
    }

    /// Band of the accumulated collection score.
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }

    /// Advance the dialogue by one user turn.
    ///
    /// Records the turn, credits the matched option's weight, and returns
    /// the next reply. A terminal session rejects input, except that a
    /// byte-identical resend of the last message returns the cached reply
    /// again without touching history or score.
    pub fn advance(&mut self, input: &str) -> Result<ParsedReply, SessionStateError> {
        let reply = match self.state {
            DialogueState::Init => self.open(),
            DialogueState::Routing => self.route(input),
            DialogueState::Collecting => self.collect(input),
            DialogueState::Terminal => {
                if let Some(cached) = self.replay(input) {
                    debug!(session_id = %self.id, "terminal resend replayed from cache");
                    return Ok(cached);
                }
                return Err(SessionStateError::Terminal);
            }
        };
        self.record(input, &reply);
        Ok(reply)
    }

    fn open(&mut self) -> ParsedReply {
        self.state = DialogueState::Routing;
        self.step = 1;
        info!(session_id = %self.id, "dialogue opened");
        deliver(pathway::opening_step())
    }

    fn route(&mut self, input: &str) -> ParsedReply {
        let routed = router::classify(input);
        self.disease = match routed {
            Disease::General => self.hint.unwrap_or(Disease::General),
            matched => matched,
        };
        self.state = DialogueState::Collecting;
        self.step = 2;
        info!(
            session_id = %self.id,
            disease = self.disease.as_str(),
            "pathway routed"
        );
        match self.pathway().step(0) {
            Some(step) => deliver(step),
            None => self.close(),
        }
    }

    fn collect(&mut self, input: &str) -> ParsedReply {
        let index = (self.step as usize).saturating_sub(2);
        if let Some(step) = self.pathway().step(index) {
            self.absorb(step, input);
        }
        let next_index = index + 1;
        if self.critical || next_index >= self.pathway().len() {
            return self.close();
        }
        self.step += 1;
        match self.pathway().step(next_index) {
            Some(step) => deliver(step),
            None => self.close(),
        }
    }

    /// Record the answer for one collecting step: credit the matched
    /// option's weight, or keep free text verbatim with no weight.
    fn absorb(&mut self, step: &TriageStep, input: &str) {
        let trimmed = input.trim();
        let matched = step
            .options
            .iter()
            .find(|option| option.label == trimmed || option.value == trimmed);
        match matched {
            Some(option) => {
                self.risk_score += option.risk_weight;
                if option.is_critical {
                    self.critical = true;
                    info!(
                        session_id = %self.id,
                        step_id = %step.id,
                        option = %option.value,
                        "critical option selected"
                    );
                }
                self.answers
                    .set(step.id.clone(), AnswerValue::Text(option.value.clone()));
            }
            None => {
                debug!(session_id = %self.id, step_id = %step.id, "free-text answer, no weight");
                self.answers
                    .set(step.id.clone(), AnswerValue::Text(trimmed.to_string()));
            }
        }
    }

    fn close(&mut self) -> ParsedReply {
        self.state = DialogueState::Terminal;
        info!(
            session_id = %self.id,
            risk_score = self.risk_score,
            critical = self.critical,
            "collection complete"
        );
        let raw = reply::render_reply(pathway::closing_text(), &[], Some(&TerminalAction::Analyze));
        reply::parse_reply(&raw)
    }

    fn replay(&self, input: &str) -> Option<ParsedReply> {
        if self.last_input.as_deref() == Some(input) {
            self.last_reply.clone()
        } else {
            None
        }
    }

    fn record(&mut self, input: &str, reply: &ParsedReply) {
        self.history.push(Turn::user(input));
        let options = if reply.options.is_empty() {
            None
        } else {
            Some(reply.options.clone())
        };
        self.history.push(Turn::model(reply.text.clone(), options));
        self.last_input = Some(input.to_string());
        self.last_reply = Some(reply.clone());
        self.updated_at = Timestamp::now();
    }

    fn pathway(&self) -> &'static Pathway {
        pathway::pathway_for(self.disease)
    }
}

/// Render a scripted step through the same marker pipeline analyzer output
/// takes, so quick replies arrive the one way everywhere.
fn deliver(step: &TriageStep) -> ParsedReply {
    let labels: Vec<String> = step.options.iter().map(|o| o.label.clone()).collect();
    let raw = reply::render_reply(&step.question, &labels, None);
    reply::parse_reply(&raw)
}
