//! The triage service.
//!
//! Owns the live sessions and sequences the full flow: turns through the
//! dialogue machine, persistence after each reply, one analysis call per
//! completed session, referral synthesis for high-risk scores, profile
//! merge, and record cleanup. A failed analysis leaves everything in place
//! for a retry.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use neuriq_core::analyzer::Analyzer;
use neuriq_core::disease::Disease;
use neuriq_core::risk::{HIGH_RISK_THRESHOLD, Referral};
use neuriq_core::summary::{PatientProfile, TriageSummary};
use neuriq_core::turn::Turn;
use neuriq_dialogue::error::SessionStateError;
use neuriq_dialogue::reply::ParsedReply;
use neuriq_dialogue::session::{DialogueSession, DialogueState};

use crate::error::TriageError;
use crate::store::{SessionRecord, SessionStore};

/// A live session plus its in-flight guards.
struct Slot {
    session: DialogueSession,
    turn_outstanding: bool,
    analysis_pending: bool,
}

pub struct TriageService {
    analyzer: Arc<dyn Analyzer>,
    store: Arc<dyn SessionStore>,
    slots: Mutex<HashMap<Uuid, Slot>>,
    profile: Mutex<PatientProfile>,
}

impl TriageService {
    pub fn new(analyzer: Arc<dyn Analyzer>, store: Arc<dyn SessionStore>) -> Self {
        TriageService {
            analyzer,
            store,
            slots: Mutex::new(HashMap::new()),
            profile: Mutex::new(PatientProfile::default()),
        }
    }

    /// Start a session. The hint pre-selects the routing fallback for
    /// callers arriving from a disease-specific entry point.
    pub async fn create_session(&self, hint: Option<Disease>) -> Uuid {
        let session = DialogueSession::new(hint);
        let session_id = session.id;
        self.slots.lock().await.insert(
            session_id,
            Slot {
                session,
                turn_outstanding: false,
                analysis_pending: false,
            },
        );
        info!(session_id = %session_id, "triage session created");
        session_id
    }

    /// Submit one user turn and get the next reply.
    ///
    /// Turns are serialized per session: while one turn's persistence is
    /// still in flight, further input is rejected. Once routing has picked
    /// a pathway, the record is saved strictly after each reply is computed;
    /// a save failure is logged and does not fail the turn.
    pub async fn advance(&self, session_id: Uuid, input: &str) -> Result<ParsedReply, TriageError> {
        let (reply, record) = {
            let mut slots = self.slots.lock().await;
            let slot = slots
                .get_mut(&session_id)
                .ok_or(TriageError::UnknownSession(session_id))?;
            if slot.turn_outstanding {
                return Err(SessionStateError::TurnOutstanding.into());
            }
            if slot.analysis_pending {
                return Err(SessionStateError::AnalysisPending.into());
            }
            let reply = slot.session.advance(input)?;
            // Records are keyed by pathway; an unrouted session has nothing
            // to persist under yet.
            let record = matches!(
                slot.session.state,
                DialogueState::Collecting | DialogueState::Terminal
            )
            .then(|| SessionRecord {
                disease: slot.session.disease,
                session: slot.session.clone(),
            });
            if record.is_some() {
                slot.turn_outstanding = true;
            }
            (reply, record)
        };

        let Some(record) = record else {
            return Ok(reply);
        };
        let saved = self.store.save(record).await;
        {
            let mut slots = self.slots.lock().await;
            if let Some(slot) = slots.get_mut(&session_id) {
                slot.turn_outstanding = false;
            }
        }
        if let Err(error) = saved {
            warn!(session_id = %session_id, error = %error, "session persist failed");
        }
        Ok(reply)
    }

    /// Run the analysis for a terminal session and consume the session.
    ///
    /// On failure nothing is discarded: the live session, its score and its
    /// persisted history all stay put, and the call may be retried. On
    /// success the referral is synthesized when the score reaches the
    /// high-risk band, the extracted profile is merged, and the pathway's
    /// record is cleared.
    pub async fn complete(&self, session_id: Uuid) -> Result<TriageSummary, TriageError> {
        let (turns, disease, critical) = {
            let mut slots = self.slots.lock().await;
            let slot = slots
                .get_mut(&session_id)
                .ok_or(TriageError::UnknownSession(session_id))?;
            if !slot.session.is_terminal() {
                return Err(SessionStateError::NotTerminal.into());
            }
            if slot.turn_outstanding {
                return Err(SessionStateError::TurnOutstanding.into());
            }
            if slot.analysis_pending {
                return Err(SessionStateError::AnalysisPending.into());
            }
            slot.analysis_pending = true;
            (
                slot.session.history.turns().to_vec(),
                slot.session.disease,
                slot.session.critical,
            )
        };

        let analyzed = self.analyzer.analyze(&turns, disease).await;

        let mut slots = self.slots.lock().await;
        let Some(slot) = slots.get_mut(&session_id) else {
            return Err(TriageError::UnknownSession(session_id));
        };
        slot.analysis_pending = false;

        let mut summary = match analyzed {
            Ok(summary) => summary,
            Err(error) => {
                warn!(
                    session_id = %session_id,
                    step = slot.session.step,
                    error = %error,
                    "analysis failed, session retained for retry"
                );
                return Err(error.into());
            }
        };
        slots.remove(&session_id);
        drop(slots);

        summary.critical = critical;
        if summary.risk_score >= HIGH_RISK_THRESHOLD {
            summary.referral = Some(Referral::for_disease(disease));
        }
        if let Some(profile) = &summary.profile {
            self.profile.lock().await.merge(profile);
        }
        if let Err(error) = self.store.clear(disease).await {
            warn!(session_id = %session_id, error = %error, "record cleanup failed");
        }
        info!(
            session_id = %session_id,
            disease = disease.as_str(),
            risk_score = summary.risk_score,
            referral = summary.referral.is_some(),
            "triage complete"
        );
        Ok(summary)
    }

    /// Rebuild the live session for a pathway from its persisted record.
    /// Returns the session id, or `None` when nothing was stored.
    pub async fn resume(&self, disease: Disease) -> Result<Option<Uuid>, TriageError> {
        let Some(record) = self.store.load(disease).await? else {
            return Ok(None);
        };
        let session = record.session;
        let session_id = session.id;
        info!(
            session_id = %session_id,
            disease = disease.as_str(),
            step = session.step,
            "session resumed"
        );
        self.slots.lock().await.insert(
            session_id,
            Slot {
                session,
                turn_outstanding: false,
                analysis_pending: false,
            },
        );
        Ok(Some(session_id))
    }

    /// Drop a session without analyzing it, clearing its stored record.
    /// Rejected while a turn or an analysis is still in flight.
    pub async fn discard(&self, session_id: Uuid) -> Result<(), TriageError> {
        let disease = {
            let mut slots = self.slots.lock().await;
            let slot = slots
                .get(&session_id)
                .ok_or(TriageError::UnknownSession(session_id))?;
            if slot.turn_outstanding {
                return Err(SessionStateError::TurnOutstanding.into());
            }
            if slot.analysis_pending {
                return Err(SessionStateError::AnalysisPending.into());
            }
            let disease = slot.session.disease;
            slots.remove(&session_id);
            disease
        };
        self.store.clear(disease).await?;
        info!(session_id = %session_id, disease = disease.as_str(), "session discarded");
        Ok(())
    }

    /// Snapshot of a live session, for UI state and tests.
    pub async fn session(&self, session_id: Uuid) -> Option<DialogueSession> {
        self.slots
            .lock()
            .await
            .get(&session_id)
            .map(|slot| slot.session.clone())
    }

    /// Turns recorded so far for a live session.
    pub async fn history(&self, session_id: Uuid) -> Option<Vec<Turn>> {
        self.slots
            .lock()
            .await
            .get(&session_id)
            .map(|slot| slot.session.history.turns().to_vec())
    }

    /// The accumulated patient profile across completed pathways.
    pub async fn profile(&self) -> PatientProfile {
        self.profile.lock().await.clone()
    }
}
