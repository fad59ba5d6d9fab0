//! Transport-agnostic application state.
//!
//! `CoreState` owns one `DoctorSession` per open predictor screen, the
//! profile editor and the prediction client. It is wrapped in `Arc` at
//! startup and shared with the screen API. Locks are only ever held for a
//! state mutation, never across the prediction round-trip.
//!
//! Predictor sessions are evicted when a new one opens: idle ones past
//! `DOCTOR_SESSION_IDLE_TTL` first, then the least recently used above
//! `MAX_DOCTOR_SESSIONS`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use uuid::Uuid;

use crate::config::{DOCTOR_SESSION_IDLE_TTL, MAX_DOCTOR_SESSIONS};
use crate::doctor::{DoctorAction, DoctorError, DoctorSession, DoctorView};
use crate::prediction::{PredictionClient, PredictionError, PredictionRequest, PredictionResponse};
use crate::profile::ProfileEditor;

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

struct SessionEntry {
    session: DoctorSession,
    last_seen: Instant,
}

pub struct CoreState {
    /// Open predictor screens, keyed by session id.
    doctor_sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    profile: RwLock<ProfileEditor>,
    predictor: Arc<dyn PredictionClient>,
}

impl CoreState {
    pub fn new(predictor: Arc<dyn PredictionClient>) -> Self {
        Self {
            doctor_sessions: RwLock::new(HashMap::new()),
            profile: RwLock::new(ProfileEditor::default()),
            predictor,
        }
    }

    // ── Predictor sessions ──────────────────────────────────

    /// Open a fresh predictor screen, evicting stale ones first.
    pub fn open_doctor_session(&self) -> Result<(Uuid, DoctorView), CoreError> {
        let id = Uuid::new_v4();
        let session = DoctorSession::new();
        let view = session.view();

        let mut sessions = self
            .doctor_sessions
            .write()
            .map_err(|_| CoreError::LockPoisoned)?;
        let now = Instant::now();
        evict_sessions(&mut sessions, now);
        sessions.insert(
            id,
            SessionEntry {
                session,
                last_seen: now,
            },
        );
        tracing::debug!(%id, open = sessions.len(), "Predictor session opened");
        Ok((id, view))
    }

    /// Close a predictor screen. An in-flight result for it will be dropped.
    pub fn close_doctor_session(&self, id: &Uuid) -> Result<(), CoreError> {
        self.doctor_sessions
            .write()
            .map_err(|_| CoreError::LockPoisoned)?
            .remove(id)
            .ok_or(CoreError::SessionNotFound(*id))?;
        tracing::debug!(%id, "Predictor session closed");
        Ok(())
    }

    pub fn doctor_session_count(&self) -> usize {
        match self.doctor_sessions.read() {
            Ok(sessions) => sessions.len(),
            Err(_) => {
                tracing::warn!("Predictor session lock poisoned; reporting no open sessions");
                0
            }
        }
    }

    /// Run `f` against one session under the write lock and mark it used.
    pub fn with_doctor_session<R>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut DoctorSession) -> R,
    ) -> Result<R, CoreError> {
        let mut sessions = self
            .doctor_sessions
            .write()
            .map_err(|_| CoreError::LockPoisoned)?;
        let entry = sessions.get_mut(id).ok_or(CoreError::SessionNotFound(*id))?;
        entry.last_seen = Instant::now();
        Ok(f(&mut entry.session))
    }

    pub fn doctor_view(&self, id: &Uuid) -> Result<DoctorView, CoreError> {
        self.with_doctor_session(id, |session| session.view())
    }

    pub fn apply_doctor_action(
        &self,
        id: &Uuid,
        action: DoctorAction,
    ) -> Result<DoctorView, CoreError> {
        self.with_doctor_session(id, |session| {
            session.apply(action);
            session.view()
        })
    }

    pub fn begin_submit(&self, id: &Uuid) -> Result<PredictionRequest, CoreError> {
        self.with_doctor_session(id, DoctorSession::begin_submit)?
            .map_err(CoreError::from)
    }

    /// Deliver a prediction outcome to its session.
    ///
    /// When the session was closed while the request was in flight the
    /// outcome is discarded and `SessionNotFound` is returned.
    pub fn finish_submit(
        &self,
        id: &Uuid,
        outcome: Result<PredictionResponse, PredictionError>,
    ) -> Result<DoctorView, CoreError> {
        let result = self.with_doctor_session(id, |session| {
            session.finish_submit(outcome);
            session.view()
        });
        if matches!(result, Err(CoreError::SessionNotFound(_))) {
            tracing::info!(%id, "Predictor session closed before diagnosis arrived; result discarded");
        }
        result
    }

    /// Full submission for one session: lock, send unlocked, lock again.
    ///
    /// The round-trip runs in its own task, so the session always leaves
    /// Submitting even when the caller is dropped mid-request.
    pub async fn submit_doctor_session(self: &Arc<Self>, id: &Uuid) -> Result<DoctorView, CoreError> {
        let request = self.begin_submit(id)?;

        let core = Arc::clone(self);
        let session_id = *id;
        let task = tokio::spawn(async move {
            let outcome = core.predictor.predict(&request).await;
            core.finish_submit(&session_id, outcome)
        });

        match task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(%id, error = %e, "Prediction task failed");
                self.finish_submit(
                    id,
                    Err(PredictionError::HttpClient(format!("prediction task failed: {e}"))),
                )
            }
        }
    }

    // ── Profile ─────────────────────────────────────────────

    pub fn read_profile(&self) -> Result<RwLockReadGuard<'_, ProfileEditor>, CoreError> {
        self.profile.read().map_err(|_| CoreError::LockPoisoned)
    }

    pub fn write_profile(&self) -> Result<RwLockWriteGuard<'_, ProfileEditor>, CoreError> {
        self.profile.write().map_err(|_| CoreError::LockPoisoned)
    }
}

/// Drop idle sessions, then the least recently used until one more fits.
/// A session waiting on the service is never considered idle.
fn evict_sessions(sessions: &mut HashMap<Uuid, SessionEntry>, now: Instant) {
    let before = sessions.len();
    sessions.retain(|_, entry| {
        entry.session.is_loading()
            || now.saturating_duration_since(entry.last_seen) < DOCTOR_SESSION_IDLE_TTL
    });

    while sessions.len() >= MAX_DOCTOR_SESSIONS {
        let Some(oldest) = sessions
            .iter()
            .min_by_key(|(_, entry)| entry.last_seen)
            .map(|(id, _)| *id)
        else {
            break;
        };
        sessions.remove(&oldest);
    }

    let evicted = before - sessions.len();
    if evicted > 0 {
        tracing::info!(evicted, open = sessions.len(), "Stale predictor sessions evicted");
    }
}

// ═══════════════════════════════════════════════════════════
// CoreError
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("No predictor session {0}")]
    SessionNotFound(Uuid),
    #[error(transparent)]
    Doctor(#[from] DoctorError),
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
