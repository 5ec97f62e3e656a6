//! In-memory registry of mounted form sessions

use super::session::FormSession;
use crate::{
    config::FormConfig,
    error::{AppError, Result},
    models::FormKind,
    validation::FormInput,
};
use parking_lot::RwLock;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct FormRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<FormSession>>>>,
    status_ttl: Duration,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl FormRegistry {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            status_ttl: Duration::from_millis(config.status_ttl_ms),
            idle_timeout: Duration::from_secs(config.session_idle_seconds),
            max_sessions: config.max_sessions,
        }
    }

    /// Refused once `max_sessions` are open; idle ones free up as the sweeper runs.
    pub fn open(&self, kind: FormKind, input: FormInput) -> Result<Arc<FormSession>> {
        let mut sessions = self.sessions.write();
        if sessions.len() >= self.max_sessions {
            warn!(form = %kind, open = sessions.len(), "form session limit reached");
            return Err(AppError::Unavailable(
                "Too many open form sessions, try again later".to_string(),
            ));
        }

        let session = Arc::new(FormSession::new(kind, self.status_ttl));
        session.update_input(input);
        sessions.insert(session.id(), session.clone());
        debug!(form = %kind, session = %session.id(), "form session opened");
        Ok(session)
    }

    pub fn get(&self, id: Uuid) -> Result<Arc<FormSession>> {
        self.sessions
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Form session {} not found", id)))
    }

    pub fn close(&self, id: Uuid) -> Result<()> {
        let session = self
            .sessions
            .write()
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Form session {} not found", id)))?;
        session.close();
        debug!(form = %session.kind(), session = %id, "form session closed");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Closes sessions untouched for longer than the idle timeout. Sessions
    /// with a request in flight are left alone.
    pub fn sweep_idle(&self, now: Instant) -> usize {
        let expired: Vec<Arc<FormSession>> = {
            let mut sessions = self.sessions.write();
            let ids: Vec<Uuid> = sessions
                .values()
                .filter(|s| {
                    !s.is_submitting()
                        && now.saturating_duration_since(s.last_activity()) >= self.idle_timeout
                })
                .map(|s| s.id())
                .collect();
            ids.iter().filter_map(|id| sessions.remove(id)).collect()
        };

        for session in &expired {
            session.close();
        }
        expired.len()
    }

    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let removed = registry.sweep_idle(Instant::now());
                if removed > 0 {
                    info!(removed, remaining = registry.len(), "swept idle form sessions");
                }
            }
        })
    }
}
