use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use shared::{
    domain::{MoleculeRole, ReactionDraft, Smiles},
    error::InvalidRoleError,
    protocol::SubmissionPayload,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub mod builder;
pub mod config;
pub mod editor;
pub mod presentation;
pub mod store;
pub mod submission;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use editor::{StaticEditor, StructureEditor};
pub use presentation::PresentationEvent;
pub use store::MoleculeStore;
pub use submission::{
    AnalysisTransport, HttpAnalysisTransport, MissingAnalysisTransport, SubmissionError,
};
pub use view::PageView;

const PRESENTATION_EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionId(pub Uuid);

impl SubmissionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub submission_id: SubmissionId,
    pub content: String,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The response was shown in the output region.
    Displayed(AnalysisResult),
    /// A reset or a newer submission happened while this one was in flight;
    /// its response (or failure) was dropped without touching the page.
    Superseded { submission_id: SubmissionId },
}

struct SessionState {
    store: MoleculeStore,
    /// Bumped by every submit and every reset. A response is only applied
    /// if the ticket it was sent under is still current.
    ticket: u64,
}

/// One page's worth of reaction assembly: the draft, the transport that
/// submits it and the event stream that drives the view.
pub struct ReactionSession {
    transport: Arc<dyn AnalysisTransport>,
    inner: Mutex<SessionState>,
    events: broadcast::Sender<PresentationEvent>,
}

impl ReactionSession {
    pub fn new(transport: Arc<dyn AnalysisTransport>) -> Arc<Self> {
        let (events, _) = broadcast::channel(PRESENTATION_EVENT_CAPACITY);
        Arc::new(Self {
            transport,
            inner: Mutex::new(SessionState {
                store: MoleculeStore::new(),
                ticket: 0,
            }),
            events,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Arc<Self>, SubmissionError> {
        let transport = HttpAnalysisTransport::new(settings)?;
        Ok(Self::new(Arc::new(transport)))
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PresentationEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: PresentationEvent) {
        let _ = self.events.send(event);
    }

    pub async fn add(&self, smiles: impl Into<Smiles>, role: MoleculeRole) {
        let smiles = smiles.into();
        let mut guard = self.inner.lock().await;
        debug!(%role, %smiles, "adding molecule");
        let event = guard.store.append(smiles, role);
        self.emit(event);
    }

    /// Adds a molecule under a role given by name. An unknown role is
    /// reported on the diagnostic log and returned; the draft is untouched.
    pub async fn add_molecule(
        &self,
        smiles: impl Into<Smiles>,
        role: &str,
    ) -> Result<(), InvalidRoleError> {
        let smiles = smiles.into();
        let mut guard = self.inner.lock().await;
        match guard.store.append_named(smiles.clone(), role) {
            Ok(event) => {
                debug!(role, %smiles, "adding molecule");
                self.emit(event);
                Ok(())
            }
            Err(err) => {
                error!(role, %smiles, "bad molecule role passed to add_molecule");
                Err(err)
            }
        }
    }

    pub async fn add_from_editor(&self, editor: &dyn StructureEditor, role: MoleculeRole) {
        let smiles = editor.smiles();
        self.add(smiles, role).await;
    }

    pub async fn snapshot(&self) -> ReactionDraft {
        self.inner.lock().await.store.snapshot()
    }

    pub async fn payload(&self) -> SubmissionPayload {
        builder::build(self.inner.lock().await.store.draft())
    }

    /// Sends the current draft to the analysis endpoint. The draft stays as
    /// it is; the lock is released while the request is outstanding.
    pub async fn submit(&self) -> Result<SubmissionOutcome, SubmissionError> {
        let submission_id = SubmissionId::new();
        let (payload, ticket) = {
            let mut guard = self.inner.lock().await;
            guard.ticket += 1;
            (builder::build(guard.store.draft()), guard.ticket)
        };
        info!(
            %submission_id,
            ticket,
            reactants = payload.reactants.len(),
            products = payload.products.len(),
            "submitting reaction"
        );

        let result = self.transport.submit(&payload).await;

        let guard = self.inner.lock().await;
        if guard.ticket != ticket {
            warn!(
                %submission_id,
                ticket,
                current = guard.ticket,
                "dropping response for superseded reaction"
            );
            return Ok(SubmissionOutcome::Superseded { submission_id });
        }

        match result {
            Ok(content) => {
                info!(%submission_id, bytes = content.len(), "mechanism received");
                self.emit(PresentationEvent::OutputRevealed);
                self.emit(PresentationEvent::OutputReplaced {
                    content: content.clone(),
                });
                Ok(SubmissionOutcome::Displayed(AnalysisResult {
                    submission_id,
                    content,
                    received_at: Utc::now(),
                }))
            }
            Err(err) => {
                error!(%submission_id, "reaction submission failed: {err}");
                self.emit(PresentationEvent::SubmissionFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Empties the draft and returns the page to its initial state. Any
    /// submission still in flight is superseded.
    pub async fn reset(&self) {
        let mut guard = self.inner.lock().await;
        guard.store.clear();
        guard.ticket += 1;
        self.emit(PresentationEvent::EntriesCleared);
        self.emit(PresentationEvent::OutputHidden);
        info!(ticket = guard.ticket, "reaction draft reset");
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
