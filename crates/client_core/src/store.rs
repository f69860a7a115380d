//! Owner of the single reaction draft of a session.

use shared::{
    domain::{MoleculeRole, ReactionDraft, Smiles},
    error::InvalidRoleError,
};

use crate::presentation::PresentationEvent;

#[derive(Debug, Default)]
pub struct MoleculeStore {
    draft: ReactionDraft,
}

impl MoleculeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `smiles` under `role` and returns the display notification for
    /// the presentation layer. The store never talks to a view itself.
    pub fn append(&mut self, smiles: Smiles, role: MoleculeRole) -> PresentationEvent {
        self.draft.molecules_mut(role).push(smiles.clone());
        PresentationEvent::MoleculeDisplayed { role, smiles }
    }

    /// String-role variant of [`MoleculeStore::append`]. An unknown role
    /// leaves the draft untouched.
    pub fn append_named(
        &mut self,
        smiles: Smiles,
        role: &str,
    ) -> Result<PresentationEvent, InvalidRoleError> {
        let role = role.parse::<MoleculeRole>()?;
        Ok(self.append(smiles, role))
    }

    pub fn clear(&mut self) {
        self.draft.reactants.clear();
        self.draft.products.clear();
        self.draft.solvent.clear();
    }

    pub fn snapshot(&self) -> ReactionDraft {
        self.draft.clone()
    }

    pub fn draft(&self) -> &ReactionDraft {
        &self.draft
    }

    pub fn len(&self, role: MoleculeRole) -> usize {
        self.draft.molecules(role).len()
    }

    pub fn is_empty(&self) -> bool {
        self.draft.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
