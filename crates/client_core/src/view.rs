//! Passive page model driven entirely by [`PresentationEvent`]s.

use shared::domain::MoleculeRole;

use crate::presentation::PresentationEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageView {
    pub reactant_entries: Vec<String>,
    pub product_entries: Vec<String>,
    pub solvent_entries: Vec<String>,
    pub output_visible: bool,
    pub output_content: String,
    pub error_message: Option<String>,
}

impl PageView {
    pub fn apply(&mut self, event: &PresentationEvent) {
        match event {
            PresentationEvent::MoleculeDisplayed { role, smiles } => {
                self.entries_mut(*role).push(smiles.to_string());
            }
            PresentationEvent::EntriesCleared => {
                self.reactant_entries.clear();
                self.product_entries.clear();
                self.solvent_entries.clear();
            }
            PresentationEvent::OutputRevealed => {
                self.output_visible = true;
            }
            PresentationEvent::OutputHidden => {
                self.output_visible = false;
                self.output_content.clear();
                self.error_message = None;
            }
            PresentationEvent::OutputReplaced { content } => {
                self.output_content = content.clone();
                self.error_message = None;
            }
            PresentationEvent::SubmissionFailed { message } => {
                self.error_message = Some(message.clone());
            }
        }
    }

    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a PresentationEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    pub fn entries(&self, role: MoleculeRole) -> &[String] {
        match role {
            MoleculeRole::Reactant => &self.reactant_entries,
            MoleculeRole::Product => &self.product_entries,
            MoleculeRole::Solvent => &self.solvent_entries,
        }
    }

    fn entries_mut(&mut self, role: MoleculeRole) -> &mut Vec<String> {
        match role {
            MoleculeRole::Reactant => &mut self.reactant_entries,
            MoleculeRole::Product => &mut self.product_entries,
            MoleculeRole::Solvent => &mut self.solvent_entries,
        }
    }
}
