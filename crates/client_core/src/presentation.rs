//! Instructions from the session to whatever renders the page.

use shared::domain::{MoleculeRole, Smiles};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationEvent {
    /// Show `smiles` under the column for `role`.
    MoleculeDisplayed { role: MoleculeRole, smiles: Smiles },
    /// Remove every displayed molecule entry.
    EntriesCleared,
    OutputRevealed,
    OutputHidden,
    /// Replace the output region's content.
    OutputReplaced { content: String },
    /// Inline error for a failed submission. Never touches the output region.
    SubmissionFailed { message: String },
}
