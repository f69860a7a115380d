use shared::{
    domain::ReactionDraft,
    protocol::{SolventField, SubmissionPayload},
};

/// Snapshot of `draft` in wire form. An empty solvent list becomes
/// [`SolventField::Absent`].
pub fn build(draft: &ReactionDraft) -> SubmissionPayload {
    SubmissionPayload {
        reactants: draft.reactants.clone(),
        products: draft.products.clone(),
        solvent: SolventField::from_molecules(&draft.solvent),
    }
}

pub fn build_json(draft: &ReactionDraft) -> serde_json::Result<String> {
    serde_json::to_string(&build(draft))
}
