use std::collections::HashMap;

use shared::{
    domain::{ReactionDraft, Smiles},
    sic_format::to_sic_line,
};

pub const TRIVIAL_MECHANISM: &str = "Trivial mechanism, already at products.";
pub const NO_SEARCH_BACKEND: &str = "No mechanism search backend is configured for this reaction.";

/// Turns a reaction into a plain-text mechanism write-up. Implementations may
/// be CPU heavy; the server runs them on the blocking pool.
pub trait MechanismEngine: Send + Sync {
    fn find_mechanism(&self, reaction: &ReactionDraft) -> anyhow::Result<String>;
}

/// Writes the reaction header line and recognises the trivial case where
/// the reactants already are the products.
pub struct WriteUpEngine;

impl MechanismEngine for WriteUpEngine {
    fn find_mechanism(&self, reaction: &ReactionDraft) -> anyhow::Result<String> {
        let mut write_up = to_sic_line(reaction);
        write_up.push('\n');
        if same_molecules(&reaction.reactants, &reaction.products) {
            write_up.push_str(TRIVIAL_MECHANISM);
        } else {
            write_up.push_str(NO_SEARCH_BACKEND);
        }
        Ok(write_up)
    }
}

fn same_molecules(left: &[Smiles], right: &[Smiles]) -> bool {
    fn counts(molecules: &[Smiles]) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for molecule in molecules {
            *counts.entry(molecule.as_str()).or_insert(0) += 1;
        }
        counts
    }
    counts(left) == counts(right)
}

#[cfg(test)]
#[path = "tests/mechanism_tests.rs"]
mod tests;
