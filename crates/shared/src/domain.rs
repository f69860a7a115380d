use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::InvalidRoleError;

/// A molecule in SMILES notation. Opaque: never parsed or validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Smiles(pub String);

impl Smiles {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Smiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Smiles {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Smiles {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoleculeRole {
    Reactant,
    Product,
    Solvent,
}

impl MoleculeRole {
    pub const ALL: [MoleculeRole; 3] = [
        MoleculeRole::Reactant,
        MoleculeRole::Product,
        MoleculeRole::Solvent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MoleculeRole::Reactant => "reactant",
            MoleculeRole::Product => "product",
            MoleculeRole::Solvent => "solvent",
        }
    }
}

impl fmt::Display for MoleculeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoleculeRole {
    type Err = InvalidRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reactant" => Ok(MoleculeRole::Reactant),
            "product" => Ok(MoleculeRole::Product),
            "solvent" => Ok(MoleculeRole::Solvent),
            other => Err(InvalidRoleError::new(other)),
        }
    }
}

/// The reaction under construction. Insertion order is display order and
/// duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionDraft {
    pub reactants: Vec<Smiles>,
    pub products: Vec<Smiles>,
    pub solvent: Vec<Smiles>,
}

impl ReactionDraft {
    pub fn molecules(&self, role: MoleculeRole) -> &[Smiles] {
        match role {
            MoleculeRole::Reactant => &self.reactants,
            MoleculeRole::Product => &self.products,
            MoleculeRole::Solvent => &self.solvent,
        }
    }

    pub fn molecules_mut(&mut self, role: MoleculeRole) -> &mut Vec<Smiles> {
        match role {
            MoleculeRole::Reactant => &mut self.reactants,
            MoleculeRole::Product => &mut self.products,
            MoleculeRole::Solvent => &mut self.solvent,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reactants.is_empty() && self.products.is_empty() && self.solvent.is_empty()
    }
}
