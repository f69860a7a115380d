use std::fmt;

use serde::{
    de::{self, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::domain::Smiles;

pub const SUBMIT_REACTION_PATH: &str = "/submit_reaction";

/// Solvent section of the wire payload: `false` when no solvent was given,
/// otherwise the solvent list itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SolventField {
    #[default]
    Absent,
    Present(Vec<Smiles>),
}

impl SolventField {
    pub fn from_molecules(molecules: &[Smiles]) -> Self {
        if molecules.is_empty() {
            SolventField::Absent
        } else {
            SolventField::Present(molecules.to_vec())
        }
    }

    pub fn molecules(&self) -> &[Smiles] {
        match self {
            SolventField::Absent => &[],
            SolventField::Present(molecules) => molecules,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, SolventField::Absent)
    }
}

impl Serialize for SolventField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SolventField::Absent => serializer.serialize_bool(false),
            SolventField::Present(molecules) => molecules.serialize(serializer),
        }
    }
}

struct SolventFieldVisitor;

impl<'de> Visitor<'de> for SolventFieldVisitor {
    type Value = SolventField;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("`false`, `null` or a list of SMILES strings")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if value {
            Err(E::invalid_value(de::Unexpected::Bool(true), &self))
        } else {
            Ok(SolventField::Absent)
        }
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(SolventField::Absent)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(SolventField::Absent)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut molecules = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(molecule) = seq.next_element::<Smiles>()? {
            molecules.push(molecule);
        }
        Ok(SolventField::Present(molecules))
    }
}

impl<'de> Deserialize<'de> for SolventField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SolventFieldVisitor)
    }
}

/// Body of `POST /submit_reaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub reactants: Vec<Smiles>,
    pub products: Vec<Smiles>,
    #[serde(default)]
    pub solvent: SolventField,
}
