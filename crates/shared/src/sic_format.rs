//! Single-line SiC reaction format: `{reactants}>>{solvent}>>{products}`.
//!
//! Molecules inside a section may be separated by any character that cannot
//! appear in a SMILES string (`.`, `,`, space, ...). The solvent section may
//! be empty or left out entirely (`{reactants}>>{products}`).

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    domain::{ReactionDraft, Smiles},
    error::SicFormatError,
};

const SECTION_SEPARATOR: &str = ">>";

fn delimiter() -> &'static Regex {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    DELIMITER.get_or_init(|| {
        Regex::new(r"[^a-zA-Z0-9+\[\]()=#@/\\-]+").expect("static SMILES delimiter pattern")
    })
}

fn split_molecules(section: &str) -> Vec<Smiles> {
    delimiter()
        .split(section)
        .filter(|token| !token.is_empty())
        .map(Smiles::from)
        .collect()
}

pub fn parse_reaction(input: &str) -> Result<ReactionDraft, SicFormatError> {
    let lines: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let line = match lines.as_slice() {
        [] => return Err(SicFormatError::NoReaction),
        [line] => *line,
        _ => {
            return Err(SicFormatError::MultipleReactions { count: lines.len() });
        }
    };

    let sections: Vec<&str> = line.split(SECTION_SEPARATOR).collect();
    let (reactants, solvent, products) = match sections.as_slice() {
        [reactants, products] => (*reactants, "", *products),
        [reactants, solvent, products] => (*reactants, *solvent, *products),
        _ => {
            return Err(SicFormatError::MalformedLine {
                line: line.to_string(),
            })
        }
    };

    // Older SiC files terminate the line with ';'.
    let products = products.trim_end().trim_end_matches(';');

    Ok(ReactionDraft {
        reactants: split_molecules(reactants),
        products: split_molecules(products),
        solvent: split_molecules(solvent),
    })
}

pub fn to_sic_line(draft: &ReactionDraft) -> String {
    let join = |molecules: &[Smiles]| {
        molecules
            .iter()
            .map(Smiles::as_str)
            .collect::<Vec<_>>()
            .join(".")
    };
    format!(
        "{}{SECTION_SEPARATOR}{}{SECTION_SEPARATOR}{}",
        join(&draft.reactants),
        join(&draft.solvent),
        join(&draft.products)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smiles(values: &[&str]) -> Vec<Smiles> {
        values.iter().copied().map(Smiles::from).collect()
    }

    #[test]
    fn parses_three_sections_with_arbitrary_delimiter() {
        let draft = parse_reaction("CCO,O>>CS(=O)C>>CC(=O)O;\n").expect("parse");
        assert_eq!(draft.reactants, smiles(&["CCO", "O"]));
        assert_eq!(draft.solvent, smiles(&["CS(=O)C"]));
        assert_eq!(draft.products, smiles(&["CC(=O)O"]));
    }

    #[test]
    fn empty_solvent_section_means_no_solvent() {
        let draft = parse_reaction("C=C.[H]Br>>>>CC[Br]").expect("parse");
        assert_eq!(draft.reactants, smiles(&["C=C", "[H]Br"]));
        assert!(draft.solvent.is_empty());
        assert_eq!(draft.products, smiles(&["CC[Br]"]));
    }

    #[test]
    fn two_sections_read_as_reactants_and_products() {
        let draft = parse_reaction("CBr O>>CO").expect("parse");
        assert_eq!(draft.reactants, smiles(&["CBr", "O"]));
        assert_eq!(draft.products, smiles(&["CO"]));
        assert!(draft.solvent.is_empty());
    }

    #[test]
    fn keeps_smiles_special_characters_inside_molecules() {
        let draft = parse_reaction(r"C/C=C\C>>>>[NH4+]#N").expect("parse");
        assert_eq!(draft.reactants, smiles(&[r"C/C=C\C"]));
        assert_eq!(draft.products, smiles(&["[NH4+]#N"]));
    }

    #[test]
    fn rejects_empty_and_multi_line_input() {
        assert_eq!(parse_reaction("  \n"), Err(SicFormatError::NoReaction));
        assert_eq!(
            parse_reaction("C>>>>C\nO>>>>O\n"),
            Err(SicFormatError::MultipleReactions { count: 2 })
        );
    }

    #[test]
    fn rejects_line_without_separator() {
        assert!(matches!(
            parse_reaction("CCO"),
            Err(SicFormatError::MalformedLine { .. })
        ));
    }

    #[test]
    fn writes_sections_joined_with_dots() {
        let draft = ReactionDraft {
            reactants: smiles(&["CCO", "O"]),
            products: smiles(&["CC(=O)O"]),
            solvent: Vec::new(),
        };
        assert_eq!(to_sic_line(&draft), "CCO.O>>>>CC(=O)O");
        assert_eq!(parse_reaction(&to_sic_line(&draft)).expect("parse"), draft);
    }
}
