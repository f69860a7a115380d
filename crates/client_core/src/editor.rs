/// The structure editor widget, as far as the session is concerned: something
/// that can report the SMILES of the structure currently drawn.
pub trait StructureEditor {
    fn smiles(&self) -> String;
}

impl<F> StructureEditor for F
where
    F: Fn() -> String,
{
    fn smiles(&self) -> String {
        self()
    }
}

/// Editor with a fixed structure, for non-interactive front-ends.
#[derive(Debug, Clone, Default)]
pub struct StaticEditor {
    smiles: String,
}

impl StaticEditor {
    pub fn new(smiles: impl Into<String>) -> Self {
        Self {
            smiles: smiles.into(),
        }
    }

    pub fn draw(&mut self, smiles: impl Into<String>) {
        self.smiles = smiles.into();
    }
}

impl StructureEditor for StaticEditor {
    fn smiles(&self) -> String {
        self.smiles.clone()
    }
}
