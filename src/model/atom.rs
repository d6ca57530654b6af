#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// LAMMPS atom type, absent for atoms read from XYZ input.
    pub type_id: Option<u32>,
    pub symbol: String,
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(symbol: impl Into<String>, position: [f64; 3]) -> Self {
        Self {
            type_id: None,
            symbol: symbol.into(),
            position,
        }
    }

    /// Atom from a dump-format record. The symbol defaults to the textual
    /// type id until the relabel stage overrides it.
    pub fn with_type(type_id: u32, position: [f64; 3]) -> Self {
        Self {
            type_id: Some(type_id),
            symbol: type_id.to_string(),
            position,
        }
    }
}
