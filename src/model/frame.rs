use super::atom::Atom;

/// One trajectory snapshot.
///
/// `index` is assigned by read order starting at 0 and never taken from
/// file content. `timestep` and `lattice` are carried through when the
/// source format provides them.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: usize,
    pub timestep: Option<i64>,
    pub lattice: Option<[[f64; 3]; 3]>,
    pub atoms: Vec<Atom>,
}

impl Frame {
    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Box-dimension tensor with the given extents on the diagonal.
    pub fn diagonal_lattice(extents: [f64; 3]) -> [[f64; 3]; 3] {
        [
            [extents[0], 0.0, 0.0],
            [0.0, extents[1], 0.0],
            [0.0, 0.0, extents[2]],
        ]
    }
}
