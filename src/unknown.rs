use std::fmt::Display;

use crate::system::BoundaryMode;

/// Coefficient family of an unknown in `S_j(x) = a_j + b_j(x - x_j) + c_j(x - x_j)^2 + d_j(x - x_j)^3`.
/// `a_j` is never unknown since it equals `y_j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnknownKind {
    B,
    C,
    D,
}

/// One column of the linear system: a coefficient of a given segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unknown {
    pub kind: UnknownKind,
    pub segment: usize,
}

impl Unknown {
    pub fn b(segment: usize) -> Self {
        Unknown { kind: UnknownKind::B, segment }
    }

    pub fn c(segment: usize) -> Self {
        Unknown { kind: UnknownKind::C, segment }
    }

    pub fn d(segment: usize) -> Self {
        Unknown { kind: UnknownKind::D, segment }
    }
}

impl Display for Unknown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self.kind {
            UnknownKind::B => 'b',
            UnknownKind::C => 'c',
            UnknownKind::D => 'd',
        };
        write!(f, "{}{}", letter, self.segment)
    }
}

/// Ordered list of unknowns; position in the list is the matrix column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLayout {
    unknowns: Vec<Unknown>,
}

impl UnknownLayout {
    /// Layout for `number_of_segments` segments: all b's, then all c's, then all d's, each in
    /// ascending segment order, without the unknown fixed by the boundary condition
    /// (`b0` for clamped, `c0` for natural).
    /// # Example
    /// ```
    /// use spline_steps::{BoundaryMode, UnknownLayout};
    ///
    /// let layout = UnknownLayout::new(2, BoundaryMode::Natural);
    /// assert_eq!(vec!["b0", "b1", "c1", "d0", "d1"], layout.labels());
    /// ```
    pub fn new(number_of_segments: usize, mode: BoundaryMode) -> Self {
        let eliminated = Self::eliminated_unknown(mode);
        let unknowns = [UnknownKind::B, UnknownKind::C, UnknownKind::D]
            .iter()
            .flat_map(|kind| (0..number_of_segments).map(move |segment| Unknown { kind: *kind, segment }))
            .filter(|unknown| *unknown != eliminated)
            .collect();
        UnknownLayout { unknowns }
    }

    /// Unknown whose value the boundary condition fixes before solving.
    pub fn eliminated_unknown(mode: BoundaryMode) -> Unknown {
        match mode {
            BoundaryMode::Natural => Unknown::c(0),
            BoundaryMode::Clamped => Unknown::b(0),
        }
    }

    pub fn column_of(&self, unknown: Unknown) -> Option<usize> {
        self.unknowns.iter().position(|u| *u == unknown)
    }

    pub fn get(&self, column: usize) -> Option<Unknown> {
        self.unknowns.get(column).copied()
    }

    pub fn len(&self) -> usize {
        self.unknowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unknowns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unknown> {
        self.unknowns.iter()
    }

    pub fn labels(&self) -> Vec<String> {
        self.unknowns.iter().map(|u| u.to_string()).collect()
    }
}
