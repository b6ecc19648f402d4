use std::ops::{Add, AddAssign, Index, IndexMut};

use lagmesh_serde::{BitReader, BitWrite, Serde, SerdeErr};

/// A D-dimensional integer lattice vector.
///
/// Used for periodic-image offsets and cell-to-cell relocation offsets,
/// measured in units of the periodic domain's fundamental cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntVector<const D: usize>([i32; D]);

impl<const D: usize> IntVector<D> {
    pub const ZERO: Self = Self([0; D]);

    pub fn new(components: [i32; D]) -> Self {
        Self(components)
    }

    pub fn components(&self) -> &[i32; D] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&component| component == 0)
    }
}

impl<const D: usize> Default for IntVector<D> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const D: usize> From<[i32; D]> for IntVector<D> {
    fn from(components: [i32; D]) -> Self {
        Self(components)
    }
}

impl<const D: usize> Index<usize> for IntVector<D> {
    type Output = i32;

    fn index(&self, dim: usize) -> &i32 {
        &self.0[dim]
    }
}

impl<const D: usize> IndexMut<usize> for IntVector<D> {
    fn index_mut(&mut self, dim: usize) -> &mut i32 {
        &mut self.0[dim]
    }
}

impl<const D: usize> Add for IntVector<D> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<const D: usize> AddAssign for IntVector<D> {
    fn add_assign(&mut self, rhs: Self) {
        for dim in 0..D {
            self.0[dim] += rhs.0[dim];
        }
    }
}

impl<const D: usize> Serde for IntVector<D> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(<[i32; D]>::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        self.0.bit_length()
    }
}

/// A D-dimensional physical-space vector.
///
/// Used for periodic displacements (domain-size multiples) and marker
/// positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RealVector<const D: usize>([f64; D]);

impl<const D: usize> RealVector<D> {
    pub const ZERO: Self = Self([0.0; D]);

    pub fn new(components: [f64; D]) -> Self {
        Self(components)
    }

    pub fn components(&self) -> &[f64; D] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&component| component == 0.0)
    }
}

impl<const D: usize> Default for RealVector<D> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const D: usize> From<[f64; D]> for RealVector<D> {
    fn from(components: [f64; D]) -> Self {
        Self(components)
    }
}

impl<const D: usize> Index<usize> for RealVector<D> {
    type Output = f64;

    fn index(&self, dim: usize) -> &f64 {
        &self.0[dim]
    }
}

impl<const D: usize> IndexMut<usize> for RealVector<D> {
    fn index_mut(&mut self, dim: usize) -> &mut f64 {
        &mut self.0[dim]
    }
}

impl<const D: usize> Add for RealVector<D> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<const D: usize> AddAssign for RealVector<D> {
    fn add_assign(&mut self, rhs: Self) {
        for dim in 0..D {
            self.0[dim] += rhs.0[dim];
        }
    }
}

impl<const D: usize> Serde for RealVector<D> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(<[f64; D]>::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        self.0.bit_length()
    }
}

/// A D-dimensional structured-grid cell index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellIndex<const D: usize>([i32; D]);

impl<const D: usize> CellIndex<D> {
    pub fn new(components: [i32; D]) -> Self {
        Self(components)
    }

    pub fn components(&self) -> &[i32; D] {
        &self.0
    }

    /// The cell reached by translating this cell by `offset`.
    pub fn shifted(&self, offset: &IntVector<D>) -> Self {
        let mut components = self.0;
        for dim in 0..D {
            components[dim] += offset[dim];
        }
        Self(components)
    }
}

impl<const D: usize> From<[i32; D]> for CellIndex<D> {
    fn from(components: [i32; D]) -> Self {
        Self(components)
    }
}

impl<const D: usize> Index<usize> for CellIndex<D> {
    type Output = i32;

    fn index(&self, dim: usize) -> &i32 {
        &self.0[dim]
    }
}

impl<const D: usize> Add<IntVector<D>> for CellIndex<D> {
    type Output = Self;

    fn add(self, offset: IntVector<D>) -> Self {
        self.shifted(&offset)
    }
}
