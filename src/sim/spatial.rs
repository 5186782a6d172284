//! Uniform-grid spatial hash for the broadphase
//!
//! Rebuilt from scratch every frame: cleared, then every body is binned by
//! the cell its center falls in. Buckets hold indices into the body slice the
//! hash was built from, so the hash is only meaningful for that slice until
//! the next build.

use std::collections::HashMap;

use glam::Vec3;

use super::body::Body;

/// Integer grid cell coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing `pos` for the given cell size
    #[inline]
    pub fn of(pos: Vec3, cell_size: f32) -> Self {
        Self {
            x: (pos.x / cell_size).floor() as i32,
            y: (pos.y / cell_size).floor() as i32,
        }
    }

    /// Packed key: x in the high 32 bits, y's raw bits in the low 32
    #[inline]
    pub fn key(self) -> CellKey {
        CellKey(((self.x as u32 as u64) << 32) | self.y as u32 as u64)
    }

    /// This cell and its 8 neighbours, row by row
    pub fn neighborhood(self) -> impl Iterator<Item = Cell> {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).map(move |dx| Cell::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy)))
        })
    }
}

/// Injective 64-bit encoding of a `Cell`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey(pub u64);

impl CellKey {
    /// Recover the cell a key was packed from
    pub fn cell(self) -> Cell {
        Cell::new((self.0 >> 32) as u32 as i32, self.0 as u32 as i32)
    }
}

/// Cell buckets for one frame
#[derive(Debug, Clone, Default)]
pub struct SpatialHash {
    cell_size: f32,
    buckets: HashMap<CellKey, Vec<usize>>,
}

impl SpatialHash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Drop every bucket
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Clear, then bin every body, storing its cell on the body
    pub fn build(&mut self, bodies: &mut [Body], cell_size: f32) {
        self.clear();
        self.cell_size = cell_size;
        for (index, body) in bodies.iter_mut().enumerate() {
            body.cell = Cell::of(body.pos, cell_size);
            self.buckets.entry(body.cell.key()).or_default().push(index);
        }
    }

    /// Body indices binned in `cell`
    pub fn bucket(&self, cell: Cell) -> &[usize] {
        self.buckets
            .get(&cell.key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Body indices in the 3×3 block around `cell`
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = usize> + '_ {
        cell.neighborhood()
            .flat_map(move |c| self.bucket(c).iter().copied())
    }

    /// Number of non-empty cells
    pub fn occupied_cells(&self) -> usize {
        self.buckets.values().filter(|b| !b.is_empty()).count()
    }

    /// Total entries across all buckets
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
