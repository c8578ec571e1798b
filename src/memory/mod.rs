//! Memory model for the WTFZOMFG interpreter
//!
//! This module provides the cell array programs operate on:
//! - [`value`]: Cell representation (`Int` or `Char`)
//! - [`Memory`]: Fixed-length array of cells with bounds-checked addressing
//!
//! The length is chosen by the caller and never changes during a run. Every
//! index coming from a program (pointer moves, copy targets) goes through
//! [`Memory::checked_index`] so an out-of-range request can be reported instead
//! of panicking.

pub mod value;

use std::fmt;
use value::Cell;

/// Fixed-length array of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<Cell>,
}

impl Memory {
    /// Create `size` cells, all holding `Int(0)`
    pub fn new(size: usize) -> Self {
        Memory {
            cells: vec![Cell::default(); size],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Overwrite a cell; returns false when `index` is outside the memory
    pub fn set(&mut self, index: usize, cell: Cell) -> bool {
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Convert a signed program index into a valid cell index
    pub fn checked_index(&self, index: i64) -> Option<usize> {
        usize::try_from(index)
            .ok()
            .filter(|&index| index < self.cells.len())
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Estimate the memory usage of the cells in bytes
    pub fn estimated_size(&self) -> usize {
        self.cells.len() * std::mem::size_of::<Cell>()
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell)?;
        }
        write!(f, "]")
    }
}
