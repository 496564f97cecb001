//! Per-player unit collection

use crate::board::Cell;
use crate::unit::Unit;

/// Living units of one side, in placement order
#[derive(Clone, Debug, Default)]
pub struct Roster {
    units: Vec<Unit>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// True when the roster already holds `max` units. Non-positive limits
    /// are always full.
    pub fn is_full(&self, max: i32) -> bool {
        self.units.len() as i64 >= i64::from(max)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Unit> {
        self.units.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Unit> {
        self.units.get_mut(index)
    }

    /// Index of the unit standing on `cell`
    pub fn index_at(&self, cell: Cell) -> Option<usize> {
        self.units.iter().position(|u| u.position == cell)
    }

    pub fn unit_at(&self, cell: Cell) -> Option<&Unit> {
        self.index_at(cell).map(|i| &self.units[i])
    }

    pub(crate) fn push(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    /// Remove the unit standing on `cell`, keeping the order of the rest
    pub(crate) fn remove_at(&mut self, cell: Cell) -> Option<Unit> {
        self.index_at(cell).map(|i| self.units.remove(i))
    }
}
