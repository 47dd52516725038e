// Navigation history - per-tab back/forward stack
use crate::error::{NavError, Result};
use crate::model::Location;

#[derive(Clone, Debug, Default)]
pub struct NavigationHistory {
    entries: Vec<Location>,
    current_index: usize,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit. Anything ahead of the current entry is dropped first.
    /// Visiting the current location again still adds an entry.
    pub fn push(&mut self, location: Location) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.current_index + 1);
        }
        self.entries.push(location);
        self.current_index = self.entries.len() - 1;
    }

    pub fn go_back(&mut self) -> Result<Location> {
        if !self.can_go_back() {
            return Err(NavError::NoHistory);
        }
        self.current_index -= 1;
        Ok(self.entries[self.current_index].clone())
    }

    pub fn go_forward(&mut self) -> Result<Location> {
        if !self.can_go_forward() {
            return Err(NavError::NoHistory);
        }
        self.current_index += 1;
        Ok(self.entries[self.current_index].clone())
    }

    /// Move the pointer to an existing entry without touching the entries.
    pub fn jump(&mut self, index: usize) -> Result<Location> {
        let location = self.nth(index).cloned().ok_or(NavError::NoHistory)?;
        self.current_index = index;
        Ok(location)
    }

    pub fn can_go_back(&self) -> bool {
        !self.entries.is_empty() && self.current_index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        !self.entries.is_empty() && self.current_index < self.entries.len() - 1
    }

    pub fn nth(&self, index: usize) -> Option<&Location> {
        self.entries.get(index)
    }

    pub fn current(&self) -> Option<&Location> {
        self.entries.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries for the history drop-down: `(index, location, is_current)`.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Location, bool)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(move |(i, loc)| (i, loc, i == self.current_index))
    }
}
