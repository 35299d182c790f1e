// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
/// A fixed-capacity, insertion-ordered set of sample indices for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    capacity: usize,
    entries: Vec<usize>,
}

impl Bucket {
    /// Creates an empty bucket holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Adds a sample if it is not already present and there is room.
    /// Returns whether the sample was added; a full bucket ignores every insert.
    pub fn insert(&mut self, sample: usize) -> bool {
        if self.is_full() || self.contains(sample) {
            return false;
        }
        self.entries.push(sample);
        true
    }

    pub fn contains(&self, sample: usize) -> bool {
        self.entries.contains(&sample)
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().copied()
    }
}
