//! Installed Tally

use std::collections::BTreeMap;

use crate::lengths::Length;

/// Count of every piece length installed on the wall.
///
/// Kept for reporting only; it never feeds back into allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledTally {
    pieces: BTreeMap<Length, u32>,
}

impl InstalledTally {
    /// Record one installed piece of `length`.
    pub fn record(&mut self, length: Length) {
        let count = self.pieces.entry(length).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Number of installed pieces of exactly `length`.
    pub fn count(&self, length: Length) -> u32 {
        self.pieces.get(&length).copied().unwrap_or(0)
    }

    /// Iterate `(length, count)` pairs in ascending length order.
    pub fn iter(&self) -> impl Iterator<Item = (Length, u32)> + '_ {
        self.pieces.iter().map(|(length, count)| (*length, *count))
    }

    /// Combined length of every installed piece.
    pub fn total_length(&self) -> Length {
        self.iter().map(|(length, count)| length * count).sum()
    }

    /// Number of installed pieces.
    pub fn piece_count(&self) -> u32 {
        self.pieces
            .values()
            .fold(0_u32, |total, count| total.saturating_add(*count))
    }

    /// Number of distinct installed lengths.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Whether nothing has been installed yet.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn record_accumulates_counts() -> TestResult {
        let mut tally = InstalledTally::default();

        tally.record(Length::from(6));
        tally.record("6.0".parse()?);
        tally.record(Length::from(4));

        assert_eq!(tally.count(Length::from(6)), 2);
        assert_eq!(tally.count(Length::from(4)), 1);
        assert_eq!(tally.count(Length::from(5)), 0);
        assert_eq!(tally.len(), 2);
        assert_eq!(tally.piece_count(), 3);
        assert_eq!(tally.total_length(), Length::from(16));

        Ok(())
    }

    #[test]
    fn new_tally_is_empty() {
        let tally = InstalledTally::default();

        assert!(tally.is_empty());
        assert_eq!(tally.total_length(), Length::ZERO);
    }
}
