//! Inventory Pool

use std::{collections::BTreeMap, num::NonZeroU32, ops::Bound};

use thiserror::Error;

use crate::lengths::Length;

/// Errors raised when stock cannot be found in the pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// The pool has no boards left at all.
    #[error("the board pool is empty")]
    Empty,

    /// No board in the pool is long enough for the requested cut.
    #[error("no more boards for a {target:.2}\" cut")]
    OutOfStock {
        /// The cut length that could not be satisfied
        target: Length,
    },
}

/// Multiset of available board lengths.
///
/// Lengths are kept in ascending order. A length whose count drops to zero is
/// removed rather than stored with a zero count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryPool {
    boards: BTreeMap<Length, NonZeroU32>,
}

impl InventoryPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        InventoryPool::default()
    }

    /// Build a pool from `(length, count)` pairs.
    ///
    /// Pairs with a zero count or a non-positive length are skipped, repeated
    /// lengths are merged.
    pub fn from_stock(stock: impl IntoIterator<Item = (Length, u32)>) -> Self {
        let mut pool = InventoryPool::new();

        for (length, count) in stock {
            pool.give(length, count);
        }

        pool
    }

    /// The longest board currently available.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Empty`] if no boards remain.
    pub fn largest(&self) -> Result<Length, PoolError> {
        self.boards
            .last_key_value()
            .map(|(length, _count)| *length)
            .ok_or(PoolError::Empty)
    }

    /// Take the shortest board that is at least `target + tolerance` long.
    ///
    /// The board's count is decremented, and its entry removed once the last
    /// one is taken. On error the pool is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::OutOfStock`] if every board is too short.
    pub fn take_smallest_fitting(
        &mut self,
        target: Length,
        tolerance: Length,
    ) -> Result<Length, PoolError> {
        let minimum = target + tolerance;

        let board = self
            .boards
            .range((Bound::Included(minimum), Bound::Unbounded))
            .next()
            .map(|(length, _count)| *length)
            .ok_or(PoolError::OutOfStock { target })?;

        self.take(board);

        Ok(board)
    }

    /// Return `amount` boards of `length` to the pool.
    ///
    /// Non-positive lengths and zero amounts are ignored.
    pub fn give(&mut self, length: Length, amount: u32) {
        let Some(amount) = NonZeroU32::new(amount) else {
            return;
        };

        if !length.is_positive() {
            return;
        }

        self.boards
            .entry(length)
            .and_modify(|count| *count = count.saturating_add(amount.get()))
            .or_insert(amount);
    }

    /// Number of boards of exactly `length`.
    pub fn count(&self, length: Length) -> u32 {
        self.boards.get(&length).map_or(0, |count| count.get())
    }

    /// Iterate `(length, count)` pairs in ascending length order.
    pub fn iter(&self) -> impl Iterator<Item = (Length, u32)> + '_ {
        self.boards
            .iter()
            .map(|(length, count)| (*length, count.get()))
    }

    /// Combined length of every board in the pool.
    pub fn total_length(&self) -> Length {
        self.iter().map(|(length, count)| length * count).sum()
    }

    /// Number of individual boards in the pool.
    pub fn board_count(&self) -> u32 {
        self.boards
            .values()
            .fold(0_u32, |total, count| total.saturating_add(count.get()))
    }

    /// Number of boards shorter than `minimum`.
    ///
    /// Offcuts are returned to the pool whatever their size, so this counts
    /// the pieces that can never satisfy a cut of `minimum` or longer.
    pub fn count_shorter_than(&self, minimum: Length) -> u32 {
        self.boards
            .range(..minimum)
            .fold(0_u32, |total, (_length, count)| {
                total.saturating_add(count.get())
            })
    }

    /// Number of distinct lengths in the pool.
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Whether the pool has no boards.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    fn take(&mut self, length: Length) {
        if let Some(count) = self.boards.get_mut(&length) {
            match NonZeroU32::new(count.get() - 1) {
                Some(remaining) => *count = remaining,
                None => {
                    self.boards.remove(&length);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn pool(stock: &[(i64, u32)]) -> InventoryPool {
        InventoryPool::from_stock(
            stock
                .iter()
                .map(|&(length, count)| (Length::from(length), count)),
        )
    }

    #[test]
    fn largest_returns_longest_board() -> TestResult {
        let pool = pool(&[(16, 2), (67, 1), (35, 4)]);

        assert_eq!(pool.largest()?, Length::from(67));

        Ok(())
    }

    #[test]
    fn largest_on_empty_pool_errors() {
        assert_eq!(InventoryPool::new().largest(), Err(PoolError::Empty));
    }

    #[test]
    fn take_smallest_fitting_prefers_best_fit() -> TestResult {
        let mut pool = pool(&[(16, 1), (19, 1), (27, 1), (67, 1)]);
        let tolerance: Length = "0.5".parse()?;

        let board = pool.take_smallest_fitting(Length::from(18), tolerance)?;

        assert_eq!(board, Length::from(19));
        assert_eq!(pool.count(Length::from(19)), 0);
        assert_eq!(pool.len(), 3);

        Ok(())
    }

    #[test]
    fn take_smallest_fitting_respects_tolerance() -> TestResult {
        let mut pool = pool(&[(19, 1), (27, 1)]);
        let tolerance: Length = "0.5".parse()?;

        // 18.75 + 0.5 > 19, so the 19" board is too short
        let board = pool.take_smallest_fitting("18.75".parse()?, tolerance)?;

        assert_eq!(board, Length::from(27));

        Ok(())
    }

    #[test]
    fn take_smallest_fitting_accepts_exact_bound() -> TestResult {
        let mut pool = pool(&[(19, 1), (27, 1)]);

        let board = pool.take_smallest_fitting("18.5".parse()?, "0.5".parse()?)?;

        assert_eq!(board, Length::from(19));

        Ok(())
    }

    #[test]
    fn take_decrements_before_removing() -> TestResult {
        let mut pool = pool(&[(35, 2)]);

        pool.take_smallest_fitting(Length::from(30), Length::ZERO)?;
        assert_eq!(pool.count(Length::from(35)), 1);

        pool.take_smallest_fitting(Length::from(30), Length::ZERO)?;
        assert_eq!(pool.count(Length::from(35)), 0);
        assert!(pool.is_empty());

        Ok(())
    }

    #[test]
    fn out_of_stock_leaves_pool_unchanged() {
        let mut pool = pool(&[(5, 1)]);
        let before = pool.clone();

        let result = pool.take_smallest_fitting(Length::from(6), Length::ZERO);

        assert_eq!(
            result,
            Err(PoolError::OutOfStock {
                target: Length::from(6)
            })
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn give_ignores_non_positive_lengths() {
        let mut pool = InventoryPool::new();

        pool.give(Length::ZERO, 1);
        pool.give(Length::ZERO - Length::from(2), 1);
        pool.give(Length::from(4), 0);

        assert!(pool.is_empty());
    }

    #[test]
    fn give_increments_existing_length() -> TestResult {
        let mut pool = InventoryPool::new();
        let offcut: Length = "3.75".parse()?;

        pool.give(offcut, 1);
        pool.give("3.750".parse()?, 2);

        assert_eq!(pool.count(offcut), 3);
        assert_eq!(pool.len(), 1);

        Ok(())
    }

    #[test]
    fn totals() -> TestResult {
        let mut pool = pool(&[(67, 2), (16, 1)]);
        pool.give("1.5".parse()?, 3);

        assert_eq!(pool.total_length(), "154.5".parse()?);
        assert_eq!(pool.board_count(), 6);
        assert_eq!(pool.count_shorter_than(Length::from(5)), 3);

        Ok(())
    }

    #[test]
    fn iterates_in_ascending_order() {
        let pool = pool(&[(50, 1), (16, 2), (35, 1)]);

        let lengths: Vec<Length> = pool.iter().map(|(length, _count)| length).collect();

        assert_eq!(
            lengths,
            vec![Length::from(16), Length::from(35), Length::from(50)]
        );
    }
}
