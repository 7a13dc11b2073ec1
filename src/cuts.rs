//! Cuts

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::{
    config::CuttingSettings,
    lengths::Length,
    pool::{InventoryPool, PoolError},
    tally::InstalledTally,
};

/// Errors that can occur while resolving a cut.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CutError {
    /// The requested piece is shorter than the minimum cut.
    #[error("target of {target} is shorter than the minimum cut of {minimum}")]
    InvalidTarget {
        /// Requested piece length
        target: Length,

        /// Configured minimum cut
        minimum: Length,
    },

    /// No suitable board is available.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// One piece cut from a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cut {
    board: Length,
    length: Length,
    kerf: Length,
}

impl Cut {
    /// Create a cut of `length` from `board`, losing `kerf` to the saw.
    pub fn new(board: Length, length: Length, kerf: Length) -> Self {
        Cut {
            board,
            length,
            kerf,
        }
    }

    /// The board the piece was cut from.
    pub fn board(&self) -> Length {
        self.board
    }

    /// The installed length of the piece.
    pub fn length(&self) -> Length {
        self.length
    }

    /// Material used from the board, including the kerf.
    pub fn consumed(&self) -> Length {
        self.length + self.kerf
    }

    /// What is left of the board. Zero or negative when nothing remains.
    pub fn rest(&self) -> Length {
        self.board - self.consumed()
    }
}

impl fmt::Display for Cut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} / {:.2}", self.length, self.board)
    }
}

/// Turns target lengths into cuts against a shared pool.
///
/// The resolver borrows the pool and tally for the duration of a course, so
/// every cut it makes is visible to the next one.
#[derive(Debug)]
pub struct CutResolver<'a> {
    pool: &'a mut InventoryPool,
    installed: &'a mut InstalledTally,
    settings: CuttingSettings,
}

impl<'a> CutResolver<'a> {
    /// Create a resolver over `pool` that records pieces in `installed`.
    pub fn new(
        pool: &'a mut InventoryPool,
        installed: &'a mut InstalledTally,
        settings: CuttingSettings,
    ) -> Self {
        CutResolver {
            pool,
            installed,
            settings,
        }
    }

    /// The longest board currently in the pool.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Empty`] if the pool is exhausted.
    pub fn longest(&self) -> Result<Length, PoolError> {
        self.pool.largest()
    }

    /// Cut a piece of `target` length from the best-fitting board.
    ///
    /// Any positive offcut goes back into the pool, however short.
    ///
    /// # Errors
    ///
    /// - [`CutError::InvalidTarget`]: `target` is below the minimum cut.
    /// - [`CutError::Pool`]: no board is long enough. Neither the pool nor the
    ///   tally is modified in this case.
    pub fn resolve(&mut self, target: Length) -> Result<Cut, CutError> {
        if target < self.settings.minimum_cut {
            return Err(CutError::InvalidTarget {
                target,
                minimum: self.settings.minimum_cut,
            });
        }

        let board = self
            .pool
            .take_smallest_fitting(target, self.settings.tolerance)?;

        let cut = Cut::new(board, target, self.settings.kerf);

        self.installed.record(cut.length());

        let rest = cut.rest();

        if rest.is_positive() {
            self.pool.give(rest, 1);

            if rest < self.settings.minimum_cut {
                debug!(offcut = %rest, "keeping offcut shorter than the minimum cut");
            }
        }

        debug!(board = %board, length = %target, offcut = %rest, "cut");

        Ok(cut)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    fn settings() -> CuttingSettings {
        CuttingSettings {
            kerf: Length::new(Decimal::new(25, 2)),
            minimum_cut: Length::from(2),
            tolerance: Length::new(Decimal::new(5, 1)),
        }
    }

    fn pool(stock: &[(i64, u32)]) -> InventoryPool {
        InventoryPool::from_stock(
            stock
                .iter()
                .map(|&(length, count)| (Length::from(length), count)),
        )
    }

    #[test]
    fn cut_derives_consumed_and_rest() -> TestResult {
        let cut = Cut::new(Length::from(10), Length::from(6), "0.25".parse()?);

        assert_eq!(cut.consumed(), "6.25".parse()?);
        assert_eq!(cut.rest(), "3.75".parse()?);

        Ok(())
    }

    #[test]
    fn cut_display() -> TestResult {
        let cut = Cut::new(Length::from(67), "61.75".parse()?, "0.75".parse()?);

        assert_eq!(cut.to_string(), "61.75 / 67.00");

        Ok(())
    }

    #[test]
    fn resolve_returns_offcut_to_pool() -> TestResult {
        let mut pool = pool(&[(10, 1), (6, 1)]);
        let mut installed = InstalledTally::default();
        let mut resolver = CutResolver::new(&mut pool, &mut installed, settings());

        let cut = resolver.resolve(Length::from(6))?;

        assert_eq!(cut.board(), Length::from(10));
        assert_eq!(cut.length(), Length::from(6));
        assert_eq!(pool.count(Length::from(10)), 0);
        assert_eq!(pool.count("3.75".parse()?), 1);
        assert_eq!(installed.count(Length::from(6)), 1);

        Ok(())
    }

    #[test]
    fn resolve_keeps_tiny_offcuts() -> TestResult {
        let mut pool = pool(&[(7, 1)]);
        let mut installed = InstalledTally::default();
        let mut resolver = CutResolver::new(&mut pool, &mut installed, settings());

        resolver.resolve("6.5".parse()?)?;

        assert_eq!(pool.count("0.25".parse()?), 1);

        Ok(())
    }

    #[test]
    fn resolve_drops_non_positive_rest() -> TestResult {
        let mut pool = pool(&[(7, 1)]);
        let mut installed = InstalledTally::default();
        let settings = CuttingSettings {
            tolerance: "0.25".parse()?,
            ..settings()
        };
        let mut resolver = CutResolver::new(&mut pool, &mut installed, settings);

        // 7 - (6.75 + 0.25) == 0
        let cut = resolver.resolve("6.75".parse()?)?;

        assert_eq!(cut.rest(), Length::ZERO);
        assert!(pool.is_empty());

        Ok(())
    }

    #[test]
    fn resolve_rejects_short_targets() {
        let mut pool = pool(&[(10, 1)]);
        let mut installed = InstalledTally::default();
        let mut resolver = CutResolver::new(&mut pool, &mut installed, settings());

        let result = resolver.resolve(Length::from(1));

        assert_eq!(
            result,
            Err(CutError::InvalidTarget {
                target: Length::from(1),
                minimum: Length::from(2),
            })
        );
        assert_eq!(pool.count(Length::from(10)), 1);
        assert!(installed.is_empty());
    }

    #[test]
    fn out_of_stock_leaves_pool_and_tally_unchanged() {
        let mut pool = pool(&[(5, 1)]);
        let before = pool.clone();
        let mut installed = InstalledTally::default();
        let mut resolver = CutResolver::new(&mut pool, &mut installed, settings());

        let result = resolver.resolve(Length::from(6));

        assert_eq!(
            result,
            Err(CutError::Pool(PoolError::OutOfStock {
                target: Length::from(6)
            }))
        );
        assert_eq!(pool, before);
        assert!(installed.is_empty());
    }
}
