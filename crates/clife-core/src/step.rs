//! Generation stepping: full swap and diff-reporting variants.
//!
//! Both variants compute every cell of the next generation into the
//! scratch buffer, reading only the current buffer, and then swap the two.
//! The diff variant validates the number of changed cells against the
//! caller's capacity before the swap; on overflow the swap never happens
//! and the grid is exactly as it was.

use tracing::{debug, trace};

use crate::error::StepError;
use crate::grid::Grid;
use crate::neighborhood::sample_cells;

/// One cell whose state changed during a generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellUpdate {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// State after the step.
    pub state: bool,
}

impl CellUpdate {
    /// Construct an update record.
    pub fn new(x: u32, y: u32, state: bool) -> Self {
        Self { x, y, state }
    }
}

impl Grid {
    /// Compute the next generation into `scratch` without committing it.
    ///
    /// `on_change` is called for every cell whose next state differs from
    /// its current state, in row-major order. Returns the number of changes.
    fn compute_next(&mut self, mut on_change: impl FnMut(CellUpdate)) -> Result<usize, StepError> {
        let table = self.table.as_ref().ok_or(StepError::RuleNotConfigured)?;
        let (width, height) = (self.width, self.height);
        let w = width as usize;
        let mut changed = 0;

        for y in 0..height {
            let row = w * y as usize;
            for x in 0..width {
                let idx = row + x as usize;
                let signature = sample_cells(&self.cells, width, height, x, y);
                let next = table.lookup(signature);
                self.scratch[idx] = next;
                if next != self.cells[idx] {
                    changed += 1;
                    on_change(CellUpdate::new(x, y, next));
                }
            }
        }
        Ok(changed)
    }

    /// Publish the scratch buffer as the current generation.
    fn commit(&mut self, changed: usize) {
        std::mem::swap(&mut self.cells, &mut self.scratch);
        self.generation += 1;
        trace!(generation = self.generation, changed, "generation committed");
    }

    /// Advance the grid one generation.
    ///
    /// Returns `Err(StepError::RuleNotConfigured)` if no rule is set; the
    /// grid is untouched in that case.
    pub fn step(&mut self) -> Result<(), StepError> {
        let changed = self.compute_next(|_| {})?;
        self.commit(changed);
        Ok(())
    }

    /// Advance `n` generations.
    pub fn step_n(&mut self, n: u64) -> Result<(), StepError> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// Advance one generation, writing changed cells into `out`.
    ///
    /// On success returns the number of records written; `out[..n]` holds
    /// exactly the changed cells in row-major order. If more cells change
    /// than `out` can hold, returns `Err(StepError::BufferTooSmall)` and the
    /// grid is not modified. Contents of `out` are unspecified after an
    /// error.
    ///
    /// Records are converted with `T::from`, so a caller-owned buffer of
    /// any record type built from [`CellUpdate`] is filled in place.
    pub fn step_with_updates_into<T: From<CellUpdate>>(
        &mut self,
        out: &mut [T],
    ) -> Result<usize, StepError> {
        let capacity = out.len();
        let mut written = 0;
        let changed = self.compute_next(|update| {
            if let Some(slot) = out.get_mut(written) {
                *slot = T::from(update);
                written += 1;
            }
        })?;

        if changed > capacity {
            debug!(required = changed, capacity, "diff step aborted");
            return Err(StepError::BufferTooSmall {
                required: changed,
                capacity,
            });
        }
        self.commit(changed);
        Ok(changed)
    }

    /// Advance one generation and return the changed cells.
    ///
    /// Same all-or-nothing contract as
    /// [`step_with_updates_into`](Grid::step_with_updates_into): at most
    /// `capacity` updates are accepted, otherwise the grid is left unchanged.
    pub fn step_with_updates(&mut self, capacity: usize) -> Result<Vec<CellUpdate>, StepError> {
        let mut updates = Vec::with_capacity(capacity.min(self.cell_count()));
        let changed = self.compute_next(|update| {
            if updates.len() < capacity {
                updates.push(update);
            }
        })?;

        if changed > capacity {
            debug!(required = changed, capacity, "diff step aborted");
            return Err(StepError::BufferTooSmall {
                required: changed,
                capacity,
            });
        }
        self.commit(changed);
        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;
    use proptest::prelude::*;

    fn conway(width: u32, height: u32, alive: &[(u32, u32)]) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        grid.set_default_rule().unwrap();
        for &(x, y) in alive {
            grid.set(x, y, true);
        }
        grid
    }

    fn live_cells(grid: &Grid) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.get(x, y) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn step_without_rule_fails_and_leaves_grid() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 1, true);
        assert_eq!(grid.step(), Err(StepError::RuleNotConfigured));
        assert_eq!(
            grid.step_with_updates(9),
            Err(StepError::RuleNotConfigured)
        );
        assert!(grid.get(1, 1));
        assert_eq!(grid.generation(), 0);
    }

    #[test]
    fn blinker_oscillates() {
        let mut grid = conway(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        grid.step().unwrap();
        assert_eq!(live_cells(&grid), vec![(2, 1), (2, 2), (2, 3)]);
        grid.step().unwrap();
        assert_eq!(live_cells(&grid), vec![(1, 2), (2, 2), (3, 2)]);
        assert_eq!(grid.generation(), 2);
    }

    #[test]
    fn block_is_still_life() {
        let mut grid = conway(4, 4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        let updates = grid.step_with_updates(0).unwrap();
        assert!(updates.is_empty());
        assert_eq!(live_cells(&grid), vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn single_cell_dies_under_empty_rule() {
        for initial in [false, true] {
            let mut grid = Grid::new(1, 1).unwrap();
            grid.configure(0, 0).unwrap();
            grid.set(0, 0, initial);
            grid.step().unwrap();
            assert!(!grid.get(0, 0));
        }
    }

    #[test]
    fn plus_shape_under_conway() {
        // Centre has 4 live neighbours and dies. Each arm and each corner
        // sees exactly 3, so arms survive and corners are born.
        //   . # .      # # #
        //   # # #  ->  # . #
        //   . # .      # # #
        let mut grid = conway(3, 3, &[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]);
        let updates = grid.step_with_updates(9).unwrap();
        assert_eq!(
            live_cells(&grid),
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)]
        );
        assert_eq!(
            updates,
            vec![
                CellUpdate::new(0, 0, true),
                CellUpdate::new(2, 0, true),
                CellUpdate::new(1, 1, false),
                CellUpdate::new(0, 2, true),
                CellUpdate::new(2, 2, true),
            ]
        );
    }

    #[test]
    fn overflow_leaves_grid_untouched() {
        let mut grid = conway(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        let before = grid.clone();
        assert_eq!(
            grid.step_with_updates(3),
            Err(StepError::BufferTooSmall {
                required: 4,
                capacity: 3
            })
        );
        assert_eq!(grid, before);
        assert_eq!(grid.generation(), 0);

        let mut out = [CellUpdate::default(); 2];
        assert!(grid.step_with_updates_into(&mut out).is_err());
        assert_eq!(grid, before);

        let mut empty: [CellUpdate; 0] = [];
        assert!(matches!(
            grid.step_with_updates_into(&mut empty),
            Err(StepError::BufferTooSmall { required: 4, capacity: 0 })
        ));
        assert_eq!(grid, before);
    }

    #[test]
    fn exact_capacity_succeeds() {
        let mut grid = conway(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        let mut out = [CellUpdate::default(); 4];
        let n = grid.step_with_updates_into(&mut out).unwrap();
        assert_eq!(n, 4);
        assert_eq!(
            out,
            [
                CellUpdate::new(2, 1, true),
                CellUpdate::new(1, 2, false),
                CellUpdate::new(3, 2, false),
                CellUpdate::new(2, 3, true),
            ]
        );
    }

    #[test]
    fn reconfigure_between_steps() {
        let mut grid = conway(3, 3, &[(1, 1)]);
        // B/S0: isolated live cells survive, nothing is born.
        grid.set_rule(Rule::new(0, 1)).unwrap();
        grid.step().unwrap();
        assert_eq!(live_cells(&grid), vec![(1, 1)]);
        grid.set_default_rule().unwrap();
        grid.step().unwrap();
        assert!(live_cells(&grid).is_empty());
    }

    fn arb_grid() -> impl Strategy<Value = (u32, u32, Vec<bool>, u16, u16)> {
        (1u32..10, 1u32..10, 0u16..512, 0u16..512).prop_flat_map(|(w, h, b, s)| {
            (
                Just(w),
                Just(h),
                proptest::collection::vec(any::<bool>(), (w * h) as usize),
                Just(b),
                Just(s),
            )
        })
    }

    fn build(width: u32, height: u32, bits: &[bool], born: u16, survive: u16) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        grid.configure(born, survive).unwrap();
        for y in 0..height {
            for x in 0..width {
                grid.set(x, y, bits[(x + width * y) as usize]);
            }
        }
        grid
    }

    /// Generic record type filled straight from the diff step.
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    struct Flip {
        index: u64,
        alive: bool,
    }

    impl From<CellUpdate> for Flip {
        fn from(u: CellUpdate) -> Self {
            Self {
                index: u64::from(u.x) + 5 * u64::from(u.y),
                alive: u.state,
            }
        }
    }

    #[test]
    fn updates_convert_into_caller_record_type() {
        let mut grid = conway(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        let mut out = [Flip::default(); 4];
        assert_eq!(grid.step_with_updates_into(&mut out), Ok(4));
        assert_eq!(
            out,
            [
                Flip { index: 7, alive: true },
                Flip { index: 11, alive: false },
                Flip { index: 13, alive: false },
                Flip { index: 17, alive: true },
            ]
        );
    }

    #[test]
    fn set_after_step_is_visible() {
        let mut grid = conway(4, 4, &[(1, 1), (2, 1), (1, 2)]);
        grid.step().unwrap();
        grid.set(3, 3, true);
        assert!(grid.get(3, 3));
        grid.set(1, 1, false);
        assert!(!grid.get(1, 1));

        grid.step_with_updates(16).unwrap();
        grid.set(0, 0, true);
        assert!(grid.get(0, 0));
    }

    proptest! {
        #[test]
        fn set_get_after_steps(
            (w, h, bits, born, survive) in arb_grid(),
            steps in 0usize..3,
            diff in any::<bool>(),
            writes in proptest::collection::vec((0u32..10, 0u32..10, any::<bool>()), 1..8),
        ) {
            let mut grid = build(w, h, &bits, born, survive);
            for _ in 0..steps {
                if diff {
                    grid.step_with_updates((w * h) as usize).unwrap();
                } else {
                    grid.step().unwrap();
                }
            }
            for (x, y, state) in writes {
                let (x, y) = (x % w, y % h);
                let before = grid.clone();
                grid.set(x, y, state);
                prop_assert_eq!(grid.get(x, y), state);
                // No other cell moves.
                for cy in 0..h {
                    for cx in 0..w {
                        if (cx, cy) != (x, y) {
                            prop_assert_eq!(grid.get(cx, cy), before.get(cx, cy));
                        }
                    }
                }
            }
        }

        #[test]
        fn diff_step_matches_full_step((w, h, bits, born, survive) in arb_grid()) {
            let before = build(w, h, &bits, born, survive);
            let mut full = before.clone();
            let mut diff = before.clone();

            full.step().unwrap();
            let updates = diff.step_with_updates((w * h) as usize).unwrap();
            prop_assert_eq!(&full, &diff);

            let mut expected = Vec::new();
            for y in 0..h {
                for x in 0..w {
                    if before.get(x, y) != full.get(x, y) {
                        expected.push(CellUpdate::new(x, y, full.get(x, y)));
                    }
                }
            }
            prop_assert_eq!(updates, expected);
        }

        #[test]
        fn undersized_buffer_is_atomic((w, h, bits, born, survive) in arb_grid()) {
            let mut grid = build(w, h, &bits, born, survive);
            let mut trial = grid.clone();
            let changed = trial.step_with_updates((w * h) as usize).unwrap().len();
            prop_assume!(changed > 0);

            let before = grid.clone();
            let result = grid.step_with_updates(changed - 1);
            prop_assert_eq!(
                result,
                Err(StepError::BufferTooSmall { required: changed, capacity: changed - 1 })
            );
            prop_assert_eq!(&grid, &before);
            prop_assert_eq!(grid.generation(), 0);
        }
    }
}
