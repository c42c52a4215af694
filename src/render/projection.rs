use crate::game::{Board, Cell};

/// Maps game cells onto a screen grid.
///
/// The mapping only goes from cells to screen positions. Nothing in the game
/// reads a screen position back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridProjection {
    /// Lowest playable coordinate on either axis
    origin: i32,
    side: usize,
}

impl GridProjection {
    pub fn new(board: Board) -> Self {
        let side = board.playable_side();
        Self {
            origin: -((side as i32 - 1) / 2),
            side,
        }
    }

    /// Rows and columns of the projected grid
    pub fn side(&self) -> usize {
        self.side
    }

    /// Screen (column, row) of a cell, or `None` if it is off the board
    pub fn project(&self, cell: Cell) -> Option<(usize, usize)> {
        let col = usize::try_from(cell.x - self.origin).ok()?;
        let row = usize::try_from(cell.z - self.origin).ok()?;
        (col < self.side && row < self.side).then_some((col, row))
    }
}
