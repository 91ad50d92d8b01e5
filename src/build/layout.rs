//! Incremental canvas layout.
//!
//! Objects are placed by relative offsets as they are appended. The main
//! cursor follows the primary chain from left to right. A positive vertical
//! offset opens a branch below the main line; the branch cursor then moves
//! on its own until an upward offset brings it back to (or above) the main
//! line, which closes the branch and moves the main cursor there.
//!
//! Input parameters sit on their own row above the flow.

use crate::microflow::Position;

/// Position of the start event.
pub const FLOW_ORIGIN: Position = Position::new(0, 100);
/// Parameters advance by this much along their row.
pub const PARAMETER_SPACING: i32 = 100;

#[derive(Debug, Clone)]
pub struct LayoutAllocator {
    main: Position,
    branch: Option<Position>,
    next_parameter: Position,
}

impl Default for LayoutAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutAllocator {
    pub fn new() -> Self {
        LayoutAllocator {
            main: FLOW_ORIGIN,
            branch: None,
            next_parameter: Position::new(0, 0),
        }
    }

    /// Apply `(dx, dy)` to the active cursor and return the new position.
    pub fn advance(&mut self, dx: i32, dy: i32) -> Position {
        match self.branch {
            None if dy > 0 => {
                let position = self.main.offset(dx, dy);
                self.branch = Some(position);
                position
            }
            None => {
                self.main = self.main.offset(dx, dy);
                self.main
            }
            Some(branch) => {
                let position = branch.offset(dx, dy);
                if position.y <= self.main.y {
                    self.branch = None;
                    self.main = position;
                } else {
                    self.branch = Some(position);
                }
                position
            }
        }
    }

    /// Position for the next input parameter.
    pub fn next_parameter(&mut self) -> Position {
        let position = self.next_parameter;
        self.next_parameter = position.offset(PARAMETER_SPACING, 0);
        position
    }

    pub fn main_cursor(&self) -> Position {
        self.main
    }

    pub fn in_branch(&self) -> bool {
        self.branch.is_some()
    }
}
