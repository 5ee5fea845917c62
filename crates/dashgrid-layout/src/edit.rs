//! Layout edits: add, move, resize, remove.
//!
//! A [`LayoutUpdate`] is the plain-data form of a user gesture. Applying one
//! returns the complete new layout; the caller's block list is never mutated.

use dashgrid_core::{Block, GridError, Position, Result, Size, find_block, validate_blocks};
use serde::{Deserialize, Serialize};
use tracing::debug_span;

use crate::compact::{Gravity, settle_unlocked};
use crate::engine::GridPlacementEngine;
use crate::occupancy::OccupancyIndex;

/// Top-left cell of an explicitly placed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    pub x: u32,
    pub y: u32,
}

/// One edit to a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutUpdate {
    /// Insert a block. Without an origin it goes to the first free slot.
    Add {
        id: String,
        size: Size,
        #[serde(default)]
        origin: Option<Origin>,
        #[serde(default)]
        locked: bool,
    },
    /// Move a block's origin.
    Move { id: String, x: u32, y: u32 },
    /// Change a block's size, keeping its origin.
    Resize { id: String, w: u32, h: u32 },
    /// Delete a block.
    Remove { id: String },
}

impl LayoutUpdate {
    /// Id of the block the update targets.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Add { id, .. }
            | Self::Move { id, .. }
            | Self::Resize { id, .. }
            | Self::Remove { id } => id,
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Move { .. } => "move",
            Self::Resize { .. } => "resize",
            Self::Remove { .. } => "remove",
        }
    }
}

impl GridPlacementEngine {
    /// Apply one edit and return the resolved layout.
    ///
    /// - `Add` rejects duplicate ids. With an origin the new block is clamped
    ///   into the grid and resolved like a drop at that cell. A locked block
    ///   is pushed below any locked block it would cover, then the unlocked
    ///   blocks are settled around it (pushed down only, in float mode).
    ///   Without an origin the block takes
    ///   [`find_best_position`](Self::find_best_position).
    /// - `Move`/`Resize` are rejected for locked blocks and on static grids,
    ///   then resolved with [`resolve_conflicts`](Self::resolve_conflicts).
    /// - `Remove` deletes the block; in compact mode the gap is closed.
    pub fn apply_update(&self, blocks: &[Block], update: &LayoutUpdate) -> Result<Vec<Block>> {
        let columns = self.columns();
        let _span = debug_span!(
            "dashgrid.apply_update",
            columns,
            blocks = blocks.len(),
            kind = update.kind(),
            id = update.id()
        )
        .entered();

        validate_blocks(blocks, columns)?;
        match update {
            LayoutUpdate::Add {
                id,
                size,
                origin,
                locked,
            } => {
                if id.is_empty() {
                    return Err(GridError::EmptyBlockId {
                        index: blocks.len(),
                    });
                }
                if find_block(blocks, id).is_some() {
                    return Err(GridError::DuplicateBlockId { id: id.clone() });
                }
                size.validate(columns)?;

                let position = match origin {
                    Some(origin) => {
                        let requested =
                            Position::from_size(origin.x.min(columns - size.w), origin.y, *size);
                        if *locked {
                            // Locked blocks never overlap each other.
                            OccupancyIndex::from_blocks(columns, blocks.iter().filter(|b| b.locked))
                                .push_down(requested)
                        } else {
                            requested
                        }
                    }
                    None => self.find_best_position(*size, blocks)?,
                };
                let mut out = blocks.to_vec();
                out.push(Block {
                    id: id.clone(),
                    position,
                    locked: *locked,
                });
                match origin {
                    // First fit never lands on anything.
                    None => Ok(out),
                    Some(_) if *locked => {
                        let gravity = if self.parameters().float() {
                            Gravity::Hold
                        } else {
                            Gravity::Rise
                        };
                        let occupied =
                            OccupancyIndex::from_blocks(columns, out.iter().filter(|b| b.locked));
                        Ok(settle_unlocked(out, occupied, gravity))
                    }
                    Some(_) => self.resolve_conflicts(&out, id),
                }
            }
            LayoutUpdate::Move { id, x, y } => {
                let (index, block) = self.editable(blocks, id)?;
                let mut out = blocks.to_vec();
                out[index].position = block.position.at(*x, *y);
                self.resolve_conflicts(&out, id)
            }
            LayoutUpdate::Resize { id, w, h } => {
                let (index, block) = self.editable(blocks, id)?;
                let size = Size::new(*w, *h);
                size.validate(columns)?;
                let mut out = blocks.to_vec();
                out[index].position = Position::from_size(block.position.x, block.position.y, size);
                self.resolve_conflicts(&out, id)
            }
            LayoutUpdate::Remove { id } => {
                let Some((index, _)) = find_block(blocks, id) else {
                    return Err(GridError::UnknownBlock { id: id.clone() });
                };
                let mut out = blocks.to_vec();
                out.remove(index);
                self.optimize_layout(&out)
            }
        }
    }

    /// Look up a block that a move or resize may touch.
    fn editable<'a>(&self, blocks: &'a [Block], id: &str) -> Result<(usize, &'a Block)> {
        let Some((index, block)) = find_block(blocks, id) else {
            return Err(GridError::UnknownBlock { id: id.to_string() });
        };
        if self.parameters().static_grid() {
            return Err(GridError::StaticGrid { id: id.to_string() });
        }
        if block.locked {
            return Err(GridError::LockedBlock { id: id.to_string() });
        }
        Ok((index, block))
    }
}

#[cfg(test)]
mod tests {
    use dashgrid_core::GridParameters;

    use super::*;

    fn engine(params: GridParameters) -> GridPlacementEngine {
        GridPlacementEngine::new(params).unwrap()
    }

    fn grid12() -> GridPlacementEngine {
        engine(GridParameters::new(12).unwrap())
    }

    fn block(id: &str, x: u32, y: u32, w: u32, h: u32) -> Block {
        Block::new(id, Position::new(x, y, w, h))
    }

    fn position_of(blocks: &[Block], id: &str) -> Position {
        find_block(blocks, id).unwrap().1.position
    }

    #[test]
    fn add_without_origin_uses_first_fit() {
        let blocks = vec![block("a", 0, 0, 4, 2)];
        let update = LayoutUpdate::Add {
            id: "b".into(),
            size: Size::new(4, 2),
            origin: None,
            locked: false,
        };
        let out = grid12().apply_update(&blocks, &update).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(position_of(&out, "b"), Position::new(4, 0, 4, 2));
    }

    #[test]
    fn add_with_origin_displaces_neighbours() {
        let blocks = vec![block("a", 0, 0, 4, 2)];
        let update = LayoutUpdate::Add {
            id: "b".into(),
            size: Size::new(4, 1),
            origin: Some(Origin { x: 2, y: 0 }),
            locked: false,
        };
        let out = grid12().apply_update(&blocks, &update).unwrap();
        assert_eq!(position_of(&out, "b"), Position::new(2, 0, 4, 1));
        assert_eq!(position_of(&out, "a"), Position::new(0, 1, 4, 2));
    }

    #[test]
    fn add_locked_with_origin_stays_put() {
        let blocks = vec![block("a", 0, 0, 4, 2)];
        let update = LayoutUpdate::Add {
            id: "pin".into(),
            size: Size::new(2, 1),
            origin: Some(Origin { x: 0, y: 0 }),
            locked: true,
        };
        let out = grid12().apply_update(&blocks, &update).unwrap();
        assert_eq!(position_of(&out, "pin"), Position::new(0, 0, 2, 1));
        assert_eq!(position_of(&out, "a"), Position::new(0, 1, 4, 2));
    }

    #[test]
    fn add_locked_in_float_mode_pushes_covered_block_down() {
        let float = engine(GridParameters::new(12).unwrap().with_float(true));
        let blocks = vec![block("a", 0, 0, 4, 2), block("b", 6, 5, 2, 1)];
        let update = LayoutUpdate::Add {
            id: "pin".into(),
            size: Size::new(2, 1),
            origin: Some(Origin { x: 0, y: 0 }),
            locked: true,
        };
        let out = float.apply_update(&blocks, &update).unwrap();
        assert_eq!(position_of(&out, "pin"), Position::new(0, 0, 2, 1));
        assert_eq!(position_of(&out, "a"), Position::new(0, 1, 4, 2));
        // Gaps stay open in float mode.
        assert_eq!(position_of(&out, "b"), Position::new(6, 5, 2, 1));
        assert!(crate::audit::check_layout(&out, 12).is_clean());
    }

    #[test]
    fn add_locked_never_covers_another_locked_block() {
        let blocks = vec![block("pin", 8, 0, 4, 2).locked()];
        let update = LayoutUpdate::Add {
            id: "pin2".into(),
            size: Size::new(3, 1),
            origin: Some(Origin { x: 11, y: 1 }),
            locked: true,
        };
        let out = grid12().apply_update(&blocks, &update).unwrap();
        // Clamped to x = 9, then pushed below the first pin.
        assert_eq!(position_of(&out, "pin2"), Position::new(9, 2, 3, 1));
        assert!(crate::audit::check_layout(&out, 12).is_clean());
    }

    #[test]
    fn add_rejects_duplicate_and_too_wide() {
        let blocks = vec![block("a", 0, 0, 1, 1)];
        let duplicate = LayoutUpdate::Add {
            id: "a".into(),
            size: Size::new(1, 1),
            origin: None,
            locked: false,
        };
        assert_eq!(
            grid12().apply_update(&blocks, &duplicate),
            Err(GridError::DuplicateBlockId { id: "a".into() })
        );

        let wide = LayoutUpdate::Add {
            id: "w".into(),
            size: Size::new(13, 1),
            origin: None,
            locked: false,
        };
        assert!(matches!(
            grid12().apply_update(&blocks, &wide),
            Err(GridError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn move_resolves_conflicts() {
        let blocks = vec![block("a", 0, 0, 4, 2), block("b", 4, 0, 4, 2)];
        let update = LayoutUpdate::Move {
            id: "b".into(),
            x: 0,
            y: 0,
        };
        let out = grid12().apply_update(&blocks, &update).unwrap();
        assert_eq!(position_of(&out, "b"), Position::new(0, 0, 4, 2));
        assert_eq!(position_of(&out, "a"), Position::new(0, 2, 4, 2));
    }

    #[test]
    fn resize_grows_into_neighbour() {
        let blocks = vec![block("a", 0, 0, 4, 2), block("b", 0, 2, 4, 2)];
        let update = LayoutUpdate::Resize {
            id: "a".into(),
            w: 4,
            h: 3,
        };
        let out = grid12().apply_update(&blocks, &update).unwrap();
        assert_eq!(position_of(&out, "a"), Position::new(0, 0, 4, 3));
        assert_eq!(position_of(&out, "b"), Position::new(0, 3, 4, 2));
    }

    #[test]
    fn locked_and_static_blocks_reject_edits() {
        let blocks = vec![block("pin", 0, 0, 2, 2).locked(), block("a", 2, 0, 2, 2)];
        let move_pin = LayoutUpdate::Move {
            id: "pin".into(),
            x: 4,
            y: 0,
        };
        assert_eq!(
            grid12().apply_update(&blocks, &move_pin),
            Err(GridError::LockedBlock { id: "pin".into() })
        );

        let static_grid = engine(GridParameters::new(12).unwrap().with_static_grid(true));
        let resize = LayoutUpdate::Resize {
            id: "a".into(),
            w: 3,
            h: 2,
        };
        assert_eq!(
            static_grid.apply_update(&blocks, &resize),
            Err(GridError::StaticGrid { id: "a".into() })
        );
    }

    #[test]
    fn remove_closes_gap() {
        let blocks = vec![block("a", 0, 0, 4, 2), block("b", 0, 2, 4, 2)];
        let out = grid12()
            .apply_update(&blocks, &LayoutUpdate::Remove { id: "a".into() })
            .unwrap();
        assert_eq!(out, vec![block("b", 0, 0, 4, 2)]);

        assert_eq!(
            grid12().apply_update(&blocks, &LayoutUpdate::Remove { id: "zz".into() }),
            Err(GridError::UnknownBlock { id: "zz".into() })
        );
    }

    #[test]
    fn updates_deserialize_from_tagged_json() {
        let update: LayoutUpdate =
            serde_json::from_str(r#"{"type":"move","id":"a","x":3,"y":1}"#).unwrap();
        assert_eq!(
            update,
            LayoutUpdate::Move {
                id: "a".into(),
                x: 3,
                y: 1
            }
        );
        let add: LayoutUpdate =
            serde_json::from_str(r#"{"type":"add","id":"n","size":{"w":2,"h":2}}"#).unwrap();
        assert_eq!(add.id(), "n");
    }
}
