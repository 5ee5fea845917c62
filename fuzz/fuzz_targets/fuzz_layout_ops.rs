#![no_main]

use arbitrary::Arbitrary;
use dashgrid_core::{Block, GridError, GridParameters, Size};
use dashgrid_layout::{GridPlacementEngine, LayoutUpdate, Origin, check_layout};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Place { w: u8, h: u8 },
    Drop { w: u8, h: u8, x: u8, y: u8 },
    Move { pick: u8, x: u8, y: u8 },
    Resize { pick: u8, w: u8, h: u8 },
    Remove { pick: u8 },
    Optimize,
    Adapt { columns: u8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    columns: u8,
    float: bool,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let mut columns = u32::from(input.columns % 24) + 1; // 1..=24
    let params = GridParameters::new(columns)
        .expect("columns >= 1")
        .with_float(input.float);
    let mut engine = GridPlacementEngine::new(params).expect("valid parameters");
    let mut blocks: Vec<Block> = Vec::new();
    let mut next_id = 0u32;

    for op in input.ops.into_iter().take(64) {
        let size = |w: u8, h: u8| Size::new(u32::from(w) % columns + 1, u32::from(h % 6) + 1);
        let pick = |i: u8| blocks.get(usize::from(i) % blocks.len().max(1)).map(|b| b.id.clone());

        let result = match op {
            Op::Place { w, h } => {
                let size = size(w, h);
                engine.find_best_position(size, &blocks).map(|position| {
                    next_id += 1;
                    let mut out = blocks.clone();
                    out.push(Block::new(format!("p{next_id}"), position));
                    out
                })
            }
            Op::Drop { w, h, x, y } => {
                next_id += 1;
                let update = LayoutUpdate::Add {
                    id: format!("d{next_id}"),
                    size: size(w, h),
                    origin: Some(Origin {
                        x: u32::from(x),
                        y: u32::from(y % 32),
                    }),
                    locked: false,
                };
                engine.apply_update(&blocks, &update)
            }
            Op::Move { pick: i, x, y } => match pick(i) {
                Some(id) => engine.apply_update(
                    &blocks,
                    &LayoutUpdate::Move {
                        id,
                        x: u32::from(x),
                        y: u32::from(y % 32),
                    },
                ),
                None => continue,
            },
            Op::Resize { pick: i, w, h } => match pick(i) {
                Some(id) => {
                    let size = size(w, h);
                    engine.apply_update(&blocks, &LayoutUpdate::Resize { id, w: size.w, h: size.h })
                }
                None => continue,
            },
            Op::Remove { pick: i } => match pick(i) {
                Some(id) => engine.apply_update(&blocks, &LayoutUpdate::Remove { id }),
                None => continue,
            },
            Op::Optimize => engine.optimize_layout(&blocks),
            Op::Adapt { columns: to } => {
                let to = u32::from(to % 24) + 1;
                let adapted = engine.adapt_layout_for_columns(&blocks, columns, to);
                if adapted.is_ok() {
                    let params = engine.parameters().with_columns(to);
                    engine.replace_parameters(params).expect("valid columns");
                    columns = to;
                }
                adapted
            }
        };

        match result {
            Ok(next) => blocks = next,
            Err(GridError::LockedBlock { .. }) => {}
            Err(err) => panic!("unexpected error: {err}"),
        }

        // Post-conditions that must always hold:
        let report = check_layout(&blocks, columns);
        assert!(report.is_clean(), "layout invariant broken: {report:?}");
        for block in &blocks {
            assert!(block.position.right() <= columns, "block OOB: {block:?}");
            assert!(block.position.w >= 1 && block.position.h >= 1);
        }
    }
});
