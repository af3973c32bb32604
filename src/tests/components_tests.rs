#[cfg(test)]
mod point_tests {
    use crate::components::Point;

    #[test]
    fn test_translate_moves_in_place() {
        let mut point = Point::new(5, 10);
        point.translate(-2, 3);
        assert_eq!(point, Point::new(3, 13));

        // No bounds checking: negative coordinates are the caller's problem
        point.translate(-10, 0);
        assert_eq!(point, Point::new(-7, 13));
    }

    #[test]
    fn test_offset_leaves_original_untouched() {
        let point = Point::new(1, 2);
        let moved = point.offset(3, 4);
        assert_eq!(moved, Point::new(4, 6));
        assert_eq!(point, Point::new(1, 2));
    }

    #[test]
    fn test_equality_is_by_value() {
        assert_eq!(Point::new(2, 7), Point::new(2, 7));
        assert_ne!(Point::new(2, 7), Point::new(7, 2));
    }
}

#[cfg(test)]
mod block_tests {
    use ratatui::style::Color;

    use crate::components::{Block, GridError, Point};
    use crate::grid::Grid;

    #[test]
    fn test_floating_block_uses_own_point() {
        let mut block = Block::new(Color::Cyan, Some(Point::new(3, 4)));
        assert!(!block.is_anchored());
        assert_eq!(block.position(), Ok(Point::new(3, 4)));

        block.translate(1, 2);
        assert_eq!(block.position(), Ok(Point::new(4, 6)));
    }

    #[test]
    fn test_block_without_point_or_anchor_is_lost() {
        let block = Block::new(Color::Red, None);
        assert_eq!(block.position(), Err(GridError::BlockLost));
    }

    #[test]
    fn test_anchored_block_resolves_through_tile() {
        let mut grid = Grid::new(4, 4);
        let block = Block::new(Color::Green, Some(Point::new(0, 0)));

        let tile = grid.tile_mut(2, 3).unwrap();
        tile.set_block(block);

        // The own point is gone; position is the tile's point
        let anchored = grid.tile(2, 3).unwrap().block().unwrap();
        assert!(anchored.is_anchored());
        assert_eq!(anchored.position(), Ok(Point::new(2, 3)));
    }

    #[test]
    fn test_detached_block_is_lost_until_reanchored() {
        let mut grid = Grid::new(4, 4);
        let tile = grid.tile_mut(1, 1).unwrap();
        tile.set_block(Block::new(Color::Blue, Some(Point::new(1, 1))));

        let detached = grid.tile_mut(1, 1).unwrap().clear_block().unwrap();
        assert!(!detached.is_anchored());
        assert_eq!(detached.position(), Err(GridError::BlockLost));
    }

    #[test]
    fn test_stale_detach_is_a_no_op() {
        let mut block = Block::new(Color::Yellow, None);
        block.anchor_to(2, 2);

        // A detach naming a different tile must not clear the anchor
        block.detach_from(1, 2);
        assert!(block.is_anchored());
        assert_eq!(block.position(), Ok(Point::new(2, 2)));

        block.detach_from(2, 2);
        assert!(!block.is_anchored());
    }
}

#[cfg(test)]
mod tile_tests {
    use ratatui::style::Color;

    use crate::components::{Block, Point};
    use crate::grid::Grid;

    #[test]
    fn test_set_and_clear_block() {
        let mut grid = Grid::new(3, 3);

        assert!(!grid.tile(0, 0).unwrap().has_block());

        grid.tile_mut(0, 0)
            .unwrap()
            .set_block(Block::new(Color::Cyan, Some(Point::new(0, 0))));
        assert!(grid.tile(0, 0).unwrap().has_block());

        let removed = grid.tile_mut(0, 0).unwrap().clear_block();
        assert!(removed.is_some());
        assert!(!grid.tile(0, 0).unwrap().has_block());

        // Idempotent: clearing an empty tile does nothing
        assert!(grid.tile_mut(0, 0).unwrap().clear_block().is_none());
    }

    #[test]
    fn test_tile_point_matches_arena_index() {
        let grid = Grid::new(5, 7);
        for y in 0..7 {
            for x in 0..5 {
                assert_eq!(grid.tile(x, y).unwrap().point(), Point::new(x, y));
            }
        }
    }
}
