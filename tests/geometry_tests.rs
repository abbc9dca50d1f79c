//! Geometry tests - cell layout inside a client area

use wahoo::core::{board_rect, cell_rect, Rect, Size};

#[test]
fn test_cells_are_square() {
    for (w, h) in [(300, 440), (1080, 1920), (640, 480), (101, 999)] {
        let rect = cell_rect(Size::new(w, h), 20, 10, 2, 7, 3);
        assert_eq!(rect.width, rect.height, "{}x{}", w, h);
    }
}

#[test]
fn test_width_limited_layout() {
    // cx = (222 - 22) / 10 = 20, cy = (1000 - 42) / 20 = 47
    let size = Size::new(222, 1000);
    let rect = cell_rect(size, 20, 10, 2, 0, 0);
    assert_eq!(rect, Rect::new(2, 281, 20, 20));

    // total y = 22 * 20 + 2 = 442, top = (1000 - 442) / 2 = 279
    let board = board_rect(size, 20, 10, 2);
    assert_eq!(board, Rect::new(0, 279, 222, 442));
    let rect = cell_rect(size, 20, 10, 2, 0, 0);
    assert_eq!(rect.y, board.y + 2);
}

#[test]
fn test_board_is_centred() {
    let size = Size::new(500, 500);
    let board = board_rect(size, 20, 10, 2);
    let left_margin = board.x;
    let right_margin = size.width - board.right();
    assert!((left_margin - right_margin).abs() <= 1);
    let top_margin = board.y;
    let bottom_margin = size.height - board.bottom();
    assert!((top_margin - bottom_margin).abs() <= 1);
}

#[test]
fn test_cells_do_not_overlap() {
    let size = Size::new(300, 440);
    for row in 0..20 {
        for col in 0..9 {
            let a = cell_rect(size, 20, 10, 2, row, col);
            let b = cell_rect(size, 20, 10, 2, row, col + 1);
            assert_eq!(b.x - a.right(), 2);
            assert_eq!(a.y, b.y);
        }
    }
}

#[test]
fn test_zero_padding() {
    let rect = cell_rect(Size::new(100, 200), 20, 10, 0, 1, 1);
    assert_eq!(rect, Rect::new(10, 10, 10, 10));
}

#[test]
fn test_degenerate_inputs() {
    let size = Size::new(300, 440);
    assert_eq!(cell_rect(size, 0, 10, 2, 0, 0), Rect::default());
    assert_eq!(cell_rect(size, 20, -1, 2, 0, 0), Rect::default());
    assert!(cell_rect(Size::new(0, 0), 20, 10, 2, 0, 0).is_empty());
}
