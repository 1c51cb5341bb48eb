use ze_common::keycodes::*;

use super::*;
use crate::key::{KeyClass, Layer};

#[test]
fn get() {
    let layout = Layout::<2, 3>::new([
        [Key::new(KEY_A), Key::DUMMY, Key::new(KEY_C)],
        [Key::new(KEY_FN), Key::new(KEY_E), Key::new(KEY_F)],
    ]);

    assert_eq!(layout.get(0, 0), Key::new(KEY_A));
    assert!(layout.get(0, 1).is_dummy());
    assert_eq!(layout.get(1, 2), Key::new(KEY_F));
    assert!(layout.get(2, 0).is_dummy());
    assert!(layout.get(0, 3).is_dummy());
    assert_eq!(layout.row(1).len(), 3);
    assert!(layout.row(5).is_empty());
    assert_eq!(layout.switch_count(), 5);
}

#[test]
fn ze60_main() {
    let layout = &ze60::ZE60_MAIN;

    let q = layout.get(1, 12);
    assert_eq!(q.code(), KEY_Q);
    assert_eq!(q.secondary(), None);
    assert_eq!(q.tertiary(), Some(KEYPAD_7));

    assert_eq!(layout.get(0, 12).secondary(), Some(KEY_F1));
    assert_eq!(layout.get(2, 4).secondary(), Some(KEY_UP));
    assert_eq!(layout.get(4, 1).class(), KeyClass::Layer(Layer::Fn));
    assert_eq!(layout.get(4, 2).class(), KeyClass::Layer(Layer::Fn2));
    assert_eq!(
        layout.get(3, 13).class(),
        KeyClass::Modifier(modifiers::LEFT_SHIFT)
    );

    for (row, col) in [(1, 0), (3, 1), (4, 4), (4, 5), (4, 6), (4, 8), (4, 9), (4, 10)] {
        assert!(layout.get(row, col).is_dummy(), "{row}x{col}");
    }
    assert_eq!(layout.switch_count(), ze60::RAW_KEYS - 8);
}

#[test]
fn ze60_special_swaps_number_row() {
    for col in 1..13 {
        let main = ze60::ZE60_MAIN.get(0, col);
        let special = ze60::ZE60_SPECIAL.get(0, col);
        assert_eq!(Some(special.code()), main.secondary());
        assert_eq!(special.secondary(), Some(main.code()));
    }

    for row in 1..ze60::ROWS {
        for col in 0..ze60::COLS {
            let main = ze60::ZE60_MAIN.get(row, col);
            let special = ze60::ZE60_SPECIAL.get(row, col);
            assert_eq!(main, special);
            assert_eq!(main.secondary(), special.secondary());
            assert_eq!(main.tertiary(), special.tertiary());
        }
    }
}
