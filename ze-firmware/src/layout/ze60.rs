//! Stock tables for the 5x14 Ze60 board. Columns are wired right to left, so column 0 is the
//! rightmost switch of each row.

use ze_common::keycodes::*;

use super::Layout;
use crate::key::Key;

pub const ROWS: usize = 5;
pub const COLS: usize = 14;
pub const KEY_SLOTS: usize = 6;
pub const RAW_KEYS: usize = ROWS * COLS;

const X: Key = Key::DUMMY;

const fn k(code: u16) -> Key {
    Key::new(code)
}

const fn k2(code: u16, second: u16) -> Key {
    Key::from_codes(code, second, KEY_DUMMY)
}

const fn k3(code: u16, second: u16, third: u16) -> Key {
    Key::from_codes(code, second, third)
}

#[rustfmt::skip]
const ROW_1: [Key; COLS] = [
    X, k(KEY_RIGHT_BRACE), k(KEY_LEFT_BRACE), k(KEY_P), k(KEY_O), k(KEY_I), k(KEY_U), k(KEY_Y),
    k(KEY_T), k(KEY_R),
    k3(KEY_E, KEY_DUMMY, KEYPAD_9), k3(KEY_W, KEY_DUMMY, KEYPAD_8), k3(KEY_Q, KEY_DUMMY, KEYPAD_7),
    k(KEY_TAB),
];

#[rustfmt::skip]
const ROW_2: [Key; COLS] = [
    k(KEY_ENTER), k(KEY_BACKSLASH), k(KEY_QUOTE), k(KEY_SEMICOLON), k2(KEY_L, KEY_UP), k(KEY_K),
    k(KEY_J), k(KEY_H), k(KEY_G), k(KEY_F),
    k3(KEY_D, KEY_DUMMY, KEYPAD_6), k3(KEY_S, KEY_DUMMY, KEYPAD_5), k3(KEY_A, KEY_DUMMY, KEYPAD_4),
    k(KEY_CAPS_LOCK),
];

#[rustfmt::skip]
const ROW_3: [Key; COLS] = [
    k(KEY_RSHIFT), X, k2(KEY_SLASH, KEY_RIGHT), k2(KEY_PERIOD, KEY_DOWN), k2(KEY_COMMA, KEY_LEFT),
    k(KEY_M), k(KEY_N), k(KEY_B), k(KEY_V),
    k3(KEY_C, KEY_DUMMY, KEYPAD_3), k3(KEY_X, KEY_DUMMY, KEYPAD_2), k3(KEY_Z, KEY_DUMMY, KEYPAD_1),
    k3(KEY_NON_US_BS, KEY_DUMMY, KEYPAD_0), k(KEY_LSHIFT),
];

#[rustfmt::skip]
const ROW_4: [Key; COLS] = [
    k(KEY_CTRL), k(KEY_FN), k(KEY_FN2), k(KEY_ALTGR), X, X, X, k(KEY_SPACE), X, X, X,
    k(KEY_ALT), k(KEY_SUPER), k(KEY_CTRL),
];

/// Digits on the base layer, F-keys behind FN; keypad behind FN2 on the left hand.
#[rustfmt::skip]
pub static ZE60_MAIN: Layout<ROWS, COLS> = Layout::new([
    [
        k(KEY_BACKSPACE), k2(KEY_EQUAL, KEY_F12), k2(KEY_MINUS, KEY_F11), k2(KEY_0, KEY_F10),
        k2(KEY_9, KEY_F9), k2(KEY_8, KEY_F8), k2(KEY_7, KEY_F7), k2(KEY_6, KEY_F6),
        k2(KEY_5, KEY_F5), k2(KEY_4, KEY_F4), k2(KEY_3, KEY_F3), k2(KEY_2, KEY_F2),
        k2(KEY_1, KEY_F1), k2(KEY_ESC, KEY_TILDE),
    ],
    ROW_1,
    ROW_2,
    ROW_3,
    ROW_4,
]);

/// [`ZE60_MAIN`] with the number row swapped: F-keys on the base layer, digits behind FN.
#[rustfmt::skip]
pub static ZE60_SPECIAL: Layout<ROWS, COLS> = Layout::new([
    [
        k(KEY_BACKSPACE), k2(KEY_F12, KEY_EQUAL), k2(KEY_F11, KEY_MINUS), k2(KEY_F10, KEY_0),
        k2(KEY_F9, KEY_9), k2(KEY_F8, KEY_8), k2(KEY_F7, KEY_7), k2(KEY_F6, KEY_6),
        k2(KEY_F5, KEY_5), k2(KEY_F4, KEY_4), k2(KEY_F3, KEY_3), k2(KEY_F2, KEY_2),
        k2(KEY_F1, KEY_1), k2(KEY_ESC, KEY_TILDE),
    ],
    ROW_1,
    ROW_2,
    ROW_3,
    ROW_4,
]);
