extern crate std;

use ze_common::keycodes::*;

use super::*;

use crate::switch_test_stub::{KeyMatrix, Pin, SimMatrix, TestDelay};

fn layout_2x3() -> Layout<2, 3> {
    Layout::new([
        [Key::new(KEY_A), Key::DUMMY, Key::new(KEY_C)],
        [Key::new(KEY_D), Key::new(KEY_E), Key::new(KEY_F)],
    ])
}

macro_rules! setup {
    ($km:ident, $scanner:ident, $delay:ident $b:block) => {{
        let inputs = [Pin::new(1), Pin::new(2), Pin::new(3)];
        let outputs = [Pin::new(4), Pin::new(5)];
        let $km = KeyMatrix::new(std::vec::Vec::from(&inputs), std::vec::Vec::from(&outputs));
        let $delay = TestDelay::default();
        #[allow(unused_mut)]
        let mut $scanner = KeyScanner::new(PinMatrix::new(inputs, outputs), $delay.clone());

        $b
    }};
}

fn codes<const N: usize>(keys: &Vec<Key, N>) -> std::vec::Vec<u16> {
    keys.iter().map(|k| k.code()).collect()
}

#[test]
fn scan_order_is_row_major() {
    setup!(km, scanner, _delay {
        let layout = layout_2x3();
        km.down(1, 2);
        km.down(0, 2);
        km.down(1, 0);
        km.down(0, 0);

        let mut active = Vec::<Key, 6>::new();
        scanner.scan(&layout, &mut active);
        assert_eq!(codes(&active), [KEY_A, KEY_C, KEY_D, KEY_F]);

        km.up(0, 0);
        km.up(1, 2);
        let mut active = Vec::<Key, 6>::new();
        scanner.scan(&layout, &mut active);
        assert_eq!(codes(&active), [KEY_C, KEY_D]);
    });
}

#[test]
fn dummy_positions_are_skipped() {
    setup!(km, scanner, _delay {
        let layout = layout_2x3();
        km.down(0, 1);

        let mut active = Vec::<Key, 6>::new();
        scanner.scan(&layout, &mut active);
        assert!(active.is_empty());
    });
}

#[test]
fn rows_are_released_after_scan() {
    setup!(km, scanner, delay {
        let layout = layout_2x3();
        km.down(1, 1);

        let mut active = Vec::<Key, 6>::new();
        scanner.scan(&layout, &mut active);
        assert_eq!(codes(&active), [KEY_E]);

        assert_eq!(*delay.0.borrow(), [ROW_SETTLE_MICROS * 1000; 2]);

        let outputs = scanner.matrix().output_pins.clone();
        assert!(outputs.iter().all(|p| p.state() == Some(true)));
    });
}

#[test]
fn settle_time_is_configurable() {
    setup!(_km, scanner, delay {
        let mut scanner = scanner.settle_micros(20);
        let mut active = Vec::<Key, 6>::new();
        scanner.scan(&layout_2x3(), &mut active);
        assert_eq!(*delay.0.borrow(), [20_000, 20_000]);
    });
}

#[test]
fn raw_capacity_truncates() {
    setup!(km, scanner, _delay {
        let layout = layout_2x3();
        for (r, c) in [(0, 0), (0, 2), (1, 0), (1, 1), (1, 2)] {
            km.down(r, c);
        }

        let mut active = Vec::<Key, 3>::new();
        scanner.scan(&layout, &mut active);
        assert_eq!(codes(&active), [KEY_A, KEY_C, KEY_D]);
    });
}

#[test]
fn sim_matrix() {
    let matrix = SimMatrix::<2, 3>::default();
    let switches = matrix.switches();
    let delay = TestDelay::default();
    let mut scanner = KeyScanner::new(matrix, delay);
    let layout = layout_2x3();

    switches.down(0, 2);
    switches.down(0, 1);
    let mut active = Vec::<Key, 6>::new();
    scanner.scan(&layout, &mut active);
    assert_eq!(codes(&active), [KEY_C]);

    let log = &scanner.matrix().drive_log;
    assert_eq!(
        log.as_slice(),
        &[
            (0, PinState::Low),
            (0, PinState::High),
            (1, PinState::Low),
            (1, PinState::High)
        ]
    );
    assert_eq!(scanner.matrix().reads, 5, "dummy column is never read");
}
