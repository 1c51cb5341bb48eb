use super::*;
use key_range::*;

#[test]
fn bands_do_not_overlap() {
    assert!(BASIC_MAX < CONSUMER_MIN);
    assert!(CONSUMER_MAX < LAYER_MIN);
    assert!((BASIC_MIN..=BASIC_MAX).contains(&MODIFIER_MIN));
    assert!((BASIC_MIN..=BASIC_MAX).contains(&MODIFIER_MAX));
    assert_eq!(base_code(KEY_FN), LAYER);
    assert_eq!(base_code(KEY_FN2), LAYER);
    assert_ne!(KEY_FN, KEY_FN2);
}

#[test]
fn named_codes() {
    assert_eq!(KEY_A, BASIC_A);
    assert_eq!(KEY_1, BASIC_1);
    assert_eq!(KEY_0, BASIC_0);
    assert_eq!(KEY_DUMMY, NO_KEY);
    assert_eq!(KEYPAD_7 - KEYPAD_1, 6);
    assert_eq!(KEY_F12 - KEY_F1, 11);

    for code in [KEY_MEDIA_MUTE, KEY_MEDIA_PLAY_PAUSE, KEY_MEDIA_VOLUME_DEC] {
        assert!((CONSUMER_MIN..=CONSUMER_MAX).contains(&code));
    }
}

#[test]
fn modifier_bits() {
    use modifiers::*;

    assert_eq!(modifier_bit(KEY_CTRL), Some(LEFT_CTRL));
    assert_eq!(modifier_bit(KEY_LSHIFT), Some(LEFT_SHIFT));
    assert_eq!(modifier_bit(KEY_ALT), Some(LEFT_ALT));
    assert_eq!(modifier_bit(KEY_SUPER), Some(LEFT_GUI));
    assert_eq!(modifier_bit(KEY_ALTGR), Some(RIGHT_ALT));
    assert_eq!(modifier_bit(KEY_RSHIFT), Some(RIGHT_SHIFT));
    assert_eq!(modifier_bit(KEY_RSUPER), Some(RIGHT_GUI));

    assert_eq!(modifier_bit(MODIFIER_MIN - 1), None);
    assert_eq!(modifier_bit(MODIFIER_MAX + 1), None);
    assert_eq!(modifier_bit(KEY_FN), None);

    let all = (MODIFIER_MIN..=MODIFIER_MAX)
        .filter_map(modifier_bit)
        .fold(0u8, |a, b| {
            assert_eq!(a & b, 0);
            a | b
        });
    assert_eq!(all, 0xff);
}
