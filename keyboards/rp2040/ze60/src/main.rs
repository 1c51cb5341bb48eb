#![no_std]
#![no_main]

use panic_probe as _;

use ze_builder::layout::{ze60, Layout};

// ---------------- User Config ------------------
const ROWS: usize = ze60::ROWS;
const COLS: usize = ze60::COLS;
const RAW_KEYS: usize = ze60::RAW_KEYS;

static LAYOUT: &Layout<ROWS, COLS> = &ze60::ZE60_MAIN;

const SCAN_PERIOD_MICROS: u64 = 1000;
const REPORT_BUFFER_SIZE: usize = 8;

static CONFIG_BUILDER: ze_builder::usb::ConfigBuilder = ze_builder::usb::ConfigBuilder {
    vendor_id: 0x1209,
    product_id: 0x5a60,
    manufacturer: "Ze",
    product: "Ze60",
    serial_number: "ze:0001",
    max_power: 100,
    poll_ms: 1,
};

// Rows are driven, columns read; column 0 is the rightmost switch.
macro_rules! config_pins {
    (peripherals: $p:ident) => {
        ze_builder::config_matrix_pins_rp!(peripherals: $p,
            input: [PIN_8, PIN_9, PIN_10, PIN_11, PIN_12, PIN_14, PIN_15,
                PIN_16, PIN_17, PIN_18, PIN_19, PIN_20, PIN_21, PIN_22],
            output: [PIN_3, PIN_4, PIN_5, PIN_6, PIN_7])
    };
}

// ----------- End of user config ----------------

ze_builder::rp_run_keyboard! {}
