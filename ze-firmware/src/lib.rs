#![no_std]
pub mod board;
pub mod hid;
pub mod key;
pub mod key_reporter;
pub mod key_scanner;
pub mod layout;
pub mod resolver;
pub mod slots;
pub mod usb;

#[cfg(any(test, feature = "test-utils"))]
pub mod switch_test_stub;
#[cfg(any(test, feature = "test-utils"))]
pub mod usb_test_stub;

#[macro_use]
mod macros;
