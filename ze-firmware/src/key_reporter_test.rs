use embassy_futures::{
    block_on,
    select::{select, Either},
};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use ze_common::keycodes::*;

use crate::usb_test_stub::{MyDriver, MyEndpointIn};

use super::*;

extern crate alloc;
use alloc::vec;

macro_rules! setup {
    ($messages:ident, $rep:ident, $x:tt) => {
        block_on(async {
            let ep_in = MyEndpointIn::default();
            let $messages = ep_in.messages.clone();
            let hid_writer = HidWriter::<'_, MyDriver, REPORT_SIZE>::new(ep_in);
            let mut $rep = Reporter::new(hid_writer);

            $x
        });
    };
}

fn media_usage(code: u16) -> u16 {
    code - key_range::CONSUMER_MIN
}

#[test]
fn report_bytes() {
    let report = Report {
        keys: [KEY_A, KEY_B, 0, 0, 0, KEY_MEDIA_MUTE],
        modifiers: modifiers::LEFT_SHIFT | modifiers::RIGHT_ALT,
        media: media_usage(KEY_MEDIA_VOLUME_INC),
    };

    assert_eq!(
        report.to_bytes(),
        [1, 0x42, 0, KEY_A as u8, KEY_B as u8, 0, 0, 0, 0, 0xe9, 0]
    );
    assert_eq!(Report::<REPORT_KEY_SLOTS>::default().to_bytes(), [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn report_writes_one_packet() {
    setup!(messages, reporter, {
        let report = Report {
            keys: [KEY_H, KEY_I, 0, 0, 0, 0],
            modifiers: modifiers::LEFT_CTRL,
            media: 0x0cd,
        };
        reporter.report(&report).await.unwrap();

        assert_eq!(
            messages.get(),
            vec![1, 1, 0, KEY_H as u8, KEY_I as u8, 0, 0, 0, 0, 0xcd, 0]
        );
        assert!(messages.is_empty());
    });
}

#[test]
fn report_endpoint_error() {
    block_on(async {
        let ep_in = MyEndpointIn::default();
        ep_in.disabled.set(true);
        let mut reporter = Reporter::new(HidWriter::<'_, MyDriver, REPORT_SIZE>::new(ep_in));
        assert_eq!(
            reporter.report(&Report::default()).await,
            Err(EndpointError::Disabled)
        );
    });
}

#[test]
fn write_splits_into_packets() {
    block_on(async {
        let ep_in = MyEndpointIn::with_max_packet_size(8);
        let messages = ep_in.messages.clone();
        let mut writer = HidWriter::<'_, MyDriver, REPORT_SIZE>::new(ep_in);

        writer.write(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]).await.unwrap();
        assert_eq!(messages.get(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(messages.get(), vec![9, 10, 11]);
        assert!(messages.is_empty());
    });
}

#[test]
fn short_write_on_packet_boundary_adds_zlp() {
    block_on(async {
        let ep_in = MyEndpointIn::with_max_packet_size(8);
        let messages = ep_in.messages.clone();
        let mut writer = HidWriter::<'_, MyDriver, REPORT_SIZE>::new(ep_in);

        writer.write(&[1, 2, 3, 4, 5, 6, 7, 8]).await.unwrap();
        assert_eq!(messages.get(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(messages.get().is_empty());
        assert!(messages.is_empty());
    });
}

#[test]
fn oversized_write_is_rejected() {
    block_on(async {
        let ep_in = MyEndpointIn::default();
        let messages = ep_in.messages.clone();
        let mut writer = HidWriter::<'_, MyDriver, 4>::new(ep_in);

        assert_eq!(
            writer.write(&[1, 2, 3, 4, 5]).await,
            Err(EndpointError::BufferOverflow)
        );
        assert!(messages.is_empty());
    });
}

#[test]
fn channel_drops_when_full() {
    let channel = ReportChannel::<NoopRawMutex, REPORT_KEY_SLOTS, 2>::default();
    let mut emitter = &channel;

    for code in [KEY_A, KEY_B, KEY_C] {
        let mut report = Report::default();
        report.keys[0] = code;
        emitter.emit(&report);
    }

    block_on(async {
        assert_eq!(channel.receive().await.keys[0], KEY_A);
        assert_eq!(channel.receive().await.keys[0], KEY_B);
    });
    assert!(channel.0.try_receive().is_err());
}

#[test]
fn run_forwards_channel_reports() {
    setup!(messages, reporter, {
        let channel = ReportChannel::<NoopRawMutex, REPORT_KEY_SLOTS, 4>::default();
        let mut report = Report::default();
        report.keys[2] = KEY_Z;
        channel.try_send(report);

        match select(reporter.run(&channel), messages.receive()).await {
            Either::First(_) => unreachable!(),
            Either::Second(msg) => {
                assert_eq!(msg, vec![1, 0, 0, 0, 0, KEY_Z as u8, 0, 0, 0, 0, 0]);
            }
        }
    });
}
