pub use embassy_rp::{bind_interrupts, gpio, init, peripherals, usb};

/// Build the column inputs (pulled up) and row outputs (idle high) of a key matrix.
///
/// Evaluates to `(input_pins, output_pins)`, ready for [`ze_firmware::key_scanner::PinMatrix`].
#[macro_export]
macro_rules! config_matrix_pins_rp {
    (peripherals: $p:ident, input: [$($in_pin:ident), *], output: [$($out_pin:ident), +]) => {
        {
            use $crate::rp::gpio;
            let mut output_pins = [$(gpio::Output::new(gpio::AnyPin::from($p.$out_pin), gpio::Level::High)), +];
            let input_pins = [$(gpio::Input::new(gpio::AnyPin::from($p.$in_pin), gpio::Pull::Up)), *];
            output_pins.iter_mut().for_each(|p| {
                p.set_high();
            });
            (input_pins, output_pins)
        }
    };
}

/// Run a keyboard on an RP2040.
///
/// This macro adds a `main` function that builds the scanner and reporter tasks, spawns them and
/// runs the USB device. The calling crate must define:
///
/// * `ROWS`, `COLS` and `RAW_KEYS`: matrix dimensions and raw key capacity;
/// * `LAYOUT`: a `&'static Layout<ROWS, COLS>`;
/// * `SCAN_PERIOD_MICROS`: time between the start of two scan cycles;
/// * `REPORT_BUFFER_SIZE`: reports queued for the USB task before new ones are dropped;
/// * `CONFIG_BUILDER`: a [`crate::usb::ConfigBuilder`];
/// * a `config_pins!(peripherals: p)` macro evaluating to `(input_pins, output_pins)`, usually
///   with [`config_matrix_pins_rp!`].
///
/// # Example `main.rs`
///
/// ```rust
/// #![no_std]
/// #![no_main]
///
/// // consts and config_pins! ...
///
/// ze_builder::rp_run_keyboard! {}
/// ```
#[macro_export]
macro_rules! rp_run_keyboard {
    () => {
        use ze_builder::rp;
        use rp::{
            bind_interrupts,
            gpio::{Input, Output},
            peripherals::USB,
            usb::{Driver, InterruptHandler},
        };
        use ze_builder::embassy_time::{Delay, Duration, Ticker};
        use ze_builder::{board::Board, key_reporter, key_scanner, usb, NoopRawMutex, StaticCell};

        type ReportChannel = key_reporter::ReportChannel<
            NoopRawMutex,
            { key_reporter::REPORT_KEY_SLOTS },
            REPORT_BUFFER_SIZE,
        >;

        static REPORT_CHANNEL: StaticCell<ReportChannel> = StaticCell::new();

        static USB_BUFFERS: StaticCell<usb::UsbBuffers> = StaticCell::new();
        static USB_CONFIG: StaticCell<usb::Configurator> = StaticCell::new();
        static KEYBOARD_STATE: StaticCell<usb::State> = StaticCell::new();

        bind_interrupts!(struct Irqs {
            USBCTRL_IRQ => InterruptHandler<USB>;
        });

        #[embassy_executor::task]
        async fn scanner(
            input_pins: [Input<'static>; COLS],
            output_pins: [Output<'static>; ROWS],
            report_channel: &'static ReportChannel,
        ) {
            let scanner = key_scanner::KeyScanner::new(
                key_scanner::PinMatrix::new(input_pins, output_pins),
                Delay,
            );
            let mut board: Board<
                'static, _, _, _,
                ROWS, COLS, { key_reporter::REPORT_KEY_SLOTS }, RAW_KEYS,
            > = Board::new(scanner, LAYOUT, report_channel);

            let mut ticker = Ticker::every(Duration::from_micros(SCAN_PERIOD_MICROS));
            loop {
                board.update();
                ticker.next().await;
            }
        }

        #[embassy_executor::task]
        async fn hid_reporter(
            report_channel: &'static ReportChannel,
            hid_writer: usb::KeyboardWriter<'static, Driver<'static, USB>>,
        ) {
            key_reporter::Reporter::new(hid_writer).run(report_channel).await
        }

        #[embassy_executor::main]
        async fn main(spawner: embassy_executor::Spawner) -> ! {
            let p = ze_builder::rp::init(Default::default());
            let (input_pins, output_pins) = config_pins!(peripherals: p);

            let report_channel: &'static ReportChannel = REPORT_CHANNEL.init(ReportChannel::default());

            let driver = Driver::new(p.USB, Irqs);

            let usb_buffers: &'static mut usb::UsbBuffers = USB_BUFFERS.init(usb::UsbBuffers::default());
            let usb_config: &'static mut usb::Configurator = USB_CONFIG.init(CONFIG_BUILDER.usb_configurator());
            let keyboard_state: &'static mut usb::State = KEYBOARD_STATE.init(usb::State::new());

            let mut usb_builder = usb_config.usb_builder(driver, usb_buffers).unwrap();
            let hid_writer = CONFIG_BUILDER.keyboard_iface(usb_config, keyboard_state, &mut usb_builder);

            let mut usb = usb_builder.build();

            spawner.spawn(scanner(input_pins, output_pins, report_channel)).unwrap();
            spawner.spawn(hid_reporter(report_channel, hid_writer)).unwrap();

            usb.run().await
        }
    };
}
