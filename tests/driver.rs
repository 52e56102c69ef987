mod common;

mod tests {
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    use embedded_hal::digital::{ErrorType, OutputPin};
    use myrtio_neopixel::{
        BitBangLine, ColorOrder, CycleDelay, DriverConfig, Instant, LATCH, NeoPixel,
        PhaseCycles, PulseLine, PulseTiming, Rgb, SetLineError, pack,
    };
    use smart_leds::SmartLedsWrite;

    use crate::common::{CaptureLine, SteppingClock, expected_pulses};

    const PHASES: PhaseCycles = PulseTiming::COM12999.to_cycles(16_000_000, 0);

    fn config(pixel_count: u16, order: ColorOrder) -> DriverConfig {
        DriverConfig {
            pixel_count,
            order,
            phases: PHASES,
        }
    }

    fn driver(pixel_count: u16, order: ColorOrder) -> NeoPixel<CaptureLine, SteppingClock> {
        NeoPixel::with_clock(
            &config(pixel_count, order),
            CaptureLine::new(),
            SteppingClock::new(0, 1),
        )
    }

    #[test]
    fn test_show_sends_device_order_bytes() {
        let mut strip = driver(1, ColorOrder::Grb);
        strip.set_pixel(0, 10, 20, 30);
        assert_eq!(strip.pixel(0), pack(10, 20, 30));

        strip.show();
        assert_eq!(
            strip.emitter().line().pulses,
            expected_pulses(&[20, 10, 30], (22, 6), (6, 22))
        );
    }

    #[test]
    fn test_begin_drives_line_low() {
        let mut strip = driver(1, ColorOrder::Rgb);
        strip.begin().unwrap();
        assert_eq!(strip.emitter().line().level_changes, 1);
        assert!(!strip.emitter().line().high);
    }

    #[test]
    fn test_empty_strip_does_not_transmit() {
        let mut strip = driver(0, ColorOrder::Rgb);
        assert!(strip.is_empty());
        strip.set_pixel_color(0, 0xFF_FFFF);
        strip.show();
        assert!(strip.emitter().line().pulses.is_empty());
        assert_eq!(strip.emitter().last_completion(), None);
    }

    #[test]
    fn test_brightness_delegation() {
        let mut strip = driver(1, ColorOrder::Rgb);
        strip.set_pixel(0, 200, 100, 50);
        strip.set_brightness(0);
        assert_eq!(strip.brightness(), 0);
        assert_eq!(strip.pixel(0), 0);
    }

    #[test]
    fn test_set_line_returns_previous_line() {
        let mut strip = driver(1, ColorOrder::Rgb);
        strip.set_pixel(0, 255, 0, 0);
        strip.show();

        let Ok(old) = strip.set_line(CaptureLine::new()) else {
            panic!("capture line cannot fail");
        };
        assert_eq!(old.pulses.len(), 24);
        assert_eq!(strip.emitter().line().level_changes, 1);
        assert!(strip.emitter().line().pulses.is_empty());

        strip.show();
        assert_eq!(strip.emitter().line().pulses.len(), 24);
        assert_eq!(strip.release().pulses.len(), 24);
    }

    #[test]
    fn test_smart_leds_write_fills_and_shows() {
        let mut strip = driver(2, ColorOrder::Grb);
        let colors = [Rgb::new(1, 2, 3), Rgb::new(4, 5, 6), Rgb::new(7, 8, 9)];
        strip.write(colors.iter().copied()).unwrap();

        assert_eq!(strip.pixel(0), pack(1, 2, 3));
        assert_eq!(strip.pixel(1), pack(4, 5, 6));
        assert_eq!(strip.pixels().as_bytes(), &[2, 1, 3, 5, 4, 6]);
        assert_eq!(strip.emitter().line().pulses.len(), 48);
    }

    #[test]
    fn test_back_to_back_shows_respect_latch() {
        #[derive(Default)]
        struct TimedLine {
            stamps: Vec<Instant>,
        }

        impl PulseLine for TimedLine {
            type Error = Infallible;

            fn set_low(&mut self) -> Result<(), Self::Error> {
                Ok(())
            }

            fn pulse(&mut self, _high: u32, _low: u32) {
                self.stamps.push(Instant::now());
            }
        }

        let mut strip = NeoPixel::new(&config(1, ColorOrder::Grb), TimedLine::default());
        strip.set_pixel(0, 1, 2, 3);
        strip.show();
        strip.show();

        let stamps = &strip.emitter().line().stamps;
        assert_eq!(stamps.len(), 48);
        let gap = stamps[24].duration_since(stamps[23]);
        assert!(gap >= LATCH, "gap was {gap:?}");
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        High,
        Low,
        Delay(u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct LogPin(Log);

    impl ErrorType for LogPin {
        type Error = Infallible;
    }

    impl OutputPin for LogPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(Event::Low);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.borrow_mut().push(Event::High);
            Ok(())
        }
    }

    struct LogDelay(Log);

    impl CycleDelay for LogDelay {
        fn delay_cycles(&mut self, cycles: u32) {
            self.0.borrow_mut().push(Event::Delay(cycles));
        }
    }

    #[test]
    fn test_bit_bang_line_pulse() {
        let log = Log::default();
        let mut line = BitBangLine::new(LogPin(log.clone()), LogDelay(log.clone()));

        line.set_low().unwrap();
        line.pulse(22, 6);

        assert_eq!(
            log.borrow().as_slice(),
            &[
                Event::Low,
                Event::High,
                Event::Delay(22),
                Event::Low,
                Event::Delay(6),
            ]
        );
    }

    #[test]
    fn test_bit_bang_strip_frame() {
        let log = Log::default();
        let line = BitBangLine::new(LogPin(log.clone()), LogDelay(log.clone()));
        let mut strip = NeoPixel::with_clock(
            &config(1, ColorOrder::Rgb),
            line,
            SteppingClock::new(0, 1),
        );
        strip.begin().unwrap();
        strip.set_pixel(0, 0x80, 0, 0);
        strip.show();

        let log = log.borrow();
        assert_eq!(log[0], Event::Low);
        assert_eq!(&log[1..5], &[Event::High, Event::Delay(22), Event::Low, Event::Delay(6)]);
        assert_eq!(&log[5..9], &[Event::High, Event::Delay(6), Event::Low, Event::Delay(22)]);
        assert_eq!(log.len(), 1 + 24 * 4);
        assert_eq!(log.last(), Some(&Event::Delay(22)));
        assert_eq!(log[log.len() - 2], Event::Low);
    }

    #[test]
    fn test_fn_pointer_delay() {
        fn spin(_cycles: u32) {}

        let log = Log::default();
        let mut line = BitBangLine::new(LogPin(log.clone()), spin as fn(u32));
        line.pulse(1, 2);
        assert_eq!(log.borrow().as_slice(), &[Event::High, Event::Low]);
        let (_pin, _delay) = line.release();
    }

    #[test]
    fn test_set_line_error_returns_line() {
        struct BrokenLine;

        impl PulseLine for BrokenLine {
            type Error = ();

            fn set_low(&mut self) -> Result<(), Self::Error> {
                Err(())
            }

            fn pulse(&mut self, _high: u32, _low: u32) {}
        }

        let mut strip = NeoPixel::new(&config(1, ColorOrder::Rgb), BrokenLine);
        assert_eq!(strip.begin(), Err(()));
        let Err(SetLineError { line: BrokenLine, error: () }) = strip.set_line(BrokenLine) else {
            panic!("broken line must be rejected");
        };
    }
}
