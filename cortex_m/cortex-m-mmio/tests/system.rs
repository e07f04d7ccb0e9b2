use cortex_m_mmio::system::{Hertz, Milliseconds, SystemClock};

static CLOCK: SystemClock = SystemClock::new(Hertz::mhz(25));

#[test]
fn default_frequency() {
    let clock = SystemClock::default();
    assert_eq!(clock.frequency(), Hertz(54_000_000));
    assert_eq!(clock.ticks_per_millisecond(), 54_000);
    assert_eq!(clock.now(), Milliseconds(0));
}

#[test]
fn ticks_are_milliseconds() {
    let start = CLOCK.now();
    for _ in 0..3 {
        CLOCK.increment_tick();
    }
    assert_eq!(CLOCK.tick(), 3);
    assert_eq!(CLOCK.now().since(start), Milliseconds(3));
    assert_eq!(CLOCK.ticks_per_millisecond(), 25_000);
}

#[test]
fn elapsed_time_survives_a_wrap() {
    assert_eq!(Milliseconds(2).since(Milliseconds(u32::MAX)), Milliseconds(3));
}

#[test]
fn hertz_display() {
    assert_eq!(Hertz::mhz(54).to_string(), "54 MHz");
    assert_eq!(Hertz::khz(1).to_string(), "1 kHz");
    assert_eq!(Hertz(1_500).to_string(), "1500 Hz");
    assert_eq!(Hertz(0).to_string(), "0 Hz");
}
