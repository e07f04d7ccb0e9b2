use regfield::layout::{FieldDescriptor, Register};
use regfield::strategy::Composition;
use regfield::{AccessMode, Live, Staged};

regfield::field_enum! {
    pub enum Mode: 2 {
        Off = 0,
        Slow = 1,
        Fast = 2,
        Burst = 3,
    }
}

regfield::field_enum! {
    pub enum Command: 1 {
        Idle = 0,
        Clear = 1,
    }
}

regfield::register! {
    /// An eight-bit status byte in the low bits of a word.
    pub struct Status {
        pub ready: bool [1; 1] = rw,
        pub error: bool [3; 1] = rw,
        pub mode: Mode [4; 2] = rw,
        pub code: u8 [0; 8] = ro,
    }
}

regfield::register! {
    pub struct Interrupt {
        pub pending: bool [0; 1] = ro,
        pub clear: bool [0; 1] = wo as Command,
    }
}

regfield::register! {
    pub struct Divider {
        pub divisor: u32 [0; 20] = rw(masked),
        pub prescale: Mode [24; 2] = rw(direct),
        pub raw: u32 [0; 32] = rw,
    }
}

fn live<T>() -> T {
    // SAFETY: registers are plain words, for which all-zero is valid.
    unsafe { core::mem::zeroed() }
}

#[test]
fn bit_three_of_a_byte() {
    let status: Status<Live> = live();
    status.error().set(true);
    assert_eq!(status.code().get(), 0b0000_1000);
    assert!(!status.ready().get());
}

#[test]
fn direct_fields_keep_neighbours() {
    let status = Status::<Staged>::new(0xff);
    status.ready().set(false);
    assert_eq!(status.to_raw(), 0xfd);
    status.error().set(false);
    assert_eq!(status.to_raw(), 0xf5);
    status.ready().set(true);
    assert_eq!(status.to_raw(), 0xf7);
    assert_eq!(status.mode().get(), Mode::Burst);
}

#[test]
fn masked_enum_round_trip_from_zero() {
    for mode in [Mode::Off, Mode::Slow, Mode::Fast, Mode::Burst] {
        let status = Status::<Staged>::zero();
        status.mode().set(mode);
        assert_eq!(status.mode().get(), mode);
        assert_eq!(status.to_raw() & !0x30, 0);
    }
}

#[test]
fn masked_set_is_accumulating() {
    let divider: Divider<Live> = live();
    divider.divisor().set(0b1010);
    divider.divisor().set(0b0101);
    assert_eq!(divider.divisor().get(), 0b1111);

    divider.raw().set(0);
    divider.divisor().set(0b0101);
    assert_eq!(divider.divisor().get(), 0b0101);
}

#[test]
fn forced_direct_enum_overwrites() {
    let divider = Divider::<Staged>::zero();
    divider.prescale().set(Mode::Burst);
    divider.prescale().set(Mode::Slow);
    assert_eq!(divider.prescale().get(), Mode::Slow);
    assert_eq!(divider.to_raw(), 0x0100_0000);
}

#[test]
fn overlay_reads_state_and_writes_commands() {
    let interrupt: Interrupt<Live> = live();
    assert!(!interrupt.pending().get());
    interrupt.clear().write(Command::Clear);
    assert!(interrupt.pending().get());
}

#[test]
fn staged_commit_is_one_store() {
    let status: Status<Live> = live();
    let staged = Status::<Staged>::zero()
        .with_ready(true)
        .with_mode(Mode::Fast);
    assert_eq!(status.code().get(), 0);
    staged.commit(&status);
    assert_eq!(status.code().get(), 0b0010_0010);
    assert_eq!(status.read().to_raw(), staged.to_raw());
}

#[test]
fn modify_edits_a_snapshot() {
    let status: Status<Live> = live();
    status.error().set(true);
    status.modify(|staged| {
        assert!(staged.error().get());
        staged.error().set(false);
        staged.ready().set(true);
        assert!(!status.ready().get());
    });
    assert!(status.ready().get());
    assert!(!status.error().get());
}

#[test]
fn fields_compare_by_value() {
    let status = Status::<Staged>::new(0b0001_0010);
    assert!(status.mode() == Mode::Slow);
    assert!(status.ready() == true);
    assert!(true == status.ready());
    assert!(status.code() > 0x11u8);
    let other = Status::<Staged>::new(0b0001_0000);
    assert!(status.mode() == other.mode());
    assert!(status.code() > other.code());
}

#[test]
fn descriptors() {
    assert_eq!(<Status as Register>::NAME, "Status");
    assert_eq!(
        <Status as Register>::FIELDS[0],
        FieldDescriptor {
            name: "ready",
            offset: 1,
            width: 1,
            access: AccessMode::ReadWrite,
            composition: Composition::PaddedBitfield,
        },
    );
    let mode = Status::<Live>::field("mode").copied();
    assert_eq!(mode.map(|field| field.composition), Some(Composition::MaskedWord));
    let code = Status::<Live>::field("code").copied();
    assert_eq!(code.map(|field| field.access), Some(AccessMode::ReadOnly));
    assert_eq!(
        Interrupt::<Live>::field("clear").map(|field| field.access),
        Some(AccessMode::WriteOnly),
    );
    assert_eq!(
        Divider::<Live>::field("raw").map(|field| field.composition),
        Some(Composition::Bitfield),
    );
    assert!(Divider::<Live>::field("missing").is_none());
}

#[test]
fn staged_debug() {
    assert_eq!(format!("{:?}", Status::<Staged>::new(0x2a)), "Status(0x0000002a)");
}
