use regfield::layout::{validate, Device, FixedAddress, LayoutError, RegisterDescriptor};
use regfield::{Handle, Reserved};
use seq_macro::seq;

regfield::register_block! {
    pub struct Flags: 8 {
        pub state: [bool; 240] [1, 1, 0] = ro,
        pub set: [bool; 240] [1, 1, 0] = wo,
    }
}

regfield::register_block! {
    pub struct Priorities: 60 {
        pub priority: [u8; 240] [8, 8, 0] = rw,
    }
}

regfield::register! {
    pub struct Trigger {
        pub id: u16 [0; 9] = wo,
    }
}

regfield::device! {
    /// An interrupt controller laid out like the Cortex-M3 NVIC.
    pub struct Controller {
        base: 0xe000_e100,
        size: 0xe04,
        regs: {
            0x000 => pub enable: Flags,
            0x020 => _reserved0: [Reserved; 24],
            0x080 => pub disable: Flags,
            0x0a0 => _reserved1: [Reserved; 24],
            0x100 => pub pend: Flags,
            0x120 => _reserved2: [Reserved; 24],
            0x180 => pub unpend: Flags,
            0x1a0 => _reserved3: [Reserved; 24],
            0x200 => pub active: Flags,
            0x220 => _reserved4: [Reserved; 56],
            0x300 => pub priorities: Priorities,
            0x3f0 => _reserved5: [Reserved; 644],
            0xe00 => pub trigger: Trigger,
        },
    }
}

fn controller() -> Controller {
    // SAFETY: the layout is made only of words, for which all-zero is valid.
    unsafe { core::mem::zeroed() }
}

#[test]
fn size_matches_the_address_map() {
    let words = 8 + 24 + 8 + 24 + 8 + 24 + 8 + 24 + 8 + 56 + 60 + 644 + 1;
    assert_eq!(core::mem::size_of::<Controller>(), 4 * words);
    assert_eq!(Controller::END - Controller::BASE, 4 * words);
    assert_eq!(Controller::END, 0xe000_ef04);
    assert_eq!(Controller::validate_layout(), Ok(()));
}

#[test]
fn descriptors_follow_declaration_order() {
    let names: Vec<_> = Controller::REGISTERS.iter().map(|r| r.name).collect();
    assert_eq!(names.first(), Some(&"enable"));
    assert_eq!(names.last(), Some(&"trigger"));
    assert_eq!(
        Controller::register("priorities"),
        Some(&RegisterDescriptor {
            name: "priorities",
            offset: 0x300,
            size: 240,
        }),
    );
    assert_eq!(Controller::register("_reserved5").map(|r| r.size), Some(644 * 4));
}

#[test]
fn validate_catches_a_shifted_member() {
    let mut registers = Controller::REGISTERS.to_vec();
    registers[2].offset += 4;
    assert_eq!(
        validate(&registers, Controller::SIZE),
        Err(LayoutError::Gap {
            name: "disable",
            offset: 0x84,
            expected: 0x80,
        }),
    );
}

#[test]
fn flag_table_indexing() {
    let device = controller();
    let handle = Handle::new(&device);
    seq!(I in 0..240 {
        handle.enable.set().write(I, true);
        assert!(handle.enable.state().get(I));
        assert_eq!(
            handle.enable.block().words()[I / 32].load(),
            1 << (I % 32),
        );
    });
    assert!(!handle.enable.state().get(240));
}

#[test]
fn priority_table_boundaries() {
    let device = controller();
    let priorities = device.priorities.priority();
    priorities.set(239, 0xa0);
    priorities.set(240, 0xff);
    assert_eq!(priorities.get(239), 0xa0);
    assert_eq!(priorities.get(240), 0);
    assert_eq!(device.priorities.block().words()[59].load(), 0xa000_0000);
    assert!(priorities.values().take(239).all(|p| p == 0));
}

#[test]
fn handles_do_not_copy_the_device() {
    let device = controller();
    let a = Handle::new(&device);
    let b = a;
    a.trigger.id().set(17);
    b.disable.set().write(3, true);
    assert!(a.disable.state().get(3));
    assert_eq!(a.address(), b.address());
}
