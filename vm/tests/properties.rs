//! Property tests for the encoding rules and the bounds disciplines.

mod common;

use bytecode::event::parse_events;
use bytecode::frame;
use common::boot;
use proptest::prelude::*;
use vm::mem::Dictionary;
use vm::stack::Stack;
use vm::VmError;

proptest! {
    /// Scalar events pick the shortest body that round-trips the value.
    #[test]
    fn scalar_event_encoding(id: u8, value: i16) {
        let mut vm = boot();
        vm.event(id, value);
        let got = parse_events(&vm.transport.drain());
        prop_assert_eq!(got.len(), 1);
        prop_assert_eq!(got[0].id, id);
        prop_assert_eq!(got[0].value(), value);
        let expected_len = if value == 0 {
            0
        } else if i8::try_from(value).is_ok() {
            1
        } else {
            2
        };
        prop_assert_eq!(got[0].body.len(), expected_len);
    }

    /// No push/pop sequence can drive a stack past its capacity or below
    /// empty, and an overflow always leaves it empty.
    #[test]
    fn stack_depth_stays_bounded(ops in proptest::collection::vec(any::<Option<i16>>(), 0..64)) {
        let mut stack = Stack::new(8);
        for op in ops {
            match op {
                Some(value) => {
                    let depth = stack.depth();
                    match stack.push(value) {
                        Ok(()) => prop_assert_eq!(stack.depth(), depth + 1),
                        Err(_) => {
                            prop_assert_eq!(depth, 8);
                            prop_assert!(stack.is_empty());
                        }
                    }
                }
                None => {
                    let depth = stack.depth();
                    match stack.pop() {
                        Ok(_) => prop_assert_eq!(stack.depth(), depth - 1),
                        Err(_) => prop_assert_eq!(depth, 0),
                    }
                }
            }
            prop_assert!(stack.depth() <= 8);
        }
    }

    /// Every in-range store reads back; every out-of-range access faults
    /// and mutates nothing.
    #[test]
    fn dictionary_bounds(addr: i16, value: u8) {
        let mut mem = Dictionary::new(512);
        let result = mem.store(addr, value);
        if (0..512).contains(&addr) {
            prop_assert_eq!(result, Ok(()));
            prop_assert_eq!(mem.load(addr), Ok(value));
        } else {
            prop_assert_eq!(result, Err(VmError::OutOfMemory));
            prop_assert_eq!(mem.load(addr), Err(VmError::OutOfMemory));
            prop_assert!(mem.as_bytes().iter().all(|&b| b == 0));
        }
    }

    /// 16-bit stores are big-endian and round-trip.
    #[test]
    fn dictionary_sixteen_bit_round_trip(addr in 0i16..510, value: i16) {
        let mut mem = Dictionary::new(512);
        mem.store16(addr, value).unwrap();
        prop_assert_eq!(mem.load16(addr), Ok(value));
        let [hi, lo] = value.to_be_bytes();
        prop_assert_eq!(mem.load(addr), Ok(hi));
        prop_assert_eq!(mem.load(addr + 1), Ok(lo));
    }

    /// Every one-byte literal pushes its sign-extended value.
    #[test]
    fn lit8_sign_extends(byte: u8) {
        let mut vm = boot();
        vm.transport.feed(&frame::immediate(&[1, byte]));
        vm.tick();
        prop_assert_eq!(vm.data_stack(), [byte as i8 as i16]);
    }
}
