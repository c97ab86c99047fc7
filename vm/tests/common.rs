//! Shared scaffolding for the integration tests: a scripted platform and
//! helpers for driving the VM through the wire protocol.
#![allow(dead_code)]

use std::collections::VecDeque;

use bytecode::event::{parse_events, Event};
use vm::{LoopbackTransport, Platform, Vm, VmConfig};

pub type TestVm = Vm<TestPlatform, LoopbackTransport>;

/// A platform whose hardware state is plain data the test can poke.
#[derive(Debug, Default)]
pub struct TestPlatform {
    pub pin_levels: Vec<(i16, bool)>,
    pub analog_writes: Vec<(i16, i16)>,
    pub attached: Vec<(u8, i16)>,
    pub detached: Vec<u8>,
    pub pending_interrupts: VecDeque<u8>,
    pub pending_receives: VecDeque<i16>,
    pub wire_rx: VecDeque<i16>,
    pub wire_tx: Vec<u8>,
    pub servo_micros: Vec<(i16, i16)>,
    pub millis: i16,
}

impl Platform for TestPlatform {
    fn pin_mode(&mut self, _pin: i16, _mode: i16) {}
    fn digital_read(&mut self, pin: i16) -> bool {
        self.pin_levels
            .iter()
            .rev()
            .find(|(p, _)| *p == pin)
            .is_some_and(|(_, high)| *high)
    }
    fn digital_write(&mut self, pin: i16, high: bool) {
        self.pin_levels.push((pin, high));
    }
    fn analog_read(&mut self, _pin: i16) -> i16 {
        0
    }
    fn analog_write(&mut self, pin: i16, value: i16) {
        self.analog_writes.push((pin, value));
    }

    fn milliseconds(&mut self) -> i16 {
        self.millis
    }
    fn pulse_in(&mut self, _pin: i16, _level: i16) -> i16 {
        0
    }

    fn attach_interrupt(&mut self, line: u8, mode: i16) {
        self.attached.push((line, mode));
    }
    fn detach_interrupt(&mut self, line: u8) {
        self.detached.push(line);
    }
    fn poll_interrupt(&mut self) -> Option<u8> {
        self.pending_interrupts.pop_front()
    }

    fn wire_begin(&mut self) {}
    fn wire_request_from(&mut self, _address: i16, _count: i16) {}
    fn wire_available(&mut self) -> i16 {
        self.wire_rx.len() as i16
    }
    fn wire_read(&mut self) -> i16 {
        self.wire_rx.pop_front().unwrap_or(0)
    }
    fn wire_begin_transmission(&mut self, _address: i16) {}
    fn wire_write(&mut self, value: u8) {
        self.wire_tx.push(value);
    }
    fn wire_end_transmission(&mut self) {}
    fn poll_wire_receive(&mut self) -> Option<i16> {
        self.pending_receives.pop_front()
    }
    fn poll_wire_request(&mut self) -> bool {
        false
    }

    fn servo_attach(&mut self, _pin: i16) {}
    fn servo_detach(&mut self, _pin: i16) {}
    fn servo_write_micros(&mut self, pin: i16, micros: i16) {
        self.servo_micros.push((pin, micros));
    }
}

/// A fresh VM with the boot event already drained.
pub fn boot() -> TestVm {
    boot_with(VmConfig::default())
}

pub fn boot_with(config: VmConfig) -> TestVm {
    let mut vm = Vm::new(config, TestPlatform::default(), LoopbackTransport::new());
    let boot = events(&mut vm);
    assert_eq!(boot.len(), 1);
    assert_eq!(boot[0].id, vm::BOOT_EVENT_ID);
    assert_eq!(boot[0].value(), 0);
    vm
}

/// Feed one wire frame and run a tick.
pub fn send(vm: &mut TestVm, frame: &[u8]) {
    vm.transport.feed(frame);
    vm.tick();
}

/// Drain and decode everything the VM has emitted.
pub fn events(vm: &mut TestVm) -> Vec<Event> {
    parse_events(&vm.transport.drain())
}
