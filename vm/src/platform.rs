/// The hardware capability surface the VM's platform words consume.
///
/// Every method is a thin adapter for one primitive; semantics beyond what
/// the doc comments state are inherited from the implementation. Interrupt
/// and I²C callback delivery is polled: the VM asks for pending work from
/// its cooperative tick, so handler words never preempt a running word.
pub trait Platform {
    fn pin_mode(&mut self, pin: i16, mode: i16);
    fn digital_read(&mut self, pin: i16) -> bool;
    fn digital_write(&mut self, pin: i16, high: bool);
    fn analog_read(&mut self, pin: i16) -> i16;
    fn analog_write(&mut self, pin: i16, value: i16);

    /// Milliseconds since boot, truncated to a cell.
    fn milliseconds(&mut self) -> i16;
    /// Width of the next pulse at `level` on `pin`, in microseconds.
    fn pulse_in(&mut self, pin: i16, level: i16) -> i16;

    /// Enable an interrupt line; `mode` is the platform's trigger encoding.
    fn attach_interrupt(&mut self, line: u8, mode: i16);
    fn detach_interrupt(&mut self, line: u8);
    /// Next interrupt line that fired since the last poll, if any.
    fn poll_interrupt(&mut self) -> Option<u8>;

    fn wire_begin(&mut self);
    fn wire_request_from(&mut self, address: i16, count: i16);
    fn wire_available(&mut self) -> i16;
    /// Blocking read of the next bus byte.
    fn wire_read(&mut self) -> i16;
    fn wire_begin_transmission(&mut self, address: i16);
    fn wire_write(&mut self, value: u8);
    fn wire_end_transmission(&mut self);
    /// Byte count of a master write received since the last poll, if any.
    fn poll_wire_receive(&mut self) -> Option<i16>;
    /// Whether a master read request arrived since the last poll.
    fn poll_wire_request(&mut self) -> bool;

    fn servo_attach(&mut self, pin: i16);
    fn servo_detach(&mut self, pin: i16);
    fn servo_write_micros(&mut self, pin: i16, micros: i16);
}

/// A platform with no hardware: writes vanish, reads are zero, nothing
/// ever fires. Useful for tests and for hosting the VM off-board.
#[derive(Debug, Default)]
pub struct NullPlatform;

impl Platform for NullPlatform {
    fn pin_mode(&mut self, _pin: i16, _mode: i16) {}
    fn digital_read(&mut self, _pin: i16) -> bool {
        false
    }
    fn digital_write(&mut self, _pin: i16, _high: bool) {}
    fn analog_read(&mut self, _pin: i16) -> i16 {
        0
    }
    fn analog_write(&mut self, _pin: i16, _value: i16) {}

    fn milliseconds(&mut self) -> i16 {
        0
    }
    fn pulse_in(&mut self, _pin: i16, _level: i16) -> i16 {
        0
    }

    fn attach_interrupt(&mut self, _line: u8, _mode: i16) {}
    fn detach_interrupt(&mut self, _line: u8) {}
    fn poll_interrupt(&mut self) -> Option<u8> {
        None
    }

    fn wire_begin(&mut self) {}
    fn wire_request_from(&mut self, _address: i16, _count: i16) {}
    fn wire_available(&mut self) -> i16 {
        0
    }
    fn wire_read(&mut self) -> i16 {
        0
    }
    fn wire_begin_transmission(&mut self, _address: i16) {}
    fn wire_write(&mut self, _value: u8) {}
    fn wire_end_transmission(&mut self) {}
    fn poll_wire_receive(&mut self) -> Option<i16> {
        None
    }
    fn poll_wire_request(&mut self) -> bool {
        false
    }

    fn servo_attach(&mut self, _pin: i16) {}
    fn servo_detach(&mut self, _pin: i16) {}
    fn servo_write_micros(&mut self, _pin: i16, _micros: i16) {}
}
