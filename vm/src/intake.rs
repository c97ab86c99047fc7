use bytecode::frame::IMMEDIATE_FLAG;

use crate::error::VmError;
use crate::platform::Platform;
use crate::transport::Transport;
use crate::Vm;

/// Frame intake and the cooperative super-loop.
///
/// Inbound payload bytes go straight into the dictionary at `here`: the
/// dictionary is its own receive buffer. A definition stays where it
/// landed and moves `last` past it; an immediate fragment gets a forced
/// `ret`, runs from `last`, and its bytes become scratch again because
/// `here` is rewound before execution.
impl<P: Platform, T: Transport> Vm<P, T> {
    /// One pass of the super-loop: service at most one host frame, then
    /// pending interrupt lines and I²C callbacks, then the loop word.
    ///
    /// Everything here runs on the caller's thread to completion. Handler
    /// words share the stacks with the loop word and must leave them as
    /// they found them.
    pub fn tick(&mut self) {
        self.service_frame();
        self.service_interrupts();
        self.service_wire();
        if self.loopword >= 0 {
            self.exec(self.loopword);
            self.loop_iterations = self.loop_iterations.wrapping_add(1);
        }
    }

    /// Read one frame from the host, if a header byte is waiting.
    pub fn service_frame(&mut self) {
        if !self.transport.available() {
            return;
        }
        let header = self.transport.read_byte();
        let immediate = header & IMMEDIATE_FLAG != 0;
        let len = (header & 0x7F) as usize;

        let mut overflowed = false;
        for _ in 0..len {
            let byte = self.transport.read_byte();
            if !overflowed && self.mem.append(byte).is_err() {
                overflowed = true;
            }
        }
        // The immediate terminator counts against the same budget.
        if !overflowed && immediate && self.mem.append(0).is_err() {
            overflowed = true;
        }
        if overflowed {
            // The frame is already drained from the transport; drop its
            // bytes and leave the dictionary as it was.
            let last = self.mem.last();
            self.mem.set_here(last);
            self.report(VmError::OutOfMemory);
            tracing::debug!(len, immediate, "frame discarded: dictionary full");
            return;
        }

        if immediate {
            let start = self.mem.last();
            self.mem.set_here(start);
            tracing::debug!(len, at = start, "immediate frame");
            self.exec(start);
        } else {
            tracing::debug!(len, at = self.mem.last(), "definition committed");
            self.mem.commit();
        }
    }

    fn service_interrupts(&mut self) {
        while let Some(line) = self.platform.poll_interrupt() {
            let word = match self.isrs.get(line as usize) {
                Some(&word) => word,
                None => continue,
            };
            if word >= 0 {
                self.exec(word);
            }
        }
    }

    fn service_wire(&mut self) {
        while let Some(count) = self.platform.poll_wire_receive() {
            if self.on_receive >= 0 {
                if let Err(err) = self.push(count) {
                    self.report(err);
                }
                self.exec(self.on_receive);
            }
        }
        if self.platform.poll_wire_request() && self.on_request >= 0 {
            self.exec(self.on_request);
        }
    }
}
