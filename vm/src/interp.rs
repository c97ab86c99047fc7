use crate::error::VmError;
use crate::platform::Platform;
use crate::transport::Transport;
use crate::Vm;

/// The execution loop.
///
/// Each byte at `pc` is either a primitive (top bit clear, lower seven
/// bits index the dispatch table) or the first byte of a two-byte call
/// (top bit set, 15-bit big-endian target after masking the flag).
///
/// Calls push the return address unless the byte right after the call is a
/// `ret`, in which case the jump is a tail call and the frame is elided —
/// that is what lets a tail-recursive word loop forever on an
/// eight-cell return stack.
impl<P: Platform, T: Transport> Vm<P, T> {
    /// Execute the word at `address` to completion.
    ///
    /// The return stack is reset and seeded with the `-1` sentinel, so the
    /// word's final `ret` drives `pc` negative and ends the loop. A word
    /// that never returns runs forever; drive [`step`](Self::step) directly
    /// to bound execution.
    pub fn exec(&mut self, address: i16) {
        self.prepare(address);
        self.run();
    }

    /// Set up the stacks and program counter as `exec` does, without
    /// running. Pair with [`step`](Self::step).
    pub fn prepare(&mut self, address: i16) {
        self.rstack.clear();
        let _ = self.rstack.push(-1);
        self.pc = address;
    }

    /// Run until the program counter goes negative.
    pub fn run(&mut self) {
        while self.step() {}
    }

    /// Execute one instruction. Returns false once `pc` is negative.
    pub fn step(&mut self) -> bool {
        if self.pc < 0 {
            return false;
        }
        let byte = self.fetch_byte();
        if byte & 0x80 == 0 {
            if let Some(f) = self.table.get(byte) {
                if let Err(err) = f(self) {
                    self.report(err);
                }
            }
        } else {
            let lo = self.load_reported(self.pc);
            // Tail-call peek: a call directly followed by ret keeps the
            // return stack flat.
            if self.load_reported(self.pc.wrapping_add(1)) != 0 {
                if self.rstack.push(self.pc.wrapping_add(1)).is_err() {
                    self.report(VmError::ReturnStackOverflow);
                }
            }
            self.pc = (((byte as u16) << 8 & 0x7F00) | lo as u16) as i16;
        }
        true
    }

    fn fetch_byte(&mut self) -> u8 {
        let byte = self.load_reported(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    /// Load that reports a fault and reads as 0 — which is `ret`, so a
    /// runaway program counter unwinds instead of wedging the machine.
    fn load_reported(&mut self, addr: i16) -> u8 {
        match self.mem.load(addr) {
            Ok(byte) => byte,
            Err(err) => {
                self.report(err);
                0
            }
        }
    }
}
