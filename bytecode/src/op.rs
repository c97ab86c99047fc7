/// Primitive opcodes.
///
/// An instruction byte with the top bit clear indexes the VM's dispatch
/// table with its lower seven bits. A byte with the top bit set is instead
/// the first byte of a two-byte call; see [`Instr::Call`](crate::Instr).
///
/// Opcodes 0..=59 are the standard set below. Opcodes 60..=127 are free for
/// hosting applications to bind their own primitives; the handful of
/// conventional extension assignments used by the default VM (relative
/// branches, I²C, servos) live in [`ext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Op {
    /// Pop the return stack into the program counter.
    Ret = 0,
    /// Push the sign-extended operand byte.
    Lit8 = 1,
    /// Push the big-endian 16-bit operand.
    Lit16 = 2,
    /// Operand: body length. Push the address of the body and skip over it.
    Quote = 3,
    /// Begin a packed event; pops the event id.
    EventHeader = 4,
    /// Append one byte to the packed event; pops the value.
    EventBody8 = 5,
    /// Append a 16-bit value (high byte first) to the packed event.
    EventBody16 = 6,
    /// Emit the packed event and flush the transport.
    EventFooter = 7,
    /// Pop an id and a value, emit them as a scalar event.
    EventOp = 8,
    /// Replace the address on top of the stack with the byte it points at.
    Fetch8 = 9,
    /// Pop an address, pop a value, store the low byte at the address.
    Store8 = 10,
    /// Replace the address on top of the stack with a big-endian 16-bit load.
    Fetch16 = 11,
    /// Pop an address, pop a value, store it big-endian at the address.
    Store16 = 12,
    Add = 13,
    Sub = 14,
    Mul = 15,
    Div = 16,
    Mod = 17,
    And = 18,
    Or = 19,
    Xor = 20,
    /// Pop a count; negative shifts left, non-negative shifts right.
    Shift = 21,
    Eq = 22,
    Neq = 23,
    Gt = 24,
    Geq = 25,
    Lt = 26,
    Leq = 27,
    /// Bitwise complement of the top of stack.
    Not = 28,
    Neg = 29,
    Inc = 30,
    Dec = 31,
    Drop = 32,
    Dup = 33,
    Swap = 34,
    /// Pop `n`, push a copy of the `n`th item down (0 = dup).
    Pick = 35,
    /// Pop `n`, rotate the `n`th item down to the top (1 = swap).
    Roll = 36,
    /// Empty the data stack.
    Clr = 37,
    /// Move the top of the data stack to the return stack.
    Pushr = 38,
    /// Move the top of the return stack to the data stack.
    Popr = 39,
    /// Copy the top of the return stack to the data stack.
    Peekr = 40,
    /// Pop an address; if below `here`, rewind `here` to it.
    Forget = 41,
    /// Pop an address and call it.
    Call = 42,
    /// Pop false-quotation, true-quotation and predicate; call one of them.
    Choice = 43,
    /// Pop a quotation and a predicate; call the quotation if non-zero.
    ChooseIf = 44,
    /// Push the loop iteration counter (masked to 15 bits).
    LoopTicks = 45,
    /// Pop an address to run every tick; zero the iteration counter.
    SetLoop = 46,
    /// Clear the loop word.
    StopLoop = 47,
    /// Clear the stacks and the dictionary cursors; stop the loop word.
    ResetBoard = 48,
    PinMode = 49,
    /// Push -1 for a high pin, 0 for low.
    DigitalRead = 50,
    DigitalWrite = 51,
    AnalogRead = 52,
    AnalogWrite = 53,
    /// Pop word, line and mode; run the word when that interrupt line fires.
    AttachIsr = 54,
    /// Pop a line; unhook its interrupt word.
    DetachIsr = 55,
    Milliseconds = 56,
    /// Pop a pin and a level, push the measured pulse width.
    PulseIn = 57,
    /// Counted-loop step; operand is the backwards distance to the loop body.
    Next = 58,
    Nop = 59,
}

/// Conventional extension opcodes bound by the default VM in the 60..=127
/// application region. Hosts may rebind any of these.
pub mod ext {
    /// Operand: signed offset relative to the operand byte itself.
    pub const BRANCH: u8 = 60;
    /// Pop a value; branch when it is zero, else skip the operand.
    pub const ZBRANCH: u8 = 61;
    pub const WIRE_BEGIN: u8 = 62;
    pub const WIRE_AVAILABLE: u8 = 63;
    pub const WIRE_READ: u8 = 64;
    pub const WIRE_WRITE: u8 = 65;
    pub const WIRE_REQUEST_FROM: u8 = 66;
    pub const WIRE_BEGIN_TRANSMISSION: u8 = 67;
    pub const WIRE_END_TRANSMISSION: u8 = 68;
    pub const WIRE_SET_ON_RECEIVE: u8 = 69;
    pub const WIRE_SET_ON_REQUEST: u8 = 70;
    pub const SERVO_ATTACH: u8 = 71;
    pub const SERVO_DETACH: u8 = 72;
    pub const SERVO_WRITE_MICROS: u8 = 73;
}

impl Op {
    pub const COUNT: usize = Op::Nop as usize + 1;

    /// Convert a raw byte to an opcode without a bounds check.
    ///
    /// # Safety
    ///
    /// `byte` must be a valid opcode value (`< Op::COUNT`).
    #[inline(always)]
    pub unsafe fn from_u8_unchecked(byte: u8) -> Self {
        debug_assert!(
            (byte as usize) < Self::COUNT,
            "invalid opcode: 0x{byte:02x}"
        );
        core::mem::transmute::<u8, Op>(byte)
    }

    /// Number of operand bytes that follow the opcode in the instruction
    /// stream. A quotation's body is ordinary code, not an operand.
    pub const fn operand_bytes(self) -> usize {
        match self {
            Op::Lit8 | Op::Quote | Op::Next => 1,
            Op::Lit16 => 2,
            _ => 0,
        }
    }

    /// Wire-protocol mnemonic, as the host compiler spells it.
    pub const fn name(self) -> &'static str {
        match self {
            Op::Ret => "ret",
            Op::Lit8 => "lit8",
            Op::Lit16 => "lit16",
            Op::Quote => "quote",
            Op::EventHeader => "eventHeader",
            Op::EventBody8 => "eventBody8",
            Op::EventBody16 => "eventBody16",
            Op::EventFooter => "eventFooter",
            Op::EventOp => "event",
            Op::Fetch8 => "fetch8",
            Op::Store8 => "store8",
            Op::Fetch16 => "fetch16",
            Op::Store16 => "store16",
            Op::Add => "add",
            Op::Sub => "sub",
            Op::Mul => "mul",
            Op::Div => "div",
            Op::Mod => "mod",
            Op::And => "and",
            Op::Or => "or",
            Op::Xor => "xor",
            Op::Shift => "shift",
            Op::Eq => "eq",
            Op::Neq => "neq",
            Op::Gt => "gt",
            Op::Geq => "geq",
            Op::Lt => "lt",
            Op::Leq => "leq",
            Op::Not => "not",
            Op::Neg => "neg",
            Op::Inc => "inc",
            Op::Dec => "dec",
            Op::Drop => "drop",
            Op::Dup => "dup",
            Op::Swap => "swap",
            Op::Pick => "pick",
            Op::Roll => "roll",
            Op::Clr => "clr",
            Op::Pushr => "push",
            Op::Popr => "pop",
            Op::Peekr => "peek",
            Op::Forget => "forget",
            Op::Call => "call",
            Op::Choice => "choice",
            Op::ChooseIf => "if",
            Op::LoopTicks => "loopTicks",
            Op::SetLoop => "setLoop",
            Op::StopLoop => "stopLoop",
            Op::ResetBoard => "reset",
            Op::PinMode => "pinMode",
            Op::DigitalRead => "digitalRead",
            Op::DigitalWrite => "digitalWrite",
            Op::AnalogRead => "analogRead",
            Op::AnalogWrite => "analogWrite",
            Op::AttachIsr => "attachISR",
            Op::DetachIsr => "detachISR",
            Op::Milliseconds => "milliseconds",
            Op::PulseIn => "pulseIn",
            Op::Next => "next",
            Op::Nop => "nop",
        }
    }
}

impl TryFrom<u8> for Op {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, u8> {
        if byte < Self::COUNT as u8 {
            // SAFETY: Op is repr(u8) with contiguous variants starting at 0.
            Ok(unsafe { core::mem::transmute::<u8, Op>(byte) })
        } else {
            Err(byte)
        }
    }
}

impl core::fmt::Display for Op {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
