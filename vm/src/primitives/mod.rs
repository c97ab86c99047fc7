use bytecode::{ext, Op};

use crate::error::VmError;
use crate::platform::Platform;
use crate::transport::Transport;
use crate::{Vm, MAX_PRIMITIVES};

pub mod alu;
pub mod control;
pub mod events;
pub mod gpio;
pub mod interrupts;
pub mod memory;
pub mod servo;
pub mod stack;
pub mod system;
pub mod wire;

/// A primitive: no arguments, no results — everything flows through the
/// stacks. A fault aborts the primitive; the interpreter emits it and
/// carries on.
pub type Primitive<P, T> = fn(&mut Vm<P, T>) -> Result<(), VmError>;

#[derive(Clone, Copy)]
pub struct PrimitiveDesc<P: Platform, T: Transport> {
    pub name: &'static str,
    pub opcode: u8,
    pub func: Primitive<P, T>,
}

impl<P: Platform, T: Transport> PrimitiveDesc<P, T> {
    pub const fn new(name: &'static str, opcode: u8, func: Primitive<P, T>) -> Self {
        Self { name, opcode, func }
    }
}

/// The instruction function table: one slot per 7-bit opcode. Unbound
/// slots execute as no-ops so a stray opcode cannot take the machine down.
pub struct DispatchTable<P: Platform, T: Transport> {
    slots: [Option<Primitive<P, T>>; MAX_PRIMITIVES],
}

impl<P: Platform, T: Transport> DispatchTable<P, T> {
    pub fn new() -> Self {
        Self {
            slots: [None; MAX_PRIMITIVES],
        }
    }

    pub fn bind(&mut self, opcode: u8, func: Primitive<P, T>) {
        debug_assert!((opcode as usize) < MAX_PRIMITIVES, "opcode {opcode} out of range");
        if let Some(slot) = self.slots.get_mut(opcode as usize) {
            *slot = Some(func);
        }
    }

    pub fn get(&self, opcode: u8) -> Option<Primitive<P, T>> {
        self.slots.get(opcode as usize).copied().flatten()
    }
}

impl<P: Platform, T: Transport> Default for DispatchTable<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The standard instruction set, plus the conventional extension bindings
/// (relative branches, I²C, servos) in the application region.
pub fn default_primitives<P: Platform, T: Transport>() -> Vec<PrimitiveDesc<P, T>> {
    vec![
        PrimitiveDesc::new("ret", Op::Ret as u8, control::ret),
        PrimitiveDesc::new("lit8", Op::Lit8 as u8, control::lit8),
        PrimitiveDesc::new("lit16", Op::Lit16 as u8, control::lit16),
        PrimitiveDesc::new("quote", Op::Quote as u8, control::quote),
        PrimitiveDesc::new("eventHeader", Op::EventHeader as u8, events::event_header),
        PrimitiveDesc::new("eventBody8", Op::EventBody8 as u8, events::event_body8),
        PrimitiveDesc::new("eventBody16", Op::EventBody16 as u8, events::event_body16),
        PrimitiveDesc::new("eventFooter", Op::EventFooter as u8, events::event_footer),
        PrimitiveDesc::new("event", Op::EventOp as u8, events::event_op),
        PrimitiveDesc::new("fetch8", Op::Fetch8 as u8, memory::fetch8),
        PrimitiveDesc::new("store8", Op::Store8 as u8, memory::store8),
        PrimitiveDesc::new("fetch16", Op::Fetch16 as u8, memory::fetch16),
        PrimitiveDesc::new("store16", Op::Store16 as u8, memory::store16),
        PrimitiveDesc::new("add", Op::Add as u8, alu::add),
        PrimitiveDesc::new("sub", Op::Sub as u8, alu::sub),
        PrimitiveDesc::new("mul", Op::Mul as u8, alu::mul),
        PrimitiveDesc::new("div", Op::Div as u8, alu::div),
        PrimitiveDesc::new("mod", Op::Mod as u8, alu::modulo),
        PrimitiveDesc::new("and", Op::And as u8, alu::and),
        PrimitiveDesc::new("or", Op::Or as u8, alu::or),
        PrimitiveDesc::new("xor", Op::Xor as u8, alu::xor),
        PrimitiveDesc::new("shift", Op::Shift as u8, alu::shift),
        PrimitiveDesc::new("eq", Op::Eq as u8, alu::eq),
        PrimitiveDesc::new("neq", Op::Neq as u8, alu::neq),
        PrimitiveDesc::new("gt", Op::Gt as u8, alu::gt),
        PrimitiveDesc::new("geq", Op::Geq as u8, alu::geq),
        PrimitiveDesc::new("lt", Op::Lt as u8, alu::lt),
        PrimitiveDesc::new("leq", Op::Leq as u8, alu::leq),
        PrimitiveDesc::new("not", Op::Not as u8, alu::not),
        PrimitiveDesc::new("neg", Op::Neg as u8, alu::neg),
        PrimitiveDesc::new("inc", Op::Inc as u8, alu::inc),
        PrimitiveDesc::new("dec", Op::Dec as u8, alu::dec),
        PrimitiveDesc::new("drop", Op::Drop as u8, stack::drop),
        PrimitiveDesc::new("dup", Op::Dup as u8, stack::dup),
        PrimitiveDesc::new("swap", Op::Swap as u8, stack::swap),
        PrimitiveDesc::new("pick", Op::Pick as u8, stack::pick),
        PrimitiveDesc::new("roll", Op::Roll as u8, stack::roll),
        PrimitiveDesc::new("clr", Op::Clr as u8, stack::clr),
        PrimitiveDesc::new("push", Op::Pushr as u8, stack::pushr),
        PrimitiveDesc::new("pop", Op::Popr as u8, stack::popr),
        PrimitiveDesc::new("peek", Op::Peekr as u8, stack::peekr),
        PrimitiveDesc::new("forget", Op::Forget as u8, memory::forget),
        PrimitiveDesc::new("call", Op::Call as u8, control::call),
        PrimitiveDesc::new("choice", Op::Choice as u8, control::choice),
        PrimitiveDesc::new("if", Op::ChooseIf as u8, control::choose_if),
        PrimitiveDesc::new("loopTicks", Op::LoopTicks as u8, system::loop_ticks),
        PrimitiveDesc::new("setLoop", Op::SetLoop as u8, system::set_loop),
        PrimitiveDesc::new("stopLoop", Op::StopLoop as u8, system::stop_loop),
        PrimitiveDesc::new("reset", Op::ResetBoard as u8, system::reset_board),
        PrimitiveDesc::new("pinMode", Op::PinMode as u8, gpio::pin_mode),
        PrimitiveDesc::new("digitalRead", Op::DigitalRead as u8, gpio::digital_read),
        PrimitiveDesc::new("digitalWrite", Op::DigitalWrite as u8, gpio::digital_write),
        PrimitiveDesc::new("analogRead", Op::AnalogRead as u8, gpio::analog_read),
        PrimitiveDesc::new("analogWrite", Op::AnalogWrite as u8, gpio::analog_write),
        PrimitiveDesc::new("attachISR", Op::AttachIsr as u8, interrupts::attach_isr),
        PrimitiveDesc::new("detachISR", Op::DetachIsr as u8, interrupts::detach_isr),
        PrimitiveDesc::new("milliseconds", Op::Milliseconds as u8, gpio::milliseconds),
        PrimitiveDesc::new("pulseIn", Op::PulseIn as u8, gpio::pulse_in),
        PrimitiveDesc::new("next", Op::Next as u8, control::next),
        PrimitiveDesc::new("nop", Op::Nop as u8, control::nop),
        // Application-region bindings shipped by default.
        PrimitiveDesc::new("branch", ext::BRANCH, control::branch),
        PrimitiveDesc::new("zbranch", ext::ZBRANCH, control::zbranch),
        PrimitiveDesc::new("wireBegin", ext::WIRE_BEGIN, wire::begin),
        PrimitiveDesc::new("wireAvailable", ext::WIRE_AVAILABLE, wire::available),
        PrimitiveDesc::new("wireRead", ext::WIRE_READ, wire::read),
        PrimitiveDesc::new("wireWrite", ext::WIRE_WRITE, wire::write),
        PrimitiveDesc::new("wireRequestFrom", ext::WIRE_REQUEST_FROM, wire::request_from),
        PrimitiveDesc::new(
            "wireBeginTransmission",
            ext::WIRE_BEGIN_TRANSMISSION,
            wire::begin_transmission,
        ),
        PrimitiveDesc::new(
            "wireEndTransmission",
            ext::WIRE_END_TRANSMISSION,
            wire::end_transmission,
        ),
        PrimitiveDesc::new("wireOnReceive", ext::WIRE_SET_ON_RECEIVE, wire::set_on_receive),
        PrimitiveDesc::new("wireOnRequest", ext::WIRE_SET_ON_REQUEST, wire::set_on_request),
        PrimitiveDesc::new("servoAttach", ext::SERVO_ATTACH, servo::attach),
        PrimitiveDesc::new("servoDetach", ext::SERVO_DETACH, servo::detach),
        PrimitiveDesc::new("servoWriteMicros", ext::SERVO_WRITE_MICROS, servo::write_micros),
    ]
}
