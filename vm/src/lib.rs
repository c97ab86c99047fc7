//! The Brief virtual machine.
//!
//! Brief is a dual-stack bytecode interpreter meant to run as scriptable
//! firmware: a host streams framed bytecode down a serial link, either as
//! named definitions that persist in the dictionary or as immediate
//! fragments executed once. All values are 16-bit signed cells.
//!
//! One fixed byte array — the dictionary — backs three regions at once:
//! committed code in `[0, last)`, the staging area `[last, here)` where the
//! frame currently being received lands, and scratch from `here` up, used
//! both to stage packed events and to reclaim executed immediate
//! fragments. The [`Vm`] aggregate owns that array, the two stacks, the
//! program counter and the dispatch table; [`Vm::tick`] is the cooperative
//! super-loop servicing the host link, interrupts and the loop word.

pub mod error;
pub mod mem;
pub mod platform;
pub mod primitives;
pub mod stack;
pub mod transport;

mod events;
mod intake;
mod interp;

pub use error::VmError;
pub use mem::Dictionary;
pub use platform::{NullPlatform, Platform};
pub use stack::Stack;
pub use transport::{LoopbackTransport, Transport};

use primitives::DispatchTable;

/// Size of the dispatch table; opcodes with the top bit set encode calls.
pub const MAX_PRIMITIVES: usize = 128;
/// Number of interrupt lines the ISR table maps.
pub const MAX_INTERRUPTS: usize = 6;
/// Event sent once when the VM comes up.
pub const BOOT_EVENT_ID: u8 = 0xFF;
/// Event carrying a [`VmError`] code as its value.
pub const VM_EVENT_ID: u8 = 0xFE;

/// VM sizing. The dictionary must stay below 32 KiB so every address fits
/// a cell; the stacks are deliberately tiny, as on the original boards.
#[derive(Debug, Clone)]
pub struct VmConfig {
    pub mem_size: usize,
    pub data_stack_size: usize,
    pub return_stack_size: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            mem_size: 512,
            data_stack_size: 8,
            return_stack_size: 8,
        }
    }
}

/// The machine: dictionary, stacks, program counter, dispatch table, and
/// the platform and transport it is wired to.
pub struct Vm<P: Platform, T: Transport> {
    pub(crate) mem: Dictionary,
    pub(crate) data: Stack,
    pub(crate) rstack: Stack,
    /// Program counter; negative means "not executing".
    pub(crate) pc: i16,
    pub(crate) table: DispatchTable<P, T>,
    /// Word run every tick, or -1.
    pub(crate) loopword: i16,
    pub(crate) loop_iterations: i16,
    /// Interrupt line -> word address, -1 for unset.
    pub(crate) isrs: [i16; MAX_INTERRUPTS],
    /// Write position for the packed event being staged in scratch.
    /// Starts past the end of memory so a body or footer without a header
    /// faults instead of scribbling over code.
    pub(crate) event_cursor: i16,
    /// Word run when an I²C master write arrives, or -1.
    pub(crate) on_receive: i16,
    /// Word run when an I²C master read request arrives, or -1.
    pub(crate) on_request: i16,
    pub platform: P,
    pub transport: T,
}

impl<P: Platform, T: Transport> Vm<P, T> {
    /// Build a VM, install the standard primitives and emit the boot event.
    pub fn new(config: VmConfig, platform: P, transport: T) -> Self {
        assert!(config.data_stack_size >= 4, "data stack too small");
        assert!(config.return_stack_size >= 4, "return stack too small");
        let mem = Dictionary::new(config.mem_size);
        let event_cursor = mem.size();

        let mut table = DispatchTable::new();
        for desc in primitives::default_primitives::<P, T>() {
            table.bind(desc.opcode, desc.func);
        }

        let mut vm = Self {
            mem,
            data: Stack::new(config.data_stack_size),
            rstack: Stack::new(config.return_stack_size),
            pc: -1,
            table,
            loopword: -1,
            loop_iterations: 0,
            isrs: [-1; MAX_INTERRUPTS],
            event_cursor,
            on_receive: -1,
            on_request: -1,
            platform,
            transport,
        };
        vm.event(BOOT_EVENT_ID, 0);
        vm
    }

    /// Install an application primitive. Opcodes 60..=127 are free by
    /// convention; opcode 0 must stay `ret` because frame intake relies on
    /// a zero byte terminating immediate fragments.
    pub fn bind(&mut self, opcode: u8, func: primitives::Primitive<P, T>) {
        self.table.bind(opcode, func);
    }

    pub fn push(&mut self, value: i16) -> Result<(), VmError> {
        self.data
            .push(value)
            .map_err(|_| VmError::DataStackOverflow)
    }

    pub fn pop(&mut self) -> Result<i16, VmError> {
        self.data.pop().map_err(|_| VmError::DataStackUnderflow)
    }

    pub(crate) fn top(&self) -> Result<i16, VmError> {
        self.data.top().map_err(|_| VmError::DataStackUnderflow)
    }

    pub(crate) fn top_mut(&mut self) -> Result<&mut i16, VmError> {
        self.data
            .top_mut()
            .map_err(|_| VmError::DataStackUnderflow)
    }

    pub(crate) fn rpush(&mut self, value: i16) -> Result<(), VmError> {
        self.rstack
            .push(value)
            .map_err(|_| VmError::ReturnStackOverflow)
    }

    pub(crate) fn rpop(&mut self) -> Result<i16, VmError> {
        self.rstack
            .pop()
            .map_err(|_| VmError::ReturnStackUnderflow)
    }

    pub(crate) fn rpeek(&self) -> Result<i16, VmError> {
        self.rstack
            .top()
            .map_err(|_| VmError::ReturnStackUnderflow)
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.mem
    }

    pub fn data_stack(&self) -> &[i16] {
        self.data.cells()
    }

    pub fn return_depth(&self) -> usize {
        self.rstack.depth()
    }

    pub fn pc(&self) -> i16 {
        self.pc
    }

    pub fn loopword(&self) -> i16 {
        self.loopword
    }

    /// Loop iterations since the last `setLoop` or reset, masked to 15 bits.
    pub fn loop_ticks(&self) -> i16 {
        self.loop_iterations & 0x7FFF
    }

    pub fn isr(&self, line: usize) -> Option<i16> {
        self.isrs.get(line).copied()
    }
}
