//! Loop-word control and board reset.

use crate::error::VmError;
use crate::platform::Platform;
use crate::transport::Transport;
use crate::Vm;

/// Push the tick counter, masked to 15 bits so it is always non-negative.
pub fn loop_ticks<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    vm.push(vm.loop_iterations & 0x7FFF)
}

/// Pop the word to run every tick and restart the counter.
pub fn set_loop<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    vm.loop_iterations = 0;
    vm.loopword = vm.pop()?;
    Ok(())
}

pub fn stop_loop<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    vm.loopword = -1;
    Ok(())
}

/// Back to a blank board: empty stacks, empty dictionary, no loop word.
/// The host sends this first thing after connecting so its assumptions
/// about dictionary contents hold.
pub fn reset_board<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    vm.data.clear();
    vm.rstack.clear();
    vm.mem.reset();
    vm.loopword = -1;
    vm.loop_iterations = 0;
    Ok(())
}
