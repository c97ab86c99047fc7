//! Hooking words onto interrupt lines.
//!
//! Handler words are dispatched from the cooperative tick, not from a real
//! ISR context, so they can never preempt a running word — but they share
//! the stacks with everything else and must leave them as found.

use crate::error::VmError;
use crate::platform::Platform;
use crate::transport::Transport;
use crate::Vm;

fn line_index(line: i16, limit: usize) -> Result<usize, VmError> {
    usize::try_from(line)
        .ok()
        .filter(|&i| i < limit)
        .ok_or(VmError::OutOfMemory)
}

/// ( word line mode -- ) Bind `word` to one interrupt line. Only the
/// requested line is armed.
pub fn attach_isr<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let mode = vm.pop()?;
    let line = vm.pop()?;
    let word = vm.pop()?;
    let idx = line_index(line, vm.isrs.len())?;
    vm.isrs[idx] = word;
    vm.platform.attach_interrupt(idx as u8, mode);
    Ok(())
}

/// ( line -- )
pub fn detach_isr<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let line = vm.pop()?;
    let idx = line_index(line, vm.isrs.len())?;
    vm.isrs[idx] = -1;
    vm.platform.detach_interrupt(idx as u8);
    Ok(())
}
