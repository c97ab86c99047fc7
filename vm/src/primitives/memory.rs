//! Dictionary fetch/store and the `forget` allocator word.

use crate::error::VmError;
use crate::platform::Platform;
use crate::transport::Transport;
use crate::Vm;

/// Replace the address on top with the byte it points at (zero-extended).
pub fn fetch8<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let addr = vm.top()?;
    let byte = vm.mem.load(addr)?;
    *vm.top_mut()? = byte as i16;
    Ok(())
}

/// Pop an address, pop a value, store its low byte. A bad address stores
/// nothing; the value is still consumed.
pub fn store8<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let addr = vm.pop()?;
    let value = vm.pop()?;
    vm.mem.store(addr, value as u8)
}

pub fn fetch16<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let addr = vm.top()?;
    let value = vm.mem.load16(addr)?;
    *vm.top_mut()? = value;
    Ok(())
}

pub fn store16<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let addr = vm.pop()?;
    let value = vm.pop()?;
    vm.mem.store16(addr, value)
}

/// Rewind `here` to the popped address, reverting every definition made
/// at or above it. Addresses past `here` are ignored so stray values
/// cannot "remember" garbage.
pub fn forget<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let addr = vm.pop()?;
    vm.mem.forget(addr);
    Ok(())
}
