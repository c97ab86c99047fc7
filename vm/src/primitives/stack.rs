//! Stack manipulation, including transfers to the return stack.
//!
//! The return stack doubles as local storage: a word may park values there
//! and recover them after calling out, as long as they are gone again by
//! its final `ret`.

use crate::error::VmError;
use crate::platform::Platform;
use crate::transport::Transport;
use crate::Vm;

pub fn drop<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    vm.pop().map(|_| ())
}

pub fn dup<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let top = vm.top()?;
    vm.push(top)
}

pub fn swap<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    vm.data
        .roll(1)
        .map_err(|_| VmError::DataStackUnderflow)
}

/// Copy the `n`th item down to the top; `0 pick` is `dup`.
pub fn pick<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let n = vm.pop()?;
    let n = usize::try_from(n).map_err(|_| VmError::DataStackUnderflow)?;
    let value = vm
        .data
        .pick(n)
        .map_err(|_| VmError::DataStackUnderflow)?;
    vm.push(value)
}

/// Rotate the `n`th item down up to the top; `1 roll` is `swap`.
pub fn roll<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let n = vm.pop()?;
    let n = usize::try_from(n).map_err(|_| VmError::DataStackUnderflow)?;
    vm.data
        .roll(n)
        .map_err(|_| VmError::DataStackUnderflow)
}

pub fn clr<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    vm.data.clear();
    Ok(())
}

pub fn pushr<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let value = vm.pop()?;
    vm.rpush(value)
}

pub fn popr<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let value = vm.rpop()?;
    vm.push(value)
}

pub fn peekr<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let value = vm.rpeek()?;
    vm.push(value)
}
