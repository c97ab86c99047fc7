//! Pin and timing words, mapped one-to-one onto the platform.
//!
//! Digital levels cross the stack as the truth convention (-1 high, 0
//! low) so they compose with the logical words.

use crate::error::VmError;
use crate::platform::Platform;
use crate::transport::Transport;
use crate::Vm;

use super::alu::truth;

/// ( pin mode -- )
pub fn pin_mode<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let mode = vm.pop()?;
    let pin = vm.pop()?;
    vm.platform.pin_mode(pin, mode);
    Ok(())
}

/// ( pin -- level )
pub fn digital_read<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let pin = vm.pop()?;
    let level = vm.platform.digital_read(pin);
    vm.push(truth(level))
}

/// ( pin level -- ) Any non-zero level drives the pin high.
pub fn digital_write<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let level = vm.pop()?;
    let pin = vm.pop()?;
    vm.platform.digital_write(pin, level != 0);
    Ok(())
}

/// ( pin -- sample )
pub fn analog_read<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let pin = vm.pop()?;
    let sample = vm.platform.analog_read(pin);
    vm.push(sample)
}

/// ( pin duty -- )
pub fn analog_write<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let duty = vm.pop()?;
    let pin = vm.pop()?;
    vm.platform.analog_write(pin, duty);
    Ok(())
}

/// ( -- millis )
pub fn milliseconds<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let now = vm.platform.milliseconds();
    vm.push(now)
}

/// ( pin level -- micros )
pub fn pulse_in<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let level = vm.pop()?;
    let pin = vm.pop()?;
    let width = vm.platform.pulse_in(pin, level);
    vm.push(width)
}
