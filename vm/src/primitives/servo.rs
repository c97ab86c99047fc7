//! Servo words, keyed by pin.

use crate::error::VmError;
use crate::platform::Platform;
use crate::transport::Transport;
use crate::Vm;

/// ( pin -- )
pub fn attach<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let pin = vm.pop()?;
    vm.platform.servo_attach(pin);
    Ok(())
}

/// ( pin -- )
pub fn detach<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let pin = vm.pop()?;
    vm.platform.servo_detach(pin);
    Ok(())
}

/// ( pin micros -- )
pub fn write_micros<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let micros = vm.pop()?;
    let pin = vm.pop()?;
    vm.platform.servo_write_micros(pin, micros);
    Ok(())
}
