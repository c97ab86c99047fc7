//! I²C words: composable zero-operand adapters over the platform's bus,
//! plus the two callback hooks dispatched from the super-loop.

use crate::error::VmError;
use crate::platform::Platform;
use crate::transport::Transport;
use crate::Vm;

pub fn begin<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    vm.platform.wire_begin();
    Ok(())
}

/// ( address count -- )
pub fn request_from<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let count = vm.pop()?;
    let address = vm.pop()?;
    vm.platform.wire_request_from(address, count);
    Ok(())
}

/// ( -- count )
pub fn available<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let count = vm.platform.wire_available();
    vm.push(count)
}

/// ( -- byte ) Blocks until the bus has one.
pub fn read<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let byte = vm.platform.wire_read();
    vm.push(byte)
}

/// ( address -- )
pub fn begin_transmission<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let address = vm.pop()?;
    vm.platform.wire_begin_transmission(address);
    Ok(())
}

/// ( byte -- )
pub fn write<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let byte = vm.pop()?;
    vm.platform.wire_write(byte as u8);
    Ok(())
}

pub fn end_transmission<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    vm.platform.wire_end_transmission();
    Ok(())
}

/// ( word -- ) Run `word` with the byte count on the stack whenever a
/// master write arrives.
pub fn set_on_receive<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    vm.on_receive = vm.pop()?;
    Ok(())
}

/// ( word -- ) Run `word` whenever a master read request arrives.
pub fn set_on_request<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    vm.on_request = vm.pop()?;
    Ok(())
}
