//! Event words.
//!
//! A packed event is staged in dictionary scratch starting at `here`: the
//! header drops the id there, the body words append payload bytes, and the
//! footer prefixes the length, sends the lot and leaves `here` untouched so
//! the scratch is reclaimed for free. The cursor starts past the end of
//! memory, so a body or footer without a header faults rather than
//! clobbering code.

use crate::error::VmError;
use crate::platform::Platform;
use crate::transport::Transport;
use crate::Vm;

/// Pop the event id and start staging at `here`.
pub fn event_header<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let id = vm.pop()?;
    vm.event_cursor = vm.mem.here();
    vm.mem.store(vm.event_cursor, id as u8)?;
    vm.event_cursor = vm.event_cursor.wrapping_add(1);
    Ok(())
}

/// Append one payload byte to the staged event.
pub fn event_body8<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let value = vm.pop()?;
    vm.mem.store(vm.event_cursor, value as u8)?;
    vm.event_cursor = vm.event_cursor.wrapping_add(1);
    Ok(())
}

/// Append a 16-bit payload value, high byte first.
pub fn event_body16<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let value = vm.pop()?;
    vm.mem.store16(vm.event_cursor, value)?;
    vm.event_cursor = vm.event_cursor.wrapping_add(2);
    Ok(())
}

/// Send the staged event: length byte (body only), id, body.
pub fn event_footer<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let start = vm.mem.here();
    let staged = vm.event_cursor.wrapping_sub(start);
    // id + at most a full-length body; anything else means the header never
    // ran or the cursor was wrecked.
    if !(1..=256).contains(&staged) {
        return Err(VmError::OutOfMemory);
    }
    vm.transport.write((staged - 1) as u8);
    for i in 0..staged {
        let byte = vm.mem.load(start.wrapping_add(i))?;
        vm.transport.write(byte);
    }
    vm.transport.flush();
    Ok(())
}

/// Pop an id and a value and send them as a scalar event.
pub fn event_op<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let id = vm.pop()?;
    let value = vm.pop()?;
    vm.event(id as u8, value);
    Ok(())
}
