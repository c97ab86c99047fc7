//! Control flow, literals and quotations.

use crate::error::VmError;
use crate::platform::Platform;
use crate::transport::Transport;
use crate::Vm;

pub fn ret<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    match vm.rpop() {
        Ok(addr) => {
            vm.pc = addr;
            Ok(())
        }
        Err(err) => {
            // With nothing to return to, the only safe continuation is out.
            vm.pc = -1;
            Err(err)
        }
    }
}

pub fn lit8<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let byte = vm.mem.load(vm.pc);
    vm.pc = vm.pc.wrapping_add(1);
    vm.push(byte? as i8 as i16)
}

pub fn lit16<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let value = vm.mem.load16(vm.pc);
    vm.pc = vm.pc.wrapping_add(2);
    vm.push(value?)
}

/// Push the address of the code block that follows and jump over it. The
/// block is left for higher-order words (`choice`, `if`, `call`) to run.
pub fn quote<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let len = vm.mem.load(vm.pc);
    vm.pc = vm.pc.wrapping_add(1);
    let len = len?;
    vm.push(vm.pc)?;
    vm.pc = vm.pc.wrapping_add(len as i16);
    Ok(())
}

/// Relative jump; the offset byte is relative to itself.
pub fn branch<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let offset = vm.mem.load(vm.pc)? as i8;
    vm.pc = vm.pc.wrapping_add(offset as i16);
    Ok(())
}

pub fn zbranch<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    if vm.pop()? == 0 {
        branch(vm)
    } else {
        vm.pc = vm.pc.wrapping_add(1);
        Ok(())
    }
}

pub fn call<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let target = vm.pop()?;
    vm.rpush(vm.pc)?;
    vm.pc = target;
    Ok(())
}

/// The idiomatic conditional: pop the false quotation, the true quotation
/// and the predicate, then call one of the two.
pub fn choice<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let if_false = vm.pop()?;
    let if_true = vm.pop()?;
    let predicate = vm.pop()?;
    vm.rpush(vm.pc)?;
    vm.pc = if predicate == 0 { if_false } else { if_true };
    Ok(())
}

pub fn choose_if<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let target = vm.pop()?;
    if vm.pop()? != 0 {
        vm.rpush(vm.pc)?;
        vm.pc = target;
    }
    Ok(())
}

/// Counted-loop step. The count lives on the return stack; while it stays
/// positive, jump back over the body (the operand is the distance), else
/// fall through with the count consumed.
pub fn next<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
    let count = vm.rpop()?.wrapping_sub(1);
    let rel = vm.mem.load(vm.pc);
    vm.pc = vm.pc.wrapping_add(1);
    let rel = rel?;
    if count > 0 {
        vm.rpush(count)?;
        vm.pc = vm.pc.wrapping_sub(rel as i16 + 2);
    }
    Ok(())
}

pub fn nop<P: Platform, T: Transport>(_vm: &mut Vm<P, T>) -> Result<(), VmError> {
    Ok(())
}
