//! Arithmetic, bitwise and comparison words.
//!
//! All arithmetic is two's-complement 16-bit and wraps. Comparisons push
//! the truth convention — 0 for false, all bits set for true — so the
//! bitwise words double as logical connectives.

use crate::error::VmError;
use crate::platform::Platform;
use crate::transport::Transport;
use crate::Vm;

/// Truth convention: all bits set is true.
pub(crate) const fn truth(b: bool) -> i16 {
    if b {
        -1
    } else {
        0
    }
}

macro_rules! binary {
    ($name:ident, |$a:ident, $b:ident| $body:expr) => {
        pub fn $name<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
            let $b = vm.pop()?;
            let top = vm.top_mut()?;
            let $a = *top;
            *top = $body;
            Ok(())
        }
    };
}

macro_rules! unary {
    ($name:ident, |$a:ident| $body:expr) => {
        pub fn $name<P: Platform, T: Transport>(vm: &mut Vm<P, T>) -> Result<(), VmError> {
            let top = vm.top_mut()?;
            let $a = *top;
            *top = $body;
            Ok(())
        }
    };
}

binary!(add, |a, b| a.wrapping_add(b));
binary!(sub, |a, b| a.wrapping_sub(b));
binary!(mul, |a, b| a.wrapping_mul(b));
// Division by zero is a program bug; it must not take the machine down, so
// it quietly yields 0. wrapping_div also absorbs i16::MIN / -1.
binary!(div, |a, b| if b == 0 { 0 } else { a.wrapping_div(b) });
binary!(modulo, |a, b| if b == 0 { 0 } else { a.wrapping_rem(b) });
binary!(and, |a, b| a & b);
binary!(or, |a, b| a | b);
binary!(xor, |a, b| a ^ b);
// Negative counts shift left; shift amounts of 16 or more are masked.
binary!(shift, |a, b| if b < 0 {
    ((a as u16).wrapping_shl(b.unsigned_abs() as u32)) as i16
} else {
    a.wrapping_shr(b as u32)
});
binary!(eq, |a, b| truth(a == b));
binary!(neq, |a, b| truth(a != b));
binary!(gt, |a, b| truth(a > b));
binary!(geq, |a, b| truth(a >= b));
binary!(lt, |a, b| truth(a < b));
binary!(leq, |a, b| truth(a <= b));

unary!(not, |a| !a);
unary!(neg, |a| a.wrapping_neg());
unary!(inc, |a| a.wrapping_add(1));
unary!(dec, |a| a.wrapping_sub(1));
