use crate::error::VmError;
use crate::platform::Platform;
use crate::transport::Transport;
use crate::{Vm, VM_EVENT_ID};

/// Scalar event encoding: `len, id, body`. The body is sized by the value:
/// zero travels as the id alone, one byte when it fits signed 8 bits, two
/// big-endian bytes otherwise.
pub(crate) fn encode_scalar(id: u8, value: i16, buf: &mut [u8; 4]) -> usize {
    if value == 0 {
        buf[0] = 0;
        buf[1] = id;
        2
    } else if let Ok(v) = i8::try_from(value) {
        buf[0] = 1;
        buf[1] = id;
        buf[2] = v as u8;
        3
    } else {
        let [hi, lo] = value.to_be_bytes();
        buf[0] = 2;
        buf[1] = id;
        buf[2] = hi;
        buf[3] = lo;
        4
    }
}

impl<P: Platform, T: Transport> Vm<P, T> {
    /// Emit a scalar event and flush the transport.
    ///
    /// Encodes into a local buffer and writes straight out: no stack, no
    /// dictionary. The stacks report faults through here, so this path must
    /// not be able to fault itself.
    pub fn event(&mut self, id: u8, value: i16) {
        let mut buf = [0u8; 4];
        let n = encode_scalar(id, value, &mut buf);
        self.transport.write_all(&buf[..n]);
        self.transport.flush();
    }

    /// Report a VM fault to the host as a `VM_EVENT_ID` event.
    pub fn report(&mut self, err: VmError) {
        tracing::warn!(code = err.code(), "{err}");
        self.event(VM_EVENT_ID, err.code() as i16);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(id: u8, value: i16) -> Vec<u8> {
        let mut buf = [0u8; 4];
        let n = encode_scalar(id, value, &mut buf);
        buf[..n].to_vec()
    }

    #[test]
    fn zero_travels_as_id_alone() {
        assert_eq!(encoded(7, 0), [0, 7]);
    }

    #[test]
    fn small_values_take_one_byte() {
        assert_eq!(encoded(7, -1), [1, 7, 0xFF]);
        assert_eq!(encoded(7, 127), [1, 7, 127]);
        assert_eq!(encoded(7, -128), [1, 7, 0x80]);
    }

    #[test]
    fn wide_values_take_two_big_endian_bytes() {
        assert_eq!(encoded(7, 300), [2, 7, 0x01, 0x2C]);
        assert_eq!(encoded(7, 128), [2, 7, 0x00, 0x80]);
        assert_eq!(encoded(7, -129), [2, 7, 0xFF, 0x7F]);
    }
}
