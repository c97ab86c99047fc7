//! VM-to-host event frames.
//!
//! Each outbound event is a length byte (body only, the id is excluded),
//! the id byte, then the body. Scalar events carry a 0-, 1- or 2-byte body
//! depending on the value's magnitude.

/// A decoded outbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: u8,
    pub body: Vec<u8>,
}

impl Event {
    /// Interpret the body as a scalar: empty is 0, one byte is sign-extended,
    /// two bytes are big-endian.
    pub fn value(&self) -> i16 {
        match *self.body.as_slice() {
            [] => 0,
            [b] => b as i8 as i16,
            [hi, lo, ..] => i16::from_be_bytes([hi, lo]),
        }
    }
}

/// Split a byte stream into events. A trailing partial frame is dropped.
pub fn parse_events(bytes: &[u8]) -> Vec<Event> {
    let mut events = Vec::new();
    let mut rest = bytes;
    while let [len, id, tail @ ..] = rest {
        let len = *len as usize;
        if tail.len() < len {
            break;
        }
        events.push(Event {
            id: *id,
            body: tail[..len].to_vec(),
        });
        rest = &tail[len..];
    }
    events
}
