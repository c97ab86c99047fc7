//! Host-to-VM framing.
//!
//! Each inbound frame is a single header byte followed by the payload. The
//! header's top bit selects immediate execution (set) or a dictionary
//! definition (clear); the low seven bits are the payload length.

/// Header bit marking a frame for immediate execution.
pub const IMMEDIATE_FLAG: u8 = 0x80;

/// Longest payload a single frame can carry.
pub const MAX_PAYLOAD: usize = 0x7F;

/// Frame a payload for immediate execution. The VM appends the terminating
/// `ret` itself and reclaims the bytes afterwards.
pub fn immediate(payload: &[u8]) -> Vec<u8> {
    encode(IMMEDIATE_FLAG, payload)
}

/// Frame a payload as a dictionary definition. The payload must already end
/// in `ret` where appropriate; it is retained verbatim.
pub fn definition(payload: &[u8]) -> Vec<u8> {
    encode(0, payload)
}

fn encode(flag: u8, payload: &[u8]) -> Vec<u8> {
    assert!(
        payload.len() <= MAX_PAYLOAD,
        "frame payload too long: {} bytes",
        payload.len()
    );
    let mut frame = Vec::with_capacity(payload.len() + 1);
    frame.push(flag | payload.len() as u8);
    frame.extend_from_slice(payload);
    frame
}
