//! Pkt-line framing
//!
//! Each line is prefixed with its total length (payload + the 4-digit
//! prefix itself) as 4 lowercase hex digits. The length `0000` is the flush
//! packet, a section delimiter with no payload.

/// Frame a payload as a pkt-line.
pub fn data_pkt(payload: &[u8]) -> Vec<u8> {
    let mut pkt = format!("{:04x}", payload.len() + 4).into_bytes();
    pkt.extend_from_slice(payload);
    pkt
}

/// The flush packet.
pub fn flush_pkt() -> Vec<u8> {
    b"0000".to_vec()
}
