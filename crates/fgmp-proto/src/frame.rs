use crate::{
    constants::{HEADER_LEN, POSITION_FRAME_LEN},
    error::ProtoError,
    header::Header,
    position::PositionMsg,
};

/// Concatenate an encoded header and payload into one datagram.
pub fn frame(header: &Header, payload: &PositionMsg) -> Vec<u8> {
    let mut out = vec![0u8; POSITION_FRAME_LEN];
    let (h, p) = out.split_at_mut(HEADER_LEN);
    h.copy_from_slice(&header.to_bytes());
    p.copy_from_slice(&payload.to_bytes());
    out
}

/// Split a datagram back into header and payload.
///
/// Requires at least one full frame; trailing bytes are ignored. Magic,
/// version and msg id are not looked at here.
pub fn unframe(buf: &[u8]) -> Result<(Header, PositionMsg), ProtoError> {
    if buf.len() < POSITION_FRAME_LEN {
        return Err(ProtoError::ShortBuffer {
            needed: POSITION_FRAME_LEN,
            actual: buf.len(),
        });
    }

    let header = Header::decode(&buf[..HEADER_LEN])?;
    let payload = PositionMsg::decode(&buf[HEADER_LEN..POSITION_FRAME_LEN])?;
    Ok((header, payload))
}
