use crate::{
    constants::{MAGIC, POSITION_FRAME_LEN, VERSION},
    error::ProtoError,
    frame::{frame, unframe},
    header::{Callsign, Header, RangeNm},
    msg_id::MsgId,
    position::{Kinematics, ModelPath, PositionMsg},
};

/// A validated position-update datagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionUpdate {
    pub header: Header,
    pub position: PositionMsg,
}

impl PositionUpdate {
    /// Build and frame an outbound position update stamped with the
    /// current wall clock.
    pub fn encode(
        callsign: Callsign,
        model: ModelPath,
        range: RangeNm,
        reply_port: u16,
        kinematics: &Kinematics,
        lag: f64,
    ) -> Vec<u8> {
        let header = Header::position(range, reply_port, callsign);
        let position = PositionMsg::new(model, kinematics, lag, 0.0);
        frame(&header, &position)
    }

    /// Split a received datagram and check it is a position update this
    /// client understands.
    pub fn decode(datagram: &[u8]) -> Result<PositionUpdate, ProtoError> {
        let (header, position) = unframe(datagram)?;

        if header.magic != MAGIC {
            return Err(ProtoError::BadMagic(header.magic));
        }
        if header.version != VERSION {
            return Err(ProtoError::UnsupportedVersion(header.version));
        }
        match header.kind() {
            Some(MsgId::PositionData) => {}
            Some(other) => return Err(ProtoError::UnsupportedMsgId(other)),
            None => return Err(ProtoError::UnknownMsgId(header.msg_id)),
        }
        let declared = header.msg_len as usize;
        if declared < POSITION_FRAME_LEN || declared > datagram.len() {
            return Err(ProtoError::LengthMismatch {
                declared: header.msg_len,
                actual: datagram.len(),
            });
        }

        Ok(PositionUpdate { header, position })
    }

    pub fn callsign(&self) -> &Callsign {
        &self.header.callsign
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.position.kinematics
    }
}
