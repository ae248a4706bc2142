use crate::{
    codec::{Reader, Writer, encode_pair_u16},
    constants::{HEADER_LEN, MAGIC, MAX_CALLSIGN_LEN, POSITION_FRAME_LEN, VERSION},
    error::ProtoError,
    fixed_str::FixedStr,
    msg_id::MsgId,
};

pub type Callsign = FixedStr<MAX_CALLSIGN_LEN>;

/// Requested visibility range in nautical miles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeNm {
    pub min: u16,
    pub max: u16,
}

impl Default for RangeNm {
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

/// Message header (wire format).
///
/// Encoding rules:
/// - Fixed size: exactly `HEADER_LEN` bytes.
/// - Integer fields are big-endian.
/// - Layout is defined by `encode_into()` offsets below.
///
/// `decode()` only splits fields. Magic, version and msg id are checked one
/// layer up in [`PositionUpdate`](crate::message::PositionUpdate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: u32,
    pub version: u32,

    /// Payload kind, see [`MsgId`].
    pub msg_id: u32,

    /// Header + payload length in bytes.
    pub msg_len: u32,

    pub range: RangeNm,

    /// Port the sender expects replies on. 0 means none.
    pub reply_port: u16,

    pub callsign: Callsign,
}

impl Header {
    /// Header size in bytes for the current wire layout.
    pub const LEN: usize = HEADER_LEN;

    pub fn new(
        msg_id: MsgId,
        msg_len: u32,
        range: RangeNm,
        reply_port: u16,
        callsign: Callsign,
    ) -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            msg_id: msg_id.as_u32(),
            msg_len,
            range,
            reply_port,
            callsign,
        }
    }

    /// Header for a position update, `msg_len` set to the full frame length.
    pub fn position(range: RangeNm, reply_port: u16, callsign: Callsign) -> Self {
        Self::new(
            MsgId::PositionData,
            POSITION_FRAME_LEN as u32,
            range,
            reply_port,
            callsign,
        )
    }

    pub fn kind(&self) -> Option<MsgId> {
        MsgId::from_repr(self.msg_id)
    }

    /// Encode this header into `out` using the current fixed wire layout.
    ///
    /// Offsets (bytes):
    /// - 0..4   magic
    /// - 4..8   version
    /// - 8..12  msg_id
    /// - 12..16 msg_len
    /// - 16..20 range (min << 16 | max)
    /// - 20..22 reserved (always 0)
    /// - 22..24 reply_port
    /// - 24..32 callsign
    ///
    /// Bytes 20..24 read as one big-endian u32 equal `reply_port`, which is
    /// how peers that treat the field as 32 bits see it.
    pub fn encode_into(&self, out: &mut [u8; HEADER_LEN]) {
        let mut w = Writer::new(out);
        w.put_u32(self.magic);
        w.put_u32(self.version);
        w.put_u32(self.msg_id);
        w.put_u32(self.msg_len);
        w.put(&encode_pair_u16(self.range.min, self.range.max));
        w.put_u16(0); // reserved
        w.put_u16(self.reply_port);
        w.put(&self.callsign.to_wire());
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        self.encode_into(&mut out);
        out
    }

    /// Decode the first `HEADER_LEN` bytes of `buf`.
    pub fn decode(buf: &[u8]) -> Result<Header, ProtoError> {
        let mut r = Reader::new(buf);
        let magic = r.u32()?;
        let version = r.u32()?;
        let msg_id = r.u32()?;
        let msg_len = r.u32()?;
        let range = r.u32()?;
        let _reserved = r.u16()?;
        let reply_port = r.u16()?;
        let callsign = Callsign::from_wire(r.take_array()?);

        Ok(Header {
            magic,
            version,
            msg_id,
            msg_len,
            range: RangeNm {
                min: (range >> 16) as u16,
                max: (range & 0xFFFF) as u16,
            },
            reply_port,
            callsign,
        })
    }
}
