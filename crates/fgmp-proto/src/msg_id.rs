use strum::FromRepr;

/// Payload kind carried in [`Header::msg_id`](crate::header::Header::msg_id).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr)]
pub enum MsgId {
    Chat = 1,
    ResetData = 6,
    PositionData = 7,
}

impl MsgId {
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

#[cfg(test)]
mod tests {
    use super::MsgId;

    #[test]
    fn ids_are_locked() {
        assert_eq!(MsgId::PositionData.as_u32(), 7);
        assert_eq!(MsgId::from_repr(1), Some(MsgId::Chat));
        assert_eq!(MsgId::from_repr(6), Some(MsgId::ResetData));
        assert_eq!(MsgId::from_repr(2), None);
    }
}
