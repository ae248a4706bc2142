/// Magic word at the beginning of every header ("FGFS").
/// Used to quickly reject unrelated or corrupted data.
pub const MAGIC: u32 = 0x4647_4653;

/// Wire-format protocol version (major 1, minor 1).
pub const VERSION: u32 = 0x0001_0001;

/// Width of the callsign field, terminator included.
pub const MAX_CALLSIGN_LEN: usize = 8;

/// Width of the model path field, terminator included.
pub const MAX_MODEL_NAME_LEN: usize = 96;

/// Fixed header length in bytes (wire format).
pub const HEADER_LEN: usize = 32;

/// Fixed position payload length in bytes (wire format).
pub const POSITION_LEN: usize = 204;

/// Length of one position-update datagram.
pub const POSITION_FRAME_LEN: usize = HEADER_LEN + POSITION_LEN;

/// Receive buffer size. Large enough for any UDP datagram, so oversized
/// frames from newer peers are read whole instead of being cut by the kernel.
pub const MAX_DATAGRAM: usize = 64 * 1024;

/// Default remote UDP port of a multiplayer server.
pub const DEFAULT_SERVER_PORT: u16 = 5000;
