use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    codec::{Reader, Writer},
    constants::{MAX_MODEL_NAME_LEN, POSITION_LEN},
    error::ProtoError,
    fixed_str::FixedStr,
};

pub type ModelPath = FixedStr<MAX_MODEL_NAME_LEN>;

/// Kinematic state supplied by the flight model.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kinematics {
    /// Geocentric cartesian position in metres.
    pub position: [f64; 3],
    pub orientation: [f32; 3],
    pub linear_vel: [f32; 3],
    pub angular_vel: [f32; 3],
    pub linear_accel: [f32; 3],
    pub angular_accel: [f32; 3],
}

/// Position payload (wire format).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionMsg {
    pub model: ModelPath,

    /// Sender wall clock, nanoseconds since the Unix epoch.
    pub time: f64,

    /// Interpolation hint for the receiver.
    pub lag: f64,

    pub kinematics: Kinematics,

    pub pad: f64,
}

impl PositionMsg {
    pub const LEN: usize = POSITION_LEN;

    /// Build a payload stamped with the current wall clock.
    pub fn new(model: ModelPath, kinematics: &Kinematics, lag: f64, pad: f64) -> Self {
        Self::with_time(model, kinematics, lag, pad, now_nanos())
    }

    pub fn with_time(
        model: ModelPath,
        kinematics: &Kinematics,
        lag: f64,
        pad: f64,
        time: f64,
    ) -> Self {
        Self {
            model,
            time,
            lag,
            kinematics: *kinematics,
            pad,
        }
    }

    /// Encode this payload into `out`.
    ///
    /// Offsets (bytes):
    /// - 0..96    model
    /// - 96..104  time (f64)
    /// - 104..112 lag (f64)
    /// - 112..136 position (3 x f64)
    /// - 136..148 orientation (3 x f32)
    /// - 148..160 linear_vel
    /// - 160..172 angular_vel
    /// - 172..184 linear_accel
    /// - 184..196 angular_accel
    /// - 196..204 pad (f64)
    pub fn encode_into(&self, out: &mut [u8; POSITION_LEN]) {
        let k = &self.kinematics;
        let mut w = Writer::new(out);
        w.put(&self.model.to_wire());
        w.put_f64(self.time);
        w.put_f64(self.lag);
        w.put_f64x3(&k.position);
        w.put_f32x3(&k.orientation);
        w.put_f32x3(&k.linear_vel);
        w.put_f32x3(&k.angular_vel);
        w.put_f32x3(&k.linear_accel);
        w.put_f32x3(&k.angular_accel);
        w.put_f64(self.pad);
    }

    pub fn to_bytes(&self) -> [u8; POSITION_LEN] {
        let mut out = [0u8; POSITION_LEN];
        self.encode_into(&mut out);
        out
    }

    /// Decode the first `POSITION_LEN` bytes of `buf`.
    pub fn decode(buf: &[u8]) -> Result<PositionMsg, ProtoError> {
        let mut r = Reader::new(buf);
        let model = ModelPath::from_wire(r.take_array()?);
        let time = r.f64()?;
        let lag = r.f64()?;
        let kinematics = Kinematics {
            position: r.f64x3()?,
            orientation: r.f32x3()?,
            linear_vel: r.f32x3()?,
            angular_vel: r.f32x3()?,
            linear_accel: r.f32x3()?,
            angular_accel: r.f32x3()?,
        };
        let pad = r.f64()?;

        Ok(PositionMsg {
            model,
            time,
            lag,
            kinematics,
            pad,
        })
    }
}

fn now_nanos() -> f64 {
    // A clock set before 1970 stamps zero rather than failing the send.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as f64)
        .unwrap_or(0.0)
}
