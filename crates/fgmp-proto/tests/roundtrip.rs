use fgmp_proto::{
    FixedStr, Kinematics, PositionMsg, PositionUpdate, ProtoError,
    codec::{
        decode_f32, decode_f64, decode_pair_u16, decode_u16, decode_u32, encode_f32, encode_f64,
        encode_pair_u16, encode_u16, encode_u32,
    },
    constants::{MAX_CALLSIGN_LEN, MAX_MODEL_NAME_LEN, POSITION_FRAME_LEN},
    frame, unframe,
    header::{Callsign, Header, RangeNm},
    position::ModelPath,
};
use proptest::prelude::*;

fn f32x3() -> impl Strategy<Value = [f32; 3]> {
    prop::array::uniform3(any::<u32>().prop_map(f32::from_bits))
}

fn kinematics_strategy() -> impl Strategy<Value = Kinematics> {
    (
        prop::array::uniform3(any::<u64>().prop_map(f64::from_bits)),
        f32x3(),
        f32x3(),
        f32x3(),
        f32x3(),
        f32x3(),
    )
        .prop_map(
            |(position, orientation, linear_vel, angular_vel, linear_accel, angular_accel)| {
                Kinematics {
                    position,
                    orientation,
                    linear_vel,
                    angular_vel,
                    linear_accel,
                    angular_accel,
                }
            },
        )
}

/// Compare payloads by bit pattern so NaN fields count as equal.
fn payload_bits(p: &PositionMsg) -> Vec<u64> {
    let k = &p.kinematics;
    let mut bits = vec![p.time.to_bits(), p.lag.to_bits(), p.pad.to_bits()];
    bits.extend(k.position.iter().map(|v| v.to_bits()));
    for arr in [
        k.orientation,
        k.linear_vel,
        k.angular_vel,
        k.linear_accel,
        k.angular_accel,
    ] {
        bits.extend(arr.iter().map(|v| u64::from(v.to_bits())));
    }
    bits
}

proptest! {
    #[test]
    fn u32_roundtrip(v in any::<u32>()) {
        prop_assert_eq!(decode_u32(&encode_u32(v)), Ok(v));
    }

    #[test]
    fn u16_roundtrip(v in any::<u16>()) {
        prop_assert_eq!(decode_u16(&encode_u16(v)), Ok(v));
    }

    #[test]
    fn f64_roundtrip_is_bit_exact(bits in any::<u64>()) {
        let v = f64::from_bits(bits);
        prop_assert_eq!(decode_f64(&encode_f64(v)).map(f64::to_bits), Ok(bits));
    }

    #[test]
    fn f32_roundtrip_is_bit_exact(bits in any::<u32>()) {
        let v = f32::from_bits(bits);
        prop_assert_eq!(decode_f32(&encode_f32(v)).map(f32::to_bits), Ok(bits));
    }

    #[test]
    fn pair_roundtrip(a in any::<u16>(), b in any::<u16>()) {
        prop_assert_eq!(decode_pair_u16(&encode_pair_u16(a, b)), Ok((a, b)));
    }

    #[test]
    fn frame_roundtrip(
        callsign in "[A-Z0-9-]{0,12}",
        model in "[a-zA-Z0-9/._-]{0,120}",
        min in any::<u16>(),
        max in any::<u16>(),
        reply_port in any::<u16>(),
        k in kinematics_strategy(),
        time_bits in any::<u64>(),
        lag_bits in any::<u64>(),
    ) {
        let header = Header::position(RangeNm { min, max }, reply_port, Callsign::new(&callsign));
        let payload = PositionMsg::with_time(
            ModelPath::new(&model),
            &k,
            f64::from_bits(lag_bits),
            0.0,
            f64::from_bits(time_bits),
        );

        let buf = frame(&header, &payload);
        prop_assert_eq!(buf.len(), header.msg_len as usize);

        let (h, p) = unframe(&buf).unwrap();
        prop_assert_eq!(h, header);
        prop_assert_eq!(p.model, payload.model);
        prop_assert_eq!(payload_bits(&p), payload_bits(&payload));
    }

    #[test]
    fn any_short_prefix_is_rejected(len in 0usize..POSITION_FRAME_LEN) {
        let header = Header::position(RangeNm::default(), 0, Callsign::new("AFMC"));
        let payload = PositionMsg::with_time(ModelPath::new("m"), &Kinematics::default(), 1.0, 0.0, 0.0);
        let buf = frame(&header, &payload);
        let is_short = matches!(
            unframe(&buf[..len]),
            Err(ProtoError::ShortBuffer { needed: POSITION_FRAME_LEN, actual }) if actual == len
        );
        prop_assert!(is_short);
    }
}

#[test]
fn example_scenario_roundtrips_exactly() {
    let k = Kinematics {
        position: [2589114.800074, -1080806.835734, 5708738.990279],
        orientation: [-2.130530, -1.660662, 0.242749],
        ..Kinematics::default()
    };
    let buf = PositionUpdate::encode(
        Callsign::new("AFMC"),
        ModelPath::new("Aircraft/f16/Models/F-16.xml"),
        RangeNm::default(),
        0,
        &k,
        1.0,
    );

    let update = PositionUpdate::decode(&buf).unwrap();
    assert_eq!(update.header.msg_len as usize, buf.len());
    assert_eq!(update.callsign().as_bytes(), b"AFMC");
    assert_eq!(
        update.position.model.as_bytes(),
        b"Aircraft/f16/Models/F-16.xml"
    );
    assert_eq!(update.header.range, RangeNm { min: 0, max: 100 });
    assert_eq!(update.header.reply_port, 0);
    assert_eq!(*update.kinematics(), k);
    for (got, want) in update.kinematics().position.iter().zip(k.position) {
        assert_eq!(got.to_bits(), want.to_bits());
    }
    for (got, want) in update.kinematics().orientation.iter().zip(k.orientation) {
        assert_eq!(got.to_bits(), want.to_bits());
    }
}

#[test]
fn oversized_strings_are_bounded_exactly() {
    let callsign = "C".repeat(MAX_CALLSIGN_LEN + 5);
    let model = "M".repeat(MAX_MODEL_NAME_LEN + 5);

    let header = Header::position(RangeNm::default(), 0, Callsign::new(&callsign));
    let payload = PositionMsg::with_time(ModelPath::new(&model), &Kinematics::default(), 1.0, 0.0, 0.0);
    let buf = frame(&header, &payload);

    let mut want_callsign = [b'C'; MAX_CALLSIGN_LEN];
    want_callsign[MAX_CALLSIGN_LEN - 1] = 0;
    assert_eq!(&buf[24..32], &want_callsign);

    let mut want_model = [b'M'; MAX_MODEL_NAME_LEN];
    want_model[MAX_MODEL_NAME_LEN - 1] = 0;
    assert_eq!(&buf[32..32 + MAX_MODEL_NAME_LEN], &want_model[..]);

    assert_eq!(
        FixedStr::<MAX_CALLSIGN_LEN>::try_new(&callsign),
        Err(ProtoError::EncodingOverflow {
            width: MAX_CALLSIGN_LEN,
            len: MAX_CALLSIGN_LEN + 5
        })
    );
}
