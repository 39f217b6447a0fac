use tuplewire::{
    decode, encode, Composite, EncodeError, Fingerprint, Message, Pack, ParseError,
    MAX_MESSAGE_SIZE,
};

#[derive(Composite, Clone, Debug, PartialEq)]
struct Header {
    version: u16,
    flags: u8,
    session: u64,
}

#[derive(Composite, Clone, Debug, PartialEq)]
struct Payload(Vec<u8>, String);

#[derive(Composite, Clone, Debug, PartialEq)]
struct Heartbeat;

#[test]
fn mixed_tuple_roundtrip() {
    let orig = (
        7u32,
        String::from("transcode me"),
        [10u64, 20, 30, 40, 50],
        true,
        -2.5f64,
    );
    let msg = encode(&orig).unwrap();
    let back: (u32, String, [u64; 5], bool, f64) = decode(&msg).unwrap();
    assert_eq!(back, orig);
}

#[test]
fn derived_composite_roundtrip() {
    let orig = (
        Header {
            version: 3,
            flags: 0b0101,
            session: 0x1122_3344_5566_7788,
        },
        Payload(vec![9, 8, 7], String::from("body")),
        0xffu8,
    );
    let msg = encode(&orig).unwrap();
    let back: (Header, Payload, u8) = decode(&msg).unwrap();
    assert_eq!(back, orig);
}

#[test]
fn unit_composite_occupies_no_bytes() {
    let msg = encode(&(Heartbeat, 5u8)).unwrap();
    assert_eq!(msg.len(), Fingerprint::WIDTH + 1);
    let (hb, n): (Heartbeat, u8) = decode(&msg).unwrap();
    assert_eq!(hb, Heartbeat);
    assert_eq!(n, 5);
}

#[test]
fn composite_consumed_count_positions_later_fields() {
    // Header serializes as 2 + 1 + 8 bytes; the following u16 must be read
    // from the byte right after them.
    let orig = (
        Header {
            version: 1,
            flags: 0,
            session: 42,
        },
        0xbeefu16,
    );
    let msg = encode(&orig).unwrap();
    assert_eq!(msg.len(), Fingerprint::WIDTH + 11 + 2);
    let (_, tail): (Header, u16) = decode(&msg).unwrap();
    assert_eq!(tail, 0xbeef);
}

#[test]
fn fingerprint_distinguishes_composite_types() {
    assert_ne!(<(Header,)>::FINGERPRINT, <(Payload,)>::FINGERPRINT);
    assert_ne!(<(Header,)>::FINGERPRINT, <(Heartbeat,)>::FINGERPRINT);
}

#[test]
fn type_mismatch_surfaces_both_fingerprints() {
    let msg = encode(&(1u32, 2u32)).unwrap();
    match decode::<(u32, u64)>(&msg) {
        Err(ParseError::TypeMismatch { expected, actual }) => {
            assert_eq!(expected, <(u32, u64)>::FINGERPRINT);
            assert_eq!(actual, <(u32, u32)>::FINGERPRINT);
        }
        other => panic!("expected TypeMismatch, got {:?}", other),
    }
}

#[test]
fn reordered_fields_do_not_decode() {
    let msg = encode(&(String::from("a"), 1u8)).unwrap();
    assert!(matches!(
        decode::<(u8, String)>(&msg),
        Err(ParseError::TypeMismatch { .. })
    ));
}

#[test]
fn oversized_encode_is_rejected_without_output() {
    let blob = vec![0u8; MAX_MESSAGE_SIZE];
    match encode(&(blob,)) {
        Err(EncodeError::BufferOverflow { capacity, required }) => {
            assert_eq!(capacity, MAX_MESSAGE_SIZE);
            assert!(required > capacity);
        }
        other => panic!("expected BufferOverflow, got {:?}", other),
    }
}

#[test]
fn largest_admissible_message_roundtrips() {
    let payload = vec![0xa5u8; MAX_MESSAGE_SIZE - Fingerprint::WIDTH - 2];
    let msg = encode(&(payload.clone(),)).unwrap();
    assert_eq!(msg.len(), MAX_MESSAGE_SIZE);
    let (back,): (Vec<u8>,) = decode(&msg).unwrap();
    assert_eq!(back, payload);
}

#[test]
fn truncated_message_is_short() {
    let msg = encode(&(1u64,)).unwrap();
    let cut = &msg.as_bytes()[..Fingerprint::WIDTH - 1];
    assert!(matches!(
        decode::<(u64,)>(cut),
        Err(ParseError::ShortMessage { .. })
    ));
}

#[test]
fn truncated_field_is_underflow() {
    let msg = encode(&(1u64,)).unwrap();
    let cut = &msg.as_bytes()[..msg.len() - 1];
    assert!(matches!(
        decode::<(u64,)>(cut),
        Err(ParseError::Underflow { .. })
    ));
}

#[test]
fn corrupt_length_prefix_is_overflow_not_underflow() {
    // Rewrite the string's length prefix to claim more than remains.
    let mut raw = encode(&(String::from("hi"),)).unwrap().into_vec();
    let prefix_at = Fingerprint::WIDTH;
    raw[prefix_at..prefix_at + 2].copy_from_slice(&1000u16.to_ne_bytes());
    match decode::<(String,)>(&raw) {
        Err(ParseError::LengthOverflow { claimed, remaining }) => {
            assert_eq!(claimed, 1000);
            assert_eq!(remaining, 2);
        }
        other => panic!("expected LengthOverflow, got {:?}", other),
    }
}

#[test]
fn array_count_mismatch_propagates() {
    // Valid message for [u8; 3]; decoding as [u8; 4] first trips the
    // fingerprint, so corrupt the count field of a same-shape message
    // instead to hit the count check.
    let mut raw = encode(&([1u8, 2, 3],)).unwrap().into_vec();
    let count_at = Fingerprint::WIDTH;
    raw[count_at..count_at + 2].copy_from_slice(&2u16.to_ne_bytes());
    assert!(matches!(
        decode::<([u8; 3],)>(&raw),
        Err(ParseError::WrongCount(_))
    ));
}

#[test]
fn message_survives_vec_round_trip() {
    let msg = encode(&(11u16, String::from("carry"))).unwrap();
    let carried: Vec<u8> = msg.clone().into_vec();
    let revived = Message::from(carried);
    assert_eq!(revived, msg);
    let (n, s): (u16, String) = decode(&revived).unwrap();
    assert_eq!((n, s.as_str()), (11, "carry"));
}
