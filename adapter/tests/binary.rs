use adapter::{ConditionTextAdapter, Document};
use adapter::error::Error;
use condition::ConditionValue;
use encoding::EncodingKind;
use rstest::rstest;
use serde::{Deserialize, Serialize};

const HEX: &str =
    "A12A8020E9241D95AD4FC17A373E609BB69FF0263C83597DD6BC758F162BF0D9D15F09EA8102046682020780";

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct HexRecord {
    #[serde(with = "adapter::hex")]
    condition: ConditionValue,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Base64Record {
    #[serde(with = "adapter::base64")]
    condition: ConditionValue,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Base64NoPaddingRecord {
    #[serde(with = "adapter::base64_no_padding")]
    condition: ConditionValue,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Base64UrlRecord {
    #[serde(with = "adapter::base64url")]
    condition: ConditionValue,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Base64UrlNoPaddingRecord {
    #[serde(with = "adapter::base64url_no_padding")]
    condition: ConditionValue,
}

// the same shape with plain bytes, as a format without the hooks writes it
#[derive(Serialize, Deserialize)]
struct BytesRecord {
    condition: Vec<u8>,
}

fn condition() -> ConditionValue {
    ConditionTextAdapter::default().deserialize(HEX).unwrap()
}

fn to_bincode<T: Serialize>(value: &T) -> Vec<u8> {
    bincode::serde::encode_to_vec(value, bincode::config::standard()).unwrap()
}

fn from_bincode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, bincode::error::DecodeError> {
    bincode::serde::decode_from_slice(bytes, bincode::config::standard()).map(|(value, _)| value)
}

fn to_cbor<T: Serialize>(value: &T) -> Vec<u8> {
    let mut out = Vec::new();
    ciborium::ser::into_writer(value, &mut out).unwrap();
    out
}

fn from_cbor<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> T {
    ciborium::de::from_reader(bytes).unwrap()
}

#[test]
fn hook_modules_write_der_bytes_to_binary_formats() {
    let expected = to_bincode(&BytesRecord { condition: condition().into_der() });

    assert_eq!(expected, to_bincode(&HexRecord { condition: condition() }));
    assert_eq!(expected, to_bincode(&Base64Record { condition: condition() }));
    assert_eq!(expected, to_bincode(&Base64NoPaddingRecord { condition: condition() }));
    assert_eq!(expected, to_bincode(&Base64UrlRecord { condition: condition() }));
    assert_eq!(expected, to_bincode(&Base64UrlNoPaddingRecord { condition: condition() }));
}

#[test]
fn hook_modules_read_back_from_bincode() {
    let hex: HexRecord = from_bincode(&to_bincode(&HexRecord { condition: condition() })).unwrap();
    let base64: Base64Record = from_bincode(&to_bincode(&Base64Record { condition: condition() })).unwrap();
    let base64_no_padding: Base64NoPaddingRecord =
        from_bincode(&to_bincode(&Base64NoPaddingRecord { condition: condition() })).unwrap();
    let url: Base64UrlRecord = from_bincode(&to_bincode(&Base64UrlRecord { condition: condition() })).unwrap();
    let url_no_padding: Base64UrlNoPaddingRecord =
        from_bincode(&to_bincode(&Base64UrlNoPaddingRecord { condition: condition() })).unwrap();

    assert_eq!(condition(), hex.condition);
    assert_eq!(condition(), base64.condition);
    assert_eq!(condition(), base64_no_padding.condition);
    assert_eq!(condition(), url.condition);
    assert_eq!(condition(), url_no_padding.condition);
}

#[test]
fn hook_modules_read_owned_bytes() {
    let bytes = to_bincode(&HexRecord { condition: condition() });
    let record: HexRecord =
        bincode::serde::decode_from_std_read(&mut &bytes[..], bincode::config::standard()).unwrap();
    assert_eq!(condition(), record.condition);
}

#[test]
fn hook_modules_round_trip_through_cbor() {
    let record: Base64UrlRecord = from_cbor(&to_cbor(&Base64UrlRecord { condition: condition() }));
    assert_eq!(condition(), record.condition);
}

#[test]
fn hook_modules_read_der_written_as_a_sequence() {
    // serde writes a plain Vec<u8> as a sequence of integers
    let cbor = to_cbor(&BytesRecord { condition: condition().into_der() });
    let record: HexRecord = from_cbor(&cbor);
    assert_eq!(condition(), record.condition);
}

#[test]
fn hook_modules_reject_invalid_der_in_binary_formats() {
    let bytes = to_bincode(&BytesRecord { condition: vec![0x05, 0x00] });
    assert!(from_bincode::<HexRecord>(&bytes).is_err());
}

#[rstest(
    kind,
    case(EncodingKind::Hex),
    case(EncodingKind::Base64),
    case(EncodingKind::Base64NoPadding),
    case(EncodingKind::Base64Url),
    case(EncodingKind::Base64UrlNoPadding)
)]
fn document_round_trips_through_bincode(kind: EncodingKind) {
    let document = Document::new(condition(), kind);
    let bytes = to_bincode(&document);

    let read: Document = from_bincode(&bytes).unwrap();
    assert_eq!(document, read);
    assert_eq!(kind, read.encoding());
    assert_eq!(bytes, to_bincode(&read));
}

#[test]
fn document_round_trips_through_cbor() {
    let document = Document::new(condition(), EncodingKind::Base64NoPadding);
    let read: Document = from_cbor(&to_cbor(&document));
    assert_eq!(document, read);
}

// `depth` [0] constructed layers around a NULL.
fn nested(depth: usize) -> Vec<u8> {
    let mut headers = Vec::with_capacity(depth);
    let mut length = 2usize;
    for _ in 0..depth {
        let bytes = length.to_be_bytes();
        let significant = &bytes[bytes.iter().take_while(|&&b| b == 0).count()..];
        let mut header = vec![0xa0];
        if length < 0x80 {
            header.push(length as u8);
        } else {
            header.push(0x80 | significant.len() as u8);
            header.extend_from_slice(significant);
        }
        length += header.len();
        headers.push(header);
    }
    headers.into_iter().rev().flatten().chain([0x05, 0x00]).collect()
}

#[rstest(depth, case(40), case(20_000))]
fn deeply_nested_text_is_an_invalid_structure(depth: usize) {
    let text = encoding::encode(&nested(depth), EncodingKind::Hex);
    let result = ConditionTextAdapter::default().deserialize(text.as_str());
    assert!(matches!(result, Err(Error::InvalidConditionStructure(_))));

    let json = format!(r#"{{"condition":"{text}"}}"#);
    assert!(serde_json::from_str::<Document>(&json).is_err());
}
