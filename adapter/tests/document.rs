use adapter::Document;
use adapter::error::Error;
use condition::ConditionValue;
use encoding::EncodingKind;
use rstest::rstest;
use serde::{Deserialize, Serialize};

const HEX: &str =
    "A12A8020E9241D95AD4FC17A373E609BB69FF0263C83597DD6BC758F162BF0D9D15F09EA8102046682020780";
const BASE64: &str = "oSqAIOkkHZWtT8F6Nz5gm7af8CY8g1l91rx1jxYr8NnRXwnqgQIEZoICB4A=";
const BASE64_NO_PADDING: &str = "oSqAIOkkHZWtT8F6Nz5gm7af8CY8g1l91rx1jxYr8NnRXwnqgQIEZoICB4A";

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

fn condition() -> ConditionValue {
    adapter::ConditionTextAdapter::default().deserialize(HEX).unwrap()
}

fn document(text: &str) -> String {
    format!(r#"{{"condition":"{text}"}}"#)
}

#[test]
fn hook_modules_write_their_own_encoding() {
    let json = serde_json::to_string(&HexRecord { condition: condition() }).unwrap();
    assert_eq!(document(HEX), json);

    let json = serde_json::to_string(&Base64Record { condition: condition() }).unwrap();
    assert_eq!(document(BASE64), json);

    let json = serde_json::to_string(&Base64NoPaddingRecord { condition: condition() }).unwrap();
    assert_eq!(document(BASE64_NO_PADDING), json);

    let json = serde_json::to_string(&Base64UrlRecord { condition: condition() }).unwrap();
    assert_eq!(document(BASE64), json);

    let json = serde_json::to_string(&Base64UrlNoPaddingRecord { condition: condition() }).unwrap();
    assert_eq!(document(BASE64_NO_PADDING), json);
}

#[rstest(input, case(HEX), case("a12a8020e9241d95ad4fc17a373e609bb69ff0263c83597dd6bc758f162bf0d9d15f09ea8102046682020780"), case(BASE64), case(BASE64_NO_PADDING))]
fn hook_modules_read_every_encoding(input: &str) {
    let json = document(input);
    let expected = condition();

    let hex: HexRecord = serde_json::from_str(&json).unwrap();
    let base64: Base64Record = serde_json::from_str(&json).unwrap();
    let url: Base64UrlNoPaddingRecord = serde_json::from_str(&json).unwrap();

    assert_eq!(expected, hex.condition);
    assert_eq!(expected, base64.condition);
    assert_eq!(expected, url.condition);
}

#[rstest(
    kind,
    expected,
    case(EncodingKind::Hex, HEX),
    case(EncodingKind::Base64, BASE64),
    case(EncodingKind::Base64NoPadding, BASE64_NO_PADDING),
    case(EncodingKind::Base64Url, BASE64),
    case(EncodingKind::Base64UrlNoPadding, BASE64_NO_PADDING)
)]
fn document_round_trip(kind: EncodingKind, expected: &str) {
    let json = serde_json::to_string(&Document::new(condition(), kind)).unwrap();
    assert_eq!(document(expected), json);

    let read: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(&condition(), read.condition());

    // the second write reproduces the first
    assert_eq!(json, serde_json::to_string(&read).unwrap());
}

#[test]
fn document_remembers_detected_encoding() {
    let read: Document = serde_json::from_str(&document(BASE64_NO_PADDING)).unwrap();
    assert_eq!(EncodingKind::Base64NoPadding, read.encoding());

    let converted = read.with_encoding(EncodingKind::Hex);
    assert_eq!(HEX, converted.text().as_str());
}

#[rstest(
    input,
    // outside every alphabet
    case("A1*2A"),
    // padding in the middle
    case("oSqA=IOk"),
    // odd length hex that is too short for base64
    case("A")
)]
fn document_rejects_unreadable_text(input: &str) {
    let error = serde_json::from_str::<Document>(&document(input)).unwrap_err();
    assert!(error.to_string().contains("does not match any supported encoding"));
}

#[test]
fn document_rejects_invalid_structure() {
    let error = serde_json::from_str::<Document>(&document("0500")).unwrap_err();
    assert!(error.to_string().contains("invalid condition structure"));
}

#[test]
fn document_rejects_unknown_fields() {
    let json = format!(r#"{{"condition":"{HEX}","extra":1}}"#);
    assert!(serde_json::from_str::<Document>(&json).is_err());
}

#[test]
fn adapter_errors_keep_their_cause() {
    let adapter = adapter::ConditionTextAdapter::new(EncodingKind::Base64);
    assert!(matches!(adapter.deserialize("A1*2A"), Err(Error::Encoding(_))));
    assert!(matches!(
        adapter.deserialize("0500"),
        Err(Error::InvalidConditionStructure(_))
    ));
}
