//! # condtext
//!
//! Core conversion traits for moving crypto-conditions between their binary
//! and textual representations.
//!
//! ## Overview
//!
//! A condition travels through these representations:
//! ```text
//! text (hex / base64 / base64url) ⇄ Vec<u8> ⇄ Der ⇄ ConditionValue
//! ```
//!
//! Each step towards the structured value uses the `Decoder` trait, and each
//! step back towards bytes uses the `Encoder` trait.
//!
//! ## Type Safety
//!
//! Both traits are guarded by marker traits (`DecodableFrom` and
//! `EncodableTo`) so that only explicitly allowed conversions compile.
//!
//! ## Example
//!
//! ```ignore
//! use condtext::decoder::Decoder;
//! use condition::ConditionValue;
//! use der::Der;
//!
//! let bytes = vec![0xa0, 0x25, 0x80, 0x20 /* ... */];
//! let der: Der = bytes.decode().unwrap();
//! let condition: ConditionValue = der.decode().unwrap();
//! ```
//!
//! Encoding works in the reverse direction:
//!
//! ```ignore
//! use condtext::encoder::Encoder;
//!
//! let der: Der = condition.encode().unwrap();
//! let bytes: Vec<u8> = der.encode().unwrap();
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
