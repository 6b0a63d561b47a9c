//! # encoding
//!
//! Text encodings for the canonical binary form of a crypto-condition.
//!
//! - [`EncodingKind`] is the closed catalog of supported encodings together
//!   with their alphabet and padding rules.
//! - [`encode`] and [`decode`] convert between bytes and text for one
//!   given kind, strictly.
//! - [`detect`] and [`decode_any`] accept text in any supported kind.
//!
//! ```
//! use encoding::{EncodingKind, decode_any, encode};
//!
//! let text = encode(&[0xfb, 0xff], EncodingKind::Base64Url);
//! assert_eq!("-_8=", text.as_str());
//!
//! let (kind, bytes) = decode_any("-_8=").unwrap();
//! assert_eq!(EncodingKind::Base64Url, kind);
//! assert_eq!(vec![0xfb, 0xff], bytes);
//! ```

#![forbid(unsafe_code)]

pub mod codec;
pub mod detect;
pub mod error;
pub mod kind;

pub use codec::{EncodedText, decode, encode};
pub use detect::{decode_any, detect};
pub use kind::{Alphabet, EncodingKind, Padding};
