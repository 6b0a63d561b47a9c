//! Decoder trait for type-safe conversions.
//!
//! `Decoder<T, D>` converts a source value of type `T` into a destination
//! type `D`. The destination must opt in through `DecodableFrom<T>`, so a
//! conversion that nobody declared fails to compile instead of failing at
//! runtime.
//!
//! # Implementation Guide
//!
//! ```no_run
//! use condtext::decoder::{DecodableFrom, Decoder};
//!
//! struct Text(String);
//! struct Bytes(Vec<u8>);
//!
//! #[derive(Debug)]
//! struct MyError;
//!
//! // 1. Mark the destination type as decodable from the source type
//! impl DecodableFrom<Text> for Bytes {}
//!
//! // 2. Implement the decoder on the source type
//! impl Decoder<Text, Bytes> for Text {
//!     type Error = MyError;
//!
//!     fn decode(&self) -> Result<Bytes, Self::Error> {
//!         Ok(Bytes(self.0.as_bytes().to_vec()))
//!     }
//! }
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// Implemented by the source type (usually `T == Self`). The destination
/// type must implement `DecodableFrom<T>`.
///
/// # Examples
///
/// ```ignore
/// use condtext::decoder::Decoder;
/// use encoding::EncodedText;
///
/// let text: EncodedText = "A0258020".parse().unwrap();
/// let bytes: Vec<u8> = text.decode().unwrap();
/// ```
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails. The specific error
    /// conditions depend on the implementing type.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
///
/// Has no methods; it exists so the compiler can reject undeclared
/// conversions.
///
/// ```no_run
/// use condtext::decoder::DecodableFrom;
///
/// struct Source;
/// struct Destination;
///
/// impl DecodableFrom<Source> for Destination {}
/// ```
pub trait DecodableFrom<T> {}
