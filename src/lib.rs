#![warn(missing_docs)]
//! A binary-data toolkit built around the SM3 hash function.
//!
//! The crate provides a growable [`Buffer`] with an explicit size/capacity
//! model, big-endian serialization cursors over it, hex and base64 codecs,
//! and SM3 (GB/T 32905-2016) both as a streaming context and as a
//! [`digest::Digest`] implementation.
//!
//! # Example
//! ```
//! use sm3kit::{sm3, Buffer, BufferReader, BufferWriter};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!   let mut b = Buffer::new();
//!   BufferWriter::new(&mut b).write(7u32).write_cstr("hello world");
//!
//!   let mut r = BufferReader::new(&b);
//!   assert_eq!(r.read::<u32>()?, 7);
//!   assert_eq!(r.read_string()?, "hello world");
//!
//!   let digest = sm3::digest(&Buffer::from("abc"));
//!   println!("Result: {}", digest.to_hex());
//!
//!   Ok(())
//! }
//! ```
/// `buffer` is the owned, growable byte container.
pub mod buffer;
/// `cipher` is the contract for block ciphers over buffers.
pub mod cipher;
/// `codec` holds the hex and base64 text codecs.
pub mod codec;
/// `compress` is the SM3 compression function.
pub mod compress;
/// `cursor` reads and writes typed values in canonical byte order.
pub mod cursor;
/// `endian` converts integers to and from canonical (big-endian) order.
pub mod endian;
/// `error` is the crate error type.
pub mod error;
/// `sm3` is the streaming SM3 context and the digest entry points.
pub mod sm3;
/// `sm3core` plugs SM3 into the `digest` crate traits.
pub mod sm3core;

pub use buffer::Buffer;
pub use cipher::BlockCipher;
pub use cursor::{BufferReader, BufferWriter};
pub use endian::Canonical;
pub use error::{Error, Result};
pub use sm3::Sm3Context;
pub use sm3core::{Sm3, Sm3Core};
