//! Reed-Solomon forward error correction over two finite fields.
//!
//! This crate implements the byte-oriented classical Reed-Solomon code used
//! everywhere from QR codes to CDs ([`field::Gf256`]/[`rs256::Rs256`]), and a
//! transform-domain Reed-Solomon code over the Fermat prime field
//! `GF(65537)` whose encoder and decoder are built on a radix-2
//! Number-Theoretic Transform ([`field::Gf65537`]/[`rsi16::Rsi16`]). Both
//! codecs share the same shape: construct once from `(block_len, ecc_len)`,
//! then call `encode`/`decode` on caller-owned buffers.
//!
//! ```rust
//! use fec::rs256::Rs256;
//!
//! let rs = Rs256::new(9, 4).unwrap();
//! let mut codeword = rs.encode_owned(&[1, 2, 3, 4, 5]).unwrap();
//! codeword[2] ^= 0x55; // corrupt one byte
//! rs.decode(&mut codeword).unwrap();
//! assert_eq!(&codeword[..5], &[1, 2, 3, 4, 5]);
//! ```
//!
//! # Layers
//!
//! | Module | Role |
//! |---|---|
//! | [`field`] | `GF(256)` and `GF(65537)` element types and arithmetic |
//! | [`poly`] | Polynomial arithmetic generic over [`field::Field`] |
//! | [`ntt`] | Radix-2 NTT/INTT over `GF(65537)` |
//! | [`linalg`] | Gaussian elimination shared by both decoders |
//! | [`rs256`] | The classical byte-oriented codec |
//! | [`rsi16`] | The transform-domain codec |
//! | [`block`] | Streaming block driver over arbitrary-length input |
//!
//! Every layer depends only on the layer below it: `rs256`/`rsi16` build on
//! `poly` and (for `rsi16`) `ntt`'s roots-of-unity table, `poly` and `ntt`
//! build on `field`, and `block` builds on `rs256`/`rsi16` through the
//! [`block::BlockCodec`] trait without knowing which field either one uses.
//!
//! # Scope
//!
//! Out of scope: command-line wrappers, benchmarking harnesses, packaging,
//! language bindings, CSV reporting, platform detection. Non-goals:
//! convolutional codes, LDPC, erasure-only (no value decoding) codes, fields
//! other than the two above, codes longer than a field's size permits,
//! runtime-selectable field polynomials outside the validated defaults.
//!
//! # Errors
//!
//! Every fallible operation returns [`error::FecError`] rather than
//! panicking on bad caller input. Construction errors
//! ([`error::FecError::InvalidConfig`]) are raised once, at codec
//! construction; per-call errors ([`error::FecError::InputRange`],
//! [`error::FecError::BufferSize`]) are raised on method entry before any
//! buffer is touched; [`error::FecError::DecodeFailed`] is a defined decode
//! outcome that leaves the input buffer unmodified, not a bug.
//!
//! # `no_std`
//!
//! This crate is `no_std` and uses [`alloc`] for the handful of
//! variable-length buffers (syndrome vectors, generator polynomials, scratch
//! codeword copies) that scale with `ecc_len`/`block_len`.
#![no_std]

extern crate alloc;

pub mod block;
pub mod error;
pub mod field;
pub mod linalg;
pub mod ntt;
pub mod poly;
pub mod rs256;
pub mod rsi16;

pub use error::{FecError, Result};
pub use field::{Field, Gf256, Gf65537};
pub use rs256::Rs256;
pub use rsi16::Rsi16;
