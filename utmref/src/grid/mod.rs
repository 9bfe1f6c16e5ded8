//! Codec de référence de quadrillage MGRS

mod codec;
pub mod digraph;

pub use codec::{decode, encode, parse, MGRS_LEN};
