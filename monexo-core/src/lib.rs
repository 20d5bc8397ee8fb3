//! Curve primitives, the BDHKE blind-signature protocol, amount
//! decomposition and the wire types shared between the monexo mint and
//! wallet.

pub mod amount;
pub mod blind;
pub mod curve;
pub mod dhke;
pub mod error;
pub mod keyset;
pub mod primitives;
pub mod proof;
