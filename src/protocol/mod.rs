//! Wire formats spoken with the metadata authority.

pub mod models;
