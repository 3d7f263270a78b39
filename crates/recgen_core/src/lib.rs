//! Provide the canonical declaration-language vocabulary and generator conventions for recgen.
//!
//! This crate is intentionally small and dependency-free. It is shared by:
//! - the declaration frontend (`recgen_syntax`), which lexes keywords and punctuation by ID, and
//! - the generator (`recgen`), which relies on the well-known names in [`lang::conventions`].
//!
//! ## Notes
//!
//! - This is a "vocabulary" crate: **no IO**, no global state, and no AST types.

pub mod lang;
