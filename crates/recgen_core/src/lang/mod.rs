//! Declaration-language vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `PunctuationId`) and look up spellings via
//! registry tables instead of scattering string comparisons across the frontend.
//!
//! ## Examples
//! ```rust
//! use recgen_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("class"), Some(KeywordId::Class));
//! assert_eq!(keywords::as_str(KeywordId::Class), "class");
//! ```

pub mod conventions;
pub mod keywords;
pub mod punctuation;
