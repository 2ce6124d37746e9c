//! Template loading for `@template` includes
//!
//! A template is a markup file holding only directives. Including it fills
//! every attribute the including document has not set yet.
//!
//! # Example
//!
//! ```text
//! : brand.template.dem
//! @footer Sent by the bot
//! @color 88,101,242
//!
//! : welcome.dem
//! @template brand
//! # Welcome!
//! ```

mod resolver;
mod source;

pub use resolver::Resolver;
pub use source::{normalize_path, FileSource, LineSource, MemorySource};
