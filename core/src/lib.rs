//! Rewrite engines over the generic type model.
//!
//! Two stages run once per build. The model transformers ([`transform`])
//! restructure an [`OmniModel`](omnigen_types::OmniModel) in place, first
//! target-independently and then within the limits of the chosen output
//! language. The interpreter ([`interpret`]) turns the result into a syntax
//! tree ([`ast`]) that tree transformers rewrite copy-on-write. [`api`]
//! wires the stages together.

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, format, string::String, string::ToString, vec, vec::Vec};

pub mod api;
pub mod ast;
pub mod errors;
pub mod interpret;
pub mod transform;

pub use errors::TransformError;
