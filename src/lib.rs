//! Omnigen - schema-driven code generation core
//!
//! # Overview
//!
//! Omnigen reads API and data schemas into one generic type model, reshapes
//! that model for the output language, and produces a language-neutral
//! syntax tree that renderers turn into source files. This crate bundles:
//!
//! - [`omnigen_types`]: the type algebra and the equality engine that
//!   grades how different two types are
//! - [`omnigen_core`]: configuration, the model transformer passes, the
//!   syntax-tree core and the build orchestrator
//!
//! # Quick Start
//!
//! ```
//! use omnigen::{Bump, BuildOptions, Generator, OmniModel, PrimitiveKind, TargetFeatures};
//!
//! // Two subtypes differing only in the type of one property.
//! let mut model = OmniModel::new("shop");
//! let product = model.object("Product");
//! let book = model.object("Book");
//! let album = model.object("Album");
//! let int = model.primitive(PrimitiveKind::Integer);
//! let double = model.primitive(PrimitiveKind::Double);
//! model.extend(book, product).unwrap();
//! model.extend(album, product).unwrap();
//! model.property(book, "price", int).unwrap();
//! model.property(album, "price", double).unwrap();
//! model.export(book);
//! model.export(album);
//!
//! // Build for a Java-like target.
//! let arena = Bump::new();
//! let options = BuildOptions::resolve(TargetFeatures::JAVA, &[]);
//! let root = Generator::new(&arena, options).generate(&mut model).unwrap();
//!
//! // `Product<T>` is declared once, reached through its first binding.
//! let units: Vec<_> = root.units().iter().filter_map(|u| u.name()).collect();
//! assert_eq!(units, ["Book", "Product", "Album"]);
//! ```
//!
//! # Stages
//!
//! 1. **Model transformers** restructure the [`OmniModel`]: simplifying
//!    inheritance, elevating shared properties and synthesizing generics,
//!    then adapting to the target's [`TargetFeatures`].
//! 2. **Interpretation** declares every reachable type in a syntax tree.
//! 3. **Tree transformers** rewrite that tree copy-on-write, keeping node ids
//!    stable so references between nodes survive.

pub use bumpalo::Bump;
pub use omnigen_core;
pub use omnigen_types;

// Re-export the build entry points
pub use omnigen_core::api::{BuildOptions, Generator, PartialOptions};
pub use omnigen_core::{TransformError, ast::RootAstNode};

// Re-export the model vocabulary
pub use omnigen_types::{
    CompositionKind, ModelError, OmniModel, OmniType, PrimitiveKind, TargetFeatures, TypeId,
};
