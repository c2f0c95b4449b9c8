//! Public entry points for running a build.
//!
//! A [`Generator`] owns one resolved [`BuildOptions`] and the ordered lists
//! of model and tree transformers. Each call to [`Generator::generate`]
//! runs both model stages, interprets the result and rewrites the tree.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use omnigen_core::api::{BuildOptions, Generator};
//! use omnigen_types::{OmniModel, PrimitiveKind};
//!
//! let mut model = OmniModel::new("pets");
//! let string = model.primitive(PrimitiveKind::String);
//! let pet = model.object("Pet");
//! model.property(pet, "name", string).unwrap();
//! model.export(pet);
//!
//! let arena = Bump::new();
//! let generator = Generator::new(&arena, BuildOptions::default());
//! let root = generator.generate(&mut model).unwrap();
//! assert_eq!(root.units().len(), 1);
//! ```

pub mod generator;
pub mod options;

pub use generator::Generator;
pub use options::{BuildOptions, ModelTransformOptions, ParserOptions, PartialOptions, TargetOptions};
