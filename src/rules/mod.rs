//! Grammar data model
//!
//! This module defines the immutable building blocks a grammar is made of:
//! - [`operator`]: operator trees (the body of every rule)
//! - [`class`]: character-range specifications for class operators
//! - [`definition`]: named rules binding an operator tree to an optional action
//! - [`value`]: the parse-value algebra flowing through every match
//!
//! Everything here is constructed once at grammar-authoring time and never
//! mutated during parsing; the [`crate::engine`] module only reads it.

pub mod class;
pub mod definition;
pub mod operator;
pub mod value;
