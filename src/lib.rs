//! Build goal that generates sources from a Swagger/OpenAPI specification.
//!
//! A run loads the specification, resolves a generator by name from the
//! [`GeneratorRegistry`](generators::GeneratorRegistry), merges an optional
//! template directory and config file into that generator's options, renders
//! the sources and registers the output directory with the host build.
#![deny(unsafe_code)]

pub mod application;
pub mod generation;
pub mod generators;
pub mod infrastructure;
