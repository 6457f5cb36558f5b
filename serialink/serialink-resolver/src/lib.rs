#![forbid(unsafe_code)]

//! Serializer resolution for the serialization compiler plugin.
//!
//! Given a resolved type and the file it is used in, [SerializerResolver] finds the
//! serializer class that applies, consulting file-level annotations, builtin runtime
//! serializers and the type's own declaration, in that order.

pub use config::ResolverConfig;
pub use error::MalformedRegistration;
pub use resolve::{SerializationPlugin, SerializerResolver};

pub mod builtins;
pub mod check;
pub mod config;
pub mod error;
pub mod expand;
pub mod file_index;

mod resolve;
