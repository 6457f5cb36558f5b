#![forbid(unsafe_code)]

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use vec_map::VecMapKey;

pub mod annotation;
pub mod class_id;
pub mod flags;
pub mod names;
pub mod service;
pub mod ty;
pub mod vec_map;

pub use class_id::ClassId;

/// One class-like declaration known to the compiler session.
///
/// Symbols are handed out by the symbol-resolution service, never invented here.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

impl Debug for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sym@{}", self.0)
    }
}

/// A source file within one compilation session.
///
/// File ids are dense, which lets per-file data live in a [vec_map::VecMap].
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct FileId(pub u32);

impl Debug for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "file@{}", self.0)
    }
}

impl VecMapKey for FileId {
    fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Identity of a type parameter declared somewhere in the session.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct TypeParamId(pub u32);

impl Debug for TypeParamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tparam@{}", self.0)
    }
}
