use std::fmt::{Debug, Display};

use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

/// Fully qualified identity of a class-like declaration, e.g. `core.collections.List`.
///
/// The package part and the relative name are kept apart so that nested classes
/// (`core.collections.Map.Entry`) keep an unambiguous package.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct ClassId {
    fq_name: ArcStr,
    package_len: usize,
}

impl ClassId {
    pub(crate) const fn from_static(fq_name: ArcStr, package_len: usize) -> Self {
        Self {
            fq_name,
            package_len,
        }
    }

    pub fn new(package: &str, relative_name: &str) -> Self {
        if package.is_empty() {
            return Self {
                fq_name: ArcStr::from(relative_name),
                package_len: 0,
            };
        }

        Self {
            fq_name: arcstr::format!("{package}.{relative_name}"),
            package_len: package.len(),
        }
    }

    /// Split a dotted name at its last segment. Nested classes need [ClassId::new].
    pub fn top_level(fq_name: &str) -> Self {
        match fq_name.rsplit_once('.') {
            Some((package, name)) => Self::new(package, name),
            None => Self::new("", fq_name),
        }
    }

    pub fn fq_name(&self) -> &str {
        self.fq_name.as_str()
    }

    pub fn package(&self) -> &str {
        &self.fq_name[..self.package_len]
    }

    pub fn relative_name(&self) -> &str {
        match self.package_len {
            0 => &self.fq_name,
            len => &self.fq_name[len + 1..],
        }
    }

    pub fn short_name(&self) -> &str {
        let relative = self.relative_name();
        relative
            .rsplit_once('.')
            .map(|(_, short)| short)
            .unwrap_or(relative)
    }
}

impl Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fq_name)
    }
}

impl Debug for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ClassId({})", self.fq_name)
    }
}
