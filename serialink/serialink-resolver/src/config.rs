use arcstr::ArcStr;
use serde::{Deserialize, Serialize};

/// Where the serialization runtime keeps its serializer classes.
///
/// Builtin serializer names are resolved against these packages, the internal one first.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct ResolverConfig {
    pub runtime_package: ArcStr,
    pub internal_package: ArcStr,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            runtime_package: arcstr::literal!("serial"),
            internal_package: arcstr::literal!("serial.internal"),
        }
    }
}
