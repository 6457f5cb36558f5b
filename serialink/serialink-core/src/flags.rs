use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Shape of a class-like declaration, as far as serializer resolution cares.
    #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default, Serialize, Deserialize, Debug)]
    pub struct ClassFlags: u8 {
        const INTERFACE  = 0b00000001;
        const ENUM_CLASS = 0b00000010;
        /// A singleton `object` declaration
        const OBJECT     = 0b00000100;
        /// Sealed modality: all subclasses are known at compile time
        const SEALED     = 0b00001000;
        const ANNOTATION = 0b00010000;
    }
}

impl ClassFlags {
    pub fn is_sealed_interface(self) -> bool {
        self.contains(Self::INTERFACE | Self::SEALED)
    }
}
