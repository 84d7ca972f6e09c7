//! First-class identity types for declared entities.
//!
//! These types provide type-safe identifiers for enumerations, record nodes,
//! operations and fields, so an enum index can never be mistaken for a node.

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name(u32);

        impl $name {
            pub fn new(index: u32) -> Self {
                Self(index)
            }

            pub fn index(self) -> u32 {
                self.0
            }
        }
    };
}

define_entity_id! {
    /// Identity for an enumeration
    pub struct EnumId;
}

define_entity_id! {
    /// Identity for a record type in the type graph
    pub struct NodeId;
}

define_entity_id! {
    /// Identity for an operation (always has a defining record)
    pub struct OperationId;
}

define_entity_id! {
    /// Identity for a field (always has a defining record)
    pub struct FieldId;
}
