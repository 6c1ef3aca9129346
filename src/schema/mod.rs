//! Schema: field descriptors, conditions, and the ordered field list.

pub mod condition;
pub mod definition;
pub mod field;

pub use condition::Condition;
pub use definition::Schema;
pub use field::{ChoiceOption, FieldDescriptor, FieldKind, RenderFn};
