//! Runtime domain meta-model: values, classes, and solution metadata.
//!
//! Planning domains are not known at compile time, so they are described
//! at runtime: a [`DomainModel`] registers classes (with inheritance,
//! per-field declared types and planning flags), enum types and
//! comparators; solution graphs are built from [`Value`]s over that
//! model; a [`SolutionDescriptor`] layers on the solution-specific
//! metadata (root class, entity classes, entity properties) that the
//! clone engine consumes.

mod descriptor;
mod model;
mod types;
mod value;

pub use descriptor::{PropertyAccessor, SolutionDescriptor};
pub use model::{ClassDef, ComparatorFn, DomainModel, EnumDef, FieldDef, FieldInfo};
pub use types::{ClassId, ComparatorId, DeclaredType, EnumId};
pub use value::{
    ArrayData, ArrayRef, CollectionData, CollectionKind, CollectionRef, EnumConst, MapData,
    MapKind, MapRef, ObjRef, ObjectData, Value,
};
