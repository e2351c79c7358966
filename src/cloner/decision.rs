//! Clone-decision oracle.
//!
//! Answers "must this field's current value be deep-cloned?" from the
//! domain metadata alone. Decisions are pure and deterministic for a
//! fixed descriptor, so they are memoized per (owning class, slot) and
//! per runtime value class; both caches live for the life of the cloner
//! and are shared by concurrent clone calls. Racing writes compute the
//! same value, so no coordination beyond the map itself is needed.

use crate::domain::{ClassId, DeclaredType, FieldInfo, SolutionDescriptor, Value};
use dashmap::DashMap;
use std::sync::Arc;

/// Decides deep versus shallow for fields and for container elements.
#[derive(Debug)]
pub struct CloneDecisionOracle {
    descriptor: Arc<SolutionDescriptor>,
    field_cache: DashMap<(ClassId, usize), bool>,
    class_cache: DashMap<ClassId, bool>,
}

impl CloneDecisionOracle {
    /// Creates an oracle over the given descriptor.
    pub fn new(descriptor: Arc<SolutionDescriptor>) -> Self {
        Self {
            descriptor,
            field_cache: DashMap::new(),
            class_cache: DashMap::new(),
        }
    }

    /// Whether the value currently assigned to a field must be
    /// deep-cloned.
    ///
    /// `owner` is the runtime class of the instance holding the field,
    /// which may be a subclass of `field.declaring`. The declared type
    /// decides most fields; the runtime class of the value catches
    /// entity instances behind a broad declared type.
    pub fn deep_clone_field(&self, owner: ClassId, field: &FieldInfo, value: &Value) -> bool {
        let by_field = match self.field_cache.get(&(owner, field.slot)) {
            Some(decision) => *decision,
            None => {
                let decision = self.field_decision(field);
                self.field_cache.insert((owner, field.slot), decision);
                decision
            }
        };
        if by_field {
            return true;
        }
        match value {
            Value::Object(obj) => {
                let class = obj.read().class;
                self.deep_clone_class(class)
            }
            _ => false,
        }
    }

    /// Whether instances of a runtime class must be deep-cloned.
    ///
    /// This is the decision used for collection, map and array elements,
    /// where only the element's runtime class is known.
    pub fn deep_clone_class(&self, class: ClassId) -> bool {
        match self.class_cache.get(&class) {
            Some(decision) => *decision,
            None => {
                let decision = self.class_deep(class);
                self.class_cache.insert(class, decision);
                decision
            }
        }
    }

    fn field_decision(&self, field: &FieldInfo) -> bool {
        // Enum constants are immutable singletons; an enum-declared
        // field is never deep-cloned, whatever else is marked on it.
        if matches!(field.declared, DeclaredType::Enum(_)) {
            return false;
        }
        if self.is_entity_property_on_solution(field) {
            return true;
        }
        // List variables hold planning state by definition.
        if field.list_variable {
            return true;
        }
        if field.deep_clone {
            return true;
        }
        self.declared_deep(&field.declared)
    }

    /// A field on the solution root (or a subclass of it) whose name
    /// matches a registered entity or entity-collection property. If the
    /// property's accessor is actually backed by a differently named
    /// field, this misses and the post-clone validation fails fast.
    fn is_entity_property_on_solution(&self, field: &FieldInfo) -> bool {
        self.descriptor.is_solution_class(field.declaring)
            && (self.descriptor.has_entity_property(&field.name)
                || self.descriptor.has_entity_collection_property(&field.name))
    }

    fn declared_deep(&self, declared: &DeclaredType) -> bool {
        match declared {
            DeclaredType::Object(class) => self.class_deep(*class),
            DeclaredType::List(element)
            | DeclaredType::Set(element)
            | DeclaredType::Collection(element)
            | DeclaredType::Array(element) => self.declared_deep(element),
            DeclaredType::Map(key, value) => {
                self.declared_deep(key) || self.declared_deep(value)
            }
            _ => false,
        }
    }

    fn class_deep(&self, class: ClassId) -> bool {
        self.descriptor.is_entity_class(class)
            || self.descriptor.is_solution_class(class)
            || self.descriptor.is_deep_clone_class(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClassDef, DomainModel, EnumId, FieldDef, PropertyAccessor};

    struct Fixture {
        oracle: CloneDecisionOracle,
        entity: ClassId,
        fact: ClassId,
        marked_fact: ClassId,
        solution: ClassId,
    }

    fn fixture() -> Fixture {
        let mut model = DomainModel::new();
        let entity = model.add_class(ClassDef::new("Shift"));
        let fact = model.add_class(ClassDef::new("Room").as_immutable());
        let marked_fact = model.add_class(ClassDef::new("Schedule").as_deep_clone());
        let solution = model.add_class(
            ClassDef::new("Roster").with_field(FieldDef::new(
                "shift_list",
                DeclaredType::list(DeclaredType::object(entity)),
            )),
        );
        let mut descriptor = SolutionDescriptor::new(Arc::new(model), solution);
        descriptor.add_entity_class(entity);
        descriptor.add_entity_collection_property(PropertyAccessor::new("shift_list"));
        Fixture {
            oracle: CloneDecisionOracle::new(Arc::new(descriptor)),
            entity,
            fact,
            marked_fact,
            solution,
        }
    }

    fn field(declaring: ClassId, name: &str, slot: usize, declared: DeclaredType) -> FieldInfo {
        // slots must be unique per owning class: the oracle memoizes
        // per (owner, slot)
        FieldInfo {
            declaring,
            name: name.to_string(),
            slot,
            declared,
            list_variable: false,
            deep_clone: false,
        }
    }

    #[test]
    fn test_enum_declared_field_is_never_deep() {
        let f = fixture();
        let mut info = field(f.entity, "kind", 0, DeclaredType::Enum(EnumId(0)));
        info.list_variable = true;
        info.deep_clone = true;
        assert!(!f.oracle.deep_clone_field(f.entity, &info, &Value::Null));
    }

    #[test]
    fn test_entity_property_on_solution_is_deep() {
        let f = fixture();
        // declared as Any: only the property-name match can catch it
        let info = field(f.solution, "shift_list", 1, DeclaredType::Any);
        assert!(f.oracle.deep_clone_field(f.solution, &info, &Value::Null));
    }

    #[test]
    fn test_same_name_off_solution_is_not_a_property_match() {
        let f = fixture();
        let info = field(f.entity, "shift_list", 1, DeclaredType::Any);
        assert!(!f.oracle.deep_clone_field(f.entity, &info, &Value::Null));
    }

    #[test]
    fn test_declared_entity_type_is_deep() {
        let f = fixture();
        let info = field(f.entity, "next", 2, DeclaredType::object(f.entity));
        assert!(f.oracle.deep_clone_field(f.entity, &info, &Value::Null));
    }

    #[test]
    fn test_declared_solution_type_is_deep() {
        let f = fixture();
        let info = field(f.entity, "owner", 3, DeclaredType::object(f.solution));
        assert!(f.oracle.deep_clone_field(f.entity, &info, &Value::Null));
    }

    #[test]
    fn test_generic_type_argument_makes_container_deep() {
        let f = fixture();
        let info = field(
            f.entity,
            "backups",
            4,
            DeclaredType::map(
                DeclaredType::Text,
                DeclaredType::list(DeclaredType::object(f.entity)),
            ),
        );
        assert!(f.oracle.deep_clone_field(f.entity, &info, &Value::Null));

        let info = field(
            f.entity,
            "rooms",
            5,
            DeclaredType::list(DeclaredType::object(f.fact)),
        );
        assert!(!f.oracle.deep_clone_field(f.entity, &info, &Value::Null));
    }

    #[test]
    fn test_marked_class_is_deep() {
        let f = fixture();
        let info = field(f.entity, "schedule", 6, DeclaredType::object(f.marked_fact));
        assert!(f.oracle.deep_clone_field(f.entity, &info, &Value::Null));
    }

    #[test]
    fn test_list_variable_is_always_deep() {
        let f = fixture();
        let mut info = field(f.entity, "route", 7, DeclaredType::list(DeclaredType::Text));
        info.list_variable = true;
        assert!(f.oracle.deep_clone_field(f.entity, &info, &Value::Null));
    }

    #[test]
    fn test_field_deep_clone_mark_is_deep() {
        let f = fixture();
        let mut info = field(f.entity, "notes", 8, DeclaredType::list(DeclaredType::Text));
        info.deep_clone = true;
        assert!(f.oracle.deep_clone_field(f.entity, &info, &Value::Null));
    }

    #[test]
    fn test_runtime_class_overrides_broad_declared_type() {
        let f = fixture();
        let descriptor = f.oracle.descriptor.clone();
        let info = field(f.entity, "anything", 9, DeclaredType::Any);

        let entity_value = Value::Object(descriptor.model().instantiate(f.entity));
        assert!(f.oracle.deep_clone_field(f.entity, &info, &entity_value));

        let fact_value = Value::Object(descriptor.model().instantiate(f.fact));
        assert!(!f.oracle.deep_clone_field(f.entity, &info, &fact_value));

        assert!(!f.oracle.deep_clone_field(f.entity, &info, &Value::Int(1)));
    }

    #[test]
    fn test_standalone_class_decision() {
        let f = fixture();
        assert!(f.oracle.deep_clone_class(f.entity));
        assert!(f.oracle.deep_clone_class(f.solution));
        assert!(f.oracle.deep_clone_class(f.marked_fact));
        assert!(!f.oracle.deep_clone_class(f.fact));
        // memoized answers stay stable
        assert!(f.oracle.deep_clone_class(f.entity));
        assert!(!f.oracle.deep_clone_class(f.fact));
    }
}
