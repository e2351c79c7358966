//! Solution descriptor.
//!
//! The [`SolutionDescriptor`] is the metadata the clone engine consumes:
//! which class is the solution root, which classes are entities, which
//! root properties hold entities or entity collections, what counts as
//! immutable, and an approximate entity count used as a sizing hint.

use super::model::DomainModel;
use super::types::{ClassId, DeclaredType};
use super::value::{ObjRef, Value};
use crate::cloner::CloneError;
use std::sync::Arc;

/// A property on the solution root, read through its backing field.
///
/// The property name is how the domain layer refers to the property;
/// the backing field is what actually stores it. The two usually match,
/// but a domain with non-standard accessor naming may back a property
/// by a differently named field — the clone engine's field-based
/// discovery then misses it, which the post-clone validation reports.
#[derive(Debug, Clone)]
pub struct PropertyAccessor {
    /// Property name.
    pub name: String,
    /// Name of the field storing the property.
    pub field: String,
}

impl PropertyAccessor {
    /// A property backed by the field of the same name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let field = name.clone();
        Self { name, field }
    }

    /// A property backed by a differently named field.
    pub fn backed_by(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
        }
    }

    /// Reads the property from an instance.
    pub fn get(&self, model: &DomainModel, obj: &ObjRef) -> Result<Value, CloneError> {
        model.get_field(obj, &self.field)
    }
}

/// Metadata describing the solution root of a planning domain.
///
/// # Examples
///
/// ```
/// use u_planner::domain::{
///     ClassDef, DeclaredType, DomainModel, FieldDef, PropertyAccessor, SolutionDescriptor,
/// };
/// use std::sync::Arc;
///
/// let mut model = DomainModel::new();
/// let entity = model.add_class(ClassDef::new("Shift"));
/// let solution = model.add_class(
///     ClassDef::new("Roster").with_field(FieldDef::new(
///         "shift_list",
///         DeclaredType::list(DeclaredType::object(entity)),
///     )),
/// );
///
/// let mut descriptor = SolutionDescriptor::new(Arc::new(model), solution);
/// descriptor.add_entity_class(entity);
/// descriptor.add_entity_collection_property(PropertyAccessor::new("shift_list"));
/// assert!(descriptor.validate().is_ok());
/// ```
#[derive(Debug)]
pub struct SolutionDescriptor {
    model: Arc<DomainModel>,
    solution_class: ClassId,
    entity_classes: Vec<ClassId>,
    entity_properties: Vec<PropertyAccessor>,
    entity_collection_properties: Vec<PropertyAccessor>,
}

impl SolutionDescriptor {
    /// Creates a descriptor for the given solution class.
    pub fn new(model: Arc<DomainModel>, solution_class: ClassId) -> Self {
        Self {
            model,
            solution_class,
            entity_classes: Vec::new(),
            entity_properties: Vec::new(),
            entity_collection_properties: Vec::new(),
        }
    }

    /// Registers a planning entity class.
    pub fn add_entity_class(&mut self, class: ClassId) {
        self.entity_classes.push(class);
    }

    /// Registers an entity-valued property on the solution root.
    pub fn add_entity_property(&mut self, accessor: PropertyAccessor) {
        self.entity_properties.push(accessor);
    }

    /// Registers an entity-collection-valued property on the solution
    /// root.
    pub fn add_entity_collection_property(&mut self, accessor: PropertyAccessor) {
        self.entity_collection_properties.push(accessor);
    }

    /// The domain model this descriptor refers to.
    pub fn model(&self) -> &Arc<DomainModel> {
        &self.model
    }

    /// The solution root class.
    pub fn solution_class(&self) -> ClassId {
        self.solution_class
    }

    /// Whether the class is the solution class or a subclass of it.
    pub fn is_solution_class(&self, class: ClassId) -> bool {
        self.model.is_subclass_of(class, self.solution_class)
    }

    /// Whether the class is a registered entity class or a subclass of
    /// one.
    pub fn is_entity_class(&self, class: ClassId) -> bool {
        self.entity_classes
            .iter()
            .any(|&e| self.model.is_subclass_of(class, e))
    }

    /// Whether the class is explicitly marked always-deep-clone.
    pub fn is_deep_clone_class(&self, class: ClassId) -> bool {
        self.model.is_deep_clone_class(class)
    }

    /// Whether a field name matches a registered entity property.
    pub fn has_entity_property(&self, field_name: &str) -> bool {
        self.entity_properties.iter().any(|p| p.name == field_name)
    }

    /// Whether a field name matches a registered entity-collection
    /// property.
    pub fn has_entity_collection_property(&self, field_name: &str) -> bool {
        self.entity_collection_properties
            .iter()
            .any(|p| p.name == field_name)
    }

    /// The registered entity properties, for post-clone validation.
    pub fn entity_properties(&self) -> &[PropertyAccessor] {
        &self.entity_properties
    }

    /// The registered entity-collection properties.
    pub fn entity_collection_properties(&self) -> &[PropertyAccessor] {
        &self.entity_collection_properties
    }

    /// Whether values of a declared type are immutable and may be
    /// shared between an original and its planning clone.
    pub fn is_immutable(&self, declared: &DeclaredType) -> bool {
        match declared {
            DeclaredType::Bool
            | DeclaredType::Int
            | DeclaredType::Float
            | DeclaredType::Char
            | DeclaredType::Text
            | DeclaredType::Enum(_) => true,
            DeclaredType::Object(class) => self.model.class(*class).immutable,
            _ => false,
        }
    }

    /// Approximate number of entities in a solution instance, counted
    /// through the registered properties. Used as a sizing hint only.
    pub fn entity_count(&self, solution: &ObjRef) -> Result<usize, CloneError> {
        let mut count = 0;
        for accessor in &self.entity_properties {
            if let Value::Object(_) = accessor.get(&self.model, solution)? {
                count += 1;
            }
        }
        for accessor in &self.entity_collection_properties {
            count += match accessor.get(&self.model, solution)? {
                Value::Collection(c) => c.read().items.len(),
                Value::Map(m) => m.read().entries.len(),
                Value::Array(a) => a.read().items.len(),
                _ => 0,
            };
        }
        Ok(count)
    }

    /// Validates the descriptor against its model.
    pub fn validate(&self) -> Result<(), String> {
        if (self.solution_class.0 as usize) >= self.model.class_count() {
            return Err("solution class is not registered in the model".into());
        }
        for &entity in &self.entity_classes {
            if (entity.0 as usize) >= self.model.class_count() {
                return Err("entity class is not registered in the model".into());
            }
        }
        for accessor in self
            .entity_properties
            .iter()
            .chain(&self.entity_collection_properties)
        {
            let found = self
                .model
                .layout(self.solution_class)
                .iter()
                .any(|f| f.name == accessor.field);
            if !found {
                return Err(format!(
                    "property {} is backed by unknown field {} on {}",
                    accessor.name,
                    accessor.field,
                    self.model.class_name(self.solution_class)
                ));
            }
        }
        Ok(())
    }
}
