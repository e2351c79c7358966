//! Domain model registry.
//!
//! A [`DomainModel`] describes a planning domain at runtime: its classes
//! (with single inheritance and per-field metadata), enum types, and the
//! comparators used by sorted containers. The registry is built once by
//! the domain layer and then treated as an immutable metadata snapshot
//! by the solver and the clone engine.

use super::types::{ClassId, ComparatorId, DeclaredType, EnumId};
use super::value::{
    ArrayData, ArrayRef, CollectionData, CollectionKind, CollectionRef, MapData, MapKind, MapRef,
    ObjRef, ObjectData, Value,
};
use crate::cloner::CloneError;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Ordering function backing a sorted collection or map.
pub type ComparatorFn = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// Definition of one field on a class.
///
/// # Examples
///
/// ```
/// use u_planner::domain::{DeclaredType, FieldDef};
///
/// let f = FieldDef::new("priority", DeclaredType::Int);
/// let v = FieldDef::new("task_list", DeclaredType::list(DeclaredType::Any)).as_list_variable();
/// assert!(v.list_variable);
/// ```
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name, unique within its declaring class.
    pub name: String,
    /// Declared (static) type of the field slot.
    pub declared: DeclaredType,
    /// Whether this field is a list-style decision variable.
    /// List variables hold planning state and are always deep-cloned.
    pub list_variable: bool,
    /// Whether the field or its accessor is explicitly marked as
    /// always-deep-clone.
    pub deep_clone: bool,
}

impl FieldDef {
    /// Creates a field definition.
    pub fn new(name: impl Into<String>, declared: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared,
            list_variable: false,
            deep_clone: false,
        }
    }

    /// Marks the field as a list-style decision variable.
    pub fn as_list_variable(mut self) -> Self {
        self.list_variable = true;
        self
    }

    /// Marks the field (or its accessor) as always-deep-clone.
    pub fn as_deep_clone(mut self) -> Self {
        self.deep_clone = true;
        self
    }
}

/// Definition of a class in the domain model.
#[derive(Debug, Clone)]
pub struct ClassDef {
    /// Class name, unique within the model.
    pub name: String,
    /// Direct superclass, if any.
    pub superclass: Option<ClassId>,
    /// Fields declared on this class itself (not inherited).
    pub fields: Vec<FieldDef>,
    /// Whether instances are immutable. Immutable classes are shared
    /// between an original and its planning clone.
    pub immutable: bool,
    /// Whether the class is explicitly marked as always-deep-clone.
    pub deep_clone: bool,
    /// Whether instances can be constructed with no arguments. Classes
    /// without a no-arg construction path cannot be deep-cloned.
    pub constructible: bool,
}

impl ClassDef {
    /// Creates a class definition with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            fields: Vec::new(),
            immutable: false,
            deep_clone: false,
            constructible: true,
        }
    }

    /// Sets the direct superclass.
    pub fn extends(mut self, superclass: ClassId) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Declares a field on this class.
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Marks instances as immutable (shareable between clones).
    pub fn as_immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    /// Marks the class as always-deep-clone.
    pub fn as_deep_clone(mut self) -> Self {
        self.deep_clone = true;
        self
    }

    /// Declares that the class has no no-arg construction path.
    pub fn without_constructor(mut self) -> Self {
        self.constructible = false;
        self
    }
}

/// Definition of an enum type.
#[derive(Debug, Clone)]
pub struct EnumDef {
    /// Enum type name, unique within the model.
    pub name: String,
    /// Variant names in ordinal order.
    pub variants: Vec<String>,
}

impl EnumDef {
    /// Creates an enum definition.
    pub fn new(name: impl Into<String>, variants: &[&str]) -> Self {
        Self {
            name: name.into(),
            variants: variants.iter().map(|v| (*v).to_string()).collect(),
        }
    }
}

/// One entry of a class's flattened field layout: the field descriptor
/// the clone engine works with.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    /// Class that declares the field (may be a superclass of the
    /// runtime class whose layout this entry belongs to).
    pub declaring: ClassId,
    /// Field name.
    pub name: String,
    /// Flat slot index in instances of the owning class.
    pub slot: usize,
    /// Declared type.
    pub declared: DeclaredType,
    /// List-style decision variable flag.
    pub list_variable: bool,
    /// Always-deep-clone flag on the field or its accessor.
    pub deep_clone: bool,
}

struct ClassEntry {
    def: ClassDef,
    layout: Arc<Vec<FieldInfo>>,
    defined: bool,
}

/// The runtime registry of classes, enums and comparators.
///
/// # Examples
///
/// ```
/// use u_planner::domain::{ClassDef, DeclaredType, DomainModel, FieldDef, Value};
///
/// let mut model = DomainModel::new();
/// let task = model.add_class(
///     ClassDef::new("Task").with_field(FieldDef::new("priority", DeclaredType::Int)),
/// );
/// let obj = model.instantiate(task);
/// model.set_field(&obj, "priority", Value::Int(3)).unwrap();
/// assert_eq!(model.get_field(&obj, "priority").unwrap(), Value::Int(3));
/// ```
pub struct DomainModel {
    classes: Vec<ClassEntry>,
    class_names: HashMap<String, ClassId>,
    enums: Vec<EnumDef>,
    enum_names: HashMap<String, EnumId>,
    comparators: Vec<(String, ComparatorFn)>,
}

impl Default for DomainModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
            class_names: HashMap::new(),
            enums: Vec::new(),
            enum_names: HashMap::new(),
            comparators: Vec::new(),
        }
    }

    /// Registers a class and returns its id.
    ///
    /// The superclass, if any, must already be defined; the flattened
    /// field layout (inherited fields first) is computed here. For
    /// mutually referencing classes, reserve ids up front with
    /// [`declare_class`](Self::declare_class) and fill them in with
    /// [`define_class`](Self::define_class).
    pub fn add_class(&mut self, def: ClassDef) -> ClassId {
        let id = self.declare_class(def.name.clone());
        self.define_class(id, def);
        id
    }

    /// Reserves an id for a class whose definition follows later, so
    /// that other definitions can reference it.
    pub fn declare_class(&mut self, name: impl Into<String>) -> ClassId {
        let name = name.into();
        assert!(
            !self.class_names.contains_key(&name),
            "duplicate class name: {name}"
        );
        let id = ClassId(self.classes.len() as u32);
        self.class_names.insert(name.clone(), id);
        self.classes.push(ClassEntry {
            def: ClassDef::new(name),
            layout: Arc::new(Vec::new()),
            defined: false,
        });
        id
    }

    /// Fills in a class declared with [`declare_class`](Self::declare_class).
    pub fn define_class(&mut self, id: ClassId, def: ClassDef) {
        let entry = &self.classes[id.0 as usize];
        assert!(!entry.defined, "class {} is already defined", entry.def.name);
        assert!(
            entry.def.name == def.name,
            "definition name {} does not match declared name {}",
            def.name,
            entry.def.name
        );
        let mut layout: Vec<FieldInfo> = match def.superclass {
            Some(sup) => {
                let parent = &self.classes[sup.0 as usize];
                assert!(
                    parent.defined,
                    "superclass of {} must be defined first",
                    def.name
                );
                parent.layout.as_ref().clone()
            }
            None => Vec::new(),
        };
        for field in &def.fields {
            let slot = layout.len();
            layout.push(FieldInfo {
                declaring: id,
                name: field.name.clone(),
                slot,
                declared: field.declared.clone(),
                list_variable: field.list_variable,
                deep_clone: field.deep_clone,
            });
        }
        self.classes[id.0 as usize] = ClassEntry {
            def,
            layout: Arc::new(layout),
            defined: true,
        };
    }

    /// Registers an enum type and returns its id.
    pub fn add_enum(&mut self, def: EnumDef) -> EnumId {
        assert!(
            !self.enum_names.contains_key(&def.name),
            "duplicate enum name: {}",
            def.name
        );
        let id = EnumId(self.enums.len() as u32);
        self.enum_names.insert(def.name.clone(), id);
        self.enums.push(def);
        id
    }

    /// Registers a comparator and returns its id.
    pub fn add_comparator(
        &mut self,
        name: impl Into<String>,
        compare: impl Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    ) -> ComparatorId {
        let id = ComparatorId(self.comparators.len() as u32);
        self.comparators.push((name.into(), Arc::new(compare)));
        id
    }

    /// The class definition for an id.
    pub fn class(&self, id: ClassId) -> &ClassDef {
        &self.classes[id.0 as usize].def
    }

    /// The class name for an id.
    pub fn class_name(&self, id: ClassId) -> &str {
        &self.classes[id.0 as usize].def.name
    }

    /// The flattened field layout of a class (inherited fields first).
    pub fn layout(&self, id: ClassId) -> &Arc<Vec<FieldInfo>> {
        &self.classes[id.0 as usize].layout
    }

    /// The enum definition for an id.
    pub fn enum_def(&self, id: EnumId) -> &EnumDef {
        &self.enums[id.0 as usize]
    }

    /// The comparator function for an id.
    pub fn comparator(&self, id: ComparatorId) -> &ComparatorFn {
        &self.comparators[id.0 as usize].1
    }

    /// Looks a class up by name.
    pub fn find_class(&self, name: &str) -> Option<ClassId> {
        self.class_names.get(name).copied()
    }

    /// Whether `sub` is `sup` or a (transitive) subclass of it.
    pub fn is_subclass_of(&self, sub: ClassId, sup: ClassId) -> bool {
        let mut current = Some(sub);
        while let Some(c) = current {
            if c == sup {
                return true;
            }
            current = self.classes[c.0 as usize].def.superclass;
        }
        false
    }

    /// Whether the class, or any of its superclasses, is marked
    /// always-deep-clone.
    pub fn is_deep_clone_class(&self, class: ClassId) -> bool {
        let mut current = Some(class);
        while let Some(c) = current {
            if self.classes[c.0 as usize].def.deep_clone {
                return true;
            }
            current = self.classes[c.0 as usize].def.superclass;
        }
        false
    }

    /// Number of registered classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Creates an instance of a class with default slot values
    /// (primitives zeroed, references null).
    pub fn instantiate(&self, class: ClassId) -> ObjRef {
        let slots = self
            .layout(class)
            .iter()
            .map(|f| Value::default_for(&f.declared))
            .collect();
        ObjRef::new(ObjectData { class, slots })
    }

    fn field_slot(&self, class: ClassId, name: &str) -> Option<usize> {
        // Subclass fields come last; a redeclared name resolves to the
        // most-derived declaration.
        self.layout(class)
            .iter()
            .rev()
            .find(|f| f.name == name)
            .map(|f| f.slot)
    }

    /// Reads a field by name from an object.
    pub fn get_field(&self, obj: &ObjRef, name: &str) -> Result<Value, CloneError> {
        let data = obj.read();
        match self.field_slot(data.class, name) {
            Some(slot) => Ok(data.slots[slot].clone()),
            None => Err(CloneError::AccessFailure {
                class: self.class_name(data.class).to_string(),
                field: name.to_string(),
                value: "n/a".to_string(),
            }),
        }
    }

    /// Writes a field by name on an object.
    pub fn set_field(&self, obj: &ObjRef, name: &str, value: Value) -> Result<(), CloneError> {
        let mut data = obj.write();
        match self.field_slot(data.class, name) {
            Some(slot) => {
                data.slots[slot] = value;
                Ok(())
            }
            None => Err(CloneError::AccessFailure {
                class: self.class_name(data.class).to_string(),
                field: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Creates a collection of the given kind, inserting `items` in
    /// order with the kind's semantics (set kinds deduplicate, sorted
    /// kinds keep comparator order).
    pub fn new_collection(&self, kind: CollectionKind, items: Vec<Value>) -> CollectionRef {
        let mut data = CollectionData {
            kind,
            items: Vec::with_capacity(items.len()),
        };
        for item in items {
            self.collection_insert(&mut data, item);
        }
        CollectionRef::new(data)
    }

    /// Creates a map of the given kind, inserting `entries` in order.
    pub fn new_map(&self, kind: MapKind, entries: Vec<(Value, Value)>) -> MapRef {
        let mut data = MapData {
            kind,
            entries: Vec::with_capacity(entries.len()),
        };
        for (key, value) in entries {
            self.map_insert(&mut data, key, value);
        }
        MapRef::new(data)
    }

    /// Creates an array with the given component type.
    pub fn new_array(&self, component: DeclaredType, items: Vec<Value>) -> ArrayRef {
        ArrayRef::new(ArrayData { component, items })
    }

    /// Inserts one element with the collection kind's semantics.
    pub(crate) fn collection_insert(&self, data: &mut CollectionData, value: Value) {
        match &data.kind {
            CollectionKind::ArrayList
            | CollectionKind::LinkedList
            | CollectionKind::Deque
            | CollectionKind::Custom(_) => data.items.push(value),
            CollectionKind::HashSet | CollectionKind::OrderedSet | CollectionKind::CustomSet(_) => {
                if !data.items.iter().any(|v| *v == value) {
                    data.items.push(value);
                }
            }
            CollectionKind::SortedSet(cmp) => {
                let compare = self.comparator(*cmp);
                let pos = data
                    .items
                    .partition_point(|v| compare(v, &value) == Ordering::Less);
                let duplicate = data
                    .items
                    .get(pos)
                    .is_some_and(|v| compare(v, &value) == Ordering::Equal);
                if !duplicate {
                    data.items.insert(pos, value);
                }
            }
        }
    }

    /// Inserts one entry with the map kind's semantics; an existing
    /// equal key has its value replaced.
    pub(crate) fn map_insert(&self, data: &mut MapData, key: Value, value: Value) {
        match &data.kind {
            MapKind::Hash | MapKind::Ordered | MapKind::Custom(_) => {
                match data.entries.iter_mut().find(|(k, _)| *k == key) {
                    Some(entry) => entry.1 = value,
                    None => data.entries.push((key, value)),
                }
            }
            MapKind::Sorted(cmp) => {
                let compare = self.comparator(*cmp);
                let pos = data
                    .entries
                    .partition_point(|(k, _)| compare(k, &key) == Ordering::Less);
                match data.entries.get_mut(pos) {
                    Some(entry) if compare(&entry.0, &key) == Ordering::Equal => entry.1 = value,
                    _ => data.entries.insert(pos, (key, value)),
                }
            }
        }
    }

    /// Human-readable label for a declared type.
    pub fn type_label(&self, declared: &DeclaredType) -> String {
        match declared {
            DeclaredType::Bool => "bool".into(),
            DeclaredType::Int => "int".into(),
            DeclaredType::Float => "float".into(),
            DeclaredType::Char => "char".into(),
            DeclaredType::Text => "text".into(),
            DeclaredType::Enum(id) => format!("enum {}", self.enum_def(*id).name),
            DeclaredType::Object(id) => self.class_name(*id).to_string(),
            DeclaredType::Any => "any".into(),
            DeclaredType::List(e) => format!("list<{}>", self.type_label(e)),
            DeclaredType::Set(e) => format!("set<{}>", self.type_label(e)),
            DeclaredType::Collection(e) => format!("collection<{}>", self.type_label(e)),
            DeclaredType::Map(k, v) => {
                format!("map<{}, {}>", self.type_label(k), self.type_label(v))
            }
            DeclaredType::Array(c) => format!("array<{}>", self.type_label(c)),
        }
    }

    /// Whether a value of type `actual` can be assigned where `declared`
    /// is expected. Classes follow the subclass relation; `Any` accepts
    /// everything.
    pub fn type_assignable(&self, actual: &DeclaredType, declared: &DeclaredType) -> bool {
        match (actual, declared) {
            (_, DeclaredType::Any) => true,
            (DeclaredType::Object(a), DeclaredType::Object(d)) => self.is_subclass_of(*a, *d),
            // arrays are covariant in their component type
            (DeclaredType::Array(a), DeclaredType::Array(d)) => self.type_assignable(a, d),
            (a, d) => a == d,
        }
    }

    /// Validates the registry for consistency.
    ///
    /// Checks that field names are unique per class and that every
    /// declared type references a registered class, enum or comparator.
    pub fn validate(&self) -> Result<(), String> {
        for entry in &self.classes {
            if !entry.defined {
                return Err(format!(
                    "class {} is declared but never defined",
                    entry.def.name
                ));
            }
            for (i, field) in entry.def.fields.iter().enumerate() {
                if entry.def.fields[..i].iter().any(|f| f.name == field.name) {
                    return Err(format!(
                        "class {} declares field {} twice",
                        entry.def.name, field.name
                    ));
                }
                self.check_declared(&entry.def.name, &field.name, &field.declared)?;
            }
        }
        Ok(())
    }

    fn check_declared(
        &self,
        class: &str,
        field: &str,
        declared: &DeclaredType,
    ) -> Result<(), String> {
        match declared {
            DeclaredType::Enum(id) => {
                if (id.0 as usize) >= self.enums.len() {
                    return Err(format!("field {class}.{field} references an unknown enum"));
                }
            }
            DeclaredType::Object(id) => {
                if (id.0 as usize) >= self.classes.len() {
                    return Err(format!("field {class}.{field} references an unknown class"));
                }
            }
            DeclaredType::List(e)
            | DeclaredType::Set(e)
            | DeclaredType::Collection(e)
            | DeclaredType::Array(e) => self.check_declared(class, field, e)?,
            DeclaredType::Map(k, v) => {
                self.check_declared(class, field, k)?;
                self.check_declared(class, field, v)?;
            }
            _ => {}
        }
        Ok(())
    }
}

impl fmt::Debug for DomainModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainModel")
            .field("classes", &self.classes.len())
            .field("enums", &self.enums.len())
            .field("comparators", &self.comparators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_flattening_with_inheritance() {
        let mut model = DomainModel::new();
        let base = model.add_class(
            ClassDef::new("Base").with_field(FieldDef::new("code", DeclaredType::Text)),
        );
        let derived = model.add_class(
            ClassDef::new("Derived")
                .extends(base)
                .with_field(FieldDef::new("extra", DeclaredType::Int)),
        );

        let layout = model.layout(derived);
        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0].name, "code");
        assert_eq!(layout[0].declaring, base);
        assert_eq!(layout[1].name, "extra");
        assert_eq!(layout[1].declaring, derived);
        assert_eq!(layout[1].slot, 1);
        assert!(model.is_subclass_of(derived, base));
        assert!(!model.is_subclass_of(base, derived));
    }

    #[test]
    fn test_forward_declared_classes() {
        let mut model = DomainModel::new();
        let visit = model.declare_class("Visit");
        let plan = model.declare_class("Plan");
        model.define_class(
            visit,
            ClassDef::new("Visit").with_field(FieldDef::new("plan", DeclaredType::object(plan))),
        );
        model.define_class(
            plan,
            ClassDef::new("Plan").with_field(FieldDef::new(
                "visit_list",
                DeclaredType::list(DeclaredType::object(visit)),
            )),
        );
        assert!(model.validate().is_ok());
        assert_eq!(model.layout(visit)[0].declared, DeclaredType::object(plan));
    }

    #[test]
    fn test_validate_undeclared_definition() {
        let mut model = DomainModel::new();
        let _ = model.declare_class("Ghost");
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_instantiate_defaults() {
        let mut model = DomainModel::new();
        let class = model.add_class(
            ClassDef::new("Thing")
                .with_field(FieldDef::new("flag", DeclaredType::Bool))
                .with_field(FieldDef::new("count", DeclaredType::Int))
                .with_field(FieldDef::new("label", DeclaredType::Text)),
        );
        let obj = model.instantiate(class);
        assert_eq!(model.get_field(&obj, "flag").unwrap(), Value::Bool(false));
        assert_eq!(model.get_field(&obj, "count").unwrap(), Value::Int(0));
        assert!(model.get_field(&obj, "label").unwrap().is_null());
    }

    #[test]
    fn test_get_set_unknown_field() {
        let mut model = DomainModel::new();
        let class = model.add_class(ClassDef::new("Empty"));
        let obj = model.instantiate(class);
        assert!(model.get_field(&obj, "missing").is_err());
        assert!(model.set_field(&obj, "missing", Value::Int(1)).is_err());
    }

    #[test]
    fn test_field_shadowing_resolves_most_derived() {
        let mut model = DomainModel::new();
        let base =
            model.add_class(ClassDef::new("B").with_field(FieldDef::new("x", DeclaredType::Int)));
        let derived = model.add_class(
            ClassDef::new("D")
                .extends(base)
                .with_field(FieldDef::new("x", DeclaredType::Text)),
        );
        let obj = model.instantiate(derived);
        model.set_field(&obj, "x", Value::from("shadowed")).unwrap();
        assert_eq!(model.get_field(&obj, "x").unwrap(), Value::from("shadowed"));
        // the base slot is untouched
        assert_eq!(obj.read().slots[0], Value::Int(0));
    }

    #[test]
    fn test_set_semantics() {
        let model = DomainModel::new();
        let set = model.new_collection(
            CollectionKind::OrderedSet,
            vec![Value::Int(2), Value::Int(1), Value::Int(2)],
        );
        assert_eq!(set.read().items, vec![Value::Int(2), Value::Int(1)]);
    }

    #[test]
    fn test_sorted_set_uses_comparator() {
        let mut model = DomainModel::new();
        let desc = model.add_comparator("desc_int", |a, b| match (a, b) {
            (Value::Int(x), Value::Int(y)) => y.cmp(x),
            _ => Ordering::Equal,
        });
        let set = model.new_collection(
            CollectionKind::SortedSet(desc),
            vec![Value::Int(1), Value::Int(3), Value::Int(2), Value::Int(3)],
        );
        assert_eq!(
            set.read().items,
            vec![Value::Int(3), Value::Int(2), Value::Int(1)]
        );
    }

    #[test]
    fn test_map_replaces_equal_key() {
        let model = DomainModel::new();
        let map = model.new_map(
            MapKind::Ordered,
            vec![
                (Value::from("a"), Value::Int(1)),
                (Value::from("b"), Value::Int(2)),
                (Value::from("a"), Value::Int(3)),
            ],
        );
        let data = map.read();
        assert_eq!(data.entries.len(), 2);
        assert_eq!(data.entries[0], (Value::from("a"), Value::Int(3)));
    }

    #[test]
    fn test_validate_unknown_class_reference() {
        let mut model = DomainModel::new();
        model.add_class(
            ClassDef::new("Broken")
                .with_field(FieldDef::new("bad", DeclaredType::Object(ClassId(99)))),
        );
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_duplicate_field() {
        let mut model = DomainModel::new();
        model.add_class(
            ClassDef::new("Dup")
                .with_field(FieldDef::new("x", DeclaredType::Int))
                .with_field(FieldDef::new("x", DeclaredType::Int)),
        );
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_type_assignable() {
        let mut model = DomainModel::new();
        let base = model.add_class(ClassDef::new("Base"));
        let derived = model.add_class(ClassDef::new("Derived").extends(base));

        let b = DeclaredType::Object(base);
        let d = DeclaredType::Object(derived);
        assert!(model.type_assignable(&d, &b));
        assert!(!model.type_assignable(&b, &d));
        assert!(model.type_assignable(&d, &DeclaredType::Any));
        assert!(model.type_assignable(&DeclaredType::Int, &DeclaredType::Int));
        assert!(!model.type_assignable(&DeclaredType::Int, &DeclaredType::Float));
    }

    #[test]
    fn test_deep_clone_class_inherited() {
        let mut model = DomainModel::new();
        let base = model.add_class(ClassDef::new("Marked").as_deep_clone());
        let derived = model.add_class(ClassDef::new("Child").extends(base));
        assert!(model.is_deep_clone_class(base));
        assert!(model.is_deep_clone_class(derived));
    }
}
