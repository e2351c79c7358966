//! Clone orchestrator.
//!
//! [`PlanningCloner`] builds the root clone, then drains a FIFO work
//! queue of deferred fields, reconstructing containers kind for kind
//! and resolving plain objects through an identity map. The identity
//! map is populated *before* a fresh clone's fields are copied, which
//! is what makes self-references and cycles terminate; the work queue
//! bounds stack usage independent of graph depth.

use super::decision::CloneDecisionOracle;
use super::error::CloneError;
use super::strategy::{ClonePlan, Unresolved};
use super::SolutionCloner;
use crate::domain::{
    ArrayData, ArrayRef, ClassId, CollectionData, CollectionKind, CollectionRef, DeclaredType,
    FieldInfo, MapData, MapKind, MapRef, ObjRef, ObjectData, SolutionDescriptor, Value,
};
use dashmap::DashMap;
use log::debug;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::sync::Arc;

/// The default [`SolutionCloner`]: copies solution graphs through
/// precomputed per-class field plans.
///
/// One instance serves a whole solver run, including parallel workers:
/// per-call state lives on the stack of each `clone_solution` call,
/// while the four memoization caches (constructor templates, field
/// plans, and the oracle's two decision caches) are shared and safe to
/// populate concurrently.
#[derive(Debug)]
pub struct PlanningCloner {
    descriptor: Arc<SolutionDescriptor>,
    oracle: CloneDecisionOracle,
    constructors: DashMap<ClassId, Arc<Vec<Value>>>,
    plans: DashMap<ClassId, Arc<ClonePlan>>,
}

impl PlanningCloner {
    /// Creates a cloner for the described solution type.
    pub fn new(descriptor: Arc<SolutionDescriptor>) -> Self {
        Self {
            oracle: CloneDecisionOracle::new(descriptor.clone()),
            descriptor,
            constructors: DashMap::new(),
            plans: DashMap::new(),
        }
    }

    /// The descriptor this cloner was built for.
    pub fn descriptor(&self) -> &Arc<SolutionDescriptor> {
        &self.descriptor
    }

    /// The clone-decision oracle, usable standalone for element-level
    /// decisions.
    pub fn oracle(&self) -> &CloneDecisionOracle {
        &self.oracle
    }

    fn plan(&self, class: ClassId) -> Arc<ClonePlan> {
        if let Some(plan) = self.plans.get(&class) {
            return Arc::clone(plan.value());
        }
        let plan = Arc::new(ClonePlan::build(&self.descriptor, class));
        self.plans.insert(class, Arc::clone(&plan));
        plan
    }

    /// Constructs a bare instance of a class from its cached slot
    /// template (primitives zeroed, references null).
    fn bare_instance(&self, class: ClassId) -> Result<ObjRef, CloneError> {
        if let Some(template) = self.constructors.get(&class) {
            let slots = template.value().as_ref().clone();
            return Ok(ObjRef::new(ObjectData { class, slots }));
        }
        let model = self.descriptor.model();
        if !model.class(class).constructible {
            return Err(CloneError::MissingDefaultConstructor {
                class: model.class_name(class).to_string(),
            });
        }
        let template: Arc<Vec<Value>> = Arc::new(
            model
                .layout(class)
                .iter()
                .map(|field| Value::default_for(&field.declared))
                .collect(),
        );
        self.constructors.insert(class, Arc::clone(&template));
        let slots = template.as_ref().clone();
        Ok(ObjRef::new(ObjectData { class, slots }))
    }

    /// Fails fast when an entity-valued root property still aliases the
    /// original: the property's backing field was not recognized during
    /// cloning, typically because of non-standard accessor naming.
    fn validate(&self, original: &ObjRef, clone: &ObjRef) -> Result<(), CloneError> {
        let model = self.descriptor.model();
        let accessors = self
            .descriptor
            .entity_properties()
            .iter()
            .chain(self.descriptor.entity_collection_properties());
        for accessor in accessors {
            let original_value = accessor.get(model, original)?;
            if original_value.is_null() {
                continue;
            }
            let clone_value = accessor.get(model, clone)?;
            if Value::same_ref(&original_value, &clone_value) {
                return Err(CloneError::PostconditionViolation {
                    property: accessor.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl SolutionCloner for PlanningCloner {
    fn clone_solution(&self, original: &ObjRef) -> Result<ObjRef, CloneError> {
        let hint = self.descriptor.entity_count(original)?;
        let mut run = CloneRun {
            cloner: self,
            identity: FxHashMap::with_capacity_and_hasher(hint + 1, Default::default()),
            queue: VecDeque::with_capacity(hint + 1),
        };
        let clone = run.clone_object(original)?;
        run.drain()?;
        self.validate(original, &clone)?;
        Ok(clone)
    }
}

/// Per-call state of one `clone_solution` invocation. Never shared:
/// concurrent clones each drive their own run.
struct CloneRun<'a> {
    cloner: &'a PlanningCloner,
    /// original address → clone; at most one clone per distinct
    /// original for the lifetime of the run
    identity: FxHashMap<usize, ObjRef>,
    queue: VecDeque<Unresolved>,
}

impl CloneRun<'_> {
    fn clone_object(&mut self, original: &ObjRef) -> Result<ObjRef, CloneError> {
        if let Some(existing) = self.identity.get(&original.identity()) {
            return Ok(existing.clone());
        }
        let data = original.read();
        let clone = self.cloner.bare_instance(data.class)?;
        // register before copying any field, so that back-references
        // and self-cycles resolve to this clone instead of recursing
        self.identity.insert(original.identity(), clone.clone());
        let plan = self.cloner.plan(data.class);
        let model = Arc::clone(self.cloner.descriptor.model());
        {
            let mut clone_data = clone.write();
            for (slot, strategy) in plan.strategies.iter().enumerate() {
                let deferred = strategy.apply(
                    &model,
                    &self.cloner.oracle,
                    &plan,
                    slot,
                    &data,
                    &clone,
                    &mut clone_data,
                )?;
                if let Some(item) = deferred {
                    self.queue.push_back(item);
                }
            }
        }
        Ok(clone)
    }

    fn drain(&mut self) -> Result<(), CloneError> {
        while let Some(item) = self.queue.pop_front() {
            let resolved = self.resolve(&item)?;
            item.owner.write().slots[item.slot] = resolved;
        }
        Ok(())
    }

    fn resolve(&mut self, item: &Unresolved) -> Result<Value, CloneError> {
        let field = &item.plan.layout[item.slot];
        match &item.original {
            Value::Collection(original) => self.clone_collection(original, Some(field)),
            Value::Map(original) => self.clone_map(original, Some(field)),
            Value::Array(original) => self.clone_array(original, Some(field)),
            Value::Object(original) => Ok(Value::Object(self.clone_object(original)?)),
            // a deferred immutable value; nothing to copy
            other => Ok(other.clone()),
        }
    }

    /// Resolves one container element. Nested containers are cloned
    /// inline, immediately: they have no owning field of their own to
    /// defer through. Objects are cloned iff their runtime class is
    /// deep-cloned, else shared.
    fn resolve_element(&mut self, element: &Value) -> Result<Value, CloneError> {
        match element {
            Value::Collection(original) => self.clone_collection(original, None),
            Value::Map(original) => self.clone_map(original, None),
            Value::Array(original) => self.clone_array(original, None),
            Value::Object(original) => {
                let class = original.read().class;
                if self.cloner.oracle.deep_clone_class(class) {
                    Ok(Value::Object(self.clone_object(original)?))
                } else {
                    Ok(element.clone())
                }
            }
            other => Ok(other.clone()),
        }
    }

    fn clone_collection(
        &mut self,
        original: &CollectionRef,
        field: Option<&FieldInfo>,
    ) -> Result<Value, CloneError> {
        let data = original.read();
        let kind = match &data.kind {
            CollectionKind::CustomSet(name) => {
                debug!("unrecognized set kind custom-set({name}); rebuilding as an ordered-set");
                CollectionKind::OrderedSet
            }
            CollectionKind::Custom(name) => {
                debug!("unrecognized collection kind custom({name}); rebuilding as an array-list");
                CollectionKind::ArrayList
            }
            kind => kind.clone(),
        };
        if let Some(field) = field {
            if !collection_assignable(&kind, &field.declared) {
                return Err(self.mismatch(field, kind.label()));
            }
        }
        let model = Arc::clone(self.cloner.descriptor.model());
        let mut clone = CollectionData {
            kind,
            items: Vec::with_capacity(data.items.len()),
        };
        for element in &data.items {
            let resolved = self.resolve_element(element)?;
            model.collection_insert(&mut clone, resolved);
        }
        Ok(Value::Collection(CollectionRef::new(clone)))
    }

    fn clone_map(&mut self, original: &MapRef, field: Option<&FieldInfo>) -> Result<Value, CloneError> {
        let data = original.read();
        let kind = match &data.kind {
            MapKind::Custom(name) => {
                debug!("unrecognized map kind custom({name}); rebuilding as an ordered-map");
                MapKind::Ordered
            }
            kind => kind.clone(),
        };
        if let Some(field) = field {
            if !map_assignable(&field.declared) {
                return Err(self.mismatch(field, kind.label()));
            }
        }
        let model = Arc::clone(self.cloner.descriptor.model());
        let mut clone = MapData {
            kind,
            entries: Vec::with_capacity(data.entries.len()),
        };
        for (key, value) in &data.entries {
            let clone_key = self.resolve_element(key)?;
            let clone_value = self.resolve_element(value)?;
            model.map_insert(&mut clone, clone_key, clone_value);
        }
        Ok(Value::Map(MapRef::new(clone)))
    }

    fn clone_array(
        &mut self,
        original: &ArrayRef,
        field: Option<&FieldInfo>,
    ) -> Result<Value, CloneError> {
        let data = original.read();
        if let Some(field) = field {
            let model = self.cloner.descriptor.model();
            let array_type = DeclaredType::array(data.component.clone());
            if !model.type_assignable(&array_type, &field.declared) {
                return Err(self.mismatch(field, model.type_label(&array_type)));
            }
        }
        let mut items = Vec::with_capacity(data.items.len());
        for element in &data.items {
            items.push(self.resolve_element(element)?);
        }
        Ok(Value::Array(ArrayRef::new(ArrayData {
            component: data.component.clone(),
            items,
        })))
    }

    fn mismatch(&self, field: &FieldInfo, actual: String) -> CloneError {
        let model = self.cloner.descriptor.model();
        CloneError::ContainerTypeMismatch {
            class: model.class_name(field.declaring).to_string(),
            field: field.name.clone(),
            actual,
            declared: model.type_label(&field.declared),
        }
    }
}

fn collection_assignable(kind: &CollectionKind, declared: &DeclaredType) -> bool {
    match declared {
        DeclaredType::Any | DeclaredType::Collection(_) => true,
        DeclaredType::List(_) => kind.is_list(),
        DeclaredType::Set(_) => kind.is_set(),
        _ => false,
    }
}

fn map_assignable(declared: &DeclaredType) -> bool {
    matches!(declared, DeclaredType::Any | DeclaredType::Map(_, _))
}
