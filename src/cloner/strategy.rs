//! Field-copy strategies and per-class clone plans.
//!
//! Instead of re-inspecting a class on every clone, the engine builds
//! one [`ClonePlan`] per class: an ordered list of (field, strategy)
//! pairs over the class's flattened layout. Copying an instance is then
//! a single pass over the plan. Plans are pure derivations of the
//! domain metadata and are cached per class on the cloner.

use super::decision::CloneDecisionOracle;
use super::error::CloneError;
use crate::domain::{
    ClassId, DeclaredType, DomainModel, FieldInfo, ObjRef, ObjectData, SolutionDescriptor, Value,
};
use std::sync::Arc;

/// How one field slot is copied from an original to its clone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldStrategy {
    /// Raw boolean copy.
    CopyBool,
    /// Raw integer copy.
    CopyInt,
    /// Raw float copy.
    CopyFloat,
    /// Raw character copy.
    CopyChar,
    /// Reference copy for declared-immutable types; original and clone
    /// intentionally alias.
    ShallowRef,
    /// Asks the oracle at copy time; deep values become deferred work
    /// items instead of being resolved in place.
    DeferredDeep,
}

/// The ordered copy plan for one class.
#[derive(Debug)]
pub(crate) struct ClonePlan {
    /// The runtime class this plan copies.
    pub class: ClassId,
    /// Flattened field layout of the class.
    pub layout: Arc<Vec<FieldInfo>>,
    /// One strategy per layout slot.
    pub strategies: Vec<FieldStrategy>,
}

impl ClonePlan {
    /// Derives the plan for a class from the domain metadata.
    pub fn build(descriptor: &SolutionDescriptor, class: ClassId) -> ClonePlan {
        let layout = descriptor.model().layout(class).clone();
        let strategies = layout
            .iter()
            .map(|field| match &field.declared {
                DeclaredType::Bool => FieldStrategy::CopyBool,
                DeclaredType::Int => FieldStrategy::CopyInt,
                DeclaredType::Float => FieldStrategy::CopyFloat,
                DeclaredType::Char => FieldStrategy::CopyChar,
                declared if descriptor.is_immutable(declared) => FieldStrategy::ShallowRef,
                _ => FieldStrategy::DeferredDeep,
            })
            .collect();
        ClonePlan {
            class,
            layout,
            strategies,
        }
    }
}

/// A field of a clone whose final value is not known yet: the original
/// value still has to be resolved through the work queue. Created by
/// [`FieldStrategy::DeferredDeep`], consumed exactly once by the drain
/// loop, never re-queued.
#[derive(Debug)]
pub(crate) struct Unresolved {
    /// The clone instance owning the field.
    pub owner: ObjRef,
    /// Copy plan of the owning class.
    pub plan: Arc<ClonePlan>,
    /// Slot of the field awaiting resolution.
    pub slot: usize,
    /// The original value to resolve.
    pub original: Value,
}

impl FieldStrategy {
    /// Copies one slot from `original` into `clone_data`.
    ///
    /// Returns a deferred work item when the value needs deep cloning;
    /// everything else completes immediately.
    pub fn apply(
        &self,
        model: &DomainModel,
        oracle: &CloneDecisionOracle,
        plan: &Arc<ClonePlan>,
        slot: usize,
        original: &ObjectData,
        clone_ref: &ObjRef,
        clone_data: &mut ObjectData,
    ) -> Result<Option<Unresolved>, CloneError> {
        let field = &plan.layout[slot];
        match self {
            FieldStrategy::CopyBool
            | FieldStrategy::CopyInt
            | FieldStrategy::CopyFloat
            | FieldStrategy::CopyChar => {
                let value = &original.slots[slot];
                let compatible = matches!(
                    (self, value),
                    (FieldStrategy::CopyBool, Value::Bool(_))
                        | (FieldStrategy::CopyInt, Value::Int(_))
                        | (FieldStrategy::CopyFloat, Value::Float(_))
                        | (FieldStrategy::CopyChar, Value::Char(_))
                );
                if !compatible {
                    return Err(access_failure(model, original.class, field, value));
                }
                clone_data.slots[slot] = value.clone();
                Ok(None)
            }
            FieldStrategy::ShallowRef => {
                clone_data.slots[slot] = original.slots[slot].clone();
                Ok(None)
            }
            FieldStrategy::DeferredDeep => {
                let value = original.slots[slot].clone();
                if value.is_null() {
                    clone_data.slots[slot] = Value::Null;
                    Ok(None)
                } else if oracle.deep_clone_field(original.class, field, &value) {
                    Ok(Some(Unresolved {
                        owner: clone_ref.clone(),
                        plan: Arc::clone(plan),
                        slot,
                        original: value,
                    }))
                } else {
                    clone_data.slots[slot] = value;
                    Ok(None)
                }
            }
        }
    }
}

fn access_failure(
    model: &DomainModel,
    class: ClassId,
    field: &FieldInfo,
    value: &Value,
) -> CloneError {
    CloneError::AccessFailure {
        class: model.class_name(class).to_string(),
        field: field.name.clone(),
        value: value.to_string(),
    }
}
