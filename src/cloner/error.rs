//! Clone failure taxonomy.

use thiserror::Error;

/// A fatal, non-retryable failure while building a planning clone.
///
/// All variants signal a structural or configuration problem in the
/// domain model or its metadata, never a transient fault; the caller
/// must abandon the affected solve or snapshot attempt.
#[derive(Debug, Error)]
pub enum CloneError {
    /// A field could not be read or written.
    #[error("the field ({field}) on class ({class}) cannot be accessed (value: {value})")]
    AccessFailure {
        /// Owning class name.
        class: String,
        /// Field name.
        field: String,
        /// The attempted value, or `n/a` for a read.
        value: String,
    },

    /// A class reachable for deep cloning has no no-arg construction
    /// path.
    #[error("the class ({class}) needs a no-arg construction path to create a planning clone")]
    MissingDefaultConstructor {
        /// The unconstructible class name.
        class: String,
    },

    /// A reconstructed collection, map or array is not assignable to
    /// the declared type of the field it belongs to.
    #[error(
        "the rebuilt {actual} for the field ({class}.{field}) is not assignable to \
         the declared type ({declared}); that container kind needs a custom solution cloner"
    )]
    ContainerTypeMismatch {
        /// Owning class name.
        class: String,
        /// Field name.
        field: String,
        /// Kind of the rebuilt container.
        actual: String,
        /// Declared type label of the field.
        declared: String,
    },

    /// After cloning, an entity-valued solution property still aliases
    /// the original.
    #[error(
        "the solution property ({property}) was not planning-cloned as expected; \
         its backing field was not recognized, probably because the field name differs \
         from the property name"
    )]
    PostconditionViolation {
        /// The property that still aliases the original.
        property: String,
    },
}
