//! Runtime solution-graph values.
//!
//! A solution graph is built from [`Value`]s: inline scalars, shared
//! immutable text, enum constants, and four reference kinds (objects,
//! collections, maps, arrays). Reference kinds are shared mutable cells;
//! two fields holding the same cell alias the same underlying data, and
//! reference identity (the cell's address) is what the clone engine's
//! identity map is keyed on.

use super::types::{ClassId, ComparatorId, DeclaredType, EnumId};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::sync::Arc;

/// A runtime value held in a field slot or container element.
#[derive(Clone, Debug)]
pub enum Value {
    /// Absent reference.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Float scalar.
    Float(f64),
    /// Character scalar.
    Char(char),
    /// Immutable shared text.
    Text(Arc<str>),
    /// An enum constant.
    Enum(EnumConst),
    /// A reference to an object.
    Object(ObjRef),
    /// A reference to a collection (list, set or deque).
    Collection(CollectionRef),
    /// A reference to a map.
    Map(MapRef),
    /// A reference to an array.
    Array(ArrayRef),
}

/// An enum constant: enum type plus variant ordinal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnumConst {
    /// The enum type.
    pub def: EnumId,
    /// Zero-based variant index.
    pub ordinal: u32,
}

/// The state of an object: its runtime class and one slot per field,
/// inherited fields first, in declaration order.
#[derive(Debug)]
pub struct ObjectData {
    /// Runtime class of this instance.
    pub class: ClassId,
    /// Field slots, parallel to the class's flattened layout.
    pub slots: Vec<Value>,
}

/// A shared reference to an object.
#[derive(Clone)]
pub struct ObjRef(Arc<RwLock<ObjectData>>);

/// Concrete kind of a collection, preserved by planning clones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollectionKind {
    /// Array-backed list.
    ArrayList,
    /// Linked list.
    LinkedList,
    /// Array-backed double-ended queue.
    Deque,
    /// Hash set.
    HashSet,
    /// Insertion-ordered set.
    OrderedSet,
    /// Sorted set ordered by a registered comparator.
    SortedSet(ComparatorId),
    /// A domain-specific set kind the engine does not recognize.
    CustomSet(Arc<str>),
    /// A domain-specific kind the engine does not recognize.
    Custom(Arc<str>),
}

impl CollectionKind {
    /// Whether this kind has set semantics (unique elements).
    pub fn is_set(&self) -> bool {
        matches!(
            self,
            CollectionKind::HashSet
                | CollectionKind::OrderedSet
                | CollectionKind::SortedSet(_)
                | CollectionKind::CustomSet(_)
        )
    }

    /// Whether this kind has list semantics.
    pub fn is_list(&self) -> bool {
        matches!(self, CollectionKind::ArrayList | CollectionKind::LinkedList)
    }

    /// Short label used in log and error messages.
    pub fn label(&self) -> String {
        match self {
            CollectionKind::ArrayList => "array-list".into(),
            CollectionKind::LinkedList => "linked-list".into(),
            CollectionKind::Deque => "deque".into(),
            CollectionKind::HashSet => "hash-set".into(),
            CollectionKind::OrderedSet => "ordered-set".into(),
            CollectionKind::SortedSet(_) => "sorted-set".into(),
            CollectionKind::CustomSet(name) => format!("custom-set({name})"),
            CollectionKind::Custom(name) => format!("custom({name})"),
        }
    }
}

/// The state of a collection: concrete kind plus elements in iteration
/// order. Sorted kinds keep `items` ordered by their comparator; set
/// kinds keep elements unique.
#[derive(Debug)]
pub struct CollectionData {
    /// Concrete collection kind.
    pub kind: CollectionKind,
    /// Elements in iteration order.
    pub items: Vec<Value>,
}

/// A shared reference to a collection.
#[derive(Clone)]
pub struct CollectionRef(Arc<RwLock<CollectionData>>);

/// Concrete kind of a map, preserved by planning clones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapKind {
    /// Hash map.
    Hash,
    /// Insertion-ordered map.
    Ordered,
    /// Sorted map ordered on keys by a registered comparator.
    Sorted(ComparatorId),
    /// A domain-specific kind the engine does not recognize.
    Custom(Arc<str>),
}

impl MapKind {
    /// Short label used in log and error messages.
    pub fn label(&self) -> String {
        match self {
            MapKind::Hash => "hash-map".into(),
            MapKind::Ordered => "ordered-map".into(),
            MapKind::Sorted(_) => "sorted-map".into(),
            MapKind::Custom(name) => format!("custom({name})"),
        }
    }
}

/// The state of a map: concrete kind plus entries in iteration order.
#[derive(Debug)]
pub struct MapData {
    /// Concrete map kind.
    pub kind: MapKind,
    /// Entries in iteration order. Sorted kinds keep entries ordered
    /// on keys by their comparator; keys are unique for every kind.
    pub entries: Vec<(Value, Value)>,
}

/// A shared reference to a map.
#[derive(Clone)]
pub struct MapRef(Arc<RwLock<MapData>>);

/// The state of an array: fixed component type plus elements.
#[derive(Debug)]
pub struct ArrayData {
    /// Component type of every element slot.
    pub component: DeclaredType,
    /// Elements by index.
    pub items: Vec<Value>,
}

/// A shared reference to an array.
#[derive(Clone)]
pub struct ArrayRef(Arc<RwLock<ArrayData>>);

macro_rules! shared_ref {
    ($ref_ty:ident, $data_ty:ident) => {
        impl $ref_ty {
            /// Wraps the data in a fresh shared cell.
            pub fn new(data: $data_ty) -> Self {
                Self(Arc::new(RwLock::new(data)))
            }

            /// Locks the cell for reading.
            pub fn read(&self) -> RwLockReadGuard<'_, $data_ty> {
                self.0.read()
            }

            /// Locks the cell for writing.
            pub fn write(&self) -> RwLockWriteGuard<'_, $data_ty> {
                self.0.write()
            }

            /// The cell's address, used as its reference identity.
            pub fn identity(&self) -> usize {
                Arc::as_ptr(&self.0) as usize
            }

            /// Whether both references point at the same cell.
            pub fn same(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0)
            }
        }

        impl fmt::Debug for $ref_ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($ref_ty), "@{:#x}"), self.identity())
            }
        }
    };
}

shared_ref!(ObjRef, ObjectData);
shared_ref!(CollectionRef, CollectionData);
shared_ref!(MapRef, MapData);
shared_ref!(ArrayRef, ArrayData);

impl Value {
    /// Whether this value is the absent reference.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether both values are the *same reference* (same cell).
    ///
    /// Scalars are never the same reference, even when equal; text is
    /// the same reference only when both share one allocation.
    pub fn same_ref(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Object(x), Value::Object(y)) => x.same(y),
            (Value::Collection(x), Value::Collection(y)) => x.same(y),
            (Value::Map(x), Value::Map(y)) => x.same(y),
            (Value::Array(x), Value::Array(y)) => x.same(y),
            (Value::Text(x), Value::Text(y)) => Arc::ptr_eq(x, y),
            _ => false,
        }
    }

    /// The default slot value for a declared type: primitives zeroed,
    /// references null.
    pub fn default_for(declared: &DeclaredType) -> Value {
        match declared {
            DeclaredType::Bool => Value::Bool(false),
            DeclaredType::Int => Value::Int(0),
            DeclaredType::Float => Value::Float(0.0),
            DeclaredType::Char => Value::Char('\0'),
            _ => Value::Null,
        }
    }

    /// Short kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Text(_) => "text",
            Value::Enum(_) => "enum",
            Value::Object(_) => "object",
            Value::Collection(_) => "collection",
            Value::Map(_) => "map",
            Value::Array(_) => "array",
        }
    }
}

/// Scalars and enum constants compare by value, text by content, and
/// reference kinds by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.same(b),
            (Value::Collection(a), Value::Collection(b)) => a.same(b),
            (Value::Map(a), Value::Map(b)) => a.same(b),
            (Value::Array(a), Value::Array(b)) => a.same(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Char(c) => write!(f, "'{c}'"),
            Value::Text(t) => write!(f, "\"{t}\""),
            Value::Enum(e) => write!(f, "enum#{}.{}", e.def.0, e.ordinal),
            Value::Object(o) => write!(f, "{o:?}"),
            Value::Collection(c) => write!(f, "{c:?}"),
            Value::Map(m) => write!(f, "{m:?}"),
            Value::Array(a) => write!(f, "{a:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Value {
        Value::Float(x)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Value {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Text(Arc::from(s))
    }
}

impl From<ObjRef> for Value {
    fn from(o: ObjRef) -> Value {
        Value::Object(o)
    }
}
