//! The record accessor capability.
//!
//! Rust has no runtime field reflection, so records describe themselves:
//! [`Record::fields`] enumerates field names, kinds and directive tags, and
//! [`Record::field_mut`] hands out a mutable [`Slot`] for one field. The
//! `#[derive(Record)]` macro in `maker-derive` writes both for plain structs;
//! runtime-described records implement them by hand.
//!
//! Leaf types implement [`Field`], which is how the derive macro learns the
//! kind of each field without inspecting its type syntactically.

use crate::kind::{FieldKind, ScalarKind};
use crate::value::{Value, ValueError};
use num_complex::{Complex32, Complex64};

/// Static description of one field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as used in plans
    pub name: String,

    /// Field shape
    pub kind: FieldKind,

    /// Raw directive tag, if the field carries one
    pub directive: Option<String>,
}

impl FieldDescriptor {
    /// Create a new field descriptor.
    pub fn new(name: impl Into<String>, kind: FieldKind, directive: Option<&str>) -> Self {
        Self {
            name: name.into(),
            kind,
            directive: directive.map(str::to_string),
        }
    }
}

/// A value with named fields that can be filled.
pub trait Record {
    /// Describe the record's fields in declaration order.
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Mutable access to a field by name.
    fn field_mut(&mut self, name: &str) -> Option<Slot<'_>>;
}

/// A homogeneous, pre-sized sequence of fillable elements.
pub trait Sequence {
    /// Number of elements. Filling never changes it.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind shared by every element.
    fn element_kind(&self) -> FieldKind;

    /// Mutable access to the element at `index`.
    fn element_mut(&mut self, index: usize) -> Option<Slot<'_>>;
}

/// A type that can appear as a field of a [`Record`].
///
/// Newtypes implement this by forwarding to the wrapped value:
///
/// ```rust
/// use maker_core::{Field, FieldKind, Slot};
///
/// struct Username(String);
///
/// impl Field for Username {
///     fn kind() -> FieldKind {
///         String::kind()
///     }
///
///     fn slot(&mut self) -> Slot<'_> {
///         self.0.slot()
///     }
/// }
/// ```
pub trait Field {
    /// Shape of this type when used as a field.
    fn kind() -> FieldKind
    where
        Self: Sized;

    /// Mutable view of this value.
    fn slot(&mut self) -> Slot<'_>;
}

/// Mutable view of a fillable location.
pub enum Slot<'a> {
    Scalar(ScalarSlot<'a>),
    Record(&'a mut dyn Record),
    Sequence(&'a mut dyn Sequence),
}

impl Slot<'_> {
    /// Human-readable kind, used in error messages.
    pub fn kind_name(&self) -> String {
        match self {
            Slot::Scalar(slot) => slot.kind().to_string(),
            Slot::Record(_) => "record".to_string(),
            Slot::Sequence(sequence) => {
                FieldKind::Sequence(Box::new(sequence.element_kind())).to_string()
            }
        }
    }
}

/// Mutable reference to a concrete scalar.
pub enum ScalarSlot<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Complex32(&'a mut Complex32),
    Complex64(&'a mut Complex64),
    String(&'a mut String),
    Bool(&'a mut bool),
    Unsupported(&'static str),
}

impl ScalarSlot<'_> {
    /// Destination kind of this slot.
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarSlot::I8(_)
            | ScalarSlot::I16(_)
            | ScalarSlot::I32(_)
            | ScalarSlot::I64(_)
            | ScalarSlot::Isize(_) => ScalarKind::Int,
            ScalarSlot::U8(_)
            | ScalarSlot::U16(_)
            | ScalarSlot::U32(_)
            | ScalarSlot::U64(_)
            | ScalarSlot::Usize(_) => ScalarKind::Uint,
            ScalarSlot::F32(_) | ScalarSlot::F64(_) => ScalarKind::Float,
            ScalarSlot::Complex32(_) | ScalarSlot::Complex64(_) => ScalarKind::Complex,
            ScalarSlot::String(_) => ScalarKind::String,
            ScalarSlot::Bool(_) => ScalarKind::Bool,
            ScalarSlot::Unsupported(name) => ScalarKind::Unsupported(name),
        }
    }

    /// Write `value` into the slot.
    ///
    /// Values are narrowed with `as` casts; out-of-range integers truncate.
    pub fn assign(self, value: Value) -> Result<(), ValueError> {
        match (self, value) {
            (ScalarSlot::I8(target), Value::Int(v)) => *target = v as i8,
            (ScalarSlot::I16(target), Value::Int(v)) => *target = v as i16,
            (ScalarSlot::I32(target), Value::Int(v)) => *target = v as i32,
            (ScalarSlot::I64(target), Value::Int(v)) => *target = v,
            (ScalarSlot::Isize(target), Value::Int(v)) => *target = v as isize,
            (ScalarSlot::U8(target), Value::Uint(v)) => *target = v as u8,
            (ScalarSlot::U16(target), Value::Uint(v)) => *target = v as u16,
            (ScalarSlot::U32(target), Value::Uint(v)) => *target = v as u32,
            (ScalarSlot::U64(target), Value::Uint(v)) => *target = v,
            (ScalarSlot::Usize(target), Value::Uint(v)) => *target = v as usize,
            (ScalarSlot::F32(target), Value::Float(v)) => *target = v as f32,
            (ScalarSlot::F64(target), Value::Float(v)) => *target = v,
            (ScalarSlot::Complex32(target), Value::Complex(v)) => {
                *target = Complex32::new(v.re as f32, v.im as f32)
            }
            (ScalarSlot::Complex64(target), Value::Complex(v)) => *target = v,
            (ScalarSlot::String(target), Value::String(v)) => *target = v,
            (ScalarSlot::Bool(target), Value::Bool(v)) => *target = v,
            (slot, value) => {
                return Err(ValueError::Mismatch {
                    expected: slot.kind(),
                    actual: value.kind(),
                })
            }
        }
        Ok(())
    }
}

macro_rules! scalar_field {
    ($($ty:ty => $variant:ident, $kind:expr;)*) => {
        $(
            impl Field for $ty {
                fn kind() -> FieldKind {
                    FieldKind::Scalar($kind)
                }

                fn slot(&mut self) -> Slot<'_> {
                    Slot::Scalar(ScalarSlot::$variant(self))
                }
            }
        )*
    };
}

scalar_field! {
    i8 => I8, ScalarKind::Int;
    i16 => I16, ScalarKind::Int;
    i32 => I32, ScalarKind::Int;
    i64 => I64, ScalarKind::Int;
    isize => Isize, ScalarKind::Int;
    u8 => U8, ScalarKind::Uint;
    u16 => U16, ScalarKind::Uint;
    u32 => U32, ScalarKind::Uint;
    u64 => U64, ScalarKind::Uint;
    usize => Usize, ScalarKind::Uint;
    f32 => F32, ScalarKind::Float;
    f64 => F64, ScalarKind::Float;
    Complex32 => Complex32, ScalarKind::Complex;
    Complex64 => Complex64, ScalarKind::Complex;
    String => String, ScalarKind::String;
    bool => Bool, ScalarKind::Bool;
}

// No engine produces single code points.
impl Field for char {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::Unsupported("char"))
    }

    fn slot(&mut self) -> Slot<'_> {
        Slot::Scalar(ScalarSlot::Unsupported("char"))
    }
}

impl<T: Field> Sequence for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn element_kind(&self) -> FieldKind {
        T::kind()
    }

    fn element_mut(&mut self, index: usize) -> Option<Slot<'_>> {
        self.get_mut(index).map(Field::slot)
    }
}

impl<T: Field> Field for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::Sequence(Box::new(T::kind()))
    }

    fn slot(&mut self) -> Slot<'_> {
        Slot::Sequence(self)
    }
}

impl<T: Field, const N: usize> Sequence for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn element_kind(&self) -> FieldKind {
        T::kind()
    }

    fn element_mut(&mut self, index: usize) -> Option<Slot<'_>> {
        self.get_mut(index).map(Field::slot)
    }
}

impl<T: Field, const N: usize> Field for [T; N] {
    fn kind() -> FieldKind {
        FieldKind::Sequence(Box::new(T::kind()))
    }

    fn slot(&mut self) -> Slot<'_> {
        Slot::Sequence(self)
    }
}
