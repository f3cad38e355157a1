//! The renderable shape of a logged value.
//!
//! Rust has no runtime reflection, so producers describe a value's shape up
//! front: either through the [`Render`] impls shipped here or by building a
//! [`Value`] by hand. The formatter in [`crate::format`] only ever sees a
//! `Value`.

use std::{
    fmt::{self, Debug, Display},
    sync::Arc,
};

use crate::format;

/// A value that knows how to write itself to a text stream.
pub trait Streamable: Send + Sync {
    fn write_to(&self, out: &mut dyn fmt::Write) -> fmt::Result;
}

#[derive(Clone)]
pub struct StreamValue(Arc<dyn Streamable>);

impl StreamValue {
    pub fn write_to(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.0.write_to(out)
    }
}

impl Debug for StreamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StreamValue(..)")
    }
}

/// A fully qualified Rust type name, as produced by `std::any::type_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(qualified: impl Into<String>) -> Self {
        Self(qualified.into())
    }

    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>().to_string())
    }

    pub fn qualified(&self) -> &str {
        &self.0
    }

    /// The name with every module path stripped, generic arguments included:
    /// `alloc::vec::Vec<core::option::Option<u8>>` becomes `Vec<Option<u8>>`.
    pub fn short(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        let mut token = String::new();

        for c in self.0.chars() {
            if c.is_alphanumeric() || c == '_' || c == ':' {
                token.push(c);
            } else {
                push_last_segment(&mut out, &token);
                token.clear();
                out.push(c);
            }
        }
        push_last_segment(&mut out, &token);

        out
    }
}

fn push_last_segment(out: &mut String, path: &str) {
    out.push_str(path.rsplit("::").next().unwrap_or(path));
}

/// One member of a tuple or record. Records skip unlabeled fields.
#[derive(Debug, Clone)]
pub struct Field {
    pub label: Option<String>,
    pub value: Value,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Render) -> Self {
        Self {
            label: Some(label.into()),
            value: value.to_value(),
        }
    }

    pub fn unlabeled(value: impl Render) -> Self {
        Self {
            label: None,
            value: value.to_value(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    /// An absent value, rendered as `nil`.
    Nil,
    Text(String),
    /// Numbers, booleans and anything else whose display and debug forms agree.
    Scalar(String),
    Stream(StreamValue),
    Custom {
        description: Option<String>,
        debug_description: Option<String>,
    },
    Optional(Option<Box<Value>>),
    Tuple(Vec<Field>),
    Record {
        type_name: TypeName,
        fields: Vec<Field>,
    },
    Variant {
        type_name: TypeName,
        tag: Option<String>,
        payload: Option<Box<Value>>,
    },
    Type(TypeName),
    Opaque {
        type_name: TypeName,
        summary: Option<String>,
    },
}

impl Value {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn scalar(value: impl Display) -> Self {
        Self::Scalar(value.to_string())
    }

    /// Uses the `Display` output of `value` as its description.
    pub fn display(value: &impl Display) -> Self {
        Self::Custom {
            description: Some(value.to_string()),
            debug_description: None,
        }
    }

    /// Uses the `Debug` output of `value` as its debug description.
    pub fn debug(value: &impl Debug) -> Self {
        Self::Custom {
            description: None,
            debug_description: Some(format!("{:?}", value)),
        }
    }

    pub fn stream(value: impl Streamable + 'static) -> Self {
        Self::Stream(StreamValue(Arc::new(value)))
    }

    pub fn some(value: impl Render) -> Self {
        Self::Optional(Some(Box::new(value.to_value())))
    }

    pub fn none() -> Self {
        Self::Optional(None)
    }

    pub fn tuple(fields: impl IntoIterator<Item = Field>) -> Self {
        Self::Tuple(fields.into_iter().collect())
    }

    pub fn record<T: ?Sized>() -> RecordBuilder {
        RecordBuilder {
            type_name: TypeName::of::<T>(),
            fields: Vec::new(),
        }
    }

    pub fn variant<T: ?Sized>(tag: impl Into<String>) -> Self {
        Self::Variant {
            type_name: TypeName::of::<T>(),
            tag: Some(tag.into()),
            payload: None,
        }
    }

    pub fn variant_with<T: ?Sized>(tag: impl Into<String>, payload: impl Render) -> Self {
        Self::Variant {
            type_name: TypeName::of::<T>(),
            tag: Some(tag.into()),
            payload: Some(Box::new(payload.to_value())),
        }
    }

    pub fn of_type<T: ?Sized>() -> Self {
        Self::Type(TypeName::of::<T>())
    }

    pub fn opaque<T: ?Sized>() -> Self {
        Self::Opaque {
            type_name: TypeName::of::<T>(),
            summary: None,
        }
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Self::Tuple(_))
    }
}

pub struct RecordBuilder {
    type_name: TypeName,
    fields: Vec<Field>,
}

impl RecordBuilder {
    pub fn field(mut self, label: impl Into<String>, value: impl Render) -> Self {
        self.fields.push(Field::new(label, value));
        self
    }

    pub fn unlabeled(mut self, value: impl Render) -> Self {
        self.fields.push(Field::unlabeled(value));
        self
    }

    pub fn finish(self) -> Value {
        Value::Record {
            type_name: self.type_name,
            fields: self.fields,
        }
    }
}

/// Anything that can be handed to the logger.
pub trait Render {
    fn to_value(&self) -> Value;
}

impl Render for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Render for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl Render for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl Render for char {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

macro_rules! render_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Render for $ty {
                fn to_value(&self) -> Value {
                    Value::Scalar(self.to_string())
                }
            }
        )*
    };
}

render_scalar!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl<T: Render> Render for Option<T> {
    fn to_value(&self) -> Value {
        Value::Optional(self.as_ref().map(|v| Box::new(v.to_value())))
    }
}

impl<T: Render + ?Sized> Render for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Render + ?Sized> Render for Arc<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: Render> Render for [T] {
    fn to_value(&self) -> Value {
        let items = self
            .iter()
            .map(|item| format::render_debug(&item.to_value()))
            .collect::<Vec<_>>();

        Value::Custom {
            description: Some(format!("[{}]", items.join(", "))),
            debug_description: None,
        }
    }
}

impl<T: Render> Render for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl Render for () {
    fn to_value(&self) -> Value {
        Value::Tuple(Vec::new())
    }
}

macro_rules! render_tuple {
    ($($name:ident),+) => {
        impl<$($name: Render),+> Render for ($($name,)+) {
            #[allow(non_snake_case)]
            fn to_value(&self) -> Value {
                let ($($name,)+) = self;
                Value::Tuple(vec![$(Field::unlabeled($name)),+])
            }
        }
    };
}

render_tuple!(A);
render_tuple!(A, B);
render_tuple!(A, B, C);
render_tuple!(A, B, C, D);
render_tuple!(A, B, C, D, E);
render_tuple!(A, B, C, D, E, F);

#[cfg(test)]
mod tests {
    use super::*;

    struct Account;

    #[test]
    fn short_type_names_strip_every_path() {
        let name = TypeName::new("alloc::vec::Vec<core::option::Option<my_app::model::User>>");
        assert_eq!(name.short(), "Vec<Option<User>>");

        let name = TypeName::new("(i32, alloc::string::String)");
        assert_eq!(name.short(), "(i32, String)");

        assert_eq!(TypeName::of::<Account>().short(), "Account");
        assert!(TypeName::of::<Account>().qualified().ends_with("tests::Account"));
    }

    #[test]
    fn primitives_map_to_text_and_scalars() {
        assert!(matches!("hi".to_value(), Value::Text(ref s) if s == "hi"));
        assert!(matches!('x'.to_value(), Value::Text(ref s) if s == "x"));
        assert!(matches!(42u8.to_value(), Value::Scalar(ref s) if s == "42"));
        assert!(matches!(true.to_value(), Value::Scalar(ref s) if s == "true"));
    }

    #[test]
    fn options_and_tuples_keep_their_shape() {
        assert!(matches!(None::<i32>.to_value(), Value::Optional(None)));
        assert!(matches!(Some(1).to_value(), Value::Optional(Some(_))));

        match (1, "a", 2.5).to_value() {
            Value::Tuple(fields) => {
                assert_eq!(fields.len(), 3);
                assert!(fields.iter().all(|f| f.label.is_none()));
            }
            other => panic!("expected tuple, got {:?}", other),
        }
    }

    #[test]
    fn record_builder_keeps_field_order() {
        let value = Value::record::<Account>()
            .field("id", 7)
            .field("name", "bob")
            .unlabeled(true)
            .finish();

        match value {
            Value::Record { fields, .. } => {
                let labels = fields
                    .iter()
                    .map(|f| f.label.as_deref())
                    .collect::<Vec<_>>();
                assert_eq!(labels, vec![Some("id"), Some("name"), None]);
            }
            other => panic!("expected record, got {:?}", other),
        }
    }
}
