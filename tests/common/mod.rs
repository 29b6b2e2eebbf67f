//! Shared fixtures for the integration suites
//!
//! Message types mirror a typical evolving schema: the same field numbers
//! declared singular in one version and repeated in another.

#![allow(dead_code)]

use std::sync::Arc;

use protodoc::{
    DynamicMessage, EnumDescriptor, FieldDescriptor, FieldKind, FieldValue, MessageDescriptor,
    ScalarKind, ScalarValue,
};

pub fn color_enum() -> Arc<EnumDescriptor> {
    EnumDescriptor::new("Color", [(0, "COLOR_UNSPECIFIED"), (1, "RED"), (2, "BLUE")])
}

fn scalar_field_set(repeated: bool) -> Vec<FieldDescriptor> {
    let kinds = [
        (1, "string_field", FieldKind::Scalar(ScalarKind::String)),
        (2, "int32_field", FieldKind::Scalar(ScalarKind::Int32)),
        (3, "int64_field", FieldKind::Scalar(ScalarKind::Int64)),
        (4, "float_field", FieldKind::Scalar(ScalarKind::Float)),
        (5, "double_field", FieldKind::Scalar(ScalarKind::Double)),
        (6, "bool_field", FieldKind::Scalar(ScalarKind::Bool)),
        (7, "enum_field", FieldKind::Enum(color_enum())),
    ];
    kinds
        .into_iter()
        .map(|(number, name, kind)| {
            let kind = if repeated {
                FieldKind::List(Box::new(kind))
            } else {
                kind
            };
            FieldDescriptor::new(number, name, kind).unwrap()
        })
        .collect()
}

/// Every scalar kind plus an enum, all singular
pub fn simple_message() -> Arc<MessageDescriptor> {
    MessageDescriptor::new("SimpleMessage", scalar_field_set(false)).unwrap()
}

/// The same field numbers as [`simple_message`], all repeated
pub fn repeated_field_message() -> Arc<MessageDescriptor> {
    MessageDescriptor::new("RepeatedFieldMessage", scalar_field_set(true)).unwrap()
}

/// Unsigned and bytes kinds, which take distinct wire shapes
pub fn wide_scalar_message() -> Arc<MessageDescriptor> {
    MessageDescriptor::new(
        "WideScalarMessage",
        vec![
            FieldDescriptor::new(1, "uint32_field", FieldKind::Scalar(ScalarKind::Uint32))
                .unwrap(),
            FieldDescriptor::new(2, "uint64_field", FieldKind::Scalar(ScalarKind::Uint64))
                .unwrap(),
            FieldDescriptor::new(3, "bytes_field", FieldKind::Scalar(ScalarKind::Bytes)).unwrap(),
        ],
    )
    .unwrap()
}

pub fn message_with_map() -> Arc<MessageDescriptor> {
    MessageDescriptor::new(
        "MessageWithMap",
        vec![
            FieldDescriptor::new(1, "string_field", FieldKind::Scalar(ScalarKind::String))
                .unwrap(),
            FieldDescriptor::new(
                2,
                "map_field",
                FieldKind::Map {
                    key: ScalarKind::Int32,
                    value: Box::new(FieldKind::Scalar(ScalarKind::String)),
                },
            )
            .unwrap(),
        ],
    )
    .unwrap()
}

pub fn message_with_sub_message_map() -> Arc<MessageDescriptor> {
    MessageDescriptor::new(
        "MessageWithSubMessageMap",
        vec![
            FieldDescriptor::new(1, "string_field", FieldKind::Scalar(ScalarKind::String))
                .unwrap(),
            FieldDescriptor::new(
                2,
                "map_field",
                FieldKind::Map {
                    key: ScalarKind::Int32,
                    value: Box::new(FieldKind::Message(simple_message())),
                },
            )
            .unwrap(),
        ],
    )
    .unwrap()
}

pub fn message_with_sub_message() -> Arc<MessageDescriptor> {
    MessageDescriptor::new(
        "MessageWithSubMessage",
        vec![
            FieldDescriptor::new(1, "string_field", FieldKind::Scalar(ScalarKind::String))
                .unwrap(),
            FieldDescriptor::new(2, "sub_message", FieldKind::Message(simple_message())).unwrap(),
        ],
    )
    .unwrap()
}

pub fn message_with_repeated_sub_message() -> Arc<MessageDescriptor> {
    MessageDescriptor::new(
        "MessageWithRepeatedSubMessage",
        vec![
            FieldDescriptor::new(1, "string_field", FieldKind::Scalar(ScalarKind::String))
                .unwrap(),
            FieldDescriptor::new(
                2,
                "sub_message",
                FieldKind::List(Box::new(FieldKind::Message(simple_message()))),
            )
            .unwrap(),
        ],
    )
    .unwrap()
}

pub fn field(msg: &DynamicMessage, name: &str) -> FieldDescriptor {
    msg.descriptor()
        .field_by_name(name)
        .unwrap_or_else(|| panic!("no field named {}", name))
        .clone()
}

pub fn set(msg: &mut DynamicMessage, name: &str, value: FieldValue) {
    let descriptor = field(msg, name);
    msg.set(&descriptor, value).unwrap();
}

pub fn get(msg: &DynamicMessage, name: &str) -> FieldValue {
    msg.get(&field(msg, name))
}

pub fn string(v: &str) -> FieldValue {
    FieldValue::Scalar(ScalarValue::String(v.to_string()))
}

pub fn int32(v: i32) -> FieldValue {
    FieldValue::Scalar(ScalarValue::Int32(v))
}

pub fn int64(v: i64) -> FieldValue {
    FieldValue::Scalar(ScalarValue::Int64(v))
}

pub fn float(v: f32) -> FieldValue {
    FieldValue::Scalar(ScalarValue::Float(v))
}

pub fn double(v: f64) -> FieldValue {
    FieldValue::Scalar(ScalarValue::Double(v))
}

pub fn boolean(v: bool) -> FieldValue {
    FieldValue::Scalar(ScalarValue::Bool(v))
}

pub fn color(v: i32) -> FieldValue {
    FieldValue::Enum(v)
}

/// A fully populated [`simple_message`] instance
pub fn sample_simple() -> DynamicMessage {
    let mut msg = DynamicMessage::new(simple_message());
    set(&mut msg, "string_field", string("foo"));
    set(&mut msg, "int32_field", int32(32525));
    set(&mut msg, "int64_field", int64(1_531_541_553_141_312_315));
    set(&mut msg, "float_field", float(21541.324));
    set(&mut msg, "double_field", double(21_535_215_136_361_617_136.543858));
    set(&mut msg, "bool_field", boolean(true));
    set(&mut msg, "enum_field", color(2));
    msg
}
