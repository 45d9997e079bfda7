use serde::ser::{self, Error as _, Impossible, SerializeMap as _, SerializeSeq as _, Serialize};
use serde_json::{Error, Value};
use std::collections::BTreeMap;

/// 请求体中的任意值
///
/// 与 JSON 值语义一致；非有限浮点数（NaN、±Inf）无法编码，序列化时返回错误。
/// `Invalid` 保存从结构体转换时遇到的错误，序列化时原样返回该错误
#[derive(Debug, Clone, PartialEq)]
pub enum BodyValue {
    String(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
    Null,
    Array(Vec<BodyValue>),
    Object(BTreeMap<String, BodyValue>),
    /// 任意 JSON 兼容的数据
    Json(Value),
    /// 无法编码的值及其错误信息
    Invalid(String),
}

impl Serialize for BodyValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self {
            BodyValue::String(s) => serializer.serialize_str(s),
            BodyValue::I64(n) => serializer.serialize_i64(*n),
            BodyValue::U64(n) => serializer.serialize_u64(*n),
            BodyValue::F64(n) if !n.is_finite() => Err(S::Error::custom(unsupported_value(*n))),
            BodyValue::F64(n) => serializer.serialize_f64(*n),
            BodyValue::Bool(b) => serializer.serialize_bool(*b),
            BodyValue::Null => serializer.serialize_none(),
            BodyValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            BodyValue::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            BodyValue::Json(v) => v.serialize(serializer),
            BodyValue::Invalid(msg) => Err(S::Error::custom(msg)),
        }
    }
}

impl BodyValue {
    /// 把任意实现了 Serialize 的值转换为 BodyValue
    ///
    /// 值中含有非有限浮点数或非字符串的 map key 时返回错误
    pub fn try_from_struct<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        value.serialize(BodyValueSerializer)
    }

    /// 把任意实现了 Serialize 的值转换为 BodyValue
    ///
    /// 转换失败时得到 `Invalid`，该请求体在 JSON 输出时产生 `{"Error": ...}` 日志行
    pub fn from_struct<T: Serialize>(value: T) -> Self {
        Self::try_from_struct(&value).unwrap_or_else(|e| BodyValue::Invalid(e.to_string()))
    }
}

fn unsupported_value(n: f64) -> String {
    format!("unsupported value: {}", n)
}

// 为常见类型实现 From<..> for BodyValue 以方便使用
impl From<String> for BodyValue {
    fn from(s: String) -> Self {
        BodyValue::String(s)
    }
}

impl From<&str> for BodyValue {
    fn from(s: &str) -> Self {
        BodyValue::String(s.to_string())
    }
}

impl From<i64> for BodyValue {
    fn from(n: i64) -> Self {
        BodyValue::I64(n)
    }
}

impl From<i32> for BodyValue {
    fn from(n: i32) -> Self {
        BodyValue::I64(n as i64)
    }
}

impl From<u64> for BodyValue {
    fn from(n: u64) -> Self {
        BodyValue::U64(n)
    }
}

impl From<u32> for BodyValue {
    fn from(n: u32) -> Self {
        BodyValue::U64(n as u64)
    }
}

impl From<f64> for BodyValue {
    fn from(n: f64) -> Self {
        BodyValue::F64(n)
    }
}

impl From<bool> for BodyValue {
    fn from(b: bool) -> Self {
        BodyValue::Bool(b)
    }
}

impl From<Value> for BodyValue {
    fn from(v: Value) -> Self {
        BodyValue::Json(v)
    }
}

impl<T: Into<BodyValue>> From<Vec<T>> for BodyValue {
    fn from(items: Vec<T>) -> Self {
        BodyValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<BodyValue>> From<Option<T>> for BodyValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(BodyValue::Null, Into::into)
    }
}

// ============================================================================
// Serialize -> BodyValue
// ============================================================================

/// 把 Serialize 值转换为 BodyValue 的 serializer
///
/// 结构与 `serde_json::value::Serializer` 一致，区别在于非有限浮点数报错而不是写成 null
struct BodyValueSerializer;

impl ser::Serializer for BodyValueSerializer {
    type Ok = BodyValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<BodyValue, Error> {
        Ok(BodyValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<BodyValue, Error> {
        Ok(BodyValue::I64(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<BodyValue, Error> {
        Ok(BodyValue::I64(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<BodyValue, Error> {
        Ok(BodyValue::I64(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<BodyValue, Error> {
        Ok(BodyValue::I64(v))
    }

    fn serialize_u8(self, v: u8) -> Result<BodyValue, Error> {
        Ok(BodyValue::U64(v as u64))
    }

    fn serialize_u16(self, v: u16) -> Result<BodyValue, Error> {
        Ok(BodyValue::U64(v as u64))
    }

    fn serialize_u32(self, v: u32) -> Result<BodyValue, Error> {
        Ok(BodyValue::U64(v as u64))
    }

    fn serialize_u64(self, v: u64) -> Result<BodyValue, Error> {
        Ok(BodyValue::U64(v))
    }

    fn serialize_f32(self, v: f32) -> Result<BodyValue, Error> {
        ser::Serializer::serialize_f64(self, v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<BodyValue, Error> {
        if v.is_finite() {
            Ok(BodyValue::F64(v))
        } else {
            Err(Error::custom(unsupported_value(v)))
        }
    }

    fn serialize_char(self, v: char) -> Result<BodyValue, Error> {
        Ok(BodyValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<BodyValue, Error> {
        Ok(BodyValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<BodyValue, Error> {
        Ok(BodyValue::Array(
            v.iter().map(|b| BodyValue::U64(*b as u64)).collect(),
        ))
    }

    fn serialize_none(self) -> Result<BodyValue, Error> {
        Ok(BodyValue::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<BodyValue, Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<BodyValue, Error> {
        Ok(BodyValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<BodyValue, Error> {
        Ok(BodyValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<BodyValue, Error> {
        Ok(BodyValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<BodyValue, Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<BodyValue, Error> {
        let mut object = BTreeMap::new();
        object.insert(variant.to_string(), value.serialize(BodyValueSerializer)?);
        Ok(BodyValue::Object(object))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec, Error> {
        Ok(SerializeVec {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec, Error> {
        ser::Serializer::serialize_seq(self, Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeVec, Error> {
        ser::Serializer::serialize_seq(self, Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant, Error> {
        Ok(SerializeTupleVariant {
            variant: variant.to_string(),
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap, Error> {
        Ok(SerializeMap {
            entries: BTreeMap::new(),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap, Error> {
        ser::Serializer::serialize_map(self, Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStructVariant, Error> {
        Ok(SerializeStructVariant {
            variant: variant.to_string(),
            entries: BTreeMap::new(),
        })
    }
}

struct SerializeVec {
    items: Vec<BodyValue>,
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = BodyValue;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.items.push(value.serialize(BodyValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<BodyValue, Error> {
        Ok(BodyValue::Array(self.items))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = BodyValue;
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<BodyValue, Error> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = BodyValue;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<BodyValue, Error> {
        ser::SerializeSeq::end(self)
    }
}

struct SerializeTupleVariant {
    variant: String,
    items: Vec<BodyValue>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = BodyValue;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        self.items.push(value.serialize(BodyValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<BodyValue, Error> {
        let mut object = BTreeMap::new();
        object.insert(self.variant, BodyValue::Array(self.items));
        Ok(BodyValue::Object(object))
    }
}

struct SerializeMap {
    entries: BTreeMap<String, BodyValue>,
    next_key: Option<String>,
}

impl ser::SerializeMap for SerializeMap {
    type Ok = BodyValue;
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), Error> {
        self.next_key = Some(key.serialize(MapKeySerializer)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Error> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| Error::custom("map value serialized before its key"))?;
        self.entries.insert(key, value.serialize(BodyValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<BodyValue, Error> {
        Ok(BodyValue::Object(self.entries))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = BodyValue;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Error> {
        self.entries
            .insert(key.to_string(), value.serialize(BodyValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<BodyValue, Error> {
        Ok(BodyValue::Object(self.entries))
    }
}

struct SerializeStructVariant {
    variant: String,
    entries: BTreeMap<String, BodyValue>,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = BodyValue;
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), Error> {
        self.entries
            .insert(key.to_string(), value.serialize(BodyValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<BodyValue, Error> {
        let mut object = BTreeMap::new();
        object.insert(self.variant, BodyValue::Object(self.entries));
        Ok(BodyValue::Object(object))
    }
}

/// map key 只接受字符串、字符和整数，整数按十进制转为字符串
struct MapKeySerializer;

fn key_must_be_a_string() -> Error {
    Error::custom("key must be a string")
}

impl ser::Serializer for MapKeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn serialize_str(self, v: &str) -> Result<String, Error> {
        Ok(v.to_string())
    }

    fn serialize_char(self, v: char) -> Result<String, Error> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String, Error> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String, Error> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String, Error> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String, Error> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String, Error> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String, Error> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String, Error> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String, Error> {
        Ok(v.to_string())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String, Error> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, Error> {
        value.serialize(self)
    }

    fn serialize_bool(self, _v: bool) -> Result<String, Error> {
        Err(key_must_be_a_string())
    }

    fn serialize_f32(self, _v: f32) -> Result<String, Error> {
        Err(key_must_be_a_string())
    }

    fn serialize_f64(self, _v: f64) -> Result<String, Error> {
        Err(key_must_be_a_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, Error> {
        Err(key_must_be_a_string())
    }

    fn serialize_none(self) -> Result<String, Error> {
        Err(key_must_be_a_string())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, _value: &T) -> Result<String, Error> {
        Err(key_must_be_a_string())
    }

    fn serialize_unit(self) -> Result<String, Error> {
        Err(key_must_be_a_string())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, Error> {
        Err(key_must_be_a_string())
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, Error> {
        Err(key_must_be_a_string())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Error> {
        Err(key_must_be_a_string())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Error> {
        Err(key_must_be_a_string())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Error> {
        Err(key_must_be_a_string())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Error> {
        Err(key_must_be_a_string())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Error> {
        Err(key_must_be_a_string())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Error> {
        Err(key_must_be_a_string())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Error> {
        Err(key_must_be_a_string())
    }
}
