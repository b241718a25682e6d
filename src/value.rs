//! SQL 参数值类型。

use std::borrow::Cow;

/// SQL 参数值。
///
/// 转换过程只搬运参数值，不解释其内容；唯一例外是 [`SqlValue::Tuple`]，
/// 在开启 `expand_tuples` 时会被展开成多个占位符。
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(Cow<'static, str>),
    Bytes(Vec<u8>),
    DateTime(time::OffsetDateTime),
    /// 定长有序集合，可展开为 `(?,?,?)`。
    Tuple(Vec<SqlValue>),
    /// 数组参数（如 PostgreSQL `ANY($1)`），始终作为单个值传递，不参与展开。
    Array(Vec<SqlValue>),
}

impl SqlValue {
    /// 将 `Option<T>` 映射为 `SqlValue`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<SqlValue>>(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }

    /// 若为 tuple，返回其元素。
    pub fn as_tuple(&self) -> Option<&[SqlValue]> {
        match self {
            Self::Tuple(items) => Some(items),
            _ => None,
        }
    }
}

/// 构造一个可展开的 tuple 参数：`IN :ids` + `tuple([1, 2, 3])` => `IN (?,?,?)`。
pub fn tuple<I, T>(values: I) -> SqlValue
where
    I: IntoIterator<Item = T>,
    T: Into<SqlValue>,
{
    SqlValue::Tuple(values.into_iter().map(Into::into).collect())
}

/// 构造一个数组参数，转换时原样传递。
pub fn array<I, T>(values: I) -> SqlValue
where
    I: IntoIterator<Item = T>,
    T: Into<SqlValue>,
{
    SqlValue::Array(values.into_iter().map(Into::into).collect())
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        Self::from_option(v)
    }
}

impl From<()> for SqlValue {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i8> for SqlValue {
    fn from(v: i8) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i16> for SqlValue {
    fn from(v: i16) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<u8> for SqlValue {
    fn from(v: u8) -> Self {
        Self::U64(v as u64)
    }
}

impl From<u16> for SqlValue {
    fn from(v: u16) -> Self {
        Self::U64(v as u64)
    }
}

impl From<u32> for SqlValue {
    fn from(v: u32) -> Self {
        Self::U64(v as u64)
    }
}

impl From<u64> for SqlValue {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        Self::F64(v as f64)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl From<&'static str> for SqlValue {
    fn from(v: &'static str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<time::OffsetDateTime> for SqlValue {
    fn from(v: time::OffsetDateTime) -> Self {
        Self::DateTime(v)
    }
}
