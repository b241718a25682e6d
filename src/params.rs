//! 参数集合：命名参数（映射）与位置参数（序列）。

use std::collections::BTreeMap;
use std::fmt;

use crate::value::SqlValue;

/// 参数映射的键。
///
/// named 风格使用 `Name`；numeric / ordinal 风格的映射既可用整数键，也可用纯数字字符串键。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKey {
    Index(i64),
    Name(String),
}

impl ParamKey {
    /// 把键换算为从 0 开始的位置：`key - start`。
    ///
    /// 非整数、非纯数字字符串以及小于 `start` 的键返回 `None`，即任何 numeric 占位符都引用不到它。
    pub fn position(&self, start: usize) -> Option<usize> {
        let raw = match self {
            Self::Index(i) => usize::try_from(*i).ok()?,
            Self::Name(s) => {
                if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                s.parse::<usize>().ok()?
            }
        };
        raw.checked_sub(start)
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(s) => Some(s),
            Self::Index(_) => None,
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for ParamKey {
    fn from(v: &str) -> Self {
        Self::Name(v.to_string())
    }
}

impl From<String> for ParamKey {
    fn from(v: String) -> Self {
        Self::Name(v)
    }
}

impl From<i32> for ParamKey {
    fn from(v: i32) -> Self {
        Self::Index(v as i64)
    }
}

impl From<i64> for ParamKey {
    fn from(v: i64) -> Self {
        Self::Index(v)
    }
}

impl From<u32> for ParamKey {
    fn from(v: u32) -> Self {
        Self::Index(v as i64)
    }
}

impl From<usize> for ParamKey {
    fn from(v: usize) -> Self {
        Self::Index(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

/// 一组 SQL 参数。
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    /// 位置参数，按 0 起始的下标访问。
    Seq(Vec<SqlValue>),
    /// 映射参数。
    Map(BTreeMap<ParamKey, SqlValue>),
}

impl Default for Params {
    fn default() -> Self {
        Self::Seq(Vec::new())
    }
}

impl Params {
    pub fn seq<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SqlValue>,
    {
        Self::Seq(values.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<ParamKey>,
        V: Into<SqlValue>,
    {
        Self::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Seq(v) => v.len(),
            Self::Map(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按键读取；`Seq` 只响应非负的 `Index` 键。
    pub fn get(&self, key: &ParamKey) -> Option<&SqlValue> {
        match self {
            Self::Seq(v) => key.position(0).and_then(|i| match key {
                ParamKey::Index(_) => v.get(i),
                ParamKey::Name(_) => None,
            }),
            Self::Map(m) => m.get(key),
        }
    }

    pub fn get_name(&self, name: &str) -> Option<&SqlValue> {
        self.get(&ParamKey::Name(name.to_string()))
    }

    pub fn as_seq(&self) -> Option<&[SqlValue]> {
        match self {
            Self::Seq(v) => Some(v),
            Self::Map(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<ParamKey, SqlValue>> {
        match self {
            Self::Map(m) => Some(m),
            Self::Seq(_) => None,
        }
    }
}

impl From<Vec<SqlValue>> for Params {
    fn from(v: Vec<SqlValue>) -> Self {
        Self::Seq(v)
    }
}

impl From<BTreeMap<ParamKey, SqlValue>> for Params {
    fn from(m: BTreeMap<ParamKey, SqlValue>) -> Self {
        Self::Map(m)
    }
}

impl From<std::collections::HashMap<String, SqlValue>> for Params {
    fn from(m: std::collections::HashMap<String, SqlValue>) -> Self {
        Self::Map(m.into_iter().map(|(k, v)| (ParamKey::Name(k), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{ParamKey, Params};
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn position_accepts_integers_and_digit_strings() {
        let cases: Vec<(ParamKey, usize, Option<usize>)> = vec![
            (ParamKey::Index(1), 1, Some(0)),
            (ParamKey::Index(3), 1, Some(2)),
            (ParamKey::Index(0), 1, None),
            (ParamKey::Index(-2), 0, None),
            ("2".into(), 1, Some(1)),
            ("0".into(), 0, Some(0)),
            ("x1".into(), 1, None),
            ("".into(), 0, None),
            ("-1".into(), 0, None),
        ];
        for (key, start, want) in cases {
            assert_eq!(key.position(start), want, "key={key:?} start={start}");
        }
    }

    #[test]
    fn get_reads_both_shapes() {
        let seq = Params::seq([10_i64, 20]);
        assert_eq!(seq.get(&ParamKey::Index(1)), Some(&SqlValue::I64(20)));
        assert_eq!(seq.get(&"1".into()), None);

        let map = Params::map([("id", 7_i64)]);
        assert_eq!(map.get_name("id"), Some(&SqlValue::I64(7)));
        assert_eq!(map.len(), 1);
        assert!(map.as_seq().is_none());
    }
}
