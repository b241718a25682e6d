//! 宏集合：`params!` 用字面量快速构造参数集合。
//!
//! ```
//! use halo_sqlparams::{ParamKey, SqlValue, params};
//!
//! let named = params!["id" => 4, "name" => "Fili"];
//! assert_eq!(named.get_name("id"), Some(&SqlValue::I64(4)));
//!
//! let positional = params![4, "Fili"];
//! assert_eq!(positional.len(), 2);
//!
//! let keyed = params![1 => "Fili"];
//! assert_eq!(keyed.get(&ParamKey::Index(1)), Some(&SqlValue::from("Fili")));
//! ```

/// 构造 [`Params`](crate::Params)：`key => value` 形式生成映射，否则生成序列。
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::Seq(::std::vec::Vec::new())
    };
    ($($key:literal => $value:expr),+ $(,)?) => {
        $crate::Params::Map(
            [$(($crate::ParamKey::from($key), $crate::SqlValue::from($value))),+]
                .into_iter()
                .collect(),
        )
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Params::Seq(::std::vec![$($crate::SqlValue::from($value)),+])
    };
}
