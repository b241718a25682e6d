//! halo-sqlparams：在 named / numeric / ordinal 占位符风格之间转换 SQL 查询与参数。

pub mod comments;
pub mod converter;
pub mod error;
pub mod flavor;
#[cfg(test)]
mod flavor_tests;
pub mod from_named;
pub mod from_numeric;
pub mod from_ordinal;
pub mod macros;
#[cfg(test)]
mod macros_tests;
pub mod options;
pub mod params;
pub mod scanner;
pub mod sql_params;
pub mod string_builder;
pub mod style;
pub mod text;
pub mod value;

pub use crate::error::ParamsError;
pub use crate::flavor::Flavor;
pub use crate::options::{CommentStyle, EscapeChar, Options, StripComments, default_comments};
pub use crate::params::{ParamKey, Params};
pub use crate::sql_params::SqlParams;
pub use crate::style::{ParameterStyle, StyleKind, lookup_style, style_names};
pub use crate::text::{SqlText, decode_latin1, encode_latin1};
pub use crate::value::{SqlValue, array, tuple};
