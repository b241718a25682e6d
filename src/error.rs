//! 转换过程中的错误类型。

/// 参数风格转换错误。
///
/// 所有错误都局限于一次 `format` / `format_many` 调用：要么整条 SQL 改写成功并返回完整参数，
/// 要么直接失败，不存在部分成功。
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("sqlparams: unknown parameter style {0:?}")]
    UnknownStyle(String),
    #[error("sqlparams: {context} was expected to be {expected}")]
    TypeMismatch {
        context: String,
        expected: &'static str,
    },
    #[error("sqlparams: {context} length was expected to be {expected}, got {actual}")]
    LengthMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },
    #[error("sqlparams: unresolved parameter reference {0}")]
    UnresolvedReference(String),
    #[error("sqlparams: many_params must contain at least one parameter set")]
    EmptyInput,
    #[error("sqlparams: character {0:?} cannot be encoded as a single byte")]
    Unencodable(char),
    #[error("sqlparams: invalid pattern: {0}")]
    Pattern(String),
}

impl From<fancy_regex::Error> for ParamsError {
    fn from(err: fancy_regex::Error) -> Self {
        Self::Pattern(err.to_string())
    }
}

impl From<regex::Error> for ParamsError {
    fn from(err: regex::Error) -> Self {
        Self::Pattern(err.to_string())
    }
}
