//! `SqlParams`：对外入口，负责编码归一、注释剥离与转换器分发。

use crate::comments::CommentStripper;
use crate::converter::{Converter, ConverterConfig, create_converter};
use crate::error::ParamsError;
use crate::flavor::Flavor;
use crate::options::{CommentStyle, Options};
use crate::params::Params;
use crate::scanner::Scanner;
use crate::style::{ParameterStyle, StyleKind, lookup_style};
use crate::text::SqlText;

/// 把一种占位符风格的 SQL 转换为另一种风格，同时重排参数。
///
/// ```
/// use halo_sqlparams::{SqlParams, params};
///
/// let query = SqlParams::new("named", "qmark").unwrap();
/// let (sql, args) = query
///     .format("SELECT * FROM users WHERE id = :id OR alt = :id", &params!["id" => 5])
///     .unwrap();
/// assert_eq!(sql, "SELECT * FROM users WHERE id = ? OR alt = ?");
/// assert_eq!(args, params![5, 5]);
/// ```
///
/// 实例构造后不可变，可在多个线程间共享使用。
#[derive(Debug, Clone)]
pub struct SqlParams {
    in_style: &'static ParameterStyle,
    out_style: &'static ParameterStyle,
    escape_char: Option<String>,
    expand_tuples: bool,
    allow_out_quotes: bool,
    strip_comments: Option<Vec<CommentStyle>>,
    stripper: CommentStripper,
    converter: Box<dyn Converter>,
}

impl SqlParams {
    /// 使用默认选项构造。
    pub fn new(in_style: &str, out_style: &str) -> Result<Self, ParamsError> {
        Self::with_options(in_style, out_style, Options::default())
    }

    pub fn with_options(
        in_style: &str,
        out_style: &str,
        options: Options,
    ) -> Result<Self, ParamsError> {
        let in_style = lookup_style(in_style)?;
        let out_style = lookup_style(out_style)?;

        let escape_char = options.escape_char.resolve(in_style.escape_char);
        let expand_tuples = options
            .expand_tuples
            .unwrap_or(out_style.kind != StyleKind::Named);
        let strip_comments = options.strip_comments.resolve();
        let stripper = CommentStripper::new(strip_comments.as_deref().unwrap_or_default())?;

        let scanner = Scanner::new(in_style, out_style, escape_char.as_deref())?;
        let converter = create_converter(ConverterConfig {
            scanner,
            in_style,
            out_style,
            expand_tuples,
            allow_out_quotes: options.allow_out_quotes,
        });

        tracing::debug!(
            in_style = in_style.name,
            out_style = out_style.name,
            escape_char = ?escape_char,
            expand_tuples,
            allow_out_quotes = options.allow_out_quotes,
            comment_styles = strip_comments.as_ref().map_or(0, Vec::len),
            "created sql parameter converter"
        );

        Ok(Self {
            in_style,
            out_style,
            escape_char,
            expand_tuples,
            allow_out_quotes: options.allow_out_quotes,
            strip_comments,
            stripper,
            converter,
        })
    }

    /// 以 `flavor` 驱动期望的风格作为输出风格。
    pub fn for_flavor(in_style: &str, flavor: Flavor, options: Options) -> Result<Self, ParamsError> {
        Self::with_options(in_style, flavor.param_style(), options)
    }

    /// 转换一条 SQL 与一组参数。
    ///
    /// named 输入风格要求 `Params::Map`；numeric / ordinal 输入风格接受 `Params::Seq`，
    /// 或以整数、数字字符串为键的 `Params::Map`（numeric 风格的键从 1 开始）。
    pub fn format<Q: SqlText>(&self, sql: Q, params: &Params) -> Result<(Q::Output, Params), ParamsError> {
        let text = sql.decode();
        let text = self.stripper.strip(&text);
        let (out_sql, out_params) = self.converter.convert(&text, params)?;
        Ok((Q::encode(out_sql)?, out_params))
    }

    /// 转换一条 SQL 与多组参数（用于 `executemany` 一类接口）。
    ///
    /// 只用第一组参数决定 SQL 的改写，包括每个 tuple 的展开长度；后续参数组中对应位置必须是等长 tuple。
    pub fn format_many<'p, Q, I>(&self, sql: Q, many_params: I) -> Result<(Q::Output, Vec<Params>), ParamsError>
    where
        Q: SqlText,
        I: IntoIterator<Item = &'p Params>,
    {
        let text = sql.decode();
        let text = self.stripper.strip(&text);
        let mut iter = many_params.into_iter();
        let (out_sql, out_params) = self.converter.convert_many(&text, &mut iter)?;
        Ok((Q::encode(out_sql)?, out_params))
    }

    pub fn in_style(&self) -> &'static str {
        self.in_style.name
    }

    pub fn out_style(&self) -> &'static str {
        self.out_style.name
    }

    /// 实际使用的转义字符，未启用时为 `None`。
    pub fn escape_char(&self) -> Option<&str> {
        self.escape_char.as_deref()
    }

    pub fn expand_tuples(&self) -> bool {
        self.expand_tuples
    }

    pub fn allow_out_quotes(&self) -> bool {
        self.allow_out_quotes
    }

    pub fn strip_comments(&self) -> Option<&[CommentStyle]> {
        self.strip_comments.as_deref()
    }

    /// 编译后的占位符正则。
    pub fn pattern(&self) -> &str {
        self.converter.config().scanner.pattern()
    }
}
