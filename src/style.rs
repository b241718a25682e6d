//! 参数风格注册表：进程启动后只读的风格描述表。

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::error::ParamsError;

/// 占位符种类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    /// 占位符携带标识符：`:name`、`%(name)s`。
    Named,
    /// 占位符携带显式序号：`:1`、`$1`。
    Numeric,
    /// 占位符不携带信息，位置由出现顺序决定：`?`、`%s`。
    Ordinal,
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Named => "named",
            Self::Numeric => "numeric",
            Self::Ordinal => "ordinal",
        };
        f.write_str(s)
    }
}

/// 一种参数风格的不可变描述。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterStyle {
    pub name: &'static str,
    pub kind: StyleKind,
    /// 默认转义字符。
    pub escape_char: &'static str,
    /// 转义片段模板，`{char}` 会被替换为实际使用的转义字符串。
    pub escape_regex: &'static str,
    /// 占位符正则；named / numeric 风格通过 `param` 分组捕获标识符或序号。
    pub param_regex: &'static str,
    /// 输出模板，`{param}` 会被替换为参数名或序号。
    pub out_format: &'static str,
    /// 第一个序号（numeric 风格为 1，其余为 0）。
    pub start: usize,
    /// 标识符的引号字符（Oracle 的 `"`）。
    pub quote_char: Option<char>,
    /// 未加引号的标识符是否折叠为大写后再匹配。
    pub case_fold: bool,
}

impl ParameterStyle {
    /// 按风格规则得到标识符的规范形式：
    /// 加引号的原样去引号，未加引号的在 `case_fold` 风格下转为大写。
    pub fn canonical_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if let Some(inner) = self.unquote(name) {
            return Cow::Borrowed(inner);
        }
        if self.case_fold {
            Cow::Owned(name.to_uppercase())
        } else {
            Cow::Borrowed(name)
        }
    }

    /// 若 `name` 被本风格的引号包裹，返回去掉引号后的内容。
    pub fn unquote<'a>(&self, name: &'a str) -> Option<&'a str> {
        let q = self.quote_char?;
        name.strip_prefix(q)
            .and_then(|s| s.strip_suffix(q))
            .filter(|inner| !inner.is_empty())
    }

    /// 生成一个输出占位符。
    pub fn format_param(&self, param: &str) -> String {
        self.out_format.replace("{param}", param)
    }

    pub(crate) fn escape_pattern(&self, escape_char: &str) -> String {
        self.escape_regex
            .replace("{char}", &fancy_regex::escape(escape_char))
    }
}

static STYLES: LazyLock<HashMap<&'static str, ParameterStyle>> = LazyLock::new(|| {
    let named = |name, escape_char, escape_regex, param_regex, out_format| ParameterStyle {
        name,
        kind: StyleKind::Named,
        escape_char,
        escape_regex,
        param_regex,
        out_format,
        start: 0,
        quote_char: None,
        case_fold: false,
    };
    let numeric = |name, escape_char, escape_regex, param_regex, out_format| ParameterStyle {
        name,
        kind: StyleKind::Numeric,
        escape_char,
        escape_regex,
        param_regex,
        out_format,
        start: 1,
        quote_char: None,
        case_fold: false,
    };
    let ordinal = |name, escape_char, escape_regex, param_regex, out_format| ParameterStyle {
        name,
        kind: StyleKind::Ordinal,
        escape_char,
        escape_regex,
        param_regex,
        out_format,
        start: 0,
        quote_char: None,
        case_fold: false,
    };

    let styles = [
        ordinal("format", "%", r"(?P<escape>{char}%)", r"(?<!%)%s", "%s"),
        named(
            "named",
            ":",
            r"(?P<escape>{char}:)",
            r"(?<!:):(?P<param>[A-Za-z_]\w*)",
            ":{param}",
        ),
        named(
            "named_dollar",
            "$",
            r"(?P<escape>{char}\$)",
            r"(?<!\$)\$(?P<param>[A-Za-z_]\w*)",
            "${param}",
        ),
        ParameterStyle {
            quote_char: Some('"'),
            case_fold: true,
            ..named(
                "named_oracle",
                ":",
                r"(?P<escape>{char}:)",
                r#"(?<!:):(?P<param>[A-Za-z_]\w*|"[^"]+")"#,
                ":{param}",
            )
        },
        named(
            "named_sqlserver",
            "@",
            r"(?P<escape>{char}@)",
            r"(?<!@)@(?P<param>[A-Za-z_]\w*)",
            "@{param}",
        ),
        numeric(
            "numeric",
            ":",
            r"(?P<escape>{char}:)",
            r"(?<!:):(?P<param>[0-9]+)",
            ":{param}",
        ),
        numeric(
            "numeric_dollar",
            "$",
            r"(?P<escape>{char}\$)",
            r"(?<!\$)\$(?P<param>[0-9]+)",
            "${param}",
        ),
        named(
            "pyformat",
            "%",
            r"(?P<escape>{char}%)",
            r"(?<!%)%\((?P<param>[A-Za-z_]\w*)\)s",
            "%({param})s",
        ),
        ordinal("qmark", "?", r"(?P<escape>{char}\?)", r"(?<!\?)\?(?!\?)", "?"),
    ];
    styles.into_iter().map(|s| (s.name, s)).collect()
});

/// 按名称查找参数风格。
pub fn lookup_style(name: &str) -> Result<&'static ParameterStyle, ParamsError> {
    STYLES
        .get(name)
        .ok_or_else(|| ParamsError::UnknownStyle(name.to_string()))
}

/// 所有已注册的风格名（按字母序）。
pub fn style_names() -> Vec<&'static str> {
    let mut names: Vec<_> = STYLES.keys().copied().collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::{StyleKind, lookup_style, style_names};
    use crate::error::ParamsError;
    use pretty_assertions::assert_eq;

    #[test]
    fn registry_has_all_styles() {
        assert_eq!(
            style_names(),
            vec![
                "format",
                "named",
                "named_dollar",
                "named_oracle",
                "named_sqlserver",
                "numeric",
                "numeric_dollar",
                "pyformat",
                "qmark",
            ]
        );
    }

    #[test]
    fn lookup_kinds() {
        let cases = vec![
            ("format", StyleKind::Ordinal, 0),
            ("qmark", StyleKind::Ordinal, 0),
            ("named", StyleKind::Named, 0),
            ("pyformat", StyleKind::Named, 0),
            ("numeric", StyleKind::Numeric, 1),
            ("numeric_dollar", StyleKind::Numeric, 1),
        ];
        for (name, kind, start) in cases {
            let style = lookup_style(name).unwrap();
            assert_eq!(style.kind, kind, "{name}");
            assert_eq!(style.start, start, "{name}");
        }
    }

    #[test]
    fn lookup_unknown() {
        assert_eq!(
            lookup_style("colon"),
            Err(ParamsError::UnknownStyle("colon".to_string()))
        );
    }

    #[test]
    fn canonical_name_folds_unquoted_only() {
        let oracle = lookup_style("named_oracle").unwrap();
        assert_eq!(oracle.canonical_name("race"), "RACE");
        assert_eq!(oracle.canonical_name("\"Name\""), "Name");
        assert_eq!(oracle.canonical_name("\""), "\"");

        let named = lookup_style("named").unwrap();
        assert_eq!(named.canonical_name("race"), "race");
        assert_eq!(named.canonical_name("\"x\""), "\"x\"");
    }

    #[test]
    fn unquote_requires_both_quotes() {
        let oracle = lookup_style("named_oracle").unwrap();
        assert_eq!(oracle.unquote("\"Name\""), Some("Name"));
        assert_eq!(oracle.unquote("Name"), None);
        assert_eq!(oracle.unquote("\"Name"), None);
        assert_eq!(oracle.unquote("\""), None);
        assert_eq!(lookup_style("named").unwrap().unquote("\"x\""), None);
    }

    #[test]
    fn format_param() {
        assert_eq!(
            lookup_style("pyformat").unwrap().format_param("id"),
            "%(id)s"
        );
        assert_eq!(lookup_style("numeric_dollar").unwrap().format_param("3"), "$3");
        assert_eq!(lookup_style("qmark").unwrap().format_param("3"), "?");
        assert_eq!(lookup_style("named_sqlserver").unwrap().format_param("a"), "@a");
    }

    #[test]
    fn escape_pattern_quotes_custom_char() {
        let named = lookup_style("named").unwrap();
        assert_eq!(named.escape_pattern(":"), r"(?P<escape>::)");
        assert_eq!(named.escape_pattern("\\"), r"(?P<escape>\\:)");
    }
}
