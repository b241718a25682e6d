//! 转换选项。

/// 转义字符配置。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EscapeChar {
    /// 不识别转义序列。
    #[default]
    Disabled,
    /// 使用输入风格自带的转义字符（`::`、`$$`、`%%`、`??`）。
    Default,
    /// 使用自定义转义字符串；空字符串等同于 `Disabled`。
    Custom(String),
}

impl EscapeChar {
    /// 解析为实际使用的转义字符串。
    pub(crate) fn resolve(&self, style_default: &'static str) -> Option<String> {
        match self {
            Self::Disabled => None,
            Self::Default => Some(style_default.to_string()),
            Self::Custom(s) if s.is_empty() => None,
            Self::Custom(s) => Some(s.clone()),
        }
    }
}

impl From<bool> for EscapeChar {
    fn from(v: bool) -> Self {
        if v { Self::Default } else { Self::Disabled }
    }
}

impl From<&str> for EscapeChar {
    fn from(v: &str) -> Self {
        Self::Custom(v.to_string())
    }
}

impl From<String> for EscapeChar {
    fn from(v: String) -> Self {
        Self::Custom(v)
    }
}

/// 一种注释语法。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentStyle {
    /// 单行注释，如 `--`。
    Line(String),
    /// 多行注释，如 `/*` … `*/`。
    Block(String, String),
}

impl CommentStyle {
    pub fn line(marker: impl Into<String>) -> Self {
        Self::Line(marker.into())
    }

    pub fn block(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::Block(start.into(), end.into())
    }
}

/// 默认剥离的注释：先多行 `/* */`，再单行 `--`。
pub fn default_comments() -> Vec<CommentStyle> {
    vec![CommentStyle::block("/*", "*/"), CommentStyle::line("--")]
}

/// 注释剥离配置。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StripComments {
    #[default]
    Disabled,
    /// 使用 [`default_comments`]。
    Default,
    Styles(Vec<CommentStyle>),
}

impl StripComments {
    pub(crate) fn resolve(&self) -> Option<Vec<CommentStyle>> {
        match self {
            Self::Disabled => None,
            Self::Default => Some(default_comments()),
            Self::Styles(styles) => Some(styles.clone()),
        }
    }
}

impl From<bool> for StripComments {
    fn from(v: bool) -> Self {
        if v { Self::Default } else { Self::Disabled }
    }
}

impl From<Vec<CommentStyle>> for StripComments {
    fn from(v: Vec<CommentStyle>) -> Self {
        Self::Styles(v)
    }
}

/// `SqlParams` 的构造选项。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub escape_char: EscapeChar,
    /// `None` 时：输出为 named 风格则不展开，否则展开。
    pub expand_tuples: Option<bool>,
    pub strip_comments: StripComments,
    /// 输出风格支持引号（如 `named_oracle`）时，是否给输出参数名加引号。
    pub allow_out_quotes: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_escape_char(mut self, escape_char: impl Into<EscapeChar>) -> Self {
        self.escape_char = escape_char.into();
        self
    }

    pub fn with_expand_tuples(mut self, expand: bool) -> Self {
        self.expand_tuples = Some(expand);
        self
    }

    pub fn with_strip_comments(mut self, strip: impl Into<StripComments>) -> Self {
        self.strip_comments = strip.into();
        self
    }

    pub fn with_allow_out_quotes(mut self, allow: bool) -> Self {
        self.allow_out_quotes = allow;
        self
    }
}
