//! 注释剥离：在扫描占位符之前移除整行注释。

use std::borrow::Cow;

use regex::Regex;

use crate::error::ParamsError;
use crate::options::CommentStyle;

#[derive(Debug, Clone, Default)]
pub(crate) struct CommentStripper {
    regexes: Vec<Regex>,
}

impl CommentStripper {
    /// 注释标记必须是所在行第一个非空白内容；行尾注释和行内注释保留。
    pub(crate) fn new(styles: &[CommentStyle]) -> Result<Self, ParamsError> {
        let regexes = styles
            .iter()
            .map(|style| {
                let pattern = match style {
                    CommentStyle::Line(marker) => {
                        format!(r"(?m)^[ \t]*{}.*(?:\n|\r\n)?", regex::escape(marker))
                    }
                    CommentStyle::Block(start, end) => format!(
                        r"(?ms)^[ \t]*{}.*?{}(?:\n|\r\n)?",
                        regex::escape(start),
                        regex::escape(end)
                    ),
                };
                Regex::new(&pattern)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { regexes })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.regexes.is_empty()
    }

    pub(crate) fn strip<'a>(&self, sql: &'a str) -> Cow<'a, str> {
        if self.is_empty() {
            return Cow::Borrowed(sql);
        }
        let mut out = Cow::Borrowed(sql);
        for re in &self.regexes {
            if re.is_match(&out) {
                out = Cow::Owned(re.replace_all(&out, "").into_owned());
            }
        }
        out
    }
}
