//! 占位符扫描器：把输入风格的占位符、转义序列和输出冲突字符合并为一条正则。

use fancy_regex::Regex;

use crate::error::ParamsError;
use crate::string_builder::StringBuilder;
use crate::style::ParameterStyle;

/// 编译好的扫描器，每个 `SqlParams` 持有一个。
#[derive(Debug, Clone)]
pub(crate) struct Scanner {
    regex: Regex,
    escape_start: usize,
}

impl Scanner {
    /// 按优先级组合：输出冲突的 `%`、转义序列（如启用）、输入占位符。
    pub(crate) fn new(
        in_style: &ParameterStyle,
        out_style: &ParameterStyle,
        escape_char: Option<&str>,
    ) -> Result<Self, ParamsError> {
        let mut groups = Vec::with_capacity(3);
        if in_style.escape_char != "%" && out_style.escape_char == "%" {
            groups.push("(?P<out_percent>%)".to_string());
        }
        if let Some(c) = escape_char {
            groups.push(in_style.escape_pattern(c));
        }
        groups.push(in_style.param_regex.to_string());

        let pattern = groups.join("|");
        let regex = Regex::new(&pattern)?;
        Ok(Self {
            regex,
            escape_start: escape_char.map_or(0, str::len),
        })
    }

    pub(crate) fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// 扫描 `sql`：冲突字符加倍、转义序列去掉转义前缀，参数交给 `resolve` 生成替换文本。
    ///
    /// `resolve` 收到 `param` 分组的内容；ordinal 风格没有该分组，收到整个匹配。
    pub(crate) fn replace<F>(&self, sql: &str, mut resolve: F) -> Result<String, ParamsError>
    where
        F: FnMut(&str) -> Result<String, ParamsError>,
    {
        let mut sb = StringBuilder::with_capacity(sql.len());
        let mut last = 0;
        for caps in self.regex.captures_iter(sql) {
            let caps = caps?;
            let Some(whole) = caps.get(0) else {
                continue;
            };
            sb.write_str(&sql[last..whole.start()]);
            if caps.name("out_percent").is_some() {
                sb.write_str("%%");
            } else if let Some(escape) = caps.name("escape") {
                sb.write_str(escape.as_str().get(self.escape_start..).unwrap_or_default());
            } else {
                let param = caps.name("param").map_or(whole.as_str(), |m| m.as_str());
                sb.write_str(&resolve(param)?);
            }
            last = whole.end();
        }
        sb.write_str(&sql[last..]);
        Ok(sb.into_string())
    }
}
