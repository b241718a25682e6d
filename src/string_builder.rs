//! 输出 SQL 的拼接工具。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            buf: String::with_capacity(n),
        }
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub(crate) fn write_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// 以 `sep` 连接 `items` 并写入。
    pub(crate) fn write_joined<S: AsRef<str>>(&mut self, items: &[S], sep: &str) {
        for (i, s) in items.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(sep);
            }
            self.buf.push_str(s.as_ref());
        }
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}

/// 把展开后的占位符组装成 `(a,b,c)`；空集合输出 `(NULL)`，保持 `IN (...)` 语法合法。
pub(crate) fn group_markers<S: AsRef<str>>(markers: &[S]) -> String {
    if markers.is_empty() {
        return "(NULL)".to_string();
    }
    let mut sb = StringBuilder::with_capacity(markers.len() * 4 + 2);
    sb.write_char('(');
    sb.write_joined(markers, ",");
    sb.write_char(')');
    sb.into_string()
}
