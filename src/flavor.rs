//! 数据库方言（Flavor）：决定驱动期望的占位符风格。

use std::fmt;

/// 占位符风格各不相同的数据库方言。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    #[default]
    MySQL,
    PostgreSQL,
    SQLite,
    SQLServer,
    Oracle,
}

impl Flavor {
    /// 该方言驱动所期望的输出风格名。
    pub fn param_style(self) -> &'static str {
        match self {
            Self::MySQL | Self::SQLite => "qmark",
            Self::PostgreSQL => "numeric_dollar",
            Self::SQLServer => "named_sqlserver",
            Self::Oracle => "named_oracle",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MySQL => "MySQL",
            Self::PostgreSQL => "PostgreSQL",
            Self::SQLite => "SQLite",
            Self::SQLServer => "SQLServer",
            Self::Oracle => "Oracle",
        };
        f.write_str(s)
    }
}
