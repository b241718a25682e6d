#[cfg(test)]
mod tests {
    use crate::flavor::Flavor;
    use crate::style::{StyleKind, lookup_style};
    use crate::{Options, SqlParams, params};
    use pretty_assertions::assert_eq;

    #[test]
    fn flavor_display() {
        let cases = vec![
            (Flavor::MySQL, "MySQL"),
            (Flavor::PostgreSQL, "PostgreSQL"),
            (Flavor::SQLServer, "SQLServer"),
            (Flavor::SQLite, "SQLite"),
            (Flavor::Oracle, "Oracle"),
        ];

        for (f, expected) in cases {
            assert_eq!(f.to_string(), expected);
        }
    }

    #[test]
    fn flavor_param_style_resolves() {
        let cases = vec![
            (Flavor::MySQL, "qmark", StyleKind::Ordinal),
            (Flavor::SQLite, "qmark", StyleKind::Ordinal),
            (Flavor::PostgreSQL, "numeric_dollar", StyleKind::Numeric),
            (Flavor::SQLServer, "named_sqlserver", StyleKind::Named),
            (Flavor::Oracle, "named_oracle", StyleKind::Named),
        ];

        for (f, name, kind) in cases {
            let style = lookup_style(f.param_style()).unwrap();
            assert_eq!(style.name, name);
            assert_eq!(style.kind, kind);
        }
    }

    #[test]
    fn for_flavor_postgres() {
        let query = SqlParams::for_flavor("named", Flavor::PostgreSQL, Options::new()).unwrap();
        let (sql, out) = query
            .format(
                "SELECT * FROM t WHERE a = :a AND b = :b OR a2 = :a",
                &params!["a" => 1, "b" => "x"],
            )
            .unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE a = $1 AND b = $2 OR a2 = $1");
        assert_eq!(out, params![1, "x"]);
    }

    #[test]
    fn for_flavor_oracle() {
        let query = SqlParams::for_flavor("pyformat", Flavor::Oracle, Options::new()).unwrap();
        assert_eq!(query.out_style(), "named_oracle");
        let (sql, out) = query
            .format("SELECT * FROM t WHERE id = %(id)s", &params!["id" => 9])
            .unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE id = :ID");
        assert_eq!(out, params!["ID" => 9]);
    }

    #[test]
    fn for_flavor_sqlserver() {
        let query = SqlParams::for_flavor("qmark", Flavor::SQLServer, Options::new()).unwrap();
        let (sql, out) = query
            .format("UPDATE t SET a = ? WHERE id = ?", &params!["x", 4])
            .unwrap();
        assert_eq!(sql, "UPDATE t SET a = @_0 WHERE id = @_1");
        assert_eq!(out, params!["_0" => "x", "_1" => 4]);
    }
}
