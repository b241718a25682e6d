#[cfg(test)]
mod tests {
    use crate::{ParamKey, Params, SqlValue, params, tuple};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn params_macro_named() {
        let p = params!["id" => 4, "names" => tuple(["a", "b"]), "none" => Option::<i64>::None];
        let mut want = BTreeMap::new();
        want.insert(ParamKey::from("id"), SqlValue::I64(4));
        want.insert(
            ParamKey::from("names"),
            SqlValue::Tuple(vec!["a".into(), "b".into()]),
        );
        want.insert(ParamKey::from("none"), SqlValue::Null);
        assert_eq!(p, Params::Map(want));
    }

    #[test]
    fn params_macro_positional() {
        let name = "Fili";
        assert_eq!(
            params![4, name, 1.5_f64],
            Params::Seq(vec![SqlValue::I64(4), "Fili".into(), SqlValue::F64(1.5)])
        );
        assert_eq!(params![], Params::Seq(Vec::new()));
    }

    #[test]
    fn params_macro_indexed() {
        let p = params![2 => "b", 1 => "a", "3" => "c"];
        assert_eq!(p.get(&ParamKey::Index(1)), Some(&SqlValue::from("a")));
        assert_eq!(p.get(&ParamKey::Index(2)), Some(&SqlValue::from("b")));
        assert_eq!(p.get_name("3"), Some(&SqlValue::from("c")));
    }
}
