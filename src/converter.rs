//! 转换引擎：扫描一次 SQL 生成转换计划，再把计划回放到一个或多个参数集合上。
//!
//! 九个方向的转换器分布在 `from_named` / `from_numeric` / `from_ordinal` 中，
//! 它们只负责"如何解析一个输入占位符"；输出侧的槽位分配、去重与展开由本模块统一处理。

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use dyn_clone::DynClone;

use crate::error::ParamsError;
use crate::from_named::{NamedToNamedConverter, NamedToNumericConverter, NamedToOrdinalConverter};
use crate::from_numeric::{
    NumericToNamedConverter, NumericToNumericConverter, NumericToOrdinalConverter,
};
use crate::from_ordinal::{
    OrdinalToNamedConverter, OrdinalToNumericConverter, OrdinalToOrdinalConverter,
};
use crate::params::{ParamKey, Params};
use crate::scanner::Scanner;
use crate::string_builder::group_markers;
use crate::style::{ParameterStyle, StyleKind};
use crate::value::SqlValue;

/// 输入引用的身份：named 风格为规范化后的名字，numeric / ordinal 风格为 0 起始的位置。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum InRef {
    Name(String),
    /// 加引号的标识符（去掉引号），按原样匹配，不做大小写折叠。
    Quoted(String),
    Index(usize),
}

impl fmt::Display for InRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) | Self::Quoted(name) => write!(f, "{name:?}"),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// 输出槽位。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OutSlot {
    Name(String),
    Index(usize),
    /// ordinal 输出：按出现顺序追加。
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Conversion {
    Simple { input: InRef, output: OutSlot },
    Expanded { input: InRef, outputs: Vec<OutSlot> },
}

/// 一次扫描得到的转换计划。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ConversionPlan {
    pub(crate) conversions: Vec<Conversion>,
    pub(crate) out_len: usize,
}

/// 扫描过程中的累积状态，随每个匹配传入转换器。
#[derive(Debug, Default)]
pub(crate) struct ScanState {
    conversions: Vec<Conversion>,
    next_in: usize,
    next_out: usize,
    numbered: HashMap<(InRef, Option<usize>), usize>,
    expanded: HashSet<InRef>,
    named: HashSet<String>,
}

impl ScanState {
    /// ordinal 输入的下一个位置。
    pub(crate) fn next_ordinal(&mut self) -> usize {
        let i = self.next_in;
        self.next_in += 1;
        i
    }

    /// numeric 输出的槽位；已出现过的 `(引用, 元素下标)` 复用原槽位。
    fn number(&mut self, input: &InRef, element: Option<usize>) -> (usize, bool) {
        if let Some(&slot) = self.numbered.get(&(input.clone(), element)) {
            return (slot, false);
        }
        let slot = self.next_out;
        self.next_out += 1;
        self.numbered.insert((input.clone(), element), slot);
        (slot, true)
    }

    fn into_plan(self) -> ConversionPlan {
        ConversionPlan {
            conversions: self.conversions,
            out_len: self.next_out,
        }
    }
}

/// named 参数的两份索引：`folded` 供未加引号的占位符使用，`exact` 供加引号的占位符使用。
#[derive(Debug, Default)]
pub(crate) struct NameIndex<'p> {
    folded: HashMap<Cow<'p, str>, &'p SqlValue>,
    exact: HashMap<&'p str, &'p SqlValue>,
}

/// 一个参数集合的只读查找视图。
#[derive(Debug)]
pub(crate) enum InView<'p> {
    Named(NameIndex<'p>),
    Slice(&'p [SqlValue]),
    Indexed(HashMap<usize, &'p SqlValue>),
}

impl<'p> InView<'p> {
    /// named 风格要求映射；numeric / ordinal 风格接受序列或以整数、数字字符串为键的映射。
    pub(crate) fn new(
        style: &ParameterStyle,
        params: &'p Params,
        label: &str,
    ) -> Result<Self, ParamsError> {
        match (style.kind, params) {
            (StyleKind::Named, Params::Map(map)) => {
                let mut index = NameIndex::default();
                for (key, value) in map {
                    let Some(name) = key.as_name() else {
                        continue;
                    };
                    index.folded.entry(style.canonical_name(name)).or_insert(value);
                    if style.quote_char.is_some() {
                        let exact = style.unquote(name).unwrap_or(name);
                        index.exact.entry(exact).or_insert(value);
                    }
                }
                Ok(Self::Named(index))
            }
            (StyleKind::Named, Params::Seq(_)) => Err(ParamsError::TypeMismatch {
                context: label.to_string(),
                expected: "a mapping",
            }),
            (_, Params::Seq(values)) => Ok(Self::Slice(values)),
            (_, Params::Map(map)) => Ok(Self::Indexed(
                map.iter()
                    .filter_map(|(key, value)| key.position(style.start).map(|i| (i, value)))
                    .fold(HashMap::with_capacity(map.len()), |mut acc, (i, value)| {
                        acc.entry(i).or_insert(value);
                        acc
                    }),
            )),
        }
    }

    pub(crate) fn get(&self, input: &InRef) -> Option<&'p SqlValue> {
        match (self, input) {
            (Self::Named(index), InRef::Name(name)) => index.folded.get(name.as_str()).copied(),
            (Self::Named(index), InRef::Quoted(name)) => index.exact.get(name.as_str()).copied(),
            (Self::Slice(values), InRef::Index(i)) => values.get(*i),
            (Self::Indexed(values), InRef::Index(i)) => values.get(i).copied(),
            _ => None,
        }
    }
}

/// 输出参数的组装器。
enum OutBuilder {
    Map(BTreeMap<ParamKey, SqlValue>),
    Seq(Vec<SqlValue>),
}

impl OutBuilder {
    fn new(kind: StyleKind, len: usize) -> Self {
        match kind {
            StyleKind::Named => Self::Map(BTreeMap::new()),
            StyleKind::Numeric => Self::Seq(vec![SqlValue::Null; len]),
            StyleKind::Ordinal => Self::Seq(Vec::with_capacity(len)),
        }
    }

    fn put(&mut self, slot: &OutSlot, value: SqlValue) {
        match (self, slot) {
            (Self::Map(map), OutSlot::Name(name)) => {
                map.insert(ParamKey::Name(name.clone()), value);
            }
            (Self::Seq(values), OutSlot::Index(i)) => {
                if let Some(v) = values.get_mut(*i) {
                    *v = value;
                }
            }
            (Self::Seq(values), OutSlot::Next) => values.push(value),
            _ => {}
        }
    }

    fn finish(self) -> Params {
        match self {
            Self::Map(map) => Params::Map(map),
            Self::Seq(values) => Params::Seq(values),
        }
    }
}

impl ConversionPlan {
    /// 把计划回放到一个参数集合上。展开项要求该位置是 tuple 且长度与计划一致。
    pub(crate) fn apply(
        &self,
        view: &InView<'_>,
        out_kind: StyleKind,
        label: &str,
    ) -> Result<Params, ParamsError> {
        let mut out = OutBuilder::new(out_kind, self.out_len);
        for conversion in &self.conversions {
            match conversion {
                Conversion::Simple { input, output } => {
                    let value = view.get(input).ok_or_else(|| {
                        ParamsError::UnresolvedReference(format!("{label}[{input}]"))
                    })?;
                    out.put(output, value.clone());
                }
                Conversion::Expanded { input, outputs } => {
                    let value = view.get(input).ok_or_else(|| {
                        ParamsError::UnresolvedReference(format!("{label}[{input}]"))
                    })?;
                    let items = value.as_tuple().ok_or_else(|| ParamsError::TypeMismatch {
                        context: format!("{label}[{input}]"),
                        expected: "a tuple",
                    })?;
                    if items.len() != outputs.len() {
                        return Err(ParamsError::LengthMismatch {
                            context: format!("{label}[{input}]"),
                            expected: outputs.len(),
                            actual: items.len(),
                        });
                    }
                    for (slot, item) in outputs.iter().zip(items) {
                        out.put(slot, item.clone());
                    }
                }
            }
        }
        Ok(out.finish())
    }
}

/// 转换器共享的配置。
#[derive(Debug, Clone)]
pub(crate) struct ConverterConfig {
    pub(crate) scanner: Scanner,
    pub(crate) in_style: &'static ParameterStyle,
    pub(crate) out_style: &'static ParameterStyle,
    pub(crate) expand_tuples: bool,
    pub(crate) allow_out_quotes: bool,
}

impl ConverterConfig {
    pub(crate) fn lookup<'p>(
        &self,
        view: &InView<'p>,
        input: &InRef,
    ) -> Result<&'p SqlValue, ParamsError> {
        view.get(input)
            .ok_or_else(|| ParamsError::UnresolvedReference(input.to_string()))
    }

    fn expansion_len(&self, value: &SqlValue) -> Option<usize> {
        if !self.expand_tuples {
            return None;
        }
        value.as_tuple().map(<[SqlValue]>::len)
    }

    /// 输出名：允许引号时原样加引号，否则在 `case_fold` 风格下折叠为大写。
    pub(crate) fn out_name(&self, name: &str) -> String {
        match self.out_style.quote_char {
            Some(q) if self.allow_out_quotes => format!("{q}{name}{q}"),
            _ if self.out_style.case_fold => name.to_uppercase(),
            _ => name.to_string(),
        }
    }

    fn numeric_marker(&self, slot: usize) -> String {
        self.out_style
            .format_param(&(slot + self.out_style.start).to_string())
    }

    /// named 输出：同一输出名只记录一次，重复引用直接复用名字。
    pub(crate) fn emit_named(
        &self,
        state: &mut ScanState,
        input: InRef,
        value: &SqlValue,
        name: &str,
        element: impl Fn(usize) -> String,
    ) -> String {
        let is_new = state.named.insert(self.out_name(name));
        match self.expansion_len(value) {
            Some(len) => {
                let names: Vec<String> = (0..len).map(|i| self.out_name(&element(i))).collect();
                let markers: Vec<String> = names
                    .iter()
                    .map(|n| self.out_style.format_param(n))
                    .collect();
                if is_new {
                    state.conversions.push(Conversion::Expanded {
                        input,
                        outputs: names.into_iter().map(OutSlot::Name).collect(),
                    });
                }
                group_markers(&markers)
            }
            None => {
                let out = self.out_name(name);
                let marker = self.out_style.format_param(&out);
                if is_new {
                    state.conversions.push(Conversion::Simple {
                        input,
                        output: OutSlot::Name(out),
                    });
                }
                marker
            }
        }
    }

    /// numeric 输出：同一引用（及其 tuple 元素）复用首次分配的序号。
    pub(crate) fn emit_numeric(&self, state: &mut ScanState, input: InRef, value: &SqlValue) -> String {
        match self.expansion_len(value) {
            Some(len) => {
                let slots: Vec<usize> = (0..len).map(|i| state.number(&input, Some(i)).0).collect();
                let markers: Vec<String> = slots.iter().map(|&s| self.numeric_marker(s)).collect();
                if state.expanded.insert(input.clone()) {
                    state.conversions.push(Conversion::Expanded {
                        input,
                        outputs: slots.into_iter().map(OutSlot::Index).collect(),
                    });
                }
                group_markers(&markers)
            }
            None => {
                let (slot, is_new) = state.number(&input, None);
                if is_new {
                    state.conversions.push(Conversion::Simple {
                        input,
                        output: OutSlot::Index(slot),
                    });
                }
                self.numeric_marker(slot)
            }
        }
    }

    /// ordinal 输出：每次出现都追加一份值。
    pub(crate) fn emit_ordinal(&self, state: &mut ScanState, input: InRef, value: &SqlValue) -> String {
        let marker = self.out_style.format_param("");
        match self.expansion_len(value) {
            Some(len) => {
                state.next_out += len;
                state.conversions.push(Conversion::Expanded {
                    input,
                    outputs: vec![OutSlot::Next; len],
                });
                group_markers(&vec![marker; len])
            }
            None => {
                state.next_out += 1;
                state.conversions.push(Conversion::Simple {
                    input,
                    output: OutSlot::Next,
                });
                marker
            }
        }
    }
}

/// 一个方向的转换器。
pub(crate) trait Converter: DynClone + fmt::Debug + Send + Sync {
    fn config(&self) -> &ConverterConfig;

    /// 解析一个输入占位符，返回替换文本并把转换记录写入 `state`。
    fn replace(
        &self,
        state: &mut ScanState,
        param: &str,
        view: &InView<'_>,
    ) -> Result<String, ParamsError>;

    fn scan(&self, sql: &str, view: &InView<'_>) -> Result<(String, ConversionPlan), ParamsError> {
        let mut state = ScanState::default();
        let out_sql = self
            .config()
            .scanner
            .replace(sql, |param| self.replace(&mut state, param, view))?;
        Ok((out_sql, state.into_plan()))
    }

    fn convert(&self, sql: &str, params: &Params) -> Result<(String, Params), ParamsError> {
        let config = self.config();
        let view = InView::new(config.in_style, params, "params")?;
        let (out_sql, plan) = self.scan(sql, &view)?;
        let out_params = plan.apply(&view, config.out_style.kind, "params")?;
        tracing::trace!(
            in_style = config.in_style.name,
            out_style = config.out_style.name,
            conversions = plan.conversions.len(),
            "converted query"
        );
        Ok((out_sql, out_params))
    }

    /// 只用第一组参数扫描 SQL，然后把同一计划回放到每一组参数。
    fn convert_many<'p>(
        &self,
        sql: &str,
        many_params: &mut dyn Iterator<Item = &'p Params>,
    ) -> Result<(String, Vec<Params>), ParamsError> {
        let config = self.config();
        let first = many_params.next().ok_or(ParamsError::EmptyInput)?;
        let view = InView::new(config.in_style, first, "many_params[0]")?;
        let (out_sql, plan) = self.scan(sql, &view)?;

        let mut out_params = vec![plan.apply(&view, config.out_style.kind, "many_params[0]")?];
        for (i, params) in many_params.enumerate() {
            let label = format!("many_params[{}]", i + 1);
            let view = InView::new(config.in_style, params, &label)?;
            out_params.push(plan.apply(&view, config.out_style.kind, &label)?);
        }
        tracing::trace!(
            in_style = config.in_style.name,
            out_style = config.out_style.name,
            conversions = plan.conversions.len(),
            rows = out_params.len(),
            "converted query for many parameter sets"
        );
        Ok((out_sql, out_params))
    }
}

dyn_clone::clone_trait_object!(Converter);

/// 按 (输入种类, 输出种类) 选择转换器。
pub(crate) fn create_converter(config: ConverterConfig) -> Box<dyn Converter> {
    match (config.in_style.kind, config.out_style.kind) {
        (StyleKind::Named, StyleKind::Named) => Box::new(NamedToNamedConverter { config }),
        (StyleKind::Named, StyleKind::Numeric) => Box::new(NamedToNumericConverter { config }),
        (StyleKind::Named, StyleKind::Ordinal) => Box::new(NamedToOrdinalConverter { config }),
        (StyleKind::Numeric, StyleKind::Named) => Box::new(NumericToNamedConverter { config }),
        (StyleKind::Numeric, StyleKind::Numeric) => Box::new(NumericToNumericConverter { config }),
        (StyleKind::Numeric, StyleKind::Ordinal) => Box::new(NumericToOrdinalConverter { config }),
        (StyleKind::Ordinal, StyleKind::Named) => Box::new(OrdinalToNamedConverter { config }),
        (StyleKind::Ordinal, StyleKind::Numeric) => Box::new(OrdinalToNumericConverter { config }),
        (StyleKind::Ordinal, StyleKind::Ordinal) => Box::new(OrdinalToOrdinalConverter { config }),
    }
}

#[cfg(test)]
mod tests {
    use super::{Conversion, ConverterConfig, InRef, InView, OutSlot, ScanState};
    use crate::params::Params;
    use crate::scanner::Scanner;
    use crate::style::lookup_style;
    use crate::value::{SqlValue, tuple};
    use crate::{ParamsError, params};
    use pretty_assertions::assert_eq;

    fn config(in_style: &str, out_style: &str) -> ConverterConfig {
        let in_style = lookup_style(in_style).unwrap();
        let out_style = lookup_style(out_style).unwrap();
        ConverterConfig {
            scanner: Scanner::new(in_style, out_style, None).unwrap(),
            in_style,
            out_style,
            expand_tuples: true,
            allow_out_quotes: false,
        }
    }

    #[test]
    fn numeric_view_accepts_sequence_and_keys() {
        let style = lookup_style("numeric").unwrap();
        let seq = params!["a", "b"];
        let keyed = params![1 => "a", "2" => "b", "x" => "ignored"];
        for p in [&seq, &keyed] {
            let view = InView::new(style, p, "params").unwrap();
            assert_eq!(view.get(&InRef::Index(0)), Some(&SqlValue::from("a")));
            assert_eq!(view.get(&InRef::Index(1)), Some(&SqlValue::from("b")));
            assert_eq!(view.get(&InRef::Index(2)), None);
        }
    }

    #[test]
    fn named_view_rejects_sequence() {
        let style = lookup_style("named").unwrap();
        let err = InView::new(style, &params![1], "params").unwrap_err();
        assert_eq!(
            err,
            ParamsError::TypeMismatch {
                context: "params".to_string(),
                expected: "a mapping",
            }
        );
    }

    #[test]
    fn oracle_view_folds_keys() {
        let style = lookup_style("named_oracle").unwrap();
        let p = params!["id" => 1, "\"Name\"" => "x"];
        let view = InView::new(style, &p, "params").unwrap();
        assert_eq!(view.get(&InRef::Name("ID".into())), Some(&SqlValue::I64(1)));
        assert_eq!(view.get(&InRef::Name("Name".into())), Some(&SqlValue::from("x")));
        assert_eq!(view.get(&InRef::Name("id".into())), None);
        assert_eq!(view.get(&InRef::Quoted("Name".into())), Some(&SqlValue::from("x")));
        assert_eq!(view.get(&InRef::Quoted("id".into())), Some(&SqlValue::I64(1)));
        assert_eq!(view.get(&InRef::Quoted("ID".into())), None);
    }

    #[test]
    fn oracle_view_keeps_exact_keys_for_quoted_lookups() {
        let style = lookup_style("named_oracle").unwrap();
        let p = params!["Name" => "x"];
        let view = InView::new(style, &p, "params").unwrap();
        assert_eq!(view.get(&InRef::Quoted("Name".into())), Some(&SqlValue::from("x")));
        assert_eq!(view.get(&InRef::Name("NAME".into())), Some(&SqlValue::from("x")));
        assert_eq!(view.get(&InRef::Quoted("NAME".into())), None);

        let named = lookup_style("named").unwrap();
        let view = InView::new(named, &p, "params").unwrap();
        assert_eq!(view.get(&InRef::Quoted("Name".into())), None);
    }

    #[test]
    fn oracle_out_name_folds_unless_quoted() {
        let mut cfg = config("named", "named_oracle");
        assert_eq!(cfg.out_name("id"), "ID");
        assert_eq!(cfg.out_name("_1"), "_1");
        cfg.allow_out_quotes = true;
        assert_eq!(cfg.out_name("id"), "\"id\"");

        let mut named = config("named_oracle", "named");
        named.allow_out_quotes = true;
        assert_eq!(named.out_name("id"), "id");
    }

    #[test]
    fn numeric_slots_are_reused() {
        let cfg = config("named", "numeric");
        let mut state = ScanState::default();
        let one = SqlValue::I64(1);
        let ids = tuple([1_i64, 2]);
        assert_eq!(cfg.emit_numeric(&mut state, InRef::Name("a".into()), &one), ":1");
        assert_eq!(cfg.emit_numeric(&mut state, InRef::Name("ids".into()), &ids), "(:2,:3)");
        assert_eq!(cfg.emit_numeric(&mut state, InRef::Name("a".into()), &one), ":1");
        assert_eq!(cfg.emit_numeric(&mut state, InRef::Name("ids".into()), &ids), "(:2,:3)");

        let plan = state.into_plan();
        assert_eq!(plan.out_len, 3);
        assert_eq!(
            plan.conversions,
            vec![
                Conversion::Simple {
                    input: InRef::Name("a".into()),
                    output: OutSlot::Index(0),
                },
                Conversion::Expanded {
                    input: InRef::Name("ids".into()),
                    outputs: vec![OutSlot::Index(1), OutSlot::Index(2)],
                },
            ]
        );
    }

    #[test]
    fn plan_apply_checks_tuple_shape() {
        let cfg = config("named", "qmark");
        let mut state = ScanState::default();
        let first = params!["ids" => tuple([1_i64, 2])];
        let view = InView::new(cfg.in_style, &first, "many_params[0]").unwrap();
        let value = cfg.lookup(&view, &InRef::Name("ids".into())).unwrap();
        assert_eq!(
            cfg.emit_ordinal(&mut state, InRef::Name("ids".into()), value),
            "(?,?)"
        );
        let plan = state.into_plan();

        let short = params!["ids" => tuple([1_i64])];
        let view = InView::new(cfg.in_style, &short, "many_params[1]").unwrap();
        assert_eq!(
            plan.apply(&view, cfg.out_style.kind, "many_params[1]"),
            Err(ParamsError::LengthMismatch {
                context: "many_params[1][\"ids\"]".to_string(),
                expected: 2,
                actual: 1,
            })
        );

        let scalar = params!["ids" => 5];
        let view = InView::new(cfg.in_style, &scalar, "many_params[2]").unwrap();
        assert_eq!(
            plan.apply(&view, cfg.out_style.kind, "many_params[2]"),
            Err(ParamsError::TypeMismatch {
                context: "many_params[2][\"ids\"]".to_string(),
                expected: "a tuple",
            })
        );

        let ok = params!["ids" => tuple([7_i64, 8])];
        let view = InView::new(cfg.in_style, &ok, "many_params[3]").unwrap();
        assert_eq!(
            plan.apply(&view, cfg.out_style.kind, "many_params[3]"),
            Ok(Params::Seq(vec![SqlValue::I64(7), SqlValue::I64(8)]))
        );
    }
}
