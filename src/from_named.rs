//! named 输入风格的三个转换器。

use crate::converter::{Converter, ConverterConfig, InRef, InView, ScanState};
use crate::error::ParamsError;
use crate::value::SqlValue;

/// 解析 named 占位符：加引号的名字去引号后按原样查找，其余按输入风格规范化后查找。
fn resolve<'p>(
    config: &ConverterConfig,
    param: &str,
    view: &InView<'p>,
) -> Result<(String, InRef, &'p SqlValue), ParamsError> {
    let (name, input) = match config.in_style.unquote(param) {
        Some(inner) => (inner.to_string(), InRef::Quoted(inner.to_string())),
        None => {
            let name = config.in_style.canonical_name(param).into_owned();
            (name.clone(), InRef::Name(name))
        }
    };
    let value = config.lookup(view, &input)?;
    Ok((name, input, value))
}

/// `:name` => `%(name)s`；tuple 元素命名为 `name__0_sqlp`、`name__1_sqlp`……
#[derive(Debug, Clone)]
pub(crate) struct NamedToNamedConverter {
    pub(crate) config: ConverterConfig,
}

impl Converter for NamedToNamedConverter {
    fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn replace(
        &self,
        state: &mut ScanState,
        param: &str,
        view: &InView<'_>,
    ) -> Result<String, ParamsError> {
        let (name, input, value) = resolve(&self.config, param, view)?;
        Ok(self
            .config
            .emit_named(state, input, value, &name, |i| format!("{name}__{i}_sqlp")))
    }
}

/// `:name` => `$1`
#[derive(Debug, Clone)]
pub(crate) struct NamedToNumericConverter {
    pub(crate) config: ConverterConfig,
}

impl Converter for NamedToNumericConverter {
    fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn replace(
        &self,
        state: &mut ScanState,
        param: &str,
        view: &InView<'_>,
    ) -> Result<String, ParamsError> {
        let (_, input, value) = resolve(&self.config, param, view)?;
        Ok(self.config.emit_numeric(state, input, value))
    }
}

/// `:name` => `?`
#[derive(Debug, Clone)]
pub(crate) struct NamedToOrdinalConverter {
    pub(crate) config: ConverterConfig,
}

impl Converter for NamedToOrdinalConverter {
    fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn replace(
        &self,
        state: &mut ScanState,
        param: &str,
        view: &InView<'_>,
    ) -> Result<String, ParamsError> {
        let (_, input, value) = resolve(&self.config, param, view)?;
        Ok(self.config.emit_ordinal(state, input, value))
    }
}
