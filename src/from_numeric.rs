//! numeric 输入风格的三个转换器。

use crate::converter::{Converter, ConverterConfig, InRef, InView, ScanState};
use crate::error::ParamsError;
use crate::value::SqlValue;

/// 解析 numeric 占位符：序号减去起始值得到 0 起始的位置。低于起始值的序号（如 `:0`）无法解析。
fn resolve<'p>(
    config: &ConverterConfig,
    param: &str,
    view: &InView<'p>,
) -> Result<(usize, InRef, &'p SqlValue), ParamsError> {
    let index = param
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(config.in_style.start))
        .ok_or_else(|| ParamsError::UnresolvedReference(config.in_style.format_param(param)))?;
    let input = InRef::Index(index);
    let value = config.lookup(view, &input)?;
    Ok((index, input, value))
}

/// `:1` => `:_1`；名字取解析后的序号，`:01` 与 `:1` 共用 `_1`。
#[derive(Debug, Clone)]
pub(crate) struct NumericToNamedConverter {
    pub(crate) config: ConverterConfig,
}

impl Converter for NumericToNamedConverter {
    fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn replace(
        &self,
        state: &mut ScanState,
        param: &str,
        view: &InView<'_>,
    ) -> Result<String, ParamsError> {
        let (index, input, value) = resolve(&self.config, param, view)?;
        let number = index + self.config.in_style.start;
        let name = format!("_{number}");
        Ok(self
            .config
            .emit_named(state, input, value, &name, |i| format!("_{number}_{i}")))
    }
}

/// `:2 … :1` => `$1 … $2`，按首次出现重新编号。
#[derive(Debug, Clone)]
pub(crate) struct NumericToNumericConverter {
    pub(crate) config: ConverterConfig,
}

impl Converter for NumericToNumericConverter {
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

#[derive(Debug, Clone)]
pub(crate) struct NumericToOrdinalConverter {
    pub(crate) config: ConverterConfig,
}

impl Converter for NumericToOrdinalConverter {
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
