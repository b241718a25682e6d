//! ordinal 输入风格的三个转换器。

use crate::converter::{Converter, ConverterConfig, InRef, InView, ScanState};
use crate::error::ParamsError;
use crate::value::SqlValue;

/// ordinal 占位符没有标识，第 n 次出现即引用第 n 个参数。
fn resolve<'p>(
    config: &ConverterConfig,
    state: &mut ScanState,
    view: &InView<'p>,
) -> Result<(usize, InRef, &'p SqlValue), ParamsError> {
    let index = state.next_ordinal();
    let input = InRef::Index(index);
    let value = config.lookup(view, &input)?;
    Ok((index, input, value))
}

/// `?` => `:_0`，名字为 0 起始的出现序号。
#[derive(Debug, Clone)]
pub(crate) struct OrdinalToNamedConverter {
    pub(crate) config: ConverterConfig,
}

impl Converter for OrdinalToNamedConverter {
    fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn replace(
        &self,
        state: &mut ScanState,
        _param: &str,
        view: &InView<'_>,
    ) -> Result<String, ParamsError> {
        let (index, input, value) = resolve(&self.config, state, view)?;
        let name = format!("_{index}");
        Ok(self
            .config
            .emit_named(state, input, value, &name, |i| format!("_{index}_{i}")))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct OrdinalToNumericConverter {
    pub(crate) config: ConverterConfig,
}

impl Converter for OrdinalToNumericConverter {
    fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn replace(
        &self,
        state: &mut ScanState,
        _param: &str,
        view: &InView<'_>,
    ) -> Result<String, ParamsError> {
        let (_, input, value) = resolve(&self.config, state, view)?;
        Ok(self.config.emit_numeric(state, input, value))
    }
}

/// `%s` => `?`；值按出现顺序原样排列。
#[derive(Debug, Clone)]
pub(crate) struct OrdinalToOrdinalConverter {
    pub(crate) config: ConverterConfig,
}

impl Converter for OrdinalToOrdinalConverter {
    fn config(&self) -> &ConverterConfig {
        &self.config
    }

    fn replace(
        &self,
        state: &mut ScanState,
        _param: &str,
        view: &InView<'_>,
    ) -> Result<String, ParamsError> {
        let (_, input, value) = resolve(&self.config, state, view)?;
        Ok(self.config.emit_ordinal(state, input, value))
    }
}
