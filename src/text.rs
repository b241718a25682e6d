//! 查询文本的编码归一：字符串原样处理，字节串按 latin-1 逐字节映射后处理再还原。

use std::borrow::Cow;

use crate::error::ParamsError;

/// 可作为查询文本的类型。
pub trait SqlText {
    /// 转换后返回的查询类型。
    type Output;

    fn decode(&self) -> Cow<'_, str>;

    fn encode(sql: String) -> Result<Self::Output, ParamsError>;
}

impl SqlText for &str {
    type Output = String;

    fn decode(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    fn encode(sql: String) -> Result<String, ParamsError> {
        Ok(sql)
    }
}

impl SqlText for String {
    type Output = String;

    fn decode(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    fn encode(sql: String) -> Result<String, ParamsError> {
        Ok(sql)
    }
}

impl SqlText for &String {
    type Output = String;

    fn decode(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }

    fn encode(sql: String) -> Result<String, ParamsError> {
        Ok(sql)
    }
}

impl SqlText for &[u8] {
    type Output = Vec<u8>;

    fn decode(&self) -> Cow<'_, str> {
        Cow::Owned(decode_latin1(self))
    }

    fn encode(sql: String) -> Result<Vec<u8>, ParamsError> {
        encode_latin1(&sql)
    }
}

impl<const N: usize> SqlText for &[u8; N] {
    type Output = Vec<u8>;

    fn decode(&self) -> Cow<'_, str> {
        Cow::Owned(decode_latin1(&self[..]))
    }

    fn encode(sql: String) -> Result<Vec<u8>, ParamsError> {
        encode_latin1(&sql)
    }
}

impl SqlText for Vec<u8> {
    type Output = Vec<u8>;

    fn decode(&self) -> Cow<'_, str> {
        Cow::Owned(decode_latin1(self))
    }

    fn encode(sql: String) -> Result<Vec<u8>, ParamsError> {
        encode_latin1(&sql)
    }
}

/// 每个字节映射为同码位的字符（U+0000..=U+00FF）。
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// `decode_latin1` 的逆操作；码位超出 U+00FF 的字符无法编码。
pub fn encode_latin1(s: &str) -> Result<Vec<u8>, ParamsError> {
    s.chars()
        .map(|c| u8::try_from(c).map_err(|_| ParamsError::Unencodable(c)))
        .collect()
}
