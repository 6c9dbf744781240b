//! Envelope Body
//!
//! 统一 JSON 响应体结构与输出格式化

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::error::EnvelopeError;

/// 美化输出的缩进
const PRETTY_INDENT: &[u8] = b"    ";

/// 统一响应体
///
/// 字段按字母序声明，输出键顺序固定为 code, data, error, paging, success。
#[derive(Debug, Serialize)]
pub(crate) struct Body<'a, T: Serialize> {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging<'a>>,
    pub success: bool,
}

/// 分页游标
#[derive(Debug, Serialize)]
pub(crate) struct Paging<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<&'a str>,
}

impl<'a> Paging<'a> {
    /// 两个游标都为空时返回 None
    pub fn from_cursors(next: &'a str, prev: &'a str) -> Option<Self> {
        if next.is_empty() && prev.is_empty() {
            return None;
        }
        Some(Self {
            next: non_empty(next),
            prev: non_empty(prev),
        })
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// 以 4 空格缩进序列化
pub(crate) fn to_pretty_vec<S: Serialize>(value: &S) -> Result<Vec<u8>, EnvelopeError> {
    let mut out = Vec::with_capacity(128);
    let formatter = PrettyFormatter::with_indent(PRETTY_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;
    Ok(out)
}

/// 将 `\u003c` `\u003e` `\u0026` 还原为 `<` `>` `&`
///
/// 只处理这三个转义；被转义的反斜杠（`\\u003c` 字面文本）保持不变。
pub fn unescape_html(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        let b = input[i];
        if b != b'\\' {
            out.push(b);
            i += 1;
            continue;
        }

        if let Some(literal) = input.get(i + 1..i + 6).and_then(html_escape) {
            out.push(literal);
            i += 6;
        } else {
            // 其它转义原样复制（包括转义的反斜杠本身）
            out.push(b);
            if let Some(&next) = input.get(i + 1) {
                out.push(next);
            }
            i += 2;
        }
    }

    out
}

fn html_escape(seq: &[u8]) -> Option<u8> {
    match seq {
        b"u003c" => Some(b'<'),
        b"u003e" => Some(b'>'),
        b"u0026" => Some(b'&'),
        _ => None,
    }
}
