//! ETag
//!
//! 基于响应体 md5 的缓存校验值（速度优先，不用于安全场景）

/// 计算响应体指纹，格式为带引号的十六进制串
pub fn fingerprint(body: &[u8]) -> String {
    let digest = md5::compute(body);
    format!("\"{:x}\"", digest)
}

/// If-None-Match 与 ETag 逐字节比较
pub fn matches(if_none_match: Option<&str>, etag: &str) -> bool {
    match if_none_match {
        Some(candidate) if !candidate.is_empty() => candidate == etag,
        _ => false,
    }
}
