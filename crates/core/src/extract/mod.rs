//! 文本归一化与候选提取
//!
//! 对每条 OCR 原始文本先做归一化，再按优先级依次尝试三级模式；
//! 每条文本最多产出一个候选，无命中的文本（乱码、空串）静默跳过。

mod patterns;

use crate::candidate::Candidate;

/// 归一化 OCR 原始文本
///
/// - 去除所有空白字符
/// - 去除字母、数字、下划线之外的字符
/// - 字母统一转小写
/// - 连续下划线折叠为单个
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_underscore = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            continue;
        }
        let ch = ch.to_ascii_lowercase();
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            continue;
        }
        if ch == '_' {
            if prev_underscore {
                continue;
            }
            prev_underscore = true;
        } else {
            prev_underscore = false;
        }
        out.push(ch);
    }
    out
}

/// 从单条原始文本提取候选
///
/// 归一化后按优先级尝试模式，返回首个命中模式构造的候选。
pub fn extract_from_text(raw: &str) -> Option<Candidate> {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return None;
    }
    patterns::match_first(&normalized)
}

/// 批量提取：每条文本至多贡献一个候选，携带来源下标
pub fn collect<S: AsRef<str>>(texts: &[S]) -> Vec<(usize, Candidate)> {
    let mut found = Vec::new();
    for (idx, raw) in texts.iter().enumerate() {
        if let Some(candidate) = extract_from_text(raw.as_ref()) {
            log::debug!("[Extract] 文本 {} 命中: {}", idx, candidate.raw_span);
            found.push((idx, candidate));
        }
    }
    log::info!(
        "[Extract] {} 条文本中提取到 {} 个候选",
        texts.len(),
        found.len()
    );
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_whitespace_and_noise() {
        assert_eq!(
            normalize("1628 229522605835 52_1"),
            "162822952260583552_1"
        );
        assert_eq!(normalize("  ab\tc\n12!3#"), "abc123");
    }

    #[test]
    fn test_normalize_lowercases_letters() {
        assert_eq!(normalize("123_1_WNI"), "123_1_wni");
    }

    #[test]
    fn test_normalize_collapses_underscores() {
        assert_eq!(normalize("123__1___abc"), "123_1_abc");
        assert_eq!(normalize("1 _ 1 _ x"), "1_1_x");
    }

    #[test]
    fn test_extract_exact_pattern() {
        let c = extract_from_text("156387426414724544_1_wni").unwrap();
        assert_eq!(c.digits, "156387426414724544");
        assert!(c.has_marker);
        assert_eq!(c.suffix.as_deref(), Some("wni"));
    }

    #[test]
    fn test_extract_marker_without_suffix() {
        let c = extract_from_text("1628 229522605835 52_1").unwrap();
        assert_eq!(c.digits, "162822952260583552");
        assert!(c.has_marker);
        assert_eq!(c.suffix, None);
    }

    #[test]
    fn test_extract_marker_short_suffix() {
        let c = extract_from_text("164010403918364801_1_dx").unwrap();
        assert!(c.has_marker);
        assert_eq!(c.suffix.as_deref(), Some("dx"));
    }

    #[test]
    fn test_extract_suffix_truncated_to_three() {
        let c = extract_from_text("164010403918364801_1_abcde").unwrap();
        assert!(c.has_marker);
        assert_eq!(c.suffix.as_deref(), Some("abc"));
    }

    #[test]
    fn test_extract_fallback_digits_only() {
        let c = extract_from_text("164010403918364801").unwrap();
        assert!(!c.has_marker);
        assert_eq!(c.suffix, None);
        assert_eq!(c.digits, "164010403918364801");
    }

    #[test]
    fn test_extract_embedded_in_garbage() {
        let c = extract_from_text("xx*156387426414724544_1_wni*yy").unwrap();
        assert_eq!(c.digits, "156387426414724544");
        assert_eq!(c.suffix.as_deref(), Some("wni"));
    }

    #[test]
    fn test_extract_rejects_short_runs() {
        assert!(extract_from_text("12345").is_none());
        assert!(extract_from_text("garbage").is_none());
        assert!(extract_from_text("").is_none());
    }

    #[test]
    fn test_extract_carves_overlong_runs() {
        // 21 位数字串按回退模式上限截取前 20 位
        let c = extract_from_text("123456789012345678901").unwrap();
        assert!(!c.has_marker);
        assert_eq!(c.digits, "12345678901234567890");
    }

    #[test]
    fn test_collect_keeps_source_order() {
        let texts = ["noise", "156387426414724544_1_wni", "164010403918364801"];
        let found = collect(&texts);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].0, 1);
        assert_eq!(found[1].0, 2);
    }
}
