//! 三级优先模式链
//!
//! 模式按优先级排列，对一条归一化文本取首个命中的模式：
//!
//! 1. 恰好 18 位数字 + `_1_` + 恰好 3 位字母
//! 2. 15-20 位数字 + `_1` 标记，后缀 0-3 位字母（更长的字母串截断为 3 位）
//! 3. 仅 15-20 位数字（回退，无标记）
//!
//! 各模式取最左命中；长于模式上限的数字串允许截取其中一段，
//! 例如 19 位数字 + `_1_abc` 可截出末尾 18 位凑第一级模式。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::candidate::Candidate;

static EXACT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<digits>[0-9]{18})_1_(?P<suffix>[a-z]{3})")
        .expect("invalid exact waybill pattern")
});

static MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<digits>[0-9]{15,20})_1(?:_(?P<suffix>[a-z]{1,3}))?")
        .expect("invalid marker waybill pattern")
});

static FALLBACK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{15,20}").expect("invalid fallback waybill pattern"));

/// 按优先级取首个命中模式，构造候选
pub(super) fn match_first(text: &str) -> Option<Candidate> {
    if let Some(candidate) = match_exact(text) {
        return Some(candidate);
    }
    if let Some(candidate) = match_marker(text) {
        return Some(candidate);
    }
    match_fallback(text)
}

fn match_exact(text: &str) -> Option<Candidate> {
    for caps in EXACT_PATTERN.captures_iter(text) {
        if let (Some(m), Some(digits), Some(suffix)) =
            (caps.get(0), caps.name("digits"), caps.name("suffix"))
        {
            // 后缀必须恰好 3 位，后面再跟字母则交给下一级截断
            if next_is_letter(text, m.end()) {
                continue;
            }
            return Some(Candidate {
                digits: digits.as_str().to_string(),
                has_marker: true,
                suffix: Some(suffix.as_str().to_string()),
                raw_span: m.as_str().to_string(),
            });
        }
    }
    None
}

fn match_marker(text: &str) -> Option<Candidate> {
    let caps = MARKER_PATTERN.captures(text)?;
    let m = caps.get(0)?;
    let digits = caps.name("digits")?;
    let suffix = caps.name("suffix").map(|s| s.as_str().to_string());
    Some(Candidate {
        digits: digits.as_str().to_string(),
        has_marker: true,
        suffix,
        raw_span: m.as_str().to_string(),
    })
}

fn match_fallback(text: &str) -> Option<Candidate> {
    let m = FALLBACK_PATTERN.find(text)?;
    Some(Candidate {
        digits: m.as_str().to_string(),
        has_marker: false,
        suffix: None,
        raw_span: m.as_str().to_string(),
    })
}

fn next_is_letter(text: &str, end: usize) -> bool {
    text[end..]
        .chars()
        .next()
        .map(|c| c.is_ascii_lowercase())
        .unwrap_or(false)
}
