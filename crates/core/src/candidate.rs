//! 候选运单号数据模型
//!
//! 候选由三段构成：数字段（15-20 位）、`_1` 标记段、字母后缀段（0-3 位）。
//! 所有候选都在一次提取调用内创建和销毁，不跨调用持有。

use serde::{Deserialize, Serialize};

/// 候选运单号
///
/// 从单条 OCR 文本中按模式匹配得到的结构化结果。
/// 不变式：`digits` 仅含十进制数字且非空；`suffix` 若存在则为小写字母，
/// 长度不超过 3。两者均由模式匹配保证。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// 数字段
    pub digits: String,
    /// 数字段之后是否识别到 `_1` / `_1_` 标记
    pub has_marker: bool,
    /// 字母后缀（小写）
    pub suffix: Option<String>,
    /// 命中的原始片段，仅用于调试与日志
    pub raw_span: String,
}

impl Candidate {
    /// 渲染为规范输出形式
    ///
    /// - 有后缀：`digits_1_suffix`
    /// - 无后缀：`digits_1`
    ///
    /// 无标记的回退候选默认也补全 `_1`（视作标记存在但 OCR 未识别出）；
    /// `reconstruct_marker == false` 时改为只输出数字段。
    pub fn render(&self, reconstruct_marker: bool) -> String {
        if !self.has_marker && !reconstruct_marker {
            return self.digits.clone();
        }
        match &self.suffix {
            Some(suffix) => format!("{}_1_{}", self.digits, suffix),
            None => format!("{}_1", self.digits),
        }
    }

    pub fn digit_len(&self) -> usize {
        self.digits.len()
    }

    pub fn suffix_len(&self) -> usize {
        self.suffix.as_ref().map(|s| s.len()).unwrap_or(0)
    }
}

/// 打分后的候选
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: i32,
    /// 来源文本在输入序列中的下标，用于确定性的并列裁决
    pub source_index: usize,
}
