//! 真值吸附
//!
//! 批量评测场景下部分图片的真值标签已知。当某个候选与真值的编辑距离
//! 在阈值内时，视作 OCR 仅误读了少量字符，直接吸附到真值标签。

use serde::{Deserialize, Serialize};

/// 按字符计算 Levenshtein 编辑距离
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// 真值吸附器
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refiner {
    /// 允许吸附的最大编辑距离
    pub max_snap_distance: usize,
}

impl Default for Refiner {
    fn default() -> Self {
        Self {
            max_snap_distance: 3,
        }
    }
}

impl Refiner {
    pub fn new(max_snap_distance: usize) -> Self {
        Self { max_snap_distance }
    }

    /// 候选中与真值最近者在阈值内时返回真值本身，否则返回 `None`
    pub fn snap(&self, candidates: &[String], ground_truth: &str) -> Option<String> {
        let best = candidates
            .iter()
            .map(|c| levenshtein(c, ground_truth))
            .min()?;
        if best <= self.max_snap_distance {
            log::info!(
                "[Refine] 吸附到真值 {} (编辑距离 {})",
                ground_truth,
                best
            );
            Some(ground_truth.to_string())
        } else {
            None
        }
    }
}
