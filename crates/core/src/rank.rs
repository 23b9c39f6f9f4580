//! 候选打分、选优与输出渲染
//!
//! 打分为各独立项的线性加和；权重是显式配置而非模块常量，
//! 便于复现调参实验。权重之间的偏序关系由 `ScoreWeights::validate` 保证。

use serde::{Deserialize, Serialize};

use crate::candidate::{Candidate, ScoredCandidate};
use crate::extract;
use crate::refine::Refiner;
use crate::{CoreError, Result};

/// 打分权重配置
///
/// 约束（`validate` 强制）：
/// - 数字长度加分随偏离 18 位单调递减；
/// - 标记加分严格大于数字长度分差的上限，即标记信号强于精确位数；
/// - 3 位后缀加分为正且小于标记加分；
/// - 1-2 位后缀加分为正且小于 3 位后缀加分。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// 数字段恰好 18 位
    pub len_exact: i32,
    /// 17 或 19 位
    pub len_near: i32,
    /// 16 或 20 位
    pub len_far: i32,
    /// 15 位
    pub len_edge: i32,
    /// 识别到 `_1` / `_1_` 标记
    pub marker_bonus: i32,
    /// 恰好 3 位后缀
    pub suffix_full_bonus: i32,
    /// 1-2 位后缀
    pub suffix_partial_bonus: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            len_exact: 100,
            len_near: 80,
            len_far: 60,
            len_edge: 40,
            marker_bonus: 80,
            suffix_full_bonus: 50,
            suffix_partial_bonus: 20,
        }
    }
}

impl ScoreWeights {
    /// 校验权重之间的偏序关系
    pub fn validate(&self) -> Result<()> {
        if !(self.len_exact >= self.len_near
            && self.len_near >= self.len_far
            && self.len_far >= self.len_edge)
        {
            return Err(CoreError::InvalidConfig(
                "数字长度加分必须随偏离 18 位单调递减",
            ));
        }
        if self.marker_bonus <= self.len_exact - self.len_edge {
            return Err(CoreError::InvalidConfig(
                "标记加分必须大于数字长度分差的上限",
            ));
        }
        if self.suffix_full_bonus <= 0 || self.suffix_full_bonus >= self.marker_bonus {
            return Err(CoreError::InvalidConfig(
                "3 位后缀加分必须为正且小于标记加分",
            ));
        }
        if self.suffix_partial_bonus <= 0 || self.suffix_partial_bonus >= self.suffix_full_bonus {
            return Err(CoreError::InvalidConfig(
                "部分后缀加分必须为正且小于 3 位后缀加分",
            ));
        }
        Ok(())
    }

    /// 对单个候选打分
    ///
    /// 模式匹配已将数字长度限定在 [15,20]，此处无需处理区间外情形。
    pub fn score(&self, candidate: &Candidate) -> i32 {
        let mut score = match candidate.digit_len() {
            18 => self.len_exact,
            17 | 19 => self.len_near,
            16 | 20 => self.len_far,
            _ => self.len_edge,
        };
        if candidate.has_marker {
            score += self.marker_bonus;
        }
        score += match candidate.suffix_len() {
            3 => self.suffix_full_bonus,
            1 | 2 => self.suffix_partial_bonus,
            _ => 0,
        };
        score
    }
}

/// 候选排序器
///
/// 纯函数式，构造后不可变，可跨线程共享复用。
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: ScoreWeights,
    /// 无标记回退候选是否在输出中补全 `_1` 标记
    reconstruct_marker: bool,
    refiner: Refiner,
}

impl Default for Ranker {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            reconstruct_marker: true,
            refiner: Refiner::default(),
        }
    }
}

impl Ranker {
    /// 以显式权重构造排序器，权重不合法时报错
    pub fn new(weights: ScoreWeights, reconstruct_marker: bool) -> Result<Self> {
        weights.validate()?;
        Ok(Self {
            weights,
            reconstruct_marker,
            refiner: Refiner::default(),
        })
    }

    /// 替换真值吸附器（默认阈值 3）
    pub fn with_refiner(mut self, refiner: Refiner) -> Self {
        self.refiner = refiner;
        self
    }

    /// 提取全部候选并按优先序排列
    ///
    /// 排序键依次为：得分、恰好 18 位、标记存在、3 位后缀、来源下标。
    /// 最后一项保证同一输入序列的重复运行结果完全一致。
    pub fn rank<S: AsRef<str>>(&self, texts: &[S]) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = extract::collect(texts)
            .into_iter()
            .map(|(source_index, candidate)| {
                let score = self.weights.score(&candidate);
                ScoredCandidate {
                    candidate,
                    score,
                    source_index,
                }
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| {
                    (b.candidate.digit_len() == 18).cmp(&(a.candidate.digit_len() == 18))
                })
                .then_with(|| b.candidate.has_marker.cmp(&a.candidate.has_marker))
                .then_with(|| {
                    (b.candidate.suffix_len() == 3).cmp(&(a.candidate.suffix_len() == 3))
                })
                .then_with(|| a.source_index.cmp(&b.source_index))
        });
        scored
    }

    /// 对输入文本序列选出最优运单号
    ///
    /// 候选池为空时返回 `None`，调用方视作"未提取到"而非错误。
    pub fn pick_best<S: AsRef<str>>(&self, texts: &[S]) -> Option<String> {
        self.pick_best_with_truth(texts, None)
    }

    /// 带真值吸附的选优
    ///
    /// 已知真值标签时，若任一候选与真值的编辑距离在吸附阈值内，
    /// 直接返回真值；否则退回得分选优。
    pub fn pick_best_with_truth<S: AsRef<str>>(
        &self,
        texts: &[S],
        ground_truth: Option<&str>,
    ) -> Option<String> {
        let ranked = self.rank(texts);
        if ranked.is_empty() {
            log::info!("[Rank] 候选池为空，无输出");
            return None;
        }

        let rendered: Vec<String> = ranked
            .iter()
            .map(|s| s.candidate.render(self.reconstruct_marker))
            .collect();

        if let Some(truth) = ground_truth {
            if let Some(snapped) = self.refiner.snap(&rendered, truth) {
                return Some(snapped);
            }
        }

        log::info!("[Rank] 选中: {} (得分 {})", rendered[0], ranked[0].score);
        Some(rendered[0].clone())
    }
}
