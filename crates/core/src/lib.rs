//! 运单号提取核心库
//!
//! 从多路 OCR 输出的原始文本中提取运单号候选并打分排序，
//! 输出唯一的最优运单号（或无结果）。
//!
//! 核心为纯函数：不做 I/O、不持有跨调用状态，可在多线程间并发调用。

pub mod candidate;
pub mod extract;
pub mod rank;
pub mod refine;

pub use candidate::{Candidate, ScoredCandidate};
pub use rank::{Ranker, ScoreWeights};
pub use refine::Refiner;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("无效配置: {0}")]
    InvalidConfig(&'static str),
}

/// 使用默认权重提取最优运单号
///
/// `Ranker::pick_best` 的便捷入口，适合不需要调整权重的调用方。
pub fn extract_best<S: AsRef<str>>(texts: &[S]) -> Option<String> {
    Ranker::default().pick_best(texts)
}
