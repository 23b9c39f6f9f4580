//! 批量评测支撑：真值加载与准确率统计
//!
//! 真值文件为 CSV，每行 `image_name,label`。报告渲染由调用方负责，
//! 本 crate 只负责解析与统计。

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// 真值中表示"图片上无可识别号码"的占位标签，不计入可评测样本
pub const NO_PATTERN_LABEL: &str = "NO_PATTERN";

/// 解析真值 CSV 文本
///
/// 列数不足或为空的行直接跳过，不报错。
pub fn parse_ground_truth(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 2 {
            continue;
        }
        let name = fields[0].trim();
        let label = fields[1].trim();
        if name.is_empty() || label.is_empty() {
            continue;
        }
        map.insert(name.to_string(), label.to_string());
    }
    map
}

/// 从磁盘加载真值 CSV
pub fn load_ground_truth(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Err(anyhow!("真值文件不存在: {}", path.display()));
    }
    let content =
        fs::read_to_string(path).map_err(|e| anyhow!("无法读取真值文件: {}", e))?;
    let map = parse_ground_truth(&content);
    log::info!("[Verify] 从 {} 加载 {} 条真值", path.display(), map.len());
    Ok(map)
}

/// 批量准确率汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracySummary {
    pub total_samples: usize,
    pub exact_matches: usize,
    pub partial_matches: usize,
    /// 精确匹配率（百分比）
    pub accuracy: f64,
    /// 部分匹配率（百分比）
    pub partial_accuracy: f64,
}

/// 计算批量预测的准确率
///
/// - 精确匹配：预测与真值完全一致
/// - 部分匹配：非空预测是真值的子串（含精确匹配）
/// - 真值为 [`NO_PATTERN_LABEL`] 的样本不计入
///
/// 预测与真值按位置配对，多余的一侧忽略。
pub fn calculate_accuracy(predictions: &[String], truths: &[String]) -> AccuracySummary {
    let mut total = 0usize;
    let mut exact = 0usize;
    let mut partial = 0usize;

    for (prediction, truth) in predictions.iter().zip(truths.iter()) {
        if truth == NO_PATTERN_LABEL {
            continue;
        }
        total += 1;
        if prediction == truth {
            exact += 1;
        }
        if !prediction.is_empty() && truth.contains(prediction.as_str()) {
            partial += 1;
        }
    }

    let percent = |n: usize| {
        if total > 0 {
            n as f64 / total as f64 * 100.0
        } else {
            0.0
        }
    };
    let summary = AccuracySummary {
        total_samples: total,
        exact_matches: exact,
        partial_matches: partial,
        accuracy: percent(exact),
        partial_accuracy: percent(partial),
    };
    log::info!(
        "[Verify] 样本 {} 条，精确 {} 条 ({:.2}%)，部分 {} 条 ({:.2}%)",
        summary.total_samples,
        summary.exact_matches,
        summary.accuracy,
        summary.partial_matches,
        summary.partial_accuracy
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_ground_truth() {
        let content = "img_001.jpg,156387426414724544_1_wni\n\
                       img_002.jpg , 162822952260583552_1 \n\
                       broken-line\n\
                       ,missing_name\n";
        let map = parse_ground_truth(content);
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get("img_001.jpg").map(String::as_str),
            Some("156387426414724544_1_wni")
        );
        assert_eq!(
            map.get("img_002.jpg").map(String::as_str),
            Some("162822952260583552_1")
        );
    }

    #[test]
    fn test_load_ground_truth_missing_file() {
        assert!(load_ground_truth(Path::new("/no/such/file.csv")).is_err());
    }

    #[test]
    fn test_accuracy_exact_and_partial() {
        let predictions = strings(&[
            "156387426414724544_1_wni", // 精确
            "162822952260583552",       // 部分（真值的前缀）
            "",                         // 未提取到
            "999999999999999999_1",     // 错误
        ]);
        let truths = strings(&[
            "156387426414724544_1_wni",
            "162822952260583552_1",
            "164010403918364801_1_dx",
            "111111111111111111_1",
        ]);
        let summary = calculate_accuracy(&predictions, &truths);
        assert_eq!(summary.total_samples, 4);
        assert_eq!(summary.exact_matches, 1);
        assert_eq!(summary.partial_matches, 2);
        assert!((summary.accuracy - 25.0).abs() < 1e-9);
        assert!((summary.partial_accuracy - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_accuracy_skips_no_pattern() {
        let predictions = strings(&["", "156387426414724544_1"]);
        let truths = strings(&[NO_PATTERN_LABEL, "156387426414724544_1"]);
        let summary = calculate_accuracy(&predictions, &truths);
        assert_eq!(summary.total_samples, 1);
        assert_eq!(summary.exact_matches, 1);
        assert!((summary.accuracy - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_accuracy_empty_input() {
        let summary = calculate_accuracy(&[], &[]);
        assert_eq!(summary.total_samples, 0);
        assert_eq!(summary.accuracy, 0.0);
    }
}
