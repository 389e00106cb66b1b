//! Ranking and classification metrics over binary labels.
//!
//! Curves are built over distinct score thresholds in descending order and
//! integrated with the trapezoidal rule.

use crate::tools::GroupBy;

/// Points of a precision-recall curve, ordered by increasing threshold and
/// closed by a final `(recall 0, precision 1)` point.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionRecallCurve {
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
    pub thresholds: Vec<f64>,
}

/// Cumulative false and true positive counts at each distinct threshold, from
/// the highest score down.
fn binary_clf_curve(y_true: &[bool], y_score: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mut scored: Vec<(f64, bool)> = y_score
        .iter()
        .copied()
        .zip(y_true.iter().copied())
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    let (mut fps, mut tps, mut thresholds) = (Vec::new(), Vec::new(), Vec::new());
    let (mut fp, mut tp) = (0.0, 0.0);
    for (threshold, run) in GroupBy::new(&scored, |&(score, _)| score) {
        let positives = run.iter().filter(|&&(_, label)| label).count() as f64;
        tp += positives;
        fp += run.len() as f64 - positives;
        fps.push(fp);
        tps.push(tp);
        thresholds.push(threshold);
    }
    (fps, tps, thresholds)
}

/// Area under the ROC curve.
///
/// Undefined (NaN) unless both labels are present.
pub fn roc_auc_score(y_true: &[bool], y_score: &[f64]) -> f64 {
    let (fps, tps, _) = binary_clf_curve(y_true, y_score);
    let (fp_total, tp_total) = match (fps.last(), tps.last()) {
        (Some(&fp), Some(&tp)) => (fp, tp),
        _ => return f64::NAN,
    };
    let fpr: Vec<f64> = std::iter::once(0.0)
        .chain(fps.iter().map(|&fp| fp / fp_total))
        .collect();
    let tpr: Vec<f64> = std::iter::once(0.0)
        .chain(tps.iter().map(|&tp| tp / tp_total))
        .collect();
    auc(&fpr, &tpr)
}

pub fn precision_recall_curve(y_true: &[bool], y_score: &[f64]) -> PrecisionRecallCurve {
    let (fps, tps, mut thresholds) = binary_clf_curve(y_true, y_score);
    let tp_total = tps.last().copied().unwrap_or(0.0);
    let mut precision: Vec<f64> = fps
        .iter()
        .zip(&tps)
        .map(|(&fp, &tp)| if tp + fp > 0.0 { tp / (tp + fp) } else { 0.0 })
        .collect();
    let mut recall: Vec<f64> = tps
        .iter()
        .map(|&tp| if tp_total > 0.0 { tp / tp_total } else { 1.0 })
        .collect();
    precision.reverse();
    recall.reverse();
    thresholds.reverse();
    precision.push(1.0);
    recall.push(0.0);
    PrecisionRecallCurve {
        precision,
        recall,
        thresholds,
    }
}

/// Harmonic mean of precision and recall of the positive class; 0 when there
/// is neither a predicted nor an actual positive.
pub fn f1_score(y_true: &[bool], y_pred: &[bool]) -> f64 {
    let (mut tp, mut fp, mut fn_) = (0usize, 0usize, 0usize);
    for (&truth, &pred) in y_true.iter().zip(y_pred) {
        match (truth, pred) {
            (true, true) => tp += 1,
            (false, true) => fp += 1,
            (true, false) => fn_ += 1,
            (false, false) => (),
        }
    }
    let denominator = 2 * tp + fp + fn_;
    if denominator == 0 {
        0.0
    } else {
        (2 * tp) as f64 / denominator as f64
    }
}

/// Trapezoidal area under `(x, y)`; `x` must be monotonic in either direction.
pub fn auc(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    let area: f64 = x
        .windows(2)
        .zip(y.windows(2))
        .map(|(dx, dy)| (dx[1] - dx[0]) * (dy[0] + dy[1]) / 2.0)
        .sum();
    area.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn labels(xs: &[u8]) -> Vec<bool> {
        xs.iter().map(|&x| x == 1).collect()
    }

    #[test]
    fn test_roc_auc_counts_misordered_pairs() {
        let y_true = labels(&[1, 1, 0, 0, 0]);
        let y_score = [0.9, 0.7, 0.8, 0.6, 0.5];
        assert!((roc_auc_score(&y_true, &y_score) - 5.0 / 6.0).abs() < EPS);
    }

    #[test]
    fn test_roc_auc_perfect_and_ties() {
        let y_true = labels(&[1, 0, 1, 0]);
        assert!((roc_auc_score(&y_true, &[0.9, 0.1, 0.8, 0.2]) - 1.0).abs() < EPS);
        // a tied true/false pair counts as half an ordered pair
        assert!((roc_auc_score(&y_true, &[0.5, 0.5, 0.9, 0.1]) - 0.875).abs() < EPS);
    }

    #[test]
    fn test_roc_auc_single_class_is_nan() {
        assert!(roc_auc_score(&labels(&[1, 1]), &[0.3, 0.4]).is_nan());
        assert!(roc_auc_score(&[], &[]).is_nan());
    }

    #[test]
    fn test_precision_recall_curve() {
        let y_true = labels(&[1, 1, 0, 0, 0]);
        let curve = precision_recall_curve(&y_true, &[0.9, 0.7, 0.8, 0.6, 0.5]);
        let expected_precision = [0.4, 0.5, 2.0 / 3.0, 0.5, 1.0, 1.0];
        let expected_recall = [1.0, 1.0, 1.0, 0.5, 0.5, 0.0];
        for (x, y) in curve.precision.iter().zip(&expected_precision) {
            assert!((x - y).abs() < EPS);
        }
        assert_eq!(curve.recall, expected_recall);
        assert_eq!(curve.thresholds, vec![0.5, 0.6, 0.7, 0.8, 0.9]);
        let pr_auc = auc(&curve.recall, &curve.precision);
        assert!((pr_auc - 19.0 / 24.0).abs() < EPS);
    }

    #[test]
    fn test_precision_recall_curve_with_ties() {
        let y_true = labels(&[1, 0, 1, 0]);
        let curve = precision_recall_curve(&y_true, &[0.5, 0.5, 0.9, 0.1]);
        assert_eq!(curve.thresholds, vec![0.1, 0.5, 0.9]);
        let pr_auc = auc(&curve.recall, &curve.precision);
        assert!((pr_auc - 11.0 / 12.0).abs() < EPS);
    }

    #[test]
    fn test_f1_score() {
        let y_true = labels(&[1, 1, 0, 0, 0]);
        let y_pred = labels(&[1, 0, 1, 0, 0]);
        assert!((f1_score(&y_true, &y_pred) - 0.5).abs() < EPS);
        assert_eq!(f1_score(&labels(&[0, 0]), &labels(&[0, 0])), 0.0);
        assert_eq!(f1_score(&labels(&[1, 0]), &labels(&[1, 0])), 1.0);
    }

    #[test]
    fn test_auc_either_direction() {
        let x = [0.0, 0.5, 1.0];
        let y = [1.0, 1.0, 0.0];
        assert!((auc(&x, &y) - 0.75).abs() < EPS);
        let rx: Vec<f64> = x.iter().rev().copied().collect();
        let ry: Vec<f64> = y.iter().rev().copied().collect();
        assert!((auc(&rx, &ry) - 0.75).abs() < EPS);
    }
}
