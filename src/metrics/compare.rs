//! District-to-district comparison for one metric

use std::cmp::Ordering;

use crate::data::District;

/// Upper bound on comparison candidates, keeping the view readable and
/// the per-district fetch fan-out small.
pub const MAX_COMPARISON_DISTRICTS: usize = 5;

/// Which districts are eligible as comparison candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareScope {
    AllDistricts,
    SameState,
}

impl CompareScope {
    pub fn label(&self) -> &'static str {
        match self {
            CompareScope::AllDistricts => "All districts",
            CompareScope::SameState => "Same state",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            CompareScope::AllDistricts => CompareScope::SameState,
            CompareScope::SameState => CompareScope::AllDistricts,
        }
    }
}

/// How a candidate's value stands relative to the current district's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Better,
    Worse,
    Equal,
}

/// One candidate district's value next to the current district's.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub district_name: String,
    pub value: f64,
    /// Candidate value minus the current district's value
    pub difference: f64,
    /// Difference relative to the current value, in percent; 0 when the
    /// current value is zero or negative
    pub percentage_diff: f64,
    pub standing: Standing,
}

/// The assembled comparison: candidate rows plus field statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub current_value: f64,
    /// Candidate rows sorted by value, best first
    pub rows: Vec<ComparisonRow>,
    /// Extremes and mean over the candidates
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    /// 1-based position of the current district among candidates and
    /// itself; ties share the better rank
    pub rank: usize,
    /// Number of districts ranked, candidates plus the current one
    pub field_size: usize,
}

/// Selects up to [`MAX_COMPARISON_DISTRICTS`] comparison candidates from
/// `districts`, excluding `current` itself and honoring `scope`. Input
/// order is preserved.
pub fn comparison_candidates(
    districts: &[District],
    current: &District,
    scope: CompareScope,
) -> Vec<District> {
    districts
        .iter()
        .filter(|d| {
            !(d.district_name == current.district_name && d.state_name == current.state_name)
        })
        .filter(|d| match scope {
            CompareScope::AllDistricts => true,
            CompareScope::SameState => d.state_name == current.state_name,
        })
        .take(MAX_COMPARISON_DISTRICTS)
        .cloned()
        .collect()
}

/// Builds a [`Comparison`] of `current_value` against named candidate
/// values. Returns `None` when there are no candidates to rank against.
pub fn build_comparison(current_value: f64, candidates: &[(String, f64)]) -> Option<Comparison> {
    if candidates.is_empty() {
        return None;
    }

    let mut rows: Vec<ComparisonRow> = candidates
        .iter()
        .map(|(name, value)| {
            let difference = value - current_value;
            let percentage_diff = if current_value > 0.0 {
                difference / current_value * 100.0
            } else {
                0.0
            };
            let standing = match difference.partial_cmp(&0.0) {
                Some(Ordering::Greater) => Standing::Better,
                Some(Ordering::Less) => Standing::Worse,
                _ => Standing::Equal,
            };
            ComparisonRow {
                district_name: name.clone(),
                value: *value,
                difference,
                percentage_diff,
                standing,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.value.total_cmp(&a.value));

    let values: Vec<f64> = rows.iter().map(|r| r.value).collect();
    let max = values.iter().fold(f64::NEG_INFINITY, |acc, v| acc.max(*v));
    let min = values.iter().fold(f64::INFINITY, |acc, v| acc.min(*v));
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    let rank = 1 + values.iter().filter(|v| **v > current_value).count();
    let field_size = values.len() + 1;

    Some(Comparison {
        current_value,
        rows,
        max,
        min,
        mean,
        rank,
        field_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn district(state: &str, name: &str) -> District {
        District {
            state_name: state.to_string(),
            state_code: String::new(),
            district_name: name.to_string(),
            district_code: String::new(),
        }
    }

    fn named(values: &[(&str, f64)]) -> Vec<(String, f64)> {
        values
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn test_no_candidates_means_no_comparison() {
        assert!(build_comparison(100.0, &[]).is_none());
    }

    #[test]
    fn test_rows_classify_better_worse_equal() {
        let comparison =
            build_comparison(100.0, &named(&[("A", 120.0), ("B", 80.0), ("C", 100.0)])).unwrap();

        let by_name = |name: &str| {
            comparison
                .rows
                .iter()
                .find(|r| r.district_name == name)
                .unwrap()
                .clone()
        };

        let a = by_name("A");
        assert_eq!(a.standing, Standing::Better);
        assert_eq!(a.difference, 20.0);
        assert_eq!(a.percentage_diff, 20.0);

        let b = by_name("B");
        assert_eq!(b.standing, Standing::Worse);
        assert_eq!(b.difference, -20.0);

        assert_eq!(by_name("C").standing, Standing::Equal);
    }

    #[test]
    fn test_rows_sorted_by_value_descending() {
        let comparison =
            build_comparison(100.0, &named(&[("B", 80.0), ("A", 120.0), ("C", 100.0)])).unwrap();

        let order: Vec<&str> = comparison
            .rows
            .iter()
            .map(|r| r.district_name.as_str())
            .collect();
        assert_eq!(order, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_rank_counts_strictly_better_candidates() {
        let comparison =
            build_comparison(100.0, &named(&[("A", 120.0), ("B", 80.0), ("C", 100.0)])).unwrap();

        // A is strictly better; ties with C leave the rank shared.
        assert_eq!(comparison.rank, 2);
        assert_eq!(comparison.field_size, 4);
    }

    #[test]
    fn test_rank_extremes() {
        let best = build_comparison(200.0, &named(&[("A", 120.0), ("B", 80.0)])).unwrap();
        assert_eq!(best.rank, 1);

        let worst = build_comparison(10.0, &named(&[("A", 120.0), ("B", 80.0)])).unwrap();
        assert_eq!(worst.rank, 3);
        assert_eq!(worst.field_size, 3);
    }

    #[test]
    fn test_statistics_cover_candidates() {
        let comparison =
            build_comparison(100.0, &named(&[("A", 120.0), ("B", 80.0), ("C", 100.0)])).unwrap();

        assert_eq!(comparison.max, 120.0);
        assert_eq!(comparison.min, 80.0);
        assert_eq!(comparison.mean, 100.0);
    }

    #[test]
    fn test_zero_current_value_reports_no_percentage() {
        let comparison = build_comparison(0.0, &named(&[("A", 50.0)])).unwrap();
        assert_eq!(comparison.rows[0].percentage_diff, 0.0);
        assert_eq!(comparison.rows[0].standing, Standing::Better);
    }

    #[test]
    fn test_candidates_exclude_the_current_district() {
        let districts = vec![
            district("BIHAR", "PATNA"),
            district("BIHAR", "GAYA"),
            district("KERALA", "WAYANAD"),
        ];
        let current = district("BIHAR", "PATNA");

        let candidates =
            comparison_candidates(&districts, &current, CompareScope::AllDistricts);
        let names: Vec<&str> = candidates.iter().map(|d| d.district_name.as_str()).collect();
        assert_eq!(names, vec!["GAYA", "WAYANAD"]);
    }

    #[test]
    fn test_same_state_scope_filters_other_states() {
        let districts = vec![
            district("BIHAR", "PATNA"),
            district("KERALA", "WAYANAD"),
            district("BIHAR", "GAYA"),
        ];
        let current = district("BIHAR", "PATNA");

        let candidates = comparison_candidates(&districts, &current, CompareScope::SameState);
        let names: Vec<&str> = candidates.iter().map(|d| d.district_name.as_str()).collect();
        assert_eq!(names, vec!["GAYA"]);
    }

    #[test]
    fn test_candidates_capped_at_the_limit() {
        let districts: Vec<District> = (0..10)
            .map(|i| district("BIHAR", &format!("DISTRICT {i}")))
            .collect();
        let current = district("KERALA", "WAYANAD");

        let candidates =
            comparison_candidates(&districts, &current, CompareScope::AllDistricts);
        assert_eq!(candidates.len(), MAX_COMPARISON_DISTRICTS);
        assert_eq!(candidates[0].district_name, "DISTRICT 0");
    }

    #[test]
    fn test_namesake_district_in_another_state_is_a_candidate() {
        let districts = vec![
            district("BIHAR", "AURANGABAD"),
            district("MAHARASHTRA", "AURANGABAD"),
        ];
        let current = district("BIHAR", "AURANGABAD");

        let candidates =
            comparison_candidates(&districts, &current, CompareScope::AllDistricts);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].state_name, "MAHARASHTRA");
    }
}
