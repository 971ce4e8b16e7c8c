//! Ranking
//!
//! Orders matching combinations best-first. Tighter groupings come first, then
//! groupings anchored at the earliest invoice any match uses, then groupings whose
//! positions are smaller overall.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::combinations::Combination;

/// A combination reduced to its amounts and annotated with ranking metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCombination {
    /// Amounts of the combination, order preserved
    pub amounts: SmallVec<[Decimal; 8]>,

    /// Original positions of the amounts, order preserved
    pub indices: SmallVec<[usize; 8]>,

    /// Number of skipped positions between consecutive chosen positions
    pub gap_score: usize,

    /// Sum of the chosen positions
    pub sum_indices: usize,

    /// Smallest chosen position
    pub lowest_index: usize,
}

impl From<&Combination> for RankedCombination {
    fn from(combination: &Combination) -> Self {
        let indices: SmallVec<[usize; 8]> = combination.indices().collect();

        // Out-of-order input saturates at zero instead of underflowing.
        let gap_score = indices
            .windows(2)
            .map(|pair| match pair {
                [previous, next] => next.saturating_sub(*previous).saturating_sub(1),
                _ => 0,
            })
            .sum();

        Self {
            amounts: combination.amounts().collect(),
            sum_indices: indices.iter().sum(),
            lowest_index: indices.iter().copied().min().unwrap_or_default(),
            gap_score,
            indices,
        }
    }
}

/// Rank combinations best-first.
///
/// The sort is stable: combinations that compare equal keep their input order.
pub fn rank(combinations: &[Combination]) -> Vec<RankedCombination> {
    let mut ranked: Vec<RankedCombination> =
        combinations.iter().map(RankedCombination::from).collect();

    let Some(global_lowest) = ranked.iter().map(|entry| entry.lowest_index).min() else {
        return ranked;
    };

    if ranked.len() <= 1 {
        return ranked;
    }

    ranked.sort_by(|a, b| compare_ranked(a, b, global_lowest));

    ranked
}

/// Compare two ranked combinations given the lowest position used by any candidate.
///
/// Gap score decides first. On a tie, a candidate starting at `global_lowest` beats
/// one that does not; when both start at the same position the smaller index sum
/// wins, otherwise the earlier start wins.
pub fn compare_ranked(
    a: &RankedCombination,
    b: &RankedCombination,
    global_lowest: usize,
) -> Ordering {
    if a.gap_score != b.gap_score {
        return a.gap_score.cmp(&b.gap_score);
    }

    match (a.lowest_index == global_lowest, b.lowest_index == global_lowest) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ if a.lowest_index == b.lowest_index => a.sum_indices.cmp(&b.sum_indices),
        _ => a.lowest_index.cmp(&b.lowest_index),
    }
}

#[cfg(test)]
mod tests {
    use crate::amounts::IndexedAmount;

    use super::*;

    fn combo(entries: &[(usize, i64)]) -> Combination {
        entries
            .iter()
            .map(|(index, amount)| IndexedAmount::new(Decimal::from(*amount), *index))
            .collect()
    }

    fn ranked(
        amounts: &[i64],
        gap_score: usize,
        sum_indices: usize,
        lowest_index: usize,
    ) -> RankedCombination {
        RankedCombination {
            amounts: amounts.iter().copied().map(Decimal::from).collect(),
            indices: SmallVec::new(),
            gap_score,
            sum_indices,
            lowest_index,
        }
    }

    fn amount_lists(ranked: &[RankedCombination]) -> Vec<Vec<Decimal>> {
        ranked.iter().map(|entry| entry.amounts.to_vec()).collect()
    }

    fn decimals(values: &[i64]) -> Vec<Decimal> {
        values.iter().copied().map(Decimal::from).collect()
    }

    #[test]
    fn empty_input_ranks_to_empty_output() {
        assert!(rank(&[]).is_empty());
    }

    #[test]
    fn single_combination_is_returned_with_metrics() {
        let result = rank(&[combo(&[(1, 10), (2, 20)])]);

        assert_eq!(result.len(), 1);
        assert_eq!(
            result
                .first()
                .map(|entry| (entry.gap_score, entry.sum_indices, entry.lowest_index)),
            Some((0, 3, 1))
        );
        assert_eq!(amount_lists(&result), vec![decimals(&[10, 20])]);
    }

    #[test]
    fn metrics_count_only_internal_gaps() {
        let entry = RankedCombination::from(&combo(&[(2, 20), (4, 40)]));

        assert_eq!(entry.gap_score, 1);
        assert_eq!(entry.sum_indices, 6);
        assert_eq!(entry.lowest_index, 2);
        assert_eq!(entry.indices.to_vec(), vec![2, 4]);
    }

    #[test]
    fn metrics_with_a_wide_gap() {
        let entry = RankedCombination::from(&combo(&[(1, 100), (10, 200)]));

        assert_eq!(entry.gap_score, 8);
        assert_eq!(entry.sum_indices, 11);
        assert_eq!(entry.lowest_index, 1);
    }

    #[test]
    fn single_entry_has_no_gap() {
        let entry = RankedCombination::from(&combo(&[(7, 100)]));

        assert_eq!(entry.gap_score, 0);
        assert_eq!(entry.sum_indices, 7);
        assert_eq!(entry.lowest_index, 7);
    }

    #[test]
    fn identical_metrics_keep_input_order() {
        let result = rank(&[
            combo(&[(1, 10), (2, 20)]),
            combo(&[(1, 30), (2, 40)]),
            combo(&[(1, 50), (2, 60)]),
        ]);

        assert_eq!(
            amount_lists(&result),
            vec![decimals(&[10, 20]), decimals(&[30, 40]), decimals(&[50, 60])]
        );
    }

    #[test]
    fn lower_gap_score_ranks_first() {
        let result = rank(&[
            combo(&[(2, 50), (5, 60)]),
            combo(&[(1, 30), (3, 40)]),
            combo(&[(1, 10), (2, 20)]),
        ]);

        assert_eq!(
            result
                .iter()
                .map(|entry| entry.gap_score)
                .collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert_eq!(
            amount_lists(&result),
            vec![decimals(&[10, 20]), decimals(&[30, 40]), decimals(&[50, 60])]
        );
    }

    #[test]
    fn contiguous_pair_beats_gapped_pair() {
        let result = rank(&[combo(&[(2, 20), (4, 40)]), combo(&[(1, 10), (2, 20)])]);

        assert_eq!(
            amount_lists(&result),
            vec![decimals(&[10, 20]), decimals(&[20, 40])]
        );
    }

    #[test]
    fn anchored_combination_wins_gap_tie() {
        let result = rank(&[
            combo(&[(3, 50), (4, 60)]),
            combo(&[(2, 30), (3, 40)]),
            combo(&[(1, 10), (2, 20), (3, 30)]),
        ]);

        assert_eq!(
            amount_lists(&result),
            vec![
                decimals(&[10, 20, 30]),
                decimals(&[30, 40]),
                decimals(&[50, 60])
            ]
        );
    }

    #[test]
    fn gap_score_outranks_anchoring() {
        let result = rank(&[
            combo(&[(2, 20), (3, 30)]),
            combo(&[(1, 10), (4, 40)]),
            combo(&[(5, 50), (6, 60)]),
        ]);

        assert_eq!(
            amount_lists(&result),
            vec![decimals(&[20, 30]), decimals(&[50, 60]), decimals(&[10, 40])]
        );
    }

    #[test]
    fn anchored_pairs_are_ordered_by_index_sum() {
        let result = rank(&[
            combo(&[(0, 10), (1, 20), (2, 30)]),
            combo(&[(0, 60)]),
        ]);

        assert_eq!(
            amount_lists(&result),
            vec![decimals(&[60]), decimals(&[10, 20, 30])]
        );
    }

    #[test]
    fn unanchored_combinations_order_by_start_then_index_sum() {
        // Index 0 is absent; only the combination starting at 2 is anchored.
        let result = rank(&[
            combo(&[(5, 90), (6, 100)]),
            combo(&[(3, 70), (4, 80)]),
            combo(&[(2, 10), (3, 20)]),
            combo(&[(3, 50)]),
        ]);

        assert_eq!(
            amount_lists(&result),
            vec![
                decimals(&[10, 20]),
                decimals(&[50]),
                decimals(&[70, 80]),
                decimals(&[90, 100])
            ]
        );
    }

    #[test]
    fn mixed_conditions_sort_into_pairs() {
        let result = rank(&[
            combo(&[(1, 10), (2, 20)]),
            combo(&[(1, 30), (2, 40)]),
            combo(&[(3, 50), (4, 60)]),
            combo(&[(3, 70), (4, 80)]),
            combo(&[(5, 90), (6, 100)]),
            combo(&[(5, 110), (6, 120)]),
            combo(&[(7, 130), (8, 140)]),
        ]);

        assert_eq!(
            result
                .iter()
                .map(|entry| entry.sum_indices)
                .collect::<Vec<_>>(),
            vec![3, 3, 7, 7, 11, 11, 15]
        );
        assert_eq!(
            amount_lists(&result),
            vec![
                decimals(&[10, 20]),
                decimals(&[30, 40]),
                decimals(&[50, 60]),
                decimals(&[70, 80]),
                decimals(&[90, 100]),
                decimals(&[110, 120]),
                decimals(&[130, 140]),
            ]
        );
    }

    #[test]
    fn same_gap_unanchored_combinations_order_by_start() {
        let result = rank(&[combo(&[(3, 60), (5, 160)]), combo(&[(2, 50), (4, 150)])]);

        assert_eq!(
            amount_lists(&result),
            vec![decimals(&[50, 150]), decimals(&[60, 160])]
        );
    }

    #[test]
    fn reversed_duplicate_saturates_gap_and_ranks_first() {
        let result = rank(&[combo(&[(3, 300), (1, 100)]), combo(&[(1, 100), (3, 300)])]);

        assert_eq!(
            amount_lists(&result),
            vec![decimals(&[300, 100]), decimals(&[100, 300])]
        );
    }

    #[test]
    fn negative_amounts_are_carried_through() {
        let result = rank(&[combo(&[(0, -20), (1, -10)])]);

        assert_eq!(amount_lists(&result), vec![decimals(&[-20, -10])]);
    }

    #[test]
    fn many_overlapping_pairs_sort_and_keep_amounts() {
        let combinations: Vec<Combination> = (0..100_i64)
            .map(|i| {
                let first = usize::try_from(i).unwrap_or_default();

                combo(&[(first + 1, (i + 1) * 10), (first + 2, (i + 2) * 20)])
            })
            .collect();

        let result = rank(&combinations);

        // Only the first pair is anchored; the rest all start later, in input order.
        let expected: Vec<Vec<Decimal>> = (0..100_i64)
            .map(|i| decimals(&[(i + 1) * 10, (i + 2) * 20]))
            .collect();

        assert_eq!(result.len(), 100);
        assert_eq!(amount_lists(&result), expected);
        assert_eq!(
            result.first().map(|entry| entry.amounts.to_vec()),
            Some(decimals(&[10, 40]))
        );
        assert_eq!(
            result.last().map(|entry| entry.amounts.to_vec()),
            Some(decimals(&[1000, 2020]))
        );
    }

    #[test]
    fn compare_prefers_anchored_side_in_both_directions() {
        let anchored = ranked(&[1], 0, 5, 0);
        let other = ranked(&[2], 0, 1, 1);

        assert_eq!(compare_ranked(&anchored, &other, 0), Ordering::Less);
        assert_eq!(compare_ranked(&other, &anchored, 0), Ordering::Greater);
    }

    #[test]
    fn compare_agrees_with_gap_start_and_sum_ordering() {
        let candidates = [
            ranked(&[1], 0, 3, 1),
            ranked(&[2], 0, 9, 1),
            ranked(&[3], 0, 7, 3),
            ranked(&[4], 1, 4, 1),
            ranked(&[5], 0, 5, 2),
            ranked(&[6], 2, 2, 0),
            ranked(&[7], 0, 12, 2),
        ];

        let global_lowest = candidates
            .iter()
            .map(|entry| entry.lowest_index)
            .min()
            .unwrap_or_default();

        for a in &candidates {
            for b in &candidates {
                let expected = (a.gap_score, a.lowest_index, a.sum_indices).cmp(&(
                    b.gap_score,
                    b.lowest_index,
                    b.sum_indices,
                ));

                assert_eq!(
                    compare_ranked(a, b, global_lowest),
                    expected,
                    "comparing {a:?} with {b:?}"
                );
            }
        }
    }
}
