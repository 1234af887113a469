use super::error::TallyError;
use super::types::{TallyResult, VoteRecord};

/// Sums the counts of every record, or `None` if the total exceeds `u64`.
pub fn sum_counts(records: &[VoteRecord]) -> Option<u64> {
    records
        .iter()
        .try_fold(0u64, |total, record| total.checked_add(record.count))
}

/// Builds the `ALL` result from a full scan.
pub fn tally_all(records: &[VoteRecord]) -> Result<TallyResult, TallyError> {
    sum_counts(records)
        .map(TallyResult::all)
        .ok_or(TallyError::CountOverflow {
            records: records.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<VoteRecord> {
        vec![
            VoteRecord::new("YES", 3),
            VoteRecord::new("NO", 5),
            VoteRecord::new("ABSTAIN", 0),
        ]
    }

    #[test]
    fn test_sum_counts() {
        assert_eq!(sum_counts(&records()), Some(8));
    }

    #[test]
    fn test_sum_counts_ignores_order() {
        let mut reversed = records();
        reversed.reverse();
        assert_eq!(sum_counts(&reversed), sum_counts(&records()));
    }

    #[test]
    fn test_sum_counts_empty() {
        assert_eq!(sum_counts(&[]), Some(0));
    }

    #[test]
    fn test_sum_counts_at_limit() {
        let records = [VoteRecord::new("YES", u64::MAX - 1), VoteRecord::new("NO", 1)];
        assert_eq!(sum_counts(&records), Some(u64::MAX));
    }

    #[test]
    fn test_sum_counts_overflow() {
        let records = [VoteRecord::new("YES", u64::MAX), VoteRecord::new("NO", 1)];
        assert_eq!(sum_counts(&records), None);
    }

    #[test]
    fn test_tally_all() {
        let result = tally_all(&records()).unwrap();
        assert_eq!(result, TallyResult::all(8));
        assert_eq!(result.id, "ALL");
    }

    #[test]
    fn test_tally_all_overflow_is_fault() {
        let records = [VoteRecord::new("YES", u64::MAX), VoteRecord::new("NO", 1)];
        let err = tally_all(&records).unwrap_err();
        assert_eq!(err, TallyError::CountOverflow { records: 2 });
        assert!(!err.is_taxonomy());
    }
}
