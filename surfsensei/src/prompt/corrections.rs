//! Correction block built from past inaccurate feedback.

use crate::models::FeedbackRecord;

/// Build the correction block, or `None` when no record qualifies.
///
/// Only inaccurate records with a non-blank comment count. Each becomes one
/// numbered, quoted line in history order.
pub fn build_corrections(records: &[FeedbackRecord]) -> Option<String> {
    let corrections: Vec<&str> = records.iter().filter_map(FeedbackRecord::correction).collect();
    if corrections.is_empty() {
        return None;
    }

    let mut block = String::from(
        "\nCRITICAL: The user has previously corrected your analysis. \
         You MUST incorporate these corrections into your reasoning for all future requests:\n",
    );
    let lines: Vec<String> = corrections
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. \"{c}\"", i + 1))
        .collect();
    block.push_str(&lines.join("\n"));
    block.push('\n');
    Some(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Accuracy;

    fn record(accuracy: Accuracy, comments: &str) -> FeedbackRecord {
        FeedbackRecord::new(accuracy, comments)
    }

    #[test]
    fn only_commented_inaccurate_records_are_numbered() {
        let records = vec![
            record(Accuracy::Accurate, "great"),
            record(Accuracy::Inaccurate, ""),
            record(Accuracy::Inaccurate, "wind was onshore"),
        ];
        let block = build_corrections(&records).unwrap();

        assert!(block.contains("1. \"wind was onshore\""));
        assert!(!block.contains("2."));
        assert!(!block.contains("great"));
    }

    #[test]
    fn numbering_follows_history_order() {
        let records = vec![
            record(Accuracy::Inaccurate, "first"),
            record(Accuracy::Accurate, "fine"),
            record(Accuracy::Inaccurate, "second"),
        ];
        let block = build_corrections(&records).unwrap();
        let first = block.find("1. \"first\"").unwrap();
        let second = block.find("2. \"second\"").unwrap();
        assert!(first < second);
    }

    #[test]
    fn no_block_for_empty_or_all_accurate() {
        assert!(build_corrections(&[]).is_none());
        assert!(build_corrections(&[record(Accuracy::Accurate, "nailed it")]).is_none());
    }

    #[test]
    fn block_ends_with_single_newline() {
        let records = vec![
            record(Accuracy::Inaccurate, "closed out"),
            record(Accuracy::Inaccurate, "too small"),
        ];
        let block = build_corrections(&records).unwrap();
        assert!(block.starts_with("\nCRITICAL: The user has previously corrected your analysis."));
        assert!(block.ends_with(":\n1. \"closed out\"\n2. \"too small\"\n"));
    }

    #[test]
    fn whitespace_only_comment_is_ignored() {
        assert!(build_corrections(&[record(Accuracy::Inaccurate, " \n\t")]).is_none());
    }
}
