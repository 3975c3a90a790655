use serde::{Deserialize, Serialize};

use super::models::review::Review;
use super::sentiment::{classify, Sentiment};
use crate::stats;

/// Rating and sentiment rollup over one product's reviews.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSummary {
    pub total_reviews: i64,
    pub average_rating: f64,
    pub positive: i64,
    pub negative: i64,
    pub neutral: i64,
}

impl FeedbackSummary {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let percentages: Vec<f64> = reviews.iter().map(|r| r.percentage).collect();
        let mut summary = Self {
            total_reviews: reviews.len() as i64,
            average_rating: stats::average(&percentages),
            ..Self::default()
        };
        for review in reviews {
            match classify(&review.content) {
                Sentiment::Positive => summary.positive += 1,
                Sentiment::Negative => summary.negative += 1,
                Sentiment::Neutral => summary.neutral += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn review(content: &str, percentage: f64) -> Review {
        Review {
            id: 0,
            product_id: 1,
            user_id: 1,
            content: content.to_string(),
            percentage,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_feedback_is_all_zero() {
        assert_eq!(FeedbackSummary::from_reviews(&[]), FeedbackSummary::default());
    }

    #[test]
    fn buckets_sum_to_total() {
        let reviews = vec![
            review("This is a great product", 90.0),
            review("Terrible and poor quality", 10.0),
            review("It arrived on Tuesday", 50.0),
            review("Good value", 80.0),
        ];
        let summary = FeedbackSummary::from_reviews(&reviews);
        assert_eq!(summary.total_reviews, 4);
        assert_eq!(summary.positive, 2);
        assert_eq!(summary.negative, 1);
        assert_eq!(summary.neutral, 1);
        assert_eq!(summary.positive + summary.negative + summary.neutral, summary.total_reviews);
        assert!((summary.average_rating - 57.5).abs() < 1e-9);
    }
}
