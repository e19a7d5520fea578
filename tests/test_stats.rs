mod common;

use common::{base_time, days_after_base, rating, rating_at};
use radeur_be::{
    models::stats::Trend,
    stats::{
        Grade, grade, network_stats, network_trend, user_summary,
        aggregate::{favorite_value, window_start},
    },
};
use uuid::Uuid;

#[test]
fn test_network_stats_empty() {
    let stats = network_stats(&[], base_time());

    assert_eq!(stats.average_rating, 0.0);
    assert_eq!(stats.total_count, 0);
    assert_eq!(stats.distribution.total(), 0);
    assert_eq!(stats.recent_average, 0.0);
}

#[test]
fn test_network_stats_average_and_distribution() {
    let ratings = vec![
        rating(1, Some(1), 50),
        rating(2, Some(1), 40),
        rating(3, Some(1), 40),
        rating(4, Some(1), 35),
        rating(5, Some(1), 10),
    ];

    let stats = network_stats(&ratings, days_after_base(1));

    // (5 + 4 + 4 + 3.5 + 1) / 5 = 3.5
    assert_eq!(stats.average_rating, 3.5);
    assert_eq!(stats.total_count, 5);
    assert_eq!(stats.distribution.bucket(5), 1);
    assert_eq!(stats.distribution.bucket(4), 2);
    assert_eq!(stats.distribution.bucket(3), 0);
    assert_eq!(stats.distribution.bucket(1), 1);
}

#[test]
fn test_distribution_never_exceeds_total() {
    let ratings = vec![
        rating(1, Some(1), 25),
        rating(2, Some(1), 35),
        rating(3, Some(1), 30),
        rating(4, Some(1), 45),
    ];

    let stats = network_stats(&ratings, base_time());

    assert!(stats.distribution.total() <= stats.total_count);
    assert_eq!(stats.distribution.total(), 1);
}

#[test]
fn test_average_rounds_half_up() {
    let ratings = vec![
        rating(1, Some(1), 50),
        rating(2, Some(1), 40),
        rating(3, Some(1), 40),
    ];

    // 13 / 3 = 4.333...
    assert_eq!(network_stats(&ratings, base_time()).average_rating, 4.33);

    let ratings = vec![
        rating(1, Some(1), 45),
        rating(2, Some(1), 40),
        rating(3, Some(1), 40),
        rating(4, Some(1), 40),
        rating(5, Some(1), 40),
        rating(6, Some(1), 40),
        rating(7, Some(1), 40),
        rating(8, Some(1), 40),
    ];

    // 32.5 / 8 = 4.0625
    assert_eq!(network_stats(&ratings, base_time()).average_rating, 4.06);
}

#[test]
fn test_recent_average_uses_last_thirty_days() {
    let now = days_after_base(60);
    let ratings = vec![
        rating_at(1, Some(1), 10, days_after_base(0)),
        rating_at(2, Some(1), 50, days_after_base(45)),
        rating_at(3, Some(1), 40, days_after_base(59)),
    ];

    let stats = network_stats(&ratings, now);

    assert_eq!(stats.average_rating, 3.33);
    assert_eq!(stats.recent_average, 4.5);
}

#[test]
fn test_recent_average_zero_when_nothing_recent() {
    let ratings = vec![rating_at(1, Some(1), 40, days_after_base(0))];
    let stats = network_stats(&ratings, days_after_base(90));

    assert_eq!(stats.average_rating, 4.0);
    assert_eq!(stats.recent_average, 0.0);
}

#[test]
fn test_user_summary_empty() {
    let summary = user_summary(&[], base_time());

    assert_eq!(summary.total_ratings, 0);
    assert_eq!(summary.average_given, 0.0);
    assert_eq!(summary.distinct_networks_rated, 0);
    assert_eq!(summary.recent_activity, 0);
    assert_eq!(summary.favorite_rating_value, None);
}

#[test]
fn test_user_summary() {
    let user = Uuid::new_v4();
    let mut ratings = vec![
        rating_at(1, Some(1), 40, days_after_base(0)),
        rating_at(2, Some(2), 40, days_after_base(8)),
        rating_at(3, Some(2), 20, days_after_base(9)),
        rating_at(4, None, 30, days_after_base(10)),
    ];
    for r in &mut ratings {
        r.user_id = user;
    }

    let summary = user_summary(&ratings, days_after_base(10));

    assert_eq!(summary.total_ratings, 4);
    assert_eq!(summary.average_given, 3.25);
    assert_eq!(summary.distinct_networks_rated, 2);
    assert_eq!(summary.recent_activity, 3);
    assert_eq!(summary.favorite_rating_value.as_deref(), Some("4.0"));
}

#[test]
fn test_favorite_value_tie_goes_to_first_seen() {
    let ratings = vec![
        rating(1, Some(1), 30),
        rating(2, Some(1), 50),
        rating(3, Some(1), 50),
        rating(4, Some(1), 30),
    ];
    assert_eq!(favorite_value(&ratings).as_deref(), Some("3.0"));

    let reordered = vec![
        rating(1, Some(1), 50),
        rating(2, Some(1), 30),
        rating(3, Some(1), 30),
        rating(4, Some(1), 50),
    ];
    assert_eq!(favorite_value(&reordered).as_deref(), Some("5.0"));

    let ratings = vec![rating(1, Some(1), 50), rating(2, Some(1), 30)];
    assert_eq!(favorite_value(&ratings).as_deref(), Some("5.0"));
}

#[test]
fn test_trend_no_data() {
    let old = vec![rating_at(1, Some(1), 50, days_after_base(0))];
    let trend = network_trend(&old, days_after_base(100), 30);

    assert_eq!(trend.trend, Trend::NoData);
    assert_eq!(trend.change, 0.0);
    assert_eq!(trend.count_in_window, 0);

    let trend = network_trend(&[], days_after_base(100), 30);
    assert_eq!(trend.trend, Trend::NoData);
}

#[test]
fn test_trend_declining_across_midpoint() {
    let ratings = vec![
        rating_at(1, Some(1), 50, days_after_base(0)),
        rating_at(2, Some(1), 30, days_after_base(20)),
    ];

    let trend = network_trend(&ratings, days_after_base(30), 30);

    assert_eq!(trend.first_half_avg, 5.0);
    assert_eq!(trend.second_half_avg, 3.0);
    assert_eq!(trend.change, -2.0);
    assert_eq!(trend.trend, Trend::Declining);
    assert_eq!(trend.count_in_window, 2);
    assert_eq!(trend.window_days, 30);
}

#[test]
fn test_trend_improving_and_stable() {
    let improving = vec![
        rating_at(1, Some(1), 20, days_after_base(2)),
        rating_at(2, Some(1), 40, days_after_base(25)),
    ];
    assert_eq!(
        network_trend(&improving, days_after_base(30), 30).trend,
        Trend::Improving
    );

    let stable = vec![
        rating_at(1, Some(1), 40, days_after_base(2)),
        rating_at(2, Some(1), 40, days_after_base(25)),
    ];
    let trend = network_trend(&stable, days_after_base(30), 30);
    assert_eq!(trend.trend, Trend::Stable);
    assert_eq!(trend.change, 0.0);
}

#[test]
fn test_trend_with_one_empty_half_is_stable() {
    let ratings = vec![
        rating_at(1, Some(1), 50, days_after_base(20)),
        rating_at(2, Some(1), 10, days_after_base(25)),
    ];

    let trend = network_trend(&ratings, days_after_base(30), 30);

    assert_eq!(trend.trend, Trend::Stable);
    assert_eq!(trend.change, 0.0);
    assert_eq!(trend.first_half_avg, 0.0);
    assert_eq!(trend.second_half_avg, 3.0);
    assert_eq!(trend.count_in_window, 2);
}

#[test]
fn test_trend_window_longer_than_calendar_is_clamped() {
    let now = days_after_base(30);
    assert_eq!(window_start(now, u32::MAX), chrono::DateTime::<chrono::Utc>::MIN_UTC);
    assert_eq!(window_start(now, 30), days_after_base(0));

    let ratings = vec![
        rating_at(1, Some(1), 50, days_after_base(0)),
        rating_at(2, Some(1), 30, days_after_base(20)),
    ];
    let trend = network_trend(&ratings, now, u32::MAX);

    assert_eq!(trend.trend, Trend::Stable);
    assert_eq!(trend.count_in_window, 2);
    assert_eq!(trend.window_days, u32::MAX);
}

#[test]
fn test_grade_requires_five_ratings() {
    assert_eq!(grade(4.8, 3), Grade::InsufficientData);
    assert_eq!(grade(5.0, 0), Grade::InsufficientData);
    assert_eq!(grade(4.8, 3).to_string(), "Insufficient Data");
}

#[test]
fn test_grade_thresholds_at_full_confidence() {
    assert_eq!(grade(4.5, 50), Grade::APlus);
    assert_eq!(grade(4.0, 50), Grade::A);
    assert_eq!(grade(3.5, 120), Grade::BPlus);
    assert_eq!(grade(3.0, 50), Grade::B);
    assert_eq!(grade(2.5, 50), Grade::CPlus);
    assert_eq!(grade(2.0, 50), Grade::C);
    assert_eq!(grade(1.5, 50), Grade::D);
    assert_eq!(grade(1.49, 50), Grade::F);
}

#[test]
fn test_grade_damped_by_sample_size() {
    // 5.0 * 25 / 50 = 2.5
    assert_eq!(grade(5.0, 25), Grade::CPlus);
    // 5.0 * 5 / 50 = 0.5
    assert_eq!(grade(5.0, 5), Grade::F);
}

#[test]
fn test_grade_serializes_as_label() {
    assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
    assert_eq!(
        serde_json::to_string(&Grade::InsufficientData).unwrap(),
        "\"Insufficient Data\""
    );
}
