//! Analytics aggregation integration tests
//!
//! Exercises the full path from raw attendance records, including the
//! language-preference ingestion rules, through to the rendered summary
//! shapes.

use uuid::Uuid;

use DeckMatch::analytics::{aggregate, event_summary};
use DeckMatch::models::analytics::LabelCount;
use DeckMatch::models::attendance::{AttendanceRecord, LanguagePreference};

fn record(event_id: Uuid, user_id: Uuid, matched: bool) -> AttendanceRecord {
    AttendanceRecord {
        event_id,
        user_id,
        matched,
        gender: None,
        preferred_drink: None,
        music_preference: None,
        age_group: None,
        language_preference: None,
    }
}

#[test]
fn two_event_dashboard_summary() {
    let event_a = Uuid::new_v4();
    let event_b = Uuid::new_v4();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let cleo = Uuid::new_v4();

    let mut alice_a = record(event_a, alice, true);
    alice_a.gender = Some("F".to_string());
    alice_a.preferred_drink = Some("wine".to_string());
    alice_a.language_preference = Some(LanguagePreference::Delimited("en, fr".to_string()));

    let mut bob_a = record(event_a, bob, false);
    bob_a.gender = Some("male".to_string());
    bob_a.preferred_drink = Some("beer".to_string());
    bob_a.language_preference = Some(LanguagePreference::Encoded(r#"["en","de"]"#.to_string()));

    let mut cleo_b = record(event_b, cleo, true);
    cleo_b.gender = Some("f".to_string());
    cleo_b.age_group = Some("25-34".to_string());

    // Alice also attended event B; her preferences must count once.
    let mut alice_b = record(event_b, alice, false);
    alice_b.gender = Some("F".to_string());
    alice_b.preferred_drink = Some("wine".to_string());

    let summary = aggregate(&[alice_a, bob_a, cleo_b, alice_b]);

    assert_eq!(summary.total_users, 3);
    // Event A: 1/2 matched = 50%. Event B: 1/2 matched = 50%.
    assert_eq!(summary.event_count, 2);
    assert_eq!(summary.avg_match_rate, 50);

    assert_eq!(summary.preferences.gender_split.female, 2);
    assert_eq!(summary.preferences.gender_split.male, 1);
    assert_eq!(summary.preferences.gender_split.other, 0);

    assert_eq!(
        summary.preferences.top_drinks,
        vec![LabelCount::new("wine", 1), LabelCount::new("beer", 1)]
    );
    assert_eq!(summary.preferences.top_languages[0], LabelCount::new("en", 2));
    assert_eq!(summary.preferences.age_groups, vec![LabelCount::new("25-34", 1)]);
}

#[test]
fn malformed_language_data_never_fails_the_summary() {
    let event = Uuid::new_v4();
    let mut broken = record(event, Uuid::new_v4(), false);
    broken.language_preference = Some(LanguagePreference::Encoded("[en".to_string()));

    let summary = aggregate(&[broken]);
    // The comma-split fallback keeps the raw token.
    assert_eq!(summary.preferences.top_languages, vec![LabelCount::new("[en", 1)]);
}

#[test]
fn event_drilldown_uses_first_seen_records() {
    let event = Uuid::new_v4();
    let user = Uuid::new_v4();
    let other = Uuid::new_v4();

    let records = vec![
        record(event, user, true),
        record(event, user, false),
        record(event, other, false),
    ];

    let summary = event_summary(&records);
    assert_eq!(summary.unique_users, 2);
    assert_eq!(summary.matched_users, 1);
    assert_eq!(summary.match_rate, 50);
}

#[test]
fn aggregate_matches_event_summary_for_a_single_event() {
    let event = Uuid::new_v4();
    let records: Vec<AttendanceRecord> = (0..3)
        .map(|i| record(event, Uuid::new_v4(), i == 0))
        .collect();

    let overall = aggregate(&records);
    let single = event_summary(&records);

    assert_eq!(overall.total_users, single.unique_users);
    assert_eq!(overall.avg_match_rate, single.match_rate);
    assert_eq!(overall.event_count, 1);
}

#[test]
fn rounding_is_half_up() {
    let event = Uuid::new_v4();
    // 1 of 8 matched = 12.5% -> rounds to 13.
    let records: Vec<AttendanceRecord> = (0..8)
        .map(|i| record(event, Uuid::new_v4(), i == 0))
        .collect();

    assert_eq!(event_summary(&records).match_rate, 13);
}
