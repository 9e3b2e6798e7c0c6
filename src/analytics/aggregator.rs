//! Attendance record aggregation

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::models::analytics::{EventSummary, GenderSplit, LabelCount, PreferenceBreakdown, Summary};
use crate::models::attendance::AttendanceRecord;

/// Distributions are cut off at the five most frequent entries.
const TOP_LIMIT: usize = 5;

/// Cross-event summary over an organizer's attendance records.
///
/// Users are deduplicated by first occurrence across the whole record
/// set; the match-rate average weighs every event equally, skipping
/// events that contributed no users.
pub fn aggregate(records: &[AttendanceRecord]) -> Summary {
    let users = dedup_first_seen(records);
    let rates = per_event_rates(records);

    let event_count = rates.len();
    let avg_match_rate = if event_count == 0 {
        0
    } else {
        round_pct(rates.iter().map(|&r| f64::from(r)).sum::<f64>() / event_count as f64)
    };

    Summary {
        total_users: users.len(),
        avg_match_rate,
        event_count,
        preferences: preference_breakdown(&users),
    }
}

/// Single-event drill-down over that event's records.
pub fn event_summary(records: &[AttendanceRecord]) -> EventSummary {
    let users = dedup_first_seen(records);
    let matched_users = users.iter().filter(|r| r.matched).count();
    let match_rate = if users.is_empty() {
        0
    } else {
        round_pct(matched_users as f64 / users.len() as f64 * 100.0)
    };

    EventSummary {
        unique_users: users.len(),
        matched_users,
        match_rate,
        preferences: preference_breakdown(&users),
    }
}

/// First record per user wins; insertion order is preserved.
fn dedup_first_seen(records: &[AttendanceRecord]) -> Vec<&AttendanceRecord> {
    let mut seen = HashSet::new();
    records.iter().filter(|r| seen.insert(r.user_id)).collect()
}

/// Integer match rate per event, in first-encounter order. Events appear
/// here only if they contributed at least one record, so zero-user events
/// never dilute the average.
fn per_event_rates(records: &[AttendanceRecord]) -> Vec<u32> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut groups: HashMap<Uuid, (HashSet<Uuid>, u32)> = HashMap::new();

    for record in records {
        let (users, matched) = groups.entry(record.event_id).or_insert_with(|| {
            order.push(record.event_id);
            (HashSet::new(), 0)
        });
        if users.insert(record.user_id) && record.matched {
            *matched += 1;
        }
    }

    order
        .iter()
        .map(|event_id| {
            let (users, matched) = &groups[event_id];
            round_pct(f64::from(*matched) / users.len() as f64 * 100.0)
        })
        .collect()
}

fn preference_breakdown(users: &[&AttendanceRecord]) -> PreferenceBreakdown {
    let mut gender_split = GenderSplit::default();
    let mut drinks = Tally::default();
    let mut music = Tally::default();
    let mut ages = Tally::default();
    let mut languages = Tally::default();

    for user in users {
        if let Some(gender) = non_empty(&user.gender) {
            match gender.to_lowercase().as_str() {
                "m" | "male" => gender_split.male += 1,
                "f" | "female" => gender_split.female += 1,
                _ => gender_split.other += 1,
            }
        }
        if let Some(drink) = non_empty(&user.preferred_drink) {
            drinks.bump(drink);
        }
        if let Some(genre) = non_empty(&user.music_preference) {
            music.bump(genre);
        }
        if let Some(age_group) = non_empty(&user.age_group) {
            ages.bump(age_group);
        }
        if let Some(pref) = &user.language_preference {
            // One user may contribute several languages.
            for language in pref.resolve() {
                languages.bump(&language);
            }
        }
    }

    PreferenceBreakdown {
        gender_split,
        age_groups: ages.top(TOP_LIMIT),
        top_drinks: drinks.top(TOP_LIMIT),
        top_music: music.top(TOP_LIMIT),
        top_languages: languages.top(TOP_LIMIT),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Nearest integer, halves rounding up.
fn round_pct(value: f64) -> u32 {
    value.round() as u32
}

/// Order-preserving tally of raw string values.
#[derive(Default)]
struct Tally {
    counts: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn bump(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&at) => self.counts[at].1 += 1,
            None => {
                self.index.insert(label.to_string(), self.counts.len());
                self.counts.push((label.to_string(), 1));
            }
        }
    }

    /// Top entries by count. The sort is stable, so ties keep their
    /// first-seen order.
    fn top(mut self, limit: usize) -> Vec<LabelCount> {
        self.counts.sort_by(|a, b| b.1.cmp(&a.1));
        self.counts
            .into_iter()
            .take(limit)
            .map(|(label, count)| LabelCount { label, count })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::LanguagePreference;

    fn record(event: Uuid, user: Uuid, matched: bool) -> AttendanceRecord {
        AttendanceRecord {
            event_id: event,
            user_id: user,
            matched,
            gender: None,
            preferred_drink: None,
            music_preference: None,
            age_group: None,
            language_preference: None,
        }
    }

    #[test]
    fn deduplication_keeps_first_record_per_user() {
        let event = Uuid::new_v4();
        let user = Uuid::new_v4();
        let records = vec![record(event, user, true), record(event, user, false)];

        let summary = event_summary(&records);
        assert_eq!(summary.unique_users, 1);
        assert_eq!(summary.matched_users, 1);
        assert_eq!(summary.match_rate, 100);
    }

    #[test]
    fn aggregate_is_idempotent() {
        let event = Uuid::new_v4();
        let users: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let mut records: Vec<AttendanceRecord> = users
            .iter()
            .enumerate()
            .map(|(i, &u)| record(event, u, i % 2 == 0))
            .collect();
        records[0].preferred_drink = Some("cola".to_string());
        records[1].gender = Some("F".to_string());

        assert_eq!(aggregate(&records), aggregate(&records));
    }

    #[test]
    fn zero_user_events_are_excluded_from_the_average() {
        // Event A: 2 users, 1 matched -> 50%. Event B contributes no
        // records at all, so it must not drag the average to 25%.
        let event_a = Uuid::new_v4();
        let records = vec![
            record(event_a, Uuid::new_v4(), true),
            record(event_a, Uuid::new_v4(), false),
        ];

        let summary = aggregate(&records);
        assert_eq!(summary.event_count, 1);
        assert_eq!(summary.avg_match_rate, 50);
    }

    #[test]
    fn average_weighs_events_equally() {
        let event_a = Uuid::new_v4();
        let event_b = Uuid::new_v4();
        // A: 1/1 matched = 100%. B: 1/4 matched = 25%. Event-weighted
        // average is 63 (62.5 rounded up), not the user-weighted 40%.
        let mut records = vec![record(event_a, Uuid::new_v4(), true)];
        records.push(record(event_b, Uuid::new_v4(), true));
        for _ in 0..3 {
            records.push(record(event_b, Uuid::new_v4(), false));
        }

        let summary = aggregate(&records);
        assert_eq!(summary.event_count, 2);
        assert_eq!(summary.avg_match_rate, 63);
    }

    #[test]
    fn top_entries_break_ties_by_first_seen_order() {
        let event = Uuid::new_v4();
        let mut records = Vec::new();
        let mut add = |drink: &str| {
            let mut r = record(event, Uuid::new_v4(), false);
            r.preferred_drink = Some(drink.to_string());
            records.push(r);
        };
        // Encounter order: cola, tea, beer. Counts: cola 3, tea 3, beer 5.
        for _ in 0..3 {
            add("cola");
            add("tea");
        }
        for _ in 0..5 {
            add("beer");
        }

        let summary = aggregate(&records);
        assert_eq!(
            summary.preferences.top_drinks,
            vec![
                LabelCount::new("beer", 5),
                LabelCount::new("cola", 3),
                LabelCount::new("tea", 3),
            ]
        );
    }

    #[test]
    fn top_list_is_capped_at_five() {
        let event = Uuid::new_v4();
        let records: Vec<AttendanceRecord> = (0..7)
            .map(|i| {
                let mut r = record(event, Uuid::new_v4(), false);
                r.age_group = Some(format!("group-{i}"));
                r
            })
            .collect();

        assert_eq!(aggregate(&records).preferences.age_groups.len(), 5);
    }

    #[test]
    fn gender_buckets_are_case_insensitive_with_other_catchall() {
        let event = Uuid::new_v4();
        let genders = [
            Some("M"),
            Some("male"),
            Some("f"),
            Some("Female"),
            Some("nonbinary"),
            Some(""),
            None,
        ];
        let records: Vec<AttendanceRecord> = genders
            .iter()
            .map(|g| {
                let mut r = record(event, Uuid::new_v4(), false);
                r.gender = g.map(str::to_string);
                r
            })
            .collect();

        let split = aggregate(&records).preferences.gender_split;
        assert_eq!(split.male, 2);
        assert_eq!(split.female, 2);
        assert_eq!(split.other, 1);
        assert_eq!(split.total(), 5);
    }

    #[test]
    fn languages_tally_the_multiset_across_users() {
        let event = Uuid::new_v4();
        let prefs = [
            Some(LanguagePreference::Delimited("en, fr".to_string())),
            Some(LanguagePreference::Encoded(r#"["en","de"]"#.to_string())),
            Some(LanguagePreference::ListOf(vec!["en".to_string()])),
            None,
        ];
        let records: Vec<AttendanceRecord> = prefs
            .iter()
            .map(|p| {
                let mut r = record(event, Uuid::new_v4(), false);
                r.language_preference = p.clone();
                r
            })
            .collect();

        let languages = aggregate(&records).preferences.top_languages;
        assert_eq!(languages[0], LabelCount::new("en", 3));
        assert_eq!(languages[1], LabelCount::new("fr", 1));
        assert_eq!(languages[2], LabelCount::new("de", 1));
    }

    #[test]
    fn duplicate_user_preferences_count_once() {
        let event = Uuid::new_v4();
        let user = Uuid::new_v4();
        let mut first = record(event, user, false);
        first.preferred_drink = Some("wine".to_string());
        let mut second = record(event, user, false);
        second.preferred_drink = Some("wine".to_string());

        let summary = aggregate(&[first, second]);
        assert_eq!(summary.preferences.top_drinks, vec![LabelCount::new("wine", 1)]);
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        let summary = aggregate(&[]);
        assert_eq!(summary.total_users, 0);
        assert_eq!(summary.event_count, 0);
        assert_eq!(summary.avg_match_rate, 0);
        assert!(summary.preferences.top_drinks.is_empty());
    }
}
