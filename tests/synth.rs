use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;

use form_filler::config::DataConfig;
use form_filler::sample;
use form_filler::synth;

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap())
}

#[test]
fn test_email_shape_and_domain() {
    let data = DataConfig::default();
    let re = Regex::new(r"^[^@]+@[^@]+\.[^@]+$").unwrap();
    let mut rng = rng();
    for _ in 0..200 {
        let email = synth::email(&data, &mut rng);
        assert!(re.is_match(&email), "bad email: {email}");
        let (local, domain) = email.split_once('@').unwrap();
        assert!(data.email_domains.iter().any(|d| d == domain), "unknown domain {domain}");
        let n: u32 = local.strip_prefix("user").unwrap().parse().unwrap();
        assert!((1..=99_999).contains(&n));
    }
}

#[test]
fn test_phone_within_range() {
    let data = DataConfig::default();
    let mut rng = rng();
    for _ in 0..500 {
        let phone = synth::phone(&data, &mut rng);
        assert!(phone.chars().all(|c| c.is_ascii_digit()), "not decimal: {phone}");
        let n: u64 = phone.parse().unwrap();
        assert!(n >= data.phone_min && n <= data.phone_max);
    }
}

#[test]
fn test_phone_prefix_is_prepended() {
    let data = DataConfig {
        phone_prefix: "+91".into(),
        phone_min: 100,
        phone_max: 200,
        ..DataConfig::default()
    };
    let mut rng = rng();
    for _ in 0..100 {
        let phone = synth::phone(&data, &mut rng);
        let n: u64 = phone.strip_prefix("+91").unwrap().parse().unwrap();
        assert!((100..=200).contains(&n));
    }
}

#[test]
fn test_age_within_range() {
    let data = DataConfig {
        age_min: 20,
        age_max: 22,
        ..DataConfig::default()
    };
    let mut rng = rng();
    let mut seen = [false; 3];
    for _ in 0..300 {
        let age: u32 = synth::age(&data, &mut rng).parse().unwrap();
        assert!((20..=22).contains(&age));
        seen[(age - 20) as usize] = true;
    }
    assert!(seen.iter().all(|s| *s), "bounds are inclusive");
}

#[test]
fn test_name_uses_both_lists() {
    let data = DataConfig::default();
    let mut rng = rng();
    for _ in 0..100 {
        let name = synth::name(&data, &mut rng);
        let (first, last) = name.split_once(' ').unwrap();
        assert!(data.first_names.iter().any(|n| n == first));
        assert!(data.last_names.iter().any(|n| n == last));
    }
}

#[test]
fn test_short_text_shape() {
    let data = DataConfig::default();
    let mut rng = rng();
    for _ in 0..100 {
        let text = synth::short_text(&data, &mut rng);
        let prefix = data
            .short_text_prefixes
            .iter()
            .find(|p| text.starts_with(p.as_str()))
            .expect("known prefix");
        let rest = &text[prefix.len()..];
        let suffix = data
            .short_text_suffixes
            .iter()
            .find(|s| rest.starts_with(s.as_str()))
            .expect("known suffix");
        let n: u32 = rest[suffix.len()..].parse().unwrap();
        assert!((1..=999).contains(&n));
    }
}

#[test]
fn test_paragraph_word_count() {
    let data = DataConfig::default();
    let mut rng = rng();
    for _ in 0..100 {
        let paragraph = synth::paragraph(&data, &mut rng);
        let words: Vec<&str> = paragraph.split(' ').collect();
        assert!((15..=30).contains(&words.len()), "{} words", words.len());
        assert!(words.iter().all(|w| data.random_words.iter().any(|r| r == w)));
    }
}

#[test]
fn test_empty_pools_fall_back() {
    let data = DataConfig {
        first_names: vec![],
        last_names: vec![],
        email_domains: vec![],
        email_prefix: String::new(),
        random_words: vec![],
        short_text_prefixes: vec![],
        short_text_suffixes: vec![],
        time_minutes: vec![],
        ..DataConfig::default()
    };
    let mut rng = rng();
    let email = synth::email(&data, &mut rng);
    assert!(email.starts_with("user"));
    assert!(!synth::name(&data, &mut rng).trim().is_empty());
    assert!(!synth::paragraph(&data, &mut rng).is_empty());
    let time = synth::time(&data, &mut rng);
    let minute: u32 = time[3..].parse().unwrap();
    assert!([0, 15, 30, 45].contains(&minute));
}

#[test]
fn test_date_within_window() {
    let data = DataConfig::default();
    let now = noon(2024, 6, 15);
    let earliest = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap() - chrono::Duration::days(365 * 5);
    let mut rng = rng();
    for _ in 0..300 {
        let date = synth::date(&data, &mut rng, now);
        let parsed = NaiveDate::parse_from_str(&date, "%m/%d/%Y").unwrap();
        assert!(parsed >= earliest && parsed <= now.date(), "{date} out of window");
    }
}

#[test]
fn test_date_forward_offset() {
    let data = DataConfig {
        date_range_years: 0,
        date_start_offset_days: 3,
        ..DataConfig::default()
    };
    let now = noon(2024, 1, 1);
    let mut rng = rng();
    for _ in 0..100 {
        let date = synth::date(&data, &mut rng, now);
        let parsed = NaiveDate::parse_from_str(&date, "%m/%d/%Y").unwrap();
        let offset = (parsed - now.date()).num_days();
        assert!((0..=3).contains(&offset));
    }
}

#[test]
fn test_time_within_business_hours() {
    let data = DataConfig::default();
    let mut rng = rng();
    for _ in 0..300 {
        let time = synth::time(&data, &mut rng);
        assert_eq!(time.len(), 5);
        let (h, m) = time.split_once(':').unwrap();
        let (h, m): (u32, u32) = (h.parse().unwrap(), m.parse().unwrap());
        assert!((9..=18).contains(&h));
        assert!([0, 15, 30, 45].contains(&m));
    }
}

#[test]
fn test_datetime_shape() {
    let data = DataConfig::default();
    let now = noon(2024, 6, 15);
    let earliest = now.date() - chrono::Duration::days(365 * 2);
    let mut rng = rng();
    for _ in 0..200 {
        let value = synth::datetime(&data, &mut rng, now);
        let parsed = NaiveDateTime::parse_from_str(&value, "%m/%d/%Y %H:%M").unwrap();
        assert!(parsed.date() >= earliest && parsed.date() <= now.date());
        assert!((9..=18).contains(&chrono::Timelike::hour(&parsed)));
    }
}

#[test]
fn test_checkbox_count_bounds() {
    let mut rng = rng();
    for n in 1..8 {
        for _ in 0..100 {
            let k = sample::checkbox_count(&mut rng, n, 1, 3);
            assert!(k >= 1 && k <= 3.min(n), "k={k} n={n}");
        }
    }
}

#[test]
fn test_sample_indices_distinct() {
    let mut rng = rng();
    for _ in 0..200 {
        let picked = sample::sample_indices(&mut rng, 5, 3);
        assert_eq!(picked.len(), 3);
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 3, "duplicates in {picked:?}");
        assert!(picked.iter().all(|&i| i < 5));
    }
    assert_eq!(sample::sample_indices(&mut rng, 2, 5).len(), 2);
}

#[test]
fn test_dropdown_skips_placeholder() {
    let mut rng = rng();
    for _ in 0..300 {
        let i = sample::dropdown_index(&mut rng, 4, true).unwrap();
        assert!((1..4).contains(&i));
    }
    assert_eq!(sample::dropdown_index(&mut rng, 1, true), None);
    assert_eq!(sample::dropdown_index(&mut rng, 1, false), Some(0));
}

#[test]
fn test_scale_middle_when_not_random() {
    let mut rng = rng();
    assert_eq!(sample::scale_index(&mut rng, 5, false), Some(2));
    assert_eq!(sample::scale_index(&mut rng, 10, false), Some(4));
    assert_eq!(sample::scale_index(&mut rng, 0, true), None);
}
