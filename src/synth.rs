//! Synthetic answer generation.
//!
//! Every generator draws from the caller's RNG, so a seeded `StdRng` makes a
//! run reproducible. Empty pools in the configuration fall back to the short
//! built-in lists below instead of failing.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::classify::{classify, SemanticType};
use crate::config::DataConfig;
use crate::field::FieldKind;

const FALLBACK_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "example.com",
];
const FALLBACK_EMAIL_PREFIX: &str = "user";
const FALLBACK_FIRST_NAMES: &[&str] = &["Raj", "Priya", "Amit", "Sneha"];
const FALLBACK_LAST_NAMES: &[&str] = &["Kumar", "Sharma", "Patel", "Singh"];
const FALLBACK_PREFIXES: &[&str] = &["Response", "Answer", "Reply"];
const FALLBACK_SUFFIXES: &[&str] = &["123", "456", "789"];
const FALLBACK_WORDS: &[&str] = &["This", "is", "a", "test", "response"];
const FALLBACK_MINUTES: &[u32] = &[0, 15, 30, 45];

pub const PARAGRAPH_MIN_WORDS: usize = 15;
pub const PARAGRAPH_MAX_WORDS: usize = 30;

pub const DATE_FORMAT: &str = "%m/%d/%Y";

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &'a [String], fallback: &'a [&'a str]) -> &'a str {
    match pool.choose(rng) {
        Some(item) => item.as_str(),
        None => fallback.choose(rng).copied().unwrap_or_default(),
    }
}

fn ordered<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// `<prefix><1..=99999>@<domain>`
pub fn email<R: Rng + ?Sized>(data: &DataConfig, rng: &mut R) -> String {
    let prefix = if data.email_prefix.is_empty() {
        FALLBACK_EMAIL_PREFIX
    } else {
        data.email_prefix.as_str()
    };
    let n: u32 = rng.gen_range(1..=99_999);
    let domain = pick(rng, &data.email_domains, FALLBACK_DOMAINS);
    format!("{prefix}{n}@{domain}")
}

/// Decimal number in `[phone_min, phone_max]`, with the configured prefix prepended.
pub fn phone<R: Rng + ?Sized>(data: &DataConfig, rng: &mut R) -> String {
    let (lo, hi) = ordered(data.phone_min, data.phone_max);
    let number = rng.gen_range(lo..=hi);
    format!("{}{number}", data.phone_prefix)
}

/// `"<first> <last>"`
pub fn name<R: Rng + ?Sized>(data: &DataConfig, rng: &mut R) -> String {
    let first = pick(rng, &data.first_names, FALLBACK_FIRST_NAMES);
    let last = pick(rng, &data.last_names, FALLBACK_LAST_NAMES);
    format!("{first} {last}")
}

pub fn age<R: Rng + ?Sized>(data: &DataConfig, rng: &mut R) -> String {
    let (lo, hi) = ordered(data.age_min, data.age_max);
    rng.gen_range(lo..=hi).to_string()
}

/// `"<prefix><suffix><1..=999>"`
pub fn short_text<R: Rng + ?Sized>(data: &DataConfig, rng: &mut R) -> String {
    let prefix = pick(rng, &data.short_text_prefixes, FALLBACK_PREFIXES);
    let suffix = pick(rng, &data.short_text_suffixes, FALLBACK_SUFFIXES);
    let n: u32 = rng.gen_range(1..=999);
    format!("{prefix}{suffix}{n}")
}

/// 15 to 30 words drawn with replacement, joined by single spaces.
pub fn paragraph<R: Rng + ?Sized>(data: &DataConfig, rng: &mut R) -> String {
    let count = rng.gen_range(PARAGRAPH_MIN_WORDS..=PARAGRAPH_MAX_WORDS);
    (0..count)
        .map(|_| pick(rng, &data.random_words, FALLBACK_WORDS))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uniform day in `[now - years, now + forward_days]`.
fn day_in_window<R: Rng + ?Sized>(
    rng: &mut R,
    now: NaiveDateTime,
    years: u32,
    forward_days: i64,
) -> NaiveDate {
    let today = now.date();
    let start = today - Duration::days(365 * i64::from(years));
    let end = today + Duration::days(forward_days);
    let span = (end - start).num_days().max(0);
    start + Duration::days(rng.gen_range(0..=span))
}

fn clock<R: Rng + ?Sized>(data: &DataConfig, rng: &mut R) -> (u32, u32) {
    let (lo, hi) = ordered(data.time_start_hour.min(23), data.time_end_hour.min(23));
    let hour = rng.gen_range(lo..=hi);
    let minute = data
        .time_minutes
        .choose(rng)
        .or_else(|| FALLBACK_MINUTES.choose(rng))
        .copied()
        .unwrap_or(0);
    (hour, minute.min(59))
}

/// `MM/DD/YYYY` within the trailing date window.
pub fn date<R: Rng + ?Sized>(data: &DataConfig, rng: &mut R, now: NaiveDateTime) -> String {
    day_in_window(rng, now, data.date_range_years, data.date_start_offset_days)
        .format(DATE_FORMAT)
        .to_string()
}

/// `HH:MM` within business hours.
pub fn time<R: Rng + ?Sized>(data: &DataConfig, rng: &mut R) -> String {
    let (hour, minute) = clock(data, rng);
    format!("{hour:02}:{minute:02}")
}

/// `MM/DD/YYYY HH:MM` over the datetime window.
pub fn datetime<R: Rng + ?Sized>(data: &DataConfig, rng: &mut R, now: NaiveDateTime) -> String {
    let day = day_in_window(rng, now, data.datetime_range_years, 0);
    let (hour, minute) = clock(data, rng);
    format!("{} {hour:02}:{minute:02}", day.format(DATE_FORMAT))
}

pub fn for_semantic<R: Rng + ?Sized>(ty: SemanticType, data: &DataConfig, rng: &mut R) -> String {
    match ty {
        SemanticType::Email => email(data, rng),
        SemanticType::Phone => phone(data, rng),
        SemanticType::Name => name(data, rng),
        SemanticType::Age => age(data, rng),
        SemanticType::Paragraph => paragraph(data, rng),
        SemanticType::ShortText | SemanticType::Unclassified => short_text(data, rng),
    }
}

/// Value to type into a text-like field, or `None` for choice kinds.
///
/// Multi-line fields skip classification and always get a paragraph.
pub fn text_value<R: Rng + ?Sized>(
    kind: FieldKind,
    question: &str,
    data: &DataConfig,
    rng: &mut R,
    now: NaiveDateTime,
) -> Option<String> {
    let value = match kind {
        FieldKind::ShortText => for_semantic(classify(question), data, rng),
        FieldKind::Paragraph => paragraph(data, rng),
        FieldKind::Date => date(data, rng, now),
        FieldKind::Time => time(data, rng),
        FieldKind::DateTime => datetime(data, rng, now),
        FieldKind::SingleChoice
        | FieldKind::MultiChoice
        | FieldKind::Dropdown
        | FieldKind::Scale => return None,
    };
    Some(value)
}
