//! Field validation rules
//!
//! Pure, stateless checks over candidate field values. Every rule returns
//! `Ok(())` or the human-readable reason the value was rejected; none of them
//! panic. Batch validators over whole transfer shapes live next to the shapes
//! in `app::transfer` and collect every failure instead of stopping at the
//! first one.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entities::StateCode;

/// Outcome of a single rule
pub type RuleResult = Result<(), String>;

/// Minimum age, in whole years, for a person to be registered
pub const MINIMUM_AGE: u32 = 18;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$",
    )
    .expect("valid email regex")
});
static CPF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}$").expect("valid cpf regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\([0-9]{2}\) [0-9]{4,5}-[0-9]{4}$").expect("valid phone regex"));
static ZIP_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}-[0-9]{3}$").expect("valid zip code regex"));
static ADDRESS_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid address number regex"));

pub const EMAIL_REASON: &str = "Email must be valid (e.g. user@domain.com)";
pub const CPF_REASON: &str = "CPF must follow the pattern XXX.XXX.XXX-XX";
pub const PHONE_REASON: &str = "Phone must follow the pattern (XX) XXXXX-XXXX";
pub const ZIP_CODE_REASON: &str = "Zip code must follow the pattern XXXXX-XXX";
pub const STATE_REASON: &str = "State must be a valid code (e.g. SP, RJ)";
pub const NUMBER_REASON: &str = "Number must be numeric or alphanumeric";
pub const BIRTH_DATE_PAST_REASON: &str = "Birth date must be in the past";

/// Current calendar date in the server's local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ============================================================================
// Generic rules
// ============================================================================

/// Present and not blank
pub fn required(value: &str, label: &str) -> RuleResult {
    if value.trim().is_empty() {
        Err(format!("{} is required", label))
    } else {
        Ok(())
    }
}

/// Character count within `[min, max]`, inclusive on both ends
pub fn length_between(value: &str, min: usize, max: usize, label: &str) -> RuleResult {
    let len = value.chars().count();
    if len < min || len > max {
        Err(format!(
            "{} must be between {} and {} characters",
            label, min, max
        ))
    } else {
        Ok(())
    }
}

/// Whole-string match against an anchored pattern
pub fn matches_pattern(value: &str, pattern: &Regex, reason: &str) -> RuleResult {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(reason.to_string())
    }
}

/// Membership in the fixed state-code set
pub fn state_code(value: &str) -> RuleResult {
    value
        .parse::<StateCode>()
        .map(|_| ())
        .map_err(|_| STATE_REASON.to_string())
}

/// Whole years elapsed from `from` to `to`, counted the way a calendar
/// birthday is: the year only completes once month and day are reached.
pub fn years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

/// Age eligibility. Fails when the birth date is missing, not strictly before
/// `today`, or yields fewer than `min_age` whole years.
pub fn adult(birth_date: Option<NaiveDate>, today: NaiveDate, min_age: u32) -> RuleResult {
    let reason = || format!("Person must be at least {} years old", min_age);
    match birth_date {
        Some(date) if date < today && years_between(date, today) >= min_age as i32 => Ok(()),
        _ => Err(reason()),
    }
}

// ============================================================================
// Person fields
// ============================================================================

pub fn person_name(value: &str) -> RuleResult {
    required(value, "Name")?;
    length_between(value, 3, 100, "Name")
}

pub fn email(value: &str) -> RuleResult {
    required(value, "Email")?;
    matches_pattern(value, &EMAIL_RE, EMAIL_REASON)
}

pub fn cpf(value: &str) -> RuleResult {
    required(value, "CPF")?;
    matches_pattern(value, &CPF_RE, CPF_REASON)
}

/// Optional; checked only when present
pub fn phone(value: Option<&str>) -> RuleResult {
    match value {
        Some(phone) => matches_pattern(phone, &PHONE_RE, PHONE_REASON),
        None => Ok(()),
    }
}

pub fn birth_date(value: Option<NaiveDate>, today: NaiveDate) -> RuleResult {
    match value {
        None => Err("Birth date is required".to_string()),
        Some(date) if date >= today => Err(BIRTH_DATE_PAST_REASON.to_string()),
        Some(_) => Ok(()),
    }
}

// ============================================================================
// Address fields
// ============================================================================

pub fn street(value: &str) -> RuleResult {
    required(value, "Street")?;
    length_between(value, 3, 255, "Street")
}

pub fn address_number(value: &str) -> RuleResult {
    required(value, "Number")?;
    matches_pattern(value, &ADDRESS_NUMBER_RE, NUMBER_REASON)
}

pub fn neighborhood(value: &str) -> RuleResult {
    required(value, "Neighborhood")?;
    length_between(value, 3, 100, "Neighborhood")
}

pub fn city(value: &str) -> RuleResult {
    required(value, "City")?;
    length_between(value, 2, 100, "City")
}

pub fn state(value: &str) -> RuleResult {
    required(value, "State")?;
    state_code(value)
}

pub fn zip_code(value: &str) -> RuleResult {
    required(value, "Zip code")?;
    matches_pattern(value, &ZIP_CODE_RE, ZIP_CODE_REASON)
}
