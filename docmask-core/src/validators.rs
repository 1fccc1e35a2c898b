// File: docmask-core/src/validators.rs
//! Programmatic validation functions for specific personal data types.
//!
//! Regular expressions only find candidates. The functions in this module perform
//! the second-stage confirmation (birth dates, check digits, issuer ranges, numbering
//! plans) that separates a real identifier from a number that merely looks like one.
//!
//! All validators normalize their input to digits first, so separators such as
//! hyphens and spaces never influence the result.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ValidationConfig;
use crate::errors::{DocmaskError, ValidationError};

/// A second-stage predicate confirming a regex candidate.
///
/// Implementations may fail; the match finder treats `Err` exactly like
/// `Ok(false)` and only logs the failure.
pub trait Validate: Send + Sync {
    fn validate(&self, candidate: &str) -> Result<bool, ValidationError>;
}

impl<F> Validate for F
where
    F: Fn(&str) -> Result<bool, ValidationError> + Send + Sync,
{
    fn validate(&self, candidate: &str) -> Result<bool, ValidationError> {
        self(candidate)
    }
}

/// The built-in validators that rule configurations can reference by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidatorKind {
    Rrn,
    Fgn,
    Email,
    PhoneMobile,
    PhoneCity,
    Card,
    DriverLicense,
}

impl ValidatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorKind::Rrn => "rrn",
            ValidatorKind::Fgn => "fgn",
            ValidatorKind::Email => "email",
            ValidatorKind::PhoneMobile => "phone_mobile",
            ValidatorKind::PhoneCity => "phone_city",
            ValidatorKind::Card => "card",
            ValidatorKind::DriverLicense => "driver_license",
        }
    }
}

impl fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidatorKind {
    type Err = DocmaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rrn" => Ok(ValidatorKind::Rrn),
            "fgn" => Ok(ValidatorKind::Fgn),
            "email" => Ok(ValidatorKind::Email),
            "phone_mobile" => Ok(ValidatorKind::PhoneMobile),
            "phone_city" => Ok(ValidatorKind::PhoneCity),
            "card" => Ok(ValidatorKind::Card),
            "driver_license" => Ok(ValidatorKind::DriverLicense),
            other => Err(DocmaskError::UnknownValidator(String::new(), other.to_string())),
        }
    }
}

/// A built-in validator bound to the options it was configured with.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinValidator {
    pub kind: ValidatorKind,
    pub options: ValidationConfig,
}

impl BuiltinValidator {
    pub fn new(kind: ValidatorKind, options: ValidationConfig) -> Self {
        Self { kind, options }
    }
}

impl Validate for BuiltinValidator {
    fn validate(&self, candidate: &str) -> Result<bool, ValidationError> {
        let ok = match self.kind {
            ValidatorKind::Rrn => is_valid_rrn(candidate, self.options.rrn_checksum),
            ValidatorKind::Fgn => is_valid_fgn(candidate),
            ValidatorKind::Email => is_valid_email(candidate),
            ValidatorKind::PhoneMobile => is_valid_phone_mobile(candidate),
            ValidatorKind::PhoneCity => is_valid_phone_city(candidate),
            ValidatorKind::Card => is_valid_card(candidate, self.options.card_luhn, self.options.card_iin),
            ValidatorKind::DriverLicense => is_valid_driver_license(candidate),
        };
        Ok(ok)
    }
}

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,}$").expect("static email regex")
});

static MOBILE_PREFIXES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend(["010", "011", "016", "017", "018", "019"]);
    set
});

static AREA_CODES_3: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend([
        "031", "032", "033",
        "041", "042", "043", "044",
        "051", "052", "053", "054", "055",
        "061", "062", "063", "064",
    ]);
    set
});

const ID_CHECK_WEIGHTS: [u32; 12] = [2, 3, 4, 5, 6, 7, 8, 9, 2, 3, 4, 5];

/// Strips everything but ASCII digits.
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Validates a number using the Luhn algorithm.
///
/// # Arguments
///
/// * `num_str` - A string slice containing only digits.
///
/// # Returns
///
/// `true` if the number is valid according to the Luhn algorithm, `false` otherwise.
pub fn is_valid_luhn(num_str: &str) -> bool {
    let mut sum = 0;
    let mut alternate = false;

    for c in num_str.chars().rev() {
        let Some(mut digit) = c.to_digit(10) else { return false; };

        if alternate {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        alternate = !alternate;
    }

    sum % 10 == 0
}

fn issuer_range_ok(digits: &str) -> bool {
    let prefix = |n: usize| digits.get(..n).and_then(|p| p.parse::<u32>().ok());
    match digits.len() {
        16 => {
            let Some(p2) = prefix(2) else { return false; };
            let Some(p4) = prefix(4) else { return false; };
            digits.starts_with('4')
                || (51..=55).contains(&p2)
                || (2221..=2720).contains(&p4)
                || digits.starts_with('6')
                || digits.starts_with('9')
                || p2 == 35
        }
        15 => digits.starts_with("34") || digits.starts_with("37"),
        _ => false,
    }
}

/// Validates payment card numbers.
///
/// Accepts 15 or 16 digits after stripping separators. The issuer range check
/// and the Luhn checksum can each be switched off.
///
/// # Arguments
///
/// * `number` - The candidate, possibly containing spaces or hyphens.
/// * `use_luhn` - Require a valid Luhn checksum.
/// * `use_iin` - Require a known issuer prefix for the given length.
pub fn is_valid_card(number: &str, use_luhn: bool, use_iin: bool) -> bool {
    let digits = digits_only(number);
    if digits.len() != 15 && digits.len() != 16 {
        return false;
    }
    if use_iin && !issuer_range_ok(&digits) {
        return false;
    }
    if use_luhn && !is_valid_luhn(&digits) {
        return false;
    }
    true
}

/// Decodes the `yyMMdd` birth date of a 13-digit national ID.
///
/// The century comes from the classification digit that follows the date.
fn birth_date(digits: &str) -> Option<NaiveDate> {
    let bytes = digits.as_bytes();
    if bytes.len() < 7 {
        return None;
    }
    let century = match bytes[6] {
        b'1' | b'2' | b'5' | b'6' => 1900,
        b'3' | b'4' | b'7' | b'8' => 2000,
        b'9' | b'0' => 1800,
        _ => return None,
    };
    let yy: i32 = digits.get(0..2)?.parse().ok()?;
    let mm: u32 = digits.get(2..4)?.parse().ok()?;
    let dd: u32 = digits.get(4..6)?.parse().ok()?;
    NaiveDate::from_ymd_opt(century + yy, mm, dd)
}

fn weighted_sum(digits: &str) -> Option<u32> {
    digits
        .chars()
        .take(12)
        .zip(ID_CHECK_WEIGHTS.iter())
        .map(|(c, w)| c.to_digit(10).map(|d| d * w))
        .sum()
}

fn check_digit(digits: &str) -> Option<u32> {
    digits.chars().nth(12)?.to_digit(10)
}

/// Validates the resident registration number check digit.
pub fn is_valid_rrn_checksum(rrn: &str) -> bool {
    let digits = digits_only(rrn);
    if digits.len() != 13 {
        return false;
    }
    match (weighted_sum(&digits), check_digit(&digits)) {
        (Some(total), Some(check)) => (11 - total % 11) % 10 == check,
        _ => false,
    }
}

/// Validates a resident registration number against a given "today".
pub fn is_valid_rrn_on(rrn: &str, use_checksum: bool, today: NaiveDate) -> bool {
    let digits = digits_only(rrn);
    if digits.len() != 13 {
        return false;
    }
    match birth_date(&digits) {
        Some(date) if date <= today => {}
        _ => return false,
    }
    !use_checksum || is_valid_rrn_checksum(&digits)
}

/// Validates a resident registration number.
///
/// # Arguments
///
/// * `rrn` - The candidate, with or without the hyphen after the birth date.
/// * `use_checksum` - Also verify the weighted check digit.
///
/// # Returns
///
/// `true` if the birth date is a real date not in the future (and the check digit
/// matches when requested).
pub fn is_valid_rrn(rrn: &str, use_checksum: bool) -> bool {
    is_valid_rrn_on(rrn, use_checksum, Local::now().date_naive())
}

/// Validates a foreigner registration number against a given "today".
pub fn is_valid_fgn_on(fgn: &str, today: NaiveDate) -> bool {
    let digits = digits_only(fgn);
    if digits.len() != 13 {
        return false;
    }
    if !matches!(digits.as_bytes()[6], b'5'..=b'8') {
        return false;
    }
    match birth_date(&digits) {
        Some(date) if date <= today => {}
        _ => return false,
    }
    match (weighted_sum(&digits), check_digit(&digits)) {
        (Some(total), Some(check)) => (13 - total % 11) % 10 == check,
        _ => false,
    }
}

/// Validates a foreigner registration number (birth date, classification digit 5-8, check digit).
pub fn is_valid_fgn(fgn: &str) -> bool {
    is_valid_fgn_on(fgn, Local::now().date_naive())
}

/// Validates a mobile number: exactly 11 digits with a known carrier prefix.
pub fn is_valid_phone_mobile(number: &str) -> bool {
    let digits = digits_only(number);
    digits.len() == 11 && digits.get(..3).is_some_and(|p| MOBILE_PREFIXES.contains(p))
}

/// Validates a landline number.
///
/// Seoul (`02`) numbers have 9 or 10 digits; numbers under a three-digit area
/// code have 10 or 11 digits.
pub fn is_valid_phone_city(number: &str) -> bool {
    let digits = digits_only(number);
    if digits.starts_with("02") {
        return (9..=10).contains(&digits.len());
    }
    digits.get(..3).is_some_and(|p| AREA_CODES_3.contains(p)) && (10..=11).contains(&digits.len())
}

/// Validates that the whole candidate has the shape of an email address.
pub fn is_valid_email(addr: &str) -> bool {
    EMAIL_SHAPE.is_match(addr)
}

/// Validates a driver license number by its digit count (10 to 12).
pub fn is_valid_driver_license(number: &str) -> bool {
    (10..=12).contains(&digits_only(number).len())
}
