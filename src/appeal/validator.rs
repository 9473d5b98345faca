//! Appeal validation rules.
//!
//! Rules run independently per field and every violated field lands in
//! the error list; a submission with a bad surname AND a bad phone
//! reports both. Within one field the checks are ordered (casing
//! before alphabet, character set before digit count) and stop at the
//! first violation, so each field contributes at most one error.
//!
//! Validation does not mutate the input and performs no I/O.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::errors::{FieldErrorKind, FieldErrors};
use super::policy::ValidationPolicy;
use super::reason::AppealReason;
use super::record::{AppealDraft, AppealRecord};

/// Validates a raw draft against the policy.
///
/// On success returns the fully-typed record with dates and
/// timestamps parsed into structured values. On failure returns the
/// ordered list of all violated fields.
pub fn validate(
    draft: &AppealDraft,
    policy: &ValidationPolicy,
) -> Result<AppealRecord, FieldErrors> {
    let mut errors = FieldErrors::new();

    let surname = check_name("surname", &draft.surname, policy, &mut errors);
    let name = check_name("name", &draft.name, policy, &mut errors);
    let birth_date = check_birth_date(&draft.birth_date, &mut errors);
    let phone = check_phone(&draft.phone, policy, &mut errors);
    let email = check_email(&draft.email, policy, &mut errors);
    let reason = check_reason(&draft.reason, &mut errors);
    let problem_detected_at = check_detected_at(&draft.problem_detected_at, &mut errors);

    match (
        surname,
        name,
        birth_date,
        phone,
        email,
        reason,
        problem_detected_at,
    ) {
        (
            Some(surname),
            Some(name),
            Some(birth_date),
            Some(phone),
            Some(email),
            Some(reason),
            Some(problem_detected_at),
        ) if errors.is_empty() => Ok(AppealRecord {
            surname,
            name,
            birth_date,
            phone,
            email,
            reason,
            problem_detected_at,
        }),
        _ => Err(errors),
    }
}

/// Surname/name rule: non-empty, uppercase first character, allowed
/// alphabet only, length cap.
fn check_name(
    field: &'static str,
    value: &str,
    policy: &ValidationPolicy,
    errors: &mut FieldErrors,
) -> Option<String> {
    let first = match value.chars().next() {
        Some(c) => c,
        None => {
            errors.push(
                field,
                FieldErrorKind::InvalidCasing,
                format!("{field} must not be empty"),
            );
            return None;
        }
    };

    if !first.is_uppercase() {
        errors.push(
            field,
            FieldErrorKind::InvalidCasing,
            format!("{field} must start with an uppercase letter"),
        );
        return None;
    }

    if !policy.name_alphabet().is_match(value) {
        errors.push(
            field,
            FieldErrorKind::InvalidAlphabet,
            format!("{field} contains characters outside the allowed alphabet"),
        );
        return None;
    }

    let len = value.chars().count();
    if len > policy.name_max_len() {
        errors.push(
            field,
            FieldErrorKind::InvalidLength,
            format!(
                "{field} is {len} characters long, at most {} allowed",
                policy.name_max_len()
            ),
        );
        return None;
    }

    Some(value.to_string())
}

fn check_birth_date(value: &str, errors: &mut FieldErrors) -> Option<NaiveDate> {
    match value.parse::<NaiveDate>() {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(
                "birth_date",
                FieldErrorKind::MalformedDate,
                format!("'{value}' is not a valid calendar date"),
            );
            None
        }
    }
}

/// Phone rule: allowed character set first, then digit count after
/// stripping everything that is not a digit. The value itself is kept
/// as submitted; only the digit count is derived.
fn check_phone(
    value: &str,
    policy: &ValidationPolicy,
    errors: &mut FieldErrors,
) -> Option<String> {
    if !policy.phone_charset().is_match(value) {
        errors.push(
            "phone",
            FieldErrorKind::InvalidCharacters,
            "phone may contain only digits, spaces, hyphens, parentheses and a leading +",
        );
        return None;
    }

    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < policy.phone_min_digits() || digits > policy.phone_max_digits() {
        errors.push(
            "phone",
            FieldErrorKind::InvalidLength,
            format!(
                "phone has {digits} digits, expected between {} and {}",
                policy.phone_min_digits(),
                policy.phone_max_digits()
            ),
        );
        return None;
    }

    Some(value.to_string())
}

fn check_email(
    value: &str,
    policy: &ValidationPolicy,
    errors: &mut FieldErrors,
) -> Option<String> {
    if !policy.email_shape().is_match(value) {
        errors.push(
            "email",
            FieldErrorKind::InvalidEmail,
            format!("'{value}' is not a valid email address"),
        );
        return None;
    }
    Some(value.to_string())
}

fn check_reason(value: &str, errors: &mut FieldErrors) -> Option<AppealReason> {
    match value.parse::<AppealReason>() {
        Ok(reason) => Some(reason),
        Err(_) => {
            errors.push(
                "reason",
                FieldErrorKind::UnknownReason,
                format!("'{value}' is not one of the known appeal reasons"),
            );
            None
        }
    }
}

/// Timestamp rule: seconds precision, optional fractional seconds,
/// optional trailing Z / UTC offset.
fn check_detected_at(value: &str, errors: &mut FieldErrors) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.naive_utc());
    }
    match value.parse::<NaiveDateTime>() {
        Ok(naive) => Some(naive),
        Err(_) => {
            errors.push(
                "problem_detected_at",
                FieldErrorKind::MalformedTimestamp,
                format!("'{value}' is not a valid timestamp"),
            );
            None
        }
    }
}
