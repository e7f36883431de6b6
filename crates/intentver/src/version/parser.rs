use regex::Regex;

use crate::version::classifier::PreReleaseClassifier;
use crate::version::metadata::Metadata;
use crate::version::number::PreReleaseNumber;
use crate::version::pre_release::PreRelease;
use crate::version::semantic::Version;
use crate::Error;

/// Parse a SemVer 2.0.0 string (optionally `v`/`V`-prefixed) into a
/// [`Version`].
pub fn parse_version(input: &str) -> Result<Version, Error> {
    let re = Regex::new(
        r"(?x)
        ^[vV]?
        (?P<major>0|[1-9]\d*)\.
        (?P<minor>0|[1-9]\d*)\.
        (?P<patch>0|[1-9]\d*)
        (?:-(?P<pre_release>[0-9A-Za-z.-]+))?
        (?:\+(?P<metadata>[0-9A-Za-z.-]+))?
        $",
    )
    .expect("static regex is valid");

    let caps = re.captures(input).ok_or(Error::InvalidVersionFormat {
        input: input.to_string(),
    })?;

    let major = parse_numeric_field("major", &caps["major"])?;
    let minor = parse_numeric_field("minor", &caps["minor"])?;
    let patch = parse_numeric_field("patch", &caps["patch"])?;

    let pre_release = match caps.name("pre_release") {
        Some(m) => Some(parse_pre_release(m.as_str())?),
        None => None,
    };

    let metadata = match caps.name("metadata") {
        Some(m) => Some(parse_metadata(m.as_str())?),
        None => None,
    };

    Ok(Version::new(major, minor, patch, pre_release, metadata))
}

fn parse_numeric_field(field: &str, raw: &str) -> Result<u32, Error> {
    let value = raw.parse::<u32>().map_err(|_| Error::InvalidNumericField {
        field: field.to_string(),
        value: raw.to_string(),
    })?;
    check_numeric_overflow(field, raw, value)
}

/// Reject values above `2^31 - 1`, per the numeric field overflow rule.
fn check_numeric_overflow(field: &str, raw: &str, value: u32) -> Result<u32, Error> {
    if value > i32::MAX as u32 {
        return Err(Error::InvalidNumericField {
            field: field.to_string(),
            value: raw.to_string(),
        });
    }
    Ok(value)
}

fn parse_metadata(raw: &str) -> Result<Metadata, Error> {
    let identifiers: Vec<String> = raw.split('.').map(|s| s.to_string()).collect();
    Metadata::new(identifiers)
}

fn parse_pre_release(raw: &str) -> Result<PreRelease, Error> {
    let mut identifiers: Vec<String> = raw.split('.').map(|s| s.to_string()).collect();

    reject_empty_identifiers(&identifiers)?;

    // Identifier reconciliation: a single identifier like `rc10` splits
    // into `rc` + `10` before classifier resolution.
    if identifiers.len() == 1 {
        if let Some((alpha, digits)) = split_alpha_digit(&identifiers[0]) {
            identifiers = vec![alpha, digits];
        }
    }

    // Leading-zero rejection runs after reconciliation, so a compact form
    // like `rc01` is checked against its split numeric piece `01`, not the
    // pre-split `rc01` (which isn't all-digits and would otherwise slip
    // through).
    reject_leading_zero_identifiers(&identifiers)?;

    match identifiers.len() {
        1 => {
            let classifier =
                PreReleaseClassifier::from_alias(&identifiers[0]).ok_or_else(|| {
                    Error::UnrecognizedPreRelease {
                        identifiers: identifiers.join("."),
                    }
                })?;
            PreRelease::new(classifier, None)
        }
        2 => {
            let classifier =
                PreReleaseClassifier::from_alias(&identifiers[0]).ok_or_else(|| {
                    Error::UnrecognizedPreRelease {
                        identifiers: identifiers.join("."),
                    }
                })?;
            let raw_number = &identifiers[1];
            let value = raw_number
                .parse::<u32>()
                .map_err(|_| Error::UnrecognizedPreRelease {
                    identifiers: identifiers.join("."),
                })?;
            let value = check_numeric_overflow("pre_release", raw_number, value)?;
            let number = PreReleaseNumber::new(value)?;
            PreRelease::new(classifier, Some(number))
        }
        _ => Err(Error::UnrecognizedPreRelease {
            identifiers: identifiers.join("."),
        }),
    }
}

fn reject_empty_identifiers(identifiers: &[String]) -> Result<(), Error> {
    if identifiers.iter().any(String::is_empty) {
        return Err(Error::UnrecognizedPreRelease {
            identifiers: identifiers.join("."),
        });
    }
    Ok(())
}

/// Reject a numeric identifier with a leading zero (`01`, but not the bare
/// `0`). Must run on the identifier list actually used for classifier/number
/// resolution — i.e. after reconciliation splits a compact form like `rc01`
/// into `rc` + `01`.
fn reject_leading_zero_identifiers(identifiers: &[String]) -> Result<(), Error> {
    for id in identifiers {
        let is_numeric = id.chars().all(|c| c.is_ascii_digit());
        if is_numeric && id.len() > 1 && id.starts_with('0') {
            return Err(Error::InvalidNumericField {
                field: "pre_release".to_string(),
                value: id.clone(),
            });
        }
    }
    Ok(())
}

/// Split `rc10` into `("rc", "10")`. Returns `None` when there is no
/// non-empty letters/hyphen prefix followed by a non-empty digit suffix.
fn split_alpha_digit(identifier: &str) -> Option<(String, String)> {
    let split_at = identifier
        .char_indices()
        .find(|(_, c)| c.is_ascii_digit())
        .map(|(i, _)| i)?;

    if split_at == 0 {
        return None;
    }

    let (alpha, digits) = identifier.split_at(split_at);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    Some((alpha.to_string(), digits.to_string()))
}
