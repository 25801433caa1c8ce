//! Identifier module - classification and Módulo 11 validation of national identifiers
//!
//! Two identifier shapes are recognised, distinguished only by digit count:
//! - 11 digits: individual taxpayer identifier (`000.000.000-00`)
//! - 14 digits: organization identifier (`00.000.000/0000-00`)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Digit count of an individual identifier
pub const INDIVIDUAL_LEN: usize = 11;

/// Digit count of an organization identifier
pub const ORGANIZATION_LEN: usize = 14;

/// Error reported for input without any digit
pub const ERR_EMPTY: &str = "empty identifier";

/// Error reported for any digit count other than 11 or 14
pub const ERR_LENGTH: &str = "identifier must have 11 or 14 digits";

/// Error reported when an individual identifier fails its check digits
pub const ERR_INDIVIDUAL_CHECK: &str = "invalid individual identifier: check digits do not match";

/// Error reported when an organization identifier fails its check digits
pub const ERR_ORGANIZATION_CHECK: &str =
    "invalid organization identifier: check digits do not match";

const ORGANIZATION_WEIGHTS_FIRST: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const ORGANIZATION_WEIGHTS_SECOND: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Kind of identifier, determined solely by digit count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    /// 11-digit personal identifier
    Individual,

    /// 14-digit entity identifier
    Organization,
}

impl IdentifierKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::Individual => "individual",
            IdentifierKind::Organization => "organization",
        }
    }

    /// Number of digits an identifier of this kind carries
    pub fn digit_count(&self) -> usize {
        match self {
            IdentifierKind::Individual => INDIVIDUAL_LEN,
            IdentifierKind::Organization => ORGANIZATION_LEN,
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of validating a single identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether the identifier passed every check
    pub valid: bool,

    /// Detected kind (None when the digit count matches neither kind)
    pub kind: Option<IdentifierKind>,

    /// Canonical formatted representation (normalized digits for bad lengths)
    pub formatted: String,

    /// User-facing error messages, in the order they were detected
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    fn invalid(kind: Option<IdentifierKind>, formatted: String, error: &str) -> Self {
        Self {
            valid: false,
            kind,
            formatted,
            errors: vec![error.to_string()],
        }
    }
}

/// A validated national identifier
///
/// Only constructed through [`Identifier::parse`], so holding one means the
/// check digits were verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    raw: String,
    digits: String,
    kind: IdentifierKind,
    formatted: String,
}

impl Identifier {
    /// Validate `input` and build an identifier, or return the failing outcome
    ///
    /// # Examples
    ///
    /// ```
    /// use ddscore_domain::{Identifier, IdentifierKind};
    ///
    /// let id = Identifier::parse("111.444.777-35").unwrap();
    /// assert_eq!(id.kind(), IdentifierKind::Individual);
    /// assert_eq!(id.digits(), "11144477735");
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationOutcome> {
        let outcome = validate(input);
        match outcome.kind {
            Some(kind) if outcome.valid => Ok(Self {
                raw: input.to_string(),
                digits: normalize(input),
                kind,
                formatted: outcome.formatted,
            }),
            _ => Err(outcome),
        }
    }

    /// Input exactly as supplied by the caller
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Digits only
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Identifier kind
    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// Canonical punctuated form
    pub fn formatted(&self) -> &str {
        &self.formatted
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}

/// Strip every non-digit character
pub fn normalize(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Detect the identifier kind from the digit count alone
pub fn detect_kind(input: &str) -> Option<IdentifierKind> {
    match normalize(input).len() {
        INDIVIDUAL_LEN => Some(IdentifierKind::Individual),
        ORGANIZATION_LEN => Some(IdentifierKind::Organization),
        _ => None,
    }
}

/// Classify and checksum-validate an identifier
///
/// Never fails: malformed input yields an invalid outcome with an error message.
///
/// # Examples
///
/// ```
/// use ddscore_domain::identifier::validate;
///
/// let outcome = validate("11.222.333/0001-81");
/// assert!(outcome.valid);
/// assert_eq!(outcome.formatted, "11.222.333/0001-81");
/// ```
pub fn validate(input: &str) -> ValidationOutcome {
    let digits = normalize(input);

    match digits.len() {
        0 => ValidationOutcome::invalid(None, String::new(), ERR_EMPTY),
        INDIVIDUAL_LEN => {
            let formatted = format_individual(&digits);
            if individual_digits_valid(&to_values(&digits)) {
                ValidationOutcome {
                    valid: true,
                    kind: Some(IdentifierKind::Individual),
                    formatted,
                    errors: Vec::new(),
                }
            } else {
                ValidationOutcome::invalid(
                    Some(IdentifierKind::Individual),
                    formatted,
                    ERR_INDIVIDUAL_CHECK,
                )
            }
        }
        ORGANIZATION_LEN => {
            let formatted = format_organization(&digits);
            if organization_digits_valid(&to_values(&digits)) {
                ValidationOutcome {
                    valid: true,
                    kind: Some(IdentifierKind::Organization),
                    formatted,
                    errors: Vec::new(),
                }
            } else {
                ValidationOutcome::invalid(
                    Some(IdentifierKind::Organization),
                    formatted,
                    ERR_ORGANIZATION_CHECK,
                )
            }
        }
        _ => ValidationOutcome::invalid(None, digits, ERR_LENGTH),
    }
}

/// Format-as-you-type
///
/// Up to 11 digits are laid out with the individual pattern, more than 11 with
/// the organization pattern. Punctuation only appears once the digits after it
/// are present; digits past the 14th are dropped.
pub fn format(input: &str) -> String {
    let digits = normalize(input);
    if digits.len() <= INDIVIDUAL_LEN {
        format_individual(&digits)
    } else {
        format_organization(&digits)
    }
}

/// Lay out digits as `000.000.000-00`, growing with the input
fn format_individual(digits: &str) -> String {
    match digits.len() {
        0..=3 => digits.to_string(),
        4..=6 => format!("{}.{}", &digits[..3], &digits[3..]),
        7..=9 => format!("{}.{}.{}", &digits[..3], &digits[3..6], &digits[6..]),
        n => format!(
            "{}.{}.{}-{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..n.min(INDIVIDUAL_LEN)]
        ),
    }
}

/// Lay out digits as `00.000.000/0000-00`, growing with the input
fn format_organization(digits: &str) -> String {
    match digits.len() {
        0..=2 => digits.to_string(),
        3..=5 => format!("{}.{}", &digits[..2], &digits[2..]),
        6..=8 => format!("{}.{}.{}", &digits[..2], &digits[2..5], &digits[5..]),
        9..=12 => format!(
            "{}.{}.{}/{}",
            &digits[..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..]
        ),
        n => format!(
            "{}.{}.{}/{}-{}",
            &digits[..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..12],
            &digits[12..n.min(ORGANIZATION_LEN)]
        ),
    }
}

fn to_values(digits: &str) -> Vec<u32> {
    digits.bytes().map(|b| u32::from(b - b'0')).collect()
}

fn all_identical(values: &[u32]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

/// Módulo 11 reduction: remainder below 2 maps to 0, otherwise `11 - remainder`
fn check_digit<I>(values: &[u32], weights: I) -> u32
where
    I: IntoIterator<Item = u32>,
{
    let sum: u32 = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

fn individual_digits_valid(values: &[u32]) -> bool {
    if all_identical(values) {
        return false;
    }

    let first = check_digit(&values[..9], (2..=10).rev());
    if first != values[9] {
        return false;
    }

    let second = check_digit(&values[..10], (2..=11).rev());
    second == values[10]
}

fn organization_digits_valid(values: &[u32]) -> bool {
    if all_identical(values) {
        return false;
    }

    let first = check_digit(&values[..12], ORGANIZATION_WEIGHTS_FIRST);
    if first != values[12] {
        return false;
    }

    let second = check_digit(&values[..13], ORGANIZATION_WEIGHTS_SECOND);
    second == values[13]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_individual() {
        let outcome = validate("11144477735");
        assert!(outcome.valid);
        assert_eq!(outcome.kind, Some(IdentifierKind::Individual));
        assert_eq!(outcome.formatted, "111.444.777-35");
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_valid_individual_with_punctuation() {
        let outcome = validate(" 111.444.777-35 ");
        assert!(outcome.valid);
        assert_eq!(outcome.formatted, "111.444.777-35");
    }

    #[test]
    fn test_all_identical_individual_rejected() {
        let outcome = validate("11111111111");
        assert!(!outcome.valid);
        assert_eq!(outcome.kind, Some(IdentifierKind::Individual));
        assert_eq!(outcome.errors, vec![ERR_INDIVIDUAL_CHECK.to_string()]);
    }

    #[test]
    fn test_individual_wrong_check_digit() {
        let outcome = validate("11144477736");
        assert!(!outcome.valid);
        assert_eq!(outcome.errors, vec![ERR_INDIVIDUAL_CHECK.to_string()]);
    }

    #[test]
    fn test_valid_organization() {
        let outcome = validate("11222333000181");
        assert!(outcome.valid);
        assert_eq!(outcome.kind, Some(IdentifierKind::Organization));
        assert_eq!(outcome.formatted, "11.222.333/0001-81");
    }

    #[test]
    fn test_organization_wrong_check_digit() {
        let outcome = validate("11.222.333/0001-82");
        assert!(!outcome.valid);
        assert_eq!(outcome.kind, Some(IdentifierKind::Organization));
        assert_eq!(outcome.errors, vec![ERR_ORGANIZATION_CHECK.to_string()]);
    }

    #[test]
    fn test_all_identical_organization_rejected() {
        let outcome = validate("00000000000000");
        assert!(!outcome.valid);
    }

    #[test]
    fn test_empty_input() {
        let outcome = validate("abc.-/");
        assert!(!outcome.valid);
        assert_eq!(outcome.kind, None);
        assert_eq!(outcome.formatted, "");
        assert_eq!(outcome.errors, vec![ERR_EMPTY.to_string()]);
    }

    #[test]
    fn test_wrong_length() {
        let outcome = validate("123.456");
        assert!(!outcome.valid);
        assert_eq!(outcome.kind, None);
        assert_eq!(outcome.formatted, "123456");
        assert_eq!(outcome.errors, vec![ERR_LENGTH.to_string()]);
    }

    #[test]
    fn test_incremental_format() {
        assert_eq!(format(""), "");
        assert_eq!(format("111"), "111");
        assert_eq!(format("1114"), "111.4");
        assert_eq!(format("1114447"), "111.444.7");
        assert_eq!(format("1114447773"), "111.444.777-3");
        assert_eq!(format("11144477735"), "111.444.777-35");
        assert_eq!(format("112223330"), "112.223.330");
        assert_eq!(format("112223330001"), "11.222.333/0001");
        assert_eq!(format("1122233300018"), "11.222.333/0001-8");
        assert_eq!(format("11222333000181"), "11.222.333/0001-81");
    }

    #[test]
    fn test_format_drops_excess_digits() {
        assert_eq!(format("1122233300018199"), "11.222.333/0001-81");
    }

    #[test]
    fn test_detect_kind() {
        assert_eq!(detect_kind("111.444.777-35"), Some(IdentifierKind::Individual));
        assert_eq!(detect_kind("11.222.333/0001-81"), Some(IdentifierKind::Organization));
        assert_eq!(detect_kind("123"), None);
    }

    #[test]
    fn test_identifier_parse() {
        let id = Identifier::parse("11222333000181").unwrap();
        assert_eq!(id.kind(), IdentifierKind::Organization);
        assert_eq!(id.raw(), "11222333000181");
        assert_eq!(id.to_string(), "11.222.333/0001-81");

        let err = Identifier::parse("11111111111").unwrap_err();
        assert!(!err.valid);
    }
}
