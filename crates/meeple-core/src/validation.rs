//! # Validation Module
//!
//! Input validation for category, game, customer and rental payloads.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (apps/api)                                    │
//! │  ├── Type validation (JSON deserialization)                            │
//! │  └── Malformed bodies rejected with 400                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Shape and range checks (lengths, digit patterns, dates)           │
//! │  └── Pure: no store access                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Lookups (meeple-db)                                          │
//! │  ├── categoryId must exist                                             │
//! │  └── name / cpf uniqueness                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Database (SQLite)                                            │
//! │  ├── UNIQUE constraints                                                │
//! │  ├── CHECK constraints                                                 │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use meeple_core::validation::{validate_cpf, validate_phone};
//!
//! assert!(validate_cpf("01234567890").is_ok());
//! assert!(validate_phone("21998765432").is_ok());
//! ```

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::ValidationError;
use crate::types::{CustomerInput, NewCategory, NewGame};
use crate::{DATE_FORMAT, MAX_SEARCH_LENGTH, MIN_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,11}$").expect("phone pattern compiles"));

static CPF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{11}$").expect("cpf pattern compiles"));

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern compiles"));

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a `POST /categories` payload.
///
/// ## Rules
/// - name must not be empty (after trimming)
pub fn validate_category(category: &NewCategory) -> ValidationResult<()> {
    if category.name.trim().is_empty() {
        return Err(ValidationError::required("name"));
    }

    Ok(())
}

/// Validates a `POST /games` payload.
///
/// ## Rules
/// - name: at least 3 characters
/// - image: a valid absolute URI, when present (an empty string is not
///   a URI and is rejected; leave the field out instead)
/// - categoryId, stockTotal, pricePerDay: non-negative
///
/// Whether `categoryId` points at an existing category is a store question
/// and is checked by the caller.
pub fn validate_game(game: &NewGame) -> ValidationResult<()> {
    validate_name(&game.name)?;

    if let Some(image) = game.image.as_deref() {
        validate_image_uri(image)?;
    }

    validate_non_negative("categoryId", game.category_id)?;
    validate_non_negative("stockTotal", game.stock_total)?;
    validate_non_negative("pricePerDay", game.price_per_day)?;

    Ok(())
}

/// Validates a `POST /customers` or `PUT /customers/{id}` payload.
///
/// ## Rules
/// - name: at least 3 characters
/// - phone: 10 or 11 digits
/// - cpf: exactly 11 digits
/// - birthday: `YYYY-MM-DD` and a real calendar date
///
/// ## Returns
/// The parsed birthday, so callers don't parse it twice.
pub fn validate_customer(customer: &CustomerInput) -> ValidationResult<NaiveDate> {
    validate_name(&customer.name)?;
    validate_phone(&customer.phone)?;
    validate_cpf(&customer.cpf)?;
    validate_birthday(&customer.birthday)
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a game or customer name (at least 3 characters, trimmed).
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: MIN_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a phone number: 10 or 11 digits, nothing else.
///
/// ## Example
/// ```rust
/// use meeple_core::validation::validate_phone;
///
/// assert!(validate_phone("2134567890").is_ok());   // 10 digits
/// assert!(validate_phone("21934567890").is_ok());  // 11 digits
/// assert!(validate_phone("213456789").is_err());   // 9 digits
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    if !PHONE_PATTERN.is_match(phone) {
        return Err(ValidationError::invalid_format(
            "phone",
            "must be 10 or 11 digits",
        ));
    }

    Ok(())
}

/// Validates a cpf: exactly 11 digits.
pub fn validate_cpf(cpf: &str) -> ValidationResult<()> {
    if !CPF_PATTERN.is_match(cpf) {
        return Err(ValidationError::invalid_format("cpf", "must be exactly 11 digits"));
    }

    Ok(())
}

/// Validates and parses a birthday in `YYYY-MM-DD` form.
///
/// `2023-02-30` has the right shape but is not a date, so it is rejected.
pub fn validate_birthday(birthday: &str) -> ValidationResult<NaiveDate> {
    if !DATE_PATTERN.is_match(birthday) {
        return Err(ValidationError::invalid_format(
            "birthday",
            "must be formatted as YYYY-MM-DD",
        ));
    }

    NaiveDate::parse_from_str(birthday, DATE_FORMAT)
        .map_err(|_| ValidationError::invalid_format("birthday", "is not a calendar date"))
}

/// Validates a game image URI.
///
/// ## Rules
/// - Must parse as an absolute URI (`https://...`, `data:...`)
/// - Relative paths are rejected
pub fn validate_image_uri(image: &str) -> ValidationResult<()> {
    let image = image.trim();

    if image.is_empty() {
        return Err(ValidationError::required("image"));
    }

    let parsed = url::Url::parse(image)
        .map_err(|_| ValidationError::invalid_format("image", "must be a valid URI"))?;

    if parsed.cannot_be_a_base() && parsed.path().is_empty() {
        return Err(ValidationError::invalid_format("image", "must be a valid URI"));
    }

    Ok(())
}

/// Validates the number of days of a new rental (> 0).
pub fn validate_days_rented(days: i64) -> ValidationResult<()> {
    if days <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "daysRented".to_string(),
        });
    }

    Ok(())
}

/// Validates a `?name=` or `?cpf=` search term.
///
/// ## Returns
/// The trimmed term, or `None` if nothing is left to search for.
pub fn validate_search_term(field: &str, term: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    if term.chars().count() > MAX_SEARCH_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_SEARCH_LENGTH,
        });
    }

    Ok(Some(term.to_string()))
}

fn validate_non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn game(name: &str, image: Option<&str>) -> NewGame {
        NewGame {
            name: name.to_string(),
            image: image.map(str::to_string),
            category_id: 1,
            stock_total: 3,
            price_per_day: 1500,
        }
    }

    fn customer(phone: &str, cpf: &str, birthday: &str) -> CustomerInput {
        CustomerInput {
            name: "Ana Souza".to_string(),
            phone: phone.to_string(),
            cpf: cpf.to_string(),
            birthday: birthday.to_string(),
        }
    }

    #[test]
    fn test_validate_category() {
        assert!(validate_category(&NewCategory { name: "Strategy".into() }).is_ok());
        assert!(validate_category(&NewCategory { name: "".into() }).is_err());
        assert!(validate_category(&NewCategory { name: "   ".into() }).is_err());
    }

    #[test]
    fn test_validate_game() {
        assert!(validate_game(&game("Azul", Some("https://example.com/azul.png"))).is_ok());
        assert!(validate_game(&game("Azul", None)).is_ok());

        assert!(validate_game(&game("Go", None)).is_err());
        assert!(validate_game(&game("Azul", Some("not a uri"))).is_err());
        assert!(validate_game(&game("Azul", Some("/relative/path.png"))).is_err());
        assert!(matches!(
            validate_game(&game("Azul", Some(""))),
            Err(ValidationError::Required { .. })
        ));

        let mut negative = game("Azul", None);
        negative.stock_total = -1;
        assert!(validate_game(&negative).is_err());

        let mut negative = game("Azul", None);
        negative.price_per_day = -1;
        assert!(validate_game(&negative).is_err());

        let mut zero = game("Azul", None);
        zero.stock_total = 0;
        zero.price_per_day = 0;
        assert!(validate_game(&zero).is_ok());
    }

    #[rstest]
    #[case("1234567890", true)]
    #[case("12345678901", true)]
    #[case("123456789", false)]
    #[case("123456789012", false)]
    #[case("12345-67890", false)]
    #[case("", false)]
    #[case("٢١٩٩٨٧٦٥٤٣٢", false)]
    #[case("２１９９８７６５４３２", false)]
    fn test_validate_phone(#[case] phone: &str, #[case] ok: bool) {
        assert_eq!(validate_phone(phone).is_ok(), ok);
    }

    #[rstest]
    #[case("12345678901", true)]
    #[case("1234567890", false)]
    #[case("123456789012", false)]
    #[case("123.456.789-01", false)]
    #[case("abcdefghijk", false)]
    #[case("١٢٣٤٥٦٧٨٩٠١", false)]
    #[case("१२३४५६७८९०१", false)]
    fn test_validate_cpf(#[case] cpf: &str, #[case] ok: bool) {
        assert_eq!(validate_cpf(cpf).is_ok(), ok);
    }

    #[test]
    fn test_validate_birthday() {
        assert_eq!(
            validate_birthday("1990-05-17").unwrap(),
            NaiveDate::from_ymd_opt(1990, 5, 17).unwrap()
        );
        assert!(validate_birthday("17/05/1990").is_err());
        assert!(validate_birthday("1990-5-17").is_err());
        assert!(validate_birthday("2023-02-30").is_err());
        assert!(validate_birthday("١٩٩٠-٠٥-١٧").is_err());
    }

    #[test]
    fn test_validate_customer() {
        assert!(validate_customer(&customer("21998765432", "12345678901", "1990-05-17")).is_ok());
        assert!(validate_customer(&customer("219", "12345678901", "1990-05-17")).is_err());
        assert!(validate_customer(&customer("21998765432", "123", "1990-05-17")).is_err());

        let mut short = customer("21998765432", "12345678901", "1990-05-17");
        short.name = "Al".to_string();
        assert!(validate_customer(&short).is_err());
    }

    #[test]
    fn test_validate_days_rented() {
        assert!(validate_days_rented(1).is_ok());
        assert!(validate_days_rented(0).is_err());
        assert!(validate_days_rented(-3).is_err());
    }

    #[test]
    fn test_validate_search_term() {
        assert_eq!(validate_search_term("name", None).unwrap(), None);
        assert_eq!(validate_search_term("name", Some("  ")).unwrap(), None);
        assert_eq!(
            validate_search_term("name", Some(" azul ")).unwrap(),
            Some("azul".to_string())
        );
        assert!(validate_search_term("name", Some(&"x".repeat(101))).is_err());
    }
}
