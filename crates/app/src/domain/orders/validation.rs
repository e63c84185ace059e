//! Checkout validation of customer details.

use std::fmt;

use crate::domain::orders::models::CustomerDetails;

/// Required length of a customer zip code, in characters.
pub const ZIP_LENGTH: usize = 5;

/// A customer detail checked at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerField {
    Name,
    Address,
    City,
    State,
    Zip,
}

impl CustomerField {
    /// Stored column name, also used as the field key in error responses.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "customer_name",
            Self::Address => "customer_address",
            Self::City => "customer_city",
            Self::State => "customer_state",
            Self::Zip => "customer_zip",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Customer name",
            Self::Address => "Customer address",
            Self::City => "Customer city",
            Self::State => "Customer state",
            Self::Zip => "Customer zip",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Blank,
    WrongLength { expected: usize },
    NotANumber,
}

/// A single failed check on a customer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: CustomerField,
    pub kind: FieldErrorKind,
}

impl FieldError {
    fn new(field: CustomerField, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }

    /// Message without the field label, e.g. `can't be blank`.
    #[must_use]
    pub fn message(&self) -> String {
        match self.kind {
            FieldErrorKind::Blank => "can't be blank".to_string(),
            FieldErrorKind::WrongLength { expected } => {
                format!("is the wrong length (should be {expected} characters)")
            }
            FieldErrorKind::NotANumber => "is not a number".to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.label(), self.message())
    }
}

/// Every failed check, in field order. Displays as a single sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Full messages, e.g. `Customer name can't be blank`.
    #[must_use]
    pub fn full_messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    fn push(&mut self, field: CustomerField, kind: FieldErrorKind) {
        self.0.push(FieldError::new(field, kind));
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_sentence(&self.full_messages()))
    }
}

impl std::error::Error for ValidationErrors {}

impl CustomerDetails {
    /// Check every field and collect all failures rather than stopping at
    /// the first.
    ///
    /// # Errors
    ///
    /// Returns the collected failures when any check fails.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        for (field, value) in [
            (CustomerField::Name, &self.name),
            (CustomerField::Address, &self.address),
            (CustomerField::City, &self.city),
            (CustomerField::State, &self.state),
            (CustomerField::Zip, &self.zip),
        ] {
            if is_blank(value) {
                errors.push(field, FieldErrorKind::Blank);
            }
        }

        if self.zip.chars().count() != ZIP_LENGTH {
            errors.push(
                CustomerField::Zip,
                FieldErrorKind::WrongLength {
                    expected: ZIP_LENGTH,
                },
            );
        }

        if !is_numeric(&self.zip) {
            errors.push(CustomerField::Zip, FieldErrorKind::NotANumber);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_numeric(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|number| number.is_finite())
}

/// Join messages as `a`, `a and b`, or `a, b, and c`.
fn to_sentence(words: &[String]) -> String {
    match words {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}
