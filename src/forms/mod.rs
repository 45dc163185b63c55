//! Declarative field validation for the form pages.
//!
//! Each form has a plain struct mirroring its inputs and a `validate` method
//! returning either the submission-ready value or a per-field error set. The
//! error messages here are the exact strings rendered next to the inputs.

use crate::models::BookPayload;

pub(crate) const NAME_MAX: usize = 100;
pub(crate) const IMG_SRC_MAX: usize = 300;
pub(crate) const DESCRIPTION_MAX: usize = 1000;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct BookFormErrors {
    pub name: Option<String>,
    pub price: Option<String>,
    pub img_src: Option<String>,
    pub description: Option<String>,
}

impl BookFormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.img_src.is_none()
            && self.description.is_none()
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct BookForm {
    pub name: String,
    pub price: String,
    pub img_src: String,
    pub description: String,
}

impl BookForm {
    pub fn validate(&self) -> Result<BookPayload, BookFormErrors> {
        let mut errors = BookFormErrors::default();

        if self.name.is_empty() {
            errors.name = Some("Name is required".to_string());
        } else if self.name.chars().count() > NAME_MAX {
            errors.name = Some("Name is too long".to_string());
        }

        let mut price = None;
        if self.price.is_empty() {
            errors.price = Some("Price is required".to_string());
        } else {
            match normalize_price(&self.price) {
                Some(p) => price = Some(p),
                None => errors.price = Some("Price must be a number".to_string()),
            }
        }

        if self.img_src.is_empty() {
            errors.img_src = Some("Image source is required".to_string());
        } else if self.img_src.chars().count() > IMG_SRC_MAX {
            errors.img_src = Some("Image source is too long".to_string());
        }

        if self.description.is_empty() {
            errors.description = Some("Description is required".to_string());
        } else if self.description.chars().count() > DESCRIPTION_MAX {
            errors.description = Some("Description is too long".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(BookPayload {
            name: self.name.clone(),
            price: price.unwrap_or_default(),
            img_src: self.img_src.clone(),
            description: self.description.clone(),
        })
    }
}

/// Normalizes a user-entered price to a fixed-point string with two
/// fractional digits. Accepts a comma or a dot as the decimal separator.
/// Returns `None` when the input is not a finite number.
pub(crate) fn normalize_price(raw: &str) -> Option<String> {
    let cleaned = raw.trim().replace(',', ".");
    let value: f64 = cleaned.parse().ok()?;
    value.is_finite().then(|| format!("{value:.2}"))
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct LoginFormErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginFormErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), LoginFormErrors> {
        let mut errors = LoginFormErrors::default();

        if self.email.is_empty() {
            errors.email = Some("Email is required".to_string());
        } else if !email_is_valid(&self.email) {
            errors.email = Some("Email must be a valid email".to_string());
        }

        if self.password.is_empty() {
            errors.password = Some("Password is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub(crate) fn email_is_valid(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
