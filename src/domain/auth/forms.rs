//! Sign-up and sign-in form validation.
//!
//! Forms hold raw user input as typed into the page. A successful
//! `validate()` turns them into the request type the session manager
//! accepts; a failed one reports every offending field with the message
//! the page shows beside it.

use chrono::NaiveDate;
use std::fmt;

use super::credentials::{SignInRequest, SignUpRequest};

const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 12;

/// Input field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    DateOfBirth,
    MobileNumber,
    Password,
    ConfirmPassword,
    AcceptTerms,
}

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

/// All validation failures of a form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    fn push(&mut self, field: FormField, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message shown next to `field`, if it failed.
    pub fn message_for(&self, field: FormField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for FormErrors {}

/// Password rules shown live under the password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordRequirements {
    pub length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub number: bool,
    pub special: bool,
}

impl PasswordRequirements {
    pub fn check(password: &str) -> Self {
        let len = password.chars().count();
        Self {
            length: (MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len),
            uppercase: password.chars().any(char::is_uppercase),
            lowercase: password.chars().any(char::is_lowercase),
            number: password.chars().any(|c| c.is_ascii_digit()),
            special: password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.length && self.uppercase && self.lowercase && self.number && self.special
    }

    /// Every rule with its label and whether it currently holds.
    pub fn rules(&self) -> [(&'static str, bool); 5] {
        [
            ("8-12 characters", self.length),
            ("Uppercase letter", self.uppercase),
            ("Lowercase letter", self.lowercase),
            ("Number", self.number),
            ("Special character", self.special),
        ]
    }

    /// Labels of the rules the password does not meet yet.
    pub fn unmet(&self) -> Vec<&'static str> {
        self.rules()
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(label, _)| label)
            .collect()
    }
}

/// Raw sign-up page input.
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// `YYYY-MM-DD`, as produced by a date input.
    pub date_of_birth: String,
    pub mobile_number: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<SignUpRequest, FormErrors> {
        let mut errors = FormErrors::default();

        if self.first_name.trim().is_empty() {
            errors.push(FormField::FirstName, "First name is required");
        }
        if self.last_name.trim().is_empty() {
            errors.push(FormField::LastName, "Last name is required");
        }
        check_email(&self.email, &mut errors);

        let date_of_birth = if self.date_of_birth.trim().is_empty() {
            errors.push(FormField::DateOfBirth, "Date of birth is required");
            None
        } else {
            let parsed = NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d").ok();
            if parsed.is_none() {
                errors.push(FormField::DateOfBirth, "Please enter a valid date");
            }
            parsed
        };

        if self.mobile_number.trim().is_empty() {
            errors.push(FormField::MobileNumber, "Mobile number is required");
        }

        if self.password.is_empty() {
            errors.push(FormField::Password, "Password is required");
        } else if !PasswordRequirements::check(&self.password).is_satisfied() {
            errors.push(FormField::Password, "Password does not meet the requirements");
        }
        if self.confirm_password != self.password {
            errors.push(FormField::ConfirmPassword, "Passwords do not match");
        }
        if !self.accept_terms {
            errors.push(
                FormField::AcceptTerms,
                "You must accept the terms and conditions",
            );
        }

        match date_of_birth {
            Some(date_of_birth) if errors.is_empty() => Ok(SignUpRequest {
                email: self.email.trim().to_string(),
                password: self.password.clone(),
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                date_of_birth,
                mobile_number: self.mobile_number.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}

/// Raw sign-in page input.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<SignInRequest, FormErrors> {
        let mut errors = FormErrors::default();

        check_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.push(FormField::Password, "Password is required");
        }

        if errors.is_empty() {
            Ok(SignInRequest::new(self.email.trim(), self.password.clone()))
        } else {
            Err(errors)
        }
    }
}

fn check_email(email: &str, errors: &mut FormErrors) {
    let email = email.trim();
    if email.is_empty() {
        errors.push(FormField::Email, "Email is required");
    } else if !is_valid_email(email) {
        errors.push(FormField::Email, "Please enter a valid email address");
    }
}

/// `local@domain.tld` with no whitespace and a dot inside the domain.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
