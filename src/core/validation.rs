//! Subscription form validation.
//!
//! Validation never fails: it returns a (possibly empty) map of field to message
//! and leaves it to the caller to decide how to surface problems.

use crate::{
    core::{
        lifecycle::ValidityPeriod,
        stats::try_parse_amount,
        subscription::{NewSubscription, SubscriptionPatch},
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Service name value meaning "use the free-text custom name instead".
pub const CUSTOM_SERVICE: &str = "custom";

#[allow(clippy::expect_used)] // Literal pattern, checked by the tests below
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Form fields that can carry an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    /// Customer's name
    CustomerName,
    /// Contact phone number
    PhoneNumber,
    /// Optional contact email
    CustomerEmail,
    /// Service name (or its custom override)
    SubscriptionName,
    /// Amount charged
    Amount,
    /// Validity selection
    Validity,
    /// Purchase date
    BuyDate,
    /// Expiry date
    ExpiryDate,
}

impl FormField {
    /// Key used when reporting errors
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CustomerName => "customerName",
            Self::PhoneNumber => "phoneNumber",
            Self::CustomerEmail => "customerEmail",
            Self::SubscriptionName => "subscriptionName",
            Self::Amount => "amount",
            Self::Validity => "validity",
            Self::BuyDate => "buyDate",
            Self::ExpiryDate => "expiryDate",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-to-message map; empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FormField, String>);

impl ValidationErrors {
    /// True when no field has an error
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for a field, if any
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether a field has an error
    #[must_use]
    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    /// Iterates errors in field order
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: FormField, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Raw input for creating a subscription.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionForm {
    /// Customer's name
    pub customer_name: String,
    /// Phone number in any punctuation
    pub phone_number: String,
    /// Optional email
    pub customer_email: Option<String>,
    /// Service name, or [`CUSTOM_SERVICE`]
    pub subscription_name: String,
    /// Free-text name used when `subscription_name` is custom
    pub custom_subscription_name: Option<String>,
    /// Amount as typed, possibly currency-formatted
    pub amount: String,
    /// Validity code (`1_month`, ..., `custom`)
    pub validity: String,
    /// Purchase date
    pub buy_date: Option<NaiveDate>,
    /// Expiry date
    pub expiry_date: Option<NaiveDate>,
}

impl SubscriptionForm {
    /// Service name after applying the custom override.
    #[must_use]
    pub fn resolved_subscription_name(&self) -> &str {
        if self.subscription_name == CUSTOM_SERVICE {
            self.custom_subscription_name.as_deref().unwrap_or("").trim()
        } else {
            self.subscription_name.trim()
        }
    }

    /// Converts a valid form into a record ready to insert.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] listing every field error when the form is invalid.
    pub fn into_new_subscription(self) -> Result<NewSubscription> {
        let errors = validate(&self);
        if !errors.is_empty() {
            return Err(Error::Validation {
                message: errors.to_string(),
            });
        }

        let (Some(buy_date), Some(expiry_date), Some(amount)) = (
            self.buy_date,
            self.expiry_date,
            try_parse_amount(&self.amount),
        ) else {
            return Err(Error::Validation {
                message: "incomplete form".to_string(),
            });
        };

        let subscription_name = self.resolved_subscription_name().to_string();
        let customer_email = self
            .customer_email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        Ok(NewSubscription {
            customer_name: self.customer_name.trim().to_string(),
            customer_email,
            phone_number: self.phone_number.trim().to_string(),
            subscription_name,
            amount,
            buy_date,
            expiry_date,
        })
    }
}

/// Raw input for editing a stored subscription; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionEdit {
    /// New customer name
    pub customer_name: Option<String>,
    /// New phone number in any punctuation
    pub phone_number: Option<String>,
    /// New email; a blank value clears the stored one
    pub customer_email: Option<String>,
    /// New service name
    pub subscription_name: Option<String>,
    /// New amount as typed
    pub amount: Option<String>,
    /// New purchase date
    pub buy_date: Option<NaiveDate>,
    /// New expiry date
    pub expiry_date: Option<NaiveDate>,
}

impl SubscriptionEdit {
    /// True when no field would change
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.customer_name.is_none()
            && self.phone_number.is_none()
            && self.customer_email.is_none()
            && self.subscription_name.is_none()
            && self.amount.is_none()
            && self.buy_date.is_none()
            && self.expiry_date.is_none()
    }

    /// Converts a valid edit into a patch for the persistence layer.
    ///
    /// Only the changed fields are checked here. The merged date range is checked again
    /// when the patch is applied.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] listing every field error when the edit is invalid.
    pub fn into_patch(self) -> Result<SubscriptionPatch> {
        let errors = validate_edit(&self);
        if !errors.is_empty() {
            return Err(Error::Validation {
                message: errors.to_string(),
            });
        }

        let customer_email = self.customer_email.map(|email| {
            let email = email.trim();
            (!email.is_empty()).then(|| email.to_string())
        });

        Ok(SubscriptionPatch {
            customer_name: self.customer_name.map(|n| n.trim().to_string()),
            customer_email,
            phone_number: self.phone_number.map(|p| p.trim().to_string()),
            subscription_name: self.subscription_name.map(|n| n.trim().to_string()),
            amount: self.amount.as_deref().and_then(try_parse_amount),
            buy_date: self.buy_date,
            expiry_date: self.expiry_date,
            notification_dismissed: None,
        })
    }
}

/// Digits of a phone number with all punctuation removed.
#[must_use]
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Whether an email has a `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn check_customer_name(errors: &mut ValidationErrors, name: &str) {
    if name.trim().is_empty() {
        errors.insert(FormField::CustomerName, "Customer name is required");
    }
}

fn check_phone(errors: &mut ValidationErrors, phone: &str) {
    if phone.trim().is_empty() {
        errors.insert(FormField::PhoneNumber, "Phone number is required");
    } else if phone_digits(phone).len() != 10 {
        errors.insert(
            FormField::PhoneNumber,
            "Please enter a valid 10-digit phone number",
        );
    }
}

fn check_email(errors: &mut ValidationErrors, email: Option<&str>) {
    let email = email.map_or("", str::trim);
    if !email.is_empty() && !is_valid_email(email) {
        errors.insert(FormField::CustomerEmail, "Please enter a valid email address");
    }
}

fn check_subscription_name(errors: &mut ValidationErrors, name: &str) {
    if name.trim().is_empty() {
        errors.insert(FormField::SubscriptionName, "Subscription name is required");
    }
}

fn check_amount(errors: &mut ValidationErrors, amount: &str) {
    if amount.trim().is_empty() {
        errors.insert(FormField::Amount, "Amount is required");
    } else if try_parse_amount(amount).is_none() {
        errors.insert(FormField::Amount, "Amount must be a valid number");
    }
}

/// Validates a subscription form.
#[must_use]
pub fn validate(form: &SubscriptionForm) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    check_customer_name(&mut errors, &form.customer_name);
    check_phone(&mut errors, &form.phone_number);
    check_email(&mut errors, form.customer_email.as_deref());
    check_subscription_name(&mut errors, form.resolved_subscription_name());
    check_amount(&mut errors, &form.amount);

    if form.validity.trim().is_empty() {
        errors.insert(FormField::Validity, "Validity is required");
    } else if form.validity.parse::<ValidityPeriod>().is_err() {
        errors.insert(FormField::Validity, "Please select a valid validity period");
    }

    if form.buy_date.is_none() {
        errors.insert(FormField::BuyDate, "Purchase date is required");
    }

    match (form.buy_date, form.expiry_date) {
        (_, None) => errors.insert(FormField::ExpiryDate, "Expiry date is required"),
        (Some(buy), Some(expiry)) if expiry < buy => errors.insert(
            FormField::ExpiryDate,
            "Expiry date cannot be before purchase date",
        ),
        _ => {}
    }

    errors
}

/// Validates the fields an edit sets, with the same rules as [`validate`].
#[must_use]
pub fn validate_edit(edit: &SubscriptionEdit) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if let Some(name) = &edit.customer_name {
        check_customer_name(&mut errors, name);
    }
    if let Some(phone) = &edit.phone_number {
        check_phone(&mut errors, phone);
    }
    check_email(&mut errors, edit.customer_email.as_deref());
    if let Some(name) = &edit.subscription_name {
        check_subscription_name(&mut errors, name);
    }
    if let Some(amount) = &edit.amount {
        check_amount(&mut errors, amount);
    }
    if matches!((edit.buy_date, edit.expiry_date), (Some(buy), Some(expiry)) if expiry < buy) {
        errors.insert(
            FormField::ExpiryDate,
            "Expiry date cannot be before purchase date",
        );
    }

    errors
}
