//! # Registrant Profile
//!
//! The attribute set a participant submits once at registration. The
//! profile store owns it; the credential issuer only reads it.
//!
//! Field names on the wire are camelCase and part of the compatibility
//! surface: the same names appear in the stored profile document and in
//! the credential payload.
//!
//! `designation` and `participationNature` belong to the richer form
//! variant and are optional. When present they must be non-empty.

use serde::{Deserialize, Serialize};

use crate::canonical::DELIMITER;
use crate::error::ValidationError;
use crate::identity::{Email, PhoneNumber, StudentId};

/// Placeholder values the registration form uses for "nothing selected".
pub const SECTION_PLACEHOLDERS: [&str; 2] = ["Select Section", "Select Section/Organization"];
/// Gender placeholder.
pub const GENDER_PLACEHOLDER: &str = "Select Gender";
/// Designation placeholder.
pub const DESIGNATION_PLACEHOLDER: &str = "Select Designation";
/// Participation placeholder.
pub const PARTICIPATION_PLACEHOLDER: &str = "Select Participation";

/// A profile attribute, in canonical signing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    /// Student identifier.
    Id,
    /// Full name.
    Name,
    /// Section or organization.
    Section,
    /// Email address.
    Email,
    /// Gender.
    Gender,
    /// Phone number.
    PhoneNumber,
    /// Designation (richer variant).
    Designation,
    /// Nature of participation (richer variant).
    ParticipationNature,
}

impl ProfileField {
    /// Every field, in canonical signing order.
    pub const ALL: [ProfileField; 8] = [
        Self::Id,
        Self::Name,
        Self::Section,
        Self::Email,
        Self::Gender,
        Self::PhoneNumber,
        Self::Designation,
        Self::ParticipationNature,
    ];

    /// The JSON field name.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Section => "section",
            Self::Email => "email",
            Self::Gender => "gender",
            Self::PhoneNumber => "phoneNumber",
            Self::Designation => "designation",
            Self::ParticipationNature => "participationNature",
        }
    }

    /// The human-readable form label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Id => "Student ID",
            Self::Name => "Name",
            Self::Section => "Section",
            Self::Email => "Email",
            Self::Gender => "Gender",
            Self::PhoneNumber => "Phone number",
            Self::Designation => "Designation",
            Self::ParticipationNature => "Nature of participation",
        }
    }

    /// Message shown when a dropdown field is left on its placeholder.
    pub fn unselected_message(&self) -> &'static str {
        match self {
            Self::Section => "Please select your section",
            Self::Gender => "Please select your gender",
            Self::Designation => "Please select your designation",
            Self::ParticipationNature => "Please select nature of participation",
            Self::Id | Self::Name | Self::Email | Self::PhoneNumber => {
                "Please fill in this field"
            }
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A registrant's self-submitted attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Full name.
    pub name: String,
    /// Student identifier (`xx-xxxxx`).
    pub id: String,
    /// Section or organization.
    pub section: String,
    /// Email address.
    pub email: String,
    /// Gender.
    pub gender: String,
    /// Phone number.
    pub phone_number: String,
    /// Designation (richer variant).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    /// Nature of participation (richer variant).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participation_nature: Option<String>,
}

impl Profile {
    /// Look up a field value. `None` only for an absent optional field.
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        match field {
            ProfileField::Id => Some(&self.id),
            ProfileField::Name => Some(&self.name),
            ProfileField::Section => Some(&self.section),
            ProfileField::Email => Some(&self.email),
            ProfileField::Gender => Some(&self.gender),
            ProfileField::PhoneNumber => Some(&self.phone_number),
            ProfileField::Designation => self.designation.as_deref(),
            ProfileField::ParticipationNature => self.participation_nature.as_deref(),
        }
    }

    /// Trim surrounding whitespace from the free-text fields, as the form
    /// does before validating.
    pub fn trimmed(mut self) -> Self {
        for s in [
            &mut self.name,
            &mut self.id,
            &mut self.email,
            &mut self.phone_number,
        ] {
            let trimmed = s.trim().to_string();
            *s = trimmed;
        }
        self
    }

    /// Validate the profile with the registration form's rules.
    ///
    /// Checks run in form order so the first reported error is the one the
    /// registrant would see first.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingField(ProfileField::Name));
        }
        if self.id.is_empty() {
            return Err(ValidationError::MissingField(ProfileField::Id));
        }
        StudentId::new(self.id.as_str())?;
        Email::new(self.email.as_str())?;
        PhoneNumber::new(self.phone_number.as_str())?;

        if self.section.is_empty() {
            return Err(ValidationError::MissingField(ProfileField::Section));
        }
        if SECTION_PLACEHOLDERS.contains(&self.section.as_str()) {
            return Err(ValidationError::Unselected(ProfileField::Section));
        }
        if self.gender.is_empty() {
            return Err(ValidationError::MissingField(ProfileField::Gender));
        }
        if self.gender == GENDER_PLACEHOLDER {
            return Err(ValidationError::Unselected(ProfileField::Gender));
        }
        check_optional(
            ProfileField::Designation,
            self.designation.as_deref(),
            DESIGNATION_PLACEHOLDER,
        )?;
        check_optional(
            ProfileField::ParticipationNature,
            self.participation_nature.as_deref(),
            PARTICIPATION_PLACEHOLDER,
        )?;

        for field in ProfileField::ALL {
            if self.get(field).is_some_and(|v| v.contains(DELIMITER)) {
                return Err(ValidationError::ReservedDelimiter(field));
            }
        }
        Ok(())
    }
}

fn check_optional(
    field: ProfileField,
    value: Option<&str>,
    placeholder: &str,
) -> Result<(), ValidationError> {
    match value {
        Some("") => Err(ValidationError::MissingField(field)),
        Some(v) if v == placeholder => Err(ValidationError::Unselected(field)),
        _ => Ok(()),
    }
}
