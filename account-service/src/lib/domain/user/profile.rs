//! Profile preferences and their validation.
//!
//! Every preference is drawn from a small fixed set of values. A
//! [`ProfileUpdate`] holds raw, possibly absent input; [`ProfileUpdate::validate`]
//! checks each present field against its domain and yields a [`ProfilePatch`]
//! that only names the fields to change.

use std::fmt;
use std::str::FromStr;

use crate::domain::user::errors::ProfileError;
use crate::domain::user::models::User;

/// A profile field whose value must come from a fixed, enumerated domain.
pub trait Enumerated: Sized + Copy + 'static {
    /// Field name as it appears on the wire and in error messages.
    const FIELD: &'static str;

    /// Every legal value, in the same order as `ALLOWED`.
    const VARIANTS: &'static [Self];

    /// Wire representation of every legal value.
    const ALLOWED: &'static [&'static str];

    fn as_str(&self) -> &'static str;

    /// Parse a wire value. Matching is exact and case-sensitive.
    ///
    /// # Errors
    /// * `InvalidValue` - Value is not in `ALLOWED`
    fn parse(value: &str) -> Result<Self, ProfileError> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.as_str() == value)
            .ok_or_else(|| ProfileError::InvalidValue {
                field: Self::FIELD,
                value: value.to_string(),
                allowed: Self::ALLOWED,
            })
    }
}

/// Preferred pronunciation accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accent {
    #[default]
    Us,
    Uk,
}

impl Enumerated for Accent {
    const FIELD: &'static str = "preferred_accent";
    const VARIANTS: &'static [Self] = &[Accent::Us, Accent::Uk];
    const ALLOWED: &'static [&'static str] = &["US", "UK"];

    fn as_str(&self) -> &'static str {
        match self {
            Accent::Us => "US",
            Accent::Uk => "UK",
        }
    }
}

/// Self-assessed study level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudyLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Enumerated for StudyLevel {
    const FIELD: &'static str = "study_level";
    const VARIANTS: &'static [Self] = &[
        StudyLevel::Beginner,
        StudyLevel::Intermediate,
        StudyLevel::Advanced,
    ];
    const ALLOWED: &'static [&'static str] = &["BEGINNER", "INTERMEDIATE", "ADVANCED"];

    fn as_str(&self) -> &'static str {
        match self {
            StudyLevel::Beginner => "BEGINNER",
            StudyLevel::Intermediate => "INTERMEDIATE",
            StudyLevel::Advanced => "ADVANCED",
        }
    }
}

macro_rules! enumerated_conversions {
    ($($ty:ty),*) => {
        $(
            impl FromStr for $ty {
                type Err = ProfileError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as Enumerated>::parse(s)
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

enumerated_conversions!(Accent, StudyLevel);

/// Raw, unvalidated profile input. `None` and `Some("")` both mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub preferred_accent: Option<String>,
    pub study_level: Option<String>,
}

impl ProfileUpdate {
    /// Check every provided field against its domain.
    ///
    /// The whole update is rejected on the first invalid field; nothing is
    /// partially applied.
    ///
    /// # Errors
    /// * `InvalidValue` - A provided field is outside its allowed values
    pub fn validate(&self) -> Result<ProfilePatch, ProfileError> {
        Ok(ProfilePatch {
            preferred_accent: parse_present(self.preferred_accent.as_deref())?,
            study_level: parse_present(self.study_level.as_deref())?,
        })
    }
}

fn parse_present<T: Enumerated>(value: Option<&str>) -> Result<Option<T>, ProfileError> {
    value.filter(|v| !v.is_empty()).map(T::parse).transpose()
}

/// Validated set of profile changes. Absent fields leave stored values untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub preferred_accent: Option<Accent>,
    pub study_level: Option<StudyLevel>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.preferred_accent.is_none() && self.study_level.is_none()
    }

    /// Merge the patch into a user, returning whether anything was written.
    pub fn apply_to(&self, user: &mut User) -> bool {
        if let Some(accent) = self.preferred_accent {
            user.preferred_accent = accent;
        }
        if let Some(level) = self.study_level {
            user.study_level = level;
        }
        !self.is_empty()
    }
}
