//! Profile graph entities.
//!
//! Every user owns exactly one [`Profile`]; the profile owns one [`Basic`]
//! record and any number of [`Experience`], [`Education`], [`Skill`] and
//! [`Project`] rows. [`ProfileGraph::provisioned`] builds the default graph
//! seeded at registration time.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder shown for accounts that never uploaded an avatar.
pub const DEFAULT_IMAGE_URL: &str = "https://static.productionready.io/images/smiley-cyrus.jpg";

/// Declares a closed string enumeration stored as text in the database.
///
/// Generates `as_str`, a fallible `parse`, `Display`, and string-backed serde
/// so wire input outside the set is rejected during deserialisation.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $( $variant:ident => $label:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $(
                #[doc = $label]
                $variant,
            )+
        }

        impl $name {
            /// Canonical label stored in the database and sent on the wire.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }

            /// Parse a stored label back into the enum.
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $( $label => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_owned()
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
                    .ok_or_else(|| format!(concat!("unknown ", stringify!($name), " value: {}"), value))
            }
        }
    };
}

string_enum! {
    /// Indian states and union territories accepted in [`Basic::state`].
    pub enum IndianState {
        AndhraPradesh => "Andhra Pradesh",
        ArunachalPradesh => "Arunachal Pradesh",
        Assam => "Assam",
        Bihar => "Bihar",
        Chhattisgarh => "Chhattisgarh",
        Goa => "Goa",
        Gujarat => "Gujarat",
        Haryana => "Haryana",
        HimachalPradesh => "Himachal Pradesh",
        JammuAndKashmir => "Jammu and Kashmir",
        Jharkhand => "Jharkhand",
        Karnataka => "Karnataka",
        Kerala => "Kerala",
        MadhyaPradesh => "Madhya Pradesh",
        Maharashtra => "Maharashtra",
        Manipur => "Manipur",
        Meghalaya => "Meghalaya",
        Mizoram => "Mizoram",
        Nagaland => "Nagaland",
        Odisha => "Odisha",
        Punjab => "Punjab",
        Rajasthan => "Rajasthan",
        Sikkim => "Sikkim",
        TamilNadu => "Tamil Nadu",
        Telangana => "Telangana",
        Tripura => "Tripura",
        UttarPradesh => "Uttar Pradesh",
        Uttarakhand => "Uttarakhand",
        WestBengal => "West Bengal",
        AndamanAndNicobarIslands => "Andaman and Nicobar Islands",
        Chandigarh => "Chandigarh",
        DadarAndNagarHaveli => "Dadar and Nagar Haveli",
        DamanAndDiu => "Daman and Diu",
        Delhi => "Delhi",
        Lakshadweep => "Lakshadweep",
        Puducherry => "Puducherry",
    }
}

string_enum! {
    /// Whether a project was personal or done at an institute.
    pub enum ProjectType {
        Personal => "Self",
        Institute => "Institute",
    }
}

/// One-to-one companion of a user: bio and avatar.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Stable identifier.
    pub id: Uuid,
    /// Free-form self description; empty until the user fills it in.
    pub bio: String,
    /// Avatar URL; [`DEFAULT_IMAGE_URL`] until replaced.
    pub image: String,
    /// Set on insert.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// Demographic and contact details, one per profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Basic {
    /// Stable identifier.
    pub id: Uuid,
    /// Date of birth.
    pub dob: NaiveDate,
    /// Primary phone number.
    pub phone: String,
    /// Secondary phone number.
    pub alternate_phone: String,
    /// City of residence.
    pub city: String,
    /// State of residence, constrained to [`IndianState`].
    pub state: IndianState,
    /// Country of residence.
    pub country: String,
    /// Professional interest headline.
    pub interest: String,
    /// Personal website URL.
    pub website: String,
    /// Set on insert.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// A single employment entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Experience {
    /// Stable identifier.
    pub id: Uuid,
    /// Role title.
    pub designation: String,
    /// Employer name.
    pub company: String,
    /// Employment start.
    pub start_date: NaiveDate,
    /// Employment end.
    pub end_date: NaiveDate,
    /// Set on insert.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// A single education entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Education {
    /// Stable identifier.
    pub id: Uuid,
    /// Degree or level attained.
    pub education_level: String,
    /// Field of study.
    pub branch: String,
    /// Awarding institute.
    pub institute: String,
    /// Enrolment start.
    pub start_date: NaiveDate,
    /// Enrolment end.
    pub end_date: NaiveDate,
    /// Set on insert.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// A single skill entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    /// Stable identifier.
    pub id: Uuid,
    /// Skill name.
    pub skill: String,
    /// When the skill was last exercised.
    pub last_used: NaiveDate,
    /// Set on insert.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// A single project entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Stable identifier.
    pub id: Uuid,
    /// Short project title.
    pub headline: String,
    /// Longer description; may be empty.
    pub description: String,
    /// Project start.
    pub from_date: NaiveDate,
    /// Project end.
    pub to_date: NaiveDate,
    /// Personal or institute project.
    pub ptype: ProjectType,
    /// Free-form supplementary notes.
    pub extra_info: String,
    /// Set on insert.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// The full profile subtree owned by one user.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileGraph {
    /// Root profile record.
    pub profile: Profile,
    /// Demographic details.
    pub basic: Basic,
    /// Employment history, oldest insertion first.
    pub experience: Vec<Experience>,
    /// Education history.
    pub education: Vec<Education>,
    /// Skill entries.
    pub skills: Vec<Skill>,
    /// Project entries.
    pub projects: Vec<Project>,
}

impl ProfileGraph {
    /// Build the default graph seeded when an account is registered.
    ///
    /// One profile, one basic record and one of each child entry, all with
    /// schema-level defaults and fresh identifiers.
    pub fn provisioned(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        Self {
            profile: Profile {
                id: Uuid::new_v4(),
                bio: String::new(),
                image: DEFAULT_IMAGE_URL.to_owned(),
                created_at: now,
                updated_at: now,
            },
            basic: Basic {
                id: Uuid::new_v4(),
                dob: today,
                phone: "XXXXXXX".to_owned(),
                alternate_phone: "XXXXXXXX".to_owned(),
                city: "Bengaluru".to_owned(),
                state: IndianState::Karnataka,
                country: "India".to_owned(),
                interest: "Web Development".to_owned(),
                website: "https://bbc.com/".to_owned(),
                created_at: now,
                updated_at: now,
            },
            experience: vec![Experience {
                id: Uuid::new_v4(),
                designation: "Software Developer".to_owned(),
                company: "SAP".to_owned(),
                start_date: today,
                end_date: today,
                created_at: now,
                updated_at: now,
            }],
            education: vec![Education {
                id: Uuid::new_v4(),
                education_level: "B.Tech.".to_owned(),
                branch: "Computer Science Engineering".to_owned(),
                institute: "VNIT Nagpur".to_owned(),
                start_date: today,
                end_date: today,
                created_at: now,
                updated_at: now,
            }],
            skills: vec![Skill {
                id: Uuid::new_v4(),
                skill: "Java".to_owned(),
                last_used: today,
                created_at: now,
                updated_at: now,
            }],
            projects: vec![Project {
                id: Uuid::new_v4(),
                headline: "Portal project".to_owned(),
                description: String::new(),
                from_date: today,
                to_date: today,
                ptype: ProjectType::Personal,
                extra_info: String::new(),
                created_at: now,
                updated_at: now,
            }],
        }
    }
}
