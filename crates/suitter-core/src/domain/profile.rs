use serde::{Deserialize, Serialize};

use super::Address;

/// User profile. One per address; `owner` always equals its table key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub owner: Address,
    pub username: String,
    pub bio: String,
    pub image_url: Option<String>,
}

/// Outcome of a profile lookup. A missing profile is a normal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLookup {
    pub has_profile: bool,
    pub profile: Option<Profile>,
}

impl ProfileLookup {
    pub fn found(profile: Profile) -> Self {
        Self {
            has_profile: true,
            profile: Some(profile),
        }
    }

    pub fn missing() -> Self {
        Self {
            has_profile: false,
            profile: None,
        }
    }
}
