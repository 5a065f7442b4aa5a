//! Type-Safe About-Info Record Wrapper
//!
//! The about collection holds a single row: bio, background lists, and an
//! optional resume link. It participates in the universal Item model so it
//! shares the store plumbing, but it is never reordered.

use crate::models::item::{optional_str, optional_str_list, require_str};
use crate::models::{Collection, Item, ValidationError};
use serde_json::json;

/// Type-safe wrapper for the about-info row
pub struct AboutRecord {
    item: Item,
}

impl AboutRecord {
    /// Start building a new about-info record
    #[allow(clippy::new_ret_no_self)]
    pub fn new(bio: String) -> AboutRecordBuilder {
        AboutRecordBuilder {
            bio,
            education: Vec::new(),
            experience: Vec::new(),
            skills: Vec::new(),
            resume_url: None,
        }
    }

    /// Create an AboutRecord from a stored Item
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the item is not an about row or its
    /// `bio` property is missing or ill-typed. The list fields default to
    /// empty when absent; `resume_url` is optional.
    pub fn from_item(item: Item) -> Result<Self, ValidationError> {
        if item.collection != Collection::About {
            return Err(ValidationError::wrong_collection(
                Collection::About.as_str(),
                item.collection.as_str(),
            ));
        }

        require_str(&item.properties, "bio")?;
        optional_str_list(&item.properties, "education")?;
        optional_str_list(&item.properties, "experience")?;
        optional_str_list(&item.properties, "skills")?;
        optional_str(&item.properties, "resume_url")?;

        Ok(Self { item })
    }

    /// Get immutable reference to the underlying universal Item
    pub fn as_item(&self) -> &Item {
        &self.item
    }

    /// Consume the wrapper, returning the universal Item for storage
    pub fn into_item(self) -> Item {
        self.item
    }

    /// Biography text
    pub fn bio(&self) -> String {
        require_str(&self.item.properties, "bio").unwrap_or_default()
    }

    /// Education entries
    pub fn education(&self) -> Vec<String> {
        optional_str_list(&self.item.properties, "education").unwrap_or_default()
    }

    /// Experience entries
    pub fn experience(&self) -> Vec<String> {
        optional_str_list(&self.item.properties, "experience").unwrap_or_default()
    }

    /// Skill entries
    pub fn skills(&self) -> Vec<String> {
        optional_str_list(&self.item.properties, "skills").unwrap_or_default()
    }

    /// Link to the uploaded resume, if one exists
    pub fn resume_url(&self) -> Option<String> {
        optional_str(&self.item.properties, "resume_url").unwrap_or_default()
    }
}

/// Builder for [`AboutRecord`]
pub struct AboutRecordBuilder {
    bio: String,
    education: Vec<String>,
    experience: Vec<String>,
    skills: Vec<String>,
    resume_url: Option<String>,
}

impl AboutRecordBuilder {
    /// Set the education entries
    pub fn education(mut self, education: Vec<String>) -> Self {
        self.education = education;
        self
    }

    /// Set the experience entries
    pub fn experience(mut self, experience: Vec<String>) -> Self {
        self.experience = experience;
        self
    }

    /// Set the skill entries
    pub fn skills(mut self, skills: Vec<String>) -> Self {
        self.skills = skills;
        self
    }

    /// Set the resume link
    pub fn resume_url(mut self, resume_url: String) -> Self {
        self.resume_url = Some(resume_url);
        self
    }

    /// Build the AboutRecord
    pub fn build(self) -> AboutRecord {
        let properties = json!({
            "bio": self.bio,
            "education": self.education,
            "experience": self.experience,
            "skills": self.skills,
            "resume_url": self.resume_url,
        });

        AboutRecord {
            item: Item::new(Collection::About, "About".to_string(), 1, properties),
        }
    }
}
