use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of sections a portfolio page is made of.
///
/// Sections are stored by their lowercase name; the order of [`SectionName::ALL`]
/// is the order they appear on the homepage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    About,
    Education,
    Skills,
    Projects,
    Experience,
    Contact,
}

impl SectionName {
    // ---
    pub const ALL: [SectionName; 6] = [
        SectionName::About,
        SectionName::Education,
        SectionName::Skills,
        SectionName::Projects,
        SectionName::Experience,
        SectionName::Contact,
    ];

    /// Column value used in the `portfolio.section` column.
    pub fn as_str(&self) -> &'static str {
        // ---
        match self {
            SectionName::About => "about",
            SectionName::Education => "education",
            SectionName::Skills => "skills",
            SectionName::Projects => "projects",
            SectionName::Experience => "experience",
            SectionName::Contact => "contact",
        }
    }

    /// Heading shown on the homepage.
    pub fn heading(&self) -> &'static str {
        // ---
        match self {
            SectionName::About => "About",
            SectionName::Education => "Education",
            SectionName::Skills => "Skills",
            SectionName::Projects => "Projects",
            SectionName::Experience => "Experience",
            SectionName::Contact => "Contact",
        }
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ---
        SectionName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown portfolio section: {s}"))
    }
}

/// A named block of portfolio content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    // ---
    pub name: String,
    pub content: String,
}

impl Section {
    // ---
    pub fn new(name: SectionName, content: impl Into<String>) -> Self {
        // ---
        Self {
            name: name.as_str().to_string(),
            content: content.into(),
        }
    }
}

/// A published item listed on the homepage and by the JSON API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    // ---
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

/// Everything the homepage shows, assembled from stored sections.
#[derive(Debug, Clone, Default)]
pub struct PortfolioPage {
    // ---
    pub about: String,
    pub education: String,
    pub skills: String,
    pub projects: String,
    pub experience: String,
    pub contact: String,
}

impl PortfolioPage {
    /// Builds a page from stored sections.
    ///
    /// Rows with an unknown section name are skipped; missing sections stay empty.
    pub fn from_sections(sections: Vec<Section>) -> Self {
        // ---
        let mut page = PortfolioPage::default();
        for section in sections {
            match section.name.parse::<SectionName>() {
                Ok(name) => *page.slot_mut(name) = section.content,
                Err(err) => tracing::debug!("Skipping stored section: {err}"),
            }
        }
        page
    }

    pub fn get(&self, name: SectionName) -> &str {
        // ---
        match name {
            SectionName::About => &self.about,
            SectionName::Education => &self.education,
            SectionName::Skills => &self.skills,
            SectionName::Projects => &self.projects,
            SectionName::Experience => &self.experience,
            SectionName::Contact => &self.contact,
        }
    }

    fn slot_mut(&mut self, name: SectionName) -> &mut String {
        match name {
            SectionName::About => &mut self.about,
            SectionName::Education => &mut self.education,
            SectionName::Skills => &mut self.skills,
            SectionName::Projects => &mut self.projects,
            SectionName::Experience => &mut self.experience,
            SectionName::Contact => &mut self.contact,
        }
    }
}
