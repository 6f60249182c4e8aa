//! Default portfolio content written on first start.

use crate::domain::{RepositoryPtr, Section, SectionName};

/// Content for a freshly created database. Edit the rows in PostgreSQL
/// afterwards; seeding never overwrites an existing section.
pub fn default_sections() -> Vec<Section> {
    // ---
    SectionName::ALL
        .into_iter()
        .map(|name| Section::new(name, default_text(name)))
        .collect()
}

fn default_text(name: SectionName) -> &'static str {
    match name {
        SectionName::About => {
            "I got my first computer as a kid and have been taking systems apart ever since. \
             These days I build and secure backend services."
        }
        SectionName::Education => {
            "BSc (Honours) in Computing & Cyber Security; \
             Higher Certificate in Computing & Cyber Security."
        }
        SectionName::Skills => {
            "Programming: Rust, Go, Python; Security: penetration testing, network security; \
             Tools: Docker, Kubernetes, Terraform."
        }
        SectionName::Projects => {
            "A self-hosted portfolio site backed by PostgreSQL with Prometheus metrics; \
             contributions to open-source security tooling."
        }
        SectionName::Experience => "Security intern; junior developer; platform engineer.",
        SectionName::Contact => "Email: hello@example.com",
    }
}

/// Seeds [`default_sections`] into the repository.
///
/// Failures are logged and swallowed: a site with empty sections is still
/// worth serving.
pub async fn seed_default_content(repository: &RepositoryPtr) {
    // ---
    match repository.seed_sections(&default_sections()).await {
        Ok(0) => tracing::debug!("Portfolio content already present"),
        Ok(inserted) => tracing::info!("Seeded {inserted} portfolio section(s)"),
        Err(err) => tracing::error!("Failed to seed portfolio content: {err:#}"),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn every_section_has_default_content() {
        // ---
        let sections = default_sections();
        assert_eq!(sections.len(), SectionName::ALL.len());
        for (section, name) in sections.iter().zip(SectionName::ALL) {
            assert_eq!(section.name, name.as_str());
            assert!(!section.content.is_empty());
        }
    }
}
