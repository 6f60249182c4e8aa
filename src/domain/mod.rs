mod metrics;
mod portfolio;
mod repository;

// Publicly expose the Metrics abstraction
pub use metrics::{Metrics, MetricsPtr};

// Publicly expose the content model and its persistence abstraction
pub use portfolio::{Entry, PortfolioPage, Section, SectionName};
pub use repository::{Repository, RepositoryPtr};
