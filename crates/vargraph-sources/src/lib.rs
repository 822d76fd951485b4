//! vargraph-sources — Literature-source classification and metadata
//! enrichment for curated records.

pub mod cache;
pub mod pubmed;
pub mod resolver;

pub use cache::EnrichmentCache;
pub use pubmed::{EutilsClient, MetadataLookup, PubmedSummary, StaticLookup};
pub use resolver::SourceResolver;
