//! Classification of literature references into graph source records.
//!
//! A reference is resolved to exactly one of publication, clinical trial or
//! external source. Publications are enriched with metadata fetched through
//! the [`MetadataLookup`] trait; fetched summaries are cached for the life of
//! the resolver so each pmid is looked up at most once per batch.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use vargraph_common::{ConversionError, Result};
use vargraph_flatfile::RawLiterature;
use vargraph_model::Source;

use crate::cache::EnrichmentCache;
use crate::pubmed::MetadataLookup;

/// Curation shorthand for in-house trials and panels.
const CLINICAL_TRIALS: &[(&str, &str)] = &[
    ("oncopanel", "oncopanel"),
    ("oncopanel - cgl", "oncopanel"),
    ("pog - unpublished", "personalized oncogenomics (pog)"),
    ("pog", "personalized oncogenomics (pog)"),
    ("captur", "captur"),
    ("bcgsc - pog", "personalized oncogenomics (pog)"),
    ("bcgsc-pog", "personalized oncogenomics (pog)"),
];

/// Substrings of a source url → canonical organization title.
const SOURCE_DOMAINS: &[(&str, &str)] = &[
    ("cosmic", "catalogue of somatic mutations in cancer (cosmic)"),
    ("mycancergenome", "my cancer genome"),
    ("foundationone", "foundation one"),
    ("mdanderson", "mdanderson"),
    ("docm", "database of curated mutations (docm)"),
    ("archerdx", "archerdx"),
    ("quiver.archer", "archerdx"),
    ("intogen", "intogen"),
    ("fda.gov", "food and drug administration (fda)"),
    ("oncokb", "oncokb"),
    ("nccn", "national comprehensive cancer network (nccn)"),
    ("cancer.gov", "national cancer institute (nci)"),
];

fn numeric_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+$").unwrap())
}

fn url_scheme_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^https?://(www\.)?").unwrap())
}

fn year_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([12][0-9]{3})").unwrap())
}

fn journal_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.*?)(\([^)]+\))?$").unwrap())
}

/// Normalize a publication title for comparison and storage: lowercase, join
/// hyphenated words, drop punctuation and a leading article.
pub fn strip_title(title: &str) -> String {
    static PUNCT: OnceLock<Regex> = OnceLock::new();
    static ARTICLE: OnceLock<Regex> = OnceLock::new();
    let punct = PUNCT.get_or_init(|| Regex::new(r"[^\w\s]").unwrap());
    let article = ARTICLE.get_or_init(|| Regex::new(r"^(a|the) ").unwrap());

    let title = title.to_lowercase().replace('-', " ");
    let title = punct.replace_all(&title, "");
    let title = article.replace(&title, "");
    title.trim().to_string()
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(entry, _)| *entry == key)
        .map(|(_, value)| *value)
}

pub struct SourceResolver<L> {
    lookup: L,
    cache: EnrichmentCache,
}

impl<L: MetadataLookup> SourceResolver<L> {
    pub fn new(lookup: L, cache: EnrichmentCache) -> Self {
        Self { lookup, cache }
    }

    /// Drop the lookup and hand back the cache so it can be persisted.
    pub fn into_cache(self) -> EnrichmentCache {
        self.cache
    }

    /// Resolve one literature reference to a source record.
    pub async fn resolve(&mut self, literature: &RawLiterature) -> Result<Source> {
        let mut lit_type = literature.lit_type.to_lowercase();
        let id = literature.id.to_lowercase();
        let title = literature.title.to_lowercase();

        // Pubmed ids are sometimes filed under the wrong type tag.
        if numeric_id_pattern().is_match(&id) {
            lit_type = "pubmed".to_string();
        }

        if lit_type == "pubmed" {
            return self.resolve_publication(&id, &title).await;
        }
        if lit_type == "pmcid" || lit_type == "doi" {
            return Err(ConversionError::UnsupportedLiteratureType(lit_type));
        }
        if title == "ibm" {
            return Ok(Source::ExternalSource {
                url: None,
                title: "ibm".to_string(),
            });
        }
        if let Some(name) = lookup(CLINICAL_TRIALS, &id).or_else(|| lookup(CLINICAL_TRIALS, &title))
        {
            return Ok(Source::ClinicalTrial {
                official_title: name.to_string(),
            });
        }
        if title == "ampliseq panel v2" {
            return Ok(Source::ExternalSource {
                url: None,
                title: "ampliseq panel v2".to_string(),
            });
        }

        let url = url_scheme_pattern().replace(&id, "").to_string();
        if url.is_empty() {
            return Err(ConversionError::NoSourceUrl {
                lit_type,
                id: literature.id.clone(),
            });
        }
        let matches: Vec<String> = SOURCE_DOMAINS
            .iter()
            .filter(|(word, _)| url.contains(word))
            .map(|(_, name)| name.to_string())
            .collect();
        match matches.len() {
            0 => Err(ConversionError::UnresolvableSource(url)),
            1 => Ok(Source::ExternalSource {
                url: Some(url),
                title: matches.into_iter().next().unwrap(),
            }),
            _ => Err(ConversionError::AmbiguousSource { url, matches }),
        }
    }

    /// Fetch (or reuse) the esummary for a pmid, cross-check the recorded
    /// title against the fetched one and build the publication record.
    async fn resolve_publication(&mut self, pmid: &str, recorded_title: &str) -> Result<Source> {
        let recorded = strip_title(recorded_title);

        let summary = match self.cache.get(pmid) {
            Some(summary) => summary.clone(),
            None => {
                let summary =
                    self.lookup
                        .summary(pmid)
                        .await
                        .map_err(|err| ConversionError::Enrichment {
                            id: pmid.to_string(),
                            reason: err.to_string(),
                        })?;
                self.cache.insert(pmid.to_string(), summary.clone());
                summary
            }
        };

        let fetched = strip_title(&summary.title);
        if !recorded.is_empty()
            && recorded != fetched
            && strip_whitespace(&recorded) != strip_whitespace(&fetched)
        {
            return Err(ConversionError::TitleMismatch {
                pmid: pmid.to_string(),
                recorded,
                fetched,
            });
        }

        let year = year_pattern()
            .captures(&summary.pubdate)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok());

        // Journal names carry a trailing parenthesized qualifier, e.g.
        // "Science (New York, N.Y.)". Keep the text before it.
        let journal = journal_pattern()
            .captures(&summary.fulljournalname)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_lowercase())
            .filter(|name| !name.is_empty());

        let pmid_num: i64 = pmid.parse().map_err(|_| ConversionError::Enrichment {
            id: pmid.to_string(),
            reason: "pmid is not numeric".to_string(),
        })?;

        debug!(pmid, year, "resolved publication");
        Ok(Source::Publication {
            pmid: pmid_num,
            title: fetched,
            year,
            journal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pubmed::StaticLookup;

    fn literature(lit_type: &str, id: &str, title: &str) -> RawLiterature {
        RawLiterature {
            lit_type: lit_type.into(),
            id: id.into(),
            title: title.into(),
        }
    }

    fn resolver(lookup: StaticLookup) -> SourceResolver<StaticLookup> {
        SourceResolver::new(lookup, EnrichmentCache::new())
    }

    #[test]
    fn test_strip_title() {
        assert_eq!(
            strip_title("The TERT-promoter mutations, revisited."),
            "tert promoter mutations revisited"
        );
        assert_eq!(strip_title("A study of KRAS"), "study of kras");
    }

    #[tokio::test]
    async fn test_numeric_id_forces_publication() {
        let lookup = StaticLookup::new().with(
            "23539594",
            "Highly recurrent TERT promoter mutations in human melanoma",
            "2013 Mar 22",
            "Science (New York, N.Y.)",
        );
        let mut resolver = resolver(lookup);
        let source = resolver
            .resolve(&literature(
                "other",
                "23539594",
                "Highly recurrent TERT promoter mutations in human melanoma",
            ))
            .await
            .unwrap();
        assert_eq!(
            source,
            Source::Publication {
                pmid: 23539594,
                title: "highly recurrent tert promoter mutations in human melanoma".into(),
                year: Some(2013),
                journal: Some("science".into()),
            }
        );
    }

    #[tokio::test]
    async fn test_cache_prevents_repeat_lookups() {
        let lookup = StaticLookup::new().with("11111111", "Some title", "2001", "Nature");
        let mut resolver = resolver(lookup);
        let lit = literature("pubmed", "11111111", "Some title");
        resolver.resolve(&lit).await.unwrap();
        resolver.resolve(&lit).await.unwrap();
        assert_eq!(resolver.lookup.calls(), 1);
    }

    #[tokio::test]
    async fn test_preloaded_cache_skips_lookup_entirely() {
        let mut cache = EnrichmentCache::new();
        cache.insert(
            "22222222".into(),
            crate::pubmed::PubmedSummary {
                title: "Cached title".into(),
                pubdate: "1999 Jan".into(),
                fulljournalname: "Cell".into(),
            },
        );
        let mut resolver = SourceResolver::new(StaticLookup::new(), cache);
        let source = resolver
            .resolve(&literature("pubmed", "22222222", "cached title"))
            .await
            .unwrap();
        assert!(matches!(source, Source::Publication { year: Some(1999), .. }));
        assert_eq!(resolver.lookup.calls(), 0);
    }

    #[tokio::test]
    async fn test_title_mismatch_rejected() {
        let lookup = StaticLookup::new().with("33333333", "An entirely different paper", "2010", "Blood");
        let mut resolver = resolver(lookup);
        let err = resolver
            .resolve(&literature("pubmed", "33333333", "recorded title"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::TitleMismatch { .. }));
        assert!(!err.is_systemic());
    }

    #[tokio::test]
    async fn test_title_comparison_ignores_whitespace() {
        let lookup = StaticLookup::new().with("44444444", "Wnt signalling", "2015", "Nature");
        let mut resolver = resolver(lookup);
        assert!(resolver
            .resolve(&literature("pubmed", "44444444", "wntsignalling"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_unparseable_pubdate_leaves_year_unset() {
        let lookup = StaticLookup::new().with("55555555", "No date", "Winter", "Cell");
        let mut resolver = resolver(lookup);
        let source = resolver
            .resolve(&literature("pubmed", "55555555", "no date"))
            .await
            .unwrap();
        assert!(matches!(source, Source::Publication { year: None, .. }));
    }

    #[tokio::test]
    async fn test_pmcid_and_doi_unsupported() {
        let mut resolver = resolver(StaticLookup::new());
        for lit_type in ["PMCID", "doi"] {
            let err = resolver
                .resolve(&literature(lit_type, "10.1000/xyz", "whatever"))
                .await
                .unwrap_err();
            assert!(matches!(err, ConversionError::UnsupportedLiteratureType(_)));
        }
    }

    #[tokio::test]
    async fn test_trial_shorthand_resolves_on_id_or_title() {
        let mut resolver = resolver(StaticLookup::new());
        let source = resolver
            .resolve(&literature("other", "BCGSC - POG", ""))
            .await
            .unwrap();
        assert_eq!(
            source,
            Source::ClinicalTrial {
                official_title: "personalized oncogenomics (pog)".into()
            }
        );

        let source = resolver
            .resolve(&literature("other", "some-id", "OncoPanel"))
            .await
            .unwrap();
        assert!(matches!(source, Source::ClinicalTrial { official_title } if official_title == "oncopanel"));
    }

    #[tokio::test]
    async fn test_named_panels_become_external_sources() {
        let mut resolver = resolver(StaticLookup::new());
        let source = resolver
            .resolve(&literature("other", "panel", "AmpliSeq Panel V2"))
            .await
            .unwrap();
        assert_eq!(
            source,
            Source::ExternalSource {
                url: None,
                title: "ampliseq panel v2".into()
            }
        );

        let source = resolver
            .resolve(&literature("other", "x", "IBM"))
            .await
            .unwrap();
        assert!(matches!(source, Source::ExternalSource { url: None, .. }));
    }

    #[tokio::test]
    async fn test_url_scheme_stripped_and_domain_matched() {
        let mut resolver = resolver(StaticLookup::new());
        let source = resolver
            .resolve(&literature(
                "website",
                "https://www.oncokb.org/gene/KRAS",
                "",
            ))
            .await
            .unwrap();
        assert_eq!(
            source,
            Source::ExternalSource {
                url: Some("oncokb.org/gene/kras".into()),
                title: "oncokb".into()
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_domain_unresolvable() {
        let mut resolver = resolver(StaticLookup::new());
        let err = resolver
            .resolve(&literature("website", "http://example.org/panel", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::UnresolvableSource(_)));
    }

    #[tokio::test]
    async fn test_empty_url_rejected() {
        let mut resolver = resolver(StaticLookup::new());
        let err = resolver
            .resolve(&literature("website", "https://www.", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ConversionError::NoSourceUrl { .. }));
    }
}
