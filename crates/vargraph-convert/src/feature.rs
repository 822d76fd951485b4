//! Feature normalization against the fixed origin and biotype vocabularies.

use vargraph_common::{ConversionError, Result};
use vargraph_flatfile::RawFeature;
use vargraph_model::Feature;

/// Raw feature type → canonical origin name.
const FEATURE_SOURCES: &[(&str, &str)] = &[("chromosome", "genome reference consortium (human)")];

/// Raw feature subtype → canonical biotype.
const FEATURE_BIOTYPES: &[(&str, &str)] = &[
    ("gene fusion", "fusion"),
    ("chromosome", "template"),
    ("cds", "transcript"),
];

fn lookup<'a>(table: &[(&str, &'a str)], key: &'a str) -> &'a str {
    table
        .iter()
        .find(|(raw, _)| *raw == key)
        .map(|(_, mapped)| *mapped)
        .unwrap_or(key)
}

/// Normalize a raw feature. A feature whose type is the "?" sentinel has no
/// stated origin and cannot be converted; that is a rule-coverage failure,
/// not a bad row.
pub fn convert_feature(raw: &RawFeature) -> Result<Feature> {
    if raw.ftype == "?" {
        return Err(ConversionError::UnspecifiedFeatureType(raw.id.clone()));
    }
    let source_version = raw
        .version
        .as_deref()
        .map(|v| v.strip_prefix('v').unwrap_or(v).to_string());
    Ok(Feature::new(
        lookup(FEATURE_SOURCES, &raw.ftype),
        source_version,
        lookup(FEATURE_BIOTYPES, &raw.subtype),
        raw.id.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(ftype: &str, subtype: &str, id: &str, version: Option<&str>) -> RawFeature {
        RawFeature {
            ftype: ftype.into(),
            subtype: subtype.into(),
            id: id.into(),
            version: version.map(String::from),
        }
    }

    #[test]
    fn test_known_vocabulary_is_mapped() {
        let feature = convert_feature(&raw("chromosome", "chromosome", "12", Some("v37"))).unwrap();
        assert_eq!(feature.source, "genome reference consortium (human)");
        assert_eq!(feature.biotype, "template");
        assert_eq!(feature.source_version.as_deref(), Some("37"));
    }

    #[test]
    fn test_unknown_vocabulary_passes_through() {
        let feature = convert_feature(&raw("hugo", "gene", "kras", None)).unwrap();
        assert_eq!(feature.source, "hugo");
        assert_eq!(feature.biotype, "gene");
        assert_eq!(feature.source_version, None);
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let input = raw("ensembl", "cds", "ENST00000256078", Some("75"));
        assert_eq!(convert_feature(&input).unwrap(), convert_feature(&input).unwrap());
    }

    #[test]
    fn test_unspecified_type_is_systemic() {
        let err = convert_feature(&raw("?", "gene", "mystery", None)).unwrap_err();
        assert!(err.is_systemic());
    }
}
