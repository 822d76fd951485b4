//! Token grammar for the compact position and feature cells of the flat
//! files.
//!
//! Position tokens carry a coordinate-system prefix and system-specific
//! components, e.g. `g.1205`, `e.2`, `p.R132`, `c.100-2`, `y.p11.2`.
//! Unknown components are written as `?` and load as absent.

use std::sync::OnceLock;

use regex::Regex;

use vargraph_common::{ConversionError, Result};

use crate::record::{CoordinateSystem, RawFeature, RawPosition};

fn cds_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(-?\d+|\?)?(([-+])(\d+))?$").unwrap())
}

fn protein_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z?*])?(-?\d+|\?)$").unwrap())
}

fn cytoband_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([pq])((\d+|\?)(\.(\d+|\?))?)?$").unwrap())
}

fn numeric_component(text: &str) -> Option<i64> {
    match text {
        "?" => None,
        other => other.parse().ok(),
    }
}

/// Parse one position token into raw coordinate components.
pub fn parse_position_token(token: &str) -> Result<RawPosition> {
    let token = token.trim();
    let (prefix, body) = token
        .split_once('.')
        .ok_or_else(|| ConversionError::BadPosition(format!("missing coordinate prefix: {token}")))?;
    let system: CoordinateSystem = prefix.parse()?;

    match system {
        CoordinateSystem::Genomic | CoordinateSystem::Exonic => {
            let a = if body == "?" {
                None
            } else {
                Some(body.parse::<i64>().map_err(|_| {
                    ConversionError::BadPosition(format!("expected integer position: {token}"))
                })?)
            };
            Ok(RawPosition { system, a, b: None, c: None })
        }
        CoordinateSystem::CodingSequence => {
            let caps = cds_pattern()
                .captures(body)
                .filter(|c| c.get(1).is_some() || c.get(2).is_some())
                .ok_or_else(|| {
                    ConversionError::BadPosition(format!("bad coding-sequence token: {token}"))
                })?;
            let a = caps.get(1).and_then(|m| numeric_component(m.as_str()));
            let b = caps.get(4).and_then(|m| m.as_str().parse().ok());
            let c = caps.get(3).map(|m| m.as_str().to_string());
            Ok(RawPosition { system, a, b, c })
        }
        CoordinateSystem::Protein => {
            let caps = protein_pattern().captures(body).ok_or_else(|| {
                ConversionError::BadPosition(format!("bad protein token: {token}"))
            })?;
            let a = caps.get(2).and_then(|m| numeric_component(m.as_str()));
            let c = caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .filter(|aa| aa != "?");
            Ok(RawPosition { system, a, b: None, c })
        }
        CoordinateSystem::Cytoband => {
            let caps = cytoband_pattern().captures(body).ok_or_else(|| {
                ConversionError::BadPosition(format!("bad cytoband token: {token}"))
            })?;
            let arm = caps.get(1).map(|m| m.as_str().to_string());
            let a = caps.get(3).and_then(|m| numeric_component(m.as_str()));
            let b = caps.get(5).and_then(|m| numeric_component(m.as_str()));
            Ok(RawPosition { system, a, b, c: arm })
        }
    }
}

/// Parse a feature cell: `type;subtype;id[;version]`.
pub fn parse_feature_cell(cell: &str) -> Result<RawFeature> {
    let parts: Vec<&str> = cell.split(';').map(str::trim).collect();
    if parts.len() < 3 || parts.len() > 4 {
        return Err(ConversionError::BadFeature(format!(
            "needs type;subtype;id[;version]: {cell}"
        )));
    }
    Ok(RawFeature {
        ftype: parts[0].to_string(),
        subtype: parts[1].to_string(),
        id: parts[2].to_string(),
        version: parts.get(3).filter(|v| !v.is_empty()).map(|v| v.to_string()),
    })
}
