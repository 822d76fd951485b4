//! Coordinate-component conversion into canonical positions.

use vargraph_common::{ConversionError, Result};
use vargraph_flatfile::{CoordinateSystem, RawPosition};
use vargraph_model::Position;

/// Convert raw coordinate components into a canonical position.
///
/// Negative numeric components mean "unknown" in the flat files and are
/// nulled, never propagated. Coordinate systems outside the enum never reach
/// here; the loader rejects them as a rule-coverage gap.
pub fn convert_position(raw: &RawPosition) -> Result<Position> {
    let a = raw.a.filter(|v| *v >= 0);
    let b = raw.b.filter(|v| *v >= 0);

    match raw.system {
        CoordinateSystem::Cytoband => {
            // Shorthand like "p.2" (minor band without a major band) is
            // inconsistent and cannot be interpreted.
            if a.is_none() && b.is_some() {
                return Err(ConversionError::BadPosition(format!(
                    "cytoband minor band without major band (arm={:?}, minor={:?})",
                    raw.c, b
                )));
            }
            Ok(Position::Cytoband {
                arm: raw.c.clone(),
                major_band: a,
                minor_band: b,
            })
        }
        CoordinateSystem::CodingSequence => {
            let offset = match raw.c.as_deref() {
                Some("-") => b.map(|v| -v),
                _ => b,
            };
            // 0 is not a valid coding position; the files use it for "start".
            let pos = match a {
                Some(0) => Some(1),
                other => other,
            };
            Ok(Position::CodingSequence { pos, offset })
        }
        CoordinateSystem::Protein => Ok(Position::Protein {
            pos: a,
            ref_aa: raw.c.clone(),
        }),
        CoordinateSystem::Genomic => Ok(Position::Genomic { pos: a }),
        CoordinateSystem::Exonic => Ok(Position::Exonic { pos: a }),
    }
}
