//! Literature sources supporting a statement.

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "@class", rename_all = "snake_case")]
pub enum Source {
    Publication {
        pmid: i64,
        title: String,
        year: Option<i32>,
        journal: Option<String>,
    },
    ClinicalTrial {
        official_title: String,
    },
    ExternalSource {
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        title: String,
    },
}
