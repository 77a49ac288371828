//! Revision endpoints
//!
//! - `repo_url`: repository locations and their ancestor chains
//! - `revision`: symbolic and numeric revisions, plus the subset a remote understands
//! - `endpoint`: one side of a comparison (a location at a revision)

pub mod endpoint;
pub mod repo_url;
pub mod revision;

pub const REPO_URL_REGEX: &str = r"^[A-Za-z][A-Za-z0-9+.\-]*://[^/]*(/.*)?$";
pub const REVISION_NUMBER_REGEX: &str = r"^[rR]?(\d+)$";
pub const WORKING_COPY_LABEL: &str = "Working Copy";
pub const REVISION_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "@" => "HEAD",
    "WC" => "WORKING",
    "LOCAL" => "WORKING",
    "PRISTINE" => "BASE",
};
