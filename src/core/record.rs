//! core::record
//!
//! The metadata record written to `git.json`.
//!
//! # Shape
//!
//! A flat JSON object with a fixed set of dotted keys and string values.
//! Every key is always present: a query that failed contributes an empty
//! string, never a missing key. The struct below enforces that by giving
//! each key its own `String` field.
//!
//! # Example
//!
//! ```
//! use git_json::core::record::GitInfo;
//!
//! let info = GitInfo::default();
//! let json = info.to_json_pretty().unwrap();
//! assert!(json.contains("\"git.build.version\": \"1.0.0\""));
//! ```

use serde::{Deserialize, Serialize};

/// Name of the file written into each output directory.
pub const OUTPUT_FILE: &str = "git.json";

/// Value of `git.build.version`.
pub const BUILD_VERSION: &str = "1.0.0";

/// One snapshot of repository and build metadata.
///
/// Field order is serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitInfo {
    #[serde(rename = "git.branch")]
    pub branch: String,

    #[serde(rename = "git.build.host")]
    pub build_host: String,

    #[serde(rename = "git.build.time")]
    pub build_time: String,

    #[serde(rename = "git.build.user.email")]
    pub build_user_email: String,

    #[serde(rename = "git.build.user.name")]
    pub build_user_name: String,

    #[serde(rename = "git.build.version")]
    pub build_version: String,

    /// Same query as `closest_tag_name`; see DESIGN.md.
    #[serde(rename = "git.closest.tag.commit.count")]
    pub closest_tag_commit_count: String,

    #[serde(rename = "git.closest.tag.name")]
    pub closest_tag_name: String,

    #[serde(rename = "git.commit.author.time")]
    pub commit_author_time: String,

    #[serde(rename = "git.commit.committer.time")]
    pub commit_committer_time: String,

    #[serde(rename = "git.commit.id")]
    pub commit_id: String,

    #[serde(rename = "git.commit.id.abbrev")]
    pub commit_id_abbrev: String,

    #[serde(rename = "git.commit.id.describe")]
    pub commit_id_describe: String,

    #[serde(rename = "git.commit.id.describe-short")]
    pub commit_id_describe_short: String,

    /// Newlines escaped as the two characters `\n`.
    #[serde(rename = "git.commit.message.full")]
    pub commit_message_full: String,

    #[serde(rename = "git.commit.message.short")]
    pub commit_message_short: String,

    #[serde(rename = "git.commit.time")]
    pub commit_time: String,

    #[serde(rename = "git.commit.user.email")]
    pub commit_user_email: String,

    #[serde(rename = "git.commit.user.name")]
    pub commit_user_name: String,

    /// Always `"true"` or `"false"`.
    #[serde(rename = "git.dirty")]
    pub dirty: String,

    #[serde(rename = "git.local.branch.ahead")]
    pub local_branch_ahead: String,

    #[serde(rename = "git.local.branch.behind")]
    pub local_branch_behind: String,

    #[serde(rename = "git.remote.origin.url")]
    pub remote_origin_url: String,

    #[serde(rename = "git.tags")]
    pub tags: String,

    #[serde(rename = "git.total.commit.count")]
    pub total_commit_count: String,
}

impl GitInfo {
    /// Every key of the record, in serialization order.
    pub const KEYS: [&'static str; 25] = [
        "git.branch",
        "git.build.host",
        "git.build.time",
        "git.build.user.email",
        "git.build.user.name",
        "git.build.version",
        "git.closest.tag.commit.count",
        "git.closest.tag.name",
        "git.commit.author.time",
        "git.commit.committer.time",
        "git.commit.id",
        "git.commit.id.abbrev",
        "git.commit.id.describe",
        "git.commit.id.describe-short",
        "git.commit.message.full",
        "git.commit.message.short",
        "git.commit.time",
        "git.commit.user.email",
        "git.commit.user.name",
        "git.dirty",
        "git.local.branch.ahead",
        "git.local.branch.behind",
        "git.remote.origin.url",
        "git.tags",
        "git.total.commit.count",
    ];

    /// Render as a JSON object indented by four spaces, with a trailing
    /// newline.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        buf.push(b'\n');
        // serde_json only ever emits UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Default for GitInfo {
    /// A record with every field empty except the constant build version and
    /// a clean dirty flag.
    fn default() -> Self {
        Self {
            branch: String::new(),
            build_host: String::new(),
            build_time: String::new(),
            build_user_email: String::new(),
            build_user_name: String::new(),
            build_version: BUILD_VERSION.to_string(),
            closest_tag_commit_count: String::new(),
            closest_tag_name: String::new(),
            commit_author_time: String::new(),
            commit_committer_time: String::new(),
            commit_id: String::new(),
            commit_id_abbrev: String::new(),
            commit_id_describe: String::new(),
            commit_id_describe_short: String::new(),
            commit_message_full: String::new(),
            commit_message_short: String::new(),
            commit_time: String::new(),
            commit_user_email: String::new(),
            commit_user_name: String::new(),
            dirty: bool_value(false),
            local_branch_ahead: String::new(),
            local_branch_behind: String::new(),
            remote_origin_url: String::new(),
            tags: String::new(),
            total_commit_count: String::new(),
        }
    }
}

/// Replace every line feed with the two characters `\n`.
pub fn escape_newlines(message: &str) -> String {
    message.replace('\n', "\\n")
}

/// `"true"` or `"false"`.
pub fn bool_value(flag: bool) -> String {
    let value = if flag { "true" } else { "false" };
    value.to_string()
}
