//! Resource handles
//!
//! One borrowing handle per Platform resource. Each handle is a thin wrapper
//! mapping its methods onto REST calls; workspace-scoped methods take
//! `workspace_id: Option<i64>` where `None` targets the personal workspace.

mod actions;
mod compute_envs;
mod credentials;
mod data_links;
mod datasets;
mod labels;
mod members;
mod organizations;
mod participants;
mod pipelines;
mod runs;
mod secrets;
mod teams;
mod user;
mod workspaces;

pub use actions::Actions;
pub use compute_envs::ComputeEnvs;
pub use credentials::CredentialsResource;
pub use data_links::DataLinks;
pub use datasets::Datasets;
pub use labels::{LabelFilter, Labels};
pub use members::Members;
pub use organizations::Organizations;
pub use participants::Participants;
pub use pipelines::Pipelines;
pub use runs::Runs;
pub use secrets::Secrets;
pub use teams::Teams;
pub use user::UserResource;
pub use workspaces::Workspaces;

/// Percent-encode a single path segment
pub(crate) fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Percent-encode a relative path, keeping `/` separators
pub(crate) fn encode_path(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("reads.fq.gz"), "reads.fq.gz");
        assert_eq!(encode_segment("my file#1"), "my%20file%231");
    }

    #[test]
    fn test_encode_path_keeps_separators() {
        assert_eq!(encode_path("/data/run 1/"), "data/run%201");
        assert_eq!(encode_path(""), "");
    }
}
