//! Repository reference: the clone URL plus the short name derived from it.
//!
//! The short name is the last path segment of the URL with the `.git` suffix
//! removed. It names the destination directory and every output artifact, so
//! it is rejected when empty or a reserved path component.

use crate::error::ExtractError;
use std::fmt;

/// Suffix every accepted repository URL must carry.
pub const GIT_SUFFIX: &str = ".git";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    url: String,
    short_name: String,
}

impl RepoRef {
    /// Parses `url`, deriving the short name.
    ///
    /// # Examples
    ///
    /// - `https://example.com/org/foo-ext.git` → `foo-ext`
    /// - `git@github.com:joommf/oommf-mel.git` → `oommf-mel`
    /// - `/srv/git/dmi.git` → `dmi`
    pub fn parse(url: &str) -> Result<Self, ExtractError> {
        let url = url.trim();
        let without_suffix = url.strip_suffix(GIT_SUFFIX).ok_or_else(|| {
            ExtractError::Configuration(format!(
                "repository URL must end with `{GIT_SUFFIX}`: {url}"
            ))
        })?;
        let short_name = last_segment(without_suffix);
        if short_name.is_empty() || short_name == "." || short_name == ".." {
            return Err(ExtractError::Configuration(format!(
                "cannot derive a repository name from {url}"
            )));
        }
        Ok(RepoRef {
            url: url.to_string(),
            short_name: short_name.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    /// `provenance-<short>-HEAD.zip`
    pub fn archive_file_name(&self) -> String {
        format!("provenance-{}-HEAD.zip", self.short_name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.short_name, self.url)
    }
}

/// Last segment after `/` (or `:` for scp-style `host:path` URLs).
fn last_segment(s: &str) -> &str {
    s.rsplit(['/', ':']).next().unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_strips_suffix_from_last_segment() {
        let r = RepoRef::parse("https://example.com/org/foo-ext.git").unwrap();
        assert_eq!(r.short_name(), "foo-ext");
        assert_eq!(r.url(), "https://example.com/org/foo-ext.git");
        let r = RepoRef::parse("https://github.com/joommf/oommf-extension-dmi-cnv.git").unwrap();
        assert_eq!(r.short_name(), "oommf-extension-dmi-cnv");
    }

    #[test]
    fn scp_style_and_local_paths() {
        assert_eq!(
            RepoRef::parse("git@github.com:yuyahagi/oommf-mel.git")
                .unwrap()
                .short_name(),
            "oommf-mel"
        );
        assert_eq!(
            RepoRef::parse("git@host:bare.git").unwrap().short_name(),
            "bare"
        );
        assert_eq!(
            RepoRef::parse("/srv/git/dmi.git").unwrap().short_name(),
            "dmi"
        );
        assert_eq!(RepoRef::parse("local.git").unwrap().short_name(), "local");
    }

    #[test]
    fn only_the_trailing_suffix_is_removed() {
        let r = RepoRef::parse("https://example.com/org/my.github.io.git").unwrap();
        assert_eq!(r.short_name(), "my.github.io");
    }

    #[test]
    fn missing_suffix_is_configuration_error() {
        let err = RepoRef::parse("https://example.com/org/foo-ext").unwrap_err();
        assert!(matches!(err, ExtractError::Configuration(_)));
        assert!(RepoRef::parse("https://example.com/foo.git/").is_err());
    }

    #[test]
    fn empty_or_reserved_name_rejected() {
        assert!(RepoRef::parse(".git").is_err());
        assert!(RepoRef::parse("https://example.com/.git").is_err());
        assert!(RepoRef::parse("https://example.com/...git").is_err());
    }

    #[test]
    fn archive_file_name_uses_short_name() {
        let r = RepoRef::parse("https://example.com/org/foo-ext.git").unwrap();
        assert_eq!(r.archive_file_name(), "provenance-foo-ext-HEAD.zip");
    }
}
