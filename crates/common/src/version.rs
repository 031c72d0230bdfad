use serde::{Deserialize, Serialize};
use std::fmt;

/// Compile-time facts about the running SkyCloud build,
///  stamped in by `build.rs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    pub version: String,
    pub git_hash: String,
    pub build_profile: String,
    pub build_timestamp: String,
    pub target: String,
}

impl BuildInfo {
    pub fn new() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            git_hash: option_env!("REPO_VERSION").unwrap_or("unknown").to_string(),
            build_profile: option_env!("BUILD_PROFILE")
                .unwrap_or("unknown")
                .to_string(),
            build_timestamp: option_env!("BUILD_TIMESTAMP")
                .unwrap_or("unknown")
                .to_string(),
            target: option_env!("BUILD_TARGET").unwrap_or("unknown").to_string(),
        }
    }

    pub fn is_release(&self) -> bool {
        self.build_profile == "release"
    }

    pub fn short_hash(&self) -> &str {
        self.git_hash.get(..7).unwrap_or(&self.git_hash)
    }

    pub fn is_dirty(&self) -> bool {
        self.git_hash.ends_with("-dirty")
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "skycloud {} ({}) {} build for {}, built {}",
            self.version,
            self.short_hash(),
            self.build_profile,
            self.target,
            self.build_timestamp
        )
    }
}

pub fn version() -> String {
    let info = BuildInfo::new();
    format!("{} ({})", info.version, info.short_hash())
}

pub fn build_info() -> BuildInfo {
    BuildInfo::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_creation() {
        let info = BuildInfo::new();
        assert!(!info.version.is_empty());
        assert!(!info.git_hash.is_empty());
        assert!(!info.build_profile.is_empty());
    }

    #[test]
    fn test_version_string() {
        assert!(version().starts_with(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_short_hash() {
        let mut info = BuildInfo::new();
        info.git_hash = "abcdef123456789".to_string();
        assert_eq!(info.short_hash(), "abcdef1");

        info.git_hash = "abc".to_string();
        assert_eq!(info.short_hash(), "abc");
    }

    #[test]
    fn test_is_dirty() {
        let mut info = BuildInfo::new();
        info.git_hash = "abcdef123456-dirty".to_string();
        assert!(info.is_dirty());

        info.git_hash = "abcdef123456".to_string();
        assert!(!info.is_dirty());
    }
}
