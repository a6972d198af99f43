//! Plugin manifest - plugin.json 스키마

use bale_foundation::Error;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// 플러그인 버전 (major.minor.patch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PluginVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl FromStr for PluginVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let mut next = |label: &str| -> Result<u32, Error> {
            parts
                .next()
                .ok_or_else(|| Error::Plugin(format!("version {s} is missing a {label} part")))?
                .parse()
                .map_err(|_| Error::Plugin(format!("version {s} has an invalid {label} part")))
        };

        Ok(Self {
            major: next("major")?,
            minor: next("minor")?,
            patch: next("patch")?,
        })
    }
}

impl fmt::Display for PluginVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl<'de> Deserialize<'de> for PluginVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// plugin.json 매니페스트
#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    /// 전역 고유 식별자 (팩토리 테이블 키)
    pub id: String,

    /// 표시 이름
    pub name: String,

    pub version: PluginVersion,

    #[serde(default)]
    pub description: String,

    /// 확장 지점 그룹. 애플리케이션 플러그인만 로드 대상입니다.
    pub group: String,

    #[serde(default)]
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse_and_display() {
        let version: PluginVersion = "1.4.2".parse().unwrap();
        assert_eq!(version.major, 1);
        assert_eq!(version.to_string(), "1.4.2");

        assert!("1.4".parse::<PluginVersion>().is_err());
        assert!("a.b.c".parse::<PluginVersion>().is_err());
    }

    #[test]
    fn test_manifest_deserialization() {
        let manifest: PluginManifest = serde_json::from_str(
            r#"{
                "id": "bale-plugin-shell",
                "name": "Shell",
                "version": "0.2.0",
                "group": "bale.application.plugin"
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.id, "bale-plugin-shell");
        assert_eq!(manifest.version.minor, 2);
        assert!(manifest.description.is_empty());
    }
}
