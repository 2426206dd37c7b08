//! Build information
//!
//! Build number and timestamp stamped by `build.rs`, reported by
//! `engine_status` and the startup banner.

use serde::Serialize;

use crate::config::EngineConfig;

/// Build number, bumped on each recompilation; 0 when unstamped
pub const BUILD_NUMBER: u64 = match option_env!("NUTRIENT_ENGINE_BUILD_NUMBER") {
    Some(s) => parse_build_number(s),
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("NUTRIENT_ENGINE_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Decimal digits only; anything else, or overflow, reads as 0
const fn parse_build_number(s: &str) -> u64 {
    let bytes = s.as_bytes();
    let mut n: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i].wrapping_sub(b'0');
        if digit > 9 {
            return 0;
        }
        n = match n.checked_mul(10) {
            Some(v) => match v.checked_add(digit as u64) {
                Some(v) => v,
                None => return 0,
            },
            None => return 0,
        };
        i += 1;
    }
    n
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
        }
    }

    /// `0.1.0+42`, or the bare version for an unstamped build
    pub fn label(&self) -> String {
        if self.build_number == 0 {
            self.version.to_string()
        } else {
            format!("{}+{}", self.version, self.build_number)
        }
    }
}

/// Print the startup banner, with the effective configuration, to stderr
pub fn print_startup_banner(config: &EngineConfig) {
    let info = BuildInfo::current();
    let t = &config.targets;
    eprintln!("===============================================");
    eprintln!("  Nutrient Aggregation Engine {}", info.label());
    eprintln!("  Compiled: {}", info.build_timestamp);
    eprintln!("  Catalog:  {} (limit {})", config.catalog.base_url, config.catalog.limit);
    eprintln!(
        "  Targets:  {} kcal | P {} g | C {} g | F {} g",
        t.calories, t.protein, t.carbs, t.fat
    );
    eprintln!("===============================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_number() {
        assert_eq!(parse_build_number("42"), 42);
        assert_eq!(parse_build_number("0"), 0);
        assert_eq!(parse_build_number(""), 0);
        assert_eq!(parse_build_number("12a"), 0);
        assert_eq!(parse_build_number("99999999999999999999999"), 0);
    }

    #[test]
    fn test_label() {
        let stamped = BuildInfo { version: "0.1.0", build_number: 7, build_timestamp: "t" };
        assert_eq!(stamped.label(), "0.1.0+7");

        let unstamped = BuildInfo { build_number: 0, ..stamped };
        assert_eq!(unstamped.label(), "0.1.0");
    }

    #[test]
    fn test_current_uses_package_version() {
        assert_eq!(BuildInfo::current().version, env!("CARGO_PKG_VERSION"));
    }
}
