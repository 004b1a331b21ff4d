//! Host platform detection.
//!
//! Keep OS quirks here to avoid leaking them into the dispatch logic. The rest
//! of the crate only ever sees a [`PlatformIdentifier`].

use std::fmt;

/// Family name reported for Linux hosts.
pub const LINUX: &str = "Linux";
/// Family name reported for macOS and iOS hosts.
pub const DARWIN: &str = "Darwin";
/// Family name reported for Windows hosts.
pub const WINDOWS: &str = "Windows";

/// Maps compile-target OS names onto the family names a `uname`-style query
/// reports for them.
const FAMILY_NAMES: &[(&str, &str)] = &[
    ("linux", LINUX),
    ("macos", DARWIN),
    ("ios", DARWIN),
    ("windows", WINDOWS),
    ("freebsd", "FreeBSD"),
    ("netbsd", "NetBSD"),
    ("openbsd", "OpenBSD"),
    ("dragonfly", "DragonFly"),
    ("solaris", "SunOS"),
    ("illumos", "SunOS"),
    ("android", "Android"),
];

/// Opaque classification of the host operating system family.
///
/// The value is never validated: anything a probe reports, including the empty
/// string, is a legal identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PlatformIdentifier(String);

impl PlatformIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The identifier reported when the family cannot be determined.
    pub fn unknown() -> Self {
        Self(String::new())
    }

    /// Translates a Rust target OS name (`std::env::consts::OS`) into a
    /// family identifier. Unlisted names pass through unchanged.
    pub fn from_target_os(os: &str) -> Self {
        let os = os.trim();
        if os.is_empty() {
            return Self::unknown();
        }
        FAMILY_NAMES
            .iter()
            .find(|(target, _)| *target == os)
            .map(|(_, family)| Self::new(*family))
            .unwrap_or_else(|| Self::new(os))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PlatformIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            f.write_str("<unknown>")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<&str> for PlatformIdentifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Reports the host operating system family.
///
/// Implementations must not fail: an undeterminable platform is reported as
/// [`PlatformIdentifier::unknown`].
pub trait PlatformProbe {
    fn read(&self) -> PlatformIdentifier;
}

impl<P: PlatformProbe + ?Sized> PlatformProbe for &P {
    fn read(&self) -> PlatformIdentifier {
        (**self).read()
    }
}

/// The production probe, backed by the target the binary was compiled for.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl PlatformProbe for HostPlatform {
    fn read(&self) -> PlatformIdentifier {
        PlatformIdentifier::from_target_os(std::env::consts::OS)
    }
}

/// A probe that always reports the same identifier.
#[derive(Debug, Clone, Default)]
pub struct FixedPlatform(PlatformIdentifier);

impl FixedPlatform {
    pub fn new(identifier: impl Into<PlatformIdentifier>) -> Self {
        Self(identifier.into())
    }
}

impl PlatformProbe for FixedPlatform {
    fn read(&self) -> PlatformIdentifier {
        self.0.clone()
    }
}
