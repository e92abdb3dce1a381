/// Semantic version of the proteus library, mirroring
/// `proteus_getVersionMajor/Minor/Patch/String` from the original C API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

const MAJOR: u32 = 0;
const MINOR: u32 = 1;
const PATCH: u32 = 0;

impl VersionInfo {
    pub fn as_string(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Returns the current library version.
pub fn version() -> VersionInfo {
    VersionInfo {
        major: MAJOR,
        minor: MINOR,
        patch: PATCH,
    }
}
