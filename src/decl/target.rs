// Fri Jan 16 2026 - Alex

use crate::decl::FrontendError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_TRIPLE: &str = "x86_64-pc-linux-gnu";

/// C++ object model family selected by the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CxxAbi {
    Itanium,
    Microsoft,
}

impl CxxAbi {
    pub fn is_itanium_family(self) -> bool {
        matches!(self, Self::Itanium)
    }
}

impl fmt::Display for CxxAbi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Itanium => write!(f, "itanium"),
            Self::Microsoft => write!(f, "microsoft"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInfo {
    pub triple: String,
    pub pointer_width_bits: u64,
    pub pointer_align_bits: u64,
    pub abi: CxxAbi,
}

impl TargetInfo {
    /// Derives pointer width and C++ ABI from a `arch-vendor-os-env` triple.
    pub fn from_triple(triple: &str) -> Result<Self, FrontendError> {
        let mut parts = triple.split('-');
        let arch = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();

        let (width, align) = pointer_layout(arch)
            .ok_or_else(|| FrontendError::UnsupportedTarget(triple.to_string()))?;

        let is_msvc = rest.iter().any(|p| p.starts_with("msvc"));
        let is_windows = rest.iter().any(|p| *p == "windows" || *p == "win32");
        let is_gnu_like = rest
            .iter()
            .any(|p| p.starts_with("gnu") || p.starts_with("cygnus") || p.starts_with("itanium"));
        let abi = if is_msvc || (is_windows && !is_gnu_like) {
            CxxAbi::Microsoft
        } else {
            CxxAbi::Itanium
        };

        Ok(Self {
            triple: triple.to_string(),
            pointer_width_bits: width,
            pointer_align_bits: align,
            abi,
        })
    }

    pub fn pointer_size(&self) -> u64 {
        self.pointer_width_bits / 8
    }

    pub fn pointer_align(&self) -> u64 {
        self.pointer_align_bits / 8
    }
}

impl Default for TargetInfo {
    fn default() -> Self {
        Self {
            triple: DEFAULT_TRIPLE.to_string(),
            pointer_width_bits: 64,
            pointer_align_bits: 64,
            abi: CxxAbi::Itanium,
        }
    }
}

/// Pointer width and alignment in bits. Alignment only differs from width
/// on targets that byte-align everything.
fn pointer_layout(arch: &str) -> Option<(u64, u64)> {
    let width = match arch {
        "x86_64" | "amd64" | "aarch64" | "aarch64_be" | "arm64" | "arm64e" | "riscv64"
        | "powerpc64" | "powerpc64le" | "ppc64" | "ppc64le" | "mips64" | "mips64el"
        | "s390x" | "sparcv9" | "sparc64" | "loongarch64" | "wasm64" => Some(64),
        "i386" | "i486" | "i586" | "i686" | "x86" | "riscv32" | "wasm32" | "mips"
        | "mipsel" | "powerpc" | "ppc" | "sparc" | "loongarch32" | "hexagon" => Some(32),
        "avr" => return Some((16, 8)),
        "msp430" => Some(16),
        a if a.starts_with("arm") || a.starts_with("thumb") => Some(32),
        _ => None,
    }?;
    Some((width, width))
}
