// Fri Jan 16 2026 - Alex

use crate::decl::target::DEFAULT_TRIPLE;
use crate::decl::{Decl, TargetInfo, TranslationUnit};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontendError {
    #[error("Malformed declaration dump: {0}")]
    MalformedDump(#[from] serde_json::Error),
    #[error("Unsupported target: {0}")]
    UnsupportedTarget(String),
    #[error("Dump was produced for {dump}, configured target is {configured}")]
    TargetMismatch { dump: String, configured: String },
    #[error("Missing value for argument {0}")]
    MissingArgValue(String),
}

/// Produces a resolved declaration tree for one program.
pub trait Frontend {
    fn parse(&self, source: &str, args: &[String]) -> Result<TranslationUnit, FrontendError>;
}

/// Picks the target triple out of clang-style arguments. The last
/// `--target` wins; without one the default triple is used.
pub fn target_triple(args: &[String]) -> Result<String, FrontendError> {
    let mut triple = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(value) = arg.strip_prefix("--target=") {
            triple = Some(value.to_string());
        } else if arg == "-target" || arg == "--target" {
            let value = iter
                .next()
                .ok_or_else(|| FrontendError::MissingArgValue(arg.clone()))?;
            triple = Some(value.clone());
        } else {
            log::debug!("Ignoring front-end argument {}", arg);
        }
    }
    Ok(triple.unwrap_or_else(|| DEFAULT_TRIPLE.to_string()))
}

#[derive(Debug, Deserialize)]
struct DeclDump {
    #[serde(default)]
    target: Option<String>,
    #[serde(default)]
    decls: Vec<Decl>,
}

/// Front-end over a JSON declaration dump, i.e. a tree that has already been
/// parsed and laid out by a compiler for a given target.
#[derive(Debug, Clone, Copy, Default)]
pub struct DumpFrontend;

impl DumpFrontend {
    pub fn new() -> Self {
        Self
    }
}

impl Frontend for DumpFrontend {
    fn parse(&self, source: &str, args: &[String]) -> Result<TranslationUnit, FrontendError> {
        let triple = target_triple(args)?;
        let target = TargetInfo::from_triple(&triple)?;
        let dump: DeclDump = serde_json::from_str(source)?;

        if let Some(dump_target) = dump.target {
            if dump_target != target.triple {
                return Err(FrontendError::TargetMismatch {
                    dump: dump_target,
                    configured: target.triple,
                });
            }
        }

        Ok(TranslationUnit::new(target, dump.decls))
    }
}
