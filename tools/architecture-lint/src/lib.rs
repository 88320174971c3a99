//! Repo-local architectural lint for enforcing hexagonal boundaries.
//!
//! The front-end core keeps its hexagon at the Rust module level: `domain`
//! (with its ports), `inbound` adapters that drive the shell, and `outbound`
//! adapters for the backend API and identity storage. This lint:
//!
//! - forbids `domain` code from depending on adapter modules or on transport,
//!   filesystem and process-bootstrap crates
//! - forbids `inbound` adapters from importing `outbound` modules or the
//!   crates those adapters wrap
//! - forbids `outbound` adapters from importing `inbound` modules or
//!   process-bootstrap crates
//!
//! Run it with `cargo run -p architecture-lint`.

use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use syn::visit::Visit;

/// Crate name used when adapters refer to the library by its external path.
const CRATE_NAME: &str = "frontend";

/// Layer directories under `frontend/src`, in scan order.
const LAYER_DIRS: [&str; 3] = ["domain", "inbound", "outbound"];

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `frontend/src`.
    pub file: Utf8PathBuf,
    /// Human-readable description of the violated rule.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file, self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Filesystem traversal or reading failed.
    Io(io::Error),
    /// A source path or its contents could not be interpreted.
    Parse {
        /// Offending file, relative to `frontend/src`.
        file: Utf8PathBuf,
        /// Parser or path error text.
        message: String,
    },
    /// One or more boundary violations were found.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error while linting architecture: {err}"),
            Self::Parse { file, message } => write!(
                f,
                "Failed to parse Rust source while linting architecture ({file}): {message}"
            ),
            Self::Violations(violations) => {
                writeln!(f, "Architecture boundary violations:")?;
                for violation in violations {
                    writeln!(f, "- {violation}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Lint the front-end crate sources on disk.
///
/// `frontend_dir` must be the `frontend/` directory at the repository root.
/// Missing layer directories are skipped.
pub fn lint_frontend_sources(frontend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src = Dir::open_ambient_dir(frontend_dir.join("src"), ambient_authority())?;
    let mut sources = Vec::new();
    for layer in LAYER_DIRS {
        let layer_dir = match src.open_dir(layer) {
            Ok(dir) => dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => return Err(err.into()),
        };
        collect_sources(&layer_dir, Utf8Path::new(layer), &mut sources)?;
    }
    lint_sources(&sources)
}

/// Lint the provided Rust sources. Intended for unit and behaviour tests.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();

    for source in sources {
        let layer = ModuleLayer::infer_from_path(&source.file).ok_or_else(|| {
            ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: "unable to infer module layer from file path".to_owned(),
            }
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(lint_parsed_source(&source.file, layer, &parsed));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `frontend/src`.
    pub file: Utf8PathBuf,
    /// File contents.
    pub contents: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModuleLayer {
    Domain,
    Inbound,
    Outbound,
}

impl ModuleLayer {
    fn infer_from_path(relative_path: &Utf8Path) -> Option<Self> {
        match relative_path.components().next()?.as_str() {
            "domain" => Some(Self::Domain),
            "inbound" => Some(Self::Inbound),
            "outbound" => Some(Self::Outbound),
            _ => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    const fn forbidden_module_roots(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &["inbound", "outbound", "config"],
            Self::Inbound => &["outbound"],
            Self::Outbound => &["inbound"],
        }
    }

    const fn forbidden_crate_roots(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &[
                "cap_std",
                "clap",
                "color_eyre",
                "hyper",
                "ortho_config",
                "reqwest",
                "tracing_subscriber",
                "url",
            ],
            Self::Inbound => &["cap_std", "hyper", "reqwest"],
            Self::Outbound => &["clap", "color_eyre", "ortho_config", "tracing_subscriber"],
        }
    }
}

fn lint_parsed_source(file: &Utf8Path, layer: ModuleLayer, parsed: &syn::File) -> Vec<Violation> {
    let mut collector = PathCollector::default();
    collector.visit_file(parsed);

    let mut messages = BTreeSet::new();
    for segments in &collector.paths {
        if let Some(root) = internal_module_root(segments)
            .and_then(|root| find_root(layer.forbidden_module_roots(), root))
        {
            messages.insert(format!(
                "{} module must not depend on crate::{root}",
                layer.name()
            ));
        }
        if let Some(root) = external_crate_root(segments)
            .and_then(|root| find_root(layer.forbidden_crate_roots(), root))
        {
            messages.insert(format!(
                "{} module must not depend on external crate `{root}`",
                layer.name()
            ));
        }
    }

    messages
        .into_iter()
        .map(|message| Violation {
            file: file.to_path_buf(),
            message,
        })
        .collect()
}

fn find_root(roots: &'static [&'static str], candidate: &str) -> Option<&'static str> {
    roots.iter().copied().find(|root| *root == candidate)
}

fn is_relative_module_segment(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

fn internal_module_root(segments: &[String]) -> Option<&str> {
    let first = segments.first()?.as_str();
    if LAYER_DIRS.contains(&first) {
        return Some(first);
    }
    let start_index = if is_relative_module_segment(first) {
        segments
            .iter()
            .position(|segment| !is_relative_module_segment(segment.as_str()))?
    } else if first == CRATE_NAME {
        1
    } else {
        return None;
    };
    segments.get(start_index).map(String::as_str)
}

fn external_crate_root(segments: &[String]) -> Option<&str> {
    let root = segments.first()?.as_str();
    if is_relative_module_segment(root) || root == CRATE_NAME {
        return None;
    }
    Some(root)
}

/// Every path mentioned by a file, from `use` trees and expressions alike.
#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn record_use_tree(&mut self, tree: &syn::UseTree, prefix: &[String]) {
        let extend = |ident: String| {
            let mut segments = prefix.to_vec();
            segments.push(ident);
            segments
        };
        match tree {
            syn::UseTree::Path(path) => {
                self.record_use_tree(&path.tree, &extend(path.ident.to_string()));
            }
            syn::UseTree::Name(name) => {
                self.paths.insert(extend(name.ident.to_string()));
            }
            syn::UseTree::Rename(rename) => {
                self.paths.insert(extend(rename.ident.to_string()));
            }
            syn::UseTree::Glob(_) => {
                self.paths.insert(extend("*".to_owned()));
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix);
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.record_use_tree(&node.tree, &[]);
    }
}

fn collect_sources(
    dir: &Dir,
    relative: &Utf8Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    for entry in dir.entries()? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            return Err(ArchitectureLintError::Parse {
                file: relative.to_path_buf(),
                message: format!("non UTF-8 file name {name:?}"),
            });
        };
        let path = relative.join(name);
        if entry.file_type()?.is_dir() {
            collect_sources(&entry.open_dir()?, &path, sources)?;
            continue;
        }
        if path.extension() != Some("rs") {
            continue;
        }
        let contents = dir.read_to_string(name)?;
        sources.push(LintSource {
            file: path,
            contents,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests;
