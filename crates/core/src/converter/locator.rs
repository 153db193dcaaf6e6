//! Resolution of the transcoding executable.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::config::ToolConfig;

/// Where a resolved executable came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSource {
    /// The override environment variable.
    Override,
    /// A `PATH` entry.
    SearchPath,
    /// One of the configured fallback install locations.
    Fallback,
}

/// A usable executable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTool {
    pub path: PathBuf,
    pub source: ToolSource,
}

/// Finds the transcoding executable. First match wins:
/// override variable, then `PATH`, then the fallback list.
#[derive(Debug, Clone)]
pub struct ToolLocator {
    override_env: String,
    program: String,
    fallback_paths: Vec<PathBuf>,
}

impl ToolLocator {
    pub fn new(config: &ToolConfig) -> Self {
        Self {
            override_env: config.override_env.clone(),
            program: config.program.clone(),
            fallback_paths: config.fallback_paths.clone(),
        }
    }

    /// Name of the environment variable that overrides the lookup.
    pub fn override_env(&self) -> &str {
        &self.override_env
    }

    /// Name of the executable searched for on `PATH`.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Resolves using the current process environment.
    pub fn locate(&self) -> Option<ResolvedTool> {
        let override_value = std::env::var_os(&self.override_env);
        let search_path = std::env::var_os("PATH");
        self.locate_with(override_value.as_deref(), search_path.as_deref())
    }

    /// Resolves against explicit override and search path values.
    pub fn locate_with(
        &self,
        override_value: Option<&OsStr>,
        search_path: Option<&OsStr>,
    ) -> Option<ResolvedTool> {
        if let Some(value) = override_value.filter(|v| !v.is_empty()) {
            let candidate = PathBuf::from(value);
            if candidate.is_file() {
                return Some(ResolvedTool {
                    path: candidate,
                    source: ToolSource::Override,
                });
            }
            tracing::debug!(
                env = %self.override_env,
                path = %candidate.display(),
                "Override path does not exist, ignoring"
            );
        }

        if let Some(path) = search_path.and_then(|p| self.search(p)) {
            return Some(ResolvedTool {
                path,
                source: ToolSource::SearchPath,
            });
        }

        self.fallback_paths
            .iter()
            .find(|candidate| candidate.is_file())
            .map(|path| ResolvedTool {
                path: path.clone(),
                source: ToolSource::Fallback,
            })
    }

    fn search(&self, search_path: &OsStr) -> Option<PathBuf> {
        std::env::split_paths(search_path)
            .filter(|dir| !dir.as_os_str().is_empty())
            .flat_map(|dir| self.program_names().map(move |name| dir.join(name)))
            .find(|candidate| is_executable(candidate))
    }

    fn program_names(&self) -> impl Iterator<Item = OsString> + '_ {
        let mut names = vec![OsString::from(&self.program)];
        if cfg!(windows) && Path::new(&self.program).extension().is_none() {
            names.push(OsString::from(format!("{}.exe", self.program)));
        }
        names.into_iter()
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
