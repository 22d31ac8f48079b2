//! # Module Registration
//!
//! Registers and unregisters `<module>` entries on behalf of a package. This
//! is what a native module package runs from its install hook so the app that
//! depends on it picks the module up.
//!
//! ## Modes
//!
//! - **Explicit**: an id plus optional platform and version given on the
//!   command line.
//! - **Lifecycle hook**: no arguments; the package name, version, and
//!   declared platforms come from the environment the package manager sets
//!   for lifecycle scripts (see [`HookEnv`]).
//!
//! In both modes an existing entry for the same `(id, platform)` is removed
//! before the new one is added.

use std::env;
use std::fmt;
use std::path::Path;

use log::info;

use crate::document::ConfigDocument;
use crate::error::{Error, Result};

/// Package name set by the package manager for lifecycle scripts.
pub const PACKAGE_NAME_VAR: &str = "npm_package_name";
/// Package version set by the package manager for lifecycle scripts.
pub const PACKAGE_VERSION_VAR: &str = "npm_package_version";
/// Prefix of the indexed platform variables (`..._0`, `..._1`, `..._2`).
pub const PLATFORM_VAR: &str = "npm_package_titanium_platform";

/// How many indexed platform variables are consulted.
const INDEXED_PLATFORM_VARS: usize = 3;

/// Lifecycle-hook data taken from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookEnv {
    pub package_name: Option<String>,
    pub package_version: Option<String>,
    pub platforms: Vec<String>,
}

impl HookEnv {
    /// Read the hook variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the hook variables through `lookup`.
    ///
    /// Platforms come from the indexed variables `npm_package_titanium_platform_0`
    /// through `_2`. When none of those are set, the single variable
    /// `npm_package_titanium_platform` is read instead; it may hold a JSON
    /// array or a comma/whitespace separated list.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut platforms: Vec<String> = (0..INDEXED_PLATFORM_VARS)
            .filter_map(|i| non_empty(&format!("{}_{}", PLATFORM_VAR, i)))
            .collect();
        if platforms.is_empty() {
            if let Some(raw) = non_empty(PLATFORM_VAR) {
                platforms = parse_platform_list(&raw);
            }
        }

        Self {
            package_name: non_empty(PACKAGE_NAME_VAR),
            package_version: non_empty(PACKAGE_VERSION_VAR),
            platforms,
        }
    }
}

/// Split an array-valued platform variable into platform names.
fn parse_platform_list(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.starts_with('[') {
        if let Ok(list) = serde_json::from_str::<Vec<String>>(raw) {
            return list.into_iter().filter(|p| !p.is_empty()).collect();
        }
    }
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// One `(id, platform, version)` module entry to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: String,
    pub platform: Option<String>,
    pub version: Option<String>,
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if let Some(version) = &self.version {
            write!(f, "@{}", version)?;
        }
        if let Some(platform) = &self.platform {
            write!(f, " ({})", platform)?;
        }
        Ok(())
    }
}

/// A resolved request to register module entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallRequest {
    /// Arguments given on the command line.
    Explicit {
        id: String,
        platform: Option<String>,
        version: Option<String>,
    },
    /// Driven by the package manager's lifecycle-hook environment.
    Hook {
        name: String,
        version: Option<String>,
        platforms: Vec<String>,
    },
}

impl InstallRequest {
    /// Pick the mode from the positional arguments `[id, platform, version]`
    /// and the hook environment.
    pub fn resolve(args: &[String], hook: &HookEnv) -> Result<Self> {
        if let Some(id) = args.first().filter(|id| !id.is_empty()) {
            let arg = |i: usize| args.get(i).filter(|v| !v.is_empty()).cloned();
            return Ok(InstallRequest::Explicit {
                id: id.clone(),
                platform: arg(1),
                version: arg(2),
            });
        }

        let name = hook.package_name.clone().ok_or_else(|| {
            Error::argument("No parameters specified and not run from npm package script")
        })?;
        if hook.platforms.is_empty() {
            return Err(Error::argument(format!(
                "titanium.platform not defined in package.json for package: {}",
                name
            )));
        }
        Ok(InstallRequest::Hook {
            name,
            version: hook.package_version.clone(),
            platforms: hook.platforms.clone(),
        })
    }

    /// The entries this request registers, in order.
    pub fn registrations(&self) -> Vec<Registration> {
        match self {
            InstallRequest::Explicit {
                id,
                platform,
                version,
            } => vec![Registration {
                id: id.clone(),
                platform: platform.clone(),
                version: version.clone(),
            }],
            InstallRequest::Hook {
                name,
                version,
                platforms,
            } => platforms
                .iter()
                .map(|platform| Registration {
                    id: name.clone(),
                    platform: Some(platform.clone()),
                    version: version.clone(),
                })
                .collect(),
        }
    }
}

/// Apply `request` to `doc`: for each entry, remove the existing
/// `(id, platform)` module then add it back with the requested version.
///
/// Returns the registered entries. The document is not written.
pub fn apply(doc: &mut ConfigDocument, request: &InstallRequest) -> Result<Vec<Registration>> {
    let registrations = request.registrations();
    for reg in &registrations {
        info!(
            "Installing module {} (platform: {}, version: {})",
            reg.id,
            reg.platform.as_deref().unwrap_or("any"),
            reg.version.as_deref().unwrap_or("unspecified")
        );
        doc.remove_module(&reg.id, reg.platform.as_deref())?;
        doc.set_module(&reg.id, reg.version.as_deref(), reg.platform.as_deref())?;
    }
    Ok(registrations)
}

/// Load the descriptor at `path`, apply `request`, and write it back.
pub fn install_into(path: &Path, request: &InstallRequest) -> Result<Vec<Registration>> {
    let mut doc = ConfigDocument::load(path)?;
    let registrations = apply(&mut doc, request)?;
    doc.write(None)?;
    Ok(registrations)
}

/// Remove module `id` for each of `platforms`, or only its platform-less
/// entry when `platforms` is empty.
pub fn uninstall(doc: &mut ConfigDocument, id: &str, platforms: &[String]) -> Result<()> {
    if id.is_empty() {
        return Err(Error::argument("module id must be defined"));
    }
    if platforms.is_empty() {
        info!("Uninstalling module {}", id);
        return doc.remove_module(id, None);
    }
    for platform in platforms {
        info!("Uninstalling module {} (platform: {})", id, platform);
        doc.remove_module(id, Some(platform))?;
    }
    Ok(())
}
