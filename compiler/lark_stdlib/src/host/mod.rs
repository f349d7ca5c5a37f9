//! Host services handed to builtin modules.
//!
//! `HostConfig` collects the injectable pieces (working directory service,
//! random seed) builder style; `Host` is the immutable bundle built from it
//! and cloned into every module builder.

use std::cell::RefCell;
use std::env::{self, VarError};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use lark_eval::{CallContext, EvalError, EvalResult, ModuleBuilder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

/// Environment variable holding the random seed.
pub const RANDOM_SEED_VAR: &str = "LARK_RANDOM_SEED";

/// Source of the current working directory.
///
/// Relative paths handed to filesystem routines are resolved against
/// `current()`.
pub trait WorkingDirectory {
    fn current(&self) -> io::Result<PathBuf>;

    fn set_current(&self, path: &Path) -> io::Result<()>;
}

/// The process working directory.
///
/// `set_current` changes it for the whole process.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessWorkingDirectory;

impl WorkingDirectory for ProcessWorkingDirectory {
    fn current(&self) -> io::Result<PathBuf> {
        env::current_dir()
    }

    fn set_current(&self, path: &Path) -> io::Result<()> {
        env::set_current_dir(path)
    }
}

/// An in-memory working directory, for tests and sandboxed hosts.
#[derive(Debug)]
pub struct FixedWorkingDirectory {
    path: RefCell<PathBuf>,
}

impl FixedWorkingDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FixedWorkingDirectory {
            path: RefCell::new(path.into()),
        }
    }
}

impl WorkingDirectory for FixedWorkingDirectory {
    fn current(&self) -> io::Result<PathBuf> {
        Ok(self.path.borrow().clone())
    }

    fn set_current(&self, path: &Path) -> io::Result<()> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.path.borrow().join(path)
        };
        *self.path.borrow_mut() = absolute;
        Ok(())
    }
}

/// Invalid host configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{RANDOM_SEED_VAR} must be an unsigned 64-bit integer, got `{value}`")]
    InvalidSeed { value: String },
}

/// Builder for `Host`.
#[derive(Clone)]
pub struct HostConfig {
    working_directory: Rc<dyn WorkingDirectory>,
    random_seed: Option<u64>,
}

impl HostConfig {
    /// Process working directory, entropy-seeded randomness.
    pub fn new() -> Self {
        HostConfig {
            working_directory: Rc::new(ProcessWorkingDirectory),
            random_seed: None,
        }
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name))
    }

    /// Read overrides through `var`, shaped like `std::env::var`.
    pub fn from_vars(var: impl Fn(&str) -> Result<String, VarError>) -> Result<Self, ConfigError> {
        let mut config = HostConfig::new();
        match var(RANDOM_SEED_VAR) {
            Ok(raw) => {
                let seed = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidSeed { value: raw.clone() })?;
                config = config.random_seed(seed);
            }
            Err(VarError::NotPresent) => {}
            Err(VarError::NotUnicode(raw)) => {
                return Err(ConfigError::InvalidSeed {
                    value: raw.to_string_lossy().into_owned(),
                });
            }
        }
        Ok(config)
    }

    /// Seed every `random` module instance deterministically.
    #[must_use]
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Replace the working directory service.
    #[must_use]
    pub fn working_directory(mut self, service: impl WorkingDirectory + 'static) -> Self {
        self.working_directory = Rc::new(service);
        self
    }

    pub fn build(self) -> Host {
        Host {
            working_directory: self.working_directory,
            random_seed: self.random_seed,
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Services shared by every builtin module.
#[derive(Clone)]
pub struct Host {
    working_directory: Rc<dyn WorkingDirectory>,
    random_seed: Option<u64>,
}

impl Host {
    pub fn working_directory(&self) -> &dyn WorkingDirectory {
        &*self.working_directory
    }

    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }

    /// Fresh generator for one `random` module instance.
    pub fn rng(&self) -> StdRng {
        match self.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Absolute form of `path`, joined onto the working directory when relative.
    pub fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let path = Path::new(path);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.working_directory.current()?.join(path))
        }
    }

    /// `resolve` behind the fault boundary of the running routine.
    pub(crate) fn resolve_in(&self, ctx: &CallContext, path: &str) -> Result<PathBuf, EvalError> {
        ctx.guard(&format!("resolve `{path}`"), || self.resolve(path))
    }

    /// Register a routine whose body needs the host.
    pub(crate) fn register(
        &self,
        m: &mut ModuleBuilder,
        name: &str,
        params: &[&'static str],
        body: fn(&CallContext, &Host) -> EvalResult,
    ) {
        let host = self.clone();
        m.function(name, params, move |ctx| body(ctx, &host));
    }
}

impl Default for Host {
    fn default() -> Self {
        HostConfig::new().build()
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("random_seed", &self.random_seed)
            .finish_non_exhaustive()
    }
}
