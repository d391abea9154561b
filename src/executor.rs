use std::convert::Infallible;
use std::env;
use std::ffi::{CString, OsStr};
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use log::{debug, info};
use nix::unistd::execv;
use crate::config::expand_home;
use crate::error::LaunchError;
use crate::model::EntryDefinition;

/// Everything needed to replace the current process with the chosen entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub program: PathBuf,
    pub argv: Vec<String>,
}

impl LaunchPlan {
    pub fn for_entry(entry: &EntryDefinition) -> Result<Self, LaunchError> {
        let path_var = env::var_os("PATH").unwrap_or_default();
        let program = find_in_path(&entry.binary, &path_var)
            .ok_or_else(|| LaunchError::BinaryNotFound(entry.binary.clone()))?;
        let argv = build_argv(&program, entry);
        Ok(Self { program, argv })
    }
}

fn is_executable(path: &Path) -> bool {
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Looks `binary` up the way a shell would. Names containing `/` are not searched.
pub fn find_in_path(binary: &str, path_var: &OsStr) -> Option<PathBuf> {
    let candidate = expand_home(binary);
    if candidate.components().count() > 1 {
        return is_executable(&candidate).then_some(candidate);
    }

    for dir in env::split_paths(path_var) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        let path = dir.join(&candidate);
        if is_executable(&path) {
            debug!("Resolved {} to {:?}", binary, path);
            return Some(path);
        }
    }
    None
}

pub fn build_argv(program: &Path, entry: &EntryDefinition) -> Vec<String> {
    let mut argv = vec![program.to_string_lossy().to_string()];
    if let Some(args) = &entry.args {
        argv.extend(args.to_vec());
    }
    argv
}

/// Replaces the current process image. Only returns if the exec failed.
pub fn exec(plan: &LaunchPlan) -> Result<Infallible, LaunchError> {
    let program_name = plan.program.display().to_string();
    let exec_error = |source: nix::Error| LaunchError::Exec {
        program: program_name.clone(),
        source,
    };

    let program = CString::new(plan.program.as_os_str().as_bytes())
        .map_err(|_| exec_error(nix::Error::EINVAL))?;
    let argv = plan
        .argv
        .iter()
        .map(|arg| CString::new(arg.as_str()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| exec_error(nix::Error::EINVAL))?;

    info!("Executing {:?}", plan.argv);
    execv(&program, &argv).map_err(exec_error)
}
