//! Filesystem relocator: creates library directories, moves files and
//! cleans up emptied download directories.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use kinoteka::{KinotekaError, Relocator, Result};

const DIR_MODE: u32 = 0o775;
const FILE_MODE: u32 = 0o664;

/// Owner applied to everything the relocator creates or moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ownership {
    pub user: String,
    pub group: String,
}

pub struct FsRelocator {
    rehearsal: bool,
    owner: Option<Ownership>,
}

impl FsRelocator {
    /// In rehearsal mode nothing on disk is touched.
    pub fn new(rehearsal: bool) -> Self {
        Self {
            rehearsal,
            owner: None,
        }
    }

    pub fn with_owner(mut self, owner: Ownership) -> Self {
        self.owner = Some(owner);
        self
    }

    fn finish(&self, path: &Path, mode: u32) {
        if let Err(e) = set_mode(path, mode) {
            warn!(path = %path.display(), error = %e, "could not set permissions");
        }
        if let Some(owner) = &self.owner {
            if let Err(e) = set_owner(path, owner) {
                warn!(path = %path.display(), error = %e, "could not set ownership");
            }
        }
    }
}

impl Relocator for FsRelocator {
    fn ensure_dir(&mut self, dir: &Path) -> Result<()> {
        if self.rehearsal || dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|e| relocation(dir, e))?;
        self.finish(dir, DIR_MODE);
        Ok(())
    }

    fn move_file(&mut self, source: &Path, destination: &Path) -> Result<()> {
        if self.rehearsal {
            println!("Would move: {} -> {}", source.display(), destination.display());
            return Ok(());
        }
        if destination.exists() {
            return Err(relocation(
                destination,
                io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists"),
            ));
        }

        println!("Moving: {} -> {}", source.display(), destination.display());
        match fs::rename(source, destination) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                debug!(from = %source.display(), "rename crosses devices, copying");
                copy_across(source, destination)?;
            }
            Err(e) => return Err(relocation(source, e)),
        }
        self.finish(destination, FILE_MODE);
        Ok(())
    }

    fn remove_if_empty(&mut self, dir: &Path) -> Result<bool> {
        if self.rehearsal || !dir.is_dir() {
            return Ok(false);
        }
        let mut entries = fs::read_dir(dir).map_err(|e| relocation(dir, e))?;
        if entries.next().is_some() {
            return Ok(false);
        }
        fs::remove_dir(dir).map_err(|e| relocation(dir, e))?;
        println!("Removed empty directory: {}", dir.display());
        Ok(true)
    }

    fn is_rehearsal(&self) -> bool {
        self.rehearsal
    }
}

fn relocation(path: &Path, source: io::Error) -> KinotekaError {
    KinotekaError::Relocation {
        path: path.to_path_buf(),
        source,
    }
}

/// Copies `source` to `destination` and then removes `source`. The copy is
/// what counts: a source that cannot be removed is left behind with a warning.
fn copy_across(source: &Path, destination: &Path) -> Result<()> {
    fs::copy(source, destination).map_err(|e| relocation(destination, e))?;
    discard_source(source);
    Ok(())
}

fn discard_source(source: &Path) -> bool {
    match fs::remove_file(source) {
        Ok(()) => true,
        Err(e) => {
            warn!(
                source = %source.display(),
                error = %e,
                "copied across devices but the original could not be removed"
            );
            false
        }
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn set_owner(path: &Path, owner: &Ownership) -> std::result::Result<(), String> {
    use nix::unistd::{Group, User, chown};

    let user = User::from_name(&owner.user)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("unknown user {}", owner.user))?;
    let group = Group::from_name(&owner.group)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("unknown group {}", owner.group))?;
    chown(path, Some(user.uid), Some(group.gid)).map_err(|e| e.to_string())
}

#[cfg(not(unix))]
fn set_owner(_path: &Path, _owner: &Ownership) -> std::result::Result<(), String> {
    Ok(())
}

/// `true` when the process can change file ownership.
#[cfg(unix)]
pub fn is_root() -> bool {
    nix::unistd::geteuid().is_root()
}

#[cfg(not(unix))]
pub fn is_root() -> bool {
    true
}
