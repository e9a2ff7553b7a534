use std::ffi::OsStr;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Result, ScriptError};
use crate::models::Archetype;
use crate::selection::Selection;
use crate::template::SINGLETON_BASE_NAME;

pub const DEFAULT_ROOT: &str = "Assets";
pub const SCRIPTS_FOLDER: &str = "Scripts";
pub const SCRIPT_EXTENSION: &str = "cs";

/// Files written by one create action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Created {
    pub script: PathBuf,
    /// Set only when the base class file was written by this action.
    pub singleton_base: Option<PathBuf>,
}

/// The project tree scripts are created in.
#[derive(Clone, Debug)]
pub struct Project {
    root: PathBuf,
}

pub fn sanitize_name(name: &str) -> String {
    name.chars().filter(|ch| !ch.is_whitespace()).collect()
}

/// File name up to its last dot, so `.cs` has the empty stem.
fn name_without_extension(file_name: &OsStr) -> String {
    let file_name = file_name.to_string_lossy();
    match file_name.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => file_name.into_owned(),
    }
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scripts_folder(&self) -> PathBuf {
        self.root.join(SCRIPTS_FOLDER)
    }

    /// Folder of the current selection, or the root when nothing usable is selected.
    pub fn target_folder(&self, selected: Option<&Path>) -> PathBuf {
        let Some(selected) = selected.filter(|path| !path.as_os_str().is_empty()) else {
            return self.root.clone();
        };
        if selected.is_dir() {
            return selected.to_path_buf();
        }
        if selected.is_file() {
            if let Some(parent) = selected.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                return parent.to_path_buf();
            }
        }
        self.root.clone()
    }

    /// Looks for any file under the root whose stem is `stem`, whatever its
    /// extension or folder.
    pub fn find_by_stem(&self, stem: &str) -> bool {
        WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .any(|entry| name_without_extension(entry.file_name()) == stem)
    }

    pub fn create_file(&self, folder: &Path, name: &str, text: &str) -> Result<PathBuf> {
        let stem = sanitize_name(name);
        if self.find_by_stem(&stem) {
            warn!(name = %stem, "script already exists");
            return Err(ScriptError::DuplicateName { name: stem });
        }
        let path = folder.join(format!("{stem}.{SCRIPT_EXTENSION}"));
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => ScriptError::DuplicateName { name: stem.clone() },
                _ => ScriptError::io(&path, err),
            })?;
        file.write_all(text.as_bytes())
            .map_err(|err| ScriptError::io(&path, err))?;
        info!(path = %path.display(), "created script");
        Ok(path)
    }

    pub fn ensure_scripts_folder(&self) -> Result<PathBuf> {
        let folder = self.scripts_folder();
        if folder.is_dir() {
            return Ok(folder);
        }
        if !self.root.is_dir() {
            return Err(ScriptError::MissingParentFolder {
                path: self.root.clone(),
            });
        }
        fs::create_dir(&folder).map_err(|err| ScriptError::io(&folder, err))?;
        info!(path = %folder.display(), "created scripts folder");
        Ok(folder)
    }

    /// Writes the generic base class unless one is already there.
    pub fn write_singleton_base(&self, text: &str) -> Result<Option<PathBuf>> {
        let folder = self.ensure_scripts_folder()?;
        let path = folder.join(format!("{SINGLETON_BASE_NAME}.{SCRIPT_EXTENSION}"));
        if path.exists() {
            debug!(path = %path.display(), "singleton base already present");
            return Ok(None);
        }
        fs::write(&path, text).map_err(|err| ScriptError::io(&path, err))?;
        info!(path = %path.display(), "created singleton base");
        Ok(Some(path))
    }

    /// The whole create action for the current form state.
    pub fn create_script(&self, selection: &Selection, selected: Option<&Path>) -> Result<Created> {
        let stem = sanitize_name(selection.name());
        let rendered = selection.render_as(&stem);

        let mut singleton_base = None;
        if selection.archetype() == Archetype::Singleton {
            if let Some(base) = rendered.singleton_base.as_deref() {
                singleton_base = self.write_singleton_base(base)?;
            }
        }

        let folder = self.target_folder(selected);
        let script = self.create_file(&folder, &stem, &rendered.script)?;
        Ok(Created {
            script,
            singleton_base,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_whitespace() {
        assert_eq!(sanitize_name("My Script"), "MyScript");
        assert_eq!(sanitize_name(" a\tb c "), "abc");
        assert_eq!(sanitize_name(""), "");
    }

    #[test]
    fn stem_drops_only_the_last_extension() {
        assert_eq!(name_without_extension(OsStr::new(".cs")), "");
        assert_eq!(name_without_extension(OsStr::new("Hero.cs")), "Hero");
        assert_eq!(name_without_extension(OsStr::new("Hero.cs.meta")), "Hero.cs");
        assert_eq!(name_without_extension(OsStr::new("README")), "README");
    }

    #[test]
    fn target_folder_falls_back_to_root() {
        let project = Project::new("does-not-exist-root");
        assert_eq!(project.target_folder(None), PathBuf::from("does-not-exist-root"));
        assert_eq!(
            project.target_folder(Some(Path::new("missing/thing.cs"))),
            PathBuf::from("does-not-exist-root")
        );
    }

    #[test]
    fn missing_root_finds_nothing() {
        let project = Project::new("does-not-exist-root");
        assert!(!project.find_by_stem("Anything"));
        assert!(matches!(
            project.ensure_scripts_folder(),
            Err(ScriptError::MissingParentFolder { .. })
        ));
    }
}
