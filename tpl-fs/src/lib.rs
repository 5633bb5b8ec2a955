//! Capability-scoped read access to the bundled dataset directory.
//!
//! A [`ResourceBundle`] holds a `cap-std` directory handle, so resource names
//! resolve inside the bundle root and cannot escape it through `..` or
//! absolute paths.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io;

/// Read-only handle on a directory of named resources.
#[derive(Debug)]
pub struct ResourceBundle {
    root: Utf8PathBuf,
    dir: fs_utf8::Dir,
}

impl ResourceBundle {
    /// Open `root` using ambient authority.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when `root` does not exist or is not
    /// a directory.
    pub fn open(root: &Utf8Path) -> io::Result<Self> {
        let dir = fs_utf8::Dir::open_ambient_dir(root, ambient_authority())?;
        log::debug!("opened resource bundle at {root}");
        Ok(Self {
            root: root.to_owned(),
            dir,
        })
    }

    /// Directory the bundle was opened from.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Read the resource `name` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::NotFound`] when the resource is missing and
    /// other I/O errors as reported by the operating system, including
    /// attempts to resolve a name outside the bundle root.
    pub fn read_to_string(&self, name: &str) -> io::Result<String> {
        self.dir.read_to_string(name)
    }

    /// Display path of the resource `name`, for diagnostics.
    pub fn resource_path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

/// Return whether `path` exists and is a directory.
///
/// # Errors
///
/// Propagates I/O errors other than "not found".
pub fn dir_exists(path: &Utf8Path) -> io::Result<bool> {
    match fs_utf8::Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => dir.dir_metadata().map(|meta| meta.is_dir()),
        Err(err)
            if matches!(
                err.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
            ) =>
        {
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn bundle_dir() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().unwrap_or_else(|err| panic!("create temp dir: {err}"));
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .unwrap_or_else(|path| panic!("non-UTF-8 temp dir {}", path.display()));
        std::fs::write(root.join("Branches 2024.json").as_std_path(), "[]")
            .unwrap_or_else(|err| panic!("write fixture: {err}"));
        std::fs::create_dir(root.join("nested").as_std_path())
            .unwrap_or_else(|err| panic!("create nested dir: {err}"));
        (temp, root)
    }

    #[rstest]
    fn reads_named_resource(bundle_dir: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = bundle_dir;
        let bundle = ResourceBundle::open(&root).unwrap_or_else(|err| panic!("open: {err}"));
        let text = bundle
            .read_to_string("Branches 2024.json")
            .unwrap_or_else(|err| panic!("read: {err}"));
        assert_eq!(text, "[]");
        assert_eq!(bundle.root(), root);
    }

    #[rstest]
    fn missing_resource_is_not_found(bundle_dir: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = bundle_dir;
        let bundle = ResourceBundle::open(&root).unwrap_or_else(|err| panic!("open: {err}"));
        match bundle.read_to_string("absent.json") {
            Ok(text) => panic!("absent resource should fail, read {text:?}"),
            Err(err) => assert_eq!(err.kind(), io::ErrorKind::NotFound),
        }
    }

    #[rstest]
    fn names_cannot_escape_the_root(bundle_dir: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = bundle_dir;
        let nested = ResourceBundle::open(&root.join("nested"))
            .unwrap_or_else(|err| panic!("open nested: {err}"));
        assert!(nested.read_to_string("../Branches 2024.json").is_err());
    }

    #[rstest]
    fn reports_directory_existence(bundle_dir: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = bundle_dir;
        assert!(dir_exists(&root).unwrap_or_else(|err| panic!("dir_exists: {err}")));
        assert!(!dir_exists(&root.join("missing")).unwrap_or_else(|err| panic!("dir_exists: {err}")));
        assert!(
            !dir_exists(&root.join("Branches 2024.json"))
                .unwrap_or_else(|err| panic!("dir_exists: {err}"))
        );
    }
}
