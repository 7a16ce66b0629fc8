use std::path::{Component, Path, PathBuf};

/// Extension trait for Path with the conversions and walks the scaffolder needs.
pub trait PathExt {
    /// Resolves `levels` parent directories lexically, the way `path.resolve(dir, '../..')`
    /// would. Stops at the filesystem root.
    ///
    /// # Examples
    /// ```
    /// use rnscaffold::ext::PathExt;
    /// use std::path::{Path, PathBuf};
    ///
    /// let path = Path::new("/a/b/c/d");
    /// assert_eq!(path.up(2), PathBuf::from("/a/b"));
    /// ```
    fn up(&self, levels: usize) -> PathBuf;

    /// Drops `.` components and folds `..` into the preceding component, without
    /// touching the filesystem. Leading `..` of a relative path are kept.
    fn normalize(&self) -> PathBuf;

    /// Makes the path absolute against `base` and normalizes it.
    fn absolutize(&self, base: &Path) -> PathBuf;

    /// Path with forward slashes, used for pattern matching across platforms.
    fn to_slash_string(&self) -> String;
}

impl PathExt for Path {
    fn up(&self, levels: usize) -> PathBuf {
        let mut path = self.to_path_buf();
        for _ in 0..levels {
            if !path.pop() {
                break;
            }
        }
        path
    }

    fn normalize(&self) -> PathBuf {
        let mut normalized = PathBuf::new();
        for component in self.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => match normalized.components().next_back() {
                    Some(Component::Normal(_)) => {
                        normalized.pop();
                    }
                    Some(Component::RootDir | Component::Prefix(_)) => {}
                    _ => normalized.push(".."),
                },
                other => normalized.push(other.as_os_str()),
            }
        }
        normalized
    }

    fn absolutize(&self, base: &Path) -> PathBuf {
        if self.is_absolute() { self.normalize() } else { base.join(self).normalize() }
    }

    fn to_slash_string(&self) -> String {
        self.to_string_lossy().replace('\\', "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_stops_at_root() {
        assert_eq!(Path::new("/a/b").up(4), PathBuf::from("/"));
        assert_eq!(Path::new("/a/b/c").up(0), PathBuf::from("/a/b/c"));
    }

    #[test]
    fn test_absolutize_relative_path() {
        let base = Path::new("/work/repo");
        assert_eq!(Path::new("app").absolutize(base), PathBuf::from("/work/repo/app"));
        assert_eq!(Path::new("./a/../b").absolutize(base), PathBuf::from("/work/repo/b"));
        assert_eq!(Path::new("/abs/./x").absolutize(base), PathBuf::from("/abs/x"));
    }

    #[test]
    fn test_normalize_relative_path() {
        assert_eq!(
            Path::new("react-native-windows/./local-cli/platform.js").normalize(),
            PathBuf::from("react-native-windows/local-cli/platform.js")
        );
        assert_eq!(Path::new("pkg/../../shared/x.js").normalize(), PathBuf::from("../shared/x.js"));
        assert_eq!(Path::new("/../a/./b/..").normalize(), PathBuf::from("/a"));
    }
}
