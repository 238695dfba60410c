use std::path::{Path, PathBuf};

pub trait PathExt {
    /// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the path as is.
    fn expanded(&self) -> PathBuf;
    /// Join onto `base` unless already absolute.
    fn resolved_against(&self, base: &Path) -> PathBuf;
}

impl PathExt for Path {
    fn expanded(&self) -> PathBuf {
        let raw = self.to_string_lossy();
        shellexpand::full(raw.as_ref())
            .map(|s| PathBuf::from(s.into_owned()))
            .unwrap_or_else(|_| self.to_path_buf())
    }

    fn resolved_against(&self, base: &Path) -> PathBuf {
        if self.is_absolute() {
            self.to_path_buf()
        } else {
            base.join(self)
        }
    }
}
