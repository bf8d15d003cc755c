//! Lexical path normalization for alias targets and search directories.
//!
//! Nothing here touches the filesystem: paths are cleaned of `.` and `..`
//! components and joined the way a POSIX path join does.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use path_clean::PathClean;

fn is_separator(c: char) -> bool {
    c == '/' || c == MAIN_SEPARATOR
}

/// Whether a configured target is taken as an absolute path.
pub fn is_absolute_target(target: &str) -> bool {
    target.starts_with(is_separator) || Path::new(target).is_absolute()
}

/// Turn a configured alias target into an absolute directory.
///
/// Absolute targets are kept as written. Anything else is joined under
/// `root` and cleaned.
pub fn normalize_target(target: &str, root: &Path) -> PathBuf {
    if is_absolute_target(target) {
        PathBuf::from(target)
    } else {
        root.join(target).clean()
    }
}

/// Canonical form of a search directory.
pub fn normalize_dir(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().clean()
}

/// Append a request suffix to an alias target.
///
/// A leading separator on `suffix` does not make it absolute. The trailing
/// separator of the last non-empty part survives: the suffix's, or the
/// target's when the suffix is empty.
///
/// # Examples
///
/// ```
/// use modalias::normalize::join_request;
/// use std::path::Path;
///
/// assert_eq!(join_request(Path::new("/src/utils"), "/format"), "/src/utils/format");
/// assert_eq!(join_request(Path::new("/src/utils"), ""), "/src/utils");
/// assert_eq!(join_request(Path::new("/src/utils/"), ""), "/src/utils/");
/// assert_eq!(join_request(Path::new("/src"), "a/../b/"), "/src/b/");
/// ```
pub fn join_request(target: &Path, suffix: &str) -> String {
    let relative = suffix.trim_start_matches(is_separator);
    let (joined, trailing) = if relative.is_empty() {
        let trailing = target.to_string_lossy().ends_with(is_separator)
            || suffix.ends_with(is_separator);
        (target.clean(), trailing)
    } else {
        (target.join(relative).clean(), suffix.ends_with(is_separator))
    };

    let mut out = joined.to_string_lossy().into_owned();
    if trailing && !out.ends_with(is_separator) {
        out.push('/');
    }
    out
}
