//! Stub file name helpers
//!
//! Entry names are classified by their extension alone. A name like
//! `machine.pyi` is a loose module named `machine`; a directory is a package
//! when it holds `__init__.pyi`.

/// Base name of the file that marks a directory as a package.
pub const PACKAGE_MARKER: &str = "__init__";

/// Whether `name` carries the stub extension (`name.ends_with(".pyi")`).
pub fn is_stub_name(name: &str, extension: &str) -> bool {
    name.strip_suffix(extension)
        .is_some_and(|rest| rest.ends_with('.'))
}

/// The module name of a stub file, or `None` if `name` is not a stub file
/// or has nothing before the extension.
pub fn module_stem<'a>(name: &'a str, extension: &str) -> Option<&'a str> {
    name.strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .filter(|stem| !stem.is_empty())
}

/// The stub file name for a module, e.g. `machine` -> `machine.pyi`.
pub fn stub_file_name(stem: &str, extension: &str) -> String {
    format!("{}.{}", stem, extension)
}

/// The marker file name for packages, e.g. `__init__.pyi`.
pub fn package_marker(extension: &str) -> String {
    stub_file_name(PACKAGE_MARKER, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_stub_name() {
        assert!(is_stub_name("machine.pyi", "pyi"));
        assert!(is_stub_name("__builtins__.pyi", "pyi"));
        assert!(is_stub_name(".pyi", "pyi"));
        assert!(!is_stub_name("machinepyi", "pyi"));
        assert!(!is_stub_name("machine.py", "pyi"));
        assert!(!is_stub_name("stdlib", "pyi"));
    }

    #[test]
    fn test_module_stem() {
        assert_eq!(module_stem("machine.pyi", "pyi"), Some("machine"));
        assert_eq!(module_stem("os.path.pyi", "pyi"), Some("os.path"));
        assert_eq!(module_stem(".pyi", "pyi"), None);
        assert_eq!(module_stem("machine", "pyi"), None);
    }

    #[test]
    fn test_package_marker() {
        assert_eq!(package_marker("pyi"), "__init__.pyi");
        assert_eq!(stub_file_name("builtins", "pyi"), "builtins.pyi");
    }
}
