// Package Aliases
//
// Non-relative specifiers that name one of the repository's own packages
// (`@scope/pkg/sub/path`) are translated to a package name plus a subpath
// inside that package's `src/` directory. Everything else is opaque.

use crate::file_system::PathManipulation;

/// A specifier decomposed into a package and a path inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageAlias {
    pub package_name: String,
    pub subpath: Option<String>,
}

impl PackageAlias {
    pub fn new(package_name: impl Into<String>, subpath: Option<&str>) -> Self {
        Self {
            package_name: package_name.into(),
            subpath: subpath.map(str::to_string),
        }
    }

    /// Extension-less path of the module inside `packages_dir`:
    /// `<packages_dir>/<package>/src/<subpath or index>`.
    pub fn source_base(&self, paths: &dyn PathManipulation, packages_dir: &str) -> String {
        let entry = self.subpath.as_deref().unwrap_or("index");
        paths.join(packages_dir, &[self.package_name.as_str(), "src", entry])
    }
}

/// Policy deciding which non-relative specifiers are followed.
pub trait PackageAliasTranslator: Send + Sync {
    /// `None` means the specifier is not one of this repository's packages.
    fn translate(&self, specifier: &str) -> Option<PackageAlias>;
}

/// Translates `<scope>/<package>[/<subpath>]`.
#[derive(Debug, Clone)]
pub struct ScopedPackageTranslator {
    scope: String,
}

impl ScopedPackageTranslator {
    pub fn new(scope: impl Into<String>) -> Self {
        let scope = scope.into();
        Self {
            scope: scope.trim_end_matches('/').to_string(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }
}

impl PackageAliasTranslator for ScopedPackageTranslator {
    fn translate(&self, specifier: &str) -> Option<PackageAlias> {
        let rest = specifier.strip_prefix(&self.scope)?.strip_prefix('/')?;
        let (package_name, subpath) = match rest.split_once('/') {
            Some((package, sub)) => (package, Some(sub).filter(|s| !s.is_empty())),
            None => (rest, None),
        };
        if package_name.is_empty() {
            return None;
        }
        Some(PackageAlias::new(package_name, subpath))
    }
}

/// Translator backed by a closure, for ad-hoc policies.
pub struct FnPackageAliasTranslator {
    translate_fn: Box<dyn Fn(&str) -> Option<PackageAlias> + Send + Sync>,
}

impl FnPackageAliasTranslator {
    pub fn new<F>(translate_fn: F) -> Self
    where
        F: Fn(&str) -> Option<PackageAlias> + Send + Sync + 'static,
    {
        Self {
            translate_fn: Box::new(translate_fn),
        }
    }
}

impl PackageAliasTranslator for FnPackageAliasTranslator {
    fn translate(&self, specifier: &str) -> Option<PackageAlias> {
        (self.translate_fn)(specifier)
    }
}

/// Treats every non-relative specifier as opaque.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPackageAliases;

impl PackageAliasTranslator for NoPackageAliases {
    fn translate(&self, _specifier: &str) -> Option<PackageAlias> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_system::NodeJSPathManipulation;

    #[test]
    fn translates_scoped_package_with_subpath() {
        let translator = ScopedPackageTranslator::new("@glide");
        assert_eq!(
            translator.translate("@glide/common/utils/strings"),
            Some(PackageAlias::new("common", Some("utils/strings")))
        );
        assert_eq!(
            translator.translate("@glide/common"),
            Some(PackageAlias::new("common", None))
        );
    }

    #[test]
    fn other_specifiers_are_opaque() {
        let translator = ScopedPackageTranslator::new("@glide/");
        assert_eq!(translator.translate("react"), None);
        assert_eq!(translator.translate("@glidex/common"), None);
        assert_eq!(translator.translate("@glide/"), None);
        assert_eq!(translator.translate("./local"), None);
    }

    #[test]
    fn source_base_defaults_to_index() {
        let paths = NodeJSPathManipulation;
        assert_eq!(
            PackageAlias::new("common", None).source_base(&paths, "/repo/packages"),
            "/repo/packages/common/src/index"
        );
        assert_eq!(
            PackageAlias::new("common", Some("a/b")).source_base(&paths, "/repo/packages"),
            "/repo/packages/common/src/a/b"
        );
    }

    #[test]
    fn closure_translator_delegates() {
        let translator = FnPackageAliasTranslator::new(|s| {
            (s == "core").then(|| PackageAlias::new("core", None))
        });
        assert!(translator.translate("core").is_some());
        assert!(translator.translate("other").is_none());
    }
}
