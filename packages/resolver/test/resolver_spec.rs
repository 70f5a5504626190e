/**
 * Resolver Tests
 *
 * Chain following over an in-memory module graph.
 */

#[cfg(test)]
mod tests {
    use import_resolver::alias::{NoPackageAliases, ScopedPackageTranslator};
    use import_resolver::file_system::testing::MockFileSystem;
    use import_resolver::file_system::AbsoluteFsPath;
    use import_resolver::{ResolveError, ResolvedReference, Resolver};

    fn path(p: &str) -> AbsoluteFsPath {
        AbsoluteFsPath::new(p)
    }

    fn resolve(fs: &MockFileSystem, file: &str, specifier: &str, name: &str) -> Option<String> {
        let translator = ScopedPackageTranslator::new("@glide");
        let resolver = Resolver::new(fs, &translator, "/repo/packages");
        resolver.resolve(&path(file), specifier, name).unwrap()
    }

    #[test]
    fn follows_re_export_chain_to_defining_module() {
        let fs = MockFileSystem::with_files(&[
            ("/src/a.ts", "import { foo } from \"./b\";\n"),
            ("/src/b.ts", "export { foo } from \"./c\";\n"),
            ("/src/c.ts", "export const foo = 1;\n"),
        ]);
        assert_eq!(resolve(&fs, "/src/a.ts", "./b", "foo"), Some("./c".to_string()));
    }

    #[test]
    fn follows_long_chains_across_directories() {
        let fs = MockFileSystem::with_files(&[
            ("/src/app/a.ts", ""),
            ("/src/lib/index.ts", "export { foo, bar } from \"./inner\";\n"),
            ("/src/lib/inner.ts", "export { foo } from \"../core/foo\";\nexport const bar = 2;\n"),
            ("/src/core/foo.tsx", "export const foo = 1;\n"),
        ]);
        assert_eq!(resolve(&fs, "/src/app/a.ts", "../lib", "foo"), Some("../core/foo".to_string()));
        assert_eq!(resolve(&fs, "/src/app/a.ts", "../lib", "bar"), Some("../lib/inner".to_string()));
    }

    #[test]
    fn undeclared_name_resolves_to_the_original_module() {
        let fs = MockFileSystem::with_files(&[
            ("/src/a.ts", ""),
            ("/src/b.ts", "export const other = 1;\n"),
        ]);
        assert_eq!(resolve(&fs, "/src/a.ts", "./b", "foo"), Some("./b".to_string()));
    }

    #[test]
    fn wildcard_re_exports_end_the_chain() {
        let fs = MockFileSystem::with_files(&[
            ("/src/a.ts", ""),
            ("/src/b.ts", "export * from \"./c\";\n"),
            ("/src/c.ts", "export const foo = 1;\n"),
        ]);
        assert_eq!(resolve(&fs, "/src/a.ts", "./b", "foo"), Some("./b".to_string()));
    }

    #[test]
    fn skips_wildcards_but_keeps_scanning_the_file() {
        let fs = MockFileSystem::with_files(&[
            ("/src/a.ts", ""),
            ("/src/b.ts", "export * from \"./x\";\nexport { foo } from \"./c\";\n"),
            ("/src/c.ts", "export const foo = 1;\n"),
        ]);
        assert_eq!(resolve(&fs, "/src/a.ts", "./b", "foo"), Some("./c".to_string()));
    }

    #[test]
    fn opaque_javascript_module_stops_at_last_source() {
        let fs = MockFileSystem::with_files(&[
            ("/src/a.ts", ""),
            ("/src/b.ts", "export { foo } from \"./c\";\n"),
            ("/src/c.ts", "export { foo } from \"./legacy\";\n"),
            ("/src/legacy.js", "exports.foo = 1;\n"),
        ]);
        assert_eq!(resolve(&fs, "/src/a.ts", "./b", "foo"), Some("./c".to_string()));
    }

    #[test]
    fn opaque_first_step_resolves_to_nothing() {
        let fs = MockFileSystem::with_files(&[("/src/a.ts", ""), ("/src/types/index.d.ts", "")]);
        assert_eq!(resolve(&fs, "/src/a.ts", "./types", "T"), None);
    }

    #[test]
    fn external_package_stops_with_last_source() {
        let fs = MockFileSystem::with_files(&[
            ("/src/a.ts", ""),
            ("/src/b.ts", "export { useState } from \"react\";\n"),
        ]);
        assert_eq!(resolve(&fs, "/src/a.ts", "./b", "useState"), Some("./b".to_string()));
    }

    #[test]
    fn package_specifier_takes_precedence_over_files_inside_it() {
        let fs = MockFileSystem::with_files(&[
            ("/src/a.ts", ""),
            ("/src/b.ts", "export { foo } from \"@glide/common\";\n"),
            ("/repo/packages/common/src/index.ts", "export { foo } from \"./strings\";\n"),
            ("/repo/packages/common/src/strings.ts", "export const foo = 1;\n"),
        ]);
        assert_eq!(resolve(&fs, "/src/a.ts", "./b", "foo"), Some("@glide/common".to_string()));
    }

    #[test]
    fn later_package_specifier_replaces_earlier_one() {
        let fs = MockFileSystem::with_files(&[
            ("/src/a.ts", ""),
            ("/repo/packages/common/src/index.ts", "export { foo } from \"@glide/strings/format\";\n"),
            ("/repo/packages/strings/src/format.ts", "export const foo = 1;\n"),
        ]);
        assert_eq!(
            resolve(&fs, "/src/a.ts", "@glide/common", "foo"),
            Some("@glide/strings/format".to_string())
        );
    }

    #[test]
    fn missing_package_file_keeps_package_specifier() {
        let fs = MockFileSystem::with_files(&[
            ("/src/a.ts", ""),
            ("/src/b.ts", "export { foo } from \"@glide/ghost\";\n"),
        ]);
        assert_eq!(resolve(&fs, "/src/a.ts", "./b", "foo"), Some("@glide/ghost".to_string()));
    }

    #[test]
    fn missing_relative_module_is_fatal() {
        let fs = MockFileSystem::with_files(&[
            ("/src/a.ts", ""),
            ("/src/b.ts", "export { foo } from \"./gone\";\n"),
        ]);
        let resolver = Resolver::new(&fs, &NoPackageAliases, "/repo/packages");
        let err = resolver.resolve(&path("/src/a.ts"), "./b", "foo").unwrap_err();
        match &err {
            ResolveError::UnresolvableRelativeImport { specifier, from, base } => {
                assert_eq!(specifier, "./gone");
                assert_eq!(from, "/src/b.ts");
                assert_eq!(base, "/src/gone");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.is_fatal());
    }

    #[test]
    fn follows_renamed_re_exports_by_source_name() {
        let fs = MockFileSystem::with_files(&[
            ("/src/a.ts", "import { bar } from \"./b\";\n"),
            ("/src/b.ts", "export { foo as bar } from \"./c\";\n"),
            ("/src/c.ts", "export { impl as foo } from \"./d\";\n"),
            ("/src/d.ts", "export const impl = 1;\n"),
        ]);
        assert_eq!(resolve(&fs, "/src/a.ts", "./b", "bar"), Some("./d".to_string()));
        assert_eq!(resolve(&fs, "/src/a.ts", "./b", "foo"), Some("./b".to_string()));
    }

    #[test]
    fn local_alias_hides_the_source_name() {
        let fs = MockFileSystem::with_files(&[
            ("/src/a.ts", ""),
            ("/src/b.ts", "import { foo as fooImpl } from \"./c\";\nexport function foo() {}\n"),
            ("/src/c.ts", "export const foo = 1;\n"),
        ]);
        assert_eq!(resolve(&fs, "/src/a.ts", "./b", "foo"), Some("./b".to_string()));
        assert_eq!(resolve(&fs, "/src/a.ts", "./b", "fooImpl"), Some("./c".to_string()));
    }

    #[test]
    fn targets_in_dot_directories_stay_relative() {
        let fs = MockFileSystem::with_files(&[
            ("/src/a.ts", ""),
            ("/src/b.ts", "export { foo } from \"./.generated/c\";\n"),
            ("/src/.generated/c.ts", "export const foo = 1;\n"),
        ]);
        assert_eq!(resolve(&fs, "/src/a.ts", "./b", "foo"), Some("./.generated/c".to_string()));
    }

    #[test]
    fn cyclic_re_exports_are_reported() {
        let fs = MockFileSystem::with_files(&[
            ("/src/a.ts", ""),
            ("/src/b.ts", "export { foo } from \"./c\";\n"),
            ("/src/c.ts", "export { foo } from \"./b\";\n"),
        ]);
        let resolver = Resolver::new(&fs, &NoPackageAliases, "/repo/packages");
        let err = resolver.resolve(&path("/src/a.ts"), "./b", "foo").unwrap_err();
        assert!(matches!(err, ResolveError::CyclicReExport { ref name, .. } if name == "foo"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn raw_reference_is_absolute() {
        let fs = MockFileSystem::with_files(&[
            ("/src/a.ts", ""),
            ("/src/b.ts", "export { foo } from \"./c\";\n"),
            ("/src/c.ts", "export const foo = 1;\n"),
        ]);
        let resolver = Resolver::new(&fs, &NoPackageAliases, "/repo/packages");
        assert_eq!(
            resolver.resolve_reference(&path("/src/a.ts"), "./b", "foo").unwrap(),
            Some(ResolvedReference::File(path("/src/c.ts")))
        );
    }
}
