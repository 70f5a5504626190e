/**
 * Declaration Scanner Tests
 */

#[cfg(test)]
mod tests {
    use import_resolver::declarations::{
        parse, unparse, Declaration, DeclarationKind, DeclarationNames, ImportName, Span,
    };

    fn declarations(code: &str) -> Vec<Declaration> {
        parse(code)
            .into_iter()
            .filter_map(|span| match span {
                Span::Declaration(decl) => Some(decl),
                Span::Literal(_) => None,
            })
            .collect()
    }

    fn single(code: &str) -> Declaration {
        let mut decls = declarations(code);
        assert_eq!(decls.len(), 1, "expected one declaration in {:?}", code);
        decls.remove(0)
    }

    #[test]
    fn parses_named_import() {
        assert_eq!(
            single("import { a, b } from \"./mod\";"),
            Declaration::named(
                DeclarationKind::Import,
                false,
                vec![ImportName::new("a"), ImportName::new("b")],
                "./mod"
            )
        );
    }

    #[test]
    fn parses_type_only_export() {
        let decl = single("export type { Shape } from \"@glide/common\";");
        assert_eq!(decl.kind, DeclarationKind::Export);
        assert!(decl.is_type_only());
        assert_eq!(decl.path, "@glide/common");
    }

    #[test]
    fn parses_wildcard_export() {
        let decl = single("export * from \"./all\";");
        assert!(decl.is_wildcard());
        assert_eq!(decl.names, DeclarationNames::Wildcard);
        assert!(!decl.declares("anything"));
    }

    #[test]
    fn parses_aliases_and_inline_type_modifiers() {
        let decl = single("import { a as b, type C, type D as E } from \"./x\";");
        let names: Vec<ImportName> = decl.name_list().unwrap().iter().cloned().collect();
        assert_eq!(
            names,
            vec![
                ImportName::new("a").with_alias("b"),
                ImportName::new("C").with_type(),
                ImportName::new("D").with_alias("E").with_type(),
            ]
        );
        assert!(decl.declares("b"));
        assert!(!decl.declares("a"));
        assert_eq!(decl.binding_for("E").map(|n| n.name.as_str()), Some("D"));
    }

    #[test]
    fn splits_multiline_lists_and_drops_empty_entries() {
        let decl = single("import {\n    a,\n    b,\n} from \"./x\";");
        let names: Vec<&str> = decl.name_list().unwrap().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn collapses_duplicate_names() {
        let decl = single("import { a, a, b } from \"./x\";");
        assert_eq!(decl.name_list().unwrap().len(), 2);
    }

    #[test]
    fn default_style_imports_stay_literal() {
        let code = "import React from \"react\";\n";
        assert_eq!(parse(code), vec![Span::Literal(code.to_string())]);
    }

    #[test]
    fn unsupported_shapes_stay_literal() {
        let code = concat!(
            "import {} from \"./empty\";\n",
            "import * as ns from \"./ns\";\n",
            "import { a, /* note */ b } from \"./commented\";\n",
            "import \"./side-effect\";\n",
            "const lazy = import(\"./dynamic\");\n",
            "export { local };\n",
        );
        assert!(declarations(code).is_empty());
        assert_eq!(unparse(&parse(code)), code);
    }

    #[test]
    fn keeps_declarations_in_source_order() {
        let decls = declarations(
            "import { a } from \"./a\";\nexport * from \"./b\";\nexport { c } from \"./c\";\n",
        );
        let paths: Vec<&str> = decls.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["./a", "./b", "./c"]);
    }
}
