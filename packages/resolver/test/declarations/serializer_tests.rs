/**
 * Declaration Serializer Tests
 */

#[cfg(test)]
mod tests {
    use import_resolver::declarations::{
        parse, unparse, Declaration, DeclarationKind, ImportName, Span,
    };

    #[test]
    fn round_trips_canonical_text() {
        let code = concat!(
            "// leading comment\n",
            "import { a, b } from \"./a\";\n",
            "import type { T } from \"@glide/types\";\n",
            "export * from \"./everything\";\n",
            "export type * from \"./types\";\n",
            "\n",
            "export const x = a + b;\n",
        );
        assert_eq!(unparse(&parse(code)), code);
    }

    #[test]
    fn canonicalizes_declaration_spacing() {
        let spans = parse("import {a,b as c}   from   \"./a\";");
        assert_eq!(unparse(&spans), "import { a, b as c } from \"./a\";");
    }

    #[test]
    fn renders_type_modifiers() {
        let decl = Declaration::named(
            DeclarationKind::Export,
            true,
            vec![ImportName::new("A"), ImportName::new("B").with_alias("C")],
            "./types",
        );
        assert_eq!(decl.to_string(), "export type { A, B as C } from \"./types\";");

        let inline = Declaration::named(
            DeclarationKind::Import,
            false,
            vec![ImportName::new("T").with_type()],
            "./t",
        );
        assert_eq!(inline.to_string(), "import { type T } from \"./t\";");
    }

    #[test]
    fn reparsing_serialized_declarations_is_stable() {
        let declarations = vec![
            Declaration::named(
                DeclarationKind::Import,
                false,
                vec![ImportName::new("a"), ImportName::new("b").with_alias("c")],
                "../lib",
            ),
            Declaration::named(
                DeclarationKind::Export,
                true,
                vec![ImportName::new("T").with_type()],
                "@glide/common/types",
            ),
            Declaration::wildcard(DeclarationKind::Export, false, "./all"),
        ];

        for decl in declarations {
            let text = unparse(&[Span::Declaration(decl.clone())]);
            assert_eq!(parse(&text), vec![Span::Declaration(decl)], "{}", text);
        }
    }

    #[test]
    fn emits_literals_verbatim() {
        let spans = vec![
            Span::Literal("/* keep   me */\n".to_string()),
            Span::Declaration(Declaration::wildcard(DeclarationKind::Export, false, "./x")),
            Span::Literal("\r\n".to_string()),
        ];
        assert_eq!(unparse(&spans), "/* keep   me */\nexport * from \"./x\";\r\n");
    }
}
