/**
 * Declaration Serializer
 *
 * Renders a span stream back to source text. Literals are emitted verbatim,
 * declarations in the canonical single-line form
 *
 *   <kind> [type ]{ n1, n2 } from "<path>";
 *   <kind> [type ]* from "<path>";
 */
use super::ast::*;
use std::fmt;

/// Serialize a span stream to text.
pub fn unparse(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Literal(text) => out.push_str(text),
            Span::Declaration(decl) => out.push_str(&decl.to_string()),
        }
    }
    out
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_modifier = if self.is_type { "type " } else { "" };
        match &self.names {
            DeclarationNames::Wildcard => {
                write!(f, "{} {}* from \"{}\";", self.kind, type_modifier, self.path)
            }
            DeclarationNames::Named(names) => {
                let names: Vec<String> = names.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "{} {}{{ {} }} from \"{}\";",
                    self.kind,
                    type_modifier,
                    names.join(", "),
                    self.path
                )
            }
        }
    }
}
