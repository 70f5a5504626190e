/**
 * Declaration Scanner
 *
 * Splits source text into literal spans and the import/export declarations
 * of the form
 *
 *   (import|export) [type] (* | { names } | IDENT) from "PATH";
 *
 * without building a syntax tree. Anything the scanner cannot fully
 * decompose stays literal text.
 */
use super::ast::*;
use crate::error::{ResolveError, Result};
use crate::file_system::{AbsoluteFsPath, ReadonlyFileSystem};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\b(import|export)(\s+type)?\s+(\*|\{([^}]*?)\}|[a-zA-Z_$][a-zA-Z\d_$]*)\s+from\s+"([^";]+)";"#,
    )
    .unwrap()
});

static NAME_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(type)\s+)?([a-zA-Z_$][a-zA-Z\d_$]*)(?:\s+as\s+([a-zA-Z_$][a-zA-Z\d_$]*))?$")
        .unwrap()
});

/// Scan `code` into an ordered span stream.
///
/// Concatenating the literal text of the result reproduces `code` exactly
/// as long as no declaration is modified.
pub fn parse(code: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last_end = 0;

    for caps in DECLARATION.captures_iter(code) {
        let Some(whole) = caps.get(0) else { continue };
        push_literal(&mut spans, &code[last_end..whole.start()]);
        match declaration_from_captures(&caps) {
            Some(decl) => spans.push(Span::Declaration(decl)),
            None => push_literal(&mut spans, whole.as_str()),
        }
        last_end = whole.end();
    }
    push_literal(&mut spans, &code[last_end..]);

    spans
}

/// Read `path` through `fs` and scan it.
pub fn parse_file(fs: &dyn ReadonlyFileSystem, path: &AbsoluteFsPath) -> Result<ParsedFile> {
    let code = fs
        .read_file(path)
        .map_err(|e| ResolveError::io(path.as_str(), e))?;
    Ok(ParsedFile {
        path: path.clone(),
        spans: parse(&code),
    })
}

fn push_literal(spans: &mut Vec<Span>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Span::Literal(prev)) = spans.last_mut() {
        prev.push_str(text);
    } else {
        spans.push(Span::Literal(text.to_string()));
    }
}

fn declaration_from_captures(caps: &Captures) -> Option<Declaration> {
    let kind = DeclarationKind::from_keyword(&caps[1])?;
    let is_type = caps.get(2).is_some();
    let path = caps[5].to_string();

    if &caps[3] == "*" {
        return Some(Declaration::wildcard(kind, is_type, path));
    }

    // Default-style imports (a bare identifier) are passed through untouched.
    let list = caps.get(4)?;
    let names = parse_name_list(list.as_str())?;
    if names.is_empty() {
        return None;
    }

    Some(Declaration {
        kind,
        is_type,
        names: DeclarationNames::Named(names),
        path,
    })
}

/// Parse the inside of `{ ... }`. `None` if any entry is not a plain name.
fn parse_name_list(list: &str) -> Option<NameList> {
    let mut names = NameList::new();
    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let caps = NAME_ENTRY.captures(entry)?;
        names.push(ImportName {
            name: caps[2].to_string(),
            alias: caps.get(3).map(|m| m.as_str().to_string()),
            is_type: caps.get(1).is_some(),
        });
    }
    Some(names)
}
