/**
 * Declaration AST
 *
 * The typed span stream produced by the scanner: opaque literal text
 * interleaved with the import/export declarations it recognized.
 */
use crate::file_system::AbsoluteFsPath;
use indexmap::IndexSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Import,
    Export,
}

impl DeclarationKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            DeclarationKind::Import => "import",
            DeclarationKind::Export => "export",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "import" => Some(DeclarationKind::Import),
            "export" => Some(DeclarationKind::Export),
            _ => None,
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One entry of a brace list: `[type ]name[ as alias]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportName {
    pub name: String,
    pub alias: Option<String>,
    pub is_type: bool,
}

impl ImportName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            is_type: false,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_type(mut self) -> Self {
        self.is_type = true;
        self
    }

    /// The name this entry makes visible in the declaring module:
    /// the alias when present, the source name otherwise.
    pub fn binding(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Display for ImportName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_type {
            f.write_str("type ")?;
        }
        f.write_str(&self.name)?;
        if let Some(alias) = &self.alias {
            write!(f, " as {}", alias)?;
        }
        Ok(())
    }
}

/// Insertion-ordered set of names; equality is order-sensitive.
#[derive(Debug, Clone, Default)]
pub struct NameList(IndexSet<ImportName>);

impl NameList {
    pub fn new() -> Self {
        Self(IndexSet::new())
    }

    /// Adds `name` unless an identical entry is already present.
    pub fn push(&mut self, name: ImportName) -> bool {
        self.0.insert(name)
    }

    /// The entry binding `binding` locally, if any.
    pub fn find_binding(&self, binding: &str) -> Option<&ImportName> {
        self.0.iter().find(|n| n.binding() == binding)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImportName> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for NameList {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl Eq for NameList {}

impl FromIterator<ImportName> for NameList {
    fn from_iter<I: IntoIterator<Item = ImportName>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a NameList {
    type Item = &'a ImportName;
    type IntoIter = indexmap::set::Iter<'a, ImportName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationNames {
    /// `* from "..."`: every exported binding. Never split, never followed.
    Wildcard,
    Named(NameList),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub is_type: bool,
    pub names: DeclarationNames,
    pub path: String,
}

impl Declaration {
    pub fn named(
        kind: DeclarationKind,
        is_type: bool,
        names: impl IntoIterator<Item = ImportName>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            is_type,
            names: DeclarationNames::Named(names.into_iter().collect()),
            path: path.into(),
        }
    }

    pub fn wildcard(kind: DeclarationKind, is_type: bool, path: impl Into<String>) -> Self {
        Self {
            kind,
            is_type,
            names: DeclarationNames::Wildcard,
            path: path.into(),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.names, DeclarationNames::Wildcard)
    }

    pub fn is_type_only(&self) -> bool {
        self.is_type
    }

    /// The name list, or `None` for a wildcard declaration.
    pub fn name_list(&self) -> Option<&NameList> {
        match &self.names {
            DeclarationNames::Named(names) => Some(names),
            DeclarationNames::Wildcard => None,
        }
    }

    /// The entry that binds `name` in the declaring module. Wildcards never
    /// bind a name.
    pub fn binding_for(&self, name: &str) -> Option<&ImportName> {
        self.name_list()?.find_binding(name)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.binding_for(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    /// Source text reproduced byte-for-byte.
    Literal(String),
    Declaration(Declaration),
}

impl Span {
    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Span::Declaration(decl) => Some(decl),
            Span::Literal(_) => None,
        }
    }
}

/// A scanned source file.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub path: AbsoluteFsPath,
    pub spans: Vec<Span>,
}

impl ParsedFile {
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.spans.iter().filter_map(Span::as_declaration)
    }
}
