// Gene Ontology OBO parser

use crate::models::{GoRelationship, GoTerm, Namespace, RelationshipType, Synonym, SynonymScope};
use crate::{GoError, Result};
use tracing::{debug, info, warn};

// ============================================================================
// Parse results
// ============================================================================

/// Tag-value pairs that precede the first stanza
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OboHeader {
    pub format_version: Option<String>,
    /// e.g. "releases/2024-01-17"
    pub data_version: Option<String>,
    pub ontology: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug)]
pub struct ParsedObo {
    pub header: OboHeader,
    pub terms: Vec<GoTerm>,
    pub relationships: Vec<GoRelationship>,
}

// ============================================================================
// OBO Parser
// ============================================================================

pub struct OboParser;

enum Section {
    Header,
    Term(TermBuilder),
    /// `[Typedef]`, `[Instance]` and anything else we do not model
    Skipped,
}

impl OboParser {
    /// Parse the text of an OBO 1.2/1.4 file.
    ///
    /// Only `[Term]` stanzas become terms; stanzas missing `id`, `name` or
    /// `namespace` are logged and skipped. `limit` caps the number of terms
    /// and must be non-zero.
    pub fn parse(content: &str, limit: Option<usize>) -> Result<ParsedObo> {
        if limit == Some(0) {
            return Err(GoError::Validation("Parse limit must be greater than zero".to_string()));
        }
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut header = OboHeader::default();
        let mut terms = Vec::new();
        let mut relationships = Vec::new();
        let mut term_stanzas = 0usize;
        let mut section = Section::Header;

        info!(limit = ?limit, "Starting OBO parsing");

        for (line_no, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('!') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                if let Section::Term(builder) = std::mem::replace(&mut section, Section::Skipped) {
                    Self::finish_term(builder, &mut terms, &mut relationships);
                }
                if limit.is_some_and(|max| terms.len() >= max) {
                    info!("Reached parse limit of {} terms", terms.len());
                    break;
                }

                section = if line == "[Term]" {
                    term_stanzas += 1;
                    Section::Term(TermBuilder::new(line_no + 1))
                } else {
                    Section::Skipped
                };
                continue;
            }

            let Some((tag, value)) = line.split_once(':') else {
                debug!(line = line_no + 1, "Ignoring line without a tag");
                continue;
            };
            let tag = tag.trim();
            let value = value.trim();

            match &mut section {
                Section::Header => Self::header_tag(&mut header, tag, value),
                Section::Term(builder) => builder.tag(tag, value),
                Section::Skipped => {},
            }
        }

        if let Section::Term(builder) = section {
            if !limit.is_some_and(|max| terms.len() >= max) {
                Self::finish_term(builder, &mut terms, &mut relationships);
            }
        }

        if term_stanzas == 0 {
            return Err(GoError::Parse("No [Term] stanzas found in OBO content".to_string()));
        }

        info!(
            terms = terms.len(),
            relationships = relationships.len(),
            data_version = ?header.data_version,
            "Parsed OBO content"
        );

        Ok(ParsedObo {
            header,
            terms,
            relationships,
        })
    }

    fn header_tag(header: &mut OboHeader, tag: &str, value: &str) {
        let value = Some(value.to_string());
        match tag {
            "format-version" => header.format_version = value,
            "data-version" => header.data_version = value,
            "ontology" => header.ontology = value,
            "date" => header.date = value,
            _ => {},
        }
    }

    fn finish_term(
        builder: TermBuilder,
        terms: &mut Vec<GoTerm>,
        relationships: &mut Vec<GoRelationship>,
    ) {
        let line = builder.line;
        match builder.build() {
            Ok((term, edges)) => {
                terms.push(term);
                relationships.extend(edges);
            },
            Err(e) => warn!(line, "Skipping term stanza: {}", e),
        }
    }
}

// ============================================================================
// Term stanza accumulation
// ============================================================================

struct TermBuilder {
    /// Line number of the `[Term]` header, for diagnostics
    line: usize,
    id: Option<String>,
    name: Option<String>,
    namespace: Option<String>,
    definition: Option<String>,
    comment: Option<String>,
    is_obsolete: bool,
    synonyms: Vec<Synonym>,
    xrefs: Vec<String>,
    alt_ids: Vec<String>,
    subsets: Vec<String>,
    parents: Vec<(String, RelationshipType)>,
}

impl TermBuilder {
    fn new(line: usize) -> Self {
        TermBuilder {
            line,
            id: None,
            name: None,
            namespace: None,
            definition: None,
            comment: None,
            is_obsolete: false,
            synonyms: Vec::new(),
            xrefs: Vec::new(),
            alt_ids: Vec::new(),
            subsets: Vec::new(),
            parents: Vec::new(),
        }
    }

    fn tag(&mut self, tag: &str, raw_value: &str) {
        // def and synonym carry quoted text that may itself contain '!' or '{'
        match tag {
            "def" => {
                self.definition = Some(extract_quoted_text(raw_value));
                return;
            },
            "synonym" => {
                match parse_synonym(raw_value) {
                    Some(syn) => self.synonyms.push(syn),
                    None => debug!(line = self.line, value = raw_value, "Malformed synonym"),
                }
                return;
            },
            _ => {},
        }

        let value = strip_trailing(raw_value);
        match tag {
            "id" => self.id = Some(value.to_string()),
            "name" => self.name = Some(value.to_string()),
            "namespace" => self.namespace = Some(value.to_string()),
            "comment" => self.comment = Some(value.to_string()),
            "is_obsolete" => self.is_obsolete = value == "true",
            "xref" => self.xrefs.push(value.to_string()),
            "alt_id" => self.alt_ids.push(value.to_string()),
            "subset" => self.subsets.push(value.to_string()),
            "is_a" => {
                if let Some(parent) = value.split_whitespace().next() {
                    self.parents.push((parent.to_string(), RelationshipType::IsA));
                }
            },
            "relationship" => {
                let mut parts = value.split_whitespace();
                let (Some(kind), Some(parent)) = (parts.next(), parts.next()) else {
                    debug!(line = self.line, value, "Malformed relationship");
                    return;
                };
                match kind.parse::<RelationshipType>() {
                    Ok(rel) => self.parents.push((parent.to_string(), rel)),
                    Err(e) => debug!(line = self.line, kind, "Skipping relationship: {}", e),
                }
            },
            _ => {},
        }
    }

    fn build(self) -> Result<(GoTerm, Vec<GoRelationship>)> {
        let id = self.id.ok_or_else(|| GoError::Parse("Missing GO ID".to_string()))?;
        let name = self
            .name
            .ok_or_else(|| GoError::Parse(format!("Missing name for {}", id)))?;
        let namespace: Namespace = self
            .namespace
            .ok_or_else(|| GoError::Parse(format!("Missing namespace for {}", id)))?
            .parse()?;

        let mut term = GoTerm::new(id, name, namespace)?;
        term.definition = self.definition;
        term.comment = self.comment;
        term.is_obsolete = self.is_obsolete;
        term.synonyms = self.synonyms;
        term.xrefs = self.xrefs;
        term.alt_ids = self.alt_ids;
        term.subsets = self.subsets;

        let edges = self
            .parents
            .into_iter()
            .map(|(parent, rel)| GoRelationship::new(term.id.clone(), parent, rel))
            .collect();

        Ok((term, edges))
    }
}

// ============================================================================
// Value helpers
// ============================================================================

/// Drop an unquoted trailing `! comment` and `{qualifier=...}` block.
/// Example: `GO:0008150 {source="x"} ! biological_process` -> `GO:0008150`
fn strip_trailing(value: &str) -> &str {
    let mut in_quotes = false;
    let mut escaped = false;
    let mut brace_start = None;
    let mut end = value.len();

    for (idx, c) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => in_quotes = !in_quotes,
            '{' if !in_quotes && brace_start.is_none() => brace_start = Some(idx),
            '!' if !in_quotes => {
                end = idx;
                break;
            },
            _ => {},
        }
    }

    let mut value = value[..end].trim_end();
    if let Some(start) = brace_start {
        if start < value.len() && value.ends_with('}') {
            value = value[..start].trim_end();
        }
    }
    value
}

/// Return the first quoted string with OBO escapes resolved.
/// Example: `"biological_process" [GO:curators]` -> `biological_process`
fn extract_quoted_text(text: &str) -> String {
    quoted_prefix(text)
        .map(|(quoted, _)| quoted)
        .unwrap_or_else(|| text.to_string())
}

/// Split `"quoted" rest` into the unescaped quoted text and the remainder
fn quoted_prefix(text: &str) -> Option<(String, &str)> {
    let start = text.find('"')?;
    let mut out = String::new();
    let mut chars = text[start + 1..].char_indices();

    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, other)) => out.push(other),
                None => break,
            },
            '"' => return Some((out, &text[start + 1 + idx + 1..])),
            _ => out.push(c),
        }
    }
    None
}

/// Parse a synonym value
/// Example: `"kojic acid synthesis" EXACT systematic_synonym [GOC:TermGenie]`
fn parse_synonym(value: &str) -> Option<Synonym> {
    let (text, rest) = quoted_prefix(value)?;

    let (qualifiers, xref_block) = match rest.find('[') {
        Some(idx) => (&rest[..idx], Some(&rest[idx + 1..])),
        None => (rest, None),
    };

    let mut tokens = qualifiers.split_whitespace();
    let scope = tokens
        .next()
        .and_then(|s| s.parse::<SynonymScope>().ok())
        .unwrap_or_default();
    let synonym_type = tokens.next().map(str::to_string);

    let xrefs = xref_block
        .and_then(|block| block.split(']').next())
        .map(|inner| {
            inner
                .split(',')
                .map(str::trim)
                .filter(|x| !x.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(Synonym {
        text,
        scope,
        synonym_type,
        xrefs,
    })
}

// ============================================================================
// Tests
// ============================================================================
