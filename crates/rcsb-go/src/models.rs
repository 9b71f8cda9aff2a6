// Gene Ontology data models

use crate::{GoError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// GO Term
// ============================================================================

/// A single `[Term]` stanza from a GO OBO release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoTerm {
    /// GO identifier (e.g., "GO:0008150")
    pub id: String,

    /// Numeric accession (e.g., 8150)
    pub accession: u32,

    /// Term name (e.g., "biological_process")
    pub name: String,

    pub namespace: Namespace,

    /// Quoted text of the `def:` tag, without its dbxref list
    pub definition: Option<String>,

    pub is_obsolete: bool,

    pub synonyms: Vec<Synonym>,

    /// Cross-references to other databases
    pub xrefs: Vec<String>,

    /// Secondary identifiers merged into this term
    pub alt_ids: Vec<String>,

    pub comment: Option<String>,

    /// Subset memberships (e.g., "goslim_generic")
    pub subsets: Vec<String>,
}

impl GoTerm {
    /// Parse GO ID into accession number
    /// Example: "GO:0008150" -> 8150
    pub fn parse_accession(go_id: &str) -> Result<u32> {
        let digits = go_id
            .strip_prefix("GO:")
            .ok_or_else(|| GoError::Validation(format!("Invalid GO ID format: {}", go_id)))?;
        Ok(digits.parse::<u32>()?)
    }

    /// `GO:` followed by exactly seven digits
    pub fn validate_go_id(go_id: &str) -> bool {
        go_id.len() == 10
            && go_id.starts_with("GO:")
            && go_id[3..].bytes().all(|b| b.is_ascii_digit())
    }

    pub fn new(id: impl Into<String>, name: impl Into<String>, namespace: Namespace) -> Result<Self> {
        let id = id.into();
        if !Self::validate_go_id(&id) {
            return Err(GoError::Validation(format!("Invalid GO ID: {}", id)));
        }
        let accession = Self::parse_accession(&id)?;

        Ok(GoTerm {
            id,
            accession,
            name: name.into(),
            namespace,
            definition: None,
            is_obsolete: false,
            synonyms: Vec::new(),
            xrefs: Vec::new(),
            alt_ids: Vec::new(),
            comment: None,
            subsets: Vec::new(),
        })
    }
}

// ============================================================================
// GO Namespace
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    BiologicalProcess,
    MolecularFunction,
    CellularComponent,
}

impl Namespace {
    pub const ALL: [Namespace; 3] = [
        Namespace::BiologicalProcess,
        Namespace::MolecularFunction,
        Namespace::CellularComponent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::BiologicalProcess => "biological_process",
            Namespace::MolecularFunction => "molecular_function",
            Namespace::CellularComponent => "cellular_component",
        }
    }

    /// Two-letter code used in GO annotation files
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Namespace::BiologicalProcess => "BP",
            Namespace::MolecularFunction => "MF",
            Namespace::CellularComponent => "CC",
        }
    }
}

impl FromStr for Namespace {
    type Err = GoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "biological_process" => Ok(Namespace::BiologicalProcess),
            "molecular_function" => Ok(Namespace::MolecularFunction),
            "cellular_component" => Ok(Namespace::CellularComponent),
            _ => Err(GoError::Parse(format!("Unknown namespace: {}", s))),
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Synonym
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Synonym {
    pub text: String,

    pub scope: SynonymScope,

    /// Synonym type (optional, e.g., "systematic_synonym")
    pub synonym_type: Option<String>,

    pub xrefs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SynonymScope {
    #[default]
    Exact,
    Broad,
    Narrow,
    Related,
}

impl FromStr for SynonymScope {
    type Err = GoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "EXACT" => Ok(SynonymScope::Exact),
            "BROAD" => Ok(SynonymScope::Broad),
            "NARROW" => Ok(SynonymScope::Narrow),
            "RELATED" => Ok(SynonymScope::Related),
            _ => Err(GoError::Parse(format!("Unknown synonym scope: {}", s))),
        }
    }
}

impl std::fmt::Display for SynonymScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SynonymScope::Exact => "EXACT",
            SynonymScope::Broad => "BROAD",
            SynonymScope::Narrow => "NARROW",
            SynonymScope::Related => "RELATED",
        };
        f.write_str(s)
    }
}

// ============================================================================
// GO Relationship
// ============================================================================

/// One DAG edge: `child` is_a / part_of / ... `parent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoRelationship {
    pub child: String,
    pub parent: String,
    pub relationship: RelationshipType,
}

impl GoRelationship {
    pub fn new(
        child: impl Into<String>,
        parent: impl Into<String>,
        relationship: RelationshipType,
    ) -> Self {
        GoRelationship {
            child: child.into(),
            parent: parent.into(),
            relationship,
        }
    }
}

/// Edge label. Types outside the go-basic set, such as `starts_during` in
/// the full go.obo, are kept as [`RelationshipType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RelationshipType {
    IsA,
    PartOf,
    Regulates,
    PositivelyRegulates,
    NegativelyRegulates,
    HasPart,
    OccursIn,
    EndsDuring,
    HappensDuring,
    Other(String),
}

impl RelationshipType {
    pub fn as_str(&self) -> &str {
        match self {
            RelationshipType::IsA => "is_a",
            RelationshipType::PartOf => "part_of",
            RelationshipType::Regulates => "regulates",
            RelationshipType::PositivelyRegulates => "positively_regulates",
            RelationshipType::NegativelyRegulates => "negatively_regulates",
            RelationshipType::HasPart => "has_part",
            RelationshipType::OccursIn => "occurs_in",
            RelationshipType::EndsDuring => "ends_during",
            RelationshipType::HappensDuring => "happens_during",
            RelationshipType::Other(name) => name,
        }
    }
}

impl FromStr for RelationshipType {
    type Err = GoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "is_a" => Ok(RelationshipType::IsA),
            "part_of" => Ok(RelationshipType::PartOf),
            "regulates" => Ok(RelationshipType::Regulates),
            "positively_regulates" => Ok(RelationshipType::PositivelyRegulates),
            "negatively_regulates" => Ok(RelationshipType::NegativelyRegulates),
            "has_part" => Ok(RelationshipType::HasPart),
            "occurs_in" => Ok(RelationshipType::OccursIn),
            "ends_during" => Ok(RelationshipType::EndsDuring),
            "happens_during" => Ok(RelationshipType::HappensDuring),
            "" => Err(GoError::Parse("Empty relationship type".to_string())),
            other if other.contains(char::is_whitespace) => {
                Err(GoError::Parse(format!("Invalid relationship type: {}", other)))
            },
            other => Ok(RelationshipType::Other(other.to_string())),
        }
    }
}

impl From<String> for RelationshipType {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(RelationshipType::Other(s))
    }
}

impl From<RelationshipType> for String {
    fn from(rel: RelationshipType) -> Self {
        rel.as_str().to_string()
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_go_accession() {
        assert_eq!(GoTerm::parse_accession("GO:0008150").unwrap(), 8150);
        assert_eq!(GoTerm::parse_accession("GO:0000001").unwrap(), 1);
        assert_eq!(GoTerm::parse_accession("GO:2001317").unwrap(), 2001317);
        assert!(GoTerm::parse_accession("INVALID").is_err());
        assert!(GoTerm::parse_accession("GO:abc").is_err());
    }

    #[test]
    fn test_validate_go_id() {
        assert!(GoTerm::validate_go_id("GO:0008150"));
        assert!(!GoTerm::validate_go_id("GO:123"));
        assert!(!GoTerm::validate_go_id("GO:12345678"));
        assert!(!GoTerm::validate_go_id("go:0008150"));
        assert!(!GoTerm::validate_go_id("GO:00081a0"));
        assert!(!GoTerm::validate_go_id(""));
    }

    #[test]
    fn test_go_term_new() {
        let term = GoTerm::new("GO:0008150", "biological_process", Namespace::BiologicalProcess)
            .unwrap();
        assert_eq!(term.accession, 8150);
        assert!(!term.is_obsolete);
        assert!(term.synonyms.is_empty());

        assert!(GoTerm::new("BFO:0000050", "part of", Namespace::BiologicalProcess).is_err());
    }

    #[test]
    fn test_namespace_from_str() {
        for ns in Namespace::ALL {
            assert_eq!(ns.as_str().parse::<Namespace>().unwrap(), ns);
        }
        assert_eq!(Namespace::CellularComponent.abbreviation(), "CC");
        assert!("external".parse::<Namespace>().is_err());
    }

    #[test]
    fn test_relationship_type_from_str() {
        assert_eq!("is_a".parse::<RelationshipType>().unwrap(), RelationshipType::IsA);
        assert_eq!(
            "negatively_regulates".parse::<RelationshipType>().unwrap(),
            RelationshipType::NegativelyRegulates
        );
        assert_eq!(RelationshipType::PartOf.to_string(), "part_of");
        assert_eq!(
            "starts_during".parse::<RelationshipType>().unwrap(),
            RelationshipType::Other("starts_during".to_string())
        );
        assert!("".parse::<RelationshipType>().is_err());
        assert!("part of".parse::<RelationshipType>().is_err());
    }

    #[test]
    fn test_synonym_scope_from_str() {
        assert_eq!("exact".parse::<SynonymScope>().unwrap(), SynonymScope::Exact);
        assert_eq!("NARROW".parse::<SynonymScope>().unwrap(), SynonymScope::Narrow);
        assert!("WIDE".parse::<SynonymScope>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&RelationshipType::PositivelyRegulates).unwrap();
        assert_eq!(json, "\"positively_regulates\"");
        let json = serde_json::to_string(&RelationshipType::Other("starts_during".to_string())).unwrap();
        assert_eq!(json, "\"starts_during\"");
        let rel: RelationshipType = serde_json::from_str("\"part_of\"").unwrap();
        assert_eq!(rel, RelationshipType::PartOf);
        let json = serde_json::to_string(&Namespace::MolecularFunction).unwrap();
        assert_eq!(json, "\"molecular_function\"");
    }

    proptest! {
        #[test]
        fn prop_seven_digit_ids_round_trip(n in 0u32..10_000_000) {
            let id = format!("GO:{:07}", n);
            prop_assert!(GoTerm::validate_go_id(&id));
            prop_assert_eq!(GoTerm::parse_accession(&id).unwrap(), n);
        }

        #[test]
        fn prop_rejects_wrong_length(n in 10_000_000u32..u32::MAX) {
            let id = format!("GO:{}", n);
            prop_assert!(!GoTerm::validate_go_id(&id));
        }
    }
}
