//! Semantic model types for the GEDCOM reader.
//!
//! Everything here is built once during extraction and read-only afterwards;
//! the reporting side consumes it through lookups and enumeration.

use serde::Serialize;
use std::collections::BTreeMap;

/// How a name variant relates to the person carrying it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameKind {
    /// Name the person was known by.
    AsKnown,
    /// Name given at birth.
    #[default]
    Birth,
    /// Name taken on immigration.
    Immigrant,
    /// Maiden name.
    Maiden,
    /// Name taken on marriage.
    Married,
}

impl NameKind {
    /// Parse a GEDCOM `TYPE` value. Unrecognized values yield `None`, which
    /// leaves the default kind in place.
    #[must_use]
    pub fn from_type_value(value: &str) -> Option<Self> {
        match value {
            "aka" => Some(Self::AsKnown),
            "birth" => Some(Self::Birth),
            "immigrant" => Some(Self::Immigrant),
            "maiden" => Some(Self::Maiden),
            "married" => Some(Self::Married),
            _ => None,
        }
    }

    /// Short label for report output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AsKnown => "also known as",
            Self::Birth => "birth",
            Self::Immigrant => "immigrant",
            Self::Maiden => "maiden",
            Self::Married => "married",
        }
    }
}

/// One name variant of a person.
///
/// The base string keeps the GEDCOM form with the surname between slashes
/// (`John /Smith/`); the optional parts come from the name's sub-lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Name {
    /// Full name as written, surname between slashes.
    pub base: String,
    /// How this variant relates to the person.
    pub kind: NameKind,
    /// Given name (`GIVN`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,
    /// Surname (`SURN`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    /// Name prefix (`NPFX`, e.g. "Dr.").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Nickname (`NICK`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Surname prefix (`SPFX`, e.g. "van der").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname_prefix: Option<String>,
    /// Name suffix (`NSFX`, e.g. "Jr.").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl Name {
    /// Create a name variant from its base string.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            ..Self::default()
        }
    }

    /// The base name with the slash markers removed.
    ///
    /// # Examples
    /// ```
    /// use stamboom_gedcom::Name;
    ///
    /// assert_eq!(Name::new("John /Smith/").display(), "John Smith");
    /// assert_eq!(Name::new("John /Smith/ Jr").display(), "John Smith Jr");
    /// ```
    #[must_use]
    pub fn display(&self) -> String {
        self.base
            .split('/')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A dated, placed occurrence (birth, death, marriage, ...).
///
/// Both fields absent means the event was recorded without detail; the
/// model does not distinguish that from an empty event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Date string, verbatim from the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Place string, verbatim from the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

impl Event {
    /// Whether neither date nor place is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.place.is_none()
    }
}

/// A date/time pair, as written in the export (change records, the header's
/// export stamp).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timestamp {
    /// Date string, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Time string, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Relation of a child to each parent within one family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pedigree {
    /// Relation to the father (e.g. "Natural", "Adopted").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_relation: Option<String>,
    /// Relation to the mother.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_relation: Option<String>,
}

/// One person record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Person {
    /// Numeric id from the record's pointer.
    pub id: u32,
    /// Name variants in input order; the first is the preferred name.
    pub names: Vec<Name>,
    /// Sex marker, verbatim (`M`, `F`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    /// Nobility title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Last-changed stamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<Timestamp>,
    /// Birth event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<Event>,
    /// Death event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death: Option<Event>,
    /// Burial event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burial: Option<Event>,
    /// Emigration event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emigration: Option<Event>,
    /// Keys of notes this person references, in encounter order.
    pub notes: Vec<String>,
    /// Families in which this person is a child. A person can be a child in
    /// more than one family (biological plus step family).
    pub child_of: Vec<u32>,
    /// Families in which this person is a spouse or parent.
    pub spouse_of: Vec<u32>,
    /// Parent relations per family, recorded on this person's record but
    /// owned by the family-child relationship. Drained by the pedigree
    /// relocation pass.
    #[serde(skip)]
    pub pedigrees: BTreeMap<u32, Pedigree>,
}

impl Person {
    /// The preferred name variant (first listed), if any.
    #[must_use]
    pub fn preferred_name(&self) -> Option<&Name> {
        self.names.first()
    }
}

/// A child entry within a family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Child {
    /// Person id of the child.
    pub id: u32,
    /// Relation to the father, filled by the pedigree relocation pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_relation: Option<String>,
    /// Relation to the mother, filled by the pedigree relocation pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_relation: Option<String>,
}

/// One family record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Family {
    /// Numeric id from the record's pointer.
    pub id: u32,
    /// Last-changed stamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<Timestamp>,
    /// Person id of the husband.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub husband: Option<u32>,
    /// Person id of the wife.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wife: Option<u32>,
    /// Children in input order.
    pub children: Vec<Child>,
    /// Marriage event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marriage: Option<Event>,
    /// Status at formation (e.g. "Partners"), distinct from the marriage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_status: Option<String>,
    /// What ended the family unit (e.g. "Divorce").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_status: Option<String>,
    /// When/where the family unit ended, distinct from the marriage event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_event: Option<Event>,
}

/// One note record: paragraphs of free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Full pointer key (`N1`, `NI4`); the two note kinds share numbers but
    /// not keys.
    pub key: String,
    /// Paragraphs, assembled from continuation/concatenation lines.
    pub paragraphs: Vec<String>,
    /// Id of the first person claiming this note, resolved by elimination.
    /// `None` means the document owns it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<u32>,
}

/// Document-level metadata from the header record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    /// When the file was exported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported: Option<Timestamp>,
    /// Name of the producing software.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software_name: Option<String>,
    /// Version of the producing software.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software_version: Option<String>,
    /// GEDCOM format version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gedcom_version: Option<String>,
    /// Embedded file name, when the export carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Keys of notes owned by the document rather than any person, in
    /// original encounter order. Computed by elimination.
    pub notes: Vec<String>,
}

/// The fully extracted semantic model of one GEDCOM file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GedcomFile {
    /// Document header.
    pub header: Header,
    /// Persons by id.
    pub people: BTreeMap<u32, Person>,
    /// Families by id.
    pub families: BTreeMap<u32, Family>,
    /// Notes by full pointer key.
    pub notes: BTreeMap<String, Note>,
    /// Keys of all top-level notes in encounter order, before any
    /// ownership partitioning.
    #[serde(skip)]
    pub note_order: Vec<String>,
    /// Tokens never consumed by any handler. Zero means the input was fully
    /// understood; anything else points at unmodeled constructs.
    pub unused_lines: usize,
}

impl GedcomFile {
    /// Look up a person by id.
    #[must_use]
    pub fn person(&self, id: u32) -> Option<&Person> {
        self.people.get(&id)
    }

    /// Look up a family by id.
    #[must_use]
    pub fn family(&self, id: u32) -> Option<&Family> {
        self.families.get(&id)
    }

    /// Look up a note by full pointer key.
    #[must_use]
    pub fn note(&self, key: &str) -> Option<&Note> {
        self.notes.get(key)
    }

    /// Number of persons in the model.
    #[must_use]
    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    /// Number of families in the model.
    #[must_use]
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Number of notes in the model.
    #[must_use]
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }
}
