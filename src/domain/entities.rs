//! Domain entities: identifiers, collaborator rows and wire names

/// Integer id assigned to a PEG node during graph serialization.
pub type PegId = i32;

/// Element and attribute names of the output document.
///
/// Downstream readers match on these names, so they must not change.
pub mod tags {
    pub const SUBJECTS: &str = "subjects";
    pub const SUBJECT: &str = "subject";
    pub const PID: &str = "pid";
    pub const MUTANT: &str = "mutant";
    pub const ID_TABLE: &str = "id_table";
    pub const DEDUP_ENTRY: &str = "dedup_entry";
    pub const NODE_EQUIVALENCES: &str = "node_equivalences";
    pub const NODE_EQUIVALENCE: &str = "node_equivalence";
    pub const FIRST: &str = "first";
    pub const SECOND: &str = "second";

    pub mod attr {
        pub const SOURCE_FILE: &str = "sourcefile";
        pub const METHOD: &str = "method";
        pub const MID: &str = "mid";
        pub const PID: &str = "pid";
        pub const ID: &str = "id";
        pub const PEG: &str = "peg";
    }
}

/// One row of the mutants log: a mutant id paired with the PEG id of the mutated method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MutantLogRow {
    /// Mutant id as assigned by the mutation generator
    pub mutant_id: String,
    pub peg_id: PegId,
}

impl MutantLogRow {
    pub fn new(mutant_id: impl Into<String>, peg_id: PegId) -> Self {
        Self {
            mutant_id: mutant_id.into(),
            peg_id,
        }
    }
}

/// Two PEG ids asserted to be equivalent, kept in caller order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeEquivalence {
    pub first: PegId,
    pub second: PegId,
}

impl From<(PegId, PegId)> for NodeEquivalence {
    fn from((first, second): (PegId, PegId)) -> Self {
        Self { first, second }
    }
}

/// Expand `~`, `$VAR` and `${VAR}` in a path-like value.
///
/// Falls back to the input unchanged when a variable cannot be resolved.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
