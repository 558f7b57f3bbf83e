use std::collections::HashMap;
use std::fmt::Display;

use generational_arena::Index;
use itertools::Itertools;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{DocumentArena, ElementData};
use crate::domain::entities::tags::{self, attr};
use crate::domain::entities::{MutantLogRow, NodeEquivalence, PegId};
use crate::domain::error::{DomainError, DomainResult};

/// Accumulates subjects, mutants, the dedup table and node equivalences
/// into one `<subjects>` document.
///
/// The document only grows. Subjects are looked up by method signature through
/// `subjects_by_method`, which stores arena indices rather than references.
///
/// `add_id_table` and `add_equivalences` each append a new section per call;
/// calling either twice yields two sections. Callers invoke them once.
#[derive(Debug)]
pub struct DocumentBuilder {
    tree: DocumentArena,
    root: Index,
    subjects_by_method: HashMap<String, Index>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    pub fn new() -> Self {
        let mut tree = DocumentArena::new();
        let root = tree.insert_node(ElementData::new(tags::SUBJECTS), None);
        Self {
            tree,
            root,
            subjects_by_method: HashMap::new(),
        }
    }

    /// Read access to the assembled document.
    pub fn document(&self) -> &DocumentArena {
        &self.tree
    }

    /// Adds a `<subject>` for an original method and registers it under `method`.
    ///
    /// # Arguments
    /// * `source_file` - Name of the source file containing the method
    /// * `method` - Fully qualified signature, e.g. `Class@method(T1,T2)`
    /// * `peg_id` - PEG id of the original method
    ///
    /// Adding the same `method` twice creates a second subject; later mutants
    /// for that method attach to the most recent one.
    #[instrument(level = "debug", skip(self))]
    pub fn add_subject(&mut self, source_file: &str, method: &str, peg_id: PegId) {
        let subject = self.tree.insert_node(
            ElementData::new(tags::SUBJECT)
                .with_attribute(attr::SOURCE_FILE, source_file)
                .with_attribute(attr::METHOD, method),
            Some(self.root),
        );
        self.tree.insert_node(
            ElementData::new(tags::PID).with_text(peg_id.to_string()),
            Some(subject),
        );

        if self
            .subjects_by_method
            .insert(method.to_string(), subject)
            .is_some()
        {
            debug!("Subject {} added again, mutants now attach to the new one", method);
        }
    }

    /// Adds a subject and attaches every row of its mutants log to it.
    #[instrument(level = "debug", skip(self, log), fields(rows = log.len()))]
    pub fn add_subject_with_log(
        &mut self,
        source_file: &str,
        method: &str,
        peg_id: PegId,
        log: &[MutantLogRow],
    ) -> DomainResult<()> {
        self.add_subject(source_file, method, peg_id);
        for row in log {
            self.add_mutant(method, &row.mutant_id, row.peg_id)?;
        }
        Ok(())
    }

    /// Appends a `<mutant>` to the subject registered under `method`.
    ///
    /// # Errors
    /// [`DomainError::SubjectNotFound`] if no subject was added for `method`.
    /// The document is left unchanged in that case.
    #[instrument(level = "trace", skip(self))]
    pub fn add_mutant(&mut self, method: &str, mutant_id: &str, peg_id: PegId) -> DomainResult<()> {
        let subject = *self.subjects_by_method.get(method).ok_or_else(|| {
            DomainError::SubjectNotFound {
                method: method.to_string(),
            }
        })?;

        // Nodes are never removed, so a registered index always resolves.
        if self.tree.get_node(subject).is_none() {
            return Err(DomainError::Construction(format!(
                "subject node for {} is missing from the document",
                method
            )));
        }

        self.tree.insert_node(
            ElementData::new(tags::MUTANT)
                .with_attribute(attr::MID, mutant_id)
                .with_attribute(attr::PID, peg_id.to_string()),
            Some(subject),
        );
        trace!("Mutant {} attached to {}", mutant_id, method);
        Ok(())
    }

    pub fn has_subject(&self) -> bool {
        self.count_subjects() != 0
    }

    pub fn count_subjects(&self) -> usize {
        self.tree.count_elements(tags::SUBJECT)
    }

    /// Appends the `<id_table>` section.
    ///
    /// Entries are written in ascending id order whatever order `table` yields
    /// them in. Each node is rendered through its `Display` implementation.
    #[instrument(level = "debug", skip_all)]
    pub fn add_id_table<I, N>(&mut self, table: I)
    where
        I: IntoIterator<Item = (PegId, N)>,
        N: Display,
    {
        let section = self
            .tree
            .insert_node(ElementData::new(tags::ID_TABLE), Some(self.root));

        let mut entries = 0usize;
        for (id, node) in table.into_iter().sorted_by_key(|(id, _)| *id) {
            self.tree.insert_node(
                ElementData::new(tags::DEDUP_ENTRY)
                    .with_attribute(attr::ID, id.to_string())
                    .with_attribute(attr::PEG, node.to_string()),
                Some(section),
            );
            entries += 1;
        }
        debug!("Added id table with {} entries", entries);
    }

    /// Appends the `<node_equivalences>` section, keeping caller order.
    ///
    /// Pairs are neither deduplicated nor checked against the id table.
    #[instrument(level = "debug", skip_all)]
    pub fn add_equivalences<I>(&mut self, pairs: I)
    where
        I: IntoIterator,
        I::Item: Into<NodeEquivalence>,
    {
        let section = self
            .tree
            .insert_node(ElementData::new(tags::NODE_EQUIVALENCES), Some(self.root));

        let mut count = 0usize;
        for pair in pairs {
            let NodeEquivalence { first, second } = pair.into();
            let equivalence = self
                .tree
                .insert_node(ElementData::new(tags::NODE_EQUIVALENCE), Some(section));
            self.tree.insert_node(
                ElementData::new(tags::FIRST).with_text(first.to_string()),
                Some(equivalence),
            );
            self.tree.insert_node(
                ElementData::new(tags::SECOND).with_text(second.to_string()),
                Some(equivalence),
            );
            count += 1;
        }
        debug!("Added {} node equivalences", count);
    }
}
