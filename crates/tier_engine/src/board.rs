//! Entry store: the tier sequence plus the unassigned pool.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use shared::{
    domain::{ContainerId, Entry, EntryId, Tier, TierId},
    protocol::{BoardLayout, ExportSnapshot, TierExport},
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainmentViolation {
    #[error("entry {entry} is held by both {first} and {second}")]
    DuplicateEntry {
        entry: EntryId,
        first: ContainerId,
        second: ContainerId,
    },
    #[error("tier id {0} is used more than once")]
    DuplicateTier(TierId),
}

/// Durable model. Mutated only through `AssignmentCoordinator`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiers: Vec<Tier>,
    unassigned: Vec<Entry>,
}

impl Board {
    pub fn new(tiers: Vec<Tier>) -> Self {
        Self {
            tiers,
            unassigned: Vec::new(),
        }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn unassigned(&self) -> &[Entry] {
        &self.unassigned
    }

    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    pub fn tier(&self, id: &TierId) -> Option<&Tier> {
        self.tiers.iter().find(|tier| &tier.id == id)
    }

    pub fn tier_position(&self, id: &TierId) -> Option<usize> {
        self.tiers.iter().position(|tier| &tier.id == id)
    }

    pub fn items(&self, container: &ContainerId) -> Option<&[Entry]> {
        match container {
            ContainerId::Unassigned => Some(&self.unassigned),
            ContainerId::Tier(id) => self.tier(id).map(|tier| tier.items.as_slice()),
        }
    }

    pub(crate) fn items_mut(&mut self, container: &ContainerId) -> Option<&mut Vec<Entry>> {
        match container {
            ContainerId::Unassigned => Some(&mut self.unassigned),
            ContainerId::Tier(id) => self
                .tiers
                .iter_mut()
                .find(|tier| &tier.id == id)
                .map(|tier| &mut tier.items),
        }
    }

    pub(crate) fn tiers_mut(&mut self) -> &mut Vec<Tier> {
        &mut self.tiers
    }

    pub(crate) fn unassigned_mut(&mut self) -> &mut Vec<Entry> {
        &mut self.unassigned
    }

    /// Container currently holding `entry_id`.
    pub fn locate(&self, entry_id: &EntryId) -> Option<ContainerId> {
        if self.unassigned.iter().any(|entry| &entry.id == entry_id) {
            return Some(ContainerId::Unassigned);
        }
        self.tiers
            .iter()
            .find(|tier| tier.items.iter().any(|entry| &entry.id == entry_id))
            .map(|tier| ContainerId::Tier(tier.id.clone()))
    }

    pub fn entry(&self, entry_id: &EntryId) -> Option<&Entry> {
        self.unassigned
            .iter()
            .chain(self.tiers.iter().flat_map(|tier| tier.items.iter()))
            .find(|entry| &entry.id == entry_id)
    }

    pub fn contains_entry(&self, entry_id: &EntryId) -> bool {
        self.entry(entry_id).is_some()
    }

    pub fn entry_count(&self) -> usize {
        self.unassigned.len() + self.tiers.iter().map(|tier| tier.items.len()).sum::<usize>()
    }

    /// Containers in display order: every tier, then the pool.
    pub fn containers(&self) -> impl Iterator<Item = (ContainerId, &[Entry])> {
        self.tiers
            .iter()
            .map(|tier| (ContainerId::Tier(tier.id.clone()), tier.items.as_slice()))
            .chain(std::iter::once((
                ContainerId::Unassigned,
                self.unassigned.as_slice(),
            )))
    }

    pub fn export(&self) -> ExportSnapshot {
        ExportSnapshot {
            tiers: self
                .tiers
                .iter()
                .map(|tier| TierExport {
                    id: tier.id.clone(),
                    name: tier.name.clone(),
                    color: tier.color.clone(),
                    items: tier.items.iter().map(|entry| entry.id.clone()).collect(),
                })
                .collect(),
        }
    }

    /// The export structure plus the pool's ids, enough to restore membership
    /// regardless of what the entries' ratings say.
    pub fn layout(&self) -> BoardLayout {
        BoardLayout {
            snapshot: self.export(),
            unassigned: self.unassigned.iter().map(|entry| entry.id.clone()).collect(),
        }
    }

    /// Verifies that every entry id lives in exactly one container and that
    /// tier ids are unique.
    pub fn check_containment(&self) -> Result<(), ContainmentViolation> {
        let mut tier_ids = HashSet::new();
        for tier in &self.tiers {
            if !tier_ids.insert(&tier.id) {
                return Err(ContainmentViolation::DuplicateTier(tier.id.clone()));
            }
        }

        let mut owners: HashMap<&EntryId, ContainerId> = HashMap::new();
        for (container, items) in self.containers() {
            for entry in items {
                if let Some(first) = owners.get(&entry.id) {
                    return Err(ContainmentViolation::DuplicateEntry {
                        entry: entry.id.clone(),
                        first: first.clone(),
                        second: container,
                    });
                }
                owners.insert(&entry.id, container.clone());
            }
        }
        Ok(())
    }
}
