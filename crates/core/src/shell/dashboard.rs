//! Projections rendered on the dashboard while no note is open.

use crate::model::{Resource, ResourceKind};

pub const DASHBOARD_LIMIT: usize = 5;
pub const EMPTY_VAULT: &str = "Empty Vault. Create something!";
pub const SELECT_PROMPT: &str = "Select an item to view.";
pub const MISSING_HREF: &str = "#";

pub fn welcome_message(resources: &[Resource]) -> &'static str {
    if resources.is_empty() {
        EMPTY_VAULT
    } else {
        SELECT_PROMPT
    }
}

/// First tasks of the set, in reload order.
pub fn recent_tasks(resources: &[Resource]) -> Vec<&Resource> {
    resources
        .iter()
        .filter(|r| r.kind == ResourceKind::Task)
        .take(DASHBOARD_LIMIT)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickLink<'a> {
    pub title: &'a str,
    pub href: String,
}

pub fn quick_links(resources: &[Resource]) -> Vec<QuickLink<'_>> {
    resources
        .iter()
        .filter(|r| r.kind == ResourceKind::Link)
        .take(DASHBOARD_LIMIT)
        .map(|r| QuickLink {
            title: &r.title,
            href: r.link_url().unwrap_or_else(|| MISSING_HREF.to_string()),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindCounts {
    pub notes: usize,
    pub files: usize,
    pub links: usize,
    pub tasks: usize,
}

impl KindCounts {
    pub fn tally(resources: &[Resource]) -> Self {
        resources.iter().fold(Self::default(), |mut counts, r| {
            match r.kind {
                ResourceKind::Note => counts.notes += 1,
                ResourceKind::File => counts.files += 1,
                ResourceKind::Link => counts.links += 1,
                ResourceKind::Task => counts.tasks += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.notes + self.files + self.links + self.tasks
    }
}
