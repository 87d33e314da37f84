use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Note,
    File,
    Link,
    Task,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Note,
        ResourceKind::File,
        ResourceKind::Link,
        ResourceKind::Task,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Note => "note",
            ResourceKind::File => "file",
            ResourceKind::Link => "link",
            ResourceKind::Task => "task",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ResourceKind::Note => "📄",
            ResourceKind::Link => "🔗",
            ResourceKind::Task => "☑️",
            ResourceKind::File => "📁",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "note" => Ok(ResourceKind::Note),
            "file" => Ok(ResourceKind::File),
            "link" => Ok(ResourceKind::Link),
            "task" => Ok(ResourceKind::Task),
            other => Err(anyhow!(
                "Unknown resource type '{}': expected note|file|link|task",
                other
            )),
        }
    }
}

impl ValueEnum for ResourceKind {
    fn value_variants<'a>() -> &'a [Self] {
        &Self::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// Sidebar filter: everything, or a single resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterTab {
    #[default]
    All,
    Only(ResourceKind),
}

impl FilterTab {
    pub const ALL: [FilterTab; 5] = [
        FilterTab::All,
        FilterTab::Only(ResourceKind::Note),
        FilterTab::Only(ResourceKind::Link),
        FilterTab::Only(ResourceKind::Task),
        FilterTab::Only(ResourceKind::File),
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterTab::All => "All",
            FilterTab::Only(ResourceKind::Note) => "Notes",
            FilterTab::Only(ResourceKind::Link) => "Links",
            FilterTab::Only(ResourceKind::Task) => "Tasks",
            FilterTab::Only(ResourceKind::File) => "Files",
        }
    }

    pub fn admits(&self, kind: ResourceKind) -> bool {
        match self {
            FilterTab::All => true,
            FilterTab::Only(only) => *only == kind,
        }
    }

    pub fn position(&self) -> usize {
        Self::ALL.iter().position(|tab| tab == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = self.position();
        if idx == 0 {
            Self::ALL[Self::ALL.len() - 1]
        } else {
            Self::ALL[idx - 1]
        }
    }
}

impl From<Option<ResourceKind>> for FilterTab {
    fn from(kind: Option<ResourceKind>) -> Self {
        kind.map(FilterTab::Only).unwrap_or(FilterTab::All)
    }
}

/// List-item projection of a vault entry, as returned by `get_all_resources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_metadata: Option<String>,
}

impl Resource {
    /// Task status from `extra_metadata`, if this is a task carrying one.
    pub fn task_status(&self) -> Option<String> {
        if self.kind != ResourceKind::Task {
            return None;
        }
        self.metadata::<TaskMetadata>()
            .and_then(|meta| meta.status)
    }

    /// Link target from `extra_metadata`, if this is a link carrying one.
    pub fn link_url(&self) -> Option<String> {
        if self.kind != ResourceKind::Link {
            return None;
        }
        self.metadata::<LinkMetadata>().and_then(|meta| meta.url)
    }

    fn metadata<T: for<'de> Deserialize<'de>>(&self) -> Option<T> {
        let raw = self.extra_metadata.as_deref()?;
        match serde_json::from_str::<T>(raw) {
            Ok(meta) => Some(meta),
            Err(err) => {
                tracing::warn!(
                    resource_id = self.id.as_str(),
                    kind = self.kind.as_str(),
                    error = %err,
                    "ignoring malformed extra_metadata"
                );
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMetadata {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMetadata {
    #[serde(default)]
    pub url: Option<String>,
}

/// Detail projection of a note while it is open in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteContent {
    pub id: String,
    pub title: String,
    pub content: String,
}

/// Resources whose kind passes `tab`, in their original order.
pub fn visible(resources: &[Resource], tab: FilterTab) -> Vec<&Resource> {
    resources
        .iter()
        .filter(|resource| tab.admits(resource.kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn resource(id: &str, kind: ResourceKind, extra: Option<&str>) -> Resource {
        Resource {
            id: id.into(),
            path: None,
            title: format!("title-{id}"),
            kind,
            extra_metadata: extra.map(str::to_string),
        }
    }

    fn mixed() -> Vec<Resource> {
        vec![
            resource("1", ResourceKind::Task, None),
            resource("2", ResourceKind::Note, None),
            resource("3", ResourceKind::Task, None),
            resource("4", ResourceKind::Link, None),
            resource("5", ResourceKind::File, None),
        ]
    }

    #[test]
    fn all_tab_keeps_everything_in_order() {
        let set = mixed();
        let ids: Vec<&str> = visible(&set, FilterTab::All)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[rstest]
    #[case(ResourceKind::Task, vec!["1", "3"])]
    #[case(ResourceKind::Note, vec!["2"])]
    #[case(ResourceKind::Link, vec!["4"])]
    #[case(ResourceKind::File, vec!["5"])]
    fn kind_tab_keeps_matching_only(#[case] kind: ResourceKind, #[case] expected: Vec<&str>) {
        let set = mixed();
        let ids: Vec<&str> = visible(&set, FilterTab::Only(kind))
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn wire_shape_uses_type_key() {
        let json = r#"{"id":"a","title":"Read","type":"link","extra_metadata":"{\"url\":\"https://x.com\"}"}"#;
        let parsed: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.kind, ResourceKind::Link);
        assert_eq!(parsed.path, None);
        assert_eq!(parsed.link_url().as_deref(), Some("https://x.com"));

        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["type"], "link");
        assert!(value.get("path").is_none());
    }

    #[test]
    fn metadata_accessors_respect_kind_and_degrade() {
        let task = resource("t", ResourceKind::Task, Some(r#"{"status":"todo"}"#));
        assert_eq!(task.task_status().as_deref(), Some("todo"));
        assert_eq!(task.link_url(), None);

        let broken = resource("b", ResourceKind::Link, Some("{not json"));
        assert_eq!(broken.link_url(), None);

        let bare = resource("n", ResourceKind::Task, None);
        assert_eq!(bare.task_status(), None);
    }

    #[test]
    fn filter_tab_cycles_both_ways() {
        assert_eq!(FilterTab::All.next(), FilterTab::Only(ResourceKind::Note));
        assert_eq!(FilterTab::All.prev(), FilterTab::Only(ResourceKind::File));
        assert_eq!(FilterTab::Only(ResourceKind::File).next(), FilterTab::All);
        assert_eq!(FilterTab::from(Some(ResourceKind::Task)).label(), "Tasks");
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("NOTE".parse::<ResourceKind>().unwrap(), ResourceKind::Note);
        assert!("folder".parse::<ResourceKind>().is_err());
    }
}
