//! Expands a [`Scope`] into the ordered list of clips a batch will touch.

use std::collections::HashSet;

use crate::host::ProjectModel;
use crate::models::{ClipRef, ContainerRef, ProjectItem, Scope};

/// Resolve `scope` against the host's project model.
///
/// The result is ordered and free of duplicates (first occurrence wins).
/// Containers in a selection and clips with no bound media are skipped.
/// A missing selection, current container or root yields an empty list.
pub fn resolve(scope: Scope, project: &dyn ProjectModel) -> Vec<ClipRef> {
    let mut collector = ClipCollector::new(project);

    match scope {
        Scope::Selected => collector.add_items(project.selection()),
        Scope::CurrentContainer => {
            if let Some(container) = project.current_container() {
                collector.add_items(project.children(&container));
            }
        }
        Scope::CurrentContainerRecursive => {
            if let Some(container) = project.current_container() {
                collector.add_tree(&container);
            }
        }
        Scope::EntireProject => {
            if let Some(root) = project.root_container() {
                collector.add_tree(&root);
            }
        }
    }

    tracing::debug!("Scope {} resolved to {} clips", scope, collector.clips.len());
    collector.clips
}

struct ClipCollector<'a> {
    project: &'a dyn ProjectModel,
    clips: Vec<ClipRef>,
    seen_clips: HashSet<ClipRef>,
    visited_containers: HashSet<ContainerRef>,
}

impl<'a> ClipCollector<'a> {
    fn new(project: &'a dyn ProjectModel) -> Self {
        Self {
            project,
            clips: Vec::new(),
            seen_clips: HashSet::new(),
            visited_containers: HashSet::new(),
        }
    }

    /// Add the media clips among `items`, ignoring containers.
    fn add_items(&mut self, items: Vec<ProjectItem>) {
        for item in items {
            if let ProjectItem::Clip(clip) = item {
                self.add_clip(clip);
            }
        }
    }

    fn add_clip(&mut self, clip: ClipRef) {
        if self.project.bound_path(&clip).is_none() {
            tracing::debug!("Skipping '{}': no media path", self.project.clip_name(&clip));
            return;
        }
        if self.seen_clips.insert(clip.clone()) {
            self.clips.push(clip);
        }
    }

    /// Depth-first walk, sub-containers before the container's own clips.
    /// Each container is entered at most once, so cyclic graphs terminate.
    fn add_tree(&mut self, container: &ContainerRef) {
        if !self.visited_containers.insert(container.clone()) {
            tracing::debug!("Container '{}' already visited", container);
            return;
        }

        let children = self.project.children(container);
        let (containers, clips): (Vec<_>, Vec<_>) = children
            .into_iter()
            .partition(|item| matches!(item, ProjectItem::Container(_)));

        for item in containers {
            if let ProjectItem::Container(child) = item {
                self.add_tree(&child);
            }
        }
        self.add_items(clips);
    }
}
