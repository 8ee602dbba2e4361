use super::{Playlist, ReservedNames};
use serde::{Deserialize, Serialize};

/// One node of the collection's folder tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionNode {
    /// A folder holding further folders and playlists, in document order
    Folder {
        name: String,
        children: Vec<CollectionNode>,
    },

    /// A leaf playlist
    Playlist(Playlist),
}

/// The parsed folder/playlist tree of a collection document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionTree {
    pub roots: Vec<CollectionNode>,
}

impl CollectionTree {
    /// Flatten the tree into playlists in document order.
    ///
    /// The top-level reserved node is the collection's implicit container:
    /// traversal starts below it, its name never appears in any folder
    /// path, and playlists sitting directly inside it are dropped. Any
    /// reserved-marker folder met during traversal is pruned together with
    /// its entire subtree. Empty playlists are dropped.
    ///
    /// Traversal uses an explicit stack; pathological nesting depth cannot
    /// overflow the call stack.
    pub fn flatten(&self, reserved: &ReservedNames) -> Vec<Playlist> {
        let mut stack: Vec<(&CollectionNode, Vec<String>)> = Vec::new();

        for root in self.roots.iter().rev() {
            match root {
                CollectionNode::Folder { name, children } if reserved.is_root_folder(name) => {
                    // Implicit container: enter its subfolders only
                    for child in children.iter().rev() {
                        if matches!(child, CollectionNode::Folder { .. }) {
                            stack.push((child, Vec::new()));
                        }
                    }
                }
                other => stack.push((other, Vec::new())),
            }
        }

        let mut playlists = Vec::new();
        while let Some((node, folder_path)) = stack.pop() {
            match node {
                CollectionNode::Folder { name, children } => {
                    if reserved.is_root_folder(name) {
                        // Pruned subtree: children are not rescued
                        continue;
                    }
                    let mut child_path = folder_path.clone();
                    child_path.push(name.clone());
                    for child in children.iter().rev() {
                        stack.push((child, child_path.clone()));
                    }
                }
                CollectionNode::Playlist(playlist) => {
                    if playlist.is_empty() {
                        continue;
                    }
                    let mut playlist = playlist.clone();
                    playlist.folder_path = folder_path;
                    playlists.push(playlist);
                }
            }
        }

        playlists
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrackRef;

    fn playlist(name: &str, tracks: &[&str]) -> CollectionNode {
        let mut p = Playlist::new(name);
        for track in tracks {
            p.push_entry(TrackRef::proprietary(*track));
        }
        CollectionNode::Playlist(p)
    }

    fn folder(name: &str, children: Vec<CollectionNode>) -> CollectionNode {
        CollectionNode::Folder {
            name: name.to_string(),
            children,
        }
    }

    fn root_tree(children: Vec<CollectionNode>) -> CollectionTree {
        CollectionTree {
            roots: vec![folder("$ROOT", children)],
        }
    }

    #[test]
    fn test_flatten_keeps_document_order() {
        let tree = root_tree(vec![
            folder(
                "Techno",
                vec![playlist("Peak", &["a"]), playlist("Closing", &["b"])],
            ),
            folder("House", vec![playlist("Warmup", &["c"])]),
        ]);

        let names: Vec<String> = tree
            .flatten(&ReservedNames::traktor())
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Peak", "Closing", "Warmup"]);
    }

    #[test]
    fn test_flatten_records_folder_path() {
        let tree = root_tree(vec![folder(
            "Archive",
            vec![folder("2024", vec![playlist("Favorites", &["a"])])],
        )]);

        let playlists = tree.flatten(&ReservedNames::traktor());
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].folder_path, vec!["Archive", "2024"]);
    }

    #[test]
    fn test_nested_reserved_folder_is_pruned_with_children() {
        let tree = root_tree(vec![
            folder(
                "$ROOT shadow",
                vec![folder("Legit", vec![playlist("Hidden", &["a"])])],
            ),
            folder("Visible", vec![playlist("Kept", &["b"])]),
        ]);

        let names: Vec<String> = tree
            .flatten(&ReservedNames::traktor())
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Kept"]);
    }

    #[test]
    fn test_playlists_directly_under_root_are_dropped() {
        let tree = root_tree(vec![
            playlist("Loose", &["a"]),
            folder("Kept", vec![playlist("Inner", &["b"])]),
        ]);

        let names: Vec<String> = tree
            .flatten(&ReservedNames::traktor())
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Inner"]);
    }

    #[test]
    fn test_empty_playlists_are_dropped() {
        let tree = root_tree(vec![folder(
            "Sets",
            vec![playlist("Empty", &[]), playlist("Full", &["a"])],
        )]);

        let playlists = tree.flatten(&ReservedNames::traktor());
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].name, "Full");
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        // 2k nested folders would overflow a recursive traversal
        let mut node = playlist("Deep", &["a"]);
        for i in 0..2_000 {
            node = folder(&format!("level{}", i), vec![node]);
        }
        let tree = root_tree(vec![node]);

        let playlists = tree.flatten(&ReservedNames::traktor());
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].folder_path.len(), 2_000);
    }
}
