//! Traktor collection (collection.nml) parser

use crate::error::ConvertError;
use crate::model::{CollectionNode, CollectionTree, Playlist, TrackRef};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;

/// Partially built node on the parse stack.
enum Frame {
    Folder {
        name: String,
        children: Vec<CollectionNode>,
    },
    Playlist(Playlist),
}

/// Parse a collection.nml file into its folder/playlist tree.
pub fn parse_collection(path: &Path) -> Result<CollectionTree, ConvertError> {
    let content = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    let tree = parse_collection_str(&content)?;
    log::info!("Parsed collection from {:?}", path);
    Ok(tree)
}

/// Parse collection XML from a string.
///
/// Any XML error makes the whole document unusable; there is no partial
/// result. Entries are collected in document order.
pub fn parse_collection_str(xml: &str) -> Result<CollectionTree, ConvertError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut roots: Vec<CollectionNode> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"NODE" => stack.push(open_node(&e)?),
                b"PRIMARYKEY" => collect_track(&e, &mut stack)?,
                _ => {}
            },

            Ok(Event::Empty(e)) => match e.name().as_ref() {
                // Self-closing nodes are complete as soon as they open
                b"NODE" => {
                    let frame = open_node(&e)?;
                    close_node(frame, &mut stack, &mut roots);
                }
                b"PRIMARYKEY" => collect_track(&e, &mut stack)?,
                _ => {}
            },

            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"NODE" {
                    let frame = stack.pop().ok_or_else(|| {
                        ConvertError::MalformedCollection("unbalanced NODE element".to_string())
                    })?;
                    close_node(frame, &mut stack, &mut roots);
                }
            }

            Ok(Event::Eof) => break,
            Err(e) => return Err(ConvertError::MalformedCollection(e.to_string())),
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ConvertError::MalformedCollection(
            "unclosed NODE element".to_string(),
        ));
    }

    Ok(CollectionTree { roots })
}

/// Start a frame for a `<NODE>` element.
///
/// Playlist nodes become playlist frames; folders and any unknown node
/// types keep their children reachable as folder frames.
fn open_node(e: &BytesStart) -> Result<Frame, ConvertError> {
    let node_type = attr_value(e, b"TYPE")?.unwrap_or_default();
    let name = attr_value(e, b"NAME")?.unwrap_or_else(|| "Unnamed".to_string());

    if node_type == "PLAYLIST" {
        Ok(Frame::Playlist(Playlist::new(name)))
    } else {
        Ok(Frame::Folder {
            name,
            children: Vec::new(),
        })
    }
}

/// Attach a completed node to its parent folder, or to the root set.
fn close_node(frame: Frame, stack: &mut Vec<Frame>, roots: &mut Vec<CollectionNode>) {
    let node = match frame {
        Frame::Folder { name, children } => CollectionNode::Folder { name, children },
        Frame::Playlist(playlist) => {
            if playlist.is_empty() {
                log::debug!("Skipping empty playlist: {}", playlist.name);
                return;
            }
            CollectionNode::Playlist(playlist)
        }
    };

    match stack.last_mut() {
        Some(Frame::Folder { children, .. }) => children.push(node),
        // A playlist node cannot nest further nodes; tolerate it like an
        // unknown element and hoist the child next to it
        Some(Frame::Playlist(_)) | None => roots.push(node),
    }
}

/// Record a `<PRIMARYKEY TYPE="FILE" KEY="..."/>` track reference on the
/// innermost playlist frame.
fn collect_track(e: &BytesStart, stack: &mut [Frame]) -> Result<(), ConvertError> {
    let Some(Frame::Playlist(playlist)) = stack.last_mut() else {
        return Ok(());
    };

    let key_type = attr_value(e, b"TYPE")?.unwrap_or_default();
    if key_type != "FILE" {
        return Ok(());
    }

    if let Some(key) = attr_value(e, b"KEY")? {
        playlist.push_entry(TrackRef::proprietary(key));
    }
    Ok(())
}

fn attr_value(e: &BytesStart, name: &[u8]) -> Result<Option<String>, ConvertError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ConvertError::MalformedCollection(err.to_string()))?;
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|err| ConvertError::MalformedCollection(err.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReservedNames;

    const COLLECTION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<NML VERSION="19"><HEAD COMPANY="www.native-instruments.com" PROGRAM="Traktor"></HEAD>
<COLLECTION ENTRIES="2"></COLLECTION>
<PLAYLISTS>
<NODE TYPE="FOLDER" NAME="$ROOT">
<SUBNODES COUNT="2">
<NODE TYPE="FOLDER" NAME="Techno">
<SUBNODES COUNT="2">
<NODE TYPE="PLAYLIST" NAME="Peak Time">
<PLAYLIST ENTRIES="2" TYPE="LIST" UUID="aaf0af73ce3d4a7a93b21a8878abc622">
<ENTRY><PRIMARYKEY TYPE="FILE" KEY="Macintosh HD/:Users/:dj/:Music/:one.mp3"></PRIMARYKEY></ENTRY>
<ENTRY><PRIMARYKEY TYPE="FILE" KEY="Macintosh HD/:Users/:dj/:Music/:two.flac"></PRIMARYKEY></ENTRY>
</PLAYLIST>
</NODE>
<NODE TYPE="PLAYLIST" NAME="Empty Set">
<PLAYLIST ENTRIES="0" TYPE="LIST" UUID="bbf0af73ce3d4a7a93b21a8878abc622">
</PLAYLIST>
</NODE>
</SUBNODES>
</NODE>
<NODE TYPE="PLAYLIST" NAME="_LOOPS">
<PLAYLIST ENTRIES="1" TYPE="LIST" UUID="ccf0af73ce3d4a7a93b21a8878abc622">
<ENTRY><PRIMARYKEY TYPE="FILE" KEY="Macintosh HD/:Users/:dj/:loop.wav"/></ENTRY>
</PLAYLIST>
</NODE>
</SUBNODES>
</NODE>
</PLAYLISTS>
</NML>"#;

    #[test]
    fn test_parse_builds_tree_in_document_order() {
        let tree = parse_collection_str(COLLECTION).unwrap();
        assert_eq!(tree.roots.len(), 1);

        let CollectionNode::Folder { name, children } = &tree.roots[0] else {
            panic!("expected the $ROOT folder");
        };
        assert_eq!(name, "$ROOT");
        // Empty Set was dropped during parsing; Techno and _LOOPS remain
        assert_eq!(children.len(), 2);
    }

    #[test]
    fn test_parse_collects_entries_in_order() {
        let tree = parse_collection_str(COLLECTION).unwrap();
        let playlists = tree.flatten(&ReservedNames::new(
            vec!["$ROOT".to_string()],
            Vec::new(),
        ));

        let peak = playlists
            .iter()
            .find(|p| p.name == "Peak Time")
            .expect("Peak Time parsed");
        assert_eq!(peak.len(), 2);
        assert_eq!(peak.entries[0].raw(), "Macintosh HD/:Users/:dj/:Music/:one.mp3");
        assert_eq!(peak.entries[1].raw(), "Macintosh HD/:Users/:dj/:Music/:two.flac");
        assert_eq!(peak.folder_path, vec!["Techno"]);
    }

    #[test]
    fn test_parse_handles_self_closing_primarykey() {
        let tree = parse_collection_str(COLLECTION).unwrap();
        let CollectionNode::Folder { children, .. } = &tree.roots[0] else {
            panic!("expected the $ROOT folder");
        };
        // _LOOPS uses the <PRIMARYKEY .../> self-closing form
        let CollectionNode::Playlist(loops) = &children[1] else {
            panic!("expected the _LOOPS playlist");
        };
        assert_eq!(loops.name, "_LOOPS");
        assert_eq!(loops.len(), 1);
    }

    #[test]
    fn test_parse_unescapes_attribute_values() {
        let xml = r#"<NODE TYPE="FOLDER" NAME="R">
<NODE TYPE="PLAYLIST" NAME="Drum &amp; Bass">
<PLAYLIST ENTRIES="1" TYPE="LIST" UUID="x">
<ENTRY><PRIMARYKEY TYPE="FILE" KEY="D/:Drum &amp; Bass/:t.mp3"/></ENTRY>
</PLAYLIST>
</NODE>
</NODE>"#;
        let tree = parse_collection_str(xml).unwrap();
        let CollectionNode::Folder { children, .. } = &tree.roots[0] else {
            panic!("expected folder");
        };
        let CollectionNode::Playlist(playlist) = &children[0] else {
            panic!("expected playlist");
        };
        assert_eq!(playlist.name, "Drum & Bass");
        assert_eq!(playlist.entries[0].raw(), "D/:Drum & Bass/:t.mp3");
    }

    #[test]
    fn test_parse_ignores_non_file_keys() {
        let xml = r#"<NODE TYPE="PLAYLIST" NAME="Mixed">
<PLAYLIST ENTRIES="2" TYPE="LIST" UUID="x">
<ENTRY><PRIMARYKEY TYPE="STEM" KEY="ignored"/></ENTRY>
<ENTRY><PRIMARYKEY TYPE="FILE" KEY="kept.mp3"/></ENTRY>
</PLAYLIST>
</NODE>"#;
        let tree = parse_collection_str(xml).unwrap();
        let CollectionNode::Playlist(playlist) = &tree.roots[0] else {
            panic!("expected playlist");
        };
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.entries[0].raw(), "kept.mp3");
    }

    #[test]
    fn test_malformed_document_is_fatal() {
        let err = parse_collection_str("<NML><NODE TYPE=\"FOLDER\"").unwrap_err();
        assert!(matches!(err, ConvertError::MalformedCollection(_)));
    }

    #[test]
    fn test_mismatched_tags_are_fatal() {
        let err = parse_collection_str("<NML><NODE TYPE=\"FOLDER\" NAME=\"A\"></WRONG></NML>")
            .unwrap_err();
        assert!(matches!(err, ConvertError::MalformedCollection(_)));
    }
}
