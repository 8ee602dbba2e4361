//! Traktor collection (collection.nml) playlist insertion
//!
//! The document is streamed event-by-event into a new buffer; the fragment
//! for the new playlist is injected just before the closing tag of the
//! first SUBNODES container in document order, making it the container's
//! last child. Duplicate playlist names are tolerated, the format allows
//! them.

use crate::error::ConvertError;
use crate::model::Playlist;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Insert a playlist into a collection file, rewriting it in place.
pub fn append_to_collection(path: &Path, playlist: &Playlist) -> Result<(), ConvertError> {
    let content = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    let uuid = Uuid::new_v4().simple().to_string();
    let updated = insert_playlist(&content, playlist, &uuid)?;
    fs::write(path, updated).map_err(|e| ConvertError::io(path, e))?;
    log::info!(
        "Inserted playlist '{}' ({} tracks) into {:?}",
        playlist.name,
        playlist.len(),
        path
    );
    Ok(())
}

/// Insert a playlist fragment into collection XML, returning the rewritten
/// document. The input is never modified; without a SUBNODES container the
/// operation fails with [`ConvertError::MissingContainer`].
pub fn insert_playlist(
    xml: &str,
    playlist: &Playlist,
    uuid: &str,
) -> Result<String, ConvertError> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());

    let mut depth = 0usize;
    let mut container_depth: Option<usize> = None;
    let mut inserted = false;

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,

            Ok(Event::Start(e)) => {
                depth += 1;
                if container_depth.is_none() && e.name().as_ref() == b"SUBNODES" {
                    container_depth = Some(depth);
                }
                write_event(&mut writer, Event::Start(e))?;
            }

            // A self-closing container has to be reopened to take children
            Ok(Event::Empty(e))
                if !inserted
                    && container_depth.is_none()
                    && e.name().as_ref() == b"SUBNODES" =>
            {
                write_event(&mut writer, Event::Start(e))?;
                write_fragment(&mut writer, playlist, uuid)?;
                write_event(&mut writer, Event::End(BytesEnd::new("SUBNODES")))?;
                inserted = true;
            }

            Ok(Event::End(e)) => {
                if !inserted
                    && container_depth == Some(depth)
                    && e.name().as_ref() == b"SUBNODES"
                {
                    write_fragment(&mut writer, playlist, uuid)?;
                    inserted = true;
                }
                depth = depth.saturating_sub(1);
                write_event(&mut writer, Event::End(e))?;
            }

            Ok(event) => write_event(&mut writer, event)?,
            Err(e) => return Err(ConvertError::MalformedCollection(e.to_string())),
        }
    }

    if !inserted {
        return Err(ConvertError::MissingContainer);
    }

    String::from_utf8(writer.into_inner())
        .map_err(|e| ConvertError::MalformedCollection(e.to_string()))
}

/// Write the `<NODE TYPE="PLAYLIST">` fragment for one playlist.
///
/// Entry keys are written in the proprietary encoding; native references
/// are converted on the way out, decoding never happens here.
fn write_fragment(
    writer: &mut Writer<Vec<u8>>,
    playlist: &Playlist,
    uuid: &str,
) -> Result<(), ConvertError> {
    let mut node = BytesStart::new("NODE");
    node.push_attribute(("TYPE", "PLAYLIST"));
    node.push_attribute(("NAME", playlist.name.as_str()));
    write_event(writer, Event::Start(node))?;

    let entries = playlist.len().to_string();
    let mut list = BytesStart::new("PLAYLIST");
    list.push_attribute(("ENTRIES", entries.as_str()));
    list.push_attribute(("TYPE", "LIST"));
    list.push_attribute(("UUID", uuid));
    write_event(writer, Event::Start(list))?;

    for entry in &playlist.entries {
        let key = entry.clone().into_proprietary();
        write_event(writer, Event::Start(BytesStart::new("ENTRY")))?;
        let mut primary = BytesStart::new("PRIMARYKEY");
        primary.push_attribute(("TYPE", "FILE"));
        primary.push_attribute(("KEY", key.raw()));
        write_event(writer, Event::Empty(primary))?;
        write_event(writer, Event::End(BytesEnd::new("ENTRY")))?;
    }

    write_event(writer, Event::End(BytesEnd::new("PLAYLIST")))?;
    write_event(writer, Event::End(BytesEnd::new("NODE")))?;
    Ok(())
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event) -> Result<(), ConvertError> {
    writer
        .write_event(event)
        .map_err(|e| ConvertError::MalformedCollection(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CollectionNode, TrackRef};
    use crate::traktor::reader::parse_collection_str;

    const TARGET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<NML VERSION="19"><PLAYLISTS>
<NODE TYPE="FOLDER" NAME="$ROOT">
<SUBNODES COUNT="1">
<NODE TYPE="FOLDER" NAME="Sets">
<SUBNODES COUNT="0"></SUBNODES>
</NODE>
</SUBNODES>
</NODE>
</PLAYLISTS></NML>"#;

    fn sample_playlist() -> Playlist {
        let mut playlist = Playlist::new("Saturday Set");
        playlist.push_entry(TrackRef::native("/mnt/music/a.mp3"));
        playlist.push_entry(TrackRef::proprietary("D/:music/:b.mp3"));
        playlist
    }

    #[test]
    fn test_insert_appends_as_last_child_of_first_subnodes() {
        let updated = insert_playlist(TARGET, &sample_playlist(), "cafebabe").unwrap();

        let tree = parse_collection_str(&updated).unwrap();
        let CollectionNode::Folder { children, .. } = &tree.roots[0] else {
            panic!("expected root folder");
        };
        // The nested Sets folder keeps its place; the new playlist is last
        assert_eq!(children.len(), 2);
        let CollectionNode::Playlist(inserted) = &children[1] else {
            panic!("expected inserted playlist last");
        };
        assert_eq!(inserted.name, "Saturday Set");
        assert_eq!(inserted.len(), 2);
    }

    #[test]
    fn test_insert_encodes_native_entries() {
        let updated = insert_playlist(TARGET, &sample_playlist(), "cafebabe").unwrap();
        assert!(updated.contains(r#"KEY="/:mnt/:music/:a.mp3""#));
        assert!(updated.contains(r#"KEY="D/:music/:b.mp3""#));
    }

    #[test]
    fn test_insert_writes_entry_count_and_uuid() {
        let updated = insert_playlist(TARGET, &sample_playlist(), "cafebabe").unwrap();
        assert!(updated.contains(r#"<PLAYLIST ENTRIES="2" TYPE="LIST" UUID="cafebabe">"#));
    }

    #[test]
    fn test_insert_escapes_playlist_name() {
        let mut playlist = Playlist::new("Drum & Bass");
        playlist.push_entry(TrackRef::proprietary("D/:t.mp3"));
        let updated = insert_playlist(TARGET, &playlist, "cafebabe").unwrap();
        assert!(updated.contains(r#"NAME="Drum &amp; Bass""#));
    }

    #[test]
    fn test_insert_into_self_closing_container() {
        let target = r#"<NML><PLAYLISTS>
<NODE TYPE="FOLDER" NAME="$ROOT"><SUBNODES COUNT="0"/></NODE>
</PLAYLISTS></NML>"#;
        let updated = insert_playlist(target, &sample_playlist(), "cafebabe").unwrap();

        let tree = parse_collection_str(&updated).unwrap();
        let CollectionNode::Folder { children, .. } = &tree.roots[0] else {
            panic!("expected root folder");
        };
        assert!(matches!(&children[0], CollectionNode::Playlist(p) if p.name == "Saturday Set"));
    }

    #[test]
    fn test_missing_container_leaves_nothing_to_write() {
        let err = insert_playlist(
            "<NML><PLAYLISTS></PLAYLISTS></NML>",
            &sample_playlist(),
            "cafebabe",
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::MissingContainer));
    }

    #[test]
    fn test_rest_of_document_is_preserved() {
        let updated = insert_playlist(TARGET, &sample_playlist(), "cafebabe").unwrap();
        assert!(updated.contains(r#"<NODE TYPE="FOLDER" NAME="Sets">"#));
        assert!(updated.contains("<NML VERSION=\"19\">"));
        assert!(updated.starts_with("<?xml version=\"1.0\""));
    }

    #[test]
    fn test_inserting_twice_tolerates_duplicate_names() {
        let playlist = sample_playlist();
        let once = insert_playlist(TARGET, &playlist, "aaaa").unwrap();
        let twice = insert_playlist(&once, &playlist, "bbbb").unwrap();

        let tree = parse_collection_str(&twice).unwrap();
        let CollectionNode::Folder { children, .. } = &tree.roots[0] else {
            panic!("expected root folder");
        };
        let duplicates = children
            .iter()
            .filter(|c| matches!(c, CollectionNode::Playlist(p) if p.name == "Saturday Set"))
            .count();
        assert_eq!(duplicates, 2);
    }
}
