use kit::artifacts::objects::entry_mode::{EntryMode, FileMode};
use kit::artifacts::objects::object::{Packable, Unpackable};
use kit::artifacts::objects::object_id::ObjectId;
use kit::artifacts::objects::object_type::ObjectType;
use kit::artifacts::objects::tree::{Tree, TreeEntry};
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = EntryMode> {
    prop_oneof![
        Just(EntryMode::Directory),
        Just(EntryMode::Symlink),
        Just(EntryMode::File(FileMode::Regular)),
        Just(EntryMode::File(FileMode::Executable)),
    ]
}

fn oid_strategy() -> impl Strategy<Value = ObjectId> {
    proptest::array::uniform20(any::<u8>()).prop_map(|raw| ObjectId::from_raw(&raw))
}

fn decode(record: bytes::Bytes) -> Tree {
    let mut cursor = std::io::Cursor::new(record);
    let object_type = ObjectType::parse_object_type(&mut cursor).expect("Invalid record header");
    assert_eq!(object_type, ObjectType::Tree);
    Tree::deserialize(cursor).expect("Failed to decode tree")
}

proptest! {
    /// Encoding then decoding yields the same entries, sorted by name, no
    /// matter what order they were supplied in.
    #[test]
    fn tree_round_trips_to_sorted_entries(
        entries in proptest::collection::btree_map(
            "[a-zA-Z0-9._-]{1,12}",
            (mode_strategy(), oid_strategy()),
            0..8,
        )
    ) {
        // feed the entries in reverse order to prove input order is irrelevant
        let tree = Tree::from_entries(
            entries
                .iter()
                .rev()
                .map(|(name, (mode, oid))| (name.clone(), TreeEntry::new(*mode, oid.clone()))),
        );

        let decoded = decode(tree.serialize().unwrap());
        let decoded: Vec<(String, TreeEntry)> = decoded.into_entries().collect();

        let names: Vec<&String> = decoded.iter().map(|(name, _)| name).collect();
        let mut sorted_names = names.clone();
        sorted_names.sort();
        prop_assert_eq!(&names, &sorted_names);

        prop_assert_eq!(decoded.len(), entries.len());
        for (name, (mode, oid)) in &entries {
            let entry = decoded
                .iter()
                .find(|(decoded_name, _)| decoded_name == name)
                .map(|(_, entry)| entry)
                .expect("entry lost in round trip");
            prop_assert_eq!(entry.mode, *mode);
            prop_assert_eq!(&entry.oid, oid);
        }
    }
}

#[test]
fn tree_payload_is_byte_exact() {
    // single entry: "100644 a.txt\0" + 20 raw id bytes
    let oid = ObjectId::from_raw(&[0xab; 20]);
    let tree = Tree::from_entries([(
        "a.txt".to_string(),
        TreeEntry::new(EntryMode::File(FileMode::Regular), oid),
    )]);

    let record = tree.serialize().unwrap();

    let mut expected = b"tree 33\0100644 a.txt\0".to_vec();
    expected.extend_from_slice(&[0xab; 20]);
    assert_eq!(record.as_ref(), expected.as_slice());
}

#[test]
fn decoding_rejects_truncated_ids() {
    // entry header claims an id but only 5 bytes follow
    let mut payload = b"100644 a.txt\0".to_vec();
    payload.extend_from_slice(&[0xab; 5]);

    let result = Tree::deserialize(std::io::Cursor::new(payload));
    assert!(result.is_err());
}
