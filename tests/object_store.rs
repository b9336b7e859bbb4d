use kit::areas::repository::Repository;
use kit::artifacts::objects::blob::Blob;
use kit::artifacts::objects::object_id::ObjectId;
use kit::errors::KitError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;

fn open_repository() -> (assert_fs::TempDir, Repository) {
    let dir = assert_fs::TempDir::new().expect("Failed to create temp dir");
    let mut repository =
        Repository::new(&dir.path().to_string_lossy(), Box::new(std::io::sink()))
            .expect("Failed to open repository");
    repository.init().expect("Failed to init repository");
    (dir, repository)
}

#[rstest]
#[case::empty(0)]
#[case::single_byte(1)]
#[case::one_kilobyte(1024)]
#[case::larger(4096)]
fn blob_round_trips_through_the_store(#[case] len: usize) {
    let (_dir, repository) = open_repository();

    let payload: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
    let object_id = repository
        .database()
        .store(&Blob::new(payload.clone().into()))
        .expect("Failed to store blob");

    let record = repository
        .database()
        .load(&object_id)
        .expect("Failed to load blob");

    let mut expected = format!("blob {len}\0").into_bytes();
    expected.extend_from_slice(&payload);
    assert_eq!(record.as_ref(), expected.as_slice());

    let body = repository
        .database()
        .cat_file(&object_id)
        .expect("Failed to cat blob");
    assert_eq!(body.as_ref(), payload.as_slice());
}

#[test]
fn storing_identical_content_twice_is_a_noop() {
    let (_dir, repository) = open_repository();

    let blob = Blob::new(bytes::Bytes::from_static(b"same bytes"));
    let first = repository.database().store(&blob).unwrap();
    let second = repository.database().store(&blob).unwrap();

    assert_eq!(first, second);
    assert!(repository.database().load(&first).is_ok());
}

#[test]
fn loading_an_absent_object_reports_not_found() {
    let (_dir, repository) = open_repository();

    let missing = ObjectId::try_parse("deadbeef".repeat(5)).unwrap();
    let err = repository.database().load(&missing).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<KitError>(),
        Some(KitError::NotFound(_))
    ));
}

#[test]
fn undecodable_object_file_reports_corruption() {
    let (dir, repository) = open_repository();

    let object_id = ObjectId::try_parse("aa".repeat(20)).unwrap();
    let object_path = dir
        .path()
        .join(".git")
        .join("objects")
        .join(object_id.to_path());
    std::fs::create_dir_all(object_path.parent().unwrap()).unwrap();
    std::fs::write(&object_path, b"this is not a zlib stream").unwrap();

    let err = repository.database().load(&object_id).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<KitError>(),
        Some(KitError::CorruptObject { .. })
    ));
}

#[test]
fn header_length_mismatch_reports_corruption() {
    let (dir, repository) = open_repository();

    // record declares 5 payload bytes but carries 3
    let mut encoder =
        flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(b"blob 5\0abc").unwrap();
    let compressed = encoder.finish().unwrap();

    let object_id = ObjectId::try_parse("bb".repeat(20)).unwrap();
    let object_path = dir
        .path()
        .join(".git")
        .join("objects")
        .join(object_id.to_path());
    std::fs::create_dir_all(object_path.parent().unwrap()).unwrap();
    std::fs::write(&object_path, compressed).unwrap();

    let err = repository.database().load(&object_id).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<KitError>(),
        Some(KitError::CorruptObject { .. })
    ));
}
