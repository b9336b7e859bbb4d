use kit::artifacts::objects::object_id::ObjectId;
use kit::artifacts::remote::client::{CAPABILITIES, negotiation_body, parse_advertised_head};
use kit::artifacts::remote::pkt_line;
use pretty_assertions::assert_eq;

const HEAD_ID: &str = "47b37f1a82bd2509e16075c1f430810febdffc45";

/// A realistic ref advertisement: service banner, flush, head line with
/// capabilities, refs, flush.
fn advertisement() -> Vec<u8> {
    let mut body = b"001e# service=git-upload-pack\n".to_vec();
    body.extend_from_slice(b"0000");
    body.extend(pkt_line::data_pkt(
        format!("{HEAD_ID} HEAD\0side-band-64k ofs-delta agent=git/2.40.0\n").as_bytes(),
    ));
    body.extend(pkt_line::data_pkt(
        format!("{HEAD_ID} refs/heads/main\n").as_bytes(),
    ));
    body.extend_from_slice(b"0000");
    body
}

#[test]
fn data_pkt_prefixes_the_total_length_in_hex() {
    assert_eq!(pkt_line::data_pkt(b"done\n"), b"0009done\n".to_vec());
    assert_eq!(pkt_line::flush_pkt(), b"0000".to_vec());

    // length covers payload plus the 4-digit prefix itself
    let pkt = pkt_line::data_pkt(&[0u8; 16]);
    assert_eq!(&pkt[..4], b"0014");
    assert_eq!(pkt.len(), 20);
}

#[test]
fn negotiation_body_is_byte_exact() {
    let want = ObjectId::try_parse(HEAD_ID.to_string()).unwrap();

    let want_line = format!("want {HEAD_ID} {CAPABILITIES}\n");
    let mut expected = format!("{:04x}{want_line}", want_line.len() + 4).into_bytes();
    expected.extend_from_slice(b"0000");
    expected.extend_from_slice(b"0009done\n");

    assert_eq!(negotiation_body(&want), expected);
}

#[test]
fn advertised_head_is_read_nine_bytes_past_the_first_newline() {
    let head = parse_advertised_head(&advertisement()).unwrap();
    assert_eq!(head.as_ref(), HEAD_ID);
}

#[test]
fn truncated_advertisement_is_rejected() {
    let body = b"001e# service=git-upload-pack\n0000".to_vec();
    assert!(parse_advertised_head(&body).is_err());
}

#[test]
fn advertisement_without_banner_is_rejected() {
    assert!(parse_advertised_head(b"no newline here").is_err());
}
