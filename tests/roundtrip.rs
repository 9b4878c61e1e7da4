//! File round trips through `LocalStorage` and rejection of damaged files.

use hufftext::{decode, encode, encode_to_vec, ByteStore, CodecError, LocalStorage};

fn units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

#[test]
fn abracadabra_through_the_filesystem() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalStorage::new(dir.path());

    let text = units("abracadabra");
    let info = encode(&text, &store, "abra.huff").unwrap();

    let on_disk = std::fs::read(dir.path().join("abra.huff")).unwrap();
    assert_eq!(on_disk.len(), info.compressed_bytes());
    assert!(on_disk.len() * 8 < 11 * 16);

    assert_eq!(decode(&store, "abra.huff").unwrap(), text);
}

#[test]
fn empty_text_is_a_zero_length_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalStorage::new(dir.path());

    let info = encode(&[], &store, "empty.huff").unwrap();
    assert_eq!(info.compressed_bytes(), 0);
    assert_eq!(std::fs::metadata(dir.path().join("empty.huff")).unwrap().len(), 0);
    assert!(decode(&store, "empty.huff").unwrap().is_empty());
}

#[test]
fn encode_overwrites_existing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalStorage::new(dir.path());

    encode(&units("a much longer piece of text than the next one"), &store, "x.huff").unwrap();
    encode(&units("short"), &store, "x.huff").unwrap();
    assert_eq!(decode(&store, "x.huff").unwrap(), units("short"));
}

#[test]
fn missing_source_is_a_storage_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalStorage::new(dir.path());

    match decode(&store, "missing.huff") {
        Err(CodecError::Storage { name, source }) => {
            assert_eq!(name, "missing.huff");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected storage error, got {:?}", other),
    }
}

#[test]
fn unwritable_destination_is_a_storage_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalStorage::new(dir.path());

    let err = encode(&units("abc"), &store, "no/such/dir/out.huff").unwrap_err();
    assert!(matches!(err, CodecError::Storage { .. }));
}

#[test]
fn surrogates_and_full_alphabet_survive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalStorage::new(dir.path());

    // lone surrogates are plain 16-bit units here
    let mut text: Vec<u16> = vec![0xD800, 0xDFFF, 0x0000, 0xFFFF, 0xD83D, 0xDE00];
    text.extend(units("mixed 😀 text ✓"));
    encode(&text, &store, "s.huff").unwrap();
    assert_eq!(decode(&store, "s.huff").unwrap(), text);

    let every_unit: Vec<u16> = (0..=u16::MAX).collect();
    let info = encode(&every_unit, &store, "all.huff").unwrap();
    assert_eq!(info.tree_bytes, 147_456);
    assert_eq!(decode(&store, "all.huff").unwrap(), every_unit);
}

#[test]
fn deep_tree_roundtrip() {
    // fibonacci-shaped counts push codes well past 16 bits
    let mut text = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for unit in 0u16..25 {
        text.extend(std::iter::repeat(unit + 0x100).take(a));
        (a, b) = (b, a + b);
    }
    let (bytes, _) = encode_to_vec(&text).unwrap();
    assert_eq!(hufftext::decode_slice(&bytes, "deep").unwrap(), text);
}

#[test]
fn damaged_files_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = LocalStorage::new(dir.path());
    let (good, _) = encode_to_vec(&units("the rain in spain stays mainly in the plain")).unwrap();

    let cases: Vec<(&str, Vec<u8>)> = vec![
        ("truncated.huff", good[..7].to_vec()),
        ("zero_tree.huff", {
            let mut b = good.clone();
            b[0] &= 0xFC;
            b[1] = 0;
            b[2] = 0;
            b
        }),
        ("long_tree.huff", {
            let mut b = good.clone();
            b[0] |= 0x03;
            b
        }),
        ("bad_bits.huff", {
            let mut b = good.clone();
            b[3] = 0x9F;
            b
        }),
    ];

    for (name, bytes) in cases {
        store.write_all(name, &bytes).unwrap();
        match decode(&store, name) {
            Err(CodecError::CorruptFormat { name: reported, .. }) => assert_eq!(reported, name),
            other => panic!("{}: expected corrupt format, got {:?}", name, other),
        }
    }

    let mut newer = good.clone();
    newer[0] |= 0xFC;
    store.write_all("newer.huff", &newer).unwrap();
    assert!(matches!(
        decode(&store, "newer.huff"),
        Err(CodecError::UnsupportedVersion { version: 63, .. })
    ));
}

#[test]
fn garbage_never_panics() {
    // deterministic pseudo-random bytes behind a plausible header
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    for round in 0..200 {
        let len = 8 + round * 3;
        let mut data: Vec<u8> = (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                state as u8
            })
            .collect();
        data[0] &= 0x03;
        let _ = hufftext::decode_slice(&data, "garbage");
        let _ = hufftext::inspect_slice(&data, "garbage");
    }
}
