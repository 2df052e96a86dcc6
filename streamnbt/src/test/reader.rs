use super::builder::Builder;
use super::data;
use crate::{
    Buffer, Endianness, ErrorKind, List, NbtFile, NbtReader, ParseState, Result, Tag,
    TagType, Value,
};

fn reader_buffer() -> Result<Buffer> {
    data::encode(data::reader_root()?)
}

/// Walk the whole stream, checking that it ends in the error state.
fn read_bad(bytes: Vec<u8>) -> crate::Error {
    let mut buf = Buffer::from_vec(bytes);
    let mut reader = NbtReader::new(&mut buf);
    let err = loop {
        match reader.advance_to_next() {
            Ok(true) => continue,
            Ok(false) => panic!("corrupt stream read to the end"),
            Err(e) => break e,
        }
    };
    assert!(reader.is_in_error_state());
    err
}

#[test]
fn walks_every_tag() -> Result<()> {
    let mut buf = data::encode(data::big_root()?)?;
    let mut reader = NbtReader::new(&mut buf);
    assert_eq!(reader.state(), ParseState::AtStreamBeginning);
    assert_eq!(reader.root_name(), None);

    let mut visited = 0;
    while reader.advance_to_next()? {
        visited += 1;
        assert!(reader.tag_type() != TagType::End);
    }
    assert_eq!(reader.root_name(), Some("Level"));
    assert!(reader.is_at_stream_end());
    assert_eq!(reader.depth(), 1);

    // Root and its members, then the children of the nested compounds and
    // of both lists.
    assert_eq!(visited, 1 + 13 + 6 + 5 + 6);
    assert_eq!(reader.tags_read(), visited);
    assert_eq!(reader.get_ref().position(), data::BIG_FILE_LEN);
    Ok(())
}

#[test]
fn walks_end_tags_when_asked() -> Result<()> {
    let mut buf = data::encode(data::big_root()?)?;
    let mut reader = NbtReader::new(&mut buf);
    reader.set_skip_end_tags(false);
    assert!(!reader.skip_end_tags());

    let mut ends = 0;
    while reader.advance_to_next()? {
        if reader.tag_type() == TagType::End {
            assert!(!reader.has_name());
            ends += 1;
        }
    }
    // Root, nested compound test, ham, egg and two list compounds.
    assert_eq!(ends, 6);
    assert_eq!(reader.root_name(), Some("Level"));
    Ok(())
}

#[test]
fn properties() -> Result<()> {
    let mut buf = reader_buffer()?;
    let mut reader = NbtReader::new(&mut buf);
    assert_eq!(reader.depth(), 0);
    assert_eq!(reader.tags_read(), 0);

    assert!(reader.advance_to_next()?);
    assert_eq!(reader.tag_name(), Some("root"));
    assert_eq!(reader.tag_type(), TagType::Compound);
    assert_eq!(reader.list_type(), TagType::Unknown);
    assert!(!reader.has_value());
    assert!(reader.is_compound());
    assert!(!reader.is_list());
    assert!(!reader.is_list_element());
    assert!(!reader.has_length());
    assert_eq!(reader.list_index(), 0);
    assert_eq!(reader.depth(), 1);
    assert_eq!(reader.parent_name(), None);
    assert_eq!(reader.parent_tag_type(), TagType::Unknown);
    assert_eq!(reader.parent_tag_length(), 0);
    assert_eq!(reader.tag_length(), 0);
    assert_eq!(reader.tags_read(), 1);
    assert_eq!(reader.tag_start_offset(), 0);

    assert!(reader.advance_to_next()?);
    assert_eq!(reader.tag_name(), Some("first"));
    assert_eq!(reader.tag_type(), TagType::Int);
    assert_eq!(reader.list_type(), TagType::Unknown);
    assert!(reader.has_value());
    assert!(!reader.is_compound());
    assert!(!reader.is_list());
    assert!(!reader.is_list_element());
    assert!(!reader.has_length());
    assert_eq!(reader.list_index(), 0);
    assert_eq!(reader.depth(), 2);
    assert_eq!(reader.parent_name(), Some("root"));
    assert_eq!(reader.parent_tag_type(), TagType::Compound);
    assert_eq!(reader.parent_tag_length(), 0);
    assert_eq!(reader.tag_length(), 0);
    assert_eq!(reader.tags_read(), 2);
    // Type byte, name length and "root".
    assert_eq!(reader.tag_start_offset(), 7);

    assert!(reader.advance_to_named("fourth-list")?);
    assert_eq!(reader.tag_type(), TagType::List);
    assert_eq!(reader.list_type(), TagType::List);
    assert!(!reader.has_value());
    assert!(reader.is_list());
    assert!(!reader.is_list_element());
    assert!(reader.has_length());
    assert_eq!(reader.depth(), 2);
    assert_eq!(reader.parent_name(), Some("root"));
    assert_eq!(reader.tag_length(), 3);
    assert_eq!(reader.tags_read(), 8);
    assert_eq!(reader.to_string(), "#8. TAG_List<TAG_List>[3] fourth-list");

    // First element, itself a list.
    assert!(reader.advance_to_next()?);
    assert_eq!(reader.tag_name(), None);
    assert_eq!(reader.tag_type(), TagType::List);
    assert_eq!(reader.list_type(), TagType::Compound);
    assert!(reader.is_list());
    assert!(reader.is_list_element());
    assert!(reader.has_length());
    assert_eq!(reader.list_index(), 0);
    assert_eq!(reader.depth(), 3);
    assert_eq!(reader.parent_name(), Some("fourth-list"));
    assert_eq!(reader.parent_tag_type(), TagType::List);
    assert_eq!(reader.parent_tag_length(), 3);
    assert_eq!(reader.tag_length(), 1);
    assert_eq!(reader.tags_read(), 9);

    // First element of the nested list, a compound.
    assert!(reader.advance_to_next()?);
    assert_eq!(reader.tag_name(), None);
    assert_eq!(reader.tag_type(), TagType::Compound);
    assert_eq!(reader.list_type(), TagType::Unknown);
    assert!(reader.is_compound());
    assert!(reader.is_list_element());
    assert!(!reader.has_length());
    assert_eq!(reader.list_index(), 0);
    assert_eq!(reader.depth(), 4);
    assert_eq!(reader.parent_name(), None);
    assert_eq!(reader.parent_tag_type(), TagType::List);
    assert_eq!(reader.parent_tag_length(), 1);
    assert_eq!(reader.tag_length(), 0);
    assert_eq!(reader.tags_read(), 10);

    assert!(reader.advance_to_named("fifth")?);
    assert_eq!(reader.tag_type(), TagType::Int);
    assert_eq!(reader.list_type(), TagType::Unknown);
    assert!(reader.has_value());
    assert!(!reader.is_list_element());
    assert_eq!(reader.list_index(), 0);
    assert_eq!(reader.depth(), 2);
    assert_eq!(reader.parent_name(), Some("root"));
    assert_eq!(reader.parent_tag_type(), TagType::Compound);
    assert_eq!(reader.parent_tag_length(), 0);
    assert_eq!(reader.tags_read(), 18);

    assert!(reader.advance_to_next()?);
    assert_eq!(reader.tag_name(), Some("hugeArray"));
    assert_eq!(reader.tag_type(), TagType::ByteArray);
    assert!(reader.has_value());
    assert!(reader.has_length());
    assert_eq!(reader.depth(), 2);
    assert_eq!(reader.tag_length(), 1024 * 1024);
    assert_eq!(reader.tags_read(), 19);
    assert_eq!(reader.to_string(), "#19. TAG_Byte_Array[1048576] hugeArray");

    assert!(!reader.advance_to_next()?);
    assert!(reader.is_at_stream_end());
    assert_eq!(reader.depth(), 1);
    Ok(())
}

#[test]
fn next_sibling() -> Result<()> {
    let mut buf = reader_buffer()?;
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_next()?);
    assert_eq!(reader.tag_name(), Some("root"));
    assert!(reader.advance_to_next()?);
    assert_eq!(reader.tag_name(), Some("first"));
    assert!(reader.advance_to_next_sibling_named("third-comp")?);
    assert_eq!(reader.tag_name(), Some("third-comp"));
    assert!(reader.advance_to_next_sibling()?);
    assert_eq!(reader.tag_name(), Some("fourth-list"));
    assert!(reader.advance_to_next_sibling()?);
    assert_eq!(reader.tag_name(), Some("fifth"));
    assert!(reader.advance_to_next_sibling()?);
    assert_eq!(reader.tag_name(), Some("hugeArray"));
    assert!(!reader.advance_to_next_sibling()?);
    // Again, now from the end of the stream.
    assert!(!reader.advance_to_next_sibling()?);
    Ok(())
}

#[test]
fn next_sibling_not_found_leaves_container() -> Result<()> {
    let mut buf = reader_buffer()?;
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_named("inComp1")?);
    assert!(!reader.advance_to_next_sibling_named("no such tag")?);
    assert_eq!(reader.tag_name(), Some("fourth-list"));
    Ok(())
}

#[test]
fn named_not_found() -> Result<()> {
    let mut buf = reader_buffer()?;
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_next()?);
    assert!(!reader.advance_to_named("no such tag")?);
    assert!(!reader.advance_to_named("not this one either")?);
    assert!(reader.is_at_stream_end());
    Ok(())
}

#[test]
fn descendant() -> Result<()> {
    let mut buf = reader_buffer()?;
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_descendant("third-comp")?);
    assert_eq!(reader.tag_name(), Some("third-comp"));
    assert!(reader.advance_to_descendant("inComp2")?);
    assert_eq!(reader.tag_name(), Some("inComp2"));
    assert!(!reader.advance_to_descendant("derp")?);
    assert_eq!(reader.tag_name(), Some("inComp3"));
    assert!(reader.advance_to_next()?);
    assert_eq!(reader.tag_name(), Some("fourth-list"));
    assert!(reader.advance_to_descendant("inList2")?);
    assert_eq!(reader.tag_name(), Some("inList2"));
    assert_eq!(reader.depth(), 5);

    while reader.advance_to_next()? {}
    assert!(!reader.advance_to_descendant("*")?);
    Ok(())
}

#[test]
fn skip_subtree() -> Result<()> {
    let mut buf = reader_buffer()?;
    let mut reader = NbtReader::new(&mut buf);
    for _ in 0..5 {
        assert!(reader.advance_to_next()?);
    }
    assert_eq!(reader.tag_name(), Some("inComp1"));
    assert_eq!(reader.skip_subtree()?, 2);
    assert_eq!(reader.tag_name(), Some("fourth-list"));
    assert_eq!(reader.skip_subtree()?, 11);
    assert!(!reader.advance_to_next()?);
    assert_eq!(reader.skip_subtree()?, 0);
    Ok(())
}

#[test]
fn materialize_everything_in_turn() -> Result<()> {
    let mut buf = reader_buffer()?;
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_next()?);

    let mut tags = Vec::new();
    while !reader.is_at_stream_end() {
        tags.push(reader.materialize_as_tag()?);
    }
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0], data::reader_root()?);

    let err = reader.materialize_as_tag().unwrap_err();
    assert!(err.is_eof());
    Ok(())
}

#[test]
fn materialize_root() -> Result<()> {
    for skip_end_tags in [true, false] {
        let mut buf = data::encode(data::value_root()?)?;
        let mut reader = NbtReader::new(&mut buf);
        reader.set_skip_end_tags(skip_end_tags);
        let root = reader.materialize_as_tag()?;
        data::assert_value_root(&root);
        assert!(reader.is_at_stream_end());
    }
    Ok(())
}

#[test]
fn materialize_values_one_by_one() -> Result<()> {
    let mut buf = data::encode(data::value_root()?)?;
    let mut reader = NbtReader::new(&mut buf);
    let mut root = Tag::compound("root");

    assert!(reader.advance_to_next()?);
    assert!(reader.advance_to_next()?);
    while !reader.is_at_stream_end() {
        let tag = reader.materialize_as_tag()?;
        root.as_compound_mut().unwrap().append(tag)?;
    }
    data::assert_value_root(&root);
    Ok(())
}

#[test]
fn materialize_lists() -> Result<()> {
    let original = data::list_root()?;
    let bytes = data::encode(original.clone())?.to_vec();

    let mut buf = Buffer::from_vec(bytes.clone());
    let mut reader = NbtReader::new(&mut buf);
    let mut whole = Vec::new();
    while !reader.is_at_stream_end() {
        whole.push(reader.materialize_as_tag()?);
    }
    assert_eq!(whole, vec![original.clone()]);

    let mut buf = Buffer::from_vec(bytes);
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_next()?);
    assert!(reader.advance_to_next()?);
    let mut lists = Vec::new();
    while !reader.is_at_stream_end() {
        lists.push(reader.materialize_as_tag()?);
    }
    let expected: Vec<Tag> = original.as_compound().unwrap().iter().cloned().collect();
    assert_eq!(lists, expected);
    Ok(())
}

#[test]
fn materialize_inside_list() -> Result<()> {
    let mut buf = reader_buffer()?;
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_named("fourth-list")?);
    assert!(reader.advance_to_next()?);
    assert!(reader.advance_to_next_sibling()?);

    // Second element of fourth-list.
    let tag = reader.materialize_as_tag()?;
    assert_eq!(tag.name(), None);
    let list = tag.as_list().unwrap();
    assert_eq!(list.list_type(), TagType::Compound);
    assert!(tag.at(0).unwrap().get("inList2").is_some());

    // The reader moved on to the third element.
    assert!(reader.is_list_element());
    assert_eq!(reader.list_index(), 2);
    assert_eq!(reader.depth(), 3);
    Ok(())
}

#[test]
fn read_values() -> Result<()> {
    let mut buf = data::encode(data::value_root()?)?;
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_next()?);

    let expected = [
        Value::Byte(1),
        Value::Short(2),
        Value::Int(3),
        Value::Long(4),
        Value::Float(5.0),
        Value::Double(6.0),
        Value::ByteArray(vec![10, 11, 12]),
        Value::IntArray(vec![20, 21, 22]),
        Value::LongArray(vec![30, 31, 32]),
        Value::String("123".to_owned()),
    ];
    for value in expected {
        assert!(reader.advance_to_next()?);
        assert_eq!(reader.read_value()?, value);
    }

    assert!(!reader.advance_to_next()?);
    assert!(reader.read_value().unwrap_err().is_eof());
    Ok(())
}

#[test]
fn read_value_twice() -> Result<()> {
    let mut buf = data::encode(data::value_root()?)?;
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_next()?);
    assert!(reader.advance_to_next()?);

    assert_eq!(reader.read_value()?, Value::Byte(1));
    let err = reader.read_value().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    assert_eq!(err.message(), "Value already read, or no value to read.");
    assert!(!reader.is_in_error_state());

    assert!(reader.advance_to_next()?);
    assert_eq!(reader.tag_name(), Some("short"));
    assert!(reader.advance_to_next()?);
    assert_eq!(reader.read_value()?, Value::Int(3));
    Ok(())
}

#[test]
fn cached_values() -> Result<()> {
    let mut buf = data::encode(data::value_root()?)?;
    let mut reader = NbtReader::new(&mut buf);
    assert!(!reader.cache_tag_values());
    reader.set_cache_tag_values(true);
    assert!(reader.advance_to_next()?);

    let expected = [
        Value::Byte(1),
        Value::Short(2),
        Value::Int(3),
        Value::Long(4),
        Value::Float(5.0),
        Value::Double(6.0),
        Value::ByteArray(vec![10, 11, 12]),
        Value::IntArray(vec![20, 21, 22]),
        Value::LongArray(vec![30, 31, 32]),
        Value::String("123".to_owned()),
    ];
    for value in expected {
        assert!(reader.advance_to_next()?);
        assert_eq!(reader.read_value()?, value);
        assert_eq!(reader.read_value()?, value);
    }
    Ok(())
}

#[test]
fn lists_as_arrays() -> Result<()> {
    let mut buf = data::encode(data::list_root()?)?;
    let mut reader = NbtReader::new(&mut buf);

    let err = reader.read_list_as_array::<i32>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);

    assert!(reader.advance_to_named("ByteList")?);
    assert_eq!(reader.read_list_as_array::<u8>()?, vec![100, 20, 3]);

    assert!(reader.advance_to_named("DoubleList")?);
    assert_eq!(
        reader.read_list_as_array::<f64>()?,
        vec![1.0, 2000.0, -3000000.0]
    );

    assert!(reader.advance_to_named("FloatList")?);
    assert_eq!(
        reader.read_list_as_array::<f32>()?,
        vec![1.0, 2000.0, -3000000.0]
    );

    assert!(reader.advance_to_named("IntList")?);
    assert_eq!(reader.read_list_as_array::<i32>()?, vec![1, 2000, -3000000]);

    assert!(reader.advance_to_named("LongList")?);
    assert_eq!(reader.read_list_as_array::<i64>()?, vec![1, 2000, -3000000]);

    assert!(reader.advance_to_named("ShortList")?);
    assert_eq!(reader.read_list_as_array::<i16>()?, vec![1, 200, -30000]);

    assert!(reader.advance_to_named("StringList")?);
    assert_eq!(
        reader.read_list_as_array::<String>()?,
        vec!["one", "two thousand", "negative three million"]
    );

    assert!(reader.advance_to_named("CompoundList")?);
    let err = reader.read_list_as_array::<i32>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    assert!(!reader.is_in_error_state());

    while reader.advance_to_next()? {}
    assert!(reader.read_list_as_array::<i32>().unwrap_err().is_eof());
    Ok(())
}

#[test]
fn list_as_array_converts() -> Result<()> {
    let mut buf = data::encode(data::list_root()?)?;
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_named("ByteList")?);
    assert_eq!(reader.read_list_as_array::<i16>()?, vec![100, 20, 3]);

    assert!(reader.advance_to_named("IntList")?);
    assert_eq!(
        reader.read_list_as_array::<String>()?,
        vec!["1", "2000", "-3000000"]
    );
    Ok(())
}

#[test]
fn list_as_array_from_the_middle() -> Result<()> {
    let mut buf = data::encode(data::list_root()?)?;
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_named("IntList")?);
    assert!(reader.advance_to_next()?);
    assert!(reader.advance_to_next()?);
    assert_eq!(reader.list_index(), 1);
    let before = reader.tags_read();

    // The current element has not been read yet, so it is included.
    assert_eq!(reader.read_list_as_array::<i32>()?, vec![2000, -3000000]);
    assert_eq!(reader.tags_read(), before + 1);
    assert_eq!(reader.list_index(), 2);

    assert!(reader.advance_to_next()?);
    assert_eq!(reader.tag_name(), Some("LongList"));
    Ok(())
}

#[test]
fn list_as_array_after_reading_element() -> Result<()> {
    let mut buf = data::encode(data::list_root()?)?;
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_named("ShortList")?);
    assert!(reader.advance_to_next()?);
    assert_eq!(reader.read_value()?, Value::Short(1));
    assert_eq!(reader.read_list_as_array::<i16>()?, vec![200, -30000]);
    Ok(())
}

#[test]
fn empty_list_as_array() -> Result<()> {
    let root = data::compound(
        "root",
        vec![Tag::named("empty", List::new()), Tag::named("after", 1i8)],
    )?;
    let mut buf = data::encode(root)?;
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_named("empty")?);
    assert_eq!(reader.list_type(), TagType::End);
    assert!(reader.read_list_as_array::<i32>()?.is_empty());
    assert!(reader.advance_to_next()?);
    assert_eq!(reader.tag_name(), Some("after"));
    Ok(())
}

#[test]
fn nested_lists() -> Result<()> {
    let root = data::compound(
        "root",
        vec![data::list(
            "OuterList",
            vec![
                Tag::unnamed(List::from_tags(vec![Tag::unnamed(0i8)])?),
                Tag::unnamed(List::from_tags(vec![Tag::unnamed(0i16)])?),
                Tag::unnamed(List::from_tags(vec![Tag::unnamed(0i32)])?),
            ],
        )?],
    )?;
    let mut buf = data::encode(root)?;
    let mut reader = NbtReader::new(&mut buf);

    let mut seen = Vec::new();
    while reader.advance_to_next()? {
        seen.push((reader.tag_type(), reader.depth()));
    }
    assert_eq!(
        seen,
        vec![
            (TagType::Compound, 1),
            (TagType::List, 2),
            (TagType::List, 3),
            (TagType::Byte, 4),
            (TagType::List, 3),
            (TagType::Short, 4),
            (TagType::List, 3),
            (TagType::Int, 4),
        ]
    );
    Ok(())
}

#[test]
fn end_tag() -> Result<()> {
    let root = data::compound("root", vec![Tag::named("test", 0i32)])?;
    let mut buf = data::encode(root)?;
    let mut reader = NbtReader::new(&mut buf);
    reader.set_skip_end_tags(false);

    assert!(reader.advance_to_descendant("test")?);
    assert_eq!(reader.tag_type(), TagType::Int);
    assert!(reader.advance_to_next_sibling()?);

    assert_eq!(reader.tag_type(), TagType::End);
    assert_eq!(reader.state(), ParseState::AtCompoundEnd);
    assert!(!reader.is_in_error_state());
    assert!(!reader.is_at_stream_end());
    assert!(!reader.is_compound());
    assert!(!reader.is_list());
    assert!(!reader.is_list_element());
    assert!(!reader.has_value());
    assert!(!reader.has_name());
    assert!(!reader.has_length());

    let err = reader.materialize_as_tag().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    assert_eq!(err.message(), "Value already read, or no value to read.");

    assert!(!reader.advance_to_next()?);
    assert!(reader.is_at_stream_end());
    Ok(())
}

#[test]
fn error_state() -> Result<()> {
    let mut bytes = data::encode(Tag::compound("root"))?.to_vec();
    bytes[0] = 123;
    let mut buf = Buffer::from_vec(bytes);
    let mut reader = NbtReader::new(&mut buf);

    let err = reader.read_value().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    assert_eq!(err.message(), "Value already read, or no value to read.");
    reader.set_cache_tag_values(true);
    let err = reader.read_value().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    assert_eq!(err.message(), "No value to read.");

    let err = reader.advance_to_next().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    assert_eq!(err.message(), "NBT tag type out of range: 123");

    assert!(reader.is_in_error_state());
    assert!(!reader.has_name());

    let state_err = |e: crate::Error| e.kind() == ErrorKind::InvalidReaderState;
    assert!(state_err(reader.advance_to_next().unwrap_err()));
    assert!(state_err(reader.read_list_as_array::<i32>().unwrap_err()));
    assert!(state_err(reader.advance_to_next_sibling().unwrap_err()));
    assert!(state_err(reader.advance_to_descendant("derp").unwrap_err()));
    assert!(state_err(reader.materialize_as_tag().unwrap_err()));
    assert!(state_err(reader.skip_subtree().unwrap_err()));
    assert!(state_err(reader.read_value().unwrap_err()));
    Ok(())
}

#[test]
fn corrupt_streams() {
    assert!(read_bad(vec![]).is_eof());

    let err = read_bad(vec![0x02, 0x00, 0x01, b'f', 0x00]);
    assert_eq!(err.message(), "Given NBT stream does not start with TAG_Compound.");

    let err = read_bad(vec![0x0A, 0xFF, 0xFF, b'f', 0x00]);
    assert_eq!(err.message(), "Negative string length given!");

    assert!(read_bad(vec![0x0A, 0x00, 0xFF, b'f', 0x00]).is_eof());

    let err = read_bad(vec![
        0x0A, 0x00, 0x01, b'f', 0xFF, 0x00, 0x01, b'N', 0x7F, 0xFF, 0x00,
    ]);
    assert_eq!(err.message(), "NBT tag type out of range: 255");

    let err = read_bad(vec![0x0A, 0x00, 0x01, b'f', 0x09, 0x00, 0x01, b'g', 0xFF]);
    assert_eq!(err.message(), "NBT tag type out of range: 255");

    let err = read_bad(
        Builder::new()
            .start_compound("f")
            .start_list("g", TagType::Byte, -1)
            .build(),
    );
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    assert_eq!(err.message(), "Negative tag length given: -1");
}

#[test]
fn negative_list_size_stops_at_the_count() {
    let bytes = Builder::new()
        .start_compound("f")
        .start_list("g", TagType::Byte, -1)
        .raw_bytes(&[1, 2, 3])
        .build();
    let mut buf = Buffer::from_vec(bytes);
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_next().unwrap());
    let err = reader.advance_to_next().unwrap_err();
    assert_eq!(err.message(), "Negative tag length given: -1");
    assert!(reader.is_in_error_state());
    assert_eq!(reader.get_ref().position(), 13);
    assert_eq!(reader.get_ref().remaining(), 3);
}

#[test]
fn deep_nesting_streams_but_does_not_materialize() -> Result<()> {
    let mut buf = Buffer::from_vec(data::nested_lists(200_000));
    let mut reader = NbtReader::new(&mut buf);
    while reader.advance_to_next()? {}
    assert_eq!(reader.tags_read(), 200_001);

    let mut buf = Buffer::from_vec(data::nested_lists(200_000));
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_named("deep")?);
    let err = reader.materialize_as_tag().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    assert_eq!(err.message(), "NBT nested deeper than 512 levels");
    assert!(reader.is_in_error_state());

    let mut buf = Buffer::from_vec(data::nested_lists(100));
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_named("deep")?);
    let deep = reader.materialize_as_tag()?;
    assert_eq!(deep.tag_type(), TagType::List);
    assert!(reader.is_at_stream_end());
    Ok(())
}

#[test]
fn truncated_value() -> Result<()> {
    let bytes = Builder::new()
        .start_compound("root")
        .tag(TagType::Long)
        .name("cut")
        .raw_bytes(&[0, 0, 1])
        .build();
    let mut buf = Buffer::from_vec(bytes);
    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_named("cut")?);
    assert!(reader.read_value().unwrap_err().is_eof());
    assert!(reader.is_in_error_state());
    Ok(())
}

#[test]
fn little_endian() -> Result<()> {
    let mut file = NbtFile::with_root(data::value_root()?)?;
    file.set_endianness(Endianness::Little);
    let (bytes, _) = file.save_to_vec(crate::Compression::None)?;

    let mut buf = Buffer::from_vec(bytes);
    let mut reader = NbtReader::with_endianness(&mut buf, Endianness::Little);
    let root = reader.materialize_as_tag()?;
    data::assert_value_root(&root);
    Ok(())
}

#[test]
fn offsets_are_relative_to_start() -> Result<()> {
    let mut bytes = vec![0xAA, 0xBB, 0xCC];
    bytes.extend(data::encode(data::small_root()?)?.to_vec());
    let mut buf = Buffer::from_vec(bytes);
    buf.set_position(3)?;

    let mut reader = NbtReader::new(&mut buf);
    assert!(reader.advance_to_next()?);
    assert_eq!(reader.tag_start_offset(), 0);
    assert!(reader.advance_to_next()?);
    // Type byte, name length and "hello world".
    assert_eq!(reader.tag_start_offset(), 14);
    assert_eq!(reader.read_value()?, Value::String("Bananarama".to_owned()));
    Ok(())
}

#[test]
fn materialize_duplicate_names_fails() {
    let bytes = Builder::new()
        .start_compound("root")
        .start_compound("inner")
        .int("x", 1)
        .int("x", 2)
        .end_compound()
        .end_compound()
        .build();
    let mut buf = Buffer::from_vec(bytes);
    let mut reader = NbtReader::new(&mut buf);
    let err = reader.materialize_as_tag().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    assert!(reader.is_in_error_state());
}
