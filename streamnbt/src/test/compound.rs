use crate::{Compound, ErrorKind, List, Result, Tag, TagType, Value};

#[test]
fn from_tags_keeps_order() -> Result<()> {
    let compound = Compound::from_tags(vec![
        Tag::named("c", 1i32),
        Tag::named("a", 2i32),
        Tag::named("b", 3i32),
    ])?;
    assert_eq!(compound.names().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    assert_eq!(compound.index_of("a"), Some(1));
    Ok(())
}

#[test]
fn from_tags_rejects_unnamed_and_duplicates() {
    let err = Compound::from_tags(vec![Tag::named("a", 1i8), Tag::unnamed(2i8)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);

    let err = Compound::from_tags(vec![Tag::named("a", 1i8), Tag::named("a", 2i8)]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
}

#[test]
fn failed_append_leaves_compound_unchanged() -> Result<()> {
    let mut compound = Compound::new();
    compound.append(Tag::named("Foo", 1i32))?;

    assert!(compound.append(Tag::named("Foo", 2i8)).is_err());
    assert!(compound.append(Tag::unnamed(3i32)).is_err());

    assert_eq!(compound.len(), 1);
    assert_eq!(compound.get("Foo").unwrap().value(), &Value::Int(1));
    Ok(())
}

#[test]
fn extend_stops_at_first_bad_tag() -> Result<()> {
    let mut compound = Compound::from_tags(vec![Tag::named("a", 1i8)])?;
    let err = compound
        .extend(vec![
            Tag::named("b", 2i8),
            Tag::named("a", 3i8),
            Tag::named("c", 4i8),
        ])
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Argument);
    assert_eq!(compound.names().collect::<Vec<_>>(), vec!["a", "b"]);
    Ok(())
}

#[test]
fn insert_replaces_in_place() -> Result<()> {
    let mut compound = Compound::from_tags(vec![
        Tag::named("first", 1i32),
        Tag::named("second", 2i32),
        Tag::named("third", 3i32),
    ])?;

    let old = compound.insert(Tag::named("second", "two"))?;
    assert_eq!(old, Some(Tag::named("second", 2i32)));
    assert_eq!(compound.index_of("second"), Some(1));
    assert_eq!(compound.get("second").unwrap().tag_type(), TagType::String);

    assert_eq!(compound.insert(Tag::named("fourth", 4i32))?, None);
    assert_eq!(compound.len(), 4);

    assert!(compound.insert(Tag::unnamed(5i32)).is_err());
    Ok(())
}

#[test]
fn get_mut_changes_value_only() -> Result<()> {
    let mut compound = Compound::from_tags(vec![Tag::named("x", 1i32)])?;
    *compound.get_mut("x").unwrap() = Value::Long(10);
    assert_eq!(compound.get("x").unwrap(), &Tag::named("x", 10i64));
    assert!(compound.get_mut("y").is_none());
    Ok(())
}

#[test]
fn removed_tag_can_move_to_another_compound() -> Result<()> {
    let mut a = Compound::from_tags(vec![Tag::named("one", 1i32), Tag::named("two", 2i32)])?;
    let mut b = Compound::new();

    let tag = a.remove("one").unwrap();
    assert_eq!(tag.name(), Some("one"));
    assert!(!a.contains("one"));
    assert_eq!(a.index_of("two"), Some(0));

    b.append(tag)?;
    assert!(b.contains("one"));
    assert!(a.remove("one").is_none());
    Ok(())
}

#[test]
fn rename() -> Result<()> {
    let mut compound = Compound::from_tags(vec![
        Tag::named("a", 1i32),
        Tag::named("b", 2i32),
        Tag::named("c", 3i32),
    ])?;

    compound.rename("b", "renamed")?;
    assert_eq!(compound.names().collect::<Vec<_>>(), vec!["a", "renamed", "c"]);
    assert_eq!(compound.get("renamed").unwrap().name(), Some("renamed"));
    assert!(compound.get("b").is_none());

    // Renaming to the current name is a no-op.
    compound.rename("a", "a")?;

    let err = compound.rename("a", "c").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
    let err = compound.rename("missing", "x").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
    assert_eq!(compound.len(), 3);
    Ok(())
}

#[test]
fn nested_edit_through_tag() -> Result<()> {
    let mut root = Tag::compound("root");
    let mut child = Tag::list("numbers", TagType::Int)?;
    child.as_list_mut().unwrap().append(Tag::unnamed(7i32))?;
    root.as_compound_mut().unwrap().append(child)?;

    let numbers = root
        .as_compound_mut()
        .unwrap()
        .get_mut("numbers")
        .and_then(Value::as_list_mut)
        .unwrap();
    numbers.append(Tag::unnamed(8i32))?;

    assert_eq!(root.get("numbers").unwrap().at(1).unwrap().value(), &Value::Int(8));
    Ok(())
}

#[test]
fn iteration_and_clear() -> Result<()> {
    let mut compound = Compound::from_tags(vec![Tag::named("a", 1i32), Tag::named("b", 2i32)])?;
    for (_, value) in compound.iter_mut() {
        if let Value::Int(v) = value {
            *v *= 10;
        }
    }
    let values: Vec<_> = compound.iter().map(|t| t.value().as_i64()).collect();
    assert_eq!(values, vec![Some(10), Some(20)]);

    let owned: Vec<Tag> = compound.clone().into_iter().collect();
    assert_eq!(owned[1], Tag::named("b", 20i32));

    compound.remove_all();
    assert!(compound.is_empty());
    Ok(())
}

#[test]
fn clone_is_deep() -> Result<()> {
    let list = List::from_tags(vec![Tag::unnamed(1i8)])?;
    let mut original = Compound::from_tags(vec![Tag::named("list", list)])?;
    let copy = original.clone();

    original
        .get_mut("list")
        .and_then(Value::as_list_mut)
        .unwrap()
        .append(Tag::unnamed(2i8))?;

    assert_eq!(copy.get("list").unwrap().as_list().unwrap().len(), 1);
    assert_eq!(original.get("list").unwrap().as_list().unwrap().len(), 2);
    Ok(())
}
