//! Round-trip and rejection properties of the place codec.

use ontonav_core::{CodecError, PlaceCodec};
use ontonav_model::{EntityRef, EntityType, PerspectiveId, Place, ProjectId, Selection};
use proptest::prelude::*;

fn id_text() -> impl Strategy<Value = String> {
    // Ids are stored trimmed, so padded candidates are not representable.
    any::<String>().prop_filter("blank or padded", |s| !s.is_empty() && s.trim() == s)
}

fn entity() -> impl Strategy<Value = EntityRef> {
    (
        prop::sample::select(EntityType::ALL.to_vec()),
        any::<String>().prop_filter("empty iri", |s| !s.is_empty()),
    )
        .prop_map(|(entity_type, iri)| EntityRef::new(entity_type, iri).unwrap())
}

fn place() -> impl Strategy<Value = Place> {
    (
        id_text(),
        id_text(),
        prop::collection::vec(entity(), 0..5),
    )
        .prop_map(|(project, perspective, entities)| {
            Place::new(
                ProjectId::new(project).unwrap(),
                PerspectiveId::new(perspective).unwrap(),
                entities.into_iter().collect(),
            )
        })
}

proptest! {
    #[test]
    fn decode_inverts_encode(place in place()) {
        let token = PlaceCodec.encode(&place);
        prop_assert_eq!(PlaceCodec.decode(&token), Ok(place.clone()));
        let fragment = PlaceCodec.encode_fragment(&place);
        prop_assert_eq!(PlaceCodec.decode_fragment(&fragment), Ok(place));
    }

    #[test]
    fn tokens_only_use_url_safe_characters(place in place()) {
        let token = PlaceCodec.encode(&place);
        prop_assert!(token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"-._~%/()".contains(&b)));
    }

    #[test]
    fn equal_tokens_iff_equal_places(a in place(), b in place()) {
        prop_assert_eq!(a == b, PlaceCodec.encode(&a) == PlaceCodec.encode(&b));
    }

    #[test]
    fn rebuilt_place_encodes_identically(place in place()) {
        let rebuilt = Place::new(
            place.project_id().clone(),
            place.perspective_id().clone(),
            place.selection().iter().cloned().collect(),
        );
        prop_assert_eq!(&rebuilt, &place);
        prop_assert_eq!(PlaceCodec.encode(&rebuilt), PlaceCodec.encode(&place));
    }

    #[test]
    fn reordered_selection_changes_token(place in place()) {
        let reversed: Selection = place.selection().iter().rev().cloned().collect();
        let reordered = place.with_selection(reversed);
        let same_place = reordered == place;
        prop_assert_eq!(same_place, place.selection().len() < 2);
        prop_assert_eq!(
            same_place,
            PlaceCodec.encode(&reordered) == PlaceCodec.encode(&place)
        );
    }

    #[test]
    fn every_proper_prefix_is_rejected(place in place()) {
        let token = PlaceCodec.encode(&place);
        for cut in 0..token.len() {
            let prefix = &token[..cut];
            let result = PlaceCodec.decode(prefix);
            prop_assert!(
                matches!(result, Err(CodecError::MalformedPlaceToken { .. })),
                "prefix {:?} decoded to {:?}",
                prefix,
                result
            );
        }
    }
}

fn cat() -> EntityRef {
    EntityRef::new(EntityType::Class, "http://ex.org#Cat").unwrap()
}

fn dog() -> EntityRef {
    EntityRef::new(EntityType::Class, "http://ex.org#Dog").unwrap()
}

#[test]
fn truncated_selection_is_rejected() {
    let place = Place::new(
        ProjectId::new("proj-1").unwrap(),
        PerspectiveId::default(),
        Selection::builder().add(cat()).add(dog()).build(),
    );
    let token = PlaceCodec.encode(&place);
    for prefix in ["proj-1/Clas", "proj-1/Cl", "proj-1/Classes"] {
        assert!(PlaceCodec.decode(prefix).is_err(), "{prefix:?} decoded");
    }
    let without_dog = &token[..token.rfind('/').unwrap()];
    assert!(PlaceCodec.decode(without_dog).is_err());
}

#[test]
fn selection_order_is_kept_in_token() {
    let place = Place::new(
        ProjectId::new("proj-1").unwrap(),
        PerspectiveId::default(),
        Selection::builder().add(cat()).add(dog()).build(),
    );
    let token = PlaceCodec.encode(&place);
    let cat_at = token.find("Cat").unwrap();
    let dog_at = token.find("Dog").unwrap();
    assert!(cat_at < dog_at);

    let decoded = PlaceCodec.decode(&token).unwrap();
    let order: Vec<_> = decoded.selection().iter().cloned().collect();
    assert_eq!(order, vec![cat(), dog()]);
}

#[test]
fn reordered_selections_encode_differently() {
    let project = ProjectId::new("proj-1").unwrap();
    let ab = Place::new(
        project.clone(),
        PerspectiveId::default(),
        Selection::builder().add(cat()).add(dog()).build(),
    );
    let ba = Place::new(
        project,
        PerspectiveId::default(),
        Selection::builder().add(dog()).add(cat()).build(),
    );
    assert_ne!(ab, ba);
    assert_ne!(PlaceCodec.encode(&ab), PlaceCodec.encode(&ba));
}

#[test]
fn canonical_fragment_text() {
    let place = Place::new(
        ProjectId::new("proj-1").unwrap(),
        PerspectiveId::new("Individuals").unwrap(),
        Selection::builder()
            .add(EntityRef::new(EntityType::NamedIndividual, "http://ex.org#felix").unwrap())
            .add(EntityRef::new(EntityType::DataProperty, "urn:x:age in years").unwrap())
            .build(),
    );
    insta::assert_snapshot!(
        PlaceCodec.encode_fragment(&place),
        @"ProjectViewPlace:proj-1/Individuals/2/NamedIndividual(http%3A%2F%2Fex.org%23felix)/DataProperty(urn%3Ax%3Aage%20in%20years)"
    );
}

#[test]
fn malformed_tokens_are_rejected() {
    let cases = [
        "",
        "proj-1",
        "proj-1/Classes",
        "proj-1/Classes/",
        "proj-1/Classes/0/",
        "proj-1//Classes/0",
        "proj-1/Classes/1/Thing(http%3A%2F%2Fex.org%23Cat)",
        "proj-1/Classes/1/Class",
        "proj-1/Classes/1/Class(a)b",
        "proj 1/Classes/0",
        "proj-1/Classes/2/Class(a)/Class(a)",
        "proj-1/Classes/2/Class(a)",
        "proj-1/Classes/1/Class(a)/Class(b)",
    ];
    for token in cases {
        let result = PlaceCodec.decode(token);
        assert!(
            matches!(result, Err(CodecError::MalformedPlaceToken { .. })),
            "{token:?} decoded to {result:?}"
        );
    }
}

#[test]
fn empty_fragment_body_is_rejected() {
    let result = PlaceCodec.decode_fragment("ProjectViewPlace:");
    assert!(matches!(
        result,
        Err(CodecError::MalformedPlaceToken { .. })
    ));
}

#[test]
fn unicode_identifiers_round_trip() {
    let place = Place::new(
        ProjectId::new("projet-é").unwrap(),
        PerspectiveId::new("Klassen").unwrap(),
        Selection::of(EntityRef::new(EntityType::Class, "http://ex.org#Käse").unwrap()),
    );
    let token = PlaceCodec.encode(&place);
    assert_eq!(
        token,
        "projet-%C3%A9/Klassen/1/Class(http%3A%2F%2Fex.org%23K%C3%A4se)"
    );
    assert_eq!(PlaceCodec.decode(&token).unwrap(), place);
}
