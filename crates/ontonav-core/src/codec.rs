//! Text encoding of places for URL fragments.
//!
//! A fragment has the form `ProjectViewPlace:<token>` where the token is
//!
//! ```text
//! token      = field "/" field "/" count *( "/" item )
//! count      = "0" / ( %x31-39 *DIGIT )
//! item       = entity-tag "(" field ")"
//! field      = 1*( unreserved / pct-encoded )
//! unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
//! ```
//!
//! The first field is the project id, the second the perspective id, `count`
//! is the number of selected entities, and each item is one selected entity in
//! selection order. The count makes the grammar prefix-free: a token cut
//! anywhere short of its end never decodes. Every byte of a field
//! outside `unreserved` is percent-encoded (UTF-8, uppercase hex), so the
//! delimiters `/`, `(`, `)` and `:` never appear raw inside a field.
//!
//! Shared links depend on this format; it must not change.

use std::borrow::Cow;

use ontonav_model::{EntityRef, EntityType, PerspectiveId, Place, ProjectId, Selection};
use tracing::{debug, trace};
use url::Url;

use crate::CodecError;

/// Literal naming the place type in a fragment.
pub const PLACE_KIND: &str = "ProjectViewPlace";

const KIND_SEPARATOR: char = ':';
const SEGMENT_SEPARATOR: char = '/';
const ITEM_OPEN: char = '(';
const ITEM_CLOSE: char = ')';

/// Converts places to tokens and back.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceCodec;

impl PlaceCodec {
    pub const fn new() -> Self {
        Self
    }

    /// Encodes `place` as a token (the fragment without the place kind).
    #[must_use]
    pub fn encode(&self, place: &Place) -> String {
        let mut token = String::new();
        token.push_str(&encode_field(place.project_id().as_str()));
        token.push(SEGMENT_SEPARATOR);
        token.push_str(&encode_field(place.perspective_id().as_str()));
        token.push(SEGMENT_SEPARATOR);
        token.push_str(&place.selection().len().to_string());
        for entity in place.selection() {
            token.push(SEGMENT_SEPARATOR);
            token.push_str(entity.entity_type().tag());
            token.push(ITEM_OPEN);
            token.push_str(&encode_field(entity.iri()));
            token.push(ITEM_CLOSE);
        }
        trace!(
            project = %place.project_id(),
            selected = place.selection().len(),
            "encoded place"
        );
        token
    }

    /// Encodes `place` as a complete fragment, `ProjectViewPlace:<token>`.
    #[must_use]
    pub fn encode_fragment(&self, place: &Place) -> String {
        format!("{PLACE_KIND}{KIND_SEPARATOR}{}", self.encode(place))
    }

    /// Decodes a token produced by [`PlaceCodec::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::MalformedPlaceToken`] when the token does not
    /// follow the grammar. No partial place is ever returned.
    pub fn decode(&self, token: &str) -> Result<Place, CodecError> {
        parse_token(token).map_err(|reason| {
            debug!(reason = %reason, token_len = token.len(), "rejected place token");
            CodecError::malformed(token, reason)
        })
    }

    /// Decodes a full fragment. A leading `#` is tolerated.
    ///
    /// # Errors
    ///
    /// Fails when the place kind is missing or different, or when the token
    /// after it is malformed.
    pub fn decode_fragment(&self, fragment: &str) -> Result<Place, CodecError> {
        let body = fragment.strip_prefix('#').unwrap_or(fragment);
        let Some((kind, token)) = body.split_once(KIND_SEPARATOR) else {
            return Err(CodecError::malformed(
                fragment,
                format!("missing `{PLACE_KIND}{KIND_SEPARATOR}` prefix"),
            ));
        };
        if kind != PLACE_KIND {
            return Err(CodecError::malformed(
                fragment,
                format!("unsupported place kind {kind:?}"),
            ));
        }
        if token.is_empty() {
            return Err(CodecError::malformed(fragment, "place body is empty"));
        }
        self.decode(token)
    }

    /// Decodes the place carried in the fragment of an absolute URL.
    ///
    /// # Errors
    ///
    /// Fails when `url` is not an absolute URL, has no fragment, or the
    /// fragment is malformed.
    pub fn decode_url(&self, url: &str) -> Result<Place, CodecError> {
        let parsed =
            Url::parse(url).map_err(|e| CodecError::malformed(url, format!("invalid URL: {e}")))?;
        match parsed.fragment() {
            Some(fragment) => self.decode_fragment(fragment),
            None => Err(CodecError::malformed(url, "URL has no fragment")),
        }
    }
}

fn encode_field(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

fn parse_token(token: &str) -> Result<Place, String> {
    if token.is_empty() {
        return Err("token is empty".to_string());
    }
    let mut segments = token.split(SEGMENT_SEPARATOR);

    let project = segments.next().unwrap_or_default();
    let project_id = decode_field(project, "project id")
        .and_then(|raw| exact_id(raw, ProjectId::new, "project id"))?;

    let perspective = segments
        .next()
        .ok_or_else(|| "missing perspective id".to_string())?;
    let perspective_id = decode_field(perspective, "perspective id")
        .and_then(|raw| exact_id(raw, PerspectiveId::new, "perspective id"))?;

    let count = segments
        .next()
        .ok_or_else(|| "missing item count".to_string())
        .and_then(parse_count)?;

    let mut entities: Vec<EntityRef> = Vec::new();
    for (index, segment) in segments.enumerate() {
        let entity = parse_item(segment).map_err(|reason| format!("item {index}: {reason}"))?;
        if entities.contains(&entity) {
            return Err(format!("item {index}: duplicate entity {entity}"));
        }
        entities.push(entity);
    }
    if entities.len() != count {
        return Err(format!(
            "item count is {count} but {} items follow",
            entities.len()
        ));
    }
    let selection: Selection = entities.into_iter().collect();

    Ok(Place::new(project_id, perspective_id, selection))
}

fn parse_count(raw: &str) -> Result<usize, String> {
    if raw.is_empty() {
        return Err("empty item count".to_string());
    }
    let canonical = raw == "0" || !raw.starts_with('0');
    if !canonical || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid item count {raw:?}"));
    }
    raw.parse::<usize>()
        .map_err(|_| format!("invalid item count {raw:?}"))
}

/// Builds an id and insists it kept the decoded text unchanged, so padded ids
/// are rejected instead of silently trimmed.
fn exact_id<T, E>(
    raw: String,
    make: impl FnOnce(String) -> Result<T, E>,
    what: &str,
) -> Result<T, String>
where
    T: AsRef<str>,
{
    match make(raw.clone()) {
        Ok(id) if id.as_ref() == raw => Ok(id),
        Ok(_) => Err(format!("{what} has surrounding whitespace")),
        Err(_) => Err(format!("{what} is blank")),
    }
}

fn parse_item(segment: &str) -> Result<EntityRef, String> {
    if segment.is_empty() {
        return Err("empty segment".to_string());
    }
    let inner = segment
        .strip_suffix(ITEM_CLOSE)
        .ok_or_else(|| format!("expected `Tag(iri)`, found {segment:?}"))?;
    let (tag, field) = inner
        .split_once(ITEM_OPEN)
        .ok_or_else(|| format!("expected `Tag(iri)`, found {segment:?}"))?;
    let entity_type = tag
        .parse::<EntityType>()
        .map_err(|_| format!("unknown entity type {tag:?}"))?;
    let iri = decode_field(field, "entity IRI")?;
    EntityRef::new(entity_type, iri).map_err(|e| e.to_string())
}

fn decode_field(raw: &str, what: &str) -> Result<String, String> {
    if raw.is_empty() {
        return Err(format!("empty {what}"));
    }
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b if is_unreserved(b) => i += 1,
            b'%' => {
                let escape = bytes.get(i + 1..i + 3);
                match escape {
                    Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                    _ => return Err(format!("bad percent escape in {what}")),
                }
            }
            b => {
                return Err(format!(
                    "unexpected character {:?} in {what}",
                    char::from(b)
                ));
            }
        }
    }
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .map_err(|_| format!("{what} is not valid UTF-8"))
}

const fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(project: &str, perspective: &str, entities: &[(EntityType, &str)]) -> Place {
        let selection = entities
            .iter()
            .map(|(t, iri)| EntityRef::new(*t, *iri).unwrap())
            .collect();
        Place::new(
            ProjectId::new(project).unwrap(),
            PerspectiveId::new(perspective).unwrap(),
            selection,
        )
    }

    fn reason(result: Result<Place, CodecError>) -> String {
        match result {
            Err(CodecError::MalformedPlaceToken { reason, .. }) => reason,
            Ok(place) => panic!("expected rejection, decoded {place:?}"),
        }
    }

    #[test]
    fn encodes_empty_selection() {
        let token = PlaceCodec.encode(&place("proj-1", "Classes", &[]));
        assert_eq!(token, "proj-1/Classes/0");
    }

    #[test]
    fn encodes_entities_in_order() {
        let token = PlaceCodec.encode(&place(
            "proj-1",
            "Properties",
            &[
                (EntityType::ObjectProperty, "http://ex.org#eats"),
                (EntityType::Class, "http://ex.org#Cat"),
            ],
        ));
        assert_eq!(
            token,
            "proj-1/Properties/2/ObjectProperty(http%3A%2F%2Fex.org%23eats)/Class(http%3A%2F%2Fex.org%23Cat)"
        );
    }

    #[test]
    fn delimiters_inside_fields_are_escaped() {
        let token = PlaceCodec.encode(&place("a/b:c", "My (view)", &[]));
        assert_eq!(token, "a%2Fb%3Ac/My%20%28view%29/0");
        assert_eq!(
            PlaceCodec.decode(&token).unwrap(),
            place("a/b:c", "My (view)", &[])
        );
    }

    #[test]
    fn lowercase_escapes_are_accepted() {
        let decoded = PlaceCodec.decode("p/Classes/1/Class(a%2fb)").unwrap();
        assert_eq!(decoded.selection().first().unwrap().iri(), "a/b");
    }

    #[test]
    fn fragment_has_place_kind() {
        let fragment = PlaceCodec.encode_fragment(&place("p", "Classes", &[]));
        assert_eq!(fragment, "ProjectViewPlace:p/Classes/0");
        assert_eq!(
            PlaceCodec.decode_fragment(&fragment).unwrap(),
            place("p", "Classes", &[])
        );
        assert_eq!(
            PlaceCodec
                .decode_fragment("#ProjectViewPlace:p/Classes/0")
                .unwrap(),
            place("p", "Classes", &[])
        );
    }

    #[test]
    fn rejects_structural_errors() {
        assert_eq!(reason(PlaceCodec.decode("")), "token is empty");
        assert_eq!(reason(PlaceCodec.decode("proj-1")), "missing perspective id");
        assert_eq!(reason(PlaceCodec.decode("proj-1/")), "empty perspective id");
        assert_eq!(reason(PlaceCodec.decode("/Classes/0")), "empty project id");
        assert_eq!(
            reason(PlaceCodec.decode("proj-1/Classes/0/")),
            "item 0: empty segment"
        );
        assert_eq!(
            reason(PlaceCodec.decode("proj-1/Classes/1//Class(a)")),
            "item 0: empty segment"
        );
    }

    #[test]
    fn rejects_truncated_tokens() {
        let token = PlaceCodec.encode(&place(
            "proj-1",
            "Classes",
            &[
                (EntityType::Class, "http://ex.org#Cat"),
                (EntityType::Class, "http://ex.org#Dog"),
            ],
        ));
        assert_eq!(reason(PlaceCodec.decode("proj-1/Clas")), "missing item count");
        assert_eq!(reason(PlaceCodec.decode("proj-1/Cl")), "missing item count");
        assert_eq!(reason(PlaceCodec.decode("proj-1/Classes/")), "empty item count");
        let without_last = &token[..token.rfind('/').unwrap()];
        assert_eq!(
            reason(PlaceCodec.decode(without_last)),
            "item count is 2 but 1 items follow"
        );
    }

    #[test]
    fn rejects_bad_item_counts() {
        assert_eq!(
            reason(PlaceCodec.decode("p/Classes/01/Class(a)")),
            "invalid item count \"01\""
        );
        assert_eq!(
            reason(PlaceCodec.decode("p/Classes/+1/Class(a)")),
            "invalid item count \"+1\""
        );
        assert_eq!(
            reason(PlaceCodec.decode("p/Classes/Class(a)")),
            "invalid item count \"Class(a)\""
        );
        assert_eq!(
            reason(PlaceCodec.decode("p/Classes/0/Class(a)")),
            "item count is 0 but 1 items follow"
        );
    }

    #[test]
    fn rejects_bad_items() {
        assert_eq!(
            reason(PlaceCodec.decode("p/Classes/1/Widget(a)")),
            "item 0: unknown entity type \"Widget\""
        );
        assert_eq!(
            reason(PlaceCodec.decode("p/Classes/1/Class(a")),
            "item 0: expected `Tag(iri)`, found \"Class(a\""
        );
        assert_eq!(
            reason(PlaceCodec.decode("p/Classes/1/Class()")),
            "item 0: empty entity IRI"
        );
        assert_eq!(
            reason(PlaceCodec.decode("p/Classes/2/Class(a)/Class(a)")),
            "item 1: duplicate entity Class(<a>)"
        );
    }

    #[test]
    fn rejects_unescaped_and_invalid_bytes() {
        assert_eq!(
            reason(PlaceCodec.decode("p:q/Classes/0")),
            "unexpected character ':' in project id"
        );
        assert_eq!(
            reason(PlaceCodec.decode("p/Classes/1/Class(a(b))")),
            "item 0: unexpected character '(' in entity IRI"
        );
        assert_eq!(
            reason(PlaceCodec.decode("p/Cla%2/0")),
            "bad percent escape in perspective id"
        );
        assert_eq!(
            reason(PlaceCodec.decode("p/Classes/1/Class(%FF)")),
            "item 0: entity IRI is not valid UTF-8"
        );
    }

    #[test]
    fn rejects_padded_ids() {
        assert_eq!(
            reason(PlaceCodec.decode("%20p/Classes/0")),
            "project id has surrounding whitespace"
        );
        assert_eq!(
            reason(PlaceCodec.decode("p/%20/0")),
            "perspective id is blank"
        );
    }

    #[test]
    fn rejects_bad_fragments() {
        assert_eq!(
            reason(PlaceCodec.decode_fragment("ProjectViewPlace:")),
            "place body is empty"
        );
        assert_eq!(
            reason(PlaceCodec.decode_fragment("p/Classes/0")),
            "missing `ProjectViewPlace:` prefix"
        );
        assert_eq!(
            reason(PlaceCodec.decode_fragment("OtherPlace:p/Classes/0")),
            "unsupported place kind \"OtherPlace\""
        );
    }

    #[test]
    fn decodes_from_url() {
        let decoded = PlaceCodec
            .decode_url("http://example.org/app#ProjectViewPlace:proj-1/Classes/1/Class(x)")
            .unwrap();
        assert_eq!(decoded, place("proj-1", "Classes", &[(EntityType::Class, "x")]));
        assert_eq!(
            reason(PlaceCodec.decode_url("http://example.org/app")),
            "URL has no fragment"
        );
    }
}
