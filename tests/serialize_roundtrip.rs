//! Checks that our serializer's output is valid JSON a generic parser
//! accepts, and that our own parser reads it back to an equal value — the
//! serializer makes no claim about *byte-identical* re-serialization
//! (key order is canonical, not necessarily input order), only about
//! validity and round-trip fidelity.

use shapejson::schema::{parse_class, Member, Schema};
use shapejson::serialize::{nullable_present, serialize_class, Serialize, SerializeClass};
use shapejson::{parse, serialize, Policy};

struct Coord {
    lat: f64,
    lon: f64,
    label: Option<String>,
}

#[derive(Default)]
struct CoordBuilder {
    lat: Option<f64>,
    lon: Option<f64>,
    label: Option<Option<String>>,
}

impl<'i> shapejson::ClassSchema<'i> for Coord {
    const MEMBERS: &'static [Member] = &[Member::new("lat"), Member::new("lon"), Member::new("label")];
    type Builder = CoordBuilder;

    fn parse_member(
        builder: &mut CoordBuilder,
        index: usize,
        cursor: &mut shapejson::Cursor<'i>,
    ) -> shapejson::Result<()> {
        match index {
            0 => builder.lat = Some(f64::parse(cursor)?),
            1 => builder.lon = Some(f64::parse(cursor)?),
            2 => builder.label = Some(Option::<String>::parse(cursor)?),
            _ => unreachable!(),
        }
        Ok(())
    }

    fn finish(builder: CoordBuilder, _missing: &[usize]) -> shapejson::Result<Self> {
        Ok(Coord {
            lat: builder.lat.unwrap_or_default(),
            lon: builder.lon.unwrap_or_default(),
            label: builder.label.unwrap_or(None),
        })
    }
}

impl<'i> Schema<'i> for Coord {
    fn parse(cursor: &mut shapejson::Cursor<'i>) -> shapejson::Result<Self> {
        parse_class(cursor)
    }
}

impl SerializeClass for Coord {
    const MEMBERS: &'static [Member] = &[Member::new("lat"), Member::new("lon"), Member::new("label")];

    fn serialize_member<W: shapejson::serialize::Sink + ?Sized>(
        &self,
        index: usize,
        sink: &mut W,
    ) -> std::fmt::Result {
        match index {
            0 => self.lat.serialize(sink),
            1 => self.lon.serialize(sink),
            2 => self.label.serialize(sink),
            _ => unreachable!(),
        }
    }

    fn member_present(&self, index: usize) -> bool {
        match index {
            2 => nullable_present(&self.label),
            _ => true,
        }
    }
}

impl Serialize for Coord {
    fn serialize<W: shapejson::serialize::Sink + ?Sized>(&self, sink: &mut W) -> std::fmt::Result {
        serialize_class(self, sink)
    }
}

#[test]
fn serialized_class_is_accepted_by_a_generic_json_parser() {
    let c = Coord {
        lat: 45.5,
        lon: -122.6,
        label: None,
    };
    let text = serialize(&c);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, serde_json::json!({"lat": 45.5, "lon": -122.6}));
}

#[test]
fn serialized_class_round_trips_through_our_own_parser() {
    let c = Coord {
        lat: 1.0,
        lon: 2.0,
        label: Some("home".to_string()),
    };
    let text = serialize(&c);
    let back: Coord = parse(text.as_bytes(), Policy::new()).unwrap();
    assert_eq!(back.lat, 1.0);
    assert_eq!(back.lon, 2.0);
    assert_eq!(back.label.as_deref(), Some("home"));
}

#[test]
fn nested_vec_of_classes_serializes_and_reparses() {
    let points = vec![
        Coord {
            lat: 1.0,
            lon: 1.0,
            label: None,
        },
        Coord {
            lat: 2.0,
            lon: 2.0,
            label: Some("b".to_string()),
        },
    ];
    let text = serialize(&points);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value.is_array());
    assert_eq!(value[0].as_object().unwrap().len(), 2);
    assert_eq!(value[1].as_object().unwrap().len(), 3);
}
