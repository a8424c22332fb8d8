//! Class parser: parses a `{...}` value against a `ClassSchema`.
//!
//! The common case — document member order matches declaration order — is
//! handled by a sequential match against the next expected member, with no
//! hashing beyond a single comparison. A member that doesn't arrive in its
//! expected turn is parked in a side table keyed by its name hash; once the
//! sequential scan of the object finishes, any schema member still unfilled
//! is looked up there and parsed from its cached span.

use crate::cursor::Cursor;
use crate::error::{Error, Reason, Result};
use crate::policy::ForceFullNameCheck;
use crate::primitive::string;
use crate::schema::{fnv1a64, ClassSchema};
use crate::skip;
use fxhash::FxHashMap;

/// One out-of-order member's recorded location: the name's byte span (kept
/// only to defend against a hash collision) and the value's start offset.
struct Parked {
    name_start: usize,
    name_end: usize,
    value_start: usize,
}

pub fn parse_class<'i, C: ClassSchema<'i>>(cursor: &mut Cursor<'i>) -> Result<C> {
    let members = C::MEMBERS;
    let mut builder = C::Builder::default();
    let mut filled = vec![false; members.len()];
    let mut expect_index = 0usize;
    let mut side_table: FxHashMap<u64, Parked> = FxHashMap::default();

    cursor.consume(b'{')?;
    cursor.skip_whitespace()?;

    if cursor.peek() == Some(b'}') {
        cursor.advance(1);
    } else {
        loop {
            cursor.skip_whitespace()?;
            let name_start = cursor.offset();
            let name = string::scan_raw(cursor)?;
            let name_end = name_start + name.len() + 2; // + the two quote bytes
            cursor.skip_whitespace()?;
            cursor.consume(b':')?;
            cursor.skip_whitespace()?;

            let hash = fnv1a64(name.as_bytes());
            let is_expected = expect_index < members.len() && members[expect_index].hash == hash && {
                let expected = members[expect_index].name;
                if C::HAS_HASH_COLLISION || cursor.policy().force_full_name_check() == ForceFullNameCheck::Yes {
                    expected == name
                } else {
                    expected.len() == name.len()
                }
            };

            if is_expected {
                C::parse_member(&mut builder, expect_index, cursor)?;
                filled[expect_index] = true;
                expect_index += 1;
            } else {
                let value_start = cursor.offset();
                skip::skip_value(cursor)?;
                // First occurrence wins: a later duplicate under the same
                // hash must not overwrite an already-parked span.
                side_table.entry(hash).or_insert(Parked {
                    name_start,
                    name_end,
                    value_start,
                });
            }

            cursor.skip_whitespace()?;
            match cursor.require_peek()? {
                b',' => cursor.advance(1),
                b'}' => {
                    cursor.advance(1);
                    break;
                }
                _ => return Err(Error::new(Reason::ExpectedToken(b'}'), cursor.offset())),
            }
        }
    }

    for (i, member) in members.iter().enumerate() {
        if filled[i] {
            continue;
        }
        if let Some(parked) = side_table.get(&member.hash) {
            let name_matches = !C::HAS_HASH_COLLISION
                || &cursor.document()[parked.name_start + 1..parked.name_end - 1] == member.name.as_bytes();
            if name_matches {
                let mut sub = Cursor::new(cursor.document(), cursor.policy());
                sub.set_offset(parked.value_start);
                C::parse_member(&mut builder, i, &mut sub)?;
                filled[i] = true;
            }
        }
    }

    let missing: Vec<usize> = (0..members.len()).filter(|&i| !filled[i]).collect();
    C::finish(builder, &missing)
}
