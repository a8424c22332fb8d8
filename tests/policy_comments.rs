use shapejson::policy::{Checked, Comments};
use shapejson::{parse, Policy};

#[test]
fn cpp_comments_are_rejected_unless_enabled() {
    let doc = b"// a leading comment\n42";
    let default_result: shapejson::Result<u32> = parse(doc, Policy::new());
    assert!(default_result.is_err());

    let lenient = Policy::new().with_comments(Comments::Cpp);
    let value: u32 = parse(doc, lenient).unwrap();
    assert_eq!(value, 42);
}

#[test]
fn checked_mode_rejects_a_leading_zero() {
    let doc = b"007";
    let strict: shapejson::Result<u32> = parse(doc, Policy::new());
    assert!(strict.is_err());

    let lenient = Policy::new().with_checked(Checked::No);
    let value: u32 = parse(doc, lenient).unwrap();
    assert_eq!(value, 7);
}

#[test]
fn hash_comments_need_their_own_policy_bit() {
    let doc = b"# count of widgets\n3";
    let hashable = Policy::new().with_comments(Comments::Hash);
    let value: u32 = parse(doc, hashable).unwrap();
    assert_eq!(value, 3);

    // The cpp dialect doesn't recognize '#' as a comment opener.
    let cpp_only = Policy::new().with_comments(Comments::Cpp);
    let result: shapejson::Result<u32> = parse(doc, cpp_only);
    assert!(result.is_err());
}
