// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The keyword and command tables must equal the hash of their spellings.

use std::collections::HashSet;

use ldraw_core::{hash_i, CommandId, Keyword};

#[test]
fn every_keyword_is_the_hash_of_its_name() {
    for kw in Keyword::ALL {
        assert_eq!(kw.hash(), hash_i(kw.name()), "{kw}");
        assert_eq!(*kw as u32, hash_i(&kw.name().to_lowercase()), "{kw}");
    }
}

#[test]
fn every_command_id_is_the_hash_of_its_name() {
    for id in CommandId::ALL {
        assert_eq!(id.hash(), hash_i(id.name()), "{id}");
        assert_eq!(CommandId::from_hash(id.hash()), Some(*id));
    }
}

#[test]
fn tables_have_no_duplicate_hashes() {
    let kw: HashSet<u32> = Keyword::ALL.iter().map(|k| k.hash()).collect();
    assert_eq!(kw.len(), Keyword::ALL.len());
    let cmd: HashSet<u32> = CommandId::ALL.iter().map(|c| c.hash()).collect();
    assert_eq!(cmd.len(), CommandId::ALL.len());
}

#[test]
fn published_values() {
    // Decimal values are the reference; cross-checked against the FNV1a
    // definition with a lowercase ASCII input.
    let table: &[(&str, u32)] = &[
        ("Point", 414_084_241),
        ("Box", 1_892_056_626),
        ("Group", 1_605_967_500),
        ("Polygon", 85_768_329),
        ("Commands", 3_062_934_995),
        ("Data", 3_631_407_781),
        ("Pos", 1_412_654_217),
        ("M4x4", 3_279_345_952),
        ("Colour", 33_939_709),
    ];
    for (name, value) in table {
        assert_eq!(Keyword::from_name(name).map(Keyword::hash), Some(*value), "{name}");
    }
    assert_eq!(CommandId::AddToScene.hash(), 3_734_185_163);
    assert_eq!(CommandId::ObjectToWorld.hash(), 1_059_927_965);
}
