// End-to-end generation over real files on disk: .aff parsing, mmap sampling,
// expansion and selection through the public library surface.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use assert_matches::assert_matches;
use randword::affix::StandaloneConvention;
use randword::{flag_set, RandwordError, WordGenConfig, WordGenerator};
use tempfile::TempDir;

const EN_AFF: &str = "\
SET UTF-8

PFX A Y 1
PFX A   0     re         .

PFX U N 1
PFX U   0     un         .

SFX D Y 4
SFX D   0     d          e
SFX D   y     ied        [^aeiou]y
SFX D   0     ed         [^ey]
SFX D   0     ed         [aeiou]y

SFX S Y 4
SFX S   y     ies        [^aeiou]y
SFX S   0     s          [aeiou]y
SFX S   0     es         [sxzh]
SFX S   0     s          [^sxzhy]

SFX M N 1
SFX M   0     's         .
";

fn write_pair(dic: &str, aff: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let dic_path = dir.path().join("test.dic");
    let aff_path = dir.path().join("test.aff");
    fs::write(&dic_path, dic).unwrap();
    fs::write(&aff_path, aff).unwrap();
    (dir, dic_path, aff_path)
}

fn seeded(seed: u64) -> WordGenConfig {
    WordGenConfig {
        seed: Some(seed),
        require_count_header: true,
        ..WordGenConfig::default()
    }
}

#[test]
fn dog_scenario_from_files() {
    let (_dir, dic, aff) = write_pair("1\ndog/S\n", "SFX S Y 1\nSFX S 0 s [^s]\n");
    let mut generator = WordGenerator::from_files(&dic, &aff, seeded(5)).unwrap();

    for _ in 0..20 {
        let words = generator.generate(1, &BTreeSet::new()).unwrap();
        assert!(words == ["dog"] || words == ["dogs"], "got {words:?}");
        assert_eq!(generator.generate(1, &flag_set("S")).unwrap(), ["dog"]);
    }
}

#[test]
fn every_generated_word_is_a_known_form() {
    let dic = "4\ntry/ADS\nbox/SM\nbake/AD\nunit\n";
    let (_dir, dic, aff) = write_pair(dic, EN_AFF);
    let mut generator = WordGenerator::from_files(&dic, &aff, seeded(11)).unwrap();

    let all_forms: BTreeSet<String> = generator
        .generate_all_forms(200, &BTreeSet::new())
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    for expected in ["retried", "tries", "retries", "boxes", "rebaked", "unit"] {
        assert!(all_forms.contains(expected), "missing {expected}");
    }

    for word in generator.generate(100, &flag_set("M")).unwrap() {
        assert!(all_forms.contains(&word), "unexpected {word}");
        assert!(!word.contains('\''));
    }
}

#[test]
fn try_expands_in_rule_order() {
    let (_dir, dic, aff) = write_pair("1\ntry/ADS\n", EN_AFF);
    let mut generator = WordGenerator::from_files(&dic, &aff, seeded(1)).unwrap();
    let forms = generator.generate_all_forms(1, &BTreeSet::new()).unwrap();
    assert_eq!(
        forms[0],
        ["try", "retry", "tried", "tries", "retried", "retries"]
    );
}

#[test]
fn standalone_convention_changes_placement() {
    let (_dir, dic, aff) = write_pair("1\nbox/M\n", EN_AFF);

    let mut swapped = WordGenerator::from_files(&dic, &aff, seeded(1)).unwrap();
    let forms = swapped.generate_all_forms(1, &BTreeSet::new()).unwrap();
    assert_eq!(forms[0], ["'sbox", "box"]);

    let config = WordGenConfig {
        convention: StandaloneConvention::Direct,
        ..seeded(1)
    };
    let mut direct = WordGenerator::from_files(&dic, &aff, config).unwrap();
    let forms = direct.generate_all_forms(1, &BTreeSet::new()).unwrap();
    assert_eq!(forms[0], ["box's", "box"]);
}

#[test]
fn same_seed_same_words() {
    let dic = "4\ntry/ADS\nbox/SM\nbake/AD\nunit\n";
    let (_dir, dic, aff) = write_pair(dic, EN_AFF);
    let ignore = flag_set("M");

    let first = WordGenerator::from_files(&dic, &aff, seeded(2024))
        .unwrap()
        .generate_line(30, &ignore, " ")
        .unwrap();
    let second = WordGenerator::from_files(&dic, &aff, seeded(2024))
        .unwrap()
        .generate_line(30, &ignore, " ")
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first.split(' ').count(), 30);
}

#[test]
fn missing_header_rejected_when_required() {
    let (_dir, dic, aff) = write_pair("dog/S\ncat/S\n", EN_AFF);
    let err = WordGenerator::from_files(&dic, &aff, seeded(1))
        .err()
        .unwrap();
    assert_matches!(err, RandwordError::InvalidDictionaryFormat(_));

    let config = WordGenConfig {
        require_count_header: false,
        ..seeded(1)
    };
    let mut generator = WordGenerator::from_files(&dic, &aff, config).unwrap();
    assert_eq!(generator.generate(5, &BTreeSet::new()).unwrap().len(), 5);
}

#[test]
fn strict_affixes_reject_truncated_block() {
    let (_dir, dic, aff) = write_pair("1\ndog/S\n", "SFX S Y 2\nSFX S 0 s .\n");
    let config = WordGenConfig {
        strict_affixes: true,
        ..seeded(1)
    };
    let err = WordGenerator::from_files(&dic, &aff, config).err().unwrap();
    assert_matches!(err, RandwordError::MalformedAffixFile { .. });

    // Lenient loading keeps the partial rule.
    let generator = WordGenerator::from_files(&dic, &aff, seeded(1)).unwrap();
    assert_eq!(generator.rules()["S"].variants.len(), 1);
}

#[test]
fn bad_dictionary_line_aborts_generation() {
    let (_dir, dic, aff) = write_pair("1\nice cream/S\n", EN_AFF);
    let mut generator = WordGenerator::from_files(&dic, &aff, seeded(1)).unwrap();
    assert_matches!(
        generator.generate(1, &BTreeSet::new()),
        Err(RandwordError::InvalidDictionaryFormat(_))
    );
}

#[test]
fn missing_files_are_io_errors() {
    let (dir, dic, aff) = write_pair("1\ndog\n", EN_AFF);
    let nowhere = dir.path().join("nowhere");

    let err = WordGenerator::from_files(&nowhere, &aff, seeded(1)).err().unwrap();
    assert_matches!(err, RandwordError::FileAccess { .. });
    let err = WordGenerator::from_files(&dic, &nowhere, seeded(1)).err().unwrap();
    assert_matches!(err, RandwordError::FileAccess { .. });
}
