// End-to-end lookup tests over small generated dictionaries.
//
// Entries are built the way dictionary compilers store them:
// `inflected SEP encoded-base SEP tags`, with the base form truncation-coded
// against the inflected form.

use std::path::PathBuf;

use encoding_rs::{Encoding, ISO_8859_2, UTF_8};
use morfo_core::MetadataError;
use morfo_dict::{Dictionary, DictionaryError, Word};
use morfo_fsa::testing::{self, Cfsa2Options, Fsa5Options};
use morfo_fsa::{Automaton, FsaError, FsaVersion};

const ENGLISH: &[(&str, &str, &str)] = &[
    ("better", "good", "JJR"),
    ("better", "well", "RBR"),
    ("cat", "cat", "NN"),
    ("cats", "cat", "NNS"),
    ("dog", "dog", "NN"),
    ("dogs", "dog", "NNS"),
    ("meow", "meow", "NN"),
    ("meow", "meow", "VB"),
    ("meowed", "meow", "VBD"),
    ("meowed", "meow", "VBN"),
    ("meowing", "meow", "VBG"),
    ("meows", "meow", "NNS"),
    ("meows", "meow", "VBZ"),
    ("mice", "mouse", "NNS"),
    ("was", "be", "VBD"),
];

#[derive(Clone, Copy)]
enum Variant {
    Fsa5,
    Cfsa2,
}

fn info(encoding: &str, separator: char, encoder: &str) -> String {
    format!(
        "# generated\nfsa.dict.encoding={encoding}\nfsa.dict.separator={separator}\nfsa.dict.encoder={encoder}\nfsa.dict.author=test\n"
    )
}

/// Suffix code: truncation byte then the literal rest of `base`.
fn encode_suffix(inflected: &[u8], base: &[u8]) -> Vec<u8> {
    let common = inflected
        .iter()
        .zip(base)
        .take_while(|(a, b)| a == b)
        .count();
    let mut out = vec![b'A' + (inflected.len() - common) as u8];
    out.extend_from_slice(&base[common..]);
    out
}

/// Prefix code: drop `strip` leading bytes, then suffix-code the rest.
fn encode_prefix(inflected: &[u8], base: &[u8], strip: usize) -> Vec<u8> {
    let mut out = vec![b'A' + strip as u8];
    out.extend(encode_suffix(&inflected[strip..], base));
    out
}

fn entry(inflected: &[u8], encoded: &[u8], tags: &[u8], separator: u8) -> Vec<u8> {
    let mut out = inflected.to_vec();
    out.push(separator);
    out.extend_from_slice(encoded);
    if !tags.is_empty() {
        out.push(separator);
        out.extend_from_slice(tags);
    }
    out
}

fn suffix_entries(
    encoding: &'static Encoding,
    separator: u8,
    words: &[(&str, &str, &str)],
) -> Vec<Vec<u8>> {
    words
        .iter()
        .map(|(inflected, base, tags)| {
            let inflected = encoding.encode(inflected).0;
            let base = encoding.encode(base).0;
            let tags = encoding.encode(tags).0;
            entry(&inflected, &encode_suffix(&inflected, &base), &tags, separator)
        })
        .collect()
}

fn automaton(entries: &[Vec<u8>], variant: Variant) -> Vec<u8> {
    match variant {
        Variant::Fsa5 => testing::write_fsa5(entries, Fsa5Options::default()),
        Variant::Cfsa2 => testing::write_cfsa2(entries, Cfsa2Options::default()),
    }
}

fn english(variant: Variant) -> Dictionary {
    let entries = suffix_entries(UTF_8, b'+', ENGLISH);
    Dictionary::from_bytes(&info("UTF-8", '+', "SUFFIX"), &automaton(&entries, variant)).unwrap()
}

fn words(pairs: &[(&str, &str)]) -> Vec<Word> {
    pairs.iter().map(|(stem, tags)| Word::new(*stem, *tags)).collect()
}

fn temp_base(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("morfo-dict-{}-{name}", std::process::id()))
}

#[test]
fn meowing_has_a_single_reading() {
    for variant in [Variant::Fsa5, Variant::Cfsa2] {
        let dict = english(variant);
        assert_eq!(
            dict.lookup("meowing").unwrap(),
            Some(words(&[("meow", "VBG")]))
        );
    }
}

#[test]
fn plural_noun() {
    let dict = english(Variant::Cfsa2);
    assert_eq!(dict.lookup("cats").unwrap(), Some(words(&[("cat", "NNS")])));
}

#[test]
fn every_reading_in_automaton_order() {
    let dict = english(Variant::Cfsa2);
    assert_eq!(
        dict.lookup("meow").unwrap(),
        Some(words(&[("meow", "NN"), ("meow", "VB")]))
    );
    assert_eq!(
        dict.lookup("meowed").unwrap(),
        Some(words(&[("meow", "VBD"), ("meow", "VBN")]))
    );
    assert_eq!(
        dict.lookup("better").unwrap(),
        Some(words(&[("good", "JJR"), ("well", "RBR")]))
    );
}

#[test]
fn irregular_forms() {
    let dict = english(Variant::Fsa5);
    assert_eq!(dict.lookup("was").unwrap(), Some(words(&[("be", "VBD")])));
    assert_eq!(dict.lookup("mice").unwrap(), Some(words(&[("mouse", "NNS")])));
}

#[test]
fn absent_words() {
    for variant in [Variant::Fsa5, Variant::Cfsa2] {
        let dict = english(variant);
        for word in ["", "m", "meo", "meowingly", "xyz", "Cats", "cat+"] {
            assert_eq!(dict.lookup(word).unwrap(), None, "word {word:?}");
        }
    }
}

#[test]
fn variants_give_identical_results() {
    let fsa5 = english(Variant::Fsa5);
    let cfsa2 = english(Variant::Cfsa2);
    assert_eq!(fsa5.automaton().version(), FsaVersion::Fsa5);
    assert_eq!(cfsa2.automaton().version(), FsaVersion::Cfsa2);

    let samples = ENGLISH
        .iter()
        .map(|(inflected, _, _)| *inflected)
        .chain(["dogg", "be", "good", "mouse"]);
    for word in samples {
        assert_eq!(
            fsa5.lookup(word).unwrap(),
            cfsa2.lookup(word).unwrap(),
            "word {word:?}"
        );
    }
}

#[test]
fn fsa5_with_node_data_and_wide_pointers() {
    let entries = suffix_entries(UTF_8, b'+', ENGLISH);
    let options = Fsa5Options {
        node_data_length: 2,
        target_next: false,
    };
    let dict = Dictionary::from_bytes(
        &info("UTF-8", '+', "SUFFIX"),
        &testing::write_fsa5(&entries, options),
    )
    .unwrap();
    assert_eq!(dict.lookup("dogs").unwrap(), Some(words(&[("dog", "NNS")])));
    assert_eq!(dict.lookup("meowing").unwrap(), Some(words(&[("meow", "VBG")])));
}

#[test]
fn cfsa2_without_label_table() {
    let entries = suffix_entries(UTF_8, b'+', ENGLISH);
    let options = Cfsa2Options {
        label_table: false,
        numbered: true,
        target_next: false,
    };
    let dict = Dictionary::from_bytes(
        &info("UTF-8", '+', "SUFFIX"),
        &testing::write_cfsa2(&entries, options),
    )
    .unwrap();
    assert_eq!(
        dict.lookup("meows").unwrap(),
        Some(words(&[("meow", "NNS"), ("meow", "VBZ")]))
    );
}

#[test]
fn lookup_is_deterministic() {
    let dict = english(Variant::Cfsa2);
    let first = dict.lookup("better").unwrap();
    for _ in 0..10 {
        assert_eq!(dict.lookup("better").unwrap(), first);
    }
}

#[test]
fn concurrent_lookups_share_one_dictionary() {
    let dict = english(Variant::Cfsa2);
    std::thread::scope(|scope| {
        for (inflected, _, _) in ENGLISH {
            let dict = &dict;
            scope.spawn(move || {
                let found = dict.lookup(inflected).unwrap().unwrap();
                assert!(!found.is_empty());
            });
        }
    });
}

#[test]
fn prefix_encoder() {
    let sep = b'+';
    let entries = vec![
        entry(b"kot", &encode_prefix(b"kot", b"kot", 0), b"subst:sg:nom:m2", sep),
        entry(
            b"najlepszy",
            &encode_prefix(b"najlepszy", b"dobry", 3),
            b"adj:sg:nom:m1:sup",
            sep,
        ),
        entry(
            "nieładny".as_bytes(),
            &encode_prefix("nieładny".as_bytes(), "ładny".as_bytes(), 3),
            b"adj:sg:nom:m1:neg",
            sep,
        ),
    ];
    for variant in [Variant::Fsa5, Variant::Cfsa2] {
        let dict =
            Dictionary::from_bytes(&info("utf-8", '+', "PREFIX"), &automaton(&entries, variant))
                .unwrap();
        assert_eq!(
            dict.lookup("najlepszy").unwrap(),
            Some(words(&[("dobry", "adj:sg:nom:m1:sup")]))
        );
        assert_eq!(
            dict.lookup("nieładny").unwrap(),
            Some(words(&[("ładny", "adj:sg:nom:m1:neg")]))
        );
        assert_eq!(
            dict.lookup("kot").unwrap(),
            Some(words(&[("kot", "subst:sg:nom:m2")]))
        );
    }
}

#[test]
fn none_encoder_stores_base_verbatim() {
    let entries = vec![b"mice+mouse+NNS".to_vec(), b"was+be+VBD".to_vec()];
    let dict = Dictionary::from_bytes(
        &info("UTF-8", '+', "NONE"),
        &automaton(&entries, Variant::Cfsa2),
    )
    .unwrap();
    assert_eq!(dict.lookup("mice").unwrap(), Some(words(&[("mouse", "NNS")])));
    assert_eq!(dict.lookup("was").unwrap(), Some(words(&[("be", "VBD")])));
}

#[test]
fn single_byte_encoding() {
    let polish = &[
        ("kotów", "kot", "subst:pl:gen:m2"),
        ("łódź", "łódź", "subst:sg:nom:f"),
        ("żółwia", "żółw", "subst:sg:gen:m2"),
    ];
    let entries = suffix_entries(ISO_8859_2, b'+', polish);
    // One byte per character: "kotów" + separator + "C" + separator + tags.
    assert_eq!(entries[0].len(), 5 + 1 + 1 + 1 + "subst:pl:gen:m2".len());

    for variant in [Variant::Fsa5, Variant::Cfsa2] {
        let dict = Dictionary::from_bytes(
            &info("iso-8859-2", '+', "SUFFIX"),
            &automaton(&entries, variant),
        )
        .unwrap();
        assert_eq!(dict.metadata().encoding(), ISO_8859_2);
        assert_eq!(
            dict.lookup("kotów").unwrap(),
            Some(words(&[("kot", "subst:pl:gen:m2")]))
        );
        assert_eq!(
            dict.lookup("żółwia").unwrap(),
            Some(words(&[("żółw", "subst:sg:gen:m2")]))
        );
        assert_eq!(
            dict.lookup("łódź").unwrap(),
            Some(words(&[("łódź", "subst:sg:nom:f")]))
        );
        // Not representable in ISO-8859-2.
        assert_eq!(dict.lookup("猫").unwrap(), None);
    }
}

#[test]
fn custom_separator() {
    let entries = suffix_entries(UTF_8, b'|', &[("cats", "cat", "NNS")]);
    let dict = Dictionary::from_bytes(
        &info("UTF-8", '|', "SUFFIX"),
        &automaton(&entries, Variant::Cfsa2),
    )
    .unwrap();
    assert_eq!(dict.metadata().separator(), '|');
    assert_eq!(dict.lookup("cats").unwrap(), Some(words(&[("cat", "NNS")])));
}

#[test]
fn tags_may_contain_the_separator() {
    let entries = suffix_entries(UTF_8, b'+', &[("cats", "cat", "subst+pl")]);
    let dict = Dictionary::from_bytes(
        &info("UTF-8", '+', "SUFFIX"),
        &automaton(&entries, Variant::Cfsa2),
    )
    .unwrap();
    assert_eq!(
        dict.lookup("cats").unwrap(),
        Some(words(&[("cat", "subst+pl")]))
    );
}

#[test]
fn unsupported_truncation_is_an_error() {
    let entries = vec![b"cats+@+NNS".to_vec()];
    let dict = Dictionary::from_bytes(
        &info("UTF-8", '+', "SUFFIX"),
        &automaton(&entries, Variant::Fsa5),
    )
    .unwrap();
    let err = dict.lookup("cats").unwrap_err();
    assert!(matches!(err, DictionaryError::UnsupportedTruncation));
    assert!(err.to_string().contains("255"));
}

#[test]
fn entries_that_do_not_fit_the_word_are_skipped() {
    // "E" truncates four bytes from a two-byte word.
    let entries = vec![b"ox+A+NN".to_vec(), b"ox+E+NN".to_vec()];
    for variant in [Variant::Fsa5, Variant::Cfsa2] {
        let dict = Dictionary::from_bytes(
            &info("UTF-8", '+', "SUFFIX"),
            &automaton(&entries, variant),
        )
        .unwrap();
        assert_eq!(dict.lookup("ox").unwrap(), Some(words(&[("ox", "NN")])));
    }

    let entries = vec![b"ox+E+NN".to_vec(), b"abc+CC".to_vec()];
    for (encoder, word) in [("SUFFIX", "ox"), ("PREFIX", "abc")] {
        let dict = Dictionary::from_bytes(
            &info("UTF-8", '+', encoder),
            &automaton(&entries, Variant::Cfsa2),
        )
        .unwrap();
        assert_eq!(dict.lookup(word).unwrap(), None, "{encoder} {word:?}");
    }
}

#[test]
fn invalid_bytes_in_entries_are_replaced() {
    let entries = vec![entry(b"cats", b"B\xFF", b"NNS", b'+')];
    for variant in [Variant::Fsa5, Variant::Cfsa2] {
        let dict = Dictionary::from_bytes(
            &info("UTF-8", '+', "SUFFIX"),
            &automaton(&entries, variant),
        )
        .unwrap();
        assert_eq!(
            dict.lookup("cats").unwrap(),
            Some(words(&[("cat\u{FFFD}", "NNS")]))
        );
    }
}

#[test]
fn truncated_automaton_is_rejected() {
    let err = Dictionary::from_bytes(
        &info("UTF-8", '+', "SUFFIX"),
        b"\\fsa\xC6\x00\x07\x00\x00",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        DictionaryError::Automaton(FsaError::TooShort { .. })
    ));
}

#[test]
fn open_reads_info_and_dict() {
    let base = temp_base("english");
    let entries = suffix_entries(UTF_8, b'+', ENGLISH);
    std::fs::write(base.with_extension("info"), info("UTF-8", '+', "SUFFIX")).unwrap();
    std::fs::write(
        base.with_extension("dict"),
        automaton(&entries, Variant::Cfsa2),
    )
    .unwrap();

    let dict = Dictionary::open(&base).unwrap();
    assert_eq!(dict.path(), Some(base.as_path()));
    assert_eq!(dict.metadata().get("fsa.dict.author"), Some("test"));
    assert_eq!(dict.lookup("dogs").unwrap(), Some(words(&[("dog", "NNS")])));

    let automaton = Automaton::open(base.with_extension("dict")).unwrap();
    assert_eq!(automaton.version(), FsaVersion::Cfsa2);

    std::fs::remove_file(base.with_extension("info")).unwrap();
    std::fs::remove_file(base.with_extension("dict")).unwrap();
}

#[test]
fn open_missing_info() {
    let err = Dictionary::open(temp_base("missing")).unwrap_err();
    assert!(matches!(
        err,
        DictionaryError::Metadata(MetadataError::Io { .. })
    ));
}

#[test]
fn open_missing_dict() {
    let base = temp_base("no-automaton");
    std::fs::write(base.with_extension("info"), info("UTF-8", '+', "SUFFIX")).unwrap();

    let err = Dictionary::open(&base).unwrap_err();
    std::fs::remove_file(base.with_extension("info")).unwrap();

    match err {
        DictionaryError::AutomatonFile { path, .. } => {
            assert_eq!(path, base.with_extension("dict"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn configuration_errors() {
    let data = automaton(&suffix_entries(UTF_8, b'+', ENGLISH), Variant::Cfsa2);

    let err = Dictionary::from_bytes(&info("UTF-8", '+', "INFIX"), &data).unwrap_err();
    assert!(matches!(
        err,
        DictionaryError::Metadata(MetadataError::UnknownEncoder(_))
    ));

    let err = Dictionary::from_bytes(&info("klingon", '+', "SUFFIX"), &data).unwrap_err();
    assert!(matches!(
        err,
        DictionaryError::Metadata(MetadataError::UnknownEncoding(_))
    ));

    let err = Dictionary::from_bytes("fsa.dict.encoding=UTF-8\n", &data).unwrap_err();
    assert!(matches!(
        err,
        DictionaryError::Metadata(MetadataError::MissingKey(_))
    ));

    let err = Dictionary::from_bytes(&info("UTF-8", '+', "SUFFIX"), b"\\fsa\xC5\0\0\0").unwrap_err();
    assert!(matches!(err, DictionaryError::Automaton(_)));
    assert!(err.to_string().contains("CFSA"));
}
