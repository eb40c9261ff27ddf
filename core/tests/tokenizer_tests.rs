use searchcore::tokenizer::{is_valid_word, split_words, StopWords};
use searchcore::{SearchError, SearchServer};

#[test]
fn it_splits_on_spaces_only() {
    let words = split_words("  curly   cat-tail  ");
    assert_eq!(words, vec!["curly", "cat-tail"]);
}

#[test]
fn it_rejects_control_characters_in_stop_words() {
    assert!(!is_valid_word("a\x1fb"));
    let err = SearchServer::new(["and", "i\x10n"]).unwrap_err();
    assert_eq!(err, SearchError::InvalidWord("i\x10n".into()));
    assert!(err.is_invalid_argument());
}

#[test]
fn it_builds_the_same_stop_words_from_text_and_collections() {
    let from_text = StopWords::from_text(" and in  at in").unwrap();
    let from_vec = StopWords::new(vec!["at".to_string(), "and".to_string(), "in".to_string()]).unwrap();
    assert_eq!(from_text.len(), 3);
    for word in ["and", "in", "at"] {
        assert!(from_text.contains(word));
        assert!(from_vec.contains(word));
    }
}
