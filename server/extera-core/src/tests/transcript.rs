use extera_types::{format_transcript, TranscriptMessage};

fn message(role: &str, content: &str) -> TranscriptMessage {
    TranscriptMessage {
        role: role.to_string(),
        content: content.to_string(),
    }
}

#[test]
fn one_line_per_entry_in_order() {
    let transcript = vec![
        message("user", "Hello"),
        message("assistant", "Hi there"),
        message("user", "Bye"),
    ];

    assert_eq!(
        format_transcript(&transcript),
        "user: Hello\nassistant: Hi there\nuser: Bye"
    );
}

#[test]
fn single_entry_has_no_separator() {
    assert_eq!(format_transcript(&[message("user", "Hello")]), "user: Hello");
}

#[test]
fn empty_transcript_formats_to_empty_text() {
    assert_eq!(format_transcript(&[]), "");
}

#[test]
fn duplicate_entries_are_preserved() {
    let transcript = vec![message("user", "again"), message("user", "again")];
    assert_eq!(format_transcript(&transcript), "user: again\nuser: again");
}
