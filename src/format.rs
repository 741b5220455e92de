use std::path::{Path, PathBuf};

use crate::date::ResolvedDate;
use crate::types::RenameError;

/// Characters that may not appear in filenames on common filesystems.
const RESERVED: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Upper bound on ` (N)` suffix attempts before giving up on a target name.
const MAX_DUPLICATES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateToken {
    Year,
    ShortYear,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatPiece {
    Literal(String),
    Token(DateToken),
}

// `YYYY` before `YY` so a four-digit year is never split in two.
const TOKENS: [(&str, DateToken); 7] = [
    ("YYYY", DateToken::Year),
    ("YY", DateToken::ShortYear),
    ("MM", DateToken::Month),
    ("DD", DateToken::Day),
    ("Hh", DateToken::Hour),
    ("Mm", DateToken::Minute),
    ("Ss", DateToken::Second),
];

/// Parses a user format string into pieces, dropping reserved characters
/// first. Anything that is not a recognized token is kept as a literal, so
/// there is no way for a pattern to fail to parse.
pub fn parse_pattern(fmt: &str) -> Vec<FormatPiece> {
    let stripped: String = fmt.chars().filter(|c| !RESERVED.contains(c)).collect();

    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut rest = stripped.as_str();

    'scan: while !rest.is_empty() {
        for (name, token) in TOKENS {
            if let Some(after) = rest.strip_prefix(name) {
                if !literal.is_empty() {
                    pieces.push(FormatPiece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(FormatPiece::Token(token));
                rest = after;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            literal.push(ch);
        }
        rest = chars.as_str();
    }

    if !literal.is_empty() {
        pieces.push(FormatPiece::Literal(literal));
    }

    pieces
}

pub fn render(pieces: &[FormatPiece], date: &ResolvedDate) -> String {
    let mut out = String::new();
    for piece in pieces {
        match piece {
            FormatPiece::Literal(s) => out.push_str(s),
            FormatPiece::Token(token) => out.push_str(&match token {
                DateToken::Year => date.year(),
                DateToken::ShortYear => date.short_year(),
                DateToken::Month => date.month(),
                DateToken::Day => date.day(),
                DateToken::Hour => date.hour(),
                DateToken::Minute => date.minute(),
                DateToken::Second => date.second(),
            }),
        }
    }
    out
}

/// Returns the first free path for `base` + `ext` inside `folder`, appending
/// ` (1)` through ` (30)` when the plain name is taken. `ext` carries the
/// original extension verbatim, leading dot included.
///
/// A file appearing between the existence check and the rename is a race this
/// tool accepts; it is interactive and single-threaded.
pub fn available_path(folder: &Path, base: &str, ext: &str) -> Result<PathBuf, RenameError> {
    let plain = folder.join(format!("{base}{ext}"));
    if !plain.exists() {
        return Ok(plain);
    }

    for n in 1..=MAX_DUPLICATES {
        let numbered = folder.join(format!("{base} ({n}){ext}"));
        if !numbered.exists() {
            return Ok(numbered);
        }
    }

    Err(RenameError::TooManyDuplicates(base.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn date() -> ResolvedDate {
        ResolvedDate::parse("2022.07.04 12.30.00").expect("must parse")
    }

    #[test]
    fn default_pattern_round_trip() {
        let pieces = parse_pattern(crate::types::DEFAULT_FORMAT);
        assert_eq!(render(&pieces, &date()), "2022-07-04 12-30-00");
    }

    #[test]
    fn short_year_does_not_corrupt_full_year() {
        let pieces = parse_pattern("YY YYYY");
        assert_eq!(render(&pieces, &date()), "22 2022");

        let pieces = parse_pattern("YYYYYY");
        assert_eq!(render(&pieces, &date()), "202222");
    }

    #[test]
    fn reserved_characters_are_stripped() {
        let pieces = parse_pattern(r#"YYYY:MM?DD*<>|"\/"#);
        assert_eq!(render(&pieces, &date()), "20220704");
    }

    #[test]
    fn unknown_text_is_literal() {
        let pieces = parse_pattern("Vacation MM DD, YYYY");
        assert_eq!(render(&pieces, &date()), "Vacation 07 04, 2022");
    }

    #[test]
    fn case_must_match_exactly() {
        let pieces = parse_pattern("yyyy-mm-dd");
        assert_eq!(render(&pieces, &date()), "yyyy-mm-dd");
    }

    #[test]
    fn collision_suffixes_count_up_from_one() {
        let dir = tempfile::tempdir().expect("tempdir");
        let folder = dir.path();

        let first = available_path(folder, "2022-07-04 12-30-00", ".jpg").expect("free");
        assert_eq!(first, folder.join("2022-07-04 12-30-00.jpg"));
        File::create(&first).expect("create");

        let second = available_path(folder, "2022-07-04 12-30-00", ".jpg").expect("free");
        assert_eq!(second, folder.join("2022-07-04 12-30-00 (1).jpg"));
        File::create(&second).expect("create");

        let third = available_path(folder, "2022-07-04 12-30-00", ".jpg").expect("free");
        assert_eq!(third, folder.join("2022-07-04 12-30-00 (2).jpg"));
    }

    #[test]
    fn collision_exhaustion_after_thirty_suffixes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let folder = dir.path();

        File::create(folder.join("base.jpg")).expect("create");
        for n in 1..=30 {
            File::create(folder.join(format!("base ({n}).jpg"))).expect("create");
        }

        let err = available_path(folder, "base", ".jpg").expect_err("must fail");
        assert_eq!(err, RenameError::TooManyDuplicates("base".to_string()));
    }

    #[test]
    fn last_suffix_slot_is_still_usable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let folder = dir.path();

        File::create(folder.join("base.jpg")).expect("create");
        for n in 1..30 {
            File::create(folder.join(format!("base ({n}).jpg"))).expect("create");
        }

        let path = available_path(folder, "base", ".jpg").expect("free");
        assert_eq!(path, folder.join("base (30).jpg"));
    }
}
