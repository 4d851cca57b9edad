//! Static date and CSV corpora used across harnesses.
//!
//! Date corpora are `(input, expected)` pairs so harnesses can both drive the
//! normalizer and check it. CSV fixtures are written to a temp dir on demand.

use std::path::{Path, PathBuf};

/// Canonical input → expected output for every normalization rule.
pub const CORPUS_RULES: &[(&str, Option<&str>)] = &[
    // absent
    ("", None),
    ("   ", None),
    // ISO pass-through
    ("2023-06-15T10:00:00Z", Some("2023-06-15T10:00:00Z")),
    ("2023-06-15T10:00:00.000Z", Some("2023-06-15T10:00:00.000Z")),
    ("2023-06-15T10:00:00+02:00", Some("2023-06-15T10:00:00+02:00")),
    // slash triples
    ("25/12/2023", Some("2023-12-25T00:00:00.000Z")),
    ("12/25/2023", Some("2023-12-25T00:00:00.000Z")),
    ("05/06/2023", Some("2023-06-05T00:00:00.000Z")),
    ("5/6/2023", Some("2023-06-05T00:00:00.000Z")),
    // calendar date
    ("2023-06-15", Some("2023-06-15T00:00:00.000Z")),
    // fallback
    ("2023-06-15 10:30:00", Some("2023-06-15T10:30:00.000Z")),
    ("June 15, 2023", Some("2023-06-15T00:00:00.000Z")),
    ("15 June 2023", Some("2023-06-15T00:00:00.000Z")),
    // garbage
    ("not-a-date", None),
    ("06/2023", None),
];

/// Spellings of 25 December 2023 as they show up in hand-kept spreadsheets.
pub const CORPUS_SAME_DAY: &[&str] = &[
    "25/12/2023",
    "12/25/2023",
    "2023-12-25",
    "December 25, 2023",
    "25 December 2023",
    "25 Dec 2023",
    "25-Dec-2023",
    " 25/12/2023 ",
];

pub const FABRICA_CSV: &str = "\
id,title,date,youtubeUrl,duration,createdAt
f0001,Fabrica 0001,25/12/2023,https://youtu.be/aaa,7200,2023-12-26
f0002,Fabrica 0002,05/06/2024,https://youtu.be/bbb,6900,
f0003,Fabrica 0003,sometime,https://youtu.be/ccc,7000,
f0004,Fabrica 0004,2024-01-15,https://youtu.be/ddd,not-a-number,
";

pub const JINGLE_CSV: &str = r#"id,title,timestamp,isJinglazo,isPrecario,tags,createdAt
j0001,Intro cumbia,125,true,false,cumbia;intro,12/31/2023
,Sin id,300,no,si,,
j0003,Cierre,4000,1,0,cierre,"June 15, 2023"
"#;

/// Write `contents` to `name` inside `dir` and return the path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("fixture must be writable");
    path
}
