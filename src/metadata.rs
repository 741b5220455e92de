use std::fs;
use std::io;
use std::path::Path;
use std::str;
use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone};
use exif::{Exif, In, Reader, Tag, Value};

use crate::date::CANONICAL_FORMAT;

// Order does not matter for selection since the resolver sorts.
const EXIF_DATE_TAGS: [Tag; 3] = [Tag::DateTimeDigitized, Tag::DateTimeOriginal, Tag::DateTime];

/// Collects every raw timestamp string known for `path`: filesystem modified
/// and creation times plus any EXIF date tags. Each source is optional and
/// failures to read any of them just mean fewer candidates.
pub fn timestamp_candidates(path: &Path) -> Vec<String> {
    let mut dates = Vec::new();

    if let Ok(meta) = fs::metadata(path) {
        if let Ok(modified) = meta.modified() {
            dates.push(format_system_time(modified));
        }
        if let Some(created) = creation_time(&meta) {
            dates.push(created);
        }
    }

    dates.extend(exif_candidates(path));
    dates
}

fn format_system_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(CANONICAL_FORMAT).to_string()
}

fn creation_time(meta: &fs::Metadata) -> Option<String> {
    if let Ok(created) = meta.created() {
        return Some(format_system_time(created));
    }

    // Filesystems without a birth time report the status-change time instead,
    // matching what stat-based tools see there.
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if let Some(changed) = Local.timestamp_opt(meta.ctime(), 0).single() {
            return Some(changed.format(CANONICAL_FORMAT).to_string());
        }
    }

    None
}

/// Reads EXIF date tags from the file, normalized to the canonical separator.
/// The handle is scoped to this function; anything unparsable yields no
/// candidates.
fn exif_candidates(path: &Path) -> Vec<String> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };
    let Ok(exif) = Reader::new().read_from_container(&mut io::BufReader::new(&file)) else {
        return Vec::new();
    };

    EXIF_DATE_TAGS
        .iter()
        .filter_map(|&tag| get_field(&exif, tag))
        .map(|raw| raw.replace(':', "."))
        .collect()
}

fn get_field(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match field.value {
        // Default formatter puts ASCII values inside quotes, which we don't want
        Value::Ascii(ref vec) if !vec.is_empty() => {
            str::from_utf8(&vec[0]).ok().map(str::to_string)
        }
        _ => Some(field.display_value().to_string()),
    }
}
