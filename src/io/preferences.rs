//! # Preference files
//!
//! One preference per line: `kind query less_relevant more_relevant [delta]`, where `kind` is one
//! of `+`, `-` or `C`. The optional RSV difference written by the preference generator is
//! ignored.
use crate::data::retrieval::preference::{Preference, PreferenceKind};
use crate::io::error::ParseError;
use crate::io::{numbered_lines, parse_field};

/// Parse preferences, keeping the order of the file.
///
/// # Errors
///
/// If a line has the wrong number of fields, an unknown kind or a non-integer identifier.
pub fn parse(contents: &str) -> Result<Vec<Preference>, ParseError> {
    numbered_lines(contents)
        .map(|file_location| {
            let (_, line) = file_location;
            let fields = line.split_whitespace().collect::<Vec<_>>();
            if !(4..=5).contains(&fields.len()) {
                return Err(ParseError::new(
                    format!("expected 4 or 5 fields, found {}", fields.len()),
                    file_location,
                ));
            }

            let mut symbol = fields[0].chars();
            let kind = match (symbol.next(), symbol.next()) {
                (Some(symbol), None) => PreferenceKind::from_symbol(symbol),
                _ => None,
            }.ok_or_else(|| ParseError::new(
                format!("unknown preference kind \"{}\"", fields[0]),
                file_location,
            ))?;

            Ok(Preference {
                kind,
                query: parse_field(fields[1], "query", file_location)?,
                less_relevant: parse_field(fields[2], "document", file_location)?,
                more_relevant: parse_field(fields[3], "document", file_location)?,
            })
        })
        .collect()
}
