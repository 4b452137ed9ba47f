//! # Writing results
//!
//! Output files use the same line oriented layout as the inputs, with tab separated fields and
//! six decimals, such that they can be read back in.
use std::io::{self, Write};

use crate::algorithm::evaluation::{Evaluation, Placement, QueryEvaluation, recall_level};
use crate::algorithm::preferences::RankedPreference;
use crate::data::retrieval::{ConceptWeight, RsvValue};

/// Write one `concept weight` line per concept.
///
/// # Errors
///
/// When writing fails.
pub fn write_weights<'a>(
    out: &mut impl Write,
    weights: impl IntoIterator<Item = &'a ConceptWeight>,
) -> io::Result<()> {
    for entry in weights {
        writeln!(out, "{}\t{:.6}", entry.concept, entry.weight)?;
    }

    Ok(())
}

/// Write one `query document rsv` line per value.
///
/// # Errors
///
/// When writing fails.
pub fn write_rsv(out: &mut impl Write, values: &[RsvValue]) -> io::Result<()> {
    for value in values {
        writeln!(out, "{}\t{}\t{:.6}", value.query, value.document, value.rsv)?;
    }

    Ok(())
}

/// Write one `kind query less_relevant more_relevant delta` line per preference.
///
/// # Errors
///
/// When writing fails.
pub fn write_preferences(out: &mut impl Write, preferences: &[RankedPreference]) -> io::Result<()> {
    for RankedPreference { preference, delta } in preferences {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{:.6}",
            preference.kind.symbol(),
            preference.query,
            preference.less_relevant,
            preference.more_relevant,
            delta,
        )?;
    }

    Ok(())
}

/// Write a readable report: the diagnostics of each query, then the averaged precision per
/// recall level and its sum.
///
/// # Errors
///
/// When writing fails.
pub fn write_evaluation(out: &mut impl Write, evaluation: &Evaluation) -> io::Result<()> {
    for query in &evaluation.queries {
        write_query(out, query)?;
    }

    writeln!(out, "queries\t{}", evaluation.queries.len())?;
    writeln!(out, "recall\tprecision")?;
    for (level, precision) in evaluation.average_precision.iter().enumerate() {
        writeln!(out, "{:.2}\t{:.6}", recall_level(level), precision)?;
    }
    writeln!(out, "sum\t{:.6}", evaluation.curve_sum())
}

fn write_query(out: &mut impl Write, query: &QueryEvaluation) -> io::Result<()> {
    writeln!(out, "query {}: {} ranked, {} relevant", query.query, query.ranked, query.relevant)?;
    if let Some(placement) = query.first_non_relevant {
        writeln!(out, "  first non-relevant\t{}", format_placement(&placement))?;
    }
    writeln!(out, "  worst relevant\t{}", format_placements(&query.worst_relevant))?;
    writeln!(out, "  best non-relevant\t{}", format_placements(&query.best_non_relevant))?;
    if !query.unranked_relevant.is_empty() {
        let unranked = query.unranked_relevant.iter().map(ToString::to_string).collect::<Vec<_>>();
        writeln!(out, "  unranked relevant\t{}", unranked.join(" "))?;
    }
    let precision = query.precision.iter().map(|value| format!("{value:.3}")).collect::<Vec<_>>();
    writeln!(out, "  precision\t{}", precision.join(" "))
}

fn format_placement(placement: &Placement) -> String {
    format!("{}@{} ({:.6})", placement.document, placement.rank, placement.rsv)
}

fn format_placements(placements: &[Placement]) -> String {
    placements.iter().map(format_placement).collect::<Vec<_>>().join(" ")
}
