use crate::domain::model::{Artifact, ArtifactFormat, RecordSet};
use crate::utils::error::{Result, SyncError};
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub fn to_pretty_json(records: &RecordSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

pub fn to_compact_json(records: &RecordSet) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Header line from the first record's keys, then one line per record.
///
/// Fields containing a comma, a double quote or a line break are quoted with
/// inner quotes doubled. An empty set renders as the empty string, and the
/// last line has no terminator.
pub fn to_csv(records: &RecordSet) -> Result<String> {
    let Some(first) = records.records().first() else {
        return Ok(String::new());
    };
    let headers: Vec<&str> = first.keys().collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(csv_line(&headers)?);
    for record in records {
        let fields: Vec<&str> = headers.iter().map(|h| record.get(h).unwrap_or("")).collect();
        lines.push(csv_line(&fields)?);
    }
    Ok(lines.join("\n"))
}

/// One CSV line without its terminator.
///
/// The csv writer quotes a record made of a single empty field as `""`; that
/// record is written as an empty line instead.
fn csv_line(fields: &[&str]) -> Result<String> {
    if let [""] = fields {
        return Ok(String::new());
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(fields)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| SyncError::IoError(std::io::Error::new(e.error().kind(), e.to_string())))?;
    let mut line = String::from_utf8(bytes).map_err(|e| {
        SyncError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;

    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

pub fn render(records: &RecordSet, format: ArtifactFormat) -> Result<String> {
    match format {
        ArtifactFormat::PrettyJson => to_pretty_json(records),
        ArtifactFormat::CompactJson => to_compact_json(records),
        ArtifactFormat::Csv => to_csv(records),
    }
}

/// `stores-int` + PrettyJson -> `stores-int.json`.
pub fn file_name(base: &str, format: ArtifactFormat) -> String {
    format!("{}.{}", base, format.extension())
}

/// The json, min.json and csv artifacts for one record set.
pub fn artifacts_for(base: &str, records: &RecordSet) -> Result<Vec<Artifact>> {
    ArtifactFormat::ALL
        .iter()
        .map(|&format| {
            Ok(Artifact {
                name: file_name(base, format),
                format,
                record_count: records.len(),
                content: render(records, format)?,
            })
        })
        .collect()
}
