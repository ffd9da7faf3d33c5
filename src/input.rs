use std::fs::File;
use std::io::Read;
use std::path::Path;

/// reads identifiers from the first column of a csv file, the first row is
/// treated as a header and skipped.
pub fn read_identifiers<P>(path: P) -> Result<Vec<String>, csv::Error>
where
    P: AsRef<Path>
{
    let file = File::open(path.as_ref())?;

    read_identifiers_from(file)
}

/// every data row yields its first column, empty or not, with surrounding
/// whitespace trimmed. fully blank lines are not rows.
pub fn read_identifiers_from<R>(reader: R) -> Result<Vec<String>, csv::Error>
where
    R: Read
{
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut identifiers = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let value = record.get(0).unwrap_or_default();

        if value.is_empty() {
            tracing::debug!("row without identifier {:?}", record.position());
        }

        identifiers.push(value.to_owned());
    }

    Ok(identifiers)
}
