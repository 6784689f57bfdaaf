//! Chart series export. Uses the `csv` crate for serialization.

use crate::domain::CombinedSeriesPoint;

/// Convert the combined chart series to CSV.
///
/// Format: `date;historical;predicted`. Missing values are empty cells, so the bridge
/// month is the only row with both columns filled.
pub fn series_to_csv(series: &[CombinedSeriesPoint]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.write_record(["date", "historical", "predicted"])?;

    for point in series {
        let date = point.date.format("%Y-%m-%d").to_string();
        let historical = point.historical.map(|v| v.to_string()).unwrap_or_default();
        let predicted = point.predicted.map(|v| v.to_string()).unwrap_or_default();
        wtr.write_record([&date, &historical, &predicted])?;
    }

    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}
