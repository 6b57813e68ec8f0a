use anyhow::Result;
use chrono::NaiveDate;
use fred_lib::types::DATE_FORMAT;
use fred_lib::{Observation, Series, SeriesInfo, SeriesTable};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unknown names fall back to a plain table.
    pub fn from_name(name: &str) -> Self {
        match name {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct ObservationRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct RevisionRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Realtime Start")]
    #[serde(rename = "Realtime Start")]
    realtime_start: String,
    #[tabled(rename = "Realtime End")]
    #[serde(rename = "Realtime End")]
    realtime_end: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct SeriesInfoRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Frequency")]
    #[serde(rename = "Frequency")]
    frequency: String,
    #[tabled(rename = "Units")]
    #[serde(rename = "Units")]
    units: String,
    #[tabled(rename = "SA")]
    #[serde(rename = "SA")]
    seasonal_adjustment: String,
    #[tabled(rename = "Start")]
    #[serde(rename = "Start")]
    observation_start: String,
    #[tabled(rename = "End")]
    #[serde(rename = "End")]
    observation_end: String,
    #[tabled(rename = "Last Updated")]
    #[serde(rename = "Last Updated")]
    last_updated: String,
    #[tabled(rename = "Popularity")]
    #[serde(rename = "Popularity")]
    popularity: i64,
}

#[derive(Tabled, Serialize)]
struct VintageRow {
    #[tabled(rename = "Vintage Date")]
    #[serde(rename = "Vintage Date")]
    vintage_date: String,
}

// -- Row builders --

fn build_observation_rows(series: &Series) -> Vec<ObservationRow> {
    series
        .iter()
        .map(|(date, value)| ObservationRow {
            date: format_date(*date),
            value: format_number(*value),
        })
        .collect()
}

fn build_revision_rows(observations: &[Observation]) -> Vec<RevisionRow> {
    observations
        .iter()
        .map(|o| RevisionRow {
            date: format_date(o.date),
            realtime_start: format_date(o.realtime_start),
            realtime_end: o.realtime_end.map(format_date).unwrap_or_default(),
            value: format_number(o.value),
        })
        .collect()
}

fn build_series_info_rows(infos: &[SeriesInfo]) -> Vec<SeriesInfoRow> {
    infos
        .iter()
        .map(|s| SeriesInfoRow {
            id: s.id.clone(),
            title: s.title.clone(),
            frequency: s.frequency_short.clone(),
            units: s.units_short.clone(),
            seasonal_adjustment: s.seasonal_adjustment_short.clone(),
            observation_start: format_date(s.observation_start),
            observation_end: format_date(s.observation_end),
            last_updated: s.last_updated.clone(),
            popularity: s.popularity,
        })
        .collect()
}

fn build_vintage_rows(dates: &[NaiveDate]) -> Vec<VintageRow> {
    dates
        .iter()
        .map(|d| VintageRow {
            vintage_date: format_date(*d),
        })
        .collect()
}

/// Header plus one record per date, for the joined series table.
fn build_table_records(table: &SeriesTable) -> Vec<Vec<String>> {
    let mut records = Vec::with_capacity(table.len() + 1);
    let mut header = vec!["Date".to_string()];
    header.extend(table.columns.iter().cloned());
    records.push(header);
    for (date, values) in &table.rows {
        let mut record = vec![format_date(*date)];
        record.extend(values.iter().map(|v| format_number(*v)));
        records.push(record);
    }
    records
}

// -- Generic writers --

fn print_rows<R: Tabled + Serialize>(rows: Vec<R>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

// -- Per-record output --

pub fn print_series(series: &Series, format: &OutputFormat) -> Result<()> {
    if *format == OutputFormat::Json {
        let json: serde_json::Map<String, serde_json::Value> = series
            .iter()
            .map(|(date, value)| (format_date(*date), serde_json::json!(value)))
            .collect();
        print_json(&json);
        return Ok(());
    }
    print_rows(build_observation_rows(series), format)
}

pub fn print_revisions(observations: &[Observation], format: &OutputFormat) -> Result<()> {
    if *format == OutputFormat::Json {
        print_json(observations);
        return Ok(());
    }
    print_rows(build_revision_rows(observations), format)
}

pub fn print_series_info(infos: &[SeriesInfo], format: &OutputFormat) -> Result<()> {
    if *format == OutputFormat::Json {
        print_json(infos);
        return Ok(());
    }
    print_rows(build_series_info_rows(infos), format)
}

pub fn print_vintage_dates(dates: &[NaiveDate], format: &OutputFormat) -> Result<()> {
    print_rows(build_vintage_rows(dates), format)
}

pub fn print_series_table(table: &SeriesTable, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = table
                .rows
                .iter()
                .map(|(date, values)| {
                    let mut row = serde_json::Map::new();
                    row.insert("date".to_string(), serde_json::json!(format_date(*date)));
                    for (column, value) in table.columns.iter().zip(values) {
                        row.insert(column.clone(), serde_json::json!(value));
                    }
                    serde_json::Value::Object(row)
                })
                .collect();
            print_json(&rows);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for record in build_table_records(table) {
                wtr.write_record(&record)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Table | OutputFormat::Markdown => {
            let mut builder = Builder::default();
            for record in build_table_records(table) {
                builder.push_record(record);
            }
            let mut rendered = builder.build();
            if *format == OutputFormat::Markdown {
                rendered.with(Style::markdown());
            }
            println!("{}", rendered);
        }
    }
    Ok(())
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Missing values print as `NaN`, never as zero.
fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NaN".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, DATE_FORMAT).unwrap()
    }

    fn observation(obs: &str, start: &str, end: Option<&str>, value: Option<f64>) -> Observation {
        Observation {
            date: date(obs),
            realtime_start: date(start),
            realtime_end: end.map(date),
            value,
        }
    }

    #[test]
    fn test_format_number_missing() {
        assert_eq!(format_number(None), "NaN");
        assert_eq!(format_number(Some(0.0)), "0");
        assert_eq!(format_number(Some(2002.28)), "2002.28");
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::from_name("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_name("csv"), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_name("md"), OutputFormat::Markdown);
        assert_eq!(OutputFormat::from_name("bogus"), OutputFormat::Table);
    }

    #[test]
    fn test_build_observation_rows_sorted() {
        let series: Series = [
            (date("2014-09-03"), Some(2000.72)),
            (date("2014-09-02"), None),
        ]
        .into_iter()
        .collect();
        let rows = build_observation_rows(&series);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2014-09-02");
        assert_eq!(rows[0].value, "NaN");
        assert_eq!(rows[1].value, "2000.72");
    }

    #[test]
    fn test_build_revision_rows_open_end_is_blank() {
        let rows = build_revision_rows(&[
            observation("2014-07-01", "2014-10-30", Some("2014-11-24"), Some(17535.4)),
            observation("2014-07-01", "2014-12-23", None, Some(17599.8)),
        ]);
        assert_eq!(rows[0].realtime_end, "2014-11-24");
        assert_eq!(rows[1].realtime_end, "");
        assert_eq!(rows[1].realtime_start, "2014-12-23");
    }

    #[test]
    fn test_build_table_records_header_first() {
        let table = SeriesTable::from_series(vec![
            (
                "SP500".to_string(),
                [(date("2014-09-02"), Some(2002.28))].into_iter().collect(),
            ),
            (
                "DJIA".to_string(),
                [(date("2014-09-03"), Some(17078.28))].into_iter().collect(),
            ),
        ]);
        let records = build_table_records(&table);
        assert_eq!(records[0], vec!["Date", "SP500", "DJIA"]);
        assert_eq!(records[1], vec!["2014-09-02", "2002.28", "NaN"]);
        assert_eq!(records[2], vec!["2014-09-03", "NaN", "17078.28"]);
    }

    #[test]
    fn test_build_vintage_rows() {
        let rows = build_vintage_rows(&[date("1958-12-21")]);
        assert_eq!(rows[0].vintage_date, "1958-12-21");
    }
}
