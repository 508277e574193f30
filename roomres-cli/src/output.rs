//! Record output in table, JSON, CSV and TSV form.

use std::io::Write;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::Serialize;

use roomres::config::OutputFormat;
use roomres::conflict::ClassSlot;
use roomres::database::StoredNotification;
use roomres::{Conflict, Reservation, Room, User};

use crate::error::CliError;
use crate::utils::format_timestamp;

/// Output format flag; falls back to `output_format` from configuration.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Tsv => OutputFormat::Tsv,
        }
    }
}

/// A record with a fixed set of columns.
pub trait Tabular: Serialize {
    /// Column headers, lowercase.
    const HEADERS: &'static [&'static str];

    /// Cell values in header order. Empty cells are empty strings.
    fn row(&self) -> Vec<String>;
}

/// Write `records` to stdout in `format`.
pub fn print_records<T: Tabular>(records: &[T], format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    write_records(handle, records, format)
}

/// Write `records` to `out` in `format`.
pub fn write_records<W: Write, T: Tabular>(
    mut out: W,
    records: &[T],
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => {
            let header = T::HEADERS
                .iter()
                .map(|h| h.to_uppercase())
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(out, "{header}")?;
            for record in records {
                let cells: Vec<String> = record
                    .row()
                    .into_iter()
                    .map(|cell| if cell.is_empty() { "-".to_string() } else { cell })
                    .collect();
                writeln!(out, "{}", cells.join("\t"))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, records)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_delimited(out, records, b',')?,
        OutputFormat::Tsv => write_delimited(out, records, b'\t')?,
    }
    Ok(())
}

fn write_delimited<W: Write, T: Tabular>(
    out: W,
    records: &[T],
    delimiter: u8,
) -> Result<(), CliError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(out);
    writer.write_record(T::HEADERS)?;
    for record in records {
        writer.write_record(record.row())?;
    }
    writer.flush()?;
    Ok(())
}

/// A reservation as shown to users, with its effective status.
#[derive(Serialize)]
pub struct ReservationView {
    id: i64,
    room_id: i64,
    requester_id: i64,
    date: String,
    start: String,
    end: String,
    purpose: String,
    status: String,
    admin_notes: Option<String>,
    course: Option<String>,
    year: Option<String>,
    block: Option<String>,
    created_at: String,
}

impl ReservationView {
    /// Snapshot of `reservation` as seen at local time `now`.
    pub fn new(reservation: &Reservation, now: NaiveDateTime) -> Self {
        let range = reservation.time_range();
        let classification = reservation.classification();
        Self {
            id: reservation.id(),
            room_id: reservation.room_id(),
            requester_id: reservation.requester_id(),
            date: reservation.date().to_string(),
            start: range.start().format("%H:%M").to_string(),
            end: range.end().format("%H:%M").to_string(),
            purpose: reservation.purpose().to_string(),
            status: reservation.effective_status(now).to_string(),
            admin_notes: reservation.admin_notes().map(str::to_string),
            course: classification.course.clone(),
            year: classification.year.clone(),
            block: classification.block.clone(),
            created_at: format_timestamp(reservation.created_at()),
        }
    }
}

impl Tabular for ReservationView {
    const HEADERS: &'static [&'static str] = &[
        "id", "room_id", "requester_id", "date", "start", "end", "purpose", "status",
        "admin_notes", "course", "year", "block", "created_at",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.room_id.to_string(),
            self.requester_id.to_string(),
            self.date.clone(),
            self.start.clone(),
            self.end.clone(),
            self.purpose.clone(),
            self.status.clone(),
            self.admin_notes.clone().unwrap_or_default(),
            self.course.clone().unwrap_or_default(),
            self.year.clone().unwrap_or_default(),
            self.block.clone().unwrap_or_default(),
            self.created_at.clone(),
        ]
    }
}

impl Tabular for Room {
    const HEADERS: &'static [&'static str] = &[
        "id", "building", "room_number", "capacity", "room_type", "equipment", "available",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.building.clone(),
            self.room_number.clone(),
            self.capacity.to_string(),
            self.room_type.to_string(),
            self.equipment.clone().unwrap_or_default(),
            self.is_available.to_string(),
        ]
    }
}

impl Tabular for User {
    const HEADERS: &'static [&'static str] =
        &["id", "name", "email", "role", "course", "year", "block"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.role.to_string(),
            self.classification.course.clone().unwrap_or_default(),
            self.classification.year.clone().unwrap_or_default(),
            self.classification.block.clone().unwrap_or_default(),
        ]
    }
}

impl Tabular for ClassSlot {
    const HEADERS: &'static [&'static str] = &[
        "id", "room_id", "day", "start", "end", "course_code", "course_name", "instructor",
    ];

    fn row(&self) -> Vec<String> {
        let schedule = &self.schedule;
        vec![
            schedule.id.to_string(),
            schedule.room_id.to_string(),
            schedule.day_of_week.to_string(),
            schedule.time_range.start().format("%H:%M").to_string(),
            schedule.time_range.end().format("%H:%M").to_string(),
            schedule.course_code.clone(),
            schedule.course_name.clone(),
            self.instructor_name.clone(),
        ]
    }
}

impl Tabular for StoredNotification {
    const HEADERS: &'static [&'static str] =
        &["id", "kind", "reservation_id", "read", "created_at", "message"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.kind.to_string(),
            self.reservation_id.map(|id| id.to_string()).unwrap_or_default(),
            self.is_read.to_string(),
            format_timestamp(self.created_at),
            self.message.clone(),
        ]
    }
}

impl Tabular for Conflict {
    const HEADERS: &'static [&'static str] =
        &["kind", "id", "label", "party", "start", "end", "status"];

    fn row(&self) -> Vec<String> {
        vec![
            self.kind.to_string(),
            self.source_id.to_string(),
            self.label.clone(),
            self.party.clone(),
            self.time_range.start().format("%H:%M").to_string(),
            self.time_range.end().format("%H:%M").to_string(),
            self.status.map(|s| s.to_string()).unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomres::RoomType;

    fn room() -> Room {
        Room {
            id: 3,
            room_number: "10".to_string(),
            building: "Main".to_string(),
            capacity: 40,
            room_type: RoomType::Classroom,
            equipment: None,
            is_available: true,
        }
    }

    fn render(format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        write_records(&mut buffer, &[room()], format).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_table_uses_dash_for_empty_cells() {
        let text = render(OutputFormat::Table);
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID\tBUILDING\tROOM_NUMBER\tCAPACITY\tROOM_TYPE\tEQUIPMENT\tAVAILABLE"
        );
        assert_eq!(lines.next().unwrap(), "3\tMain\t10\t40\tclassroom\t-\ttrue");
    }

    #[test]
    fn test_csv_leaves_empty_cells_empty() {
        let text = render(OutputFormat::Csv);
        assert!(text.starts_with("id,building,room_number"));
        assert!(text.contains("3,Main,10,40,classroom,,true"));
    }

    #[test]
    fn test_json_is_an_array() {
        let value: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(value[0]["room_number"], "10");
        assert_eq!(value[0]["is_available"], true);
    }
}
