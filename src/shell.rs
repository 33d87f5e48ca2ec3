//! Menu-driven front end over a [`RecordStore`].
//!
//! Screens mirror the classic flow: the home listing, a selected record with
//! edit/delete, an add form, and the upcoming list. Candidates rejected by the
//! schema are reported and the form is shown again until it commits or input ends.

use chrono::NaiveDate;
use std::io::{self, BufRead, ErrorKind, Write};
use tabled::{settings::Style, Table, Tabled};

use crate::error::{AnniversaryError, Result};
use crate::record::{parse_date, AddressUpdate, Anniversary, AnniversaryUpdate, Upcoming};
use crate::store::RecordStore;

const LABEL_WIDTH: usize = 32;

#[derive(Tabled)]
struct ListingRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "NAMES")]
    names: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "TYPE")]
    kind: String,
}

#[derive(Tabled)]
struct UpcomingRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "NAMES")]
    names: String,
    #[tabled(rename = "TYPE")]
    kind: String,
    #[tabled(rename = "ON")]
    date: String,
    #[tabled(rename = "YEARS")]
    years: i32,
    #[tabled(rename = "IN")]
    days: String,
}

/// Table of all records, numbered from 1
pub fn render_listing(records: &[Anniversary]) -> String {
    if records.is_empty() {
        return "There are currently no saved anniversaries.".to_string();
    }

    let rows: Vec<ListingRow> = records
        .iter()
        .enumerate()
        .map(|(i, a)| ListingRow {
            index: i + 1,
            names: a.names.clone(),
            date: a.anniversary_date.to_string(),
            kind: a.anniversary_type.clone(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn render_details(record: &Anniversary) -> String {
    let mut lines = vec![
        detail("Names:", &record.names),
        detail("Date:", &record.anniversary_date.to_string()),
        detail("Type:", &record.anniversary_type),
        detail("Description:", record.description.as_deref().unwrap_or("")),
        detail("Email:", record.email.as_deref().unwrap_or("")),
        detail("Phone:", record.phone.as_deref().unwrap_or("")),
    ];

    match &record.address {
        Some(address) => {
            lines.push(detail(
                "Address:",
                address.street_address.as_deref().unwrap_or(""),
            ));
            let locality = [
                address.municipality.as_deref(),
                address.province.as_deref(),
                address.postal_code.as_deref(),
            ]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("  ");
            lines.push(detail("", &locality));
        }
        None => lines.push(detail("Address:", "")),
    }

    lines.join("\n")
}

fn optional(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

fn detail(label: &str, value: &str) -> String {
    format!("  {:<16}{}", label, value).trim_end().to_string()
}

pub fn render_upcoming(records: &[Anniversary], upcoming: &[Upcoming], days: i64) -> String {
    if upcoming.is_empty() {
        return format!("No anniversaries in the next {days} days.");
    }

    let rows: Vec<UpcomingRow> = upcoming
        .iter()
        .map(|u| {
            let record = &records[u.index];
            UpcomingRow {
                index: u.index + 1,
                names: record.names.clone(),
                kind: record.anniversary_type.clone(),
                date: u.date.to_string(),
                years: u.years,
                days: match u.days_away {
                    0 => "today".to_string(),
                    1 => "1 day".to_string(),
                    n => format!("{n} days"),
                },
            }
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Interactive session loop. Ends on `x` or end of input.
pub struct Shell<'a, R, W> {
    store: &'a mut RecordStore,
    input: R,
    out: W,
    today: NaiveDate,
    upcoming_days: i64,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(
        store: &'a mut RecordStore,
        input: R,
        out: W,
        today: NaiveDate,
        upcoming_days: i64,
    ) -> Self {
        Self {
            store,
            input,
            out,
            today,
            upcoming_days,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        match self.home() {
            Err(AnniversaryError::Io(e)) if e.kind() == ErrorKind::UnexpectedEof => Ok(()),
            other => other,
        }
    }

    fn home(&mut self) -> Result<()> {
        loop {
            self.banner("All Anniversaries")?;
            writeln!(self.out, "{}", render_listing(self.store.list()))?;
            writeln!(self.out)?;
            writeln!(self.out, "  Press # from the above list to select an entry.")?;
            writeln!(self.out, "  Press N to add a new anniversary.")?;
            writeln!(self.out, "  Press U to list upcoming anniversaries.")?;
            writeln!(self.out, "  Press X to quit.")?;

            let command = self.prompt("Enter a command: ")?;
            let command = command.trim();
            if command.is_empty() {
                continue;
            }

            if command.chars().all(|c| c.is_ascii_digit()) {
                // "0" and overflow both fall outside the listing
                let index = command
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .unwrap_or(usize::MAX);
                self.selected(index)?;
                continue;
            }

            match command.to_lowercase().as_str() {
                "n" => self.add()?,
                "u" => self.upcoming()?,
                "x" => return Ok(()),
                _ => {}
            }
        }
    }

    fn selected(&mut self, index: usize) -> Result<()> {
        loop {
            let record = match self.store.get(index) {
                Ok(r) => r.clone(),
                Err(AnniversaryError::IndexOutOfRange { .. }) => return Ok(()),
                Err(e) => return Err(e),
            };

            self.banner("Selected Anniversary")?;
            writeln!(self.out, "{}", render_details(&record))?;
            writeln!(self.out)?;
            writeln!(self.out, "  Press E to edit this anniversary.")?;
            writeln!(self.out, "  Press D to delete this anniversary.")?;
            writeln!(self.out, "  Press M to return to the main menu.")?;

            let command = self.prompt("Enter command: ")?;
            match command.trim().to_lowercase().as_str() {
                "e" => return self.edit(index, &record),
                "d" => {
                    if self.delete(index, &record)? {
                        return Ok(());
                    }
                }
                "m" => return Ok(()),
                _ => {}
            }
        }
    }

    fn add(&mut self) -> Result<()> {
        loop {
            self.banner("Add a New Anniversary")?;
            writeln!(self.out, "Please key-in values for the following fields...")?;
            writeln!(self.out)?;

            let names = self.field("Name(s):")?;
            let type_label = self.hinted("Anniversary Type:", &["anniversaryType"]);
            let kind = self.field(&type_label)?;
            let description = self.field("Description:")?;
            let date = self.required_date("Anniversary Date (yyyy-mm-dd):")?;
            let email = self.field("Email:")?;
            let phone = self.field("Phone #:")?;
            let address = self.address_fields(None)?;

            let candidate = Anniversary {
                names,
                anniversary_date: date,
                anniversary_type: kind,
                description: optional(description),
                email: optional(email),
                phone: optional(phone),
                address: address.to_address(),
            };

            let outcome = self.store.add(candidate);
            if self.report(outcome)? {
                return Ok(());
            }
        }
    }

    fn edit(&mut self, index: usize, current: &Anniversary) -> Result<()> {
        loop {
            self.banner("Edit Selected Anniversary")?;
            writeln!(
                self.out,
                "KEY-IN NEW values for any field, or PRESS ENTER to accept the current field value..."
            )?;
            writeln!(self.out)?;

            let names = self.field(&format!("Name(s) \"{}\":", current.names))?;
            let kind = self.field(&format!(
                "Anniversary Type \"{}\":",
                current.anniversary_type
            ))?;
            let description = self.field(&format!(
                "Description \"{}\":",
                current.description.as_deref().unwrap_or("")
            ))?;
            let date = self.optional_date(&format!(
                "Anniversary Date (yyyy-mm-dd) \"{}\":",
                current.anniversary_date
            ))?;
            let email = self.field(&format!(
                "Email \"{}\":",
                current.email.as_deref().unwrap_or("")
            ))?;
            let phone = self.field(&format!(
                "Phone # \"{}\":",
                current.phone.as_deref().unwrap_or("")
            ))?;
            let address = self.address_fields(Some(current))?;

            let update = AnniversaryUpdate {
                names: Some(names),
                anniversary_date: date,
                anniversary_type: Some(kind),
                description: Some(description),
                email: Some(email),
                phone: Some(phone),
                address,
            };

            let outcome = self.store.edit(index, &update);
            if self.report(outcome)? {
                return Ok(());
            }
        }
    }

    /// `true` once the record is gone, `false` to go back to the record.
    fn delete(&mut self, index: usize, record: &Anniversary) -> Result<bool> {
        loop {
            self.banner("Delete Selected Anniversary")?;
            let answer = self.prompt(&format!(
                "Delete \"{}\" anniversary for \"{}\"? (Y/N): ",
                record.anniversary_type, record.names
            ))?;
            match answer.trim().to_lowercase().as_str() {
                "y" => {
                    let outcome = self.store.delete(index).map(|_| ());
                    if self.report(outcome)? {
                        return Ok(true);
                    }
                }
                "n" => return Ok(false),
                _ => {}
            }
        }
    }

    fn upcoming(&mut self) -> Result<()> {
        self.banner("Upcoming Anniversaries")?;
        let upcoming = self.store.upcoming(self.today, self.upcoming_days);
        writeln!(
            self.out,
            "{}",
            render_upcoming(self.store.list(), &upcoming, self.upcoming_days)
        )?;
        self.prompt("\nPress Enter to return to the main menu.")?;
        Ok(())
    }

    fn address_fields(&mut self, current: Option<&Anniversary>) -> Result<AddressUpdate> {
        let existing = current.and_then(|c| c.address.clone()).unwrap_or_default();
        let label = |name: &str, value: &Option<String>| match current {
            Some(_) => format!("{name} \"{}\":", value.as_deref().unwrap_or("")),
            None => format!("{name}:"),
        };

        let street_address = self.field(&label("Street Address", &existing.street_address))?;
        let municipality = self.field(&label("Municipality", &existing.municipality))?;
        let province_label =
            self.hinted(&label("Province", &existing.province), &["address", "province"]);
        let province = self.field(&province_label)?;
        let postal_code = self.field(&label("PostalCode", &existing.postal_code))?;

        Ok(AddressUpdate {
            street_address: Some(street_address),
            municipality: Some(municipality),
            province: Some(province),
            postal_code: Some(postal_code),
        })
    }

    /// Append the schema's accepted values, if it enumerates any
    fn hinted(&self, label: &str, property: &[&str]) -> String {
        match self.store.validator().allowed_values(property) {
            Some(values) if !values.is_empty() => {
                format!("{} [{}]", label.trim_end_matches(':'), values.join("/")) + ":"
            }
            _ => label.to_string(),
        }
    }

    /// Show the outcome of a mutation. `true` when it committed.
    fn report(&mut self, outcome: Result<()>) -> Result<bool> {
        match outcome {
            Ok(()) => Ok(true),
            Err(AnniversaryError::Validation(violations)) => {
                writeln!(self.out)?;
                writeln!(self.out, "The following validation errors occurred....")?;
                writeln!(self.out)?;
                writeln!(self.out, "{violations}")?;
                writeln!(self.out)?;
                self.prompt(
                    "ERROR: Invalid anniversary information entered. Press Enter to make corrections.",
                )?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn required_date(&mut self, label: &str) -> Result<NaiveDate> {
        loop {
            if let Some(date) = self.optional_date(label)? {
                return Ok(date);
            }
            writeln!(self.out, "An anniversary date is required.")?;
        }
    }

    /// Blank keeps the current date; unparsable text asks again.
    fn optional_date(&mut self, label: &str) -> Result<Option<NaiveDate>> {
        loop {
            let text = self.field(label)?;
            if text.is_empty() {
                return Ok(None);
            }
            match parse_date(&text) {
                Ok(date) => return Ok(Some(date)),
                Err(e) => writeln!(self.out, "{e}")?,
            }
        }
    }

    fn field(&mut self, label: &str) -> Result<String> {
        let line = self.prompt(&format!("{:<width$}", label, width = LABEL_WIDTH))?;
        Ok(line.trim().to_string())
    }

    fn banner(&mut self, title: &str) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "ANNIVERSARY MINDER ~ {title}")?;
        writeln!(self.out, "{}", "-".repeat(50))?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.out, "{text}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "end of input").into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
