//! Paginated display of the filtered trips as a fixed-width text table.

use std::io::{BufRead, Write};

use log::debug;
use polars::prelude::*;

use crate::console::Console;
use crate::error::Result;
use crate::loader::TripTable;
use crate::schema::TIMESTAMP_FORMAT;

pub const PAGE_SIZE: usize = 5;

const SHOW_PROMPT: &str =
    "\nEnter 'yes' if you want to see the raw data, otherwise will be considered as 'no': ";
const MORE_PROMPT: &str = "\nEnter 'yes' to see more, any other key to stop: ";
const NULL_CELL: &str = "NaN";

/// One column of the table, every cell already rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    pub name: String,
    pub cells: Vec<String>,
}

/// Render every column of `df` as text, in the frame's column order.
pub fn raw_columns(df: &DataFrame) -> Result<Vec<RawColumn>> {
    let exprs: Vec<Expr> = df
        .get_columns()
        .iter()
        .map(|c| {
            let name = c.name().as_str();
            match c.dtype() {
                DataType::Datetime(_, _) => col(name).dt().strftime(TIMESTAMP_FORMAT),
                _ => col(name).cast(DataType::String),
            }
        })
        .collect();
    let text = df.clone().lazy().select(exprs).collect()?;

    text.get_columns()
        .iter()
        .map(|c| -> Result<RawColumn> {
            let cells = c
                .str()?
                .into_iter()
                .map(|v| v.unwrap_or(NULL_CELL).to_string())
                .collect();
            Ok(RawColumn {
                name: c.name().to_string(),
                cells,
            })
        })
        .collect()
}

/// Column widths for a set of rendered columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLayout {
    widths: Vec<usize>,
}

impl RawLayout {
    /// Each width is the longest of the header and the column's cells.
    pub fn new(columns: &[RawColumn]) -> Self {
        let widths = columns
            .iter()
            .map(|c| {
                c.cells
                    .iter()
                    .map(|cell| cell.chars().count())
                    .fold(c.name.chars().count(), usize::max)
            })
            .collect();
        Self { widths }
    }

    #[cfg(test)]
    fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Left-aligned cells joined by " | ".
    pub fn line<'a, I>(&self, cells: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        cells
            .into_iter()
            .zip(&self.widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Dashes spanning a full line.
    pub fn separator(&self) -> String {
        let gaps = 3 * self.widths.len().saturating_sub(1);
        "-".repeat(self.widths.iter().sum::<usize>() + gaps)
    }

    pub fn header(&self, columns: &[RawColumn]) -> String {
        self.line(columns.iter().map(|c| c.name.as_str()))
    }

    pub fn row(&self, columns: &[RawColumn], index: usize) -> String {
        self.line(columns.iter().map(|c| c.cells[index].as_str()))
    }
}

/// Offer the raw trips, then print them [`PAGE_SIZE`] at a time for as long
/// as the user keeps answering "yes". Returns the number of pages shown.
pub fn browse_raw_data<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    table: &TripTable,
) -> Result<usize> {
    if !console.confirm(SHOW_PROMPT)? {
        return Ok(0);
    }

    let columns = raw_columns(table.frame())?;
    let layout = RawLayout::new(&columns);

    console.say("\n")?;
    console.say(&layout.header(&columns))?;
    console.say(&layout.separator())?;

    let height = table.height();
    let mut pages = 0;
    for start in (0..height).step_by(PAGE_SIZE) {
        let end = (start + PAGE_SIZE).min(height);
        for index in start..end {
            console.say(&layout.row(&columns, index))?;
        }
        pages += 1;

        if end == height || !console.confirm(MORE_PROMPT)? {
            break;
        }
        console.say("")?;
    }

    debug!("raw view showed {pages} page(s) of {height} rows");
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::City;
    use std::io::Cursor;

    fn table(rows: usize) -> TripTable {
        let ids: Vec<String> = (1..=rows).map(|i| format!("trip-{i}")).collect();
        let durations: Vec<f64> = (1..=rows).map(|i| i as f64 * 10.0).collect();
        let df = df!(
            "Start Station" => ids,
            "Trip Duration" => durations
        )
        .unwrap();
        TripTable::new(City::Washington, df)
    }

    fn browse(table: &TripTable, input: &str) -> (usize, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let pages = browse_raw_data(&mut console, table).unwrap();
        (pages, String::from_utf8(console.into_output()).unwrap())
    }

    #[test]
    fn test_widths_cover_header_and_cells() {
        let columns = vec![
            RawColumn {
                name: "id".into(),
                cells: vec!["1".into(), "12345".into()],
            },
            RawColumn {
                name: "station".into(),
                cells: vec!["A".into(), "Bé".into()],
            },
        ];
        let layout = RawLayout::new(&columns);
        assert_eq!(layout.widths(), &[5, 7]);
        assert_eq!(layout.header(&columns), "id    | station");
        assert_eq!(layout.row(&columns, 1), "12345 | Bé     ");
        assert_eq!(layout.separator().len(), 5 + 7 + 3);
    }

    #[test]
    fn test_no_columns_no_separator() {
        let layout = RawLayout::new(&[]);
        assert_eq!(layout.separator(), "");
    }

    #[test]
    fn test_declining_shows_nothing() {
        let (pages, output) = browse(&table(7), "no\n");
        assert_eq!(pages, 0);
        assert_eq!(output, SHOW_PROMPT);
    }

    #[test]
    fn test_closed_input_shows_nothing() {
        let (pages, output) = browse(&table(7), "");
        assert_eq!(pages, 0);
        assert_eq!(output, SHOW_PROMPT);
    }

    #[test]
    fn test_seven_rows_two_pages_then_stop() {
        let (pages, output) = browse(&table(7), "yes\nyes\nyes\n");
        assert_eq!(pages, 2);
        assert_eq!(output.matches(MORE_PROMPT).count(), 1);
        for i in 1..=7 {
            assert!(output.contains(&format!("trip-{i}")));
        }
        // the more-prompt sits between row 5 and row 6
        let prompt_at = output.find(MORE_PROMPT).unwrap();
        assert!(output.find("trip-5").unwrap() < prompt_at);
        assert!(output.find("trip-6").unwrap() > prompt_at);
    }

    #[test]
    fn test_stop_after_first_page() {
        let (pages, output) = browse(&table(12), "yes\nnope\n");
        assert_eq!(pages, 1);
        assert!(output.contains("trip-5 "));
        assert!(!output.contains("trip-6"));
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_prompt() {
        let (pages, output) = browse(&table(10), "YES\nYes\n");
        assert_eq!(pages, 2);
        assert_eq!(output.matches(MORE_PROMPT).count(), 1);
    }

    #[test]
    fn test_rendering_of_numbers_and_nulls() {
        let df = df!(
            "Gender" => &[Some("Male"), None],
            "month" => &[1, 6]
        )
        .unwrap();
        let columns = raw_columns(&df).unwrap();
        assert_eq!(columns[0].cells, vec!["Male".to_string(), "NaN".to_string()]);
        assert_eq!(columns[1].cells, vec!["1".to_string(), "6".to_string()]);
    }
}
