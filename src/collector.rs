//! Interactive collection of the city, month and day filters.

use std::io::{BufRead, Write};
use std::str::FromStr;

use log::{debug, info};

use crate::console::Console;
use crate::error::Result;
use crate::selection::{City, DayFilter, FilterSelection, MonthFilter};

const CITY_PROMPT: &str = "Please choose a city (Chicago, New York city, Washington): ";
const MONTH_PROMPT: &str = "Please choose a month (all, january, february, ... , june): ";
const DAY_PROMPT: &str = "Please choose a day of the week (all, monday, tuesday, ... sunday): ";
const READ_FAILURE: &str = "You did not enter a valid option, please try again!!";

/// Prompt for city, month and day until each answer is valid.
pub fn collect_filters<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<FilterSelection> {
    let city: City = prompt_until_valid(
        console,
        CITY_PROMPT,
        "Invalid city. Please choose a valid city.",
    )?;
    let month: MonthFilter = prompt_until_valid(
        console,
        MONTH_PROMPT,
        "Invalid month. Please choose a valid month.",
    )?;
    let day: DayFilter = prompt_until_valid(
        console,
        DAY_PROMPT,
        "Invalid day. Please choose a valid day.",
    )?;

    console.rule(100)?;
    info!("selected city={city} month={month} day={day}");
    Ok(FilterSelection::new(city, month, day))
}

/// Re-prompt until the lowercased answer parses. There is no retry limit.
fn prompt_until_valid<T, R, W>(
    console: &mut Console<R, W>,
    prompt: &str,
    invalid: &str,
) -> Result<T>
where
    T: FromStr,
    R: BufRead,
    W: Write,
{
    loop {
        match console.ask(prompt)? {
            Some(answer) => match answer.to_lowercase().parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    debug!("rejected answer {answer:?}");
                    console.say(invalid)?;
                }
            },
            None => console.say(READ_FAILURE)?,
        }
    }
}
