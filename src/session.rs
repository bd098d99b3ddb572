use std::io::{BufRead, Write};

use log::info;

use crate::collector::collect_filters;
use crate::console::Console;
use crate::error::Result;
use crate::loader::TripLoader;
use crate::raw_view::browse_raw_data;
use crate::report;

const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";

/// One interactive exploration session: filter, load, report, browse, repeat.
pub struct Session<R, W> {
    console: Console<R, W>,
    loader: TripLoader,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(console: Console<R, W>, loader: TripLoader) -> Self {
        Self { console, loader }
    }

    /// Run passes until the user declines to restart. Returns the number of
    /// passes completed.
    pub fn run(&mut self) -> Result<usize> {
        let mut passes = 0;
        loop {
            self.run_once()?;
            passes += 1;

            if !self.console.confirm(RESTART_PROMPT)? {
                info!("session finished after {passes} pass(es)");
                return Ok(passes);
            }
        }
    }

    /// A single pass. The trip table lives only for its duration.
    pub fn run_once(&mut self) -> Result<()> {
        let selection = collect_filters(&mut self.console)?;
        let table = self.loader.load(&selection)?;

        let out = self.console.output();
        report::time_stats(&table, out)?;
        report::station_stats(&table, out)?;
        report::trip_duration_stats(&table, out)?;
        report::user_stats(&table, out)?;

        browse_raw_data(&mut self.console, &table)?;
        Ok(())
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}
