//! Eon Demo
//!
//! Prints a tour of eon date/time values.
//!
//! Usage: eon-demo [-v|-vv|-vvv] [PATTERN]
//!
//! PATTERN is applied to the current local time (default `yyyy/MM/dd HH:mm:ss.fff zzz`).

mod cli;
mod logging;

use clap::Parser;
use cli::Cli;
use eon_core::prelude::*;
use eon_core::ParseOptions;
use std::sync::Arc;

fn tour() -> Result<(), DateTimeError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::info!(pattern = %cli.now_pattern(), "starting tour");

    let now = EonDateTimeOffset::now_local();
    println!("Now:                {}", now.format(cli.now_pattern()));
    println!("Now (UTC):          {}", EonDateTime::now_utc());

    let day = EonDateTime::from_ymd(2023, 2, 2);
    println!("Long form:          {}", day.to_long_string());
    println!("Short form:         {}", day.to_short_string());

    let far = EonDateTime::from_ymd(60000, 12, 30);
    println!("Far future:         {} ({})", far.format("yyyy/MM/dd"), far.weekday_name().unwrap_or("?"));

    let huge = EonDateTime::from_ymd(10u128.pow(30), 1, 1).add_days(-1);
    println!("Eve of 10^30:       {}", huge);

    let parsed = EonDateTime::parse("2025/01")?;
    println!("Parsed \"2025/01\":   {}", parsed);

    let options = ParseOptions::new().with_default_year(2000);
    let partial = EonDateTime::parse_with(eon_core::earth(), "", &options)?;
    println!("Defaults only:      {}", partial);

    let rolled = EonDateTime::from_ymd_hms(2023, 13, 32, 25, 61, 61);
    println!("Rolled over:        {}", rolled);

    let month_end = EonDateTime::from_ymd(2024, 1, 31).add_months(1);
    println!("Jan 31 + 1 month:   {}", month_end.format("yyyy/MM/dd"));

    let offset = EonDateTimeOffset::parse("2023/06/01 12:00:00 5:30")?;
    println!("With offset:        {}", offset);
    println!("Base (UTC):         {}", offset.base());

    let precise = EonDateTime::from_ymd(2000, 1, 1).add_nanoseconds("0.000001".parse::<Decimal>()?);
    println!("Y2K + 1 fs:         {} + {} s", precise, precise.second());

    let decimal_time = Calendar::builder("Decimal Time").with_time_units(100, 100, 10).build()?;
    let custom = EonDateTime::from_fields_in(Arc::new(decimal_time), 2023, 2, 2, 7, 50, 0);
    println!("Decimal time:       {} ({} s/day)", custom, custom.calendar().seconds_in_day());

    Ok(())
}

fn main() {
    if let Err(e) = tour() {
        tracing::error!(code = e.code(), error = %e, "tour failed");
        eprintln!("Error [{}]: {}", e.code(), e);
        std::process::exit(1);
    }
}
