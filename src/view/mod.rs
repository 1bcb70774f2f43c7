//! Terminal output for the read commands
//!
//! Plain line-based rendering of day/year summaries, the latest snapshot,
//! and the date listing. Up moves are red and down moves are green, matching
//! the convention of the source market.

use colored::Colorize;

use crate::dates::Adjacent;
use crate::series::{LatestQuote, PricePoint, PriceSeries, SeriesStats};
use crate::AppResult;

fn time_label(timestamp_ms: i64, intraday: bool) -> String {
    use chrono::{TimeZone, Utc};

    match Utc.timestamp_millis_opt(timestamp_ms).single() {
        Some(dt) => dt
            .format(if intraday { "%H:%M:%S" } else { "%Y-%m-%d" })
            .to_string(),
        None => "-".to_string(),
    }
}

fn change_line(stats: &SeriesStats) -> String {
    let sign = if stats.is_up { "+" } else { "" };
    let text = format!(
        "{}{:.2} ({}{})",
        sign,
        stats.change,
        sign,
        stats.change_rate
    );
    if stats.is_up {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

/// Render a one-day summary with navigation hints
pub fn display_day(date: &str, stats: &SeriesStats, points: usize, nav: &Adjacent) -> AppResult<()> {
    println!("📊 Gold price {}", date);
    println!("   Close: ¥{:.2}  {}", stats.close, change_line(stats));
    println!("   Open:  ¥{:.2}", stats.open);
    println!(
        "   High:  ¥{:.2} at {}",
        stats.high,
        stats.high_time_ms.map_or("-".into(), |t| time_label(t, true))
    );
    println!(
        "   Low:   ¥{:.2} at {}",
        stats.low,
        stats.low_time_ms.map_or("-".into(), |t| time_label(t, true))
    );
    println!("   Amplitude: {}", stats.amplitude);
    println!("   Points: {}", points);
    display_adjacent(nav)?;
    Ok(())
}

/// Render a yearly summary; the headline change compares the last two points
/// of the series, the same way the home view of the tracker does.
pub fn display_year(year: i32, stats: &SeriesStats, series: &PriceSeries) -> AppResult<()> {
    println!("📈 Gold price trend {}", year);

    if let Some(latest) = series.last() {
        let prev = series.len().checked_sub(2).map(|i| series[i]);
        println!(
            "   Latest: ¥{:.2}  {} ({})",
            latest.price,
            headline_change(latest, prev),
            time_label(latest.timestamp_ms, false)
        );
    }

    println!("   Open:  ¥{:.2}", stats.open);
    println!(
        "   High:  ¥{:.2} on {}",
        stats.high,
        stats.high_time_ms.map_or("-".into(), |t| time_label(t, false))
    );
    println!(
        "   Low:   ¥{:.2} on {}",
        stats.low,
        stats.low_time_ms.map_or("-".into(), |t| time_label(t, false))
    );
    println!(
        "   Change over period: {:.2} ({})",
        stats.change, stats.change_rate
    );
    println!("   Amplitude: {}", stats.amplitude);
    println!("   Points: {}", series.len());
    Ok(())
}

fn headline_change(latest: &PricePoint, prev: Option<PricePoint>) -> String {
    let prev_price = prev.map(|p| p.price).unwrap_or(0.0);
    let change = latest.price - prev_price;
    let rate = if prev_price != 0.0 {
        format!("{:.2}%", change / prev_price * 100.0)
    } else {
        "0.00%".to_string()
    };
    let sign = if change >= 0.0 { "+" } else { "" };
    let text = format!("{}{:.2} ({}{})", sign, change, sign, rate);
    if change >= 0.0 {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

/// Render the latest snapshot for a date
pub fn display_latest(date: &str, quote: &LatestQuote) -> AppResult<()> {
    println!("💰 Latest gold price for {}", date);
    println!("   Price: ¥{}", quote.price.as_deref().unwrap_or("-"));
    if let Some(change) = &quote.change {
        println!(
            "   Change: {} ({})",
            change,
            quote.change_rate.as_deref().unwrap_or("-")
        );
    }
    if let Some(prev) = &quote.yesterday_price {
        println!("   Previous close: ¥{}", prev);
    }
    if let Some(time) = &quote.time {
        println!("   As of: {}", time);
    }
    Ok(())
}

/// Render the list of dates with available data
pub fn display_dates(dates: &[String]) -> AppResult<()> {
    println!("📋 Available dates:");
    if dates.is_empty() {
        println!("   (No data recorded yet)");
    } else {
        for date in dates {
            println!("   {}", date);
        }
        println!("   {} dates total", dates.len());
    }
    Ok(())
}

/// Render prev/next navigation hints
pub fn display_adjacent(nav: &Adjacent) -> AppResult<()> {
    println!(
        "   ← {}  |  {} →",
        nav.prev.as_deref().unwrap_or("(none)"),
        nav.next.as_deref().unwrap_or("(none)")
    );
    Ok(())
}

/// Render the empty state for a date with no published data
pub fn display_no_data(what: &str) -> AppResult<()> {
    println!("{}", format!("No data available for {}", what).yellow());
    Ok(())
}
