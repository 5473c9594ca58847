use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month, the unit rankings and podiums are computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            anyhow::bail!("Invalid month {} (expected 1-12)", month);
        }
        Ok(Self { year, month })
    }

    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::of_date(Local::now().date_naive())
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Spanish month name, as shown on the ranking board.
    pub fn month_name(&self) -> &'static str {
        const NAMES: [&str; 12] = [
            "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio",
            "Julio", "Agosto", "Septiembre", "Octubre", "Noviembre", "Diciembre",
        ];
        NAMES[(self.month as usize).saturating_sub(1) % 12]
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    /// Parses "MM/YYYY" (or "M/YYYY").
    fn from_str(s: &str) -> Result<Self> {
        let (month, year) = s
            .trim()
            .split_once('/')
            .with_context(|| format!("Expected MM/YYYY, got '{}'", s))?;
        let month: u32 = month.trim().parse().with_context(|| format!("Invalid month in '{}'", s))?;
        let year: i32 = year.trim().parse().with_context(|| format!("Invalid year in '{}'", s))?;
        Self::new(month, year)
    }
}
