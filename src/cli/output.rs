//! Terminal output with quiet/verbose/json modes.
//!
//! Info and success lines go to stdout unless quiet; warnings always go to
//! stderr. In JSON mode only the JSON document is written to stdout.

use std::io::{self, Write};

use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    json: bool,
}

impl OutputManager {
    pub fn new(verbose: bool, quiet: bool, json: bool) -> Self {
        Self {
            verbose,
            quiet,
            json,
        }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn prose(&self) -> bool {
        !self.quiet && !self.json
    }

    pub fn info(&self, message: &str) -> io::Result<()> {
        if self.prose() {
            writeln!(io::stdout().lock(), "{message}")?;
        }
        Ok(())
    }

    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose && self.prose() {
            writeln!(io::stdout().lock(), "{message}")?;
        }
        Ok(())
    }

    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.prose() {
            writeln!(io::stdout().lock(), "✓ {message}")?;
        }
        Ok(())
    }

    pub fn warn(&self, message: &str) -> io::Result<()> {
        writeln!(io::stderr().lock(), "{message}")
    }

    /// Pretty-print `value` as JSON. Written even when quiet.
    pub fn json<T: Serialize>(&self, value: &T) -> crate::error::Result<()> {
        let mut out = io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, value)?;
        writeln!(out)?;
        Ok(())
    }
}
