//! Interactive operator menu.
//!
//! Reads choices line by line from any `BufRead` and writes status lines to
//! any `Write`, so a scripted session can drive it end to end.

use std::io::{BufRead, Write};

use anyhow::Result;
use configs::{Backend, SourceKind};
use tw_core::parse_limit;
use tw_monitor::TrendMonitor;

use crate::wiring::Wiring;

fn backend_label(backend: Backend) -> &'static str {
    match backend {
        Backend::Sqlite => "SQLite",
        Backend::Mongo => "MongoDB",
    }
}

pub struct Menu<'w, R, W> {
    wiring: &'w dyn Wiring,
    input: R,
    output: W,
}

impl<'w, R: BufRead, W: Write> Menu<'w, R, W> {
    pub fn new(wiring: &'w dyn Wiring, input: R, output: W) -> Self {
        Self { wiring, input, output }
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, text: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn choose_backend(&mut self, fallback: Backend) -> Result<Option<Backend>> {
        self.say("Choose database backend:\n1) MongoDB\n2) SQLite")?;
        Ok(self.prompt("> ")?.map(|choice| match choice.as_str() {
            "1" => Backend::Mongo,
            "2" => Backend::Sqlite,
            _ => fallback,
        }))
    }

    fn choose_source(&mut self, fallback: SourceKind) -> Result<Option<SourceKind>> {
        self.say("\nChoose source:\n1) Reddit\n2) YouTube (demo)\n3) Hacker News (crawl)")?;
        Ok(self.prompt("> ")?.map(|choice| match choice.as_str() {
            "1" => SourceKind::Reddit,
            "2" => SourceKind::Youtube,
            "3" => SourceKind::Crawl,
            _ => fallback,
        }))
    }

    /// Runs until the operator exits or input ends. A backend that cannot be
    /// opened is reported and the backend prompt repeats; failing to build the
    /// source is fatal. Everything after that is reported and the loop
    /// continues.
    pub async fn run(mut self, default_backend: Backend, default_source: SourceKind) -> Result<()> {
        let Some(mut backend) = self.choose_backend(default_backend)? else {
            return Ok(());
        };
        let Some(kind) = self.choose_source(default_source)? else {
            return Ok(());
        };

        let store = loop {
            match self.wiring.open_store(backend).await {
                Ok(store) => break store,
                Err(e) => {
                    tracing::error!(error = %e, ?backend, "could not open backend");
                    self.say(format!("Could not open {} ({e}).", backend_label(backend)))?;
                    let Some(retry) = self.choose_backend(default_backend)? else {
                        return Ok(());
                    };
                    backend = retry;
                }
            }
        };
        let source = self.wiring.build_source(kind)?;
        let mut monitor = TrendMonitor::new(source, store);

        loop {
            self.say(format!(
                "\n=== TrendWatch ===\n(Current DB: {} | Source: {})\n1) Fetch & store new trends\n2) Show latest saved trends\n3) Exit\n4) Switch database backend",
                backend_label(backend),
                monitor.source().name(),
            ))?;

            let Some(choice) = self.prompt("Choose option: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => {
                    let Some(raw) = self.prompt("How many posts? (default 10): ")? else {
                        break;
                    };
                    self.say("Fetching...")?;
                    let report = monitor.fetch_and_store(parse_limit(&raw) as i64).await;
                    self.say(report)?;
                }
                "2" => {
                    let Some(raw) = self.prompt("Show how many? (default 10): ")? else {
                        break;
                    };
                    let report = monitor.show_latest(parse_limit(&raw) as i64).await;
                    self.say(format!("\n{report}"))?;
                }
                "3" => {
                    self.say("Goodbye.")?;
                    break;
                }
                "4" => {
                    self.say("\nSwitch to which backend?\n1) MongoDB\n2) SQLite")?;
                    let Some(raw) = self.prompt("> ")? else {
                        break;
                    };
                    let target = match raw.as_str() {
                        "1" => Backend::Mongo,
                        "2" => Backend::Sqlite,
                        _ => {
                            self.say("Invalid choice, keeping current backend.")?;
                            continue;
                        }
                    };
                    match self.wiring.open_store(target).await {
                        Ok(store) => {
                            monitor.set_store(store);
                            backend = target;
                            self.say(format!("Switched to {} backend.", backend_label(target)))?;
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "backend switch failed");
                            self.say(format!(
                                "Could not open {} ({e}); keeping {}.",
                                backend_label(target),
                                backend_label(backend)
                            ))?;
                        }
                    }
                }
                _ => self.say("Invalid choice.")?,
            }
        }
        Ok(())
    }
}
