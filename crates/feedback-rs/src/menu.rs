//! Interactive numbered menu driving the record store.
//!
//! The loop is generic over its input and output so it can be scripted in
//! tests. Store errors and unreadable input are printed and the loop
//! continues; only console I/O failures end it early. End of input behaves
//! like choosing Exit.

use crate::chart::{rating_chart, rating_legend, rating_statistics};
use crate::render::{feedback_table, sentiment_report};
use colored::Colorize;
use feedback_rs_store::{FeedbackStore, SearchQuery, SentimentLabel, StoreError};
use log::debug;
use std::fmt::Display;
use std::io::{self, BufRead, Write};

const TITLE: &str = "=== Student Feedback Management System ===";
const RULE_WIDTH: usize = 100;
const NO_ENTRIES: &str = "No feedback entries found!";
const INVALID_CHOICE: &str = "Invalid choice! Please try again.";
const FAREWELL: &str = "Thank you for using the Student Feedback Management System!";

/// Top-level menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Delete,
    Search,
    DisplayAll,
    SentimentSummary,
    RatingChart,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::Add,
        MenuChoice::Delete,
        MenuChoice::Search,
        MenuChoice::DisplayAll,
        MenuChoice::SentimentSummary,
        MenuChoice::RatingChart,
        MenuChoice::Exit,
    ];

    pub fn title(self) -> &'static str {
        match self {
            MenuChoice::Add => "Add Feedback",
            MenuChoice::Delete => "Delete Feedback",
            MenuChoice::Search => "Search Feedback",
            MenuChoice::DisplayAll => "Display All Feedback",
            MenuChoice::SentimentSummary => "Show Sentiment Summary",
            MenuChoice::RatingChart => "Show Rating Chart",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Parse a 1-based menu number.
    pub fn parse(input: &str) -> Option<Self> {
        let index: usize = input.trim().parse().ok()?;
        Self::ALL.get(index.checked_sub(1)?).copied()
    }
}

/// Whether the loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Console front end owning the record store.
pub struct Menu<R, W> {
    store: FeedbackStore,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(store: FeedbackStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Give back the store and the output sink.
    pub fn into_parts(self) -> (FeedbackStore, W) {
        (self.store, self.output)
    }

    /// Run until Exit is chosen or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_main_menu()?;
            let Some(choice) = self.prompt("\nEnter your choice (1-7): ")? else {
                break;
            };
            let flow = match MenuChoice::parse(&choice) {
                Some(choice) => {
                    debug!("menu choice (choice={choice:?})");
                    self.dispatch(choice)?
                }
                None => {
                    writeln!(self.output, "{INVALID_CHOICE}")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }
        writeln!(self.output, "{}", FAREWELL.green())?;
        self.output.flush()
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<Flow> {
        match choice {
            MenuChoice::Add => self.add_feedback(),
            MenuChoice::Delete => self.delete_feedback(),
            MenuChoice::Search => self.search_feedback(),
            MenuChoice::DisplayAll => self.display_all().map(|()| Flow::Continue),
            MenuChoice::SentimentSummary => self.sentiment_summary().map(|()| Flow::Continue),
            MenuChoice::RatingChart => self.rating_chart().map(|()| Flow::Continue),
            MenuChoice::Exit => Ok(Flow::Exit),
        }
    }

    fn print_main_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{}", TITLE.bold().blue())?;
        for (index, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, choice.title())?;
        }
        Ok(())
    }

    fn add_feedback(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Enter Student Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(course) = self.prompt("Enter Course: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(comment) = self.prompt("Enter Feedback: ")? else {
            return Ok(Flow::Exit);
        };
        let range = self.store.policy().rating;
        let Some(rating) = self.prompt(&format!("Enter Rating ({}-{}): ", range.min, range.max))?
        else {
            return Ok(Flow::Exit);
        };
        let Ok(rating) = rating.trim().parse::<i64>() else {
            self.print_error(format!(
                "rating must be a number between {} and {}",
                range.min, range.max
            ))?;
            return Ok(Flow::Continue);
        };

        match self.store.add(&name, &course, rating, &comment) {
            Ok(record) => {
                self.print_heading("New Feedback Entry Added:")?;
                writeln!(self.output, "{}", feedback_table([&record]))?;
                self.print_rule()?;
            }
            Err(err) => self.print_error(err)?,
        }
        Ok(Flow::Continue)
    }

    fn delete_feedback(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\nDelete by:\n1. Feedback ID\n2. Student Name")?;
        let Some(choice) = self.prompt("Enter your choice (1-2): ")? else {
            return Ok(Flow::Exit);
        };
        match choice.trim() {
            "1" => {
                let Some(id) = self.prompt_id()? else {
                    return Ok(Flow::Exit);
                };
                let Some(id) = id else {
                    return Ok(Flow::Continue);
                };
                match self.store.delete(id) {
                    Ok(_) => writeln!(self.output, "Feedback {id} deleted.")?,
                    Err(err) => self.print_error(err)?,
                }
            }
            "2" => {
                let Some(name) = self.prompt("Enter Student Name: ")? else {
                    return Ok(Flow::Exit);
                };
                match self.store.delete_by_student(&name) {
                    Ok(removed) => writeln!(
                        self.output,
                        "Deleted {} feedback entr{} for student '{}'.",
                        removed.len(),
                        if removed.len() == 1 { "y" } else { "ies" },
                        name.trim()
                    )?,
                    Err(err) => self.print_error(err)?,
                }
            }
            _ => writeln!(self.output, "{INVALID_CHOICE}")?,
        }
        Ok(Flow::Continue)
    }

    fn search_feedback(&mut self) -> io::Result<Flow> {
        if self.store.list().is_empty() {
            writeln!(self.output, "{NO_ENTRIES}")?;
            return Ok(Flow::Continue);
        }
        writeln!(
            self.output,
            "\nSearch by:\n1. Student Name or Course\n2. Feedback ID\n3. Rating\n4. Sentiment"
        )?;
        let Some(choice) = self.prompt("Enter your choice (1-4): ")? else {
            return Ok(Flow::Exit);
        };
        let query = match choice.trim() {
            "1" => {
                let Some(term) = self.prompt("Enter search term: ")? else {
                    return Ok(Flow::Exit);
                };
                SearchQuery::new().with_term(term)
            }
            "2" => match self.prompt_id()? {
                None => return Ok(Flow::Exit),
                Some(None) => return Ok(Flow::Continue),
                Some(Some(id)) => SearchQuery::new().with_id(id),
            },
            "3" => {
                let range = self.store.policy().rating;
                let Some(rating) =
                    self.prompt(&format!("Enter Rating ({}-{}): ", range.min, range.max))?
                else {
                    return Ok(Flow::Exit);
                };
                let checked = rating
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| {
                        StoreError::Validation(format!(
                            "rating must be a number between {} and {}",
                            range.min, range.max
                        ))
                    })
                    .and_then(|rating| self.store.policy().check_rating(rating));
                match checked {
                    Ok(rating) => SearchQuery::new().with_rating(rating),
                    Err(err) => {
                        self.print_error(err)?;
                        return Ok(Flow::Continue);
                    }
                }
            }
            "4" => {
                let Some(label) = self.prompt("Enter Sentiment (positive/neutral/negative): ")?
                else {
                    return Ok(Flow::Exit);
                };
                match label.parse::<SentimentLabel>() {
                    Ok(label) => SearchQuery::new().with_sentiment(label),
                    Err(err) => {
                        self.print_error(err)?;
                        return Ok(Flow::Continue);
                    }
                }
            }
            _ => {
                writeln!(self.output, "{INVALID_CHOICE}")?;
                return Ok(Flow::Continue);
            }
        };

        let mut matches = self.store.search(&query).peekable();
        if matches.peek().is_none() {
            writeln!(self.output, "No matching feedback found.")?;
            return Ok(Flow::Continue);
        }
        let table = feedback_table(matches);
        self.print_heading("Search Results:")?;
        writeln!(self.output, "{table}")?;
        self.print_rule()?;
        Ok(Flow::Continue)
    }

    fn display_all(&mut self) -> io::Result<()> {
        if self.store.list().is_empty() {
            return writeln!(self.output, "{NO_ENTRIES}");
        }
        let table = feedback_table(self.store.list());
        self.print_heading("All Feedback Entries:")?;
        writeln!(self.output, "{table}")?;
        self.print_rule()
    }

    fn sentiment_summary(&mut self) -> io::Result<()> {
        if self.store.list().is_empty() {
            return writeln!(self.output, "{NO_ENTRIES}");
        }
        let report = sentiment_report(&self.store.sentiment_summary());
        self.print_heading("Sentiment Analysis Summary:")?;
        write!(self.output, "{report}")?;
        self.print_rule()
    }

    fn rating_chart(&mut self) -> io::Result<()> {
        let Some(stats) = self.store.rating_stats() else {
            return writeln!(self.output, "{NO_ENTRIES}");
        };
        let distribution = self.store.rating_distribution();
        writeln!(self.output)?;
        write!(self.output, "{}", rating_chart(&distribution))?;
        writeln!(self.output, "\n{}", "Rating Share:".bold())?;
        write!(self.output, "{}", rating_legend(&distribution))?;
        self.print_heading("Rating Statistics:")?;
        write!(self.output, "{}", rating_statistics(&stats))?;
        self.print_rule()
    }

    /// `None` on end of input, `Some(None)` when the id did not parse.
    fn prompt_id(&mut self) -> io::Result<Option<Option<u32>>> {
        let Some(raw) = self.prompt("Enter Feedback ID: ")? else {
            return Ok(None);
        };
        match raw.trim().parse::<u32>() {
            Ok(id) => Ok(Some(Some(id))),
            Err(_) => {
                self.print_error("feedback id must be a positive whole number")?;
                Ok(Some(None))
            }
        }
    }

    /// Print `label` and read one line, `None` at end of input.
    ///
    /// Lines that are not valid UTF-8 are reported and the prompt repeats.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        loop {
            write!(self.output, "{label}")?;
            self.output.flush()?;
            let mut bytes = Vec::new();
            if self.input.read_until(b'\n', &mut bytes)? == 0 {
                return Ok(None);
            }
            match String::from_utf8(bytes) {
                Ok(line) => return Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
                Err(_) => self.print_error("input is not valid UTF-8")?,
            }
        }
    }

    fn print_heading(&mut self, heading: &str) -> io::Result<()> {
        writeln!(self.output, "\n{}", heading.bold())?;
        self.print_rule()
    }

    fn print_rule(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", "=".repeat(RULE_WIDTH).blue())
    }

    fn print_error(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{} {message}", "Error:".red())
    }
}
