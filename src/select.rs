//! Interactive PDF selection: menu, manual entry, and directory search.
//!
//! ## Why injected I/O handles?
//!
//! The selector talks to the user through a `BufRead`/`Write` pair instead of
//! touching `stdin`/`stdout` directly. The binary hands it the real console;
//! tests hand it a `Cursor` with a scripted session and a `Vec<u8>` to
//! capture the prompts. Nothing else about the selector changes between the
//! two.
//!
//! The menu is a plain retry loop with validated transitions, not a state
//! machine abstraction: invalid input re-prompts with no side effects, and
//! `q` (or EOF) cancels at any prompt.

use crate::discover;
use crate::resolve::{self, clean_input, expand_home, ResolvedPdf};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Listing cap for numbered selection. Discovery itself is uncapped; only
/// the displayed list is truncated, after sorting, so what is shown stays
/// deterministic.
const MAX_LISTED: usize = 20;

/// Outcome of an interactive selection.
///
/// Cancellation is a normal termination path, not an error: callers exit
/// with status 0 when they see [`Selection::Cancelled`].
#[derive(Debug)]
pub enum Selection {
    /// The user picked a PDF and it resolved successfully.
    Pdf(ResolvedPdf),
    /// The user quit (`q` at any prompt, or end of input).
    Cancelled,
}

/// Where to go after one round of prompting.
enum Flow {
    Chosen(ResolvedPdf),
    Cancelled,
    Menu,
}

/// Drives the three selection modes over injected I/O handles.
pub struct Selector<R, W> {
    input: R,
    output: W,
    home: Option<PathBuf>,
}

impl<R: BufRead, W: Write> Selector<R, W> {
    /// Selector using the real home directory.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            home: dirs::home_dir(),
        }
    }

    /// Selector with an explicit home directory (search root for option 2
    /// and base for `~/…` display).
    pub fn with_home(input: R, output: W, home: PathBuf) -> Self {
        Self {
            input,
            output,
            home: Some(home),
        }
    }

    /// Run the selection dialogue to completion.
    ///
    /// Resolution and discovery failures are reported to the user and return
    /// to the menu; only I/O errors on the handles themselves propagate.
    pub fn select(&mut self) -> io::Result<Selection> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Choose how to select your PDF file:")?;
            writeln!(self.output, "1. Enter file path manually")?;
            writeln!(self.output, "2. Search for PDF files from home directory")?;
            writeln!(
                self.output,
                "3. Search for PDF files from a specific directory"
            )?;

            let Some(choice) = self.prompt("\nSelect option (1-3) or 'q' to quit: ")? else {
                return Ok(Selection::Cancelled);
            };

            let flow = match choice.as_str() {
                "1" => self.manual()?,
                "2" => self.search_home()?,
                "3" => self.search_directory()?,
                c if c.eq_ignore_ascii_case("q") => Flow::Cancelled,
                _ => {
                    writeln!(self.output, "Please enter 1, 2, 3, or 'q' to quit")?;
                    Flow::Menu
                }
            };

            match flow {
                Flow::Chosen(pdf) => return Ok(Selection::Pdf(pdf)),
                Flow::Cancelled => return Ok(Selection::Cancelled),
                Flow::Menu => continue,
            }
        }
    }

    /// Manual path entry: one attempt, then back to the menu on failure so
    /// the user can retry or quit rather than being trapped in a loop.
    fn manual(&mut self) -> io::Result<Flow> {
        writeln!(
            self.output,
            "\nTip: you can drag and drop a file here, or copy/paste the full path"
        )?;
        let Some(raw) = self.prompt("Enter the path to your PDF file: ")? else {
            return Ok(Flow::Cancelled);
        };
        if raw.eq_ignore_ascii_case("q") {
            return Ok(Flow::Cancelled);
        }

        match resolve::resolve(&raw) {
            Ok(pdf) => Ok(Flow::Chosen(pdf)),
            Err(e) => {
                writeln!(self.output, "{e}")?;
                Ok(Flow::Menu)
            }
        }
    }

    fn search_home(&mut self) -> io::Result<Flow> {
        let Some(home) = self.home.clone() else {
            writeln!(self.output, "Could not determine your home directory.")?;
            return Ok(Flow::Menu);
        };
        self.search_under(&home)
    }

    fn search_directory(&mut self) -> io::Result<Flow> {
        let Some(raw) = self.prompt("Enter directory to search in: ")? else {
            return Ok(Flow::Cancelled);
        };
        if raw.eq_ignore_ascii_case("q") {
            return Ok(Flow::Cancelled);
        }
        let root = expand_home(clean_input(&raw));
        self.search_under(&root)
    }

    fn search_under(&mut self, root: &Path) -> io::Result<Flow> {
        debug!("Searching for PDFs under {}", root.display());
        match discover::search(root) {
            Err(e) => {
                writeln!(self.output, "{e}")?;
                Ok(Flow::Menu)
            }
            Ok(files) if files.is_empty() => {
                writeln!(
                    self.output,
                    "No PDF files found in '{}'.",
                    self.display_path(root)
                )?;
                Ok(Flow::Menu)
            }
            Ok(files) => self.pick_from_list(&files),
        }
    }

    /// Numbered selection over a stable, already-sorted list. The list is
    /// never re-scanned while this prompt is active.
    fn pick_from_list(&mut self, files: &[PathBuf]) -> io::Result<Flow> {
        let shown = &files[..files.len().min(MAX_LISTED)];

        writeln!(self.output, "\nFound PDF files:")?;
        for (i, file) in shown.iter().enumerate() {
            writeln!(self.output, "{:2}. {}", i + 1, self.display_path(file))?;
        }
        if files.len() > shown.len() {
            writeln!(
                self.output,
                "    ... showing first {} of {} results (search a narrower directory to see the rest)",
                shown.len(),
                files.len()
            )?;
        }

        loop {
            let Some(choice) =
                self.prompt(&format!("\nSelect a file (1-{}) or 'q' to quit: ", shown.len()))?
            else {
                return Ok(Flow::Cancelled);
            };
            if choice.eq_ignore_ascii_case("q") {
                return Ok(Flow::Cancelled);
            }

            match choice.parse::<usize>() {
                Ok(n) if (1..=shown.len()).contains(&n) => {
                    // The file can vanish between listing and selection;
                    // re-resolving turns that race into a reported error
                    // instead of a downstream extraction surprise.
                    match resolve::resolve(&shown[n - 1].to_string_lossy()) {
                        Ok(pdf) => return Ok(Flow::Chosen(pdf)),
                        Err(e) => {
                            writeln!(self.output, "{e}")?;
                            return Ok(Flow::Menu);
                        }
                    }
                }
                Ok(_) => {
                    writeln!(
                        self.output,
                        "Please enter a number between 1 and {}",
                        shown.len()
                    )?;
                }
                Err(_) => {
                    writeln!(self.output, "Please enter a valid number or 'q' to quit")?;
                }
            }
        }
    }

    /// Write a prompt, flush, and read one trimmed line. `None` means end of
    /// input, which every caller treats as cancellation.
    fn prompt(&mut self, msg: &str) -> io::Result<Option<String>> {
        write!(self.output, "{msg}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Show paths under the home directory as `~/…` for a shorter listing.
    fn display_path(&self, path: &Path) -> String {
        if let Some(home) = &self.home {
            if let Ok(rel) = path.strip_prefix(home) {
                return format!("~/{}", rel.display());
            }
        }
        path.display().to_string()
    }
}
