use std::io::{self, BufRead, Write};

use crate::filter::FilterSet;
use crate::library::{LibraryError, MusicLibrary};
use crate::report::Reporter;
use crate::song::Song;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("login failed")]
    Authentication(#[source] LibraryError),
    #[error("fetching songs failed")]
    Fetch(#[source] LibraryError),
    #[error("deleting song {id} failed after {deleted} of {total} deletions")]
    Delete {
        id: String,
        deleted: usize,
        total: usize,
        source: LibraryError,
    },
    #[error("logout failed")]
    Logout(#[source] LibraryError),
    #[error("reading confirmation failed")]
    Io(#[from] io::Error),
}

/// How a run ended, all of these are successful exits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    DryRun { found: usize },
    NothingToDelete,
    Refused { pending: usize },
    Deleted { count: usize },
}

#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub filters: FilterSet,
    pub dry_run: bool,
    /// Ask before deleting.
    pub confirm: bool,
}

/// A yes/no question answered with a single line of input.
pub struct Confirm<R, O> {
    input: R,
    output: O,
}

impl<R: BufRead, O: Write> Confirm<R, O> {
    pub fn new(input: R, output: O) -> Self { Self { input, output } }

    /// Only a literal `y` or `Y` accepts; anything else, end of input
    /// and undecodable bytes included, refuses.
    pub fn ask(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;

        let mut line = Vec::new();
        self.input.read_until(b'\n', &mut line)?;

        while matches!(line.last(), Some(b'\n' | b'\r')) {
            line.pop();
        }

        Ok(matches!(line.as_slice(), b"y" | b"Y"))
    }
}

/// Login, fetch, filter, decide, delete, logout.
pub struct DeletionWorkflow<L, W> {
    library: L,
    reporter: Reporter<W>,
}

impl<L: MusicLibrary, W: Write> DeletionWorkflow<L, W> {
    pub fn new(library: L, reporter: Reporter<W>) -> Self { Self { library, reporter } }

    pub fn into_parts(self) -> (L, Reporter<W>) { (self.library, self.reporter) }

    /// Runs one invocation.
    ///
    /// Once login succeeded the session is always closed, also when a
    /// later step fails. A delete failure stops the loop; songs deleted
    /// before it stay deleted.
    pub fn run<R: BufRead, O: Write>(
        &mut self,
        user: &str,
        pass: &str,
        settings: &Settings,
        confirm: &mut Confirm<R, O>,
    ) -> Result<Outcome, WorkflowError> {
        self.library
            .login(user, pass)
            .map_err(WorkflowError::Authentication)?;

        let result = self.purge(settings, confirm);

        match (result, self.library.logout()) {
            (Ok(outcome), Ok(())) => {
                self.reporter.info("\nAll done!");
                Ok(outcome)
            }
            (Ok(_), Err(err)) => Err(WorkflowError::Logout(err)),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(logout)) => {
                self.reporter.warn(format_args!("Logout failed: {}", logout));
                Err(err)
            }
        }
    }

    fn purge<R: BufRead, O: Write>(
        &mut self,
        settings: &Settings,
        confirm: &mut Confirm<R, O>,
    ) -> Result<Outcome, WorkflowError> {
        let catalog = self.library.songs().map_err(WorkflowError::Fetch)?;
        let delete_songs = settings.filters.select(catalog);

        if settings.dry_run {
            return Ok(self.report(&delete_songs));
        }

        if delete_songs.is_empty() {
            self.reporter.info("No songs to delete");
            return Ok(Outcome::NothingToDelete);
        }

        if settings.confirm {
            let question = format!(
                "Are you sure you want to delete {} song(s) from the library? (y/n)",
                delete_songs.len()
            );
            if !confirm.ask(&question)? {
                self.reporter.info("No songs deleted.");
                return Ok(Outcome::Refused {
                    pending: delete_songs.len(),
                });
            }
        }

        self.delete(&delete_songs)
    }

    fn report(&mut self, songs: &[Song]) -> Outcome {
        self.reporter
            .info(format_args!("Found {} songs to delete", songs.len()));

        if songs.is_empty() {
            self.reporter.info("\nNo songs to delete");
        } else {
            self.reporter.info("\nSongs to delete:\n");
            for song in songs {
                self.reporter.quiet(song);
            }
        }

        Outcome::DryRun { found: songs.len() }
    }

    fn delete(&mut self, songs: &[Song]) -> Result<Outcome, WorkflowError> {
        let total = songs.len();
        let pad = total.to_string().len();

        self.reporter
            .info(format_args!("\nDeleting {} songs from the library\n", total));

        for (deleted, song) in songs.iter().enumerate() {
            self.reporter.debug(format_args!("Deleting {}", song));

            self.library
                .delete_song(&song.id)
                .map_err(|source| WorkflowError::Delete {
                    id: song.id.clone(),
                    deleted,
                    total,
                    source,
                })?;

            self.reporter.info(format_args!(
                "Deleted {:0pad$}/{} song(s) from the library",
                deleted + 1,
                total,
                pad = pad
            ));
        }

        Ok(Outcome::Deleted { count: total })
    }
}
