// src/infrastructure/deck_store.rs
//
// Deck files are header-less CSV, one card per row, columns in CARD_FIELDS order.
use crate::domain::normalizer::{parse_from_storage, render_for_storage};
use crate::domain::{CardRow, Deck, StoreError, CARD_FIELDS};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Read every card from the deck file at `path`, in file order.
///
/// Fails with [`StoreError::NotFound`] if the file does not exist. Any bad row,
/// including a second row for a word already read, fails the whole read.
#[instrument(level = "debug")]
pub fn read_deck(path: &Path) -> Result<Deck, StoreError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
        _ => StoreError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut deck = Deck::new();
    for record in reader.records() {
        let record = record.map_err(|source| StoreError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row = record.position().map_or(0, |p| p.line());

        if record.len() != CARD_FIELDS.len() {
            return Err(StoreError::MalformedRow {
                path: path.to_path_buf(),
                row,
                expected: CARD_FIELDS.len(),
                found: record.len(),
            });
        }

        let fields: CardRow = record.deserialize(None).map_err(|source| StoreError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let card = parse_from_storage(fields).map_err(|source| StoreError::InvalidRow {
            path: path.to_path_buf(),
            row,
            source,
        })?;

        deck.push(card).map_err(|dup| StoreError::DuplicateRow {
            path: path.to_path_buf(),
            row,
            word: dup.word,
        })?;
    }

    debug!(cards = deck.len(), "Read deck");
    Ok(deck)
}

/// Write `deck` to `path`, appending or replacing the file.
///
/// An empty deck leaves the file system untouched. The store does not
/// deduplicate: callers exclude words already on file before building the deck.
/// Appending to a file whose last row lacks a line terminator adds one first.
#[instrument(level = "debug", skip(deck), fields(cards = deck.len()))]
pub fn write_deck(deck: &Deck, path: &Path, append: bool) -> Result<(), StoreError> {
    if deck.is_empty() {
        debug!("Empty deck, nothing to write");
        return Ok(());
    }

    let io_error = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .read(append)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .map_err(io_error)?;

    if append && lacks_final_newline(&mut file).map_err(io_error)? {
        debug!("Terminating last row before appending");
        file.write_all(b"\n").map_err(io_error)?;
    }

    write_rows(deck, file).map_err(|source| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    info!(?path, cards = deck.len(), append, "Wrote deck");
    Ok(())
}

fn lacks_final_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Encode `deck` as deck-file rows into any writer
pub fn write_rows<W: Write>(deck: &Deck, writer: W) -> Result<(), csv::Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    for card in deck {
        writer.serialize(render_for_storage(card))?;
    }
    writer.flush()?;
    Ok(())
}
