//! Fixed-width binary record codec.
//!
//! One record is exactly [`RECORD_SIZE`] bytes, packed, little-endian:
//!
//! | Offset | Size | Field          |
//! |--------|------|----------------|
//! | 0      | 4    | id (i32)       |
//! | 4      | 256  | name           |
//! | 260    | 8    | disk_space     |
//! | 268    | 8    | ram_usage      |
//! | 276    | 8    | vram_required  |
//! | 284    | 4    | genre_id (i32) |
//! | 288    | 64   | genre_name     |
//! | 352    | 1    | completed      |
//! | 353    | 512  | url            |
//! | 865    | 4    | owner_id (i32) |
//! | 869    | 4    | rating (i32)   |
//! | 873    | 1    | is_favorite    |
//! | 874    | 1    | is_installed   |
//! | 875    | 1024 | notes          |
//! | 1899   | 256  | tags           |
//!
//! Genre and tags travel as names so a file can be loaded into a store that
//! assigns different ids.

use shelf_catalog::types::{CatalogEntry, UNRATED};

use crate::text::FixedText;
use crate::util::{read_array, read_f64_le, read_i32_le, write_bytes};

pub const RECORD_SIZE: usize = 2155;

const NAME_LEN: usize = 256;
const GENRE_LEN: usize = 64;
const URL_LEN: usize = 512;
const NOTES_LEN: usize = 1024;
const TAGS_LEN: usize = 256;

const OFF_ID: usize = 0;
const OFF_NAME: usize = OFF_ID + 4;
const OFF_DISK: usize = OFF_NAME + NAME_LEN;
const OFF_RAM: usize = OFF_DISK + 8;
const OFF_VRAM: usize = OFF_RAM + 8;
const OFF_GENRE_ID: usize = OFF_VRAM + 8;
const OFF_GENRE: usize = OFF_GENRE_ID + 4;
const OFF_COMPLETED: usize = OFF_GENRE + GENRE_LEN;
const OFF_URL: usize = OFF_COMPLETED + 1;
const OFF_OWNER: usize = OFF_URL + URL_LEN;
const OFF_RATING: usize = OFF_OWNER + 4;
const OFF_FAVORITE: usize = OFF_RATING + 4;
const OFF_INSTALLED: usize = OFF_FAVORITE + 1;
const OFF_NOTES: usize = OFF_INSTALLED + 1;
const OFF_TAGS: usize = OFF_NOTES + NOTES_LEN;

const _: () = assert!(OFF_TAGS + TAGS_LEN == RECORD_SIZE);

/// The on-disk, denormalized form of a [`CatalogEntry`].
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRecord {
    pub id: i32,
    pub name: FixedText<NAME_LEN>,
    pub disk_space: f64,
    pub ram_usage: f64,
    pub vram_required: f64,
    /// `0` when the entry has no genre.
    pub genre_id: i32,
    pub genre_name: FixedText<GENRE_LEN>,
    pub completed: bool,
    pub url: FixedText<URL_LEN>,
    pub owner_id: i32,
    /// `-1` when unrated.
    pub rating: i32,
    pub is_favorite: bool,
    pub is_installed: bool,
    pub notes: FixedText<NOTES_LEN>,
    pub tags: FixedText<TAGS_LEN>,
}

impl FixedRecord {
    /// Encode an entry. Never fails; oversized text is truncated.
    pub fn encode(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id,
            name: FixedText::encode(&entry.name),
            disk_space: entry.disk_space,
            ram_usage: entry.ram_usage,
            vram_required: entry.vram_required,
            genre_id: entry.genre_id.unwrap_or(0),
            genre_name: FixedText::encode(entry.genre.as_deref().unwrap_or("")),
            completed: entry.completed,
            url: FixedText::encode(&entry.url),
            owner_id: entry.owner_id,
            rating: entry.rating.unwrap_or(UNRATED),
            is_favorite: entry.is_favorite,
            is_installed: entry.is_installed,
            notes: FixedText::encode(&entry.notes),
            tags: FixedText::encode(&entry.tags),
        }
    }

    /// Map back to an entry, carrying the stored ids and owner as-is.
    pub fn decode(&self) -> CatalogEntry {
        let genre = self.genre_name.to_string_lossy();
        CatalogEntry {
            id: self.id,
            name: self.name.to_string_lossy(),
            disk_space: self.disk_space,
            ram_usage: self.ram_usage,
            vram_required: self.vram_required,
            genre_id: (self.genre_id != 0).then_some(self.genre_id),
            genre: (!genre.is_empty()).then_some(genre),
            completed: self.completed,
            url: self.url.to_string_lossy(),
            owner_id: self.owner_id,
            rating: (self.rating != UNRATED).then_some(self.rating),
            is_favorite: self.is_favorite,
            is_installed: self.is_installed,
            notes: self.notes.to_string_lossy(),
            tags: self.tags.to_string_lossy(),
        }
    }

    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        write_bytes(&mut buf, OFF_ID, &self.id.to_le_bytes());
        write_bytes(&mut buf, OFF_NAME, self.name.image());
        write_bytes(&mut buf, OFF_DISK, &self.disk_space.to_le_bytes());
        write_bytes(&mut buf, OFF_RAM, &self.ram_usage.to_le_bytes());
        write_bytes(&mut buf, OFF_VRAM, &self.vram_required.to_le_bytes());
        write_bytes(&mut buf, OFF_GENRE_ID, &self.genre_id.to_le_bytes());
        write_bytes(&mut buf, OFF_GENRE, self.genre_name.image());
        buf[OFF_COMPLETED] = u8::from(self.completed);
        write_bytes(&mut buf, OFF_URL, self.url.image());
        write_bytes(&mut buf, OFF_OWNER, &self.owner_id.to_le_bytes());
        write_bytes(&mut buf, OFF_RATING, &self.rating.to_le_bytes());
        buf[OFF_FAVORITE] = u8::from(self.is_favorite);
        buf[OFF_INSTALLED] = u8::from(self.is_installed);
        write_bytes(&mut buf, OFF_NOTES, self.notes.image());
        write_bytes(&mut buf, OFF_TAGS, self.tags.image());
        buf
    }

    /// Parse a record image. Any nonzero flag byte reads as `true`.
    pub fn from_bytes(buf: &[u8; RECORD_SIZE]) -> Self {
        Self {
            id: read_i32_le(buf, OFF_ID),
            name: FixedText::from_bytes(&read_array(buf, OFF_NAME)),
            disk_space: read_f64_le(buf, OFF_DISK),
            ram_usage: read_f64_le(buf, OFF_RAM),
            vram_required: read_f64_le(buf, OFF_VRAM),
            genre_id: read_i32_le(buf, OFF_GENRE_ID),
            genre_name: FixedText::from_bytes(&read_array(buf, OFF_GENRE)),
            completed: buf[OFF_COMPLETED] != 0,
            url: FixedText::from_bytes(&read_array(buf, OFF_URL)),
            owner_id: read_i32_le(buf, OFF_OWNER),
            rating: read_i32_le(buf, OFF_RATING),
            is_favorite: buf[OFF_FAVORITE] != 0,
            is_installed: buf[OFF_INSTALLED] != 0,
            notes: FixedText::from_bytes(&read_array(buf, OFF_NOTES)),
            tags: FixedText::from_bytes(&read_array(buf, OFF_TAGS)),
        }
    }

    /// Names of the text fields that lost data while encoding.
    pub fn truncated_fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_truncated()),
            ("genre", self.genre_name.is_truncated()),
            ("url", self.url.is_truncated()),
            ("notes", self.notes.is_truncated()),
            ("tags", self.tags.is_truncated()),
        ]
        .into_iter()
        .filter_map(|(field, lossy)| lossy.then_some(field))
        .collect()
    }

    pub fn is_lossy(&self) -> bool {
        !self.truncated_fields().is_empty()
    }
}

#[cfg(test)]
#[path = "tests/record_tests.rs"]
mod tests;
