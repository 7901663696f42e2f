//! The `name` table as a flat list of decoded records.

use read_fonts::{tables::name::Name as ReadName, types::NameId};
use write_fonts::tables::name::{Name, NameRecord as WriteNameRecord};

pub const COPYRIGHT: u16 = 0;
pub const FAMILY: u16 = 1;
pub const SUBFAMILY: u16 = 2;
pub const UNIQUE_ID: u16 = 3;
pub const FULL_NAME: u16 = 4;
pub const VERSION: u16 = 5;
pub const POSTSCRIPT_NAME: u16 = 6;
pub const TRADEMARK: u16 = 7;
pub const MANUFACTURER: u16 = 8;
pub const DESIGNER: u16 = 9;
pub const TYPOGRAPHIC_FAMILY: u16 = 16;
pub const TYPOGRAPHIC_SUBFAMILY: u16 = 17;
/// First id available to font-specific strings such as STAT labels.
pub const FIRST_FONT_SPECIFIC: u16 = 256;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub value: String,
}

impl NameRecord {
    /// The (platform, encoding, language) triple this record belongs to.
    pub fn triple(&self) -> (u16, u16, u16) {
        (self.platform_id, self.encoding_id, self.language_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    pub records: Vec<NameRecord>,
}

impl NameTable {
    pub fn new(records: Vec<NameRecord>) -> Self {
        Self { records }
    }

    /// The first record with `name_id`, preferring Windows English.
    pub fn get(&self, name_id: u16) -> Option<&str> {
        let mut matching = self.records.iter().filter(|r| r.name_id == name_id);
        let windows = self
            .records
            .iter()
            .find(|r| r.name_id == name_id && r.platform_id == 3 && r.language_id == 0x409);
        windows.or_else(|| matching.next()).map(|r| r.value.as_str())
    }

    /// Replace the text of every record with `name_id`, across all triples.
    /// Returns the number of records updated.
    pub fn set_all(&mut self, name_id: u16, value: &str) -> usize {
        let mut updated = 0;
        for record in self.records.iter_mut().filter(|r| r.name_id == name_id) {
            record.value = value.to_string();
            updated += 1;
        }
        updated
    }

    /// Set `name_id` on every triple that carries a `present_id` record,
    /// inserting the record where the triple lacks it.
    pub fn upsert_alongside(&mut self, present_id: u16, name_id: u16, value: &str) {
        let triples: Vec<_> = self
            .records
            .iter()
            .filter(|r| r.name_id == present_id)
            .map(NameRecord::triple)
            .collect();
        self.set_all(name_id, value);
        for (platform_id, encoding_id, language_id) in triples {
            let exists = self.records.iter().any(|r| {
                r.name_id == name_id && r.triple() == (platform_id, encoding_id, language_id)
            });
            if !exists {
                self.records.push(NameRecord {
                    platform_id,
                    encoding_id,
                    language_id,
                    name_id,
                    value: value.to_string(),
                });
            }
        }
    }

    /// Apply `mapper` to every record; `Some` replaces the text, `None` keeps it.
    pub fn map_records(&mut self, mut mapper: impl FnMut(u16, &str) -> Option<String>) {
        for record in &mut self.records {
            if let Some(value) = mapper(record.name_id, &record.value) {
                record.value = value;
            }
        }
    }

    pub(crate) fn from_read(name: &ReadName) -> Self {
        let records = name
            .name_record()
            .iter()
            .filter_map(|record| {
                let value = record.string(name.string_data()).ok()?.chars().collect::<String>();
                Some(NameRecord {
                    platform_id: record.platform_id(),
                    encoding_id: record.encoding_id(),
                    language_id: record.language_id(),
                    name_id: record.name_id().to_u16(),
                    value,
                })
            })
            .collect();
        Self { records }
    }

    pub(crate) fn to_write(&self) -> Name {
        let mut records = self.records.clone();
        records.sort();
        records.dedup_by(|a, b| a.triple() == b.triple() && a.name_id == b.name_id);
        Name::new(
            records
                .into_iter()
                .map(|r| {
                    WriteNameRecord::new(
                        r.platform_id,
                        r.encoding_id,
                        r.language_id,
                        NameId::new(r.name_id),
                        r.value.into(),
                    )
                })
                .collect(),
        )
    }
}
