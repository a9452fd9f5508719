//! Stored-method ZIP assembly
//!
//! Writes the three-part container layout by hand: a local file record
//! per entry, the central directory, and the end-of-central-directory
//! record. Entries are never compressed; a backup that cannot be
//! corrupted by a codec bug beats a smaller one. Any standard unzip
//! tool can open the result.

use chrono::{DateTime, Datelike, Timelike, Utc};

use super::crc32::crc32;

const LOCAL_HEADER_SIG: u32 = 0x0403_4b50;
const CENTRAL_DIR_SIG: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIR_SIG: u32 = 0x0605_4b50;

const ZIP_VERSION: u16 = 20;
const METHOD_STORED: u16 = 0;

/// One named payload inside the archive
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Path inside the archive, `/`-separated
    pub name: String,
    pub data: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Assemble entries into a single archive byte stream
///
/// Entry order is preserved. Names are not deduplicated; callers own
/// uniqueness. An empty entry list yields a valid empty archive.
pub fn build_archive(entries: &[ArchiveEntry], modified: DateTime<Utc>) -> Vec<u8> {
    let dos_time = dos_time(modified);
    let dos_date = dos_date(modified);

    let mut out = Vec::new();
    let mut directory = Vec::new();

    for entry in entries {
        let name = entry.name.as_bytes();
        let crc = crc32(&entry.data);
        let size = entry.data.len() as u32;
        let offset = out.len() as u32;

        push_u32(&mut out, LOCAL_HEADER_SIG);
        push_u16(&mut out, ZIP_VERSION);
        push_u16(&mut out, 0); // general-purpose flags
        push_u16(&mut out, METHOD_STORED);
        push_u16(&mut out, dos_time);
        push_u16(&mut out, dos_date);
        push_u32(&mut out, crc);
        push_u32(&mut out, size); // compressed == uncompressed, stored
        push_u32(&mut out, size);
        push_u16(&mut out, name.len() as u16);
        push_u16(&mut out, 0); // extra field length
        out.extend_from_slice(name);
        out.extend_from_slice(&entry.data);

        push_u32(&mut directory, CENTRAL_DIR_SIG);
        push_u16(&mut directory, ZIP_VERSION); // version made by
        push_u16(&mut directory, ZIP_VERSION); // version needed
        push_u16(&mut directory, 0);
        push_u16(&mut directory, METHOD_STORED);
        push_u16(&mut directory, dos_time);
        push_u16(&mut directory, dos_date);
        push_u32(&mut directory, crc);
        push_u32(&mut directory, size);
        push_u32(&mut directory, size);
        push_u16(&mut directory, name.len() as u16);
        push_u16(&mut directory, 0); // extra field length
        push_u16(&mut directory, 0); // comment length
        push_u16(&mut directory, 0); // disk number start
        push_u16(&mut directory, 0); // internal attributes
        push_u32(&mut directory, 0); // external attributes
        push_u32(&mut directory, offset);
        directory.extend_from_slice(name);
    }

    let directory_offset = out.len() as u32;
    let directory_size = directory.len() as u32;
    out.extend_from_slice(&directory);

    push_u32(&mut out, END_OF_CENTRAL_DIR_SIG);
    push_u16(&mut out, 0); // this disk
    push_u16(&mut out, 0); // directory start disk
    push_u16(&mut out, entries.len() as u16); // entries on this disk
    push_u16(&mut out, entries.len() as u16); // entries total
    push_u32(&mut out, directory_size);
    push_u32(&mut out, directory_offset);
    push_u16(&mut out, 0); // comment length

    out
}

fn dos_date(modified: DateTime<Utc>) -> u16 {
    let year = (modified.year() - 1980).max(0) as u16;
    (year << 9) | ((modified.month() as u16) << 5) | modified.day() as u16
}

fn dos_time(modified: DateTime<Utc>) -> u16 {
    ((modified.hour() as u16) << 11)
        | ((modified.minute() as u16) << 5)
        | (modified.second() as u16 / 2)
}

fn push_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn push_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn u16_at(bytes: &[u8], pos: usize) -> u16 {
        u16::from_le_bytes([bytes[pos], bytes[pos + 1]])
    }

    fn u32_at(bytes: &[u8], pos: usize) -> u32 {
        u32::from_le_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]])
    }

    /// Walk the central directory like an unzip tool and pull every entry
    /// back out, verifying signatures and embedded checksums on the way.
    fn extract_all(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
        let eocd = bytes.len() - 22;
        assert_eq!(u32_at(bytes, eocd), END_OF_CENTRAL_DIR_SIG);
        let count = u16_at(bytes, eocd + 10) as usize;
        let directory_size = u32_at(bytes, eocd + 12) as usize;
        let directory_offset = u32_at(bytes, eocd + 16) as usize;
        assert_eq!(directory_offset + directory_size, eocd);

        let mut entries = Vec::new();
        let mut pos = directory_offset;
        for _ in 0..count {
            assert_eq!(u32_at(bytes, pos), CENTRAL_DIR_SIG);
            assert_eq!(u16_at(bytes, pos + 10), METHOD_STORED);
            let crc = u32_at(bytes, pos + 16);
            let compressed = u32_at(bytes, pos + 20) as usize;
            let uncompressed = u32_at(bytes, pos + 24) as usize;
            assert_eq!(compressed, uncompressed);
            let name_len = u16_at(bytes, pos + 28) as usize;
            let local_offset = u32_at(bytes, pos + 42) as usize;
            let name = String::from_utf8(bytes[pos + 46..pos + 46 + name_len].to_vec()).unwrap();

            assert_eq!(u32_at(bytes, local_offset), LOCAL_HEADER_SIG);
            assert_eq!(u32_at(bytes, local_offset + 14), crc);
            let local_name_len = u16_at(bytes, local_offset + 26) as usize;
            let data_start = local_offset + 30 + local_name_len;
            let data = bytes[data_start..data_start + uncompressed].to_vec();
            assert_eq!(crc32(&data), crc, "checksum mismatch for {}", name);

            entries.push((name, data));
            pos += 46 + name_len;
        }
        entries
    }

    #[test]
    fn test_round_trip_preserves_names_and_bytes() {
        let entries = vec![
            ArchiveEntry::new("backup-20241101/README.txt", b"hello".to_vec()),
            ArchiveEntry::new("backup-20241101/backup.json", br#"{"version":"1.0"}"#.to_vec()),
            ArchiveEntry::new(
                "backup-20241101/csv/fiscal-2568/all.csv",
                vec![0xEF, 0xBB, 0xBF, b'a'],
            ),
        ];

        let bytes = build_archive(&entries, Utc::now());
        let extracted = extract_all(&bytes);

        assert_eq!(extracted.len(), 3);
        for (entry, (name, data)) in entries.iter().zip(&extracted) {
            assert_eq!(&entry.name, name);
            assert_eq!(&entry.data, data);
        }
    }

    #[test]
    fn test_non_ascii_names_survive() {
        let entries = vec![ArchiveEntry::new("บัญชี/ปีงบ-2568.csv", b"data".to_vec())];
        let extracted = extract_all(&build_archive(&entries, Utc::now()));
        assert_eq!(extracted[0].0, "บัญชี/ปีงบ-2568.csv");
    }

    #[test]
    fn test_empty_list_yields_bare_end_record() {
        let bytes = build_archive(&[], Utc::now());
        assert_eq!(bytes.len(), 22);
        assert_eq!(u32_at(&bytes, 0), END_OF_CENTRAL_DIR_SIG);
        assert_eq!(u16_at(&bytes, 10), 0);
    }

    #[test]
    fn test_empty_entry_data() {
        let entries = vec![ArchiveEntry::new("empty.txt", Vec::new())];
        let extracted = extract_all(&build_archive(&entries, Utc::now()));
        assert_eq!(extracted[0].1, Vec::<u8>::new());
    }

    #[test]
    fn test_duplicate_names_kept_as_two_entries() {
        let entries = vec![
            ArchiveEntry::new("same.txt", b"one".to_vec()),
            ArchiveEntry::new("same.txt", b"two".to_vec()),
        ];
        let extracted = extract_all(&build_archive(&entries, Utc::now()));
        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted[0].1, b"one");
        assert_eq!(extracted[1].1, b"two");
    }

    #[test]
    fn test_dos_timestamp_encoding() {
        let modified = Utc.with_ymd_and_hms(2024, 11, 1, 14, 30, 45).unwrap();
        let bytes = build_archive(&[ArchiveEntry::new("a", b"x".to_vec())], modified);

        let expected_time = (14 << 11) | (30 << 5) | (45 / 2);
        let expected_date = ((2024 - 1980) << 9) | (11 << 5) | 1;
        assert_eq!(u16_at(&bytes, 10), expected_time);
        assert_eq!(u16_at(&bytes, 12), expected_date);
    }
}
