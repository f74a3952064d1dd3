//! NAIF Double precision Array File (DAF) container.
//!
//! A DAF is a sequence of 1024-byte records. Record 1 is the file record;
//! summary records form a doubly linked list starting at `FWARD`, each one
//! followed by a name record. Array data is addressed in 1-based 8-byte
//! words.
//!
//! Reference: NAIF DAF Required Reading (public domain).

use crate::error::KernelError;

/// Bytes per DAF record.
pub const RECORD_BYTES: usize = 1024;

/// Doubles per DAF record.
pub const RECORD_WORDS: usize = RECORD_BYTES / 8;

/// Binary layout of the numeric data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    /// Tag stored in the file record's `LOCFMT` field.
    pub const fn tag(self) -> &'static [u8; 8] {
        match self {
            Self::Little => b"LTL-IEEE",
            Self::Big => b"BIG-IEEE",
        }
    }

    pub(crate) fn read_f64(self, bytes: &[u8], offset: usize) -> Option<f64> {
        let raw: [u8; 8] = bytes.get(offset..offset + 8)?.try_into().ok()?;
        Some(match self {
            Self::Little => f64::from_le_bytes(raw),
            Self::Big => f64::from_be_bytes(raw),
        })
    }

    pub(crate) fn read_i32(self, bytes: &[u8], offset: usize) -> Option<i32> {
        let raw: [u8; 4] = bytes.get(offset..offset + 4)?.try_into().ok()?;
        Some(match self {
            Self::Little => i32::from_le_bytes(raw),
            Self::Big => i32::from_be_bytes(raw),
        })
    }
}

/// Parsed DAF file record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// `LOCIDW`, e.g. `DAF/SPK`.
    pub id_word: String,
    /// Number of double components per summary.
    pub nd: usize,
    /// Number of integer components per summary.
    pub ni: usize,
    /// Internal file name.
    pub internal_name: String,
    /// First summary record.
    pub forward: usize,
    /// Last summary record.
    pub backward: usize,
    /// First free address.
    pub free: usize,
    pub endian: Endian,
}

impl FileRecord {
    /// Summary size in doubles: `ND + (NI + 1) / 2`.
    pub fn summary_words(&self) -> usize {
        self.nd + self.ni.div_ceil(2)
    }
}

/// One array summary: its doubles, integers, and name.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub doubles: Vec<f64>,
    pub ints: Vec<i32>,
    pub name: String,
}

/// Parse the file record (record 1).
pub fn parse_file_record(bytes: &[u8]) -> Result<FileRecord, KernelError> {
    if bytes.len() < RECORD_BYTES {
        return Err(KernelError::format("file shorter than one DAF record"));
    }

    let id_word = ascii_field(&bytes[0..8]);
    if !(id_word.starts_with("DAF/") || id_word.starts_with("NAIF/DAF")) {
        return Err(KernelError::format(format!("unrecognised id word {id_word:?}")));
    }

    let endian = match &bytes[88..96] {
        b"LTL-IEEE" => Endian::Little,
        b"BIG-IEEE" => Endian::Big,
        // Pre-1995 files carry no LOCFMT; the small ND value tells byte order.
        _ => match Endian::Little.read_i32(bytes, 8) {
            Some(nd) if (0..=124).contains(&nd) => Endian::Little,
            _ => Endian::Big,
        },
    };

    let int_at = |offset: usize| -> Result<usize, KernelError> {
        let value = endian
            .read_i32(bytes, offset)
            .ok_or_else(|| KernelError::format("truncated file record"))?;
        usize::try_from(value)
            .map_err(|_| KernelError::format(format!("negative file record field at byte {offset}")))
    };

    let record = FileRecord {
        id_word,
        nd: int_at(8)?,
        ni: int_at(12)?,
        internal_name: ascii_field(&bytes[16..76]),
        forward: int_at(76)?,
        backward: int_at(80)?,
        free: int_at(84)?,
        endian,
    };

    if record.ni < 2 || record.summary_words() + 3 > RECORD_WORDS {
        return Err(KernelError::format(format!(
            "implausible summary shape ND={} NI={}",
            record.nd, record.ni
        )));
    }
    Ok(record)
}

/// Walk the summary record list and collect every array summary.
pub fn read_summaries(bytes: &[u8], record: &FileRecord) -> Result<Vec<Summary>, KernelError> {
    let endian = record.endian;
    let total_records = bytes.len() / RECORD_BYTES;
    let words = record.summary_words();

    let mut summaries = Vec::new();
    let mut current = record.forward;
    let mut visited = 0usize;

    while current != 0 {
        visited += 1;
        if current > total_records || visited > total_records {
            return Err(KernelError::format(format!(
                "summary record {current} outside file ({total_records} records)"
            )));
        }

        let base = (current - 1) * RECORD_BYTES;
        let control = |i: usize| endian.read_f64(bytes, base + i * 8).unwrap_or(0.0);
        let next = control(0);
        let count = control(2);
        if !(0.0..=RECORD_WORDS as f64).contains(&count) || next < 0.0 {
            return Err(KernelError::format(format!(
                "corrupt control words in summary record {current}"
            )));
        }

        let name_base = current * RECORD_BYTES;
        for i in 0..count as usize {
            let start = base + 24 + i * words * 8;
            let doubles = (0..record.nd)
                .map(|k| endian.read_f64(bytes, start + k * 8))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| KernelError::format("truncated summary"))?;
            let int_start = start + record.nd * 8;
            let ints = (0..record.ni)
                .map(|k| endian.read_i32(bytes, int_start + k * 4))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| KernelError::format("truncated summary"))?;

            let name_len = words * 8;
            let name = bytes
                .get(name_base + i * name_len..name_base + (i + 1) * name_len)
                .map(ascii_field)
                .unwrap_or_default();

            summaries.push(Summary {
                doubles,
                ints,
                name,
            });
        }

        current = next as usize;
    }

    Ok(summaries)
}

/// Byte offset of a 1-based DAF word address.
pub fn word_offset(address: usize) -> usize {
    (address.saturating_sub(1)) * 8
}

fn ascii_field(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_end_matches(['\0', ' '])
        .to_string()
}
