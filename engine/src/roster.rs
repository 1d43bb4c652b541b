//! Monster roster backed by one CSV definition file per monster.
//!
//! Each `<data_dir>/<name>.csv` holds a header row and a single value row.
//! Header keys are matched case-insensitively; `hp`, `moveName` and
//! `movePower` are required, `speed` falls back to [`DEFAULT_SPEED`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use encoding_rs::Encoding;

use crate::config::RosterConfig;
use crate::error::{MalformedReason, Result, RosterError};
use crate::media::resolve_media;
use crate::monster::{MonsterRecord, DEFAULT_SPEED};

const DEFINITION_EXT: &str = ".csv";

#[derive(Debug, Clone)]
pub struct Roster {
    data_dir: PathBuf,
    public_dir: PathBuf,
    media_url_prefix: String,
}

impl Roster {
    pub fn new(data_dir: impl Into<PathBuf>, public_dir: impl Into<PathBuf>) -> Self {
        Self::from_config(&RosterConfig {
            data_dir: data_dir.into(),
            public_dir: public_dir.into(),
            ..RosterConfig::default()
        })
    }

    pub fn from_config(cfg: &RosterConfig) -> Self {
        Self {
            data_dir: cfg.data_dir.clone(),
            public_dir: cfg.public_dir.clone(),
            media_url_prefix: cfg.media_url_prefix.clone(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn definition_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}{}", name, DEFINITION_EXT))
    }

    /// Case-sensitive match against the directory listing, so `EMBERCAT`
    /// does not resolve to `embercat.csv` on case-insensitive filesystems.
    fn has_exact_entry(&self, name: &str) -> Result<bool> {
        let file_name = format!("{}{}", name, DEFINITION_EXT);
        for entry in fs::read_dir(&self.data_dir)? {
            if entry?.file_name().to_str() == Some(file_name.as_str()) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Names of every monster with a definition file, sorted.
    pub fn list_identifiers(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name
                .to_str()
                .and_then(|f| f.strip_suffix(DEFINITION_EXT))
            else {
                continue;
            };
            if is_plain_identifier(name) {
                names.push(name.to_string());
            }
        }
        names.sort();
        tracing::debug!("Listed {} monsters in {}", names.len(), self.data_dir.display());
        Ok(names)
    }

    /// Load and validate one monster, then attach any media it has.
    pub fn resolve(&self, name: &str) -> Result<MonsterRecord> {
        if !is_plain_identifier(name) {
            return Err(RosterError::NotFound(name.to_string()));
        }
        let path = self.definition_path(name);
        if !path.is_file() || !self.has_exact_entry(name)? {
            tracing::debug!("No definition for '{}' at {}", name, path.display());
            return Err(RosterError::NotFound(name.to_string()));
        }

        let malformed = |reason| RosterError::Malformed {
            name: name.to_string(),
            reason,
        };
        let bytes = fs::read(&path)?;
        let text = decode_text(&bytes).ok_or_else(|| malformed(MalformedReason::Encoding))?;
        let mut record = parse_record(name, &text).map_err(|reason| {
            tracing::warn!("Rejected {}: {}", path.display(), reason);
            malformed(reason)
        })?;

        let media = resolve_media(&self.public_dir, &self.media_url_prefix, name);
        record.image_url = media.image_url;
        record.move_video_url = media.move_video_url;

        tracing::debug!(
            "Resolved '{}' (hp={}, power={}, speed={})",
            record.name,
            record.hp,
            record.move_power,
            record.speed
        );
        Ok(record)
    }

    /// Resolve both participants of a battle; the first failure wins.
    pub fn resolve_pair(&self, first: &str, second: &str) -> Result<(MonsterRecord, MonsterRecord)> {
        Ok((self.resolve(first)?, self.resolve(second)?))
    }
}

/// A name that can only refer to a single file directly inside the data dir.
fn is_plain_identifier(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// BOM-aware decode; plain UTF-8 otherwise.
fn decode_text(bytes: &[u8]) -> Option<String> {
    if let Some((enc, bom_len)) = Encoding::for_bom(bytes) {
        let (cow, had_errors) = enc.decode_without_bom_handling(&bytes[bom_len..]);
        (!had_errors).then(|| cow.into_owned())
    } else {
        std::str::from_utf8(bytes).ok().map(str::to_owned)
    }
}

/// Parse a two-row definition into a record without media.
pub fn parse_record(name: &str, text: &str) -> std::result::Result<MonsterRecord, MalformedReason> {
    let mut rows = text.trim().lines().filter(|l| !l.trim().is_empty());
    let (Some(header), Some(values)) = (rows.next(), rows.next()) else {
        return Err(MalformedReason::MissingRows);
    };
    let header: Vec<&str> = header.split(',').map(str::trim).collect();
    let values: Vec<&str> = values.split(',').map(str::trim).collect();

    let hp_col = column(&header, "hp").ok_or(MalformedReason::MissingField("hp"))?;
    let move_name_col =
        column(&header, "moveName").ok_or(MalformedReason::MissingField("moveName"))?;
    let move_power_col =
        column(&header, "movePower").ok_or(MalformedReason::MissingField("movePower"))?;
    let speed_col = column(&header, "speed");

    let hp = parse_whole("hp", cell(&values, hp_col, "hp")?)?;
    let move_name = cell(&values, move_name_col, "moveName")?;
    let move_power = parse_whole("movePower", cell(&values, move_power_col, "movePower")?)?;
    let speed = match speed_col {
        Some(col) => parse_whole("speed", cell(&values, col, "speed")?)?,
        None => DEFAULT_SPEED,
    };

    let record = MonsterRecord::new(name, hp, move_name, move_power, speed);
    record.check()?;
    Ok(record)
}

fn column(header: &[&str], key: &str) -> Option<usize> {
    header.iter().position(|h| h.eq_ignore_ascii_case(key))
}

fn cell<'a>(
    values: &[&'a str],
    col: usize,
    field: &'static str,
) -> std::result::Result<&'a str, MalformedReason> {
    values
        .get(col)
        .copied()
        .ok_or(MalformedReason::MissingValue(field))
}

/// Accepts any finite number with no fractional part that fits in `i32`.
fn parse_whole(field: &'static str, raw: &str) -> std::result::Result<i32, MalformedReason> {
    let not_numeric = || MalformedReason::NotNumeric {
        field,
        value: raw.to_string(),
    };
    if let Ok(n) = raw.parse::<i32>() {
        return Ok(n);
    }
    let n: f64 = raw.parse().map_err(|_| not_numeric())?;
    if !n.is_finite() || n.fract() != 0.0 || n < i32::MIN as f64 || n > i32::MAX as f64 {
        return Err(not_numeric());
    }
    Ok(n as i32)
}
