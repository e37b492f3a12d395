use crate::domain::{SongLogId, SongLogView};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One line of an exported ranking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub rank: usize,
    pub song_log_id: SongLogId,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub date: NaiveDate,
    pub elo_rating: f64,
    pub rating: f64,
}

impl RankingRow {
    /// Numbers already ordered rankings from 1.
    pub fn from_rankings(rankings: &[SongLogView]) -> Vec<Self> {
        rankings
            .iter()
            .enumerate()
            .map(|(i, view)| Self {
                rank: i + 1,
                song_log_id: view.song_log.id,
                title: view.song_log.song_title.clone(),
                artist: view.song_log.artist.clone(),
                album: view.song_log.album.clone(),
                date: view.song_log.date,
                elo_rating: view.song_log.elo_rating,
                rating: view.rating,
            })
            .collect()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("Invalid or missing filename extension: {0:?}")]
    UnsupportedExtension(std::path::PathBuf),
    #[error("Failed to write the export file")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize row")]
    Csv(#[from] csv::Error),
    #[error("Failed to serialize JSON")]
    Json(#[from] serde_json::Error),
}

fn write_to_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn write_to_csv<T: Serialize>(values: &[T], path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    values.iter().try_for_each(|val| writer.serialize(val))?;
    writer.flush()?;
    Ok(())
}

/// Writes `values` as CSV or JSON, chosen by the file extension.
pub fn write_slice_to_file<T: Serialize>(
    values: &[T],
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => write_to_json(values, path)?,
        Some("csv") => write_to_csv(values, path)?,
        _ => return Err(ExportError::UnsupportedExtension(path.to_path_buf())),
    }
    tracing::info!("Successfully wrote {} rows to {:?}", values.len(), path);
    Ok(())
}
